// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Error returned when caller-provided input cannot be used.
///
/// Rasterization, packing and pooling never fail hard; they degrade glyph by
/// glyph and report through `log`. Only configuration and draw data coming
/// from outside the crate are validated with this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    /// The non-exhaustive category describing this error.
    kind: ErrorKind,

    /// Position in the offending input, when there is one.
    index: Option<usize>,

    /// Short description of what was wrong.
    reason: &'static str,
}

impl Error {
    /// The machine-readable category for this error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Index of the offending element, for errors about sequences.
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// Human readable reason.
    pub fn reason(&self) -> &'static str {
        self.reason
    }

    pub(crate) fn invalid_config(reason: &'static str) -> Self {
        Self {
            kind: ErrorKind::InvalidConfig,
            index: None,
            reason,
        }
    }

    pub(crate) fn malformed_draw_data(index: usize, reason: &'static str) -> Self {
        Self {
            kind: ErrorKind::MalformedDrawData,
            index: Some(index),
            reason,
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.kind {
            ErrorKind::InvalidConfig => write!(f, "invalid atlas config: {}", self.reason),
            ErrorKind::MalformedDrawData => match self.index {
                Some(index) => write!(f, "malformed draw data at {index}: {}", self.reason),
                None => write!(f, "malformed draw data: {}", self.reason),
            },
        }
    }
}

impl core::error::Error for Error {}

/// The non-exhaustive category of an error.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// An [`AtlasConfig`](crate::AtlasConfig) cannot produce usable pages.
    InvalidConfig,

    /// A flat draw data array is not made of well-typed groups of four.
    MalformedDrawData,
}
