// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Decoding the flat draw data produced by text layout.

use alloc::string::String;
use alloc::vec::Vec;

use crate::Error;
use crate::style::StyleAttributes;

/// Number of data per draw command: anchor x, anchor y, text, style.
const GROUP_LEN: usize = 4;

/// One element of a flat draw data array.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawDatum {
    /// An anchor coordinate.
    Number(f32),
    /// The text of a command.
    Text(String),
    /// Style overrides of a command.
    Style(StyleAttributes),
    /// No style overrides.
    Absent,
}

/// A positioned string to turn into glyphs.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DrawCommand {
    /// Anchor x coordinate.
    pub anchor_x: f32,
    /// Anchor y coordinate.
    pub anchor_y: f32,
    /// Text of the line.
    pub text: String,
    /// Overrides applied on top of the owner's style.
    pub style: StyleAttributes,
}

impl DrawCommand {
    /// A command with no style overrides.
    pub fn new(anchor_x: f32, anchor_y: f32, text: impl Into<String>) -> Self {
        Self {
            anchor_x,
            anchor_y,
            text: text.into(),
            style: StyleAttributes::default(),
        }
    }

    /// Replaces the style overrides.
    #[must_use]
    pub fn with_style(mut self, style: StyleAttributes) -> Self {
        self.style = style;
        self
    }
}

/// Splits `data` into commands of `[x, y, text, style]`.
///
/// An [`DrawDatum::Absent`] style means every attribute is inherited.
pub fn parse_draw_data(data: &[DrawDatum]) -> Result<Vec<DrawCommand>, Error> {
    if data.len() % GROUP_LEN != 0 {
        return Err(Error::malformed_draw_data(
            data.len() - data.len() % GROUP_LEN,
            "incomplete group at the end",
        ));
    }
    data.chunks_exact(GROUP_LEN)
        .enumerate()
        .map(|(group, chunk)| {
            let base = group * GROUP_LEN;
            let (x, y, text, style) = (&chunk[0], &chunk[1], &chunk[2], &chunk[3]);
            let DrawDatum::Number(anchor_x) = x else {
                return Err(Error::malformed_draw_data(base, "expected anchor x"));
            };
            let DrawDatum::Number(anchor_y) = y else {
                return Err(Error::malformed_draw_data(base + 1, "expected anchor y"));
            };
            let DrawDatum::Text(text) = text else {
                return Err(Error::malformed_draw_data(base + 2, "expected text"));
            };
            let style = match style {
                DrawDatum::Style(style) => style.clone(),
                DrawDatum::Absent => StyleAttributes::default(),
                _ => return Err(Error::malformed_draw_data(base + 3, "expected style")),
            };
            Ok(DrawCommand {
                anchor_x: *anchor_x,
                anchor_y: *anchor_y,
                text: text.clone(),
                style,
            })
        })
        .collect()
}
