// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Float helpers shared by styling and rasterization.

#[cfg(feature = "libm")]
#[allow(unused_imports, reason = "unused when std is also enabled")]
use core_maths::CoreFloat;

/// Rounds `value` to two decimal digits.
///
/// Device scale factors go through this before becoming part of a style's
/// identity, so floating point noise does not multiply cache entries.
pub(crate) fn round_hundredths(value: f32) -> f32 {
    (value * 100.0).round() / 100.0
}

/// Rounds a logical extent up to whole pixels. Negative and NaN inputs map to zero.
#[expect(
    clippy::cast_possible_truncation,
    reason = "value is clamped to be non-negative and saturates at u32::MAX"
)]
pub(crate) fn ceil_px(value: f32) -> u32 {
    if value.is_nan() || value <= 0.0 {
        0
    } else {
        value.ceil() as u32
    }
}
