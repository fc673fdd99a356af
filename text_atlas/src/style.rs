// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text styles and their canonical fingerprints.

use alloc::format;
use alloc::string::{String, ToString};
use alloc::sync::Arc;
use core::fmt;

use peniko::color::palette::css::BLACK;
use peniko::color::{AlphaColor, Srgb};

use crate::math::round_hundredths;

/// Color type used for glyph fill and stroke.
pub type Color = AlphaColor<Srgb>;

/// Per-command style overrides.
///
/// Every field is optional; `None` means "inherit from the owning
/// [`TextStyle`]". An all-`None` value is what a draw command without a style
/// carries.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StyleAttributes {
    /// Font family name.
    pub font_family: Option<String>,
    /// Nominal point size.
    pub size: Option<f32>,
    /// Bold weight.
    pub bold: Option<bool>,
    /// Italic slant.
    pub italic: Option<bool>,
    /// Fill color.
    pub text_color: Option<Color>,
    /// Stroke color.
    pub stroke_color: Option<Color>,
    /// Stroke width in logical pixels. Zero disables the stroke pass.
    pub stroke: Option<f32>,
}

impl StyleAttributes {
    /// Returns `true` if no attribute is overridden.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// The complete style of a text owner.
///
/// Device scale factors live here too, as they change the rasterized pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct TextStyle {
    /// Font family name.
    pub font_family: String,
    /// Nominal point size. Also used as the measured height of every glyph.
    pub size: f32,
    /// Bold weight.
    pub bold: bool,
    /// Italic slant.
    pub italic: bool,
    /// Fill color.
    pub text_color: Color,
    /// Stroke color.
    pub stroke_color: Color,
    /// Stroke width in logical pixels. Zero disables the stroke pass.
    pub stroke: f32,
    /// Horizontal device scale.
    pub scale_x: f32,
    /// Vertical device scale.
    pub scale_y: f32,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_family: String::from("Arial"),
            size: 30.0,
            bold: false,
            italic: false,
            text_color: BLACK,
            stroke_color: BLACK,
            stroke: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
        }
    }
}

impl TextStyle {
    /// Applies `overrides` on top of this style.
    ///
    /// Device scale is never overridden per command.
    pub fn merge(&self, overrides: &StyleAttributes) -> Self {
        Self {
            font_family: overrides
                .font_family
                .clone()
                .unwrap_or_else(|| self.font_family.clone()),
            size: overrides.size.unwrap_or(self.size),
            bold: overrides.bold.unwrap_or(self.bold),
            italic: overrides.italic.unwrap_or(self.italic),
            text_color: overrides.text_color.unwrap_or(self.text_color),
            stroke_color: overrides.stroke_color.unwrap_or(self.stroke_color),
            stroke: overrides.stroke.unwrap_or(self.stroke),
            scale_x: self.scale_x,
            scale_y: self.scale_y,
        }
    }

    /// The CSS-style font shorthand used to measure and draw, e.g. `"italic bold 24px Arial"`.
    pub fn font_string(&self) -> String {
        format!(
            "{}{}{}px {}",
            if self.italic { "italic " } else { "" },
            if self.bold { "bold " } else { "" },
            self.size,
            self.font_family,
        )
    }
}

/// Canonical identity of a resolved [`TextStyle`].
///
/// Two fingerprints with the same [`description`](Self::description) rasterize
/// any character to identical pixels, which is what lets the glyph cache use
/// the description as key material.
#[derive(Clone, Debug, PartialEq)]
pub struct StyleFingerprint {
    style: TextStyle,
    font: Arc<str>,
    description: Arc<str>,
}

impl StyleFingerprint {
    /// Builds the fingerprint of a fully resolved style.
    ///
    /// Scale factors are rounded to two decimals before anything else sees them.
    pub fn new(mut style: TextStyle) -> Self {
        style.scale_x = round_hundredths(style.scale_x);
        style.scale_y = round_hundredths(style.scale_y);
        let font: Arc<str> = Arc::from(style.font_string());
        let description = Description {
            font: &font,
            style: &style,
        }
        .to_string();
        Self {
            style,
            font,
            description: Arc::from(description),
        }
    }

    /// Resolves `overrides` against `defaults` and fingerprints the result.
    pub fn build(defaults: &TextStyle, overrides: &StyleAttributes) -> Self {
        Self::new(defaults.merge(overrides))
    }

    /// The resolved style, with rounded scale factors.
    pub fn style(&self) -> &TextStyle {
        &self.style
    }

    /// The resolved font string.
    pub fn font(&self) -> &str {
        &self.font
    }

    /// Shared handle to the resolved font string.
    pub fn font_arc(&self) -> &Arc<str> {
        &self.font
    }

    /// Canonical description of every pixel-affecting attribute.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Shared handle to the canonical description.
    pub fn description_arc(&self) -> &Arc<str> {
        &self.description
    }

    /// Nominal point size.
    pub fn size(&self) -> f32 {
        self.style.size
    }

    /// Stroke width in logical pixels.
    pub fn stroke(&self) -> f32 {
        self.style.stroke
    }

    /// Rounded horizontal device scale.
    pub fn scale_x(&self) -> f32 {
        self.style.scale_x
    }

    /// Rounded vertical device scale.
    pub fn scale_y(&self) -> f32 {
        self.style.scale_y
    }
}

/// Writes the canonical description.
///
/// Order is fixed: font, fill, stroke color, doubled stroke width (only when
/// stroking), scale x, scale y.
struct Description<'a> {
    font: &'a str,
    style: &'a TextStyle,
}

impl fmt::Display for Description<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.font)?;
        write!(f, "-{}", Hex(self.style.text_color))?;
        write!(f, "-{}", Hex(self.style.stroke_color))?;
        if self.style.stroke != 0.0 {
            write!(f, "-{}", self.style.stroke * 2.0)?;
        }
        write!(f, "-{}-{}", self.style.scale_x, self.style.scale_y)
    }
}

/// `#rrggbbaa` formatting of a color.
struct Hex(Color);

impl fmt::Display for Hex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = self.0.to_rgba8();
        write!(f, "#{:02x}{:02x}{:02x}{:02x}", c.r, c.g, c.b, c.a)
    }
}
