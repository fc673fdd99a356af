// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deterministic test doubles for the rasterization surface and texture device.

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use hashbrown::HashMap;
use peniko::color::Rgba8;

use crate::raster::{RasterSurface, TextPaint};
use crate::style::Color;
use crate::texture::AtlasTextureDevice;

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum SurfaceCall {
    Measure { text: String },
    Resize { width: u32, height: u32 },
    Clear,
    Stroke { text: String, color: Rgba8, line_width: f32 },
    Fill { text: String, color: Rgba8 },
}

/// Surface reporting a fixed advance (or a per-character one) and painting
/// the whole surface in the last color drawn.
#[derive(Debug, Default)]
pub(crate) struct MockSurface {
    default_advance: Option<f32>,
    advances: HashMap<String, f32>,
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    pub(crate) calls: Vec<SurfaceCall>,
}

impl MockSurface {
    pub(crate) fn with_advance(advance: f32) -> Self {
        Self {
            default_advance: Some(advance),
            ..Self::default()
        }
    }

    pub(crate) fn unmeasurable() -> Self {
        Self::default()
    }

    pub(crate) fn set_advance(mut self, text: &str, advance: f32) -> Self {
        self.advances.insert(text.into(), advance);
        self
    }

    pub(crate) fn measure_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, SurfaceCall::Measure { .. }))
            .count()
    }

    pub(crate) fn draw_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, SurfaceCall::Fill { .. }))
            .count()
    }

    fn paint(&mut self, color: Rgba8) {
        for px in self.pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&[color.r, color.g, color.b, color.a]);
        }
    }
}

impl RasterSurface for MockSurface {
    fn measure_text(&mut self, text: &str, _font: &str) -> Option<f32> {
        self.calls.push(SurfaceCall::Measure { text: text.into() });
        self.advances.get(text).copied().or(self.default_advance)
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.calls.push(SurfaceCall::Resize { width, height });
        self.width = width;
        self.height = height;
        self.pixels = vec![0; width as usize * height as usize * 4];
    }

    fn clear(&mut self) {
        self.calls.push(SurfaceCall::Clear);
        self.pixels.fill(0);
    }

    fn stroke_text(&mut self, text: &str, _paint: &TextPaint<'_>, color: Color, line_width: f32) {
        let color = color.to_rgba8();
        self.calls.push(SurfaceCall::Stroke {
            text: text.into(),
            color,
            line_width,
        });
        self.paint(color);
    }

    fn fill_text(&mut self, text: &str, _paint: &TextPaint<'_>, color: Color) {
        let color = color.to_rgba8();
        self.calls.push(SurfaceCall::Fill {
            text: text.into(),
            color,
        });
        self.paint(color);
    }

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Upload {
    pub(crate) texture: u32,
    pub(crate) x: u32,
    pub(crate) y: u32,
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) premultiplied: bool,
    pub(crate) bytes: usize,
}

/// Texture device that only records what it is asked to do.
#[derive(Debug, Default)]
pub(crate) struct RecordingDevice {
    pub(crate) fail_creation: bool,
    pub(crate) created: Vec<(u32, u32)>,
    pub(crate) destroyed: Vec<u32>,
    pub(crate) uploads: Vec<Upload>,
    pub(crate) premultiply: bool,
}

impl AtlasTextureDevice for RecordingDevice {
    type Texture = u32;

    fn create_texture(&mut self, width: u32, height: u32) -> Option<u32> {
        if self.fail_creation {
            return None;
        }
        self.created.push((width, height));
        Some(u32::try_from(self.created.len() - 1).unwrap())
    }

    fn set_premultiply_alpha(&mut self, enabled: bool) {
        self.premultiply = enabled;
    }

    fn upload_sub_image(
        &mut self,
        texture: &mut u32,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        pixels: &[u8],
    ) {
        self.uploads.push(Upload {
            texture: *texture,
            x,
            y,
            width,
            height,
            premultiplied: self.premultiply,
            bytes: pixels.len(),
        });
    }

    fn destroy_texture(&mut self, texture: u32) {
        self.destroyed.push(texture);
    }
}

#[cfg(feature = "std")]
std::thread_local! {
    static CAPTURED: core::cell::RefCell<Vec<(log::Level, String)>> =
        const { core::cell::RefCell::new(Vec::new()) };
}

/// Logger keeping records per thread, so parallel tests do not see each other.
#[cfg(feature = "std")]
struct CaptureLogger;

#[cfg(feature = "std")]
impl log::Log for CaptureLogger {
    fn enabled(&self, _metadata: &log::Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &log::Record<'_>) {
        let message = alloc::format!("{}", record.args());
        CAPTURED.with(|captured| captured.borrow_mut().push((record.level(), message)));
    }

    fn flush(&self) {}
}

/// Log records emitted on the current thread while `f` runs.
#[cfg(feature = "std")]
pub(crate) fn capture_logs(f: impl FnOnce()) -> Vec<(log::Level, String)> {
    static LOGGER: CaptureLogger = CaptureLogger;
    static INSTALL: std::sync::Once = std::sync::Once::new();
    INSTALL.call_once(|| {
        if log::set_logger(&LOGGER).is_ok() {
            log::set_max_level(log::LevelFilter::Trace);
        }
    });
    CAPTURED.with(|captured| captured.borrow_mut().clear());
    f();
    CAPTURED.with(|captured| captured.take())
}
