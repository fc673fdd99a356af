// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared helpers.

use std::collections::HashMap;

use text_atlas::color::Rgba8;
use text_atlas::renderers::cpu::CpuTextureDevice;
use text_atlas::{AtlasConfig, Color, LabelAssembler, RasterSurface, TextPaint};

/// Surface where every character is a solid block of the fill color,
/// `advance` pixels wide.
#[derive(Debug, Default)]
pub(crate) struct BlockSurface {
    advance: f32,
    advances: HashMap<String, f32>,
    pub(crate) measured: Vec<String>,
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl BlockSurface {
    pub(crate) fn new(advance: f32) -> Self {
        Self {
            advance,
            ..Self::default()
        }
    }

    pub(crate) fn with(mut self, text: &str, advance: f32) -> Self {
        self.advances.insert(text.to_owned(), advance);
        self
    }

    fn paint(&mut self, color: Rgba8) {
        for px in self.pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&[color.r, color.g, color.b, color.a]);
        }
    }
}

impl RasterSurface for BlockSurface {
    fn measure_text(&mut self, text: &str, _font: &str) -> Option<f32> {
        self.measured.push(text.to_owned());
        Some(self.advances.get(text).copied().unwrap_or(self.advance))
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.pixels = vec![0; width as usize * height as usize * 4];
    }

    fn clear(&mut self) {
        self.pixels.fill(0);
    }

    fn stroke_text(&mut self, _text: &str, _paint: &TextPaint<'_>, color: Color, _width: f32) {
        self.paint(color.to_rgba8());
    }

    fn fill_text(&mut self, _text: &str, _paint: &TextPaint<'_>, color: Color) {
        self.paint(color.to_rgba8());
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

pub(crate) type Assembler = LabelAssembler<BlockSurface, CpuTextureDevice>;

pub(crate) fn assembler(page_size: u32, surface: BlockSurface) -> Assembler {
    let config = AtlasConfig {
        page_width: page_size,
        page_height: page_size,
        ..AtlasConfig::default()
    };
    LabelAssembler::new(config, surface, CpuTextureDevice::new()).unwrap()
}
