// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Texture device keeping atlas pages in memory.
//!
//! Useful for software rendering, and for inspecting the atlas in tests.

use alloc::vec;
use alloc::vec::Vec;

use crate::style::Color;
use crate::texture::AtlasTextureDevice;

/// An RGBA8 atlas page held in memory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CpuTexture {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl CpuTexture {
    fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * 4],
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row-major RGBA8 data.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// The pixel at (`x`, `y`), or `None` outside the texture.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y as usize * self.width as usize + x as usize) * 4;
        let mut px = [0; 4];
        px.copy_from_slice(&self.data[offset..offset + 4]);
        Some(px)
    }
}

/// [`AtlasTextureDevice`] backed by [`CpuTexture`]s.
#[derive(Debug, Default)]
pub struct CpuTextureDevice {
    premultiply_alpha: bool,
    max_texture_size: Option<u32>,
    live_textures: usize,
}

impl CpuTextureDevice {
    /// Creates a device without a texture size limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a device refusing textures larger than `max` on either side.
    pub fn with_max_texture_size(max: u32) -> Self {
        Self {
            max_texture_size: Some(max),
            ..Self::default()
        }
    }

    /// Whether uploads currently premultiply alpha.
    pub fn premultiply_alpha(&self) -> bool {
        self.premultiply_alpha
    }

    /// Number of textures created and not yet destroyed.
    pub fn live_textures(&self) -> usize {
        self.live_textures
    }
}

impl AtlasTextureDevice for CpuTextureDevice {
    type Texture = CpuTexture;

    fn create_texture(&mut self, width: u32, height: u32) -> Option<CpuTexture> {
        if width == 0 || height == 0 {
            return None;
        }
        if let Some(max) = self.max_texture_size {
            if width > max || height > max {
                return None;
            }
        }
        self.live_textures += 1;
        Some(CpuTexture::new(width, height))
    }

    fn set_premultiply_alpha(&mut self, enabled: bool) {
        self.premultiply_alpha = enabled;
    }

    fn upload_sub_image(
        &mut self,
        texture: &mut CpuTexture,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        pixels: &[u8],
    ) {
        // Clip against the texture; the source keeps its own stride.
        let src_stride = width as usize * 4;
        let copy_width = width.min(texture.width.saturating_sub(x)) as usize;
        let copy_height = height.min(texture.height.saturating_sub(y)) as usize;
        if copy_width == 0 || copy_height == 0 {
            return;
        }
        let dst_stride = texture.width as usize * 4;

        for row in 0..copy_height {
            let src_start = row * src_stride;
            let Some(src) = pixels.get(src_start..src_start + copy_width * 4) else {
                break;
            };
            let dst_start = (y as usize + row) * dst_stride + x as usize * 4;
            let dst = &mut texture.data[dst_start..dst_start + copy_width * 4];
            if self.premultiply_alpha {
                for (out, px) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
                    let premul = Color::from_rgba8(px[0], px[1], px[2], px[3])
                        .premultiply()
                        .to_rgba8();
                    out.copy_from_slice(&[premul.r, premul.g, premul.b, premul.a]);
                }
            } else {
                dst.copy_from_slice(src);
            }
        }
    }

    fn destroy_texture(&mut self, texture: CpuTexture) {
        drop(texture);
        self.live_textures = self.live_textures.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(width: u32, height: u32, px: [u8; 4]) -> Vec<u8> {
        px.repeat(width as usize * height as usize)
    }

    #[test]
    fn upload_writes_the_target_rectangle_only() {
        let mut device = CpuTextureDevice::new();
        let mut texture = device.create_texture(8, 8).unwrap();
        device.upload_sub_image(&mut texture, 2, 3, 2, 2, &solid(2, 2, [1, 2, 3, 255]));

        assert_eq!(texture.pixel(2, 3), Some([1, 2, 3, 255]));
        assert_eq!(texture.pixel(3, 4), Some([1, 2, 3, 255]));
        assert_eq!(texture.pixel(1, 3), Some([0; 4]));
        assert_eq!(texture.pixel(4, 3), Some([0; 4]));
        assert_eq!(texture.pixel(2, 5), Some([0; 4]));
        assert_eq!(texture.pixel(8, 0), None);
    }

    #[test]
    fn premultiplied_upload() {
        let mut device = CpuTextureDevice::new();
        let mut texture = device.create_texture(4, 1).unwrap();
        let pixels = [
            255, 255, 255, 0, //
            200, 100, 50, 255, //
            255, 0, 0, 0, //
            10, 20, 30, 0,
        ];
        device.set_premultiply_alpha(true);
        device.upload_sub_image(&mut texture, 0, 0, 4, 1, &pixels);

        assert_eq!(texture.pixel(0, 0), Some([0, 0, 0, 0]));
        assert_eq!(texture.pixel(1, 0), Some([200, 100, 50, 255]));
        assert_eq!(texture.pixel(2, 0), Some([0, 0, 0, 0]));
    }

    #[test]
    fn straight_upload_keeps_color_under_zero_alpha() {
        let mut device = CpuTextureDevice::new();
        let mut texture = device.create_texture(1, 1).unwrap();
        device.upload_sub_image(&mut texture, 0, 0, 1, 1, &[255, 255, 255, 0]);
        assert_eq!(texture.pixel(0, 0), Some([255, 255, 255, 0]));
    }

    #[test]
    fn uploads_are_clipped_to_the_texture() {
        let mut device = CpuTextureDevice::new();
        let mut texture = device.create_texture(4, 4).unwrap();
        device.upload_sub_image(&mut texture, 3, 3, 2, 2, &solid(2, 2, [9, 9, 9, 255]));
        assert_eq!(texture.pixel(3, 3), Some([9, 9, 9, 255]));
        assert_eq!(texture.data().iter().filter(|b| **b == 9).count(), 3);

        // Entirely outside: nothing is written.
        let before = texture.clone();
        device.upload_sub_image(&mut texture, 9, 3, 1, 1, &[1, 2, 3, 4]);
        device.upload_sub_image(&mut texture, 0, 4, 1, 1, &[1, 2, 3, 4]);
        device.upload_sub_image(&mut texture, 4, 0, 1, 1, &[1, 2, 3, 4]);
        assert_eq!(texture, before);
    }

    #[test]
    fn size_limit_and_lifetime() {
        let mut device = CpuTextureDevice::with_max_texture_size(256);
        assert!(device.create_texture(512, 512).is_none());
        assert!(device.create_texture(0, 16).is_none());
        let texture = device.create_texture(256, 128).unwrap();
        assert_eq!((texture.width(), texture.height()), (256, 128));
        assert_eq!(device.live_textures(), 1);
        device.destroy_texture(texture);
        assert_eq!(device.live_textures(), 0);
    }
}
