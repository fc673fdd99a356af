// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The GPU side of the atlas.

/// A device that owns atlas page textures.
///
/// Pixel data handed to the device is tightly packed, row-major RGBA8 with
/// straight (non-premultiplied) alpha, exactly as a [`RasterSurface`] produces it.
///
/// [`RasterSurface`]: crate::RasterSurface
pub trait AtlasTextureDevice {
    /// Handle to one page texture.
    type Texture;

    /// Creates a texture for a page of the given size.
    ///
    /// Returns `None` if the device could not create it.
    fn create_texture(&mut self, width: u32, height: u32) -> Option<Self::Texture>;

    /// Enables or disables alpha premultiplication for subsequent uploads.
    ///
    /// The glyph cache turns this on around each upload and back off
    /// afterwards, so other users of the device see the default state.
    fn set_premultiply_alpha(&mut self, enabled: bool);

    /// Writes a `width` x `height` block of pixels at `(x, y)` of `texture`,
    /// leaving the rest of the texture untouched.
    fn upload_sub_image(
        &mut self,
        texture: &mut Self::Texture,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        pixels: &[u8],
    );

    /// Releases a texture created by this device.
    fn destroy_texture(&mut self, texture: Self::Texture);
}
