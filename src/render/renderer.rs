//! Low-level rendering primitives.
//!
//! Provides the [`Renderer`] struct which owns the color buffer, draws point
//! splats, and exports frames.

use std::path::Path;

use image::{ImageResult, RgbaImage};

use super::framebuffer::FrameBuffer;
use crate::colors;

pub struct Renderer {
    color_buffer: Vec<u32>,
    width: u32,
    height: u32,
}

impl Renderer {
    pub fn new(width: u32, height: u32) -> Self {
        let size = (width * height) as usize;
        Self {
            color_buffer: vec![colors::BACKGROUND; size],
            width,
            height,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        let size = (width * height) as usize;
        self.color_buffer = vec![colors::BACKGROUND; size];
        self.width = width;
        self.height = height;
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn clear(&mut self, color: u32) {
        self.color_buffer.fill(color);
    }

    /// Draw a round, alpha-blended point of `size` pixels at (x, y).
    #[inline]
    pub fn draw_point(&mut self, x: f32, y: f32, size: f32, color: u32, opacity: f32) {
        self.as_framebuffer().blend_disc(x, y, size, color, opacity);
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x < self.width && y < self.height {
            Some(self.color_buffer[(y * self.width + x) as usize])
        } else {
            None
        }
    }

    /// The color buffer as bytes, in native-endian ARGB8888 for SDL upload.
    pub fn as_bytes(&self) -> &[u8] {
        // SAFETY: u32 has no padding and a stricter alignment than u8; the
        // byte slice covers exactly the buffer's memory and borrows self.
        unsafe {
            std::slice::from_raw_parts(
                self.color_buffer.as_ptr() as *const u8,
                self.color_buffer.len() * 4,
            )
        }
    }

    /// Get a mutable FrameBuffer view into the color buffer.
    pub fn as_framebuffer(&mut self) -> FrameBuffer<'_> {
        FrameBuffer::new(&mut self.color_buffer, self.width, self.height)
    }

    /// Copy of the current frame as an RGBA image.
    pub fn to_image(&self) -> RgbaImage {
        RgbaImage::from_fn(self.width, self.height, |x, y| {
            let argb = self.color_buffer[(y * self.width + x) as usize];
            let [a, r, g, b] = argb.to_be_bytes();
            image::Rgba([r, g, b, a])
        })
    }

    /// Write the current frame to an image file; format follows the extension.
    pub fn save(&self, path: impl AsRef<Path>) -> ImageResult<()> {
        self.to_image().save(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_fills_buffer() {
        let mut renderer = Renderer::new(4, 3);
        renderer.clear(0xFF123456);
        assert_eq!(renderer.pixel(3, 2), Some(0xFF123456));
        assert_eq!(renderer.pixel(4, 0), None);
        assert_eq!(renderer.as_bytes().len(), 4 * 3 * 4);
    }

    #[test]
    fn draw_point_blends_over_background() {
        let mut renderer = Renderer::new(8, 8);
        renderer.clear(0xFF000000);
        renderer.draw_point(4.0, 4.0, 2.0, 0xFFFFFFFF, 0.5);
        assert_eq!(renderer.pixel(4, 4), Some(0xFF808080));
        assert_eq!(renderer.pixel(0, 0), Some(0xFF000000));
    }

    #[test]
    fn image_export_converts_argb_to_rgba() {
        let mut renderer = Renderer::new(2, 1);
        renderer.clear(0xFF102030);
        let img = renderer.to_image();
        assert_eq!(img.get_pixel(1, 0).0, [0x10, 0x20, 0x30, 0xFF]);
    }

    #[test]
    fn resize_reallocates() {
        let mut renderer = Renderer::new(2, 2);
        renderer.resize(5, 4);
        assert_eq!((renderer.width(), renderer.height()), (5, 4));
        assert_eq!(renderer.as_bytes().len(), 5 * 4 * 4);
    }
}
