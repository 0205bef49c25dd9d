//! Frame buffer abstraction for 2D pixel access.
//!
//! Provides a safe view into a color buffer with bounds-checked, alpha-blended
//! writes.

use crate::colors;

/// A view into a color buffer.
///
/// Wraps a 1D slice with width/height metadata to enable safe 2D pixel access.
/// This is a borrowed view, not an owning type.
pub struct FrameBuffer<'a> {
    color_buffer: &'a mut [u32],
    width: u32,
    height: u32,
}

impl<'a> FrameBuffer<'a> {
    /// Create a new FrameBuffer view from a buffer slice and dimensions.
    ///
    /// # Panics
    /// Panics in debug builds if the buffer length doesn't match width * height
    pub fn new(color_buffer: &'a mut [u32], width: u32, height: u32) -> Self {
        debug_assert_eq!(
            color_buffer.len(),
            (width * height) as usize,
            "Color buffer size doesn't match dimensions"
        );
        Self {
            color_buffer,
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            Some((y as u32 * self.width + x as u32) as usize)
        } else {
            None
        }
    }

    /// Blend `color` over the pixel at (x, y) with the given opacity.
    /// Silently ignores out-of-bounds coordinates.
    #[inline]
    pub fn blend_pixel(&mut self, x: i32, y: i32, color: u32, opacity: f32) {
        if let Some(idx) = self.index(x, y) {
            self.color_buffer[idx] = colors::blend(self.color_buffer[idx], color, opacity);
        }
    }

    /// Get the color at (x, y), or None if out of bounds.
    #[inline]
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<u32> {
        self.index(x, y).map(|idx| self.color_buffer[idx])
    }

    /// Blend a filled disc of `diameter` pixels centered at (cx, cy).
    ///
    /// Discs smaller than one pixel still cover the pixel under their center,
    /// with opacity scaled by their area so tiny points fade instead of
    /// vanishing.
    pub fn blend_disc(&mut self, cx: f32, cy: f32, diameter: f32, color: u32, opacity: f32) {
        if opacity <= 0.0 || diameter <= 0.0 {
            return;
        }

        if diameter < 1.0 {
            self.blend_pixel(cx.floor() as i32, cy.floor() as i32, color, opacity * diameter * diameter);
            return;
        }

        let radius = diameter * 0.5;
        let r2 = radius * radius;
        let x0 = (cx - radius).floor() as i32;
        let x1 = (cx + radius).ceil() as i32;
        let y0 = (cy - radius).floor() as i32;
        let y1 = (cy + radius).ceil() as i32;

        for y in y0..y1 {
            for x in x0..x1 {
                // Sample at pixel centers
                let dx = x as f32 + 0.5 - cx;
                let dy = y as f32 + 0.5 - cy;
                if dx * dx + dy * dy <= r2 {
                    self.blend_pixel(x, y, color, opacity);
                }
            }
        }
    }
}
