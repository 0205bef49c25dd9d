//! Per-point size and opacity from the sweep band.
//!
//! Given a point's height `h` and the sweep position `v`, with `d = h - v`:
//!
//! - `|d| < band_width`: inside the band. Size and opacity rise smoothly
//!   toward the band center, peaking at `peak_size` and full opacity.
//! - `d <= -band_width`: already swept; drawn at `base_size`, `revealed_opacity`.
//! - `d >= band_width`: not reached yet; hidden on the first pass, drawn at
//!   `dim_opacity` on every later pass.

use crate::sweep::RenderParams;

pub const DEFAULT_BAND_WIDTH: f32 = 0.4;
pub const DEFAULT_BASE_SIZE: f32 = 1.5;
pub const DEFAULT_PEAK_SIZE: f32 = 4.0;
pub const DEFAULT_REVEALED_OPACITY: f32 = 0.55;
pub const DEFAULT_DIM_OPACITY: f32 = 0.12;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointStyle {
    /// Half-height of the band, in the same units as point heights.
    pub band_width: f32,
    /// Point diameter in pixels outside the band.
    pub base_size: f32,
    /// Point diameter in pixels at the band center.
    pub peak_size: f32,
    pub revealed_opacity: f32,
    pub dim_opacity: f32,
}

impl Default for PointStyle {
    fn default() -> Self {
        Self {
            band_width: DEFAULT_BAND_WIDTH,
            base_size: DEFAULT_BASE_SIZE,
            peak_size: DEFAULT_PEAK_SIZE,
            revealed_opacity: DEFAULT_REVEALED_OPACITY,
            dim_opacity: DEFAULT_DIM_OPACITY,
        }
    }
}

/// Output of the point shader for one point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointAppearance {
    pub size: f32,
    pub opacity: f32,
    /// Band intensity in `[0, 1]`; 1 at the band center, 0 outside.
    pub glow: f32,
}

#[inline]
fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

impl PointStyle {
    #[inline]
    pub fn shade(&self, height: f32, params: RenderParams) -> PointAppearance {
        let d = height - params.value;

        if d.abs() < self.band_width {
            let glow = smoothstep(self.band_width, 0.0, d.abs());
            return PointAppearance {
                size: self.base_size + (self.peak_size - self.base_size) * glow,
                opacity: self.revealed_opacity + (1.0 - self.revealed_opacity) * glow,
                glow,
            };
        }

        let opacity = if d < 0.0 {
            self.revealed_opacity
        } else if params.initial {
            0.0
        } else {
            self.dim_opacity
        };

        PointAppearance {
            size: self.base_size,
            opacity,
            glow: 0.0,
        }
    }
}
