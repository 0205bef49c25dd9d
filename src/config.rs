//! Reveal configuration.
//!
//! A single [`RevealConfig`] collects every tunable of the point-cloud reveal.
//! Defaults are the module constants below; setters consume and return the
//! config so overrides chain:
//!
//! ```ignore
//! let config = RevealConfig::default()
//!     .with_sample_count(30_000)
//!     .with_height_axis(Axis::Z);
//! ```

use crate::math::vec3::Axis;
use crate::render::PointStyle;
use crate::sweep::{SweepConfig, DEFAULT_ADVANCE_RATE, DEFAULT_WAIT_DURATION};

pub const DEFAULT_SAMPLE_COUNT: usize = 15_000;
/// Extra sweep travel below the lowest and above the highest point. Never
/// less than the style's band width, so the band enters and leaves the cloud
/// completely.
pub const DEFAULT_BAND_MARGIN: f32 = 0.4;
/// Model spin around the vertical axis, radians per second.
pub const DEFAULT_SPIN_RATE: f32 = 0.15;

pub const WINDOW_WIDTH: u32 = 800;
pub const WINDOW_HEIGHT: u32 = 600;
pub const FPS: u64 = 60;

#[derive(Clone, Debug, PartialEq)]
pub struct RevealConfig {
    pub sample_count: usize,
    pub height_axis: Axis,
    pub band_margin: f32,
    pub advance_rate: f32,
    pub wait_duration: f32,
    pub style: PointStyle,
    pub spin_rate: f32,
    pub window_width: u32,
    pub window_height: u32,
    pub fps: u64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            sample_count: DEFAULT_SAMPLE_COUNT,
            height_axis: Axis::default(),
            band_margin: DEFAULT_BAND_MARGIN,
            advance_rate: DEFAULT_ADVANCE_RATE,
            wait_duration: DEFAULT_WAIT_DURATION,
            style: PointStyle::default(),
            spin_rate: DEFAULT_SPIN_RATE,
            window_width: WINDOW_WIDTH,
            window_height: WINDOW_HEIGHT,
            fps: FPS,
        }
    }
}

impl RevealConfig {
    pub fn with_sample_count(mut self, sample_count: usize) -> Self {
        self.sample_count = sample_count;
        self
    }

    pub fn with_height_axis(mut self, axis: Axis) -> Self {
        self.height_axis = axis;
        self
    }

    pub fn with_timing(mut self, advance_rate: f32, wait_duration: f32) -> Self {
        self.advance_rate = advance_rate;
        self.wait_duration = wait_duration;
        self
    }

    pub fn with_style(mut self, style: PointStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_spin_rate(mut self, spin_rate: f32) -> Self {
        self.spin_rate = spin_rate;
        self
    }

    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.window_width = width;
        self.window_height = height;
        self
    }

    /// Margin actually applied to the sweep bounds.
    pub fn effective_band_margin(&self) -> f32 {
        self.band_margin.max(self.style.band_width)
    }

    /// Sweep timeline for a cloud whose heights span `[min_height, max_height]`.
    pub fn sweep_for_heights(&self, min_height: f32, max_height: f32) -> SweepConfig {
        SweepConfig::fit_heights(min_height, max_height, self.effective_band_margin())
            .with_advance_rate(self.advance_rate)
            .with_wait_duration(self.wait_duration)
    }

    /// Target frame time in milliseconds.
    pub fn frame_target_ms(&self) -> f64 {
        1000.0 / self.fps.max(1) as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn defaults() {
        let config = RevealConfig::default();
        assert_eq!(config.sample_count, DEFAULT_SAMPLE_COUNT);
        assert_eq!(config.height_axis, Axis::Y);
        assert_relative_eq!(config.frame_target_ms(), 1000.0 / 60.0);
    }

    #[test]
    fn setters_chain() {
        let config = RevealConfig::default()
            .with_sample_count(42)
            .with_height_axis(Axis::Z)
            .with_timing(3.0, 1.0)
            .with_window_size(320, 240);
        assert_eq!(config.sample_count, 42);
        assert_eq!(config.height_axis, Axis::Z);
        assert_eq!((config.window_width, config.window_height), (320, 240));
        assert_eq!(config.advance_rate, 3.0);
    }

    #[test]
    fn sweep_bounds_include_margin() {
        let config = RevealConfig::default().with_timing(2.0, 1.0);
        let sweep = config.sweep_for_heights(-1.0, 1.0);
        assert_relative_eq!(sweep.min_bound, -1.0 - DEFAULT_BAND_MARGIN);
        assert_relative_eq!(sweep.max_bound, 1.0 + DEFAULT_BAND_MARGIN);
        assert_eq!(sweep.advance_rate, 2.0);
        assert_eq!(sweep.wait_duration, 1.0);
    }

    #[test]
    fn wide_band_widens_sweep_bounds() {
        let style = PointStyle {
            band_width: 1.0,
            ..PointStyle::default()
        };
        let config = RevealConfig::default().with_style(style);
        let sweep = config.sweep_for_heights(-1.0, 1.0);
        assert_relative_eq!(sweep.min_bound, -2.0);
        assert_relative_eq!(sweep.max_bound, 2.0);

        // Nothing is lit before the first frame.
        let params = crate::sweep::SweepAnimator::new(sweep).params();
        for height in [-1.0, 0.0, 1.0] {
            assert_eq!(style.shade(height, params).opacity, 0.0);
        }
    }
}
