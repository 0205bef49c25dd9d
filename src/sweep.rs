//! The sweep animation timeline.
//!
//! A scalar sweep position climbs from `min_bound` to `max_bound`, holds at
//! the top for `wait_duration` seconds, snaps back, and repeats forever. The
//! renderer compares each point's height against the sweep position to draw a
//! moving band.
//!
//! The transition function is pure: [`SweepState::advance`] takes the old
//! state and a frame delta and returns the new state plus the parameters the
//! renderer needs. [`SweepAnimator`] is a thin owner for the frame loop.

/// Values at or above `max_bound - BOUND_EPSILON` count as having reached it,
/// so float accumulation over many frames does not add a stray extra frame.
const BOUND_EPSILON: f32 = 1e-5;

pub const DEFAULT_MIN_BOUND: f32 = -1.0;
pub const DEFAULT_MAX_BOUND: f32 = 1.4;
pub const DEFAULT_ADVANCE_RATE: f32 = 1.5;
pub const DEFAULT_WAIT_DURATION: f32 = 2.5;

/// Timeline parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SweepConfig {
    /// Sweep position at the start of every pass.
    pub min_bound: f32,
    /// Sweep position where a pass ends and the pause begins.
    pub max_bound: f32,
    /// Sweep units per second.
    pub advance_rate: f32,
    /// Seconds to hold at `max_bound` before looping.
    pub wait_duration: f32,
    /// Optional cap on a single frame delta. `None` honors every finite delta.
    pub max_frame_delta: Option<f32>,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            min_bound: DEFAULT_MIN_BOUND,
            max_bound: DEFAULT_MAX_BOUND,
            advance_rate: DEFAULT_ADVANCE_RATE,
            wait_duration: DEFAULT_WAIT_DURATION,
            max_frame_delta: None,
        }
    }
}

impl SweepConfig {
    /// Bounds that start the band fully below the lowest point and end it
    /// fully above the highest one.
    pub fn fit_heights(min_height: f32, max_height: f32, band_margin: f32) -> Self {
        Self {
            min_bound: min_height - band_margin,
            max_bound: max_height + band_margin,
            ..Self::default()
        }
    }

    pub fn with_advance_rate(mut self, advance_rate: f32) -> Self {
        self.advance_rate = advance_rate;
        self
    }

    pub fn with_wait_duration(mut self, wait_duration: f32) -> Self {
        self.wait_duration = wait_duration;
        self
    }

    /// Seconds a single pass takes from `min_bound` to `max_bound`.
    pub fn pass_duration(&self) -> f32 {
        (self.max_bound - self.min_bound) / self.advance_rate
    }

    pub fn with_max_frame_delta(mut self, max_frame_delta: f32) -> Self {
        self.max_frame_delta = Some(max_frame_delta);
        self
    }

    /// NaN, infinities and negative deltas become zero. Finite deltas pass
    /// through unchanged unless `max_frame_delta` is set.
    #[inline]
    pub fn sanitize_delta(&self, delta: f32) -> f32 {
        if !delta.is_finite() || delta < 0.0 {
            return 0.0;
        }
        match self.max_frame_delta {
            Some(cap) => delta.min(cap),
            None => delta,
        }
    }
}

/// Phase tag without associated data, for display and comparisons.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SweepPhase {
    Uninitialized,
    Animating,
    Waiting,
    Reset,
}

/// Animation state. `initial` is true until the first loop back to the start.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum SweepState {
    #[default]
    Uninitialized,
    Animating {
        value: f32,
        initial: bool,
    },
    Waiting {
        value: f32,
        wait_timer: f32,
        initial: bool,
    },
    Reset {
        value: f32,
        initial: bool,
    },
}

/// Per-frame inputs for the renderer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderParams {
    /// Current sweep position.
    pub value: f32,
    /// First pass: points ahead of the sweep are hidden instead of dimmed.
    pub initial: bool,
}

impl SweepState {
    pub fn phase(&self) -> SweepPhase {
        match self {
            SweepState::Uninitialized => SweepPhase::Uninitialized,
            SweepState::Animating { .. } => SweepPhase::Animating,
            SweepState::Waiting { .. } => SweepPhase::Waiting,
            SweepState::Reset { .. } => SweepPhase::Reset,
        }
    }

    /// Current render parameters. Before the first frame the sweep sits at
    /// `min_bound` on the initial pass.
    pub fn params(&self, config: &SweepConfig) -> RenderParams {
        match *self {
            SweepState::Uninitialized => RenderParams {
                value: config.min_bound,
                initial: true,
            },
            SweepState::Animating { value, initial }
            | SweepState::Waiting { value, initial, .. }
            | SweepState::Reset { value, initial } => RenderParams { value, initial },
        }
    }

    /// Advances the timeline by one frame.
    ///
    /// The first frame after `Uninitialized` starts a pass at `min_bound` and
    /// spends its delta animating. A `Reset` frame consumes no time: it only
    /// rewinds to `min_bound` and clears the initial-pass flag.
    pub fn advance(self, config: &SweepConfig, delta: f32) -> (SweepState, RenderParams) {
        let delta = config.sanitize_delta(delta);

        let next = match self {
            SweepState::Uninitialized => Self::animate(config, config.min_bound, true, delta),
            SweepState::Animating { value, initial } => {
                Self::animate(config, value, initial, delta)
            }
            SweepState::Waiting {
                value,
                wait_timer,
                initial,
            } => {
                let wait_timer = wait_timer + delta;
                if wait_timer >= config.wait_duration {
                    SweepState::Reset { value, initial }
                } else {
                    SweepState::Waiting {
                        value,
                        wait_timer,
                        initial,
                    }
                }
            }
            SweepState::Reset { .. } => SweepState::Animating {
                value: config.min_bound,
                initial: false,
            },
        };

        (next, next.params(config))
    }

    fn animate(config: &SweepConfig, value: f32, initial: bool, delta: f32) -> SweepState {
        let value = value + config.advance_rate * delta;
        if value >= config.max_bound - BOUND_EPSILON {
            SweepState::Waiting {
                value: config.max_bound,
                wait_timer: 0.0,
                initial,
            }
        } else {
            SweepState::Animating { value, initial }
        }
    }
}

/// Owns a [`SweepConfig`] and the current [`SweepState`].
#[derive(Clone, Debug, Default)]
pub struct SweepAnimator {
    config: SweepConfig,
    state: SweepState,
}

impl SweepAnimator {
    pub fn new(config: SweepConfig) -> Self {
        Self {
            config,
            state: SweepState::Uninitialized,
        }
    }

    /// Advances by one frame of `delta` seconds.
    pub fn tick(&mut self, delta: f32) -> RenderParams {
        let (state, params) = self.state.advance(&self.config, delta);
        self.state = state;
        params
    }

    /// Back to the uninitialized state; the next tick starts a first pass.
    pub fn restart(&mut self) {
        self.state = SweepState::Uninitialized;
    }

    /// Replaces the config and restarts.
    pub fn reconfigure(&mut self, config: SweepConfig) {
        self.config = config;
        self.restart();
    }

    pub fn config(&self) -> &SweepConfig {
        &self.config
    }

    pub fn state(&self) -> SweepState {
        self.state
    }

    pub fn phase(&self) -> SweepPhase {
        self.state.phase()
    }

    pub fn params(&self) -> RenderParams {
        self.state.params(&self.config)
    }
}
