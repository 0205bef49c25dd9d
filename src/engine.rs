//! Point-cloud reveal engine.
//!
//! The [`Engine`] struct is the rendering surface for the sweep animation. It
//! owns the framebuffer, the current [`PointCloud`], and the
//! [`SweepAnimator`]. Each frame the animator produces [`RenderParams`] and
//! the engine projects and splats every point using the [`PointStyle`].

use log::info;

use crate::colors;
use crate::config::RevealConfig;
use crate::math::mat4::Mat4;
use crate::math::vec4::Vec4;
use crate::render::{PointStyle, Renderer};
use crate::sampler::PointCloud;
use crate::sweep::{RenderParams, SweepAnimator, SweepConfig, SweepPhase};

const FOV_Y_DEGREES: f32 = 45.0;
const Z_NEAR: f32 = 0.1;
const Z_FAR: f32 = 100.0;
/// Empty space kept around the cloud when fitting the camera.
const FRAMING_MARGIN: f32 = 1.15;

pub struct Engine {
    renderer: Renderer,
    projection_matrix: Mat4,
    cloud: Option<PointCloud>,
    animator: SweepAnimator,
    style: PointStyle,
    config: RevealConfig,
    camera_distance: f32,
    spin: f32,
    params: RenderParams,
}

impl Engine {
    pub fn new(width: u32, height: u32, config: RevealConfig) -> Self {
        let animator = SweepAnimator::new(SweepConfig::default());
        let params = animator.params();
        Self {
            renderer: Renderer::new(width, height),
            projection_matrix: Self::projection(width, height),
            cloud: None,
            animator,
            style: config.style,
            config,
            camera_distance: 5.0,
            spin: 0.0,
            params,
        }
    }

    fn projection(width: u32, height: u32) -> Mat4 {
        let aspect_ratio = width as f32 / height.max(1) as f32;
        Mat4::perspective_lh(FOV_Y_DEGREES.to_radians(), aspect_ratio, Z_NEAR, Z_FAR)
    }

    /// Replaces the point cloud and restarts the sweep with bounds fitted to
    /// the new cloud's heights.
    pub fn set_point_cloud(&mut self, cloud: PointCloud) {
        let (lo, hi) = cloud.points().height_range().unwrap_or((0.0, 0.0));
        let sweep = self.config.sweep_for_heights(lo, hi);
        info!(
            "sweep {:.3} -> {:.3} over {:.2}s, hold {:.2}s",
            sweep.min_bound,
            sweep.max_bound,
            sweep.pass_duration(),
            sweep.wait_duration
        );
        self.animator.reconfigure(sweep);
        self.params = self.animator.params();

        let radius = cloud.bounds().bounding_radius().max(f32::EPSILON);
        let half_fov = (FOV_Y_DEGREES.to_radians() * 0.5).min(self.horizontal_half_fov());
        self.camera_distance = radius * FRAMING_MARGIN / half_fov.sin();
        self.spin = 0.0;
        self.cloud = Some(cloud);
    }

    fn horizontal_half_fov(&self) -> f32 {
        let aspect = self.renderer.width() as f32 / self.renderer.height().max(1) as f32;
        (aspect * (FOV_Y_DEGREES.to_radians() * 0.5).tan()).atan()
    }

    pub fn point_cloud(&self) -> Option<&PointCloud> {
        self.cloud.as_ref()
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.renderer.resize(width, height);
        self.projection_matrix = Self::projection(width, height);
    }

    pub fn phase(&self) -> SweepPhase {
        self.animator.phase()
    }

    pub fn params(&self) -> RenderParams {
        self.params
    }

    pub fn camera_distance(&self) -> f32 {
        self.camera_distance
    }

    /// Returns the rendered frame as bytes (ARGB8888 format)
    pub fn frame_buffer(&self) -> &[u8] {
        self.renderer.as_bytes()
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    /// Advance animation state by `delta` seconds.
    pub fn update(&mut self, delta: f32) {
        if self.cloud.is_none() {
            return;
        }
        self.params = self.animator.tick(delta);
        let delta = self.animator.config().sanitize_delta(delta);
        self.spin = (self.spin + self.config.spin_rate * delta).rem_euclid(std::f32::consts::TAU);
    }

    /// Render the current frame
    pub fn render(&mut self) {
        self.renderer.clear(colors::BACKGROUND);

        let Some(cloud) = &self.cloud else {
            return;
        };

        let width = self.renderer.width() as f32;
        let height = self.renderer.height() as f32;
        let mvp = self.projection_matrix
            * Mat4::translation(0.0, 0.0, self.camera_distance)
            * Mat4::rotation_y(self.spin);

        for (position, point_height) in cloud.points().iter() {
            let look = self.style.shade(point_height, self.params);
            if look.opacity <= 0.0 {
                continue;
            }

            let clip = mvp * Vec4::from(*position);
            // w <= near means the point is behind or on the near plane.
            if clip.w <= Z_NEAR {
                continue;
            }
            let ndc = clip.to_vec3_perspective();

            let screen_x = (ndc.x + 1.0) * 0.5 * width;
            let screen_y = (1.0 - ndc.y) * 0.5 * height;
            let color = colors::mix(colors::POINT, colors::BAND, look.glow);
            self.renderer
                .draw_point(screen_x, screen_y, look.size, color, look.opacity);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::vec3::Axis;
    use crate::mesh::Mesh;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn cube_cloud() -> PointCloud {
        let mut rng = StdRng::seed_from_u64(7);
        PointCloud::from_mesh(Mesh::cube(), 4000, Axis::Y, &mut rng).unwrap()
    }

    fn count_non_background(engine: &Engine) -> usize {
        let r = engine.renderer();
        (0..r.height())
            .flat_map(|y| (0..r.width()).map(move |x| (x, y)))
            .filter(|&(x, y)| r.pixel(x, y) != Some(colors::BACKGROUND))
            .count()
    }

    #[test]
    fn renders_nothing_without_cloud() {
        let mut engine = Engine::new(64, 48, RevealConfig::default());
        engine.update(0.1);
        engine.render();
        assert_eq!(count_non_background(&engine), 0);
        assert_eq!(engine.phase(), SweepPhase::Uninitialized);
    }

    #[test]
    fn set_point_cloud_fits_sweep_and_restarts() {
        let mut engine = Engine::new(64, 48, RevealConfig::default());
        engine.set_point_cloud(cube_cloud());
        let params = engine.params();
        assert!(params.initial);
        // Cube heights span [-1, 1]; the sweep starts a margin below.
        assert!(params.value < -1.0);
        assert!(engine.camera_distance() > 1.0);
    }

    #[test]
    fn reveal_grows_over_first_pass() {
        let mut engine = Engine::new(96, 72, RevealConfig::default());
        engine.set_point_cloud(cube_cloud());

        engine.update(0.0);
        engine.render();
        let at_start = count_non_background(&engine);

        for _ in 0..20 {
            engine.update(0.05);
        }
        engine.render();
        let midway = count_non_background(&engine);

        assert!(midway > at_start, "{midway} <= {at_start}");
        assert!(engine.params().initial);
    }

    #[test]
    fn reload_restarts_first_pass() {
        let mut engine = Engine::new(32, 32, RevealConfig::default());
        engine.set_point_cloud(cube_cloud());
        for _ in 0..200 {
            engine.update(0.1);
        }
        assert!(!engine.params().initial);

        engine.set_point_cloud(cube_cloud());
        assert!(engine.params().initial);
        assert_eq!(engine.phase(), SweepPhase::Uninitialized);
    }
}
