//! Point-cloud logo reveal.
//!
//! Turns a triangle mesh into a point cloud by area-weighted surface
//! sampling, then animates a band that sweeps up through the cloud, pauses
//! at the top, and loops. Rendering is done on the CPU; SDL2 is used only for
//! the demo window.
//!
//! # Quick Start
//!
//! ```ignore
//! use pointsweep::prelude::*;
//!
//! let mut rng = rand::thread_rng();
//! let cloud = PointCloud::from_mesh(Mesh::cube(), 15_000, Axis::Y, &mut rng)?;
//! let mut engine = Engine::new(800, 600, RevealConfig::default());
//! engine.set_point_cloud(cloud);
//! engine.update(1.0 / 60.0);
//! engine.render();
//! ```

// Public API - exposed to library consumers
pub mod bounds;
pub mod colors;
pub mod config;
pub mod engine;
pub mod loader;
pub mod math;
pub mod mesh;
pub mod render;
pub mod sampler;
pub mod sweep;
pub mod triangle;
pub mod window;

// Re-export commonly needed types at crate root for convenience
pub use config::RevealConfig;
pub use engine::Engine;
pub use loader::{LoadFailure, Loaded, MeshLoader, MeshSource};
pub use mesh::{LoadError, Mesh, MeshError};
pub use sampler::{sample, CumulativeAreaTable, PointCloud, SampleError, SampledPoints};
pub use sweep::{RenderParams, SweepAnimator, SweepConfig, SweepPhase, SweepState};

/// Prelude module for convenient imports.
///
/// # Example
/// ```ignore
/// use pointsweep::prelude::*;
/// ```
pub mod prelude {
    // Geometry
    pub use crate::bounds::Aabb;
    pub use crate::math::{Axis, Mat4, Vec3, Vec4};
    pub use crate::mesh::Mesh;
    pub use crate::triangle::Triangle;

    // Sampling
    pub use crate::sampler::{sample, PointCloud, SampleError, SampledPoints};

    // Animation
    pub use crate::sweep::{RenderParams, SweepAnimator, SweepConfig, SweepPhase, SweepState};

    // Rendering
    pub use crate::config::RevealConfig;
    pub use crate::engine::Engine;
    pub use crate::render::{PointStyle, Renderer};

    // Loading
    pub use crate::loader::{MeshLoader, MeshSource};

    // Window
    pub use crate::window::{FrameClock, Window, WindowEvent};
}
