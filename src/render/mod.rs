//! CPU point rendering: the surface the sweep animation draws on.

mod framebuffer;
mod renderer;
pub mod shader;

pub use framebuffer::FrameBuffer;
pub use renderer::Renderer;
pub use shader::{PointAppearance, PointStyle};
