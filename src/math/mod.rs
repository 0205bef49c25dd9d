pub mod mat4;
pub mod vec3;
pub mod vec4;

pub use mat4::Mat4;
pub use vec3::{Axis, Vec3};
pub use vec4::Vec4;
