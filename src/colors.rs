//! Palette in ARGB8888 format.

pub const BACKGROUND: u32 = 0xFFFFFFFF;
pub const POINT: u32 = 0xFF111111;
pub const BAND: u32 = 0xFF3A5BFF;

/// Alpha-blends `src` over `dst`, both ARGB8888, with `opacity` in `[0, 1]`.
///
/// The result is always fully opaque since the framebuffer has no
/// transparency of its own.
#[inline]
pub fn blend(dst: u32, src: u32, opacity: f32) -> u32 {
    let a = opacity.clamp(0.0, 1.0);
    let channel = |shift: u32| {
        let d = ((dst >> shift) & 0xFF) as f32;
        let s = ((src >> shift) & 0xFF) as f32;
        ((d + (s - d) * a).round() as u32).min(255) << shift
    };
    0xFF00_0000 | channel(16) | channel(8) | channel(0)
}

/// Linear interpolation between two ARGB colors.
#[inline]
pub fn mix(from: u32, to: u32, t: f32) -> u32 {
    blend(from, to, t)
}
