use crate::math::vec3::Vec3;

/// A triangle borrowed from a mesh's vertex positions.
///
/// Never stored; produced on the fly by [`Mesh::triangles`](crate::Mesh::triangles)
/// so that sampling reads the mesh's own positions without copying them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle<'a> {
    pub a: &'a Vec3,
    pub b: &'a Vec3,
    pub c: &'a Vec3,
}

impl<'a> Triangle<'a> {
    pub fn new(a: &'a Vec3, b: &'a Vec3, c: &'a Vec3) -> Self {
        Self { a, b, c }
    }

    /// Surface area: half the magnitude of the cross product of two edges.
    #[inline]
    pub fn area(&self) -> f32 {
        let ab = *self.b - *self.a;
        let ac = *self.c - *self.a;
        ab.cross(ac).magnitude() * 0.5
    }

    /// Maps two independent uniform draws in `[0, 1)` to a point that is
    /// uniformly distributed over the triangle.
    ///
    /// The square root on the first draw is what makes the distribution
    /// uniform; without it points bunch up near vertex `a`.
    #[inline]
    pub fn point_from_unit_draws(&self, u1: f32, u2: f32) -> Vec3 {
        let [wa, wb, wc] = barycentric_weights(u1, u2);
        *self.a * wa + *self.b * wb + *self.c * wc
    }
}

/// Barycentric weights `(wa, wb, wc)` for the square-root warp:
/// `r1 = sqrt(u1)`, `wa = 1 - r1`, `wb = r1 (1 - u2)`, `wc = r1 u2`.
///
/// Each weight is in `[0, 1]` and they sum to one.
#[inline]
pub fn barycentric_weights(u1: f32, u2: f32) -> [f32; 3] {
    let r1 = u1.sqrt();
    let r2 = u2;
    [1.0 - r1, r1 * (1.0 - r2), r1 * r2]
}
