//! Area-weighted random sampling of points on a mesh surface.
//!
//! Triangles are picked with probability proportional to their area by a
//! binary search over the running sum of areas, then a point is placed
//! uniformly inside the picked triangle. The result is a point cloud whose
//! density looks uniform regardless of how finely the mesh is triangulated.

use log::{debug, info};
use rand::Rng;
use thiserror::Error;

use crate::bounds::Aabb;
use crate::math::vec3::{Axis, Vec3};
use crate::mesh::Mesh;
use crate::triangle::Triangle;

/// Invalid sampling input.
#[derive(Debug, Error, PartialEq)]
pub enum SampleError {
    #[error("sample count must be greater than zero")]
    InvalidCount,
    #[error("degenerate mesh: total surface area is zero")]
    DegenerateMesh,
    #[error("mesh geometry is not finite (total area {0})")]
    NonFiniteGeometry(f64),
}

/// Running sums of triangle areas, one entry per triangle.
///
/// Non-decreasing; the last entry is the total surface area. Zero-area
/// triangles repeat the previous entry and so own an empty interval.
#[derive(Clone, Debug, PartialEq)]
pub struct CumulativeAreaTable {
    sums: Vec<f64>,
}

impl CumulativeAreaTable {
    pub fn from_triangles<'a, I>(triangles: I) -> Self
    where
        I: IntoIterator<Item = Triangle<'a>>,
    {
        let mut total = 0.0f64;
        let sums = triangles
            .into_iter()
            .map(|tri| {
                total += tri.area() as f64;
                total
            })
            .collect();
        Self { sums }
    }

    pub fn total(&self) -> f64 {
        self.sums.last().copied().unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.sums.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sums.is_empty()
    }

    pub fn sums(&self) -> &[f64] {
        &self.sums
    }

    /// Index of the triangle whose area interval `[sums[i-1], sums[i])`
    /// contains `draw`, for `draw` in `[0, total)`.
    ///
    /// Binary search, O(log n). Triangles with an empty interval are never
    /// returned. A draw at or past the total maps to the last triangle.
    #[inline]
    pub fn locate(&self, draw: f64) -> usize {
        self.sums
            .partition_point(|&sum| sum <= draw)
            .min(self.sums.len().saturating_sub(1))
    }
}

/// Sampled surface points as two index-aligned columns.
///
/// `heights[i]` is `positions[i]`'s component along [`axis`](Self::axis).
#[derive(Clone, Debug, PartialEq)]
pub struct SampledPoints {
    positions: Vec<Vec3>,
    heights: Vec<f32>,
    axis: Axis,
}

impl SampledPoints {
    fn from_positions(positions: Vec<Vec3>, axis: Axis) -> Self {
        let heights = positions.iter().map(|p| p.component(axis)).collect();
        Self {
            positions,
            heights,
            axis,
        }
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn heights(&self) -> &[f32] {
        &self.heights
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Iterates `(position, height)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&Vec3, f32)> {
        self.positions.iter().zip(self.heights.iter().copied())
    }

    /// Positions flattened to `[x0, y0, z0, x1, ...]` for a vertex buffer.
    pub fn flat_positions(&self) -> Vec<f32> {
        self.positions.iter().flat_map(|p| [p.x, p.y, p.z]).collect()
    }

    /// `(min, max)` of the height column, or `None` when empty.
    pub fn height_range(&self) -> Option<(f32, f32)> {
        self.heights.iter().fold(None, |range, &h| match range {
            None => Some((h, h)),
            Some((lo, hi)) => Some((lo.min(h), hi.max(h))),
        })
    }
}

/// Draws `count` points uniformly (by area) from the surface of `mesh`.
///
/// The mesh is used as-is; see [`PointCloud::from_mesh`] for the pipeline
/// that centers the mesh first.
pub fn sample<R: Rng + ?Sized>(
    mesh: &Mesh,
    count: usize,
    axis: Axis,
    rng: &mut R,
) -> Result<SampledPoints, SampleError> {
    if count == 0 {
        return Err(SampleError::InvalidCount);
    }

    let triangles: Vec<Triangle<'_>> = mesh.triangles().collect();
    let table = CumulativeAreaTable::from_triangles(triangles.iter().copied());
    let total = table.total();

    if !total.is_finite() {
        return Err(SampleError::NonFiniteGeometry(total));
    }
    if total <= 0.0 {
        return Err(SampleError::DegenerateMesh);
    }

    let positions = (0..count)
        .map(|_| {
            let draw = rng.gen_range(0.0..total);
            let tri = &triangles[table.locate(draw)];
            tri.point_from_unit_draws(rng.gen::<f32>(), rng.gen::<f32>())
        })
        .collect();

    debug!(
        "sampled {count} points over {} triangles (area {total:.4})",
        table.len()
    );
    Ok(SampledPoints::from_positions(positions, axis))
}

/// A centered mesh's sampled point set, ready for the renderer.
#[derive(Clone, Debug, PartialEq)]
pub struct PointCloud {
    points: SampledPoints,
    bounds: Aabb,
    offset: Vec3,
}

impl PointCloud {
    /// Centers `mesh` on its bounding box and samples `count` points from it.
    pub fn from_mesh<R: Rng + ?Sized>(
        mut mesh: Mesh,
        count: usize,
        axis: Axis,
        rng: &mut R,
    ) -> Result<Self, SampleError> {
        let offset = mesh.center();
        let bounds = mesh.bounds().ok_or(SampleError::DegenerateMesh)?;
        let points = sample(&mesh, count, axis, rng)?;
        info!(
            "point cloud ready: {} points, {axis} extent {:?}",
            points.len(),
            bounds.extent(axis)
        );
        Ok(Self {
            points,
            bounds,
            offset,
        })
    }

    pub fn points(&self) -> &SampledPoints {
        &self.points
    }

    /// Bounding box of the centered mesh.
    pub fn bounds(&self) -> Aabb {
        self.bounds
    }

    /// Translation that was applied to center the mesh.
    pub fn offset(&self) -> Vec3 {
        self.offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(0x5eed)
    }

    /// Two disjoint right triangles in the z=0 plane, areas 8 and 2.
    fn two_triangle_mesh() -> Mesh {
        let positions = vec![
            // area 8, x in [0, 4]
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(4.0, 0.0, 0.0),
            Vec3::new(0.0, 4.0, 0.0),
            // area 2, x in [10, 12]
            Vec3::new(10.0, 0.0, 0.0),
            Vec3::new(12.0, 0.0, 0.0),
            Vec3::new(10.0, 2.0, 0.0),
        ];
        Mesh::new(positions, None).unwrap()
    }

    #[test]
    fn returns_exactly_count_aligned_points() {
        let mesh = Mesh::cube();
        for count in [1, 7, 1000] {
            let points = sample(&mesh, count, Axis::Y, &mut rng()).unwrap();
            assert_eq!(points.positions().len(), count);
            assert_eq!(points.heights().len(), count);
            for (p, h) in points.iter() {
                assert_eq!(p.y, h);
            }
        }
    }

    #[test]
    fn heights_follow_configured_axis() {
        let points = sample(&Mesh::cube(), 50, Axis::Z, &mut rng()).unwrap();
        assert_eq!(points.axis(), Axis::Z);
        for (p, h) in points.iter() {
            assert_eq!(p.z, h);
        }
    }

    #[test]
    fn zero_count_is_rejected() {
        let err = sample(&Mesh::cube(), 0, Axis::Y, &mut rng()).unwrap_err();
        assert_eq!(err, SampleError::InvalidCount);
    }

    #[test]
    fn all_degenerate_mesh_fails() {
        let positions = vec![Vec3::ZERO, Vec3::ONE, Vec3::splat(2.0), Vec3::ZERO, Vec3::ZERO, Vec3::ZERO];
        let mesh = Mesh::new(positions, None).unwrap();
        let err = sample(&mesh, 10, Axis::Y, &mut rng()).unwrap_err();
        assert_eq!(err, SampleError::DegenerateMesh);
    }

    #[test]
    fn mesh_without_triangles_fails() {
        let mesh = Mesh::new(vec![Vec3::ZERO, Vec3::ONE], None).unwrap();
        let err = sample(&mesh, 10, Axis::Y, &mut rng()).unwrap_err();
        assert_eq!(err, SampleError::DegenerateMesh);
    }

    #[test]
    fn nan_vertex_fails() {
        let positions = vec![Vec3::ZERO, Vec3::new(f32::NAN, 0.0, 0.0), Vec3::UP];
        let mesh = Mesh::new(positions, None).unwrap();
        let err = sample(&mesh, 10, Axis::Y, &mut rng()).unwrap_err();
        assert!(matches!(err, SampleError::NonFiniteGeometry(_)));
    }

    #[test]
    fn table_is_running_sum() {
        let mesh = two_triangle_mesh();
        let table = CumulativeAreaTable::from_triangles(mesh.triangles());
        assert_eq!(table.len(), 2);
        assert_relative_eq!(table.sums()[0], 8.0);
        assert_relative_eq!(table.total(), 10.0);
    }

    #[test]
    fn locate_respects_interval_boundaries() {
        let mesh = two_triangle_mesh();
        let table = CumulativeAreaTable::from_triangles(mesh.triangles());
        assert_eq!(table.locate(0.0), 0);
        assert_eq!(table.locate(7.999), 0);
        assert_eq!(table.locate(8.0), 1);
        assert_eq!(table.locate(9.999), 1);
        assert_eq!(table.locate(10.0), 1);
    }

    #[test]
    fn locate_skips_zero_area_triangles() {
        let table = CumulativeAreaTable {
            sums: vec![0.0, 0.0, 3.0, 3.0, 5.0],
        };
        assert_eq!(table.locate(0.0), 2);
        assert_eq!(table.locate(2.9), 2);
        assert_eq!(table.locate(3.0), 4);
    }

    #[test]
    fn density_is_area_proportional() {
        let mesh = two_triangle_mesh();
        let count = 20_000;
        let points = sample(&mesh, count, Axis::Y, &mut rng()).unwrap();
        let in_large = points.positions().iter().filter(|p| p.x < 5.0).count();
        let share = in_large as f64 / count as f64;
        assert!((share - 0.8).abs() < 0.02, "large triangle share was {share}");
    }

    #[test]
    fn degenerate_triangles_never_receive_points() {
        let positions = vec![
            Vec3::new(5.0, 5.0, 5.0),
            Vec3::new(6.0, 6.0, 6.0),
            Vec3::new(7.0, 7.0, 7.0),
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        ];
        let mesh = Mesh::new(positions, None).unwrap();
        let points = sample(&mesh, 2000, Axis::Y, &mut rng()).unwrap();
        assert!(points.positions().iter().all(|p| p.z == 0.0 && p.x <= 1.0));
    }

    #[test]
    fn points_lie_inside_their_triangle() {
        let positions = vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(3.0, 0.0, 0.0),
            Vec3::new(0.0, 3.0, 0.0),
        ];
        let mesh = Mesh::new(positions, None).unwrap();
        let points = sample(&mesh, 5000, Axis::Y, &mut rng()).unwrap();
        for p in points.positions() {
            assert_eq!(p.z, 0.0);
            assert!(p.x >= -1e-5 && p.y >= -1e-5, "{p:?}");
            assert!(p.x + p.y <= 3.0 + 1e-5, "{p:?}");
        }
    }

    #[test]
    fn points_are_uniform_within_a_triangle() {
        // The inner triangle at half scale holds a quarter of the area.
        let positions = vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(0.0, 2.0, 0.0),
        ];
        let mesh = Mesh::new(positions, None).unwrap();
        let count = 20_000;
        let points = sample(&mesh, count, Axis::Y, &mut rng()).unwrap();
        let near_corner = points
            .positions()
            .iter()
            .filter(|p| p.x + p.y < 1.0)
            .count();
        let share = near_corner as f64 / count as f64;
        assert!((share - 0.25).abs() < 0.02, "corner share was {share}");
    }

    #[test]
    fn resampling_yields_another_valid_set() {
        let mesh = Mesh::cube();
        let mut rng = rng();
        let first = sample(&mesh, 500, Axis::Y, &mut rng).unwrap();
        let second = sample(&mesh, 500, Axis::Y, &mut rng).unwrap();
        assert_ne!(first, second);
        for points in [&first, &second] {
            assert_eq!(points.len(), 500);
            assert!(points.positions().iter().all(|p| p.is_finite()));
            let (lo, hi) = points.height_range().unwrap();
            assert!(lo >= -1.0 - 1e-5 && hi <= 1.0 + 1e-5);
        }
    }

    #[test]
    fn flat_positions_are_xyz_triples() {
        let points = sample(&Mesh::cube(), 4, Axis::Y, &mut rng()).unwrap();
        let flat = points.flat_positions();
        assert_eq!(flat.len(), 12);
        assert_eq!(flat[3], points.positions()[1].x);
        assert_eq!(flat[5], points.positions()[1].z);
    }

    #[test]
    fn point_cloud_is_centered() {
        let positions: Vec<Vec3> = Mesh::cube()
            .positions()
            .iter()
            .map(|p| *p + Vec3::new(10.0, 20.0, -5.0))
            .collect();
        let mesh = Mesh::new(positions, Mesh::cube().indices().map(<[u32]>::to_vec)).unwrap();

        let cloud = PointCloud::from_mesh(mesh, 1000, Axis::Y, &mut rng()).unwrap();
        assert_eq!(cloud.offset(), Vec3::new(-10.0, -20.0, 5.0));
        assert_eq!(cloud.bounds().center(), Vec3::ZERO);
        let (lo, hi) = cloud.points().height_range().unwrap();
        assert!(lo >= -1.0 - 1e-5 && hi <= 1.0 + 1e-5);
        assert!(lo < -0.9 && hi > 0.9);
    }
}
