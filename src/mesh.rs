//! Triangle meshes: construction, OBJ loading, and centering.

use std::io::BufRead;
use std::path::Path;

use log::{info, warn};
use thiserror::Error;

use crate::bounds::Aabb;
use crate::math::vec3::Vec3;
use crate::triangle::Triangle;

/// Invalid mesh connectivity.
#[derive(Debug, Error, PartialEq)]
pub enum MeshError {
    #[error("index {index} is out of range for a mesh with {vertex_count} vertices")]
    IndexOutOfRange { index: u32, vertex_count: usize },
}

/// Failure to turn an asset into a [`Mesh`].
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to parse OBJ: {0}")]
    Obj(#[from] tobj::LoadError),
    #[error("OBJ contains no triangles")]
    NoGeometry,
    #[error(transparent)]
    Mesh(#[from] MeshError),
}

// OWNERSHIP: Static data for the built-in fallback logo, 'static lifetime.
const CUBE_VERTICES: [Vec3; 8] = [
    Vec3::new(-1.0, -1.0, -1.0),
    Vec3::new(-1.0, 1.0, -1.0),
    Vec3::new(1.0, 1.0, -1.0),
    Vec3::new(1.0, -1.0, -1.0),
    Vec3::new(1.0, 1.0, 1.0),
    Vec3::new(1.0, -1.0, 1.0),
    Vec3::new(-1.0, 1.0, 1.0),
    Vec3::new(-1.0, -1.0, 1.0),
];

#[rustfmt::skip]
const CUBE_INDICES: [u32; 36] = [
    0, 1, 2,  0, 2, 3, // front
    3, 2, 4,  3, 4, 5, // right
    5, 4, 6,  5, 6, 7, // back
    7, 6, 1,  7, 1, 0, // left
    1, 6, 4,  1, 4, 2, // top
    5, 7, 0,  5, 0, 3, // bottom
];

/// A triangulated surface: vertex positions plus optional index list.
///
/// Without an index list every three consecutive positions form a triangle.
/// Trailing indices or positions that do not complete a triangle are ignored.
#[derive(Clone, Debug, PartialEq)]
pub struct Mesh {
    positions: Vec<Vec3>,
    indices: Option<Vec<u32>>,
}

impl Mesh {
    /// Builds a mesh, checking that every index refers to an existing vertex.
    pub fn new(positions: Vec<Vec3>, indices: Option<Vec<u32>>) -> Result<Self, MeshError> {
        if let Some(indices) = &indices {
            if let Some(&index) = indices.iter().find(|&&i| i as usize >= positions.len()) {
                return Err(MeshError::IndexOutOfRange {
                    index,
                    vertex_count: positions.len(),
                });
            }
        }

        let connectivity_len = indices.as_ref().map_or(positions.len(), Vec::len);
        if connectivity_len % 3 != 0 {
            warn!(
                "mesh has {} trailing {} that do not form a triangle; ignoring them",
                connectivity_len % 3,
                if indices.is_some() { "indices" } else { "vertices" }
            );
        }

        Ok(Self { positions, indices })
    }

    /// Unit cube spanning `[-1, 1]` on every axis, 12 triangles.
    pub fn cube() -> Self {
        Self {
            positions: CUBE_VERTICES.to_vec(),
            indices: Some(CUBE_INDICES.to_vec()),
        }
    }

    /// Loads every object in an OBJ file and merges them into one mesh.
    pub fn from_obj(file_path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let file_path = file_path.as_ref();
        let (models, _materials) = tobj::load_obj(file_path, &tobj::GPU_LOAD_OPTIONS)?;
        let mesh = Self::merge_models(&models)?;
        info!(
            "loaded {} ({} objects, {} triangles)",
            file_path.display(),
            models.len(),
            mesh.triangle_count()
        );
        Ok(mesh)
    }

    /// Parses OBJ text from a reader. Material libraries are not resolved.
    pub fn from_obj_reader<R: BufRead>(reader: &mut R) -> Result<Self, LoadError> {
        let (models, _materials) = tobj::load_obj_buf(reader, &tobj::GPU_LOAD_OPTIONS, |_| {
            Err(tobj::LoadError::OpenFileFailed)
        })?;
        Self::merge_models(&models)
    }

    fn merge_models(models: &[tobj::Model]) -> Result<Self, LoadError> {
        let mut positions = Vec::new();
        let mut indices = Vec::new();

        for model in models {
            let base = positions.len() as u32;
            positions.extend(
                model
                    .mesh
                    .positions
                    .chunks_exact(3)
                    .map(|p| Vec3::new(p[0], p[1], p[2])),
            );
            indices.extend(model.mesh.indices.iter().map(|&i| i + base));
        }

        if indices.len() < 3 {
            return Err(LoadError::NoGeometry);
        }

        Ok(Self::new(positions, Some(indices))?)
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn indices(&self) -> Option<&[u32]> {
        self.indices.as_deref()
    }

    /// Number of complete triangles.
    pub fn triangle_count(&self) -> usize {
        self.indices.as_ref().map_or(self.positions.len(), Vec::len) / 3
    }

    /// Iterates over the mesh's triangles, borrowing its positions.
    pub fn triangles(&self) -> Box<dyn Iterator<Item = Triangle<'_>> + '_> {
        let positions = &self.positions;
        match &self.indices {
            Some(indices) => Box::new(indices.chunks_exact(3).map(move |t| {
                Triangle::new(
                    &positions[t[0] as usize],
                    &positions[t[1] as usize],
                    &positions[t[2] as usize],
                )
            })),
            None => Box::new(
                positions
                    .chunks_exact(3)
                    .map(|t| Triangle::new(&t[0], &t[1], &t[2])),
            ),
        }
    }

    /// Bounding box of all positions, or `None` for a mesh without vertices.
    pub fn bounds(&self) -> Option<Aabb> {
        Aabb::from_points(&self.positions)
    }

    /// Translates every vertex so the bounding box center sits at the origin.
    ///
    /// Returns the translation that was applied (zero for an empty mesh).
    /// Idempotent: centering an already centered mesh applies a zero offset.
    pub fn center(&mut self) -> Vec3 {
        let Some(bounds) = self.bounds() else {
            return Vec3::ZERO;
        };
        let offset = -bounds.center();
        for p in &mut self.positions {
            *p += offset;
        }
        offset
    }
}
