//! Indexed triangle mesh produced by the loaders.
//!
//! Channels are flat `f32` arrays with three components per vertex, and
//! indices are three per triangle, so they upload to vertex/index buffers
//! unchanged.

use glam::Vec3;
use serde::Serialize;

/// An indexed triangle mesh.
///
/// Every entry of `indices` is below [`vertex_count`](Self::vertex_count).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Mesh {
    /// `[x, y, z]` per vertex.
    pub positions: Vec<f32>,
    /// `[r, g, b]` per vertex, 0-1 range. Zero when the source has no colors.
    pub colors: Vec<f32>,
    /// `[nx, ny, nz]` per vertex. Zero when the source has no normals.
    pub normals: Vec<f32>,
    /// Three vertex indices per triangle.
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn position(&self, vertex: usize) -> Vec3 {
        Vec3::from_slice(&self.positions[vertex * 3..vertex * 3 + 3])
    }

    pub fn color(&self, vertex: usize) -> Vec3 {
        Vec3::from_slice(&self.colors[vertex * 3..vertex * 3 + 3])
    }

    pub fn normal(&self, vertex: usize) -> Vec3 {
        Vec3::from_slice(&self.normals[vertex * 3..vertex * 3 + 3])
    }

    /// Index triples in emission order.
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// Resolve triangle `index` to its corner positions and mean color.
    pub fn triangle(&self, index: usize) -> Triangle {
        let [a, b, c] = [0, 1, 2].map(|k| self.indices[index * 3 + k] as usize);
        Triangle {
            corners: [a, b, c].map(|v| self.position(v)),
            color: (self.color(a) + self.color(b) + self.color(c)) / 3.0,
        }
    }

    /// Sum of triangle areas.
    pub fn surface_area(&self) -> f32 {
        (0..self.triangle_count()).map(|t| self.triangle(t).area()).sum()
    }

    pub fn bounds(&self) -> MeshBounds {
        MeshBounds::from_positions((0..self.vertex_count()).map(|i| self.position(i)))
    }
}

/// Axis-aligned bounds of a mesh with a bounding sphere.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MeshBounds {
    pub min: Vec3,
    pub max: Vec3,
    pub center: Vec3,
    pub radius: f32,
}

impl MeshBounds {
    /// Compute bounds from an iterator of positions.
    pub fn from_positions(positions: impl Iterator<Item = Vec3>) -> Self {
        let mut min = Vec3::splat(f32::MAX);
        let mut max = Vec3::splat(f32::MIN);
        let mut count = 0;

        for pos in positions {
            min = min.min(pos);
            max = max.max(pos);
            count += 1;
        }

        if count == 0 {
            return Self {
                min: Vec3::ZERO,
                max: Vec3::ZERO,
                center: Vec3::ZERO,
                radius: 1.0,
            };
        }

        let center = (min + max) * 0.5;
        let radius = ((max - min).length() * 0.5).max(0.001);
        Self {
            min,
            max,
            center,
            radius,
        }
    }
}

/// Corner positions and mean color of one mesh triangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub corners: [Vec3; 3],
    pub color: Vec3,
}

impl Triangle {
    /// Cross product of the two edges leaving the first corner. Its length
    /// is twice the area.
    fn cross(&self) -> Vec3 {
        let [a, b, c] = self.corners;
        (b - a).cross(c - a)
    }

    /// Unit face normal following the winding order, zero when degenerate.
    pub fn normal(&self) -> Vec3 {
        self.cross().normalize_or_zero()
    }

    pub fn area(&self) -> f32 {
        self.cross().length() * 0.5
    }
}
