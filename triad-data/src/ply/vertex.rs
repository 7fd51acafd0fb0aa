//! PLY vertex data structures

use glam::Vec3;

/// Per-vertex channels decoded from the vertex element, before flattening
/// into a [`Mesh`](crate::Mesh).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlyVertex {
    pub position: Vec3,
    /// Zero if the file has no normals.
    pub normal: Vec3,
    /// RGB in 0-1 range. Black if the file has no colors.
    pub color: Vec3,
}
