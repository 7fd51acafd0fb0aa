//! Triad Data Crate
//!
//! Mesh loading for triad: a PLY decoder producing flat, GPU-ready [`Mesh`]
//! arrays. This crate is GPU-agnostic and focuses on data parsing.

pub mod mesh;
pub mod ply;

pub use mesh::{Mesh, MeshBounds, Triangle};
pub use ply::{PlyError, PlyReader, PlyVertex, load_mesh_from_ply, ply_has_faces};
