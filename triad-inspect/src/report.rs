//! Inspection report for one PLY file.

use serde::Serialize;
use std::fmt;
use triad_data::ply::{Element, FileFormat, Property};
use triad_data::{MeshBounds, PlyError, PlyReader};

#[derive(Debug, Serialize)]
pub struct Capabilities {
    pub vertices: bool,
    pub normals: bool,
    pub vertex_colors: bool,
    pub faces: bool,
}

#[derive(Debug, Serialize)]
pub struct MeshSummary {
    pub vertices: usize,
    pub triangles: usize,
    pub surface_area: f32,
    pub bounds: MeshBounds,
}

#[derive(Debug, Serialize)]
pub struct Report {
    pub path: String,
    pub format: FileFormat,
    pub comments: Vec<String>,
    pub elements: Vec<Element>,
    pub capabilities: Capabilities,
    /// Present when the body was decoded.
    pub mesh: Option<MeshSummary>,
}

impl Report {
    /// Build a report, decoding the mesh if `decode` is set and the file has
    /// both vertices and faces.
    pub fn new(reader: &PlyReader, decode: bool) -> Result<Self, PlyError> {
        let header = reader.header();
        let capabilities = Capabilities {
            vertices: reader.has_vertices(),
            normals: reader.has_normals(),
            vertex_colors: reader.has_vertex_colors(),
            faces: reader.has_faces(),
        };

        let mesh = if decode && capabilities.vertices && capabilities.faces {
            let mesh = reader.read_mesh()?;
            Some(MeshSummary {
                vertices: mesh.vertex_count(),
                triangles: mesh.triangle_count(),
                surface_area: mesh.surface_area(),
                bounds: mesh.bounds(),
            })
        } else {
            None
        };

        Ok(Self {
            path: reader.path().display().to_string(),
            format: header.format(),
            comments: header.comments().to_vec(),
            elements: header.elements().to_vec(),
            capabilities,
            mesh,
        })
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.path)?;
        writeln!(f, "  format: {}", self.format.name())?;
        for comment in &self.comments {
            writeln!(f, "  comment: {comment}")?;
        }
        for element in &self.elements {
            writeln!(f, "  element {} ({})", element.name, element.count)?;
            for property in &element.properties {
                match property {
                    Property::Scalar { name, ty } => writeln!(f, "    {ty} {name}")?,
                    Property::List {
                        name,
                        count_ty,
                        elem_ty,
                    } => writeln!(f, "    list {count_ty} {elem_ty} {name}")?,
                }
            }
        }

        let caps = &self.capabilities;
        writeln!(
            f,
            "  vertices: {}, normals: {}, colors: {}, faces: {}",
            caps.vertices, caps.normals, caps.vertex_colors, caps.faces
        )?;

        if let Some(mesh) = &self.mesh {
            writeln!(
                f,
                "  mesh: {} vertices, {} triangles, area {:.3}",
                mesh.vertices, mesh.triangles, mesh.surface_area
            )?;
            writeln!(
                f,
                "  bounds: min {} max {} radius {:.3}",
                mesh.bounds.min, mesh.bounds.max, mesh.bounds.radius
            )?;
        }
        Ok(())
    }
}
