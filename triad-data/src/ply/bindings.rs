//! Binding of named properties to mesh channels.
//!
//! Resolved once from a [`Header`] and reused for every body pass. All
//! indices are positions within the owning element's property list.

use crate::ply::{Header, PlyError, Property};
use tracing::debug;

/// Property slots of the vertex element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexBindings {
    /// Index of the vertex element in the header.
    pub element: usize,
    pub position: [usize; 3],
    pub normal: Option<[usize; 3]>,
    pub color: Option<[usize; 3]>,
}

/// Property slots of the face element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceBindings {
    /// Index of the face element in the header.
    pub element: usize,
    /// Position of `vertex_indices`, if the element declares it.
    pub vertex_indices: Option<usize>,
}

/// Semantic bindings of a validated header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Bindings {
    pub vertex: Option<VertexBindings>,
    pub face: Option<FaceBindings>,
    /// The face element exists and declares at least one instance.
    pub has_faces: bool,
}

impl Bindings {
    /// Validate the header's vertex and face elements and bind their slots.
    pub fn resolve(header: &Header) -> Result<Self, PlyError> {
        let mut vertex = None;
        let mut face = None;

        for (index, element) in header.elements().iter().enumerate() {
            match element.name.as_str() {
                "vertex" => {
                    if vertex.is_some() {
                        return Err(PlyError::DuplicateElement(element.name.clone()));
                    }
                    vertex = Some(bind_vertex(index, &element.properties)?);
                }
                "face" => {
                    if face.is_some() {
                        return Err(PlyError::DuplicateElement(element.name.clone()));
                    }
                    face = Some(bind_face(index, &element.properties)?);
                }
                _ => {}
            }
        }

        let has_faces = face.is_some_and(|f: FaceBindings| header.elements()[f.element].count > 0);
        if let Some(f) = face.filter(|_| has_faces) {
            match vertex {
                Some(v) if v.element < f.element => {}
                _ => return Err(PlyError::FacesWithoutVertices),
            }
            if f.vertex_indices.is_none() {
                return Err(PlyError::MissingVertexIndices);
            }
        }

        debug!(
            has_vertices = vertex.is_some(),
            has_normals = vertex.is_some_and(|v| v.normal.is_some()),
            has_colors = vertex.is_some_and(|v| v.color.is_some()),
            has_faces,
            "resolved PLY bindings"
        );

        Ok(Self {
            vertex,
            face,
            has_faces,
        })
    }
}

/// Locate each name of `names` among scalar properties. Every name may
/// appear at most once and never as a list.
fn find_scalars<const N: usize>(
    properties: &[Property],
    names: [&'static str; N],
) -> Result<[Option<usize>; N], PlyError> {
    let mut slots = [None; N];
    for (index, property) in properties.iter().enumerate() {
        let Some(slot) = names.iter().position(|n| *n == property.name()) else {
            continue;
        };
        if property.is_list() {
            return Err(PlyError::InvalidProperty(format!("vertex.{}", names[slot])));
        }
        if slots[slot].is_some() {
            return Err(PlyError::DuplicateProperty(format!("vertex.{}", names[slot])));
        }
        slots[slot] = Some(index);
    }
    Ok(slots)
}

/// All-or-nothing triple: `Ok(None)` if no slot is bound, `Err(incomplete)` if
/// only some are.
fn complete_triple(
    slots: [Option<usize>; 3],
    incomplete: PlyError,
) -> Result<Option<[usize; 3]>, PlyError> {
    match slots {
        [Some(a), Some(b), Some(c)] => Ok(Some([a, b, c])),
        [None, None, None] => Ok(None),
        _ => Err(incomplete),
    }
}

fn bind_vertex(element: usize, properties: &[Property]) -> Result<VertexBindings, PlyError> {
    let [x, y, z] = find_scalars(properties, ["x", "y", "z"])?;
    let normal = find_scalars(properties, ["nx", "ny", "nz"])?;
    let color = find_scalars(properties, ["red", "green", "blue"])?;

    let position = [
        x.ok_or(PlyError::MissingCoordinate("x"))?,
        y.ok_or(PlyError::MissingCoordinate("y"))?,
        z.ok_or(PlyError::MissingCoordinate("z"))?,
    ];

    Ok(VertexBindings {
        element,
        position,
        normal: complete_triple(normal, PlyError::IncompleteNormal)?,
        color: complete_triple(color, PlyError::IncompleteColor)?,
    })
}

fn bind_face(element: usize, properties: &[Property]) -> Result<FaceBindings, PlyError> {
    let mut vertex_indices = None;
    for (index, property) in properties.iter().enumerate() {
        if property.name() != "vertex_indices" {
            continue;
        }
        match property {
            Property::Scalar { .. } => {
                return Err(PlyError::InvalidProperty("face.vertex_indices".into()));
            }
            Property::List { elem_ty, .. } if !elem_ty.is_integral() => {
                return Err(PlyError::NonIntegralIndices);
            }
            Property::List { .. } => {}
        }
        if vertex_indices.is_some() {
            return Err(PlyError::DuplicateProperty("face.vertex_indices".into()));
        }
        vertex_indices = Some(index);
    }
    Ok(FaceBindings {
        element,
        vertex_indices,
    })
}
