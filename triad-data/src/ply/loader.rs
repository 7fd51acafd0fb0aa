//! PLY file loading functions

use crate::Mesh;
use crate::ply::{
    AsciiInput, BinaryInput, Bindings, BodyInput, Element, FaceBindings, Header, PlyError,
    PlyVertex, Property, ScalarType, VertexBindings,
};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Reads meshes from a PLY file.
///
/// The header is parsed and validated when the reader is opened; query the
/// capability flags before calling [`read_mesh`](Self::read_mesh), which
/// decodes the body in a separate pass over the file.
#[derive(Debug)]
pub struct PlyReader {
    path: PathBuf,
    header: Header,
    bindings: Bindings,
}

impl PlyReader {
    #[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self, PlyError> {
        let path = path.as_ref().to_path_buf();
        let header = Header::parse(BufReader::new(File::open(&path)?))?;
        for element in header.elements() {
            debug!(
                element = %element.name,
                count = element.count,
                properties = element.properties.len(),
                "PLY element"
            );
        }
        let bindings = Bindings::resolve(&header)?;
        Ok(Self {
            path,
            header,
            bindings,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn has_vertices(&self) -> bool {
        self.bindings.vertex.is_some()
    }

    pub fn has_normals(&self) -> bool {
        self.bindings.vertex.is_some_and(|v| v.normal.is_some())
    }

    pub fn has_vertex_colors(&self) -> bool {
        self.bindings.vertex.is_some_and(|v| v.color.is_some())
    }

    /// Whether the file declares at least one face.
    pub fn has_faces(&self) -> bool {
        self.bindings.has_faces
    }

    /// Decode the body into a mesh.
    ///
    /// Fails with [`PlyError::NoVertices`] or [`PlyError::NoFaces`] if the
    /// file lacks either. The file is reopened for this pass and closed
    /// before returning.
    #[tracing::instrument(skip_all, fields(path = %self.path.display()))]
    pub fn read_mesh(&self) -> Result<Mesh, PlyError> {
        let vertex = self.bindings.vertex.ok_or(PlyError::NoVertices)?;
        let face = match self.bindings.face {
            Some(face) if self.bindings.has_faces => face,
            _ => return Err(PlyError::NoFaces),
        };

        let file = File::open(&self.path)?;
        let result = match self.header.format().endianness() {
            None => AsciiInput::new(BufReader::new(file))
                .and_then(|mut input| self.assemble(&mut input, vertex, face)),
            Some(endianness) => BinaryInput::new(file, endianness)
                .and_then(|mut input| self.assemble(&mut input, vertex, face)),
        };

        match &result {
            Ok(mesh) => info!(
                vertices = mesh.vertex_count(),
                triangles = mesh.triangle_count(),
                "PLY mesh loaded"
            ),
            Err(e) => warn!("Failed to read PLY body: {}", e),
        }
        result
    }

    /// Walk every element in declared order, routing bound properties into
    /// mesh channels and discarding everything else.
    fn assemble<I: BodyInput>(
        &self,
        input: &mut I,
        vertex: VertexBindings,
        face: FaceBindings,
    ) -> Result<Mesh, PlyError> {
        let elements = self.header.elements();
        let vertex_count = elements[vertex.element].count;
        // The declared count is unverified until the body has been read.
        let mut vertices = Vec::new();
        let mut indices = Vec::new();

        for (index, element) in elements.iter().enumerate() {
            if index == vertex.element {
                read_vertices(input, element, &vertex, &mut vertices)?;
            } else if index == face.element {
                read_faces(input, element, &face, vertex_count, &mut indices)?;
            } else {
                debug!(element = %element.name, count = element.count, "skipping element");
                for _ in 0..element.count {
                    for property in &element.properties {
                        skip_property(input, property)?;
                    }
                }
            }
        }
        input.need_end()?;

        Ok(flatten(&vertices, indices))
    }
}

/// Destination of one vertex property.
#[derive(Debug, Clone, Copy)]
enum Channel {
    Position(usize),
    Normal(usize),
    Color(usize),
    Skip,
}

fn channels(element: &Element, bindings: &VertexBindings) -> Vec<Channel> {
    let mut channels = vec![Channel::Skip; element.properties.len()];
    for axis in 0..3 {
        channels[bindings.position[axis]] = Channel::Position(axis);
        if let Some(normal) = bindings.normal {
            channels[normal[axis]] = Channel::Normal(axis);
        }
        if let Some(color) = bindings.color {
            channels[color[axis]] = Channel::Color(axis);
        }
    }
    channels
}

fn read_vertices<I: BodyInput>(
    input: &mut I,
    element: &Element,
    bindings: &VertexBindings,
    vertices: &mut Vec<PlyVertex>,
) -> Result<(), PlyError> {
    let channels = channels(element, bindings);
    for _ in 0..element.count {
        // Color stays black when the file has none.
        let mut vertex = PlyVertex::default();
        for (property, channel) in element.properties.iter().zip(&channels) {
            let ty = match (property, channel) {
                (_, Channel::Skip) | (Property::List { .. }, _) => {
                    skip_property(input, property)?;
                    continue;
                }
                (Property::Scalar { ty, .. }, _) => *ty,
            };
            let value = input.read(ty)?;
            match *channel {
                Channel::Position(axis) => vertex.position[axis] = value.as_f32(),
                Channel::Normal(axis) => vertex.normal[axis] = value.as_f32(),
                Channel::Color(axis) => vertex.color[axis] = value.as_i64() as f32 / 255.0,
                Channel::Skip => {}
            }
        }
        vertices.push(vertex);
    }
    Ok(())
}

fn read_faces<I: BodyInput>(
    input: &mut I,
    element: &Element,
    bindings: &FaceBindings,
    vertex_count: usize,
    indices: &mut Vec<u32>,
) -> Result<(), PlyError> {
    for _ in 0..element.count {
        for (index, property) in element.properties.iter().enumerate() {
            match property {
                Property::List {
                    count_ty, elem_ty, ..
                } if bindings.vertex_indices == Some(index) => {
                    read_face(input, *count_ty, *elem_ty, vertex_count, indices)?;
                }
                _ => skip_property(input, property)?,
            }
        }
    }
    Ok(())
}

/// Decode one `vertex_indices` list, fan-splitting quads into two triangles.
fn read_face<I: BodyInput>(
    input: &mut I,
    count_ty: ScalarType,
    elem_ty: ScalarType,
    vertex_count: usize,
    indices: &mut Vec<u32>,
) -> Result<(), PlyError> {
    let count = input.read(count_ty)?.as_i64();
    let mut next = || -> Result<u32, PlyError> {
        let index = input.read(elem_ty)?.as_i64();
        if index < 0 || index as u64 >= vertex_count as u64 {
            return Err(PlyError::InvalidVertexIndex(index));
        }
        u32::try_from(index).map_err(|_| PlyError::InvalidVertexIndex(index))
    };

    match count {
        3 => {
            let (v1, v2, v3) = (next()?, next()?, next()?);
            indices.extend_from_slice(&[v1, v2, v3]);
        }
        4 => {
            let (v1, v2, v3, v4) = (next()?, next()?, next()?, next()?);
            indices.extend_from_slice(&[v1, v2, v3, v1, v3, v4]);
        }
        count if count < 3 => return Err(PlyError::DegenerateFace(count)),
        count => return Err(PlyError::UnsupportedFaceArity(count)),
    }
    Ok(())
}

/// Consume one property value without using it.
fn skip_property<I: BodyInput>(input: &mut I, property: &Property) -> Result<(), PlyError> {
    match property {
        Property::Scalar { ty, .. } => {
            input.read(*ty)?;
        }
        Property::List {
            count_ty, elem_ty, ..
        } => {
            let count = input.read(*count_ty)?.as_i64();
            if count < 0 {
                return Err(PlyError::NegativeListCount);
            }
            for _ in 0..count {
                input.read(*elem_ty)?;
            }
        }
    }
    Ok(())
}

fn flatten(vertices: &[PlyVertex], indices: Vec<u32>) -> Mesh {
    let mut mesh = Mesh {
        positions: Vec::with_capacity(vertices.len() * 3),
        colors: Vec::with_capacity(vertices.len() * 3),
        normals: Vec::with_capacity(vertices.len() * 3),
        indices,
    };
    for vertex in vertices {
        mesh.positions.extend_from_slice(&vertex.position.to_array());
        mesh.colors.extend_from_slice(&vertex.color.to_array());
        mesh.normals.extend_from_slice(&vertex.normal.to_array());
    }
    mesh
}

/// Load a mesh from a PLY file in one call.
pub fn load_mesh_from_ply(path: impl AsRef<Path>) -> Result<Mesh, PlyError> {
    PlyReader::open(path)?.read_mesh()
}

/// Check if a PLY file contains face data, reading only its header.
pub fn ply_has_faces(path: impl AsRef<Path>) -> Result<bool, PlyError> {
    Ok(PlyReader::open(path)?.has_faces())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    use ScalarType::{Float32, Float64, Int16, Int32, UInt8, UInt16};

    fn write_file(bytes: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(bytes).unwrap();
        file.flush().unwrap();
        file
    }

    fn read_ascii(text: &str) -> Result<Mesh, PlyError> {
        let file = write_file(text.as_bytes());
        load_mesh_from_ply(file.path())
    }

    /// Body values of one file, in on-disk order.
    type Body = Vec<(ScalarType, f64)>;

    fn encode_ascii(body: &Body) -> String {
        let tokens: Vec<String> = body
            .iter()
            .map(|(ty, v)| {
                if ty.is_integral() {
                    format!("{}", *v as i64)
                } else {
                    format!("{v}")
                }
            })
            .collect();
        tokens.join(" ") + "\n"
    }

    fn encode_binary(body: &Body, big: bool) -> Vec<u8> {
        macro_rules! bytes {
            ($v:expr) => {
                if big { $v.to_be_bytes().to_vec() } else { $v.to_le_bytes().to_vec() }
            };
        }
        body.iter()
            .flat_map(|(ty, v)| match ty {
                ScalarType::Int8 => bytes!(*v as i8),
                ScalarType::UInt8 => bytes!(*v as u8),
                ScalarType::Int16 => bytes!(*v as i16),
                ScalarType::UInt16 => bytes!(*v as u16),
                ScalarType::Int32 => bytes!(*v as i32),
                ScalarType::UInt32 => bytes!(*v as u32),
                ScalarType::Float32 => bytes!(*v as f32),
                ScalarType::Float64 => bytes!(*v),
            })
            .collect()
    }

    fn header(format: &str, body: &str) -> String {
        format!("ply\nformat {format} 1.0\ncomment test fixture\n{body}end_header\n")
    }

    /// A mesh with normals, colors, unknown properties and an unknown
    /// element between vertices and faces.
    fn rich_fixture() -> (String, Body) {
        let schema = "element vertex 4\n\
                      property float x\n\
                      property list uchar short tags\n\
                      property float y\n\
                      property float z\n\
                      property double nx\n\
                      property double ny\n\
                      property double nz\n\
                      property uchar red\n\
                      property uchar green\n\
                      property uchar blue\n\
                      property ushort confidence\n\
                      element material 2\n\
                      property list uchar float params\n\
                      property uchar id\n\
                      element face 2\n\
                      property uchar flags\n\
                      property list uchar int vertex_indices\n\
                      property list uchar uchar extra\n";

        let mut body: Body = Vec::new();
        let vertices = [
            ([0.0, 0.0, 0.0], [0.0, 0.0, 1.0], [255.0, 0.0, 0.0], vec![]),
            ([1.5, 0.0, -2.25], [0.0, 1.0, 0.0], [0.0, 255.0, 0.0], vec![7.0, -8.0]),
            ([1.0, 1.0, 0.5], [1.0, 0.0, 0.0], [0.0, 0.0, 255.0], vec![9.0]),
            ([0.0, 1.0, 0.0], [0.0, -1.0, 0.0], [51.0, 102.0, 204.0], vec![]),
        ];
        for (p, n, c, tags) in &vertices {
            body.push((Float32, p[0]));
            body.push((UInt8, tags.len() as f64));
            body.extend(tags.iter().map(|t| (Int16, *t)));
            body.push((Float32, p[1]));
            body.push((Float32, p[2]));
            body.extend(n.iter().map(|v| (Float64, *v)));
            body.extend(c.iter().map(|v| (UInt8, *v)));
            body.push((UInt16, 1000.0));
        }
        // Materials.
        body.extend([(UInt8, 2.0), (Float32, 0.5), (Float32, 0.75), (UInt8, 1.0)]);
        body.extend([(UInt8, 0.0), (UInt8, 2.0)]);
        // A quad, then a triangle.
        body.extend([(UInt8, 0.0), (UInt8, 4.0)]);
        body.extend([0.0, 1.0, 2.0, 3.0].map(|i| (Int32, i)));
        body.extend([(UInt8, 1.0), (UInt8, 42.0)]);
        body.extend([(UInt8, 1.0), (UInt8, 3.0)]);
        body.extend([3.0, 2.0, 1.0].map(|i| (Int32, i)));
        body.push((UInt8, 0.0));

        (schema.to_string(), body)
    }

    fn assert_close(a: &[f32], b: &[f32]) {
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(b) {
            assert!((x - y).abs() < 1e-5, "{x} != {y}");
        }
    }

    #[test]
    fn test_single_triangle() {
        let mesh = read_ascii(&(header(
            "ascii",
            "element vertex 3\nproperty float x\nproperty float y\nproperty float z\n\
             element face 1\nproperty list uchar int vertex_indices\n",
        ) + "0 0 0  1 0 0  0 1 0  3 0 1 2\n"))
        .unwrap();

        assert_eq!(mesh.positions, vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0]);
        assert_eq!(mesh.indices, vec![0, 1, 2]);
        assert_eq!(mesh.colors, vec![0.0; 9]);
        assert_eq!(mesh.normals, vec![0.0; 9]);
    }

    #[test]
    fn test_rich_file_all_formats_agree() {
        let (schema, body) = rich_fixture();

        let ascii = write_file((header("ascii", &schema) + &encode_ascii(&body)).as_bytes());
        let mut le = header("binary_little_endian", &schema).into_bytes();
        le.extend(encode_binary(&body, false));
        let le = write_file(&le);
        let mut be = header("binary_big_endian", &schema).into_bytes();
        be.extend(encode_binary(&body, true));
        let be = write_file(&be);

        let reader = PlyReader::open(ascii.path()).unwrap();
        assert!(reader.has_vertices());
        assert!(reader.has_normals());
        assert!(reader.has_vertex_colors());
        assert!(reader.has_faces());
        assert_eq!(reader.header().comments(), ["test fixture"]);
        let from_ascii = reader.read_mesh().unwrap();

        assert_close(
            &from_ascii.positions,
            &[0.0, 0.0, 0.0, 1.5, 0.0, -2.25, 1.0, 1.0, 0.5, 0.0, 1.0, 0.0],
        );
        assert_close(
            &from_ascii.normals,
            &[0.0, 0.0, 1.0, 0.0, 1.0, 0.0, 1.0, 0.0, 0.0, 0.0, -1.0, 0.0],
        );
        assert_close(
            &from_ascii.colors,
            &[1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.2, 0.4, 0.8],
        );
        assert_eq!(from_ascii.indices, vec![0, 1, 2, 0, 2, 3, 3, 2, 1]);

        for file in [&le, &be] {
            let mesh = load_mesh_from_ply(file.path()).unwrap();
            assert_close(&mesh.positions, &from_ascii.positions);
            assert_close(&mesh.normals, &from_ascii.normals);
            assert_close(&mesh.colors, &from_ascii.colors);
            assert_eq!(mesh.indices, from_ascii.indices);
        }
    }

    #[test]
    fn test_large_binary_body_crosses_window() {
        let count = 3000;
        let schema = format!(
            "element vertex {count}\nproperty double x\nproperty double y\nproperty double z\n\
             element face {}\nproperty list uchar uint vertex_indices\n",
            count - 2
        );
        let mut body: Body = Vec::new();
        for i in 0..count {
            body.extend([(Float64, i as f64), (Float64, -(i as f64)), (Float64, 0.5)]);
        }
        for i in 0..count - 2 {
            body.push((UInt8, 3.0));
            body.extend([i, i + 1, i + 2].map(|v| (ScalarType::UInt32, v as f64)));
        }
        let mut bytes = header("binary_little_endian", &schema).into_bytes();
        bytes.extend(encode_binary(&body, false));
        let file = write_file(&bytes);

        let mesh = load_mesh_from_ply(file.path()).unwrap();
        assert_eq!(mesh.vertex_count(), count);
        assert_eq!(mesh.triangle_count(), count - 2);
        assert_eq!(mesh.position(2999).x, 2999.0);
        assert_eq!(mesh.position(2999).y, -2999.0);
        assert_eq!(mesh.indices[mesh.indices.len() - 3..], [2997, 2998, 2999]);
    }

    #[test]
    fn test_quad_with_missing_vertex_fails() {
        let err = read_ascii(&(header(
            "ascii",
            "element vertex 3\nproperty float x\nproperty float y\nproperty float z\n\
             element face 1\nproperty list uchar int vertex_indices\n",
        ) + "0 0 0\n1 0 0\n0 1 0\n4 0 1 2 3\n"))
        .unwrap_err();
        assert!(matches!(err, PlyError::InvalidVertexIndex(3)));
    }

    #[test]
    fn test_repeated_index_in_quad_is_allowed() {
        let mesh = read_ascii(&(header(
            "ascii",
            "element vertex 3\nproperty float x\nproperty float y\nproperty float z\n\
             element face 1\nproperty list uchar int vertex_indices\n",
        ) + "0 0 0\n1 0 0\n0 1 0\n4 0 1 2 1\n"))
        .unwrap();
        assert_eq!(mesh.indices, vec![0, 1, 2, 0, 2, 1]);
    }

    #[test]
    fn test_negative_index_fails() {
        let err = read_ascii(&(header(
            "ascii",
            "element vertex 3\nproperty float x\nproperty float y\nproperty float z\n\
             element face 1\nproperty list uchar int vertex_indices\n",
        ) + "0 0 0\n1 0 0\n0 1 0\n3 0 -1 2\n"))
        .unwrap_err();
        assert!(matches!(err, PlyError::InvalidVertexIndex(-1)));
    }

    #[test]
    fn test_face_arity_limits() {
        let schema = "element vertex 5\nproperty float x\nproperty float y\nproperty float z\n\
                      element face 1\nproperty list uchar int vertex_indices\n";
        let vertices = "0 0 0\n1 0 0\n0 1 0\n1 1 0\n2 2 0\n";

        let err = read_ascii(&(header("ascii", schema) + vertices + "2 0 1\n")).unwrap_err();
        assert!(matches!(err, PlyError::DegenerateFace(2)));

        let err = read_ascii(&(header("ascii", schema) + vertices + "5 0 1 2 3 4\n")).unwrap_err();
        assert!(matches!(err, PlyError::UnsupportedFaceArity(5)));
    }

    #[test]
    fn test_negative_list_count() {
        let schema = "element vertex 1\nproperty float x\nproperty float y\nproperty float z\n\
                      property list char int junk\n\
                      element face 1\nproperty list uchar int vertex_indices\n";
        let err = read_ascii(&(header("ascii", schema) + "0 0 0 -1\n3 0 0 0\n")).unwrap_err();
        assert!(matches!(err, PlyError::NegativeListCount));
    }

    #[test]
    fn test_trailing_data() {
        let schema = "element vertex 3\nproperty float x\nproperty float y\nproperty float z\n\
                      element face 1\nproperty list uchar int vertex_indices\n";
        let err = read_ascii(&(header("ascii", schema) + "0 0 0 1 0 0 0 1 0 3 0 1 2 9\n"))
            .unwrap_err();
        assert!(matches!(err, PlyError::TrailingData));

        let mut body: Body = vec![(Float32, 0.0); 9];
        body.push((UInt8, 3.0));
        body.extend([0.0, 1.0, 2.0].map(|i| (Int32, i)));
        body.push((UInt8, 0.0));
        let mut bytes = header("binary_big_endian", schema).into_bytes();
        bytes.extend(encode_binary(&body, true));
        let file = write_file(&bytes);
        let err = load_mesh_from_ply(file.path()).unwrap_err();
        assert!(matches!(err, PlyError::TrailingData));
    }

    #[test]
    fn test_truncated_binary_body() {
        let schema = "element vertex 3\nproperty float x\nproperty float y\nproperty float z\n\
                      element face 1\nproperty list uchar int vertex_indices\n";
        let mut body: Body = vec![(Float32, 0.0); 9];
        body.push((UInt8, 3.0));
        body.extend([0.0, 1.0].map(|i| (Int32, i)));
        let mut bytes = header("binary_little_endian", schema).into_bytes();
        bytes.extend(encode_binary(&body, false));
        let file = write_file(&bytes);
        let err = load_mesh_from_ply(file.path()).unwrap_err();
        assert!(matches!(err, PlyError::UnexpectedEof));
    }

    #[test]
    fn test_oversized_vertex_count_hits_eof() {
        let schema = "element vertex 2147483647\nproperty float x\nproperty float y\nproperty float z\n\
                      element face 1\nproperty list uchar int vertex_indices\n";
        let err = read_ascii(&(header("ascii", schema) + "0 0 0\n")).unwrap_err();
        assert!(matches!(err, PlyError::UnexpectedEof));

        let mut bytes = header("binary_little_endian", schema).into_bytes();
        bytes.extend(encode_binary(&vec![(Float32, 0.0); 3], false));
        let file = write_file(&bytes);
        let err = load_mesh_from_ply(file.path()).unwrap_err();
        assert!(matches!(err, PlyError::UnexpectedEof));
    }

    #[test]
    fn test_vertex_count_beyond_int_range_fails_on_open() {
        let schema = "element vertex 1000000000000000000\nproperty float x\nproperty float y\n\
                      property float z\nelement face 1\nproperty list uchar int vertex_indices\n";
        let file = write_file((header("ascii", schema) + "0 0 0\n").as_bytes());
        let err = PlyReader::open(file.path()).unwrap_err();
        assert!(matches!(err, PlyError::ElementCountTooLarge(name) if name == "vertex"));
    }

    #[test]
    fn test_latin1_comment_in_binary_file() {
        let schema = "element vertex 3\nproperty float x\nproperty float y\nproperty float z\n\
                      element face 1\nproperty list uchar int vertex_indices\n";
        let mut body: Body = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0]
            .map(|v| (Float32, v))
            .to_vec();
        body.push((UInt8, 3.0));
        body.extend([0.0, 1.0, 2.0].map(|i| (Int32, i)));
        let mut bytes = b"ply\nformat binary_little_endian 1.0\ncomment caf\xe9\n".to_vec();
        bytes.extend(schema.as_bytes());
        bytes.extend(b"end_header\n");
        bytes.extend(encode_binary(&body, false));
        let file = write_file(&bytes);

        let reader = PlyReader::open(file.path()).unwrap();
        assert_eq!(reader.header().comments(), ["caf\u{fffd}"]);
        let mesh = reader.read_mesh().unwrap();
        assert_eq!(mesh.indices, vec![0, 1, 2]);
        assert_eq!(mesh.position(1).x, 1.0);
    }

    #[test]
    fn test_non_utf8_body_token_is_format_error() {
        let schema = "element vertex 3\nproperty float x\nproperty float y\nproperty float z\n\
                      element face 1\nproperty list uchar int vertex_indices\n";
        let mut bytes = header("ascii", schema).into_bytes();
        bytes.extend(b"0 0 0\n1 \xff 0\n0 1 0\n3 0 1 2\n");
        let file = write_file(&bytes);
        let err = load_mesh_from_ply(file.path()).unwrap_err();
        assert!(matches!(err, PlyError::InvalidToken { ty: "float", .. }));
        assert!(err.is_format_error());
    }

    #[test]
    fn test_incomplete_normal_fails_on_open() {
        let file = write_file(
            header(
                "ascii",
                "element vertex 1\nproperty float x\nproperty float y\nproperty float z\nproperty float nx\n",
            )
            .as_bytes(),
        );
        let err = PlyReader::open(file.path()).unwrap_err();
        assert!(matches!(err, PlyError::IncompleteNormal));
        assert!(err.is_format_error());
    }

    #[test]
    fn test_point_cloud_has_no_faces() {
        let file = write_file(
            (header(
                "ascii",
                "element vertex 1\nproperty float x\nproperty float y\nproperty float z\n",
            ) + "1 2 3\n")
                .as_bytes(),
        );
        let reader = PlyReader::open(file.path()).unwrap();
        assert!(reader.has_vertices());
        assert!(!reader.has_faces());
        assert!(!ply_has_faces(file.path()).unwrap());
        let err = reader.read_mesh().unwrap_err();
        assert!(matches!(err, PlyError::NoFaces));
        assert!(!err.is_format_error());
    }

    #[test]
    fn test_no_vertices() {
        let file = write_file(header("ascii", "element edge 0\nproperty int a\n").as_bytes());
        let reader = PlyReader::open(file.path()).unwrap();
        assert!(!reader.has_vertices());
        assert!(matches!(reader.read_mesh(), Err(PlyError::NoVertices)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = PlyReader::open(dir.path().join("missing.ply")).unwrap_err();
        assert!(matches!(err, PlyError::Io(_)));
    }

    #[test]
    fn test_reader_reusable() {
        let file = write_file(
            (header(
                "ascii",
                "element vertex 3\nproperty float x\nproperty float y\nproperty float z\n\
                 element face 1\nproperty list uchar int vertex_indices\n",
            ) + "0 0 0 1 0 0 0 1 0 3 2 1 0\n")
                .as_bytes(),
        );
        let reader = PlyReader::open(file.path()).unwrap();
        assert!(ply_has_faces(file.path()).unwrap());
        let first = reader.read_mesh().unwrap();
        let second = reader.read_mesh().unwrap();
        assert_eq!(first, second);
        assert_eq!(first.indices, vec![2, 1, 0]);
    }
}
