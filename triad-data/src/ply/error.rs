//! Error types for PLY decoding.

use thiserror::Error;

/// Errors that can occur while reading a PLY file.
///
/// Every variant except [`PlyError::Io`], [`PlyError::NoVertices`] and
/// [`PlyError::NoFaces`] describes malformed content; see
/// [`PlyError::is_format_error`].
#[derive(Debug, Error)]
pub enum PlyError {
    #[error("file is not in PLY format")]
    NotPly,

    #[error("unexpected end of file")]
    UnexpectedEof,

    #[error("no format specification found in header")]
    MissingFormat,

    #[error("format specified more than once")]
    DuplicateFormat,

    #[error("format specification must precede all elements")]
    FormatAfterElement,

    #[error("invalid format: {0}")]
    InvalidFormat(String),

    #[error("unknown format version: {0}")]
    UnsupportedVersion(String),

    #[error("unrecognized type: {0}")]
    UnknownType(String),

    #[error("unrecognized keyword in header: {0}")]
    UnrecognizedKeyword(String),

    #[error("malformed header line: {0:?}")]
    MalformedHeaderLine(String),

    #[error("property without element")]
    PropertyWithoutElement,

    #[error("element {0} has negative instances")]
    NegativeElementCount(String),

    #[error("element {0} has too many instances")]
    ElementCountTooLarge(String),

    #[error("list element count type must be integral")]
    NonIntegralListCount,

    #[error("multiple {0} elements")]
    DuplicateElement(String),

    #[error("multiple {0} properties")]
    DuplicateProperty(String),

    #[error("invalid {0} property")]
    InvalidProperty(String),

    #[error("no vertex.{0} property found")]
    MissingCoordinate(&'static str),

    #[error("incomplete vertex normal")]
    IncompleteNormal,

    #[error("incomplete vertex color")]
    IncompleteColor,

    #[error("faces without vertices")]
    FacesWithoutVertices,

    #[error("no face.vertex_indices property found")]
    MissingVertexIndices,

    #[error("face vertex indices must be integral")]
    NonIntegralIndices,

    #[error("invalid {ty} literal: {token:?}")]
    InvalidToken { ty: &'static str, token: String },

    #[error("list with negative number of elements")]
    NegativeListCount,

    #[error("face with {0} vertices")]
    DegenerateFace(i64),

    #[error("cannot handle faces with {0} vertices (at most 4 supported)")]
    UnsupportedFaceArity(i64),

    #[error("invalid vertex index: {0}")]
    InvalidVertexIndex(i64),

    #[error("cannot find the end of the header on the second pass: file has been modified")]
    HeaderNotFound,

    #[error("header line too long")]
    LineTooLong,

    #[error("expected end of file")]
    TrailingData,

    #[error("file contains no vertices")]
    NoVertices,

    #[error("file contains no faces")]
    NoFaces,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PlyError {
    /// Whether this error reports malformed file content, as opposed to an I/O
    /// failure or a call that the file's capabilities don't allow.
    pub fn is_format_error(&self) -> bool {
        !matches!(self, PlyError::Io(_) | PlyError::NoVertices | PlyError::NoFaces)
    }
}
