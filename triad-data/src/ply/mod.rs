//! PLY file loading and parsing
//!
//! A [`PlyReader`] parses the header eagerly and decodes the body on demand
//! through an ASCII or binary [`BodyInput`], depending on the declared format.

mod ascii;
mod binary;
mod bindings;
mod error;
mod header;
mod input;
mod loader;
mod scalar;
mod vertex;

pub use ascii::AsciiInput;
pub use binary::{BinaryInput, ByteWindow, WINDOW_CAPACITY};
pub use bindings::{Bindings, FaceBindings, VertexBindings};
pub use error::PlyError;
pub use header::{Element, FileFormat, Header, Property};
pub use input::BodyInput;
pub use loader::{PlyReader, load_mesh_from_ply, ply_has_faces};
pub use scalar::{Endianness, Number, ScalarType};
pub use vertex::PlyVertex;
