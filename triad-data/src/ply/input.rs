//! Pull interface over a PLY body.

use crate::ply::{Number, PlyError, ScalarType};

/// A source of body values, decoded one at a time in declared order.
pub trait BodyInput {
    /// Decode the next value as `ty`.
    fn read(&mut self, ty: ScalarType) -> Result<Number, PlyError>;

    /// Fail with [`PlyError::TrailingData`] if anything is left in the body.
    fn need_end(&mut self) -> Result<(), PlyError>;
}
