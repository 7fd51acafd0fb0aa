//! Scalar value types that PLY properties are declared with.

use crate::ply::PlyError;
use byteorder::{BigEndian, ByteOrder, LittleEndian};
use serde::Serialize;
use std::fmt;

/// Byte order of a binary PLY body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Endianness {
    Little,
    Big,
}

/// One of the eight scalar kinds a PLY property can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalarType {
    Int8,
    UInt8,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Float32,
    Float64,
}

impl ScalarType {
    /// Parse a header type keyword. Only the classic names are accepted.
    pub fn parse_name(name: &str) -> Result<Self, PlyError> {
        match name {
            "char" => Ok(Self::Int8),
            "uchar" => Ok(Self::UInt8),
            "short" => Ok(Self::Int16),
            "ushort" => Ok(Self::UInt16),
            "int" => Ok(Self::Int32),
            "uint" => Ok(Self::UInt32),
            "float" => Ok(Self::Float32),
            "double" => Ok(Self::Float64),
            _ => Err(PlyError::UnknownType(name.to_string())),
        }
    }

    /// The header keyword for this type.
    pub fn name(self) -> &'static str {
        match self {
            Self::Int8 => "char",
            Self::UInt8 => "uchar",
            Self::Int16 => "short",
            Self::UInt16 => "ushort",
            Self::Int32 => "int",
            Self::UInt32 => "uint",
            Self::Float32 => "float",
            Self::Float64 => "double",
        }
    }

    /// Size of one value in a binary body.
    pub fn binary_width(self) -> usize {
        match self {
            Self::Int8 | Self::UInt8 => 1,
            Self::Int16 | Self::UInt16 => 2,
            Self::Int32 | Self::UInt32 | Self::Float32 => 4,
            Self::Float64 => 8,
        }
    }

    pub fn is_integral(self) -> bool {
        !matches!(self, Self::Float32 | Self::Float64)
    }

    pub fn is_signed(self) -> bool {
        !matches!(self, Self::UInt8 | Self::UInt16 | Self::UInt32)
    }

    /// Parse one whitespace-delimited token of an ASCII body.
    ///
    /// Integer kinds require an exact integer literal within the type's range;
    /// float kinds accept decimal and scientific notation.
    pub fn parse_ascii(self, token: &str) -> Result<Number, PlyError> {
        let invalid = || PlyError::InvalidToken {
            ty: self.name(),
            token: token.to_string(),
        };
        let number = match self {
            Self::Int8 => Number::Int(token.parse::<i8>().map_err(|_| invalid())?.into()),
            Self::UInt8 => Number::Int(token.parse::<u8>().map_err(|_| invalid())?.into()),
            Self::Int16 => Number::Int(token.parse::<i16>().map_err(|_| invalid())?.into()),
            Self::UInt16 => Number::Int(token.parse::<u16>().map_err(|_| invalid())?.into()),
            Self::Int32 => Number::Int(token.parse::<i32>().map_err(|_| invalid())?.into()),
            Self::UInt32 => Number::Int(token.parse::<u32>().map_err(|_| invalid())?.into()),
            Self::Float32 => Number::Float(token.parse::<f32>().map_err(|_| invalid())?.into()),
            Self::Float64 => Number::Float(token.parse::<f64>().map_err(|_| invalid())?),
        };
        Ok(number)
    }

    /// Decode a value from exactly [`binary_width`](Self::binary_width) bytes.
    pub fn decode_binary(self, bytes: &[u8], endianness: Endianness) -> Number {
        debug_assert_eq!(bytes.len(), self.binary_width());
        match endianness {
            Endianness::Little => self.decode_with::<LittleEndian>(bytes),
            Endianness::Big => self.decode_with::<BigEndian>(bytes),
        }
    }

    fn decode_with<E: ByteOrder>(self, bytes: &[u8]) -> Number {
        match self {
            Self::Int8 => Number::Int((bytes[0] as i8).into()),
            Self::UInt8 => Number::Int(bytes[0].into()),
            Self::Int16 => Number::Int(E::read_i16(bytes).into()),
            Self::UInt16 => Number::Int(E::read_u16(bytes).into()),
            Self::Int32 => Number::Int(E::read_i32(bytes).into()),
            Self::UInt32 => Number::Int(E::read_u32(bytes).into()),
            Self::Float32 => Number::Float(E::read_f32(bytes).into()),
            Self::Float64 => Number::Float(E::read_f64(bytes)),
        }
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A decoded property value.
///
/// Integer kinds widen losslessly into `Int`, float kinds into `Float`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Int(i) => i as f64,
            Number::Float(f) => f,
        }
    }

    pub fn as_f32(self) -> f32 {
        self.as_f64() as f32
    }

    /// Integral value, truncating toward zero for floats.
    pub fn as_i64(self) -> i64 {
        match self {
            Number::Int(i) => i,
            Number::Float(f) => f as i64,
        }
    }
}
