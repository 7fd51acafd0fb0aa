//! PLY header parsing.
//!
//! The header is the ASCII prefix of every PLY file, from the `ply` magic line
//! up to and including `end_header`. It declares the body encoding and an
//! ordered list of elements, each with an ordered list of properties. That
//! order is the on-disk order of the body.

use crate::ply::{Endianness, PlyError, ScalarType};
use serde::Serialize;
use std::io::BufRead;
use std::str::SplitWhitespace;
use tracing::{debug, trace};

const HEADER_MAGIC: &str = "ply";
const SUPPORTED_VERSION: &str = "1.0";

/// Encoding of the body that follows the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileFormat {
    Ascii,
    BinaryLittleEndian,
    BinaryBigEndian,
}

impl FileFormat {
    fn parse(name: &str) -> Result<Self, PlyError> {
        match name {
            "ascii" => Ok(Self::Ascii),
            "binary_little_endian" => Ok(Self::BinaryLittleEndian),
            "binary_big_endian" => Ok(Self::BinaryBigEndian),
            _ => Err(PlyError::InvalidFormat(name.to_string())),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Ascii => "ascii",
            Self::BinaryLittleEndian => "binary_little_endian",
            Self::BinaryBigEndian => "binary_big_endian",
        }
    }

    /// Byte order of a binary body, `None` for ASCII.
    pub fn endianness(self) -> Option<Endianness> {
        match self {
            Self::Ascii => None,
            Self::BinaryLittleEndian => Some(Endianness::Little),
            Self::BinaryBigEndian => Some(Endianness::Big),
        }
    }
}

/// One named field of an element record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Property {
    Scalar {
        name: String,
        ty: ScalarType,
    },
    /// A count of `count_ty` followed by that many values of `elem_ty`.
    List {
        name: String,
        count_ty: ScalarType,
        elem_ty: ScalarType,
    },
}

impl Property {
    pub fn name(&self) -> &str {
        match self {
            Property::Scalar { name, .. } | Property::List { name, .. } => name,
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Property::List { .. })
    }
}

/// A named, counted group of records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Element {
    pub name: String,
    pub count: usize,
    pub properties: Vec<Property>,
}

impl Element {
    fn new(name: String, count: usize) -> Self {
        Self {
            name,
            count,
            properties: Vec::new(),
        }
    }
}

/// The parsed header: body encoding plus element schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Header {
    format: FileFormat,
    elements: Vec<Element>,
    comments: Vec<String>,
}

impl Header {
    /// Parse a header from the start of `reader`, stopping right after the
    /// `end_header` line.
    pub fn parse<R: BufRead>(mut reader: R) -> Result<Self, PlyError> {
        let mut line = String::new();

        if !next_line(&mut reader, &mut line)? || line != HEADER_MAGIC {
            return Err(PlyError::NotPly);
        }

        let mut format = None;
        let mut elements: Vec<Element> = Vec::new();
        let mut comments = Vec::new();

        loop {
            if !next_line(&mut reader, &mut line)? {
                return Err(PlyError::UnexpectedEof);
            }
            trace!(line = %line, "header line");

            let mut words = line.split_whitespace();
            let keyword = next_word(&mut words, &line)?;
            match keyword {
                "format" => {
                    if format.is_some() {
                        return Err(PlyError::DuplicateFormat);
                    }
                    if !elements.is_empty() {
                        return Err(PlyError::FormatAfterElement);
                    }
                    let name = next_word(&mut words, &line)?;
                    let version = next_word(&mut words, &line)?;
                    expect_end(&mut words, &line)?;
                    let parsed = FileFormat::parse(name)?;
                    if version != SUPPORTED_VERSION {
                        return Err(PlyError::UnsupportedVersion(version.to_string()));
                    }
                    format = Some(parsed);
                }
                "comment" => {
                    let text = line.trim_start()["comment".len()..].trim_start();
                    comments.push(text.to_string());
                }
                "obj_info" => {}
                "element" => {
                    let name = next_word(&mut words, &line)?;
                    let count: i64 = next_word(&mut words, &line)?
                        .parse()
                        .map_err(|_| PlyError::MalformedHeaderLine(line.clone()))?;
                    expect_end(&mut words, &line)?;
                    if count < 0 {
                        return Err(PlyError::NegativeElementCount(name.to_string()));
                    }
                    if count > i64::from(i32::MAX) {
                        return Err(PlyError::ElementCountTooLarge(name.to_string()));
                    }
                    elements.push(Element::new(name.to_string(), count as usize));
                }
                "property" => {
                    let element = elements
                        .last_mut()
                        .ok_or(PlyError::PropertyWithoutElement)?;
                    let property = parse_property(&mut words, &line)?;
                    element.properties.push(property);
                }
                "end_header" => break,
                other => return Err(PlyError::UnrecognizedKeyword(other.to_string())),
            }
        }

        let format = format.ok_or(PlyError::MissingFormat)?;
        debug!(
            format = format.name(),
            elements = elements.len(),
            "parsed PLY header"
        );

        Ok(Self {
            format,
            elements,
            comments,
        })
    }

    pub fn format(&self) -> FileFormat {
        self.format
    }

    /// Elements in on-disk order.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// First element with the given name.
    pub fn element(&self, name: &str) -> Option<&Element> {
        self.elements.iter().find(|e| e.name == name)
    }

    /// Text of `comment` lines, in order. They carry no meaning for decoding.
    pub fn comments(&self) -> &[String] {
        &self.comments
    }

    /// Declared number of vertices, 0 without a vertex element.
    pub fn vertex_count(&self) -> usize {
        self.element("vertex").map_or(0, |e| e.count)
    }

    /// Declared number of faces, 0 without a face element.
    pub fn face_count(&self) -> usize {
        self.element("face").map_or(0, |e| e.count)
    }
}

/// Read the next line into `line` without its terminator. Returns false at EOF.
///
/// Bytes that are not valid UTF-8 become U+FFFD, so they can only ever match
/// inside comment text.
fn next_line<R: BufRead>(reader: &mut R, line: &mut String) -> Result<bool, PlyError> {
    let mut bytes = Vec::new();
    if reader.read_until(b'\n', &mut bytes)? == 0 {
        line.clear();
        return Ok(false);
    }
    if bytes.last() == Some(&b'\n') {
        bytes.pop();
        if bytes.last() == Some(&b'\r') {
            bytes.pop();
        }
    }
    *line = String::from_utf8_lossy(&bytes).into_owned();
    Ok(true)
}

fn next_word<'a>(words: &mut SplitWhitespace<'a>, line: &str) -> Result<&'a str, PlyError> {
    words
        .next()
        .ok_or_else(|| PlyError::MalformedHeaderLine(line.to_string()))
}

fn expect_end(words: &mut SplitWhitespace<'_>, line: &str) -> Result<(), PlyError> {
    match words.next() {
        Some(_) => Err(PlyError::MalformedHeaderLine(line.to_string())),
        None => Ok(()),
    }
}

fn parse_property(words: &mut SplitWhitespace<'_>, line: &str) -> Result<Property, PlyError> {
    let ty = next_word(words, line)?;
    let property = if ty == "list" {
        let count_ty = ScalarType::parse_name(next_word(words, line)?)?;
        if !count_ty.is_integral() {
            return Err(PlyError::NonIntegralListCount);
        }
        let elem_ty = ScalarType::parse_name(next_word(words, line)?)?;
        Property::List {
            name: next_word(words, line)?.to_string(),
            count_ty,
            elem_ty,
        }
    } else {
        let name = next_word(words, line)?;
        Property::Scalar {
            name: name.to_string(),
            ty: ScalarType::parse_name(ty)?,
        }
    };
    expect_end(words, line)?;
    Ok(property)
}
