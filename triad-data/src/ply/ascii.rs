//! ASCII body decoding.

use crate::ply::{BodyInput, Number, PlyError, ScalarType};
use std::io::BufRead;
use std::ops::Range;

/// Whitespace-separated token stream over an ASCII PLY file.
pub struct AsciiInput<R> {
    reader: R,
    line: Vec<u8>,
    cursor: usize,
}

impl<R: BufRead> AsciiInput<R> {
    /// Wrap a reader positioned at the start of the file, skipping the
    /// header up to and including the `end_header` line.
    pub fn new(mut reader: R) -> Result<Self, PlyError> {
        let mut line = Vec::new();
        loop {
            line.clear();
            if reader.read_until(b'\n', &mut line)? == 0 {
                return Err(PlyError::HeaderNotFound);
            }
            let text = line.strip_suffix(b"\n").unwrap_or(&line[..]);
            let text = text.strip_suffix(b"\r").unwrap_or(text);
            if text == b"end_header" {
                break;
            }
        }
        line.clear();
        Ok(Self {
            reader,
            line,
            cursor: 0,
        })
    }

    /// Byte range of the next token within `self.line`, refilling line by line.
    fn next_token(&mut self) -> Result<Option<Range<usize>>, PlyError> {
        loop {
            let rest = &self.line[self.cursor..];
            if let Some(offset) = rest.iter().position(|b| !b.is_ascii_whitespace()) {
                let start = self.cursor + offset;
                let end = self.line[start..]
                    .iter()
                    .position(|b| b.is_ascii_whitespace())
                    .map_or(self.line.len(), |len| start + len);
                self.cursor = end;
                return Ok(Some(start..end));
            }
            self.line.clear();
            self.cursor = 0;
            if self.reader.read_until(b'\n', &mut self.line)? == 0 {
                return Ok(None);
            }
        }
    }
}

impl<R: BufRead> BodyInput for AsciiInput<R> {
    fn read(&mut self, ty: ScalarType) -> Result<Number, PlyError> {
        let range = self.next_token()?.ok_or(PlyError::UnexpectedEof)?;
        let token = &self.line[range];
        match std::str::from_utf8(token) {
            Ok(text) => ty.parse_ascii(text),
            Err(_) => Err(PlyError::InvalidToken {
                ty: ty.name(),
                token: String::from_utf8_lossy(token).into_owned(),
            }),
        }
    }

    fn need_end(&mut self) -> Result<(), PlyError> {
        match self.next_token()? {
            Some(_) => Err(PlyError::TrailingData),
            None => Ok(()),
        }
    }
}
