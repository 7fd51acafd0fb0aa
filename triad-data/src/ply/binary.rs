//! Binary body decoding.
//!
//! The body is pulled through a fixed-capacity [`ByteWindow`] instead of one
//! read call per value. The same window serves the header scan and the typed
//! reads, so bytes buffered past `end_header` are never lost.

use crate::ply::{BodyInput, Endianness, Number, PlyError, ScalarType};
use std::io::{self, Read};

/// Capacity of the binary read window.
pub const WINDOW_CAPACITY: usize = 8192;

const END_HEADER: &[u8] = b"end_header";

/// A fixed buffer holding a slice `[start, end)` of not yet consumed bytes.
///
/// It never reallocates: space is reclaimed by [`compact`](Self::compact),
/// which moves the unconsumed tail to the front.
#[derive(Debug)]
pub struct ByteWindow {
    buf: Box<[u8]>,
    start: usize,
    end: usize,
}

impl ByteWindow {
    pub fn new(capacity: usize) -> Self {
        Self {
            buf: vec![0; capacity].into_boxed_slice(),
            start: 0,
            end: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Unconsumed bytes.
    pub fn available(&self) -> &[u8] {
        &self.buf[self.start..self.end]
    }

    /// Free space after the filled region.
    pub fn spare(&self) -> usize {
        self.buf.len() - self.end
    }

    /// Mark `n` available bytes as consumed.
    pub fn consume(&mut self, n: usize) {
        debug_assert!(n <= self.end - self.start);
        self.start += n;
    }

    /// Discard consumed bytes, moving the unconsumed tail to the front.
    pub fn compact(&mut self) {
        self.buf.copy_within(self.start..self.end, 0);
        self.end -= self.start;
        self.start = 0;
    }

    /// Read once from `reader` into the spare space. Returns the number of
    /// bytes added, 0 meaning end of stream.
    pub fn fill<R: Read>(&mut self, reader: &mut R) -> io::Result<usize> {
        // A zero-length read would be indistinguishable from end of stream.
        assert!(self.spare() > 0, "fill called on a full window");
        loop {
            match reader.read(&mut self.buf[self.end..]) {
                Ok(n) => {
                    self.end += n;
                    return Ok(n);
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }

    /// Take the next `n` bytes. The caller ensures they are available.
    fn take(&mut self, n: usize) -> &[u8] {
        debug_assert!(self.end - self.start >= n);
        let start = self.start;
        self.start += n;
        &self.buf[start..start + n]
    }
}

/// Fixed-width value stream over a binary PLY file.
pub struct BinaryInput<R> {
    reader: R,
    window: ByteWindow,
    endianness: Endianness,
}

impl<R: Read> BinaryInput<R> {
    /// Wrap a reader positioned at the start of the file. The header is
    /// skipped by scanning for a line that is exactly `end_header`.
    pub fn new(reader: R, endianness: Endianness) -> Result<Self, PlyError> {
        Self::with_capacity(reader, endianness, WINDOW_CAPACITY)
    }

    pub fn with_capacity(
        reader: R,
        endianness: Endianness,
        capacity: usize,
    ) -> Result<Self, PlyError> {
        // The window must fit the widest scalar.
        let capacity = capacity.max(8);
        let mut input = Self {
            reader,
            window: ByteWindow::new(capacity),
            endianness,
        };
        input.skip_header()?;
        Ok(input)
    }

    fn skip_header(&mut self) -> Result<(), PlyError> {
        // Offset of the current line, and of the next byte to scan, both
        // relative to the start of the available bytes.
        let mut line_start = 0;
        let mut scanned = 0;
        loop {
            let available = self.window.available();
            while scanned < available.len() {
                if available[scanned] == b'\n' {
                    if &available[line_start..scanned] == END_HEADER {
                        self.window.consume(scanned + 1);
                        return Ok(());
                    }
                    line_start = scanned + 1;
                }
                scanned += 1;
            }

            if self.window.spare() == 0 {
                if line_start == 0 {
                    return Err(PlyError::LineTooLong);
                }
                self.window.consume(line_start);
                self.window.compact();
                scanned -= line_start;
                line_start = 0;
            }
            if self.window.fill(&mut self.reader)? == 0 {
                return Err(PlyError::HeaderNotFound);
            }
        }
    }
}

impl<R: Read> BodyInput for BinaryInput<R> {
    fn read(&mut self, ty: ScalarType) -> Result<Number, PlyError> {
        let width = ty.binary_width();
        while self.window.available().len() < width {
            if self.window.spare() < width {
                self.window.compact();
            }
            if self.window.fill(&mut self.reader)? == 0 {
                return Err(PlyError::UnexpectedEof);
            }
        }
        Ok(ty.decode_binary(self.window.take(width), self.endianness))
    }

    fn need_end(&mut self) -> Result<(), PlyError> {
        if !self.window.available().is_empty() {
            return Err(PlyError::TrailingData);
        }
        let mut extra = [0u8; 1];
        loop {
            match self.reader.read(&mut extra) {
                Ok(0) => return Ok(()),
                Ok(_) => return Err(PlyError::TrailingData),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }
}
