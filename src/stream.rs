//! The dual-mode cursor every traversal is written against.
//!
//! A [`ReversibleStream`] is bound either to a byte source (decoding) or to a
//! byte sink (encoding). Traversal code calls [`ReversibleStream::sync`] once
//! per field and never asks which direction it is running in: in decoding
//! mode the value is overwritten with what was read, in encoding mode the
//! value is written out untouched.
//!
//! ```rust
//! use bgsm::stream::ReversibleStream;
//!
//! let mut sink = Vec::new();
//! let mut value = 0x0102_0304_u32;
//! ReversibleStream::encoder(&mut sink).sync(&mut value)?;
//! assert_eq!(sink, [4, 3, 2, 1]);
//!
//! let mut source = &sink[..];
//! let mut decoded = 0_u32;
//! ReversibleStream::decoder(&mut source).sync(&mut decoded)?;
//! assert_eq!(decoded, value);
//! # Ok::<(), bgsm::MaterialError>(())
//! ```

use crate::error::Result;
use std::fmt;
use std::io::{Read, Write};

/// Direction a [`ReversibleStream`] runs in. Fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Values are replaced with bytes read from the source.
    Decoding,
    /// Values are written to the sink and left unchanged.
    Encoding,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Decoding => f.write_str("decoding"),
            Self::Encoding => f.write_str("encoding"),
        }
    }
}

/// The byte endpoint a stream is bound to.
pub(crate) enum Endpoint<'a> {
    Source(&'a mut dyn Read),
    Sink(&'a mut dyn Write),
}

/// A cursor that either decodes into or encodes from the values passed to it.
pub struct ReversibleStream<'a> {
    endpoint: Endpoint<'a>,
    position: u64,
}

impl<'a> ReversibleStream<'a> {
    /// Creates a stream in [`Mode::Decoding`] over `source`.
    pub fn decoder(source: &'a mut dyn Read) -> Self {
        Self {
            endpoint: Endpoint::Source(source),
            position: 0,
        }
    }

    /// Creates a stream in [`Mode::Encoding`] over `sink`.
    pub fn encoder(sink: &'a mut dyn Write) -> Self {
        Self {
            endpoint: Endpoint::Sink(sink),
            position: 0,
        }
    }

    /// Returns the direction of this stream.
    pub fn mode(&self) -> Mode {
        match self.endpoint {
            Endpoint::Source(_) => Mode::Decoding,
            Endpoint::Sink(_) => Mode::Encoding,
        }
    }

    /// Number of bytes consumed from the source or produced into the sink.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Synchronizes one value with the stream.
    ///
    /// # Errors
    /// Returns [`crate::MaterialError::Io`] when the source is exhausted or
    /// the sink refuses the bytes, and [`crate::MaterialError::Format`] when
    /// the decoded bytes describe an impossible value.
    pub fn sync<T: Syncable + ?Sized>(&mut self, value: &mut T) -> Result<()> {
        value.sync(self)
    }

    /// Reads into or writes out `buffer` verbatim.
    pub(crate) fn sync_bytes(&mut self, buffer: &mut [u8]) -> Result<()> {
        match &mut self.endpoint {
            Endpoint::Source(source) => source.read_exact(buffer)?,
            Endpoint::Sink(sink) => sink.write_all(buffer)?,
        }
        self.advance(buffer.len());
        Ok(())
    }

    pub(crate) fn endpoint(&mut self) -> &mut Endpoint<'a> {
        &mut self.endpoint
    }

    pub(crate) fn advance(&mut self, count: usize) {
        self.position += count as u64;
    }
}

impl fmt::Debug for ReversibleStream<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReversibleStream")
            .field("mode", &self.mode())
            .field("position", &self.position)
            .finish()
    }
}

/// A value with a defined wire encoding.
///
/// One implementation serves both directions; see the module docs.
pub trait Syncable {
    /// Decodes into `self` or encodes `self`, depending on the stream's mode.
    fn sync(&mut self, stream: &mut ReversibleStream<'_>) -> Result<()>;
}
