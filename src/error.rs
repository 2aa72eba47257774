//! Centralized error handling for the material codec.
//!
//! Every failure in this crate is reported through [`MaterialError`] and the
//! [`Result`] alias. Nothing in the library panics on malformed input: a
//! truncated file, a bad signature or an impossible string length all come
//! back as values.
//!
//! ## Error Categories
//!
//! - **I/O Errors** ([`MaterialError::Io`]): the stream could not be opened,
//!   read or written. A file that ends in the middle of a field lands here as
//!   an `UnexpectedEof`.
//! - **Format Errors** ([`MaterialError::Format`]): the bytes were readable
//!   but describe something that cannot exist, such as a string with a
//!   recorded length of zero or an unknown signature.
//!
//! ## Status Codes
//!
//! Tools that consume these files often expect a numeric status. Success is
//! `Ok(())`, which maps to `0`; [`MaterialError::status_code`] maps every error
//! to a nonzero code.
//!
//! ```rust
//! use bgsm::{LoadOptions, MaterialError, MaterialFile};
//!
//! let mut file = MaterialFile::new();
//! match file.load_bytes(&[], &LoadOptions::default()) {
//!     Ok(()) => println!("loaded"),
//!     Err(MaterialError::Io(e)) => eprintln!("I/O error: {}", e),
//!     Err(e) => eprintln!("Other error: {}", e),
//! }
//! assert!(!file.is_valid());
//! ```

use std::fmt;
use std::io;
use std::sync::Arc;

/// A specialized `Result` type for material codec operations.
pub type Result<T> = std::result::Result<T, MaterialError>;

/// The error enum covering every failure domain of the codec.
///
/// This type is `Clone`; I/O errors are wrapped in an `Arc` for that reason.
#[derive(Debug, Clone)]
pub enum MaterialError {
    /// Low-level I/O failure.
    ///
    /// ## Common Causes
    ///
    /// - File not found or permission denied
    /// - Truncated source (the traversal needed more bytes than were left)
    /// - Closed or full sink
    Io(Arc<io::Error>),

    /// The stream was readable but its content is structurally impossible.
    ///
    /// ## Common Causes
    ///
    /// - A string whose recorded length is zero
    /// - A signature that is neither `BGSM` nor `BGEM`
    /// - A signature that does not match the kind requested by the caller
    /// - Trailing bytes when the caller asked for them to be rejected
    ///
    /// The string describes the violation and, where known, the byte offset.
    Format(String),
}

impl MaterialError {
    /// Builds a [`MaterialError::Format`] located at a stream offset.
    pub(crate) fn format_at(offset: u64, message: impl fmt::Display) -> Self {
        Self::Format(format!("{message} (at byte {offset})"))
    }

    /// Returns the nonzero status code for this error.
    ///
    /// `1` for I/O failures, `2` for format violations.
    pub fn status_code(&self) -> i32 {
        match self {
            Self::Io(_) => 1,
            Self::Format(_) => 2,
        }
    }

    /// Returns true if the stream ended before the traversal finished.
    pub fn is_truncated(&self) -> bool {
        matches!(self, Self::Io(e) if e.kind() == io::ErrorKind::UnexpectedEof)
    }
}

impl fmt::Display for MaterialError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O Error: {e}"),
            Self::Format(s) => write!(f, "Format Error: {s}"),
        }
    }
}

impl std::error::Error for MaterialError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Format(_) => None,
        }
    }
}

impl From<io::Error> for MaterialError {
    fn from(err: io::Error) -> Self {
        Self::Io(Arc::new(err))
    }
}
