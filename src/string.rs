//! Length-prefixed, terminator-carrying strings.
//!
//! Layout: `[u32 length] [content bytes] [0x00]`, where `length` counts the
//! terminator. Content is kept as raw bytes so paths written by tools that do
//! not use UTF-8 survive a round trip unchanged.

use crate::error::{MaterialError, Result};
use crate::stream::{Endpoint, ReversibleStream, Syncable};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Cow;
use std::fmt;
use std::io::{Read, Write};

/// An owned string field, such as a texture path.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct MaterialString(Vec<u8>);

impl MaterialString {
    /// Creates a string from raw content bytes (without terminator).
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Raw content bytes, without the terminator.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// The content as `&str`, if it is valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.0).ok()
    }

    /// The content as text, replacing invalid UTF-8 sequences.
    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.0)
    }

    /// Returns true if the content is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Content length in bytes, without the terminator.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Number of bytes this string occupies on the wire.
    pub fn encoded_len(&self) -> usize {
        4 + self.0.len() + 1
    }
}

impl Syncable for MaterialString {
    fn sync(&mut self, stream: &mut ReversibleStream<'_>) -> Result<()> {
        let offset = stream.position();
        let mut length = u32::try_from(self.0.len() + 1).map_err(|_| {
            MaterialError::format_at(offset, format!("string of {} bytes is too long", self.0.len()))
        })?;
        stream.sync(&mut length)?;
        if length == 0 {
            return Err(MaterialError::format_at(offset, "string with recorded length 0"));
        }

        match stream.endpoint() {
            Endpoint::Source(source) => {
                // Grows with what the source actually holds, not with `length`.
                let mut content = Vec::new();
                source.take(u64::from(length)).read_to_end(&mut content)?;
                if content.len() != length as usize {
                    return Err(std::io::Error::new(
                        std::io::ErrorKind::UnexpectedEof,
                        format!(
                            "string at byte {offset} needs {length} bytes, {} available",
                            content.len()
                        ),
                    )
                    .into());
                }
                content.pop();
                self.0 = content;
            }
            Endpoint::Sink(sink) => {
                sink.write_all(&self.0)?;
                sink.write_all(&[0])?;
            }
        }
        stream.advance(length as usize);
        Ok(())
    }
}

impl fmt::Debug for MaterialString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.to_string_lossy(), f)
    }
}

impl fmt::Display for MaterialString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_lossy())
    }
}

impl From<&str> for MaterialString {
    fn from(value: &str) -> Self {
        Self(value.as_bytes().to_vec())
    }
}

impl From<String> for MaterialString {
    fn from(value: String) -> Self {
        Self(value.into_bytes())
    }
}

impl PartialEq<str> for MaterialString {
    fn eq(&self, other: &str) -> bool {
        self.0 == other.as_bytes()
    }
}

impl PartialEq<&str> for MaterialString {
    fn eq(&self, other: &&str) -> bool {
        self.0 == other.as_bytes()
    }
}

impl Serialize for MaterialString {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string_lossy())
    }
}

impl<'de> Deserialize<'de> for MaterialString {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::from)
    }
}
