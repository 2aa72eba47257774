//! Wire encodings for the scalar and aggregate field types.
//!
//! All multi-byte values are little-endian. Booleans take one byte; any
//! nonzero byte decodes to `true` and `true` is always written as `1`.

use crate::error::Result;
use crate::stream::{Endpoint, ReversibleStream, Syncable};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// A linear RGB color stored as three floats.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Color3 {
    /// Red.
    pub r: f32,
    /// Green.
    pub g: f32,
    /// Blue.
    pub b: f32,
}

impl Color3 {
    /// Opaque white, the default for most tint colors.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);

    /// Creates a color from its components.
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }
}

macro_rules! impl_syncable_number {
    ($ty:ty, $read:ident, $write:ident) => {
        impl Syncable for $ty {
            fn sync(&mut self, stream: &mut ReversibleStream<'_>) -> Result<()> {
                match stream.endpoint() {
                    Endpoint::Source(source) => *self = source.$read::<LittleEndian>()?,
                    Endpoint::Sink(sink) => sink.$write::<LittleEndian>(*self)?,
                }
                stream.advance(std::mem::size_of::<$ty>());
                Ok(())
            }
        }
    };
}

impl_syncable_number!(u32, read_u32, write_u32);
impl_syncable_number!(i32, read_i32, write_i32);
impl_syncable_number!(f32, read_f32, write_f32);

impl Syncable for u8 {
    fn sync(&mut self, stream: &mut ReversibleStream<'_>) -> Result<()> {
        match stream.endpoint() {
            Endpoint::Source(source) => *self = source.read_u8()?,
            Endpoint::Sink(sink) => sink.write_u8(*self)?,
        }
        stream.advance(1);
        Ok(())
    }
}

impl Syncable for bool {
    fn sync(&mut self, stream: &mut ReversibleStream<'_>) -> Result<()> {
        let mut raw = u8::from(*self);
        stream.sync(&mut raw)?;
        *self = raw != 0;
        Ok(())
    }
}

impl<const N: usize> Syncable for [u8; N] {
    fn sync(&mut self, stream: &mut ReversibleStream<'_>) -> Result<()> {
        stream.sync_bytes(self)
    }
}

impl Syncable for Vec2 {
    fn sync(&mut self, stream: &mut ReversibleStream<'_>) -> Result<()> {
        stream.sync(&mut self.x)?;
        stream.sync(&mut self.y)
    }
}

impl Syncable for Vec3 {
    fn sync(&mut self, stream: &mut ReversibleStream<'_>) -> Result<()> {
        stream.sync(&mut self.x)?;
        stream.sync(&mut self.y)?;
        stream.sync(&mut self.z)
    }
}

impl Syncable for Color3 {
    fn sync(&mut self, stream: &mut ReversibleStream<'_>) -> Result<()> {
        stream.sync(&mut self.r)?;
        stream.sync(&mut self.g)?;
        stream.sync(&mut self.b)
    }
}
