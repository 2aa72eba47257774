//! The material header: signature and version.
//!
//! # Layout
//! `[Signature: 4 bytes] [Version: u32 LE]`
//!
//! The signature names the variant (`BGSM` for shader materials, `BGEM` for
//! effect materials). The version is the single axis every later conditional
//! is keyed on.

use crate::error::{MaterialError, Result};
use crate::stream::{ReversibleStream, Syncable};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Signature of a shader material file.
pub const SHADER_SIGNATURE: [u8; 4] = *b"BGSM";

/// Signature of an effect material file.
pub const EFFECT_SIGNATURE: [u8; 4] = *b"BGEM";

/// Newest version observed in the wild. Later versions still decode, using
/// the rules of this one.
pub const LATEST_VERSION: u32 = 22;

/// Which of the two sibling layouts a file uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MaterialKind {
    /// Surface shader parameters (`.bgsm`).
    Shader,
    /// Screen-composited effect parameters (`.bgem`).
    Effect,
}

impl MaterialKind {
    /// The 4-byte signature written at the start of the file.
    pub fn signature(self) -> [u8; 4] {
        match self {
            Self::Shader => SHADER_SIGNATURE,
            Self::Effect => EFFECT_SIGNATURE,
        }
    }

    /// Maps a signature back to its kind.
    pub fn from_signature(signature: [u8; 4]) -> Option<Self> {
        match signature {
            SHADER_SIGNATURE => Some(Self::Shader),
            EFFECT_SIGNATURE => Some(Self::Effect),
            _ => None,
        }
    }

    /// The conventional file extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Shader => "bgsm",
            Self::Effect => "bgem",
        }
    }
}

impl fmt::Display for MaterialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shader => f.write_str("ShaderMaterial"),
            Self::Effect => f.write_str("EffectMaterial"),
        }
    }
}

/// Number of texture slots a `(kind, version)` pair carries.
///
/// The count is never stored in the file.
pub fn texture_slot_count(kind: MaterialKind, version: u32) -> usize {
    match kind {
        MaterialKind::Shader if version >= 17 => 10,
        MaterialKind::Shader => 9,
        MaterialKind::Effect if version >= 10 => 8,
        MaterialKind::Effect => 5,
    }
}

/// Conventional names of the texture slots, in wire order.
///
/// The codec does not enforce these meanings; they match what the engine's
/// tools display.
pub fn texture_slot_names(kind: MaterialKind, version: u32) -> &'static [&'static str] {
    static SHADER_LEGACY: [&str; 9] = [
        "Diffuse", "Normal", "SmoothSpec", "Greyscale", "Envmap", "Glow", "InnerLayer", "Wrinkles",
        "Displacement",
    ];
    static SHADER: [&str; 10] = [
        "Diffuse", "Normal", "SmoothSpec", "Greyscale", "Glow", "Wrinkles", "Specular", "Lighting",
        "Flow", "DistanceFieldAlpha",
    ];
    static EFFECT: [&str; 8] = [
        "Base", "Grayscale", "Envmap", "Normal", "EnvmapMask", "Specular", "Lighting", "Glow",
    ];

    let count = texture_slot_count(kind, version);
    match kind {
        MaterialKind::Shader if version <= 2 => &SHADER_LEGACY,
        MaterialKind::Shader => &SHADER[..count],
        MaterialKind::Effect => &EFFECT[..count],
    }
}

/// Type discriminator and version of one material file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MaterialHeader {
    /// Which layout follows the header.
    pub kind: MaterialKind,
    /// Version every conditional field is keyed on.
    pub version: u32,
}

impl MaterialHeader {
    /// Creates a header.
    pub fn new(kind: MaterialKind, version: u32) -> Self {
        Self { kind, version }
    }

    /// See [`texture_slot_count`].
    pub fn texture_slot_count(&self) -> usize {
        texture_slot_count(self.kind, self.version)
    }

    /// See [`texture_slot_names`].
    pub fn texture_slot_names(&self) -> &'static [&'static str] {
        texture_slot_names(self.kind, self.version)
    }

    /// Returns true if files of this version have been observed.
    pub fn is_known_version(&self) -> bool {
        (1..=LATEST_VERSION).contains(&self.version)
    }
}

impl Syncable for MaterialHeader {
    fn sync(&mut self, stream: &mut ReversibleStream<'_>) -> Result<()> {
        let offset = stream.position();
        let mut signature = self.kind.signature();
        stream.sync(&mut signature)?;
        self.kind = MaterialKind::from_signature(signature).ok_or_else(|| {
            MaterialError::format_at(
                offset,
                format!("unknown signature {:?}", String::from_utf8_lossy(&signature)),
            )
        })?;
        stream.sync(&mut self.version)
    }
}
