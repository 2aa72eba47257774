//! Material variants and the field traversals shared by decode and encode.
//!
//! A file holds exactly one concrete variant, modelled by [`Material`]. Both
//! variants embed a [`BaseMaterial`], whose traversal runs first; the variant
//! traversal then continues from where the base stopped.
//!
//! Every traversal is written once against [`ReversibleStream`]. Conditionals
//! consult either the header version or a field synced earlier in the same
//! traversal, never the stream's mode.

pub mod effect;
pub mod shader;

pub use effect::EffectMaterial;
pub use shader::ShaderMaterial;

use crate::error::{MaterialError, Result};
use crate::header::{MaterialHeader, MaterialKind};
use crate::stream::ReversibleStream;
use crate::string::MaterialString;
use glam::Vec2;
use log::trace;
use serde::{Deserialize, Serialize};

/// Bits of [`BaseMaterial::mask_writes`].
pub mod mask_writes {
    /// Albedo target.
    pub const ALBEDO: u8 = 1 << 0;
    /// Normal target.
    pub const NORMAL: u8 = 1 << 1;
    /// Specular target.
    pub const SPECULAR: u8 = 1 << 2;
    /// Ambient occlusion target.
    pub const AMBIENT_OCCLUSION: u8 = 1 << 3;
    /// Emissive target.
    pub const EMISSIVE: u8 = 1 << 4;
    /// Gloss target.
    pub const GLOSS: u8 = 1 << 5;
    /// Every target.
    pub const ALL: u8 = 0b0011_1111;
}

/// Packs the tiling flags into their wire integer: `(tile_u << 1) | tile_v`.
pub fn pack_tile_flags(tile_u: bool, tile_v: bool) -> u32 {
    (u32::from(tile_u) << 1) | u32::from(tile_v)
}

/// Inverse of [`pack_tile_flags`]: bit 1 is `tile_u`, bit 0 is `tile_v`.
pub fn unpack_tile_flags(flags: u32) -> (bool, bool) {
    (flags & 0b10 != 0, flags & 0b01 != 0)
}

/// A type whose fields can be walked by one version-conditioned traversal.
pub trait Traverse {
    /// Header the traversal is conditioned on.
    fn header(&self) -> MaterialHeader;

    /// Syncs every field after the header, in wire order.
    fn sync(&mut self, stream: &mut ReversibleStream<'_>) -> Result<()>;
}

/// Fields common to both material variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseMaterial {
    header: MaterialHeader,

    /// Texture repeats horizontally.
    pub tile_u: bool,
    /// Texture repeats vertically.
    pub tile_v: bool,
    /// UV translation applied before sampling.
    pub uv_offset: Vec2,
    /// UV scale applied before sampling.
    pub uv_scale: Vec2,

    /// Overall opacity.
    pub alpha: f32,
    /// Alpha blending on.
    pub alpha_blend: bool,
    /// Source blend factor.
    pub alpha_src: u32,
    /// Destination blend factor.
    pub alpha_dst: u32,
    /// Alpha test threshold.
    pub alpha_test_ref: u8,
    /// Alpha testing on.
    pub alpha_test: bool,

    /// Writes to the depth buffer.
    pub z_buffer_write: bool,
    /// Tests against the depth buffer.
    pub z_buffer_test: bool,
    /// Receives screen-space reflections.
    pub screen_space_reflections: bool,
    /// Wetness drives screen-space reflections.
    pub wetness_control_screen_space_reflections: bool,
    /// Rendered as a decal.
    pub decal: bool,
    /// Back faces are drawn.
    pub two_sided: bool,
    /// Decal never fades out.
    pub decal_no_fade: bool,
    /// Excluded from occlusion culling.
    pub non_occluder: bool,

    /// Refraction on.
    pub refraction: bool,
    /// Refraction falls off toward the edges.
    pub refraction_falloff: bool,
    /// Refraction strength.
    pub refraction_power: f32,

    /// Environment mapping on.
    pub environment_mapping: bool,
    /// Environment map mask scale. Present before version 10.
    pub environment_mapping_mask_scale: f32,
    /// Grayscale texture indexes the palette color. Present from version 6.
    pub grayscale_to_palette_color: bool,
    /// Combination of [`mask_writes`] bits.
    pub mask_writes: u8,

    textures: Vec<MaterialString>,
}

impl BaseMaterial {
    /// Creates a default-valued base with the slot count `header` implies.
    pub fn new(header: MaterialHeader) -> Self {
        Self {
            header,
            tile_u: true,
            tile_v: true,
            uv_offset: Vec2::ZERO,
            uv_scale: Vec2::ONE,
            alpha: 1.0,
            alpha_blend: false,
            alpha_src: 6,
            alpha_dst: 7,
            alpha_test_ref: 128,
            alpha_test: false,
            z_buffer_write: true,
            z_buffer_test: true,
            screen_space_reflections: false,
            wetness_control_screen_space_reflections: false,
            decal: false,
            two_sided: false,
            decal_no_fade: false,
            non_occluder: false,
            refraction: false,
            refraction_falloff: false,
            refraction_power: 0.0,
            environment_mapping: false,
            environment_mapping_mask_scale: 1.0,
            grayscale_to_palette_color: false,
            mask_writes: mask_writes::ALL,
            textures: vec![MaterialString::default(); header.texture_slot_count()],
        }
    }

    /// The header this material was created or decoded with.
    ///
    /// Once embedded in a variant, the variant decides the kind; every
    /// encode or decode of the variant rebinds it.
    pub fn header(&self) -> MaterialHeader {
        self.header
    }

    /// Rebinds the base to `kind`, resizing the slot list to match.
    pub(crate) fn adopt_kind(&mut self, kind: MaterialKind) {
        self.header.kind = kind;
        self.textures
            .resize_with(self.header.texture_slot_count(), MaterialString::default);
    }

    /// Shorthand for `header().version`.
    pub fn version(&self) -> u32 {
        self.header.version
    }

    /// Texture slots in wire order.
    pub fn textures(&self) -> &[MaterialString] {
        &self.textures
    }

    /// Mutable access to one slot, `None` past the slot count.
    pub fn texture_mut(&mut self, index: usize) -> Option<&mut MaterialString> {
        self.textures.get_mut(index)
    }

    /// Replaces one slot.
    ///
    /// # Errors
    /// [`MaterialError::Format`] if `index` is past the slot count of this
    /// kind and version.
    pub fn set_texture(&mut self, index: usize, path: impl Into<MaterialString>) -> Result<()> {
        let count = self.textures.len();
        let slot = self.textures.get_mut(index).ok_or_else(|| {
            MaterialError::Format(format!(
                "texture slot {index} out of range, version {} has {count}",
                self.header.version
            ))
        })?;
        *slot = path.into();
        Ok(())
    }

    /// Conventional names of the slots; see [`crate::header::texture_slot_names`].
    pub fn texture_slot_names(&self) -> &'static [&'static str] {
        self.header.texture_slot_names()
    }

    /// Looks a slot up by its conventional name, ignoring ASCII case.
    pub fn texture(&self, name: &str) -> Option<&MaterialString> {
        self.texture_slot_names()
            .iter()
            .position(|slot| slot.eq_ignore_ascii_case(name))
            .and_then(|index| self.textures.get(index))
    }

    /// Syncs the base fields, starting right after the header.
    pub fn sync(&mut self, stream: &mut ReversibleStream<'_>) -> Result<()> {
        let version = self.header.version;
        trace!("{} base traversal, version {version}, at byte {}", stream.mode(), stream.position());

        let mut tile_flags = pack_tile_flags(self.tile_u, self.tile_v);
        stream.sync(&mut tile_flags)?;
        (self.tile_u, self.tile_v) = unpack_tile_flags(tile_flags);

        stream.sync(&mut self.uv_offset)?;
        stream.sync(&mut self.uv_scale)?;

        stream.sync(&mut self.alpha)?;
        stream.sync(&mut self.alpha_blend)?;
        stream.sync(&mut self.alpha_src)?;
        stream.sync(&mut self.alpha_dst)?;
        stream.sync(&mut self.alpha_test_ref)?;
        stream.sync(&mut self.alpha_test)?;

        stream.sync(&mut self.z_buffer_write)?;
        stream.sync(&mut self.z_buffer_test)?;
        stream.sync(&mut self.screen_space_reflections)?;
        stream.sync(&mut self.wetness_control_screen_space_reflections)?;
        stream.sync(&mut self.decal)?;
        stream.sync(&mut self.two_sided)?;
        stream.sync(&mut self.decal_no_fade)?;
        stream.sync(&mut self.non_occluder)?;

        stream.sync(&mut self.refraction)?;
        stream.sync(&mut self.refraction_falloff)?;
        stream.sync(&mut self.refraction_power)?;

        stream.sync(&mut self.environment_mapping)?;
        if version < 10 {
            stream.sync(&mut self.environment_mapping_mask_scale)?;
        }
        if version >= 6 {
            stream.sync(&mut self.grayscale_to_palette_color)?;
        }
        stream.sync(&mut self.mask_writes)?;

        // Only changes anything for slots deserialized with another count.
        self.adopt_kind(self.header.kind);
        for texture in &mut self.textures {
            stream.sync(texture)?;
        }
        Ok(())
    }
}

/// The one concrete material a file holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Material {
    /// A `.bgsm` surface material.
    Shader(ShaderMaterial),
    /// A `.bgem` effect material.
    Effect(EffectMaterial),
}

impl Material {
    /// Creates the default-valued variant `header.kind` names.
    pub fn new(header: MaterialHeader) -> Self {
        match header.kind {
            MaterialKind::Shader => Self::Shader(ShaderMaterial::with_header(header)),
            MaterialKind::Effect => Self::Effect(EffectMaterial::with_header(header)),
        }
    }

    /// Decodes a header and the variant it announces.
    ///
    /// With `expected` set, a file of the other kind is rejected before any
    /// variant field is read.
    ///
    /// # Errors
    /// [`MaterialError::Io`] on a truncated source, [`MaterialError::Format`]
    /// on a bad signature, a kind mismatch or an impossible field value.
    pub fn read_from(
        stream: &mut ReversibleStream<'_>,
        expected: Option<MaterialKind>,
    ) -> Result<Self> {
        let offset = stream.position();
        let mut header = MaterialHeader::new(expected.unwrap_or(MaterialKind::Shader), 0);
        stream.sync(&mut header)?;
        if let Some(expected) = expected {
            if header.kind != expected {
                return Err(MaterialError::format_at(
                    offset,
                    format!("expected {expected}, file holds {}", header.kind),
                ));
            }
        }
        if !header.is_known_version() {
            log::warn!(
                "{} version {} was never observed, decoding with version {} rules",
                header.kind,
                header.version,
                crate::header::LATEST_VERSION
            );
        }

        let mut material = Self::new(header);
        material.sync(stream)?;
        Ok(material)
    }

    /// Encodes the header followed by every field.
    pub fn write_to(&self, stream: &mut ReversibleStream<'_>) -> Result<()> {
        // The traversal takes `&mut`; encoding runs it on a copy.
        let mut scratch = self.clone();
        let mut header = scratch.header();
        stream.sync(&mut header)?;
        scratch.sync(stream)
    }

    /// Which variant this is.
    pub fn kind(&self) -> MaterialKind {
        self.header().kind
    }

    /// Shared fields of either variant.
    pub fn base(&self) -> &BaseMaterial {
        match self {
            Self::Shader(shader) => &shader.base,
            Self::Effect(effect) => &effect.base,
        }
    }

    /// Mutable shared fields of either variant.
    pub fn base_mut(&mut self) -> &mut BaseMaterial {
        match self {
            Self::Shader(shader) => &mut shader.base,
            Self::Effect(effect) => &mut effect.base,
        }
    }
}

impl Traverse for Material {
    fn header(&self) -> MaterialHeader {
        match self {
            Self::Shader(shader) => shader.header(),
            Self::Effect(effect) => effect.header(),
        }
    }

    fn sync(&mut self, stream: &mut ReversibleStream<'_>) -> Result<()> {
        match self {
            Self::Shader(shader) => shader.sync(stream),
            Self::Effect(effect) => effect.sync(stream),
        }
    }
}

impl From<ShaderMaterial> for Material {
    fn from(value: ShaderMaterial) -> Self {
        Self::Shader(value)
    }
}

impl From<EffectMaterial> for Material {
    fn from(value: EffectMaterial) -> Self {
        Self::Effect(value)
    }
}
