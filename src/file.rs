//! The file wrapper: owns one material and drives load/save.
//!
//! [`MaterialFile`] is the main entry point. Loading memory-maps the file and
//! decodes from the mapped bytes; saving encodes into memory first and only
//! touches the destination once the whole traversal has succeeded.
//!
//! ```rust
//! use bgsm::{LoadOptions, MaterialFile, MaterialKind};
//!
//! let mut file = MaterialFile::create(20, MaterialKind::Shader);
//! file.shader_material_mut().unwrap().specular_mult = 2.5;
//!
//! let bytes = file.to_bytes()?;
//! let mut loaded = MaterialFile::new();
//! loaded.load_bytes(&bytes, &LoadOptions::new().kind(MaterialKind::Shader))?;
//! assert_eq!(loaded, file);
//! # Ok::<(), bgsm::MaterialError>(())
//! ```

use crate::error::{MaterialError, Result};
use crate::header::{MaterialHeader, MaterialKind};
use crate::material::{EffectMaterial, Material, ShaderMaterial, Traverse};
use crate::stream::ReversibleStream;
use log::{debug, warn};
use memmap2::Mmap;
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;

/// Options for [`MaterialFile::load`] and friends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    kind: Option<MaterialKind>,
    allow_trailing_bytes: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            kind: None,
            allow_trailing_bytes: true,
        }
    }
}

impl LoadOptions {
    /// Accepts either kind and tolerates trailing bytes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requires the file to hold `kind`; any other signature is a format error.
    pub fn kind(mut self, kind: MaterialKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Whether bytes left over after the traversal are accepted (and logged)
    /// or rejected as a format error. Accepted by default.
    pub fn allow_trailing_bytes(mut self, allow: bool) -> Self {
        self.allow_trailing_bytes = allow;
        self
    }

    /// The kind this load is restricted to, if any.
    pub fn expected_kind(&self) -> Option<MaterialKind> {
        self.kind
    }
}

/// Options for [`MaterialFile::save`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SaveOptions {
    sync_to_disk: bool,
}

impl SaveOptions {
    /// Default options: the OS decides when data reaches the disk.
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls `sync_all` on the file before reporting success.
    pub fn sync_to_disk(mut self, sync: bool) -> Self {
        self.sync_to_disk = sync;
        self
    }
}

/// Owner of exactly one material instance, or of none.
///
/// Cloning deep-copies the owned material.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaterialFile {
    material: Option<Material>,
}

impl MaterialFile {
    /// Creates an empty, invalid wrapper.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a wrapper holding a default-valued material.
    pub fn create(version: u32, kind: MaterialKind) -> Self {
        Self {
            material: Some(Material::new(MaterialHeader::new(kind, version))),
        }
    }

    /// Drops the owned material.
    pub fn clear(&mut self) {
        self.material = None;
    }

    /// Returns true if a material is held.
    pub fn is_valid(&self) -> bool {
        self.material.is_some()
    }

    /// Returns true if the held material is a shader material.
    pub fn is_shader_material(&self) -> bool {
        matches!(self.material, Some(Material::Shader(_)))
    }

    /// Returns true if the held material is an effect material.
    pub fn is_effect_material(&self) -> bool {
        matches!(self.material, Some(Material::Effect(_)))
    }

    /// Header of the held material.
    pub fn header(&self) -> Option<MaterialHeader> {
        self.material.as_ref().map(Traverse::header)
    }

    /// The held material.
    pub fn material(&self) -> Option<&Material> {
        self.material.as_ref()
    }

    /// The held material, mutably.
    pub fn material_mut(&mut self) -> Option<&mut Material> {
        self.material.as_mut()
    }

    /// Takes the held material out, leaving the wrapper empty.
    pub fn take(&mut self) -> Option<Material> {
        self.material.take()
    }

    /// The held shader material; `None` if empty or an effect material.
    pub fn shader_material(&self) -> Option<&ShaderMaterial> {
        match &self.material {
            Some(Material::Shader(shader)) => Some(shader),
            _ => None,
        }
    }

    /// Mutable variant of [`Self::shader_material`].
    pub fn shader_material_mut(&mut self) -> Option<&mut ShaderMaterial> {
        match &mut self.material {
            Some(Material::Shader(shader)) => Some(shader),
            _ => None,
        }
    }

    /// The held effect material; `None` if empty or a shader material.
    pub fn effect_material(&self) -> Option<&EffectMaterial> {
        match &self.material {
            Some(Material::Effect(effect)) => Some(effect),
            _ => None,
        }
    }

    /// Mutable variant of [`Self::effect_material`].
    pub fn effect_material_mut(&mut self) -> Option<&mut EffectMaterial> {
        match &mut self.material {
            Some(Material::Effect(effect)) => Some(effect),
            _ => None,
        }
    }

    /// Loads a material file from disk, replacing whatever was held.
    ///
    /// On any error the wrapper is left empty.
    pub fn load<P: AsRef<Path>>(&mut self, path: P, options: &LoadOptions) -> Result<()> {
        self.clear();
        let path = path.as_ref();
        let file = File::open(path)?;
        let file_size = file.metadata()?.len();
        if file_size == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("{} is empty", path.display()),
            )
            .into());
        }

        // Safety: the map is read-only and dropped before this call returns.
        // Concurrent truncation by another process is outside our control.
        #[allow(unsafe_code)]
        let mmap = unsafe { Mmap::map(&file)? };

        debug!("loading {} ({file_size} bytes)", path.display());
        self.load_bytes(&mmap, options)
    }

    /// Loads from any reader. The reader is consumed to its end.
    pub fn load_from<R: Read>(&mut self, mut reader: R, options: &LoadOptions) -> Result<()> {
        self.clear();
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        self.load_bytes(&bytes, options)
    }

    /// Loads from an in-memory buffer.
    pub fn load_bytes(&mut self, bytes: &[u8], options: &LoadOptions) -> Result<()> {
        self.clear();

        let mut source = bytes;
        let mut stream = ReversibleStream::decoder(&mut source);
        let material = Material::read_from(&mut stream, options.kind)?;
        let consumed = stream.position();
        let trailing = bytes.len() as u64 - consumed;
        if trailing > 0 {
            if !options.allow_trailing_bytes {
                return Err(MaterialError::format_at(
                    consumed,
                    format!("{trailing} trailing bytes after the material"),
                ));
            }
            warn!("ignoring {trailing} trailing bytes after byte {consumed}");
        }

        let header = material.header();
        debug!(
            "decoded {} version {} ({consumed} bytes)",
            header.kind, header.version
        );
        self.material = Some(material);
        Ok(())
    }

    /// Encodes the held material into a new buffer.
    ///
    /// # Errors
    /// [`MaterialError::Format`] if the wrapper is empty.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let material = self
            .material
            .as_ref()
            .ok_or_else(|| MaterialError::Format("no material to encode".into()))?;

        let mut buffer = Vec::new();
        let mut stream = ReversibleStream::encoder(&mut buffer);
        material.write_to(&mut stream)?;
        let header = material.header();
        debug!(
            "encoded {} version {} ({} bytes)",
            header.kind,
            header.version,
            stream.position()
        );
        Ok(buffer)
    }

    /// Encodes the held material and writes it to `writer` in one call.
    pub fn save_to<W: Write>(&self, mut writer: W) -> Result<()> {
        let bytes = self.to_bytes()?;
        writer.write_all(&bytes)?;
        writer.flush()?;
        Ok(())
    }

    /// Encodes the held material and writes it to `path`.
    ///
    /// The destination is only created once encoding has succeeded.
    pub fn save<P: AsRef<Path>>(&self, path: P, options: &SaveOptions) -> Result<()> {
        let path = path.as_ref();
        let bytes = self.to_bytes()?;

        let mut file = File::create(path)?;
        file.write_all(&bytes)?;
        if options.sync_to_disk {
            file.sync_all()?;
        }
        debug!("saved {} ({} bytes)", path.display(), bytes.len());
        Ok(())
    }
}

impl From<Material> for MaterialFile {
    fn from(material: Material) -> Self {
        Self {
            material: Some(material),
        }
    }
}

impl From<ShaderMaterial> for MaterialFile {
    fn from(material: ShaderMaterial) -> Self {
        Material::from(material).into()
    }
}

impl From<EffectMaterial> for MaterialFile {
    fn from(material: EffectMaterial) -> Self {
        Material::from(material).into()
    }
}
