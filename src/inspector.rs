// src/inspector.rs

//! Tools for inspecting material files.
//! Useful when a file loads with warnings or when comparing tool output.

use crate::error::Result;
use crate::header::MaterialKind;
use crate::material::{Material, Traverse};
use crate::stream::ReversibleStream;
use serde::Serialize;
use std::path::Path;

/// A structural report of one material file.
#[derive(Debug, Serialize)]
pub struct InspectionReport {
    /// Which variant the signature names.
    pub kind: MaterialKind,
    /// Format version from the header.
    pub version: u32,
    /// Whether files of this version have been observed.
    pub known_version: bool,
    /// Total size of the input.
    pub file_size: u64,
    /// Bytes the traversal consumed.
    pub consumed: u64,
    /// Bytes left after the traversal.
    pub trailing_bytes: u64,
    /// Root material path, for shader materials that have one.
    pub root_material_path: Option<String>,
    /// Texture slots in wire order.
    pub texture_slots: Vec<SlotInfo>,
}

/// One texture slot.
#[derive(Debug, Serialize)]
pub struct SlotInfo {
    /// Position in wire order.
    pub index: usize,
    /// Conventional slot name.
    pub name: &'static str,
    /// Texture path, empty if unset.
    pub path: String,
}

/// The material file inspector.
#[derive(Debug)]
pub struct MaterialInspector;

impl MaterialInspector {
    /// Reads a file and returns its report.
    pub fn inspect<P: AsRef<Path>>(path: P) -> Result<InspectionReport> {
        let bytes = std::fs::read(path)?;
        Self::inspect_bytes(&bytes)
    }

    /// Decodes a buffer and returns its report.
    pub fn inspect_bytes(bytes: &[u8]) -> Result<InspectionReport> {
        let mut source = bytes;
        let mut stream = ReversibleStream::decoder(&mut source);
        let material = Material::read_from(&mut stream, None)?;
        let consumed = stream.position();

        let header = material.header();
        let base = material.base();
        let names = base.texture_slot_names();
        let texture_slots = base
            .textures()
            .iter()
            .enumerate()
            .map(|(index, path)| SlotInfo {
                index,
                name: names.get(index).copied().unwrap_or("Unknown"),
                path: path.to_string_lossy().into_owned(),
            })
            .collect();

        let root_material_path = match &material {
            Material::Shader(shader) if !shader.root_material_path.is_empty() => {
                Some(shader.root_material_path.to_string_lossy().into_owned())
            }
            _ => None,
        };

        Ok(InspectionReport {
            kind: header.kind,
            version: header.version,
            known_version: header.is_known_version(),
            file_size: bytes.len() as u64,
            consumed,
            trailing_bytes: bytes.len() as u64 - consumed,
            root_material_path,
            texture_slots,
        })
    }
}

impl std::fmt::Display for InspectionReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== MATERIAL INSPECTOR REPORT ===")?;
        let note = if self.known_version { "" } else { " (unobserved)" };
        writeln!(f, "Kind:      {} v{}{}", self.kind, self.version, note)?;
        writeln!(
            f,
            "Size:      {}b | Consumed: {}b | Trailing: {}b",
            self.file_size, self.consumed, self.trailing_bytes
        )?;
        if let Some(root) = &self.root_material_path {
            writeln!(f, "Root:      {root}")?;
        }
        writeln!(f, "\n[TEXTURE SLOTS]")?;
        for (i, slot) in self.texture_slots.iter().enumerate() {
            let connector = if i == self.texture_slots.len() - 1 { "└── " } else { "├── " };
            let path = if slot.path.is_empty() { "-" } else { slot.path.as_str() };
            writeln!(f, "{}[{}] {}: {}", connector, slot.index, slot.name, path)?;
        }
        Ok(())
    }
}
