//! # bgsm
//!
//! A byte-exact reader and writer for versioned BGSM/BGEM material files.
//!
//! ## Overview
//!
//! A material file stores the rendering parameters of one surface: alpha
//! blending, specular and emissive behaviour, refraction, terrain blending,
//! texture paths and more. The format is not self-describing. Which fields
//! exist, and in which order, depends on the version number in the header and
//! on some values decoded earlier in the same file. More than twenty versions
//! exist, each adding, removing or reinterpreting fields.
//!
//! The goal of this crate is fidelity: decoding a file and encoding it again
//! at the same version reproduces the original bytes.
//!
//! ### Layout
//!
//! ```text
//! [Signature "BGSM" | "BGEM"] [Version u32] [Base fields] [Variant fields]
//! ```
//!
//! Everything is little-endian. There is no padding (except one unused word
//! in version 3 terrain materials) and no checksum.
//!
//! ## Core Concepts
//!
//! ### Reversible Stream
//!
//! [`stream::ReversibleStream`] is bound to either a source or a sink. Each
//! traversal calls `stream.sync(&mut field)` once per field, so one function
//! describes both decoding and encoding. Conditionals in a traversal look at
//! the header version or at a flag synced earlier, never at the direction.
//!
//! ### Materials
//!
//! [`Material`] is a sum type over [`ShaderMaterial`] and [`EffectMaterial`].
//! Both embed a [`BaseMaterial`] with the shared fields and a texture slot
//! list whose length follows from kind and version alone.
//!
//! ### File Wrapper
//!
//! [`MaterialFile`] owns at most one material and exposes the load/save
//! lifecycle.
//!
//! ## Usage Patterns
//!
//! ```rust
//! use bgsm::{LoadOptions, MaterialFile, MaterialKind};
//!
//! let mut file = MaterialFile::create(2, MaterialKind::Shader);
//! let shader = file.shader_material_mut().unwrap();
//! shader.base.set_texture(0, "Architecture/Walls/Wall01_d.dds")?;
//! shader.emit_enabled = true;
//!
//! let bytes = file.to_bytes()?;
//! assert_eq!(&bytes[..4], b"BGSM");
//!
//! let mut loaded = MaterialFile::new();
//! loaded.load_bytes(&bytes, &LoadOptions::default())?;
//! assert_eq!(loaded.to_bytes()?, bytes);
//! # Ok::<(), bgsm::MaterialError>(())
//! ```
//!
//! ### Safety and Error Handling
//!
//! * **Encapsulated Unsafe:** the only `unsafe` block memory-maps the input
//!   file in [`MaterialFile::load`].
//! * **No Panics:** no `unwrap()` or `panic!()` in the library (enforced by
//!   clippy lints).
//! * **Errors:** every failure is a [`MaterialError`], either `Io` or
//!   `Format`. A failed load leaves the wrapper empty; a failed save never
//!   creates the destination file.
//! * **Logging:** the crate logs through the `log` facade and installs no
//!   logger of its own.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]
#![warn(missing_docs)]

// --- PUBLIC API MODULES ---
pub mod codec;
pub mod error;
pub mod file;
pub mod header;
pub mod inspector;
pub mod material;
pub mod stream;
pub mod string;

// --- RE-EXPORTS ---

pub use codec::Color3;
pub use error::{MaterialError, Result};
pub use file::{LoadOptions, MaterialFile, SaveOptions};
pub use header::{texture_slot_count, MaterialHeader, MaterialKind, LATEST_VERSION};
pub use inspector::MaterialInspector;
pub use material::{BaseMaterial, EffectMaterial, Material, ShaderMaterial, Traverse};
pub use string::MaterialString;

pub use glam::{Vec2, Vec3};
