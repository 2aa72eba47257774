#![allow(missing_docs)]

use bgsm::{
    Color3, LoadOptions, MaterialError, MaterialFile, MaterialInspector, MaterialKind, SaveOptions,
};

fn sample_shader() -> MaterialFile {
    let mut file = MaterialFile::create(20, MaterialKind::Shader);
    if let Some(shader) = file.shader_material_mut() {
        shader.base.alpha = 0.25;
        shader.base.two_sided = true;
        shader.specular_color = Color3::new(0.1, 0.2, 0.3);
        shader.root_material_path = "Materials/Template/Metal.bgsm".into();
        shader.emit_enabled = true;
        shader.emittance_color = Color3::new(1.0, 0.8, 0.2);
        shader.terrain = true;
        shader.terrain_tiling_distance = 256.0;
    }
    if let Some(base) = file.material_mut().map(|m| m.base_mut()) {
        base.set_texture(0, "Textures/Metal/Plate_d.dds").ok();
        base.set_texture(1, "Textures/Metal/Plate_n.dds").ok();
    }
    file
}

// --- TESTS ---

/// Create, save to disk, load into a fresh wrapper
/// Validate `MaterialFile::create`, `save`, `load`
#[test]
fn test_create_save_load_v20() -> bgsm::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("plate.bgsm");

    let file = MaterialFile::create(20, MaterialKind::Shader);
    file.save(&path, &SaveOptions::default())?;

    let mut loaded = MaterialFile::new();
    loaded.load(&path, &LoadOptions::new().kind(MaterialKind::Shader))?;
    assert!(loaded.is_valid());
    assert_eq!(loaded, file);
    Ok(())
}

/// Populated material, synced to disk
#[test]
fn test_populated_file_io() -> bgsm::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("populated.bgsm");
    let file = sample_shader();
    file.save(&path, &SaveOptions::new().sync_to_disk(true))?;

    let mut loaded = MaterialFile::new();
    loaded.load(&path, &LoadOptions::default())?;
    assert_eq!(loaded, file);
    assert_eq!(std::fs::read(&path)?, file.to_bytes()?);
    Ok(())
}

/// Effect materials through a reader and a writer
/// Validate `save_to`, `load_from`
#[test]
fn test_effect_reader_writer() -> bgsm::Result<()> {
    let mut file = MaterialFile::create(16, MaterialKind::Effect);
    if let Some(effect) = file.effect_material_mut() {
        effect.soft_enabled = true;
        effect.glowmap = true;
        effect.base_color = Color3::new(0.0, 0.5, 1.0);
    }

    let mut buffer = Vec::new();
    file.save_to(&mut buffer)?;
    assert_eq!(&buffer[..4], b"BGEM");

    let mut loaded = MaterialFile::new();
    loaded.load_from(std::io::Cursor::new(buffer), &LoadOptions::new().kind(MaterialKind::Effect))?;
    assert!(loaded.is_effect_material());
    assert!(!loaded.is_shader_material());
    assert!(loaded.shader_material().is_none());
    assert_eq!(loaded.effect_material().map(|e| e.glowmap), Some(true));
    assert_eq!(loaded, file);
    Ok(())
}

/// A zero-byte stream is a failure and leaves the wrapper invalid
#[test]
fn test_zero_byte_stream() {
    let mut file = sample_shader();
    let err = file.load_bytes(&[], &LoadOptions::default()).unwrap_err();
    assert_ne!(err.status_code(), 0);
    assert!(err.is_truncated());
    assert!(!file.is_valid());
}

/// A zero-byte file on disk behaves the same
#[test]
fn test_zero_byte_file() -> bgsm::Result<()> {
    let file = tempfile::NamedTempFile::new()?;
    let mut material = MaterialFile::new();
    let err = material.load(file.path(), &LoadOptions::default()).unwrap_err();
    assert!(matches!(err, MaterialError::Io(_)));
    assert!(!material.is_valid());
    Ok(())
}

/// Missing files are I/O errors
#[test]
fn test_missing_file() -> bgsm::Result<()> {
    let dir = tempfile::tempdir()?;
    let mut file = MaterialFile::new();
    let err = file.load(dir.path().join("absent.bgem"), &LoadOptions::default()).unwrap_err();
    assert_eq!(err.status_code(), 1);
    Ok(())
}

/// A failed decode clears whatever was loaded before
#[test]
fn test_failed_load_clears() -> bgsm::Result<()> {
    let bytes = sample_shader().to_bytes()?;
    let mut file = MaterialFile::create(2, MaterialKind::Effect);
    file.load_bytes(&bytes[..bytes.len() - 1], &LoadOptions::default()).unwrap_err();
    assert!(!file.is_valid());
    assert!(file.header().is_none());

    file.load_bytes(&bytes, &LoadOptions::default())?;
    assert!(file.is_shader_material());
    Ok(())
}

/// Requesting the wrong kind is a format error
#[test]
fn test_kind_mismatch() -> bgsm::Result<()> {
    let bytes = sample_shader().to_bytes()?;
    let mut file = MaterialFile::new();
    let err = file
        .load_bytes(&bytes, &LoadOptions::new().kind(MaterialKind::Effect))
        .unwrap_err();
    assert!(matches!(err, MaterialError::Format(_)));
    assert_eq!(err.status_code(), 2);
    assert!(!file.is_valid());
    Ok(())
}

/// Trailing bytes are accepted by default and rejected on request
#[test]
fn test_trailing_bytes_policy() -> bgsm::Result<()> {
    let mut bytes = sample_shader().to_bytes()?;
    bytes.extend_from_slice(&[0xAA, 0xBB]);

    let mut file = MaterialFile::new();
    file.load_bytes(&bytes, &LoadOptions::default())?;
    assert!(file.is_valid());

    let err = file
        .load_bytes(&bytes, &LoadOptions::new().allow_trailing_bytes(false))
        .unwrap_err();
    assert!(matches!(err, MaterialError::Format(_)));
    assert!(!file.is_valid());
    Ok(())
}

/// Saving an empty wrapper fails without creating the file
#[test]
fn test_save_empty_wrapper() -> bgsm::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("empty.bgsm");
    let file = MaterialFile::new();
    assert!(file.save(&path, &SaveOptions::default()).is_err());
    assert!(!path.exists());
    Ok(())
}

/// Lifecycle and accessors
#[test]
fn test_lifecycle() {
    let mut file = MaterialFile::new();
    assert!(!file.is_valid());
    assert!(file.material().is_none());

    file = MaterialFile::create(9, MaterialKind::Effect);
    assert!(file.is_effect_material());
    assert_eq!(file.header().map(|h| h.version), Some(9));
    assert_eq!(file.header().map(|h| h.kind), Some(MaterialKind::Effect));
    assert_eq!(file.material().map(|m| m.base().textures().len()), Some(5));

    file.clear();
    assert!(!file.is_valid());
    assert!(file.effect_material().is_none());
}

/// Cloning a wrapper deep-copies the material
#[test]
fn test_clone_is_deep() {
    let original = sample_shader();
    let mut copy = original.clone();
    if let Some(shader) = copy.shader_material_mut() {
        shader.root_material_path = "Materials/Other.bgsm".into();
        shader.base.alpha = 1.0;
    }
    assert_ne!(copy, original);
    assert_eq!(
        original.shader_material().map(|s| s.root_material_path.to_string()),
        Some("Materials/Template/Metal.bgsm".to_string())
    );
}

/// Inspector
/// Validate `MaterialInspector`, report serialization
#[test]
fn test_inspector() -> bgsm::Result<()> {
    let mut bytes = sample_shader().to_bytes()?;
    let consumed = bytes.len() as u64;
    bytes.push(0);

    let report = MaterialInspector::inspect_bytes(&bytes)?;
    assert_eq!(report.kind, MaterialKind::Shader);
    assert_eq!(report.version, 20);
    assert!(report.known_version);
    assert_eq!(report.consumed, consumed);
    assert_eq!(report.trailing_bytes, 1);
    assert_eq!(report.texture_slots.len(), 10);
    assert_eq!(report.texture_slots[1].name, "Normal");
    assert_eq!(report.texture_slots[1].path, "Textures/Metal/Plate_n.dds");
    assert_eq!(report.root_material_path.as_deref(), Some("Materials/Template/Metal.bgsm"));

    let text = report.to_string();
    assert!(text.contains("ShaderMaterial v20"));
    assert!(text.contains("[1] Normal: Textures/Metal/Plate_n.dds"));

    let json = serde_json::to_value(&report).map_err(|e| MaterialError::Format(e.to_string()))?;
    assert_eq!(json["kind"], "Shader");
    assert_eq!(json["texture_slots"][0]["name"], "Diffuse");
    Ok(())
}

/// Inspector from disk
#[test]
fn test_inspector_file() -> bgsm::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("fx.bgem");
    MaterialFile::create(21, MaterialKind::Effect).save(&path, &SaveOptions::default())?;

    let report = MaterialInspector::inspect(&path)?;
    assert_eq!(report.kind, MaterialKind::Effect);
    assert_eq!(report.trailing_bytes, 0);
    assert!(report.root_material_path.is_none());
    Ok(())
}

/// Shader materials also export through serde
#[test]
fn test_material_serde_export() -> bgsm::Result<()> {
    let file = sample_shader();
    let material = file.material().ok_or_else(|| MaterialError::Format("empty".into()))?;
    let json = serde_json::to_string(material).map_err(|e| MaterialError::Format(e.to_string()))?;
    let back: bgsm::Material =
        serde_json::from_str(&json).map_err(|e| MaterialError::Format(e.to_string()))?;
    assert_eq!(&back, material);
    Ok(())
}
