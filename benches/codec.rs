#![allow(missing_docs)]

use bgsm::{LoadOptions, MaterialFile, MaterialKind};
use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use std::hint::black_box;

fn sample(version: u32, kind: MaterialKind) -> MaterialFile {
    let mut file = MaterialFile::create(version, kind);
    if let Some(base) = file.material_mut().map(|m| m.base_mut()) {
        for index in 0..base.textures().len() {
            base.set_texture(index, format!("Textures/Architecture/Walls/Wall{index:02}.dds"))
                .expect("Slot index out of range");
        }
    }
    if let Some(shader) = file.shader_material_mut() {
        shader.root_material_path = "Materials/Template/Wall.bgsm".into();
        shader.emit_enabled = true;
        shader.terrain = true;
    }
    file
}

// --- BENCHMARKS ---

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("Encode");

    for (name, version, kind) in [
        ("shader_v2", 2, MaterialKind::Shader),
        ("shader_v20", 20, MaterialKind::Shader),
        ("effect_v20", 20, MaterialKind::Effect),
    ] {
        let file = sample(version, kind);
        let size = file.to_bytes().expect("Failed to encode").len();
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_function(name, |b| {
            b.iter(|| black_box(&file).to_bytes().expect("Failed to encode"));
        });
    }

    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("Decode");

    for (name, version, kind) in [
        ("shader_v2", 2, MaterialKind::Shader),
        ("shader_v20", 20, MaterialKind::Shader),
        ("effect_v20", 20, MaterialKind::Effect),
    ] {
        let bytes = sample(version, kind).to_bytes().expect("Failed to encode");
        let options = LoadOptions::new().kind(kind);
        group.throughput(Throughput::Bytes(bytes.len() as u64));
        group.bench_function(name, |b| {
            let mut file = MaterialFile::new();
            b.iter(|| {
                file.load_bytes(black_box(&bytes), &options)
                    .expect("Failed to decode");
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_encode, bench_decode);
criterion_main!(benches);
