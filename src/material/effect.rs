//! Effect materials (`.bgem`).

use super::{BaseMaterial, Traverse};
use crate::codec::Color3;
use crate::error::Result;
use crate::header::{MaterialHeader, MaterialKind, LATEST_VERSION};
use crate::stream::ReversibleStream;
use log::trace;
use serde::{Deserialize, Serialize};

/// A screen-composited effect material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectMaterial {
    /// Fields shared with shader materials.
    pub base: BaseMaterial,

    /// Present from version 10. Separate from `base.environment_mapping`,
    /// which the base traversal syncs at every version.
    pub environment_mapping: bool,
    /// Present from version 10. Separate from the base copy, which only
    /// exists before version 10.
    pub environment_mapping_mask_scale: f32,

    /// Blood effect on.
    pub blood_enabled: bool,
    /// Effect receives lighting.
    pub effect_lighting_enabled: bool,
    /// Opacity falloff on.
    pub falloff_enabled: bool,
    /// Falloff also applies to color.
    pub falloff_color_enabled: bool,
    /// Grayscale texture indexes the palette alpha.
    pub grayscale_to_palette_alpha: bool,
    /// Soft particles on.
    pub soft_enabled: bool,

    /// Base tint.
    pub base_color: Color3,
    /// Base tint multiplier.
    pub base_color_scale: f32,

    /// Angle at which falloff starts.
    pub falloff_start_angle: f32,
    /// Angle at which falloff ends.
    pub falloff_stop_angle: f32,
    /// Opacity at the start angle.
    pub falloff_start_opacity: f32,
    /// Opacity at the stop angle.
    pub falloff_stop_opacity: f32,

    /// How much scene lighting affects the effect.
    pub lighting_influence: f32,
    /// Lowest environment map mip level.
    pub envmap_min_lod: u8,
    /// Soft particle depth.
    pub soft_depth: f32,

    /// Emitted color. Present from version 11.
    pub emittance_color: Color3,

    // Version 15 and later.
    /// Adaptive emission exposure offset.
    pub adaptive_emissive_exposure_offset: f32,
    /// Adaptive emission lower exposure bound.
    pub adaptive_emissive_final_exposure_min: f32,
    /// Adaptive emission upper exposure bound.
    pub adaptive_emissive_final_exposure_max: f32,

    /// Glow map on. Present from version 16.
    pub glowmap: bool,
    /// Physically based specular. Present from version 20.
    pub effect_pbr_specular: bool,
}

impl EffectMaterial {
    /// Creates a default-valued effect material of `version`.
    pub fn new(version: u32) -> Self {
        Self::with_header(MaterialHeader::new(MaterialKind::Effect, version))
    }

    pub(crate) fn with_header(header: MaterialHeader) -> Self {
        Self {
            base: BaseMaterial::new(header),
            environment_mapping: false,
            environment_mapping_mask_scale: 1.0,
            blood_enabled: false,
            effect_lighting_enabled: false,
            falloff_enabled: false,
            falloff_color_enabled: false,
            grayscale_to_palette_alpha: false,
            soft_enabled: false,
            base_color: Color3::WHITE,
            base_color_scale: 1.0,
            falloff_start_angle: 1.0,
            falloff_stop_angle: 1.0,
            falloff_start_opacity: 1.0,
            falloff_stop_opacity: 1.0,
            lighting_influence: 1.0,
            envmap_min_lod: 0,
            soft_depth: 100.0,
            emittance_color: Color3::WHITE,
            adaptive_emissive_exposure_offset: 13.5,
            adaptive_emissive_final_exposure_min: 2.0,
            adaptive_emissive_final_exposure_max: 3.0,
            glowmap: false,
            effect_pbr_specular: false,
        }
    }

    /// Shorthand for `base.version()`.
    pub fn version(&self) -> u32 {
        self.base.version()
    }
}

impl Default for EffectMaterial {
    fn default() -> Self {
        Self::new(LATEST_VERSION)
    }
}

impl Traverse for EffectMaterial {
    fn header(&self) -> MaterialHeader {
        MaterialHeader::new(MaterialKind::Effect, self.base.version())
    }

    fn sync(&mut self, stream: &mut ReversibleStream<'_>) -> Result<()> {
        self.base.adopt_kind(MaterialKind::Effect);
        self.base.sync(stream)?;

        let version = self.base.version();
        trace!("{} effect traversal at byte {}", stream.mode(), stream.position());

        if version >= 10 {
            stream.sync(&mut self.environment_mapping)?;
            stream.sync(&mut self.environment_mapping_mask_scale)?;
        }

        stream.sync(&mut self.blood_enabled)?;
        stream.sync(&mut self.effect_lighting_enabled)?;
        stream.sync(&mut self.falloff_enabled)?;
        stream.sync(&mut self.falloff_color_enabled)?;
        stream.sync(&mut self.grayscale_to_palette_alpha)?;
        stream.sync(&mut self.soft_enabled)?;

        stream.sync(&mut self.base_color)?;
        stream.sync(&mut self.base_color_scale)?;

        stream.sync(&mut self.falloff_start_angle)?;
        stream.sync(&mut self.falloff_stop_angle)?;
        stream.sync(&mut self.falloff_start_opacity)?;
        stream.sync(&mut self.falloff_stop_opacity)?;

        stream.sync(&mut self.lighting_influence)?;
        stream.sync(&mut self.envmap_min_lod)?;
        stream.sync(&mut self.soft_depth)?;

        if version >= 11 {
            stream.sync(&mut self.emittance_color)?;
        }
        if version >= 15 {
            stream.sync(&mut self.adaptive_emissive_exposure_offset)?;
            stream.sync(&mut self.adaptive_emissive_final_exposure_min)?;
            stream.sync(&mut self.adaptive_emissive_final_exposure_max)?;
        }
        if version >= 16 {
            stream.sync(&mut self.glowmap)?;
        }
        if version >= 20 {
            stream.sync(&mut self.effect_pbr_specular)?;
        }
        Ok(())
    }
}
