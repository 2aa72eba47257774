//! Shader materials (`.bgsm`).
//!
//! The longest traversal in the format. Two groups are swapped by version:
//! files before version 8 carry the rim/back-light/subsurface group where
//! later files carry the translucency group. Both live in memory; only the
//! one matching the header is read or written.

use super::{BaseMaterial, Traverse};
use crate::codec::Color3;
use crate::error::Result;
use crate::header::{MaterialHeader, MaterialKind, LATEST_VERSION};
use crate::stream::ReversibleStream;
use crate::string::MaterialString;
use log::trace;
use serde::{Deserialize, Serialize};

/// A surface shader material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShaderMaterial {
    /// Fields shared with effect materials.
    pub base: BaseMaterial,

    /// Editor previews with the alpha test reference.
    pub enable_editor_alpha_ref: bool,

    // Version 8 and later.
    /// Translucency on.
    pub translucency: bool,
    /// Translucency treats the mesh as a thick volume.
    pub translucency_thick_object: bool,
    /// Albedo is mixed into the subsurface color.
    pub translucency_mix_albedo_with_subsurface_color: bool,
    /// Color of transmitted light.
    pub translucency_subsurface_color: Color3,
    /// Strength of transmitted light.
    pub translucency_transmissive_scale: f32,
    /// Turbulence of transmitted light.
    pub translucency_turbulence: f32,

    // Before version 8.
    /// Rim lighting on.
    pub rim_lighting: bool,
    /// Rim lighting exponent.
    pub rim_power: f32,
    /// Back lighting strength.
    pub back_light_power: f32,
    /// Subsurface lighting on.
    pub subsurface_lighting: bool,
    /// Subsurface lighting rolloff.
    pub subsurface_lighting_rolloff: f32,

    /// Specular highlights on.
    pub specular_enabled: bool,
    /// Specular tint.
    pub specular_color: Color3,
    /// Specular multiplier.
    pub specular_mult: f32,
    /// Surface smoothness.
    pub smoothness: f32,
    /// Fresnel exponent.
    pub fresnel_power: f32,

    /// Wetness specular scale.
    pub wetness_control_spec_scale: f32,
    /// Wetness specular power scale.
    pub wetness_control_spec_power_scale: f32,
    /// Wetness specular minimum variance.
    pub wetness_control_spec_min_var: f32,
    /// Wetness environment map scale. Present before version 10.
    pub wetness_control_env_map_scale: f32,
    /// Wetness fresnel exponent.
    pub wetness_control_fresnel_power: f32,
    /// Wetness metalness.
    pub wetness_control_metalness: f32,

    /// Physically based shading. Present from version 3.
    pub pbr: bool,
    /// Uses `porosity_value` instead of the default. Present from version 9.
    pub custom_porosity: bool,
    /// Surface porosity.
    pub porosity_value: f32,

    /// Material this one derives from, relative to the data directory.
    pub root_material_path: MaterialString,

    /// Anisotropic lighting on.
    pub aniso_lighting: bool,
    /// Emission on. Gates `emittance_color`.
    pub emit_enabled: bool,
    /// Emitted color. Present only when `emit_enabled` is set.
    pub emittance_color: Color3,
    /// Emission multiplier.
    pub emittance_mult: f32,
    /// Normal map is in model space.
    pub model_space_normals: bool,
    /// Emission is driven externally.
    pub external_emittance: bool,
    /// Emission luminance. Present from version 12.
    pub lum_emittance: f32,

    // Version 13 and later.
    /// Emission adapts to scene exposure.
    pub use_adaptive_emissive: bool,
    /// Adaptive emission exposure offset.
    pub adaptive_emissive_exposure_offset: f32,
    /// Adaptive emission lower exposure bound.
    pub adaptive_emissive_final_exposure_min: f32,
    /// Adaptive emission upper exposure bound.
    pub adaptive_emissive_final_exposure_max: f32,

    /// Back lighting on. Present before version 8.
    pub back_lighting: bool,
    /// Receives shadows.
    pub receive_shadows: bool,
    /// Hidden until revealed by gameplay.
    pub hide_secret: bool,
    /// Casts shadows.
    pub cast_shadows: bool,
    /// Dissolve fade on.
    pub dissolve_fade: bool,
    /// Assumes a shadow mask.
    pub assume_shadowmask: bool,
    /// Glow map on.
    pub glowmap: bool,

    // Before version 7.
    /// Window environment mapping.
    pub environment_mapping_window: bool,
    /// Eye environment mapping.
    pub environment_mapping_eye: bool,

    /// Hair shading on.
    pub hair: bool,
    /// Hair tint.
    pub hair_tint_color: Color3,
    /// Tree shading on.
    pub tree: bool,
    /// Face generation shading on.
    pub facegen: bool,
    /// Skin tinting on.
    pub skin_tint: bool,
    /// Tessellation on.
    pub tessellate: bool,

    /// Displacement bias. Present in version 1 only.
    pub displacement_texture_bias: f32,
    /// Displacement scale.
    pub displacement_texture_scale: f32,
    /// PN triangle scale.
    pub tessellation_pn_scale: f32,
    /// Base tessellation factor.
    pub tessellation_base_factor: f32,
    /// Distance at which tessellation fades out.
    pub tessellation_fade_distance: f32,

    /// Scale of the grayscale-to-palette lookup.
    pub grayscale_to_palette_scale: f32,
    /// Specular alpha is skewed.
    pub skew_specular_alpha: bool,

    /// Terrain blending on. Present from version 3; gates the three fields
    /// below.
    pub terrain: bool,
    /// Terrain blend threshold falloff.
    pub terrain_threshold_falloff: f32,
    /// Terrain tiling distance.
    pub terrain_tiling_distance: f32,
    /// Terrain texture rotation, in degrees.
    pub terrain_rotation_angle: f32,
}

impl ShaderMaterial {
    /// Creates a default-valued shader material of `version`.
    pub fn new(version: u32) -> Self {
        Self::with_header(MaterialHeader::new(MaterialKind::Shader, version))
    }

    pub(crate) fn with_header(header: MaterialHeader) -> Self {
        Self {
            base: BaseMaterial::new(header),
            enable_editor_alpha_ref: false,
            translucency: false,
            translucency_thick_object: false,
            translucency_mix_albedo_with_subsurface_color: false,
            translucency_subsurface_color: Color3::WHITE,
            translucency_transmissive_scale: 1.0,
            translucency_turbulence: 0.0,
            rim_lighting: false,
            rim_power: 2.0,
            back_light_power: 0.0,
            subsurface_lighting: false,
            subsurface_lighting_rolloff: 0.3,
            specular_enabled: false,
            specular_color: Color3::WHITE,
            specular_mult: 1.0,
            smoothness: 1.0,
            fresnel_power: 5.0,
            wetness_control_spec_scale: -1.0,
            wetness_control_spec_power_scale: -1.0,
            wetness_control_spec_min_var: -1.0,
            wetness_control_env_map_scale: -1.0,
            wetness_control_fresnel_power: -1.0,
            wetness_control_metalness: -1.0,
            pbr: false,
            custom_porosity: false,
            porosity_value: 0.0,
            root_material_path: MaterialString::default(),
            aniso_lighting: false,
            emit_enabled: false,
            emittance_color: Color3::WHITE,
            emittance_mult: 1.0,
            model_space_normals: false,
            external_emittance: false,
            lum_emittance: 100.0,
            use_adaptive_emissive: false,
            adaptive_emissive_exposure_offset: 13.5,
            adaptive_emissive_final_exposure_min: 2.0,
            adaptive_emissive_final_exposure_max: 3.0,
            back_lighting: false,
            receive_shadows: true,
            hide_secret: false,
            cast_shadows: true,
            dissolve_fade: false,
            assume_shadowmask: false,
            glowmap: false,
            environment_mapping_window: false,
            environment_mapping_eye: false,
            hair: false,
            hair_tint_color: Color3::new(0.5, 0.5, 0.5),
            tree: false,
            facegen: false,
            skin_tint: false,
            tessellate: false,
            displacement_texture_bias: -0.5,
            displacement_texture_scale: 10.0,
            tessellation_pn_scale: 1.0,
            tessellation_base_factor: 1.0,
            tessellation_fade_distance: 0.0,
            grayscale_to_palette_scale: 1.0,
            skew_specular_alpha: false,
            terrain: false,
            terrain_threshold_falloff: 0.0,
            terrain_tiling_distance: 0.0,
            terrain_rotation_angle: 0.0,
        }
    }

    /// Shorthand for `base.version()`.
    pub fn version(&self) -> u32 {
        self.base.version()
    }
}

impl Default for ShaderMaterial {
    fn default() -> Self {
        Self::new(LATEST_VERSION)
    }
}

impl Traverse for ShaderMaterial {
    fn header(&self) -> MaterialHeader {
        MaterialHeader::new(MaterialKind::Shader, self.base.version())
    }

    fn sync(&mut self, stream: &mut ReversibleStream<'_>) -> Result<()> {
        self.base.adopt_kind(MaterialKind::Shader);
        self.base.sync(stream)?;

        let version = self.base.version();
        trace!("{} shader traversal at byte {}", stream.mode(), stream.position());

        stream.sync(&mut self.enable_editor_alpha_ref)?;
        if version >= 8 {
            stream.sync(&mut self.translucency)?;
            stream.sync(&mut self.translucency_thick_object)?;
            stream.sync(&mut self.translucency_mix_albedo_with_subsurface_color)?;
            stream.sync(&mut self.translucency_subsurface_color)?;
            stream.sync(&mut self.translucency_transmissive_scale)?;
            stream.sync(&mut self.translucency_turbulence)?;
        } else {
            stream.sync(&mut self.rim_lighting)?;
            stream.sync(&mut self.rim_power)?;
            stream.sync(&mut self.back_light_power)?;
            stream.sync(&mut self.subsurface_lighting)?;
            stream.sync(&mut self.subsurface_lighting_rolloff)?;
        }

        stream.sync(&mut self.specular_enabled)?;
        stream.sync(&mut self.specular_color)?;
        stream.sync(&mut self.specular_mult)?;
        stream.sync(&mut self.smoothness)?;
        stream.sync(&mut self.fresnel_power)?;

        stream.sync(&mut self.wetness_control_spec_scale)?;
        stream.sync(&mut self.wetness_control_spec_power_scale)?;
        stream.sync(&mut self.wetness_control_spec_min_var)?;
        if version < 10 {
            stream.sync(&mut self.wetness_control_env_map_scale)?;
        }
        stream.sync(&mut self.wetness_control_fresnel_power)?;
        stream.sync(&mut self.wetness_control_metalness)?;

        if version > 2 {
            stream.sync(&mut self.pbr)?;
        }
        if version >= 9 {
            stream.sync(&mut self.custom_porosity)?;
        }
        stream.sync(&mut self.porosity_value)?;

        stream.sync(&mut self.root_material_path)?;

        stream.sync(&mut self.aniso_lighting)?;
        stream.sync(&mut self.emit_enabled)?;
        if self.emit_enabled {
            stream.sync(&mut self.emittance_color)?;
        }
        stream.sync(&mut self.emittance_mult)?;
        stream.sync(&mut self.model_space_normals)?;
        stream.sync(&mut self.external_emittance)?;
        if version >= 12 {
            stream.sync(&mut self.lum_emittance)?;
        }
        if version >= 13 {
            stream.sync(&mut self.use_adaptive_emissive)?;
            stream.sync(&mut self.adaptive_emissive_exposure_offset)?;
            stream.sync(&mut self.adaptive_emissive_final_exposure_min)?;
            stream.sync(&mut self.adaptive_emissive_final_exposure_max)?;
        }

        if version < 8 {
            stream.sync(&mut self.back_lighting)?;
        }
        stream.sync(&mut self.receive_shadows)?;
        stream.sync(&mut self.hide_secret)?;
        stream.sync(&mut self.cast_shadows)?;
        stream.sync(&mut self.dissolve_fade)?;
        stream.sync(&mut self.assume_shadowmask)?;
        stream.sync(&mut self.glowmap)?;

        if version < 7 {
            stream.sync(&mut self.environment_mapping_window)?;
            stream.sync(&mut self.environment_mapping_eye)?;
        }

        stream.sync(&mut self.hair)?;
        stream.sync(&mut self.hair_tint_color)?;
        stream.sync(&mut self.tree)?;
        stream.sync(&mut self.facegen)?;
        stream.sync(&mut self.skin_tint)?;
        stream.sync(&mut self.tessellate)?;

        if version == 1 {
            stream.sync(&mut self.displacement_texture_bias)?;
        }
        stream.sync(&mut self.displacement_texture_scale)?;
        stream.sync(&mut self.tessellation_pn_scale)?;
        stream.sync(&mut self.tessellation_base_factor)?;
        stream.sync(&mut self.tessellation_fade_distance)?;

        stream.sync(&mut self.grayscale_to_palette_scale)?;
        stream.sync(&mut self.skew_specular_alpha)?;

        if version >= 3 {
            stream.sync(&mut self.terrain)?;
            if self.terrain {
                if version == 3 {
                    let mut unused = 0_u32;
                    stream.sync(&mut unused)?;
                }
                stream.sync(&mut self.terrain_threshold_falloff)?;
                stream.sync(&mut self.terrain_tiling_distance)?;
                stream.sync(&mut self.terrain_rotation_angle)?;
            }
        }
        Ok(())
    }
}
