//! PBR material mapping.
//!
//! Legacy figures carry a material tag plus loose `color`, `emission` and
//! `specular` fields. The new format wants a metallic-roughness material,
//! so each tag maps to a fixed set of PBR fields.

use serde::{Deserialize, Serialize};

use crate::geometry::Vec3;
use crate::legacy::LegacyFigure;

/// Roughness for diffuse surfaces without a `specular` value.
pub const DIFFUSE_ROUGHNESS: f64 = 0.8;
/// Roughness for mirrors without a `specular` value.
pub const REFLECT_ROUGHNESS: f64 = 0.05;
pub const EMISSIVE_ROUGHNESS: f64 = 0.9;
/// Emission strength used when the legacy `emission` is not positive.
pub const DEFAULT_EMISSION_STRENGTH: f64 = 5.0;
pub const GLASS_IOR: f64 = 1.5;

/// Material tags understood by the legacy renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegacyMaterial {
    Diffuse,
    Emissive,
    Reflect,
    Glass,
    Transparent,
    /// Light-absorbing surface.
    Negative,
}

impl LegacyMaterial {
    pub const ALL: &'static [Self] = &[
        Self::Diffuse,
        Self::Emissive,
        Self::Reflect,
        Self::Glass,
        Self::Transparent,
        Self::Negative,
    ];

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|m| m.tag() == tag)
    }

    pub fn tag(self) -> &'static str {
        match self {
            Self::Diffuse => "diffuse",
            Self::Emissive => "emissive",
            Self::Reflect => "reflect",
            Self::Glass => "glass",
            Self::Transparent => "transparent",
            Self::Negative => "negative",
        }
    }
}

/// Target material. Unset fields are left to the renderer's defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub base_color: Vec3,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metallic: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roughness: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transmission: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ior: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emission: Option<Vec3>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emission_strength: Option<f64>,
}

impl Material {
    /// A material with only `base_color` set.
    pub fn with_base_color(base_color: Vec3) -> Self {
        Self {
            base_color,
            metallic: None,
            roughness: None,
            transmission: None,
            ior: None,
            emission: None,
            emission_strength: None,
        }
    }
}

/// Build the PBR material for a legacy figure.
///
/// Unrecognized tags, and a `material` that is not a string, keep only
/// `base_color`.
pub fn convert_material(figure: &LegacyFigure) -> Material {
    let color = figure.color();
    let mut mat = Material::with_base_color(color);

    let Some(kind) = figure.material_tag().and_then(LegacyMaterial::from_tag) else {
        log::debug!("Unknown material tag {:?}, keeping base colour only", figure.material_tag());
        return mat;
    };

    match kind {
        LegacyMaterial::Diffuse => {
            mat.roughness = Some(figure.specular.unwrap_or(DIFFUSE_ROUGHNESS));
        }
        LegacyMaterial::Emissive => {
            let emission = figure.emission();
            mat.roughness = Some(EMISSIVE_ROUGHNESS);
            mat.emission = Some(color);
            mat.emission_strength = Some(if emission > 0.0 {
                emission
            } else {
                DEFAULT_EMISSION_STRENGTH
            });
        }
        LegacyMaterial::Reflect => {
            mat.metallic = Some(1.0);
            mat.roughness = Some(figure.specular.unwrap_or(REFLECT_ROUGHNESS));
        }
        LegacyMaterial::Glass => {
            mat.transmission = Some(1.0);
            mat.ior = Some(GLASS_IOR);
            mat.roughness = Some(0.0);
        }
        LegacyMaterial::Transparent => {
            mat.transmission = Some(1.0);
            mat.ior = Some(1.0);
            mat.roughness = Some(0.0);
        }
        LegacyMaterial::Negative => {
            mat.base_color = [0.0, 0.0, 0.0];
            mat.roughness = Some(1.0);
        }
    }

    mat
}
