//! Legacy scene records as they appear in `.sc` files.
//!
//! Geometry is positional: what `center2` or `radius2` mean depends on the
//! figure's `type`, which is why the mapping lives in [`crate::shape`]
//! rather than here.
//!
//! Files are parsed into a [`serde_json::Value`] first and fields are picked
//! out of it one by one. A field of the wrong JSON type is treated as absent,
//! so the only way a file fails is not being JSON at all. Repeated keys keep
//! the last value.

use serde_json::{Map, Value};

use crate::geometry::{Vec3, ORIGIN};
use crate::repair::strip_trailing_commas;

/// Figure type assumed when a record has no `type`.
pub const DEFAULT_FIGURE_TYPE: &str = "sphere";

/// Material tag assumed when a record has no `material`.
pub const DEFAULT_MATERIAL_TAG: &str = "diffuse";

/// Colour assumed when a record has no `color`.
pub const DEFAULT_COLOR: Vec3 = [0.8, 0.8, 0.8];

/// A whole legacy scene file.
#[derive(Debug, Clone, Default)]
pub struct LegacyScene {
    pub camera: Option<LegacyCamera>,
    pub figures: Vec<LegacyFigure>,
    /// Path to an externally loaded model.
    pub external_object: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct LegacyCamera {
    pub position: Option<Vec3>,
    /// Euler angles; becomes `rotation` in the new format.
    pub angles: Option<Vec3>,
    pub fov: Option<f64>,
    pub exposure: Option<f64>,
}

/// One legacy figure: geometry plus inline material fields.
#[derive(Debug, Clone)]
pub struct LegacyFigure {
    pub figure_type: Option<String>,

    pub center: Option<Vec3>,
    pub center2: Option<Vec3>,
    pub center3: Option<Vec3>,
    pub radius: Option<f64>,
    pub radius2: Option<f64>,
    /// Cone half-angle in degrees.
    pub angle: Option<f64>,
    pub normal: Option<Vec3>,

    /// `None` when the key is present but not a string (e.g. `null`);
    /// an absent key means [`DEFAULT_MATERIAL_TAG`].
    pub material: Option<String>,
    pub color: Option<Vec3>,
    pub emission: Option<f64>,
    pub specular: Option<f64>,
}

/// Same as parsing `{}`.
impl Default for LegacyFigure {
    fn default() -> Self {
        Self {
            figure_type: None,
            center: None,
            center2: None,
            center3: None,
            radius: None,
            radius2: None,
            angle: None,
            normal: None,
            material: Some(DEFAULT_MATERIAL_TAG.to_string()),
            color: None,
            emission: None,
            specular: None,
        }
    }
}

fn number(obj: &Map<String, Value>, key: &str) -> Option<f64> {
    obj.get(key).and_then(Value::as_f64)
}

fn string(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key).and_then(Value::as_str).map(str::to_string)
}

/// First three components of a numeric array; RGBA colours lose alpha.
fn vec3(obj: &Map<String, Value>, key: &str) -> Option<Vec3> {
    let items = obj.get(key)?.as_array()?;
    if items.len() < 3 {
        return None;
    }
    Some([items[0].as_f64()?, items[1].as_f64()?, items[2].as_f64()?])
}

impl LegacyCamera {
    pub fn from_map(obj: &Map<String, Value>) -> Self {
        Self {
            position: vec3(obj, "position"),
            angles: vec3(obj, "angles"),
            fov: number(obj, "fov"),
            exposure: number(obj, "exposure"),
        }
    }
}

impl LegacyFigure {
    pub fn from_map(obj: &Map<String, Value>) -> Self {
        let material = match obj.get("material") {
            None => Some(DEFAULT_MATERIAL_TAG.to_string()),
            Some(tag) => tag.as_str().map(str::to_string),
        };

        Self {
            figure_type: string(obj, "type"),
            center: vec3(obj, "center"),
            center2: vec3(obj, "center2"),
            center3: vec3(obj, "center3"),
            radius: number(obj, "radius"),
            radius2: number(obj, "radius2"),
            angle: number(obj, "angle"),
            normal: vec3(obj, "normal"),
            material,
            color: vec3(obj, "color"),
            emission: number(obj, "emission"),
            specular: number(obj, "specular"),
        }
    }

    pub fn figure_type(&self) -> &str {
        self.figure_type.as_deref().unwrap_or(DEFAULT_FIGURE_TYPE)
    }

    pub fn center(&self) -> Vec3 {
        self.center.unwrap_or(ORIGIN)
    }

    pub fn material_tag(&self) -> Option<&str> {
        self.material.as_deref()
    }

    pub fn color(&self) -> Vec3 {
        self.color.unwrap_or(DEFAULT_COLOR)
    }

    pub fn emission(&self) -> f64 {
        self.emission.unwrap_or(0.0)
    }
}

impl LegacyScene {
    /// Pick the scene out of a parsed document. Non-object documents and
    /// non-object figures contribute nothing.
    pub fn from_value(value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            log::warn!("Scene document is not an object, treating it as empty");
            return Self::default();
        };

        let figures = obj
            .get("figures")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| match item.as_object() {
                        Some(fig) => Some(LegacyFigure::from_map(fig)),
                        None => {
                            log::warn!("Skipping figure that is not an object: {}", item);
                            None
                        }
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self {
            camera: obj.get("camera").and_then(Value::as_object).map(LegacyCamera::from_map),
            figures,
            external_object: string(obj, "external_object"),
        }
    }
}

/// Repair trailing commas and parse a legacy scene.
///
/// Fails only when the repaired text is not JSON.
pub fn parse_legacy(text: &str) -> Result<LegacyScene, serde_json::Error> {
    let value: Value = serde_json::from_str(&strip_trailing_commas(text))?;
    Ok(LegacyScene::from_value(&value))
}
