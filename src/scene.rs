//! Target scene format and whole-scene conversion.

use serde::{Deserialize, Serialize};

use crate::geometry::{Vec3, ORIGIN};
use crate::legacy::{LegacyCamera, LegacyScene};
use crate::shape::{convert_shape, Shape};

pub const DEFAULT_FOV: f64 = 60.0;
pub const DEFAULT_EXPOSURE: f64 = 1.0;
pub const DEFAULT_MODEL_SCALE: f64 = 1.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub position: Vec3,
    /// Euler angles in degrees.
    pub rotation: Vec3,
    pub fov: f64,
    pub exposure: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: ORIGIN,
            rotation: ORIGIN,
            fov: DEFAULT_FOV,
            exposure: DEFAULT_EXPOSURE,
        }
    }
}

impl From<&LegacyCamera> for Camera {
    fn from(camera: &LegacyCamera) -> Self {
        let defaults = Self::default();
        Self {
            position: camera.position.unwrap_or(defaults.position),
            rotation: camera.angles.unwrap_or(defaults.rotation),
            fov: camera.fov.unwrap_or(defaults.fov),
            exposure: camera.exposure.unwrap_or(defaults.exposure),
        }
    }
}

/// Reference to an externally loaded model file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelRef {
    pub path: String,
    pub position: Vec3,
    pub scale: f64,
}

impl ModelRef {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            position: ORIGIN,
            scale: DEFAULT_MODEL_SCALE,
        }
    }
}

/// A scene in the new format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub camera: Camera,
    pub shapes: Vec<Shape>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub models: Vec<ModelRef>,
}

/// Convert a parsed legacy scene.
pub fn convert_scene(legacy: &LegacyScene) -> Scene {
    let camera = legacy.camera.as_ref().map(Camera::from).unwrap_or_default();
    let shapes = legacy.figures.iter().map(convert_shape).collect();
    let models = legacy
        .external_object
        .iter()
        .filter(|path| !path.is_empty())
        .map(ModelRef::new)
        .collect();

    Scene {
        camera,
        shapes,
        models,
    }
}

/// Serialize with 2-space indentation and a trailing newline.
pub fn to_pretty_json(scene: &Scene) -> Result<String, serde_json::Error> {
    let mut json = serde_json::to_string_pretty(scene)?;
    json.push('\n');
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::legacy::parse_legacy;

    #[test]
    fn test_missing_camera_uses_defaults() {
        let scene = convert_scene(&LegacyScene::default());
        assert_eq!(scene.camera, Camera {
            position: [0.0, 0.0, 0.0],
            rotation: [0.0, 0.0, 0.0],
            fov: 60.0,
            exposure: 1.0,
        });
        assert!(scene.shapes.is_empty());
        assert!(scene.models.is_empty());
    }

    #[test]
    fn test_camera_angles_become_rotation() {
        let legacy = parse_legacy(r#"{"camera": {"position": [1, 2, 3], "angles": [15, -30, 0], "exposure": 2.5}}"#).unwrap();
        let camera = convert_scene(&legacy).camera;
        assert_eq!(camera.position, [1.0, 2.0, 3.0]);
        assert_eq!(camera.rotation, [15.0, -30.0, 0.0]);
        assert_eq!(camera.fov, 60.0);
        assert_eq!(camera.exposure, 2.5);
    }

    #[test]
    fn test_external_object_becomes_model() {
        let legacy = parse_legacy(r#"{"external_object": "models/teapot.obj"}"#).unwrap();
        let scene = convert_scene(&legacy);
        assert_eq!(scene.models, vec![ModelRef {
            path: "models/teapot.obj".to_string(),
            position: [0.0, 0.0, 0.0],
            scale: 1.0,
        }]);

        let legacy = parse_legacy(r#"{"external_object": ""}"#).unwrap();
        assert!(convert_scene(&legacy).models.is_empty());
    }

    #[test]
    fn test_figures_keep_order() {
        let legacy = parse_legacy(r#"{"figures": [{"type": "skybox"}, {"type": "julia_fract"}, {"type": "cube"}]}"#).unwrap();
        let types: Vec<_> = convert_scene(&legacy).shapes.into_iter().map(|s| s.shape_type).collect();
        assert_eq!(types, ["skybox", "julia", "cube"]);
    }

    #[test]
    fn test_pretty_json_layout() {
        let json = to_pretty_json(&convert_scene(&LegacyScene::default())).unwrap();
        assert!(json.ends_with("}\n"));
        assert!(json.starts_with("{\n  \"camera\": {\n    \"position\": [\n      0.0,"));
        assert!(!json.contains("models"));
        assert!(json.contains("\"shapes\": []"));
    }
}
