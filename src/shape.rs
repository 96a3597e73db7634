//! Figure to shape conversion.
//!
//! Legacy figures reuse a handful of positional fields (`center`, `center2`,
//! `center3`, `radius`, `radius2`, `angle`) with a different meaning per
//! figure type. Each type gets its own rule in [`SHAPE_RULES`]; a rule only
//! fills the fields that type uses and leaves the rest unset.
//!
//! Types without a rule pass through with just `type` and `material`.

use serde::{Deserialize, Serialize};

use crate::geometry::{clean, length, normalize, sub, Vec3, DEGENERATE_LENGTH, ORIGIN};
use crate::legacy::LegacyFigure;
use crate::material::{convert_material, Material};

/// Legacy type names that were renamed in the new format.
pub const TYPE_ALIASES: &[(&str, &str)] = &[("julia_fract", "julia"), ("parabolid", "paraboloid")];

pub const MANDELBULB_RADIUS: f64 = 1.5;
pub const MANDELBULB_POWER: f64 = 8.0;
pub const MANDELBULB_ITERATIONS: u32 = 12;
pub const JULIA_RADIUS: f64 = 1.5;
pub const JULIA_ITERATIONS: u32 = 14;

/// Target shape record. Which fields are set depends on `shape_type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    #[serde(rename = "type")]
    pub shape_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Vec3>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normal: Option<Vec3>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius2: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,

    /// Euler rotation; for julia sets this carries the fractal constant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<Vec3>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub v0: Option<Vec3>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub v1: Option<Vec3>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub v2: Option<Vec3>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_iterations: Option<u32>,

    pub material: Material,
}

impl Shape {
    /// A shape with only `type` and `material` set.
    pub fn bare(shape_type: impl Into<String>, material: Material) -> Self {
        Self {
            shape_type: shape_type.into(),
            position: None,
            normal: None,
            radius: None,
            radius2: None,
            height: None,
            rotation: None,
            v0: None,
            v1: None,
            v2: None,
            power: None,
            max_iterations: None,
            material,
        }
    }
}

/// Fills the type-specific fields of `shape` from `figure`.
pub type ShapeRule = fn(&LegacyFigure, &mut Shape);

/// Per-type conversion rules, keyed by the renamed type.
pub const SHAPE_RULES: &[(&str, ShapeRule)] = &[
    ("sphere", sphere),
    ("plane", plane),
    ("disc", disc),
    ("cylinder", axial),
    ("cone", axial),
    ("paraboloid", axial),
    ("hyperboloid", axial),
    ("torus", torus),
    ("cube", oriented_box),
    ("pyramid", oriented_box),
    ("triangle", triangle),
    ("tetrahedron", tetrahedron),
    ("ellipsoid", ellipsoid),
    ("mebius", mebius),
    ("mandelbulb", mandelbulb),
    ("julia", julia),
    ("skybox", skybox),
];

/// Map a legacy type name to its new name. Unknown names pass through.
pub fn canonical_type(figure_type: &str) -> &str {
    TYPE_ALIASES
        .iter()
        .find(|(legacy, _)| *legacy == figure_type)
        .map(|(_, renamed)| *renamed)
        .unwrap_or(figure_type)
}

/// Look up the conversion rule for a (renamed) shape type.
pub fn rule_for(shape_type: &str) -> Option<ShapeRule> {
    SHAPE_RULES
        .iter()
        .find(|(name, _)| *name == shape_type)
        .map(|(_, rule)| *rule)
}

/// Convert one legacy figure.
pub fn convert_shape(figure: &LegacyFigure) -> Shape {
    let shape_type = canonical_type(figure.figure_type());
    let mut shape = Shape::bare(shape_type, convert_material(figure));

    match rule_for(shape_type) {
        Some(rule) => rule(figure, &mut shape),
        None => log::debug!("No rule for figure type {:?}, passing through", shape_type),
    }

    shape
}

/// Unit axis from `center` towards `center2`, if the axis is not degenerate.
fn oriented_normal(figure: &LegacyFigure) -> Option<Vec3> {
    let axis = sub(figure.center2?, figure.center());
    (length(axis) > DEGENERATE_LENGTH).then(|| normalize(axis))
}

fn sphere(figure: &LegacyFigure, shape: &mut Shape) {
    shape.position = Some(figure.center());
    shape.radius = figure.radius;
}

fn plane(figure: &LegacyFigure, shape: &mut Shape) {
    shape.position = Some(figure.center());
    shape.normal = figure.normal.or(figure.center2);
}

fn disc(figure: &LegacyFigure, shape: &mut Shape) {
    shape.position = Some(figure.center());
    shape.normal = figure.center2;
    shape.radius = figure.radius;
}

/// Cylinder, cone, paraboloid and hyperboloid: `center2` is the far end of
/// the axis. A cone with an `angle` derives its radius from the height.
fn axial(figure: &LegacyFigure, shape: &mut Shape) {
    let center = figure.center();
    shape.position = Some(center);

    let mut height = 1.0;
    if let Some(center2) = figure.center2 {
        let axis = sub(center2, center);
        height = length(axis);
        shape.normal = Some(normalize(axis));
        if height > 0.0 {
            shape.height = Some(clean(height));
        }
    }

    shape.radius = match figure.angle {
        Some(angle) if shape.shape_type == "cone" => Some(clean(height * angle.to_radians().tan())),
        _ => figure.radius,
    };
    shape.radius2 = figure.radius2.filter(|r| *r != 0.0);
}

fn torus(figure: &LegacyFigure, shape: &mut Shape) {
    shape.position = Some(figure.center());
    shape.normal = figure.center2;
    shape.radius = figure.radius;
    shape.radius2 = figure.radius2;
}

/// Cube and pyramid.
fn oriented_box(figure: &LegacyFigure, shape: &mut Shape) {
    shape.position = Some(figure.center());
    shape.normal = oriented_normal(figure);
    shape.radius = figure.radius;
    shape.radius2 = figure.radius2;
}

fn triangle(figure: &LegacyFigure, shape: &mut Shape) {
    shape.position = Some(ORIGIN);
    shape.v0 = Some(figure.center());
    shape.v1 = Some(figure.center2.unwrap_or(ORIGIN));
    shape.v2 = Some(figure.center3.unwrap_or(ORIGIN));
}

fn tetrahedron(figure: &LegacyFigure, shape: &mut Shape) {
    shape.position = Some(figure.center());
    shape.normal = oriented_normal(figure);
    shape.radius = figure.radius;
}

fn ellipsoid(figure: &LegacyFigure, shape: &mut Shape) {
    shape.position = Some(figure.center());
    shape.rotation = figure.center2.filter(|r| length(*r) > DEGENERATE_LENGTH);
    shape.radius = figure.radius;
}

fn mebius(figure: &LegacyFigure, shape: &mut Shape) {
    let center = figure.center();
    shape.position = (center != ORIGIN).then_some(center);
    shape.normal = figure.center2;
    shape.radius = figure.radius;
    shape.radius2 = figure.radius2;
}

fn mandelbulb(figure: &LegacyFigure, shape: &mut Shape) {
    shape.position = Some(figure.center());
    shape.radius = Some(figure.radius.filter(|r| *r > 0.0).unwrap_or(MANDELBULB_RADIUS));
    shape.power = Some(MANDELBULB_POWER);
    shape.max_iterations = Some(MANDELBULB_ITERATIONS);
}

/// Legacy julia sets store the fractal constant in `center`; it moves to
/// `rotation` and the set sits at the origin.
fn julia(figure: &LegacyFigure, shape: &mut Shape) {
    shape.position = Some(ORIGIN);
    shape.rotation = Some(figure.center());
    shape.radius2 = Some(0.0);
    shape.radius = Some(JULIA_RADIUS);
    shape.max_iterations = Some(JULIA_ITERATIONS);
}

fn skybox(_figure: &LegacyFigure, shape: &mut Shape) {
    shape.position = Some(ORIGIN);
}
