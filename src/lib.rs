//! Migration of legacy `.sc` scene descriptions to the JSON scene format.
//!
//! The pipeline per file is: strip trailing commas ([`repair`]), parse the
//! legacy records ([`legacy`]), map them onto the new schema ([`scene`],
//! [`shape`], [`material`]) and pretty-print the result. [`batch`] drives
//! that over a directory.

pub mod batch;
pub mod config;
pub mod geometry;
pub mod legacy;
pub mod material;
pub mod repair;
pub mod scene;
pub mod shape;

pub mod cli;

use crate::legacy::parse_legacy;
use crate::scene::{convert_scene, Scene};

/// Repair, parse and convert the text of one legacy scene file.
pub fn convert_str(text: &str) -> Result<Scene, serde_json::Error> {
    parse_legacy(text).map(|legacy| convert_scene(&legacy))
}
