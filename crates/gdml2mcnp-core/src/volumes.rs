//! Volume and material records handed over by the GDML front-end.
//!
//! These are constructed once from the parsed document and are read-only
//! afterwards; the composer consumes them in document order.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::solids::{Placement, Solid};

/// A named, placed solid instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Volume {
    /// Display name, with any Geant4 pointer suffix stripped.
    pub name: String,
    /// Raw GDML ref. Daughter lists join on raw refs, not display names.
    pub ref_name: String,
    /// The solid with its parameters.
    pub solid: Solid,
    /// Where this volume sits inside its mother (world volumes stay at the origin).
    pub placement: Placement,
    /// Raw ref of the GDML material filling this volume.
    pub material_ref: String,
    /// Raw refs of volumes placed inside this one, in physvol order.
    pub daughters: Vec<String>,
}

/// Density record for the deck's material legend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialData {
    /// Display name, with any Geant4 pointer suffix stripped.
    pub name: String,
    /// Mass density (g/cm3).
    pub density: f64,
}

/// A parsed geometry: volumes in document order plus material data.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Geometry {
    /// Volumes in the order they appear in the structure section.
    pub volumes: Vec<Volume>,
    /// Material data keyed by raw GDML ref.
    pub materials: HashMap<String, MaterialData>,
    /// Raw ref of the world volume.
    pub world: String,
}
