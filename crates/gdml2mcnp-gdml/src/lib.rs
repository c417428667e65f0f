//! # gdml2mcnp GDML front-end
//!
//! Reads GDML geometry descriptions into the core's in-memory volume
//! list. Only the sections the converter consumes are parsed: `solids`,
//! `materials`, `structure`, and `setup`. Lengths are converted to cm and
//! densities to g/cm3 on the way in, so the core never sees GDML units.
//!
//! - [`parser`] - Document traversal and reference resolution.
//! - [`units`] - GDML unit factors and Geant4 name cleanup.

pub mod parser;
pub mod units;

pub use parser::{parse_gdml_file, parse_gdml_str, GdmlError};
