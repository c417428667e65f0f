//! # gdml2mcnp Core
//!
//! The conversion core of the `gdml2mcnp` tool. This crate turns an
//! in-memory GDML volume list into MCNP cells and renders the card deck;
//! it never touches XML or the filesystem.
//!
//! ## Modules
//!
//! - [`solids`] - Typed GDML solid parameter records and placements.
//! - [`surfaces`] - MCNP bounding-surface records (sense, mnemonic, coefficients).
//! - [`convert`] - Per-solid converters from parameters to surface lists.
//! - [`volumes`] - The volume and material records the GDML front-end produces.
//! - [`compose`] - The geometry composer: cells, cell ids, material indices.
//! - [`deck`] - Surface de-duplication and fixed-column card rendering.

pub mod compose;
pub mod convert;
pub mod deck;
pub mod solids;
pub mod surfaces;
pub mod volumes;
