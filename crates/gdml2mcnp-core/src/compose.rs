//! The geometry composer: volumes in, cells out.
//!
//! Walks the volume list in document order, converts each solid, and
//! assigns cell ids and material indices. Both counters live on the
//! composer instance, so independent conversions never share state.
//!
//! The composer is fail-fast: the first unconvertible volume aborts the
//! whole run, because a partially-converted deck is unsafe to hand to the
//! transport code.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

use crate::convert::{convert_solid, SolidError};
use crate::surfaces::Surface;
use crate::volumes::{Geometry, Volume};

/// A conversion failure, tagged with the volume that caused it.
#[derive(Debug, Error)]
#[error("volume '{volume}': {source}")]
pub struct ComposeError {
    /// Display name of the offending volume.
    pub volume: String,
    #[source]
    pub source: SolidError,
}

/// One MCNP cell: a volume's bounding surfaces plus carved daughter regions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cell {
    /// Sequential id, starting at 1, in volume input order.
    pub cell_id: usize,
    /// Display name, echoed as a comment above the cell card.
    pub name: String,
    /// Index into the run's material table, starting at 1.
    pub material_index: usize,
    /// Mass density (g/cm3) echoed on the cell card; zero when the GDML
    /// material carried none.
    pub density: f64,
    /// Bounding surfaces, each with its sense. Never empty.
    pub surfaces: Vec<Surface>,
    /// Outer-surface lists of daughter volumes, excluded from this cell.
    pub carved: Vec<Vec<Surface>>,
}

/// One entry of the material legend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialEntry {
    /// MCNP material index, starting at 1, in first-seen order.
    pub index: usize,
    /// Display name for the legend comment.
    pub name: String,
    /// Mass density (g/cm3).
    pub density: f64,
}

/// The output of one composition run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Composition {
    pub cells: Vec<Cell>,
    pub materials: Vec<MaterialEntry>,
}

/// Owns the per-run state: the material index map and the cell-id counter.
#[derive(Debug)]
pub struct Composer {
    material_indices: HashMap<String, usize>,
    materials: Vec<MaterialEntry>,
    next_cell_id: usize,
}

impl Default for Composer {
    fn default() -> Self {
        Self::new()
    }
}

impl Composer {
    pub fn new() -> Self {
        Self {
            material_indices: HashMap::new(),
            materials: Vec::new(),
            next_cell_id: 1,
        }
    }

    /// Convert every volume, in order, into a cell.
    ///
    /// A second pass carves each volume's daughters out of its cell, so
    /// cell ids depend only on document order, never on nesting depth.
    pub fn compose(mut self, geometry: &Geometry) -> Result<Composition, ComposeError> {
        let mut cells: Vec<Cell> = Vec::with_capacity(geometry.volumes.len());
        let mut cell_of: HashMap<&str, usize> = HashMap::new();

        for volume in &geometry.volumes {
            let surfaces =
                convert_solid(&volume.solid, &volume.placement).map_err(|source| ComposeError {
                    volume: volume.name.clone(),
                    source,
                })?;
            let (material_index, density) = self.intern_material(volume, geometry);
            let cell_id = self.next_cell_id;
            self.next_cell_id += 1;

            cell_of.insert(volume.ref_name.as_str(), cells.len());
            cells.push(Cell {
                cell_id,
                name: volume.name.clone(),
                material_index,
                density,
                surfaces,
                carved: Vec::new(),
            });
        }

        for (index, volume) in geometry.volumes.iter().enumerate() {
            for daughter in &volume.daughters {
                let Some(&d) = cell_of.get(daughter.as_str()) else {
                    return Err(ComposeError {
                        volume: volume.name.clone(),
                        source: SolidError::UnresolvedChild(daughter.clone()),
                    });
                };
                let outer = cells[d].surfaces.clone();
                cells[index].carved.push(outer);
            }
        }

        Ok(Composition {
            cells,
            materials: self.materials,
        })
    }

    /// Fetch or assign the material index for a volume's material ref.
    fn intern_material(&mut self, volume: &Volume, geometry: &Geometry) -> (usize, f64) {
        if let Some(&index) = self.material_indices.get(&volume.material_ref) {
            return (index, self.materials[index - 1].density);
        }
        // Unresolved refs still get a stable index; the legend is filled
        // by hand downstream anyway.
        let entry = match geometry.materials.get(&volume.material_ref) {
            Some(data) => MaterialEntry {
                index: self.materials.len() + 1,
                name: data.name.clone(),
                density: data.density,
            },
            None => MaterialEntry {
                index: self.materials.len() + 1,
                name: volume.material_ref.clone(),
                density: 0.0,
            },
        };
        let result = (entry.index, entry.density);
        self.material_indices
            .insert(volume.material_ref.clone(), entry.index);
        self.materials.push(entry);
        result
    }
}

/// Compose with a fresh [`Composer`].
pub fn compose(geometry: &Geometry) -> Result<Composition, ComposeError> {
    Composer::new().compose(geometry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solids::{Orb, Placement, Solid, Tube};
    use crate::volumes::MaterialData;

    fn volume(name: &str, solid: Solid, material: &str) -> Volume {
        Volume {
            name: name.into(),
            ref_name: name.into(),
            solid,
            placement: Placement::origin(),
            material_ref: material.into(),
            daughters: Vec::new(),
        }
    }

    fn orb(radius: f64) -> Solid {
        Solid::Orb(Orb { radius })
    }

    fn geometry(volumes: Vec<Volume>) -> Geometry {
        let mut materials = HashMap::new();
        for (reference, density) in [("Steel", 7.87), ("Air", 0.0012), ("Water", 1.0)] {
            materials.insert(
                reference.to_string(),
                MaterialData {
                    name: reference.to_string(),
                    density,
                },
            );
        }
        let world = volumes.first().map(|v| v.ref_name.clone()).unwrap_or_default();
        Geometry {
            volumes,
            materials,
            world,
        }
    }

    #[test]
    fn test_cell_ids_follow_input_order() {
        let geometry = geometry(vec![
            volume("world", orb(100.0), "Air"),
            volume("shield", orb(50.0), "Steel"),
            volume("target", orb(10.0), "Water"),
        ]);
        let composition = compose(&geometry).unwrap();
        let ids: Vec<usize> = composition.cells.iter().map(|c| c.cell_id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(composition.cells[1].name, "shield");
    }

    #[test]
    fn test_material_indices_are_first_seen_and_stable() {
        let geometry = geometry(vec![
            volume("a", orb(10.0), "Steel"),
            volume("b", orb(20.0), "Air"),
            volume("c", orb(30.0), "Steel"),
            volume("d", orb(40.0), "Water"),
        ]);
        let composition = compose(&geometry).unwrap();
        let indices: Vec<usize> = composition
            .cells
            .iter()
            .map(|c| c.material_index)
            .collect();
        assert_eq!(indices, vec![1, 2, 1, 3]);

        let legend: Vec<(usize, &str)> = composition
            .materials
            .iter()
            .map(|m| (m.index, m.name.as_str()))
            .collect();
        assert_eq!(legend, vec![(1, "Steel"), (2, "Air"), (3, "Water")]);
    }

    #[test]
    fn test_density_is_carried_onto_cells() {
        let geometry = geometry(vec![volume("shield", orb(50.0), "Steel")]);
        let composition = compose(&geometry).unwrap();
        assert_eq!(composition.cells[0].density, 7.87);
    }

    #[test]
    fn test_unresolved_material_still_gets_an_index() {
        let geometry = geometry(vec![
            volume("a", orb(10.0), "Unobtainium"),
            volume("b", orb(20.0), "Unobtainium"),
        ]);
        let composition = compose(&geometry).unwrap();
        assert_eq!(composition.cells[0].material_index, 1);
        assert_eq!(composition.cells[1].material_index, 1);
        assert_eq!(composition.materials.len(), 1);
        assert_eq!(composition.materials[0].density, 0.0);
    }

    #[test]
    fn test_daughters_are_carved_from_the_mother() {
        let mut world = volume("world", orb(100.0), "Air");
        world.daughters = vec!["shield".into(), "target".into()];
        let geometry = geometry(vec![
            world,
            volume("shield", orb(50.0), "Steel"),
            volume("target", orb(10.0), "Water"),
        ]);
        let composition = compose(&geometry).unwrap();
        assert_eq!(composition.cells[0].carved.len(), 2);
        assert_eq!(
            composition.cells[0].carved[0],
            composition.cells[1].surfaces
        );
        assert!(composition.cells[1].carved.is_empty());
    }

    #[test]
    fn test_dangling_daughter_is_unresolved() {
        let mut world = volume("world", orb(100.0), "Air");
        world.daughters = vec!["ghost".into()];
        let geometry = geometry(vec![world]);
        let error = compose(&geometry).unwrap_err();
        assert_eq!(error.volume, "world");
        assert!(matches!(error.source, SolidError::UnresolvedChild(_)));
    }

    #[test]
    fn test_failure_names_the_offending_volume() {
        let bad = Solid::Tube(Tube {
            rmin: 0.0,
            rmax: 5.0,
            half_z: -10.0,
            start_phi: 0.0,
            delta_phi: 360.0,
        });
        let geometry = geometry(vec![
            volume("world", orb(100.0), "Air"),
            volume("broken", bad, "Steel"),
        ]);
        let error = compose(&geometry).unwrap_err();
        assert_eq!(error.volume, "broken");
        assert!(error.to_string().contains("broken"));
    }

    #[test]
    fn test_every_cell_has_surfaces() {
        let geometry = geometry(vec![
            volume("world", orb(100.0), "Air"),
            volume("shield", orb(50.0), "Steel"),
        ]);
        let composition = compose(&geometry).unwrap();
        assert!(composition.cells.iter().all(|c| !c.surfaces.is_empty()));
    }
}
