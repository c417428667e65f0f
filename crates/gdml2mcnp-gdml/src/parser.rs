//! GDML document parsing.
//!
//! Walks the four sections the converter consumes: `solids` (tags and
//! parameters, with boolean nodes resolving their `first`/`second` refs),
//! `materials` (densities for the deck legend), `structure` (logical
//! volumes, daughter placements), and `setup` (the world ref). Produces
//! the core's [`Geometry`] with volumes in document order.
//!
//! Placements are translation-only; a `rotation` element anywhere in the
//! input fails the parse rather than being ignored.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use thiserror::Error;

use gdml2mcnp_core::solids::{
    Cuboid, Ellipsoid, Intersection, Orb, Placement, Solid, Tube,
};
use gdml2mcnp_core::volumes::{Geometry, MaterialData, Volume};

use crate::units::{strip_pointer_suffix, unit_factor};

/// Errors while reading a GDML document.
#[derive(Debug, Error)]
pub enum GdmlError {
    #[error("failed to read file: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed XML: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("missing <{0}> section")]
    MissingSection(&'static str),

    #[error("<{parent}> is missing a <{element}> child")]
    MissingElement {
        parent: String,
        element: &'static str,
    },

    #[error("<{element}> is missing attribute '{attribute}'")]
    MissingAttribute {
        element: String,
        attribute: &'static str,
    },

    #[error("<{element}> attribute '{attribute}': invalid number '{value}'")]
    BadNumber {
        element: String,
        attribute: &'static str,
        value: String,
    },

    #[error("unknown unit '{0}'")]
    UnknownUnit(String),

    #[error("dangling reference '{reference}' in <{element}>")]
    DanglingRef {
        element: &'static str,
        reference: String,
    },

    #[error("volume '{0}' is placed more than once")]
    DuplicatePlacement(String),

    #[error("'{0}' has a rotated placement; rotations are not supported")]
    RotatedPlacement(String),
}

/// Read and parse a GDML file.
pub fn parse_gdml_file(path: &Path) -> Result<Geometry, GdmlError> {
    let xml = std::fs::read_to_string(path)?;
    parse_gdml_str(&xml)
}

/// Parse a GDML document from a string.
pub fn parse_gdml_str(xml: &str) -> Result<Geometry, GdmlError> {
    let doc = roxmltree::Document::parse(xml)?;
    let root = doc.root_element();

    let solids_section = section(root, "solids")?;
    let mut solid_nodes: HashMap<&str, roxmltree::Node> = HashMap::new();
    for node in solids_section.children().filter(|n| n.is_element()) {
        solid_nodes.insert(require_attr(node, "name")?, node);
    }

    let materials_section = section(root, "materials")?;
    let mut materials = HashMap::new();
    for node in materials_section
        .children()
        .filter(|n| n.has_tag_name("material"))
    {
        let name = require_attr(node, "name")?;
        // Compositions are left for manual entry downstream; only the
        // density travels onto the deck.
        let density = match node.children().find(|n| n.has_tag_name("D")) {
            Some(d) => {
                let value = require_f64(d, "value")?;
                let unit = d.attribute("unit").unwrap_or("g/cm3");
                value * to_factor(unit)?
            }
            None => 0.0,
        };
        materials.insert(
            name.to_string(),
            MaterialData {
                name: strip_pointer_suffix(name),
                density,
            },
        );
    }

    let structure_section = section(root, "structure")?;
    let mut volumes: Vec<Volume> = Vec::new();
    let mut index_of: HashMap<String, usize> = HashMap::new();
    let mut pending: Vec<(String, Placement)> = Vec::new();
    for node in structure_section
        .children()
        .filter(|n| n.has_tag_name("volume"))
    {
        let ref_name = require_attr(node, "name")?;
        let solid_ref = child_ref(node, "solidref")?;
        let solid_node = solid_nodes.get(solid_ref).copied().ok_or_else(|| {
            GdmlError::DanglingRef {
                element: "solidref",
                reference: solid_ref.to_string(),
            }
        })?;
        let solid = parse_solid(solid_node, &solid_nodes)?;
        let material_ref = child_ref(node, "materialref")?;

        let mut daughters = Vec::new();
        for physvol in node.children().filter(|n| n.has_tag_name("physvol")) {
            let child = child_ref(physvol, "volumeref")?;
            if physvol
                .children()
                .any(|n| n.has_tag_name("rotation") || n.has_tag_name("rotationref"))
            {
                return Err(GdmlError::RotatedPlacement(child.to_string()));
            }
            let placement = match physvol.children().find(|n| n.has_tag_name("position")) {
                Some(position) => Placement {
                    translation: parse_position(position)?,
                    rotated: false,
                },
                None => Placement::origin(),
            };
            daughters.push(child.to_string());
            pending.push((child.to_string(), placement));
        }

        index_of.insert(ref_name.to_string(), volumes.len());
        volumes.push(Volume {
            name: strip_pointer_suffix(ref_name),
            ref_name: ref_name.to_string(),
            solid,
            placement: Placement::origin(),
            material_ref: material_ref.to_string(),
            daughters,
        });
    }

    // A physvol may reference a volume defined later in the document, so
    // placements are applied after the whole structure section is read.
    let mut placed: HashSet<usize> = HashSet::new();
    for (child, placement) in pending {
        let Some(&index) = index_of.get(&child) else {
            return Err(GdmlError::DanglingRef {
                element: "volumeref",
                reference: child,
            });
        };
        if !placed.insert(index) {
            return Err(GdmlError::DuplicatePlacement(volumes[index].name.clone()));
        }
        volumes[index].placement = placement;
    }

    let setup = section(root, "setup")?;
    let world_node = setup
        .children()
        .find(|n| n.has_tag_name("world"))
        .ok_or(GdmlError::MissingSection("world"))?;
    let world = require_attr(world_node, "ref")?.to_string();
    if !index_of.contains_key(&world) {
        return Err(GdmlError::DanglingRef {
            element: "world",
            reference: world,
        });
    }

    Ok(Geometry {
        volumes,
        materials,
        world,
    })
}

fn parse_solid<'a, 'input>(
    node: roxmltree::Node<'a, 'input>,
    solid_nodes: &HashMap<&'a str, roxmltree::Node<'a, 'input>>,
) -> Result<Solid, GdmlError> {
    match node.tag_name().name() {
        "tube" => {
            let scale = length_scale(node)?;
            Ok(Solid::Tube(Tube {
                rmin: opt_f64(node, "rmin")?.unwrap_or(0.0) * scale,
                rmax: require_f64(node, "rmax")? * scale,
                // GDML's z is the full height.
                half_z: require_f64(node, "z")? * scale * 0.5,
                start_phi: opt_f64(node, "startphi")?.unwrap_or(0.0),
                delta_phi: opt_f64(node, "deltaphi")?.unwrap_or(360.0),
            }))
        }
        "ellipsoid" => {
            let scale = length_scale(node)?;
            Ok(Solid::Ellipsoid(Ellipsoid {
                semi_axes: [
                    require_f64(node, "ax")? * scale,
                    require_f64(node, "by")? * scale,
                    require_f64(node, "cz")? * scale,
                ],
                lower_cut: opt_f64(node, "zcut1")?.map(|v| v * scale),
                upper_cut: opt_f64(node, "zcut2")?.map(|v| v * scale),
            }))
        }
        "orb" => {
            let scale = length_scale(node)?;
            Ok(Solid::Orb(Orb {
                radius: require_f64(node, "r")? * scale,
            }))
        }
        "box" => {
            let scale = length_scale(node)?;
            // GDML box extents are full lengths.
            Ok(Solid::Cuboid(Cuboid {
                half_extents: [
                    require_f64(node, "x")? * scale * 0.5,
                    require_f64(node, "y")? * scale * 0.5,
                    require_f64(node, "z")? * scale * 0.5,
                ],
            }))
        }
        "intersection" => {
            if node
                .children()
                .any(|n| n.has_tag_name("rotation") || n.has_tag_name("rotationref"))
            {
                return Err(GdmlError::RotatedPlacement(
                    require_attr(node, "name")?.to_string(),
                ));
            }
            let first = resolve_child_solid(node, "first", solid_nodes)?;
            let second = resolve_child_solid(node, "second", solid_nodes)?;
            let offset = match node.children().find(|n| n.has_tag_name("position")) {
                Some(position) => parse_position(position)?,
                None => [0.0; 3],
            };
            Ok(Solid::Intersection(Intersection {
                first: Box::new(first),
                second: Box::new(second),
                offset,
            }))
        }
        other => Ok(Solid::Other(other.to_string())),
    }
}

fn resolve_child_solid<'a, 'input>(
    node: roxmltree::Node<'a, 'input>,
    tag: &'static str,
    solid_nodes: &HashMap<&'a str, roxmltree::Node<'a, 'input>>,
) -> Result<Solid, GdmlError> {
    let reference = child_ref(node, tag)?;
    let child = solid_nodes
        .get(reference)
        .copied()
        .ok_or_else(|| GdmlError::DanglingRef {
            element: tag,
            reference: reference.to_string(),
        })?;
    parse_solid(child, solid_nodes)
}

fn parse_position(node: roxmltree::Node) -> Result<[f64; 3], GdmlError> {
    let unit = node.attribute("unit").unwrap_or("mm");
    let scale = to_factor(unit)?;
    Ok([
        opt_f64(node, "x")?.unwrap_or(0.0) * scale,
        opt_f64(node, "y")?.unwrap_or(0.0) * scale,
        opt_f64(node, "z")?.unwrap_or(0.0) * scale,
    ])
}

fn length_scale(node: roxmltree::Node) -> Result<f64, GdmlError> {
    to_factor(node.attribute("lunit").unwrap_or("mm"))
}

fn to_factor(unit: &str) -> Result<f64, GdmlError> {
    unit_factor(unit).ok_or_else(|| GdmlError::UnknownUnit(unit.to_string()))
}

fn section<'a, 'input>(
    root: roxmltree::Node<'a, 'input>,
    name: &'static str,
) -> Result<roxmltree::Node<'a, 'input>, GdmlError> {
    root.children()
        .find(|n| n.has_tag_name(name))
        .ok_or(GdmlError::MissingSection(name))
}

fn child_ref<'a>(node: roxmltree::Node<'a, '_>, tag: &'static str) -> Result<&'a str, GdmlError> {
    let child = node
        .children()
        .find(|n| n.has_tag_name(tag))
        .ok_or_else(|| GdmlError::MissingElement {
            parent: node.tag_name().name().to_string(),
            element: tag,
        })?;
    require_attr(child, "ref")
}

fn require_attr<'a>(
    node: roxmltree::Node<'a, '_>,
    attribute: &'static str,
) -> Result<&'a str, GdmlError> {
    node.attribute(attribute)
        .ok_or_else(|| GdmlError::MissingAttribute {
            element: node.tag_name().name().to_string(),
            attribute,
        })
}

fn require_f64(node: roxmltree::Node, attribute: &'static str) -> Result<f64, GdmlError> {
    parse_f64(node, attribute, require_attr(node, attribute)?)
}

fn opt_f64(node: roxmltree::Node, attribute: &'static str) -> Result<Option<f64>, GdmlError> {
    node.attribute(attribute)
        .map(|value| parse_f64(node, attribute, value))
        .transpose()
}

fn parse_f64(
    node: roxmltree::Node,
    attribute: &'static str,
    value: &str,
) -> Result<f64, GdmlError> {
    value.parse().map_err(|_| GdmlError::BadNumber {
        element: node.tag_name().name().to_string(),
        attribute,
        value: value.to_string(),
    })
}
