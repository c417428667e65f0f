//! Solid-to-surface converters.
//!
//! Each supported solid kind has one pure function taking its parameter
//! record and a placement and returning the ordered MCNP bounding
//! surfaces. [`convert_solid`] is the exhaustive dispatch over [`Solid`];
//! adding a shape means adding a variant there and one converter here,
//! nothing in the composer changes.
//!
//! Placement support is deliberately narrow. Translations are folded into
//! surface coefficients where the surface type can express them (sphere
//! and quadric centres, plane positions); anything else, and any rotation,
//! is a hard failure rather than silently-wrong geometry.

use thiserror::Error;

use crate::solids::{Cuboid, Ellipsoid, Intersection, Orb, Placement, Solid, Tube};
use crate::surfaces::{Mnemonic, Sense, Surface};

/// Failure to convert one solid. The composer attaches the volume name.
#[derive(Debug, Error)]
pub enum SolidError {
    /// Unknown solid kind, or geometrically invalid parameters.
    #[error("unsupported geometry: {0}")]
    UnsupportedGeometry(String),
    /// An offset or rotation the converter cannot express.
    #[error("unsupported placement: {0}")]
    UnsupportedPlacement(String),
    /// An intersection child of an unconvertible kind.
    #[error("unresolved child solid '{0}'")]
    UnresolvedChild(String),
}

/// Convert any solid at the given placement into its bounding surfaces.
pub fn convert_solid(solid: &Solid, placement: &Placement) -> Result<Vec<Surface>, SolidError> {
    if placement.rotated {
        return Err(SolidError::UnsupportedPlacement(
            "rotations are not supported".into(),
        ));
    }
    match solid {
        Solid::Tube(tube) => convert_tube(tube, placement),
        Solid::Ellipsoid(ellipsoid) => convert_ellipsoid(ellipsoid, placement),
        Solid::Orb(orb) => convert_orb(orb, placement),
        Solid::Cuboid(cuboid) => convert_cuboid(cuboid, placement),
        Solid::Intersection(node) => convert_intersection(node, placement),
        Solid::Other(tag) => Err(SolidError::UnsupportedGeometry(format!(
            "no converter for solid type '{tag}'"
        ))),
    }
}

/// Convert a tube into its cylinder walls and cap planes.
///
/// The tube must sit on the z-axis: a transverse offset cannot be
/// expressed with a CZ surface. An axial offset shifts the cap planes.
pub fn convert_tube(tube: &Tube, placement: &Placement) -> Result<Vec<Surface>, SolidError> {
    if tube.start_phi != 0.0 || tube.delta_phi < 360.0 {
        return Err(SolidError::UnsupportedGeometry(
            "phi-sector tube".into(),
        ));
    }
    let [x, y, z0] = placement.translation;
    if x != 0.0 || y != 0.0 {
        return Err(SolidError::UnsupportedPlacement(format!(
            "tube displaced ({x}, {y}) off the z-axis"
        )));
    }
    if tube.rmax <= 0.0 || tube.half_z <= 0.0 {
        return Err(SolidError::UnsupportedGeometry(format!(
            "tube with outer radius {} and half-height {}",
            tube.rmax, tube.half_z
        )));
    }
    if tube.rmin < 0.0 || tube.rmin >= tube.rmax {
        return Err(SolidError::UnsupportedGeometry(format!(
            "tube with inner radius {} against outer radius {}",
            tube.rmin, tube.rmax
        )));
    }

    let mut surfaces = vec![Surface::new(Sense::Negative, Mnemonic::Cz, vec![tube.rmax])];
    if tube.rmin > 0.0 {
        surfaces.push(Surface::new(Sense::Positive, Mnemonic::Cz, vec![tube.rmin]));
    }
    surfaces.push(Surface::new(
        Sense::Positive,
        Mnemonic::Pz,
        vec![z0 - tube.half_z],
    ));
    surfaces.push(Surface::new(
        Sense::Negative,
        Mnemonic::Pz,
        vec![z0 + tube.half_z],
    ));
    Ok(surfaces)
}

/// Convert an ellipsoid into one quadric, plus cut planes when present.
///
/// The quadric encodes
/// (x-x0)^2/a^2 + (y-y0)^2/b^2 + (z-z0)^2/c^2 - 1 = 0,
/// so any translation is absorbed into the centre coefficients. A z-cut
/// only produces a plane when it actually intersects the ellipsoid.
pub fn convert_ellipsoid(
    ellipsoid: &Ellipsoid,
    placement: &Placement,
) -> Result<Vec<Surface>, SolidError> {
    let [a, b, c] = ellipsoid.semi_axes;
    if a <= 0.0 || b <= 0.0 || c <= 0.0 {
        return Err(SolidError::UnsupportedGeometry(format!(
            "ellipsoid with semi-axes ({a}, {b}, {c})"
        )));
    }
    let [x0, y0, z0] = placement.translation;

    let mut surfaces = vec![Surface::new(
        Sense::Negative,
        Mnemonic::Sq,
        vec![
            (a * a).recip(),
            (b * b).recip(),
            (c * c).recip(),
            0.0,
            0.0,
            0.0,
            -1.0,
            x0,
            y0,
            z0,
        ],
    )];
    if let Some(cut) = ellipsoid.lower_cut {
        if cut > -c {
            surfaces.push(Surface::new(Sense::Positive, Mnemonic::Pz, vec![cut + z0]));
        }
    }
    if let Some(cut) = ellipsoid.upper_cut {
        if cut < c {
            surfaces.push(Surface::new(Sense::Negative, Mnemonic::Pz, vec![cut + z0]));
        }
    }
    Ok(surfaces)
}

/// Convert an orb into a single sphere surface.
pub fn convert_orb(orb: &Orb, placement: &Placement) -> Result<Vec<Surface>, SolidError> {
    if orb.radius <= 0.0 {
        return Err(SolidError::UnsupportedGeometry(format!(
            "orb with radius {}",
            orb.radius
        )));
    }
    let [x0, y0, z0] = placement.translation;
    let surface = if x0 == 0.0 && y0 == 0.0 && z0 == 0.0 {
        Surface::new(Sense::Negative, Mnemonic::So, vec![orb.radius])
    } else {
        Surface::new(Sense::Negative, Mnemonic::S, vec![x0, y0, z0, orb.radius])
    };
    Ok(vec![surface])
}

/// Convert a box into its six bounding planes.
pub fn convert_cuboid(cuboid: &Cuboid, placement: &Placement) -> Result<Vec<Surface>, SolidError> {
    let [hx, hy, hz] = cuboid.half_extents;
    if hx <= 0.0 || hy <= 0.0 || hz <= 0.0 {
        return Err(SolidError::UnsupportedGeometry(format!(
            "box with half-extents ({hx}, {hy}, {hz})"
        )));
    }
    let [x0, y0, z0] = placement.translation;
    Ok(vec![
        Surface::new(Sense::Positive, Mnemonic::Px, vec![x0 - hx]),
        Surface::new(Sense::Negative, Mnemonic::Px, vec![x0 + hx]),
        Surface::new(Sense::Positive, Mnemonic::Py, vec![y0 - hy]),
        Surface::new(Sense::Negative, Mnemonic::Py, vec![y0 + hy]),
        Surface::new(Sense::Positive, Mnemonic::Pz, vec![z0 - hz]),
        Surface::new(Sense::Negative, Mnemonic::Pz, vec![z0 + hz]),
    ])
}

/// Convert a boolean intersection by concatenating both children's
/// surfaces, each retaining its own sense (MCNP's implicit AND).
///
/// The second child's placement is the node's offset on top of the
/// volume's own placement; nested intersections accumulate offsets.
pub fn convert_intersection(
    node: &Intersection,
    placement: &Placement,
) -> Result<Vec<Surface>, SolidError> {
    let mut surfaces = convert_child(&node.first, placement)?;
    let shifted = placement.offset_by(&node.offset);
    surfaces.extend(convert_child(&node.second, &shifted)?);
    Ok(surfaces)
}

fn convert_child(child: &Solid, placement: &Placement) -> Result<Vec<Surface>, SolidError> {
    match child {
        Solid::Other(tag) => Err(SolidError::UnresolvedChild(tag.clone())),
        _ => convert_solid(child, placement),
    }
}
