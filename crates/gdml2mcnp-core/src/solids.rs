//! Typed GDML solid parameter records.
//!
//! One variant per supported GDML solid, each carrying a dedicated
//! parameter struct. Lengths are in cm; the GDML front-end converts units
//! before these records are built. Unknown GDML tags are carried as
//! [`Solid::Other`] so conversion can report them against the owning
//! volume instead of failing anonymously at parse time.

use serde::{Deserialize, Serialize};

/// Translation-only placement of a solid.
///
/// Rotations are out of scope for this tool. The front-end records whether
/// a rotation element was attached so conversion rejects the volume
/// outright rather than emitting silently-wrong geometry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    /// Translation (cm).
    pub translation: [f64; 3],
    /// A rotation element was attached to this placement.
    pub rotated: bool,
}

impl Placement {
    /// A placement at the origin.
    pub fn origin() -> Self {
        Self::default()
    }

    /// A pure translation.
    pub fn at(x: f64, y: f64, z: f64) -> Self {
        Self {
            translation: [x, y, z],
            rotated: false,
        }
    }

    /// This placement shifted by a further offset.
    pub fn offset_by(&self, delta: &[f64; 3]) -> Self {
        Self {
            translation: [
                self.translation[0] + delta[0],
                self.translation[1] + delta[1],
                self.translation[2] + delta[2],
            ],
            rotated: self.rotated,
        }
    }
}

/// A full-circle cylindrical shell (GDML `tube`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tube {
    /// Inner radius (cm); zero for a solid cylinder.
    pub rmin: f64,
    /// Outer radius (cm).
    pub rmax: f64,
    /// Half-height along z (cm).
    pub half_z: f64,
    /// Sector start angle (degrees); must be zero.
    pub start_phi: f64,
    /// Sector sweep (degrees); must cover the full circle.
    pub delta_phi: f64,
}

/// An axis-aligned ellipsoid (GDML `ellipsoid`), optionally cut in z.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ellipsoid {
    /// Semi-axis lengths along x, y, z (cm).
    pub semi_axes: [f64; 3],
    /// Lower z-cut plane (cm, relative to the centre), if the solid carries one.
    pub lower_cut: Option<f64>,
    /// Upper z-cut plane (cm, relative to the centre), if the solid carries one.
    pub upper_cut: Option<f64>,
}

/// A sphere (GDML `orb`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Orb {
    /// Radius (cm).
    pub radius: f64,
}

/// An axis-aligned box (GDML `box`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cuboid {
    /// Half-extents along x, y, z (cm).
    pub half_extents: [f64; 3],
}

/// A boolean intersection of two child solids (GDML `intersection`).
///
/// The second child is displaced by `offset` relative to the first, as
/// given by the boolean node's position element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Intersection {
    pub first: Box<Solid>,
    pub second: Box<Solid>,
    /// Offset of the second child (cm).
    pub offset: [f64; 3],
}

/// A GDML solid with its parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Solid {
    Tube(Tube),
    Ellipsoid(Ellipsoid),
    Orb(Orb),
    Cuboid(Cuboid),
    Intersection(Intersection),
    /// A solid tag this tool has no converter for.
    Other(String),
}

impl Solid {
    /// The GDML tag this solid came from, for error messages.
    pub fn tag(&self) -> &str {
        match self {
            Solid::Tube(_) => "tube",
            Solid::Ellipsoid(_) => "ellipsoid",
            Solid::Orb(_) => "orb",
            Solid::Cuboid(_) => "box",
            Solid::Intersection(_) => "intersection",
            Solid::Other(tag) => tag,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placement_offset_accumulates() {
        let p = Placement::at(1.0, 2.0, 3.0).offset_by(&[0.5, -2.0, 0.0]);
        assert_eq!(p.translation, [1.5, 0.0, 3.0]);
        assert!(!p.rotated);
    }

    #[test]
    fn test_offset_preserves_rotation_flag() {
        let mut p = Placement::origin();
        p.rotated = true;
        assert!(p.offset_by(&[1.0, 0.0, 0.0]).rotated);
    }

    #[test]
    fn test_solid_tags() {
        let orb = Solid::Orb(Orb { radius: 1.0 });
        assert_eq!(orb.tag(), "orb");
        assert_eq!(Solid::Other("polycone".into()).tag(), "polycone");
    }
}
