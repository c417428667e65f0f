//! MCNP bounding-surface records.
//!
//! A bounding surface pairs an MCNP surface card (mnemonic plus numeric
//! coefficients) with the sense of the half-space that lies inside the
//! volume. In MCNP's convention the negative sense is the region where the
//! surface equation evaluates below zero: inside a sphere or cylinder,
//! below a plane.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which side of a surface bounds the cell interior.
///
/// Written as the sign of the surface id on the cell card. There is no
/// unset state: every bounding surface carries exactly one sense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sense {
    /// Interior on the negative side (inside spheres and cylinders, below planes).
    Negative,
    /// Interior on the positive side.
    Positive,
}

impl Sense {
    /// The factor applied to the surface id on a cell card, always +1 or -1.
    pub fn factor(self) -> i64 {
        match self {
            Sense::Negative => -1,
            Sense::Positive => 1,
        }
    }
}

/// The MCNP surface mnemonics emitted by the converters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mnemonic {
    /// Infinite cylinder about the z-axis: x^2 + y^2 - R^2 = 0. Coefficient: R.
    Cz,
    /// Plane normal to the x-axis: x - D = 0. Coefficient: D.
    Px,
    /// Plane normal to the y-axis: y - D = 0. Coefficient: D.
    Py,
    /// Plane normal to the z-axis: z - D = 0. Coefficient: D.
    Pz,
    /// Sphere centred at the origin. Coefficient: R.
    So,
    /// General sphere. Coefficients: x0 y0 z0 R.
    S,
    /// Axis-aligned special quadric:
    /// A(x-x0)^2 + B(y-y0)^2 + C(z-z0)^2 + 2D(x-x0) + 2E(y-y0) + 2F(z-z0) + G = 0.
    /// Coefficients: A B C D E F G x0 y0 z0.
    Sq,
}

impl Mnemonic {
    /// The spelling used on the surface card.
    pub fn card(self) -> &'static str {
        match self {
            Mnemonic::Cz => "CZ",
            Mnemonic::Px => "PX",
            Mnemonic::Py => "PY",
            Mnemonic::Pz => "PZ",
            Mnemonic::So => "SO",
            Mnemonic::S => "S",
            Mnemonic::Sq => "SQ",
        }
    }
}

impl fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.card())
    }
}

/// One bounding surface contributed by a volume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Surface {
    /// Side of the surface on which the volume interior lies.
    pub sense: Sense,
    /// MCNP surface type.
    pub mnemonic: Mnemonic,
    /// Ordered coefficients for the mnemonic, in cm.
    pub params: Vec<f64>,
}

impl Surface {
    pub fn new(sense: Sense, mnemonic: Mnemonic, params: Vec<f64>) -> Self {
        Self {
            sense,
            mnemonic,
            params,
        }
    }
}
