use std::f64::consts::{FRAC_PI_2, FRAC_PI_3};
use std::ops::{Add, Neg};

use crate::math::Vector3;

/// Tiling of the floor that a rolling solid's footprints trace out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LatticeType {
    /// Unit squares (cube, doubly-covered square).
    Square,
    /// Equilateral triangles alternating up and down.
    Triangular,
    /// Regular hexagons.
    Hexagonal,
    /// Footprints do not tile the plane (dodecahedron).
    None,
}

impl LatticeType {
    /// Floor displacement of one lattice step.
    ///
    /// `spacing` is the distance between adjacent cell centers and
    /// `sector_offset` the direction angle of the `u` axis. Square lattices
    /// use an orthogonal basis; triangular and hexagonal lattices use an
    /// axial basis with `v` at 60° from `u`.
    #[must_use]
    pub fn displacement(self, delta: LatticeDelta, spacing: f64, sector_offset: f64) -> Vector3 {
        let v_angle = match self {
            Self::Square => FRAC_PI_2,
            Self::Triangular | Self::Hexagonal => FRAC_PI_3,
            Self::None => return Vector3::zeros(),
        };
        let axis = |angle: f64| Vector3::new(angle.cos(), 0.0, angle.sin()) * spacing;
        let e_u = axis(sector_offset);
        let e_v = axis(sector_offset + v_angle);
        e_u * f64::from(delta.u) + e_v * f64::from(delta.v)
    }
}

/// Integer step on the floor lattice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct LatticeDelta {
    pub u: i32,
    pub v: i32,
}

impl LatticeDelta {
    #[must_use]
    pub const fn new(u: i32, v: i32) -> Self {
        Self { u, v }
    }
}

impl Add for LatticeDelta {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.u + rhs.u, self.v + rhs.v)
    }
}

impl Neg for LatticeDelta {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.u, -self.v)
    }
}

impl std::iter::Sum for LatticeDelta {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

/// A discrete lattice move: what a roll in a given direction is called and
/// where it lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveData {
    /// Human-readable move name.
    pub label: &'static str,
    /// Lattice step taken by the move.
    pub delta: LatticeDelta,
    /// Movement sector the direction fell into.
    pub sector: usize,
}

/// Labels and lattice steps for each movement sector, sector 0 first.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveTable {
    pub labels: Vec<&'static str>,
    pub deltas: Vec<LatticeDelta>,
}

const SQUARE_LABELS: [&str; 4] = ["+X", "+Z", "-X", "-Z"];
const AXIAL_LABELS: [&str; 6] = ["+U", "+V", "+W", "-U", "-V", "-W"];
const DIRECTION_LABELS: [&str; 24] = [
    "P0", "P1", "P2", "P3", "P4", "P5", "P6", "P7", "P8", "P9", "P10", "P11", "P12", "P13", "P14",
    "P15", "P16", "P17", "P18", "P19", "P20", "P21", "P22", "P23",
];

/// Most sectors [`MoveTable::numbered`] can name.
pub const MAX_NUMBERED_SECTORS: usize = DIRECTION_LABELS.len();

impl MoveTable {
    /// Four moves along the square lattice axes, counter-clockwise from +X
    /// when seen with `atan2(z, x)`.
    #[must_use]
    pub fn square() -> Self {
        Self {
            labels: SQUARE_LABELS.to_vec(),
            deltas: vec![
                LatticeDelta::new(1, 0),
                LatticeDelta::new(0, 1),
                LatticeDelta::new(-1, 0),
                LatticeDelta::new(0, -1),
            ],
        }
    }

    /// Six moves in axial coordinates, 60° apart.
    #[must_use]
    pub fn axial() -> Self {
        Self {
            labels: AXIAL_LABELS.to_vec(),
            deltas: vec![
                LatticeDelta::new(1, 0),
                LatticeDelta::new(0, 1),
                LatticeDelta::new(-1, 1),
                LatticeDelta::new(-1, 0),
                LatticeDelta::new(0, -1),
                LatticeDelta::new(1, -1),
            ],
        }
    }

    /// Named directions with no lattice steps.
    #[must_use]
    pub fn unlatticed(labels: &[&'static str]) -> Self {
        Self {
            labels: labels.to_vec(),
            deltas: vec![LatticeDelta::default(); labels.len()],
        }
    }

    /// `sectors` directions named `P0`, `P1`, ... with no lattice steps.
    /// Capped at [`MAX_NUMBERED_SECTORS`].
    #[must_use]
    pub fn numbered(sectors: usize) -> Self {
        Self::unlatticed(&DIRECTION_LABELS[..sectors.min(MAX_NUMBERED_SECTORS)])
    }

    /// Number of movement sectors.
    #[must_use]
    pub fn sectors(&self) -> usize {
        self.labels.len()
    }
}
