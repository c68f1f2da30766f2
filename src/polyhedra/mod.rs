//! Shape definitions and the registry that hands them out.

pub mod cube;
pub mod definition;
pub mod dodecahedron;
pub mod doubly_covered;
pub mod icosahedron;
pub mod lattice;
pub mod octahedron;
pub mod tetrahedron;

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use tracing::info;

use crate::error::{Result, ShapeError};

pub use cube::Cube;
pub use definition::{Metrics, PolyhedronDefinition, Shape, Style, VERTEX_TOLERANCE};
pub use dodecahedron::Dodecahedron;
pub use doubly_covered::DoublyCovered;
pub use icosahedron::Icosahedron;
pub use lattice::{LatticeDelta, LatticeType, MoveData, MoveTable};
pub use octahedron::Octahedron;
pub use tetrahedron::Tetrahedron;

/// Identifier of a supported solid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeId {
    Cube,
    Octahedron,
    Icosahedron,
    Tetrahedron,
    Dodecahedron,
    DoublyCoveredTriangle,
    DoublyCoveredSquare,
    DoublyCoveredHexagon,
}

impl ShapeId {
    /// Every supported shape, in registry order.
    pub const ALL: [ShapeId; 8] = [
        ShapeId::Cube,
        ShapeId::Octahedron,
        ShapeId::Icosahedron,
        ShapeId::Tetrahedron,
        ShapeId::Dodecahedron,
        ShapeId::DoublyCoveredTriangle,
        ShapeId::DoublyCoveredSquare,
        ShapeId::DoublyCoveredHexagon,
    ];

    /// The textual id, as accepted by [`FromStr`].
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cube => "cube",
            Self::Octahedron => "octahedron",
            Self::Icosahedron => "icosahedron",
            Self::Tetrahedron => "tetrahedron",
            Self::Dodecahedron => "dodecahedron",
            Self::DoublyCoveredTriangle => "dc-triangle",
            Self::DoublyCoveredSquare => "dc-square",
            Self::DoublyCoveredHexagon => "dc-hexagon",
        }
    }

    /// The shape implementation behind this id.
    #[must_use]
    pub fn shape(self) -> Box<dyn Shape> {
        match self {
            Self::Cube => Box::new(Cube),
            Self::Octahedron => Box::new(Octahedron),
            Self::Icosahedron => Box::new(Icosahedron),
            Self::Tetrahedron => Box::new(Tetrahedron),
            Self::Dodecahedron => Box::new(Dodecahedron),
            Self::DoublyCoveredTriangle => Box::new(DoublyCovered::new(self, 3)),
            Self::DoublyCoveredSquare => Box::new(DoublyCovered::new(self, 4)),
            Self::DoublyCoveredHexagon => Box::new(DoublyCovered::new(self, 6)),
        }
    }

    fn slot(self) -> usize {
        Self::ALL.iter().position(|&s| s == self).unwrap_or_default()
    }
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShapeId {
    type Err = ShapeError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|id| id.as_str() == wanted)
            .ok_or_else(|| ShapeError::UnknownShape(s.to_owned()))
    }
}

type Slot = std::result::Result<PolyhedronDefinition, ShapeError>;

static REGISTRY: OnceLock<Vec<Slot>> = OnceLock::new();

/// Returns the process-wide definition for `shape`.
///
/// All definitions are built on first use and shared read-only afterwards.
///
/// # Errors
///
/// Returns the construction error if the shape failed to build.
pub fn get_polyhedron(shape: ShapeId) -> Result<&'static PolyhedronDefinition> {
    let slots = REGISTRY.get_or_init(|| {
        let slots: Vec<Slot> = ShapeId::ALL
            .iter()
            .map(|id| PolyhedronDefinition::build(id.shape().as_ref()))
            .collect();
        info!(shapes = slots.len(), "polyhedron registry initialized");
        slots
    });
    match &slots[shape.slot()] {
        Ok(definition) => Ok(definition),
        Err(err) => Err(err.clone().into()),
    }
}
