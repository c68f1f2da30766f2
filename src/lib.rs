pub mod error;
pub mod math;
pub mod operations;
pub mod polyhedra;
pub mod topology;

pub use error::{PolyrollError, Result};
pub use polyhedra::{get_polyhedron, PolyhedronDefinition, ShapeId};
