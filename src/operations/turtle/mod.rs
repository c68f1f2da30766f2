//! Turtle paths drawn across a solid's surface.
//!
//! A script of [`TurtleCommand`]s drives a turtle that walks in straight
//! lines over the faces of a polyhedron, crossing to the neighboring face
//! whenever it reaches an edge. The same script can also be drawn on the
//! flat floor for comparison, and the face crossings of a drawn path can be
//! recovered from its points alone.

pub mod command;
pub mod crossings;
pub mod flat_path;
pub mod generate_path;

use crate::error::Result;
use crate::math::{Point3, Vector3};
use crate::polyhedra::{get_polyhedron, ShapeId};

pub use command::{parse_commands, CommandKind, TurtleCommand};
pub use crossings::{CrossingParams, EdgeCrossing, ExtractEdgeCrossings};
pub use flat_path::GenerateFlatPath;
pub use generate_path::GeneratePath;

/// Record of the turtle crossing from one face to another.
pub type EdgeRoll = EdgeCrossing;

/// Tuning constants shared by both path generators.
#[derive(Debug, Clone, Copy)]
pub struct PathParams {
    /// Distance emitted points are lifted off their face along its normal.
    pub surface_offset: f64,
    /// Distance the turtle is pushed into a face after crossing onto it.
    pub edge_nudge: f64,
    /// Closest approach to a vertex that counts as reaching it.
    pub vertex_threshold: f64,
    /// Vertex matching tolerance when looking up the face across an edge.
    pub neighbor_tolerance: f64,
    /// Upper bound on edge crossings within one motion command.
    pub max_iterations: usize,
    /// Distances at or below this are treated as zero.
    pub epsilon: f64,
}

impl Default for PathParams {
    fn default() -> Self {
        Self {
            surface_offset: 0.015,
            edge_nudge: 0.001,
            vertex_threshold: 0.05,
            neighbor_tolerance: 0.01,
            max_iterations: 100,
            epsilon: 1e-6,
        }
    }
}

/// One continuous polyline; a new one starts at every pen lift.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathSegment {
    pub points: Vec<Point3>,
}

impl PathSegment {
    #[must_use]
    pub fn new(points: Vec<Point3>) -> Self {
        Self { points }
    }

    /// Sum of the distances between consecutive points.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.points.windows(2).map(|w| (w[1] - w[0]).norm()).sum()
    }
}

/// Where the turtle is, in the solid's local space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TurtleState {
    /// 1-based index of the face the turtle is on.
    pub face: usize,
    /// Position on (or very near) the face's plane.
    pub position: Point3,
    /// Unit direction of travel, tangent to the face.
    pub heading: Vector3,
}

/// A problem with the script, reported against the line that caused it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathError {
    pub message: String,
    pub line_number: usize,
}

impl PathError {
    /// The turtle came within the vertex threshold of a corner.
    #[must_use]
    pub fn reached_vertex(line_number: usize) -> Self {
        Self {
            message: "Path reached a vertex".to_owned(),
            line_number,
        }
    }
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}: {}", self.line_number, self.message)
    }
}

/// Output of a surface walk.
///
/// Segments drawn before an error are kept; `error` says where drawing
/// stopped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TurtlePath {
    pub segments: Vec<PathSegment>,
    pub edge_rolls: Vec<EdgeRoll>,
    pub error: Option<PathError>,
}

/// Walks `commands` over the surface of `shape`.
///
/// # Errors
///
/// Returns an error only if the shape's definition failed to build; script
/// problems are reported in [`TurtlePath::error`].
pub fn generate_path(shape: ShapeId, commands: &[TurtleCommand]) -> Result<TurtlePath> {
    Ok(GeneratePath::new(get_polyhedron(shape)?, commands).execute())
}

/// Draws `commands` on the floor under `shape`'s resting pose.
///
/// # Errors
///
/// Returns an error if the shape's definition failed to build.
pub fn generate_flat_path(shape: ShapeId, commands: &[TurtleCommand]) -> Result<Vec<PathSegment>> {
    Ok(GenerateFlatPath::new(get_polyhedron(shape)?, commands).execute())
}

/// Recovers the face crossings of a surface path from its points.
///
/// # Errors
///
/// Returns an error if the shape's definition failed to build.
pub fn extract_edge_crossings(shape: ShapeId, segments: &[PathSegment]) -> Result<Vec<EdgeCrossing>> {
    Ok(ExtractEdgeCrossings::new(get_polyhedron(shape)?, segments).execute())
}
