use tracing::warn;

use crate::math::intersect_2d::step_reaches_edge_xz;
use crate::math::Point3;
use crate::polyhedra::PolyhedronDefinition;
use crate::topology::{shared_edge, Face};

use super::PathSegment;

/// One face-to-face transition along a surface path, in path order.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeCrossing {
    pub from_face: usize,
    pub to_face: usize,
    /// Index of the crossed edge within `from_face`.
    pub edge: usize,
    /// Endpoints of the crossed edge, in `from_face`'s winding order.
    pub edge_vertices: (Point3, Point3),
    pub crossing_point: Point3,
    /// Segment the crossing happened in.
    pub segment_index: usize,
    /// Index of the point within the segment that marks the crossing.
    pub point_index: usize,
}

/// Tolerances for [`ExtractEdgeCrossings`].
#[derive(Debug, Clone, Copy)]
pub struct CrossingParams {
    /// Vertex matching tolerance when looking for a shared edge.
    pub vertex_tolerance: f64,
    /// Slack on the step parameter of a flat-polygon boundary hit.
    pub parameter_epsilon: f64,
}

impl Default for CrossingParams {
    fn default() -> Self {
        Self {
            vertex_tolerance: 0.01,
            parameter_epsilon: 1e-6,
        }
    }
}

/// Recovers the face crossings of a surface path from its points alone.
///
/// On a solid each point belongs to the face with the nearest center, and a
/// crossing is reported between consecutive points on different faces at
/// the second point. This is approximate near edges.
///
/// On a doubly-covered polygon both faces share a center, so the current
/// face is tracked instead: it starts as face 1 in every segment and flips
/// whenever a step reaches the boundary in the floor plane.
pub struct ExtractEdgeCrossings<'a> {
    definition: &'a PolyhedronDefinition,
    segments: &'a [PathSegment],
    params: CrossingParams,
}

impl<'a> ExtractEdgeCrossings<'a> {
    /// Creates a new `ExtractEdgeCrossings` query with default tolerances.
    #[must_use]
    pub fn new(definition: &'a PolyhedronDefinition, segments: &'a [PathSegment]) -> Self {
        Self {
            definition,
            segments,
            params: CrossingParams::default(),
        }
    }

    #[must_use]
    pub fn with_params(mut self, params: CrossingParams) -> Self {
        self.params = params;
        self
    }

    #[must_use]
    pub fn execute(&self) -> Vec<EdgeCrossing> {
        if self.definition.is_doubly_covered() {
            self.track_flat_polygon()
        } else {
            self.nearest_face_changes()
        }
    }

    fn nearest_face_changes(&self) -> Vec<EdgeCrossing> {
        let faces = self.definition.faces();
        let mut crossings = Vec::new();
        for (segment_index, segment) in self.segments.iter().enumerate() {
            for (i, pair) in segment.points.windows(2).enumerate() {
                let (Some(from), Some(to)) = (nearest_face(faces, &pair[0]), nearest_face(faces, &pair[1])) else {
                    continue;
                };
                if from.index == to.index {
                    continue;
                }
                let Some(edge) = shared_edge(from, to, self.params.vertex_tolerance) else {
                    warn!(from = from.index, to = to.index, "path jumps between faces with no shared edge");
                    continue;
                };
                crossings.push(EdgeCrossing {
                    from_face: from.index,
                    to_face: to.index,
                    edge,
                    edge_vertices: from.edge(edge),
                    crossing_point: pair[1],
                    segment_index,
                    point_index: i + 1,
                });
            }
        }
        crossings
    }

    fn track_flat_polygon(&self) -> Vec<EdgeCrossing> {
        let def = self.definition;
        let (Some(bottom), Some(top)) = (def.face(1), def.face(2)) else {
            warn!(shape = %def.id, "doubly-covered shape without two faces");
            return Vec::new();
        };
        let eps = self.params.parameter_epsilon;

        let mut crossings = Vec::new();
        for (segment_index, segment) in self.segments.iter().enumerate() {
            let mut current = bottom;
            for (i, pair) in segment.points.windows(2).enumerate() {
                let hit = current
                    .edges()
                    .find(|(_, a, b)| step_reaches_edge_xz(&pair[0], &pair[1], a, b, eps));
                let Some((edge, a, b)) = hit else {
                    continue;
                };
                let other = if current.index == bottom.index { top } else { bottom };
                crossings.push(EdgeCrossing {
                    from_face: current.index,
                    to_face: other.index,
                    edge,
                    edge_vertices: (a, b),
                    crossing_point: pair[1],
                    segment_index,
                    point_index: i + 1,
                });
                current = other;
            }
        }
        crossings
    }
}

/// The face whose center is closest to `point`.
fn nearest_face<'f>(faces: &'f [Face], point: &Point3) -> Option<&'f Face> {
    faces.iter().min_by(|a, b| {
        let da = (a.center - point).norm_squared();
        let db = (b.center - point).norm_squared();
        da.total_cmp(&db)
    })
}
