use tracing::{debug, warn};

use crate::math::intersect_3d::{ray_exit_distance, ray_point_approach};
use crate::math::{axis_angle, Point3, Vector3};
use crate::polyhedra::PolyhedronDefinition;
use crate::topology::{find_neighbor, Face};

use super::command::{CommandKind, TurtleCommand};
use super::{EdgeCrossing, PathError, PathParams, PathSegment, TurtlePath, TurtleState};

/// How one motion command ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Walk {
    /// The full distance was covered.
    Completed,
    /// The turtle ran into a vertex.
    ReachedVertex,
    /// Motion was cut short by a broken face graph or the iteration cap.
    Truncated,
}

/// Walks a turtle script over the faces of a solid.
///
/// Points are emitted in the solid's local space, lifted off their face by
/// [`PathParams::surface_offset`].
pub struct GeneratePath<'a> {
    definition: &'a PolyhedronDefinition,
    commands: &'a [TurtleCommand],
    params: PathParams,
}

impl<'a> GeneratePath<'a> {
    /// Creates a new `GeneratePath` operation with default parameters.
    #[must_use]
    pub fn new(definition: &'a PolyhedronDefinition, commands: &'a [TurtleCommand]) -> Self {
        Self {
            definition,
            commands,
            params: PathParams::default(),
        }
    }

    #[must_use]
    pub fn with_params(mut self, params: PathParams) -> Self {
        self.params = params;
        self
    }

    /// Runs the script.
    ///
    /// Drawing stops at the first command that reaches a vertex; everything
    /// drawn before it is returned along with the error.
    #[must_use]
    pub fn execute(&self) -> TurtlePath {
        let mut path = TurtlePath::default();
        let Some(base) = self.definition.face(1) else {
            warn!(shape = %self.definition.id, "no face 1, nothing drawn");
            return path;
        };

        let mut state = self.start_state(base, 0.0, 0.0);
        let mut current = vec![self.emit(base, &state.position)];

        for command in self.commands {
            match command.kind {
                CommandKind::Start { x, y } => {
                    flush(&mut path.segments, &mut current);
                    state = self.start_state(base, x, y);
                    current.push(self.emit(base, &state.position));
                }
                CommandKind::TurnLeft(_) | CommandKind::TurnRight(_) => {
                    let angle = command.turn().unwrap_or_default();
                    if let Some(face) = self.definition.face(state.face) {
                        state.heading = axis_angle(&face.normal, angle) * state.heading;
                    }
                }
                CommandKind::Forward(_) | CommandKind::Backward(_) => {
                    let distance = command.distance().unwrap_or_default();
                    let segment_index = path.segments.len();
                    let outcome = self.walk(
                        &mut state,
                        distance,
                        &mut current,
                        &mut path.edge_rolls,
                        segment_index,
                    );
                    if outcome == Walk::ReachedVertex {
                        path.error = Some(PathError::reached_vertex(command.line_number));
                        break;
                    }
                }
            }
        }
        flush(&mut path.segments, &mut current);
        path
    }

    /// Turtle state after `start x y`.
    fn start_state(&self, base: &Face, x: f64, y: f64) -> TurtleState {
        let heading = base.initial_heading();
        let right = heading.cross(&base.normal).normalize();
        TurtleState {
            face: base.index,
            position: base.center + heading * x + right * y,
            heading,
        }
    }

    fn emit(&self, face: &Face, position: &Point3) -> Point3 {
        position + face.normal * self.params.surface_offset
    }

    /// Moves the turtle `distance` along its heading (backwards if
    /// negative), crossing edges as it goes.
    fn walk(
        &self,
        state: &mut TurtleState,
        distance: f64,
        points: &mut Vec<Point3>,
        crossings: &mut Vec<EdgeCrossing>,
        segment_index: usize,
    ) -> Walk {
        let params = &self.params;
        let sign = distance.signum();
        let mut remaining = distance.abs();

        for _ in 0..params.max_iterations {
            if remaining <= params.epsilon {
                return Walk::Completed;
            }
            let Some(face) = self.definition.face(state.face) else {
                warn!(face = state.face, "turtle is on a missing face, motion stopped");
                return Walk::Truncated;
            };
            let direction = state.heading * sign;

            // Step 1: nearest edge the ray leaves the face through
            let edge_hit = face
                .edges()
                .filter_map(|(i, start, _)| {
                    let out = face.edge_out_normal(i);
                    ray_exit_distance(&state.position, &direction, &start, &out, params.epsilon)
                        .map(|t| (i, t))
                })
                .min_by(|a, b| a.1.total_cmp(&b.1));

            // Step 2: a vertex passed close by before that edge ends the walk
            let vertex_hit = face
                .vertices
                .iter()
                .filter_map(|v| ray_point_approach(&state.position, &direction, v))
                .filter(|hit| {
                    hit.distance < params.vertex_threshold
                        && hit.t < remaining
                        && edge_hit.map_or(true, |(_, t)| hit.t <= t + params.epsilon)
                })
                .min_by(|a, b| a.t.total_cmp(&b.t));
            if let Some(hit) = vertex_hit {
                state.position = hit.point;
                points.push(self.emit(face, &state.position));
                debug!(face = face.index, "turtle reached a vertex");
                return Walk::ReachedVertex;
            }

            // Step 3: stay on this face if the edge is out of reach
            let Some((edge, t)) = edge_hit.filter(|&(_, t)| t < remaining + params.epsilon) else {
                state.position += direction * remaining;
                points.push(self.emit(face, &state.position));
                return Walk::Completed;
            };

            // Step 4: advance to the edge and cross it
            let edge_point = state.position + direction * t;
            let point_index = points.len();
            points.push(self.emit(face, &edge_point));
            remaining -= t;

            let (a, b) = face.edge(edge);
            let Some(next) = find_neighbor(
                self.definition.faces(),
                face.index,
                &a,
                &b,
                params.neighbor_tolerance,
            ) else {
                warn!(face = face.index, edge, "no face across edge, motion stopped");
                return Walk::Truncated;
            };

            let axis = (b - a).normalize();
            state.heading = fold_across(&state.heading, &axis, &face.normal, &next.normal);
            state.position = edge_point + inward(&axis, next, &edge_point) * params.edge_nudge;
            state.face = next.index;
            points.push(self.emit(next, &state.position));

            debug!(from = face.index, to = next.index, edge, "turtle crossed an edge");
            crossings.push(EdgeCrossing {
                from_face: face.index,
                to_face: next.index,
                edge,
                edge_vertices: (a, b),
                crossing_point: edge_point,
                segment_index,
                point_index,
            });
        }

        if remaining <= params.epsilon {
            Walk::Completed
        } else {
            warn!(
                limit = params.max_iterations,
                remaining, "iteration cap reached, motion stopped"
            );
            Walk::Truncated
        }
    }
}

/// Rotates `heading` about the shared edge by the angle between the two
/// face normals, carrying it from the old face's plane into the new one.
fn fold_across(heading: &Vector3, axis: &Vector3, from: &Vector3, to: &Vector3) -> Vector3 {
    let mut angle = from.angle(to);
    if from.cross(to).dot(axis) < 0.0 {
        angle = -angle;
    }
    let rotated = axis_angle(axis, angle) * heading;
    // Drop any drift off the new plane.
    let tangent = rotated - to * rotated.dot(to);
    tangent.try_normalize(f64::EPSILON).unwrap_or(rotated)
}

/// Unit in-plane direction of `face`, perpendicular to the edge, pointing
/// from `edge_point` into the face.
fn inward(axis: &Vector3, face: &Face, edge_point: &Point3) -> Vector3 {
    let across = face.normal.cross(axis);
    if across.dot(&(face.center - edge_point)) < 0.0 {
        -across
    } else {
        across
    }
}

fn flush(segments: &mut Vec<PathSegment>, current: &mut Vec<Point3>) {
    let points = std::mem::take(current);
    if points.len() >= 2 {
        segments.push(PathSegment::new(points));
    }
}
