use tracing::warn;

use crate::math::{axis_angle, up, Point3};
use crate::operations::roll::Pose;
use crate::polyhedra::PolyhedronDefinition;

use super::command::{CommandKind, TurtleCommand};
use super::{PathParams, PathSegment};

/// Draws a turtle script on the floor under a solid in its resting pose.
///
/// The turtle starts where [`GeneratePath`](super::GeneratePath) would put
/// it on face 1, seen in world space, and never leaves the floor plane. The
/// result is the unrolled counterpart of the surface path.
pub struct GenerateFlatPath<'a> {
    definition: &'a PolyhedronDefinition,
    commands: &'a [TurtleCommand],
    params: PathParams,
}

impl<'a> GenerateFlatPath<'a> {
    /// Creates a new `GenerateFlatPath` operation with default parameters.
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

    /// Runs the script, returning world-space segments at floor height.
    #[must_use]
    pub fn execute(&self) -> Vec<PathSegment> {
        let Some(base) = self.definition.face(1) else {
            warn!(shape = %self.definition.id, "no face 1, nothing drawn");
            return Vec::new();
        };
        let pose = Pose::initial(self.definition);
        let origin = pose.transform_point(&base.center);
        let initial_heading = pose.transform_vector(&base.initial_heading());
        let right = initial_heading.cross(&-up()).normalize();
        let start = |x: f64, y: f64| (origin + initial_heading * x + right * y, initial_heading);

        let (mut position, mut heading) = start(0.0, 0.0);
        let mut segments = Vec::new();
        let mut current = vec![position];

        for command in self.commands {
            match command.kind {
                CommandKind::Start { x, y } => {
                    close(&mut segments, &mut current);
                    (position, heading) = start(x, y);
                    current.push(position);
                }
                CommandKind::TurnLeft(_) | CommandKind::TurnRight(_) => {
                    let angle = command.turn().unwrap_or_default();
                    heading = axis_angle(&-up(), angle) * heading;
                }
                CommandKind::Forward(_) | CommandKind::Backward(_) => {
                    let distance = command.distance().unwrap_or_default();
                    if distance.abs() > self.params.epsilon {
                        position += heading * distance;
                        current.push(position);
                    }
                }
            }
        }
        close(&mut segments, &mut current);
        segments
    }
}

fn close(segments: &mut Vec<PathSegment>, current: &mut Vec<Point3>) {
    let points = std::mem::take(current);
    if points.len() >= 2 {
        segments.push(PathSegment::new(points));
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::operations::turtle::{parse_commands, GeneratePath};
    use crate::polyhedra::{get_polyhedron, ShapeId};

    /// Unit direction of each step, skipping zero-length steps.
    fn step_directions(points: &[Point3]) -> Vec<crate::math::Vector3> {
        points
            .windows(2)
            .filter_map(|w| (w[1] - w[0]).try_normalize(1e-9))
            .collect()
    }

    fn flat(shape: ShapeId, script: &str) -> Vec<PathSegment> {
        let def = get_polyhedron(shape).unwrap();
        GenerateFlatPath::new(def, &parse_commands(script)).execute()
    }

    fn surface(shape: ShapeId, script: &str) -> Vec<PathSegment> {
        let def = get_polyhedron(shape).unwrap();
        let params = PathParams {
            surface_offset: 0.0,
            edge_nudge: 0.0,
            ..PathParams::default()
        };
        GeneratePath::new(def, &parse_commands(script))
            .with_params(params)
            .execute()
            .segments
    }

    #[test]
    fn stays_on_the_floor() {
        for id in ShapeId::ALL {
            for segment in flat(id, "fd 0.7\nlt 120\nfd 2\nrt 33\nbk 1") {
                for point in &segment.points {
                    assert!(point.y.abs() < 1e-9, "{id}");
                }
            }
        }
    }

    #[test]
    fn cube_square_walk() {
        let segments = flat(ShapeId::Cube, "fd 1\nrt 90\nfd 1\nrt 90\nfd 1\nrt 90\nfd 1");
        let points = &segments[0].points;
        assert_eq!(points.len(), 5);
        assert_relative_eq!(points[1], Point3::new(1.0, 0.0, 0.0), epsilon = 1e-12);
        // Right of +X on the floor, seen from below, is -Z.
        assert_relative_eq!(points[2], Point3::new(1.0, 0.0, -1.0), epsilon = 1e-12);
        assert_relative_eq!(points[4], points[0], epsilon = 1e-12);
    }

    #[test]
    fn matches_surface_path_inside_face_one() {
        let script = "start 0.05 -0.1\nfd 0.2\nlt 60\nfd 0.2\nrt 150\nfd 0.1\nbk 0.05";
        for id in [ShapeId::Cube, ShapeId::Dodecahedron, ShapeId::DoublyCoveredHexagon] {
            let def = get_polyhedron(id).unwrap();
            let pose = Pose::initial(def);
            let on_floor = flat(id, script);
            let on_face = surface(id, script);
            assert_eq!(on_floor[0].points.len(), on_face[0].points.len(), "{id}");
            // Same points once the surface path is placed in world space.
            for (a, b) in on_floor[0].points.iter().zip(&on_face[0].points) {
                assert_relative_eq!(*a, pose.transform_point(b), epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn step_lengths_and_turns_match_surface_path() {
        let script = "start 0 0\nfd 0.3\nrt 90\nfd 0.8\nlt 30\nfd 1.2";
        let on_floor = flat(ShapeId::Cube, script);
        let on_face = surface(ShapeId::Cube, script);
        assert_relative_eq!(on_floor[0].length(), on_face[0].length(), epsilon = 1e-9);

        // Angles between consecutive floor steps are the scripted turns.
        let turns = |points: &[Point3]| -> Vec<f64> {
            step_directions(points)
                .windows(2)
                .map(|w| w[0].angle(&w[1]).to_degrees())
                .filter(|a| *a > 1e-6)
                .collect()
        };
        let floor_turns = turns(&on_floor[0].points);
        assert_eq!(floor_turns.len(), 2);
        assert_relative_eq!(floor_turns[0], 90.0, epsilon = 1e-9);
        assert_relative_eq!(floor_turns[1], 30.0, epsilon = 1e-9);
    }
}
