use tracing::debug;

use crate::error::{Result, RollError};
use crate::operations::turtle::EdgeCrossing;
use crate::polyhedra::{MoveData, PolyhedronDefinition};

use super::pose::{resting_face, Pose};
use super::targets::{RollTarget, RollTargets};

/// One discrete roll carried out while replaying a path.
#[derive(Debug, Clone, PartialEq)]
pub struct RollStep {
    /// Position of the crossing in the replayed list.
    pub crossing: usize,
    /// Target the solid rolled over.
    pub target: RollTarget,
    /// Pose once the roll has settled.
    pub pose: Pose,
    /// Face resting on the floor after the roll.
    pub resting_face: usize,
}

impl RollStep {
    #[must_use]
    pub fn move_data(&self) -> MoveData {
        self.target.move_data
    }
}

/// Turns the face crossings of a surface path into a sequence of rolls.
///
/// The solid starts with the crossing's `from_face` on the floor and tips
/// over the crossed edge for every crossing in order, so after the last
/// step the face the path ended on rests on the floor.
///
/// Every path segment begins with the turtle back on face 1, so the solid
/// returns to the start pose whenever the crossings move on to a new
/// segment.
pub struct ReplayRolls<'a> {
    definition: &'a PolyhedronDefinition,
    start: Pose,
    crossings: &'a [EdgeCrossing],
}

impl<'a> ReplayRolls<'a> {
    /// Creates a replay starting from the definition's initial pose.
    #[must_use]
    pub fn new(definition: &'a PolyhedronDefinition, crossings: &'a [EdgeCrossing]) -> Self {
        Self {
            definition,
            start: Pose::initial(definition),
            crossings,
        }
    }

    /// Starts the replay from `pose` instead of the initial pose.
    #[must_use]
    pub fn with_start(mut self, pose: Pose) -> Self {
        self.start = pose;
        self
    }

    /// Executes the replay.
    ///
    /// # Errors
    ///
    /// Returns [`RollError::RestingFaceMismatch`] if a crossing leaves a face
    /// that is not on the floor, or if a roll lands on a face other than the
    /// crossing's `to_face`. Returns [`RollError::NoMatchingEdge`] if the
    /// crossed edge is not one of the ground face's roll targets.
    pub fn execute(&self) -> Result<Vec<RollStep>> {
        let def = self.definition;
        let roll_angle = def.metrics.roll_angle();
        let mut pose = self.start;
        let mut segment = self.crossings.first().map(|c| c.segment_index);
        let mut steps = Vec::with_capacity(self.crossings.len());

        for (i, crossing) in self.crossings.iter().enumerate() {
            if segment != Some(crossing.segment_index) {
                debug!(segment = crossing.segment_index, "pen lifted, solid back at start");
                segment = Some(crossing.segment_index);
                pose = self.start;
            }
            let ground = resting_face(def, &pose);
            if ground != crossing.from_face {
                return Err(RollError::RestingFaceMismatch {
                    expected: crossing.from_face,
                    actual: ground,
                }
                .into());
            }

            let target = RollTargets::new(def, pose)
                .execute()?
                .into_iter()
                .find(|t| t.edge == crossing.edge && t.neighbor_face == crossing.to_face)
                .ok_or(RollError::NoMatchingEdge {
                    from: crossing.from_face,
                    to: crossing.to_face,
                })?;

            pose = target.apply(&pose, roll_angle);
            let landed = resting_face(def, &pose);
            if landed != crossing.to_face {
                return Err(RollError::RestingFaceMismatch {
                    expected: crossing.to_face,
                    actual: landed,
                }
                .into());
            }
            debug!(
                step = i,
                from = crossing.from_face,
                to = landed,
                label = target.move_data.label,
                "replayed roll"
            );
            steps.push(RollStep {
                crossing: i,
                target,
                pose,
                resting_face: landed,
            });
        }
        Ok(steps)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::error::PolyrollError;
    use crate::math::Point3;
    use crate::operations::turtle::{generate_path, parse_commands};
    use crate::polyhedra::{get_polyhedron, LatticeDelta, ShapeId};

    fn crossing(from_face: usize, to_face: usize, edge: usize) -> EdgeCrossing {
        EdgeCrossing {
            from_face,
            to_face,
            edge,
            edge_vertices: (Point3::origin(), Point3::origin()),
            crossing_point: Point3::origin(),
            segment_index: 0,
            point_index: 0,
        }
    }

    /// Crossings that roll the cube over each named edge in turn.
    fn cube_walk(labels: &[&str]) -> Vec<EdgeCrossing> {
        let cube = get_polyhedron(ShapeId::Cube).unwrap();
        let mut pose = Pose::initial(cube);
        let mut out = Vec::new();
        for label in labels {
            let from = resting_face(cube, &pose);
            let t = RollTargets::new(cube, pose)
                .execute()
                .unwrap()
                .into_iter()
                .find(|t| t.move_data.label == *label)
                .unwrap();
            out.push(crossing(from, t.neighbor_face, t.edge));
            pose = t.apply(&pose, cube.metrics.roll_angle());
        }
        out
    }

    #[test]
    fn replays_a_closed_loop() {
        let cube = get_polyhedron(ShapeId::Cube).unwrap();
        let crossings = cube_walk(&["+X", "+Z", "-X", "-Z"]);
        let steps = ReplayRolls::new(cube, &crossings).execute().unwrap();
        assert_eq!(steps.len(), 4);
        let labels: Vec<&str> = steps.iter().map(|s| s.move_data().label).collect();
        assert_eq!(labels, ["+X", "+Z", "-X", "-Z"]);
        let total: LatticeDelta = steps.iter().map(|s| s.move_data().delta).sum();
        assert_eq!(total, LatticeDelta::default());
        let last = steps.last().unwrap();
        assert_relative_eq!(last.pose.floor_center(), Point3::origin(), epsilon = 1e-9);
        assert_eq!(last.resting_face, crossings[3].to_face);
    }

    #[test]
    fn empty_replay_is_empty() {
        let cube = get_polyhedron(ShapeId::Cube).unwrap();
        assert!(ReplayRolls::new(cube, &[]).execute().unwrap().is_empty());
    }

    #[test]
    fn rejects_crossing_from_a_raised_face() {
        let cube = get_polyhedron(ShapeId::Cube).unwrap();
        let err = ReplayRolls::new(cube, &[crossing(6, 2, 0)]).execute().unwrap_err();
        assert!(matches!(
            err,
            PolyrollError::Roll(RollError::RestingFaceMismatch { expected: 6, actual: 1 })
        ));
    }

    #[test]
    fn rejects_unknown_edge() {
        let cube = get_polyhedron(ShapeId::Cube).unwrap();
        // Face 6 is opposite face 1 and never shares an edge with it.
        let err = ReplayRolls::new(cube, &[crossing(1, 6, 0)]).execute().unwrap_err();
        assert!(matches!(
            err,
            PolyrollError::Roll(RollError::NoMatchingEdge { from: 1, to: 6 })
        ));
    }

    #[test]
    fn each_segment_starts_from_the_initial_pose() {
        let cube = get_polyhedron(ShapeId::Cube).unwrap();
        let commands = parse_commands("start 0 0\nfd 0.8\nstart 0 0\nfd 0.8");
        let path = generate_path(ShapeId::Cube, &commands).unwrap();
        let segments: Vec<usize> = path.edge_rolls.iter().map(|c| c.segment_index).collect();
        assert_eq!(segments, [0, 1]);

        let steps = ReplayRolls::new(cube, &path.edge_rolls).execute().unwrap();
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].resting_face, steps[1].resting_face);
        assert_eq!(steps[0].move_data(), steps[1].move_data());
        assert_relative_eq!(steps[1].pose.position, steps[0].pose.position, epsilon = 1e-9);
    }

    #[test]
    fn segment_change_discards_the_previous_rolls() {
        let cube = get_polyhedron(ShapeId::Cube).unwrap();
        let mut crossings = cube_walk(&["+X", "+Z"]);
        let mut again = cube_walk(&["+X"]);
        again[0].segment_index = 1;
        crossings.append(&mut again);

        let steps = ReplayRolls::new(cube, &crossings).execute().unwrap();
        assert_eq!(steps.len(), 3);
        assert_eq!(steps[2].resting_face, steps[0].resting_face);
        assert_relative_eq!(steps[2].pose.floor_center(), Point3::new(1.0, 0.0, 0.0), epsilon = 1e-9);
    }

    #[test]
    fn doubly_covered_flips_back_and_forth() {
        let square = get_polyhedron(ShapeId::DoublyCoveredSquare).unwrap();
        let first = RollTargets::new(square, Pose::initial(square))
            .execute()
            .unwrap()
            .remove(0);
        let there = first.apply(&Pose::initial(square), square.metrics.roll_angle());
        let back = RollTargets::new(square, there)
            .execute()
            .unwrap()
            .into_iter()
            .find(|t| (t.point - first.point).norm() < 1e-9)
            .unwrap();
        let crossings = [crossing(1, 2, first.edge), crossing(2, 1, back.edge)];
        let steps = ReplayRolls::new(square, &crossings).execute().unwrap();
        assert_eq!(steps[0].resting_face, 2);
        assert_eq!(steps[1].resting_face, 1);
        assert_relative_eq!(steps[1].pose.position, Pose::initial(square).position, epsilon = 1e-9);
    }
}
