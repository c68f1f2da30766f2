use crate::error::{Result, RollError};
use crate::math::{horizontal, up, Point3, Vector3};
use crate::polyhedra::{MoveData, PolyhedronDefinition};

use super::pose::{resting_face, Pose};

/// One edge the solid can currently tip over.
#[derive(Debug, Clone, PartialEq)]
pub struct RollTarget {
    /// Index of the edge within the ground face.
    pub edge: usize,
    /// 1-based index of the face that comes down after the roll.
    pub neighbor_face: usize,
    /// Horizontal unit rotation axis.
    pub axis: Vector3,
    /// Pivot: the midpoint of the edge, in world space.
    pub point: Point3,
    /// Center of the floor cell the solid lands on.
    pub target_center: Point3,
    /// `atan2(z, x)` of the direction from the solid toward the pivot.
    pub direction_angle: f64,
    /// Lattice move the roll performs.
    pub move_data: MoveData,
    /// Floor footprint of the landing face.
    pub zone_vertices: Vec<Point3>,
}

impl RollTarget {
    /// The pose after carrying out this roll.
    #[must_use]
    pub fn apply(&self, pose: &Pose, roll_angle: f64) -> Pose {
        pose.rolled(&self.axis, &self.point, roll_angle)
    }
}

/// Finds every edge of the ground face and how rolling over it moves the
/// solid.
pub struct RollTargets<'a> {
    definition: &'a PolyhedronDefinition,
    pose: Pose,
}

impl<'a> RollTargets<'a> {
    /// Creates a new `RollTargets` query.
    #[must_use]
    pub fn new(definition: &'a PolyhedronDefinition, pose: Pose) -> Self {
        Self { definition, pose }
    }

    /// Executes the query, returning one target per ground edge in the
    /// ground face's edge order.
    ///
    /// # Errors
    ///
    /// Returns an error if the ground face is missing, has an edge with no
    /// neighbor, or its vertex count disagrees with the definition's bottom
    /// vertex count.
    pub fn execute(&self) -> Result<Vec<RollTarget>> {
        let def = self.definition;
        let ground_index = resting_face(def, &self.pose);
        let ground = def
            .face(ground_index)
            .ok_or(RollError::FaceNotFound(ground_index))?;
        if ground.vertex_count() != def.bottom_vertex_count() {
            return Err(RollError::GroundPolygon {
                expected: def.bottom_vertex_count(),
                found: ground.vertex_count(),
            }
            .into());
        }

        let floor_center = self.pose.floor_center();
        let roll_angle = def.metrics.roll_angle();

        let mut targets = Vec::with_capacity(ground.vertex_count());
        for (edge, start, end) in ground.edges() {
            let pivot = nalgebra::center(
                &self.pose.transform_point(&start),
                &self.pose.transform_point(&end),
            );
            let to_pivot = horizontal(&(pivot - floor_center));
            let axis = up().cross(&to_pivot.normalize());
            let direction_angle = to_pivot.z.atan2(to_pivot.x);

            let neighbor = def
                .adjacency()
                .neighbor(ground.index, edge)
                .ok_or(RollError::OpenEdge {
                    face: ground.index,
                    edge,
                })?;
            let landed = self.pose.rolled(&axis, &pivot, roll_angle);
            let zone_vertices = def
                .face(neighbor.face)
                .ok_or(RollError::FaceNotFound(neighbor.face))?
                .vertices
                .iter()
                .map(|v| {
                    let world = landed.transform_point(v);
                    Point3::new(world.x, 0.0, world.z)
                })
                .collect();

            targets.push(RollTarget {
                edge,
                neighbor_face: neighbor.face,
                axis,
                point: pivot,
                target_center: floor_center + to_pivot * 2.0,
                direction_angle,
                move_data: def.move_data(direction_angle),
                zone_vertices,
            });
        }
        Ok(targets)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::math::polygon_3d::centroid;
    use crate::polyhedra::{get_polyhedron, DoublyCovered, LatticeDelta, LatticeType, ShapeId};

    #[test]
    fn one_target_per_ground_edge() {
        for id in ShapeId::ALL {
            let def = get_polyhedron(id).unwrap();
            let targets = RollTargets::new(def, Pose::initial(def)).execute().unwrap();
            assert_eq!(targets.len(), def.bottom_vertex_count(), "{id}");
            for t in &targets {
                assert!(t.axis.dot(&up()).abs() < 1e-12);
                assert_relative_eq!(t.axis.norm(), 1.0, epsilon = 1e-12);
                assert!(t.point.y.abs() < 1e-9);
            }
        }
    }

    #[test]
    fn rolling_lands_the_neighbor_face() {
        for id in ShapeId::ALL {
            let def = get_polyhedron(id).unwrap();
            let pose = Pose::initial(def);
            for t in RollTargets::new(def, pose).execute().unwrap() {
                let landed = t.apply(&pose, def.metrics.roll_angle());
                assert_eq!(resting_face(def, &landed), t.neighbor_face, "{id}");
                let face = def.face(t.neighbor_face).unwrap();
                for v in &face.vertices {
                    assert!(landed.transform_point(v).y.abs() < 1e-9, "{id}");
                }
                assert_relative_eq!(landed.floor_center(), t.target_center, epsilon = 1e-9);
                assert_relative_eq!(centroid(&t.zone_vertices), t.target_center, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn target_cells_follow_lattice_moves() {
        for id in ShapeId::ALL {
            let def = get_polyhedron(id).unwrap();
            if def.lattice_type == LatticeType::None {
                continue;
            }
            let pose = Pose::initial(def);
            for t in RollTargets::new(def, pose).execute().unwrap() {
                let expected = pose.floor_center() + def.move_displacement(&t.move_data);
                assert_relative_eq!(t.target_center, expected, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn cube_rolls_in_four_axis_directions() {
        let cube = get_polyhedron(ShapeId::Cube).unwrap();
        let targets = RollTargets::new(cube, Pose::initial(cube)).execute().unwrap();
        let mut labels: Vec<&str> = targets.iter().map(|t| t.move_data.label).collect();
        labels.sort_unstable();
        assert_eq!(labels, ["+X", "+Z", "-X", "-Z"]);
        let east = targets.iter().find(|t| t.move_data.label == "+X").unwrap();
        assert_relative_eq!(east.target_center, Point3::new(1.0, 0.0, 0.0), epsilon = 1e-12);
        assert_eq!(east.neighbor_face, 2);
    }

    /// Rolls repeatedly over the target whose move matches `label`.
    fn roll_by_label(id: ShapeId, labels: &[&str]) -> (Pose, LatticeDelta) {
        let def = get_polyhedron(id).unwrap();
        let mut pose = Pose::initial(def);
        let mut total = LatticeDelta::default();
        for label in labels {
            let targets = RollTargets::new(def, pose).execute().unwrap();
            let t = targets.iter().find(|t| t.move_data.label == *label).unwrap();
            total = total + t.move_data.delta;
            pose = t.apply(&pose, def.metrics.roll_angle());
        }
        (pose, total)
    }

    #[test]
    fn cube_square_loop_returns_home() {
        let (pose, total) = roll_by_label(ShapeId::Cube, &["+X", "+Z", "-X", "-Z"]);
        assert_eq!(total, LatticeDelta::default());
        assert_relative_eq!(pose.floor_center(), Point3::origin(), epsilon = 1e-9);
    }

    #[test]
    fn rolling_back_and_forth_restores_the_pose() {
        for id in ShapeId::ALL {
            let def = get_polyhedron(id).unwrap();
            let start = Pose::initial(def);
            let first = RollTargets::new(def, start).execute().unwrap().remove(0);
            let there = first.apply(&start, def.metrics.roll_angle());
            // Roll back over the same edge.
            let back = RollTargets::new(def, there)
                .execute()
                .unwrap()
                .into_iter()
                .find(|t| (t.point - first.point).norm() < 1e-9)
                .unwrap();
            assert_eq!(back.neighbor_face, 1);
            assert_eq!(back.move_data.delta, -first.move_data.delta);
            let home = back.apply(&there, def.metrics.roll_angle());
            assert_relative_eq!(home.position, start.position, epsilon = 1e-9);
            assert!(home.quaternion.angle_to(&start.quaternion) < 1e-9);
        }
    }

    /// Outcome of rolling a solid around one of its floor vertices.
    struct VertexCircle {
        start: Pose,
        end: Pose,
        total: LatticeDelta,
        cells: Vec<Point3>,
    }

    /// Rolls `rolls` times, always pivoting on an edge through the first
    /// corner of the initial ground face's first edge and never on the edge
    /// just rolled over.
    fn circle_floor_vertex(def: &PolyhedronDefinition, rolls: usize) -> VertexCircle {
        let start = Pose::initial(def);
        let first = RollTargets::new(def, start).execute().unwrap().remove(0);
        let ground = def.face(resting_face(def, &start)).unwrap();
        let corner = start.transform_point(&ground.edge(first.edge).0);

        let mut pose = first.apply(&start, def.metrics.roll_angle());
        let mut previous = first.point;
        let mut total = first.move_data.delta;
        let mut cells = vec![first.target_center];
        for _ in 1..rolls {
            let ground = def.face(resting_face(def, &pose)).unwrap();
            let next = RollTargets::new(def, pose)
                .execute()
                .unwrap()
                .into_iter()
                .find(|t| {
                    let (a, b) = ground.edge(t.edge);
                    let touches = (pose.transform_point(&a) - corner).norm() < 1e-9
                        || (pose.transform_point(&b) - corner).norm() < 1e-9;
                    touches && (t.point - previous).norm() > 1e-9
                })
                .unwrap();
            previous = next.point;
            total = total + next.move_data.delta;
            cells.push(next.target_center);
            pose = next.apply(&pose, def.metrics.roll_angle());
        }
        VertexCircle {
            start,
            end: pose,
            total,
            cells,
        }
    }

    fn assert_same_pose(a: &Pose, b: &Pose) {
        assert_relative_eq!(a.position, b.position, epsilon = 1e-9);
        assert!(a.quaternion.angle_to(&b.quaternion) < 1e-9);
    }

    #[test]
    fn octahedron_circles_a_floor_vertex() {
        // Six rolls visit the six triangles around the vertex and come back
        // to the starting cell.
        let def = get_polyhedron(ShapeId::Octahedron).unwrap();
        let circle = circle_floor_vertex(def, 6);
        assert_eq!(circle.total, LatticeDelta::default());
        assert_relative_eq!(circle.end.floor_center(), circle.start.floor_center(), epsilon = 1e-9);
        for (i, a) in circle.cells.iter().enumerate() {
            for b in &circle.cells[i + 1..] {
                assert!((a - b).norm() > 1e-6);
            }
        }
    }

    #[test]
    fn lattice_loops_around_a_vertex_return_home() {
        // Each roll turns the footprint about the vertex by the face's
        // corner angle, so a full turn takes 360° / corner rolls.
        for (id, rolls) in [
            (ShapeId::Cube, 4),
            (ShapeId::Tetrahedron, 6),
            (ShapeId::Icosahedron, 6),
            (ShapeId::DoublyCoveredTriangle, 6),
            (ShapeId::DoublyCoveredSquare, 4),
            (ShapeId::DoublyCoveredHexagon, 3),
        ] {
            let def = get_polyhedron(id).unwrap();
            let circle = circle_floor_vertex(def, rolls);
            assert_eq!(circle.total, LatticeDelta::default(), "{id}");
            assert_relative_eq!(circle.end.floor_center(), circle.start.floor_center(), epsilon = 1e-9);
        }
    }

    #[test]
    fn loops_through_every_face_at_the_vertex_restore_the_pose() {
        // The roll count is also a multiple of the number of faces meeting
        // at the vertex, so face 1 is back down with the vertex in place.
        for (id, rolls) in [
            (ShapeId::Tetrahedron, 6),
            (ShapeId::DoublyCoveredTriangle, 6),
            (ShapeId::DoublyCoveredSquare, 4),
            (ShapeId::DoublyCoveredHexagon, 6),
        ] {
            let def = get_polyhedron(id).unwrap();
            let circle = circle_floor_vertex(def, rolls);
            assert_eq!(resting_face(def, &circle.end), 1, "{id}");
            assert_same_pose(&circle.end, &circle.start);
        }
    }

    #[test]
    fn dodecahedron_footprint_returns_after_ten_rolls() {
        // 108° per roll: ten rolls make three full turns about the vertex.
        let def = get_polyhedron(ShapeId::Dodecahedron).unwrap();
        let circle = circle_floor_vertex(def, 10);
        assert_eq!(circle.total, LatticeDelta::default());
        assert_relative_eq!(circle.end.floor_center(), circle.start.floor_center(), epsilon = 1e-9);
        // Five rolls only make a half turn.
        let half = circle_floor_vertex(def, 5);
        assert!((half.end.floor_center() - half.start.floor_center()).norm() > 0.1);
    }

    #[test]
    fn doubly_covered_pentagon_flips_over_every_edge() {
        let pentagon = DoublyCovered::new(ShapeId::DoublyCoveredSquare, 5);
        let def = PolyhedronDefinition::build(&pentagon).unwrap();
        let start = Pose::initial(&def);
        let targets = RollTargets::new(&def, start).execute().unwrap();
        assert_eq!(targets.len(), 5);
        let mut sectors: Vec<usize> = targets.iter().map(|t| t.move_data.sector).collect();
        sectors.sort_unstable();
        assert_eq!(sectors, [0, 2, 4, 6, 8]);
        for t in &targets {
            let landed = t.apply(&start, def.metrics.roll_angle());
            assert_eq!(resting_face(&def, &landed), 2);
            assert_relative_eq!(landed.floor_center(), t.target_center, epsilon = 1e-9);
        }

        // After a flip the edges point half a sector over.
        let flipped = targets[0].apply(&start, def.metrics.roll_angle());
        let back = RollTargets::new(&def, flipped).execute().unwrap();
        assert!(back.iter().all(|t| t.move_data.sector % 2 == 1));
    }
}
