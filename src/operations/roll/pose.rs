use crate::math::{axis_angle, horizontal, normalize_angle, up, Point3, UnitQuaternion, Vector3};
use crate::polyhedra::PolyhedronDefinition;

/// Placement of a solid in world space.
///
/// Replaced wholesale after every completed roll.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub position: Point3,
    pub quaternion: UnitQuaternion,
}

impl Pose {
    #[must_use]
    pub fn new(position: Point3, quaternion: UnitQuaternion) -> Self {
        Self {
            position,
            quaternion,
        }
    }

    /// The resting pose with face 1 on the floor.
    #[must_use]
    pub fn initial(definition: &PolyhedronDefinition) -> Self {
        Self::new(definition.initial_position, definition.initial_quaternion)
    }

    /// Maps an object-space point into world space.
    #[must_use]
    pub fn transform_point(&self, point: &Point3) -> Point3 {
        self.position + self.quaternion * point.coords
    }

    /// Maps an object-space direction into world space.
    #[must_use]
    pub fn transform_vector(&self, vector: &Vector3) -> Vector3 {
        self.quaternion * vector
    }

    /// The pose after rotating by `angle` about the line through `pivot`
    /// along `axis`.
    ///
    /// Orientation becomes `q_rot * q` and position
    /// `pivot + q_rot * (position - pivot)`.
    #[must_use]
    pub fn rolled(&self, axis: &Vector3, pivot: &Point3, angle: f64) -> Self {
        let rotation = axis_angle(axis, angle);
        Self {
            position: pivot + rotation * (self.position - pivot),
            quaternion: rotation * self.quaternion,
        }
    }

    /// The solid's center projected onto the floor.
    #[must_use]
    pub fn floor_center(&self) -> Point3 {
        Point3::from(horizontal(&self.position.coords))
    }
}

/// Index of the face resting on the floor: the one whose world normal
/// points most nearly straight down.
///
/// Always recomputed from the pose, never tracked incrementally.
#[must_use]
pub fn resting_face(definition: &PolyhedronDefinition, pose: &Pose) -> usize {
    definition
        .faces()
        .iter()
        .map(|face| (face.index, pose.transform_vector(&face.normal).dot(&up())))
        .fold((1, f64::INFINITY), |best, (index, dot)| {
            if dot < best.1 {
                (index, dot)
            } else {
                best
            }
        })
        .0
}

/// Twist of the solid about the vertical: the direction of the resting
/// face's first edge, measured from the definition's sector 0 direction.
#[must_use]
pub fn orientation_twist(definition: &PolyhedronDefinition, pose: &Pose) -> f64 {
    let Some(face) = definition.face(resting_face(definition, pose)) else {
        return 0.0;
    };
    let to_edge = pose.transform_vector(&(face.edge_midpoint(0) - face.center));
    normalize_angle(to_edge.z.atan2(to_edge.x) - definition.sector_offset)
}

/// Orientation label of the pose's current twist.
#[must_use]
pub fn orientation_label_for_pose(definition: &PolyhedronDefinition, pose: &Pose) -> &'static str {
    definition.orientation_label(orientation_twist(definition, pose))
}

/// Quadratic ease-out: `t * (2 - t)`.
#[must_use]
pub fn ease_out_quad(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    t * (2.0 - t)
}

/// The pose a fraction `progress` of the way through a roll.
///
/// `progress` runs from 0 to 1 and is eased with [`ease_out_quad`]; at 1
/// the result equals `start.rolled(axis, pivot, angle)`.
#[must_use]
pub fn interpolate_roll(start: &Pose, axis: &Vector3, pivot: &Point3, angle: f64, progress: f64) -> Pose {
    start.rolled(axis, pivot, angle * ease_out_quad(progress))
}

/// Time-based sampling of a single roll.
#[derive(Debug, Clone, Copy)]
pub struct RollAnimation {
    /// Length of one roll in seconds.
    pub duration_secs: f64,
}

impl Default for RollAnimation {
    fn default() -> Self {
        Self { duration_secs: 0.5 }
    }
}

impl RollAnimation {
    /// Linear progress after `elapsed` seconds, clamped to `[0, 1]`.
    #[must_use]
    pub fn progress(&self, elapsed: f64) -> f64 {
        if self.duration_secs <= 0.0 {
            return 1.0;
        }
        (elapsed / self.duration_secs).clamp(0.0, 1.0)
    }

    #[must_use]
    pub fn is_finished(&self, elapsed: f64) -> bool {
        self.progress(elapsed) >= 1.0
    }

    /// Pose after `elapsed` seconds of a roll.
    #[must_use]
    pub fn sample(&self, start: &Pose, axis: &Vector3, pivot: &Point3, angle: f64, elapsed: f64) -> Pose {
        interpolate_roll(start, axis, pivot, angle, self.progress(elapsed))
    }
}
