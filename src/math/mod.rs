pub mod intersect_2d;
pub mod intersect_3d;
pub mod polygon_3d;

use std::f64::consts::TAU;

/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Unit-length 3D vector, used for rotation axes.
pub type UnitVector3 = nalgebra::Unit<Vector3>;

/// Rotation as a unit quaternion.
pub type UnitQuaternion = nalgebra::UnitQuaternion<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// The world up direction. The floor is the plane `y = 0`.
#[must_use]
pub fn up() -> Vector3 {
    Vector3::y()
}

/// Wraps an angle in radians into `[0, 2π)`.
#[must_use]
pub fn normalize_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs.
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Drops the vertical component of a vector.
#[must_use]
pub fn horizontal(v: &Vector3) -> Vector3 {
    Vector3::new(v.x, 0.0, v.z)
}

/// Rotation about `axis` by `angle` radians.
///
/// Returns the identity if the axis is degenerate.
#[must_use]
pub fn axis_angle(axis: &Vector3, angle: f64) -> UnitQuaternion {
    match UnitVector3::try_new(*axis, TOLERANCE) {
        Some(axis) => UnitQuaternion::from_axis_angle(&axis, angle),
        None => UnitQuaternion::identity(),
    }
}

/// Shortest rotation taking direction `from` onto direction `to`.
///
/// For opposite directions, rotates by π about any axis perpendicular to `from`.
#[must_use]
pub fn rotation_between(from: &Vector3, to: &Vector3) -> UnitQuaternion {
    if let Some(q) = UnitQuaternion::rotation_between(from, to) {
        return q;
    }
    let reference = if from.x.abs() < 0.9 {
        Vector3::x()
    } else {
        Vector3::z()
    };
    axis_angle(&from.cross(&reference), std::f64::consts::PI)
}
