use super::{Point3, Vector3, TOLERANCE};

/// Closest approach of a ray to a point.
#[derive(Debug, Clone, Copy)]
pub struct RayApproach {
    /// Distance along the ray to the closest point.
    pub t: f64,
    /// The closest point on the ray.
    pub point: Point3,
    /// Distance from the target to the closest point.
    pub distance: f64,
}

/// Finds where the ray `origin + t * dir` passes closest to `target`.
///
/// `dir` must be unit length. Returns `None` if the target lies behind the
/// ray origin.
#[must_use]
pub fn ray_point_approach(origin: &Point3, dir: &Vector3, target: &Point3) -> Option<RayApproach> {
    let t = (target - origin).dot(dir);
    if t < 0.0 {
        return None;
    }
    let point = origin + dir * t;
    Some(RayApproach {
        t,
        point,
        distance: (target - point).norm(),
    })
}

/// Distance along a ray to the plane through `plane_point` with normal
/// `out_normal`, counting only exits.
///
/// Returns `None` unless the ray heads outward through the plane
/// (`dir · out_normal > 0`) and the crossing lies ahead of `-slack`.
#[must_use]
pub fn ray_exit_distance(
    origin: &Point3,
    dir: &Vector3,
    plane_point: &Point3,
    out_normal: &Vector3,
    slack: f64,
) -> Option<f64> {
    let denom = dir.dot(out_normal);
    if denom <= TOLERANCE {
        return None;
    }
    let t = -(origin - plane_point).dot(out_normal) / denom;
    (t >= -slack).then_some(t.max(0.0))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    #[test]
    fn approach_to_point_beside_ray() {
        let hit = ray_point_approach(&p(0.0, 0.0, 0.0), &Vector3::x(), &p(2.0, 0.5, 0.0)).unwrap();
        assert!((hit.t - 2.0).abs() < TOLERANCE);
        assert!((hit.distance - 0.5).abs() < TOLERANCE);
    }

    #[test]
    fn point_behind_ray_is_ignored() {
        assert!(ray_point_approach(&p(0.0, 0.0, 0.0), &Vector3::x(), &p(-1.0, 0.0, 0.0)).is_none());
    }

    #[test]
    fn exit_through_plane_ahead() {
        let t = ray_exit_distance(&p(0.0, 0.0, 0.0), &Vector3::x(), &p(0.5, 0.0, 0.0), &Vector3::x(), 0.0);
        assert!((t.unwrap() - 0.5).abs() < TOLERANCE);
    }

    #[test]
    fn entering_plane_is_not_an_exit() {
        let t = ray_exit_distance(&p(0.0, 0.0, 0.0), &(-Vector3::x()), &p(0.5, 0.0, 0.0), &Vector3::x(), 0.0);
        assert!(t.is_none());
    }
}
