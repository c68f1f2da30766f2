use super::{Point3, TOLERANCE};

/// Parametric intersection of two segments projected onto the floor (XZ) plane.
///
/// Heights are ignored. Given segments `a0 -> a1` and `b0 -> b1`, returns
/// `(t, u)` such that `a0 + t * (a1 - a0)` and `b0 + u * (b1 - b0)` coincide
/// in projection, or `None` if the segments are parallel. The parameters are
/// not bounded; callers decide which range counts as a hit.
#[must_use]
pub fn segment_params_xz(a0: &Point3, a1: &Point3, b0: &Point3, b1: &Point3) -> Option<(f64, f64)> {
    let (dax, daz) = (a1.x - a0.x, a1.z - a0.z);
    let (dbx, dbz) = (b1.x - b0.x, b1.z - b0.z);

    let cross = dax * dbz - daz * dbx;
    if cross.abs() < TOLERANCE {
        return None;
    }

    let dx = b0.x - a0.x;
    let dz = b0.z - a0.z;
    let t = (dx * dbz - dz * dbx) / cross;
    let u = (dx * daz - dz * dax) / cross;
    Some((t, u))
}

/// Whether path step `a` reaches boundary segment `b` in the floor plane.
///
/// The boundary parameter must be strictly inside `(0, 1)`. The path
/// parameter may equal 1 (within `eps`) but not 0, so a point lying exactly
/// on the boundary is attributed to the step that arrives there and not to
/// the step that leaves.
#[must_use]
pub fn step_reaches_edge_xz(a0: &Point3, a1: &Point3, b0: &Point3, b1: &Point3, eps: f64) -> bool {
    segment_params_xz(a0, a1, b0, b1)
        .is_some_and(|(t, u)| t > eps && t <= 1.0 + eps && u > 0.0 && u < 1.0)
}
