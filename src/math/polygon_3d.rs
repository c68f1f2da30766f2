use super::{Point3, Vector3, TOLERANCE};

/// Arithmetic mean of the polygon's vertices.
#[must_use]
pub fn centroid(polygon: &[Point3]) -> Point3 {
    if polygon.is_empty() {
        return Point3::origin();
    }
    let sum = polygon.iter().fold(Vector3::zeros(), |acc, p| acc + p.coords);
    #[allow(clippy::cast_precision_loss)]
    let n = polygon.len() as f64;
    Point3::from(sum / n)
}

/// Normal of a polygon by Newell's method (not normalized).
///
/// Its direction follows the right-hand rule over the vertex order.
#[must_use]
pub fn newell_normal(polygon: &[Point3]) -> Vector3 {
    let n = polygon.len();
    let mut normal = Vector3::zeros();
    for i in 0..n {
        let a = &polygon[i];
        let b = &polygon[(i + 1) % n];
        normal.x += (a.y - b.y) * (a.z + b.z);
        normal.y += (a.z - b.z) * (a.x + b.x);
        normal.z += (a.x - b.x) * (a.y + b.y);
    }
    normal
}

/// Winding sign of the first corner: `(v1 - v0) × (v2 - v0) · normal`.
///
/// Positive means counter-clockwise when viewed from the side `normal`
/// points to.
#[must_use]
pub fn winding_sign(polygon: &[Point3], normal: &Vector3) -> f64 {
    if polygon.len() < 3 {
        return 0.0;
    }
    (polygon[1] - polygon[0])
        .cross(&(polygon[2] - polygon[0]))
        .dot(normal)
}

/// Returns the polygon wound counter-clockwise about `normal`.
///
/// A clockwise polygon is reversed in place of its first vertex, so
/// `[a, b, c, d]` becomes `[a, d, c, b]`.
#[must_use]
pub fn orient_ccw(mut polygon: Vec<Point3>, normal: &Vector3) -> Vec<Point3> {
    if winding_sign(&polygon, normal) < 0.0 {
        polygon[1..].reverse();
    }
    polygon
}

/// Whether every point lies within `tolerance` of the plane through the
/// first three points.
///
/// Fewer than four points are trivially coplanar; collinear leading points
/// are not.
#[must_use]
pub fn is_coplanar(points: &[Point3], tolerance: f64) -> bool {
    if points.len() < 3 {
        return true;
    }
    let normal = (points[1] - points[0]).cross(&(points[2] - points[0]));
    let len = normal.norm();
    if len < TOLERANCE {
        return false;
    }
    let normal = normal / len;
    points[3..]
        .iter()
        .all(|p| (p - points[0]).dot(&normal).abs() <= tolerance)
}
