use crate::math::polygon_3d::{centroid, orient_ccw};
use crate::math::{Point3, Vector3};

/// A planar polygonal face of a polyhedron, in the polyhedron's local space.
///
/// Vertices run counter-clockwise when viewed from outside, so
/// `vertices[i] -> vertices[(i + 1) % n]` is edge `i` and `(edge × normal)`
/// points out of the face.
#[derive(Debug, Clone, PartialEq)]
pub struct Face {
    /// 1-based face number, stable for a given shape.
    pub index: usize,
    /// Centroid of the vertices.
    pub center: Point3,
    /// Outward unit normal.
    pub normal: Vector3,
    /// Boundary vertices, counter-clockwise from outside.
    pub vertices: Vec<Point3>,
}

impl Face {
    /// Creates a face, fixing the winding to be counter-clockwise about
    /// `normal`.
    #[must_use]
    pub fn new(index: usize, vertices: Vec<Point3>, normal: Vector3) -> Self {
        let normal = normal.normalize();
        let vertices = orient_ccw(vertices, &normal);
        Self {
            index,
            center: centroid(&vertices),
            normal,
            vertices,
        }
    }

    /// Number of boundary vertices (and edges).
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Endpoints of edge `i`, wrapping around the boundary.
    #[must_use]
    pub fn edge(&self, i: usize) -> (Point3, Point3) {
        let n = self.vertices.len();
        (self.vertices[i % n], self.vertices[(i + 1) % n])
    }

    /// Iterates `(edge_index, start, end)` over the boundary.
    pub fn edges(&self) -> impl Iterator<Item = (usize, Point3, Point3)> + '_ {
        (0..self.vertices.len()).map(move |i| {
            let (a, b) = self.edge(i);
            (i, a, b)
        })
    }

    /// Midpoint of edge `i`.
    #[must_use]
    pub fn edge_midpoint(&self, i: usize) -> Point3 {
        let (a, b) = self.edge(i);
        nalgebra::center(&a, &b)
    }

    /// In-plane unit normal of edge `i`, pointing out of the face.
    #[must_use]
    pub fn edge_out_normal(&self, i: usize) -> Vector3 {
        let (a, b) = self.edge(i);
        (b - a).cross(&self.normal).normalize()
    }

    /// Unit direction from the center toward the midpoint of the first edge.
    #[must_use]
    pub fn initial_heading(&self) -> Vector3 {
        (self.edge_midpoint(0) - self.center).normalize()
    }

    /// Index of the vertex within `tolerance` of `point`, if any.
    #[must_use]
    pub fn vertex_near(&self, point: &Point3, tolerance: f64) -> Option<usize> {
        self.vertices
            .iter()
            .position(|v| (v - point).norm() <= tolerance)
    }

    /// Whether the face has a vertex within `tolerance` of `point`.
    #[must_use]
    pub fn has_vertex_near(&self, point: &Point3, tolerance: f64) -> bool {
        self.vertex_near(point, tolerance).is_some()
    }

    /// Number of this face's vertices that coincide with a vertex of `other`.
    #[must_use]
    pub fn shared_vertex_count(&self, other: &Face, tolerance: f64) -> usize {
        self.vertices
            .iter()
            .filter(|v| other.has_vertex_near(v, tolerance))
            .count()
    }
}
