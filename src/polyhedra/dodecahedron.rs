use std::collections::BTreeSet;

use crate::error::ShapeError;
use crate::math::polygon_3d::{centroid, is_coplanar, newell_normal};
use crate::math::Point3;
use crate::topology::Face;

use super::{LatticeType, Metrics, MoveTable, Shape, ShapeId, Style};

const FACE_COUNT: usize = 12;
const FACE_SIDES: usize = 5;

/// Relative tolerance for edge-length and coplanarity tests.
const DISCOVERY_TOLERANCE: f64 = 1e-6;

const PALETTE: [u32; 4] = [0x26_46_53, 0x2a_9d_8f, 0xe9_c4_6a, 0xe7_6f_51];

/// Regular dodecahedron with unit edges.
///
/// Only the twenty vertices are given; the pentagons are recovered from
/// them by [`discover_faces`].
pub struct Dodecahedron;

fn golden_ratio() -> f64 {
    (1.0 + 5.0_f64.sqrt()) / 2.0
}

/// Finds the faces of a convex solid with `sides`-gon faces from its
/// vertices alone.
///
/// Vertices exactly `edge_length` apart (within tolerance) are joined; every
/// simple cycle of `sides` vertices that is planar becomes a face. Cycles
/// that differ only by starting vertex or direction are kept once. Each face
/// is returned as vertex indices wound counter-clockwise seen from outside,
/// taking outside as away from the origin.
#[must_use]
pub fn discover_faces(vertices: &[Point3], edge_length: f64, sides: usize) -> Vec<Vec<usize>> {
    let tolerance = edge_length * DISCOVERY_TOLERANCE;
    let graph: Vec<Vec<usize>> = vertices
        .iter()
        .enumerate()
        .map(|(i, a)| {
            vertices
                .iter()
                .enumerate()
                .filter(|&(j, b)| j != i && ((b - a).norm() - edge_length).abs() <= tolerance)
                .map(|(j, _)| j)
                .collect()
        })
        .collect();

    let mut seen = BTreeSet::new();
    let mut faces = Vec::new();
    for start in 0..vertices.len() {
        let mut cycles = Vec::new();
        let mut path = vec![start];
        extend_cycles(&graph, sides, &mut path, &mut cycles);
        for cycle in cycles {
            let points: Vec<Point3> = cycle.iter().map(|&i| vertices[i]).collect();
            if !is_coplanar(&points, tolerance) {
                continue;
            }
            let mut key = cycle.clone();
            key.sort_unstable();
            if seen.insert(key) {
                faces.push(wind_outward(cycle, vertices));
            }
        }
    }
    faces
}

/// Depth-first search for simple cycles through `path[0]` whose other
/// vertices all have larger indices.
fn extend_cycles(graph: &[Vec<usize>], sides: usize, path: &mut Vec<usize>, out: &mut Vec<Vec<usize>>) {
    let start = path[0];
    let Some(&last) = path.last() else {
        return;
    };
    if path.len() == sides {
        if graph[last].contains(&start) {
            out.push(path.clone());
        }
        return;
    }
    for &next in &graph[last] {
        if next > start && !path.contains(&next) {
            path.push(next);
            extend_cycles(graph, sides, path, out);
            path.pop();
        }
    }
}

fn wind_outward(mut cycle: Vec<usize>, vertices: &[Point3]) -> Vec<usize> {
    let points: Vec<Point3> = cycle.iter().map(|&i| vertices[i]).collect();
    if newell_normal(&points).dot(&centroid(&points).coords) < 0.0 {
        cycle[1..].reverse();
    }
    cycle
}

impl Shape for Dodecahedron {
    fn id(&self) -> ShapeId {
        ShapeId::Dodecahedron
    }

    fn name(&self) -> &'static str {
        "Dodecahedron"
    }

    fn vertices(&self) -> Vec<Point3> {
        let phi = golden_ratio();
        // The raw coordinates have edge 2/φ.
        let s = phi / 2.0;
        let (a, b, c) = (s, s / phi, s * phi);
        let mut vertices = Vec::with_capacity(20);
        for x in [-a, a] {
            for y in [-a, a] {
                for z in [-a, a] {
                    vertices.push(Point3::new(x, y, z));
                }
            }
        }
        for p in [-b, b] {
            for q in [-c, c] {
                vertices.push(Point3::new(0.0, p, q));
                vertices.push(Point3::new(p, q, 0.0));
                vertices.push(Point3::new(q, 0.0, p));
            }
        }
        vertices
    }

    fn faces(&self) -> Result<Vec<Face>, ShapeError> {
        let vertices = self.vertices();
        let cycles = discover_faces(&vertices, self.metrics().edge_length, FACE_SIDES);
        if cycles.len() != FACE_COUNT {
            return Err(ShapeError::FaceDiscovery {
                expected: FACE_COUNT,
                found: cycles.len(),
            });
        }
        Ok(cycles
            .iter()
            .enumerate()
            .map(|(i, cycle)| {
                let corners: Vec<Point3> = cycle.iter().map(|&v| vertices[v]).collect();
                let normal = centroid(&corners).coords.normalize();
                Face::new(i + 1, corners, normal)
            })
            .collect())
    }

    fn face_count(&self) -> usize {
        FACE_COUNT
    }

    fn metrics(&self) -> Metrics {
        let sqrt5 = 5.0_f64.sqrt();
        Metrics {
            inradius: 0.5 * (2.5 + 11.0 / (2.0 * sqrt5)).sqrt(),
            circumradius: Some(3.0_f64.sqrt() * golden_ratio() / 2.0),
            dihedral_angle: (-1.0 / sqrt5).acos(),
            edge_length: 1.0,
        }
    }

    fn bottom_vertex_count(&self) -> usize {
        FACE_SIDES
    }

    fn lattice_type(&self) -> LatticeType {
        LatticeType::None
    }

    fn move_table(&self) -> MoveTable {
        MoveTable::numbered(2 * FACE_SIDES)
    }

    fn orientation_labels(&self) -> &'static [&'static str] {
        &["A", "B", "C", "D", "E"]
    }

    fn color_count(&self) -> usize {
        PALETTE.len()
    }

    fn style(&self) -> Style {
        Style {
            palette: &PALETTE,
            label_size: 0.3,
            vertex_radius: 0.03,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::topology::color_faces;

    #[test]
    fn vertices_have_three_neighbors_at_unit_distance() {
        let vertices = Dodecahedron.vertices();
        assert_eq!(vertices.len(), 20);
        for a in &vertices {
            let n = vertices
                .iter()
                .filter(|b| ((*b - a).norm() - 1.0).abs() < 1e-9)
                .count();
            assert_eq!(n, 3);
        }
    }

    #[test]
    fn discovers_twelve_unique_pentagons() {
        let vertices = Dodecahedron.vertices();
        let faces = discover_faces(&vertices, 1.0, 5);
        assert_eq!(faces.len(), 12);
        let keys: BTreeSet<Vec<usize>> = faces
            .iter()
            .map(|f| {
                let mut k = f.clone();
                k.sort_unstable();
                k
            })
            .collect();
        assert_eq!(keys.len(), 12);
        // Every vertex sits on exactly three faces.
        for v in 0..20 {
            assert_eq!(faces.iter().filter(|f| f.contains(&v)).count(), 3);
        }
    }

    #[test]
    fn discovered_faces_wind_outward() {
        let vertices = Dodecahedron.vertices();
        for face in discover_faces(&vertices, 1.0, 5) {
            let v0 = vertices[face[0]];
            let normal = (vertices[face[1]] - v0).cross(&(vertices[face[2]] - v0));
            assert!(normal.dot(&v0.coords) > 0.0);
        }
    }

    #[test]
    fn wrong_edge_length_finds_nothing() {
        let vertices = Dodecahedron.vertices();
        assert!(discover_faces(&vertices, 0.7, 5).is_empty());
    }

    #[test]
    fn four_coloring_succeeds() {
        let faces = Dodecahedron.faces().unwrap();
        let colors = color_faces(&faces, 4, 1e-6).unwrap();
        assert_eq!(colors.len(), 12);
        assert!(colors.iter().all(|&c| c < 4));
    }

    #[test]
    fn three_colors_are_not_enough() {
        let faces = Dodecahedron.faces().unwrap();
        assert!(color_faces(&faces, 3, 1e-6).is_err());
    }
}
