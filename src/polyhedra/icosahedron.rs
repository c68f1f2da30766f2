use crate::error::ShapeError;
use crate::math::polygon_3d::centroid;
use crate::math::Point3;
use crate::topology::Face;

use super::{LatticeType, Metrics, MoveTable, Shape, ShapeId, Style};

/// Triangles over the golden-rectangle vertices, five around vertex 0 first.
const FACE_INDICES: [[usize; 3]; 20] = [
    [0, 11, 5],
    [0, 5, 1],
    [0, 1, 7],
    [0, 7, 10],
    [0, 10, 11],
    [1, 5, 9],
    [5, 11, 4],
    [11, 10, 2],
    [10, 7, 6],
    [7, 1, 8],
    [3, 9, 4],
    [3, 4, 2],
    [3, 2, 6],
    [3, 6, 8],
    [3, 8, 9],
    [4, 9, 5],
    [2, 4, 11],
    [6, 2, 10],
    [8, 6, 7],
    [9, 8, 1],
];

const PALETTE: [u32; 3] = [0x8e_ca_e6, 0xff_b7_03, 0xd6_28_28];

/// Regular icosahedron with unit edges.
pub struct Icosahedron;

fn golden_ratio() -> f64 {
    (1.0 + 5.0_f64.sqrt()) / 2.0
}

impl Shape for Icosahedron {
    fn id(&self) -> ShapeId {
        ShapeId::Icosahedron
    }

    fn name(&self) -> &'static str {
        "Icosahedron"
    }

    fn vertices(&self) -> Vec<Point3> {
        // Golden rectangles have edge 2; halve everything for unit edges.
        let t = golden_ratio() / 2.0;
        let h = 0.5;
        vec![
            Point3::new(-h, t, 0.0),
            Point3::new(h, t, 0.0),
            Point3::new(-h, -t, 0.0),
            Point3::new(h, -t, 0.0),
            Point3::new(0.0, -h, t),
            Point3::new(0.0, h, t),
            Point3::new(0.0, -h, -t),
            Point3::new(0.0, h, -t),
            Point3::new(t, 0.0, -h),
            Point3::new(t, 0.0, h),
            Point3::new(-t, 0.0, -h),
            Point3::new(-t, 0.0, h),
        ]
    }

    fn face_indices(&self) -> Option<Vec<Vec<usize>>> {
        Some(FACE_INDICES.iter().map(|f| f.to_vec()).collect())
    }

    fn faces(&self) -> Result<Vec<Face>, ShapeError> {
        let vertices = self.vertices();
        Ok(FACE_INDICES
            .iter()
            .enumerate()
            .map(|(i, tri)| {
                let corners: Vec<Point3> = tri.iter().map(|&v| vertices[v]).collect();
                let normal = centroid(&corners).coords.normalize();
                Face::new(i + 1, corners, normal)
            })
            .collect())
    }

    fn face_count(&self) -> usize {
        20
    }

    fn metrics(&self) -> Metrics {
        let phi = golden_ratio();
        Metrics {
            inradius: phi * phi / (2.0 * 3.0_f64.sqrt()),
            circumradius: Some((1.0 + phi * phi).sqrt() / 2.0),
            dihedral_angle: (-5.0_f64.sqrt() / 3.0).acos(),
            edge_length: 1.0,
        }
    }

    fn bottom_vertex_count(&self) -> usize {
        3
    }

    fn lattice_type(&self) -> LatticeType {
        LatticeType::Triangular
    }

    fn move_table(&self) -> MoveTable {
        MoveTable::axial()
    }

    fn orientation_labels(&self) -> &'static [&'static str] {
        &["X", "Y", "Z"]
    }

    fn color_count(&self) -> usize {
        PALETTE.len()
    }

    fn style(&self) -> Style {
        Style {
            palette: &PALETTE,
            label_size: 0.2,
            vertex_radius: 0.025,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn vertices_lie_on_circumsphere() {
        let r = Icosahedron.metrics().circumradius.unwrap();
        for v in Icosahedron.vertices() {
            assert!((v.coords.norm() - r).abs() < 1e-12);
        }
    }

    #[test]
    fn every_vertex_has_five_faces() {
        let faces = Icosahedron.faces().unwrap();
        for v in Icosahedron.vertices() {
            let count = faces.iter().filter(|f| f.has_vertex_near(&v, 1e-9)).count();
            assert_eq!(count, 5);
        }
    }
}
