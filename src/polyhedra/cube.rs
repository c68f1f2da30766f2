use std::f64::consts::FRAC_PI_2;

use crate::error::ShapeError;
use crate::math::Point3;
use crate::topology::Face;

use super::{LatticeType, Metrics, MoveTable, Shape, ShapeId, Style};

const HALF: f64 = 0.5;

/// Faces as corner indices, numbered like a die: opposite faces sum to 7.
/// Face 1 is the `-Y` face and its first edge faces `+X`.
const FACE_INDICES: [[usize; 4]; 6] = [
    [1, 2, 3, 0], // -Y
    [1, 5, 6, 2], // +X
    [3, 2, 6, 7], // +Z
    [1, 0, 4, 5], // -Z
    [3, 7, 4, 0], // -X
    [6, 5, 4, 7], // +Y
];

const PALETTE: [u32; 3] = [0xe6_3946, 0x45_7b9d, 0xf1_fa_ee];

/// Unit cube centered on the origin.
pub struct Cube;

impl Shape for Cube {
    fn id(&self) -> ShapeId {
        ShapeId::Cube
    }

    fn name(&self) -> &'static str {
        "Cube"
    }

    fn vertices(&self) -> Vec<Point3> {
        let h = HALF;
        vec![
            Point3::new(-h, -h, -h),
            Point3::new(h, -h, -h),
            Point3::new(h, -h, h),
            Point3::new(-h, -h, h),
            Point3::new(-h, h, -h),
            Point3::new(h, h, -h),
            Point3::new(h, h, h),
            Point3::new(-h, h, h),
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
            .map(|(i, quad)| {
                let corners: Vec<Point3> = quad.iter().map(|&v| vertices[v]).collect();
                let center = crate::math::polygon_3d::centroid(&corners);
                Face::new(i + 1, corners, center.coords.normalize())
            })
            .collect())
    }

    fn face_count(&self) -> usize {
        6
    }

    fn metrics(&self) -> Metrics {
        Metrics {
            inradius: HALF,
            circumradius: Some(3.0_f64.sqrt() * HALF),
            dihedral_angle: FRAC_PI_2,
            edge_length: 2.0 * HALF,
        }
    }

    fn bottom_vertex_count(&self) -> usize {
        4
    }

    fn lattice_type(&self) -> LatticeType {
        LatticeType::Square
    }

    fn move_table(&self) -> MoveTable {
        MoveTable::square()
    }

    fn orientation_labels(&self) -> &'static [&'static str] {
        &["A", "B", "C", "D"]
    }

    fn color_count(&self) -> usize {
        PALETTE.len()
    }

    fn style(&self) -> Style {
        Style {
            palette: &PALETTE,
            label_size: 0.4,
            vertex_radius: 0.04,
        }
    }
}
