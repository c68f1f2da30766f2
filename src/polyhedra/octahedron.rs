use crate::error::ShapeError;
use crate::math::{Point3, Vector3};
use crate::topology::Face;

use super::{LatticeType, Metrics, MoveTable, Shape, ShapeId, Style};

const PALETTE: [u32; 2] = [0x2a_9d_8f, 0xe9_c4_6a];

/// Sign patterns of the eight octants, one face each. Face 1 is the
/// `(-, -, -)` octant.
const OCTANTS: [[f64; 3]; 8] = [
    [-1.0, -1.0, -1.0],
    [1.0, -1.0, -1.0],
    [1.0, -1.0, 1.0],
    [-1.0, -1.0, 1.0],
    [-1.0, 1.0, -1.0],
    [1.0, 1.0, -1.0],
    [1.0, 1.0, 1.0],
    [-1.0, 1.0, 1.0],
];

/// Regular octahedron with unit edges, vertices on the coordinate axes.
pub struct Octahedron;

impl Octahedron {
    fn radius() -> f64 {
        std::f64::consts::FRAC_1_SQRT_2
    }
}

impl Shape for Octahedron {
    fn id(&self) -> ShapeId {
        ShapeId::Octahedron
    }

    fn name(&self) -> &'static str {
        "Octahedron"
    }

    fn vertices(&self) -> Vec<Point3> {
        let r = Self::radius();
        vec![
            Point3::new(r, 0.0, 0.0),
            Point3::new(-r, 0.0, 0.0),
            Point3::new(0.0, r, 0.0),
            Point3::new(0.0, -r, 0.0),
            Point3::new(0.0, 0.0, r),
            Point3::new(0.0, 0.0, -r),
        ]
    }

    fn faces(&self) -> Result<Vec<Face>, ShapeError> {
        let r = Self::radius();
        Ok(OCTANTS
            .iter()
            .enumerate()
            .map(|(i, &[sx, sy, sz])| {
                let corners = vec![
                    Point3::new(sx * r, 0.0, 0.0),
                    Point3::new(0.0, sy * r, 0.0),
                    Point3::new(0.0, 0.0, sz * r),
                ];
                Face::new(i + 1, corners, Vector3::new(sx, sy, sz))
            })
            .collect())
    }

    fn face_count(&self) -> usize {
        8
    }

    fn metrics(&self) -> Metrics {
        Metrics {
            inradius: 1.0 / 6.0_f64.sqrt(),
            circumradius: Some(Self::radius()),
            dihedral_angle: (-1.0_f64 / 3.0).acos(),
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
            label_size: 0.25,
            vertex_radius: 0.03,
        }
    }
}
