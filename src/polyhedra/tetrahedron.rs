use crate::error::ShapeError;
use crate::math::Point3;
use crate::topology::Face;

use super::{LatticeType, Metrics, MoveTable, Shape, ShapeId, Style};

/// Each face omits one corner; face `i` lies opposite corner `i - 1`.
const FACE_INDICES: [[usize; 3]; 4] = [[1, 2, 3], [0, 3, 2], [0, 1, 3], [0, 2, 1]];

const PALETTE: [u32; 4] = [0xff_b7_03, 0x21_9e_bc, 0xfb_85_00, 0x02_30_47];

/// Regular tetrahedron with unit edges, inscribed in alternate cube corners.
pub struct Tetrahedron;

impl Tetrahedron {
    /// Scale taking the `(±1, ±1, ±1)` corners to unit edge length.
    fn scale() -> f64 {
        1.0 / (2.0 * 2.0_f64.sqrt())
    }
}

impl Shape for Tetrahedron {
    fn id(&self) -> ShapeId {
        ShapeId::Tetrahedron
    }

    fn name(&self) -> &'static str {
        "Tetrahedron"
    }

    fn vertices(&self) -> Vec<Point3> {
        let s = Self::scale();
        vec![
            Point3::new(s, s, s),
            Point3::new(s, -s, -s),
            Point3::new(-s, s, -s),
            Point3::new(-s, -s, s),
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
                Face::new(i + 1, corners, -vertices[i].coords)
            })
            .collect())
    }

    fn face_count(&self) -> usize {
        4
    }

    fn metrics(&self) -> Metrics {
        let circumradius = 6.0_f64.sqrt() / 4.0;
        Metrics {
            inradius: circumradius / 3.0,
            circumradius: Some(circumradius),
            dihedral_angle: (1.0_f64 / 3.0).acos(),
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

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn face_normals_point_away_from_opposite_corner() {
        let vertices = Tetrahedron.vertices();
        for (i, face) in Tetrahedron.faces().unwrap().iter().enumerate() {
            assert!(face.normal.dot(&vertices[i].coords) < 0.0);
            assert!(!face.has_vertex_near(&vertices[i], 1e-9));
        }
    }
}
