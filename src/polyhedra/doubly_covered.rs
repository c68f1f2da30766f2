use std::f64::consts::TAU;

use crate::error::ShapeError;
use crate::math::{up, Point3};
use crate::topology::Face;

use super::lattice::MAX_NUMBERED_SECTORS;
use super::{LatticeType, Metrics, MoveTable, Shape, ShapeId, Style};

const PALETTE: [u32; 2] = [0xf4_a2_61, 0x26_46_53];

/// A flat regular polygon treated as a solid with two faces: face 1 on the
/// underside and face 2 on top. Rolling flips it over an edge.
///
/// Triangles, squares and hexagons tile the floor. Any other polygon moves
/// in `2k` named directions: a flip turns the footprint's edges by half a
/// sector, so the edge directions alternate between two sets of `k`.
pub struct DoublyCovered {
    id: ShapeId,
    sides: usize,
}

impl DoublyCovered {
    #[must_use]
    pub fn new(id: ShapeId, sides: usize) -> Self {
        Self { id, sides }
    }

    #[allow(clippy::cast_precision_loss)]
    fn step(&self) -> f64 {
        TAU / self.sides as f64
    }

    /// Circumradius giving unit edges.
    fn radius(&self) -> f64 {
        0.5 / (self.step() / 2.0).sin()
    }
}

impl Shape for DoublyCovered {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn name(&self) -> &'static str {
        match self.sides {
            3 => "Doubly-covered triangle",
            4 => "Doubly-covered square",
            6 => "Doubly-covered hexagon",
            _ => "Doubly-covered polygon",
        }
    }

    /// Corners in the floor plane, counter-clockwise by `atan2(z, x)`,
    /// rotated so the first edge faces `+X`.
    fn vertices(&self) -> Vec<Point3> {
        let r = self.radius();
        let step = self.step();
        (0..self.sides)
            .map(|i| {
                #[allow(clippy::cast_precision_loss)]
                let angle = -step / 2.0 + step * i as f64;
                Point3::new(r * angle.cos(), 0.0, r * angle.sin())
            })
            .collect()
    }

    fn faces(&self) -> Result<Vec<Face>, ShapeError> {
        if self.sides < 3 || 2 * self.sides > MAX_NUMBERED_SECTORS {
            return Err(ShapeError::Degenerate(format!("{}-gon", self.sides)));
        }
        let vertices = self.vertices();
        Ok(vec![
            Face::new(1, vertices.clone(), -up()),
            Face::new(2, vertices, up()),
        ])
    }

    fn face_count(&self) -> usize {
        2
    }

    fn metrics(&self) -> Metrics {
        Metrics {
            inradius: 0.0,
            circumradius: Some(self.radius()),
            dihedral_angle: 0.0,
            edge_length: 1.0,
        }
    }

    fn bottom_vertex_count(&self) -> usize {
        self.sides
    }

    fn lattice_type(&self) -> LatticeType {
        match self.sides {
            3 => LatticeType::Triangular,
            4 => LatticeType::Square,
            6 => LatticeType::Hexagonal,
            _ => LatticeType::None,
        }
    }

    fn move_table(&self) -> MoveTable {
        match self.lattice_type() {
            LatticeType::Square => MoveTable::square(),
            LatticeType::Triangular | LatticeType::Hexagonal => MoveTable::axial(),
            LatticeType::None => MoveTable::numbered(2 * self.sides),
        }
    }

    fn orientation_labels(&self) -> &'static [&'static str] {
        match self.sides {
            3 => &["X", "Y", "Z"],
            4 => &["A", "B", "C", "D"],
            _ => &["A", "B", "C", "D", "E", "F"],
        }
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
