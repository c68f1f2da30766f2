use std::f64::consts::{PI, TAU};

use tracing::debug;

use crate::error::ShapeError;
use crate::math::{normalize_angle, rotation_between, up, Point3, UnitQuaternion, Vector3};
use crate::topology::{color_faces, find_face, Face, FaceAdjacency};

use super::lattice::{LatticeType, MoveData, MoveTable};
use super::ShapeId;

/// Tolerance for matching coincident vertices between faces.
pub const VERTEX_TOLERANCE: f64 = 1e-6;

/// Size and angle metrics of a solid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metrics {
    /// Distance from the center to every face plane.
    pub inradius: f64,
    /// Distance from the center to every vertex, for regular solids.
    pub circumradius: Option<f64>,
    /// Interior angle between adjacent faces, in radians.
    pub dihedral_angle: f64,
    pub edge_length: f64,
}

impl Metrics {
    /// Angle the solid turns through when tipped over one edge.
    #[must_use]
    pub fn roll_angle(&self) -> f64 {
        PI - self.dihedral_angle
    }
}

/// Rendering data carried alongside the geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    /// Face colors as `0xRRGGBB`.
    pub palette: &'static [u32],
    pub label_size: f64,
    pub vertex_radius: f64,
}

/// A fixed solid the crate knows how to roll.
///
/// Implementors supply raw geometry and lattice data;
/// [`PolyhedronDefinition::build`] derives everything else.
pub trait Shape {
    fn id(&self) -> ShapeId;

    fn name(&self) -> &'static str;

    /// Vertices in object space, centered on the origin.
    fn vertices(&self) -> Vec<Point3>;

    /// Vertex-index polygons, for shapes defined as an indexed mesh.
    fn face_indices(&self) -> Option<Vec<Vec<usize>>> {
        None
    }

    /// Faces numbered from 1. Face 1 is the one placed on the floor.
    ///
    /// # Errors
    ///
    /// Returns an error if the faces cannot be derived from the vertices.
    fn faces(&self) -> Result<Vec<Face>, ShapeError>;

    /// Number of faces `faces` must produce.
    fn face_count(&self) -> usize;

    fn metrics(&self) -> Metrics;

    /// Number of vertices touching the floor when resting on a face.
    fn bottom_vertex_count(&self) -> usize;

    fn lattice_type(&self) -> LatticeType;

    /// Move names and steps, one entry per movement sector.
    fn move_table(&self) -> MoveTable;

    /// Labels for the solid's twist about the vertical, spread evenly over
    /// the movement sectors.
    fn orientation_labels(&self) -> &'static [&'static str];

    /// Number of colors the faces are colored with.
    fn color_count(&self) -> usize;

    fn style(&self) -> Style;
}

/// Everything the rest of the crate needs to know about one solid.
///
/// Built once per shape and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct PolyhedronDefinition {
    pub id: ShapeId,
    pub name: &'static str,
    pub face_count: usize,
    pub vertex_count: usize,
    /// Object-space vertices.
    pub vertices: Vec<Point3>,
    pub face_indices: Option<Vec<Vec<usize>>>,
    /// Face centers, indexed like `faces()`.
    pub face_centers: Vec<Point3>,
    pub metrics: Metrics,
    pub style: Style,
    /// Color index per face, indexed like `faces()`.
    pub face_colors: Vec<usize>,
    /// Resting position with face 1 on the floor.
    pub initial_position: Point3,
    pub initial_quaternion: UnitQuaternion,
    pub lattice_type: LatticeType,
    /// Distance between neighboring floor cells.
    pub lattice_spacing: f64,
    pub movement_sectors: usize,
    pub sector_angle: f64,
    /// Direction angle of sector 0: face 1's first edge, seen from its
    /// center in the initial pose.
    pub sector_offset: f64,
    move_table: MoveTable,
    orientation_labels: &'static [&'static str],
    bottom_vertex_count: usize,
    faces: Vec<Face>,
    adjacency: FaceAdjacency,
}

impl PolyhedronDefinition {
    /// Derives a full definition from a shape.
    ///
    /// # Errors
    ///
    /// Returns an error if the shape's faces are missing, do not close up
    /// into a surface, disagree with its bottom vertex count, or cannot be
    /// colored. An empty move table is rejected as degenerate.
    pub fn build(shape: &dyn Shape) -> Result<Self, ShapeError> {
        let faces = shape.faces()?;
        if faces.len() != shape.face_count() {
            return Err(ShapeError::FaceDiscovery {
                expected: shape.face_count(),
                found: faces.len(),
            });
        }
        let Some(base) = find_face(&faces, 1) else {
            return Err(ShapeError::Degenerate("no face 1".into()));
        };
        if base.vertex_count() != shape.bottom_vertex_count() {
            return Err(ShapeError::Degenerate(format!(
                "face 1 has {} vertices, bottom vertex count is {}",
                base.vertex_count(),
                shape.bottom_vertex_count()
            )));
        }

        let adjacency = FaceAdjacency::build(&faces, VERTEX_TOLERANCE);
        if !adjacency.is_closed() {
            return Err(ShapeError::Degenerate("faces do not form a closed surface".into()));
        }

        let face_colors = color_faces(&faces, shape.color_count(), VERTEX_TOLERANCE)?;

        let initial_quaternion = rotation_between(&base.normal, &-up());
        let resting_center = initial_quaternion * base.center;
        let initial_position = Point3::new(0.0, -resting_center.y, 0.0);
        let to_edge = initial_quaternion * (base.edge_midpoint(0) - base.center);
        let sector_offset = normalize_angle(to_edge.z.atan2(to_edge.x));
        let lattice_spacing = 2.0 * to_edge.norm();

        let move_table = shape.move_table();
        let movement_sectors = move_table.sectors();
        if movement_sectors == 0 || move_table.deltas.len() != movement_sectors {
            return Err(ShapeError::Degenerate("move table has no usable sectors".into()));
        }
        if shape.orientation_labels().is_empty() {
            return Err(ShapeError::Degenerate("no orientation labels".into()));
        }
        #[allow(clippy::cast_precision_loss)]
        let sector_angle = TAU / movement_sectors as f64;

        let vertices = shape.vertices();
        debug!(shape = %shape.id(), faces = faces.len(), "built polyhedron definition");

        Ok(Self {
            id: shape.id(),
            name: shape.name(),
            face_count: faces.len(),
            vertex_count: vertices.len(),
            vertices,
            face_indices: shape.face_indices(),
            face_centers: faces.iter().map(|f| f.center).collect(),
            metrics: shape.metrics(),
            style: shape.style(),
            face_colors,
            initial_position,
            initial_quaternion,
            lattice_type: shape.lattice_type(),
            lattice_spacing,
            movement_sectors,
            sector_angle,
            sector_offset,
            move_table,
            orientation_labels: shape.orientation_labels(),
            bottom_vertex_count: shape.bottom_vertex_count(),
            faces,
            adjacency,
        })
    }

    /// The solid's faces, numbered from 1 in slice order.
    #[must_use]
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Face with 1-based index `index`.
    #[must_use]
    pub fn face(&self, index: usize) -> Option<&Face> {
        find_face(&self.faces, index)
    }

    #[must_use]
    pub fn adjacency(&self) -> &FaceAdjacency {
        &self.adjacency
    }

    #[must_use]
    pub fn bottom_vertex_count(&self) -> usize {
        self.bottom_vertex_count
    }

    /// Whether the solid is a flat polygon with a face on each side.
    #[must_use]
    pub fn is_doubly_covered(&self) -> bool {
        self.face_count == 2
    }

    /// Quantizes a world direction angle into a lattice move.
    ///
    /// `angle` is `atan2(dz, dx)` of the roll's horizontal displacement.
    #[must_use]
    pub fn move_data(&self, angle: f64) -> MoveData {
        let sector = self.sector_of(angle - self.sector_offset);
        MoveData {
            label: self.move_table.labels[sector],
            delta: self.move_table.deltas[sector],
            sector,
        }
    }

    /// Label for a twist `delta` (radians) measured from the initial
    /// orientation.
    #[must_use]
    pub fn orientation_label(&self, delta: f64) -> &'static str {
        let labels = self.orientation_labels;
        let sector = self.sector_of(delta);
        labels[sector * labels.len() / self.movement_sectors]
    }

    /// Nearest movement sector to `angle`, with ties going to the even
    /// sector.
    fn sector_of(&self, angle: f64) -> usize {
        let steps = (normalize_angle(angle) / self.sector_angle).round_ties_even();
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let sector = steps as usize;
        sector % self.movement_sectors
    }

    /// Floor displacement of a move.
    #[must_use]
    pub fn move_displacement(&self, data: &MoveData) -> Vector3 {
        self.lattice_type
            .displacement(data.delta, self.lattice_spacing, self.sector_offset)
    }
}
