use crate::math::Point3;

use super::Face;

/// The face on the other side of an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighbor {
    /// 1-based index of the neighboring face.
    pub face: usize,
    /// Index of the shared edge within the neighboring face's boundary.
    pub edge: usize,
}

/// Looks up a face by its 1-based index.
#[must_use]
pub fn find_face(faces: &[Face], index: usize) -> Option<&Face> {
    faces.iter().find(|f| f.index == index)
}

/// Finds the face other than `current` that has vertices at both `a` and `b`.
#[must_use]
pub fn find_neighbor<'a>(
    faces: &'a [Face],
    current: usize,
    a: &Point3,
    b: &Point3,
    tolerance: f64,
) -> Option<&'a Face> {
    faces.iter().find(|f| {
        f.index != current && f.has_vertex_near(a, tolerance) && f.has_vertex_near(b, tolerance)
    })
}

/// First edge of `a` whose both endpoints coincide with vertices of `b`.
#[must_use]
pub fn shared_edge(a: &Face, b: &Face, tolerance: f64) -> Option<usize> {
    a.edges()
        .find(|(_, start, end)| b.has_vertex_near(start, tolerance) && b.has_vertex_near(end, tolerance))
        .map(|(i, _, _)| i)
}

/// Per-edge neighbor table for a closed polyhedral surface.
///
/// Edge `i` of face `f` maps to the face across it and to that face's index
/// for the same edge, which runs in the opposite direction.
#[derive(Debug, Clone, Default)]
pub struct FaceAdjacency {
    neighbors: Vec<Vec<Option<Neighbor>>>,
}

impl FaceAdjacency {
    /// Builds the table by vertex-proximity matching.
    #[must_use]
    pub fn build(faces: &[Face], tolerance: f64) -> Self {
        let neighbors = faces
            .iter()
            .map(|face| {
                face.edges()
                    .map(|(_, start, end)| {
                        faces.iter().filter(|other| other.index != face.index).find_map(|other| {
                            let j = other.vertex_near(&end, tolerance)?;
                            let n = other.vertex_count();
                            let next = other.vertices[(j + 1) % n];
                            ((next - start).norm() <= tolerance).then_some(Neighbor {
                                face: other.index,
                                edge: j,
                            })
                        })
                    })
                    .collect()
            })
            .collect();
        Self { neighbors }
    }

    /// The neighbor across edge `edge` of face `face` (1-based).
    #[must_use]
    pub fn neighbor(&self, face: usize, edge: usize) -> Option<Neighbor> {
        self.neighbors
            .get(face.checked_sub(1)?)
            .and_then(|edges| edges.get(edge).copied().flatten())
    }

    /// Whether every edge of every face has a neighbor.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.neighbors
            .iter()
            .all(|edges| edges.iter().all(Option::is_some))
    }
}
