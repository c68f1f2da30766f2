use crate::error::ShapeError;

use super::Face;

/// Faces sharing at least this many vertices count as adjacent for coloring.
const MIN_SHARED_VERTICES: usize = 2;

/// Assigns each face one of `colors` colors so that no two adjacent faces
/// match.
///
/// Uses depth-first backtracking over faces in index order. The result is
/// indexed like `faces`.
///
/// # Errors
///
/// Returns [`ShapeError::ColoringFailed`] if no valid assignment exists.
pub fn color_faces(faces: &[Face], colors: usize, tolerance: f64) -> Result<Vec<usize>, ShapeError> {
    let adjacency: Vec<Vec<usize>> = faces
        .iter()
        .enumerate()
        .map(|(i, face)| {
            faces
                .iter()
                .enumerate()
                .filter(|&(j, other)| {
                    j != i && face.shared_vertex_count(other, tolerance) >= MIN_SHARED_VERTICES
                })
                .map(|(j, _)| j)
                .collect()
        })
        .collect();

    let mut assignment: Vec<Option<usize>> = vec![None; faces.len()];
    if colors > 0 && assign(0, colors, &adjacency, &mut assignment) {
        Ok(assignment.into_iter().map(Option::unwrap_or_default).collect())
    } else {
        Err(ShapeError::ColoringFailed {
            faces: faces.len(),
            colors,
        })
    }
}

fn assign(
    face: usize,
    colors: usize,
    adjacency: &[Vec<usize>],
    assignment: &mut [Option<usize>],
) -> bool {
    if face == assignment.len() {
        return true;
    }
    for color in 0..colors {
        let clashes = adjacency[face]
            .iter()
            .any(|&other| assignment[other] == Some(color));
        if clashes {
            continue;
        }
        assignment[face] = Some(color);
        if assign(face + 1, colors, adjacency, &mut *assignment) {
            return true;
        }
        assignment[face] = None;
    }
    false
}
