pub mod adjacency;
pub mod coloring;
pub mod face;

pub use adjacency::{find_face, find_neighbor, shared_edge, FaceAdjacency, Neighbor};
pub use coloring::color_faces;
pub use face::Face;
