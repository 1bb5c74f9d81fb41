pub mod geometry;
pub mod rotation;
pub mod scene_graph;
pub mod text_state;

pub use geometry::{BoundingBox, TextGeometry};
pub use rotation::RotationState;
pub use scene_graph::{MeshInstance, TextGroup};
pub use text_state::TextState;
