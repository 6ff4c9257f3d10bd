//! Errors reported by mass property computation.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, MassPropertiesError>;

#[derive(Error, Clone, Debug, PartialEq)]
pub enum MassPropertiesError {
    #[error(
        "Triangle {triangle} references vertex {index}, but the mesh only has {vertex_count} vertices"
    )]
    VertexIndexOutOfBounds {
        triangle: usize,
        index: u32,
        vertex_count: usize,
    },

    #[error("Mesh has {index_count} triangle indices, which is not a multiple of three")]
    IncompleteTriangle { index_count: usize },

    #[error("Mesh encloses a degenerate volume ({volume}), so its center of mass is undefined")]
    DegenerateVolume { volume: f32 },
}
