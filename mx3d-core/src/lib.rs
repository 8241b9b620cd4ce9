/// MX3D Core Library - Transformation stack and render-support types
///
/// This library maintains the current transformation matrix and its
/// inverse under a save/restore stack, and declares the vertex and
/// uniform layouts shared with the rendering pipeline.

pub mod geometry;
pub mod shader_types;
pub mod transform;

// Re-export commonly used types
pub use geometry::{FairyVertex, Vertex};
pub use shader_types::Uniforms;
pub use transform::{Axis, TransformError, TransformationStack};
