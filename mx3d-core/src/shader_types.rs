/// Buffer indices, attribute indices and the uniform block layout.
///
/// These values must stay in sync with the index arguments used by the
/// shader functions; keeping them in one place avoids mismatched slots.
use nalgebra::Matrix4;

use crate::transform::TransformationStack;

/// Vertex-shader buffer slots.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VertexIndex {
    /// The `[[stage_in]]` vertex buffer must be slot 0.
    Vertices = 0,
    Uniforms = 1,
    /// Instance positions of the fairy lights.
    Locations = 2,
}

/// Attribute indices for mesh vertices.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeIndex {
    Position = 0,
    Normal = 1,
    Texture = 2,
}

/// Attribute indices for fairy-light sprite vertices.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FairyAttributeIndex {
    Position = 0,
    Uv = 1,
    Color = 2,
}

/// Texture bind points for the forward pass.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureIndex {
    Color = 0,
    Shadow = 1,
}

/// Texture bind points when sampling the g-buffer.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GBufferIndex {
    Color = 0,
    Normal = 1,
    Depth = 2,
}

/// Color attachment indices for the g-buffer render pass.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorIndex {
    Color = 0,
    Normal = 1,
}

/// Per-object uniform block.
///
/// Layout matches the shader-side declaration: the matrices start on a
/// 16-byte boundary, hence the explicit padding after `aspect`.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct Uniforms {
    pub aspect: f32,
    _pad: [f32; 3],
    pub model: Matrix4<f32>,
    pub view: Matrix4<f32>,
    /// Inverse of `model`, for transforming normals.
    pub inverse: Matrix4<f32>,
    /// Light-space matrix for shadow mapping.
    pub shadow: Matrix4<f32>,
}

impl Uniforms {
    /// Snapshot the stack's current transform into a uniform block.
    ///
    /// Called once per draw; `model` and `inverse` are taken from the
    /// top of the stack, the remaining fields from the caller.
    pub fn for_draw(
        stack: &TransformationStack,
        aspect: f32,
        view: Matrix4<f32>,
        shadow: Matrix4<f32>,
    ) -> Self {
        Self {
            aspect,
            _pad: [0.0; 3],
            model: stack.ctm(),
            view,
            inverse: stack.inverse_ctm(),
            shadow,
        }
    }
}
