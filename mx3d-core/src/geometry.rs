/// Geometry structures shared with the render pipeline
use nalgebra::{Point3, Vector2, Vector3};

/// A mesh vertex: position, surface normal and texture coordinate.
///
/// The field layout must match the vertex descriptor declared by the
/// shaders, so the struct is `repr(C)` with 32-bit float components.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Point3<f32>,
    pub normal: Vector3<f32>,
    pub texture: Vector2<f32>,
}

impl Vertex {
    pub fn new(x: f32, y: f32, z: f32, nx: f32, ny: f32, nz: f32, u: f32, v: f32) -> Self {
        Self {
            position: Point3::new(x, y, z),
            normal: Vector3::new(nx, ny, nz),
            texture: Vector2::new(u, v),
        }
    }
}

/// A screen-space sprite vertex for the fairy lights.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FairyVertex {
    pub position: Vector2<f32>,
}

impl FairyVertex {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            position: Vector2::new(x, y),
        }
    }
}
