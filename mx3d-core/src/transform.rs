/// Transformation stack maintaining the CTM and its inverse
use nalgebra::{Matrix4, Unit, Vector3};
use std::error::Error;
use std::fmt;

/// Errors reported when an operation's preconditions are violated.
///
/// These are usage errors, not transient conditions: every variant is
/// reported synchronously at the offending call, and the failed call
/// leaves the stack untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformError {
    /// `pop` was called with only the base frame remaining.
    Underflow,
    /// A scale factor of exactly zero would make the matrix non-invertible.
    SingularTransform,
    /// A rotation axis of zero length cannot be normalized.
    InvalidAxis,
    /// A projection parameter is outside its valid range.
    InvalidParameter,
}

impl fmt::Display for TransformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Underflow => write!(f, "pop would remove the base frame"),
            Self::SingularTransform => write!(f, "scale factor of zero is not invertible"),
            Self::InvalidAxis => write!(f, "rotation axis has zero length"),
            Self::InvalidParameter => write!(f, "projection parameter out of range"),
        }
    }
}

impl Error for TransformError {}

/// World axis selector for fixed-axis rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// The world unit vector for this axis
    pub fn unit(self) -> Unit<Vector3<f32>> {
        match self {
            Self::X => Vector3::x_axis(),
            Self::Y => Vector3::y_axis(),
            Self::Z => Vector3::z_axis(),
        }
    }
}

/// One stack level: the composed matrix paired with its exact inverse.
///
/// Both halves are always updated together, so `inverse` is never stale.
#[derive(Debug, Clone, Copy)]
struct Frame {
    matrix: Matrix4<f32>,
    inverse: Matrix4<f32>,
}

impl Frame {
    fn identity() -> Self {
        Self {
            matrix: Matrix4::identity(),
            inverse: Matrix4::identity(),
        }
    }
}

/// A stack of transformation matrices with save/restore semantics.
///
/// The top frame holds the current transformation matrix (CTM) together
/// with its inverse. Transform calls compose onto the top frame in the
/// local (object) frame, fixed-function style: a newly added primitive
/// reaches a vertex before the previously accumulated transforms, so
/// `translate` performs `M' = M * T` and `M⁻¹' = T⁻¹ * M⁻¹`. `push` and
/// `pop` save and restore the whole frame; the base identity frame can
/// never be popped.
///
/// The stack is exclusively owned by one traversal at a time. Matrices
/// are column-major 32-bit floats throughout, matching the layout the
/// render pipeline consumes.
pub struct TransformationStack {
    frames: Vec<Frame>,
}

impl TransformationStack {
    /// Create a stack holding a single identity frame.
    pub fn new() -> Self {
        Self {
            frames: vec![Frame::identity()],
        }
    }

    /// Number of frames currently on the stack (always at least 1).
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Duplicate the current frame so it can later be restored with `pop`.
    pub fn push(&mut self) {
        let top = *self.top();
        self.frames.push(top);
    }

    /// Discard the current frame, restoring the one saved by `push`.
    ///
    /// Popping the base frame is a hard error: the call returns
    /// `TransformError::Underflow` and the stack is left unchanged.
    pub fn pop(&mut self) -> Result<(), TransformError> {
        if self.frames.len() <= 1 {
            return Err(TransformError::Underflow);
        }
        self.frames.pop();
        Ok(())
    }

    /// Discard all frames and reset to a single identity frame.
    pub fn clear(&mut self) {
        self.frames.clear();
        self.frames.push(Frame::identity());
    }

    /// Reset the current frame to the identity pair.
    pub fn identity(&mut self) {
        *self.top_mut() = Frame::identity();
    }

    /// Compose a translation onto the current frame.
    pub fn translate(&mut self, x: f32, y: f32, z: f32) {
        let m = Matrix4::new_translation(&Vector3::new(x, y, z));
        let inverse = Matrix4::new_translation(&Vector3::new(-x, -y, -z));
        self.append(&m, &inverse);
    }

    /// Compose a non-uniform scale onto the current frame.
    ///
    /// A factor of exactly zero is rejected as `SingularTransform`.
    pub fn scale(&mut self, x: f32, y: f32, z: f32) -> Result<(), TransformError> {
        if x == 0.0 || y == 0.0 || z == 0.0 {
            return Err(TransformError::SingularTransform);
        }
        let m = Matrix4::new_nonuniform_scaling(&Vector3::new(x, y, z));
        let inverse = Matrix4::new_nonuniform_scaling(&Vector3::new(1.0 / x, 1.0 / y, 1.0 / z));
        self.append(&m, &inverse);
        Ok(())
    }

    /// Compose a uniform scale onto the current frame.
    pub fn scale_uniform(&mut self, s: f32) -> Result<(), TransformError> {
        self.scale(s, s, s)
    }

    /// Compose a rotation of `angle` radians around an arbitrary axis.
    ///
    /// The axis is normalized internally; a zero-length axis is rejected
    /// as `InvalidAxis`.
    pub fn rotate(&mut self, axis: Vector3<f32>, angle: f32) -> Result<(), TransformError> {
        let axis = Unit::try_new(axis, f32::EPSILON).ok_or(TransformError::InvalidAxis)?;
        self.rotate_unit(&axis, angle);
        Ok(())
    }

    /// Compose a rotation of `angle` radians around a world axis.
    pub fn rotate_fixed(&mut self, axis: Axis, angle: f32) {
        self.rotate_unit(&axis.unit(), angle);
    }

    fn rotate_unit(&mut self, axis: &Unit<Vector3<f32>>, angle: f32) {
        let m = Matrix4::from_axis_angle(axis, angle);
        // Rotations are orthonormal, so the inverse is the transpose.
        let inverse = m.transpose();
        self.append(&m, &inverse);
    }

    /// Replace the current frame with a perspective projection.
    ///
    /// Right-handed view space looking down -z, clip-space depth in
    /// [0, 1]. Requires `fov` in (0, pi), `aspect > 0` and
    /// `0 < near < far`.
    pub fn perspective(
        &mut self,
        fov: f32,
        aspect: f32,
        near: f32,
        far: f32,
    ) -> Result<(), TransformError> {
        if !(near < far) {
            return Err(TransformError::InvalidParameter);
        }
        let f = Self::focal_scale(fov, aspect, near)?;
        let c = far / (near - far);
        let d = near * far / (near - far);
        #[rustfmt::skip]
        let m = Matrix4::new(
            f / aspect, 0.0,  0.0, 0.0,
            0.0,        f,    0.0, 0.0,
            0.0,        0.0,  c,   d,
            0.0,        0.0, -1.0, 0.0,
        );
        #[rustfmt::skip]
        let inverse = Matrix4::new(
            aspect / f, 0.0, 0.0,                   0.0,
            0.0,        1.0 / f, 0.0,               0.0,
            0.0,        0.0, 0.0,                  -1.0,
            0.0,        0.0, 1.0 / far - 1.0 / near, 1.0 / near,
        );
        *self.top_mut() = Frame { matrix: m, inverse };
        Ok(())
    }

    /// Replace the current frame with an infinite-far perspective
    /// projection.
    ///
    /// This is the exact limit of [`perspective`](Self::perspective) as
    /// the far plane goes to infinity. Requires `fov` in (0, pi),
    /// `aspect > 0` and `near > 0`.
    pub fn perspective_infinite(
        &mut self,
        fov: f32,
        aspect: f32,
        near: f32,
    ) -> Result<(), TransformError> {
        let f = Self::focal_scale(fov, aspect, near)?;
        #[rustfmt::skip]
        let m = Matrix4::new(
            f / aspect, 0.0,  0.0,  0.0,
            0.0,        f,    0.0,  0.0,
            0.0,        0.0, -1.0, -near,
            0.0,        0.0, -1.0,  0.0,
        );
        #[rustfmt::skip]
        let inverse = Matrix4::new(
            aspect / f, 0.0,     0.0,         0.0,
            0.0,        1.0 / f, 0.0,         0.0,
            0.0,        0.0,     0.0,        -1.0,
            0.0,        0.0,    -1.0 / near,  1.0 / near,
        );
        *self.top_mut() = Frame { matrix: m, inverse };
        Ok(())
    }

    /// The current transformation matrix.
    pub fn ctm(&self) -> Matrix4<f32> {
        self.top().matrix
    }

    /// The inverse of the current transformation matrix.
    pub fn inverse_ctm(&self) -> Matrix4<f32> {
        self.top().inverse
    }

    /// Validate shared perspective parameters and return the focal
    /// scale `1 / tan(fov / 2)`.
    fn focal_scale(fov: f32, aspect: f32, near: f32) -> Result<f32, TransformError> {
        if !(fov > 0.0 && fov < std::f32::consts::PI) || !(aspect > 0.0) || !(near > 0.0) {
            return Err(TransformError::InvalidParameter);
        }
        Ok(1.0 / (fov * 0.5).tan())
    }

    /// Compose `m` onto the current frame in the local frame:
    /// `M' = M * m` and `M⁻¹' = m⁻¹ * M⁻¹`, keeping the pair consistent.
    fn append(&mut self, m: &Matrix4<f32>, inverse: &Matrix4<f32>) {
        let top = self.top_mut();
        top.matrix = top.matrix * m;
        top.inverse = inverse * top.inverse;
    }

    fn top(&self) -> &Frame {
        // The stack is never empty after construction.
        self.frames.last().unwrap()
    }

    fn top_mut(&mut self) -> &mut Frame {
        self.frames.last_mut().unwrap()
    }
}

impl Default for TransformationStack {
    fn default() -> Self {
        Self::new()
    }
}
