//! Shader program contract
//!
//! Rendering backends implement [`ShaderProgram`]; the input layer never does.
//! Uniforms are passed as a single tagged [`UniformValue`] rather than one
//! setter per value type.

use glam::{Mat2, Mat3, Mat4, Quat, Vec2, Vec3, Vec4};
use thiserror::Error;

/// Pipeline stage a shader source is compiled for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
    Geometry,
    TessControl,
    TessEvaluation,
}

/// RGBA color with linear components in `0.0..=1.0`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn to_vec4(self) -> Vec4 {
        Vec4::new(self.r, self.g, self.b, self.a)
    }
}

/// Value of a shader uniform variable
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    Int(i32),
    Float(f32),
    Vec2(Vec2),
    Vec3(Vec3),
    Vec4(Vec4),
    Quat(Quat),
    Color(Color),
    Mat2(Mat2),
    Mat3(Mat3),
    Mat4(Mat4),
}

impl UniformValue {
    /// Number of scalar components a backend has to upload
    pub fn component_count(&self) -> usize {
        match self {
            UniformValue::Int(_) | UniformValue::Float(_) => 1,
            UniformValue::Vec2(_) => 2,
            UniformValue::Vec3(_) => 3,
            UniformValue::Vec4(_) | UniformValue::Quat(_) | UniformValue::Color(_) => 4,
            UniformValue::Mat2(_) => 4,
            UniformValue::Mat3(_) => 9,
            UniformValue::Mat4(_) => 16,
        }
    }
}

macro_rules! uniform_from {
    ($($ty:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$ty> for UniformValue {
                fn from(value: $ty) -> Self {
                    UniformValue::$variant(value)
                }
            }
        )+
    };
}

uniform_from! {
    i32 => Int,
    f32 => Float,
    Vec2 => Vec2,
    Vec3 => Vec3,
    Vec4 => Vec4,
    Quat => Quat,
    Color => Color,
    Mat2 => Mat2,
    Mat3 => Mat3,
    Mat4 => Mat4,
}

/// Errors reported by shader programs
#[derive(Debug, Error)]
pub enum ShaderError {
    #[error("failed to compile {stage:?} shader: {log}")]
    Compile { stage: ShaderStage, log: String },

    #[error("uniform '{0}' is not declared by the program")]
    UnknownUniform(String),

    #[error("uniform '{name}' expects {expected} components, got {actual}")]
    UniformMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },

    #[error("shader program has been disposed")]
    Disposed,
}

/// A linked GPU program made of several stages
pub trait ShaderProgram {
    /// Compiles `source` for `stage` and attaches it to the program
    fn add_stage(&mut self, stage: ShaderStage, source: &str) -> Result<(), ShaderError>;

    /// Makes this program current; only an enabled program renders
    fn enable(&mut self);

    fn disable(&mut self);

    fn is_enabled(&self) -> bool;

    /// Sets a uniform variable
    ///
    /// Fails with [`ShaderError::Disposed`] after [`ShaderProgram::dispose`].
    fn set_uniform(&mut self, name: &str, value: UniformValue) -> Result<(), ShaderError>;

    /// Releases GPU resources; the program is unusable afterwards
    fn dispose(&mut self);
}
