//! Graphics contracts consumed by rendering backends

pub mod shader;

pub use shader::{Color, ShaderError, ShaderProgram, ShaderStage, UniformValue};
