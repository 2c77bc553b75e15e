//! Value types and enum constants mirrored from SDL_gpu.
//!
//! Enum discriminants equal the native constants so a value can be passed
//! through the C ABI with a plain cast. Script integers enter through
//! `TryFrom<i32>` (num_enum) and are rejected when out of range.

mod blend;
mod camera;
mod context;
mod flags;
mod image;
pub mod matrix;
mod renderer;
mod shader;
mod status;

pub use blend::{BlendEq, BlendFunc, BlendMode, BlendPreset};
pub use camera::Camera;
pub use context::ContextInfo;
pub use flags::{BatchFlags, DebugLevel, FeatureFlags, InitFlags, WindowFlags};
pub use image::{FileFormat, FilterMode, ImageFormat, ImageInfo, SnapMode, TargetInfo, WrapMode};
pub use matrix::{Mat4, MatrixMode, MatrixStack, MATRIX_STACK_MAX};
pub use renderer::{RendererEnum, RendererId, RendererInfo, Version};
pub use shader::{
    Attribute, AttributeFormat, AttributeValue, DataType, ShaderBlock, ShaderLanguage, ShaderType,
    UniformValue,
};
pub use status::{ErrorCode, ErrorObject};
