use crate::handle::TargetHandle;

use super::{FeatureFlags, InitFlags, ShaderLanguage};

/// Renderer backend identifier (`GPU_RendererEnum`).
///
/// An open set: `reserve_next_renderer_enum` hands out values past
/// [`RendererEnum::USER_START`], so this is a newtype rather than an enum.
#[repr(transparent)]
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct RendererEnum(pub u32);

impl RendererEnum {
    pub const UNKNOWN: Self = Self(0);
    pub const OPENGL_1_BASE: Self = Self(1);
    pub const OPENGL_1: Self = Self(2);
    pub const OPENGL_2: Self = Self(3);
    pub const OPENGL_3: Self = Self(4);
    pub const OPENGL_4: Self = Self(5);
    pub const GLES_1: Self = Self(11);
    pub const GLES_2: Self = Self(12);
    pub const GLES_3: Self = Self(13);
    pub const D3D9: Self = Self(21);
    pub const D3D10: Self = Self(22);
    pub const D3D11: Self = Self(23);

    /// First value handed out by `reserve_next_renderer_enum`.
    pub const USER_START: Self = Self(1000);
}

/// Identity of a renderer backend (`GPU_RendererID`).
#[derive(Debug, Clone, Eq, PartialEq, Hash, Default)]
pub struct RendererId {
    pub name: String,
    pub renderer: RendererEnum,
    pub major_version: i32,
    pub minor_version: i32,
}

impl RendererId {
    pub fn new(name: impl Into<String>, renderer: RendererEnum, major_version: i32, minor_version: i32) -> Self {
        Self { name: name.into(), renderer, major_version, minor_version }
    }
}

/// Read-only snapshot of a live renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct RendererInfo {
    pub id: RendererId,
    pub requested_id: RendererId,
    pub sdl_init_flags: u32,
    pub gpu_init_flags: InitFlags,
    pub shader_language: ShaderLanguage,
    pub min_shader_version: i32,
    pub max_shader_version: i32,
    pub enabled_features: FeatureFlags,
    pub current_context_target: Option<TargetHandle>,
}

/// Library version triple (`SDL_version`).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct Version {
    pub major: u8,
    pub minor: u8,
    pub patch: u8,
}

impl Version {
    #[inline]
    pub const fn new(major: u8, minor: u8, patch: u8) -> Self {
        Self { major, minor, patch }
    }
}
