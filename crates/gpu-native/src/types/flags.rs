use bitflags::bitflags;
use num_enum::{IntoPrimitive, TryFromPrimitive};

bitflags! {
    /// Flags accepted by `set_pre_init_flags` (`GPU_InitFlagEnum`).
    #[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
    pub struct InitFlags: u32 {
        const DISABLE_VSYNC = 0x1;
        const DISABLE_DOUBLE_BUFFER = 0x2;
        const DISABLE_AUTO_VIRTUAL_RESOLUTION = 0x4;
        const REQUEST_COMPATIBILITY_PROFILE = 0x8;
        const USE_ROW_BY_ROW_TEXTURE_UPLOAD_FALLBACK = 0x10;
        const USE_COPY_TEXTURE_UPLOAD_FALLBACK = 0x20;
    }
}

bitflags! {
    /// Optional renderer capabilities (`GPU_FeatureEnum`).
    #[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
    pub struct FeatureFlags: u32 {
        const NON_POWER_OF_TWO = 0x1;
        const RENDER_TARGETS = 0x2;
        const BLEND_EQUATIONS = 0x4;
        const BLEND_FUNC_SEPARATE = 0x8;
        const BLEND_EQUATIONS_SEPARATE = 0x10;
        const GL_BGR = 0x20;
        const GL_BGRA = 0x40;
        const GL_ABGR = 0x80;
        const VERTEX_SHADER = 0x100;
        const FRAGMENT_SHADER = 0x200;
        const PIXEL_SHADER = 0x200;
        const GEOMETRY_SHADER = 0x400;
        const WRAP_REPEAT_MIRRORED = 0x800;
        const CORE_FRAMEBUFFER_OBJECTS = 0x1000;

        const ALL_BASE = Self::RENDER_TARGETS.bits();
        const ALL_BLEND_PRESETS = Self::BLEND_EQUATIONS.bits() | Self::BLEND_FUNC_SEPARATE.bits();
        const ALL_GL_FORMATS = Self::GL_BGR.bits() | Self::GL_BGRA.bits() | Self::GL_ABGR.bits();
        const BASIC_SHADERS = Self::FRAGMENT_SHADER.bits() | Self::VERTEX_SHADER.bits();
        const ALL_SHADERS = Self::BASIC_SHADERS.bits() | Self::GEOMETRY_SHADER.bits();
    }
}

bitflags! {
    /// Vertex layout of a `triangle_batch` value array (`GPU_BatchFlagEnum`).
    #[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
    pub struct BatchFlags: u32 {
        const XY = 0x1;
        const XYZ = 0x2;
        const ST = 0x4;
        const RGB = 0x8;
        const RGBA = 0x10;
        const RGB8 = 0x20;
        const RGBA8 = 0x40;

        const XY_ST = Self::XY.bits() | Self::ST.bits();
        const XYZ_ST = Self::XYZ.bits() | Self::ST.bits();
        const XY_RGB = Self::XY.bits() | Self::RGB.bits();
        const XYZ_RGB = Self::XYZ.bits() | Self::RGB.bits();
        const XY_RGBA = Self::XY.bits() | Self::RGBA.bits();
        const XYZ_RGBA = Self::XYZ.bits() | Self::RGBA.bits();
        const XY_ST_RGBA = Self::XY.bits() | Self::ST.bits() | Self::RGBA.bits();
        const XYZ_ST_RGBA = Self::XYZ.bits() | Self::ST.bits() | Self::RGBA.bits();
        const XY_RGB8 = Self::XY.bits() | Self::RGB8.bits();
        const XYZ_RGB8 = Self::XYZ.bits() | Self::RGB8.bits();
        const XY_RGBA8 = Self::XY.bits() | Self::RGBA8.bits();
        const XYZ_RGBA8 = Self::XYZ.bits() | Self::RGBA8.bits();
        const XY_ST_RGBA8 = Self::XY.bits() | Self::ST.bits() | Self::RGBA8.bits();
        const XYZ_ST_RGBA8 = Self::XYZ.bits() | Self::ST.bits() | Self::RGBA8.bits();
    }
}

impl BatchFlags {
    /// Number of floats per vertex described by these flags, or `None` when
    /// the layout is contradictory (both XY and XYZ, or no position at all).
    pub fn floats_per_vertex(self) -> Option<usize> {
        let pos = match (self.contains(Self::XY), self.contains(Self::XYZ)) {
            (true, false) => 2,
            (false, true) => 3,
            _ => return None,
        };
        let tex = if self.contains(Self::ST) { 2 } else { 0 };
        let color = if self.intersects(Self::RGBA | Self::RGBA8) {
            4
        } else if self.intersects(Self::RGB | Self::RGB8) {
            3
        } else {
            0
        };
        Some(pos + tex + color)
    }
}

bitflags! {
    /// SDL window flags passed through `init`. Unknown bits are retained.
    #[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
    pub struct WindowFlags: u32 {
        const FULLSCREEN = 0x1;
        const OPENGL = 0x2;
        const SHOWN = 0x4;
        const HIDDEN = 0x8;
        const BORDERLESS = 0x10;
        const RESIZABLE = 0x20;
        const _ = !0;
    }
}

/// Verbosity of the native library's own diagnostics (`GPU_DebugLevelEnum`).
#[repr(i32)]
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default, TryFromPrimitive, IntoPrimitive)]
pub enum DebugLevel {
    #[default]
    Level0 = 0,
    Level1 = 1,
    Level2 = 2,
    Level3 = 3,
}

impl DebugLevel {
    pub const MAX: Self = Self::Level3;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_layout_widths() {
        assert_eq!(BatchFlags::XY.floats_per_vertex(), Some(2));
        assert_eq!(BatchFlags::XY_ST_RGBA.floats_per_vertex(), Some(8));
        assert_eq!(BatchFlags::XYZ_RGB8.floats_per_vertex(), Some(6));
    }

    #[test]
    fn batch_layout_requires_one_position_kind() {
        assert_eq!(BatchFlags::ST.floats_per_vertex(), None);
        assert_eq!((BatchFlags::XY | BatchFlags::XYZ).floats_per_vertex(), None);
    }

    #[test]
    fn window_flags_keep_unknown_bits() {
        let f = WindowFlags::from_bits_retain(0x8000_0002);
        assert!(f.contains(WindowFlags::OPENGL));
        assert_eq!(f.bits(), 0x8000_0002);
    }
}
