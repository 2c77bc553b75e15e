use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::coords::{Color, Rect};
use crate::handle::{ImageHandle, RendererHandle, TargetHandle};

use super::BlendMode;

/// Texture sampling filter (`GPU_FilterEnum`).
#[repr(i32)]
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default, TryFromPrimitive, IntoPrimitive)]
pub enum FilterMode {
    Nearest = 0,
    #[default]
    Linear = 1,
    LinearMipmap = 2,
}

/// Pixel snapping applied when blitting (`GPU_SnapEnum`).
#[repr(i32)]
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default, TryFromPrimitive, IntoPrimitive)]
pub enum SnapMode {
    None = 0,
    Position = 1,
    Dimensions = 2,
    #[default]
    PositionAndDimensions = 3,
}

/// Texture coordinate wrapping (`GPU_WrapEnum`).
#[repr(i32)]
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default, TryFromPrimitive, IntoPrimitive)]
pub enum WrapMode {
    #[default]
    None = 0,
    Repeat = 1,
    Mirrored = 2,
}

/// Pixel layout of an image (`GPU_FormatEnum`).
#[repr(i32)]
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default, TryFromPrimitive, IntoPrimitive)]
pub enum ImageFormat {
    Luminance = 1,
    LuminanceAlpha = 2,
    Rgb = 3,
    #[default]
    Rgba = 4,
    Alpha = 5,
    Rg = 6,
    YCbCr422 = 7,
    YCbCr420P = 8,
    Bgr = 9,
    Bgra = 10,
    Abgr = 11,
}

impl ImageFormat {
    /// Bytes per pixel as SDL_gpu reports it for this format.
    pub const fn bytes_per_pixel(self) -> i32 {
        match self {
            Self::Luminance | Self::Alpha => 1,
            Self::LuminanceAlpha | Self::Rg | Self::YCbCr422 | Self::YCbCr420P => 2,
            Self::Rgb | Self::Bgr => 3,
            Self::Rgba | Self::Bgra | Self::Abgr => 4,
        }
    }
}

/// Image file container used by `save` (`GPU_FileFormatEnum`).
#[repr(i32)]
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default, TryFromPrimitive, IntoPrimitive)]
pub enum FileFormat {
    /// Picked from the file extension.
    #[default]
    Auto = 0,
    Png = 1,
    Bmp = 2,
    Tga = 3,
}

impl FileFormat {
    /// Resolves `Auto` from a file name's extension.
    pub fn resolve(self, filename: &str) -> Option<Self> {
        if self != Self::Auto {
            return Some(self);
        }
        let ext = std::path::Path::new(filename).extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "png" => Some(Self::Png),
            "bmp" => Some(Self::Bmp),
            "tga" => Some(Self::Tga),
            _ => None,
        }
    }
}

/// Read-only snapshot of an image's native state (`GPU_Image`).
#[derive(Debug, Clone, PartialEq)]
pub struct ImageInfo {
    pub renderer: Option<RendererHandle>,
    pub target: Option<TargetHandle>,
    pub w: u16,
    pub h: u16,
    pub base_w: u16,
    pub base_h: u16,
    pub texture_w: u16,
    pub texture_h: u16,
    pub using_virtual_resolution: bool,
    pub format: ImageFormat,
    pub num_layers: i32,
    pub bytes_per_pixel: i32,
    pub has_mipmaps: bool,
    pub color: Color,
    pub use_blending: bool,
    pub blend_mode: BlendMode,
    pub filter_mode: FilterMode,
    pub snap_mode: SnapMode,
    pub wrap_mode_x: WrapMode,
    pub wrap_mode_y: WrapMode,
    pub refcount: i32,
    pub is_alias: bool,
}

/// Read-only snapshot of a render target (`GPU_Target`).
#[derive(Debug, Clone, PartialEq)]
pub struct TargetInfo {
    pub image: Option<ImageHandle>,
    pub w: u16,
    pub h: u16,
    pub base_w: u16,
    pub base_h: u16,
    pub using_virtual_resolution: bool,
    pub clip_rect: Option<Rect>,
    pub color: Option<Color>,
    pub viewport: Rect,
    pub has_context: bool,
    pub refcount: i32,
    pub is_alias: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_file_format_follows_extension() {
        assert_eq!(FileFormat::Auto.resolve("shot.PNG"), Some(FileFormat::Png));
        assert_eq!(FileFormat::Auto.resolve("a/b/c.tga"), Some(FileFormat::Tga));
        assert_eq!(FileFormat::Auto.resolve("noext"), None);
        assert_eq!(FileFormat::Bmp.resolve("x.png"), Some(FileFormat::Bmp));
    }

    #[test]
    fn out_of_range_filter_is_rejected() {
        assert!(FilterMode::try_from(3).is_err());
        assert_eq!(FilterMode::try_from(2).unwrap(), FilterMode::LinearMipmap);
    }
}
