//! Integer constants: the SDL_gpu names without their `GPU_` prefix.

use bitflags::Flags;
use gpu_native::types::{
    BatchFlags, BlendEq, BlendFunc, BlendPreset, DataType, DebugLevel, ErrorCode, FeatureFlags, FileFormat,
    FilterMode, ImageFormat, InitFlags, MatrixMode, RendererEnum, ShaderLanguage, ShaderType, SnapMode, WindowFlags,
    WrapMode,
};

use super::Registrar;

/// `constants!(reg, "PREFIX_", repr: NAME = value, ...)`
macro_rules! constants {
    ($reg:expr, $prefix:literal, $repr:ty: $($name:tt = $value:expr),+ $(,)?) => {
        $( $reg.constant(concat!($prefix, stringify!($name)), <$repr>::from($value))?; )+
    };
}

pub(super) fn register(reg: &Registrar) -> mlua::Result<()> {
    constants!(reg, "RENDERER_", u32:
        UNKNOWN = RendererEnum::UNKNOWN.0,
        OPENGL_1_BASE = RendererEnum::OPENGL_1_BASE.0,
        OPENGL_1 = RendererEnum::OPENGL_1.0,
        OPENGL_2 = RendererEnum::OPENGL_2.0,
        OPENGL_3 = RendererEnum::OPENGL_3.0,
        OPENGL_4 = RendererEnum::OPENGL_4.0,
        GLES_1 = RendererEnum::GLES_1.0,
        GLES_2 = RendererEnum::GLES_2.0,
        GLES_3 = RendererEnum::GLES_3.0,
        D3D9 = RendererEnum::D3D9.0,
        D3D10 = RendererEnum::D3D10.0,
        D3D11 = RendererEnum::D3D11.0,
        CUSTOM_0 = RendererEnum::USER_START.0,
    );

    constants!(reg, "FUNC_", i32:
        ZERO = BlendFunc::Zero,
        ONE = BlendFunc::One,
        SRC_COLOR = BlendFunc::SrcColor,
        DST_COLOR = BlendFunc::DstColor,
        ONE_MINUS_SRC = BlendFunc::OneMinusSrc,
        ONE_MINUS_DST = BlendFunc::OneMinusDst,
        SRC_ALPHA = BlendFunc::SrcAlpha,
        DST_ALPHA = BlendFunc::DstAlpha,
        ONE_MINUS_SRC_ALPHA = BlendFunc::OneMinusSrcAlpha,
        ONE_MINUS_DST_ALPHA = BlendFunc::OneMinusDstAlpha,
    );
    constants!(reg, "EQ_", i32:
        ADD = BlendEq::Add,
        SUBTRACT = BlendEq::Subtract,
        REVERSE_SUBTRACT = BlendEq::ReverseSubtract,
    );
    constants!(reg, "BLEND_", i32:
        NORMAL = BlendPreset::Normal,
        PREMULTIPLIED_ALPHA = BlendPreset::PremultipliedAlpha,
        MULTIPLY = BlendPreset::Multiply,
        ADD = BlendPreset::Add,
        SUBTRACT = BlendPreset::Subtract,
        MOD_ALPHA = BlendPreset::ModAlpha,
        SET_ALPHA = BlendPreset::SetAlpha,
        SET = BlendPreset::Set,
        NORMAL_KEEP_ALPHA = BlendPreset::NormalKeepAlpha,
        NORMAL_ADD_ALPHA = BlendPreset::NormalAddAlpha,
        NORMAL_FACTOR_ALPHA = BlendPreset::NormalFactorAlpha,
    );

    constants!(reg, "FILTER_", i32:
        NEAREST = FilterMode::Nearest,
        LINEAR = FilterMode::Linear,
        LINEAR_MIPMAP = FilterMode::LinearMipmap,
    );
    constants!(reg, "SNAP_", i32:
        NONE = SnapMode::None,
        POSITION = SnapMode::Position,
        DIMENSIONS = SnapMode::Dimensions,
        POSITION_AND_DIMENSIONS = SnapMode::PositionAndDimensions,
    );
    constants!(reg, "WRAP_", i32:
        NONE = WrapMode::None,
        REPEAT = WrapMode::Repeat,
        MIRRORED = WrapMode::Mirrored,
    );
    constants!(reg, "FORMAT_", i32:
        LUMINANCE = ImageFormat::Luminance,
        LUMINANCE_ALPHA = ImageFormat::LuminanceAlpha,
        RGB = ImageFormat::Rgb,
        RGBA = ImageFormat::Rgba,
        ALPHA = ImageFormat::Alpha,
        RG = ImageFormat::Rg,
        YCbCr422 = ImageFormat::YCbCr422,
        YCbCr420P = ImageFormat::YCbCr420P,
        BGR = ImageFormat::Bgr,
        BGRA = ImageFormat::Bgra,
        ABGR = ImageFormat::Abgr,
    );
    constants!(reg, "FILE_", i32:
        AUTO = FileFormat::Auto,
        PNG = FileFormat::Png,
        BMP = FileFormat::Bmp,
        TGA = FileFormat::Tga,
    );

    constants!(reg, "DEBUG_LEVEL_", i32:
        0 = DebugLevel::Level0,
        1 = DebugLevel::Level1,
        2 = DebugLevel::Level2,
        3 = DebugLevel::Level3,
        MAX = DebugLevel::MAX,
    );
    constants!(reg, "", i32:
        VERTEX_SHADER = ShaderType::Vertex,
        FRAGMENT_SHADER = ShaderType::Fragment,
        PIXEL_SHADER = ShaderType::PIXEL,
        GEOMETRY_SHADER = ShaderType::Geometry,
    );
    constants!(reg, "LANGUAGE_", i32:
        NONE = ShaderLanguage::None,
        ARB_ASSEMBLY = ShaderLanguage::ArbAssembly,
        GLSL = ShaderLanguage::Glsl,
        GLSLES = ShaderLanguage::Glsles,
        HLSL = ShaderLanguage::Hlsl,
        CG = ShaderLanguage::Cg,
    );
    constants!(reg, "TYPE_", u32:
        BYTE = DataType::Byte,
        UNSIGNED_BYTE = DataType::UnsignedByte,
        SHORT = DataType::Short,
        UNSIGNED_SHORT = DataType::UnsignedShort,
        INT = DataType::Int,
        UNSIGNED_INT = DataType::UnsignedInt,
        FLOAT = DataType::Float,
        DOUBLE = DataType::Double,
    );
    constants!(reg, "", i32:
        MODELVIEW = MatrixMode::ModelView,
        PROJECTION = MatrixMode::Projection,
    );
    constants!(reg, "ERROR_", i32:
        NONE = ErrorCode::NoError,
        BACKEND_ERROR = ErrorCode::BackendError,
        DATA_ERROR = ErrorCode::DataError,
        USER_ERROR = ErrorCode::UserError,
        UNSUPPORTED_FUNCTION = ErrorCode::UnsupportedFunction,
        NULL_ARGUMENT = ErrorCode::NullArgument,
        FILE_NOT_FOUND = ErrorCode::FileNotFound,
    );

    flag_group::<InitFlags>(reg, "INIT_")?;
    flag_group::<FeatureFlags>(reg, "FEATURE_")?;
    flag_group::<BatchFlags>(reg, "BATCH_")?;
    flag_group::<WindowFlags>(reg, "WINDOW_")
}

/// Every named flag of `F`, composites included.
fn flag_group<F: Flags<Bits = u32>>(reg: &Registrar, prefix: &str) -> mlua::Result<()> {
    for flag in F::FLAGS {
        if flag.name().is_empty() {
            continue;
        }
        reg.constant(&format!("{prefix}{}", flag.name()), flag.value().bits())?;
    }
    Ok(())
}
