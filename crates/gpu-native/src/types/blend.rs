use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Blend factor (`GPU_BlendFuncEnum`). Values are the GL constants.
#[repr(i32)]
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, TryFromPrimitive, IntoPrimitive)]
pub enum BlendFunc {
    Zero = 0,
    One = 1,
    SrcColor = 0x0300,
    DstColor = 0x0306,
    OneMinusSrc = 0x0301,
    OneMinusDst = 0x0307,
    SrcAlpha = 0x0302,
    DstAlpha = 0x0304,
    OneMinusSrcAlpha = 0x0303,
    OneMinusDstAlpha = 0x0305,
}

/// Blend equation (`GPU_BlendEqEnum`).
#[repr(i32)]
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, TryFromPrimitive, IntoPrimitive)]
pub enum BlendEq {
    Add = 0x8006,
    Subtract = 0x800A,
    ReverseSubtract = 0x800B,
}

/// Named blend configurations (`GPU_BlendPresetEnum`).
#[repr(i32)]
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, TryFromPrimitive, IntoPrimitive)]
pub enum BlendPreset {
    Normal = 0,
    PremultipliedAlpha = 1,
    Multiply = 2,
    Add = 3,
    Subtract = 4,
    ModAlpha = 5,
    SetAlpha = 6,
    Set = 7,
    NormalKeepAlpha = 8,
    NormalAddAlpha = 9,
    NormalFactorAlpha = 10,
}

/// Full blend state (`GPU_BlendMode`).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct BlendMode {
    pub source_color: BlendFunc,
    pub dest_color: BlendFunc,
    pub source_alpha: BlendFunc,
    pub dest_alpha: BlendFunc,
    pub color_equation: BlendEq,
    pub alpha_equation: BlendEq,
}

impl BlendMode {
    #[inline]
    pub const fn new(
        source_color: BlendFunc,
        dest_color: BlendFunc,
        source_alpha: BlendFunc,
        dest_alpha: BlendFunc,
        color_equation: BlendEq,
        alpha_equation: BlendEq,
    ) -> Self {
        Self { source_color, dest_color, source_alpha, dest_alpha, color_equation, alpha_equation }
    }

    /// Expands a preset into explicit factors, the same table SDL_gpu uses.
    pub const fn from_preset(preset: BlendPreset) -> Self {
        use BlendEq::{Add as ADD, Subtract as SUB};
        use BlendFunc::*;

        match preset {
            BlendPreset::Normal => Self::new(SrcAlpha, OneMinusSrcAlpha, SrcAlpha, OneMinusSrcAlpha, ADD, ADD),
            BlendPreset::PremultipliedAlpha => Self::new(One, OneMinusSrcAlpha, One, OneMinusSrcAlpha, ADD, ADD),
            BlendPreset::Multiply => Self::new(DstColor, Zero, SrcAlpha, OneMinusSrcAlpha, ADD, ADD),
            BlendPreset::Add => Self::new(SrcAlpha, One, SrcAlpha, One, ADD, ADD),
            BlendPreset::Subtract => Self::new(One, One, One, One, SUB, SUB),
            BlendPreset::ModAlpha => Self::new(Zero, One, Zero, SrcAlpha, ADD, ADD),
            BlendPreset::SetAlpha => Self::new(Zero, One, One, Zero, ADD, ADD),
            BlendPreset::Set => Self::new(One, Zero, One, Zero, ADD, ADD),
            BlendPreset::NormalKeepAlpha => Self::new(SrcAlpha, OneMinusSrcAlpha, Zero, One, ADD, ADD),
            BlendPreset::NormalAddAlpha => Self::new(SrcAlpha, OneMinusSrcAlpha, One, One, ADD, ADD),
            BlendPreset::NormalFactorAlpha => {
                Self::new(SrcAlpha, OneMinusSrcAlpha, One, OneMinusSrcAlpha, ADD, ADD)
            }
        }
    }
}

impl Default for BlendMode {
    fn default() -> Self {
        Self::from_preset(BlendPreset::Normal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn func_round_trips_through_native_int() {
        let raw: i32 = BlendFunc::OneMinusDstAlpha.into();
        assert_eq!(raw, 0x0305);
        assert_eq!(BlendFunc::try_from(raw).unwrap(), BlendFunc::OneMinusDstAlpha);
    }

    #[test]
    fn unknown_equation_is_rejected() {
        assert!(BlendEq::try_from(42).is_err());
    }

    #[test]
    fn subtract_preset_uses_subtract_equations() {
        let m = BlendMode::from_preset(BlendPreset::Subtract);
        assert_eq!(m.color_equation, BlendEq::Subtract);
        assert_eq!(m.alpha_equation, BlendEq::Subtract);
        assert_eq!(m.source_color, BlendFunc::One);
    }
}
