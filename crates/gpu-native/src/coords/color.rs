use bytemuck::{Pod, Zeroable};

/// 8-bit straight-alpha RGBA colour, layout-compatible with `SDL_Color`.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    #[inline]
    pub const fn white() -> Self {
        Self::rgb(255, 255, 255)
    }

    #[inline]
    pub const fn transparent() -> Self {
        Self::rgba(0, 0, 0, 0)
    }

    /// Builds a colour from script integers, clamping each channel to 0..=255.
    #[inline]
    pub fn from_ints(r: i64, g: i64, b: i64, a: i64) -> Self {
        let c = |v: i64| v.clamp(0, 255) as u8;
        Self::rgba(c(r), c(g), c(b), c(a))
    }

    /// Linear interpolation between two colours per channel; `t` in [0, 1].
    ///
    /// Channels are truncated toward zero, matching integer colour maths in
    /// SDL-based code.
    #[inline]
    pub fn lerp(self, other: Color, t: f32) -> Color {
        let ch = |a: u8, b: u8| {
            let d = b as f32 - a as f32;
            (a as f32 + d * t).clamp(0.0, 255.0) as u8
        };
        Color::rgba(
            ch(self.r, other.r),
            ch(self.g, other.g),
            ch(self.b, other.b),
            ch(self.a, other.a),
        )
    }

    #[inline]
    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_ints_clamps_out_of_range_channels() {
        assert_eq!(Color::from_ints(-5, 300, 128, 255), Color::rgba(0, 255, 128, 255));
    }

    #[test]
    fn lerp_endpoints() {
        let a = Color::rgba(0, 0, 0, 0);
        let b = Color::rgba(200, 100, 50, 255);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5), Color::rgba(100, 50, 25, 127));
    }
}
