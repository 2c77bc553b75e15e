use bytemuck::{Pod, Zeroable};

/// View transform of a target, layout-compatible with `GPU_Camera`.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Camera {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub angle: f32,
    pub zoom: f32,
}

impl Camera {
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32, angle: f32, zoom: f32) -> Self {
        Self { x, y, z, angle, zoom }
    }
}

impl Default for Camera {
    /// SDL_gpu's default camera: no offset, no rotation, unit zoom.
    fn default() -> Self {
        Self::new(0.0, 0.0, -10.0, 0.0, 1.0)
    }
}
