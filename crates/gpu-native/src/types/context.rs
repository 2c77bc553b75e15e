use super::{BlendMode, MatrixMode, MatrixStack};

/// Snapshot of a window target's rendering context (`GPU_Context`).
#[derive(Debug, Clone, PartialEq)]
pub struct ContextInfo {
    pub window_id: u32,
    pub window_w: i32,
    pub window_h: i32,
    pub drawable_w: i32,
    pub drawable_h: i32,
    pub current_shader_program: u32,
    pub default_textured_shader_program: u32,
    pub default_untextured_shader_program: u32,
    pub shapes_use_blending: bool,
    pub shapes_blend_mode: BlendMode,
    pub line_thickness: f32,
    pub use_texturing: bool,
    pub matrix_mode: MatrixMode,
    pub projection_matrix: MatrixStack,
    pub modelview_matrix: MatrixStack,
}
