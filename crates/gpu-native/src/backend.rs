//! The seam between the script layer and SDL_gpu.
//!
//! Every native entry point the bindings forward to is one method here.
//! Methods take `&self`: implementations keep their mutable state behind
//! interior mutability, the same way the native library keeps global state.
//!
//! Handle-taking methods return [`Result`] so that a backend can report a
//! handle it does not know; constructors additionally report native failure
//! (null return) as [`NativeError::Failed`](crate::NativeError::Failed).

use crate::coords::{Color, Rect};
use crate::draw::{BlitTransform, Shape};
use crate::error::Result;
use crate::handle::{ImageHandle, ProgramHandle, RendererHandle, ShaderHandle, TargetHandle};
use crate::types::{
    matrix, Attribute, AttributeValue, BatchFlags, BlendEq, BlendFunc, BlendPreset, Camera, ContextInfo,
    DebugLevel, ErrorObject, FeatureFlags, FileFormat, FilterMode, ImageFormat, ImageInfo, InitFlags, Mat4,
    MatrixMode, RendererEnum, RendererId, RendererInfo, ShaderBlock, ShaderType, SnapMode, TargetInfo,
    UniformValue, Version, WindowFlags, WrapMode,
};

pub trait Backend {
    // ── initialization ──────────────────────────────────────────────────

    fn linked_version(&self) -> Version;
    fn set_init_window(&self, window_id: u32);
    fn init_window(&self) -> u32;
    fn set_pre_init_flags(&self, flags: InitFlags);
    fn pre_init_flags(&self) -> InitFlags;
    fn set_required_features(&self, features: FeatureFlags);
    fn required_features(&self) -> FeatureFlags;
    fn default_renderer_order(&self) -> Vec<RendererId>;
    fn renderer_order(&self) -> Vec<RendererId>;
    fn set_renderer_order(&self, order: &[RendererId]);
    fn init(&self, w: u16, h: u16, flags: WindowFlags) -> Result<TargetHandle>;
    fn init_renderer(&self, renderer: RendererEnum, w: u16, h: u16, flags: WindowFlags) -> Result<TargetHandle>;
    fn init_renderer_by_id(&self, id: &RendererId, w: u16, h: u16, flags: WindowFlags) -> Result<TargetHandle>;
    fn is_feature_enabled(&self, feature: FeatureFlags) -> bool;
    fn close_current_renderer(&self);
    fn quit(&self);

    // ── debugging ───────────────────────────────────────────────────────

    fn set_debug_level(&self, level: DebugLevel);
    fn debug_level(&self) -> DebugLevel;
    fn pop_error(&self) -> Option<ErrorObject>;

    // ── renderers ───────────────────────────────────────────────────────

    fn renderer_id(&self, renderer: RendererEnum) -> RendererId;
    fn registered_renderers(&self) -> Vec<RendererId>;
    fn reserve_next_renderer_enum(&self) -> RendererEnum;
    fn active_renderers(&self) -> Vec<RendererId>;
    fn renderer(&self, id: &RendererId) -> Option<RendererHandle>;
    fn current_renderer(&self) -> Option<RendererHandle>;
    fn renderer_info(&self, renderer: RendererHandle) -> Result<RendererInfo>;
    fn set_current_renderer(&self, id: &RendererId);
    fn reset_renderer_state(&self);

    // ── context / window ────────────────────────────────────────────────

    fn context_target(&self) -> Option<TargetHandle>;
    fn window_target(&self, window_id: u32) -> Option<TargetHandle>;
    fn create_target_from_window(&self, window_id: u32) -> Result<TargetHandle>;
    fn make_current(&self, target: TargetHandle, window_id: u32) -> Result<()>;
    fn context_info(&self, target: TargetHandle) -> Result<Option<ContextInfo>>;
    fn set_window_resolution(&self, w: u16, h: u16) -> bool;
    fn set_fullscreen(&self, enable: bool, use_desktop_resolution: bool) -> bool;
    fn fullscreen(&self) -> bool;
    fn set_shape_blending(&self, enable: bool);
    fn set_shape_blend_function(&self, sc: BlendFunc, dc: BlendFunc, sa: BlendFunc, da: BlendFunc);
    fn set_shape_blend_equation(&self, color: BlendEq, alpha: BlendEq);
    fn set_shape_blend_mode(&self, preset: BlendPreset);
    /// Returns the previous thickness.
    fn set_line_thickness(&self, thickness: f32) -> f32;
    fn line_thickness(&self) -> f32;
    fn flush_blit_buffer(&self);

    // ── targets ─────────────────────────────────────────────────────────

    fn target_info(&self, target: TargetHandle) -> Result<TargetInfo>;
    fn free_target(&self, target: TargetHandle) -> Result<()>;
    fn create_alias_target(&self, target: TargetHandle) -> Result<TargetHandle>;
    fn load_target(&self, image: ImageHandle) -> Result<TargetHandle>;
    fn set_target_virtual_resolution(&self, target: TargetHandle, w: u16, h: u16) -> Result<()>;
    fn unset_target_virtual_resolution(&self, target: TargetHandle) -> Result<()>;
    fn virtual_coords(&self, target: TargetHandle, x: f32, y: f32) -> Result<(f32, f32)>;
    fn set_viewport(&self, target: TargetHandle, viewport: Rect) -> Result<()>;
    fn camera(&self, target: TargetHandle) -> Result<Camera>;
    /// `None` restores the default camera. Returns the previous camera.
    fn set_camera(&self, target: TargetHandle, camera: Option<Camera>) -> Result<Camera>;
    fn pixel(&self, target: TargetHandle, x: i16, y: i16) -> Result<Color>;
    /// Returns the previous clip rect (the whole target when none was set).
    fn set_clip_rect(&self, target: TargetHandle, rect: Rect) -> Result<Rect>;
    fn unset_clip(&self, target: TargetHandle) -> Result<()>;
    /// `None` unsets the target colour.
    fn set_target_color(&self, target: TargetHandle, color: Option<Color>) -> Result<()>;
    fn copy_image_from_target(&self, target: TargetHandle) -> Result<ImageHandle>;
    /// `None` clears to transparent black.
    fn clear(&self, target: TargetHandle, color: Option<Color>) -> Result<()>;
    fn flip(&self, target: TargetHandle) -> Result<()>;
    fn blit(
        &self,
        target: TargetHandle,
        image: ImageHandle,
        src: Option<Rect>,
        x: f32,
        y: f32,
        transform: BlitTransform,
    ) -> Result<()>;
    fn blit_rect(&self, target: TargetHandle, image: ImageHandle, src: Option<Rect>, dest: Option<Rect>) -> Result<()>;
    fn draw(&self, target: TargetHandle, shape: &Shape, color: Color) -> Result<()>;
    fn triangle_batch(
        &self,
        target: TargetHandle,
        image: Option<ImageHandle>,
        values: &[f32],
        indices: Option<&[u16]>,
        flags: BatchFlags,
    ) -> Result<()>;

    // ── images ──────────────────────────────────────────────────────────

    fn create_image(&self, w: u16, h: u16, format: ImageFormat) -> Result<ImageHandle>;
    fn load_image(&self, path: &str) -> Result<ImageHandle>;
    fn create_alias_image(&self, image: ImageHandle) -> Result<ImageHandle>;
    fn copy_image(&self, image: ImageHandle) -> Result<ImageHandle>;
    fn free_image(&self, image: ImageHandle) -> Result<()>;
    fn save_image(&self, image: ImageHandle, filename: &str, format: FileFormat) -> Result<bool>;
    fn image_info(&self, image: ImageHandle) -> Result<ImageInfo>;
    fn generate_mipmaps(&self, image: ImageHandle) -> Result<()>;
    /// `None` unsets the image colour.
    fn set_image_color(&self, image: ImageHandle, color: Option<Color>) -> Result<()>;
    fn set_image_blending(&self, image: ImageHandle, enable: bool) -> Result<()>;
    fn set_image_blend_function(
        &self,
        image: ImageHandle,
        sc: BlendFunc,
        dc: BlendFunc,
        sa: BlendFunc,
        da: BlendFunc,
    ) -> Result<()>;
    fn set_image_blend_equation(&self, image: ImageHandle, color: BlendEq, alpha: BlendEq) -> Result<()>;
    fn set_image_blend_mode(&self, image: ImageHandle, preset: BlendPreset) -> Result<()>;
    fn set_image_filter(&self, image: ImageHandle, filter: FilterMode) -> Result<()>;
    fn set_image_snap(&self, image: ImageHandle, snap: SnapMode) -> Result<()>;
    fn set_image_wrap(&self, image: ImageHandle, wrap_x: WrapMode, wrap_y: WrapMode) -> Result<()>;
    fn set_image_virtual_resolution(&self, image: ImageHandle, w: u16, h: u16) -> Result<()>;
    fn unset_image_virtual_resolution(&self, image: ImageHandle) -> Result<()>;
    fn update_image_bytes(&self, image: ImageHandle, rect: Option<Rect>, bytes: &[u8], bytes_per_row: i32)
    -> Result<()>;

    // ── matrices ────────────────────────────────────────────────────────

    fn set_matrix_mode(&self, mode: MatrixMode);
    fn push_matrix(&self);
    fn pop_matrix(&self);
    fn load_identity(&self);
    fn load_matrix(&self, m: &Mat4);
    /// Right-multiplies the current matrix by `m`.
    fn mult_matrix(&self, m: &Mat4);
    fn model_view(&self) -> Mat4;
    fn projection(&self) -> Mat4;
    fn current_matrix(&self) -> Mat4;

    fn translate(&self, x: f32, y: f32, z: f32) {
        self.mult_matrix(&matrix::translation(x, y, z));
    }

    fn scale(&self, x: f32, y: f32, z: f32) {
        self.mult_matrix(&matrix::scaling(x, y, z));
    }

    fn rotate(&self, degrees: f32, x: f32, y: f32, z: f32) {
        self.mult_matrix(&matrix::rotation(degrees, x, y, z));
    }

    fn ortho(&self, left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) {
        self.mult_matrix(&matrix::ortho(left, right, bottom, top, near, far));
    }

    fn frustum(&self, left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) {
        self.mult_matrix(&matrix::frustum(left, right, bottom, top, near, far));
    }

    // ── shaders ─────────────────────────────────────────────────────────

    fn compile_shader(&self, kind: ShaderType, source: &str) -> Result<ShaderHandle>;
    fn load_shader(&self, kind: ShaderType, path: &str) -> Result<ShaderHandle>;
    fn free_shader(&self, shader: ShaderHandle) -> Result<()>;
    fn create_program(&self) -> Result<ProgramHandle>;
    fn link_many_shaders(&self, shaders: &[ShaderHandle]) -> Result<ProgramHandle>;
    fn free_program(&self, program: ProgramHandle) -> Result<()>;
    fn attach_shader(&self, program: ProgramHandle, shader: ShaderHandle) -> Result<()>;
    fn detach_shader(&self, program: ProgramHandle, shader: ShaderHandle) -> Result<()>;
    fn link_program(&self, program: ProgramHandle) -> Result<bool>;
    fn activate_program(&self, program: ProgramHandle, block: Option<ShaderBlock>) -> Result<()>;
    fn deactivate_program(&self);
    fn current_program(&self) -> u32;
    fn is_default_program(&self, program: ProgramHandle) -> bool;
    fn shader_message(&self) -> String;
    fn attribute_location(&self, program: ProgramHandle, name: &str) -> Result<i32>;
    fn uniform_location(&self, program: ProgramHandle, name: &str) -> Result<i32>;
    fn load_shader_block(
        &self,
        program: ProgramHandle,
        position_name: &str,
        texcoord_name: &str,
        color_name: &str,
        modelview_name: &str,
    ) -> Result<ShaderBlock>;
    fn shader_block(&self) -> ShaderBlock;
    fn set_shader_block(&self, block: ShaderBlock);
    fn set_shader_image(&self, image: Option<ImageHandle>, location: i32, image_unit: i32) -> Result<()>;
    fn set_uniform(&self, location: i32, value: &UniformValue);
    fn set_attribute(&self, location: i32, value: &AttributeValue);
    fn set_attribute_source(&self, num_values: i32, attribute: &Attribute);

    fn link_shaders(&self, a: ShaderHandle, b: ShaderHandle) -> Result<ProgramHandle> {
        self.link_many_shaders(&[a, b])
    }
}
