//! Raw declarations for the SDL_gpu 0.11 C API.
//!
//! Struct layouts mirror `SDL_gpu.h`. Enum-typed fields are kept as their
//! C integer types here and converted at the boundary in `backend.rs`.

#![allow(non_camel_case_types, non_snake_case, dead_code)]

use std::ffi::{c_char, c_float, c_int, c_uint, c_ushort, c_void};

use crate::coords::{Color, Rect};
use crate::types::{Camera, ShaderBlock, MATRIX_STACK_MAX};

pub type GPU_bool = bool;

#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct SDL_version {
    pub major: u8,
    pub minor: u8,
    pub patch: u8,
}

#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct GPU_RendererID {
    pub name: *const c_char,
    pub renderer: u32,
    pub major_version: c_int,
    pub minor_version: c_int,
}

impl GPU_RendererID {
    pub const fn zeroed() -> Self {
        Self { name: std::ptr::null(), renderer: 0, major_version: 0, minor_version: 0 }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct GPU_BlendMode {
    pub source_color: c_int,
    pub dest_color: c_int,
    pub source_alpha: c_int,
    pub dest_alpha: c_int,
    pub color_equation: c_int,
    pub alpha_equation: c_int,
}

#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct GPU_AttributeFormat {
    pub is_per_sprite: GPU_bool,
    pub num_elems_per_value: c_int,
    pub type_: u32,
    pub normalize: GPU_bool,
    pub stride_bytes: c_int,
    pub offset_bytes: c_int,
}

#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct GPU_Attribute {
    pub location: c_int,
    pub values: *mut c_void,
    pub format: GPU_AttributeFormat,
}

#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct GPU_ErrorObject {
    pub function: *mut c_char,
    pub error: c_int,
    pub details: *mut c_char,
}

#[repr(C)]
pub struct GPU_MatrixStack {
    pub size: c_uint,
    pub matrix: [[c_float; 16]; MATRIX_STACK_MAX],
}

#[repr(C)]
pub struct GPU_Context {
    pub context: *mut c_void,
    pub failed: GPU_bool,
    pub windowID: u32,
    pub window_w: c_int,
    pub window_h: c_int,
    pub drawable_w: c_int,
    pub drawable_h: c_int,
    pub stored_window_w: c_int,
    pub stored_window_h: c_int,
    pub current_shader_program: u32,
    pub default_textured_shader_program: u32,
    pub default_untextured_shader_program: u32,
    pub shapes_use_blending: GPU_bool,
    pub shapes_blend_mode: GPU_BlendMode,
    pub line_thickness: c_float,
    pub use_texturing: GPU_bool,
    pub matrix_mode: c_int,
    pub projection_matrix: GPU_MatrixStack,
    pub modelview_matrix: GPU_MatrixStack,
    pub data: *mut c_void,
}

#[repr(C)]
pub struct GPU_Target {
    pub renderer: *mut GPU_Renderer,
    pub context_target: *mut GPU_Target,
    pub image: *mut GPU_Image,
    pub data: *mut c_void,
    pub w: u16,
    pub h: u16,
    pub using_virtual_resolution: GPU_bool,
    pub base_w: u16,
    pub base_h: u16,
    pub use_clip_rect: GPU_bool,
    pub clip_rect: Rect,
    pub use_color: GPU_bool,
    pub color: Color,
    pub viewport: Rect,
    pub camera: Camera,
    pub use_camera: GPU_bool,
    pub context: *mut GPU_Context,
    pub refcount: c_int,
    pub is_alias: GPU_bool,
}

#[repr(C)]
pub struct GPU_Image {
    pub renderer: *mut GPU_Renderer,
    pub context_target: *mut GPU_Target,
    pub target: *mut GPU_Target,
    pub w: u16,
    pub h: u16,
    pub using_virtual_resolution: GPU_bool,
    pub format: c_int,
    pub num_layers: c_int,
    pub bytes_per_pixel: c_int,
    pub base_w: u16,
    pub base_h: u16,
    pub texture_w: u16,
    pub texture_h: u16,
    pub has_mipmaps: GPU_bool,
    pub anchor_x: c_float,
    pub anchor_y: c_float,
    pub color: Color,
    pub use_blending: GPU_bool,
    pub blend_mode: GPU_BlendMode,
    pub filter_mode: c_int,
    pub snap_mode: c_int,
    pub wrap_mode_x: c_int,
    pub wrap_mode_y: c_int,
    pub data: *mut c_void,
    pub refcount: c_int,
    pub is_alias: GPU_bool,
}

/// Leading fields of `GPU_Renderer`; only ever accessed through a pointer
/// handed out by the library.
#[repr(C)]
pub struct GPU_Renderer {
    pub id: GPU_RendererID,
    pub requested_id: GPU_RendererID,
    pub SDL_init_flags: u32,
    pub GPU_init_flags: u32,
    pub shader_language: c_int,
    pub min_shader_version: c_int,
    pub max_shader_version: c_int,
    pub enabled_features: u32,
    pub current_context_target: *mut GPU_Target,
}

#[link(name = "SDL2_gpu")]
unsafe extern "C" {
    // ── initialization ──────────────────────────────────────────────────
    pub fn GPU_GetLinkedVersion() -> SDL_version;
    pub fn GPU_SetInitWindow(windowID: u32);
    pub fn GPU_GetInitWindow() -> u32;
    pub fn GPU_SetPreInitFlags(flags: u32);
    pub fn GPU_GetPreInitFlags() -> u32;
    pub fn GPU_SetRequiredFeatures(features: u32);
    pub fn GPU_GetRequiredFeatures() -> u32;
    pub fn GPU_GetDefaultRendererOrder(order_size: *mut c_int, order: *mut GPU_RendererID);
    pub fn GPU_GetRendererOrder(order_size: *mut c_int, order: *mut GPU_RendererID);
    pub fn GPU_SetRendererOrder(order_size: c_int, order: *mut GPU_RendererID);
    pub fn GPU_Init(w: u16, h: u16, SDL_flags: u32) -> *mut GPU_Target;
    pub fn GPU_InitRenderer(renderer_enum: u32, w: u16, h: u16, SDL_flags: u32) -> *mut GPU_Target;
    pub fn GPU_InitRendererByID(renderer_request: GPU_RendererID, w: u16, h: u16, SDL_flags: u32) -> *mut GPU_Target;
    pub fn GPU_IsFeatureEnabled(feature: u32) -> GPU_bool;
    pub fn GPU_CloseCurrentRenderer();
    pub fn GPU_Quit();

    // ── debugging ───────────────────────────────────────────────────────
    pub fn GPU_SetDebugLevel(level: c_int);
    pub fn GPU_GetDebugLevel() -> c_int;
    pub fn GPU_PopErrorCode() -> GPU_ErrorObject;

    // ── renderers ───────────────────────────────────────────────────────
    pub fn GPU_GetRendererID(renderer: u32) -> GPU_RendererID;
    pub fn GPU_GetNumRegisteredRenderers() -> c_int;
    pub fn GPU_GetRegisteredRendererList(renderers_array: *mut GPU_RendererID);
    pub fn GPU_ReserveNextRendererEnum() -> u32;
    pub fn GPU_GetNumActiveRenderers() -> c_int;
    pub fn GPU_GetActiveRendererList(renderers_array: *mut GPU_RendererID);
    pub fn GPU_GetCurrentRenderer() -> *mut GPU_Renderer;
    pub fn GPU_SetCurrentRenderer(id: GPU_RendererID);
    pub fn GPU_GetRenderer(id: GPU_RendererID) -> *mut GPU_Renderer;
    pub fn GPU_ResetRendererState();

    // ── context / window ────────────────────────────────────────────────
    pub fn GPU_GetContextTarget() -> *mut GPU_Target;
    pub fn GPU_GetWindowTarget(windowID: u32) -> *mut GPU_Target;
    pub fn GPU_CreateTargetFromWindow(windowID: u32) -> *mut GPU_Target;
    pub fn GPU_MakeCurrent(target: *mut GPU_Target, windowID: u32);
    pub fn GPU_SetWindowResolution(w: u16, h: u16) -> GPU_bool;
    pub fn GPU_SetFullscreen(enable_fullscreen: GPU_bool, use_desktop_resolution: GPU_bool) -> GPU_bool;
    pub fn GPU_GetFullscreen() -> GPU_bool;
    pub fn GPU_SetShapeBlending(enable: GPU_bool);
    pub fn GPU_SetShapeBlendFunction(sc: c_int, dc: c_int, sa: c_int, da: c_int);
    pub fn GPU_SetShapeBlendEquation(color_equation: c_int, alpha_equation: c_int);
    pub fn GPU_SetShapeBlendMode(mode: c_int);
    pub fn GPU_SetLineThickness(thickness: c_float) -> c_float;
    pub fn GPU_GetLineThickness() -> c_float;
    pub fn GPU_FlushBlitBuffer();

    // ── targets ─────────────────────────────────────────────────────────
    pub fn GPU_CreateAliasTarget(target: *mut GPU_Target) -> *mut GPU_Target;
    pub fn GPU_LoadTarget(image: *mut GPU_Image) -> *mut GPU_Target;
    pub fn GPU_FreeTarget(target: *mut GPU_Target);
    pub fn GPU_SetVirtualResolution(target: *mut GPU_Target, w: u16, h: u16);
    pub fn GPU_UnsetVirtualResolution(target: *mut GPU_Target);
    pub fn GPU_GetVirtualCoords(target: *mut GPU_Target, x: *mut c_float, y: *mut c_float, displayX: c_float, displayY: c_float);
    pub fn GPU_SetViewport(target: *mut GPU_Target, viewport: Rect);
    pub fn GPU_GetCamera(target: *mut GPU_Target) -> Camera;
    pub fn GPU_SetCamera(target: *mut GPU_Target, cam: *mut Camera) -> Camera;
    pub fn GPU_GetPixel(target: *mut GPU_Target, x: i16, y: i16) -> Color;
    pub fn GPU_SetClipRect(target: *mut GPU_Target, rect: Rect) -> Rect;
    pub fn GPU_UnsetClip(target: *mut GPU_Target);
    pub fn GPU_SetTargetColor(target: *mut GPU_Target, color: Color);
    pub fn GPU_UnsetTargetColor(target: *mut GPU_Target);
    pub fn GPU_CopyImageFromTarget(target: *mut GPU_Target) -> *mut GPU_Image;
    pub fn GPU_Clear(target: *mut GPU_Target);
    pub fn GPU_ClearRGBA(target: *mut GPU_Target, r: u8, g: u8, b: u8, a: u8);
    pub fn GPU_Flip(target: *mut GPU_Target);

    // ── blitting ────────────────────────────────────────────────────────
    pub fn GPU_Blit(image: *mut GPU_Image, src_rect: *mut Rect, target: *mut GPU_Target, x: c_float, y: c_float);
    pub fn GPU_BlitRotate(
        image: *mut GPU_Image,
        src_rect: *mut Rect,
        target: *mut GPU_Target,
        x: c_float,
        y: c_float,
        degrees: c_float,
    );
    pub fn GPU_BlitScale(
        image: *mut GPU_Image,
        src_rect: *mut Rect,
        target: *mut GPU_Target,
        x: c_float,
        y: c_float,
        scaleX: c_float,
        scaleY: c_float,
    );
    pub fn GPU_BlitTransform(
        image: *mut GPU_Image,
        src_rect: *mut Rect,
        target: *mut GPU_Target,
        x: c_float,
        y: c_float,
        degrees: c_float,
        scaleX: c_float,
        scaleY: c_float,
    );
    pub fn GPU_BlitTransformX(
        image: *mut GPU_Image,
        src_rect: *mut Rect,
        target: *mut GPU_Target,
        x: c_float,
        y: c_float,
        pivot_x: c_float,
        pivot_y: c_float,
        degrees: c_float,
        scaleX: c_float,
        scaleY: c_float,
    );
    pub fn GPU_BlitRect(image: *mut GPU_Image, src_rect: *mut Rect, target: *mut GPU_Target, dest_rect: *mut Rect);
    pub fn GPU_TriangleBatch(
        image: *mut GPU_Image,
        target: *mut GPU_Target,
        num_vertices: c_ushort,
        values: *mut c_float,
        num_indices: c_uint,
        indices: *mut c_ushort,
        flags: u32,
    );

    // ── shapes ──────────────────────────────────────────────────────────
    pub fn GPU_Pixel(target: *mut GPU_Target, x: c_float, y: c_float, color: Color);
    pub fn GPU_Line(target: *mut GPU_Target, x1: c_float, y1: c_float, x2: c_float, y2: c_float, color: Color);
    pub fn GPU_Arc(target: *mut GPU_Target, x: c_float, y: c_float, radius: c_float, start_angle: c_float, end_angle: c_float, color: Color);
    pub fn GPU_ArcFilled(target: *mut GPU_Target, x: c_float, y: c_float, radius: c_float, start_angle: c_float, end_angle: c_float, color: Color);
    pub fn GPU_Circle(target: *mut GPU_Target, x: c_float, y: c_float, radius: c_float, color: Color);
    pub fn GPU_CircleFilled(target: *mut GPU_Target, x: c_float, y: c_float, radius: c_float, color: Color);
    pub fn GPU_Ellipse(target: *mut GPU_Target, x: c_float, y: c_float, rx: c_float, ry: c_float, degrees: c_float, color: Color);
    pub fn GPU_EllipseFilled(target: *mut GPU_Target, x: c_float, y: c_float, rx: c_float, ry: c_float, degrees: c_float, color: Color);
    pub fn GPU_Sector(
        target: *mut GPU_Target,
        x: c_float,
        y: c_float,
        inner_radius: c_float,
        outer_radius: c_float,
        start_angle: c_float,
        end_angle: c_float,
        color: Color,
    );
    pub fn GPU_SectorFilled(
        target: *mut GPU_Target,
        x: c_float,
        y: c_float,
        inner_radius: c_float,
        outer_radius: c_float,
        start_angle: c_float,
        end_angle: c_float,
        color: Color,
    );
    pub fn GPU_Tri(target: *mut GPU_Target, x1: c_float, y1: c_float, x2: c_float, y2: c_float, x3: c_float, y3: c_float, color: Color);
    pub fn GPU_TriFilled(target: *mut GPU_Target, x1: c_float, y1: c_float, x2: c_float, y2: c_float, x3: c_float, y3: c_float, color: Color);
    pub fn GPU_Rectangle(target: *mut GPU_Target, x1: c_float, y1: c_float, x2: c_float, y2: c_float, color: Color);
    pub fn GPU_RectangleFilled(target: *mut GPU_Target, x1: c_float, y1: c_float, x2: c_float, y2: c_float, color: Color);
    pub fn GPU_Rectangle2(target: *mut GPU_Target, rect: Rect, color: Color);
    pub fn GPU_RectangleFilled2(target: *mut GPU_Target, rect: Rect, color: Color);
    pub fn GPU_RectangleRound(target: *mut GPU_Target, x1: c_float, y1: c_float, x2: c_float, y2: c_float, radius: c_float, color: Color);
    pub fn GPU_RectangleRoundFilled(target: *mut GPU_Target, x1: c_float, y1: c_float, x2: c_float, y2: c_float, radius: c_float, color: Color);
    pub fn GPU_RectangleRound2(target: *mut GPU_Target, rect: Rect, radius: c_float, color: Color);
    pub fn GPU_RectangleRoundFilled2(target: *mut GPU_Target, rect: Rect, radius: c_float, color: Color);
    pub fn GPU_Polygon(target: *mut GPU_Target, num_vertices: c_uint, vertices: *mut c_float, color: Color);
    pub fn GPU_PolygonFilled(target: *mut GPU_Target, num_vertices: c_uint, vertices: *mut c_float, color: Color);

    // ── images ──────────────────────────────────────────────────────────
    pub fn GPU_CreateImage(w: u16, h: u16, format: c_int) -> *mut GPU_Image;
    pub fn GPU_LoadImage(filename: *const c_char) -> *mut GPU_Image;
    pub fn GPU_CreateAliasImage(image: *mut GPU_Image) -> *mut GPU_Image;
    pub fn GPU_CopyImage(image: *mut GPU_Image) -> *mut GPU_Image;
    pub fn GPU_FreeImage(image: *mut GPU_Image);
    pub fn GPU_SaveImage(image: *mut GPU_Image, filename: *const c_char, format: c_int) -> GPU_bool;
    pub fn GPU_GenerateMipmaps(image: *mut GPU_Image);
    pub fn GPU_SetColor(image: *mut GPU_Image, color: Color);
    pub fn GPU_UnsetColor(image: *mut GPU_Image);
    pub fn GPU_SetBlending(image: *mut GPU_Image, enable: GPU_bool);
    pub fn GPU_SetBlendFunction(image: *mut GPU_Image, sc: c_int, dc: c_int, sa: c_int, da: c_int);
    pub fn GPU_SetBlendEquation(image: *mut GPU_Image, color_equation: c_int, alpha_equation: c_int);
    pub fn GPU_SetBlendMode(image: *mut GPU_Image, mode: c_int);
    pub fn GPU_SetImageFilter(image: *mut GPU_Image, filter: c_int);
    pub fn GPU_SetSnapMode(image: *mut GPU_Image, mode: c_int);
    pub fn GPU_SetWrapMode(image: *mut GPU_Image, wrap_mode_x: c_int, wrap_mode_y: c_int);
    pub fn GPU_SetImageVirtualResolution(image: *mut GPU_Image, w: u16, h: u16);
    pub fn GPU_UnsetImageVirtualResolution(image: *mut GPU_Image);
    pub fn GPU_UpdateImageBytes(image: *mut GPU_Image, image_rect: *const Rect, bytes: *const u8, bytes_per_row: c_int);

    // ── matrices ────────────────────────────────────────────────────────
    pub fn GPU_MatrixMode(matrix_mode: c_int);
    pub fn GPU_PushMatrix();
    pub fn GPU_PopMatrix();
    pub fn GPU_LoadIdentity();
    pub fn GPU_LoadMatrix(matrix4x4: *const c_float);
    pub fn GPU_MultMatrix(matrix4x4: *const c_float);
    pub fn GPU_Translate(x: c_float, y: c_float, z: c_float);
    pub fn GPU_Scale(sx: c_float, sy: c_float, sz: c_float);
    pub fn GPU_Rotate(degrees: c_float, x: c_float, y: c_float, z: c_float);
    pub fn GPU_Ortho(left: c_float, right: c_float, bottom: c_float, top: c_float, near: c_float, far: c_float);
    pub fn GPU_Frustum(left: c_float, right: c_float, bottom: c_float, top: c_float, near: c_float, far: c_float);
    pub fn GPU_GetModelView() -> *mut c_float;
    pub fn GPU_GetProjection() -> *mut c_float;
    pub fn GPU_GetCurrentMatrix() -> *mut c_float;

    // ── shaders ─────────────────────────────────────────────────────────
    pub fn GPU_CompileShader(shader_type: c_int, shader_source: *const c_char) -> u32;
    pub fn GPU_LoadShader(shader_type: c_int, filename: *const c_char) -> u32;
    pub fn GPU_FreeShader(shader_object: u32);
    pub fn GPU_CreateShaderProgram() -> u32;
    pub fn GPU_LinkManyShaders(shader_objects: *mut u32, count: c_int) -> u32;
    pub fn GPU_FreeShaderProgram(program_object: u32);
    pub fn GPU_AttachShader(program_object: u32, shader_object: u32);
    pub fn GPU_DetachShader(program_object: u32, shader_object: u32);
    pub fn GPU_LinkShaderProgram(program_object: u32) -> GPU_bool;
    pub fn GPU_ActivateShaderProgram(program_object: u32, block: *mut ShaderBlock);
    pub fn GPU_DeactivateShaderProgram();
    pub fn GPU_GetCurrentShaderProgram() -> u32;
    pub fn GPU_IsDefaultShaderProgram(program_object: u32) -> GPU_bool;
    pub fn GPU_GetShaderMessage() -> *const c_char;
    pub fn GPU_GetAttributeLocation(program_object: u32, attrib_name: *const c_char) -> c_int;
    pub fn GPU_GetUniformLocation(program_object: u32, uniform_name: *const c_char) -> c_int;
    pub fn GPU_LoadShaderBlock(
        program_object: u32,
        position_name: *const c_char,
        texcoord_name: *const c_char,
        color_name: *const c_char,
        modelViewMatrix_name: *const c_char,
    ) -> ShaderBlock;
    pub fn GPU_SetShaderBlock(block: ShaderBlock);
    pub fn GPU_GetShaderBlock() -> ShaderBlock;
    pub fn GPU_SetShaderImage(image: *mut GPU_Image, location: c_int, image_unit: c_int);

    pub fn GPU_SetUniformi(location: c_int, value: c_int);
    pub fn GPU_SetUniformiv(location: c_int, num_elements_per_value: c_int, num_values: c_int, values: *mut c_int);
    pub fn GPU_SetUniformui(location: c_int, value: c_uint);
    pub fn GPU_SetUniformuiv(location: c_int, num_elements_per_value: c_int, num_values: c_int, values: *mut c_uint);
    pub fn GPU_SetUniformf(location: c_int, value: c_float);
    pub fn GPU_SetUniformfv(location: c_int, num_elements_per_value: c_int, num_values: c_int, values: *mut c_float);
    pub fn GPU_SetUniformMatrixfv(
        location: c_int,
        num_matrices: c_int,
        num_rows: c_int,
        num_columns: c_int,
        transpose: GPU_bool,
        values: *mut c_float,
    );

    pub fn GPU_SetAttributef(location: c_int, value: c_float);
    pub fn GPU_SetAttributei(location: c_int, value: c_int);
    pub fn GPU_SetAttributeui(location: c_int, value: c_uint);
    pub fn GPU_SetAttributefv(location: c_int, num_elements: c_int, value: *mut c_float);
    pub fn GPU_SetAttributeiv(location: c_int, num_elements: c_int, value: *mut c_int);
    pub fn GPU_SetAttributeuiv(location: c_int, num_elements: c_int, value: *mut c_uint);
    pub fn GPU_SetAttributeSource(num_values: c_int, source: GPU_Attribute);
}
