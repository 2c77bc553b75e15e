use std::cell::RefCell;
use std::collections::HashMap;
use std::ffi::{c_char, c_int, CStr, CString};

use crate::backend::Backend;
use crate::coords::{Color, Rect};
use crate::draw::{BlitTransform, Shape};
use crate::error::{NativeError, Result};
use crate::handle::{ImageHandle, ProgramHandle, RendererHandle, ShaderHandle, TargetHandle};
use crate::types::{
    matrix, Attribute, AttributeValue, BatchFlags, BlendEq, BlendFunc, BlendMode, BlendPreset, Camera, ContextInfo,
    DebugLevel, ErrorCode, ErrorObject, FeatureFlags, FileFormat, FilterMode, ImageFormat, ImageInfo, InitFlags,
    Mat4, MatrixMode, MatrixStack, RendererEnum, RendererId, RendererInfo, ShaderBlock, ShaderLanguage, ShaderType,
    SnapMode, TargetInfo, UniformValue, Version, WindowFlags, WrapMode, MATRIX_STACK_MAX,
};

use super::sys::{self, GPU_RendererID};

/// `GPU_RENDERER_ORDER_MAX`
const RENDERER_ORDER_MAX: usize = 10;

// ── pointer <-> handle ──────────────────────────────────────────────────

fn target_ptr(h: TargetHandle) -> *mut sys::GPU_Target {
    h.raw() as usize as *mut sys::GPU_Target
}

fn image_ptr(h: ImageHandle) -> *mut sys::GPU_Image {
    h.raw() as usize as *mut sys::GPU_Image
}

fn opt_image_ptr(h: Option<ImageHandle>) -> *mut sys::GPU_Image {
    h.map_or(std::ptr::null_mut(), image_ptr)
}

fn target_handle(p: *mut sys::GPU_Target) -> Option<TargetHandle> {
    (!p.is_null()).then(|| TargetHandle::from_raw(p as usize as u64))
}

fn image_handle(p: *mut sys::GPU_Image) -> Option<ImageHandle> {
    (!p.is_null()).then(|| ImageHandle::from_raw(p as usize as u64))
}

fn renderer_handle(p: *mut sys::GPU_Renderer) -> Option<RendererHandle> {
    (!p.is_null()).then(|| RendererHandle::from_raw(p as usize as u64))
}

// ── value conversion ────────────────────────────────────────────────────

/// Copies a library-owned C string; null reads as empty.
fn read_str(p: *const c_char) -> String {
    if p.is_null() {
        return String::new();
    }
    // SAFETY: the library hands out NUL-terminated strings it keeps alive.
    unsafe { CStr::from_ptr(p) }.to_string_lossy().into_owned()
}

fn c_string(function: &'static str, s: &str) -> Result<CString> {
    CString::new(s).map_err(|_| NativeError::failed(function, "string contains a NUL byte"))
}

fn renderer_id_from_raw(id: &GPU_RendererID) -> RendererId {
    RendererId::new(read_str(id.name), RendererEnum(id.renderer), id.major_version, id.minor_version)
}

fn blend_mode_from_raw(m: &sys::GPU_BlendMode) -> BlendMode {
    let func = |raw: c_int, fallback| BlendFunc::try_from(raw).unwrap_or(fallback);
    let eq = |raw: c_int| BlendEq::try_from(raw).unwrap_or(BlendEq::Add);
    BlendMode::new(
        func(m.source_color, BlendFunc::SrcAlpha),
        func(m.dest_color, BlendFunc::OneMinusSrcAlpha),
        func(m.source_alpha, BlendFunc::SrcAlpha),
        func(m.dest_alpha, BlendFunc::OneMinusSrcAlpha),
        eq(m.color_equation),
        eq(m.alpha_equation),
    )
}

fn matrix_stack_from_raw(stack: &sys::GPU_MatrixStack) -> MatrixStack {
    let size = (stack.size as usize).min(MATRIX_STACK_MAX);
    MatrixStack::from_matrices(stack.matrix[..size].to_vec())
}

fn read_matrix(p: *const f32) -> Mat4 {
    if p.is_null() {
        return matrix::identity();
    }
    let mut m = [0.0; 16];
    // SAFETY: SDL_gpu returns a pointer to a 16-float matrix it owns.
    m.copy_from_slice(unsafe { std::slice::from_raw_parts(p, 16) });
    m
}

fn pop_error_object() -> Option<ErrorObject> {
    // SAFETY: plain call; the returned strings stay valid until the next pop.
    let raw = unsafe { sys::GPU_PopErrorCode() };
    let error = ErrorCode::try_from(raw.error).unwrap_or(ErrorCode::BackendError);
    if error == ErrorCode::NoError {
        return None;
    }
    Some(ErrorObject::new(read_str(raw.function), error, read_str(raw.details)))
}

/// Failure of a call that returned null; consumes the top of the error stack.
fn null_result(function: &'static str) -> NativeError {
    let err = NativeError::from_error_object(function, pop_error_object());
    log::warn!("{err}");
    err
}

fn shader_failure(function: &'static str) -> NativeError {
    // SAFETY: plain call returning a library-owned string.
    let msg = read_str(unsafe { sys::GPU_GetShaderMessage() });
    NativeError::failed(function, msg)
}

/// Backend over the system `SDL2_gpu` library.
///
/// SDL_gpu keeps pointers to some caller-owned data after the call returns:
/// renderer names in `GPU_RendererID`s and attribute arrays passed to
/// `GPU_SetAttributeSource`. Both are retained here.
pub struct SdlGpu {
    names: RefCell<Vec<CString>>,
    attribute_data: RefCell<HashMap<i32, Vec<u8>>>,
}

impl SdlGpu {
    pub fn new() -> Self {
        Self { names: RefCell::new(Vec::new()), attribute_data: RefCell::new(HashMap::new()) }
    }

    /// Interns `name` so the pointer handed to the library outlives the call.
    fn intern(&self, name: &str) -> *const c_char {
        let mut names = self.names.borrow_mut();
        if let Some(existing) = names.iter().find(|n| n.as_bytes() == name.as_bytes()) {
            return existing.as_ptr();
        }
        let owned = CString::new(name.replace('\0', "")).unwrap_or_default();
        let ptr = owned.as_ptr();
        names.push(owned);
        ptr
    }

    fn raw_id(&self, id: &RendererId) -> GPU_RendererID {
        GPU_RendererID {
            name: self.intern(&id.name),
            renderer: id.renderer.0,
            major_version: id.major_version,
            minor_version: id.minor_version,
        }
    }

    fn read_order(fill: unsafe extern "C" fn(*mut c_int, *mut GPU_RendererID)) -> Vec<RendererId> {
        let mut buf = [GPU_RendererID::zeroed(); RENDERER_ORDER_MAX];
        let mut len: c_int = 0;
        // SAFETY: the buffer holds GPU_RENDERER_ORDER_MAX entries, the most the library writes.
        unsafe { fill(&mut len, buf.as_mut_ptr()) };
        let len = usize::try_from(len).unwrap_or(0).min(RENDERER_ORDER_MAX);
        buf[..len].iter().map(renderer_id_from_raw).collect()
    }

    fn read_list(count: c_int, fill: unsafe extern "C" fn(*mut GPU_RendererID)) -> Vec<RendererId> {
        let len = usize::try_from(count).unwrap_or(0);
        let mut buf = vec![GPU_RendererID::zeroed(); len];
        if len > 0 {
            // SAFETY: sized from the matching count query.
            unsafe { fill(buf.as_mut_ptr()) };
        }
        buf.iter().map(renderer_id_from_raw).collect()
    }
}

impl Default for SdlGpu {
    fn default() -> Self {
        Self::new()
    }
}

// Every `unsafe` block below is a direct call into SDL_gpu with handles the
// library produced and the script layer has not released.
impl Backend for SdlGpu {
    // ── initialization ──────────────────────────────────────────────────

    fn linked_version(&self) -> Version {
        let v = unsafe { sys::GPU_GetLinkedVersion() };
        Version::new(v.major, v.minor, v.patch)
    }

    fn set_init_window(&self, window_id: u32) {
        unsafe { sys::GPU_SetInitWindow(window_id) }
    }

    fn init_window(&self) -> u32 {
        unsafe { sys::GPU_GetInitWindow() }
    }

    fn set_pre_init_flags(&self, flags: InitFlags) {
        unsafe { sys::GPU_SetPreInitFlags(flags.bits()) }
    }

    fn pre_init_flags(&self) -> InitFlags {
        InitFlags::from_bits_retain(unsafe { sys::GPU_GetPreInitFlags() })
    }

    fn set_required_features(&self, features: FeatureFlags) {
        unsafe { sys::GPU_SetRequiredFeatures(features.bits()) }
    }

    fn required_features(&self) -> FeatureFlags {
        FeatureFlags::from_bits_retain(unsafe { sys::GPU_GetRequiredFeatures() })
    }

    fn default_renderer_order(&self) -> Vec<RendererId> {
        Self::read_order(sys::GPU_GetDefaultRendererOrder)
    }

    fn renderer_order(&self) -> Vec<RendererId> {
        Self::read_order(sys::GPU_GetRendererOrder)
    }

    fn set_renderer_order(&self, order: &[RendererId]) {
        let mut raw: Vec<GPU_RendererID> = order.iter().take(RENDERER_ORDER_MAX).map(|id| self.raw_id(id)).collect();
        let ptr = if raw.is_empty() { std::ptr::null_mut() } else { raw.as_mut_ptr() };
        unsafe { sys::GPU_SetRendererOrder(raw.len() as c_int, ptr) }
    }

    fn init(&self, w: u16, h: u16, flags: WindowFlags) -> Result<TargetHandle> {
        target_handle(unsafe { sys::GPU_Init(w, h, flags.bits()) }).ok_or_else(|| null_result("GPU_Init"))
    }

    fn init_renderer(&self, renderer: RendererEnum, w: u16, h: u16, flags: WindowFlags) -> Result<TargetHandle> {
        target_handle(unsafe { sys::GPU_InitRenderer(renderer.0, w, h, flags.bits()) })
            .ok_or_else(|| null_result("GPU_InitRenderer"))
    }

    fn init_renderer_by_id(&self, id: &RendererId, w: u16, h: u16, flags: WindowFlags) -> Result<TargetHandle> {
        let raw = self.raw_id(id);
        target_handle(unsafe { sys::GPU_InitRendererByID(raw, w, h, flags.bits()) })
            .ok_or_else(|| null_result("GPU_InitRendererByID"))
    }

    fn is_feature_enabled(&self, feature: FeatureFlags) -> bool {
        unsafe { sys::GPU_IsFeatureEnabled(feature.bits()) }
    }

    fn close_current_renderer(&self) {
        unsafe { sys::GPU_CloseCurrentRenderer() }
    }

    fn quit(&self) {
        unsafe { sys::GPU_Quit() }
        self.attribute_data.borrow_mut().clear();
    }

    // ── debugging ───────────────────────────────────────────────────────

    fn set_debug_level(&self, level: DebugLevel) {
        unsafe { sys::GPU_SetDebugLevel(level.into()) }
    }

    fn debug_level(&self) -> DebugLevel {
        DebugLevel::try_from(unsafe { sys::GPU_GetDebugLevel() }).unwrap_or(DebugLevel::MAX)
    }

    fn pop_error(&self) -> Option<ErrorObject> {
        pop_error_object()
    }

    // ── renderers ───────────────────────────────────────────────────────

    fn renderer_id(&self, renderer: RendererEnum) -> RendererId {
        renderer_id_from_raw(&unsafe { sys::GPU_GetRendererID(renderer.0) })
    }

    fn registered_renderers(&self) -> Vec<RendererId> {
        Self::read_list(unsafe { sys::GPU_GetNumRegisteredRenderers() }, sys::GPU_GetRegisteredRendererList)
    }

    fn reserve_next_renderer_enum(&self) -> RendererEnum {
        RendererEnum(unsafe { sys::GPU_ReserveNextRendererEnum() })
    }

    fn active_renderers(&self) -> Vec<RendererId> {
        Self::read_list(unsafe { sys::GPU_GetNumActiveRenderers() }, sys::GPU_GetActiveRendererList)
    }

    fn renderer(&self, id: &RendererId) -> Option<RendererHandle> {
        renderer_handle(unsafe { sys::GPU_GetRenderer(self.raw_id(id)) })
    }

    fn current_renderer(&self) -> Option<RendererHandle> {
        renderer_handle(unsafe { sys::GPU_GetCurrentRenderer() })
    }

    fn renderer_info(&self, renderer: RendererHandle) -> Result<RendererInfo> {
        let p = renderer.raw() as usize as *const sys::GPU_Renderer;
        if p.is_null() {
            return Err(NativeError::UnknownHandle { kind: "renderer", raw: 0 });
        }
        let r = unsafe { &*p };
        Ok(RendererInfo {
            id: renderer_id_from_raw(&r.id),
            requested_id: renderer_id_from_raw(&r.requested_id),
            sdl_init_flags: r.SDL_init_flags,
            gpu_init_flags: InitFlags::from_bits_retain(r.GPU_init_flags),
            shader_language: ShaderLanguage::try_from(r.shader_language).unwrap_or_default(),
            min_shader_version: r.min_shader_version,
            max_shader_version: r.max_shader_version,
            enabled_features: FeatureFlags::from_bits_retain(r.enabled_features),
            current_context_target: target_handle(r.current_context_target),
        })
    }

    fn set_current_renderer(&self, id: &RendererId) {
        unsafe { sys::GPU_SetCurrentRenderer(self.raw_id(id)) }
    }

    fn reset_renderer_state(&self) {
        unsafe { sys::GPU_ResetRendererState() }
    }

    // ── context / window ────────────────────────────────────────────────

    fn context_target(&self) -> Option<TargetHandle> {
        target_handle(unsafe { sys::GPU_GetContextTarget() })
    }

    fn window_target(&self, window_id: u32) -> Option<TargetHandle> {
        target_handle(unsafe { sys::GPU_GetWindowTarget(window_id) })
    }

    fn create_target_from_window(&self, window_id: u32) -> Result<TargetHandle> {
        target_handle(unsafe { sys::GPU_CreateTargetFromWindow(window_id) })
            .ok_or_else(|| null_result("GPU_CreateTargetFromWindow"))
    }

    fn make_current(&self, target: TargetHandle, window_id: u32) -> Result<()> {
        unsafe { sys::GPU_MakeCurrent(target_ptr(target), window_id) }
        Ok(())
    }

    fn context_info(&self, target: TargetHandle) -> Result<Option<ContextInfo>> {
        let t = unsafe { &*target_ptr(target) };
        if t.context.is_null() {
            return Ok(None);
        }
        let c = unsafe { &*t.context };
        Ok(Some(ContextInfo {
            window_id: c.windowID,
            window_w: c.window_w,
            window_h: c.window_h,
            drawable_w: c.drawable_w,
            drawable_h: c.drawable_h,
            current_shader_program: c.current_shader_program,
            default_textured_shader_program: c.default_textured_shader_program,
            default_untextured_shader_program: c.default_untextured_shader_program,
            shapes_use_blending: c.shapes_use_blending,
            shapes_blend_mode: blend_mode_from_raw(&c.shapes_blend_mode),
            line_thickness: c.line_thickness,
            use_texturing: c.use_texturing,
            matrix_mode: MatrixMode::try_from(c.matrix_mode).unwrap_or_default(),
            projection_matrix: matrix_stack_from_raw(&c.projection_matrix),
            modelview_matrix: matrix_stack_from_raw(&c.modelview_matrix),
        }))
    }

    fn set_window_resolution(&self, w: u16, h: u16) -> bool {
        unsafe { sys::GPU_SetWindowResolution(w, h) }
    }

    fn set_fullscreen(&self, enable: bool, use_desktop_resolution: bool) -> bool {
        unsafe { sys::GPU_SetFullscreen(enable, use_desktop_resolution) }
    }

    fn fullscreen(&self) -> bool {
        unsafe { sys::GPU_GetFullscreen() }
    }

    fn set_shape_blending(&self, enable: bool) {
        unsafe { sys::GPU_SetShapeBlending(enable) }
    }

    fn set_shape_blend_function(&self, sc: BlendFunc, dc: BlendFunc, sa: BlendFunc, da: BlendFunc) {
        unsafe { sys::GPU_SetShapeBlendFunction(sc.into(), dc.into(), sa.into(), da.into()) }
    }

    fn set_shape_blend_equation(&self, color: BlendEq, alpha: BlendEq) {
        unsafe { sys::GPU_SetShapeBlendEquation(color.into(), alpha.into()) }
    }

    fn set_shape_blend_mode(&self, preset: BlendPreset) {
        unsafe { sys::GPU_SetShapeBlendMode(preset.into()) }
    }

    fn set_line_thickness(&self, thickness: f32) -> f32 {
        unsafe { sys::GPU_SetLineThickness(thickness) }
    }

    fn line_thickness(&self) -> f32 {
        unsafe { sys::GPU_GetLineThickness() }
    }

    fn flush_blit_buffer(&self) {
        unsafe { sys::GPU_FlushBlitBuffer() }
    }

    // ── targets ─────────────────────────────────────────────────────────

    fn target_info(&self, target: TargetHandle) -> Result<TargetInfo> {
        let t = unsafe { &*target_ptr(target) };
        Ok(TargetInfo {
            image: image_handle(t.image),
            w: t.w,
            h: t.h,
            base_w: t.base_w,
            base_h: t.base_h,
            using_virtual_resolution: t.using_virtual_resolution,
            clip_rect: t.use_clip_rect.then_some(t.clip_rect),
            color: t.use_color.then_some(t.color),
            viewport: t.viewport,
            has_context: !t.context.is_null(),
            refcount: t.refcount,
            is_alias: t.is_alias,
        })
    }

    fn free_target(&self, target: TargetHandle) -> Result<()> {
        unsafe { sys::GPU_FreeTarget(target_ptr(target)) }
        Ok(())
    }

    fn create_alias_target(&self, target: TargetHandle) -> Result<TargetHandle> {
        target_handle(unsafe { sys::GPU_CreateAliasTarget(target_ptr(target)) })
            .ok_or_else(|| null_result("GPU_CreateAliasTarget"))
    }

    fn load_target(&self, image: ImageHandle) -> Result<TargetHandle> {
        target_handle(unsafe { sys::GPU_LoadTarget(image_ptr(image)) }).ok_or_else(|| null_result("GPU_LoadTarget"))
    }

    fn set_target_virtual_resolution(&self, target: TargetHandle, w: u16, h: u16) -> Result<()> {
        unsafe { sys::GPU_SetVirtualResolution(target_ptr(target), w, h) }
        Ok(())
    }

    fn unset_target_virtual_resolution(&self, target: TargetHandle) -> Result<()> {
        unsafe { sys::GPU_UnsetVirtualResolution(target_ptr(target)) }
        Ok(())
    }

    fn virtual_coords(&self, target: TargetHandle, x: f32, y: f32) -> Result<(f32, f32)> {
        let (mut vx, mut vy) = (0.0, 0.0);
        unsafe { sys::GPU_GetVirtualCoords(target_ptr(target), &mut vx, &mut vy, x, y) }
        Ok((vx, vy))
    }

    fn set_viewport(&self, target: TargetHandle, viewport: Rect) -> Result<()> {
        unsafe { sys::GPU_SetViewport(target_ptr(target), viewport) }
        Ok(())
    }

    fn camera(&self, target: TargetHandle) -> Result<Camera> {
        Ok(unsafe { sys::GPU_GetCamera(target_ptr(target)) })
    }

    fn set_camera(&self, target: TargetHandle, camera: Option<Camera>) -> Result<Camera> {
        let mut cam = camera;
        let ptr = cam.as_mut().map_or(std::ptr::null_mut(), |c| c as *mut Camera);
        Ok(unsafe { sys::GPU_SetCamera(target_ptr(target), ptr) })
    }

    fn pixel(&self, target: TargetHandle, x: i16, y: i16) -> Result<Color> {
        Ok(unsafe { sys::GPU_GetPixel(target_ptr(target), x, y) })
    }

    fn set_clip_rect(&self, target: TargetHandle, rect: Rect) -> Result<Rect> {
        Ok(unsafe { sys::GPU_SetClipRect(target_ptr(target), rect) })
    }

    fn unset_clip(&self, target: TargetHandle) -> Result<()> {
        unsafe { sys::GPU_UnsetClip(target_ptr(target)) }
        Ok(())
    }

    fn set_target_color(&self, target: TargetHandle, color: Option<Color>) -> Result<()> {
        match color {
            Some(c) => unsafe { sys::GPU_SetTargetColor(target_ptr(target), c) },
            None => unsafe { sys::GPU_UnsetTargetColor(target_ptr(target)) },
        }
        Ok(())
    }

    fn copy_image_from_target(&self, target: TargetHandle) -> Result<ImageHandle> {
        image_handle(unsafe { sys::GPU_CopyImageFromTarget(target_ptr(target)) })
            .ok_or_else(|| null_result("GPU_CopyImageFromTarget"))
    }

    fn clear(&self, target: TargetHandle, color: Option<Color>) -> Result<()> {
        match color {
            Some(c) => unsafe { sys::GPU_ClearRGBA(target_ptr(target), c.r, c.g, c.b, c.a) },
            None => unsafe { sys::GPU_Clear(target_ptr(target)) },
        }
        Ok(())
    }

    fn flip(&self, target: TargetHandle) -> Result<()> {
        unsafe { sys::GPU_Flip(target_ptr(target)) }
        Ok(())
    }

    fn blit(
        &self,
        target: TargetHandle,
        image: ImageHandle,
        src: Option<Rect>,
        x: f32,
        y: f32,
        transform: BlitTransform,
    ) -> Result<()> {
        let mut src = src;
        let src_ptr = src.as_mut().map_or(std::ptr::null_mut(), |r| r as *mut Rect);
        let (img, t) = (image_ptr(image), target_ptr(target));
        unsafe {
            match transform {
                BlitTransform::None => sys::GPU_Blit(img, src_ptr, t, x, y),
                BlitTransform::Rotate { degrees } => sys::GPU_BlitRotate(img, src_ptr, t, x, y, degrees),
                BlitTransform::Scale { scale_x, scale_y } => sys::GPU_BlitScale(img, src_ptr, t, x, y, scale_x, scale_y),
                BlitTransform::Transform { degrees, scale_x, scale_y } => {
                    sys::GPU_BlitTransform(img, src_ptr, t, x, y, degrees, scale_x, scale_y)
                }
                BlitTransform::TransformX { pivot_x, pivot_y, degrees, scale_x, scale_y } => {
                    sys::GPU_BlitTransformX(img, src_ptr, t, x, y, pivot_x, pivot_y, degrees, scale_x, scale_y)
                }
            }
        }
        Ok(())
    }

    fn blit_rect(&self, target: TargetHandle, image: ImageHandle, src: Option<Rect>, dest: Option<Rect>) -> Result<()> {
        let (mut src, mut dest) = (src, dest);
        let src_ptr = src.as_mut().map_or(std::ptr::null_mut(), |r| r as *mut Rect);
        let dest_ptr = dest.as_mut().map_or(std::ptr::null_mut(), |r| r as *mut Rect);
        unsafe { sys::GPU_BlitRect(image_ptr(image), src_ptr, target_ptr(target), dest_ptr) }
        Ok(())
    }

    fn draw(&self, target: TargetHandle, shape: &Shape, color: Color) -> Result<()> {
        let t = target_ptr(target);
        unsafe {
            match *shape {
                Shape::Pixel { x, y } => sys::GPU_Pixel(t, x, y, color),
                Shape::Line { x1, y1, x2, y2 } => sys::GPU_Line(t, x1, y1, x2, y2, color),
                Shape::Arc { x, y, radius, start_angle, end_angle, filled: false } => {
                    sys::GPU_Arc(t, x, y, radius, start_angle, end_angle, color)
                }
                Shape::Arc { x, y, radius, start_angle, end_angle, filled: true } => {
                    sys::GPU_ArcFilled(t, x, y, radius, start_angle, end_angle, color)
                }
                Shape::Circle { x, y, radius, filled: false } => sys::GPU_Circle(t, x, y, radius, color),
                Shape::Circle { x, y, radius, filled: true } => sys::GPU_CircleFilled(t, x, y, radius, color),
                Shape::Ellipse { x, y, rx, ry, degrees, filled: false } => sys::GPU_Ellipse(t, x, y, rx, ry, degrees, color),
                Shape::Ellipse { x, y, rx, ry, degrees, filled: true } => {
                    sys::GPU_EllipseFilled(t, x, y, rx, ry, degrees, color)
                }
                Shape::Sector { x, y, inner_radius, outer_radius, start_angle, end_angle, filled: false } => {
                    sys::GPU_Sector(t, x, y, inner_radius, outer_radius, start_angle, end_angle, color)
                }
                Shape::Sector { x, y, inner_radius, outer_radius, start_angle, end_angle, filled: true } => {
                    sys::GPU_SectorFilled(t, x, y, inner_radius, outer_radius, start_angle, end_angle, color)
                }
                Shape::Tri { x1, y1, x2, y2, x3, y3, filled: false } => sys::GPU_Tri(t, x1, y1, x2, y2, x3, y3, color),
                Shape::Tri { x1, y1, x2, y2, x3, y3, filled: true } => {
                    sys::GPU_TriFilled(t, x1, y1, x2, y2, x3, y3, color)
                }
                Shape::Rectangle { x1, y1, x2, y2, filled: false } => sys::GPU_Rectangle(t, x1, y1, x2, y2, color),
                Shape::Rectangle { x1, y1, x2, y2, filled: true } => sys::GPU_RectangleFilled(t, x1, y1, x2, y2, color),
                Shape::Rectangle2 { rect, filled: false } => sys::GPU_Rectangle2(t, rect, color),
                Shape::Rectangle2 { rect, filled: true } => sys::GPU_RectangleFilled2(t, rect, color),
                Shape::RectangleRound { x1, y1, x2, y2, radius, filled: false } => {
                    sys::GPU_RectangleRound(t, x1, y1, x2, y2, radius, color)
                }
                Shape::RectangleRound { x1, y1, x2, y2, radius, filled: true } => {
                    sys::GPU_RectangleRoundFilled(t, x1, y1, x2, y2, radius, color)
                }
                Shape::RectangleRound2 { rect, radius, filled: false } => sys::GPU_RectangleRound2(t, rect, radius, color),
                Shape::RectangleRound2 { rect, radius, filled: true } => {
                    sys::GPU_RectangleRoundFilled2(t, rect, radius, color)
                }
                Shape::Polygon { ref vertices, filled } => {
                    let n = (vertices.len() / 2) as u32;
                    let ptr = vertices.as_ptr().cast_mut();
                    if filled {
                        sys::GPU_PolygonFilled(t, n, ptr, color)
                    } else {
                        sys::GPU_Polygon(t, n, ptr, color)
                    }
                }
            }
        }
        Ok(())
    }

    fn triangle_batch(
        &self,
        target: TargetHandle,
        image: Option<ImageHandle>,
        values: &[f32],
        indices: Option<&[u16]>,
        flags: BatchFlags,
    ) -> Result<()> {
        const FUNC: &str = "GPU_TriangleBatch";

        let Some(stride) = flags.floats_per_vertex() else {
            return Err(NativeError::failed(FUNC, "batch flags need exactly one of XY or XYZ"));
        };
        let num_vertices = u16::try_from(values.len() / stride)
            .map_err(|_| NativeError::failed(FUNC, "too many vertices for one batch"))?;
        let (num_indices, index_ptr) = match indices {
            Some(idx) => (idx.len() as u32, idx.as_ptr().cast_mut()),
            None => (0, std::ptr::null_mut()),
        };
        unsafe {
            sys::GPU_TriangleBatch(
                opt_image_ptr(image),
                target_ptr(target),
                num_vertices,
                values.as_ptr().cast_mut(),
                num_indices,
                index_ptr,
                flags.bits(),
            )
        }
        Ok(())
    }

    // ── images ──────────────────────────────────────────────────────────

    fn create_image(&self, w: u16, h: u16, format: ImageFormat) -> Result<ImageHandle> {
        image_handle(unsafe { sys::GPU_CreateImage(w, h, format.into()) }).ok_or_else(|| null_result("GPU_CreateImage"))
    }

    fn load_image(&self, path: &str) -> Result<ImageHandle> {
        let c = c_string("GPU_LoadImage", path)?;
        image_handle(unsafe { sys::GPU_LoadImage(c.as_ptr()) }).ok_or_else(|| null_result("GPU_LoadImage"))
    }

    fn create_alias_image(&self, image: ImageHandle) -> Result<ImageHandle> {
        image_handle(unsafe { sys::GPU_CreateAliasImage(image_ptr(image)) })
            .ok_or_else(|| null_result("GPU_CreateAliasImage"))
    }

    fn copy_image(&self, image: ImageHandle) -> Result<ImageHandle> {
        image_handle(unsafe { sys::GPU_CopyImage(image_ptr(image)) }).ok_or_else(|| null_result("GPU_CopyImage"))
    }

    fn free_image(&self, image: ImageHandle) -> Result<()> {
        unsafe { sys::GPU_FreeImage(image_ptr(image)) }
        Ok(())
    }

    fn save_image(&self, image: ImageHandle, filename: &str, format: FileFormat) -> Result<bool> {
        let c = c_string("GPU_SaveImage", filename)?;
        Ok(unsafe { sys::GPU_SaveImage(image_ptr(image), c.as_ptr(), format.into()) })
    }

    fn image_info(&self, image: ImageHandle) -> Result<ImageInfo> {
        let i = unsafe { &*image_ptr(image) };
        Ok(ImageInfo {
            renderer: renderer_handle(i.renderer),
            target: target_handle(i.target),
            w: i.w,
            h: i.h,
            base_w: i.base_w,
            base_h: i.base_h,
            texture_w: i.texture_w,
            texture_h: i.texture_h,
            using_virtual_resolution: i.using_virtual_resolution,
            format: ImageFormat::try_from(i.format).unwrap_or_default(),
            num_layers: i.num_layers,
            bytes_per_pixel: i.bytes_per_pixel,
            has_mipmaps: i.has_mipmaps,
            color: i.color,
            use_blending: i.use_blending,
            blend_mode: blend_mode_from_raw(&i.blend_mode),
            filter_mode: FilterMode::try_from(i.filter_mode).unwrap_or_default(),
            snap_mode: SnapMode::try_from(i.snap_mode).unwrap_or_default(),
            wrap_mode_x: WrapMode::try_from(i.wrap_mode_x).unwrap_or_default(),
            wrap_mode_y: WrapMode::try_from(i.wrap_mode_y).unwrap_or_default(),
            refcount: i.refcount,
            is_alias: i.is_alias,
        })
    }

    fn generate_mipmaps(&self, image: ImageHandle) -> Result<()> {
        unsafe { sys::GPU_GenerateMipmaps(image_ptr(image)) }
        Ok(())
    }

    fn set_image_color(&self, image: ImageHandle, color: Option<Color>) -> Result<()> {
        match color {
            Some(c) => unsafe { sys::GPU_SetColor(image_ptr(image), c) },
            None => unsafe { sys::GPU_UnsetColor(image_ptr(image)) },
        }
        Ok(())
    }

    fn set_image_blending(&self, image: ImageHandle, enable: bool) -> Result<()> {
        unsafe { sys::GPU_SetBlending(image_ptr(image), enable) }
        Ok(())
    }

    fn set_image_blend_function(
        &self,
        image: ImageHandle,
        sc: BlendFunc,
        dc: BlendFunc,
        sa: BlendFunc,
        da: BlendFunc,
    ) -> Result<()> {
        unsafe { sys::GPU_SetBlendFunction(image_ptr(image), sc.into(), dc.into(), sa.into(), da.into()) }
        Ok(())
    }

    fn set_image_blend_equation(&self, image: ImageHandle, color: BlendEq, alpha: BlendEq) -> Result<()> {
        unsafe { sys::GPU_SetBlendEquation(image_ptr(image), color.into(), alpha.into()) }
        Ok(())
    }

    fn set_image_blend_mode(&self, image: ImageHandle, preset: BlendPreset) -> Result<()> {
        unsafe { sys::GPU_SetBlendMode(image_ptr(image), preset.into()) }
        Ok(())
    }

    fn set_image_filter(&self, image: ImageHandle, filter: FilterMode) -> Result<()> {
        unsafe { sys::GPU_SetImageFilter(image_ptr(image), filter.into()) }
        Ok(())
    }

    fn set_image_snap(&self, image: ImageHandle, snap: SnapMode) -> Result<()> {
        unsafe { sys::GPU_SetSnapMode(image_ptr(image), snap.into()) }
        Ok(())
    }

    fn set_image_wrap(&self, image: ImageHandle, wrap_x: WrapMode, wrap_y: WrapMode) -> Result<()> {
        unsafe { sys::GPU_SetWrapMode(image_ptr(image), wrap_x.into(), wrap_y.into()) }
        Ok(())
    }

    fn set_image_virtual_resolution(&self, image: ImageHandle, w: u16, h: u16) -> Result<()> {
        unsafe { sys::GPU_SetImageVirtualResolution(image_ptr(image), w, h) }
        Ok(())
    }

    fn unset_image_virtual_resolution(&self, image: ImageHandle) -> Result<()> {
        unsafe { sys::GPU_UnsetImageVirtualResolution(image_ptr(image)) }
        Ok(())
    }

    fn update_image_bytes(
        &self,
        image: ImageHandle,
        rect: Option<Rect>,
        bytes: &[u8],
        bytes_per_row: i32,
    ) -> Result<()> {
        const FUNC: &str = "GPU_UpdateImageBytes";

        let info = self.image_info(image)?;
        let rows = rect.map_or(f32::from(info.h), |r| r.h.abs()) as usize;
        let row_len = usize::try_from(bytes_per_row).map_err(|_| NativeError::failed(FUNC, "negative bytes_per_row"))?;
        if bytes.len() < rows * row_len {
            return Err(NativeError::failed(FUNC, "byte buffer is smaller than the region"));
        }
        let rect_ptr = rect.as_ref().map_or(std::ptr::null(), |r| r as *const Rect);
        unsafe { sys::GPU_UpdateImageBytes(image_ptr(image), rect_ptr, bytes.as_ptr(), bytes_per_row) }
        Ok(())
    }

    // ── matrices ────────────────────────────────────────────────────────

    fn set_matrix_mode(&self, mode: MatrixMode) {
        unsafe { sys::GPU_MatrixMode(mode.into()) }
    }

    fn push_matrix(&self) {
        unsafe { sys::GPU_PushMatrix() }
    }

    fn pop_matrix(&self) {
        unsafe { sys::GPU_PopMatrix() }
    }

    fn load_identity(&self) {
        unsafe { sys::GPU_LoadIdentity() }
    }

    fn load_matrix(&self, m: &Mat4) {
        unsafe { sys::GPU_LoadMatrix(m.as_ptr()) }
    }

    fn mult_matrix(&self, m: &Mat4) {
        unsafe { sys::GPU_MultMatrix(m.as_ptr()) }
    }

    fn model_view(&self) -> Mat4 {
        read_matrix(unsafe { sys::GPU_GetModelView() })
    }

    fn projection(&self) -> Mat4 {
        read_matrix(unsafe { sys::GPU_GetProjection() })
    }

    fn current_matrix(&self) -> Mat4 {
        read_matrix(unsafe { sys::GPU_GetCurrentMatrix() })
    }

    fn translate(&self, x: f32, y: f32, z: f32) {
        unsafe { sys::GPU_Translate(x, y, z) }
    }

    fn scale(&self, x: f32, y: f32, z: f32) {
        unsafe { sys::GPU_Scale(x, y, z) }
    }

    fn rotate(&self, degrees: f32, x: f32, y: f32, z: f32) {
        unsafe { sys::GPU_Rotate(degrees, x, y, z) }
    }

    fn ortho(&self, left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) {
        unsafe { sys::GPU_Ortho(left, right, bottom, top, near, far) }
    }

    fn frustum(&self, left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) {
        unsafe { sys::GPU_Frustum(left, right, bottom, top, near, far) }
    }

    // ── shaders ─────────────────────────────────────────────────────────

    fn compile_shader(&self, kind: ShaderType, source: &str) -> Result<ShaderHandle> {
        let c = c_string("GPU_CompileShader", source)?;
        match unsafe { sys::GPU_CompileShader(kind.into(), c.as_ptr()) } {
            0 => Err(shader_failure("GPU_CompileShader")),
            id => Ok(ShaderHandle::from_raw(id)),
        }
    }

    fn load_shader(&self, kind: ShaderType, path: &str) -> Result<ShaderHandle> {
        let c = c_string("GPU_LoadShader", path)?;
        match unsafe { sys::GPU_LoadShader(kind.into(), c.as_ptr()) } {
            0 => Err(shader_failure("GPU_LoadShader")),
            id => Ok(ShaderHandle::from_raw(id)),
        }
    }

    fn free_shader(&self, shader: ShaderHandle) -> Result<()> {
        unsafe { sys::GPU_FreeShader(shader.raw()) }
        Ok(())
    }

    fn create_program(&self) -> Result<ProgramHandle> {
        match unsafe { sys::GPU_CreateShaderProgram() } {
            0 => Err(null_result("GPU_CreateShaderProgram")),
            id => Ok(ProgramHandle::from_raw(id)),
        }
    }

    fn link_many_shaders(&self, shaders: &[ShaderHandle]) -> Result<ProgramHandle> {
        let mut ids: Vec<u32> = shaders.iter().map(|s| s.raw()).collect();
        match unsafe { sys::GPU_LinkManyShaders(ids.as_mut_ptr(), ids.len() as c_int) } {
            0 => Err(shader_failure("GPU_LinkManyShaders")),
            id => Ok(ProgramHandle::from_raw(id)),
        }
    }

    fn free_program(&self, program: ProgramHandle) -> Result<()> {
        unsafe { sys::GPU_FreeShaderProgram(program.raw()) }
        Ok(())
    }

    fn attach_shader(&self, program: ProgramHandle, shader: ShaderHandle) -> Result<()> {
        unsafe { sys::GPU_AttachShader(program.raw(), shader.raw()) }
        Ok(())
    }

    fn detach_shader(&self, program: ProgramHandle, shader: ShaderHandle) -> Result<()> {
        unsafe { sys::GPU_DetachShader(program.raw(), shader.raw()) }
        Ok(())
    }

    fn link_program(&self, program: ProgramHandle) -> Result<bool> {
        Ok(unsafe { sys::GPU_LinkShaderProgram(program.raw()) })
    }

    fn activate_program(&self, program: ProgramHandle, block: Option<ShaderBlock>) -> Result<()> {
        let mut block = block;
        let ptr = block.as_mut().map_or(std::ptr::null_mut(), |b| b as *mut ShaderBlock);
        unsafe { sys::GPU_ActivateShaderProgram(program.raw(), ptr) }
        Ok(())
    }

    fn deactivate_program(&self) {
        unsafe { sys::GPU_DeactivateShaderProgram() }
    }

    fn current_program(&self) -> u32 {
        unsafe { sys::GPU_GetCurrentShaderProgram() }
    }

    fn is_default_program(&self, program: ProgramHandle) -> bool {
        unsafe { sys::GPU_IsDefaultShaderProgram(program.raw()) }
    }

    fn shader_message(&self) -> String {
        read_str(unsafe { sys::GPU_GetShaderMessage() })
    }

    fn attribute_location(&self, program: ProgramHandle, name: &str) -> Result<i32> {
        let c = c_string("GPU_GetAttributeLocation", name)?;
        Ok(unsafe { sys::GPU_GetAttributeLocation(program.raw(), c.as_ptr()) })
    }

    fn uniform_location(&self, program: ProgramHandle, name: &str) -> Result<i32> {
        let c = c_string("GPU_GetUniformLocation", name)?;
        Ok(unsafe { sys::GPU_GetUniformLocation(program.raw(), c.as_ptr()) })
    }

    fn load_shader_block(
        &self,
        program: ProgramHandle,
        position_name: &str,
        texcoord_name: &str,
        color_name: &str,
        modelview_name: &str,
    ) -> Result<ShaderBlock> {
        const FUNC: &str = "GPU_LoadShaderBlock";
        let (p, t, c, m) = (
            c_string(FUNC, position_name)?,
            c_string(FUNC, texcoord_name)?,
            c_string(FUNC, color_name)?,
            c_string(FUNC, modelview_name)?,
        );
        Ok(unsafe { sys::GPU_LoadShaderBlock(program.raw(), p.as_ptr(), t.as_ptr(), c.as_ptr(), m.as_ptr()) })
    }

    fn shader_block(&self) -> ShaderBlock {
        unsafe { sys::GPU_GetShaderBlock() }
    }

    fn set_shader_block(&self, block: ShaderBlock) {
        unsafe { sys::GPU_SetShaderBlock(block) }
    }

    fn set_shader_image(&self, image: Option<ImageHandle>, location: i32, image_unit: i32) -> Result<()> {
        unsafe { sys::GPU_SetShaderImage(opt_image_ptr(image), location, image_unit) }
        Ok(())
    }

    fn set_uniform(&self, location: i32, value: &UniformValue) {
        fn count(len: usize, per_value: i32) -> Option<c_int> {
            let per = usize::try_from(per_value).ok().filter(|&p| p > 0)?;
            c_int::try_from(len / per).ok()
        }

        match value {
            UniformValue::Int(v) => unsafe { sys::GPU_SetUniformi(location, *v) },
            UniformValue::UInt(v) => unsafe { sys::GPU_SetUniformui(location, *v) },
            UniformValue::Float(v) => unsafe { sys::GPU_SetUniformf(location, *v) },
            UniformValue::IntVec { elems_per_value, values } => {
                if let Some(n) = count(values.len(), *elems_per_value) {
                    unsafe { sys::GPU_SetUniformiv(location, *elems_per_value, n, values.as_ptr().cast_mut()) }
                }
            }
            UniformValue::UIntVec { elems_per_value, values } => {
                if let Some(n) = count(values.len(), *elems_per_value) {
                    unsafe { sys::GPU_SetUniformuiv(location, *elems_per_value, n, values.as_ptr().cast_mut()) }
                }
            }
            UniformValue::FloatVec { elems_per_value, values } => {
                if let Some(n) = count(values.len(), *elems_per_value) {
                    unsafe { sys::GPU_SetUniformfv(location, *elems_per_value, n, values.as_ptr().cast_mut()) }
                }
            }
            UniformValue::Matrix { num_matrices, rows, cols, transpose, values } => {
                let needed = [*num_matrices, *rows, *cols]
                    .iter()
                    .try_fold(1usize, |acc, &d| usize::try_from(d).ok().map(|d| acc * d));
                match needed {
                    Some(n) if n <= values.len() => unsafe {
                        sys::GPU_SetUniformMatrixfv(
                            location,
                            *num_matrices,
                            *rows,
                            *cols,
                            *transpose,
                            values.as_ptr().cast_mut(),
                        )
                    },
                    _ => log::warn!("set_uniform_matrixfv: {} values do not cover the requested matrices", values.len()),
                }
            }
        }
    }

    fn set_attribute(&self, location: i32, value: &AttributeValue) {
        match value {
            AttributeValue::Float(v) => unsafe { sys::GPU_SetAttributef(location, *v) },
            AttributeValue::Int(v) => unsafe { sys::GPU_SetAttributei(location, *v) },
            AttributeValue::UInt(v) => unsafe { sys::GPU_SetAttributeui(location, *v) },
            AttributeValue::FloatVec(v) => unsafe {
                sys::GPU_SetAttributefv(location, v.len() as c_int, v.as_ptr().cast_mut())
            },
            AttributeValue::IntVec(v) => unsafe {
                sys::GPU_SetAttributeiv(location, v.len() as c_int, v.as_ptr().cast_mut())
            },
            AttributeValue::UIntVec(v) => unsafe {
                sys::GPU_SetAttributeuiv(location, v.len() as c_int, v.as_ptr().cast_mut())
            },
        }
    }

    fn set_attribute_source(&self, num_values: i32, attribute: &Attribute) {
        let mut data = self.attribute_data.borrow_mut();
        let bytes = data.entry(attribute.location).or_default();
        *bytes = attribute.bytes().to_vec();

        let f = attribute.format;
        let raw = sys::GPU_Attribute {
            location: attribute.location,
            values: bytes.as_mut_ptr().cast(),
            format: sys::GPU_AttributeFormat {
                is_per_sprite: f.is_per_sprite,
                num_elems_per_value: f.num_elems_per_value,
                type_: f.kind.into(),
                normalize: f.normalize,
                stride_bytes: f.stride_bytes,
                offset_bytes: f.offset_bytes,
            },
        };
        unsafe { sys::GPU_SetAttributeSource(num_values, raw) }
    }
}
