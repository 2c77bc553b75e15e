use std::cell::RefCell;
use std::rc::Rc;

use crate::backend::Backend;
use crate::coords::{Color, Rect};
use crate::draw::{BlitTransform, DrawCmd, Shape};
use crate::error::{NativeError, Result};
use crate::handle::{ImageHandle, ProgramHandle, RendererHandle, ShaderHandle, TargetHandle};
use crate::types::{
    matrix, Attribute, AttributeValue, BatchFlags, BlendEq, BlendFunc, BlendMode, BlendPreset, Camera,
    ContextInfo, DebugLevel, ErrorCode, ErrorObject, FeatureFlags, FileFormat, FilterMode, ImageFormat, ImageInfo,
    InitFlags, Mat4, MatrixMode, RendererEnum, RendererId, RendererInfo, ShaderBlock, ShaderLanguage, ShaderType,
    SnapMode, TargetInfo, UniformValue, Version, WindowFlags, WrapMode,
};

use super::state::{
    declares, Context, ImageSlot, ProgramSlot, RendererSlot, ShaderSlot, State, TargetSlot, DEFAULT_PROGRAM_SOURCE,
    HEADLESS_FEATURES,
};
use super::{pixels, Headless};

const DEFAULT_WINDOW_W: u16 = 640;
const DEFAULT_WINDOW_H: u16 = 480;

fn new_window_target(s: &mut State, renderer: RendererHandle, window_id: u32, w: u16, h: u16, program: u32) -> TargetHandle {
    let handle = TargetHandle::from_raw(s.next_handle());
    let mut slot = TargetSlot::new(renderer, Rc::new(RefCell::new(pixels::blank(w, h))), w, h);
    slot.context = Some(Context::new(window_id, w, h, program));
    s.targets.insert(handle, slot);
    s.counters.targets_created += 1;
    handle
}

fn lookup_renderer_id(s: &State, renderer: RendererEnum) -> RendererId {
    s.registered
        .iter()
        .find(|id| id.renderer == renderer)
        .cloned()
        .unwrap_or_else(|| RendererId::new("Unknown", RendererEnum::UNKNOWN, 0, 0))
}

fn init_by_id(s: &mut State, id: &RendererId, w: u16, h: u16, flags: WindowFlags) -> Result<TargetHandle> {
    const FUNC: &str = "GPU_InitRendererByID";

    if !s.is_registered(id.renderer) {
        return Err(NativeError::failed(FUNC, format!("renderer '{}' is not registered", id.name)));
    }
    let missing = s.required_features.difference(HEADLESS_FEATURES);
    if !missing.is_empty() {
        return Err(NativeError::failed(FUNC, format!("renderer does not support required features {missing:?}")));
    }
    if w == 0 || h == 0 {
        return Err(NativeError::failed(FUNC, "window size must be non-zero"));
    }

    if let Some(existing) = s.active_renderer(id.renderer) {
        let target = s.renderers.get(&existing).and_then(|r| r.current_context_target);
        if let Some(target) = target.filter(|t| s.targets.contains_key(t)) {
            s.current_renderer = Some(existing);
            return Ok(target);
        }
        s.drop_renderer(existing);
    }

    let renderer = RendererHandle::from_raw(s.next_handle());
    let textured = s.next_object();
    let untextured = s.next_object();
    s.programs.insert(ProgramHandle::from_raw(textured), ProgramSlot::linked_from(DEFAULT_PROGRAM_SOURCE));
    s.programs.insert(ProgramHandle::from_raw(untextured), ProgramSlot::linked_from(DEFAULT_PROGRAM_SOURCE));

    let window_id = if s.init_window != 0 { s.init_window } else { s.next_window() };
    let target = new_window_target(s, renderer, window_id, w, h, untextured);

    let slot = RendererSlot {
        id: lookup_renderer_id(s, id.renderer),
        requested_id: id.clone(),
        sdl_init_flags: flags.bits(),
        gpu_init_flags: s.pre_init_flags,
        current_context_target: Some(target),
        default_textured: textured,
        default_untextured: untextured,
    };
    log::debug!("headless: initialised renderer '{}' ({w}x{h}, window {window_id})", slot.id.name);
    s.renderers.insert(renderer, slot);
    s.current_renderer = Some(renderer);
    s.fullscreen = flags.contains(WindowFlags::FULLSCREEN);
    Ok(target)
}

/// Records `cmd` on `target` together with the active clip rect.
fn record(s: &mut State, target: TargetHandle, cmd: DrawCmd) -> Result<()> {
    let slot = s.target_mut(target)?;
    let clip = slot.clip_rect;
    slot.draws.push(cmd, clip);
    Ok(())
}

impl Backend for Headless {
    // ── initialization ──────────────────────────────────────────────────

    fn linked_version(&self) -> Version {
        Version::new(0, 11, 0)
    }

    fn set_init_window(&self, window_id: u32) {
        self.state.borrow_mut().init_window = window_id;
    }

    fn init_window(&self) -> u32 {
        self.state.borrow().init_window
    }

    fn set_pre_init_flags(&self, flags: InitFlags) {
        self.state.borrow_mut().pre_init_flags = flags;
    }

    fn pre_init_flags(&self) -> InitFlags {
        self.state.borrow().pre_init_flags
    }

    fn set_required_features(&self, features: FeatureFlags) {
        self.state.borrow_mut().required_features = features;
    }

    fn required_features(&self) -> FeatureFlags {
        self.state.borrow().required_features
    }

    fn default_renderer_order(&self) -> Vec<RendererId> {
        State::default_order()
    }

    fn renderer_order(&self) -> Vec<RendererId> {
        self.state.borrow().renderer_order.clone()
    }

    fn set_renderer_order(&self, order: &[RendererId]) {
        let mut s = self.state.borrow_mut();
        s.renderer_order = if order.is_empty() { State::default_order() } else { order.to_vec() };
    }

    fn init(&self, w: u16, h: u16, flags: WindowFlags) -> Result<TargetHandle> {
        let mut s = self.state.borrow_mut();
        let order = s.renderer_order.clone();

        let mut last = None;
        for id in &order {
            match init_by_id(&mut s, id, w, h, flags) {
                Ok(target) => return Ok(target),
                Err(e) => last = Some(e),
            }
        }
        let details = match last {
            Some(e) => format!("no renderer could be initialised ({e})"),
            None => "renderer order is empty".to_owned(),
        };
        Err(NativeError::failed("GPU_Init", details))
    }

    fn init_renderer(&self, renderer: RendererEnum, w: u16, h: u16, flags: WindowFlags) -> Result<TargetHandle> {
        let mut s = self.state.borrow_mut();
        let id = lookup_renderer_id(&s, renderer);
        init_by_id(&mut s, &id, w, h, flags)
    }

    fn init_renderer_by_id(&self, id: &RendererId, w: u16, h: u16, flags: WindowFlags) -> Result<TargetHandle> {
        init_by_id(&mut self.state.borrow_mut(), id, w, h, flags)
    }

    fn is_feature_enabled(&self, feature: FeatureFlags) -> bool {
        let s = self.state.borrow();
        s.current_renderer.is_some() && HEADLESS_FEATURES.contains(feature)
    }

    fn close_current_renderer(&self) {
        let mut s = self.state.borrow_mut();
        if let Some(r) = s.current_renderer {
            s.drop_renderer(r);
        }
    }

    fn quit(&self) {
        self.state.borrow_mut().reset();
    }

    // ── debugging ───────────────────────────────────────────────────────

    fn set_debug_level(&self, level: DebugLevel) {
        self.state.borrow_mut().debug_level = level;
    }

    fn debug_level(&self) -> DebugLevel {
        self.state.borrow().debug_level
    }

    fn pop_error(&self) -> Option<ErrorObject> {
        self.state.borrow_mut().pop_error()
    }

    // ── renderers ───────────────────────────────────────────────────────

    fn renderer_id(&self, renderer: RendererEnum) -> RendererId {
        lookup_renderer_id(&self.state.borrow(), renderer)
    }

    fn registered_renderers(&self) -> Vec<RendererId> {
        self.state.borrow().registered.clone()
    }

    fn reserve_next_renderer_enum(&self) -> RendererEnum {
        let mut s = self.state.borrow_mut();
        let e = RendererEnum(s.next_renderer_enum);
        s.next_renderer_enum += 1;
        e
    }

    fn active_renderers(&self) -> Vec<RendererId> {
        let s = self.state.borrow();
        let mut ids: Vec<RendererId> = s.renderers.values().map(|r| r.id.clone()).collect();
        ids.sort_by_key(|id| id.renderer.0);
        ids
    }

    fn renderer(&self, id: &RendererId) -> Option<RendererHandle> {
        let s = self.state.borrow();
        s.renderers
            .iter()
            .find(|(_, r)| {
                r.id.renderer == id.renderer
                    && r.id.major_version == id.major_version
                    && r.id.minor_version == id.minor_version
            })
            .map(|(h, _)| *h)
    }

    fn current_renderer(&self) -> Option<RendererHandle> {
        self.state.borrow().current_renderer
    }

    fn renderer_info(&self, renderer: RendererHandle) -> Result<RendererInfo> {
        let s = self.state.borrow();
        let r = s
            .renderers
            .get(&renderer)
            .ok_or(NativeError::UnknownHandle { kind: "renderer", raw: renderer.raw() })?;
        Ok(RendererInfo {
            id: r.id.clone(),
            requested_id: r.requested_id.clone(),
            sdl_init_flags: r.sdl_init_flags,
            gpu_init_flags: r.gpu_init_flags,
            shader_language: ShaderLanguage::Glsl,
            min_shader_version: 110,
            max_shader_version: 330,
            enabled_features: HEADLESS_FEATURES,
            current_context_target: r.current_context_target,
        })
    }

    fn set_current_renderer(&self, id: &RendererId) {
        let found = self.renderer(id);
        self.state.borrow_mut().current_renderer = found;
    }

    fn reset_renderer_state(&self) {
        // no cached GL state to re-apply
        log::trace!("headless: reset_renderer_state");
    }

    // ── context / window ────────────────────────────────────────────────

    fn context_target(&self) -> Option<TargetHandle> {
        self.state.borrow().context_target()
    }

    fn window_target(&self, window_id: u32) -> Option<TargetHandle> {
        let s = self.state.borrow();
        s.targets
            .iter()
            .find(|(_, t)| t.context.as_ref().is_some_and(|c| c.window_id == window_id))
            .map(|(h, _)| *h)
    }

    fn create_target_from_window(&self, window_id: u32) -> Result<TargetHandle> {
        let mut s = self.state.borrow_mut();
        let renderer = s.require_renderer()?;
        if window_id == 0 {
            return Err(NativeError::failed("GPU_CreateTargetFromWindow", "window id 0 is not a window"));
        }
        let (w, h) = s
            .context()
            .map(|c| (c.window_w as u16, c.window_h as u16))
            .unwrap_or((DEFAULT_WINDOW_W, DEFAULT_WINDOW_H));
        let program = s.renderers.get(&renderer).map_or(0, |r| r.default_untextured);
        Ok(new_window_target(&mut s, renderer, window_id, w, h, program))
    }

    fn make_current(&self, target: TargetHandle, window_id: u32) -> Result<()> {
        let mut s = self.state.borrow_mut();
        let slot = s.target_mut(target)?;
        let renderer = slot.renderer;
        let Some(ctx) = slot.context.as_mut() else {
            return Err(NativeError::failed("GPU_MakeCurrent", "target has no context"));
        };
        ctx.window_id = window_id;
        if let Some(r) = s.renderers.get_mut(&renderer) {
            r.current_context_target = Some(target);
        }
        s.current_renderer = Some(renderer);
        Ok(())
    }

    fn context_info(&self, target: TargetHandle) -> Result<Option<ContextInfo>> {
        let s = self.state.borrow();
        let t = s.target(target)?;
        let Some(c) = t.context.as_ref() else {
            return Ok(None);
        };
        let r = s.renderers.get(&t.renderer);
        Ok(Some(ContextInfo {
            window_id: c.window_id,
            window_w: c.window_w,
            window_h: c.window_h,
            drawable_w: c.window_w,
            drawable_h: c.window_h,
            current_shader_program: c.current_program,
            default_textured_shader_program: r.map_or(0, |r| r.default_textured),
            default_untextured_shader_program: r.map_or(0, |r| r.default_untextured),
            shapes_use_blending: c.shapes_use_blending,
            shapes_blend_mode: c.shapes_blend_mode,
            line_thickness: c.line_thickness,
            use_texturing: true,
            matrix_mode: c.matrix_mode,
            projection_matrix: c.projection.clone(),
            modelview_matrix: c.modelview.clone(),
        }))
    }

    fn set_window_resolution(&self, w: u16, h: u16) -> bool {
        let mut s = self.state.borrow_mut();
        if w == 0 || h == 0 {
            s.report("GPU_SetWindowResolution", ErrorCode::UserError, "window size must be non-zero");
            return false;
        }
        let Some(target) = s.context_target() else {
            return false;
        };
        let Ok(slot) = s.target_mut(target) else {
            return false;
        };

        *slot.pixels.borrow_mut() = pixels::blank(w, h);
        slot.base_w = w;
        slot.base_h = h;
        if !slot.using_virtual_resolution {
            slot.w = w;
            slot.h = h;
        }
        slot.viewport = Rect::new(0.0, 0.0, f32::from(slot.w), f32::from(slot.h));
        if let Some(ctx) = slot.context.as_mut() {
            ctx.window_w = i32::from(w);
            ctx.window_h = i32::from(h);
        }
        true
    }

    fn set_fullscreen(&self, enable: bool, _use_desktop_resolution: bool) -> bool {
        let mut s = self.state.borrow_mut();
        if s.current_renderer.is_none() {
            return false;
        }
        s.fullscreen = enable;
        enable
    }

    fn fullscreen(&self) -> bool {
        self.state.borrow().fullscreen
    }

    fn set_shape_blending(&self, enable: bool) {
        if let Some(c) = self.state.borrow_mut().context_mut() {
            c.shapes_use_blending = enable;
        }
    }

    fn set_shape_blend_function(&self, sc: BlendFunc, dc: BlendFunc, sa: BlendFunc, da: BlendFunc) {
        if let Some(c) = self.state.borrow_mut().context_mut() {
            let m = &mut c.shapes_blend_mode;
            m.source_color = sc;
            m.dest_color = dc;
            m.source_alpha = sa;
            m.dest_alpha = da;
        }
    }

    fn set_shape_blend_equation(&self, color: BlendEq, alpha: BlendEq) {
        if let Some(c) = self.state.borrow_mut().context_mut() {
            c.shapes_blend_mode.color_equation = color;
            c.shapes_blend_mode.alpha_equation = alpha;
        }
    }

    fn set_shape_blend_mode(&self, preset: BlendPreset) {
        if let Some(c) = self.state.borrow_mut().context_mut() {
            c.shapes_blend_mode = BlendMode::from_preset(preset);
        }
    }

    fn set_line_thickness(&self, thickness: f32) -> f32 {
        match self.state.borrow_mut().context_mut() {
            Some(c) => std::mem::replace(&mut c.line_thickness, thickness),
            None => 1.0,
        }
    }

    fn line_thickness(&self) -> f32 {
        self.state.borrow().context().map_or(1.0, |c| c.line_thickness)
    }

    fn flush_blit_buffer(&self) {}

    // ── targets ─────────────────────────────────────────────────────────

    fn target_info(&self, target: TargetHandle) -> Result<TargetInfo> {
        let s = self.state.borrow();
        let t = s.target(target)?;
        Ok(TargetInfo {
            image: t.image,
            w: t.w,
            h: t.h,
            base_w: t.base_w,
            base_h: t.base_h,
            using_virtual_resolution: t.using_virtual_resolution,
            clip_rect: t.clip_rect,
            color: t.color,
            viewport: t.viewport,
            has_context: t.context.is_some(),
            refcount: t.refcount,
            is_alias: t.is_alias,
        })
    }

    fn free_target(&self, target: TargetHandle) -> Result<()> {
        let mut s = self.state.borrow_mut();
        let slot = s.target_mut(target)?;
        slot.refcount -= 1;
        let remaining = slot.refcount;
        s.counters.targets_freed += 1;
        if remaining > 0 {
            return Ok(());
        }

        let image = s.targets.remove(&target).and_then(|slot| slot.image);
        if let Some(image) = image {
            if let Some(img) = s.images.get_mut(&image) {
                if img.target == Some(target) {
                    img.target = None;
                }
            }
        }
        for r in s.renderers.values_mut() {
            if r.current_context_target == Some(target) {
                r.current_context_target = None;
            }
        }
        Ok(())
    }

    fn create_alias_target(&self, target: TargetHandle) -> Result<TargetHandle> {
        let mut s = self.state.borrow_mut();
        let src = s.target(target)?;
        let mut alias = TargetSlot::new(src.renderer, Rc::clone(&src.pixels), src.base_w, src.base_h);
        alias.image = src.image;
        alias.w = src.w;
        alias.h = src.h;
        alias.using_virtual_resolution = src.using_virtual_resolution;
        alias.clip_rect = src.clip_rect;
        alias.color = src.color;
        alias.viewport = src.viewport;
        alias.camera = src.camera;
        alias.is_alias = true;

        let handle = TargetHandle::from_raw(s.next_handle());
        s.targets.insert(handle, alias);
        s.counters.targets_created += 1;
        Ok(handle)
    }

    fn load_target(&self, image: ImageHandle) -> Result<TargetHandle> {
        let mut s = self.state.borrow_mut();
        let img = s.image(image)?;
        if let Some(existing) = img.target {
            if let Ok(t) = s.target_mut(existing) {
                t.refcount += 1;
                return Ok(existing);
            }
        }

        let img = s.image(image)?;
        let mut slot = TargetSlot::new(img.renderer, Rc::clone(&img.pixels), img.base_w, img.base_h);
        slot.image = Some(image);
        slot.w = img.w;
        slot.h = img.h;
        slot.using_virtual_resolution = img.using_virtual_resolution;

        let handle = TargetHandle::from_raw(s.next_handle());
        s.targets.insert(handle, slot);
        s.counters.targets_created += 1;
        s.image_mut(image)?.target = Some(handle);
        Ok(handle)
    }

    fn set_target_virtual_resolution(&self, target: TargetHandle, w: u16, h: u16) -> Result<()> {
        let mut s = self.state.borrow_mut();
        let t = s.target_mut(target)?;
        if w == 0 || h == 0 {
            return Ok(());
        }
        t.w = w;
        t.h = h;
        t.using_virtual_resolution = true;
        t.viewport = Rect::new(0.0, 0.0, f32::from(w), f32::from(h));
        Ok(())
    }

    fn unset_target_virtual_resolution(&self, target: TargetHandle) -> Result<()> {
        let mut s = self.state.borrow_mut();
        let t = s.target_mut(target)?;
        t.w = t.base_w;
        t.h = t.base_h;
        t.using_virtual_resolution = false;
        t.viewport = Rect::new(0.0, 0.0, f32::from(t.w), f32::from(t.h));
        Ok(())
    }

    fn virtual_coords(&self, target: TargetHandle, x: f32, y: f32) -> Result<(f32, f32)> {
        let s = self.state.borrow();
        let t = s.target(target)?;
        if !t.using_virtual_resolution || t.base_w == 0 || t.base_h == 0 {
            return Ok((x, y));
        }
        Ok((x * f32::from(t.w) / f32::from(t.base_w), y * f32::from(t.h) / f32::from(t.base_h)))
    }

    fn set_viewport(&self, target: TargetHandle, viewport: Rect) -> Result<()> {
        self.state.borrow_mut().target_mut(target)?.viewport = viewport;
        Ok(())
    }

    fn camera(&self, target: TargetHandle) -> Result<Camera> {
        Ok(self.state.borrow().target(target)?.camera)
    }

    fn set_camera(&self, target: TargetHandle, camera: Option<Camera>) -> Result<Camera> {
        let mut s = self.state.borrow_mut();
        let t = s.target_mut(target)?;
        Ok(std::mem::replace(&mut t.camera, camera.unwrap_or_default()))
    }

    fn pixel(&self, target: TargetHandle, x: i16, y: i16) -> Result<Color> {
        let s = self.state.borrow();
        let t = s.target(target)?;
        let px = t.pixels.borrow();
        Ok(pixels::read(&px, x, y))
    }

    fn set_clip_rect(&self, target: TargetHandle, rect: Rect) -> Result<Rect> {
        let mut s = self.state.borrow_mut();
        let t = s.target_mut(target)?;
        let whole = Rect::new(0.0, 0.0, f32::from(t.w), f32::from(t.h));
        let previous = t.clip_rect.unwrap_or(whole);
        t.clip_rect = Some(rect);
        Ok(previous)
    }

    fn unset_clip(&self, target: TargetHandle) -> Result<()> {
        self.state.borrow_mut().target_mut(target)?.clip_rect = None;
        Ok(())
    }

    fn set_target_color(&self, target: TargetHandle, color: Option<Color>) -> Result<()> {
        self.state.borrow_mut().target_mut(target)?.color = color;
        Ok(())
    }

    fn copy_image_from_target(&self, target: TargetHandle) -> Result<ImageHandle> {
        let mut s = self.state.borrow_mut();
        let t = s.target(target)?;
        let buffer = Rc::new(RefCell::new(t.pixels.borrow().clone()));
        let slot = ImageSlot::new(t.renderer, buffer, ImageFormat::Rgba);

        let handle = ImageHandle::from_raw(s.next_handle());
        s.images.insert(handle, slot);
        s.counters.images_created += 1;
        Ok(handle)
    }

    fn clear(&self, target: TargetHandle, color: Option<Color>) -> Result<()> {
        let mut s = self.state.borrow_mut();
        {
            let t = s.target(target)?;
            pixels::fill(&mut t.pixels.borrow_mut(), t.clip_rect, color.unwrap_or_default());
        }
        record(&mut s, target, DrawCmd::Clear(color))
    }

    fn flip(&self, target: TargetHandle) -> Result<()> {
        let mut s = self.state.borrow_mut();
        let slot = s.target_mut(target)?;
        slot.flips += 1;
        slot.draws.present();
        s.counters.flips += 1;
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
        let mut s = self.state.borrow_mut();
        s.image(image)?;
        record(&mut s, target, DrawCmd::Blit { image, src, x, y, transform })
    }

    fn blit_rect(&self, target: TargetHandle, image: ImageHandle, src: Option<Rect>, dest: Option<Rect>) -> Result<()> {
        let mut s = self.state.borrow_mut();
        s.image(image)?;
        record(&mut s, target, DrawCmd::BlitRect { image, src, dest })
    }

    fn draw(&self, target: TargetHandle, shape: &Shape, color: Color) -> Result<()> {
        let mut s = self.state.borrow_mut();
        if let Shape::Pixel { x, y } = *shape {
            let t = s.target(target)?;
            let inside = t.clip_rect.is_none_or(|clip| clip.contains(x, y));
            if inside {
                let area = Rect::new(x.floor(), y.floor(), 1.0, 1.0);
                pixels::fill(&mut t.pixels.borrow_mut(), Some(area), color);
            }
        }
        record(&mut s, target, DrawCmd::Shape { shape: shape.clone(), color })
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

        let mut s = self.state.borrow_mut();
        if let Some(image) = image {
            s.image(image)?;
        }
        let Some(stride) = flags.floats_per_vertex() else {
            return Err(NativeError::failed(FUNC, "batch flags need exactly one of XY or XYZ"));
        };
        if values.len() % stride != 0 {
            return Err(NativeError::failed(
                FUNC,
                format!("{} values do not divide into vertices of {stride}", values.len()),
            ));
        }
        let cmd = DrawCmd::TriangleBatch {
            image,
            num_vertices: values.len() / stride,
            num_indices: indices.map_or(0, <[u16]>::len),
            flags,
        };
        record(&mut s, target, cmd)
    }

    // ── images ──────────────────────────────────────────────────────────

    fn create_image(&self, w: u16, h: u16, format: ImageFormat) -> Result<ImageHandle> {
        let mut s = self.state.borrow_mut();
        let renderer = s.require_renderer()?;
        if w == 0 || h == 0 {
            return Err(NativeError::failed("GPU_CreateImage", "image dimensions must be non-zero"));
        }
        let slot = ImageSlot::new(renderer, Rc::new(RefCell::new(pixels::blank(w, h))), format);
        let handle = ImageHandle::from_raw(s.next_handle());
        s.images.insert(handle, slot);
        s.counters.images_created += 1;
        Ok(handle)
    }

    fn load_image(&self, path: &str) -> Result<ImageHandle> {
        let mut s = self.state.borrow_mut();
        let renderer = s.require_renderer()?;
        let (buffer, format) =
            pixels::load(path).map_err(|e| NativeError::failed("GPU_LoadImage", format!("failed to load '{path}': {e}")))?;
        if buffer.width() > u32::from(u16::MAX) || buffer.height() > u32::from(u16::MAX) {
            return Err(NativeError::failed("GPU_LoadImage", format!("'{path}' is too large")));
        }
        let slot = ImageSlot::new(renderer, Rc::new(RefCell::new(buffer)), format);
        let handle = ImageHandle::from_raw(s.next_handle());
        s.images.insert(handle, slot);
        s.counters.images_created += 1;
        Ok(handle)
    }

    fn create_alias_image(&self, image: ImageHandle) -> Result<ImageHandle> {
        let mut s = self.state.borrow_mut();
        let alias = s.image(image)?.alias();
        let handle = ImageHandle::from_raw(s.next_handle());
        s.images.insert(handle, alias);
        s.counters.images_created += 1;
        Ok(handle)
    }

    fn copy_image(&self, image: ImageHandle) -> Result<ImageHandle> {
        let mut s = self.state.borrow_mut();
        let src = s.image(image)?;
        let mut copy = src.alias();
        copy.pixels = Rc::new(RefCell::new(src.pixels.borrow().clone()));
        copy.is_alias = false;
        copy.has_mipmaps = false;

        let handle = ImageHandle::from_raw(s.next_handle());
        s.images.insert(handle, copy);
        s.counters.images_created += 1;
        Ok(handle)
    }

    fn free_image(&self, image: ImageHandle) -> Result<()> {
        let mut s = self.state.borrow_mut();
        let slot = s
            .images
            .remove(&image)
            .ok_or(NativeError::UnknownHandle { kind: "image", raw: image.raw() })?;
        s.counters.images_freed += 1;
        if let Some(t) = slot.target {
            if let Some(t) = s.targets.get_mut(&t) {
                t.image = None;
            }
        }
        Ok(())
    }

    fn save_image(&self, image: ImageHandle, filename: &str, format: FileFormat) -> Result<bool> {
        let mut s = self.state.borrow_mut();
        let saved = {
            let img = s.image(image)?;
            let px = img.pixels.borrow();
            pixels::save(&px, img.format, filename, format)
        };
        match saved {
            Ok(()) => Ok(true),
            Err(e) => {
                s.report("GPU_SaveImage", ErrorCode::DataError, format!("failed to save '{filename}': {e}"));
                Ok(false)
            }
        }
    }

    fn image_info(&self, image: ImageHandle) -> Result<ImageInfo> {
        let s = self.state.borrow();
        let i = s.image(image)?;
        Ok(ImageInfo {
            renderer: Some(i.renderer),
            target: i.target,
            w: i.w,
            h: i.h,
            base_w: i.base_w,
            base_h: i.base_h,
            texture_w: i.base_w,
            texture_h: i.base_h,
            using_virtual_resolution: i.using_virtual_resolution,
            format: i.format,
            num_layers: 1,
            bytes_per_pixel: i.format.bytes_per_pixel(),
            has_mipmaps: i.has_mipmaps,
            color: i.color,
            use_blending: i.use_blending,
            blend_mode: i.blend_mode,
            filter_mode: i.filter_mode,
            snap_mode: i.snap_mode,
            wrap_mode_x: i.wrap_mode_x,
            wrap_mode_y: i.wrap_mode_y,
            refcount: 1,
            is_alias: i.is_alias,
        })
    }

    fn generate_mipmaps(&self, image: ImageHandle) -> Result<()> {
        self.state.borrow_mut().image_mut(image)?.has_mipmaps = true;
        Ok(())
    }

    fn set_image_color(&self, image: ImageHandle, color: Option<Color>) -> Result<()> {
        self.state.borrow_mut().image_mut(image)?.color = color.unwrap_or(Color::white());
        Ok(())
    }

    fn set_image_blending(&self, image: ImageHandle, enable: bool) -> Result<()> {
        self.state.borrow_mut().image_mut(image)?.use_blending = enable;
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
        let mut s = self.state.borrow_mut();
        let m = &mut s.image_mut(image)?.blend_mode;
        m.source_color = sc;
        m.dest_color = dc;
        m.source_alpha = sa;
        m.dest_alpha = da;
        Ok(())
    }

    fn set_image_blend_equation(&self, image: ImageHandle, color: BlendEq, alpha: BlendEq) -> Result<()> {
        let mut s = self.state.borrow_mut();
        let m = &mut s.image_mut(image)?.blend_mode;
        m.color_equation = color;
        m.alpha_equation = alpha;
        Ok(())
    }

    fn set_image_blend_mode(&self, image: ImageHandle, preset: BlendPreset) -> Result<()> {
        self.state.borrow_mut().image_mut(image)?.blend_mode = BlendMode::from_preset(preset);
        Ok(())
    }

    fn set_image_filter(&self, image: ImageHandle, filter: FilterMode) -> Result<()> {
        self.state.borrow_mut().image_mut(image)?.filter_mode = filter;
        Ok(())
    }

    fn set_image_snap(&self, image: ImageHandle, snap: SnapMode) -> Result<()> {
        self.state.borrow_mut().image_mut(image)?.snap_mode = snap;
        Ok(())
    }

    fn set_image_wrap(&self, image: ImageHandle, wrap_x: WrapMode, wrap_y: WrapMode) -> Result<()> {
        let mut s = self.state.borrow_mut();
        let i = s.image_mut(image)?;
        i.wrap_mode_x = wrap_x;
        i.wrap_mode_y = wrap_y;
        Ok(())
    }

    fn set_image_virtual_resolution(&self, image: ImageHandle, w: u16, h: u16) -> Result<()> {
        let mut s = self.state.borrow_mut();
        let i = s.image_mut(image)?;
        if w == 0 || h == 0 {
            return Ok(());
        }
        i.w = w;
        i.h = h;
        i.using_virtual_resolution = true;
        Ok(())
    }

    fn unset_image_virtual_resolution(&self, image: ImageHandle) -> Result<()> {
        let mut s = self.state.borrow_mut();
        let i = s.image_mut(image)?;
        i.w = i.base_w;
        i.h = i.base_h;
        i.using_virtual_resolution = false;
        Ok(())
    }

    fn update_image_bytes(
        &self,
        image: ImageHandle,
        rect: Option<Rect>,
        bytes: &[u8],
        bytes_per_row: i32,
    ) -> Result<()> {
        let s = self.state.borrow();
        let i = s.image(image)?;
        let mut px = i.pixels.borrow_mut();
        pixels::write_bytes(&mut px, i.format, rect, bytes, bytes_per_row)
    }

    // ── matrices ────────────────────────────────────────────────────────

    fn set_matrix_mode(&self, mode: MatrixMode) {
        if let Some(c) = self.state.borrow_mut().context_mut() {
            c.matrix_mode = mode;
        }
    }

    fn push_matrix(&self) {
        let mut s = self.state.borrow_mut();
        let full = s.context_mut().is_some_and(|c| !c.stack_mut().push());
        if full {
            s.report("GPU_PushMatrix", ErrorCode::UserError, "matrix stack is full");
        }
    }

    fn pop_matrix(&self) {
        let mut s = self.state.borrow_mut();
        let empty = s.context_mut().is_some_and(|c| !c.stack_mut().pop());
        if empty {
            s.report("GPU_PopMatrix", ErrorCode::UserError, "matrix stack is empty");
        }
    }

    fn load_identity(&self) {
        self.load_matrix(&matrix::identity());
    }

    fn load_matrix(&self, m: &Mat4) {
        if let Some(top) = self.state.borrow_mut().context_mut().and_then(|c| c.stack_mut().top_mut()) {
            *top = *m;
        }
    }

    fn mult_matrix(&self, m: &Mat4) {
        if let Some(top) = self.state.borrow_mut().context_mut().and_then(|c| c.stack_mut().top_mut()) {
            *top = matrix::multiply(top, m);
        }
    }

    fn model_view(&self) -> Mat4 {
        self.state.borrow().context().map_or_else(matrix::identity, |c| c.top(MatrixMode::ModelView))
    }

    fn projection(&self) -> Mat4 {
        self.state.borrow().context().map_or_else(matrix::identity, |c| c.top(MatrixMode::Projection))
    }

    fn current_matrix(&self) -> Mat4 {
        self.state.borrow().context().map_or_else(matrix::identity, |c| c.top(c.matrix_mode))
    }

    // ── shaders ─────────────────────────────────────────────────────────

    fn compile_shader(&self, kind: ShaderType, source: &str) -> Result<ShaderHandle> {
        let mut s = self.state.borrow_mut();
        s.require_renderer()?;

        let problem = if kind == ShaderType::Geometry && !HEADLESS_FEATURES.contains(FeatureFlags::GEOMETRY_SHADER) {
            Some("geometry shaders are not supported")
        } else if !declares(source, "main") {
            Some("no entry point 'main'")
        } else {
            None
        };
        if let Some(problem) = problem {
            s.shader_message = format!("{kind:?} shader: {problem}");
            return Err(NativeError::failed("GPU_CompileShader", s.shader_message.clone()));
        }

        s.shader_message.clear();
        let handle = ShaderHandle::from_raw(s.next_object());
        s.shaders.insert(handle, ShaderSlot { kind, source: source.to_owned() });
        Ok(handle)
    }

    fn load_shader(&self, kind: ShaderType, path: &str) -> Result<ShaderHandle> {
        let source = match std::fs::read_to_string(path) {
            Ok(source) => source,
            Err(e) => {
                let msg = format!("failed to open shader file '{path}': {e}");
                self.state.borrow_mut().shader_message = msg.clone();
                return Err(NativeError::failed("GPU_LoadShader", msg));
            }
        };
        self.compile_shader(kind, &source)
    }

    fn free_shader(&self, shader: ShaderHandle) -> Result<()> {
        let mut s = self.state.borrow_mut();
        s.shaders
            .remove(&shader)
            .ok_or(NativeError::UnknownHandle { kind: "shader", raw: u64::from(shader.raw()) })?;
        s.counters.shaders_freed += 1;
        Ok(())
    }

    fn create_program(&self) -> Result<ProgramHandle> {
        let mut s = self.state.borrow_mut();
        s.require_renderer()?;
        let handle = ProgramHandle::from_raw(s.next_object());
        s.programs.insert(handle, ProgramSlot::default());
        Ok(handle)
    }

    fn link_many_shaders(&self, shaders: &[ShaderHandle]) -> Result<ProgramHandle> {
        let program = self.create_program()?;
        let attached = shaders.iter().try_for_each(|&sh| self.attach_shader(program, sh));
        let linked = attached.and_then(|()| self.link_program(program));

        match linked {
            Ok(true) => Ok(program),
            Ok(false) => {
                let mut s = self.state.borrow_mut();
                s.programs.remove(&program);
                Err(NativeError::failed("GPU_LinkShaderProgram", s.shader_message.clone()))
            }
            Err(e) => {
                self.state.borrow_mut().programs.remove(&program);
                Err(e)
            }
        }
    }

    fn free_program(&self, program: ProgramHandle) -> Result<()> {
        let mut s = self.state.borrow_mut();
        s.programs
            .remove(&program)
            .ok_or(NativeError::UnknownHandle { kind: "program", raw: u64::from(program.raw()) })?;
        s.counters.programs_freed += 1;
        Ok(())
    }

    fn attach_shader(&self, program: ProgramHandle, shader: ShaderHandle) -> Result<()> {
        let mut s = self.state.borrow_mut();
        s.shader(shader)?;
        let p = s.program_mut(program)?;
        if !p.shaders.contains(&shader) {
            p.shaders.push(shader);
        }
        Ok(())
    }

    fn detach_shader(&self, program: ProgramHandle, shader: ShaderHandle) -> Result<()> {
        self.state.borrow_mut().program_mut(program)?.shaders.retain(|&sh| sh != shader);
        Ok(())
    }

    fn link_program(&self, program: ProgramHandle) -> Result<bool> {
        let mut s = self.state.borrow_mut();
        let attached = s.program_mut(program)?.shaders.clone();

        let mut sources = Vec::new();
        let mut kinds = Vec::new();
        for sh in attached {
            if let Some(slot) = s.shaders.get(&sh) {
                sources.push(slot.source.clone());
                kinds.push(slot.kind);
            }
        }
        let ok = kinds.contains(&ShaderType::Vertex) && kinds.contains(&ShaderType::Fragment);

        let p = s.program_mut(program)?;
        p.sources = sources;
        p.linked = ok;
        p.attributes.clear();
        p.uniforms.clear();

        if ok {
            s.shader_message.clear();
        } else {
            let msg = "program link failed: needs a vertex and a fragment shader";
            s.shader_message = msg.to_owned();
            s.report("GPU_LinkShaderProgram", ErrorCode::BackendError, msg);
        }
        Ok(ok)
    }

    fn activate_program(&self, program: ProgramHandle, block: Option<ShaderBlock>) -> Result<()> {
        let mut s = self.state.borrow_mut();
        let p = s.program_mut(program)?;
        if !p.linked {
            return Err(NativeError::failed("GPU_ActivateShaderProgram", "program is not linked"));
        }
        let block = block.unwrap_or_else(|| {
            ShaderBlock::new(
                p.attribute_location("gpu_Vertex"),
                p.attribute_location("gpu_TexCoord"),
                p.attribute_location("gpu_Color"),
                p.uniform_location("gpu_ModelViewProjectionMatrix"),
            )
        });
        s.shader_block = block;
        if let Some(c) = s.context_mut() {
            c.current_program = program.raw();
        }
        Ok(())
    }

    fn deactivate_program(&self) {
        let mut s = self.state.borrow_mut();
        s.shader_block = ShaderBlock::default();
        if let Some(c) = s.context_mut() {
            c.current_program = 0;
        }
    }

    fn current_program(&self) -> u32 {
        self.state.borrow().context().map_or(0, |c| c.current_program)
    }

    fn is_default_program(&self, program: ProgramHandle) -> bool {
        let raw = program.raw();
        self.state
            .borrow()
            .renderers
            .values()
            .any(|r| r.default_textured == raw || r.default_untextured == raw)
    }

    fn shader_message(&self) -> String {
        self.state.borrow().shader_message.clone()
    }

    fn attribute_location(&self, program: ProgramHandle, name: &str) -> Result<i32> {
        Ok(self.state.borrow_mut().program_mut(program)?.attribute_location(name))
    }

    fn uniform_location(&self, program: ProgramHandle, name: &str) -> Result<i32> {
        Ok(self.state.borrow_mut().program_mut(program)?.uniform_location(name))
    }

    fn load_shader_block(
        &self,
        program: ProgramHandle,
        position_name: &str,
        texcoord_name: &str,
        color_name: &str,
        modelview_name: &str,
    ) -> Result<ShaderBlock> {
        let mut s = self.state.borrow_mut();
        let p = s.program_mut(program)?;
        Ok(ShaderBlock::new(
            p.attribute_location(position_name),
            p.attribute_location(texcoord_name),
            p.attribute_location(color_name),
            p.uniform_location(modelview_name),
        ))
    }

    fn shader_block(&self) -> ShaderBlock {
        self.state.borrow().shader_block
    }

    fn set_shader_block(&self, block: ShaderBlock) {
        self.state.borrow_mut().shader_block = block;
    }

    fn set_shader_image(&self, image: Option<ImageHandle>, location: i32, image_unit: i32) -> Result<()> {
        let mut s = self.state.borrow_mut();
        if let Some(image) = image {
            s.image(image)?;
        }
        s.shader_images.insert(location, (image, image_unit));
        Ok(())
    }

    fn set_uniform(&self, location: i32, value: &UniformValue) {
        self.state.borrow_mut().uniforms.insert(location, value.clone());
    }

    fn set_attribute(&self, location: i32, value: &AttributeValue) {
        self.state.borrow_mut().attributes.insert(location, value.clone());
    }

    fn set_attribute_source(&self, num_values: i32, attribute: &Attribute) {
        self.state
            .borrow_mut()
            .attribute_sources
            .insert(attribute.location, (num_values, attribute.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn booted() -> (Headless, TargetHandle) {
        let h = Headless::new();
        let screen = h.init(64, 48, WindowFlags::empty()).unwrap();
        (h, screen)
    }

    // ── init ────────────────────────────────────────────────────────────

    #[test]
    fn init_picks_first_registered_in_order() {
        let (h, screen) = booted();
        let r = h.current_renderer().unwrap();
        let info = h.renderer_info(r).unwrap();
        assert_eq!(info.id.renderer, RendererEnum::OPENGL_3);
        assert_eq!(info.current_context_target, Some(screen));
        assert_eq!(h.context_target(), Some(screen));
    }

    #[test]
    fn unsupported_required_feature_fails_init() {
        let h = Headless::new();
        h.set_required_features(FeatureFlags::GEOMETRY_SHADER);
        assert!(matches!(h.init(10, 10, WindowFlags::empty()), Err(NativeError::Failed { .. })));
        assert!(h.current_renderer().is_none());
    }

    #[test]
    fn quit_forgets_objects_but_keeps_counters() {
        let (h, _) = booted();
        let img = h.create_image(4, 4, ImageFormat::Rgba).unwrap();
        h.quit();
        assert_eq!(h.live_images(), 0);
        assert!(h.image_info(img).is_err());
        assert_eq!(h.counters().images_created, 1);
        assert_eq!(h.counters().images_freed, 0);
    }

    // ── targets ─────────────────────────────────────────────────────────

    #[test]
    fn clear_then_read_pixel() {
        let (h, screen) = booted();
        h.clear(screen, Some(Color::rgba(10, 20, 30, 255))).unwrap();
        assert_eq!(h.pixel(screen, 5, 5).unwrap(), Color::rgba(10, 20, 30, 255));
        assert_eq!(h.pixel(screen, 500, 5).unwrap(), Color::transparent());
    }

    #[test]
    fn clip_rect_limits_clear_and_is_recorded() {
        let (h, screen) = booted();
        let prev = h.set_clip_rect(screen, Rect::new(0.0, 0.0, 2.0, 2.0)).unwrap();
        assert_eq!(prev, Rect::new(0.0, 0.0, 64.0, 48.0));
        h.clear(screen, Some(Color::white())).unwrap();
        assert_eq!(h.pixel(screen, 1, 1).unwrap(), Color::white());
        assert_eq!(h.pixel(screen, 3, 3).unwrap(), Color::transparent());

        let log = h.draw_log(screen).unwrap();
        assert_eq!(log.items()[0].clip_rect, Some(Rect::new(0.0, 0.0, 2.0, 2.0)));
    }

    #[test]
    fn virtual_resolution_scales_coords() {
        let (h, screen) = booted();
        h.set_target_virtual_resolution(screen, 32, 24).unwrap();
        assert_eq!(h.virtual_coords(screen, 10.0, 10.0).unwrap(), (5.0, 5.0));
        h.unset_target_virtual_resolution(screen).unwrap();
        assert_eq!(h.virtual_coords(screen, 10.0, 10.0).unwrap(), (10.0, 10.0));
    }

    #[test]
    fn load_target_is_shared_and_refcounted() {
        let (h, _) = booted();
        let img = h.create_image(8, 8, ImageFormat::Rgba).unwrap();
        let a = h.load_target(img).unwrap();
        let b = h.load_target(img).unwrap();
        assert_eq!(a, b);
        h.free_target(a).unwrap();
        assert!(h.target_info(b).is_ok());
        h.free_target(b).unwrap();
        assert!(h.target_info(b).is_err());
        assert_eq!(h.image_info(img).unwrap().target, None);
    }

    #[test]
    fn drawing_into_image_target_writes_image_pixels() {
        let (h, _) = booted();
        let img = h.create_image(4, 4, ImageFormat::Rgba).unwrap();
        let t = h.load_target(img).unwrap();
        h.draw(t, &Shape::Pixel { x: 2.0, y: 1.0 }, Color::rgb(9, 8, 7)).unwrap();
        let px = h.image_pixels(img).unwrap();
        assert_eq!(px.get_pixel(2, 1).0, [9, 8, 7, 255]);
    }

    #[test]
    fn batch_flags_are_validated() {
        let (h, screen) = booted();
        let values = [0.0; 6];
        assert!(h.triangle_batch(screen, None, &values, None, BatchFlags::ST).is_err());
        assert!(h.triangle_batch(screen, None, &values[..5], None, BatchFlags::XY).is_err());
        h.triangle_batch(screen, None, &values, Some(&[0, 1, 2]), BatchFlags::XY).unwrap();
        let log = h.draw_log(screen).unwrap();
        assert!(matches!(
            log.items()[0].cmd,
            DrawCmd::TriangleBatch { num_vertices: 3, num_indices: 3, .. }
        ));
    }

    #[test]
    fn flip_keeps_only_the_last_frame() {
        let (h, screen) = booted();
        for frame in 0..100 {
            h.clear(screen, None).unwrap();
            h.draw(screen, &Shape::Pixel { x: frame as f32 % 8.0, y: 0.0 }, Color::white()).unwrap();
            h.flip(screen).unwrap();
        }
        h.clear(screen, None).unwrap();

        let log = h.draw_log(screen).unwrap();
        assert_eq!(log.len(), 1);
        assert_eq!(log.presented().len(), 2);
        assert!(matches!(log.presented()[1].cmd, DrawCmd::Shape { shape: Shape::Pixel { x, .. }, .. } if x == 3.0));
        assert_eq!(h.counters().flips, 100);
    }

    // ── images ──────────────────────────────────────────────────────────

    #[test]
    fn images_need_a_renderer() {
        let h = Headless::new();
        assert!(matches!(h.create_image(4, 4, ImageFormat::Rgba), Err(NativeError::NoRenderer)));
    }

    #[test]
    fn alias_shares_pixels_and_survives_source_free() {
        let (h, _) = booted();
        let img = h.create_image(2, 2, ImageFormat::Rgba).unwrap();
        let alias = h.create_alias_image(img).unwrap();
        h.update_image_bytes(img, None, &[255; 16], 8).unwrap();
        assert_eq!(h.image_pixels(alias).unwrap().get_pixel(1, 1).0, [255; 4]);

        h.free_image(alias).unwrap();
        assert_eq!(h.image_pixels(img).unwrap().get_pixel(0, 0).0, [255; 4]);
        assert!(h.image_info(img).is_ok());
    }

    #[test]
    fn double_free_is_reported() {
        let (h, _) = booted();
        let img = h.create_image(1, 1, ImageFormat::Rgba).unwrap();
        h.free_image(img).unwrap();
        assert!(matches!(h.free_image(img), Err(NativeError::UnknownHandle { kind: "image", .. })));
        assert_eq!(h.counters().images_freed, 1);
    }

    #[test]
    fn failed_save_pushes_error() {
        let (h, _) = booted();
        let img = h.create_image(1, 1, ImageFormat::Rgba).unwrap();
        assert!(!h.save_image(img, "no_extension", FileFormat::Auto).unwrap());
        let err = h.pop_error().unwrap();
        assert_eq!(err.function, "GPU_SaveImage");
        assert_eq!(err.error, ErrorCode::DataError);
    }

    // ── matrices ────────────────────────────────────────────────────────

    #[test]
    fn matrix_ops_follow_mode() {
        let (h, _) = booted();
        h.translate(3.0, 4.0, 0.0);
        assert_eq!(h.model_view()[12], 3.0);
        h.set_matrix_mode(MatrixMode::Projection);
        h.scale(2.0, 2.0, 1.0);
        assert_eq!(h.current_matrix()[0], 2.0);
        assert_eq!(h.model_view()[0], 1.0);
    }

    #[test]
    fn pop_of_bottom_matrix_reports() {
        let (h, _) = booted();
        h.pop_matrix();
        assert_eq!(h.pop_error().unwrap().function, "GPU_PopMatrix");
    }

    // ── shaders ─────────────────────────────────────────────────────────

    #[test]
    fn compile_failure_sets_message() {
        let (h, _) = booted();
        assert!(h.compile_shader(ShaderType::Vertex, "void nope() {}").is_err());
        assert!(h.shader_message().contains("main"));
    }

    #[test]
    fn link_and_locate() {
        let (h, _) = booted();
        let vs = h.compile_shader(ShaderType::Vertex, "attribute vec2 pos; void main() {}").unwrap();
        let fs = h.compile_shader(ShaderType::Fragment, "uniform vec4 tint; void main() {}").unwrap();
        let p = h.link_shaders(vs, fs).unwrap();
        assert_eq!(h.attribute_location(p, "pos").unwrap(), 0);
        assert_eq!(h.uniform_location(p, "tint").unwrap(), 0);
        assert_eq!(h.uniform_location(p, "nothing").unwrap(), -1);

        h.activate_program(p, None).unwrap();
        assert_eq!(h.current_program(), p.raw());
        assert!(!h.is_default_program(p));
    }

    #[test]
    fn link_needs_both_stages() {
        let (h, _) = booted();
        let vs = h.compile_shader(ShaderType::Vertex, "void main() {}").unwrap();
        assert!(h.link_many_shaders(&[vs]).is_err());
        assert!(h.shader_message().contains("fragment"));
    }
}
