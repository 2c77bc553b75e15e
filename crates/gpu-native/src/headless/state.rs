//! Handle tables of the headless backend.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use image::RgbaImage;

use crate::coords::{Color, Rect};
use crate::draw::DrawLog;
use crate::error::{NativeError, Result};
use crate::handle::{ImageHandle, ProgramHandle, RendererHandle, ShaderHandle, TargetHandle};
use crate::types::{
    Attribute, AttributeValue, BlendMode, Camera, DebugLevel, ErrorCode, ErrorObject, FeatureFlags, FilterMode,
    ImageFormat, InitFlags, Mat4, MatrixMode, MatrixStack, RendererEnum, RendererId, ShaderBlock, ShaderType,
    SnapMode, UniformValue, WrapMode,
};

/// Pixel storage shared between an image, its aliases, and its target.
pub(crate) type Pixels = Rc<RefCell<RgbaImage>>;

/// The native error stack holds at most this many entries.
const ERROR_STACK_MAX: usize = 20;

/// Features every headless renderer reports.
pub(crate) const HEADLESS_FEATURES: FeatureFlags = FeatureFlags::NON_POWER_OF_TWO
    .union(FeatureFlags::ALL_BASE)
    .union(FeatureFlags::ALL_BLEND_PRESETS)
    .union(FeatureFlags::BLEND_EQUATIONS_SEPARATE)
    .union(FeatureFlags::ALL_GL_FORMATS)
    .union(FeatureFlags::BASIC_SHADERS)
    .union(FeatureFlags::WRAP_REPEAT_MIRRORED);

/// Identifiers the built-in programs declare.
pub(crate) const DEFAULT_PROGRAM_SOURCE: &str =
    "attribute gpu_Vertex; attribute gpu_TexCoord; attribute gpu_Color; \
     uniform gpu_ModelViewProjectionMatrix; void main() {}";

/// Counts of native calls, for tests and diagnostics.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub struct Counters {
    pub images_created: u32,
    pub images_freed: u32,
    pub targets_created: u32,
    pub targets_freed: u32,
    pub shaders_freed: u32,
    pub programs_freed: u32,
    pub flips: u32,
}

pub(crate) struct Context {
    pub window_id: u32,
    pub window_w: i32,
    pub window_h: i32,
    pub current_program: u32,
    pub shapes_use_blending: bool,
    pub shapes_blend_mode: BlendMode,
    pub line_thickness: f32,
    pub matrix_mode: MatrixMode,
    pub projection: MatrixStack,
    pub modelview: MatrixStack,
}

impl Context {
    pub fn new(window_id: u32, w: u16, h: u16, current_program: u32) -> Self {
        Self {
            window_id,
            window_w: i32::from(w),
            window_h: i32::from(h),
            current_program,
            shapes_use_blending: true,
            shapes_blend_mode: BlendMode::default(),
            line_thickness: 1.0,
            matrix_mode: MatrixMode::ModelView,
            projection: MatrixStack::new(),
            modelview: MatrixStack::new(),
        }
    }

    pub fn stack_mut(&mut self) -> &mut MatrixStack {
        match self.matrix_mode {
            MatrixMode::ModelView => &mut self.modelview,
            MatrixMode::Projection => &mut self.projection,
        }
    }

    pub fn top(&self, mode: MatrixMode) -> Mat4 {
        let stack = match mode {
            MatrixMode::ModelView => &self.modelview,
            MatrixMode::Projection => &self.projection,
        };
        stack.top().copied().unwrap_or_else(crate::types::matrix::identity)
    }
}

pub(crate) struct RendererSlot {
    pub id: RendererId,
    pub requested_id: RendererId,
    pub sdl_init_flags: u32,
    pub gpu_init_flags: InitFlags,
    pub current_context_target: Option<TargetHandle>,
    pub default_textured: u32,
    pub default_untextured: u32,
}

pub(crate) struct TargetSlot {
    pub renderer: RendererHandle,
    pub image: Option<ImageHandle>,
    pub pixels: Pixels,
    pub w: u16,
    pub h: u16,
    pub base_w: u16,
    pub base_h: u16,
    pub using_virtual_resolution: bool,
    pub clip_rect: Option<Rect>,
    pub color: Option<Color>,
    pub viewport: Rect,
    pub camera: Camera,
    pub context: Option<Context>,
    pub refcount: i32,
    pub is_alias: bool,
    pub draws: DrawLog,
    pub flips: u32,
}

impl TargetSlot {
    pub fn new(renderer: RendererHandle, pixels: Pixels, w: u16, h: u16) -> Self {
        Self {
            renderer,
            image: None,
            pixels,
            w,
            h,
            base_w: w,
            base_h: h,
            using_virtual_resolution: false,
            clip_rect: None,
            color: None,
            viewport: Rect::new(0.0, 0.0, f32::from(w), f32::from(h)),
            camera: Camera::default(),
            context: None,
            refcount: 1,
            is_alias: false,
            draws: DrawLog::new(),
            flips: 0,
        }
    }
}

pub(crate) struct ImageSlot {
    pub renderer: RendererHandle,
    pub target: Option<TargetHandle>,
    pub pixels: Pixels,
    pub format: ImageFormat,
    pub w: u16,
    pub h: u16,
    pub base_w: u16,
    pub base_h: u16,
    pub using_virtual_resolution: bool,
    pub has_mipmaps: bool,
    pub color: Color,
    pub use_blending: bool,
    pub blend_mode: BlendMode,
    pub filter_mode: FilterMode,
    pub snap_mode: SnapMode,
    pub wrap_mode_x: WrapMode,
    pub wrap_mode_y: WrapMode,
    pub is_alias: bool,
}

impl ImageSlot {
    pub fn new(renderer: RendererHandle, pixels: Pixels, format: ImageFormat) -> Self {
        let (w, h) = {
            let px = pixels.borrow();
            (px.width() as u16, px.height() as u16)
        };
        Self {
            renderer,
            target: None,
            pixels,
            format,
            w,
            h,
            base_w: w,
            base_h: h,
            using_virtual_resolution: false,
            has_mipmaps: false,
            color: Color::white(),
            use_blending: true,
            blend_mode: BlendMode::default(),
            filter_mode: FilterMode::default(),
            snap_mode: SnapMode::default(),
            wrap_mode_x: WrapMode::default(),
            wrap_mode_y: WrapMode::default(),
            is_alias: false,
        }
    }

    /// A second slot over the same pixels.
    pub fn alias(&self) -> Self {
        Self {
            renderer: self.renderer,
            target: None,
            pixels: Rc::clone(&self.pixels),
            format: self.format,
            w: self.w,
            h: self.h,
            base_w: self.base_w,
            base_h: self.base_h,
            using_virtual_resolution: self.using_virtual_resolution,
            has_mipmaps: self.has_mipmaps,
            color: self.color,
            use_blending: self.use_blending,
            blend_mode: self.blend_mode,
            filter_mode: self.filter_mode,
            snap_mode: self.snap_mode,
            wrap_mode_x: self.wrap_mode_x,
            wrap_mode_y: self.wrap_mode_y,
            is_alias: true,
        }
    }
}

/// True when `name` appears as a whole identifier in `source`.
pub(crate) fn declares(source: &str, name: &str) -> bool {
    !name.is_empty() && source.split(|c: char| !(c.is_ascii_alphanumeric() || c == '_')).any(|word| word == name)
}

pub(crate) struct ShaderSlot {
    pub kind: ShaderType,
    pub source: String,
}

#[derive(Default)]
pub(crate) struct ProgramSlot {
    pub shaders: Vec<ShaderHandle>,
    /// Sources captured at link time; a linked program outlives its shaders.
    pub sources: Vec<String>,
    pub linked: bool,
    pub attributes: Vec<String>,
    pub uniforms: Vec<String>,
}

impl ProgramSlot {
    pub fn linked_from(source: &str) -> Self {
        Self { sources: vec![source.to_owned()], linked: true, ..Self::default() }
    }

    fn declares(&self, name: &str) -> bool {
        self.sources.iter().any(|src| declares(src, name))
    }

    /// Stable per-name location, or -1 when the name is not declared.
    fn locate(names: &mut Vec<String>, declared: bool, name: &str) -> i32 {
        if !declared {
            return -1;
        }
        let idx = names.iter().position(|n| n == name).unwrap_or_else(|| {
            names.push(name.to_owned());
            names.len() - 1
        });
        idx as i32
    }

    pub fn attribute_location(&mut self, name: &str) -> i32 {
        let declared = self.linked && self.declares(name);
        Self::locate(&mut self.attributes, declared, name)
    }

    pub fn uniform_location(&mut self, name: &str) -> i32 {
        let declared = self.linked && self.declares(name);
        Self::locate(&mut self.uniforms, declared, name)
    }
}

pub(crate) struct State {
    next_handle: u64,
    next_object: u32,
    next_window: u32,

    pub init_window: u32,
    pub pre_init_flags: InitFlags,
    pub required_features: FeatureFlags,
    pub debug_level: DebugLevel,
    pub registered: Vec<RendererId>,
    pub renderer_order: Vec<RendererId>,
    pub next_renderer_enum: u32,
    pub fullscreen: bool,
    errors: Vec<ErrorObject>,

    pub renderers: HashMap<RendererHandle, RendererSlot>,
    pub current_renderer: Option<RendererHandle>,
    pub targets: HashMap<TargetHandle, TargetSlot>,
    pub images: HashMap<ImageHandle, ImageSlot>,
    pub shaders: HashMap<ShaderHandle, ShaderSlot>,
    pub programs: HashMap<ProgramHandle, ProgramSlot>,

    pub shader_message: String,
    pub shader_block: ShaderBlock,
    pub shader_images: HashMap<i32, (Option<ImageHandle>, i32)>,
    pub uniforms: HashMap<i32, UniformValue>,
    pub attributes: HashMap<i32, AttributeValue>,
    pub attribute_sources: HashMap<i32, (i32, Attribute)>,

    pub counters: Counters,
}

impl State {
    pub fn new() -> Self {
        let registered = vec![
            RendererId::new("OpenGL 1 BASE", RendererEnum::OPENGL_1_BASE, 1, 1),
            RendererId::new("OpenGL 1", RendererEnum::OPENGL_1, 1, 1),
            RendererId::new("OpenGL 2", RendererEnum::OPENGL_2, 2, 0),
            RendererId::new("OpenGL 3", RendererEnum::OPENGL_3, 3, 0),
            RendererId::new("OpenGL 4", RendererEnum::OPENGL_4, 4, 0),
            RendererId::new("OpenGLES 2", RendererEnum::GLES_2, 2, 0),
            RendererId::new("OpenGLES 3", RendererEnum::GLES_3, 3, 0),
        ];
        Self {
            next_handle: 0x1000,
            next_object: 1,
            next_window: 1,
            init_window: 0,
            pre_init_flags: InitFlags::empty(),
            required_features: FeatureFlags::empty(),
            debug_level: DebugLevel::default(),
            renderer_order: Self::default_order(),
            registered,
            next_renderer_enum: RendererEnum::USER_START.0,
            fullscreen: false,
            errors: Vec::new(),
            renderers: HashMap::new(),
            current_renderer: None,
            targets: HashMap::new(),
            images: HashMap::new(),
            shaders: HashMap::new(),
            programs: HashMap::new(),
            shader_message: String::new(),
            shader_block: ShaderBlock::default(),
            shader_images: HashMap::new(),
            uniforms: HashMap::new(),
            attributes: HashMap::new(),
            attribute_sources: HashMap::new(),
            counters: Counters::default(),
        }
    }

    pub fn default_order() -> Vec<RendererId> {
        vec![
            RendererId::new("OpenGL 3", RendererEnum::OPENGL_3, 3, 0),
            RendererId::new("OpenGL 2", RendererEnum::OPENGL_2, 2, 0),
            RendererId::new("OpenGL 1", RendererEnum::OPENGL_1, 1, 1),
        ]
    }

    /// State after `GPU_Quit`: every native object is gone. Registration,
    /// renderer order, handle numbering and counters survive.
    pub fn reset(&mut self) {
        let fresh = Self::new();
        let registered = std::mem::take(&mut self.registered);
        let renderer_order = std::mem::take(&mut self.renderer_order);
        let (next_handle, next_object, next_renderer_enum) =
            (self.next_handle, self.next_object, self.next_renderer_enum);
        let counters = self.counters;

        *self = Self { registered, renderer_order, next_handle, next_object, next_renderer_enum, counters, ..fresh };
    }

    // ── ids ─────────────────────────────────────────────────────────────

    pub fn next_handle(&mut self) -> u64 {
        let h = self.next_handle;
        self.next_handle += 0x10;
        h
    }

    pub fn next_object(&mut self) -> u32 {
        let id = self.next_object;
        self.next_object += 1;
        id
    }

    pub fn next_window(&mut self) -> u32 {
        let id = self.next_window;
        self.next_window += 1;
        id
    }

    // ── error stack ─────────────────────────────────────────────────────

    /// Pushes onto the error stack, for failures that do not raise.
    pub fn report(&mut self, function: &str, error: ErrorCode, details: impl Into<String>) {
        let details = details.into();
        log::debug!("headless: {function}: {details}");
        if self.errors.len() >= ERROR_STACK_MAX {
            self.errors.remove(0);
        }
        self.errors.push(ErrorObject::new(function, error, details));
    }

    pub fn pop_error(&mut self) -> Option<ErrorObject> {
        self.errors.pop()
    }

    // ── lookups ─────────────────────────────────────────────────────────

    pub fn require_renderer(&self) -> Result<RendererHandle> {
        self.current_renderer.ok_or(NativeError::NoRenderer)
    }

    pub fn target(&self, h: TargetHandle) -> Result<&TargetSlot> {
        self.targets.get(&h).ok_or(NativeError::UnknownHandle { kind: "target", raw: h.raw() })
    }

    pub fn target_mut(&mut self, h: TargetHandle) -> Result<&mut TargetSlot> {
        self.targets.get_mut(&h).ok_or(NativeError::UnknownHandle { kind: "target", raw: h.raw() })
    }

    pub fn image(&self, h: ImageHandle) -> Result<&ImageSlot> {
        self.images.get(&h).ok_or(NativeError::UnknownHandle { kind: "image", raw: h.raw() })
    }

    pub fn image_mut(&mut self, h: ImageHandle) -> Result<&mut ImageSlot> {
        self.images.get_mut(&h).ok_or(NativeError::UnknownHandle { kind: "image", raw: h.raw() })
    }

    pub fn shader(&self, h: ShaderHandle) -> Result<&ShaderSlot> {
        self.shaders.get(&h).ok_or(NativeError::UnknownHandle { kind: "shader", raw: u64::from(h.raw()) })
    }

    pub fn program_mut(&mut self, h: ProgramHandle) -> Result<&mut ProgramSlot> {
        self.programs.get_mut(&h).ok_or(NativeError::UnknownHandle { kind: "program", raw: u64::from(h.raw()) })
    }

    /// Context of the current renderer's current context target.
    pub fn context(&self) -> Option<&Context> {
        let r = self.renderers.get(&self.current_renderer?)?;
        self.targets.get(&r.current_context_target?)?.context.as_ref()
    }

    pub fn context_mut(&mut self) -> Option<&mut Context> {
        let r = self.renderers.get(&self.current_renderer?)?;
        let t = r.current_context_target?;
        self.targets.get_mut(&t)?.context.as_mut()
    }

    pub fn context_target(&self) -> Option<TargetHandle> {
        self.renderers.get(&self.current_renderer?)?.current_context_target
    }

    pub fn is_registered(&self, renderer: RendererEnum) -> bool {
        self.registered.iter().any(|id| id.renderer == renderer)
    }

    pub fn active_renderer(&self, renderer: RendererEnum) -> Option<RendererHandle> {
        self.renderers.iter().find(|(_, slot)| slot.id.renderer == renderer).map(|(h, _)| *h)
    }

    /// Drops every resource that belongs to `renderer`.
    pub fn drop_renderer(&mut self, renderer: RendererHandle) {
        if let Some(slot) = self.renderers.remove(&renderer) {
            self.programs.remove(&ProgramHandle::from_raw(slot.default_textured));
            self.programs.remove(&ProgramHandle::from_raw(slot.default_untextured));
        }
        self.targets.retain(|_, t| t.renderer != renderer);
        self.images.retain(|_, i| i.renderer != renderer);
        if self.current_renderer == Some(renderer) {
            self.current_renderer = None;
            // shader objects live in the renderer's GL context
            self.shaders.clear();
            self.programs.clear();
            self.uniforms.clear();
            self.attributes.clear();
            self.attribute_sources.clear();
            self.shader_images.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locations_are_stable_and_undeclared_is_minus_one() {
        let mut p = ProgramSlot::linked_from("uniform vec4 tint; attribute vec2 pos; void main() {}");
        assert_eq!(p.uniform_location("tint"), 0);
        assert_eq!(p.uniform_location("tint"), 0);
        assert_eq!(p.attribute_location("pos"), 0);
        assert_eq!(p.uniform_location("pos"), 1);
        assert_eq!(p.uniform_location("missing"), -1);
    }

    #[test]
    fn unlinked_program_has_no_locations() {
        let mut p = ProgramSlot { sources: vec!["uniform float t;".into()], ..ProgramSlot::default() };
        assert_eq!(p.uniform_location("t"), -1);
    }

    #[test]
    fn error_stack_is_bounded_and_lifo() {
        let mut s = State::new();
        for i in 0..(ERROR_STACK_MAX + 3) {
            s.report("f", ErrorCode::UserError, format!("e{i}"));
        }
        let top = s.pop_error().unwrap();
        assert_eq!(top.details, format!("e{}", ERROR_STACK_MAX + 2));
        let mut n = 1;
        while s.pop_error().is_some() {
            n += 1;
        }
        assert_eq!(n, ERROR_STACK_MAX);
    }
}
