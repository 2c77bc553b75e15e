use gpu_native::coords::Rect;
use gpu_native::types::{BlendEq, BlendFunc, BlendPreset, Camera};

use super::Registrar;
use crate::args::{color, color_table, enum_arg};
use crate::error::Raise;
use crate::wrappers::{LuaBlendMode, LuaCamera, LuaRect, LuaTarget};

pub(super) fn register(reg: &Registrar) -> mlua::Result<()> {
    reg.function("context_target", |_, s, ()| Ok(s.backend().context_target().map(|t| LuaTarget::borrowed(s, t))))?;
    reg.function("window_target", |_, s, window_id: u32| {
        Ok(s.backend().window_target(window_id).map(|t| LuaTarget::borrowed(s, t)))
    })?;
    reg.function("create_target_from_window", |_, s, window_id: u32| {
        let target = s.backend().create_target_from_window(window_id).raise()?;
        Ok(LuaTarget::owned(s, target))
    })?;
    reg.function("set_window_resolution", |_, s, (w, h): (u16, u16)| Ok(s.backend().set_window_resolution(w, h)))?;
    reg.function("set_fullscreen", |_, s, (enable, use_desktop_resolution): (bool, bool)| {
        Ok(s.backend().set_fullscreen(enable, use_desktop_resolution))
    })?;
    reg.function("get_fullscreen", |_, s, ()| Ok(s.backend().fullscreen()))?;

    // ── shape state ─────────────────────────────────────────────────────

    reg.function("set_shape_blending", |_, s, enable: bool| {
        s.backend().set_shape_blending(enable);
        Ok(())
    })?;
    reg.function("get_blend_mode_from_preset", |_, _, preset: i32| {
        Ok(LuaBlendMode::from_preset("get_blend_mode_from_preset", preset)?)
    })?;
    reg.function("set_shape_blend_function", |_, s, (sc, dc, sa, da): (i32, i32, i32, i32)| {
        const F: &str = "set_shape_blend_function";
        let func = |v: i32| enum_arg::<BlendFunc, _>(F, "blend function", v);
        s.backend().set_shape_blend_function(func(sc)?, func(dc)?, func(sa)?, func(da)?);
        Ok(())
    })?;
    reg.function("set_shape_blend_equation", |_, s, (color_eq, alpha_eq): (i32, i32)| {
        const F: &str = "set_shape_blend_equation";
        let eq = |v: i32| enum_arg::<BlendEq, _>(F, "blend equation", v);
        s.backend().set_shape_blend_equation(eq(color_eq)?, eq(alpha_eq)?);
        Ok(())
    })?;
    reg.function("set_shape_blend_mode", |_, s, preset: i32| {
        let preset: BlendPreset = enum_arg("set_shape_blend_mode", "blend preset", preset)?;
        s.backend().set_shape_blend_mode(preset);
        Ok(())
    })?;
    reg.function("set_line_thickness", |_, s, thickness: f32| Ok(s.backend().set_line_thickness(thickness)))?;
    reg.function("get_line_thickness", |_, s, ()| Ok(s.backend().line_thickness()))?;
    reg.function("flush_blit_buffer", |_, s, ()| {
        s.backend().flush_blit_buffer();
        Ok(())
    })?;

    // ── value helpers ───────────────────────────────────────────────────

    reg.function("make_rect", |_, _, (x, y, w, h): (f32, f32, f32, f32)| Ok(LuaRect(Rect::new(x, y, w, h))))?;
    reg.function("make_color", |lua, _, (r, g, b, a): (i64, i64, i64, i64)| color_table(lua, color(r, g, b, a)))?;
    reg.function("default_camera", |_, _, ()| Ok(LuaCamera(Camera::default())))
}
