use gpu_native::types::{FeatureFlags, InitFlags, RendererEnum, WindowFlags};
use mlua::UserDataRef;

use super::Registrar;
use crate::args::flags_arg;
use crate::error::Raise;
use crate::wrappers::{LuaRendererId, LuaTarget};

pub(super) fn register(reg: &Registrar) -> mlua::Result<()> {
    reg.function("get_linked_version", |lua, s, ()| {
        let v = s.backend().linked_version();
        let t = lua.create_table_with_capacity(0, 3)?;
        t.set("major", v.major)?;
        t.set("minor", v.minor)?;
        t.set("patch", v.patch)?;
        Ok(t)
    })?;

    reg.function("set_init_window", |_, s, window_id: u32| {
        s.backend().set_init_window(window_id);
        Ok(())
    })?;
    reg.function("get_init_window", |_, s, ()| Ok(s.backend().init_window()))?;

    reg.function("set_pre_init_flags", |_, s, flags: u32| {
        let flags: InitFlags = flags_arg("set_pre_init_flags", "init flag set", flags)?;
        s.backend().set_pre_init_flags(flags);
        Ok(())
    })?;
    reg.function("get_pre_init_flags", |_, s, ()| Ok(s.backend().pre_init_flags().bits()))?;
    reg.function("set_required_features", |_, s, flags: u32| {
        let features: FeatureFlags = flags_arg("set_required_features", "feature set", flags)?;
        s.backend().set_required_features(features);
        Ok(())
    })?;
    reg.function("get_required_features", |_, s, ()| Ok(s.backend().required_features().bits()))?;

    // ── renderer order ──────────────────────────────────────────────────

    reg.function("get_default_renderer_order", |_, s, ()| {
        Ok(s.backend().default_renderer_order().into_iter().map(LuaRendererId).collect::<Vec<_>>())
    })?;
    reg.function("get_renderer_order", |_, s, ()| {
        Ok(s.backend().renderer_order().into_iter().map(LuaRendererId).collect::<Vec<_>>())
    })?;
    reg.function("set_renderer_order", |_, s, order: Vec<UserDataRef<LuaRendererId>>| {
        let order: Vec<_> = order.iter().map(|id| id.0.clone()).collect();
        s.backend().set_renderer_order(&order);
        Ok(())
    })?;

    // ── init / quit ─────────────────────────────────────────────────────

    reg.function("init", |_, s, (w, h, flags): (u16, u16, u32)| {
        let screen = s.backend().init(w, h, WindowFlags::from_bits_retain(flags)).raise()?;
        Ok(LuaTarget::owned(s, screen))
    })?;
    reg.function("init_renderer", |_, s, (renderer, w, h, flags): (u32, u16, u16, u32)| {
        let screen =
            s.backend().init_renderer(RendererEnum(renderer), w, h, WindowFlags::from_bits_retain(flags)).raise()?;
        Ok(LuaTarget::owned(s, screen))
    })?;
    reg.function(
        "init_renderer_by_id",
        |_, s, (id, w, h, flags): (UserDataRef<LuaRendererId>, u16, u16, u32)| {
            let screen = s.backend().init_renderer_by_id(&id.0, w, h, WindowFlags::from_bits_retain(flags)).raise()?;
            Ok(LuaTarget::owned(s, screen))
        },
    )?;
    reg.function("is_feature_enabled", |_, s, feature: u32| {
        let feature: FeatureFlags = flags_arg("is_feature_enabled", "feature set", feature)?;
        Ok(s.backend().is_feature_enabled(feature))
    })?;
    reg.function("close_current_renderer", |_, s, ()| {
        s.backend().close_current_renderer();
        s.close_generation();
        Ok(())
    })?;
    reg.function("quit", |_, s, ()| {
        s.backend().quit();
        s.close_generation();
        Ok(())
    })
}
