use gpu_native::types::{RendererEnum, RendererId};
use mlua::UserDataRef;

use super::Registrar;
use crate::wrappers::{LuaRenderer, LuaRendererId};

pub(super) fn register(reg: &Registrar) -> mlua::Result<()> {
    reg.function(
        "make_renderer_id",
        |_, _, (name, renderer, major, minor): (String, u32, i32, i32)| {
            Ok(LuaRendererId(RendererId::new(name, RendererEnum(renderer), major, minor)))
        },
    )?;
    reg.function("get_renderer_id", |_, s, renderer: u32| {
        Ok(LuaRendererId(s.backend().renderer_id(RendererEnum(renderer))))
    })?;
    reg.function("get_registered_renderers", |_, s, ()| {
        Ok(s.backend().registered_renderers().into_iter().map(LuaRendererId).collect::<Vec<_>>())
    })?;
    reg.function("num_registered_renderers", |_, s, ()| Ok(s.backend().registered_renderers().len()))?;
    reg.function("reserve_next_renderer_enum", |_, s, ()| Ok(s.backend().reserve_next_renderer_enum().0))?;
    reg.function("get_active_renderers", |_, s, ()| {
        Ok(s.backend().active_renderers().into_iter().map(LuaRendererId).collect::<Vec<_>>())
    })?;
    reg.function("num_active_renderers", |_, s, ()| Ok(s.backend().active_renderers().len()))?;
    reg.function("get_renderer", |_, s, id: UserDataRef<LuaRendererId>| {
        Ok(s.backend().renderer(&id.0).map(|r| LuaRenderer::new(s, r)))
    })?;
    reg.function("get_current_renderer", |_, s, ()| {
        Ok(s.backend().current_renderer().map(|r| LuaRenderer::new(s, r)))
    })?;
    reg.function("set_current_renderer", |_, s, id: UserDataRef<LuaRendererId>| {
        s.backend().set_current_renderer(&id.0);
        Ok(())
    })?;
    reg.function("reset_renderer_state", |_, s, ()| {
        s.backend().reset_renderer_state();
        Ok(())
    })
}
