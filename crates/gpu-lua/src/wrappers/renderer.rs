use std::rc::Rc;

use gpu_native::types::{RendererEnum, RendererId, RendererInfo};
use gpu_native::RendererHandle;
use mlua::{AnyUserData, MetaMethod, UserData, UserDataFields, UserDataMethods};

use crate::error::{BindingError, Raise};
use crate::session::Session;

use super::LuaTarget;

/// `GPU.RendererID`: `name`, `renderer`, `major_version`, `minor_version`.
#[derive(Debug, Clone, PartialEq)]
pub struct LuaRendererId(pub RendererId);

impl UserData for LuaRendererId {
    fn add_fields<F: UserDataFields<Self>>(fields: &mut F) {
        fields.add_field_method_get("name", |_, this| Ok(this.0.name.clone()));
        fields.add_field_method_set("name", |_, this, name: String| {
            this.0.name = name;
            Ok(())
        });
        fields.add_field_method_get("renderer", |_, this| Ok(this.0.renderer.0));
        fields.add_field_method_set("renderer", |_, this, renderer: u32| {
            this.0.renderer = RendererEnum(renderer);
            Ok(())
        });
        value_fields!(fields, major_version: i32, minor_version: i32);
    }

    fn add_methods<M: UserDataMethods<Self>>(methods: &mut M) {
        methods.add_function("new", |_, (name, renderer, major, minor): (String, u32, i32, i32)| {
            Ok(LuaRendererId(RendererId::new(name, RendererEnum(renderer), major, minor)))
        });

        methods.add_meta_method(MetaMethod::Eq, |_, this, other: AnyUserData| Ok(super::same_value(this, &other)));
        methods.add_meta_method(MetaMethod::ToString, |_, this, ()| {
            let id = &this.0;
            Ok(format!("RendererID({}, {}, {}.{})", id.name, id.renderer.0, id.major_version, id.minor_version))
        });
    }
}

/// `Renderer`: read-only view of a live renderer. Never freed by scripts.
pub struct LuaRenderer {
    session: Rc<Session>,
    handle: RendererHandle,
    generation: u32,
}

impl LuaRenderer {
    pub(crate) fn new(session: &Rc<Session>, handle: RendererHandle) -> Self {
        Self { session: Rc::clone(session), handle, generation: session.generation() }
    }

    fn info(&self) -> mlua::Result<RendererInfo> {
        if self.generation != self.session.generation() {
            return Err(BindingError::Stale("Renderer").into());
        }
        self.session.backend().renderer_info(self.handle).raise()
    }
}

impl UserData for LuaRenderer {
    fn add_fields<F: UserDataFields<Self>>(fields: &mut F) {
        fields.add_field_method_get("id", |_, this| Ok(LuaRendererId(this.info()?.id)));
        fields.add_field_method_get("requested_id", |_, this| Ok(LuaRendererId(this.info()?.requested_id)));
        fields.add_field_method_get("sdl_init_flags", |_, this| Ok(this.info()?.sdl_init_flags));
        fields.add_field_method_get("gpu_init_flags", |_, this| Ok(this.info()?.gpu_init_flags.bits()));
        fields.add_field_method_get("shader_language", |_, this| Ok(i32::from(this.info()?.shader_language)));
        fields.add_field_method_get("min_shader_version", |_, this| Ok(this.info()?.min_shader_version));
        fields.add_field_method_get("max_shader_version", |_, this| Ok(this.info()?.max_shader_version));
        fields.add_field_method_get("enabled_features", |_, this| Ok(this.info()?.enabled_features.bits()));
        fields.add_field_method_get("current_context_target", |_, this| {
            let target = this.info()?.current_context_target;
            Ok(target.map(|t| LuaTarget::borrowed(&this.session, t)))
        });
    }

    fn add_methods<M: UserDataMethods<Self>>(methods: &mut M) {
        methods.add_meta_method(MetaMethod::Eq, |_, this, other: AnyUserData| {
            Ok(other.borrow::<LuaRenderer>().is_ok_and(|o| o.handle == this.handle))
        });
        methods.add_meta_method(MetaMethod::ToString, |_, this, ()| {
            Ok(match this.info() {
                Ok(info) => format!("Renderer({})", info.id.name),
                Err(_) => "Renderer(closed)".to_owned(),
            })
        });
    }
}
