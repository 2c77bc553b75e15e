use gpu_native::types::{ContextInfo, MatrixStack};
use mlua::{MetaMethod, UserData, UserDataFields, UserDataMethods};

use crate::args::matrix_table;
use crate::error::BindingError;

use super::LuaBlendMode;

/// `Context`: snapshot of a window target's rendering context.
#[derive(Debug, Clone, PartialEq)]
pub struct LuaContext(pub ContextInfo);

impl UserData for LuaContext {
    fn add_fields<F: UserDataFields<Self>>(fields: &mut F) {
        fields.add_field_method_get("window_id", |_, this| Ok(this.0.window_id));
        fields.add_field_method_get("window_w", |_, this| Ok(this.0.window_w));
        fields.add_field_method_get("window_h", |_, this| Ok(this.0.window_h));
        fields.add_field_method_get("drawable_w", |_, this| Ok(this.0.drawable_w));
        fields.add_field_method_get("drawable_h", |_, this| Ok(this.0.drawable_h));
        fields.add_field_method_get("current_shader_program", |_, this| Ok(this.0.current_shader_program));
        fields.add_field_method_get("default_textured_shader_program", |_, this| {
            Ok(this.0.default_textured_shader_program)
        });
        fields.add_field_method_get("default_untextured_shader_program", |_, this| {
            Ok(this.0.default_untextured_shader_program)
        });
        fields.add_field_method_get("shapes_use_blending", |_, this| Ok(this.0.shapes_use_blending));
        fields.add_field_method_get("shapes_blend_mode", |_, this| Ok(LuaBlendMode(this.0.shapes_blend_mode)));
        fields.add_field_method_get("line_thickness", |_, this| Ok(this.0.line_thickness));
        fields.add_field_method_get("use_texturing", |_, this| Ok(this.0.use_texturing));
        fields.add_field_method_get("matrix_mode", |_, this| Ok(i32::from(this.0.matrix_mode)));
        fields.add_field_method_get("projection_matrix", |_, this| Ok(LuaMatrixStack(this.0.projection_matrix.clone())));
        fields.add_field_method_get("modelview_matrix", |_, this| Ok(LuaMatrixStack(this.0.modelview_matrix.clone())));
    }

    fn add_methods<M: UserDataMethods<Self>>(methods: &mut M) {
        methods.add_meta_method(MetaMethod::ToString, |_, this, ()| {
            Ok(format!("Context(window {}, {}x{})", this.0.window_id, this.0.window_w, this.0.window_h))
        });
    }
}

/// `MatrixStack`: `size`, `top` and `get(i)` (1-based), each matrix a table of 16 floats.
#[derive(Debug, Clone, PartialEq)]
pub struct LuaMatrixStack(pub MatrixStack);

impl UserData for LuaMatrixStack {
    fn add_fields<F: UserDataFields<Self>>(fields: &mut F) {
        fields.add_field_method_get("size", |_, this| Ok(this.0.size()));
        fields.add_field_method_get("top", |lua, this| this.0.top().map(|m| matrix_table(lua, m)).transpose());
    }

    fn add_methods<M: UserDataMethods<Self>>(methods: &mut M) {
        methods.add_method("get", |lua, this, index: usize| {
            let m = index
                .checked_sub(1)
                .and_then(|i| this.0.get(i))
                .ok_or_else(|| {
                    BindingError::argument("MatrixStack:get", format!("index {index} outside 1..={}", this.0.size()))
                })?;
            matrix_table(lua, m)
        });
        methods.add_meta_method(MetaMethod::Len, |_, this, ()| Ok(this.0.size()));
    }
}
