use gpu_native::types::Camera;
use mlua::{AnyUserData, MetaMethod, UserData, UserDataFields, UserDataMethods, Variadic};

use crate::error::BindingError;

/// `GPU.Camera`: `x`, `y`, `z`, `angle`, `zoom`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LuaCamera(pub Camera);

impl UserData for LuaCamera {
    fn add_fields<F: UserDataFields<Self>>(fields: &mut F) {
        value_fields!(fields, x: f32, y: f32, z: f32, angle: f32, zoom: f32);
    }

    fn add_methods<M: UserDataMethods<Self>>(methods: &mut M) {
        methods.add_function("new", |_, v: Variadic<f32>| match v.len() {
            0 => Ok(LuaCamera(Camera::default())),
            5 => Ok(LuaCamera(Camera::new(v[0], v[1], v[2], v[3], v[4]))),
            n => Err(BindingError::arity("Camera.new", "0 or 5", n).into()),
        });

        methods.add_meta_method(MetaMethod::Eq, |_, this, other: AnyUserData| Ok(super::same_value(this, &other)));
        methods.add_meta_method(MetaMethod::ToString, |_, this, ()| {
            let c = this.0;
            Ok(format!("Camera({}, {}, {}, angle={}, zoom={})", c.x, c.y, c.z, c.angle, c.zoom))
        });
    }
}
