use gpu_native::types::{BlendEq, BlendFunc, BlendMode, BlendPreset};
use mlua::{AnyUserData, Lua, MetaMethod, MultiValue, UserData, UserDataFields, UserDataMethods};

use crate::args::enum_arg;
use crate::error::BindingError;

/// `GPU.BlendMode`: the four blend factors and two equations, as integers.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LuaBlendMode(pub BlendMode);

macro_rules! enum_fields {
    ($fields:ident, $kind:ty, $what:literal, $($name:ident),+) => {
        $(
            $fields.add_field_method_get(stringify!($name), |_, this| Ok(i32::from(this.0.$name)));
            $fields.add_field_method_set(stringify!($name), |_, this, value: i32| {
                this.0.$name = enum_arg::<$kind, _>(concat!("BlendMode.", stringify!($name)), $what, value)?;
                Ok(())
            });
        )+
    };
}

impl LuaBlendMode {
    pub(crate) fn from_preset(function: &'static str, preset: i32) -> Result<Self, BindingError> {
        let preset: BlendPreset = enum_arg(function, "blend preset", preset)?;
        Ok(Self(BlendMode::from_preset(preset)))
    }

    fn from_args(lua: &Lua, args: MultiValue) -> mlua::Result<Self> {
        const FUNC: &str = "BlendMode.new";
        match args.len() {
            0 => Ok(Self(BlendMode::default())),
            1 => Ok(Self::from_preset(FUNC, lua.unpack_multi(args)?)?),
            6 => {
                let (sc, dc, sa, da, ce, ae): (i32, i32, i32, i32, i32, i32) = lua.unpack_multi(args)?;
                let func = |v| enum_arg::<BlendFunc, i32>(FUNC, "blend function", v);
                let eq = |v| enum_arg::<BlendEq, i32>(FUNC, "blend equation", v);
                Ok(Self(BlendMode::new(func(sc)?, func(dc)?, func(sa)?, func(da)?, eq(ce)?, eq(ae)?)))
            }
            n => Err(BindingError::arity(FUNC, "0, 1 or 6", n).into()),
        }
    }
}

impl UserData for LuaBlendMode {
    fn add_fields<F: UserDataFields<Self>>(fields: &mut F) {
        enum_fields!(fields, BlendFunc, "blend function", source_color, dest_color, source_alpha, dest_alpha);
        enum_fields!(fields, BlendEq, "blend equation", color_equation, alpha_equation);
    }

    fn add_methods<M: UserDataMethods<Self>>(methods: &mut M) {
        methods.add_function("new", LuaBlendMode::from_args);
        methods.add_function("from_preset", |_, preset: i32| Ok(LuaBlendMode::from_preset("BlendMode.from_preset", preset)?));

        methods.add_meta_method(MetaMethod::Eq, |_, this, other: AnyUserData| Ok(super::same_value(this, &other)));
        methods.add_meta_method(MetaMethod::ToString, |_, this, ()| Ok(format!("{:?}", this.0)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preset_lookup_validates_the_preset() {
        assert_eq!(LuaBlendMode::from_preset("t", 0).unwrap().0, BlendMode::default());
        assert!(matches!(LuaBlendMode::from_preset("t", 42), Err(BindingError::Argument { .. })));
    }
}
