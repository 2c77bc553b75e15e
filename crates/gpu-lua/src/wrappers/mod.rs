//! Script-visible wrappers, one per SDL_gpu resource type.
//!
//! Value wrappers (`Rect`, `Camera`, `BlendMode`, ...) hold a copy of the
//! native struct and expose its fields as properties. Handle wrappers
//! (`Target`, `Image`, `Shader`, `Program`) hold a session-bound slot that
//! releases the native object at most once.

/// Read/write properties mapped straight onto fields of the wrapped value.
macro_rules! value_fields {
    ($fields:ident, $($name:ident: $ty:ty),+ $(,)?) => {
        $(
            $fields.add_field_method_get(stringify!($name), |_, this| Ok(this.0.$name));
            $fields.add_field_method_set(stringify!($name), |_, this, value: $ty| {
                this.0.$name = value;
                Ok(())
            });
        )+
    };
}

mod blend;
mod camera;
mod context;
mod image;
mod rect;
mod renderer;
mod shader;
mod target;

pub use blend::LuaBlendMode;
pub use camera::LuaCamera;
pub use context::{LuaContext, LuaMatrixStack};
pub use image::LuaImage;
pub use rect::LuaRect;
pub use renderer::{LuaRenderer, LuaRendererId};
pub use shader::{LuaAttribute, LuaAttributeFormat, LuaProgram, LuaShader, LuaShaderBlock};
pub use target::LuaTarget;

use mlua::AnyUserData;

/// `__eq` helper: true when `other` wraps a value equal to `this`.
pub(crate) fn same_value<T: PartialEq + 'static>(this: &T, other: &AnyUserData) -> bool {
    other.borrow::<T>().is_ok_and(|o| *o == *this)
}
