use gpu_native::coords::Rect;
use mlua::{AnyUserData, MetaMethod, UserData, UserDataFields, UserDataMethods, Variadic};

use crate::error::BindingError;

/// `GPU.Rect`: `x`, `y`, `w`, `h` (also `width`, `height`).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LuaRect(pub Rect);

impl LuaRect {
    /// `Rect.new()` with up to four numbers; missing fields are 0.
    pub(crate) fn from_numbers(values: &[f32]) -> Result<Self, BindingError> {
        if values.len() > 4 {
            return Err(BindingError::arity("Rect.new", "0 to 4", values.len()));
        }
        let mut v = [0.0; 4];
        v[..values.len()].copy_from_slice(values);
        Ok(Self(Rect::new(v[0], v[1], v[2], v[3])))
    }
}

impl UserData for LuaRect {
    fn add_fields<F: UserDataFields<Self>>(fields: &mut F) {
        value_fields!(fields, x: f32, y: f32, w: f32, h: f32);

        fields.add_field_method_get("width", |_, this| Ok(this.0.w));
        fields.add_field_method_set("width", |_, this, w: f32| {
            this.0.w = w;
            Ok(())
        });
        fields.add_field_method_get("height", |_, this| Ok(this.0.h));
        fields.add_field_method_set("height", |_, this, h: f32| {
            this.0.h = h;
            Ok(())
        });
    }

    fn add_methods<M: UserDataMethods<Self>>(methods: &mut M) {
        methods.add_function("new", |_, values: Variadic<f32>| Ok(LuaRect::from_numbers(&values)?));

        methods.add_meta_method(MetaMethod::Eq, |_, this, other: AnyUserData| Ok(super::same_value(this, &other)));
        methods.add_meta_method(MetaMethod::ToString, |_, this, ()| {
            let r = this.0;
            Ok(format!("Rect({}, {}, {}, {})", r.x, r.y, r.w, r.h))
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_numbers_default_to_zero() {
        assert_eq!(LuaRect::from_numbers(&[1.0, 2.0]).unwrap().0, Rect::new(1.0, 2.0, 0.0, 0.0));
        assert_eq!(LuaRect::from_numbers(&[]).unwrap().0, Rect::default());
    }

    #[test]
    fn five_numbers_is_an_arity_error() {
        assert!(matches!(LuaRect::from_numbers(&[0.0; 5]), Err(BindingError::Arity { got: 5, .. })));
    }
}
