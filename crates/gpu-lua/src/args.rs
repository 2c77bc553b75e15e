//! Conversions between Lua values and native argument types.

use std::fmt::Display;

use bitflags::Flags;
use gpu_native::coords::Color;
use gpu_native::types::{ErrorObject, Mat4};
use mlua::{Lua, Table};

use crate::error::BindingError;

/// Converts a script integer into a native enum, rejecting unknown values.
pub(crate) fn enum_arg<E, P>(function: &'static str, what: &str, value: P) -> Result<E, BindingError>
where
    E: TryFrom<P>,
    P: Copy + Display,
{
    E::try_from(value).map_err(|_| BindingError::argument(function, format!("{value} is not a valid {what}")))
}

/// Converts a script integer into a flag set, rejecting unknown bits.
pub(crate) fn flags_arg<F>(function: &'static str, what: &str, bits: u32) -> Result<F, BindingError>
where
    F: Flags<Bits = u32>,
{
    F::from_bits(bits).ok_or_else(|| BindingError::argument(function, format!("{bits:#x} is not a valid {what}")))
}

#[inline]
pub(crate) fn color(r: i64, g: i64, b: i64, a: i64) -> Color {
    Color::from_ints(r, g, b, a)
}

/// `{r=, g=, b=, a=}`
pub(crate) fn color_table(lua: &Lua, c: Color) -> mlua::Result<Table> {
    let t = lua.create_table_with_capacity(0, 4)?;
    t.set("r", c.r)?;
    t.set("g", c.g)?;
    t.set("b", c.b)?;
    t.set("a", c.a)?;
    Ok(t)
}

pub(crate) fn matrix_table(lua: &Lua, m: &Mat4) -> mlua::Result<Table> {
    lua.create_sequence_from(m.iter().copied())
}

pub(crate) fn matrix_arg(function: &'static str, values: &[f32]) -> Result<Mat4, BindingError> {
    Mat4::try_from(values)
        .map_err(|_| BindingError::argument(function, format!("expected 16 matrix values, got {}", values.len())))
}

pub(crate) fn error_table(lua: &Lua, err: &ErrorObject) -> mlua::Result<Table> {
    let t = lua.create_table_with_capacity(0, 3)?;
    t.set("function", err.function.as_str())?;
    t.set("error", i32::from(err.error))?;
    t.set("details", err.details.as_str())?;
    Ok(t)
}

/// Flat `{x1, y1, x2, y2, ...}` vertex list.
pub(crate) fn vertex_pairs(function: &'static str, vertices: Vec<f32>) -> Result<Vec<f32>, BindingError> {
    if vertices.len() % 2 != 0 {
        return Err(BindingError::argument(function, "vertex list needs an even number of coordinates"));
    }
    Ok(vertices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gpu_native::types::BlendFunc;

    #[test]
    fn enum_arg_accepts_known_values() {
        let f: BlendFunc = enum_arg("f", "blend function", 0x0302_i32).unwrap();
        assert_eq!(f, BlendFunc::SrcAlpha);
    }

    #[test]
    fn enum_arg_rejects_unknown_values() {
        let err = enum_arg::<BlendFunc, i32>("set_blend_function", "blend function", 7).unwrap_err();
        assert_eq!(err.to_string(), "set_blend_function: 7 is not a valid blend function");
    }

    #[test]
    fn flags_arg_rejects_unknown_bits() {
        use gpu_native::types::BatchFlags;

        let ok: BatchFlags = flags_arg("triangle_batch", "batch layout", 0x15).unwrap();
        assert_eq!(ok, BatchFlags::XY_ST_RGBA);
        let err = flags_arg::<BatchFlags>("triangle_batch", "batch layout", 0x100).unwrap_err();
        assert_eq!(err.to_string(), "triangle_batch: 0x100 is not a valid batch layout");
    }

    #[test]
    fn matrix_arg_needs_sixteen_values() {
        assert!(matrix_arg("load_matrix", &[0.0; 15]).is_err());
        assert_eq!(matrix_arg("load_matrix", &[1.0; 16]).unwrap(), [1.0; 16]);
    }

    #[test]
    fn odd_vertex_lists_are_rejected() {
        assert!(vertex_pairs("polygon", vec![0.0, 1.0, 2.0]).is_err());
    }
}
