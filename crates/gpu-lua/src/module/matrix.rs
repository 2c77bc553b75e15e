use gpu_native::types::MatrixMode;

use super::Registrar;
use crate::args::{enum_arg, matrix_arg, matrix_table};

type Frustum = (f32, f32, f32, f32, f32, f32);

pub(super) fn register(reg: &Registrar) -> mlua::Result<()> {
    reg.function("matrix_mode", |_, s, mode: i32| {
        let mode: MatrixMode = enum_arg("matrix_mode", "matrix mode", mode)?;
        s.backend().set_matrix_mode(mode);
        Ok(())
    })?;
    reg.function("push_matrix", |_, s, ()| {
        s.backend().push_matrix();
        Ok(())
    })?;
    reg.function("pop_matrix", |_, s, ()| {
        s.backend().pop_matrix();
        Ok(())
    })?;
    reg.function("load_identity", |_, s, ()| {
        s.backend().load_identity();
        Ok(())
    })?;
    reg.function("load_matrix", |_, s, values: Vec<f32>| {
        s.backend().load_matrix(&matrix_arg("load_matrix", &values)?);
        Ok(())
    })?;
    reg.function("mult_matrix", |_, s, values: Vec<f32>| {
        s.backend().mult_matrix(&matrix_arg("mult_matrix", &values)?);
        Ok(())
    })?;

    reg.function("translate", |_, s, (x, y, z): (f32, f32, f32)| {
        s.backend().translate(x, y, z);
        Ok(())
    })?;
    reg.function("scale", |_, s, (x, y, z): (f32, f32, f32)| {
        s.backend().scale(x, y, z);
        Ok(())
    })?;
    reg.function("rotate", |_, s, (degrees, x, y, z): (f32, f32, f32, f32)| {
        s.backend().rotate(degrees, x, y, z);
        Ok(())
    })?;
    reg.function("ortho", |_, s, (l, r, b, t, n, f): Frustum| {
        s.backend().ortho(l, r, b, t, n, f);
        Ok(())
    })?;
    reg.function("frustum", |_, s, (l, r, b, t, n, f): Frustum| {
        s.backend().frustum(l, r, b, t, n, f);
        Ok(())
    })?;

    reg.function("get_model_view", |lua, s, ()| matrix_table(lua, &s.backend().model_view()))?;
    reg.function("get_projection", |lua, s, ()| matrix_table(lua, &s.backend().projection()))?;
    reg.function("get_current_matrix", |lua, s, ()| matrix_table(lua, &s.backend().current_matrix()))
}
