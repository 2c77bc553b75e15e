use gpu_native::types::{DebugLevel, ErrorCode};

use super::Registrar;
use crate::args::{enum_arg, error_table};

pub(super) fn register(reg: &Registrar) -> mlua::Result<()> {
    reg.function("set_debug_level", |_, s, level: i32| {
        let level: DebugLevel = enum_arg("set_debug_level", "debug level", level)?;
        s.backend().set_debug_level(level);
        Ok(())
    })?;
    reg.function("get_debug_level", |_, s, ()| Ok(i32::from(s.backend().debug_level())))?;
    reg.function("pop_error", |lua, s, ()| s.backend().pop_error().map(|e| error_table(lua, &e)).transpose())?;
    reg.function("get_error_string", |_, _, code: i32| {
        let code: ErrorCode = enum_arg("get_error_string", "error code", code)?;
        Ok(code.as_str())
    })
}
