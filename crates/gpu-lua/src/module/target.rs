use mlua::UserDataRef;

use super::Registrar;
use crate::error::Raise;
use crate::wrappers::{LuaImage, LuaTarget};

pub(super) fn register(reg: &Registrar) -> mlua::Result<()> {
    reg.function("create_alias_target", |_, s, target: UserDataRef<LuaTarget>| {
        let alias = s.backend().create_alias_target(target.handle()?).raise()?;
        Ok(LuaTarget::owned(s, alias))
    })?;
    reg.function("load_target", |_, s, image: UserDataRef<LuaImage>| {
        let target = s.backend().load_target(image.slot.get()?).raise()?;
        Ok(LuaTarget::owned(s, target))
    })?;
    reg.function("set_virtual_resolution", |_, s, (target, w, h): (UserDataRef<LuaTarget>, u16, u16)| {
        s.backend().set_target_virtual_resolution(target.handle()?, w, h).raise()
    })?;
    reg.function("unset_virtual_resolution", |_, s, target: UserDataRef<LuaTarget>| {
        s.backend().unset_target_virtual_resolution(target.handle()?).raise()
    })?;
    reg.function("get_virtual_coords", |_, s, (target, x, y): (UserDataRef<LuaTarget>, f32, f32)| {
        s.backend().virtual_coords(target.handle()?, x, y).raise()
    })
}
