use mlua::UserDataRef;

use super::Registrar;
use crate::wrappers::LuaImage;

pub(super) fn register(reg: &Registrar) -> mlua::Result<()> {
    reg.function("load_image", |_, s, path: String| LuaImage::load(s, &path))?;
    reg.function("create_alias_image", |_, _, image: UserDataRef<LuaImage>| image.create_alias())?;
    reg.function("copy_image", |_, _, image: UserDataRef<LuaImage>| image.copy())
}
