//! The `GPU` module table: class proxies, forwarders and constants.

mod constants;
mod debug;
mod image;
mod init;
mod matrix;
mod renderer;
mod shader;
mod target;
mod window;

use std::rc::Rc;

use mlua::{FromLuaMulti, IntoLua, IntoLuaMulti, Lua, Table, UserData};

use crate::session::Session;
use crate::wrappers::{
    LuaAttribute, LuaAttributeFormat, LuaBlendMode, LuaCamera, LuaImage, LuaProgram, LuaRect, LuaRendererId,
    LuaShaderBlock,
};

/// Builds a fresh module table bound to `session`.
pub(crate) fn build(lua: &Lua, session: &Rc<Session>) -> mlua::Result<Table> {
    lua.set_app_data(Rc::clone(session));

    let table = lua.create_table()?;
    let reg = Registrar { lua, table: &table, session };

    reg.class::<LuaRect>("Rect")?;
    reg.class::<LuaImage>("Image")?;
    reg.class::<LuaCamera>("Camera")?;
    reg.class::<LuaBlendMode>("BlendMode")?;
    reg.class::<LuaProgram>("Program")?;
    reg.class::<LuaRendererId>("RendererID")?;
    reg.class::<LuaShaderBlock>("ShaderBlock")?;
    reg.class::<LuaAttributeFormat>("AttributeFormat")?;
    reg.class::<LuaAttribute>("Attribute")?;

    init::register(&reg)?;
    debug::register(&reg)?;
    renderer::register(&reg)?;
    window::register(&reg)?;
    target::register(&reg)?;
    image::register(&reg)?;
    matrix::register(&reg)?;
    shader::register(&reg)?;
    constants::register(&reg)?;

    Ok(table)
}

/// Writes entries into the module table being built.
pub(super) struct Registrar<'a> {
    lua: &'a Lua,
    table: &'a Table,
    session: &'a Rc<Session>,
}

impl Registrar<'_> {
    /// `GPU.<name>(...)`, forwarded with the session in hand.
    pub fn function<A, R, F>(&self, name: &str, f: F) -> mlua::Result<()>
    where
        A: FromLuaMulti,
        R: IntoLuaMulti,
        F: Fn(&Lua, &Rc<Session>, A) -> mlua::Result<R> + 'static,
    {
        let session = Rc::clone(self.session);
        let func = self.lua.create_function(move |lua, args: A| f(lua, &session, args))?;
        self.table.set(name, func)
    }

    pub fn class<T: UserData + 'static>(&self, name: &str) -> mlua::Result<()> {
        self.table.set(name, self.lua.create_proxy::<T>()?)
    }

    pub fn constant(&self, name: &str, value: impl IntoLua) -> mlua::Result<()> {
        self.table.set(name, value)
    }
}
