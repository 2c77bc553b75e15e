//! Lua surface of the SDL_gpu bindings.
//!
//! [`install`] builds the global `GPU` table on a Lua state: module
//! functions, the class proxies (`GPU.Rect`, `GPU.Image`, `GPU.Camera`,
//! `GPU.BlendMode`, `GPU.Program`, ...) and the integer constants.
//!
//! Every wrapper that owns a native handle carries the [`Session`] it was
//! created in. `GPU.quit()` and `GPU.close_current_renderer()` close the
//! session generation; wrappers from a closed generation never call back into
//! the native library and raise [`BindingError::Stale`] when used.

mod args;
mod config;
mod error;
mod module;
mod session;
pub mod wrappers;

pub use config::BindingConfig;
pub use error::BindingError;
pub use session::Session;

use std::rc::Rc;

use mlua::{Lua, Table};

/// Installs the module table under [`BindingConfig::default`] names.
pub fn install(lua: &Lua, session: Rc<Session>) -> mlua::Result<Table> {
    install_with(lua, session, &BindingConfig::default())
}

pub fn install_with(lua: &Lua, session: Rc<Session>, config: &BindingConfig) -> mlua::Result<Table> {
    let gpu = module::build(lua, &session)?;
    lua.globals().set(config.global_name.as_str(), gpu.clone())?;
    if config.register_package {
        let loaded: Table = lua.globals().get::<Table>("package")?.get("loaded")?;
        loaded.set(config.global_name.as_str(), gpu.clone())?;
    }
    log::debug!("installed '{}' module table", config.global_name);
    Ok(gpu)
}
