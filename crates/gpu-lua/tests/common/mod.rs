#![allow(dead_code)]

use std::rc::Rc;

use gpu_lua::Session;
use gpu_native::draw::DrawItem;
use gpu_native::headless::Headless;
use gpu_native::Backend;
use mlua::{FromLuaMulti, Lua};

/// A Lua state with the bindings installed over a fresh headless backend.
pub struct Harness {
    pub lua: Lua,
    pub headless: Rc<Headless>,
}

pub fn harness() -> Harness {
    let headless = Rc::new(Headless::new());
    let session = Session::new(headless.clone());
    let lua = Lua::new();
    gpu_lua::install(&lua, session).expect("install bindings");
    Harness { lua, headless }
}

impl Harness {
    pub fn run(&self, chunk: &str) -> mlua::Result<()> {
        self.lua.load(chunk).exec()
    }

    pub fn eval<T: FromLuaMulti>(&self, chunk: &str) -> mlua::Result<T> {
        self.lua.load(chunk).eval()
    }

    /// Two full cycles, so finalizers run and their objects are reclaimed.
    pub fn collect(&self) {
        self.lua.gc_collect().expect("gc");
        self.lua.gc_collect().expect("gc");
    }

    /// Draw calls recorded on the window target.
    pub fn screen_draws(&self) -> Vec<DrawItem> {
        let screen = self.headless.context_target().expect("init has run");
        self.headless.draw_log(screen).expect("screen target").items().to_vec()
    }
}
