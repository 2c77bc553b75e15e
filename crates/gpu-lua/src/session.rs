use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use gpu_native::error::Result as NativeResult;
use gpu_native::{Backend, ImageHandle, ProgramHandle, ShaderHandle, TargetHandle};
use mlua::Lua;

use crate::error::BindingError;

/// The backend the bindings forward to, plus the current handle generation.
pub struct Session {
    backend: Rc<dyn Backend>,
    generation: Cell<u32>,
}

impl Session {
    pub fn new(backend: Rc<dyn Backend>) -> Rc<Self> {
        Rc::new(Self { backend, generation: Cell::new(0) })
    }

    #[inline]
    pub fn backend(&self) -> &dyn Backend {
        &*self.backend
    }

    #[inline]
    pub fn generation(&self) -> u32 {
        self.generation.get()
    }

    /// The session [`install`](crate::install) stored on `lua`; class
    /// constructors such as `Image.new` reach the backend through it.
    pub(crate) fn of(lua: &Lua) -> mlua::Result<Rc<Session>> {
        lua.app_data_ref::<Rc<Session>>()
            .map(|s| Rc::clone(&s))
            .ok_or_else(|| mlua::Error::RuntimeError("GPU bindings are not installed on this Lua state".to_owned()))
    }

    /// Ends the current generation: every handle wrapped so far is stale.
    pub(crate) fn close_generation(&self) {
        let next = self.generation.get().wrapping_add(1);
        self.generation.set(next);
        log::debug!("session generation closed, now {next}");
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session").field("generation", &self.generation.get()).finish_non_exhaustive()
    }
}

/// A native handle type with a destructor.
pub(crate) trait Release: Copy + fmt::Debug {
    const KIND: &'static str;

    fn release(self, backend: &dyn Backend) -> NativeResult<()>;
}

impl Release for TargetHandle {
    const KIND: &'static str = "Target";

    fn release(self, backend: &dyn Backend) -> NativeResult<()> {
        backend.free_target(self)
    }
}

impl Release for ImageHandle {
    const KIND: &'static str = "Image";

    fn release(self, backend: &dyn Backend) -> NativeResult<()> {
        backend.free_image(self)
    }
}

impl Release for ShaderHandle {
    const KIND: &'static str = "Shader";

    fn release(self, backend: &dyn Backend) -> NativeResult<()> {
        backend.free_shader(self)
    }
}

impl Release for ProgramHandle {
    const KIND: &'static str = "Program";

    fn release(self, backend: &dyn Backend) -> NativeResult<()> {
        backend.free_program(self)
    }
}

/// One native handle held by a script wrapper.
///
/// Owned slots release the handle on [`Slot::free`] or on drop, at most once.
/// Borrowed slots never release. Either kind stops touching the native
/// library once its session generation has been closed.
pub(crate) struct Slot<H: Release> {
    session: Rc<Session>,
    handle: Option<H>,
    generation: u32,
    owned: bool,
}

impl<H: Release> Slot<H> {
    pub fn owned(session: &Rc<Session>, handle: H) -> Self {
        Self::new(session, handle, true)
    }

    pub fn borrowed(session: &Rc<Session>, handle: H) -> Self {
        Self::new(session, handle, false)
    }

    fn new(session: &Rc<Session>, handle: H, owned: bool) -> Self {
        Self { session: Rc::clone(session), handle: Some(handle), generation: session.generation(), owned }
    }

    #[inline]
    pub fn session(&self) -> &Rc<Session> {
        &self.session
    }

    #[inline]
    pub fn backend(&self) -> &dyn Backend {
        self.session.backend()
    }

    #[inline]
    pub fn is_owned(&self) -> bool {
        self.owned
    }

    fn is_stale(&self) -> bool {
        self.generation != self.session.generation()
    }

    /// The live handle, or the reason it can no longer be used.
    pub fn get(&self) -> Result<H, BindingError> {
        let handle = self.handle.ok_or(BindingError::Freed(H::KIND))?;
        if self.is_stale() {
            return Err(BindingError::Stale(H::KIND));
        }
        Ok(handle)
    }

    /// Empties the slot, releasing the handle if this slot owns a live one.
    /// Calling it again is a no-op.
    pub fn free(&mut self) -> NativeResult<()> {
        let Some(handle) = self.handle.take() else {
            return Ok(());
        };
        if !self.owned || self.is_stale() {
            return Ok(());
        }
        log::trace!("releasing {} {handle:?}", H::KIND);
        handle.release(self.session.backend())
    }
}

impl<H: Release> Drop for Slot<H> {
    fn drop(&mut self) {
        if let Err(err) = self.free() {
            log::warn!("releasing {} on collection: {err}", H::KIND);
        }
    }
}

impl<H: Release> fmt::Debug for Slot<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(H::KIND)
            .field("handle", &self.handle)
            .field("generation", &self.generation)
            .field("owned", &self.owned)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gpu_native::headless::Headless;
    use gpu_native::types::{ImageFormat, WindowFlags};

    fn booted() -> (Rc<Headless>, Rc<Session>) {
        let headless = Rc::new(Headless::new());
        let session = Session::new(headless.clone());
        headless.init(32, 32, WindowFlags::empty()).unwrap();
        (headless, session)
    }

    // ── free ────────────────────────────────────────────────────────────

    #[test]
    fn free_twice_releases_once() {
        let (h, session) = booted();
        let img = h.create_image(2, 2, ImageFormat::Rgba).unwrap();
        let mut slot = Slot::owned(&session, img);
        slot.free().unwrap();
        slot.free().unwrap();
        drop(slot);
        assert_eq!(h.counters().images_freed, 1);
    }

    #[test]
    fn use_after_free_reports_freed() {
        let (h, session) = booted();
        let img = h.create_image(2, 2, ImageFormat::Rgba).unwrap();
        let mut slot = Slot::owned(&session, img);
        slot.free().unwrap();
        assert!(matches!(slot.get(), Err(BindingError::Freed("Image"))));
    }

    // ── ownership ───────────────────────────────────────────────────────

    #[test]
    fn dropping_borrowed_slot_keeps_handle() {
        let (h, session) = booted();
        let img = h.create_image(2, 2, ImageFormat::Rgba).unwrap();
        drop(Slot::borrowed(&session, img));
        assert_eq!(h.counters().images_freed, 0);
        drop(Slot::owned(&session, img));
        assert_eq!(h.counters().images_freed, 1);
    }

    // ── generations ─────────────────────────────────────────────────────

    #[test]
    fn closed_generation_makes_slots_stale() {
        let (h, session) = booted();
        let img = h.create_image(2, 2, ImageFormat::Rgba).unwrap();
        let slot = Slot::owned(&session, img);
        h.quit();
        session.close_generation();
        assert!(matches!(slot.get(), Err(BindingError::Stale("Image"))));
        drop(slot);
        assert_eq!(h.counters().images_freed, 0);
    }
}
