//! Native side of the SDL_gpu script bindings.
//!
//! This crate owns everything that talks to (or stands in for) the SDL_gpu
//! library: the plain value types that cross the C ABI, the enum constants,
//! opaque handle types, and the [`Backend`] trait the script layer forwards to.
//!
//! Two backends are provided:
//! - [`headless::Headless`]: in-memory; keeps CPU pixel buffers (clears and
//!   single pixels land in them) and records every draw call. Used by tests
//!   and by runs without a display.
//! - `ffi::SdlGpu` (feature `sdl-gpu`): the real library.

pub mod backend;
pub mod coords;
pub mod draw;
pub mod error;
pub mod handle;
pub mod headless;
pub mod logging;
pub mod types;

#[cfg(feature = "sdl-gpu")]
pub mod ffi;

pub use backend::Backend;
pub use error::NativeError;
pub use handle::{ImageHandle, ProgramHandle, RendererHandle, ShaderHandle, TargetHandle};
