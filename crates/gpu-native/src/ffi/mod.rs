//! The real SDL_gpu library, reached over its C ABI.
//!
//! Compiled only with the `sdl-gpu` feature; links `SDL2_gpu`.

mod backend;
pub mod sys;

pub use backend::SdlGpu;
