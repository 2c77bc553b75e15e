//! Geometry and colour values passed by value across the native ABI.
//!
//! Both types are `#[repr(C)]` and `Pod` so they can be handed to SDL_gpu
//! (`GPU_Rect`, `SDL_Color`) without conversion.
//!
//! Coordinate space follows SDL_gpu: pixels, origin top-left, +Y down.

mod color;
mod rect;

pub use color::Color;
pub use rect::Rect;
