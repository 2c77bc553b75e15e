//! In-memory backend.
//!
//! Keeps the same handle tables SDL_gpu keeps, without a GPU or a window.
//! Images hold real RGBA8 pixels (files go through the `image` crate);
//! clears and `Pixel` shapes write into them, every other draw call is only
//! appended to the target's [`DrawLog`].
//!
//! Beyond the [`Backend`](crate::Backend) surface, [`Headless`] exposes
//! inspection helpers ([`Headless::counters`], [`Headless::draw_log`], ...)
//! for tests and diagnostics.

mod backend;
mod pixels;
mod state;

use std::cell::RefCell;

use image::RgbaImage;

use crate::draw::DrawLog;
use crate::handle::{ImageHandle, TargetHandle};
use crate::types::{Attribute, AttributeValue, UniformValue};

pub use state::Counters;
use state::State;

pub struct Headless {
    state: RefCell<State>,
}

impl Headless {
    pub fn new() -> Self {
        Self { state: RefCell::new(State::new()) }
    }

    pub fn counters(&self) -> Counters {
        self.state.borrow().counters
    }

    pub fn live_images(&self) -> usize {
        self.state.borrow().images.len()
    }

    pub fn live_targets(&self) -> usize {
        self.state.borrow().targets.len()
    }

    pub fn live_shaders(&self) -> usize {
        self.state.borrow().shaders.len()
    }

    pub fn draw_log(&self, target: TargetHandle) -> Option<DrawLog> {
        self.state.borrow().targets.get(&target).map(|t| t.draws.clone())
    }

    pub fn image_pixels(&self, image: ImageHandle) -> Option<RgbaImage> {
        self.state.borrow().images.get(&image).map(|i| i.pixels.borrow().clone())
    }

    pub fn uniform(&self, location: i32) -> Option<UniformValue> {
        self.state.borrow().uniforms.get(&location).cloned()
    }

    pub fn attribute(&self, location: i32) -> Option<AttributeValue> {
        self.state.borrow().attributes.get(&location).cloned()
    }

    /// The attribute bound by `set_attribute_source` at `location`, with its value count.
    pub fn attribute_source(&self, location: i32) -> Option<(i32, Attribute)> {
        self.state.borrow().attribute_sources.get(&location).cloned()
    }
}

impl Default for Headless {
    fn default() -> Self {
        Self::new()
    }
}
