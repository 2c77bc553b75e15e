//! Recorded draw calls.
//!
//! [`Shape`] and [`BlitTransform`] are the argument bundles of the native
//! drawing entry points. The SDL backend unpacks them into the matching C
//! call; the headless backend appends them to a per-target [`DrawLog`].

use crate::coords::{Color, Rect};
use crate::handle::ImageHandle;
use crate::types::BatchFlags;

/// Geometry of one primitive call (`GPU_Pixel` .. `GPU_PolygonFilled`).
///
/// `filled` selects the `*Filled` variant of the native function.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Pixel { x: f32, y: f32 },
    Line { x1: f32, y1: f32, x2: f32, y2: f32 },
    Arc { x: f32, y: f32, radius: f32, start_angle: f32, end_angle: f32, filled: bool },
    Circle { x: f32, y: f32, radius: f32, filled: bool },
    Ellipse { x: f32, y: f32, rx: f32, ry: f32, degrees: f32, filled: bool },
    Sector {
        x: f32,
        y: f32,
        inner_radius: f32,
        outer_radius: f32,
        start_angle: f32,
        end_angle: f32,
        filled: bool,
    },
    Tri { x1: f32, y1: f32, x2: f32, y2: f32, x3: f32, y3: f32, filled: bool },
    /// Corner form (`GPU_Rectangle`).
    Rectangle { x1: f32, y1: f32, x2: f32, y2: f32, filled: bool },
    /// Rect form (`GPU_Rectangle2`).
    Rectangle2 { rect: Rect, filled: bool },
    RectangleRound { x1: f32, y1: f32, x2: f32, y2: f32, radius: f32, filled: bool },
    RectangleRound2 { rect: Rect, radius: f32, filled: bool },
    /// Flattened `x, y` pairs.
    Polygon { vertices: Vec<f32>, filled: bool },
}

impl Shape {
    pub fn is_filled(&self) -> bool {
        match *self {
            Shape::Pixel { .. } | Shape::Line { .. } => false,
            Shape::Arc { filled, .. }
            | Shape::Circle { filled, .. }
            | Shape::Ellipse { filled, .. }
            | Shape::Sector { filled, .. }
            | Shape::Tri { filled, .. }
            | Shape::Rectangle { filled, .. }
            | Shape::Rectangle2 { filled, .. }
            | Shape::RectangleRound { filled, .. }
            | Shape::RectangleRound2 { filled, .. }
            | Shape::Polygon { filled, .. } => filled,
        }
    }
}

/// Transform applied by a blit; each variant is one native blit function.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum BlitTransform {
    /// `GPU_Blit`
    None,
    /// `GPU_BlitRotate`
    Rotate { degrees: f32 },
    /// `GPU_BlitScale`
    Scale { scale_x: f32, scale_y: f32 },
    /// `GPU_BlitTransform`
    Transform { degrees: f32, scale_x: f32, scale_y: f32 },
    /// `GPU_BlitTransformX`
    TransformX { pivot_x: f32, pivot_y: f32, degrees: f32, scale_x: f32, scale_y: f32 },
}

/// One recorded call against a target.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    /// `None` clears to transparent black.
    Clear(Option<Color>),
    Shape { shape: Shape, color: Color },
    Blit { image: ImageHandle, src: Option<Rect>, x: f32, y: f32, transform: BlitTransform },
    BlitRect { image: ImageHandle, src: Option<Rect>, dest: Option<Rect> },
    TriangleBatch { image: Option<ImageHandle>, num_vertices: usize, num_indices: usize, flags: BatchFlags },
}

/// A recorded call plus the clip rect that was active when it was issued.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub cmd: DrawCmd,
    pub clip_rect: Option<Rect>,
}

/// Per-target draw history: the frame being built, in issue order, and the
/// frame handed over by the last flip.
///
/// `present` moves the current frame aside, so a target that is flipped
/// every frame holds at most two frames of commands.
#[derive(Debug, Default, Clone)]
pub struct DrawLog {
    items: Vec<DrawItem>,
    presented: Vec<DrawItem>,
}

impl DrawLog {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn push(&mut self, cmd: DrawCmd, clip_rect: Option<Rect>) {
        self.items.push(DrawItem { cmd, clip_rect });
    }

    /// Commands issued since the last flip.
    #[inline]
    pub fn items(&self) -> &[DrawItem] {
        &self.items
    }

    /// Commands of the most recently flipped frame.
    #[inline]
    pub fn presented(&self) -> &[DrawItem] {
        &self.presented
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn present(&mut self) {
        self.presented = std::mem::take(&mut self.items);
    }

    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
        self.presented.clear();
    }
}
