//! Pointer sampling in texture space.
//!
//! Client coordinates arrive in CSS (or logical window) pixels with the origin
//! at the top-left. Shaders sample the image with the origin at the
//! bottom-left, so the vertical axis is flipped during normalization.

use crate::constants::DEFAULT_POINTER;

/// Normalized pointer position in `[0, 1] x [0, 1]`, origin bottom-left.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerSample {
    pub x: f32,
    pub y: f32,
}

impl Default for PointerSample {
    fn default() -> Self {
        Self {
            x: DEFAULT_POINTER[0],
            y: DEFAULT_POINTER[1],
        }
    }
}

impl PointerSample {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn to_array(self) -> [f32; 2] {
        [self.x, self.y]
    }
}

/// Bounding rectangle of the container, same units as the event coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ContainerRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl ContainerRect {
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Rectangle anchored at the origin, as used by a window-sized container.
    pub const fn sized(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    #[inline]
    pub fn aspect(&self) -> f32 {
        if self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    /// Map client coordinates to a pointer sample.
    ///
    /// Degenerate rectangles map to the center. Positions outside the rectangle
    /// (possible for a move delivered during pointer capture) clamp to the edge.
    pub fn normalize(&self, client_x: f32, client_y: f32) -> PointerSample {
        if self.is_empty() || !client_x.is_finite() || !client_y.is_finite() {
            return PointerSample::default();
        }
        let u = (client_x - self.left) / self.width;
        let v = 1.0 - (client_y - self.top) / self.height;
        PointerSample::new(u.clamp(0.0, 1.0), v.clamp(0.0, 1.0))
    }
}

/// The pointer events every surface listens for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerEventKind {
    Enter,
    Leave,
    Move,
}

impl PointerEventKind {
    pub const ALL: [PointerEventKind; 3] = [Self::Enter, Self::Leave, Self::Move];

    /// DOM event name.
    pub fn dom_name(self) -> &'static str {
        match self {
            Self::Enter => "pointerenter",
            Self::Leave => "pointerleave",
            Self::Move => "pointermove",
        }
    }
}
