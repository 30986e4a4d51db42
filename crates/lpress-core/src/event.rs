#![forbid(unsafe_code)]

//! Canonical pointer input types.
//!
//! Mouse and touch events from the host are collapsed into a single
//! [`PointerInput`] variant at the boundary. Everything downstream of the
//! [`sample`](crate::sample) module sees only a [`Point`].
//!
//! # Design Notes
//!
//! - Coordinates are host pixels (`clientX` / `clientY`), not cells.
//! - `touches` holds the *active* touch points carried by the event, so a
//!   `touchend` for the last finger carries an empty list.

use smallvec::SmallVec;

use crate::geometry::Point;

/// Canonical pointer input.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerInput {
    /// A mouse or pen pointer event.
    Mouse(MouseInput),

    /// A touch event with its currently active touch points.
    Touch(TouchInput),
}

impl PointerInput {
    /// Convenience constructor for a primary-button mouse event.
    #[must_use]
    pub const fn mouse(x: f64, y: f64) -> Self {
        Self::Mouse(MouseInput {
            position: Point::new(x, y),
            button: MouseButton::Left,
        })
    }

    /// Convenience constructor for a touch event.
    #[must_use]
    pub fn touch(points: impl IntoIterator<Item = TouchPoint>) -> Self {
        Self::Touch(TouchInput {
            touches: points.into_iter().collect(),
        })
    }
}

/// A mouse event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseInput {
    /// Pointer position.
    pub position: Point,

    /// The button reported by the event.
    pub button: MouseButton,
}

/// Mouse buttons, in DOM `MouseEvent.button` order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MouseButton {
    /// Main button (usually left).
    #[default]
    Left,
    /// Auxiliary button (usually wheel).
    Middle,
    /// Secondary button (usually right).
    Right,
}

impl MouseButton {
    /// Map a DOM `MouseEvent.button` code. Unknown codes map to `Left`.
    #[must_use]
    pub const fn from_dom(code: i32) -> Self {
        match code {
            1 => Self::Middle,
            2 => Self::Right,
            _ => Self::Left,
        }
    }
}

/// A touch event.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TouchInput {
    /// Active touch points.
    pub touches: SmallVec<[TouchPoint; 2]>,
}

/// One active touch point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    /// Host touch identifier.
    pub id: u32,
    /// Touch position.
    pub position: Point,
}

impl TouchPoint {
    /// Create a touch point.
    #[must_use]
    pub const fn new(id: u32, x: f64, y: f64) -> Self {
        Self {
            id,
            position: Point::new(x, y),
        }
    }
}
