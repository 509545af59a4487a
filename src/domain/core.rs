//! Core geometric value types
//!
//! All seat-map geometry is expressed in layout units. One seat cell is a
//! fixed number of units wide (see `LayoutConstants::cell_size`), and the
//! consuming view maps units to pixels through the viewport scale.

/// Width/height pair in layout units
///
/// This is the fundamental building block for the estimator: required
/// dimensions, available space and container sizes are all `Size` values.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    /// Creates a new size
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// The zero size
    pub const fn zero() -> Self {
        Self::new(0.0, 0.0)
    }

    /// Returns true if either dimension is zero or negative
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Returns this size multiplied by `factor` on both axes
    pub fn scaled(&self, factor: f64) -> Size {
        Size::new(self.width * factor, self.height * factor)
    }

    /// Returns the size with `amount` subtracted from the height
    ///
    /// The result may be negative; callers that divide by it rely on the
    /// scale clamping in the feasibility estimator.
    pub fn shrink_height(&self, amount: f64) -> Size {
        Size::new(self.width, self.height - amount)
    }
}

/// A 2D offset in layout units, used for pan positions
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Creates a new point
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The origin
    pub const fn origin() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Offset that centers `content` inside `container`, never going negative
///
/// Content larger than the container is pinned to the top-left edge on that
/// axis instead of being shifted out of view.
pub fn centered_offset(container: Size, content: Size) -> Point {
    Point::new(
        ((container.width - content.width) / 2.0).max(0.0),
        ((container.height - content.height) / 2.0).max(0.0),
    )
}

/// Bounds `value` to `[min, max]` without panicking on inverted or NaN bounds
///
/// Unlike `f64::clamp`, an inverted range resolves to `max` and a NaN bound
/// is ignored. A NaN `value` resolves to `min`.
pub fn clamp_lenient(value: f64, min: f64, max: f64) -> f64 {
    value.max(min).min(max)
}
