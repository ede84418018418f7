//! Container-relative pointer math.
//!
//! Client coordinates come from the browser in viewport space; everything
//! the stylesheet reads is relative to the container's top-left corner.

/// A point in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a new point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A container's bounding box in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Create a new rectangle.
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Position of a client-space point relative to the top-left corner.
    ///
    /// Not clamped; the custom cursor uses this directly and may extend
    /// past the edges.
    pub fn relative(&self, client: Point) -> Point {
        Point::new(client.x - self.left, client.y - self.top)
    }

    /// Clamp a container-relative point to `[0, width] x [0, height]`.
    ///
    /// Degenerate (zero or negative sized) boxes collapse to the origin.
    pub fn clamp(&self, point: Point) -> Point {
        Point::new(
            point.x.clamp(0.0, self.width.max(0.0)),
            point.y.clamp(0.0, self.height.max(0.0)),
        )
    }

    /// Container-relative, clamped position of a client-space point.
    pub fn zoom_position(&self, client: Point) -> Point {
        self.clamp(self.relative(client))
    }
}

/// Format a length as a CSS pixel value, e.g. `10px` or `12.5px`.
pub fn px(value: f64) -> String {
    format!("{value}px")
}

/// Format a point as a 3-D translate, the transform the cursor element uses.
pub fn translate3d(point: Point) -> String {
    format!("translate3d({}px, {}px, 0)", point.x, point.y)
}
