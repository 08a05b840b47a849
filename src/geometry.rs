//! Page-space geometry. Origin is the bottom-left corner of the page, units are points.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Builds a rect from its top edge, growing downwards.
    pub fn from_top(x: f32, top: f32, width: f32, height: f32) -> Self {
        Self::new(x, top - height, width, height)
    }

    pub fn top(&self) -> f32 {
        self.y + self.height
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathSegment {
    MoveTo(Point),
    LineTo(Point),
    CurveTo { c1: Point, c2: Point, to: Point },
    Close,
}

/// A backend-neutral vector path.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    segments: Vec<PathSegment>,
}

// Control point distance for a cubic Bezier approximating a quarter circle.
const KAPPA: f32 = 0.552_284_75;

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(mut self, x: f32, y: f32) -> Self {
        self.segments.push(PathSegment::MoveTo(Point::new(x, y)));
        self
    }

    pub fn line_to(mut self, x: f32, y: f32) -> Self {
        self.segments.push(PathSegment::LineTo(Point::new(x, y)));
        self
    }

    pub fn curve_to(mut self, c1: Point, c2: Point, to: Point) -> Self {
        self.segments.push(PathSegment::CurveTo { c1, c2, to });
        self
    }

    pub fn close(mut self) -> Self {
        self.segments.push(PathSegment::Close);
        self
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Closed rounded rectangle: four straight edges joined by four cubic quarter-circle
    /// approximations. The radius is clamped to `0..=min(w, h) / 2`.
    pub fn rounded_rect(rect: Rect, radius: f32) -> Self {
        let r = clamp_radius(radius, rect.width, rect.height);
        let (x, y, w, h) = (rect.x, rect.y, rect.width, rect.height);
        let k = r * KAPPA;

        Path::new()
            .move_to(x + r, y)
            .line_to(x + w - r, y)
            .curve_to(
                Point::new(x + w - r + k, y),
                Point::new(x + w, y + r - k),
                Point::new(x + w, y + r),
            )
            .line_to(x + w, y + h - r)
            .curve_to(
                Point::new(x + w, y + h - r + k),
                Point::new(x + w - r + k, y + h),
                Point::new(x + w - r, y + h),
            )
            .line_to(x + r, y + h)
            .curve_to(
                Point::new(x + r - k, y + h),
                Point::new(x, y + h - r + k),
                Point::new(x, y + h - r),
            )
            .line_to(x, y + r)
            .curve_to(
                Point::new(x, y + r - k),
                Point::new(x + r - k, y),
                Point::new(x + r, y),
            )
            .close()
    }
}

pub fn clamp_radius(requested: f32, width: f32, height: f32) -> f32 {
    let max = (width.min(height) / 2.0).max(0.0);
    requested.clamp(0.0, max)
}
