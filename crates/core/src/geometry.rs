use std::fmt;

/// Compositor-wide window identity (the Hyprland window address).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowId(pub u64);

impl WindowId {
    /// Parse a Hyprland address, with or without the `0x` prefix.
    pub fn from_address(address: &str) -> Option<Self> {
        let hex = address.trim();
        let hex = hex
            .strip_prefix("0x")
            .or_else(|| hex.strip_prefix("0X"))
            .unwrap_or(hex);
        u64::from_str_radix(hex, 16).ok().map(Self)
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:x}", self.0)
    }
}

/// A point in layout space (logical pixels, compositor-global).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn delta_to(self, other: Point) -> Point {
        Point::new(other.x - self.x, other.y - self.y)
    }
}

/// Axis-aligned rectangle in layout space.
///
/// Containment is half-open: the left/top edges are inside, the right/bottom
/// edges are not, so two rectangles that merely touch never both contain a
/// point.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    pub fn contains(&self, p: Point) -> bool {
        !self.is_empty() && p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y < self.bottom()
    }

    /// `true` when both rectangles share a region of positive area.
    pub fn intersects(&self, other: &Rect) -> bool {
        !self.intersection(other).is_empty()
    }

    /// `true` when `other` lies entirely inside `self` (empty rects always do).
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.is_empty()
            || (other.x >= self.x
                && other.y >= self.y
                && other.right() <= self.right()
                && other.bottom() <= self.bottom())
    }

    /// Overlapping region of both rectangles.  When they do not overlap the
    /// result is a zero-sized rectangle clamped into `self`.
    #[must_use]
    pub fn intersection(&self, other: &Rect) -> Rect {
        let x = other.x.clamp(self.x, self.right());
        let y = other.y.clamp(self.y, self.bottom());
        let right = other.right().clamp(self.x, self.right()).max(x);
        let bottom = other.bottom().clamp(self.y, self.bottom()).max(y);
        Rect::new(x, y, right - x, bottom - y)
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}
