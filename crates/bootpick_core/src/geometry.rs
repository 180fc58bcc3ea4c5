//! Integer screen geometry.

/// An axis-aligned rectangle in screen coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    /// X position (left edge).
    pub x: i64,
    /// Y position (top edge).
    pub y: i64,
    /// Width.
    pub width: u32,
    /// Height.
    pub height: u32,
}

impl Rect {
    /// A zero-sized rect at the origin.
    pub const ZERO: Self = Self::new(0, 0, 0, 0);

    /// Creates a new rectangle.
    #[must_use]
    pub const fn new(x: i64, y: i64, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Returns the right edge (exclusive).
    #[must_use]
    pub const fn right(&self) -> i64 {
        self.x + self.width as i64
    }

    /// Returns the bottom edge (exclusive).
    #[must_use]
    pub const fn bottom(&self) -> i64 {
        self.y + self.height as i64
    }

    /// Returns true if the rectangle covers no pixels.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Returns true if the point is inside the rectangle.
    #[must_use]
    pub const fn contains(&self, x: i64, y: i64) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Returns true if `other` lies completely inside `self`.
    #[must_use]
    pub const fn contains_rect(&self, other: &Self) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Returns the rectangle moved by `(dx, dy)`.
    #[must_use]
    pub const fn translate(&self, dx: i64, dy: i64) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Returns the smallest rectangle covering both.
    ///
    /// Empty rectangles do not contribute.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }

        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Self::new(x, y, extent(right - x), extent(bottom - y))
    }

    /// Returns the intersection of two rectangles, or None if they don't overlap.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if right <= x || bottom <= y {
            return None;
        }
        Some(Self::new(x, y, extent(right - x), extent(bottom - y)))
    }
}

/// Reduces a draw request along one axis to the part a child covers.
///
/// `offset`/`length` describe the requested span in the parent's space; the
/// child occupies `[child_offset, child_offset + child_length)` of that same
/// space. Returns the visible span translated into the child's own space, or
/// `None` when the child is fully clipped.
#[must_use]
pub fn clip_child_bounds(
    child_offset: i64,
    child_length: u32,
    offset: u32,
    length: u32,
) -> Option<(u32, u32)> {
    let start = i64::from(offset).max(child_offset);
    let end = (i64::from(offset) + i64::from(length)).min(child_offset + i64::from(child_length));
    if end <= start {
        return None;
    }
    Some((extent(start - child_offset), extent(end - start)))
}

fn extent(value: i64) -> u32 {
    u32::try_from(value.max(0)).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_contains() {
        let rect = Rect::new(10, 20, 100, 50);

        assert!(rect.contains(50, 30));
        assert!(rect.contains(10, 20));
        assert!(!rect.contains(110, 30));
        assert!(!rect.contains(50, 70));
    }

    #[test]
    fn test_union_spans_both() {
        let a = Rect::new(0, 0, 144, 204);
        let b = Rect::new(152, 0, 144, 204);

        assert_eq!(a.union(&b), Rect::new(0, 0, 296, 204));
        assert_eq!(a.union(&Rect::ZERO), a);
        assert_eq!(Rect::ZERO.union(&b), b);
    }

    #[test]
    fn test_intersection() {
        let a = Rect::new(0, 0, 10, 10);
        assert_eq!(
            a.intersection(&Rect::new(5, 5, 10, 10)),
            Some(Rect::new(5, 5, 5, 5))
        );
        assert_eq!(a.intersection(&Rect::new(10, 0, 4, 4)), None);
    }

    #[test]
    fn test_clip_child_bounds() {
        // Request fully covering a child at 8..12.
        assert_eq!(clip_child_bounds(8, 4, 0, 100), Some((0, 4)));
        // Request starting inside the child.
        assert_eq!(clip_child_bounds(8, 4, 10, 100), Some((2, 2)));
        // Request ending inside the child.
        assert_eq!(clip_child_bounds(8, 4, 0, 9), Some((0, 1)));
        // Disjoint on either side.
        assert_eq!(clip_child_bounds(8, 4, 0, 8), None);
        assert_eq!(clip_child_bounds(8, 4, 12, 3), None);
        // Children left of the parent origin.
        assert_eq!(clip_child_bounds(-4, 8, 0, 2), Some((4, 2)));
    }
}
