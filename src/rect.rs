use glam::Vec2;

/// An axis-aligned rectangle.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub struct Rect {
    /// The position of the top-left corner
    /// of this rectangle.
    pub pos: Vec2,
    /// The side lengths of this rectangle.
    pub size: Vec2,
}

impl Rect {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    /// Creates a rectangle of `size` whose center lies at `center`.
    pub fn centered(center: Vec2, size: Vec2) -> Self {
        Self {
            pos: center - size / 2.,
            size,
        }
    }

    pub fn center(self) -> Vec2 {
        self.pos + self.size / 2.
    }

    pub fn bottom(self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Whether the rectangle covers no area. Nothing can hit an empty rectangle.
    pub fn is_empty(self) -> bool {
        self.size.x <= 0. || self.size.y <= 0.
    }

    pub fn contains(self, pos: Vec2) -> bool {
        pos.x >= self.pos.x
            && pos.y >= self.pos.y
            && pos.x < (self.pos.x + self.size.x)
            && pos.y < (self.pos.y + self.size.y)
    }

    /// The smallest rectangle enclosing all `points`, or `None` if
    /// there are none.
    pub fn bounding(points: impl IntoIterator<Item = Vec2>) -> Option<Self> {
        let mut min = Vec2::splat(f32::INFINITY);
        let mut max = Vec2::splat(-f32::INFINITY);
        let mut any = false;
        for point in points {
            min = min.min(point);
            max = max.max(point);
            any = true;
        }

        any.then(|| Self {
            pos: min,
            size: max - min,
        })
    }
}

#[cfg(test)]
mod tests {
    use glam::vec2;

    use super::*;

    #[test]
    fn contains_is_half_open() {
        let rect = Rect::new(vec2(10., 10.), vec2(20., 20.));
        assert!(rect.contains(vec2(10., 10.)));
        assert!(rect.contains(vec2(29.9, 29.9)));
        assert!(!rect.contains(vec2(30., 20.)));
        assert!(!rect.contains(vec2(9., 20.)));
    }

    #[test]
    fn empty_rect_contains_nothing() {
        let rect = Rect::new(vec2(10., 10.), Vec2::ZERO);
        assert!(rect.is_empty());
        assert!(!rect.contains(vec2(10., 10.)));
    }

    #[test]
    fn bounding_box() {
        let rect = Rect::bounding([vec2(5., 1.), vec2(-2., 4.), vec2(3., 9.)]).unwrap();
        assert_eq!(rect, Rect::new(vec2(-2., 1.), vec2(7., 8.)));
        assert_eq!(Rect::bounding(std::iter::empty()), None);
    }

    #[test]
    fn centered() {
        let rect = Rect::centered(vec2(100., 100.), vec2(40., 60.));
        assert_eq!(rect.pos, vec2(80., 70.));
        assert_eq!(rect.center(), vec2(100., 100.));
        assert_eq!(rect.bottom(), 130.);
    }
}
