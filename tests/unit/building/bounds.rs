//! Tests for the sentinel bounding box and half-open rectangles

#[cfg(test)]
mod tests {
    use tilecity::building::bounds::{GridPos, MinMax, Rect};

    // Tests the sentinel is empty and the first point becomes the whole box
    // Verified by starting the sentinel at zero instead of the extremes
    #[test]
    fn test_first_point_sets_box() {
        let mut bounds = MinMax::default();
        assert!(bounds.is_empty());
        assert_eq!((bounds.width(), bounds.height()), (0, 0));

        bounds.include_point(GridPos::new(-3, 4));
        assert_eq!(bounds, MinMax::from_point(GridPos::new(-3, 4)));
        assert_eq!((bounds.width(), bounds.height()), (1, 1));
    }

    // Tests the box never shrinks over a sequence of inclusions
    // Verified by assigning the new point instead of taking min/max
    #[test]
    fn test_growth_is_monotone() {
        let points = [(3, 3), (1, 5), (4, 0), (2, 2), (-1, 7), (0, 0)];
        let mut bounds = MinMax::EMPTY;
        for (x, y) in points {
            let before = bounds;
            bounds.include_point(GridPos::new(x, y));
            assert!(bounds.contains(&before));
            assert!(bounds.contains_point(GridPos::new(x, y)));
        }
        assert_eq!(bounds.to_string(), "min: -1, 0 max: 4, 7");
    }

    // Tests including an empty box changes nothing
    // Verified by removing the empty check in include
    #[test]
    fn test_union_with_empty_is_identity() {
        let mut bounds = MinMax::from_point(GridPos::new(2, 2));
        bounds.include(&MinMax::EMPTY);
        assert_eq!(bounds, MinMax::from_point(GridPos::new(2, 2)));

        let mut other = MinMax::from_point(GridPos::new(5, -1));
        other.include(&bounds);
        assert_eq!((other.min_x, other.min_y, other.max_x, other.max_y), (2, -1, 5, 2));
    }

    // Tests rectangles are half-open and built from inclusive bounds
    // Verified by using <= on the far edge in contains
    #[test]
    fn test_rect_half_open() {
        let mut bounds = MinMax::from_point(GridPos::new(0, 0));
        bounds.include_point(GridPos::new(5, 5));
        let rect = Rect::from_bounds(&bounds).expect("non-empty");
        assert_eq!(rect, Rect::new(0, 0, 6, 6));
        assert_eq!(rect.area(), 36);
        assert!(rect.contains(GridPos::new(5, 5)));
        assert!(!rect.contains(GridPos::new(6, 5)));
        assert!(Rect::from_bounds(&MinMax::EMPTY).is_none());
    }

    // Tests touching rectangles do not overlap
    // Verified by using <= in overlaps
    #[test]
    fn test_overlaps() {
        let left = Rect::new(0, 0, 3, 3);
        assert!(!left.overlaps(&Rect::new(3, 0, 3, 3)));
        assert!(left.overlaps(&Rect::new(2, 2, 3, 3)));
    }

    // Tests extents at the ends of the coordinate range do not overflow
    // Verified by computing the width in i32
    #[test]
    fn test_extreme_extents() {
        let mut full = MinMax::from_point(GridPos::new(i32::MIN, 0));
        full.include_point(GridPos::new(i32::MAX, 0));
        assert_eq!(full.width(), 1_i64 << 32);
        assert_eq!(full.height(), 1);
        assert!(Rect::from_bounds(&full).is_none());

        let mut edge = MinMax::from_point(GridPos::new(i32::MAX - 3, i32::MAX - 1));
        edge.include_point(GridPos::new(i32::MAX, i32::MAX));
        let rect = Rect::from_bounds(&edge).expect("fits");
        assert_eq!(rect, Rect::new(i32::MAX - 3, i32::MAX - 1, 4, 2));
        assert_eq!(rect.area(), 8);
        assert!(rect.contains(GridPos::new(i32::MAX, i32::MAX)));
        assert!(rect.overlaps(&Rect::new(i32::MAX, i32::MAX, 1, 1)));
    }
}
