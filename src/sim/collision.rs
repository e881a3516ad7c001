//! Area and overlap rules for landed shapes
//!
//! Overlap is a plain axis-aligned bounding-box test in world coordinates,
//! with each box built around the shape's landing position.

use glam::DVec2;

use crate::consts::*;
use crate::shape::Shape;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: DVec2,
    pub max: DVec2,
}

impl Aabb {
    pub fn new(min: DVec2, max: DVec2) -> Self {
        Self { min, max }
    }

    /// Degenerate box covering a single point
    pub fn point(p: DVec2) -> Self {
        Self { min: p, max: p }
    }

    /// Grow the box by `amount` on every side
    pub fn inflate(self, amount: f64) -> Self {
        Self {
            min: self.min - DVec2::splat(amount),
            max: self.max + DVec2::splat(amount),
        }
    }

    /// Boxes overlap unless one ends strictly before the other starts on some axis.
    /// Touching edges count as overlap.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        !(self.max.x < other.min.x
            || other.max.x < self.min.x
            || self.max.y < other.min.y
            || other.max.y < self.min.y)
    }
}

/// Area used to decide which of two overlapping shapes wins
pub fn shape_area(shape: &Shape) -> f64 {
    match shape {
        Shape::Circle(c) => std::f64::consts::PI * c.radius * c.radius,
        Shape::Rectangle(r) => r.width * r.height,
        Shape::Line(l) => LINE_AREA_FACTOR * l.length(),
        Shape::Text(t) => TEXT_AREA_PER_CHAR * t.char_count() as f64,
        Shape::TextStyle(_) => 0.0,
    }
}

/// Bounding box of `shape` when it rests at `at`
pub fn shape_aabb(shape: &Shape, at: DVec2) -> Aabb {
    match shape {
        Shape::Circle(c) => Aabb::new(at - DVec2::splat(c.radius), at + DVec2::splat(c.radius)),
        Shape::Rectangle(r) => Aabb::new(at, at + DVec2::new(r.width, r.height)),
        Shape::Text(t) => Aabb::new(at, at + DVec2::new(t.char_count() as f64, TEXT_HEIGHT)),
        Shape::Line(l) => {
            let delta = l.delta();
            Aabb::new(at + delta.min(DVec2::ZERO), at + delta.max(DVec2::ZERO))
                .inflate(LINE_THICKNESS / 2.0)
        }
        Shape::TextStyle(_) => Aabb::point(at),
    }
}

/// Whether two shapes overlap at their landing positions
pub fn shapes_overlap(a: &Shape, a_at: DVec2, b: &Shape, b_at: DVec2) -> bool {
    shape_aabb(a, a_at).overlaps(&shape_aabb(b, b_at))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::fixtures::*;
    use proptest::prelude::*;
    use std::f64::consts::PI;

    #[test]
    fn test_area_rules() {
        assert!((shape_area(&circle(1, 2.0)) - 4.0 * PI).abs() < 1e-9);
        assert_eq!(shape_area(&rect(1, 3.0, 4.0)), 12.0);
        assert_eq!(shape_area(&line(1, 3.0, 4.0)), 10.0);
        assert_eq!(shape_area(&line(1, 0.0, 0.0)), 0.0);
        assert_eq!(shape_area(&text(1, "hello")), 100.0);
        assert_eq!(shape_area(&style()), 0.0);
    }

    #[test]
    fn test_circle_box_centered_on_landing() {
        let b = shape_aabb(&circle(1, 2.0), DVec2::new(10.0, 10.0));
        assert_eq!(b.min, DVec2::new(8.0, 8.0));
        assert_eq!(b.max, DVec2::new(12.0, 12.0));
    }

    #[test]
    fn test_line_box_follows_direction_and_is_inflated() {
        let b = shape_aabb(&line(1, -4.0, 3.0), DVec2::new(10.0, 10.0));
        assert_eq!(b.min, DVec2::new(5.0, 9.0));
        assert_eq!(b.max, DVec2::new(11.0, 14.0));
    }

    #[test]
    fn test_text_box_is_char_count_wide() {
        let b = shape_aabb(&text(1, "abc"), DVec2::new(1.0, 2.0));
        assert_eq!(b.min, DVec2::new(1.0, 2.0));
        assert_eq!(b.max, DVec2::new(4.0, 22.0));
    }

    #[test]
    fn test_touching_boxes_overlap() {
        let a = Aabb::new(DVec2::ZERO, DVec2::new(1.0, 1.0));
        let b = Aabb::new(DVec2::new(1.0, 0.0), DVec2::new(2.0, 1.0));
        assert!(a.overlaps(&b));
        let c = Aabb::new(DVec2::new(1.5, 0.0), DVec2::new(2.0, 1.0));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_far_apart_shapes_do_not_overlap() {
        assert!(!shapes_overlap(
            &circle(1, 1.0),
            DVec2::ZERO,
            &rect(2, 5.0, 5.0),
            DVec2::new(100.0, 100.0)
        ));
    }

    fn any_shape() -> impl Strategy<Value = Shape> {
        prop_oneof![
            (0.0..50.0f64).prop_map(|r| circle(1, r)),
            (0.0..50.0f64, 0.0..50.0f64).prop_map(|(w, h)| rect(2, w, h)),
            (-50.0..50.0f64, -50.0..50.0f64).prop_map(|(dx, dy)| line(3, dx, dy)),
            "[a-z ]{0,12}".prop_map(|s| text(4, &s)),
            Just(style()),
        ]
    }

    fn any_point() -> impl Strategy<Value = DVec2> {
        (-500.0..500.0f64, -500.0..500.0f64).prop_map(|(x, y)| DVec2::new(x, y))
    }

    proptest! {
        #[test]
        fn prop_area_non_negative_and_translation_invariant(shape in any_shape(), to in any_point()) {
            let area = shape_area(&shape);
            prop_assert!(area >= 0.0);
            if let Some(moved) = shape.with_position(to) {
                prop_assert!((shape_area(&moved) - area).abs() < 1e-9);
            }
        }

        #[test]
        fn prop_overlap_is_symmetric(a in any_shape(), pa in any_point(), b in any_shape(), pb in any_point()) {
            prop_assert_eq!(shapes_overlap(&a, pa, &b, pb), shapes_overlap(&b, pb, &a, pa));
        }
    }
}
