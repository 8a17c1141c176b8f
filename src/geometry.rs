// Pure geometry helpers shared by drag-select hit-testing and the crop gesture.

use serde::{Deserialize, Serialize};

/// A point in display-space pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Point { x, y }
    }
}

/// An axis-aligned rectangle in display-space pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Rect {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }
}

/// Test whether two rectangles overlap.
///
/// Touching edges count as NOT intersecting (strict inequality). This is a
/// deliberate tie-break: elements that merely graze the selection box edge
/// stay unselected.
pub fn rects_intersect(a: &Rect, b: &Rect) -> bool {
    a.right() > b.left && a.left < b.right() && a.bottom() > b.top && a.top < b.bottom()
}

/// Normalize two arbitrary drag endpoints into a rectangle with non-negative
/// width and height. Users can drag in any direction.
pub fn box_from_drag(start: Point, current: Point) -> Rect {
    Rect {
        left: start.x.min(current.x),
        top: start.y.min(current.y),
        width: (current.x - start.x).abs(),
        height: (current.y - start.y).abs(),
    }
}

/// Clamp a point into the given bounds rectangle.
///
/// Used by the crop gesture so a pointer dragged past the viewport edge
/// cannot grow the crop region beyond the image.
pub fn clamp_point(p: Point, bounds: &Rect) -> Point {
    Point {
        x: p.x.clamp(bounds.left, bounds.right()),
        y: p.y.clamp(bounds.top, bounds.bottom()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rects_intersect_overlapping() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert!(rects_intersect(&a, &b));
        assert!(rects_intersect(&b, &a));
    }

    #[test]
    fn test_rects_intersect_disjoint() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(20.0, 20.0, 10.0, 10.0);
        assert!(!rects_intersect(&a, &b));
    }

    #[test]
    fn test_rects_touching_edges_do_not_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!rects_intersect(&a, &b), "shared vertical edge must not count");

        let c = Rect::new(0.0, 10.0, 10.0, 10.0);
        assert!(!rects_intersect(&a, &c), "shared horizontal edge must not count");
    }

    #[test]
    fn test_box_from_drag_any_direction() {
        let rect = box_from_drag(Point::new(30.0, 40.0), Point::new(10.0, 15.0));
        assert_eq!(rect, Rect::new(10.0, 15.0, 20.0, 25.0));

        let rect = box_from_drag(Point::new(10.0, 15.0), Point::new(30.0, 40.0));
        assert_eq!(rect, Rect::new(10.0, 15.0, 20.0, 25.0));
    }

    #[test]
    fn test_clamp_point_inside_unchanged() {
        let bounds = Rect::new(0.0, 0.0, 100.0, 100.0);
        let p = clamp_point(Point::new(50.0, 60.0), &bounds);
        assert_eq!(p, Point::new(50.0, 60.0));
    }

    #[test]
    fn test_clamp_point_outside_snaps_to_edge() {
        let bounds = Rect::new(10.0, 10.0, 80.0, 80.0);
        let p = clamp_point(Point::new(-5.0, 200.0), &bounds);
        assert_eq!(p, Point::new(10.0, 90.0));
    }
}
