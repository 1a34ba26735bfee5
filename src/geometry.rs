//! Plain 2D types shared by the layout engine and the draw state machine.
//!
//! Everything here is in rendered pixels relative to the top-left of the
//! draw surface unless stated otherwise.

use serde::{Deserialize, Serialize};

/// Integer width/height pair, used both for natural image sizes and for the
/// rendered container.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Pin both axes into `[0, bounds]`.
    pub fn clamp_to(self, bounds: Dimensions) -> Self {
        Self {
            x: self.x.clamp(0.0, bounds.width as f32),
            y: self.y.clamp(0.0, bounds.height as f32),
        }
    }
}

/// Position of a pointer relative to a surface whose top-left sits at
/// `surface_origin` in the same (page) coordinate space.
pub fn relative_cursor(page: Point, surface_origin: Point) -> Point {
    Point::new(page.x - surface_origin.x, page.y - surface_origin.y)
}

/// Axis-aligned rectangle given by its top-left corner and size.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Empty rectangle anchored at `origin`.
    pub fn at(origin: Point) -> Self {
        Self::new(origin.x, origin.y, 0.0, 0.0)
    }

    /// Bounding box spanned by two corners, in either order.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            left: a.x.min(b.x),
            top: a.y.min(b.y),
            width: (a.x - b.x).abs(),
            height: (a.y - b.y).abs(),
        }
    }

    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn relative_cursor_subtracts_surface_origin() {
        let p = relative_cursor(Point::new(130.0, 75.0), Point::new(100.0, 50.0));
        assert_eq!(p, Point::new(30.0, 25.0));
    }

    #[test]
    fn clamp_pins_to_nearest_edge() {
        let bounds = Dimensions::new(505, 340);
        assert_eq!(Point::new(-4.0, 12.0).clamp_to(bounds), Point::new(0.0, 12.0));
        assert_eq!(Point::new(600.0, 400.0).clamp_to(bounds), Point::new(505.0, 340.0));
        assert_eq!(Point::new(20.0, -1.0).clamp_to(bounds), Point::new(20.0, 0.0));
    }

    #[test]
    fn from_corners_normalizes_a_backwards_drag() {
        let r = Rect::from_corners(Point::new(80.0, 90.0), Point::new(30.0, 10.0));
        assert_eq!(r, Rect::new(30.0, 10.0, 50.0, 80.0));
        assert_eq!(r.right(), 80.0);
        assert_eq!(r.bottom(), 90.0);
    }

    proptest! {
        #[test]
        fn from_corners_is_the_bounding_box(
            ax in -1000.0f32..1000.0, ay in -1000.0f32..1000.0,
            bx in -1000.0f32..1000.0, by in -1000.0f32..1000.0,
        ) {
            let r = Rect::from_corners(Point::new(ax, ay), Point::new(bx, by));
            prop_assert_eq!(r.left, ax.min(bx));
            prop_assert_eq!(r.top, ay.min(by));
            prop_assert_eq!(r.width, (ax - bx).abs());
            prop_assert_eq!(r.height, (ay - by).abs());
        }

        #[test]
        fn clamped_points_stay_inside(
            x in -5000.0f32..5000.0, y in -5000.0f32..5000.0,
            w in 1u32..2000, h in 1u32..2000,
        ) {
            let p = Point::new(x, y).clamp_to(Dimensions::new(w, h));
            prop_assert!(p.x >= 0.0 && p.x <= w as f32);
            prop_assert!(p.y >= 0.0 && p.y <= h as f32);
        }
    }
}
