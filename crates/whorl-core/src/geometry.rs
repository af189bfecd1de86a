use crate::error::MenuError;
use std::f64::consts::PI;
use std::ops::Add;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

/// Even placement of `total` items on a circle around the anchor.
///
/// Item 0 sits on the positive x-axis; indices advance by `2π / total`
/// toward positive y. Offsets are rounded to whole pixels so a given
/// `(index, total, radii)` tuple always lands on the same spot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingLayout {
    menu_radius: f64,
    item_radius: f64,
    total: usize,
    step: f64,
}

impl RingLayout {
    pub fn new(total: usize, menu_radius: f64, item_radius: f64) -> Result<Self, MenuError> {
        if total == 0 {
            return Err(MenuError::InvalidGeometry);
        }
        Ok(Self {
            menu_radius,
            item_radius,
            total,
            step: 2.0 * PI / total as f64,
        })
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn angle(&self, index: usize) -> f64 {
        index as f64 * self.step
    }

    /// Offset of item `index` from the anchor's top-left placement.
    ///
    /// The ring-centering term and the item-size correction cancel, so the
    /// result is a plain `menu_radius`-scaled point on the circle.
    pub fn offset(&self, index: usize) -> Point {
        let angle = self.angle(index);
        let correction = -self.item_radius - (self.menu_radius - self.item_radius);
        let x = self.menu_radius + self.menu_radius * angle.cos() + correction;
        let y = self.menu_radius + self.menu_radius * angle.sin() + correction;
        Point::new(x.round(), y.round())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_items_is_invalid_geometry() {
        assert_eq!(
            RingLayout::new(0, 100.0, 25.0).unwrap_err(),
            MenuError::InvalidGeometry
        );
    }

    #[test]
    fn six_item_ring_exact_offsets() {
        let ring = RingLayout::new(6, 100.0, 25.0).unwrap();

        assert_eq!(ring.offset(0), Point::new(100.0, 0.0));
        assert_eq!(ring.offset(1), Point::new(50.0, 87.0));
        assert_eq!(ring.offset(3), Point::new(-100.0, 0.0));
        assert_eq!(ring.offset(4), Point::new(-50.0, -87.0));
    }

    #[test]
    fn single_item_sits_on_the_positive_x_axis() {
        let ring = RingLayout::new(1, 100.0, 25.0).unwrap();
        assert_eq!(ring.offset(0), Point::new(100.0, 0.0));
    }

    #[test]
    fn offsets_are_rotations_of_item_zero() {
        let ring = RingLayout::new(8, 120.0, 30.0).unwrap();
        let base = ring.offset(0);

        for index in 0..ring.total() {
            let angle = ring.angle(index);
            let rotated_x = base.x * angle.cos() - base.y * angle.sin();
            let rotated_y = base.x * angle.sin() + base.y * angle.cos();
            let actual = ring.offset(index);

            // each coordinate was rounded independently
            assert!((actual.x - rotated_x).abs() <= 1.0, "index {index}: x");
            assert!((actual.y - rotated_y).abs() <= 1.0, "index {index}: y");
        }
    }

    #[test]
    fn item_radius_equal_to_menu_radius_collapses_cleanly() {
        let ring = RingLayout::new(4, 60.0, 60.0).unwrap();

        assert_eq!(ring.offset(0), Point::new(60.0, 0.0));
        assert_eq!(ring.offset(1), Point::new(0.0, 60.0));
        assert_eq!(ring.offset(2), Point::new(-60.0, 0.0));
        assert_eq!(ring.offset(3), Point::new(0.0, -60.0));
    }
}
