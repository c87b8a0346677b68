//! Ring type and basic ring operations.

use crate::primitives::Point2;
use num_traits::Float;

/// A closed loop of vertices in the plane.
///
/// The loop is implicitly closed (the last vertex connects back to the
/// first). Winding is derived from the sign of the shoelace area: positive
/// means counter-clockwise, negative clockwise. Triangulation accepts rings
/// in either winding and canonicalizes internally.
///
/// # Example
///
/// ```
/// use polytri::{Point2, Ring};
///
/// let square = Ring::new(vec![
///     Point2::new(0.0, 0.0),
///     Point2::new(2.0, 0.0),
///     Point2::new(2.0, 2.0),
///     Point2::new(0.0, 2.0),
/// ]);
///
/// assert_eq!(square.len(), 4);
/// assert!(square.signed_area() > 0.0); // counter-clockwise
/// assert_eq!(square.area(), 4.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Ring<F> {
    /// The vertices of the ring, in order.
    pub vertices: Vec<Point2<F>>,
}

impl<F: Float> Ring<F> {
    /// Creates a new ring from vertices.
    #[inline]
    pub fn new(vertices: Vec<Point2<F>>) -> Self {
        Self { vertices }
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Returns true if the ring has no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Returns the signed area of the ring using the shoelace formula.
    ///
    /// Positive for counter-clockwise winding, negative for clockwise.
    pub fn signed_area(&self) -> F {
        ring_signed_area(&self.vertices)
    }

    /// Returns the absolute area of the ring.
    pub fn area(&self) -> F {
        self.signed_area().abs()
    }

    /// Tests if a point is inside the ring.
    pub fn contains(&self, point: Point2<F>) -> bool {
        ring_contains(&self.vertices, point)
    }
}

/// Computes the signed area of a vertex loop using the shoelace formula.
///
/// Positive for counter-clockwise winding, negative for clockwise.
pub fn ring_signed_area<F: Float>(vertices: &[Point2<F>]) -> F {
    if vertices.len() < 3 {
        return F::zero();
    }

    let mut area = F::zero();
    let n = vertices.len();

    for i in 0..n {
        let j = (i + 1) % n;
        area = area + vertices[i].x * vertices[j].y;
        area = area - vertices[j].x * vertices[i].y;
    }

    area / F::from(2.0).unwrap()
}

/// Tests if a point is inside a vertex loop using the ray casting algorithm.
///
/// Points on the boundary may be reported either way.
pub fn ring_contains<F: Float>(vertices: &[Point2<F>], point: Point2<F>) -> bool {
    if vertices.len() < 3 {
        return false;
    }

    let mut inside = false;
    let n = vertices.len();

    let mut j = n - 1;
    for i in 0..n {
        let vi = vertices[i];
        let vj = vertices[j];

        if ((vi.y > point.y) != (vj.y > point.y))
            && (point.x < (vj.x - vi.x) * (point.y - vi.y) / (vj.y - vi.y) + vi.x)
        {
            inside = !inside;
        }
        j = i;
    }

    inside
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn square(size: f64) -> Ring<f64> {
        Ring::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(size, 0.0),
            Point2::new(size, size),
            Point2::new(0.0, size),
        ])
    }

    #[test]
    fn test_signed_area_ccw() {
        assert_relative_eq!(square(2.0).signed_area(), 4.0);
    }

    #[test]
    fn test_signed_area_cw() {
        let ring = Ring::new(vec![
            Point2::new(0.0_f64, 0.0),
            Point2::new(0.0, 1.0),
            Point2::new(1.0, 1.0),
            Point2::new(1.0, 0.0),
        ]);
        assert_relative_eq!(ring.signed_area(), -1.0);
        assert_relative_eq!(ring.area(), 1.0);
    }

    #[test]
    fn test_area_triangle() {
        let ring = Ring::new(vec![
            Point2::new(0.0_f64, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(1.0, 2.0),
        ]);
        assert_relative_eq!(ring.area(), 2.0);
    }

    #[test]
    fn test_degenerate_area_is_zero() {
        let two: Ring<f64> = Ring::new(vec![Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)]);
        assert_eq!(two.signed_area(), 0.0);
    }

    #[test]
    fn test_contains() {
        let ring = square(2.0);
        assert!(ring.contains(Point2::new(1.0, 1.0)));
        assert!(ring.contains(Point2::new(0.5, 1.5)));
        assert!(!ring.contains(Point2::new(3.0, 1.0)));
        assert!(!ring.contains(Point2::new(-0.5, 1.0)));
    }

    #[test]
    fn test_contains_concave() {
        // L-shape: the notch is outside
        let ring = Ring::new(vec![
            Point2::new(0.0_f64, 0.0),
            Point2::new(3.0, 0.0),
            Point2::new(3.0, 1.0),
            Point2::new(1.0, 1.0),
            Point2::new(1.0, 3.0),
            Point2::new(0.0, 3.0),
        ]);
        assert!(ring.contains(Point2::new(0.5, 2.0)));
        assert!(ring.contains(Point2::new(2.0, 0.5)));
        assert!(!ring.contains(Point2::new(2.0, 2.0)));
    }

    #[test]
    fn test_f32() {
        let ring: Ring<f32> = Ring::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
        ]);
        assert!((ring.area() - 1.0).abs() < 1e-6);
    }
}
