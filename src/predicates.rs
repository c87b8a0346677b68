//! Geometric predicates for the triangulation pipeline.
//!
//! All predicates use ordinary floating-point arithmetic. Robustness on
//! nearly-degenerate input is best-effort; callers with stricter needs must
//! pre-condition their data.

use crate::primitives::Point2;
use num_traits::Float;
use std::cmp::Ordering;

/// Cross product of the vectors (b - a) and (c - a).
///
/// This equals twice the signed area of triangle abc: positive when the
/// triangle winds counter-clockwise, negative when clockwise, zero when the
/// points are collinear.
#[inline]
pub fn cross<F: Float>(a: Point2<F>, b: Point2<F>, c: Point2<F>) -> F {
    (b - a).cross(c - a)
}

/// Signed area of triangle abc.
///
/// Positive for counter-clockwise winding, negative for clockwise.
#[inline]
pub fn triangle_area<F: Float>(a: Point2<F>, b: Point2<F>, c: Point2<F>) -> F {
    cross(a, b, c) / F::from(2.0).unwrap()
}

/// Tests if point `p` lies inside or on the boundary of triangle abc.
///
/// The triangle may be given in either winding; the test checks that the
/// three sub-triangle areas do not carry opposing signs.
///
/// # Example
///
/// ```
/// use polytri::predicates::point_in_triangle;
/// use polytri::Point2;
///
/// let a = Point2::new(0.0_f64, 0.0);
/// let b = Point2::new(2.0, 0.0);
/// let c = Point2::new(1.0, 2.0);
///
/// assert!(point_in_triangle(Point2::new(1.0, 0.5), a, b, c));
/// assert!(point_in_triangle(Point2::new(1.0, 0.0), a, b, c)); // on an edge
/// assert!(!point_in_triangle(Point2::new(2.0, 2.0), a, b, c));
/// ```
pub fn point_in_triangle<F: Float>(p: Point2<F>, a: Point2<F>, b: Point2<F>, c: Point2<F>) -> bool {
    let d1 = cross(a, b, p);
    let d2 = cross(b, c, p);
    let d3 = cross(c, a, p);

    let has_neg = d1 < F::zero() || d2 < F::zero() || d3 < F::zero();
    let has_pos = d1 > F::zero() || d2 > F::zero() || d3 > F::zero();

    !(has_neg && has_pos)
}

/// Tests if point `p` lies strictly inside triangle abc.
///
/// Points on an edge or at a corner are reported as outside.
pub fn point_in_triangle_strict<F: Float>(
    p: Point2<F>,
    a: Point2<F>,
    b: Point2<F>,
    c: Point2<F>,
) -> bool {
    let d1 = cross(a, b, p);
    let d2 = cross(b, c, p);
    let d3 = cross(c, a, p);

    (d1 > F::zero() && d2 > F::zero() && d3 > F::zero())
        || (d1 < F::zero() && d2 < F::zero() && d3 < F::zero())
}

/// Returns true if `a` is processed before `b` by the top-to-bottom sweep.
///
/// The sweep visits higher y first; exact ties are broken by smaller x.
#[inline]
pub fn sweep_before<F: Float>(a: Point2<F>, b: Point2<F>) -> bool {
    a.y > b.y || (a.y == b.y && a.x < b.x)
}

/// Total ordering of sweep events: y descending, then x ascending.
///
/// Coincident points compare equal; callers that need a strict order break
/// the remaining tie themselves.
pub fn sweep_cmp<F: Float>(a: Point2<F>, b: Point2<F>) -> Ordering {
    match b.y.partial_cmp(&a.y) {
        Some(Ordering::Equal) | None => a.x.partial_cmp(&b.x).unwrap_or(Ordering::Equal),
        Some(ord) => ord,
    }
}
