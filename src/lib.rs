//! polytri - Triangulation of polygonal regions
//!
//! Decomposes arbitrary two-dimensional polygonal regions into
//! non-overlapping triangles whose union is exactly the input region. The
//! regions may be non-convex, may contain holes, and may consist of several
//! disjoint pieces.
//!
//! The engine merges holes into their enclosing boundaries, splits the
//! result into y-monotone pieces with a plane sweep, and triangulates each
//! piece in linear time. Output triangles reference input vertices by
//! index, so callers keep full control over their point data.
//!
//! # Example
//!
//! ```
//! use polytri::{triangulate, Point2, Ring};
//!
//! // A 4x4 plate with a 1x1 opening.
//! let outer = Ring::new(vec![
//!     Point2::new(0.0, 0.0),
//!     Point2::new(4.0, 0.0),
//!     Point2::new(4.0, 4.0),
//!     Point2::new(0.0, 4.0),
//! ]);
//! let hole = Ring::new(vec![
//!     Point2::new(1.5, 1.5),
//!     Point2::new(1.5, 2.5),
//!     Point2::new(2.5, 2.5),
//!     Point2::new(2.5, 1.5),
//! ]);
//!
//! let triangles = triangulate(&[outer, hole]).unwrap();
//!
//! let total: f64 = triangles.iter().map(|t| t.area()).sum();
//! assert!((total - 15.0).abs() < 1e-7);
//! ```

pub mod error;
pub mod polygon;
pub mod predicates;
pub mod primitives;

pub use error::TriangulateError;
pub use polygon::{triangulate, triangulate_indexed, Ring, Triangle, TriangulationResult};
pub use predicates::{point_in_triangle, sweep_before, triangle_area};
pub use primitives::{Point2, Vec2};
