//! Polygonal regions and their triangulation.
//!
//! The input model is a set of [`Ring`]s: uncontained rings are independent
//! outer boundaries, contained rings are holes of the ring that contains
//! them. [`triangulate`] and [`triangulate_indexed`] run the full pipeline
//! of normalization, hole merging, monotone decomposition, and monotone
//! triangulation.
//!
//! # Example
//!
//! ```
//! use polytri::polygon::{triangulate, Ring};
//! use polytri::Point2;
//!
//! let triangle = Ring::new(vec![
//!     Point2::new(0.0, 0.0),
//!     Point2::new(1.0, 1.0),
//!     Point2::new(0.0, 2.0),
//! ]);
//!
//! let triangles = triangulate(&[triangle]).unwrap();
//! assert_eq!(triangles.len(), 1);
//! ```

mod arena;
mod core;
mod merge;
mod monotone;
mod normalize;
mod triangulate;

pub use self::core::{ring_contains, ring_signed_area, Ring};
pub use triangulate::{triangulate, triangulate_indexed, Triangle, TriangulationResult};
