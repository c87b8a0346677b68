//! Error types for triangulation.

use thiserror::Error;

/// Errors that can occur while triangulating a set of rings.
///
/// All variants are fatal to the call that produced them: no partial
/// triangle list is returned alongside an error, and nothing is retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TriangulateError {
    /// A ring has fewer than three distinct vertices, a non-finite
    /// coordinate, or essentially zero area.
    #[error("degenerate ring: fewer than 3 distinct vertices or near-zero area")]
    DegenerateRing,

    /// A hole ring is not contained in any outer ring.
    #[error("hole ring is not contained in any outer ring")]
    HoleNotInside,

    /// A geometric predicate failed on collinear or coincident input points.
    #[error("degenerate geometry: collinear or coincident input points")]
    DegenerateGeometry,

    /// An internal post-condition failed. This should never happen for
    /// valid input; it indicates a bug rather than a problem with the
    /// caller's data.
    #[error("internal invariant violated: {0}")]
    InternalInvariant(&'static str),
}
