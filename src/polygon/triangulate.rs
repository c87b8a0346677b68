//! Triangulation of polygonal regions.
//!
//! # Pipeline
//!
//! 1. Normalize the input rings and group them into regions (one outer
//!    boundary plus its holes).
//! 2. Splice every hole into its outer boundary with a bridge, leaving one
//!    simple loop per region.
//! 3. Split each loop into y-monotone faces with a plane sweep.
//! 4. Triangulate each face in a single stack pass.
//!
//! Output triangles reference the caller's vertices by index, so two input
//! points with equal coordinates stay distinct in the output.
//!
//! # Example
//!
//! ```
//! use polytri::{triangulate, Point2, Ring};
//!
//! let square = Ring::new(vec![
//!     Point2::new(0.0, 0.0),
//!     Point2::new(2.0, 0.0),
//!     Point2::new(2.0, 2.0),
//!     Point2::new(0.0, 2.0),
//! ]);
//!
//! let triangles = triangulate(&[square]).unwrap();
//! assert_eq!(triangles.len(), 2);
//!
//! let total: f64 = triangles.iter().map(|t| t.area()).sum();
//! assert!((total - 4.0).abs() < 1e-7);
//! ```

use crate::error::TriangulateError;
use crate::polygon::arena::VertexArena;
use crate::polygon::core::Ring;
use crate::polygon::merge::merge_holes;
use crate::polygon::monotone::decompose;
use crate::polygon::normalize::normalize;
use crate::predicates::{cross, triangle_area};
use crate::primitives::Point2;
use num_traits::Float;

/// A triangle carrying vertex coordinates, in counter-clockwise order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle<F> {
    /// First vertex of the triangle.
    pub a: Point2<F>,
    /// Second vertex of the triangle.
    pub b: Point2<F>,
    /// Third vertex of the triangle.
    pub c: Point2<F>,
}

impl<F: Float> Triangle<F> {
    /// Creates a new triangle from three points.
    #[inline]
    pub fn new(a: Point2<F>, b: Point2<F>, c: Point2<F>) -> Self {
        Self { a, b, c }
    }

    /// Signed area of the triangle; positive for the counter-clockwise
    /// order this library emits.
    pub fn signed_area(&self) -> F {
        triangle_area(self.a, self.b, self.c)
    }

    /// Absolute area of the triangle.
    pub fn area(&self) -> F {
        self.signed_area().abs()
    }
}

/// Result of an identity-preserving triangulation.
///
/// Each triple indexes the caller's vertices in flattened input order: the
/// first ring's vertices first, then the second ring's, and so on. Every
/// triple is in counter-clockwise order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriangulationResult {
    /// Triangle vertex indices into the flattened input sequence.
    pub indices: Vec<(usize, usize, usize)>,
}

impl TriangulationResult {
    /// Returns the number of triangles.
    #[inline]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Returns true if there are no triangles.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Triangulates a set of rings into coordinate-carrying triangles.
///
/// Rings may arrive in either winding. A ring contained in another ring is
/// treated as a hole; uncontained rings are independent outer boundaries
/// and their triangulations are concatenated.
///
/// # Example
///
/// ```
/// use polytri::{triangulate, Point2, Ring};
///
/// // A 4x4 plate with a 1x1 opening.
/// let outer = Ring::new(vec![
///     Point2::new(0.0, 0.0),
///     Point2::new(4.0, 0.0),
///     Point2::new(4.0, 4.0),
///     Point2::new(0.0, 4.0),
/// ]);
/// let hole = Ring::new(vec![
///     Point2::new(1.5, 1.5),
///     Point2::new(1.5, 2.5),
///     Point2::new(2.5, 2.5),
///     Point2::new(2.5, 1.5),
/// ]);
///
/// let triangles = triangulate(&[outer, hole]).unwrap();
/// assert!(triangles.len() >= 5);
///
/// let total: f64 = triangles.iter().map(|t| t.area()).sum();
/// assert!((total - 15.0).abs() < 1e-7);
/// ```
pub fn triangulate<F: Float>(rings: &[Ring<F>]) -> Result<Vec<Triangle<F>>, TriangulateError> {
    let result = triangulate_indexed(rings)?;
    let points: Vec<Point2<F>> = rings
        .iter()
        .flat_map(|r| r.vertices.iter().copied())
        .collect();
    Ok(result
        .indices
        .iter()
        .map(|&(a, b, c)| Triangle::new(points[a], points[b], points[c]))
        .collect())
}

/// Triangulates a set of rings, returning vertex indices.
///
/// This is the identity-preserving form: every index refers to a vertex
/// the caller passed in, and no coordinates are synthesized.
///
/// # Example
///
/// ```
/// use polytri::{triangulate_indexed, Point2, Ring};
///
/// let pentagon = Ring::new(vec![
///     Point2::new(0.0, 0.0),
///     Point2::new(2.0, 0.0),
///     Point2::new(2.5, 1.5),
///     Point2::new(1.0, 2.5),
///     Point2::new(-0.5, 1.5),
/// ]);
///
/// let result = triangulate_indexed(&[pentagon]).unwrap();
/// assert_eq!(result.len(), 3); // 5 vertices -> 3 triangles
///
/// for &(a, b, c) in &result.indices {
///     assert!(a < 5 && b < 5 && c < 5);
/// }
/// ```
pub fn triangulate_indexed<F: Float>(
    rings: &[Ring<F>],
) -> Result<TriangulationResult, TriangulateError> {
    let regions = normalize(rings)?;
    let mut indices = Vec::new();

    for region in &regions {
        let mut arena = VertexArena::new();
        let outer_head = arena.add_loop(&region.outer);
        let hole_heads: Vec<usize> = region.holes.iter().map(|h| arena.add_loop(h)).collect();

        merge_holes(&mut arena, outer_head, &hole_heads)?;

        for face in decompose(&arena, outer_head)? {
            triangulate_monotone(&arena, &face, &mut indices)?;
        }
    }

    Ok(TriangulationResult { indices })
}

/// Triangulates one y-monotone face with the two-chain stack algorithm.
fn triangulate_monotone<F: Float>(
    arena: &VertexArena<F>,
    face: &[usize],
    out: &mut Vec<(usize, usize, usize)>,
) -> Result<(), TriangulateError> {
    let n = face.len();
    if n < 3 {
        return Err(TriangulateError::InternalInvariant(
            "face with fewer than 3 vertices",
        ));
    }
    if n == 3 {
        return emit(arena, face[0], face[1], face[2], out);
    }

    let mut top = 0;
    let mut bottom = 0;
    for i in 1..n {
        if arena.before(face[i], face[top]) {
            top = i;
        }
        if arena.before(face[bottom], face[i]) {
            bottom = i;
        }
    }

    // Walking forward from the top descends the left chain of a
    // counter-clockwise face, walking backward descends the right chain.
    // Merge the chains by sweep order; the flag marks left-chain vertices.
    let mut seq: Vec<(usize, bool)> = Vec::with_capacity(n);
    seq.push((face[top], true));
    let mut l = (top + 1) % n;
    let mut r = (top + n - 1) % n;
    while l != bottom || r != bottom {
        if l != bottom && (r == bottom || arena.before(face[l], face[r])) {
            seq.push((face[l], true));
            l = (l + 1) % n;
        } else {
            seq.push((face[r], false));
            r = (r + n - 1) % n;
        }
    }
    seq.push((face[bottom], false));

    for w in seq.windows(2) {
        if !arena.before(w[0].0, w[1].0) {
            return Err(TriangulateError::InternalInvariant(
                "face is not y-monotone",
            ));
        }
    }

    // Stack of indices into seq.
    let mut stack: Vec<usize> = vec![0, 1];
    for i in 2..n - 1 {
        let (v, v_left) = seq[i];
        let top_left = seq[stack[stack.len() - 1]].1;

        if v_left != top_left {
            // Opposite chain: v sees every stacked vertex.
            let old_top = stack[stack.len() - 1];
            while stack.len() >= 2 {
                let u1 = stack[stack.len() - 1];
                let u2 = stack[stack.len() - 2];
                emit(arena, seq[u2].0, seq[u1].0, v, out)?;
                stack.pop();
            }
            stack.clear();
            stack.push(old_top);
            stack.push(i);
        } else {
            // Same chain: cut off corners while they stay on the interior
            // side. A zero turn defers the collinear corner instead of
            // emitting a sliver.
            let mut last = stack[stack.len() - 1];
            stack.pop();
            while let Some(&u) = stack.last() {
                let turn = cross(arena[seq[u].0].pos, arena[seq[last].0].pos, arena[v].pos);
                let inward = if v_left {
                    turn > F::zero()
                } else {
                    turn < F::zero()
                };
                if !inward {
                    break;
                }
                emit(arena, seq[u].0, seq[last].0, v, out)?;
                last = u;
                stack.pop();
            }
            stack.push(last);
            stack.push(i);
        }
    }

    // The bottom vertex sees everything still stacked.
    let last_vertex = seq[n - 1].0;
    while stack.len() >= 2 {
        let u1 = stack[stack.len() - 1];
        let u2 = stack[stack.len() - 2];
        emit(arena, seq[u2].0, seq[u1].0, last_vertex, out)?;
        stack.pop();
    }

    Ok(())
}

/// Emits one triangle in counter-clockwise order, mapped back to input
/// indices.
fn emit<F: Float>(
    arena: &VertexArena<F>,
    a: usize,
    b: usize,
    c: usize,
    out: &mut Vec<(usize, usize, usize)>,
) -> Result<(), TriangulateError> {
    let turn = cross(arena[a].pos, arena[b].pos, arena[c].pos);
    if turn == F::zero() {
        return Err(TriangulateError::DegenerateGeometry);
    }
    let (a, b, c) = if turn > F::zero() { (a, b, c) } else { (a, c, b) };
    out.push((arena[a].source, arena[b].source, arena[c].source));
    Ok(())
}
