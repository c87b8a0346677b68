//! Monotone decomposition of a simple polygon by a horizontal plane sweep.
//!
//! # Algorithm
//!
//! The sweep line moves top to bottom over one merged loop. Every vertex is
//! classified from its two neighbors, and a status structure of the active
//! left-boundary edges (each carrying a helper vertex) decides where
//! diagonals must be inserted so that no split or merge vertex survives.
//! The loop edges plus the collected diagonals are then walked into faces,
//! each of which is y-monotone.
//!
//! Coordinates follow the usual mathematical convention (y grows upward);
//! "above" means earlier in sweep order.

use crate::error::TriangulateError;
use crate::polygon::arena::VertexArena;
use crate::predicates::cross;
use crate::primitives::Point2;
use num_traits::Float;

/// Sweep classification of a loop vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum VertexKind {
    /// Both neighbors below, convex corner: a face opens here.
    Start,
    /// Both neighbors above, convex corner: a face closes here.
    End,
    /// Both neighbors below, reflex corner: needs a diagonal upward.
    Split,
    /// Both neighbors above, reflex corner: needs a diagonal downward.
    Merge,
    /// Regular vertex on a descending chain; the interior is to its right.
    Left,
    /// Regular vertex on an ascending chain; the interior is to its left.
    Right,
}

/// Classifies every vertex of the loop. The result is indexed by arena id.
pub(crate) fn classify<F: Float>(arena: &VertexArena<F>, ids: &[usize]) -> Vec<VertexKind> {
    let mut kinds = vec![VertexKind::Left; arena.len()];
    for &v in ids {
        let p = arena[v].prev;
        let n = arena[v].next;
        let prev_below = arena.before(v, p);
        let next_below = arena.before(v, n);
        let turn = cross(arena[p].pos, arena[v].pos, arena[n].pos);

        kinds[v] = if prev_below && next_below {
            if turn > F::zero() {
                VertexKind::Start
            } else {
                VertexKind::Split
            }
        } else if !prev_below && !next_below {
            if turn > F::zero() {
                VertexKind::End
            } else {
                VertexKind::Merge
            }
        } else if !prev_below {
            VertexKind::Left
        } else {
            VertexKind::Right
        };
    }
    kinds
}

/// An active left-boundary edge crossed by the sweep line.
struct StatusEdge<F> {
    /// Loop vertex the edge leaves from; the edge runs to its successor.
    origin: usize,
    upper: Point2<F>,
    lower: Point2<F>,
    /// Most recently seen vertex that may still need a diagonal from below.
    helper: usize,
}

impl<F: Float> StatusEdge<F> {
    /// The x-coordinate where the edge crosses the sweep line at height `y`.
    fn x_at(&self, y: F) -> F {
        if self.upper.y == self.lower.y {
            return self.upper.x.min(self.lower.x);
        }
        if y >= self.upper.y {
            self.upper.x
        } else if y <= self.lower.y {
            self.lower.x
        } else {
            self.upper.x
                + (y - self.upper.y) * (self.lower.x - self.upper.x)
                    / (self.lower.y - self.upper.y)
        }
    }
}

/// The edges currently intersected by the sweep line, ordered left to
/// right.
///
/// The polygon is simple, so active edges never cross and their relative
/// order is fixed for as long as they coexist; keeping a Vec sorted at
/// insertion time stays valid for the whole sweep. Lookup is a binary
/// search; removal scans for the owning vertex.
struct SweepStatus<F> {
    edges: Vec<StatusEdge<F>>,
}

impl<F: Float> SweepStatus<F> {
    fn new() -> Self {
        Self { edges: Vec::new() }
    }

    fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    fn insert(&mut self, edge: StatusEdge<F>) {
        let y = edge.upper.y;
        let x = edge.x_at(y);
        let at = self.edges.partition_point(|e| e.x_at(y) < x);
        self.edges.insert(at, edge);
    }

    fn remove(&mut self, origin: usize) -> Option<StatusEdge<F>> {
        let at = self.edges.iter().position(|e| e.origin == origin)?;
        Some(self.edges.remove(at))
    }

    /// The edge immediately left of point `p` on the sweep line.
    fn left_of(&mut self, p: Point2<F>) -> Option<&mut StatusEdge<F>> {
        let at = self.edges.partition_point(|e| e.x_at(p.y) <= p.x);
        if at == 0 {
            None
        } else {
            self.edges.get_mut(at - 1)
        }
    }
}

/// Splits the loop rooted at `head` into y-monotone faces.
///
/// Returns each face as its vertex ids in counter-clockwise order.
pub(crate) fn decompose<F: Float>(
    arena: &VertexArena<F>,
    head: usize,
) -> Result<Vec<Vec<usize>>, TriangulateError> {
    let ids = arena.loop_ids(head);
    if ids.len() != arena.len() {
        return Err(TriangulateError::InternalInvariant(
            "merged loop does not cover all vertices",
        ));
    }
    if ids.len() < 3 {
        return Err(TriangulateError::InternalInvariant(
            "loop with fewer than 3 vertices",
        ));
    }

    let kinds = classify(arena, &ids);

    let mut events = ids.clone();
    events.sort_by(|&a, &b| arena.order(a, b));

    let mut status = SweepStatus::new();
    let mut diagonals: Vec<(usize, usize)> = Vec::new();

    for &v in &events {
        let pos = arena[v].pos;
        match kinds[v] {
            VertexKind::Start => {
                status.insert(edge_below(arena, v));
            }
            VertexKind::End => {
                close_edge(&mut status, &kinds, arena[v].prev, v, &mut diagonals)?;
            }
            VertexKind::Split => {
                let helper = {
                    let e = status.left_of(pos).ok_or(TriangulateError::InternalInvariant(
                        "split vertex has no edge to its left",
                    ))?;
                    let h = e.helper;
                    e.helper = v;
                    h
                };
                diagonals.push((v, helper));
                status.insert(edge_below(arena, v));
            }
            VertexKind::Merge => {
                close_edge(&mut status, &kinds, arena[v].prev, v, &mut diagonals)?;
                let e = status.left_of(pos).ok_or(TriangulateError::InternalInvariant(
                    "merge vertex has no edge to its left",
                ))?;
                if kinds[e.helper] == VertexKind::Merge {
                    diagonals.push((v, e.helper));
                }
                e.helper = v;
            }
            VertexKind::Left => {
                close_edge(&mut status, &kinds, arena[v].prev, v, &mut diagonals)?;
                status.insert(edge_below(arena, v));
            }
            VertexKind::Right => {
                let e = status.left_of(pos).ok_or(TriangulateError::InternalInvariant(
                    "regular vertex has no edge to its left",
                ))?;
                if kinds[e.helper] == VertexKind::Merge {
                    diagonals.push((v, e.helper));
                }
                e.helper = v;
            }
        }
    }

    if !status.is_empty() {
        return Err(TriangulateError::InternalInvariant(
            "sweep finished with open edges",
        ));
    }

    extract_faces(arena, &ids, &diagonals)
}

/// The descending edge leaving `v` towards its loop successor.
fn edge_below<F: Float>(arena: &VertexArena<F>, v: usize) -> StatusEdge<F> {
    let n = arena[v].next;
    StatusEdge {
        origin: v,
        upper: arena[v].pos,
        lower: arena[n].pos,
        helper: v,
    }
}

/// Removes the edge leaving `origin` from the status, adding the deferred
/// diagonal if its helper was a merge vertex.
fn close_edge<F: Float>(
    status: &mut SweepStatus<F>,
    kinds: &[VertexKind],
    origin: usize,
    v: usize,
    diagonals: &mut Vec<(usize, usize)>,
) -> Result<(), TriangulateError> {
    let e = status.remove(origin).ok_or(TriangulateError::InternalInvariant(
        "edge missing from sweep status",
    ))?;
    if kinds[e.helper] == VertexKind::Merge {
        diagonals.push((v, e.helper));
    }
    Ok(())
}

/// Walks the loop edges plus diagonals into faces.
///
/// Loop edges keep their single interior-left direction; each diagonal
/// borders a face on both sides. From an edge arriving at w, the walk
/// continues along the outgoing edge of w that is immediately clockwise of
/// the reversed arrival direction, which traces every interior face
/// counter-clockwise.
fn extract_faces<F: Float>(
    arena: &VertexArena<F>,
    ids: &[usize],
    diagonals: &[(usize, usize)],
) -> Result<Vec<Vec<usize>>, TriangulateError> {
    let mut edges: Vec<(usize, usize)> = Vec::with_capacity(ids.len() + diagonals.len() * 2);
    for &v in ids {
        edges.push((v, arena[v].next));
    }
    for &(a, b) in diagonals {
        edges.push((a, b));
        edges.push((b, a));
    }

    let angles: Vec<F> = edges
        .iter()
        .map(|&(u, w)| (arena[w].pos - arena[u].pos).angle())
        .collect();

    let mut outgoing: Vec<Vec<usize>> = vec![Vec::new(); arena.len()];
    for (i, &(u, _)) in edges.iter().enumerate() {
        outgoing[u].push(i);
    }

    let mut used = vec![false; edges.len()];
    let mut faces = Vec::new();

    for start in 0..edges.len() {
        if used[start] {
            continue;
        }
        let mut face = Vec::new();
        let mut e = start;
        loop {
            used[e] = true;
            let (u, w) = edges[e];
            face.push(u);
            if face.len() > edges.len() {
                return Err(TriangulateError::InternalInvariant(
                    "face walk failed to close",
                ));
            }
            let back = (arena[u].pos - arena[w].pos).angle();
            let next = clockwise_from(&outgoing[w], &edges, &angles, back, u).ok_or(
                TriangulateError::InternalInvariant("dangling edge in face walk"),
            )?;
            if next == start {
                break;
            }
            e = next;
        }
        // Interior faces come out counter-clockwise; anything else is the
        // far side of the boundary.
        if face_area(arena, &face) > F::zero() {
            faces.push(face);
        }
    }

    Ok(faces)
}

/// Of the candidate edges leaving a vertex, picks the one immediately
/// clockwise of the direction `back`, excluding the exact reversal.
fn clockwise_from<F: Float>(
    candidates: &[usize],
    edges: &[(usize, usize)],
    angles: &[F],
    back: F,
    from: usize,
) -> Option<usize> {
    let mut below: Option<usize> = None;
    let mut wrap: Option<usize> = None;
    for &c in candidates {
        if edges[c].1 == from && angles[c] == back {
            continue;
        }
        if angles[c] < back && below.map_or(true, |b| angles[c] > angles[b]) {
            below = Some(c);
        }
        if wrap.map_or(true, |b| angles[c] > angles[b]) {
            wrap = Some(c);
        }
    }
    below.or(wrap)
}

fn face_area<F: Float>(arena: &VertexArena<F>, face: &[usize]) -> F {
    let mut twice = F::zero();
    let n = face.len();
    for i in 0..n {
        let p = arena[face[i]].pos;
        let q = arena[face[(i + 1) % n]].pos;
        twice = twice + (p.x * q.y - q.x * p.y);
    }
    twice / F::from(2.0).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polygon::merge::merge_holes;

    fn build(coords: &[(f64, f64)]) -> (VertexArena<f64>, usize) {
        let pairs: Vec<(Point2<f64>, usize)> = coords
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| (Point2::new(x, y), i))
            .collect();
        let mut arena = VertexArena::new();
        let head = arena.add_loop(&pairs);
        (arena, head)
    }

    #[test]
    fn test_classify_square() {
        let (arena, head) = build(&[(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0)]);
        let kinds = classify(&arena, &arena.loop_ids(head));
        assert_eq!(kinds[0], VertexKind::Left);
        assert_eq!(kinds[1], VertexKind::End);
        assert_eq!(kinds[2], VertexKind::Right);
        assert_eq!(kinds[3], VertexKind::Start);
    }

    #[test]
    fn test_classify_merge_vertex() {
        // A notch pointing down from the top edge produces a merge vertex.
        let (arena, head) = build(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (2.0, 2.0), (0.0, 4.0)]);
        let kinds = classify(&arena, &arena.loop_ids(head));
        assert_eq!(kinds[3], VertexKind::Merge);
        assert_eq!(kinds[2], VertexKind::Start);
        assert_eq!(kinds[4], VertexKind::Start);
    }

    #[test]
    fn test_classify_split_vertex() {
        // A spike rising from the bottom edge produces a split vertex.
        let (arena, head) = build(&[(0.0, 0.0), (2.0, 2.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)]);
        let kinds = classify(&arena, &arena.loop_ids(head));
        assert_eq!(kinds[1], VertexKind::Split);
    }

    #[test]
    fn test_decompose_convex_single_face() {
        let (arena, head) = build(&[(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0)]);
        let faces = decompose(&arena, head).unwrap();
        assert_eq!(faces.len(), 1);
        assert_eq!(faces[0].len(), 4);
    }

    #[test]
    fn test_decompose_monotone_l_shape_unchanged() {
        // The L-shape is already y-monotone, so no diagonal is inserted.
        let (arena, head) = build(&[
            (0.0, 0.0),
            (3.0, 0.0),
            (3.0, 1.0),
            (1.0, 1.0),
            (1.0, 3.0),
            (0.0, 3.0),
        ]);
        let faces = decompose(&arena, head).unwrap();
        assert_eq!(faces.len(), 1);
        assert_eq!(faces[0].len(), 6);
    }

    #[test]
    fn test_decompose_merge_notch_into_two_faces() {
        let (arena, head) = build(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (2.0, 2.0), (0.0, 4.0)]);
        let faces = decompose(&arena, head).unwrap();
        assert_eq!(faces.len(), 2);
        let total: usize = faces.iter().map(|f| f.len()).sum();
        assert_eq!(total, 7); // 5 loop vertices + one diagonal used twice
    }

    #[test]
    fn test_decompose_merged_hole() {
        let mut arena = VertexArena::new();
        let outer: Vec<(Point2<f64>, usize)> = [(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)]
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| (Point2::new(x, y), i))
            .collect();
        let hole: Vec<(Point2<f64>, usize)> = [(1.5, 1.5), (1.5, 2.5), (2.5, 2.5), (2.5, 1.5)]
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| (Point2::new(x, y), 4 + i))
            .collect();
        let outer_head = arena.add_loop(&outer);
        let hole_head = arena.add_loop(&hole);
        merge_holes(&mut arena, outer_head, &[hole_head]).unwrap();

        let faces = decompose(&arena, outer_head).unwrap();
        // Two diagonals resolve the channelled loop into three faces.
        assert_eq!(faces.len(), 3);
        let total: usize = faces.iter().map(|f| f.len()).sum();
        assert_eq!(total, 14);
        for face in &faces {
            assert!(face.len() >= 3);
            assert!(face_area(&arena, face) > 0.0);
        }
    }

    #[test]
    fn test_faces_cover_loop_area() {
        let (arena, head) = build(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (2.0, 2.0), (0.0, 4.0)]);
        let faces = decompose(&arena, head).unwrap();
        let total: f64 = faces.iter().map(|f| face_area(&arena, f)).sum();
        let whole = face_area(&arena, &arena.loop_ids(head));
        assert!((total - whole).abs() < 1e-12);
    }
}
