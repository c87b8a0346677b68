//! Hole merging: splice every hole into its enclosing loop with a bridge.
//!
//! # Algorithm
//!
//! For each hole, take its rightmost vertex M and cast a ray from M in the
//! +x direction. The closest crossing with the enclosing loop selects a
//! candidate anchor: the crossed vertex itself when the ray hits one
//! exactly, otherwise the crossed edge's endpoint with larger x, demoted to
//! the best reflex vertex inside the triangle spanned by M, the crossing
//! point, and the candidate. Splicing M to the anchor turns outer ring and
//! hole into one loop with a zero-width channel between two coincident
//! edges.
//!
//! Holes are merged in order of decreasing rightmost x so that later
//! bridges never cross earlier ones.

use crate::error::TriangulateError;
use crate::polygon::arena::VertexArena;
use crate::predicates::{cross, point_in_triangle};
use crate::primitives::Point2;
use num_traits::Float;
use std::cmp::Ordering;

pub(crate) fn merge_holes<F: Float>(
    arena: &mut VertexArena<F>,
    outer_head: usize,
    hole_heads: &[usize],
) -> Result<(), TriangulateError> {
    let mut queue: Vec<usize> = hole_heads.iter().map(|&h| rightmost(arena, h)).collect();

    queue.sort_by(|&a, &b| {
        arena[b]
            .pos
            .x
            .partial_cmp(&arena[a].pos.x)
            .unwrap_or(Ordering::Equal)
    });

    for m in queue {
        let anchor = find_bridge(arena, outer_head, m)?;
        arena.bridge(anchor, m);
    }
    Ok(())
}

/// The hole vertex with maximum x, ties broken towards maximum y.
fn rightmost<F: Float>(arena: &VertexArena<F>, head: usize) -> usize {
    let mut best = head;
    for v in arena.loop_ids(head) {
        let (p, b) = (arena[v].pos, arena[best].pos);
        if p.x > b.x || (p.x == b.x && p.y > b.y) {
            best = v;
        }
    }
    best
}

/// Finds the loop vertex the bridge from `m` should anchor at.
fn find_bridge<F: Float>(
    arena: &VertexArena<F>,
    outer_head: usize,
    m: usize,
) -> Result<usize, TriangulateError> {
    let mp = arena[m].pos;
    let outer = arena.loop_ids(outer_head);

    // Closest crossing of the rightward ray from m with the loop.
    let mut best_x = F::infinity();
    let mut best_edge: Option<(usize, usize)> = None;
    for &p in &outer {
        let pn = arena[p].next;
        let (pa, pb) = (arena[p].pos, arena[pn].pos);
        if pa.y == pb.y {
            continue;
        }
        let spans = (pa.y >= mp.y && pb.y <= mp.y) || (pa.y <= mp.y && pb.y >= mp.y);
        if !spans {
            continue;
        }
        let x = pa.x + (mp.y - pa.y) * (pb.x - pa.x) / (pb.y - pa.y);
        if x >= mp.x && x < best_x {
            best_x = x;
            best_edge = Some((p, pn));
        }
    }
    let (p, pn) = best_edge.ok_or(TriangulateError::HoleNotInside)?;

    // A crossing at an existing vertex anchors the bridge directly.
    let hit = Point2::new(best_x, mp.y);
    if arena[p].pos == hit {
        return Ok(p);
    }
    if arena[pn].pos == hit {
        return Ok(pn);
    }

    // Otherwise the crossed edge's endpoint with larger x is the candidate,
    // unless a reflex vertex sits inside the triangle (m, hit, candidate).
    // Of those, the one at the smallest angle against the ray wins, nearest
    // first on ties.
    let mut anchor = if arena[p].pos.x > arena[pn].pos.x { p } else { pn };
    let apos = arena[anchor].pos;
    let mut best_tan = F::infinity();
    let mut best_dist = F::infinity();

    for &r in &outer {
        if r == anchor {
            continue;
        }
        let rp = arena[r].pos;
        if rp.x <= mp.x {
            continue;
        }
        if !point_in_triangle(rp, mp, hit, apos) {
            continue;
        }
        let reflex = cross(arena[arena[r].prev].pos, rp, arena[arena[r].next].pos) < F::zero();
        if !reflex {
            continue;
        }
        let tan = (mp.y - rp.y).abs() / (rp.x - mp.x);
        let dist = mp.distance_squared(rp);
        if tan < best_tan || (tan == best_tan && dist < best_dist) {
            anchor = r;
            best_tan = tan;
            best_dist = dist;
        }
    }

    Ok(anchor)
}
