//! Ring validation, canonical winding, and grouping into regions.
//!
//! This is the only stage that inspects the caller's data; everything after
//! it assumes validated input. Each input vertex keeps the index it had in
//! the flattened input sequence so that output triangles can refer back to
//! the caller's points.

use crate::error::TriangulateError;
use crate::polygon::core::{ring_contains, ring_signed_area, Ring};
use crate::primitives::Point2;
use num_traits::Float;
use std::cmp::Ordering;

/// Area magnitude below which a ring counts as degenerate.
const AREA_EPSILON: f64 = 1e-12;

/// A cleaned vertex paired with the flat index of the input point it came
/// from.
pub(crate) type SourceVertex<F> = (Point2<F>, usize);

/// One outer boundary (counter-clockwise) with its holes (clockwise).
///
/// Regions are triangulated independently and their triangle lists
/// concatenated.
#[derive(Debug, PartialEq)]
pub(crate) struct Region<F> {
    pub outer: Vec<SourceVertex<F>>,
    pub holes: Vec<Vec<SourceVertex<F>>>,
}

struct CleanedRing<F> {
    verts: Vec<SourceVertex<F>>,
    positions: Vec<Point2<F>>,
    area: F,
}

/// Validates every ring, decides which rings are outers and which are
/// holes, and canonicalizes winding (outers counter-clockwise, holes
/// clockwise).
///
/// A ring contained in no other ring is an independent outer boundary. A
/// contained ring is a hole of its smallest containing ring, which must
/// itself be an outer. A non-first uncontained ring wound clockwise was
/// marked as a hole by the caller and has nothing to be a hole of.
pub(crate) fn normalize<F: Float>(rings: &[Ring<F>]) -> Result<Vec<Region<F>>, TriangulateError> {
    let mut cleaned = Vec::with_capacity(rings.len());
    let mut base = 0;
    for ring in rings {
        cleaned.push(clean_ring(ring, base)?);
        base += ring.len();
    }

    let n = cleaned.len();
    let mut containers: Vec<Vec<usize>> = vec![Vec::new(); n];
    for i in 0..n {
        let probe = cleaned[i].positions[0];
        for j in 0..n {
            if i != j && ring_contains(&cleaned[j].positions, probe) {
                containers[i].push(j);
            }
        }
    }

    let mut regions: Vec<Region<F>> = Vec::new();
    let mut region_of: Vec<Option<usize>> = vec![None; n];

    for i in 0..n {
        if !containers[i].is_empty() {
            continue;
        }
        if i > 0 && cleaned[i].area < F::zero() {
            // Explicitly wound as a hole, but floating free.
            return Err(TriangulateError::HoleNotInside);
        }
        let mut verts = cleaned[i].verts.clone();
        if cleaned[i].area < F::zero() {
            verts.reverse();
        }
        region_of[i] = Some(regions.len());
        regions.push(Region {
            outer: verts,
            holes: Vec::new(),
        });
    }

    for i in 0..n {
        if containers[i].is_empty() {
            continue;
        }
        let parent = smallest_container(&containers[i], &cleaned);
        let region = region_of[parent].ok_or(TriangulateError::HoleNotInside)?;
        let mut verts = cleaned[i].verts.clone();
        if cleaned[i].area > F::zero() {
            verts.reverse();
        }
        regions[region].holes.push(verts);
    }

    Ok(regions)
}

fn smallest_container<F: Float>(containers: &[usize], cleaned: &[CleanedRing<F>]) -> usize {
    let mut best = containers[0];
    for &c in &containers[1..] {
        let ordering = cleaned[c]
            .area
            .abs()
            .partial_cmp(&cleaned[best].area.abs())
            .unwrap_or(Ordering::Equal);
        if ordering == Ordering::Less {
            best = c;
        }
    }
    best
}

fn clean_ring<F: Float>(ring: &Ring<F>, base: usize) -> Result<CleanedRing<F>, TriangulateError> {
    let mut verts: Vec<SourceVertex<F>> = Vec::with_capacity(ring.len());
    for (i, &p) in ring.vertices.iter().enumerate() {
        if !p.x.is_finite() || !p.y.is_finite() {
            return Err(TriangulateError::DegenerateRing);
        }
        if let Some(&(last, _)) = verts.last() {
            if last == p {
                continue;
            }
        }
        verts.push((p, base + i));
    }

    // Collapse an explicit closing vertex.
    while verts.len() > 1 && verts[0].0 == verts[verts.len() - 1].0 {
        verts.pop();
    }

    if verts.len() < 3 {
        return Err(TriangulateError::DegenerateRing);
    }

    // Adjacent duplicates are gone, so any remaining coincident pair pinches
    // the ring.
    for i in 0..verts.len() {
        for j in (i + 1)..verts.len() {
            if verts[i].0 == verts[j].0 {
                return Err(TriangulateError::DegenerateGeometry);
            }
        }
    }

    let positions: Vec<Point2<F>> = verts.iter().map(|v| v.0).collect();
    let area = ring_signed_area(&positions);
    if area.abs() < F::from(AREA_EPSILON).unwrap() {
        return Err(TriangulateError::DegenerateRing);
    }

    Ok(CleanedRing {
        verts,
        positions,
        area,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring(coords: &[(f64, f64)]) -> Ring<f64> {
        Ring::new(coords.iter().map(|&(x, y)| Point2::new(x, y)).collect())
    }

    fn unit_square_at(x: f64, y: f64) -> Ring<f64> {
        ring(&[(x, y), (x + 1.0, y), (x + 1.0, y + 1.0), (x, y + 1.0)])
    }

    #[test]
    fn test_single_ring_one_region() {
        let regions = normalize(&[unit_square_at(0.0, 0.0)]).unwrap();
        assert_eq!(regions.len(), 1);
        assert!(regions[0].holes.is_empty());
        assert_eq!(regions[0].outer.len(), 4);
    }

    #[test]
    fn test_cw_outer_is_reversed() {
        let cw = ring(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]);
        let regions = normalize(&[cw]).unwrap();
        let positions: Vec<Point2<f64>> = regions[0].outer.iter().map(|v| v.0).collect();
        assert!(ring_signed_area(&positions) > 0.0);
    }

    #[test]
    fn test_hole_is_clockwise_and_assigned() {
        let outer = ring(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)]);
        // Hole given counter-clockwise; normalization flips it.
        let hole = ring(&[(1.0, 1.0), (3.0, 1.0), (3.0, 3.0), (1.0, 3.0)]);
        let regions = normalize(&[outer, hole]).unwrap();
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].holes.len(), 1);
        let positions: Vec<Point2<f64>> = regions[0].holes[0].iter().map(|v| v.0).collect();
        assert!(ring_signed_area(&positions) < 0.0);
    }

    #[test]
    fn test_disjoint_outers_form_two_regions() {
        let regions = normalize(&[unit_square_at(0.0, 0.0), unit_square_at(3.0, 0.0)]).unwrap();
        assert_eq!(regions.len(), 2);
        assert!(regions.iter().all(|r| r.holes.is_empty()));
    }

    #[test]
    fn test_uncontained_cw_ring_is_rejected() {
        let outer = unit_square_at(0.0, 0.0);
        let stray = ring(&[(5.0, 0.0), (5.0, 1.0), (6.0, 1.0), (6.0, 0.0)]);
        assert!(stray.signed_area() < 0.0);
        assert_eq!(
            normalize(&[outer, stray]),
            Err(TriangulateError::HoleNotInside)
        );
    }

    #[test]
    fn test_ring_nested_in_hole_is_rejected() {
        let outer = ring(&[(0.0, 0.0), (9.0, 0.0), (9.0, 9.0), (0.0, 9.0)]);
        let hole = ring(&[(1.0, 1.0), (1.0, 8.0), (8.0, 8.0), (8.0, 1.0)]);
        let island = ring(&[(3.0, 3.0), (6.0, 3.0), (6.0, 6.0), (3.0, 6.0)]);
        assert_eq!(
            normalize(&[outer, hole, island]),
            Err(TriangulateError::HoleNotInside)
        );
    }

    #[test]
    fn test_too_few_vertices() {
        let line = ring(&[(0.0, 0.0), (1.0, 0.0)]);
        assert_eq!(normalize(&[line]), Err(TriangulateError::DegenerateRing));
    }

    #[test]
    fn test_zero_area_ring() {
        let collinear = ring(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);
        assert_eq!(
            normalize(&[collinear]),
            Err(TriangulateError::DegenerateRing)
        );
    }

    #[test]
    fn test_non_finite_coordinate() {
        let bad = ring(&[(0.0, 0.0), (1.0, f64::NAN), (1.0, 1.0)]);
        assert_eq!(normalize(&[bad]), Err(TriangulateError::DegenerateRing));
    }

    #[test]
    fn test_adjacent_duplicates_collapse() {
        let noisy = ring(&[
            (0.0, 0.0),
            (0.0, 0.0),
            (1.0, 0.0),
            (1.0, 1.0),
            (1.0, 1.0),
            (0.0, 1.0),
            (0.0, 0.0), // explicit closing vertex
        ]);
        let regions = normalize(&[noisy]).unwrap();
        assert_eq!(regions[0].outer.len(), 4);
    }

    #[test]
    fn test_pinched_ring_is_degenerate_geometry() {
        // The waist revisits (1, 0) without it being an adjacent duplicate.
        let pinched = ring(&[
            (0.0, 0.0),
            (1.0, 0.0),
            (2.0, -1.0),
            (3.0, 0.0),
            (1.0, 0.0),
            (0.5, 1.0),
        ]);
        assert_eq!(
            normalize(&[pinched]),
            Err(TriangulateError::DegenerateGeometry)
        );
    }

    #[test]
    fn test_source_indices_survive_reversal() {
        let cw = ring(&[(0.0, 0.0), (0.0, 2.0), (2.0, 2.0), (2.0, 0.0)]);
        let regions = normalize(&[cw.clone()]).unwrap();
        let mut sources: Vec<usize> = regions[0].outer.iter().map(|v| v.1).collect();
        sources.sort_unstable();
        assert_eq!(sources, vec![0, 1, 2, 3]);
        // Every kept vertex still carries its own input coordinates.
        for &(pos, src) in &regions[0].outer {
            assert_eq!(pos, cw.vertices[src]);
        }
    }

    #[test]
    fn test_second_ring_base_offset() {
        let outer = ring(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)]);
        let hole = ring(&[(1.0, 1.0), (1.0, 2.0), (2.0, 2.0), (2.0, 1.0)]);
        let regions = normalize(&[outer, hole]).unwrap();
        let mut sources: Vec<usize> = regions[0].holes[0].iter().map(|v| v.1).collect();
        sources.sort_unstable();
        assert_eq!(sources, vec![4, 5, 6, 7]);
    }
}
