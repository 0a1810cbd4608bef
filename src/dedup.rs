//! Vertex deduplication under coordinate-key equality.

use std::collections::HashSet;

use crate::coordinate_key::CoordinateKeyer;
use crate::vertex::Vertex;

/// Drop vertices whose key equals the immediately preceding kept vertex.
pub fn dedup_consecutive(points: &[Vertex], keyer: &CoordinateKeyer) -> Vec<Vertex> {
    let mut out: Vec<Vertex> = Vec::with_capacity(points.len());
    for point in points {
        match out.last() {
            Some(last) if keyer.same_point(last, point) => {}
            _ => out.push(*point),
        }
    }
    out
}

/// Collapse consecutive duplicates, then make sure the loop ends on its first vertex.
///
/// Idempotent: running it on its own output returns the same sequence.
pub fn dedupe_loop(points: &[Vertex], keyer: &CoordinateKeyer) -> Vec<Vertex> {
    let mut out = dedup_consecutive(points, keyer);
    if let (Some(first), Some(last)) = (out.first().copied(), out.last().copied()) {
        if out.len() == 1 || !keyer.same_point(&first, &last) {
            out.push(first);
        }
    }
    out
}

/// Every distinct vertex, first occurrence wins, input order preserved.
pub fn unique_vertices(points: &[Vertex], keyer: &CoordinateKeyer) -> Vec<Vertex> {
    let mut seen = HashSet::with_capacity(points.len());
    points
        .iter()
        .filter(|point| seen.insert(keyer.key_of(point)))
        .copied()
        .collect()
}
