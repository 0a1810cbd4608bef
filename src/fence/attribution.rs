/// Map an extracted loop back to the cells that produced it

use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;

use crate::coordinate_key::UndirectedEdgeKey;
use crate::edge_index::EdgeIndex;
use crate::vertex::Vertex;

/// Cells owning any of `edge_keys`, in index order
pub fn attribute_by_keys<C>(index: &EdgeIndex<C>, edge_keys: &HashSet<UndirectedEdgeKey>) -> Vec<C>
where
    C: Clone + Eq + Hash + Debug,
{
    let owners: HashSet<&C> = edge_keys
        .iter()
        .flat_map(|key| index.cells_for_edge(key))
        .collect();
    in_index_order(index, &owners)
}

/// Cells owning an indexed edge whose endpoints lie within `tolerance_m` of
/// some loop edge's endpoints, in either orientation.
pub fn attribute_by_proximity<C>(index: &EdgeIndex<C>, ring: &[Vertex], tolerance_m: f64) -> Vec<C>
where
    C: Clone + Eq + Hash + Debug,
{
    let near = |a: &Vertex, b: &Vertex| a.distance_m(b) <= tolerance_m;

    let mut owners: HashSet<&C> = HashSet::new();
    for pair in ring.windows(2) {
        let (p, q) = (&pair[0], &pair[1]);
        for (_, edge) in index.undirected_edges() {
            let same = near(p, &edge.a) && near(q, &edge.b);
            let flipped = near(p, &edge.b) && near(q, &edge.a);
            if same || flipped {
                owners.extend(edge.cells.iter());
            }
        }
    }
    in_index_order(index, &owners)
}

fn in_index_order<C>(index: &EdgeIndex<C>, owners: &HashSet<&C>) -> Vec<C>
where
    C: Clone + Eq + Hash + Debug,
{
    index
        .cells()
        .iter()
        .filter(|cell| owners.contains(cell))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::BoundaryExtractor;
    use crate::coordinate_key::CoordinateKeyer;
    use crate::fence::fence_layer::loop_edge_keys;
    use crate::test_grids::SquareGrid;

    #[test]
    fn test_exact_keys_find_perimeter_cells() {
        let grid = SquareGrid::new();
        let ex = BoundaryExtractor::default();
        let index = ex.index(&grid, &SquareGrid::block(3, 3));
        let ring = ex.outer_boundary(&index);

        let cells = attribute_by_keys(&index, &loop_edge_keys(&ring, &CoordinateKeyer::default()));
        assert_eq!(cells.len(), 8);
        assert!(!cells.contains(&(1, 1)));
    }

    #[test]
    fn test_proximity_fallback_absorbs_drift() {
        let grid = SquareGrid::new();
        let ex = BoundaryExtractor::default();
        let index = ex.index(&grid, &[(0, 0)]);

        // ~1.1 m of drift: keys no longer match, distances still do
        let drifted: Vec<Vertex> = ex
            .outer_boundary(&index)
            .iter()
            .map(|v| Vertex::new(v.lat + 1e-5, v.lng))
            .collect();
        let keyer = CoordinateKeyer::default();

        assert!(attribute_by_keys(&index, &loop_edge_keys(&drifted, &keyer)).is_empty());
        assert_eq!(attribute_by_proximity(&index, &drifted, 5.0), vec![(0, 0)]);
    }

    #[test]
    fn test_proximity_matches_reversed_edges() {
        let grid = SquareGrid::new();
        let index = BoundaryExtractor::default().index(&grid, &[(0, 0), (3, 3)]);
        let reversed = vec![grid.corner(1, 0), grid.corner(0, 0)];
        assert_eq!(attribute_by_proximity(&index, &reversed, 5.0), vec![(0, 0)]);
    }

    #[test]
    fn test_far_loop_is_unattributable() {
        let grid = SquareGrid::new();
        let index = BoundaryExtractor::default().index(&grid, &[(0, 0)]);
        // 0.001 deg is ~111 m, far outside the tolerance
        let far = vec![grid.corner(5, 5), grid.corner(6, 5), grid.corner(6, 6), grid.corner(5, 5)];
        assert!(attribute_by_proximity(&index, &far, 5.0).is_empty());
    }
}
