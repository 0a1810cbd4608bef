/// Per-call edge index over a cell set
///
/// Built once per extraction, passed by reference to the chain walker and the
/// layer attribution step, then dropped. Nothing here outlives one call.

use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use std::hash::Hash;

use crate::coordinate_key::{CoordKey, CoordinateKeyer, UndirectedEdgeKey};
use crate::grid_source::CellBoundarySource;
use crate::vertex::Vertex;

/// One boundary segment walked in the owning cell's native order
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectedEdge {
    pub start: Vertex,
    pub end: Vertex,
    pub start_key: CoordKey,
    pub end_key: CoordKey,
}

impl DirectedEdge {
    pub fn undirected_key(&self) -> UndirectedEdgeKey {
        UndirectedEdgeKey::new(self.start_key, self.end_key)
    }
}

/// An undirected edge with the cells that contribute it
#[derive(Debug, Clone)]
pub struct UndirectedEdge<C> {
    pub a: Vertex,
    pub b: Vertex,
    pub cells: Vec<C>,
}

impl<C> UndirectedEdge<C> {
    /// Number of distinct cells contributing this edge
    pub fn multiplicity(&self) -> usize {
        self.cells.len()
    }
}

#[derive(Debug, Clone)]
pub struct EdgeIndex<C> {
    keyer: CoordinateKeyer,
    /// Indexed cells, in input order
    cells: Vec<C>,
    cell_edges: HashMap<C, Vec<DirectedEdge>>,
    undirected: HashMap<UndirectedEdgeKey, UndirectedEdge<C>>,
    /// First-seen order of `undirected` keys
    undirected_order: Vec<UndirectedEdgeKey>,
    skipped: Vec<C>,
}

impl<C> EdgeIndex<C>
where
    C: Clone + Eq + Hash + Debug,
{
    /// Index every resolvable cell of `cells`.
    ///
    /// Duplicate ids count once. Cells the source cannot resolve are logged and
    /// recorded in [`EdgeIndex::skipped`]; cells with fewer than two corners are
    /// dropped silently.
    pub fn build<S>(source: &S, cells: &[C], keyer: CoordinateKeyer) -> Self
    where
        S: CellBoundarySource<C> + ?Sized,
    {
        let mut index = Self {
            keyer,
            cells: Vec::with_capacity(cells.len()),
            cell_edges: HashMap::with_capacity(cells.len()),
            undirected: HashMap::new(),
            undirected_order: Vec::new(),
            skipped: Vec::new(),
        };

        let mut seen = HashSet::with_capacity(cells.len());
        for cell in cells {
            if !seen.insert(cell.clone()) {
                continue;
            }

            let boundary = match source.cell_boundary(cell) {
                Ok(boundary) => boundary,
                Err(e) => {
                    tracing::warn!(?cell, error = %e, "skipping cell without boundary");
                    index.skipped.push(cell.clone());
                    continue;
                }
            };

            if boundary.len() < 2 {
                tracing::debug!(?cell, corners = boundary.len(), "skipping degenerate boundary");
                continue;
            }

            index.insert_cell(cell, &boundary);
        }

        index
    }

    fn insert_cell(&mut self, cell: &C, boundary: &[Vertex]) {
        let n = boundary.len();
        let mut edges = Vec::with_capacity(n);

        for i in 0..n {
            let start = boundary[i];
            let end = boundary[(i + 1) % n];
            let edge = DirectedEdge {
                start,
                end,
                start_key: self.keyer.key_of(&start),
                end_key: self.keyer.key_of(&end),
            };

            let key = edge.undirected_key();
            if key.is_degenerate() {
                continue;
            }

            let entry = self.undirected.entry(key).or_insert_with(|| {
                self.undirected_order.push(key);
                UndirectedEdge {
                    a: start,
                    b: end,
                    cells: Vec::new(),
                }
            });
            if !entry.cells.contains(cell) {
                entry.cells.push(cell.clone());
            }

            edges.push(edge);
        }

        self.cells.push(cell.clone());
        self.cell_edges.insert(cell.clone(), edges);
    }

    pub fn keyer(&self) -> &CoordinateKeyer {
        &self.keyer
    }

    /// Cells that contributed edges, in input order
    pub fn cells(&self) -> &[C] {
        &self.cells
    }

    /// Cells the grid could not resolve
    pub fn skipped(&self) -> &[C] {
        &self.skipped
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cell_edges(&self, cell: &C) -> Option<&[DirectedEdge]> {
        self.cell_edges.get(cell).map(Vec::as_slice)
    }

    /// All directed edges, grouped by cell in input order
    pub fn directed_edges(&self) -> impl Iterator<Item = &DirectedEdge> + '_ {
        self.cells
            .iter()
            .filter_map(|cell| self.cell_edges.get(cell))
            .flatten()
    }

    pub fn multiplicity(&self, key: &UndirectedEdgeKey) -> usize {
        self.undirected.get(key).map_or(0, UndirectedEdge::multiplicity)
    }

    pub fn cells_for_edge(&self, key: &UndirectedEdgeKey) -> &[C] {
        match self.undirected.get(key) {
            Some(edge) => &edge.cells,
            None => &[],
        }
    }

    /// Undirected edges in first-seen order
    pub fn undirected_edges(&self) -> impl Iterator<Item = (&UndirectedEdgeKey, &UndirectedEdge<C>)> + '_ {
        self.undirected_order
            .iter()
            .filter_map(|key| self.undirected.get(key).map(|edge| (key, edge)))
    }

    /// Directed edges contributed by exactly one cell: the outer edges of the set
    pub fn boundary_edges(&self) -> impl Iterator<Item = &DirectedEdge> + '_ {
        self.directed_edges()
            .filter(|edge| self.multiplicity(&edge.undirected_key()) == 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FenceError;
    use crate::test_grids::SquareGrid;

    #[test]
    fn test_single_cell_edges_wrap() {
        let grid = SquareGrid::new();
        let index = EdgeIndex::build(&grid, &[(0, 0)], CoordinateKeyer::default());

        let edges = index.cell_edges(&(0, 0)).unwrap();
        assert_eq!(edges.len(), 4);
        // Last edge closes back onto the first corner
        assert_eq!(edges[3].end_key, edges[0].start_key);
        assert!(edges.iter().all(|e| index.multiplicity(&e.undirected_key()) == 1));
    }

    #[test]
    fn test_shared_edge_has_multiplicity_two() {
        let grid = SquareGrid::new();
        let index = EdgeIndex::build(&grid, &[(0, 0), (1, 0)], CoordinateKeyer::default());

        let shared: Vec<_> = index
            .undirected_edges()
            .filter(|(_, edge)| edge.multiplicity() == 2)
            .collect();
        assert_eq!(shared.len(), 1);
        assert_eq!(shared[0].1.cells, vec![(0, 0), (1, 0)]);

        assert_eq!(index.directed_edges().count(), 8);
        assert_eq!(index.boundary_edges().count(), 6);
    }

    #[test]
    fn test_unresolvable_cell_is_skipped() {
        let grid = SquareGrid::new().with_missing((1, 0));
        let index = EdgeIndex::build(&grid, &[(0, 0), (1, 0), (2, 0)], CoordinateKeyer::default());

        assert_eq!(index.cells(), &[(0, 0), (2, 0)]);
        assert_eq!(index.skipped(), &[(1, 0)]);
        assert!(index.cell_edges(&(1, 0)).is_none());
    }

    #[test]
    fn test_duplicate_ids_count_once() {
        let grid = SquareGrid::new();
        let index = EdgeIndex::build(&grid, &[(0, 0), (0, 0)], CoordinateKeyer::default());
        assert_eq!(index.cells().len(), 1);
        assert_eq!(index.boundary_edges().count(), 4);
    }

    struct ScriptedGrid;

    impl CellBoundarySource<u8> for ScriptedGrid {
        fn cell_boundary(&self, cell: &u8) -> Result<Vec<Vertex>, FenceError> {
            match cell {
                0 => Ok(vec![Vertex::new(1.0, 1.0)]),
                // Repeated corner produces one zero-length edge
                1 => Ok(vec![
                    Vertex::new(0.0, 0.0),
                    Vertex::new(0.0, 0.0),
                    Vertex::new(0.0, 1.0),
                    Vertex::new(1.0, 1.0),
                ]),
                _ => Ok(Vec::new()),
            }
        }
    }

    #[test]
    fn test_degenerate_boundaries_and_edges() {
        let index = EdgeIndex::build(&ScriptedGrid, &[0u8, 1, 2], CoordinateKeyer::default());
        assert_eq!(index.cells(), &[1u8]);
        assert!(index.skipped().is_empty());
        assert_eq!(index.cell_edges(&1).unwrap().len(), 3);
    }
}
