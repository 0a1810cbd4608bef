/// Outer boundary extraction
///
/// Keeps the edges contributed by exactly one cell, chains them head-to-tail
/// into closed loops and returns the loop with the most vertices.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use crate::coordinate_key::CoordKey;
use crate::dedup::dedupe_loop;
use crate::edge_index::{DirectedEdge, EdgeIndex};
use crate::error::FenceError;
use crate::fence_config::FenceConfig;
use crate::grid_source::CellBoundarySource;
use crate::vertex::Vertex;

#[derive(Debug, Clone, Default)]
pub struct BoundaryExtractor {
    config: FenceConfig,
}

impl BoundaryExtractor {
    pub fn new(config: FenceConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FenceConfig {
        &self.config
    }

    pub fn index<C, S>(&self, source: &S, cells: &[C]) -> EdgeIndex<C>
    where
        C: Clone + Eq + Hash + Debug,
        S: CellBoundarySource<C> + ?Sized,
    {
        EdgeIndex::build(source, cells, self.config.keyer())
    }

    /// Closed outer boundary of `cells`, first vertex repeated as last.
    ///
    /// Empty when `cells` is empty or no loop can be closed. Disjoint regions
    /// are not merged: only the largest loop is returned.
    pub fn extract_outer_boundary<C, S>(&self, source: &S, cells: &[C]) -> Vec<Vertex>
    where
        C: Clone + Eq + Hash + Debug,
        S: CellBoundarySource<C> + ?Sized,
    {
        if cells.is_empty() {
            return Vec::new();
        }
        let index = self.index(source, cells);
        self.outer_boundary(&index)
    }

    /// Largest closed loop of an existing index, deduplicated and re-closed
    pub fn outer_boundary<C>(&self, index: &EdgeIndex<C>) -> Vec<Vertex>
    where
        C: Clone + Eq + Hash + Debug,
    {
        let mut best: Option<Vec<Vertex>> = None;
        for candidate in self.closed_loops(index) {
            // Strict comparison: the first loop found wins a tie
            if best.as_ref().is_none_or(|b| candidate.len() > b.len()) {
                best = Some(candidate);
            }
        }

        best.map(|ring| dedupe_loop(&ring, index.keyer()))
            .unwrap_or_default()
    }

    /// Every closed loop of boundary edges, in discovery order.
    ///
    /// Loops are closed (start repeated) but not deduplicated. Chains that
    /// dead-end or hit the step ceiling are dropped without consuming edges.
    pub fn closed_loops<C>(&self, index: &EdgeIndex<C>) -> Vec<Vec<Vertex>>
    where
        C: Clone + Eq + Hash + Debug,
    {
        let edges: Vec<&DirectedEdge> = index.boundary_edges().collect();

        let mut outgoing: HashMap<CoordKey, Vec<usize>> = HashMap::new();
        for (i, edge) in edges.iter().enumerate() {
            outgoing.entry(edge.start_key).or_default().push(i);
        }

        let mut used = vec![false; edges.len()];
        let mut in_chain = vec![false; edges.len()];
        let mut loops = Vec::new();

        for first in 0..edges.len() {
            if used[first] {
                continue;
            }

            let chain = match self.walk_chain(first, &edges, &outgoing, &used, &mut in_chain) {
                Ok(chain) => chain,
                Err(e @ FenceError::IterationLimitExceeded { .. }) => {
                    tracing::warn!(error = %e, "abandoning chain walk");
                    continue;
                }
                Err(e) => {
                    tracing::debug!(error = %e, "discarding open chain");
                    continue;
                }
            };

            let mut ring = Vec::with_capacity(chain.len() + 1);
            ring.push(edges[first].start);
            ring.extend(chain.iter().map(|&i| edges[i].end));

            if ring.len() < self.config.min_loop_vertices {
                tracing::debug!(vertices = ring.len(), "discarding short loop");
                continue;
            }

            for &i in &chain {
                used[i] = true;
            }
            loops.push(ring);
        }

        loops
    }

    /// Follow unused outgoing edges from `first` until the walk returns to its
    /// start vertex. Returns the edge indices of the closed chain.
    fn walk_chain(
        &self,
        first: usize,
        edges: &[&DirectedEdge],
        outgoing: &HashMap<CoordKey, Vec<usize>>,
        used: &[bool],
        in_chain: &mut [bool],
    ) -> Result<Vec<usize>, FenceError> {
        let start_key = edges[first].start_key;
        let mut chain = vec![first];
        in_chain[first] = true;
        let mut current = edges[first].end_key;

        let result = loop {
            if current == start_key {
                break Ok(());
            }
            if chain.len() >= self.config.max_walk_steps {
                break Err(FenceError::IterationLimitExceeded {
                    limit: self.config.max_walk_steps,
                });
            }

            let next = outgoing
                .get(&current)
                .and_then(|candidates| candidates.iter().copied().find(|&i| !used[i] && !in_chain[i]));

            match next {
                Some(i) => {
                    in_chain[i] = true;
                    chain.push(i);
                    current = edges[i].end_key;
                }
                None => break Err(FenceError::DeadEndChain { steps: chain.len() }),
            }
        };

        for &i in &chain {
            in_chain[i] = false;
        }
        result.map(|()| chain)
    }
}
