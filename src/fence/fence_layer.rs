/// Fence layers and the stitched chain they produce

use std::collections::HashSet;

use crate::coordinate_key::{CoordinateKeyer, UndirectedEdgeKey};
use crate::error::FenceError;
use crate::vertex::Vertex;

/// One peeled ring of boundary
#[derive(Debug, Clone)]
pub struct FenceLayer<C> {
    /// Closed loop, first vertex repeated as last
    pub boundary: Vec<Vertex>,
    /// Cells attributed to this loop, in index order
    pub cells: Vec<C>,
    /// Undirected keys of the loop's edges
    pub edge_keys: HashSet<UndirectedEdgeKey>,
}

impl<C> FenceLayer<C> {
    pub fn vertex_count(&self) -> usize {
        self.boundary.len()
    }
}

/// Result of a full layering pass
#[derive(Debug, Clone)]
pub struct FenceOutcome<C> {
    /// Layers from outermost to innermost
    pub layers: Vec<FenceLayer<C>>,
    /// Cells left over when layering stopped
    pub remaining: Vec<C>,
    /// Cells dropped because the grid could not resolve them
    pub unresolved: Vec<C>,
    /// Why layering stopped early, if it did
    pub halted: Option<FenceError>,
}

impl<C> FenceOutcome<C> {
    /// True when every resolvable cell was peeled into some layer
    pub fn is_complete(&self) -> bool {
        self.halted.is_none() && self.remaining.is_empty()
    }

    /// Concatenate layer loops outer-to-inner, skipping a vertex when it
    /// matches the previously emitted one.
    ///
    /// No connector edges are added: consecutive layers are not joined
    /// geometrically.
    pub fn stitch(&self, keyer: &CoordinateKeyer) -> Vec<Vertex> {
        stitch_layers(self.layers.iter().map(|layer| layer.boundary.as_slice()), keyer)
    }
}

pub fn stitch_layers<'a, I>(loops: I, keyer: &CoordinateKeyer) -> Vec<Vertex>
where
    I: IntoIterator<Item = &'a [Vertex]>,
{
    let mut chain: Vec<Vertex> = Vec::new();
    for ring in loops {
        for point in ring {
            if chain.last().is_some_and(|last| keyer.same_point(last, point)) {
                continue;
            }
            chain.push(*point);
        }
    }
    chain
}

/// Undirected keys for each consecutive pair of a loop
pub fn loop_edge_keys(ring: &[Vertex], keyer: &CoordinateKeyer) -> HashSet<UndirectedEdgeKey> {
    ring.windows(2)
        .map(|pair| keyer.edge_key(&pair[0], &pair[1]))
        .filter(|key| !key.is_degenerate())
        .collect()
}
