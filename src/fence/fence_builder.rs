/// Layered fence builder
///
/// Peels the outer boundary of the remaining cells, removes the cells that
/// produced it and repeats until nothing is left or no progress can be made.

use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;

use crate::boundary::BoundaryExtractor;
use crate::error::FenceError;
use crate::fence::attribution::{attribute_by_keys, attribute_by_proximity};
use crate::fence::fence_layer::{FenceLayer, FenceOutcome, loop_edge_keys};
use crate::fence_config::FenceConfig;
use crate::grid_source::CellBoundarySource;
use crate::vertex::Vertex;

#[derive(Debug, Clone, Default)]
pub struct FenceBuilder {
    extractor: BoundaryExtractor,
}

impl FenceBuilder {
    pub fn new(config: FenceConfig) -> Self {
        Self {
            extractor: BoundaryExtractor::new(config),
        }
    }

    pub fn config(&self) -> &FenceConfig {
        self.extractor.config()
    }

    /// Concatenated outer-to-inner chain of every layer. Empty for empty input.
    pub fn build_fence_chain<C, S>(&self, source: &S, cells: &[C]) -> Vec<Vertex>
    where
        C: Clone + Eq + Hash + Debug,
        S: CellBoundarySource<C> + ?Sized,
    {
        self.build(source, cells).stitch(&self.config().keyer())
    }

    /// Full layering pass. Never fails: a remainder that cannot be decomposed
    /// is reported through [`FenceOutcome::halted`].
    pub fn build<C, S>(&self, source: &S, cells: &[C]) -> FenceOutcome<C>
    where
        C: Clone + Eq + Hash + Debug,
        S: CellBoundarySource<C> + ?Sized,
    {
        let keyer = self.config().keyer();
        let mut outcome = FenceOutcome {
            layers: Vec::new(),
            remaining: Vec::new(),
            unresolved: Vec::new(),
            halted: None,
        };

        let mut remaining: Vec<C> = cells.to_vec();

        loop {
            if remaining.is_empty() {
                break;
            }

            let index = self.extractor.index(source, &remaining);
            // Unresolvable and degenerate cells can never be peeled
            outcome.unresolved.extend(index.skipped().iter().cloned());
            remaining = index.cells().to_vec();
            if remaining.is_empty() {
                break;
            }

            let layer_number = outcome.layers.len() + 1;
            let ring = self.extractor.outer_boundary(&index);
            if ring.is_empty() {
                let e = FenceError::NoBoundary { remaining: remaining.len() };
                tracing::debug!(layer = layer_number, error = %e, "stopping fence layering");
                outcome.halted = Some(e);
                break;
            }

            let edge_keys = loop_edge_keys(&ring, &keyer);
            let mut attributed = attribute_by_keys(&index, &edge_keys);
            if attributed.is_empty() {
                tracing::debug!(layer = layer_number, "no exact edge match, trying proximity");
                attributed = attribute_by_proximity(&index, &ring, self.config().proximity_tolerance_m);
            }
            if attributed.is_empty() {
                let e = FenceError::Unattributable { layer: layer_number };
                tracing::warn!(error = %e, "stopping fence layering");
                outcome.halted = Some(e);
                break;
            }

            let peeled: HashSet<&C> = attributed.iter().collect();
            remaining.retain(|cell| !peeled.contains(cell));

            tracing::debug!(
                layer = layer_number,
                vertices = ring.len(),
                peeled = attributed.len(),
                remaining = remaining.len(),
                "peeled fence layer"
            );

            outcome.layers.push(FenceLayer {
                boundary: ring,
                cells: attributed,
                edge_keys,
            });
        }

        outcome.remaining = remaining;
        outcome
    }
}
