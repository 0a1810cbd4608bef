pub mod boundary;
pub mod cell_report;
pub mod constants;
pub mod coordinate_key;
pub mod dedup;
pub mod edge_index;
pub mod error;
pub mod fence;
pub mod fence_config;
pub mod grid_source;
pub mod serialize_cell_indexes;
pub mod vertex;

#[cfg(test)]
pub(crate) mod test_grids;

use std::fmt::Debug;
use std::hash::Hash;

pub use boundary::BoundaryExtractor;
pub use cell_report::{CellQuery, CellReport, parse_lat_lng};
pub use coordinate_key::{CoordKey, CoordinateKeyer, UndirectedEdgeKey};
pub use error::FenceError;
pub use fence::{FenceBuilder, FenceLayer, FenceOutcome};
pub use fence_config::FenceConfig;
pub use grid_source::{CellBoundarySource, H3Grid, cell_set_vertices};
pub use vertex::Vertex;

/// Closed outer boundary of `cells` with the default configuration.
///
/// Empty for empty input or when no boundary can be resolved.
pub fn extract_outer_boundary<C, S>(source: &S, cells: &[C]) -> Vec<Vertex>
where
    C: Clone + Eq + Hash + Debug,
    S: CellBoundarySource<C> + ?Sized,
{
    BoundaryExtractor::default().extract_outer_boundary(source, cells)
}

/// Outer-to-inner fence chain of `cells` with the default configuration.
pub fn build_fence_chain<C, S>(source: &S, cells: &[C]) -> Vec<Vertex>
where
    C: Clone + Eq + Hash + Debug,
    S: CellBoundarySource<C> + ?Sized,
{
    FenceBuilder::default().build_fence_chain(source, cells)
}

#[cfg(test)]
mod tests {
    use super::*;
    use h3o::{CellIndex, LatLng, Resolution};

    #[test]
    fn test_empty_inputs_return_empty_lists() {
        let cells: Vec<CellIndex> = Vec::new();
        assert!(extract_outer_boundary(&H3Grid, &cells).is_empty());
        assert!(build_fence_chain(&H3Grid, &cells).is_empty());
    }

    #[test]
    fn test_raw_ids_with_one_malformed() {
        let center = LatLng::new(51.5074, -0.1278).unwrap().to_cell(Resolution::Six);
        let neighbor = center
            .grid_disk::<Vec<_>>(1)
            .into_iter()
            .find(|&c| c != center)
            .unwrap();
        let cells = vec![u64::from(center), 0x0123, u64::from(neighbor)];

        let boundary = extract_outer_boundary(&H3Grid, &cells);
        assert_eq!(boundary.len(), 11);

        // Both cells touch the perimeter, so there is a single layer
        assert_eq!(build_fence_chain(&H3Grid, &cells), boundary);
    }
}
