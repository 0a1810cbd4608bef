/// Grid collaborator seam
///
/// The fence algorithms only ever ask a grid for one thing: the ordered corner
/// list of a cell. Any tiling with closed polygonal cells can stand in for H3.

use h3o::CellIndex;

use crate::coordinate_key::CoordinateKeyer;
use crate::dedup::unique_vertices;
use crate::error::FenceError;
use crate::vertex::Vertex;

/// Source of cell boundaries for cell identifiers of type `C`
pub trait CellBoundarySource<C> {
    /// Ordered corners of `cell`, without repeating the first corner at the end
    fn cell_boundary(&self, cell: &C) -> Result<Vec<Vertex>, FenceError>;
}

impl<C, S: CellBoundarySource<C> + ?Sized> CellBoundarySource<C> for &S {
    fn cell_boundary(&self, cell: &C) -> Result<Vec<Vertex>, FenceError> {
        (**self).cell_boundary(cell)
    }
}

/// H3 grid backed by `h3o`
///
/// Accepts typed [`CellIndex`] values, raw `u64` indexes and hex strings.
/// Malformed raw or string ids surface as `BoundaryUnavailable`.
#[derive(Debug, Clone, Copy, Default)]
pub struct H3Grid;

impl H3Grid {
    fn boundary_of(cell_index: CellIndex) -> Vec<Vertex> {
        // Counter-clockwise corner order, as produced by h3o
        cell_index
            .boundary()
            .iter()
            .map(|latlng| Vertex::from(*latlng))
            .collect()
    }
}

impl CellBoundarySource<CellIndex> for H3Grid {
    fn cell_boundary(&self, cell: &CellIndex) -> Result<Vec<Vertex>, FenceError> {
        Ok(Self::boundary_of(*cell))
    }
}

impl CellBoundarySource<u64> for H3Grid {
    fn cell_boundary(&self, cell: &u64) -> Result<Vec<Vertex>, FenceError> {
        let cell_index = CellIndex::try_from(*cell).map_err(|e| FenceError::BoundaryUnavailable {
            cell: format!("{:x}", cell),
            reason: e.to_string(),
        })?;
        Ok(Self::boundary_of(cell_index))
    }
}

impl CellBoundarySource<String> for H3Grid {
    fn cell_boundary(&self, cell: &String) -> Result<Vec<Vertex>, FenceError> {
        let cell_index = cell
            .trim()
            .parse::<CellIndex>()
            .map_err(|e| FenceError::BoundaryUnavailable {
                cell: cell.clone(),
                reason: e.to_string(),
            })?;
        Ok(Self::boundary_of(cell_index))
    }
}

/// Every distinct corner of a cell set, in first-seen order.
///
/// Cells whose boundary cannot be resolved are skipped.
pub fn cell_set_vertices<C, S>(source: &S, cells: &[C], keyer: &CoordinateKeyer) -> Vec<Vertex>
where
    C: std::fmt::Debug,
    S: CellBoundarySource<C> + ?Sized,
{
    let mut corners = Vec::new();
    for cell in cells {
        match source.cell_boundary(cell) {
            Ok(boundary) => corners.extend(boundary),
            Err(e) => tracing::warn!(?cell, error = %e, "skipping cell without boundary"),
        }
    }
    unique_vertices(&corners, keyer)
}
