/// Planar test grid with exact, hand-checkable topology

use std::collections::HashSet;

use crate::error::FenceError;
use crate::grid_source::CellBoundarySource;
use crate::vertex::Vertex;

/// Unit squares addressed by (column, row), laid out near (10°N, 20°E).
///
/// Shared corners are computed with identical expressions, so neighbours agree
/// exactly. Cells listed as missing fail with `BoundaryUnavailable`.
#[derive(Debug, Clone)]
pub struct SquareGrid {
    pub origin: Vertex,
    pub size_deg: f64,
    missing: HashSet<(i32, i32)>,
}

impl SquareGrid {
    pub fn new() -> Self {
        Self {
            origin: Vertex::new(10.0, 20.0),
            size_deg: 0.001,
            missing: HashSet::new(),
        }
    }

    pub fn with_missing(mut self, cell: (i32, i32)) -> Self {
        self.missing.insert(cell);
        self
    }

    pub fn corner(&self, col: i32, row: i32) -> Vertex {
        Vertex::new(
            self.origin.lat + row as f64 * self.size_deg,
            self.origin.lng + col as f64 * self.size_deg,
        )
    }

    /// All cells of a `width` x `height` block, row-major
    pub fn block(width: i32, height: i32) -> Vec<(i32, i32)> {
        (0..height)
            .flat_map(|row| (0..width).map(move |col| (col, row)))
            .collect()
    }
}

impl CellBoundarySource<(i32, i32)> for SquareGrid {
    fn cell_boundary(&self, cell: &(i32, i32)) -> Result<Vec<Vertex>, FenceError> {
        if self.missing.contains(cell) {
            return Err(FenceError::BoundaryUnavailable {
                cell: format!("{:?}", cell),
                reason: "missing from test grid".to_string(),
            });
        }
        let (col, row) = *cell;
        // Counter-clockwise with lng as x and lat as y
        Ok(vec![
            self.corner(col, row),
            self.corner(col + 1, row),
            self.corner(col + 1, row + 1),
            self.corner(col, row + 1),
        ])
    }
}
