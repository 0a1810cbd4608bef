/// Cell lookup report
///
/// Resolves a coordinate to its H3 cell at a resolution and gathers what a
/// viewer shows about it: center, parent, corners, edge length, area and the
/// optional ring of surrounding cells with its fence.

use h3o::{CellIndex, LatLng, Resolution};
use serde::{Deserialize, Serialize};

use crate::constants::{
    MAX_LATITUDE_DEG, MAX_LONGITUDE_DEG, MAX_RESOLUTION, MAX_RING, MIN_LATITUDE_DEG,
    MIN_LONGITUDE_DEG, VERTEX_DECIMALS,
};
use crate::error::FenceError;
use crate::fence::FenceBuilder;
use crate::fence_config::FenceConfig;
use crate::grid_source::H3Grid;
use crate::serialize_cell_indexes::{
    deserialize_cell_index, deserialize_cell_indexes, deserialize_parent, serialize_cell_index,
    serialize_cell_indexes, serialize_parent,
};
use crate::vertex::Vertex;

/// Parse `"lat,lng"` into a coordinate pair
pub fn parse_lat_lng(input: &str) -> Result<(f64, f64), FenceError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(FenceError::MalformedInput("empty coordinate".to_string()));
    }

    let parts: Vec<&str> = trimmed.split(',').map(str::trim).collect();
    if parts.len() != 2 {
        return Err(FenceError::MalformedInput(format!("expected \"lat,lng\", got \"{}\"", trimmed)));
    }

    let parse = |part: &str| -> Result<f64, FenceError> {
        part.parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .ok_or_else(|| FenceError::MalformedInput(format!("not a number: \"{}\"", part)))
    };
    Ok((parse(parts[0])?, parse(parts[1])?))
}

/// A validated lookup request
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellQuery {
    pub lat: f64,
    pub lng: f64,
    pub res: u8,
    pub ring: u32,
}

impl CellQuery {
    pub fn new(lat: f64, lng: f64, res: u8, ring: u32) -> Result<Self, FenceError> {
        if !(MIN_LATITUDE_DEG..=MAX_LATITUDE_DEG).contains(&lat)
            || !(MIN_LONGITUDE_DEG..=MAX_LONGITUDE_DEG).contains(&lng)
        {
            return Err(FenceError::InvalidCoordinate { lat, lng });
        }
        if res > MAX_RESOLUTION {
            return Err(FenceError::InvalidResolution(res));
        }
        if ring > MAX_RING {
            return Err(FenceError::InvalidRing(ring));
        }
        Ok(Self { lat, lng, res, ring })
    }

    /// Build a query from the `"lat,lng"` text form
    pub fn parse(lat_lng: &str, res: u8, ring: u32) -> Result<Self, FenceError> {
        let (lat, lng) = parse_lat_lng(lat_lng)?;
        Self::new(lat, lng, res, ring)
    }

    pub fn resolution(&self) -> Result<Resolution, FenceError> {
        Resolution::try_from(self.res).map_err(|_| FenceError::InvalidResolution(self.res))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellReport {
    pub input: CellQuery,
    #[serde(serialize_with = "serialize_cell_index", deserialize_with = "deserialize_cell_index")]
    pub cell: CellIndex,
    pub center: Vertex,
    #[serde(serialize_with = "serialize_parent", deserialize_with = "deserialize_parent")]
    pub parent: Option<CellIndex>,
    /// Corners as `"lng,lat"`, counter-clockwise
    pub vertices: Vec<String>,
    pub edge_length_m: f64,
    pub area_m2: f64,
    #[serde(
        serialize_with = "serialize_cell_indexes",
        deserialize_with = "deserialize_cell_indexes",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub ring_cells: Vec<CellIndex>,
    #[serde(default)]
    pub ring_count: usize,
}

impl CellReport {
    pub fn compute(query: &CellQuery) -> Result<Self, FenceError> {
        let resolution = query.resolution()?;
        let latlng = LatLng::new(query.lat, query.lng).map_err(|_| FenceError::InvalidCoordinate {
            lat: query.lat,
            lng: query.lng,
        })?;

        let cell = latlng.to_cell(resolution);
        let center = Vertex::from(LatLng::from(cell));

        let parent = match query.res.checked_sub(1) {
            Some(parent_res) => {
                let parent_res = Resolution::try_from(parent_res)
                    .map_err(|_| FenceError::InvalidResolution(parent_res))?;
                cell.parent(parent_res)
            }
            None => None,
        };

        let vertices = cell
            .boundary()
            .iter()
            .map(|corner| format_lng_lat(&Vertex::from(*corner)))
            .collect();

        let ring_cells: Vec<CellIndex> = if query.ring > 0 {
            cell.grid_disk(query.ring)
        } else {
            Vec::new()
        };

        Ok(Self {
            input: *query,
            cell,
            center,
            parent,
            vertices,
            edge_length_m: resolution.edge_length_m(),
            area_m2: cell.area_m2(),
            ring_count: ring_cells.len(),
            ring_cells,
        })
    }

    /// Center as `"lng,lat"`
    pub fn center_text(&self) -> String {
        format_lng_lat(&self.center)
    }

    /// Corners joined with `;`
    pub fn vertices_text(&self) -> String {
        self.vertices.join(";")
    }

    /// Ring cells joined with `,`
    pub fn ring_cells_text(&self) -> String {
        self.ring_cells
            .iter()
            .map(CellIndex::to_string)
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Layered fence of the ring cells, or of the lone cell when no ring was requested
    pub fn ring_fence(&self, config: &FenceConfig) -> Vec<Vertex> {
        let cells = if self.ring_cells.is_empty() {
            vec![self.cell]
        } else {
            self.ring_cells.clone()
        };
        FenceBuilder::new(config.clone()).build_fence_chain(&H3Grid, &cells)
    }

    pub fn to_json(&self) -> Result<String, FenceError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| FenceError::MalformedInput(format!("Failed to serialize report: {}", e)))
    }
}

fn format_lng_lat(vertex: &Vertex) -> String {
    format!(
        "{:.prec$},{:.prec$}",
        vertex.lng,
        vertex.lat,
        prec = VERTEX_DECIMALS
    )
}
