/// Boundary vertex in latitude/longitude degrees

use h3o::LatLng;
use serde::{Deserialize, Serialize};

/// A boundary corner point, carrying no identity beyond its coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub lat: f64,
    pub lng: f64,
}

impl Vertex {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// (lat, lng) pair in degrees
    pub fn to_tuple(self) -> (f64, f64) {
        (self.lat, self.lng)
    }

    /// Great-circle distance in meters.
    ///
    /// Returns `f64::INFINITY` when either point is not a valid coordinate,
    /// so such points never fall inside a distance tolerance.
    pub fn distance_m(&self, other: &Vertex) -> f64 {
        match (LatLng::new(self.lat, self.lng), LatLng::new(other.lat, other.lng)) {
            (Ok(a), Ok(b)) => a.distance_m(b),
            _ => f64::INFINITY,
        }
    }
}

impl From<LatLng> for Vertex {
    fn from(latlng: LatLng) -> Self {
        Self {
            lat: latlng.lat(),
            lng: latlng.lng(),
        }
    }
}

impl From<(f64, f64)> for Vertex {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self { lat, lng }
    }
}
