//! Quantized coordinate identity.
//!
//! Adjacent cells compute their shared corners independently, so two floats
//! describing the same corner rarely compare equal bit-for-bit. Every
//! identity check in the crate goes through a [`CoordKey`] instead.

use crate::constants::QUANTIZATION_STEP_DEG;
use crate::vertex::Vertex;

/// Hashable identity of a vertex at a fixed quantization step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CoordKey {
    pub lat: i64,
    pub lng: i64,
}

/// Direction-independent identity of an edge.
///
/// The two endpoint keys are stored in ascending order, so `(a, b)` and
/// `(b, a)` produce the same key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UndirectedEdgeKey {
    pub low: CoordKey,
    pub high: CoordKey,
}

impl UndirectedEdgeKey {
    pub fn new(a: CoordKey, b: CoordKey) -> Self {
        if a <= b {
            Self { low: a, high: b }
        } else {
            Self { low: b, high: a }
        }
    }

    /// Both endpoints collapse to one key.
    pub fn is_degenerate(&self) -> bool {
        self.low == self.high
    }
}

/// Pure function from (lat, lng) to [`CoordKey`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateKeyer {
    step: f64,
}

impl CoordinateKeyer {
    /// `step` must be positive and finite; `FenceConfig::validate` enforces it
    /// for configured keyers.
    pub fn new(step: f64) -> Self {
        Self { step }
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn key(&self, lat: f64, lng: f64) -> CoordKey {
        CoordKey {
            lat: (lat / self.step).round() as i64,
            lng: (lng / self.step).round() as i64,
        }
    }

    pub fn key_of(&self, vertex: &Vertex) -> CoordKey {
        self.key(vertex.lat, vertex.lng)
    }

    pub fn edge_key(&self, a: &Vertex, b: &Vertex) -> UndirectedEdgeKey {
        UndirectedEdgeKey::new(self.key_of(a), self.key_of(b))
    }

    pub fn same_point(&self, a: &Vertex, b: &Vertex) -> bool {
        self.key_of(a) == self.key_of(b)
    }
}

impl Default for CoordinateKeyer {
    fn default() -> Self {
        Self::new(QUANTIZATION_STEP_DEG)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nearby_floats_share_a_key() {
        let keyer = CoordinateKeyer::default();
        // Typical drift between independently computed shared corners
        let a = keyer.key(37.77512345678901, -122.41898765432101);
        let b = keyer.key(37.77512345678899, -122.41898765432099);
        assert_eq!(a, b);
    }

    #[test]
    fn test_distinct_points_get_distinct_keys() {
        let keyer = CoordinateKeyer::default();
        let a = keyer.key(10.0, 20.0);
        let b = keyer.key(10.000002, 20.0);
        assert_ne!(a, b);
    }

    #[test]
    fn test_negative_coordinates_round_symmetrically() {
        let keyer = CoordinateKeyer::default();
        assert_eq!(keyer.key(-1.0000001, -2.0), CoordKey { lat: -1_000_000, lng: -2_000_000 });
        assert_eq!(keyer.key(1.0000001, 2.0), CoordKey { lat: 1_000_000, lng: 2_000_000 });
    }

    #[test]
    fn test_undirected_key_ignores_direction() {
        let keyer = CoordinateKeyer::default();
        let a = Vertex::new(1.0, 2.0);
        let b = Vertex::new(1.5, 2.5);
        assert_eq!(keyer.edge_key(&a, &b), keyer.edge_key(&b, &a));
        assert!(!keyer.edge_key(&a, &b).is_degenerate());
        assert!(keyer.edge_key(&a, &a).is_degenerate());
    }

    #[test]
    fn test_coarser_step_merges_more_points() {
        let keyer = CoordinateKeyer::new(1e-3);
        assert!(keyer.same_point(&Vertex::new(5.0001, 5.0), &Vertex::new(5.0002, 5.0)));
        assert_eq!(keyer.step(), 1e-3);
    }
}
