// Coordinate keying
pub const QUANTIZATION_STEP_DEG: f64 = 1e-6; // ~0.1 m at the equator

// Layer attribution fallback
pub const PROXIMITY_TOLERANCE_M: f64 = 5.0;

// Chain walking
pub const MAX_CHAIN_WALK_STEPS: usize = 100_000;
pub const MIN_LOOP_VERTICES: usize = 4; // closed triangle: 3 corners + repeated start

// Cell lookup input ranges
pub const MIN_LATITUDE_DEG: f64 = -90.0;
pub const MAX_LATITUDE_DEG: f64 = 90.0;
pub const MIN_LONGITUDE_DEG: f64 = -180.0;
pub const MAX_LONGITUDE_DEG: f64 = 180.0;
pub const MAX_RESOLUTION: u8 = 15;
pub const MAX_RING: u32 = 10;

// Display precision for formatted vertices
pub const VERTEX_DECIMALS: usize = 6;
