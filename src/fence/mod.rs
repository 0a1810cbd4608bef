/// Layered "honeycomb fence" decomposition of a cell set
///
/// Repeatedly extracts the outer boundary of the cells that are left, peels
/// the cells that produced it and stitches the loops into one chain.

pub mod attribution;
pub mod fence_builder;
pub mod fence_layer;

pub use fence_builder::FenceBuilder;
pub use fence_layer::{FenceLayer, FenceOutcome};
