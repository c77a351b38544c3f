//! Address block modelling and prefix relations.
//!
//! This module provides the structured representation of IPv4 address
//! blocks used throughout the simulator, along with the pure prefix
//! relations (common prefix length, aggregatability) that preference
//! scoring is built on.

pub mod block;
pub mod relation;

// Re-export commonly used types
pub use block::{AddressBlock, BlockError, ADDRESS_WIDTH};
pub use relation::{common_prefix_length, is_aggregatable};
