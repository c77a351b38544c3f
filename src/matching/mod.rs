//! Preference construction and the stable assignment engine.
//!
//! Both sides of the market rank the opposite side with the same
//! symmetric compatibility score; the engine then runs requester-proposing
//! deferred acceptance over the resulting preference table.

pub mod types;
pub mod preference;
pub mod engine;

// Re-export commonly used types
pub use types::{Matching, Requester};
pub use preference::{compatibility_score, rank_by_compatibility, PreferenceError, PreferenceTable};
pub use engine::stable_match;
