//! Selector model: synthesis, structural decomposition, and querying.

pub mod matcher;
pub mod parts;
pub mod synthesize;
pub mod types;

pub use matcher::{match_count, matches, query_all};
pub use parts::{parse_parts, rebuild};
pub use synthesize::{synthesize, Synthesis};
pub use types::{Combinator, PositionFilter, PositionKind, Selector, SelectorStep};
