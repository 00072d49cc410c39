//! Fragment extraction
//!
//! Patterns over dependency graphs, a pure backtracking matcher, the
//! registry that orders patterns, and the engine that turns the first match
//! into a fragment.

pub mod engine;
pub mod matcher;
pub mod multiplicity;
pub mod pattern;
pub mod registry;

pub use engine::{extract_from_graph, extract_from_graph_as, Extractor};
pub use matcher::{find_matches, match_pattern};
pub use multiplicity::{find_first, multiplicity_for_phrase, PhraseMatch, MULTIPLICITY_PHRASES};
pub use pattern::{
    BoundToken, Bindings, FragmentBuilder, Pattern, PatternBuilder, PatternNode, RelOp,
    TokenConstraint,
};
pub use registry::PatternRegistry;
