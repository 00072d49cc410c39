//! Relationship sentences
//!
//! "A Car has one or more Wheels." mints both classes and one association
//! carrying the stated multiplicity.

mod detector;
mod pattern;

pub use detector::RelationshipSentenceDetector;
pub use pattern::{
    build_relationship_fragment, possession_relationship_pattern, POSSESSION_RELATIONSHIP,
};
