//! Plugin implementations
//!
//! Sentence plugins (built-in pattern, fragment builder and detector per
//! sentence kind), the parser adapters, the diagram notation converter and
//! the pipeline orchestrator.

pub mod class;
pub mod conllu;
pub mod lexical;
pub mod notation;
pub mod orchestrator;
pub mod relationship;

pub use class::*;
pub use conllu::*;
pub use lexical::*;
pub use notation::*;
pub use orchestrator::*;
pub use relationship::*;
