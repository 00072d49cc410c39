//! Evaluation harness
//!
//! Loads ground-truth models, persists fragments between runs and reports
//! which assembled models match.

pub mod report;
pub mod source;
pub mod store;

pub use report::{evaluate, EvaluationReport, FailedRecord, PassedRecord};
pub use source::{DirectorySource, GroundTruthSource};
pub use store::FragmentStore;
