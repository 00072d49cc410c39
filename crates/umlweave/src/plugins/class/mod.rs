//! Class-description sentences
//!
//! "The Car is a class." mints one class named after the copula's subject.

mod detector;
mod pattern;

pub use detector::ClassSentenceDetector;
pub use pattern::{build_class_fragment, copula_class_pattern, COPULA_CLASS};
