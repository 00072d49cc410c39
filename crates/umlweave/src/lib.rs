//! Umlweave - Extract class diagrams from natural-language requirements
//!
//! A library for matching dependency patterns against single sentences,
//! turning each match into a class-diagram fragment, and assembling the
//! fragments of a document into one model.
//!
//! # Quick Start
//!
//! ```rust
//! use umlweave::{assemble, extract, Multiplicity};
//!
//! let car = extract("The Car is a class.").unwrap().unwrap();
//! let wheels = extract("A Car has one or more Wheels.").unwrap().unwrap();
//!
//! let model = assemble([&car, &wheels]);
//! assert_eq!(model.class_count(), 2);
//! assert!(model
//!     .class("Car")
//!     .unwrap()
//!     .association_set()
//!     .contains(&("Car", "Wheels", Multiplicity::OneOrMore)));
//! ```
//!
//! # Advanced Usage
//!
//! For more control, use the individual components:
//!
//! ```rust
//! use umlweave::prelude::*;
//!
//! // Any DependencyParser works; the CoNLL-U reader accepts real parser output
//! let extractor = Extractor::with_builtin_patterns(Box::new(LexicalParser::new())).unwrap();
//! let result = extractor.extract("A Car has 2 Wheels.");
//! assert!(matches!(result, Err(FragmentError::NoMultiplicityFound { .. })));
//!
//! // Whole documents go through the pipeline
//! let pipeline = Pipeline::with_lexical_parser().unwrap();
//! let model = pipeline
//!     .process_document("Garage", "The Car is a class. The Engine is a class.")
//!     .unwrap();
//! assert_eq!(model.class_count(), 2);
//! ```

pub mod assembly;
pub mod core;
pub mod evaluation;
pub mod extraction;
pub mod plugins;

pub use assembly::assemble;
pub use core::*;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::assembly::{assemble, assemble_documents, group_by_document, Assembler};
    pub use crate::core::{
        Class, ClassKind, CoreferenceResolver, DependencyGraph, DependencyParser, Detector,
        Fragment, FragmentError, FragmentKey, Model, ModelComparison, Multiplicity,
        SentenceClassifier, SentenceKind, Token,
    };
    pub use crate::evaluation::{
        evaluate, DirectorySource, EvaluationReport, FragmentStore, GroundTruthSource,
    };
    pub use crate::extraction::{Extractor, Pattern, PatternRegistry, RelOp, TokenConstraint};
    pub use crate::plugins::{ConlluParser, DetectorClassifier, LexicalParser, Pipeline, PipelineConfig};
}

/// Extract the fragment of one sentence
///
/// Uses the built-in patterns and the [`LexicalParser`](plugins::LexicalParser).
///
/// # Returns
/// * `Ok(Some(fragment))` - A pattern matched
/// * `Ok(None)` - No pattern matched
/// * `Err` - A matched relationship has no multiplicity phrase, or the
///   sentence could not be parsed
///
/// # Example
/// ```rust
/// use umlweave::extract;
///
/// let fragment = extract("The Car is a class.").unwrap().unwrap();
/// assert_eq!(fragment.classes()[0].name(), "Car");
/// ```
pub fn extract(sentence: &str) -> Result<Option<Fragment>, FragmentError> {
    use crate::extraction::Extractor;
    use crate::plugins::LexicalParser;

    let extractor = Extractor::with_builtin_patterns(Box::new(LexicalParser::new()))?;
    extractor.extract(sentence)
}

/// Extract and assemble a whole document
///
/// Sentences are split on terminal punctuation and classified by keyword
/// detectors; the model is named after `document`.
///
/// # Example
/// ```rust
/// use umlweave::process;
///
/// let model = process("Garage", "The Car is a class. A Car has zero or more Doors.").unwrap();
/// assert_eq!(model.name(), "Garage");
/// assert_eq!(model.class_count(), 2);
/// ```
pub fn process(document: &str, text: &str) -> anyhow::Result<Model> {
    use crate::plugins::Pipeline;

    Pipeline::with_lexical_parser()?.process_document(document, text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_class() {
        let fragment = extract("The Car is a class.").unwrap().unwrap();
        assert_eq!(fragment.classes()[0].name(), "Car");
        assert_eq!(fragment.classes()[0].kind(), ClassKind::Class);
    }

    #[test]
    fn test_extract_relationship() {
        let fragment = extract("A Garage has zero or one Car.").unwrap().unwrap();
        let association = fragment.model().associations().next().unwrap();
        assert_eq!(association.triple(), ("Garage", "Car", Multiplicity::ZeroOrOne));
    }

    #[test]
    fn test_extract_no_match() {
        assert!(extract("Wheels roll.").unwrap().is_none());
    }

    #[test]
    fn test_process_document() {
        let model = process("Garage", "The Car is a class. A Car has at least one Engine.").unwrap();
        assert_eq!(model.name(), "Garage");
        assert_eq!(model.association_count(), 1);
    }
}
