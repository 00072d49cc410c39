//! Sentence classification traits
//!
//! Before extraction runs, each sentence is labeled as class-describing or
//! relationship-describing. Detectors score one kind each; a classifier turns
//! a sentence into a label.

use anyhow::Result;

use super::SentenceKind;

/// Core trait for sentence-kind detectors
///
/// # Example
/// ```
/// use umlweave::core::Detector;
/// use umlweave::plugins::ClassSentenceDetector;
///
/// let detector = ClassSentenceDetector::new();
/// assert!(detector.detect("The Car is a class."));
/// ```
pub trait Detector: Send + Sync {
    /// Detect if the sentence is of this detector's kind
    fn detect(&self, sentence: &str) -> bool {
        self.confidence(sentence) > 0.5
    }

    /// Get the confidence level of the detection (0.0 to 1.0)
    fn confidence(&self, sentence: &str) -> f64;

    /// Get the sentence kind this detector recognizes
    fn sentence_kind(&self) -> SentenceKind;

    /// Get key words that this detector looks for
    fn cues(&self) -> Vec<&'static str>;
}

/// Black-box sentence classifier
///
/// Returns a label such as `"class"` or `"rel"`. Labels are free text on
/// purpose: extraction rejects any label it has no patterns for.
pub trait SentenceClassifier: Send + Sync {
    fn predict(&self, sentence: &str) -> Result<String>;
}
