//! Class sentence detector
//!
//! Identifies sentences that introduce a class.

use crate::core::{Detector, SentenceKind};

/// Detector for class-description sentences
pub struct ClassSentenceDetector;

impl ClassSentenceDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ClassSentenceDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for ClassSentenceDetector {
    fn confidence(&self, sentence: &str) -> f64 {
        let lower = sentence.to_lowercase();
        let words: Vec<&str> = lower
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .collect();

        // "<X> is a class", "<X> and <Y> are classes"
        let copula_class = words.windows(3).any(|w| {
            matches!(w, ["is", "a" | "an", "class"]) || matches!(&w[1..], ["are", "classes"])
        });
        if copula_class {
            return 0.9;
        }

        if words.iter().any(|w| matches!(*w, "class" | "classes")) {
            return 0.6;
        }

        0.0
    }

    fn sentence_kind(&self) -> SentenceKind {
        SentenceKind::Class
    }

    fn cues(&self) -> Vec<&'static str> {
        vec!["is a class", "are classes"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_copula_class() {
        let detector = ClassSentenceDetector::new();
        assert!(detector.detect("The Car is a class."));
        assert!(detector.detect("Car and Engine are classes."));
        assert_eq!(detector.confidence("The Engine is a class."), 0.9);
    }

    #[test]
    fn test_weak_mention() {
        let detector = ClassSentenceDetector::new();
        assert_eq!(detector.confidence("Each class has a name."), 0.6);
    }

    #[test]
    fn test_rejects_relationship() {
        let detector = ClassSentenceDetector::new();
        assert!(!detector.detect("A Car has one or more Wheels."));
        assert_eq!(detector.confidence("A Car has one or more Wheels."), 0.0);
    }

    #[test]
    fn test_kind() {
        assert_eq!(ClassSentenceDetector::new().sentence_kind(), SentenceKind::Class);
    }
}
