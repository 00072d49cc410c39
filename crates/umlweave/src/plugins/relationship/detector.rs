//! Relationship sentence detector
//!
//! Identifies sentences that relate two classes.

use crate::core::{normalize_phrase, Detector, SentenceKind};
use crate::extraction::MULTIPLICITY_PHRASES;

/// Detector for relationship sentences
pub struct RelationshipSentenceDetector;

impl RelationshipSentenceDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RelationshipSentenceDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for RelationshipSentenceDetector {
    fn confidence(&self, sentence: &str) -> f64 {
        let cleaned: String = sentence
            .chars()
            .map(|c| if c.is_alphanumeric() { c } else { ' ' })
            .collect();
        let normalized = format!(" {} ", normalize_phrase(&cleaned));

        let has_verb = [" has ", " have ", " had "]
            .iter()
            .any(|verb| normalized.contains(verb));
        let has_phrase = MULTIPLICITY_PHRASES
            .iter()
            .any(|(phrase, _)| normalized.contains(&format!(" {} ", phrase)));

        match (has_verb, has_phrase) {
            (true, true) => 0.95,
            (false, true) => 0.7,
            (true, false) => 0.6,
            (false, false) => 0.0,
        }
    }

    fn sentence_kind(&self) -> SentenceKind {
        SentenceKind::Relationship
    }

    fn cues(&self) -> Vec<&'static str> {
        let mut cues = vec!["has", "have"];
        cues.extend(MULTIPLICITY_PHRASES.iter().map(|(phrase, _)| *phrase));
        cues
    }
}
