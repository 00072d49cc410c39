//! Multiplicity phrase vocabulary
//!
//! Relationship sentences state cardinality with one of six fixed phrases.
//! Numerals on their own ("2 Wheels") carry no multiplicity.

use crate::core::{DependencyGraph, Multiplicity};

/// The recognized phrases and the multiplicity each one denotes
pub const MULTIPLICITY_PHRASES: [(&str, Multiplicity); 6] = [
    ("0 or several", Multiplicity::ZeroOrMore),
    ("one and only one", Multiplicity::ExactlyOne),
    ("one or more", Multiplicity::OneOrMore),
    ("zero or more", Multiplicity::ZeroOrMore),
    ("zero or one", Multiplicity::ZeroOrOne),
    ("at least one", Multiplicity::OneOrMore),
];

/// Look up a phrase, ignoring case and runs of whitespace
pub fn multiplicity_for_phrase(phrase: &str) -> Option<Multiplicity> {
    let words: Vec<String> = phrase.split_whitespace().map(str::to_lowercase).collect();
    MULTIPLICITY_PHRASES
        .iter()
        .find(|(known, _)| known.split_whitespace().eq(words.iter().map(String::as_str)))
        .map(|&(_, multiplicity)| multiplicity)
}

/// A phrase occurrence in a sentence, as a token range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhraseMatch {
    /// Index of the first token of the phrase
    pub start: usize,
    /// One past the last token
    pub end: usize,
    pub phrase: &'static str,
    pub multiplicity: Multiplicity,
}

/// The earliest phrase occurrence in the sentence
///
/// At the same start position the longest phrase wins. Token text is
/// compared case-insensitively, so a capitalized sentence-initial phrase
/// ("One or more Wheels ...") matches too.
pub fn find_first(graph: &DependencyGraph) -> Option<PhraseMatch> {
    let words: Vec<String> = graph.tokens().iter().map(|t| t.text.to_lowercase()).collect();

    (0..words.len()).find_map(|start| {
        MULTIPLICITY_PHRASES
            .iter()
            .filter_map(|&(phrase, multiplicity)| {
                let len = phrase.split_whitespace().count();
                let window = words.get(start..start + len)?;
                phrase
                    .split_whitespace()
                    .eq(window.iter().map(String::as_str))
                    .then_some(PhraseMatch {
                        start,
                        end: start + len,
                        phrase,
                        multiplicity,
                    })
            })
            .max_by_key(|m| m.end)
    })
}
