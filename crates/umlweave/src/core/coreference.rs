//! Coreference resolution boundary
//!
//! A resolver splits document text into sentences with pronouns replaced by
//! their antecedents. Real resolution is external; [`SentenceSplitter`] is
//! the identity resolver that only splits.

use std::collections::BTreeMap;

use anyhow::Result;

/// Black-box coreference resolver
///
/// Returns sentence index → resolved sentence text, in document order.
pub trait CoreferenceResolver: Send + Sync {
    fn resolve(&self, text: &str) -> Result<BTreeMap<usize, String>>;
}

/// Splits text on terminal punctuation without resolving pronouns
///
/// A sentence ends at `.`, `!` or `?` followed by whitespace or the end of
/// the input, so codes such as `0..*` never split a sentence.
#[derive(Debug, Clone, Copy, Default)]
pub struct SentenceSplitter;

impl SentenceSplitter {
    pub fn new() -> Self {
        Self
    }

    pub fn split<'a>(&self, text: &'a str) -> Vec<&'a str> {
        let mut sentences = Vec::new();
        let mut start = 0;
        let mut chars = text.char_indices().peekable();

        while let Some((i, c)) = chars.next() {
            if !matches!(c, '.' | '!' | '?') {
                continue;
            }
            let at_boundary = chars.peek().map_or(true, |&(_, next)| next.is_whitespace());
            if at_boundary {
                let end = i + c.len_utf8();
                let sentence = text[start..end].trim();
                if !sentence.is_empty() {
                    sentences.push(sentence);
                }
                start = end;
            }
        }

        let tail = text[start..].trim();
        if !tail.is_empty() {
            sentences.push(tail);
        }
        sentences
    }
}

impl CoreferenceResolver for SentenceSplitter {
    fn resolve(&self, text: &str) -> Result<BTreeMap<usize, String>> {
        Ok(self
            .split(text)
            .into_iter()
            .map(str::to_string)
            .enumerate()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_sentences() {
        let splitter = SentenceSplitter::new();
        let sentences =
            splitter.split("The Car is a class. A Car has one or more Wheels!  Is it? ");
        assert_eq!(
            sentences,
            vec!["The Car is a class.", "A Car has one or more Wheels!", "Is it?"]
        );
    }

    #[test]
    fn test_split_keeps_tail_without_punctuation() {
        let splitter = SentenceSplitter::new();
        assert_eq!(
            splitter.split("The Car is a class. The Engine is a class"),
            vec!["The Car is a class.", "The Engine is a class"]
        );
    }

    #[test]
    fn test_split_does_not_break_codes() {
        let splitter = SentenceSplitter::new();
        assert_eq!(splitter.split("A has 0..* B."), vec!["A has 0..* B."]);
    }

    #[test]
    fn test_resolve_indexes_from_zero() {
        let resolved = SentenceSplitter::new()
            .resolve("One. Two.")
            .unwrap();
        assert_eq!(resolved.len(), 2);
        assert_eq!(resolved[&0], "One.");
        assert_eq!(resolved[&1], "Two.");
    }

    #[test]
    fn test_resolve_empty() {
        assert!(SentenceSplitter::new().resolve("   ").unwrap().is_empty());
    }
}
