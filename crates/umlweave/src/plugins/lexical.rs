//! Rule-based parser for restricted diagram sentences
//!
//! Understands the two sentence shapes the built-in patterns look for:
//! `<subject> is a class` and `<subject> has <quantity> <object>`. The first
//! `be` or `have` form becomes the root; the nearest nouns on either side
//! become its subject and object. Anything richer needs a real dependency
//! parser (see [`ConlluParser`](super::ConlluParser)).

use anyhow::Result;
use tracing::trace;

use crate::core::{DependencyGraph, DependencyParser, Token, ROOT_DEP};

const DETERMINERS: &[&str] = &["a", "an", "the", "each", "every", "some", "any", "this", "that"];
const BE_FORMS: &[&str] = &["is", "are", "was", "were", "be", "been", "am"];
const HAVE_FORMS: &[&str] = &["has", "have", "had", "having"];
const NUMBER_WORDS: &[&str] = &[
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
];
const CONJUNCTIONS: &[&str] = &["and", "or", "but"];
const ADPOSITIONS: &[&str] = &["at", "of", "in", "on", "with", "for", "to"];
const MODIFIERS: &[&str] = &["least", "most", "more", "several", "many", "few", "only", "exactly"];

/// Lexicon-driven parser for copula and possession sentences
#[derive(Debug, Clone, Copy, Default)]
pub struct LexicalParser;

impl LexicalParser {
    pub fn new() -> Self {
        Self
    }
}

/// (text, lemma, pos) before attachment
struct Tagged {
    text: String,
    lemma: String,
    pos: &'static str,
}

fn tokenize(text: &str) -> Vec<String> {
    let mut words = Vec::new();
    for chunk in text.split_whitespace() {
        let start = chunk
            .find(|c: char| !c.is_ascii_punctuation())
            .unwrap_or(chunk.len());
        let end = chunk
            .rfind(|c: char| !c.is_ascii_punctuation())
            .map(|i| i + chunk[i..].chars().next().map_or(1, char::len_utf8))
            .unwrap_or(start);

        words.extend(chunk[..start].chars().map(String::from));
        if start < end {
            words.push(chunk[start..end].to_string());
        }
        words.extend(chunk[end.max(start)..].chars().map(String::from));
    }
    words
}

fn tag(word: &str) -> Tagged {
    let lower = word.to_lowercase();
    let (lemma, pos) = if word.chars().all(|c| c.is_ascii_punctuation()) {
        (lower.clone(), "PUNCT")
    } else if DETERMINERS.contains(&lower.as_str()) {
        (lower.clone(), "DET")
    } else if BE_FORMS.contains(&lower.as_str()) {
        ("be".to_string(), "AUX")
    } else if HAVE_FORMS.contains(&lower.as_str()) {
        ("have".to_string(), "VERB")
    } else if lower.chars().all(|c| c.is_ascii_digit()) || NUMBER_WORDS.contains(&lower.as_str()) {
        (lower.clone(), "NUM")
    } else if CONJUNCTIONS.contains(&lower.as_str()) {
        (lower.clone(), "CCONJ")
    } else if ADPOSITIONS.contains(&lower.as_str()) {
        (lower.clone(), "ADP")
    } else if MODIFIERS.contains(&lower.as_str()) {
        (lower.clone(), "ADJ")
    } else {
        (noun_lemma(&lower), "NOUN")
    };
    Tagged {
        text: word.to_string(),
        lemma,
        pos,
    }
}

fn noun_lemma(lower: &str) -> String {
    if let Some(stem) = lower.strip_suffix("sses") {
        return format!("{}ss", stem);
    }
    match lower.strip_suffix('s') {
        Some(stem) if stem.len() > 2 && !stem.ends_with('s') && !stem.ends_with('u') => {
            stem.to_string()
        }
        _ => lower.to_string(),
    }
}

fn is_noun(tagged: &Tagged) -> bool {
    tagged.pos == "NOUN"
}

/// Dependency label for a token that hangs off a phrase head
fn modifier_dep(tagged: &Tagged) -> &'static str {
    match tagged.pos {
        "DET" => "det",
        "CCONJ" => "cc",
        "NOUN" => "conj",
        "PUNCT" => "punct",
        "NUM" => "nummod",
        _ => "dep",
    }
}

impl DependencyParser for LexicalParser {
    fn parse(&self, text: &str) -> Result<DependencyGraph> {
        let tagged: Vec<Tagged> = tokenize(text).iter().map(|w| tag(w)).collect();
        if tagged.is_empty() {
            anyhow::bail!("Cannot parse an empty sentence");
        }

        let verb = tagged.iter().position(|t| t.lemma == "be" || t.lemma == "have");
        let mut heads: Vec<(usize, &'static str)> = Vec::with_capacity(tagged.len());

        let Some(verb) = verb else {
            // No predicate: a flat tree under the first word
            let root = tagged.iter().position(|t| t.pos != "PUNCT").unwrap_or(0);
            for (i, t) in tagged.iter().enumerate() {
                heads.push(if i == root { (i, ROOT_DEP) } else { (root, modifier_dep(t)) });
            }
            return build(tagged, heads);
        };

        let subject = tagged[..verb].iter().rposition(is_noun);
        let object = tagged[verb + 1..]
            .iter()
            .rposition(is_noun)
            .map(|i| i + verb + 1);
        let number = object.and_then(|object| {
            tagged[verb + 1..object]
                .iter()
                .position(|t| t.pos == "NUM")
                .map(|i| i + verb + 1)
        });
        let object_dep = if tagged[verb].lemma == "be" { "attr" } else { "dobj" };

        for (i, t) in tagged.iter().enumerate() {
            let attachment = if i == verb {
                (i, ROOT_DEP)
            } else if Some(i) == subject {
                (verb, "nsubj")
            } else if Some(i) == object {
                (verb, object_dep)
            } else if t.pos == "PUNCT" {
                (verb, "punct")
            } else if i < verb {
                (subject.unwrap_or(verb), modifier_dep(t))
            } else if Some(i) == number {
                // `number` is only set when `object` is
                (object.unwrap_or(verb), "nummod")
            } else if object.is_some_and(|o| i < o) {
                (number.or(object).unwrap_or(verb), modifier_dep(t))
            } else {
                (object.unwrap_or(verb), "dep")
            };
            heads.push(attachment);
        }

        build(tagged, heads)
    }

    fn name(&self) -> &'static str {
        "lexical"
    }

    fn version(&self) -> &'static str {
        env!("CARGO_PKG_VERSION")
    }
}

fn build(tagged: Vec<Tagged>, heads: Vec<(usize, &'static str)>) -> Result<DependencyGraph> {
    let tokens: Vec<Token> = tagged
        .into_iter()
        .zip(heads)
        .map(|(t, (head, dep))| Token::new(t.text, t.lemma, t.pos, dep, head))
        .collect();
    let graph = DependencyGraph::new(tokens)?;
    trace!(tokens = graph.len(), "Lexical parse complete");
    Ok(graph)
}
