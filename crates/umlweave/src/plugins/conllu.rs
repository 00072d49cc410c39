//! CoNLL-U reader
//!
//! Lets the output of an external dependency parser stand in for a live
//! parser. Sentences are keyed by their `# text = ...` comment.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, trace, warn};

use crate::core::{DependencyGraph, DependencyParser, FragmentError, Token, ROOT_DEP};

/// One sentence read from a CoNLL-U document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConlluSentence {
    /// The `# text =` comment, when present
    pub text: Option<String>,
    pub graph: DependencyGraph,
}

impl ConlluSentence {
    /// The sentence text: the comment if given, else the joined tokens
    pub fn key(&self) -> String {
        self.text.clone().unwrap_or_else(|| self.graph.text())
    }
}

/// Parse a CoNLL-U document into sentences
///
/// Multiword-token ranges (`1-2`) and empty nodes (`1.1`) are skipped.
/// A HEAD of `0` marks the root, which becomes its own head.
pub fn parse_conllu(input: &str) -> Result<Vec<ConlluSentence>, FragmentError> {
    let mut sentences = Vec::new();
    let mut text = None;
    let mut rows: Vec<(Token, usize)> = Vec::new();

    for (line_no, line) in input.lines().enumerate() {
        let line = line.trim_end();
        if line.is_empty() {
            if !rows.is_empty() {
                sentences.push(finish_sentence(text.take(), std::mem::take(&mut rows))?);
            }
            text = None;
            continue;
        }
        if let Some(comment) = line.strip_prefix('#') {
            if let Some((key, value)) = comment.split_once('=') {
                if key.trim() == "text" {
                    text = Some(value.trim().to_string());
                }
            }
            continue;
        }

        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() != 10 {
            return Err(FragmentError::parser_error(format!(
                "line {}: expected 10 tab-separated columns, found {}",
                line_no + 1,
                fields.len()
            )));
        }
        let id = fields[0];
        if id.contains('-') || id.contains('.') {
            trace!(id, "Skipping multiword or empty node");
            continue;
        }
        let position: usize = parse_index(id, line_no)?;
        if position != rows.len() + 1 {
            return Err(FragmentError::parser_error(format!(
                "line {}: token id {} out of sequence",
                line_no + 1,
                id
            )));
        }
        let head: usize = parse_index(fields[6], line_no)?;

        let form = fields[1];
        let lemma = match fields[2] {
            "_" => form.to_lowercase(),
            lemma => lemma.to_string(),
        };
        let dep = if head == 0 || fields[7].eq_ignore_ascii_case("root") {
            ROOT_DEP.to_string()
        } else {
            fields[7].to_string()
        };
        rows.push((Token::new(form, lemma, fields[3], dep, 0), head));
    }

    if !rows.is_empty() {
        sentences.push(finish_sentence(text, rows)?);
    }
    debug!(sentences = sentences.len(), "Read CoNLL-U document");
    Ok(sentences)
}

fn parse_index(field: &str, line_no: usize) -> Result<usize, FragmentError> {
    field.parse().map_err(|_| {
        FragmentError::parser_error(format!("line {}: invalid index {:?}", line_no + 1, field))
    })
}

/// Convert 1-based heads (0 = root) to 0-based heads (root = self)
fn finish_sentence(
    text: Option<String>,
    rows: Vec<(Token, usize)>,
) -> Result<ConlluSentence, FragmentError> {
    let tokens = rows
        .into_iter()
        .enumerate()
        .map(|(index, (mut token, head))| {
            token.head = if head == 0 { index } else { head - 1 };
            token
        })
        .collect();
    Ok(ConlluSentence {
        text,
        graph: DependencyGraph::new(tokens)?,
    })
}

/// A [`DependencyParser`] backed by pre-parsed CoNLL-U sentences
#[derive(Debug, Clone, Default)]
pub struct ConlluParser {
    sentences: HashMap<String, DependencyGraph>,
}

impl ConlluParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index every sentence of a CoNLL-U document
    pub fn from_conllu(input: &str) -> Result<Self, FragmentError> {
        let mut parser = Self::new();
        for sentence in parse_conllu(input)? {
            let key = normalize_key(&sentence.key());
            if parser.sentences.insert(key.clone(), sentence.graph).is_some() {
                warn!(sentence = %key, "Duplicate sentence in CoNLL-U input, keeping the last");
            }
        }
        Ok(parser)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let input = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read CoNLL-U file {}", path.display()))?;
        Ok(Self::from_conllu(&input)?)
    }

    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }
}

fn normalize_key(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

impl DependencyParser for ConlluParser {
    fn parse(&self, text: &str) -> Result<DependencyGraph> {
        self.sentences
            .get(&normalize_key(text))
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("Sentence not found in CoNLL-U input: {:?}", text))
    }

    fn name(&self) -> &'static str {
        "conllu"
    }

    fn version(&self) -> &'static str {
        "2"
    }
}
