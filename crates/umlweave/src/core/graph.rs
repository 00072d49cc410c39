//! Dependency graph of a parsed sentence
//!
//! The grammatical structure handed over by a [`DependencyParser`]: tokens
//! in sentence order, each pointing at its syntactic head. The root token is
//! its own head.
//!
//! [`DependencyParser`]: super::DependencyParser

use serde::{Deserialize, Serialize};

use super::error::FragmentError;

/// Dependency label of the sentence root
pub const ROOT_DEP: &str = "ROOT";

/// A token of a parsed sentence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub index: usize,
    pub text: String,
    pub lemma: String,
    /// Universal part-of-speech tag (NOUN, VERB, NUM, ...)
    pub pos: String,
    /// Dependency relation to the head (nsubj, dobj, attr, ...)
    pub dep: String,
    pub head: usize,
}

impl Token {
    /// Create a token; the index is assigned when the graph is built
    pub fn new(
        text: impl Into<String>,
        lemma: impl Into<String>,
        pos: impl Into<String>,
        dep: impl Into<String>,
        head: usize,
    ) -> Self {
        Self {
            index: 0,
            text: text.into(),
            lemma: lemma.into(),
            pos: pos.into(),
            dep: dep.into(),
            head,
        }
    }

    pub fn is_root(&self) -> bool {
        self.head == self.index
    }
}

/// Tokens of one sentence linked by head-dependent relations
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DependencyGraph {
    tokens: Vec<Token>,
}

impl DependencyGraph {
    /// Build a graph, numbering tokens by position and validating heads
    pub fn new(tokens: Vec<Token>) -> Result<Self, FragmentError> {
        let len = tokens.len();
        let mut tokens = tokens;
        for (index, token) in tokens.iter_mut().enumerate() {
            token.index = index;
            if token.head >= len {
                return Err(FragmentError::parser_error(format!(
                    "token {} ({:?}) points at head {} outside a {}-token sentence",
                    index, token.text, token.head, len
                )));
            }
        }
        Ok(Self { tokens })
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn token(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// The syntactic head of a token, `None` for the root
    pub fn head(&self, index: usize) -> Option<&Token> {
        let token = self.tokens.get(index)?;
        if token.is_root() {
            None
        } else {
            self.tokens.get(token.head)
        }
    }

    /// Direct dependents of a token, in sentence order
    pub fn children(&self, index: usize) -> impl Iterator<Item = &Token> + '_ {
        self.tokens
            .iter()
            .filter(move |t| t.head == index && t.index != index)
    }

    /// The first root token
    pub fn root(&self) -> Option<&Token> {
        self.tokens.iter().find(|t| t.is_root())
    }

    /// Whether `ancestor` dominates `node` through one or more head links
    pub fn is_ancestor(&self, ancestor: usize, node: usize) -> bool {
        let mut current = node;
        // A malformed graph may contain a cycle; never walk more than len steps.
        for _ in 0..self.tokens.len() {
            let Some(token) = self.tokens.get(current) else {
                return false;
            };
            if token.is_root() {
                return false;
            }
            current = token.head;
            if current == ancestor {
                return true;
            }
        }
        false
    }

    /// The sentence text, tokens joined by single spaces
    pub fn text(&self) -> String {
        self.tokens
            .iter()
            .map(|t| t.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
