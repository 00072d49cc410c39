//! Core error types for fragment extraction and assembly
//!
//! This module defines the error taxonomy shared by the extraction engine,
//! the pattern registry, fragment grouping and the notation converter.

use thiserror::Error;

/// Core error types for fragment processing
#[derive(Error, Debug)]
pub enum FragmentError {
    #[error("No multiplicity phrase found in sentence: {sentence}")]
    NoMultiplicityFound { sentence: String },

    #[error("Unsupported sentence kind: {label}")]
    UnsupportedSentenceKind { label: String },

    #[error("Ambiguous group key: {key} (expected <document>_<class|rel><index>)")]
    AmbiguousGroupKey { key: String },

    #[error("Pattern set is empty")]
    EmptyPatternSet,

    #[error("Invalid pattern: {message}")]
    InvalidPattern { message: String },

    #[error("Pattern {pattern} does not bind role {role}")]
    MissingRole { pattern: String, role: String },

    #[error("Invalid fragment: {message}")]
    InvalidFragment { message: String },

    #[error("Invalid multiplicity: {value}")]
    InvalidMultiplicity { value: String },

    #[error("Dependency parse error: {message}")]
    Parser { message: String },

    #[error("Notation error: {message}")]
    Notation { message: String },

    #[error("IO error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("JSON error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },
}

impl FragmentError {
    /// Create a new missing-multiplicity error
    pub fn no_multiplicity(sentence: impl Into<String>) -> Self {
        Self::NoMultiplicityFound {
            sentence: sentence.into(),
        }
    }

    /// Create a new unsupported-kind error
    pub fn unsupported_kind(label: impl Into<String>) -> Self {
        Self::UnsupportedSentenceKind {
            label: label.into(),
        }
    }

    /// Create a new ambiguous-key error
    pub fn ambiguous_key(key: impl Into<String>) -> Self {
        Self::AmbiguousGroupKey { key: key.into() }
    }

    /// Create a new invalid-pattern error
    pub fn invalid_pattern(message: impl Into<String>) -> Self {
        Self::InvalidPattern {
            message: message.into(),
        }
    }

    /// Create a new missing-role error
    pub fn missing_role(pattern: impl Into<String>, role: impl Into<String>) -> Self {
        Self::MissingRole {
            pattern: pattern.into(),
            role: role.into(),
        }
    }

    /// Create a new invalid-fragment error
    pub fn invalid_fragment(message: impl Into<String>) -> Self {
        Self::InvalidFragment {
            message: message.into(),
        }
    }

    /// Create a new invalid-multiplicity error
    pub fn invalid_multiplicity(value: impl Into<String>) -> Self {
        Self::InvalidMultiplicity {
            value: value.into(),
        }
    }

    /// Create a new parser error
    pub fn parser_error(message: impl Into<String>) -> Self {
        Self::Parser {
            message: message.into(),
        }
    }

    /// Create a new notation error
    pub fn notation_error(message: impl Into<String>) -> Self {
        Self::Notation {
            message: message.into(),
        }
    }
}
