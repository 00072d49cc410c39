//! Fragment extraction engine
//!
//! Walks the registry in priority order and lets the first pattern that
//! matches build the sentence's fragment.

use tracing::{debug, info, span, trace, Level};

use super::matcher::match_pattern;
use super::pattern::Pattern;
use super::registry::PatternRegistry;
use crate::core::{DependencyGraph, DependencyParser, Fragment, FragmentError, SentenceKind};

/// Extract a fragment from an already-parsed sentence
///
/// Returns `Ok(None)` when no pattern matches. A matching pattern whose
/// builder fails ends the search with that error.
pub fn extract_from_graph(
    graph: &DependencyGraph,
    registry: &PatternRegistry,
) -> Result<Option<Fragment>, FragmentError> {
    if registry.is_empty() {
        return Err(FragmentError::EmptyPatternSet);
    }
    first_match(graph, registry.patterns().iter())
}

/// Extract using only the patterns registered for the kind named by `label`
pub fn extract_from_graph_as(
    graph: &DependencyGraph,
    registry: &PatternRegistry,
    label: &str,
) -> Result<Option<Fragment>, FragmentError> {
    if registry.is_empty() {
        return Err(FragmentError::EmptyPatternSet);
    }
    let kind: SentenceKind = label.parse()?;
    if !registry.supports(kind) {
        return Err(FragmentError::unsupported_kind(label));
    }
    first_match(graph, registry.patterns_for(kind))
}

fn first_match<'a>(
    graph: &DependencyGraph,
    patterns: impl Iterator<Item = &'a Pattern>,
) -> Result<Option<Fragment>, FragmentError> {
    for pattern in patterns {
        trace!(pattern = pattern.name(), "Trying pattern");
        if let Some(bindings) = match_pattern(graph, pattern) {
            debug!(
                pattern = pattern.name(),
                roles = bindings.len(),
                "Pattern matched"
            );
            return pattern.build(&bindings, graph).map(Some);
        }
    }
    debug!("No pattern matched");
    Ok(None)
}

/// Sentence-level extractor: a dependency parser plus a pattern registry
///
/// Immutable after construction, so one instance can serve many threads.
pub struct Extractor {
    parser: Box<dyn DependencyParser>,
    registry: PatternRegistry,
}

impl Extractor {
    pub fn new(parser: Box<dyn DependencyParser>, registry: PatternRegistry) -> Self {
        Self { parser, registry }
    }

    /// An extractor with the built-in patterns
    pub fn with_builtin_patterns(parser: Box<dyn DependencyParser>) -> Result<Self, FragmentError> {
        Ok(Self::new(parser, PatternRegistry::with_builtin_patterns()?))
    }

    pub fn registry(&self) -> &PatternRegistry {
        &self.registry
    }

    pub fn parser_name(&self) -> &'static str {
        self.parser.name()
    }

    /// Parse the sentence and extract its fragment, if any pattern matches
    pub fn extract(&self, sentence: &str) -> Result<Option<Fragment>, FragmentError> {
        let extract_span = span!(Level::INFO, "extract", sentence_len = sentence.len());
        let _enter = extract_span.enter();

        let graph = self.parse(sentence)?;
        let fragment = extract_from_graph(&graph, &self.registry)?;
        log_outcome(&fragment);
        Ok(fragment)
    }

    /// Like [`Extractor::extract`], restricted to the kind named by `label`
    pub fn extract_as(&self, sentence: &str, label: &str) -> Result<Option<Fragment>, FragmentError> {
        let extract_span = span!(Level::INFO, "extract_as", label, sentence_len = sentence.len());
        let _enter = extract_span.enter();

        // Reject unknown labels before paying for a parse
        let kind: SentenceKind = label.parse()?;
        if !self.registry.is_empty() && !self.registry.supports(kind) {
            return Err(FragmentError::unsupported_kind(label));
        }

        let graph = self.parse(sentence)?;
        let fragment = extract_from_graph_as(&graph, &self.registry, label)?;
        log_outcome(&fragment);
        Ok(fragment)
    }

    fn parse(&self, sentence: &str) -> Result<DependencyGraph, FragmentError> {
        let parse_span = span!(Level::DEBUG, "dependency_parse", parser = self.parser.name());
        let _enter = parse_span.enter();

        let graph = self
            .parser
            .parse(sentence)
            .map_err(|e| FragmentError::parser_error(format!("{e:#}")))?;
        trace!(tokens = graph.len(), text = %graph.text(), "Parsed sentence");
        Ok(graph)
    }
}

fn log_outcome(fragment: &Option<Fragment>) {
    match fragment {
        Some(fragment) => info!(
            classes = fragment.classes().len(),
            associations = fragment.model().association_count(),
            "Extracted fragment"
        ),
        None => debug!("Sentence produced no fragment"),
    }
}
