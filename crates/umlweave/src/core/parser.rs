//! Dependency parser abstraction
//!
//! The linguistic parser is an external collaborator. Anything that can turn
//! a sentence into a [`DependencyGraph`] plugs in here.

use anyhow::Result;

use super::DependencyGraph;

/// Core trait for dependency parsers
///
/// Implementations must be immutable after construction so one parser can
/// serve extraction on several threads.
///
/// # Example
/// ```
/// use umlweave::core::DependencyParser;
/// use umlweave::plugins::LexicalParser;
///
/// let parser = LexicalParser::new();
/// let graph = parser.parse("The Car is a class.").unwrap();
/// assert_eq!(graph.root().unwrap().lemma, "be");
/// ```
pub trait DependencyParser: Send + Sync {
    /// Parse one sentence into its dependency graph
    fn parse(&self, text: &str) -> Result<DependencyGraph>;

    /// Get the name of this parser
    fn name(&self) -> &'static str;

    /// Get the version of this parser
    fn version(&self) -> &'static str;
}
