//! Pattern registry
//!
//! Holds patterns keyed by name and hands them out in a total order:
//! ascending priority, then name.

use tracing::debug;

use super::pattern::Pattern;
use crate::core::{FragmentError, SentenceKind};
use crate::plugins::{class, relationship};

/// Named, priority-ordered collection of patterns
#[derive(Debug, Clone, Default)]
pub struct PatternRegistry {
    /// Kept sorted by (priority, name)
    patterns: Vec<Pattern>,
}

impl PatternRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the copula-class and possession-relationship
    /// patterns
    pub fn with_builtin_patterns() -> Result<Self, FragmentError> {
        let mut registry = Self::new();
        registry.register(class::copula_class_pattern()?);
        registry.register(relationship::possession_relationship_pattern()?);
        Ok(registry)
    }

    /// Register a pattern, replacing any pattern with the same name
    ///
    /// Returns the replaced pattern.
    pub fn register(&mut self, pattern: Pattern) -> Option<Pattern> {
        let replaced = self.unregister(pattern.name());
        debug!(
            pattern = pattern.name(),
            kind = %pattern.kind(),
            priority = pattern.priority(),
            replaced = replaced.is_some(),
            "Registering pattern"
        );
        let position = self
            .patterns
            .partition_point(|p| (p.priority(), p.name()) < (pattern.priority(), pattern.name()));
        self.patterns.insert(position, pattern);
        replaced
    }

    /// Remove a pattern by name
    pub fn unregister(&mut self, name: &str) -> Option<Pattern> {
        let position = self.patterns.iter().position(|p| p.name() == name)?;
        Some(self.patterns.remove(position))
    }

    pub fn get(&self, name: &str) -> Option<&Pattern> {
        self.patterns.iter().find(|p| p.name() == name)
    }

    /// All patterns in matching order
    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    /// Patterns of one sentence kind, in matching order
    pub fn patterns_for(&self, kind: SentenceKind) -> impl Iterator<Item = &Pattern> + '_ {
        self.patterns.iter().filter(move |p| p.kind() == kind)
    }

    /// Whether any pattern is registered for `kind`
    pub fn supports(&self, kind: SentenceKind) -> bool {
        self.patterns_for(kind).next().is_some()
    }

    pub fn names(&self) -> Vec<&str> {
        self.patterns.iter().map(Pattern::name).collect()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{DependencyGraph, Fragment};
    use crate::extraction::pattern::{Bindings, TokenConstraint};

    fn noop(_: &Bindings, _: &DependencyGraph) -> Result<Fragment, FragmentError> {
        Ok(Fragment::class("Noop"))
    }

    fn pattern(name: &str, kind: SentenceKind, priority: u32) -> Pattern {
        Pattern::builder(name, kind)
            .priority(priority)
            .anchor("anchor", TokenConstraint::any())
            .build(noop)
            .unwrap()
    }

    #[test]
    fn test_builtin_patterns() {
        let registry = PatternRegistry::with_builtin_patterns().unwrap();
        assert_eq!(
            registry.names(),
            vec![class::COPULA_CLASS, relationship::POSSESSION_RELATIONSHIP]
        );
        assert!(registry.supports(SentenceKind::Class));
        assert!(registry.supports(SentenceKind::Relationship));
    }

    #[test]
    fn test_order_is_priority_then_name() {
        let mut registry = PatternRegistry::new();
        registry.register(pattern("zeta", SentenceKind::Class, 5));
        registry.register(pattern("beta", SentenceKind::Class, 10));
        registry.register(pattern("alpha", SentenceKind::Class, 10));
        assert_eq!(registry.names(), vec!["zeta", "alpha", "beta"]);
    }

    #[test]
    fn test_register_replaces_by_name() {
        let mut registry = PatternRegistry::new();
        assert!(registry.register(pattern("p", SentenceKind::Class, 10)).is_none());
        let replaced = registry.register(pattern("p", SentenceKind::Relationship, 1));
        assert_eq!(replaced.unwrap().kind(), SentenceKind::Class);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("p").unwrap().kind(), SentenceKind::Relationship);
    }

    #[test]
    fn test_unregister() {
        let mut registry = PatternRegistry::with_builtin_patterns().unwrap();
        assert!(registry.unregister(class::COPULA_CLASS).is_some());
        assert!(registry.unregister(class::COPULA_CLASS).is_none());
        assert!(!registry.supports(SentenceKind::Class));
        assert_eq!(registry.patterns_for(SentenceKind::Relationship).count(), 1);
    }

    #[test]
    fn test_empty_registry() {
        let registry = PatternRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.get("anything").is_none());
    }
}
