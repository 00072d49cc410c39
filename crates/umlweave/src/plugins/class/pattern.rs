//! The copula-class pattern

use crate::core::{DependencyGraph, Fragment, FragmentError, SentenceKind};
use crate::extraction::{Bindings, Pattern, RelOp, TokenConstraint};

/// Name of the built-in class pattern
pub const COPULA_CLASS: &str = "copula-class";

/// `<subject> is a class`: a `be` anchor with an `nsubj` child and an `attr`
/// child whose lemma is `class`
pub fn copula_class_pattern() -> Result<Pattern, FragmentError> {
    Pattern::builder(COPULA_CLASS, SentenceKind::Class)
        .priority(10)
        .anchor("verb", TokenConstraint::any().lemma("be"))
        .node("verb", RelOp::Child, "subject", TokenConstraint::any().dep("nsubj"))
        .node(
            "verb",
            RelOp::Child,
            "attribute",
            TokenConstraint::any().dep("attr").lemma("class"),
        )
        .build(build_class_fragment)
}

/// One class named after the subject, tagged `class`
pub fn build_class_fragment(
    bindings: &Bindings,
    _graph: &DependencyGraph,
) -> Result<Fragment, FragmentError> {
    let subject = bindings.text("subject")?;
    Ok(Fragment::class(subject))
}
