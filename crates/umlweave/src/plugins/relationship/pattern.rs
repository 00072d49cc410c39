//! The possession-relationship pattern

use tracing::debug;

use crate::core::{DependencyGraph, Fragment, FragmentError, SentenceKind};
use crate::extraction::{find_first, Bindings, Pattern, RelOp, TokenConstraint};

/// Name of the built-in relationship pattern
pub const POSSESSION_RELATIONSHIP: &str = "possession-relationship";

/// `<subject> has <number> <object>`: a `have` anchor with an `nsubj` child
/// and a `dobj`/`obj` child that itself has a `NUM` child
pub fn possession_relationship_pattern() -> Result<Pattern, FragmentError> {
    Pattern::builder(POSSESSION_RELATIONSHIP, SentenceKind::Relationship)
        .priority(20)
        .anchor("verb", TokenConstraint::any().lemma("have"))
        .node("verb", RelOp::Child, "subject", TokenConstraint::any().dep("nsubj"))
        .node(
            "verb",
            RelOp::Child,
            "object",
            TokenConstraint::any().dep_in(&["dobj", "obj"]),
        )
        .node("object", RelOp::Child, "number", TokenConstraint::any().pos("NUM"))
        .build(build_relationship_fragment)
}

/// Subject and object classes, tagged `rel`, joined by one association
///
/// The multiplicity comes from the earliest multiplicity phrase anywhere in
/// the sentence; the matched numeral itself is never interpreted.
pub fn build_relationship_fragment(
    bindings: &Bindings,
    graph: &DependencyGraph,
) -> Result<Fragment, FragmentError> {
    let subject = bindings.text("subject")?;
    let object = bindings.text("object")?;

    let phrase = find_first(graph).ok_or_else(|| FragmentError::no_multiplicity(graph.text()))?;
    debug!(
        subject,
        object,
        phrase = phrase.phrase,
        multiplicity = %phrase.multiplicity,
        "Resolved multiplicity phrase"
    );

    Ok(Fragment::relationship(subject, object, phrase.multiplicity))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ClassKind, Multiplicity, Token, ROOT_DEP};
    use crate::extraction::match_pattern;

    /// "A Car has <words...> Wheels ." with the first numeral under Wheels
    fn possession(quantity: &[(&str, &str)]) -> DependencyGraph {
        let object = 3 + quantity.len();
        let mut tokens = vec![
            Token::new("A", "a", "DET", "det", 1),
            Token::new("Car", "car", "PROPN", "nsubj", 2),
            Token::new("has", "have", "VERB", ROOT_DEP, 2),
        ];
        for (i, (text, pos)) in quantity.iter().enumerate() {
            let (dep, head) = if i == 0 { ("nummod", object) } else { ("dep", 3) };
            tokens.push(Token::new(*text, text.to_lowercase(), *pos, dep, head));
        }
        tokens.push(Token::new("Wheels", "wheel", "NOUN", "dobj", 2));
        tokens.push(Token::new(".", ".", "PUNCT", "punct", 2));
        DependencyGraph::new(tokens).unwrap()
    }

    fn extract(graph: &DependencyGraph) -> Result<Fragment, FragmentError> {
        let pattern = possession_relationship_pattern().unwrap();
        let bindings = match_pattern(graph, &pattern).expect("structural match");
        pattern.build(&bindings, graph)
    }

    #[test]
    fn test_one_or_more() {
        let graph = possession(&[("one", "NUM"), ("or", "CCONJ"), ("more", "ADJ")]);
        let fragment = extract(&graph).unwrap();
        let classes = fragment.classes();
        assert_eq!(classes.len(), 2);
        assert_eq!(classes[0].kind(), ClassKind::Rel);
        assert_eq!(classes[1].kind(), ClassKind::Rel);
        assert_eq!(
            classes[0].associations()[0].triple(),
            ("Car", "Wheels", Multiplicity::OneOrMore)
        );
    }

    #[test]
    fn test_bare_numeral_has_no_multiplicity() {
        let graph = possession(&[("2", "NUM")]);
        assert!(matches!(
            extract(&graph),
            Err(FragmentError::NoMultiplicityFound { .. })
        ));
    }

    #[test]
    fn test_exactly_one() {
        let graph = possession(&[("one", "NUM"), ("and", "CCONJ"), ("only", "ADV"), ("one", "NUM")]);
        let fragment = extract(&graph).unwrap();
        assert_eq!(
            fragment.model().associations().next().unwrap().multiplicity(),
            Multiplicity::ExactlyOne
        );
    }

    #[test]
    fn test_requires_numeral_under_object() {
        // "A Car has Wheels ."
        let graph = DependencyGraph::new(vec![
            Token::new("A", "a", "DET", "det", 1),
            Token::new("Car", "car", "PROPN", "nsubj", 2),
            Token::new("has", "have", "VERB", ROOT_DEP, 2),
            Token::new("Wheels", "wheel", "NOUN", "dobj", 2),
        ])
        .unwrap();
        assert!(match_pattern(&graph, &possession_relationship_pattern().unwrap()).is_none());
    }
}
