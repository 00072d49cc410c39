//! Backtracking pattern matcher
//!
//! Assigns distinct tokens to pattern nodes in declaration order. Candidates
//! are tried in sentence order, so matches come out ordered by anchor index,
//! then by each later node's index. Matching has no side effects.

use tracing::trace;

use super::pattern::{Bindings, Pattern};
use crate::core::DependencyGraph;

/// The first match of `pattern` in `graph`, if any
pub fn match_pattern(graph: &DependencyGraph, pattern: &Pattern) -> Option<Bindings> {
    let mut assignment = Vec::with_capacity(pattern.nodes().len());
    let mut found = None;
    search(graph, pattern, &mut assignment, &mut |complete| {
        found = Some(complete.to_vec());
        false
    });
    let bindings = found.map(|assignment| bind(graph, pattern, &assignment));
    trace!(
        pattern = pattern.name(),
        matched = bindings.is_some(),
        "pattern match attempt"
    );
    bindings
}

/// Every match of `pattern` in `graph`, in match order
pub fn find_matches(graph: &DependencyGraph, pattern: &Pattern) -> Vec<Bindings> {
    let mut assignments: Vec<Vec<usize>> = Vec::new();
    let mut assignment = Vec::with_capacity(pattern.nodes().len());
    search(graph, pattern, &mut assignment, &mut |complete| {
        assignments.push(complete.to_vec());
        true
    });
    trace!(
        pattern = pattern.name(),
        matches = assignments.len(),
        "pattern match enumeration"
    );
    assignments
        .iter()
        .map(|assignment| bind(graph, pattern, assignment))
        .collect()
}

/// Depth-first search over node assignments
///
/// `on_match` returns whether to keep searching. The return value of
/// `search` is `false` once the callback asked to stop.
fn search(
    graph: &DependencyGraph,
    pattern: &Pattern,
    assignment: &mut Vec<usize>,
    on_match: &mut dyn FnMut(&[usize]) -> bool,
) -> bool {
    let depth = assignment.len();
    let Some(node) = pattern.nodes().get(depth) else {
        return on_match(assignment);
    };

    for token in graph.tokens() {
        if assignment.contains(&token.index) || !node.constraint.matches(token) {
            continue;
        }
        if let Some((left, op)) = pattern.link(depth) {
            if !op.holds(graph, assignment[left], token.index) {
                continue;
            }
        }
        assignment.push(token.index);
        let keep_going = search(graph, pattern, assignment, on_match);
        assignment.pop();
        if !keep_going {
            return false;
        }
    }
    true
}

fn bind(graph: &DependencyGraph, pattern: &Pattern, assignment: &[usize]) -> Bindings {
    let mut bindings = Bindings::new(pattern.name());
    for (node, &index) in pattern.nodes().iter().zip(assignment) {
        if let Some(token) = graph.token(index) {
            bindings.bind(&node.id, token);
        }
    }
    bindings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Fragment, FragmentError, SentenceKind, Token, ROOT_DEP};
    use crate::extraction::pattern::{RelOp, TokenConstraint};

    fn noop(_: &Bindings, _: &DependencyGraph) -> Result<Fragment, FragmentError> {
        Ok(Fragment::class("Noop"))
    }

    /// "Cars and Trucks have Wheels"
    fn graph() -> DependencyGraph {
        DependencyGraph::new(vec![
            Token::new("Cars", "car", "NOUN", "nsubj", 3),
            Token::new("and", "and", "CCONJ", "cc", 0),
            Token::new("Trucks", "truck", "NOUN", "conj", 0),
            Token::new("have", "have", "VERB", ROOT_DEP, 3),
            Token::new("Wheels", "wheel", "NOUN", "dobj", 3),
        ])
        .unwrap()
    }

    fn noun_after_noun() -> Pattern {
        Pattern::builder("noun-pair", SentenceKind::Relationship)
            .anchor("first", TokenConstraint::any().pos("NOUN"))
            .node("first", RelOp::Precedes, "second", TokenConstraint::any().pos("NOUN"))
            .build(noop)
            .unwrap()
    }

    #[test]
    fn test_first_match_in_sentence_order() {
        let bindings = match_pattern(&graph(), &noun_after_noun()).unwrap();
        assert_eq!(bindings.text("first").unwrap(), "Cars");
        assert_eq!(bindings.text("second").unwrap(), "Trucks");
    }

    #[test]
    fn test_all_matches_ordered() {
        let matches = find_matches(&graph(), &noun_after_noun());
        let pairs: Vec<_> = matches
            .iter()
            .map(|b| (b.position("first").unwrap(), b.position("second").unwrap()))
            .collect();
        assert_eq!(pairs, vec![(0, 2), (0, 4), (2, 4)]);
    }

    #[test]
    fn test_tokens_are_distinct() {
        let pattern = Pattern::builder("two-verbs", SentenceKind::Class)
            .anchor("a", TokenConstraint::any().lemma("have"))
            .node("a", RelOp::Follows, "b", TokenConstraint::any().pos("VERB"))
            .build(noop)
            .unwrap();
        assert!(match_pattern(&graph(), &pattern).is_none());
    }

    #[test]
    fn test_structural_match() {
        let pattern = Pattern::builder("possession", SentenceKind::Relationship)
            .anchor("verb", TokenConstraint::any().lemma("have"))
            .node("verb", RelOp::Child, "subject", TokenConstraint::any().dep("nsubj"))
            .node("verb", RelOp::Child, "object", TokenConstraint::any().dep_in(&["dobj", "obj"]))
            .build(noop)
            .unwrap();
        let bindings = match_pattern(&graph(), &pattern).unwrap();
        assert_eq!(bindings.text("verb").unwrap(), "have");
        assert_eq!(bindings.text("subject").unwrap(), "Cars");
        assert_eq!(bindings.text("object").unwrap(), "Wheels");
    }

    #[test]
    fn test_no_match_on_empty_graph() {
        assert!(match_pattern(&DependencyGraph::default(), &noun_after_noun()).is_none());
        assert!(find_matches(&DependencyGraph::default(), &noun_after_noun()).is_empty());
    }
}
