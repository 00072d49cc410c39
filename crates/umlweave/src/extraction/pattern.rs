//! Declarative dependency patterns
//!
//! A [`Pattern`] names an anchor token and a set of labeled nodes, each
//! linked to an earlier node by a relation operator and constrained by
//! lemma, part of speech, dependency label or text. When it matches, the
//! pattern's [`FragmentBuilder`] turns the role bindings into a fragment.

use std::fmt;
use std::str::FromStr;

use crate::core::{DependencyGraph, Fragment, FragmentError, SentenceKind, Token};

/// Builds a fragment from the bindings of one match
///
/// Receives the whole graph as well, for scans that are not tied to the
/// matched structure (multiplicity phrases).
pub type FragmentBuilder = fn(&Bindings, &DependencyGraph) -> Result<Fragment, FragmentError>;

/// Relation between an already-matched node and the next node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelOp {
    /// `>`: the new node is a direct dependent of the left node
    Child,
    /// `<`: the new node is the direct head of the left node
    Head,
    /// `>>`: the new node is dominated by the left node
    Descendant,
    /// `<<`: the new node dominates the left node
    Ancestor,
    /// `.`: the left node immediately precedes the new node
    ImmediatelyPrecedes,
    /// `;`: the left node immediately follows the new node
    ImmediatelyFollows,
    /// `.*`: the left node precedes the new node
    Precedes,
    /// `;*`: the left node follows the new node
    Follows,
}

impl RelOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            RelOp::Child => ">",
            RelOp::Head => "<",
            RelOp::Descendant => ">>",
            RelOp::Ancestor => "<<",
            RelOp::ImmediatelyPrecedes => ".",
            RelOp::ImmediatelyFollows => ";",
            RelOp::Precedes => ".*",
            RelOp::Follows => ";*",
        }
    }

    /// Whether `candidate` stands in this relation to `left`
    pub fn holds(&self, graph: &DependencyGraph, left: usize, candidate: usize) -> bool {
        if left == candidate {
            return false;
        }
        match self {
            RelOp::Child => graph
                .token(candidate)
                .is_some_and(|t| !t.is_root() && t.head == left),
            RelOp::Head => graph
                .token(left)
                .is_some_and(|t| !t.is_root() && t.head == candidate),
            RelOp::Descendant => graph.is_ancestor(left, candidate),
            RelOp::Ancestor => graph.is_ancestor(candidate, left),
            RelOp::ImmediatelyPrecedes => left + 1 == candidate,
            RelOp::ImmediatelyFollows => candidate + 1 == left,
            RelOp::Precedes => left < candidate,
            RelOp::Follows => left > candidate,
        }
    }
}

impl fmt::Display for RelOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl FromStr for RelOp {
    type Err = FragmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ">" => Ok(RelOp::Child),
            "<" => Ok(RelOp::Head),
            ">>" => Ok(RelOp::Descendant),
            "<<" => Ok(RelOp::Ancestor),
            "." => Ok(RelOp::ImmediatelyPrecedes),
            ";" => Ok(RelOp::ImmediatelyFollows),
            ".*" => Ok(RelOp::Precedes),
            ";*" => Ok(RelOp::Follows),
            other => Err(FragmentError::invalid_pattern(format!(
                "unknown relation operator {:?}",
                other
            ))),
        }
    }
}

/// Predicates a token must satisfy to fill a node
///
/// Each attribute holds a set of alternatives; an empty set accepts anything.
/// Lemmas and text compare case-insensitively, POS tags and dependency
/// labels compare exactly after normalization (upper- and lowercase).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenConstraint {
    lemmas: Vec<String>,
    pos: Vec<String>,
    deps: Vec<String>,
    texts: Vec<String>,
}

impl TokenConstraint {
    /// A constraint that accepts any token
    pub fn any() -> Self {
        Self::default()
    }

    pub fn lemma(mut self, lemma: &str) -> Self {
        self.lemmas.push(lemma.to_lowercase());
        self
    }

    pub fn lemma_in(mut self, lemmas: &[&str]) -> Self {
        self.lemmas.extend(lemmas.iter().map(|l| l.to_lowercase()));
        self
    }

    pub fn pos(mut self, pos: &str) -> Self {
        self.pos.push(pos.to_uppercase());
        self
    }

    pub fn pos_in(mut self, tags: &[&str]) -> Self {
        self.pos.extend(tags.iter().map(|p| p.to_uppercase()));
        self
    }

    pub fn dep(mut self, dep: &str) -> Self {
        self.deps.push(dep.to_lowercase());
        self
    }

    pub fn dep_in(mut self, deps: &[&str]) -> Self {
        self.deps.extend(deps.iter().map(|d| d.to_lowercase()));
        self
    }

    /// Require the lowercased token text
    pub fn text(mut self, text: &str) -> Self {
        self.texts.push(text.to_lowercase());
        self
    }

    pub fn matches(&self, token: &Token) -> bool {
        accepts(&self.lemmas, &token.lemma.to_lowercase())
            && accepts(&self.pos, &token.pos.to_uppercase())
            && accepts(&self.deps, &token.dep.to_lowercase())
            && accepts(&self.texts, &token.text.to_lowercase())
    }
}

fn accepts(alternatives: &[String], value: &str) -> bool {
    alternatives.is_empty() || alternatives.iter().any(|a| a == value)
}

/// One labeled node of a pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternNode {
    /// Role label the matched token is bound to
    pub id: String,
    /// Earlier node this one hangs off, and how; `None` for the anchor
    pub link: Option<(String, RelOp)>,
    pub constraint: TokenConstraint,
}

/// A registered sentence shape
#[derive(Clone)]
pub struct Pattern {
    name: String,
    kind: SentenceKind,
    priority: u32,
    nodes: Vec<PatternNode>,
    /// Index of each node's link target, resolved at build time
    links: Vec<Option<(usize, RelOp)>>,
    builder: FragmentBuilder,
}

impl Pattern {
    /// Start building a pattern
    pub fn builder(name: &str, kind: SentenceKind) -> PatternBuilder {
        PatternBuilder {
            name: name.to_string(),
            kind,
            priority: 100,
            nodes: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> SentenceKind {
        self.kind
    }

    /// Lower values are tried first
    pub fn priority(&self) -> u32 {
        self.priority
    }

    pub fn nodes(&self) -> &[PatternNode] {
        &self.nodes
    }

    pub(crate) fn link(&self, node: usize) -> Option<(usize, RelOp)> {
        self.links.get(node).copied().flatten()
    }

    /// Run this pattern's builder
    pub fn build(&self, bindings: &Bindings, graph: &DependencyGraph) -> Result<Fragment, FragmentError> {
        (self.builder)(bindings, graph)
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pattern")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("priority", &self.priority)
            .field("nodes", &self.nodes)
            .finish_non_exhaustive()
    }
}

/// Builder for [`Pattern`]
pub struct PatternBuilder {
    name: String,
    kind: SentenceKind,
    priority: u32,
    nodes: Vec<PatternNode>,
}

impl PatternBuilder {
    pub fn priority(mut self, priority: u32) -> Self {
        self.priority = priority;
        self
    }

    /// Declare the anchor node; must come first
    pub fn anchor(mut self, id: &str, constraint: TokenConstraint) -> Self {
        self.nodes.push(PatternNode {
            id: id.to_string(),
            link: None,
            constraint,
        });
        self
    }

    /// Declare a node related to an earlier node
    pub fn node(mut self, left: &str, op: RelOp, id: &str, constraint: TokenConstraint) -> Self {
        self.nodes.push(PatternNode {
            id: id.to_string(),
            link: Some((left.to_string(), op)),
            constraint,
        });
        self
    }

    /// Validate the node list and attach the fragment builder
    pub fn build(self, builder: FragmentBuilder) -> Result<Pattern, FragmentError> {
        let invalid = |message: String| {
            FragmentError::invalid_pattern(format!("{}: {}", self.name, message))
        };

        match self.nodes.first() {
            None => return Err(invalid("pattern has no nodes".to_string())),
            Some(first) if first.link.is_some() => {
                return Err(invalid("the first node must be the anchor".to_string()))
            }
            Some(_) => {}
        }

        let mut links = Vec::with_capacity(self.nodes.len());
        for (position, node) in self.nodes.iter().enumerate() {
            if self.nodes[..position].iter().any(|n| n.id == node.id) {
                return Err(invalid(format!("duplicate node id {:?}", node.id)));
            }
            let link = match &node.link {
                None if position == 0 => None,
                None => return Err(invalid(format!("node {:?} has no link", node.id))),
                Some((left, op)) => {
                    let target = self.nodes[..position]
                        .iter()
                        .position(|n| &n.id == left)
                        .ok_or_else(|| {
                            invalid(format!(
                                "node {:?} links to {:?}, which is not declared before it",
                                node.id, left
                            ))
                        })?;
                    Some((target, *op))
                }
            };
            links.push(link);
        }

        Ok(Pattern {
            name: self.name,
            kind: self.kind,
            priority: self.priority,
            nodes: self.nodes,
            links,
            builder,
        })
    }
}

/// A token bound to a role
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundToken {
    pub index: usize,
    pub text: String,
}

/// Role label → matched token, for one match, in pattern-node order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bindings {
    pattern: String,
    roles: Vec<(String, BoundToken)>,
}

impl Bindings {
    pub(crate) fn new(pattern: &str) -> Self {
        Self {
            pattern: pattern.to_string(),
            roles: Vec::new(),
        }
    }

    pub(crate) fn bind(&mut self, role: &str, token: &Token) {
        self.roles.push((
            role.to_string(),
            BoundToken {
                index: token.index,
                text: token.text.clone(),
            },
        ));
    }

    /// Name of the pattern that produced these bindings
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn get(&self, role: &str) -> Option<&BoundToken> {
        self.roles.iter().find(|(r, _)| r == role).map(|(_, t)| t)
    }

    /// Text bound to a role, or a [`FragmentError::MissingRole`]
    pub fn text(&self, role: &str) -> Result<&str, FragmentError> {
        self.get(role)
            .map(|t| t.text.as_str())
            .ok_or_else(|| FragmentError::missing_role(&self.pattern, role))
    }

    /// Token position bound to a role
    pub fn position(&self, role: &str) -> Option<usize> {
        self.get(role).map(|t| t.index)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BoundToken)> {
        self.roles.iter().map(|(r, t)| (r.as_str(), t))
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Token, ROOT_DEP};

    fn noop(_: &Bindings, _: &DependencyGraph) -> Result<Fragment, FragmentError> {
        Ok(Fragment::class("Noop"))
    }

    #[test]
    fn test_rel_op_symbols_roundtrip() {
        for op in [
            RelOp::Child,
            RelOp::Head,
            RelOp::Descendant,
            RelOp::Ancestor,
            RelOp::ImmediatelyPrecedes,
            RelOp::ImmediatelyFollows,
            RelOp::Precedes,
            RelOp::Follows,
        ] {
            assert_eq!(op.symbol().parse::<RelOp>().unwrap(), op);
        }
        assert!("$+".parse::<RelOp>().is_err());
    }

    #[test]
    fn test_rel_op_holds() {
        // "Cars have wheels": have is root; Cars and wheels hang off it
        let graph = DependencyGraph::new(vec![
            Token::new("Cars", "car", "NOUN", "nsubj", 1),
            Token::new("have", "have", "VERB", ROOT_DEP, 1),
            Token::new("wheels", "wheel", "NOUN", "dobj", 1),
        ])
        .unwrap();

        assert!(RelOp::Child.holds(&graph, 1, 0));
        assert!(!RelOp::Child.holds(&graph, 0, 1));
        assert!(RelOp::Head.holds(&graph, 0, 1));
        assert!(RelOp::Descendant.holds(&graph, 1, 2));
        assert!(RelOp::Ancestor.holds(&graph, 2, 1));
        assert!(RelOp::ImmediatelyPrecedes.holds(&graph, 0, 1));
        assert!(RelOp::ImmediatelyFollows.holds(&graph, 1, 0));
        assert!(RelOp::Precedes.holds(&graph, 0, 2));
        assert!(RelOp::Follows.holds(&graph, 2, 0));
        assert!(!RelOp::Child.holds(&graph, 1, 1));
    }

    #[test]
    fn test_token_constraint() {
        let token = Token::new("Has", "have", "verb", "ROOT", 0);
        assert!(TokenConstraint::any().matches(&token));
        assert!(TokenConstraint::any().lemma("HAVE").matches(&token));
        assert!(TokenConstraint::any().pos("VERB").matches(&token));
        assert!(TokenConstraint::any().dep("root").matches(&token));
        assert!(TokenConstraint::any().text("has").matches(&token));
        assert!(TokenConstraint::any().dep_in(&["dobj", "root"]).matches(&token));
        assert!(!TokenConstraint::any().lemma("be").matches(&token));
        assert!(!TokenConstraint::any().lemma("have").pos("NOUN").matches(&token));
    }

    #[test]
    fn test_builder_validates_anchor() {
        let result = Pattern::builder("broken", SentenceKind::Class)
            .node("x", RelOp::Child, "y", TokenConstraint::any())
            .build(noop);
        assert!(matches!(result, Err(FragmentError::InvalidPattern { .. })));

        let result = Pattern::builder("empty", SentenceKind::Class).build(noop);
        assert!(matches!(result, Err(FragmentError::InvalidPattern { .. })));
    }

    #[test]
    fn test_builder_validates_links() {
        let result = Pattern::builder("forward", SentenceKind::Class)
            .anchor("verb", TokenConstraint::any())
            .node("object", RelOp::Child, "number", TokenConstraint::any())
            .node("verb", RelOp::Child, "object", TokenConstraint::any())
            .build(noop);
        assert!(matches!(result, Err(FragmentError::InvalidPattern { .. })));

        let result = Pattern::builder("duplicate", SentenceKind::Class)
            .anchor("verb", TokenConstraint::any())
            .node("verb", RelOp::Child, "verb", TokenConstraint::any())
            .build(noop);
        assert!(matches!(result, Err(FragmentError::InvalidPattern { .. })));
    }

    #[test]
    fn test_builder_resolves_links() {
        let pattern = Pattern::builder("ok", SentenceKind::Relationship)
            .priority(5)
            .anchor("verb", TokenConstraint::any())
            .node("verb", RelOp::Child, "object", TokenConstraint::any())
            .node("object", RelOp::Child, "number", TokenConstraint::any())
            .build(noop)
            .unwrap();
        assert_eq!(pattern.priority(), 5);
        assert_eq!(pattern.link(0), None);
        assert_eq!(pattern.link(1), Some((0, RelOp::Child)));
        assert_eq!(pattern.link(2), Some((1, RelOp::Child)));
    }

    #[test]
    fn test_bindings_lookup() {
        let token = Token::new("Car", "car", "NOUN", "nsubj", 0);
        let mut bindings = Bindings::new("copula-class");
        bindings.bind("subject", &token);
        assert_eq!(bindings.text("subject").unwrap(), "Car");
        assert_eq!(bindings.position("subject"), Some(0));
        assert!(matches!(
            bindings.text("object"),
            Err(FragmentError::MissingRole { .. })
        ));
        assert_eq!(bindings.pattern(), "copula-class");
        assert_eq!(bindings.len(), 1);
    }
}
