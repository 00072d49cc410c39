//! Class-diagram model types
//!
//! Classes, associations and the package-level [`Model`] that fragments and
//! assembled diagrams share. Identity is by canonical class name only.

use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::FragmentError;
use super::text::canonical_name;

/// UML-style cardinality of an association end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Multiplicity {
    /// `0..1`
    #[serde(rename = "0..1")]
    ZeroOrOne,
    /// `1..1`
    #[serde(rename = "1..1")]
    ExactlyOne,
    /// `0..*`
    #[serde(rename = "0..*")]
    ZeroOrMore,
    /// `1..*`
    #[serde(rename = "1..*")]
    OneOrMore,
}

impl Multiplicity {
    /// All multiplicity codes in canonical order
    pub const ALL: [Multiplicity; 4] = [
        Multiplicity::ZeroOrOne,
        Multiplicity::ExactlyOne,
        Multiplicity::ZeroOrMore,
        Multiplicity::OneOrMore,
    ];

    /// The canonical code, e.g. `1..*`
    pub fn code(&self) -> &'static str {
        match self {
            Multiplicity::ZeroOrOne => "0..1",
            Multiplicity::ExactlyOne => "1..1",
            Multiplicity::ZeroOrMore => "0..*",
            Multiplicity::OneOrMore => "1..*",
        }
    }

    /// Parse one of the four canonical codes
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.code() == code.trim())
    }
}

impl fmt::Display for Multiplicity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Multiplicity {
    type Err = FragmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| FragmentError::invalid_multiplicity(s))
    }
}

/// Provenance tag of a class
///
/// Records whether the class was minted from a class-describing sentence or
/// inferred as the endpoint of a relationship. Never part of equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassKind {
    #[default]
    Class,
    Rel,
}

impl ClassKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClassKind::Class => "class",
            ClassKind::Rel => "rel",
        }
    }
}

impl fmt::Display for ClassKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A directed association from a source class to a destination class
///
/// Owned by its source class. The destination is referenced by name only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Association {
    #[serde(default)]
    source: String,
    destination: String,
    multiplicity: Multiplicity,
}

impl Association {
    pub fn new(source: &str, destination: &str, multiplicity: Multiplicity) -> Self {
        Self {
            source: canonical_name(source),
            destination: canonical_name(destination),
            multiplicity,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn multiplicity(&self) -> Multiplicity {
        self.multiplicity
    }

    /// The (source, destination, multiplicity) triple used for comparison
    pub fn triple(&self) -> (&str, &str, Multiplicity) {
        (&self.source, &self.destination, self.multiplicity)
    }
}

impl fmt::Display for Association {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {} [{}]",
            self.source, self.destination, self.multiplicity
        )
    }
}

/// A class in the diagram
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Class {
    name: String,
    #[serde(default)]
    kind: ClassKind,
    #[serde(default)]
    associations: Vec<Association>,
}

impl Class {
    /// Create a class; the name is canonicalized
    pub fn new(name: &str, kind: ClassKind) -> Self {
        Self {
            name: canonical_name(name),
            kind,
            associations: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ClassKind {
        self.kind
    }

    pub fn associations(&self) -> &[Association] {
        &self.associations
    }

    /// Add an outgoing association to `destination`
    pub fn associate(&mut self, destination: &str, multiplicity: Multiplicity) {
        let association = Association::new(&self.name, destination, multiplicity);
        self.associations.push(association);
    }

    /// Builder form of [`Class::associate`]
    pub fn with_association(mut self, destination: &str, multiplicity: Multiplicity) -> Self {
        self.associate(destination, multiplicity);
        self
    }

    /// A copy of this class without its associations
    pub(crate) fn detached(&self) -> Self {
        Self {
            name: self.name.clone(),
            kind: self.kind,
            associations: Vec::new(),
        }
    }

    /// The set of association triples owned by this class
    pub fn association_set(&self) -> BTreeSet<(&str, &str, Multiplicity)> {
        self.associations.iter().map(Association::triple).collect()
    }
}

impl PartialEq for Class {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Class {}

impl Hash for Class {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

/// A named package of uniquely-named classes
///
/// Structural equality ignores the package name, class order, association
/// order and kind tags: two models are equal iff they have the same class
/// names and every class owns the same set of association triples.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "ModelRecord")]
pub struct Model {
    name: String,
    classes: Vec<Class>,
}

#[derive(Deserialize)]
struct ModelRecord {
    #[serde(default)]
    name: String,
    #[serde(default)]
    classes: Vec<Class>,
}

impl From<ModelRecord> for Model {
    fn from(record: ModelRecord) -> Self {
        Model::from_classes(&record.name, record.classes)
    }
}

impl Model {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            classes: Vec::new(),
        }
    }

    /// Build a model from classes, merging classes that share a name
    ///
    /// A destination that no class declares is added as a `rel` class, so
    /// the class set matches what the assembler builds from the same
    /// associations. Declared classes keep their own kind wherever they
    /// appear in the input.
    pub fn from_classes(name: &str, classes: impl IntoIterator<Item = Class>) -> Self {
        let mut model = Model::new(name);
        let mut pending = Vec::new();
        for class in classes {
            let Class {
                name,
                kind,
                associations,
            } = class;
            let name = canonical_name(&name);
            if !model.contains(&name) {
                model.classes.push(Class::new(&name, kind));
            }
            pending.extend(
                associations
                    .into_iter()
                    .map(|association| (name.clone(), association)),
            );
        }
        for (source, association) in pending {
            model.attach(&source, association.destination(), association.multiplicity());
        }
        model
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    pub fn classes(&self) -> &[Class] {
        &self.classes
    }

    pub fn class(&self, name: &str) -> Option<&Class> {
        let name = canonical_name(name);
        self.classes.iter().find(|c| c.name == name)
    }

    pub fn class_mut(&mut self, name: &str) -> Option<&mut Class> {
        let name = canonical_name(name);
        self.classes.iter_mut().find(|c| c.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.class(name).is_some()
    }

    /// Insert a class unless one with the same name exists
    ///
    /// Returns `false` and leaves the existing class untouched on a clash.
    pub fn insert_class(&mut self, class: Class) -> bool {
        if self.contains(&class.name) {
            return false;
        }
        self.classes.push(class);
        true
    }

    /// Append an association to `source`, adding the destination if absent
    fn attach(&mut self, source: &str, destination: &str, multiplicity: Multiplicity) {
        if !self.contains(destination) {
            self.classes.push(Class::new(destination, ClassKind::Rel));
        }
        if let Some(class) = self.class_mut(source) {
            class.associate(destination, multiplicity);
        }
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    pub fn association_count(&self) -> usize {
        self.classes.iter().map(|c| c.associations.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn class_names(&self) -> BTreeSet<&str> {
        self.classes.iter().map(|c| c.name.as_str()).collect()
    }

    /// Iterate over every association in the model
    pub fn associations(&self) -> impl Iterator<Item = &Association> {
        self.classes.iter().flat_map(|c| c.associations.iter())
    }
}

impl PartialEq for Model {
    fn eq(&self, other: &Self) -> bool {
        if self.class_names() != other.class_names() {
            return false;
        }
        self.classes.iter().all(|class| {
            other
                .class(&class.name)
                .is_some_and(|o| class.association_set() == o.association_set())
        })
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "package {}", self.name)?;
        for class in &self.classes {
            writeln!(f, "  class {} <<{}>>", class.name, class.kind)?;
            for association in &class.associations {
                writeln!(f, "    {}", association)?;
            }
        }
        Ok(())
    }
}
