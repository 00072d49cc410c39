//! Per-sentence fragments and their persistence keys

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::FragmentError;
use super::model::{Association, Class, ClassKind, Model, Multiplicity};

/// Kind of sentence a fragment was extracted from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SentenceKind {
    /// Describes a class ("The Car is a class.")
    #[serde(rename = "class")]
    Class,
    /// Describes a relationship ("A Car has one or more Wheels.")
    #[serde(rename = "rel")]
    Relationship,
}

impl SentenceKind {
    pub const ALL: [SentenceKind; 2] = [SentenceKind::Class, SentenceKind::Relationship];

    /// The label used by classifiers and fragment keys
    pub fn label(&self) -> &'static str {
        match self {
            SentenceKind::Class => "class",
            SentenceKind::Relationship => "rel",
        }
    }
}

impl fmt::Display for SentenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for SentenceKind {
    type Err = FragmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "class" => Ok(SentenceKind::Class),
            "rel" => Ok(SentenceKind::Relationship),
            other => Err(FragmentError::unsupported_kind(other)),
        }
    }
}

/// The minimal diagram unit extracted from one sentence
///
/// Either one class with no associations, or two classes where the first
/// owns a single association to the second. Serialized as its model; a
/// model of any other shape is rejected on deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Model", into = "Model")]
pub struct Fragment {
    model: Model,
}

impl TryFrom<Model> for Fragment {
    type Error = FragmentError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        check_shape(&model)?;
        Ok(Self { model })
    }
}

impl From<Fragment> for Model {
    fn from(fragment: Fragment) -> Self {
        fragment.model
    }
}

/// One bare class, or one association whose endpoints are the only classes
fn check_shape(model: &Model) -> Result<(), FragmentError> {
    let associations: Vec<&Association> = model.associations().collect();
    match associations.as_slice() {
        [] if model.class_count() == 1 => Ok(()),
        [] => Err(FragmentError::invalid_fragment(format!(
            "expected one class without associations, found {}",
            model.class_count()
        ))),
        [association] => {
            let endpoints = BTreeSet::from([association.source(), association.destination()]);
            if model.class_names() == endpoints {
                Ok(())
            } else {
                Err(FragmentError::invalid_fragment(format!(
                    "classes other than the endpoints of {association}"
                )))
            }
        }
        more => Err(FragmentError::invalid_fragment(format!(
            "expected at most one association, found {}",
            more.len()
        ))),
    }
}

impl Fragment {
    /// A class-description fragment
    pub fn class(name: &str) -> Self {
        Self::single(Class::new(name, ClassKind::Class))
    }

    /// A fragment carrying one class as-is
    pub fn single(class: Class) -> Self {
        let mut model = Model::new(class.name());
        model.insert_class(class);
        Self { model }
    }

    /// A relationship fragment: `source` owns one association to `destination`
    pub fn relationship(source: &str, destination: &str, multiplicity: Multiplicity) -> Self {
        let source = Class::new(source, ClassKind::Rel);
        let destination = Class::new(destination, ClassKind::Rel);
        Self::association(source, destination, multiplicity)
    }

    /// A relationship fragment between two existing classes
    ///
    /// Any associations already carried by `source` are dropped.
    pub fn association(source: Class, destination: Class, multiplicity: Multiplicity) -> Self {
        let source = source
            .detached()
            .with_association(destination.name(), multiplicity);
        let mut model = Model::new(source.name());
        model.insert_class(source);
        model.insert_class(destination.detached());
        Self { model }
    }

    /// Re-wrap a model as trivial fragments
    ///
    /// One class fragment per class, then one relationship fragment per
    /// association. Assembling the result reproduces the model.
    pub fn decompose(model: &Model) -> Vec<Fragment> {
        let mut fragments: Vec<Fragment> = model
            .classes()
            .iter()
            .map(|class| Fragment::single(class.detached()))
            .collect();

        for class in model.classes() {
            for association in class.associations() {
                let destination = model
                    .class(association.destination())
                    .map(Class::detached)
                    .unwrap_or_else(|| Class::new(association.destination(), ClassKind::Rel));
                fragments.push(Fragment::association(
                    class.detached(),
                    destination,
                    association.multiplicity(),
                ));
            }
        }
        fragments
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn into_model(self) -> Model {
        self.model
    }

    pub fn classes(&self) -> &[Class] {
        self.model.classes()
    }

    /// Whether this fragment carries an association
    pub fn is_relationship(&self) -> bool {
        self.model.association_count() > 0
    }
}

/// Persistence key of a fragment: `<document>_<kind><index>`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FragmentKey {
    pub document: String,
    pub kind: SentenceKind,
    pub index: usize,
}

impl FragmentKey {
    pub fn new(document: impl Into<String>, kind: SentenceKind, index: usize) -> Self {
        Self {
            document: document.into(),
            kind,
            index,
        }
    }
}

impl fmt::Display for FragmentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}{}", self.document, self.kind.label(), self.index)
    }
}

impl FromStr for FragmentKey {
    type Err = FragmentError;

    /// Strip the trailing `_<kind><digits>` suffix to recover the document
    fn from_str(key: &str) -> Result<Self, Self::Err> {
        let ambiguous = || FragmentError::ambiguous_key(key);

        let (document, suffix) = key.rsplit_once('_').ok_or_else(ambiguous)?;
        if document.is_empty() {
            return Err(ambiguous());
        }

        let (kind, digits) = SentenceKind::ALL
            .into_iter()
            .find_map(|kind| suffix.strip_prefix(kind.label()).map(|rest| (kind, rest)))
            .ok_or_else(ambiguous)?;

        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ambiguous());
        }
        let index = digits.parse().map_err(|_| ambiguous())?;

        Ok(FragmentKey::new(document, kind, index))
    }
}
