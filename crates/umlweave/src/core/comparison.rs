//! Structural comparison of two models
//!
//! [`ModelComparison`] explains *why* two models differ. It agrees with
//! `Model == Model`: `is_match()` is true exactly when the models are equal.

use std::collections::BTreeSet;

use serde::Serialize;

use super::model::{Model, Multiplicity};

/// An association triple owned by a class
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct AssociationDiff {
    pub source: String,
    pub destination: String,
    pub multiplicity: Multiplicity,
}

/// Differences between an expected and an actual model
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ModelComparison {
    /// Classes in the expected model only
    pub missing_classes: Vec<String>,
    /// Classes in the actual model only
    pub unexpected_classes: Vec<String>,
    /// Associations of shared classes found only in the expected model
    pub missing_associations: Vec<AssociationDiff>,
    /// Associations of shared classes found only in the actual model
    pub unexpected_associations: Vec<AssociationDiff>,
}

impl ModelComparison {
    pub fn between(expected: &Model, actual: &Model) -> Self {
        let expected_names = expected.class_names();
        let actual_names = actual.class_names();

        let mut comparison = ModelComparison {
            missing_classes: expected_names
                .difference(&actual_names)
                .map(|s| s.to_string())
                .collect(),
            unexpected_classes: actual_names
                .difference(&expected_names)
                .map(|s| s.to_string())
                .collect(),
            ..Default::default()
        };

        for name in expected_names.intersection(&actual_names) {
            let (Some(want), Some(got)) = (expected.class(name), actual.class(name)) else {
                continue;
            };
            let want = want.association_set();
            let got = got.association_set();
            comparison
                .missing_associations
                .extend(to_diffs(want.difference(&got)));
            comparison
                .unexpected_associations
                .extend(to_diffs(got.difference(&want)));
        }

        comparison
    }

    pub fn is_match(&self) -> bool {
        self.missing_classes.is_empty()
            && self.unexpected_classes.is_empty()
            && self.missing_associations.is_empty()
            && self.unexpected_associations.is_empty()
    }

    /// Human-readable summary lines, empty when the models match
    pub fn summary(&self) -> Vec<String> {
        let mut lines = Vec::new();
        for name in &self.missing_classes {
            lines.push(format!("missing class {}", name));
        }
        for name in &self.unexpected_classes {
            lines.push(format!("unexpected class {}", name));
        }
        for diff in &self.missing_associations {
            lines.push(format!(
                "missing association {} -> {} [{}]",
                diff.source, diff.destination, diff.multiplicity
            ));
        }
        for diff in &self.unexpected_associations {
            lines.push(format!(
                "unexpected association {} -> {} [{}]",
                diff.source, diff.destination, diff.multiplicity
            ));
        }
        lines
    }
}

fn to_diffs<'a, 'b: 'a>(
    triples: impl Iterator<Item = &'a (&'b str, &'b str, Multiplicity)>,
) -> Vec<AssociationDiff> {
    triples
        .map(|&(source, destination, multiplicity)| AssociationDiff {
            source: source.to_string(),
            destination: destination.to_string(),
            multiplicity,
        })
        .collect()
}

/// The class names of a model, owned
pub fn class_name_set(model: &Model) -> BTreeSet<String> {
    model.class_names().into_iter().map(str::to_string).collect()
}
