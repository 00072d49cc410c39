//! Pass/fail evaluation against ground truth

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, info, span, warn, Level};

use super::source::GroundTruthSource;
use crate::core::{Model, ModelComparison};

/// A document whose model equals its ground truth
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PassedRecord {
    pub model: String,
    pub class_count: usize,
}

/// A document whose model differs from its ground truth
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedRecord {
    pub model: String,
    pub class_count: usize,
    pub original_class_count: usize,
}

/// Outcome of evaluating a set of documents
#[derive(Debug, Clone, Default, Serialize)]
pub struct EvaluationReport {
    pub passed: Vec<PassedRecord>,
    pub failed: Vec<FailedRecord>,
    /// Documents whose ground truth could not be loaded
    pub skipped: Vec<String>,
    /// Diffs of the failed documents
    pub comparisons: BTreeMap<String, ModelComparison>,
}

impl EvaluationReport {
    /// Documents compared, excluding skipped ones
    pub fn evaluated(&self) -> usize {
        self.passed.len() + self.failed.len()
    }

    /// Share of compared documents that passed, `None` if nothing was compared
    pub fn accuracy(&self) -> Option<f64> {
        match self.evaluated() {
            0 => None,
            n => Some(self.passed.len() as f64 / n as f64),
        }
    }

    /// Write `passed.csv` and `failed.csv` into `dir`
    pub fn write_csv(&self, dir: &Path) -> Result<()> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
        write_records(&dir.join("passed.csv"), &self.passed, &["model", "class_count"])?;
        write_records(
            &dir.join("failed.csv"),
            &self.failed,
            &["model", "class_count", "original_class_count"],
        )?;
        debug!(dir = %dir.display(), "Wrote evaluation reports");
        Ok(())
    }
}

fn write_records<T: Serialize>(path: &Path, records: &[T], headers: &[&str]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    // Written by hand so that an empty report still carries its header row
    writer.write_record(headers)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Compare each model with its ground truth
///
/// A ground truth that fails to load is logged and the document skipped.
pub fn evaluate(
    models: &BTreeMap<String, Model>,
    source: &dyn GroundTruthSource,
) -> EvaluationReport {
    let eval_span = span!(Level::INFO, "evaluate", documents = models.len());
    let _enter = eval_span.enter();

    let mut report = EvaluationReport::default();
    for (document, model) in models {
        let expected = match source.load(document) {
            Ok(expected) => expected,
            Err(e) => {
                warn!(
                    document = %document,
                    error = %format!("{e:#}"),
                    "Skipping document without usable ground truth"
                );
                report.skipped.push(document.clone());
                continue;
            }
        };

        if *model == expected {
            debug!(document = %document, "PASS");
            report.passed.push(PassedRecord {
                model: document.clone(),
                class_count: model.class_count(),
            });
        } else {
            let comparison = ModelComparison::between(&expected, model);
            debug!(document = %document, differences = comparison.summary().len(), "FAIL");
            report.failed.push(FailedRecord {
                model: document.clone(),
                class_count: model.class_count(),
                original_class_count: expected.class_count(),
            });
            report.comparisons.insert(document.clone(), comparison);
        }
    }

    info!(
        passed = report.passed.len(),
        failed = report.failed.len(),
        skipped = report.skipped.len(),
        "Evaluation finished"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Class, ClassKind, Multiplicity};

    struct MapSource(BTreeMap<String, Model>);

    impl GroundTruthSource for MapSource {
        fn load(&self, document: &str) -> Result<Model> {
            self.0
                .get(document)
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("unknown document {}", document))
        }
    }

    fn garage() -> Model {
        Model::from_classes(
            "Garage",
            [
                Class::new("Car", ClassKind::Class).with_association("Wheels", Multiplicity::OneOrMore),
                Class::new("Wheels", ClassKind::Rel),
            ],
        )
    }

    fn report() -> EvaluationReport {
        let mut models = BTreeMap::new();
        models.insert("Garage".to_string(), garage());
        models.insert(
            "Shop".to_string(),
            Model::from_classes("Shop", [Class::new("Till", ClassKind::Class)]),
        );
        models.insert("Zoo".to_string(), Model::new("Zoo"));

        let mut truth = BTreeMap::new();
        truth.insert("Garage".to_string(), garage());
        truth.insert(
            "Shop".to_string(),
            Model::from_classes(
                "Shop",
                [Class::new("Till", ClassKind::Class), Class::new("Clerk", ClassKind::Class)],
            ),
        );
        evaluate(&models, &MapSource(truth))
    }

    #[test]
    fn test_separates_passed_failed_skipped() {
        let report = report();
        assert_eq!(
            report.passed,
            vec![PassedRecord {
                model: "Garage".to_string(),
                class_count: 2
            }]
        );
        assert_eq!(
            report.failed,
            vec![FailedRecord {
                model: "Shop".to_string(),
                class_count: 1,
                original_class_count: 2
            }]
        );
        assert_eq!(report.skipped, vec!["Zoo"]);
        assert_eq!(report.comparisons["Shop"].missing_classes, vec!["Clerk"]);
        assert_eq!(report.accuracy(), Some(0.5));
    }

    #[test]
    fn test_write_csv() {
        let dir = tempfile::tempdir().unwrap();
        report().write_csv(dir.path()).unwrap();

        let passed = std::fs::read_to_string(dir.path().join("passed.csv")).unwrap();
        assert_eq!(passed, "model,class_count\nGarage,2\n");
        let failed = std::fs::read_to_string(dir.path().join("failed.csv")).unwrap();
        assert_eq!(failed, "model,class_count,original_class_count\nShop,1,2\n");
    }

    #[test]
    fn test_empty_report() {
        let report = EvaluationReport::default();
        assert_eq!(report.accuracy(), None);
        let dir = tempfile::tempdir().unwrap();
        report.write_csv(dir.path()).unwrap();
        let failed = std::fs::read_to_string(dir.path().join("failed.csv")).unwrap();
        assert_eq!(failed, "model,class_count,original_class_count\n");
    }
}
