//! Ground-truth sources

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use crate::core::Model;
use crate::plugins::model_from_notation;

/// Black-box supplier of expected models, keyed by document name
pub trait GroundTruthSource: Send + Sync {
    fn load(&self, document: &str) -> Result<Model>;
}

/// Ground truth stored as files in one directory
///
/// `<document>.json` holds a serialized [`Model`]; when it is absent,
/// `<document>.mmd` is read as class-diagram notation.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn load_json(&self, document: &str, path: &Path) -> Result<Model> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let mut model: Model = serde_json::from_str(&text)
            .with_context(|| format!("Invalid ground-truth model in {}", path.display()))?;
        if model.name().is_empty() {
            model.set_name(document);
        }
        Ok(model)
    }

    fn load_notation(&self, document: &str, path: &Path) -> Result<Model> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let model = model_from_notation(document, &text)
            .with_context(|| format!("Failed to convert {}", path.display()))?;
        Ok(model)
    }
}

impl GroundTruthSource for DirectorySource {
    fn load(&self, document: &str) -> Result<Model> {
        let json = self.root.join(format!("{document}.json"));
        if json.is_file() {
            debug!(document, path = %json.display(), "Loading ground truth");
            return self.load_json(document, &json);
        }

        let notation = self.root.join(format!("{document}.mmd"));
        if notation.is_file() {
            debug!(document, path = %notation.display(), "Converting ground-truth notation");
            return self.load_notation(document, &notation);
        }

        anyhow::bail!(
            "No ground truth for {} in {} (expected {document}.json or {document}.mmd)",
            document,
            self.root.display()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembly::assemble;
    use crate::core::{Fragment, Multiplicity};

    #[test]
    fn test_loads_json() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("Garage.json"),
            r#"{"classes": [{"name": "car", "associations": [
                {"destination": "wheels", "multiplicity": "1..*"}]}]}"#,
        )
        .unwrap();

        let model = DirectorySource::new(dir.path()).load("Garage").unwrap();
        assert_eq!(model.name(), "Garage");
        let car = model.class("Car").unwrap();
        assert_eq!(
            car.associations()[0].triple(),
            ("Car", "Wheels", Multiplicity::OneOrMore)
        );
    }

    #[test]
    fn test_json_destination_only_class_matches_assembly() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("Garage.json"),
            r#"{"classes":[{"name":"Car","associations":[{"destination":"Wheels","multiplicity":"1..*"}]}]}"#,
        )
        .unwrap();

        let truth = DirectorySource::new(dir.path()).load("Garage").unwrap();
        let assembled = assemble(&[Fragment::relationship("Car", "Wheels", Multiplicity::OneOrMore)]);
        assert_eq!(truth, assembled);
        assert_eq!(truth.class_count(), 2);
        assert_eq!(assemble(&Fragment::decompose(&truth)), truth);
    }

    #[test]
    fn test_falls_back_to_notation() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("Garage.mmd"),
            "classDiagram\n  Car --> \"1..*\" Wheels\n",
        )
        .unwrap();

        let model = DirectorySource::new(dir.path()).load("Garage").unwrap();
        assert_eq!(model.class_count(), 2);
    }

    #[test]
    fn test_missing_document() {
        let dir = tempfile::tempdir().unwrap();
        assert!(DirectorySource::new(dir.path()).load("Zoo").is_err());
    }
}
