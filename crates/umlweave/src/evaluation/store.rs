//! Fragment persistence
//!
//! One JSON file per fragment, named `<key>.json`, so that documents can be
//! extracted in one run and assembled in another.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, trace};

use crate::assembly::group_by_document;
use crate::core::{Fragment, FragmentKey};

/// Directory of persisted fragments
#[derive(Debug, Clone)]
pub struct FragmentStore {
    dir: PathBuf,
}

impl FragmentStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write one fragment, replacing any fragment stored under the same key
    pub fn save(&self, key: &FragmentKey, fragment: &Fragment) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create {}", self.dir.display()))?;
        let path = self.dir.join(format!("{key}.json"));
        let json = serde_json::to_string_pretty(fragment)?;
        std::fs::write(&path, json)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        trace!(%key, path = %path.display(), "Stored fragment");
        Ok(path)
    }

    pub fn save_all<'a>(
        &self,
        fragments: impl IntoIterator<Item = &'a (FragmentKey, Fragment)>,
    ) -> Result<usize> {
        let mut count = 0;
        for (key, fragment) in fragments {
            self.save(key, fragment)?;
            count += 1;
        }
        debug!(count, dir = %self.dir.display(), "Stored fragments");
        Ok(count)
    }

    /// Every stored fragment with its key, sorted by key
    ///
    /// Keys are returned as written; they are validated when grouped.
    pub fn load_all(&self) -> Result<Vec<(String, Fragment)>> {
        let entries = std::fs::read_dir(&self.dir)
            .with_context(|| format!("Failed to read {}", self.dir.display()))?;

        let mut fragments = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Some(key) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let fragment: Fragment = serde_json::from_str(&text)
                .with_context(|| format!("Invalid fragment in {}", path.display()))?;
            fragments.push((key.to_string(), fragment));
        }
        fragments.sort_by(|a, b| a.0.cmp(&b.0));
        debug!(count = fragments.len(), dir = %self.dir.display(), "Loaded fragments");
        Ok(fragments)
    }

    /// Stored fragments grouped by document
    pub fn load_grouped(&self) -> Result<BTreeMap<String, Vec<Fragment>>> {
        Ok(group_by_document(self.load_all()?)?)
    }
}
