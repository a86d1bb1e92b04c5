//! JSON rule file reader.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use tracing::{debug, info};

use crate::domain::{Rule, RuleStore};
use crate::error::StoreError;
use crate::port::{LoadOutcome, RuleSource};

/// Rule table stored as a JSON array of rule records.
#[derive(Debug, Clone)]
pub struct JsonRuleFile {
    path: PathBuf,
}

impl JsonRuleFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Parse a rule table from JSON text.
    pub fn parse(&self, content: &str) -> Result<RuleStore, StoreError> {
        let rules: Vec<Rule> =
            serde_json::from_str(content).map_err(|e| StoreError::DataFormat {
                path: self.path.clone(),
                reason: e.to_string(),
            })?;

        RuleStore::try_new(rules).map_err(|(row, source)| StoreError::InvalidRow {
            path: self.path.clone(),
            row,
            source,
        })
    }
}

impl RuleSource for JsonRuleFile {
    fn location(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<LoadOutcome, StoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "Rules file not found");
                return Ok(LoadOutcome::Absent);
            }
            Err(source) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let store = self.parse(&content)?;
        info!(path = %self.path.display(), rules = store.len(), "Loaded rules");
        Ok(LoadOutcome::Present(store))
    }

    fn fingerprint(&self) -> Result<Option<SystemTime>, StoreError> {
        match fs::metadata(&self.path) {
            Ok(meta) => meta.modified().map(Some).map_err(|source| StoreError::Read {
                path: self.path.clone(),
                source,
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Read {
                path: self.path.clone(),
                source,
            }),
        }
    }
}
