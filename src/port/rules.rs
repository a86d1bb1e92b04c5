//! Rule table source port.

use std::path::Path;
use std::time::SystemTime;

use crate::domain::RuleStore;
use crate::error::StoreError;

/// Result of reading the rule artifact.
///
/// A missing artifact is an expected outcome, kept distinct from a present
/// but empty table.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    Present(RuleStore),
    Absent,
}

/// Read access to a persisted rule table.
pub trait RuleSource: Send + Sync {
    /// Where the artifact lives, for messages.
    fn location(&self) -> &Path;

    /// Read and validate the full table.
    fn load(&self) -> Result<LoadOutcome, StoreError>;

    /// Cheap change marker for the artifact, `None` when it does not exist.
    ///
    /// Caches compare successive fingerprints to decide whether to reload.
    fn fingerprint(&self) -> Result<Option<SystemTime>, StoreError>;
}
