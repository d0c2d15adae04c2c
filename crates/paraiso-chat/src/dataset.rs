//! FAQ dataset store.
//!
//! Loaded once from a JSON array at startup and read-only afterwards, so it is
//! shared between handlers behind an `Arc` without any locking.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use paraiso_core::error::{ParaisoError, Result};
use paraiso_core::types::FaqRecord;

/// Number of records tagged with one intent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentCount {
    pub intent: String,
    pub count: usize,
}

/// Immutable, ordered list of FAQ records.
#[derive(Debug, Clone, Default)]
pub struct FaqDataset {
    records: Vec<FaqRecord>,
}

impl FaqDataset {
    /// Wrap an already-loaded list of records.
    pub fn from_records(records: Vec<FaqRecord>) -> Self {
        Self { records }
    }

    /// Load the dataset from a JSON file.
    ///
    /// A missing file yields an empty dataset. Invalid JSON is a
    /// `Serialization` error. Valid JSON that is not an array of records is a
    /// `Dataset` error.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            warn!(path = %path.display(), "Dataset file not found, starting with no FAQ records");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let value: serde_json::Value = serde_json::from_str(&content)?;
        if !value.is_array() {
            return Err(ParaisoError::Dataset(format!(
                "{}: expected a JSON array of FAQ records",
                path.display()
            )));
        }
        let records: Vec<FaqRecord> = serde_json::from_value(value)?;

        info!(path = %path.display(), records = records.len(), "FAQ dataset loaded");
        Ok(Self { records })
    }

    /// Load the dataset, degrading to an empty one on any error.
    pub fn load_or_empty(path: &Path) -> Self {
        match Self::load(path) {
            Ok(dataset) => dataset,
            Err(e) => {
                warn!(
                    "Failed to load dataset from {}: {}. Starting empty.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    pub fn records(&self) -> &[FaqRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records tagged with `intent`, in dataset order.
    pub fn by_intent(&self, intent: &str) -> Vec<FaqRecord> {
        self.records
            .iter()
            .filter(|r| r.has_intent(intent))
            .cloned()
            .collect()
    }

    /// First record with the given id.
    pub fn find_by_id(&self, id: i64) -> Option<&FaqRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Distinct intents with their record counts, in order of first appearance.
    ///
    /// Untagged records are counted under the fallback intent.
    pub fn intent_counts(&self) -> Vec<IntentCount> {
        let mut counts: Vec<IntentCount> = Vec::new();
        for record in &self.records {
            let intent = record.intent_or_fallback();
            match counts.iter_mut().find(|c| c.intent == intent) {
                Some(entry) => entry.count += 1,
                None => counts.push(IntentCount {
                    intent: intent.to_string(),
                    count: 1,
                }),
            }
        }
        counts
    }
}
