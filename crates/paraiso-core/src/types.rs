use serde::{Deserialize, Serialize};

/// Intent bucket used when a record carries no intent tag.
pub const FALLBACK_INTENT: &str = "general";

/// A single question/answer pair from the FAQ dataset.
///
/// Fields are not validated on load. Absent text fields deserialize as empty
/// strings and an absent id as `0`, so a sloppy dataset still loads.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqRecord {
    #[serde(default)]
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intent: Option<String>,
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub response: String,
}

impl FaqRecord {
    /// Whether this record is tagged with exactly `intent`.
    pub fn has_intent(&self, intent: &str) -> bool {
        self.intent.as_deref() == Some(intent)
    }

    /// The intent used for aggregation, with untagged records grouped under
    /// [`FALLBACK_INTENT`].
    pub fn intent_or_fallback(&self) -> &str {
        self.intent.as_deref().unwrap_or(FALLBACK_INTENT)
    }
}
