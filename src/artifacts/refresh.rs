//! Records produced by a refresh

use crate::artifacts::objects::commit::CommitText;
use crate::artifacts::objects::object_id::ObjectId;
use chrono::{DateTime, FixedOffset, Utc};
use derive_new::new;
use serde::{Deserialize, Serialize};

/// Everything read for HEAD in one refresh
///
/// Built fresh on every call and handed to the caller, which decides whether
/// to keep it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshResult {
    pub hash: ObjectId,
    pub branch: String,
    pub commit_text: CommitText,
    pub commit_date: DateTime<FixedOffset>,
    pub title: String,
    pub description: String,
    pub release_tag: String,
}

/// A stored refresh, stamped with the wall-clock time it was recorded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct RefreshRecord {
    #[serde(flatten)]
    pub result: RefreshResult,
    pub recorded_at: DateTime<Utc>,
}

impl RefreshRecord {
    pub fn now(result: RefreshResult) -> Self {
        Self::new(result, Utc::now())
    }
}
