//! Reference data read by the resolver
//!
//! - `packed_refs`: parser for the consolidated `packed-refs` file

pub mod packed_refs;

use crate::artifacts::objects::object_id::ObjectId;
use serde::{Deserialize, Serialize};

/// Branch name reported when HEAD holds a raw hash
pub const DETACHED_BRANCH: &str = "detached";

/// Commit HEAD points at, and the branch it was reached through
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadRef {
    pub hash: ObjectId,
    pub branch: String,
}

impl HeadRef {
    pub fn is_detached(&self) -> bool {
        self.branch == DETACHED_BRANCH
    }
}
