//! Inflated object bytes with the `<type> <size>\0` header stripped
//!
//! ## Format
//!
//! ```text
//! commit 183\0tree 2d1f...
//! ```
//!
//! Only the first NUL byte matters: everything before it is the header and is
//! kept verbatim as [`RawObject::kind`] for display. The header grammar is not
//! validated.

use crate::errors::GitInfoError;
use bytes::Bytes;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawObject {
    kind: String,
    payload: Bytes,
}

impl RawObject {
    pub fn new(kind: impl Into<String>, payload: Bytes) -> Self {
        RawObject {
            kind: kind.into(),
            payload,
        }
    }

    /// Split inflated loose-object bytes at the first NUL byte
    ///
    /// # Arguments
    ///
    /// * `id` - Object id, used only for error messages
    /// * `inflated` - Output of zlib inflation
    pub fn from_inflated(id: &str, inflated: Bytes) -> Result<Self, GitInfoError> {
        let nul = inflated
            .iter()
            .position(|&b| b == b'\0')
            .ok_or_else(|| GitInfoError::CorruptObject {
                id: id.to_string(),
                reason: "missing object header terminator".to_string(),
            })?;

        let header = String::from_utf8_lossy(&inflated[..nul]);
        let kind = header.split(' ').next().unwrap_or_default().to_string();

        Ok(RawObject {
            kind,
            payload: inflated.slice(nul + 1..),
        })
    }

    /// Object type word from the header, e.g. `commit`
    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn payload(&self) -> &Bytes {
        &self.payload
    }
}
