//! Pack-resident objects
//!
//! Objects that are not stored loose live inside `objects/pack/*.pack`. The
//! reader does not parse pack indexes itself; it delegates to a
//! [`PackBackend`] when one is configured and otherwise reports the object as
//! unsupported.

#[cfg(feature = "git2")]
pub mod git2_backend;

use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::raw_object::RawObject;
use crate::errors::GitInfoError;

/// Resolves objects that have no loose file
pub trait PackBackend {
    /// Return the object's header-stripped bytes, or `None` if the backend
    /// does not know the object
    fn read(&self, id: &ObjectId) -> Result<Option<RawObject>, GitInfoError>;
}

impl<F> PackBackend for F
where
    F: Fn(&ObjectId) -> Result<Option<RawObject>, GitInfoError>,
{
    fn read(&self, id: &ObjectId) -> Result<Option<RawObject>, GitInfoError> {
        self(id)
    }
}
