use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::raw_object::RawObject;
use crate::artifacts::pack::PackBackend;
use crate::errors::GitInfoError;
use bytes::Bytes;
use std::path::Path;

/// Pack backend that reads through libgit2's object database
pub struct Git2PackBackend {
    repo: git2::Repository,
}

impl Git2PackBackend {
    pub fn open(git_dir: &Path) -> Result<Self, GitInfoError> {
        let repo = git2::Repository::open(git_dir).map_err(to_io_error)?;
        Ok(Git2PackBackend { repo })
    }
}

impl PackBackend for Git2PackBackend {
    fn read(&self, id: &ObjectId) -> Result<Option<RawObject>, GitInfoError> {
        let oid = git2::Oid::from_str(id.as_str())
            .map_err(|_| GitInfoError::InvalidHash(id.to_string()))?;
        let odb = self.repo.odb().map_err(to_io_error)?;

        match odb.read(oid) {
            Ok(object) => Ok(Some(RawObject::new(
                object.kind().str(),
                Bytes::copy_from_slice(object.data()),
            ))),
            Err(err) if err.code() == git2::ErrorCode::NotFound => Ok(None),
            Err(err) => Err(to_io_error(err)),
        }
    }
}

fn to_io_error(err: git2::Error) -> GitInfoError {
    GitInfoError::Io(std::io::Error::other(err))
}
