//! Object database reader
//!
//! Loose objects are read from `objects/<aa>/<38-hex>` and zlib-inflated.
//! Anything without a loose file is handed to the configured pack backend.

use crate::artifacts::core::charset::{ByteFrequencyDetector, CharsetDetector, decode_text};
use crate::artifacts::objects::commit::CommitText;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::raw_object::RawObject;
use crate::artifacts::pack::PackBackend;
use crate::errors::GitInfoError;
use bytes::Bytes;
use flate2::{Decompress, FlushDecompress, Status};
use sha1::{Digest, Sha1};
use std::path::{Path, PathBuf};

pub struct Database {
    /// Path to the objects directory (typically `.git/objects`)
    path: Box<Path>,
    pack_backend: Option<Box<dyn PackBackend>>,
    charset_detector: Box<dyn CharsetDetector>,
    verify_objects: bool,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database {
            path,
            pack_backend: None,
            charset_detector: Box::new(ByteFrequencyDetector),
            verify_objects: false,
        }
    }

    pub fn with_pack_backend(mut self, backend: Box<dyn PackBackend>) -> Self {
        self.pack_backend = Some(backend);
        self
    }

    pub fn with_charset_detector(mut self, detector: Box<dyn CharsetDetector>) -> Self {
        self.charset_detector = detector;
        self
    }

    /// Check that loose objects hash to their id before trusting them
    pub fn with_verification(mut self, verify_objects: bool) -> Self {
        self.verify_objects = verify_objects;
        self
    }

    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    /// Read an object and decode its payload as text
    pub fn read_object(&self, object_id: &ObjectId) -> Result<CommitText, GitInfoError> {
        let object = self.load(object_id)?;
        let text = decode_text(object.payload(), self.charset_detector.as_ref());

        Ok(CommitText::new(text))
    }

    /// Same as [`Database::read_object`] for an unvalidated id
    ///
    /// The id is checked before anything is read from disk.
    pub fn read_object_str(&self, object_id: &str) -> Result<CommitText, GitInfoError> {
        self.read_object(&ObjectId::try_parse(object_id)?)
    }

    /// Load an object's header-stripped bytes
    pub fn load(&self, object_id: &ObjectId) -> Result<RawObject, GitInfoError> {
        let object_path = self.path.join(object_id.to_path());

        if object_path.exists() {
            tracing::debug!("reading loose object {}", object_path.display());
            let inflated = self.read_loose(object_id, &object_path)?;
            return RawObject::from_inflated(object_id.as_str(), inflated);
        }

        match &self.pack_backend {
            Some(backend) => {
                tracing::debug!("object {} is not loose, asking pack backend", object_id);
                backend
                    .read(object_id)?
                    .ok_or_else(|| GitInfoError::ObjectNotFound(object_id.to_string()))
            }
            None => {
                tracing::warn!(
                    "object {} is not loose and {} pack file(s) cannot be read without a pack backend",
                    object_id,
                    self.pack_files().map(|packs| packs.len()).unwrap_or_default()
                );
                Err(GitInfoError::PackObjectUnsupported(object_id.to_string()))
            }
        }
    }

    /// Pack files present under `objects/pack`
    pub fn pack_files(&self) -> Result<Vec<PathBuf>, GitInfoError> {
        let pack_dir = self.path.join("pack");
        if !pack_dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut packs = Vec::new();
        for entry in std::fs::read_dir(&pack_dir)? {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "pack") {
                packs.push(path);
            }
        }
        packs.sort();

        Ok(packs)
    }

    fn read_loose(&self, object_id: &ObjectId, object_path: &Path) -> Result<Bytes, GitInfoError> {
        let object_content = std::fs::read(object_path)?;
        let inflated = Self::decompress(object_id, object_content.into())?;

        if self.verify_objects {
            Self::verify_checksum(object_id, &inflated)?;
        }

        Ok(inflated)
    }

    fn decompress(object_id: &ObjectId, data: Bytes) -> Result<Bytes, GitInfoError> {
        let corrupt = |reason: String| GitInfoError::CorruptObject {
            id: object_id.to_string(),
            reason,
        };

        // a truncated stream never reaches StreamEnd, so drive the inflater by hand
        let mut inflater = Decompress::new(true);
        let mut inflated = Vec::with_capacity(data.len().saturating_mul(4).max(64));
        loop {
            let consumed = inflater.total_in() as usize;
            let produced = inflated.len();
            // Finish requires the whole output to fit in one call
            let status = inflater
                .decompress_vec(&data[consumed..], &mut inflated, FlushDecompress::None)
                .map_err(|err| corrupt(format!("unable to decompress object content: {}", err)))?;

            match status {
                Status::StreamEnd => return Ok(inflated.into()),
                _ if inflated.len() == inflated.capacity() => {
                    inflated.reserve(inflated.capacity());
                }
                _ if inflater.total_in() as usize == consumed && inflated.len() == produced => {
                    return Err(corrupt("truncated object content".to_string()));
                }
                _ => {}
            }
        }
    }

    fn verify_checksum(object_id: &ObjectId, inflated: &[u8]) -> Result<(), GitInfoError> {
        let mut hasher = Sha1::new();
        hasher.update(inflated);
        let actual = format!("{:x}", hasher.finalize());

        if actual != object_id.as_str() {
            return Err(GitInfoError::CorruptObject {
                id: object_id.to_string(),
                reason: format!("content hashes to {}", actual),
            });
        }

        Ok(())
    }
}
