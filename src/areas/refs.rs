//! Git references (HEAD, branches, tags)
//!
//! References are human-readable names pointing to commits. The reader only
//! follows them, it never writes them.
//!
//! ## Reference Types
//!
//! - HEAD: Special reference pointing to the current branch or commit
//! - Branches: refs/heads/* pointing to branch tip commits
//! - Tags: refs/tags/* pointing to tagged commits
//!
//! ## File Format
//!
//! References are stored as text files containing either:
//! - A 40-character SHA-1 hash (direct reference)
//! - `ref: <path>` for symbolic references
//!
//! Refs that have been consolidated by `git pack-refs` live in `packed-refs`
//! instead of their own file.

use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::refs::packed_refs::PackedRefs;
use crate::artifacts::refs::{DETACHED_BRANCH, HeadRef};
use crate::errors::GitInfoError;
use derive_new::new;
use std::path::{Component, Path};
use walkdir::WalkDir;

/// Git references reader
#[derive(Debug, new)]
pub struct Refs {
    /// Path to the git directory (typically `.git`)
    path: Box<Path>,
}

/// Prefix of symbolic reference contents
const SYMREF_PREFIX: &str = "ref: ";

/// Name of the HEAD reference
pub const HEAD_REF_NAME: &str = "HEAD";

/// Name of the consolidated refs file
pub const PACKED_REFS_NAME: &str = "packed-refs";

/// Symbolic refs pointing at symbolic refs are followed this many times
const MAX_SYMREF_DEPTH: usize = 5;

/// Contents of a ref file
#[derive(Debug, Clone, PartialEq)]
enum SymRefOrOid<'c> {
    /// Symbolic reference pointing to another ref
    SymRef { ref_path: &'c str },
    /// Direct object ID, not yet validated
    Oid(&'c str),
}

impl<'c> SymRefOrOid<'c> {
    fn parse(content: &'c str) -> Self {
        let content = content.trim();

        match content.strip_prefix(SYMREF_PREFIX) {
            Some(ref_path) => SymRefOrOid::SymRef {
                ref_path: ref_path.trim(),
            },
            None => SymRefOrOid::Oid(content),
        }
    }
}

impl Refs {
    /// Resolve HEAD to a commit id and branch name
    ///
    /// A symbolic HEAD reports the last segment of its ref path as the branch
    /// (`refs/heads/feature/login` gives `login`); a raw hash reports
    /// `detached`.
    pub fn resolve_head(&self) -> Result<HeadRef, GitInfoError> {
        if !self.path.is_dir() {
            return Err(GitInfoError::RepoNotFound(self.path.to_path_buf()));
        }

        let head_path = self.head_path();
        let content =
            std::fs::read_to_string(&head_path).map_err(|source| GitInfoError::MissingHead {
                path: head_path.to_path_buf(),
                source,
            })?;

        match SymRefOrOid::parse(&content) {
            SymRefOrOid::SymRef { ref_path } => {
                let branch = ref_path.rsplit('/').next().unwrap_or(ref_path).to_string();
                let hash = self.read_ref(ref_path)?;
                tracing::debug!("HEAD -> {} -> {}", ref_path, hash);

                Ok(HeadRef { hash, branch })
            }
            SymRefOrOid::Oid(raw) => {
                let hash = ObjectId::try_parse(raw)?;
                tracing::debug!("HEAD is detached at {}", hash);

                Ok(HeadRef {
                    hash,
                    branch: DETACHED_BRANCH.to_string(),
                })
            }
        }
    }

    /// Read the object id a ref path (e.g. `refs/heads/main`) points to
    ///
    /// Looks for a loose ref file first and falls back to `packed-refs`.
    pub fn read_ref(&self, ref_path: &str) -> Result<ObjectId, GitInfoError> {
        self.read_ref_at_depth(ref_path, 0)
    }

    fn read_ref_at_depth(&self, ref_path: &str, depth: usize) -> Result<ObjectId, GitInfoError> {
        if depth > MAX_SYMREF_DEPTH || !Self::is_contained(ref_path) {
            return Err(GitInfoError::DanglingRef(ref_path.to_string()));
        }

        let loose_path = self.path.join(ref_path);
        if loose_path.is_file() {
            let content = std::fs::read_to_string(&loose_path)?;

            return match SymRefOrOid::parse(&content) {
                SymRefOrOid::Oid(raw) => ObjectId::try_parse(raw),
                SymRefOrOid::SymRef { ref_path: target } => {
                    self.read_ref_at_depth(target, depth + 1)
                }
            };
        }

        tracing::debug!("{} is not a loose ref, checking {}", ref_path, PACKED_REFS_NAME);
        match self.packed_refs()?.find(ref_path) {
            Some(raw) => ObjectId::try_parse(raw),
            None => Err(GitInfoError::DanglingRef(ref_path.to_string())),
        }
    }

    /// Parsed `packed-refs`; a missing file is an empty set
    pub fn packed_refs(&self) -> Result<PackedRefs, GitInfoError> {
        let packed_refs_path = self.packed_refs_path();
        if !packed_refs_path.is_file() {
            return Ok(PackedRefs::default());
        }

        let content = std::fs::read_to_string(packed_refs_path)?;
        Ok(PackedRefs::parse(&content))
    }

    /// Names of the regular files directly under `refs/tags`, sorted
    ///
    /// A repository without a tags directory simply has no tags.
    pub fn list_tags(&self) -> Result<Vec<String>, GitInfoError> {
        let tags_path = self.tags_path();
        if !tags_path.is_dir() {
            return Ok(Vec::new());
        }

        let mut tags = Vec::new();
        for entry in WalkDir::new(&tags_path).min_depth(1).max_depth(1) {
            let entry = entry.map_err(|err| GitInfoError::Io(err.into()))?;
            if entry.path().is_file() {
                tags.push(entry.file_name().to_string_lossy().to_string());
            }
        }
        tags.sort();

        Ok(tags)
    }

    /// Lexicographically greatest tag name, or `""` when there are none
    ///
    /// This is plain string order: `v1.10` sorts before `v1.9`.
    pub fn latest_tag(&self) -> Result<String, GitInfoError> {
        Ok(self.list_tags()?.pop().unwrap_or_default())
    }

    // ref paths come from file contents and must stay inside the git directory
    fn is_contained(ref_path: &str) -> bool {
        !ref_path.is_empty()
            && Path::new(ref_path)
                .components()
                .all(|component| matches!(component, Component::Normal(_)))
    }

    pub fn head_path(&self) -> Box<Path> {
        self.path.join(HEAD_REF_NAME).into_boxed_path()
    }

    pub fn refs_path(&self) -> Box<Path> {
        self.path.join("refs").into_boxed_path()
    }

    pub fn tags_path(&self) -> Box<Path> {
        self.refs_path().join("tags").into_boxed_path()
    }

    pub fn packed_refs_path(&self) -> Box<Path> {
        self.path.join(PACKED_REFS_NAME).into_boxed_path()
    }
}
