use crate::areas::database::Database;
use crate::areas::history::RefreshHistory;
use crate::areas::refs::Refs;
use crate::artifacts::objects::commit::CommitInfo;
use crate::artifacts::refresh::{RefreshRecord, RefreshResult};
use crate::config::Config;
use crate::errors::GitInfoError;
use std::cell::{RefCell, RefMut};
use std::path::Path;

/// Read-only view of one `.git` directory
///
/// Holds no state between calls besides the configured paths; every
/// [`Repository::refresh`] re-reads HEAD, the commit object and the tags.
pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    database: Database,
    refs: Refs,
}

impl Repository {
    pub fn new(git_dir: &Path, writer: Box<dyn std::io::Write>) -> Self {
        let database = Database::new(git_dir.join("objects").into_boxed_path());
        Self::with_database(git_dir, database, writer)
    }

    pub fn with_database(
        git_dir: &Path,
        database: Database,
        writer: Box<dyn std::io::Write>,
    ) -> Self {
        Repository {
            path: git_dir.to_path_buf().into_boxed_path(),
            writer: RefCell::new(writer),
            database,
            refs: Refs::new(git_dir.to_path_buf().into_boxed_path()),
        }
    }

    /// Build a repository for the configured git directory
    ///
    /// With the `git2` feature enabled, pack-resident objects are read through
    /// libgit2; otherwise they are reported as unsupported.
    pub fn from_config(config: &Config, writer: Box<dyn std::io::Write>) -> Self {
        let database = Database::new(config.git_dir.join("objects").into_boxed_path())
            .with_verification(config.verify_objects);

        #[cfg(feature = "git2")]
        let database = match crate::artifacts::pack::git2_backend::Git2PackBackend::open(
            &config.git_dir,
        ) {
            Ok(backend) => database.with_pack_backend(Box::new(backend)),
            Err(err) => {
                tracing::warn!("pack backend unavailable: {}", err);
                database
            }
        };

        Self::with_database(&config.git_dir, database, writer)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    /// Read HEAD's commit and derive its record
    ///
    /// Resolve HEAD, read the commit object, parse it, then look up the
    /// latest tag. The first failing stage aborts the refresh with its error.
    ///
    /// # Arguments
    ///
    /// * `tz_override` - Configured timezone (`±HHMM`), empty to use the
    ///   author's own offset
    pub fn refresh(&self, tz_override: &str) -> Result<RefreshResult, GitInfoError> {
        tracing::info!("refreshing git info from {}", self.path.display());

        let head = self.refs.resolve_head()?;
        let commit_text = self.database.read_object(&head.hash)?;
        let info = CommitInfo::parse(&commit_text, tz_override)?;
        let release_tag = self.refs.latest_tag()?;

        tracing::debug!(
            "HEAD {} on {} dated {} tagged {:?}",
            head.hash,
            head.branch,
            info.commit_date,
            release_tag
        );

        Ok(RefreshResult {
            hash: head.hash,
            branch: head.branch,
            commit_text,
            commit_date: info.commit_date,
            title: info.title,
            description: info.description,
            release_tag,
        })
    }

    /// Refresh and append the result to `history`
    ///
    /// Fails with `NoChange` when HEAD still points at the most recently
    /// recorded commit; nothing is appended in that case. The comparison
    /// happens inside the store so a locked store checks and writes at once.
    pub fn track(
        &self,
        history: &mut dyn RefreshHistory,
        tz_override: &str,
    ) -> Result<RefreshRecord, GitInfoError> {
        let record = RefreshRecord::now(self.refresh(tz_override)?);

        match history.append_if_changed(record.clone()) {
            Err(GitInfoError::NoChange(hash)) => {
                tracing::info!("HEAD is still at {}, skipping", hash);
                Err(GitInfoError::NoChange(hash))
            }
            Err(err) => Err(err),
            Ok(()) => {
                tracing::info!("recorded {} on {}", record.result.hash, record.result.branch);
                Ok(record)
            }
        }
    }
}
