//! Refresh history
//!
//! Stores the records produced by successive refreshes so a repeated refresh
//! of an unchanged repository can be rejected. "Most recent" always means the
//! last record appended.

use crate::artifacts::refresh::RefreshRecord;
use crate::errors::GitInfoError;
use file_guard::Lock;
use std::io::{Read, Seek, SeekFrom, Write};
use std::ops::DerefMut;
use std::path::Path;

pub trait RefreshHistory {
    /// All records, oldest first
    fn records(&self) -> Result<Vec<RefreshRecord>, GitInfoError>;

    fn append(&mut self, record: RefreshRecord) -> Result<(), GitInfoError>;

    fn latest(&self) -> Result<Option<RefreshRecord>, GitInfoError> {
        Ok(self.records()?.pop())
    }

    /// Append `record` unless the latest record already has its hash
    ///
    /// Stores shared between processes must check and write under one lock.
    fn append_if_changed(&mut self, record: RefreshRecord) -> Result<(), GitInfoError> {
        if let Some(latest) = self.latest()? {
            ensure_changed(&latest, &record)?;
        }
        self.append(record)
    }
}

fn ensure_changed(latest: &RefreshRecord, record: &RefreshRecord) -> Result<(), GitInfoError> {
    if latest.result.hash == record.result.hash {
        return Err(GitInfoError::NoChange(record.result.hash.to_string()));
    }
    Ok(())
}

#[derive(Debug, Default)]
pub struct MemoryHistory {
    records: Vec<RefreshRecord>,
}

impl RefreshHistory for MemoryHistory {
    fn records(&self) -> Result<Vec<RefreshRecord>, GitInfoError> {
        Ok(self.records.clone())
    }

    fn append(&mut self, record: RefreshRecord) -> Result<(), GitInfoError> {
        self.records.push(record);
        Ok(())
    }
}

/// History kept as a pretty-printed JSON array on disk
#[derive(Debug)]
pub struct JsonHistory {
    path: Box<Path>,
}

impl JsonHistory {
    pub fn new(path: Box<Path>) -> Self {
        JsonHistory { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parse(&self, content: &str) -> Result<Vec<RefreshRecord>, GitInfoError> {
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(content).map_err(|err| {
            GitInfoError::History(format!("unable to parse {}: {}", self.path.display(), err))
        })
    }

    /// Read, modify and rewrite the file while holding an exclusive lock
    ///
    /// Nothing is written when `update` fails.
    fn update_locked<F>(&self, update: F) -> Result<(), GitInfoError>
    where
        F: FnOnce(&mut Vec<RefreshRecord>) -> Result<(), GitInfoError>,
    {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let mut history_file = std::fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&self.path)?;
        let mut lock = file_guard::lock(&mut history_file, Lock::Exclusive, 0, 1)?;

        let mut content = String::new();
        lock.deref_mut().read_to_string(&mut content)?;
        let mut records = self.parse(&content)?;
        update(&mut records)?;

        let serialized = serde_json::to_string_pretty(&records)
            .map_err(|err| GitInfoError::History(format!("unable to serialize history: {}", err)))?;

        lock.set_len(0)?;
        lock.deref_mut().seek(SeekFrom::Start(0))?;
        lock.deref_mut().write_all(serialized.as_bytes())?;

        tracing::debug!(
            "saved {} record(s) to {}",
            records.len(),
            self.path.display()
        );
        Ok(())
    }
}

impl RefreshHistory for JsonHistory {
    fn records(&self) -> Result<Vec<RefreshRecord>, GitInfoError> {
        if !self.path.exists() {
            tracing::debug!("history file {} not found, starting empty", self.path.display());
            return Ok(Vec::new());
        }

        let content = std::fs::read_to_string(&self.path)?;
        self.parse(&content)
    }

    fn append(&mut self, record: RefreshRecord) -> Result<(), GitInfoError> {
        self.update_locked(|records| {
            records.push(record);
            Ok(())
        })
    }

    fn append_if_changed(&mut self, record: RefreshRecord) -> Result<(), GitInfoError> {
        self.update_locked(|records| {
            if let Some(latest) = records.last() {
                ensure_changed(latest, &record)?;
            }
            records.push(record);
            Ok(())
        })
    }
}
