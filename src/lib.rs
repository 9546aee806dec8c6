//! Read-only git object-store reader
//!
//! Resolves HEAD of a `.git` directory, inflates the commit it points at and
//! derives a [`RefreshResult`](artifacts::refresh::RefreshResult): hash,
//! branch, commit date, title, description and latest release tag.
//!
//! ```no_run
//! use git_info::areas::repository::Repository;
//! use std::path::Path;
//!
//! let repository = Repository::new(Path::new("/srv/app/.git"), Box::new(std::io::sink()));
//! let result = repository.refresh("+0800")?;
//! println!("{} {}", result.hash, result.title);
//! # Ok::<(), git_info::errors::GitInfoError>(())
//! ```

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod config;
pub mod errors;
