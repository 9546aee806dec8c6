//! Command implementations
//!
//! Commands are split the way Git splits them:
//!
//! - `plumbing`: Low-level inspection of refs and objects (rev-parse, cat-file)
//! - `porcelain`: User-facing refresh workflow (refresh, show, log)
//!
//! Each command is an `impl Repository` block writing to the repository's
//! writer, so tests can capture output with an in-memory buffer.

pub mod plumbing;
pub mod porcelain;
