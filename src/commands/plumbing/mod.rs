//! Plumbing commands (low-level inspection)
//!
//! ## Commands
//!
//! - `rev-parse`: Print the commit HEAD resolves to and its branch
//! - `cat-file`: Print the decoded payload of an object

pub mod cat_file;
pub mod rev_parse;
