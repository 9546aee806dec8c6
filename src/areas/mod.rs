//! Core repository components
//!
//! This module contains the parts of a `.git` directory the reader touches:
//!
//! - `database`: Object database reader for loose and packed objects
//! - `refs`: HEAD, branch, packed-refs and tag resolution
//! - `repository`: Refresh orchestration over the other areas
//! - `history`: Record store used to detect unchanged refreshes

pub mod database;
pub mod history;
pub mod refs;
pub mod repository;
