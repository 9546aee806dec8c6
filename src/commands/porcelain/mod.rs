//! Porcelain commands (user-facing refresh workflow)
//!
//! ## Commands
//!
//! - `refresh`: Read HEAD and record it unless it is unchanged
//! - `show`: Read HEAD and print everything derived from it, without recording
//! - `log`: List recorded refreshes, newest first

pub mod log;
pub mod refresh;
pub mod show;
