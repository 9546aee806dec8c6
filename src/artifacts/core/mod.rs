//! Core utilities shared across the reader
//!
//! - `charset`: UTF-8 decoding with a lossy legacy 8-bit fallback

pub mod charset;
