//! Git data structures
//!
//! This module contains the types the reader produces and consumes:
//!
//! - `core`: Shared utilities (charset fallback decoding)
//! - `objects`: Object ids, raw objects and commit text parsing
//! - `pack`: Pack backend seam for non-loose objects
//! - `refresh`: Refresh results and stored records
//! - `refs`: HEAD resolution results and the packed-refs parser

pub mod core;
pub mod objects;
pub mod pack;
pub mod refresh;
pub mod refs;
