//! Git object types
//!
//! Objects are stored zlib-compressed in the `<type> <size>\0<content>`
//! format. The reader works with:
//!
//! - `object_id`: validated 40-hex identifiers
//! - `raw_object`: inflated bytes with the header stripped
//! - `commit`: commit text and the fields derived from it

pub mod commit;
pub mod object_id;
pub mod raw_object;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;
