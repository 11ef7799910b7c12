//! # Storage Module
//!
//! Read access to the capture database written by the interception engine.
//!
//! ## Key Responsibilities
//!
//! - **Connection Management**: one SQLx pool shared by all repositories
//! - **Query Translation**: search terms become OR-combined SQL predicates
//! - **Row Mapping**: columns are mapped onto the shared `RecordMeta` DTO
//!
//! Payload columns are selected through SQL `hex()` and handed to the domain
//! layer still encoded; decoding them is the loader's job.

pub mod connection;
pub mod sqlite;
pub mod traits;

#[cfg(test)]
pub mod test_utils;

pub use connection::DbConnection;
pub use sqlite::RecordRepository;
pub use traits::{EncodedRecord, RecordStorage};
