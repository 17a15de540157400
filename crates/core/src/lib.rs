//! Domain types, error taxonomy, and pure business rules for buildmatch.
//!
//! Nothing in this crate touches the database or the network. The `db`,
//! `engine`, and `api` crates build on these rules.

pub mod billing;
pub mod brief;
pub mod error;
pub mod lifecycle;
pub mod matching;
pub mod profile;
pub mod status;
pub mod types;
