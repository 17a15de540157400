//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - `Deserialize`/plain input DTOs for inserts and upserts
//! - Read-model structs for joined listings where needed

pub mod fulfiller_profile;
pub mod profile;
pub mod project;
pub mod project_request;
pub mod recommendation;
