//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async data-access
//! methods. Reads and standalone writes take `&PgPool`; writes that must
//! join a caller's transaction take `&mut PgConnection`.

pub mod fulfiller_profile_repo;
pub mod profile_repo;
pub mod project_repo;
pub mod project_request_repo;
pub mod recommendation_repo;

pub use fulfiller_profile_repo::FulfillerProfileRepo;
pub use profile_repo::ProfileRepo;
pub use project_repo::ProjectRepo;
pub use project_request_repo::ProjectRequestRepo;
pub use recommendation_repo::RecommendationRepo;
