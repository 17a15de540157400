/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// Profiles are keyed by the identity provider's subject UUID.
pub type ProfileId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
