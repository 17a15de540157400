//! Profile entity model and DTOs.

use buildmatch_core::status::{ProfileRole, StatusId, SubscriptionStatus};
use buildmatch_core::types::{ProfileId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `profiles` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Profile {
    pub id: ProfileId,
    pub role_id: StatusId,
    pub subscription_status_id: StatusId,
    pub external_customer_id: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Profile {
    /// The profile's role, or `None` if the row holds an unknown id.
    pub fn role(&self) -> Option<ProfileRole> {
        ProfileRole::from_id(self.role_id)
    }

    /// The local subscription flag, or `None` for an unknown id.
    pub fn subscription_status(&self) -> Option<SubscriptionStatus> {
        SubscriptionStatus::from_id(self.subscription_status_id)
    }

    /// Whether the profile currently has paid access.
    pub fn has_active_subscription(&self) -> bool {
        self.subscription_status() == Some(SubscriptionStatus::Active)
    }
}

/// DTO for creating a profile on first role selection.
#[derive(Debug, Clone)]
pub struct CreateProfile {
    pub id: ProfileId,
    pub role: ProfileRole,
}
