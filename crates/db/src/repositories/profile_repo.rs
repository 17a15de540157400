//! Repository for the `profiles` table.
//!
//! Subscription columns are written only by the billing reconciler; both
//! writers set absolute values so replayed events are harmless.

use buildmatch_core::status::SubscriptionStatus;
use buildmatch_core::types::ProfileId;
use sqlx::{PgConnection, PgPool};

use crate::models::profile::{CreateProfile, Profile};

/// Column list for the `profiles` table.
const COLUMNS: &str =
    "id, role_id, subscription_status_id, external_customer_id, created_at, updated_at";

/// Provides data access for profiles.
pub struct ProfileRepo;

impl ProfileRepo {
    /// Insert a profile with an inactive subscription.
    ///
    /// Returns `None` if a profile with this id already exists.
    pub async fn create(
        pool: &PgPool,
        input: &CreateProfile,
    ) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!(
            "INSERT INTO profiles (id, role_id, subscription_status_id) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (id) DO NOTHING \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Profile>(&query)
            .bind(input.id)
            .bind(input.role.id())
            .bind(SubscriptionStatus::Inactive.id())
            .fetch_optional(pool)
            .await
    }

    /// Find a profile by its identity.
    pub async fn find_by_id(pool: &PgPool, id: ProfileId) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM profiles WHERE id = $1");
        sqlx::query_as::<_, Profile>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a profile inside a caller's transaction, holding a share lock on
    /// the row until it ends.
    pub async fn find_by_id_for_share(
        conn: &mut PgConnection,
        id: ProfileId,
    ) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM profiles WHERE id = $1 FOR SHARE");
        sqlx::query_as::<_, Profile>(&query)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
    }

    /// Mark a profile active after checkout and link the billing customer.
    ///
    /// A missing `customer_id` keeps whatever link is already stored.
    /// Returns the number of profiles updated (0 or 1).
    pub async fn activate_checkout(
        pool: &PgPool,
        id: ProfileId,
        customer_id: Option<&str>,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE profiles \
             SET subscription_status_id = $2, \
                 external_customer_id = COALESCE($3, external_customer_id) \
             WHERE id = $1",
        )
        .bind(id)
        .bind(SubscriptionStatus::Active.id())
        .bind(customer_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Set the subscription flag on every profile linked to `customer_id`.
    ///
    /// Returns the number of profiles updated; zero when nothing is linked.
    pub async fn set_subscription_status_by_customer(
        pool: &PgPool,
        customer_id: &str,
        status: SubscriptionStatus,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE profiles SET subscription_status_id = $2 \
             WHERE external_customer_id = $1",
        )
        .bind(customer_id)
        .bind(status.id())
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
