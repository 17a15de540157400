//! Subscription reconciler.
//!
//! Applies billing provider events to the local subscription flag. Every
//! write sets an absolute state, so replayed or reordered deliveries of the
//! same event converge on the same result.

use buildmatch_core::billing::{parse_event, verify_signature, BillingEvent, BillingEventEnvelope};
use buildmatch_core::error::CoreError;
use buildmatch_core::status::SubscriptionStatus;
use buildmatch_db::repositories::ProfileRepo;
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{EngineResult, Step, StoreResultExt};

/// Acknowledgement returned for every authenticated event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReconcileOutcome {
    pub received: bool,
    pub profiles_updated: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl ReconcileOutcome {
    fn applied(profiles_updated: u64, empty_note: &str) -> Self {
        Self {
            received: true,
            profiles_updated,
            note: (profiles_updated == 0).then(|| empty_note.to_string()),
        }
    }

    fn acknowledged(note: impl Into<String>) -> Self {
        Self {
            received: true,
            profiles_updated: 0,
            note: Some(note.into()),
        }
    }
}

/// Webhook verification settings.
#[derive(Debug, Clone)]
pub struct WebhookVerifier {
    pub secret: String,
    pub tolerance_secs: i64,
}

/// Keeps profile subscription state in step with the billing provider.
pub struct SubscriptionReconciler;

impl SubscriptionReconciler {
    /// Authenticate a raw webhook delivery, decode it, and apply it.
    ///
    /// Nothing is decoded or written unless the signature verifies.
    pub async fn handle_webhook(
        pool: &PgPool,
        payload: &[u8],
        signature_header: Option<&str>,
        verifier: &WebhookVerifier,
    ) -> EngineResult<ReconcileOutcome> {
        let header = signature_header
            .ok_or_else(|| CoreError::SignatureInvalid("missing signature header".into()))?;
        verify_signature(
            payload,
            header,
            &verifier.secret,
            chrono::Utc::now().timestamp(),
            verifier.tolerance_secs,
        )?;

        let envelope = parse_event(payload)?;
        Self::reconcile(pool, &envelope).await
    }

    /// Apply an already-authenticated event.
    pub async fn reconcile(
        pool: &PgPool,
        envelope: &BillingEventEnvelope,
    ) -> EngineResult<ReconcileOutcome> {
        let outcome = match &envelope.event {
            BillingEvent::CheckoutCompleted {
                identity,
                customer_id,
            } => {
                let Some(identity) = identity else {
                    return Ok(ReconcileOutcome::acknowledged(
                        "Checkout carried no profile identity",
                    ));
                };
                let Ok(profile_id) = Uuid::parse_str(identity) else {
                    tracing::warn!(
                        event_id = %envelope.id,
                        identity = %identity,
                        "Checkout identity is not a profile id",
                    );
                    return Ok(ReconcileOutcome::acknowledged(
                        "Checkout identity is not a profile id",
                    ));
                };
                let updated =
                    ProfileRepo::activate_checkout(pool, profile_id, customer_id.as_deref())
                        .await
                        .at(Step::UpdateSubscription)?;
                ReconcileOutcome::applied(updated, "No profile for checkout identity")
            }
            BillingEvent::SubscriptionUpdated {
                customer_id,
                status,
                ..
            } => {
                let updated =
                    ProfileRepo::set_subscription_status_by_customer(pool, customer_id, *status)
                        .await
                        .at(Step::UpdateSubscription)?;
                ReconcileOutcome::applied(updated, "No profile linked to customer")
            }
            BillingEvent::SubscriptionDeleted { customer_id } => {
                let updated = ProfileRepo::set_subscription_status_by_customer(
                    pool,
                    customer_id,
                    SubscriptionStatus::Inactive,
                )
                .await
                .at(Step::UpdateSubscription)?;
                ReconcileOutcome::applied(updated, "No profile linked to customer")
            }
            BillingEvent::Ignored => ReconcileOutcome::acknowledged(format!(
                "Ignored event type {}",
                envelope.event_type
            )),
        };

        tracing::info!(
            event_id = %envelope.id,
            event_type = %envelope.event_type,
            profiles_updated = outcome.profiles_updated,
            "Billing event reconciled",
        );
        Ok(outcome)
    }
}
