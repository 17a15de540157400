//! Billing provider webhook.
//!
//! Authenticated by the payload signature, not by a bearer token. The raw
//! body is taken as [`Bytes`] because the signature covers the exact bytes
//! sent.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use axum::Json;
use buildmatch_core::billing::SIGNATURE_HEADER;
use buildmatch_engine::SubscriptionReconciler;

use crate::error::AppResult;
use crate::state::AppState;

/// POST /api/v1/billing/webhook
///
/// Answers with the bare acknowledgement (`{"received": true, ...}`), which
/// is what the provider expects.
pub async fn webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> AppResult<impl IntoResponse> {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok());

    let verifier = state.config.billing.verifier();
    let outcome =
        SubscriptionReconciler::handle_webhook(&state.pool, &body, signature, &verifier).await?;

    tracing::debug!(
        profiles_updated = outcome.profiles_updated,
        note = outcome.note.as_deref().unwrap_or_default(),
        "Billing webhook processed",
    );
    Ok(Json(outcome))
}
