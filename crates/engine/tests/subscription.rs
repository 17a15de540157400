use assert_matches::assert_matches;
use buildmatch_core::billing::{parse_event, signature_header};
use buildmatch_core::error::CoreError;
use buildmatch_core::status::ProfileRole;
use buildmatch_db::repositories::ProfileRepo;
use buildmatch_engine::{EngineError, Onboarding, SubscriptionReconciler, WebhookVerifier};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

const SECRET: &str = "whsec_engine_tests";

fn verifier() -> WebhookVerifier {
    WebhookVerifier {
        secret: SECRET.to_string(),
        tolerance_secs: 300,
    }
}

fn checkout(identity: Option<Uuid>, customer: serde_json::Value) -> Vec<u8> {
    serde_json::to_vec(&json!({
        "id": "evt_checkout",
        "type": "checkout.session.completed",
        "data": { "object": {
            "client_reference_id": identity.map(|id| id.to_string()),
            "customer": customer,
        }}
    }))
    .unwrap()
}

fn subscription(event_type: &str, customer: &str, status: &str) -> Vec<u8> {
    serde_json::to_vec(&json!({
        "id": "evt_sub",
        "type": event_type,
        "data": { "object": { "customer": customer, "status": status } }
    }))
    .unwrap()
}

async fn apply(pool: &PgPool, payload: &[u8]) -> buildmatch_engine::ReconcileOutcome {
    let header = signature_header(SECRET, chrono::Utc::now().timestamp(), payload).unwrap();
    SubscriptionReconciler::handle_webhook(pool, payload, Some(&header), &verifier())
        .await
        .unwrap()
}

async fn is_active(pool: &PgPool, id: Uuid) -> bool {
    ProfileRepo::find_by_id(pool, id)
        .await
        .unwrap()
        .unwrap()
        .has_active_subscription()
}

async fn fulfiller_profile(pool: &PgPool) -> Uuid {
    Onboarding::select_role(pool, Uuid::new_v4(), ProfileRole::Fulfiller)
        .await
        .unwrap()
        .id
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_checkout_then_updates_then_delete(pool: PgPool) {
    let id = fulfiller_profile(&pool).await;

    let outcome = apply(&pool, &checkout(Some(id), json!("cus_1"))).await;
    assert!(outcome.received);
    assert_eq!(outcome.profiles_updated, 1);
    assert!(is_active(&pool, id).await);

    apply(&pool, &subscription("customer.subscription.updated", "cus_1", "past_due")).await;
    assert!(!is_active(&pool, id).await);

    apply(&pool, &subscription("customer.subscription.updated", "cus_1", "trialing")).await;
    assert!(is_active(&pool, id).await);

    apply(&pool, &subscription("customer.subscription.deleted", "cus_1", "canceled")).await;
    assert!(!is_active(&pool, id).await);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_replayed_delete_is_idempotent(pool: PgPool) {
    let id = fulfiller_profile(&pool).await;
    apply(&pool, &checkout(Some(id), json!({ "id": "cus_2", "object": "customer" }))).await;

    let payload = subscription("customer.subscription.deleted", "cus_2", "canceled");
    for _ in 0..3 {
        let outcome = apply(&pool, &payload).await;
        assert!(outcome.received);
        assert!(!is_active(&pool, id).await);
    }
    let profile = ProfileRepo::find_by_id(&pool, id).await.unwrap().unwrap();
    assert_eq!(profile.external_customer_id.as_deref(), Some("cus_2"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_checkout_without_identity_is_acknowledged(pool: PgPool) {
    let outcome = apply(&pool, &checkout(None, json!("cus_3"))).await;
    assert!(outcome.received);
    assert_eq!(outcome.profiles_updated, 0);
    assert!(outcome.note.is_some());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_unknown_customer_and_event_are_acknowledged(pool: PgPool) {
    let outcome = apply(
        &pool,
        &subscription("customer.subscription.updated", "cus_nobody", "active"),
    )
    .await;
    assert_eq!(outcome.profiles_updated, 0);
    assert_eq!(outcome.note.as_deref(), Some("No profile linked to customer"));

    let outcome = apply(&pool, &subscription("invoice.paid", "cus_nobody", "paid")).await;
    assert!(outcome.received);
    assert_eq!(outcome.note.as_deref(), Some("Ignored event type invoice.paid"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_bad_signature_writes_nothing(pool: PgPool) {
    let id = fulfiller_profile(&pool).await;
    let payload = checkout(Some(id), json!("cus_4"));
    let header = signature_header("whsec_wrong", chrono::Utc::now().timestamp(), &payload).unwrap();

    let err = SubscriptionReconciler::handle_webhook(&pool, &payload, Some(&header), &verifier())
        .await
        .unwrap_err();
    assert_matches!(err, EngineError::Core(CoreError::SignatureInvalid(_)));

    let err = SubscriptionReconciler::handle_webhook(&pool, &payload, None, &verifier())
        .await
        .unwrap_err();
    assert_matches!(err, EngineError::Core(CoreError::SignatureInvalid(_)));

    assert!(!is_active(&pool, id).await);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_stale_signature_is_rejected(pool: PgPool) {
    let payload = checkout(None, json!("cus_5"));
    let stale = chrono::Utc::now().timestamp() - 3_600;
    let header = signature_header(SECRET, stale, &payload).unwrap();

    let err = SubscriptionReconciler::handle_webhook(&pool, &payload, Some(&header), &verifier())
        .await
        .unwrap_err();
    assert_matches!(err, EngineError::Core(CoreError::SignatureInvalid(_)));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_reconcile_accepts_decoded_event(pool: PgPool) {
    let id = fulfiller_profile(&pool).await;
    let envelope = parse_event(&checkout(Some(id), json!(null))).unwrap();

    let outcome = SubscriptionReconciler::reconcile(&pool, &envelope).await.unwrap();
    assert_eq!(outcome.profiles_updated, 1);
    assert!(is_active(&pool, id).await);
}
