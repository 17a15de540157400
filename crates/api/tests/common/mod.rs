#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use buildmatch_api::auth::jwt::{Claims, JwtConfig};
use buildmatch_api::config::{BillingConfig, ServerConfig};
use buildmatch_api::router::build_app_router;
use buildmatch_api::state::AppState;
use buildmatch_core::billing::{signature_header, SIGNATURE_HEADER};
use buildmatch_core::status::ProfileRole;
use buildmatch_core::types::ProfileId;
use buildmatch_db::models::fulfiller_profile::UpsertFulfillerProfile;
use buildmatch_db::models::profile::CreateProfile;
use buildmatch_db::repositories::{FulfillerProfileRepo, ProfileRepo};
use buildmatch_engine::ApprovalPolicy;
use http_body_util::BodyExt;
use jsonwebtoken::{encode, EncodingKey, Header};
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

pub const JWT_SECRET: &str = "test-jwt-secret-that-is-long-enough";
pub const WEBHOOK_SECRET: &str = "whsec_test_secret";

/// Build a test `ServerConfig` with safe defaults and fixed secrets.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        db_max_connections: 5,
        db_acquire_timeout_secs: 5,
        jwt: JwtConfig {
            secret: JWT_SECRET.to_string(),
            audience: None,
        },
        billing: BillingConfig {
            webhook_secret: WEBHOOK_SECRET.to_string(),
            tolerance_secs: 300,
        },
        max_open_projects: 3,
        approval_policy: ApprovalPolicy::Reassign,
    }
}

/// Build the production router over `pool` with [`test_config`].
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with(pool, test_config())
}

/// Build the production router over `pool` with a custom config.
pub fn build_test_app_with(pool: PgPool, config: ServerConfig) -> Router {
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Mint a bearer token for `profile_id` the way the identity provider would.
pub fn token(profile_id: ProfileId) -> String {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: profile_id,
        exp: now + 600,
        iat: Some(now),
        aud: Some("authenticated".to_string()),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
    )
    .unwrap()
}

// ---------------------------------------------------------------------------
// Seed data
// ---------------------------------------------------------------------------

pub async fn requester(pool: &PgPool) -> ProfileId {
    let id = Uuid::new_v4();
    ProfileRepo::create(
        pool,
        &CreateProfile {
            id,
            role: ProfileRole::Requester,
        },
    )
    .await
    .unwrap()
    .unwrap();
    id
}

/// A fulfiller with the given interests. Subscription stays inactive.
pub async fn fulfiller(pool: &PgPool, interests: &[&str]) -> ProfileId {
    let id = Uuid::new_v4();
    ProfileRepo::create(
        pool,
        &CreateProfile {
            id,
            role: ProfileRole::Fulfiller,
        },
    )
    .await
    .unwrap()
    .unwrap();
    let input = UpsertFulfillerProfile {
        interests: interests.iter().map(|s| s.to_string()).collect(),
        ..Default::default()
    };
    FulfillerProfileRepo::upsert(pool, id, &input).await.unwrap();
    id
}

/// A fulfiller with the given interests and an active subscription.
pub async fn active_fulfiller(pool: &PgPool, interests: &[&str]) -> ProfileId {
    let id = fulfiller(pool, interests).await;
    ProfileRepo::activate_checkout(pool, id, None).await.unwrap();
    id
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn get_auth(app: Router, uri: &str, profile_id: ProfileId) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .header("authorization", format!("Bearer {}", token(profile_id)))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

async fn json_auth(
    app: Router,
    method: Method,
    uri: &str,
    profile_id: ProfileId,
    body: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {}", token(profile_id)))
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    profile_id: ProfileId,
    body: serde_json::Value,
) -> Response<Body> {
    json_auth(app, Method::POST, uri, profile_id, body).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    profile_id: ProfileId,
    body: serde_json::Value,
) -> Response<Body> {
    json_auth(app, Method::PUT, uri, profile_id, body).await
}

/// POST a raw webhook payload, signed with [`WEBHOOK_SECRET`] unless
/// `signature` overrides the header value.
pub async fn post_webhook(
    app: Router,
    payload: &str,
    signature: Option<String>,
) -> Response<Body> {
    let header = signature.unwrap_or_else(|| {
        signature_header(
            WEBHOOK_SECRET,
            chrono::Utc::now().timestamp(),
            payload.as_bytes(),
        )
        .unwrap()
    });
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/billing/webhook")
        .header("content-type", "application/json")
        .header(SIGNATURE_HEADER, header)
        .body(Body::from(payload.to_string()))
        .unwrap();
    send(app, request).await
}
