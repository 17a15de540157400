use buildmatch_core::billing::DEFAULT_TOLERANCE_SECS;
use buildmatch_core::lifecycle::DEFAULT_MAX_OPEN_PROJECTS;
use buildmatch_engine::{ApprovalPolicy, ProjectLimits, WebhookVerifier};

use crate::auth::jwt::JwtConfig;

/// Billing webhook settings.
#[derive(Debug, Clone)]
pub struct BillingConfig {
    /// Shared signing secret for webhook deliveries.
    pub webhook_secret: String,
    /// Maximum accepted age of a signed delivery, in seconds (default: `300`).
    pub tolerance_secs: i64,
}

impl BillingConfig {
    /// Load billing settings from environment variables.
    ///
    /// | Env Var                          | Required | Default |
    /// |----------------------------------|----------|---------|
    /// | `BILLING_WEBHOOK_SECRET`         | **yes**  | --      |
    /// | `BILLING_WEBHOOK_TOLERANCE_SECS` | no       | `300`   |
    ///
    /// # Panics
    ///
    /// Panics if `BILLING_WEBHOOK_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let webhook_secret = std::env::var("BILLING_WEBHOOK_SECRET")
            .expect("BILLING_WEBHOOK_SECRET must be set in the environment");
        assert!(
            !webhook_secret.is_empty(),
            "BILLING_WEBHOOK_SECRET must not be empty"
        );

        let tolerance_secs: i64 = std::env::var("BILLING_WEBHOOK_TOLERANCE_SECS")
            .unwrap_or_else(|_| DEFAULT_TOLERANCE_SECS.to_string())
            .parse()
            .expect("BILLING_WEBHOOK_TOLERANCE_SECS must be a valid i64");

        Self {
            webhook_secret,
            tolerance_secs,
        }
    }

    /// Verification settings handed to the reconciler.
    pub fn verifier(&self) -> WebhookVerifier {
        WebhookVerifier {
            secret: self.webhook_secret.clone(),
            tolerance_secs: self.tolerance_secs,
        }
    }
}

/// Server configuration loaded from environment variables.
///
/// Everything except the two secrets has a default suitable for local
/// development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Time allowed for in-flight requests to drain on shutdown (default: `30`).
    pub shutdown_timeout_secs: u64,
    /// Maximum pooled database connections (default: `10`).
    pub db_max_connections: u32,
    /// Seconds to wait for a pooled connection (default: `5`).
    pub db_acquire_timeout_secs: u64,
    /// Bearer-token validation settings.
    pub jwt: JwtConfig,
    /// Billing webhook settings.
    pub billing: BillingConfig,
    /// Cap on a requester's simultaneously open projects (default: `3`).
    pub max_open_projects: i64,
    /// How approval treats an already assigned project (default: `reassign`).
    pub approval_policy: ApprovalPolicy,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                  | Default                    |
    /// |--------------------------|----------------------------|
    /// | `HOST`                   | `0.0.0.0`                  |
    /// | `PORT`                   | `3000`                     |
    /// | `CORS_ORIGINS`           | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`   | `30`                       |
    /// | `SHUTDOWN_TIMEOUT_SECS`  | `30`                       |
    /// | `DB_MAX_CONNECTIONS`     | `10`                       |
    /// | `DB_ACQUIRE_TIMEOUT_SECS`| `5`                        |
    /// | `MAX_OPEN_PROJECTS`      | `3`                        |
    /// | `APPROVAL_POLICY`        | `reassign`                 |
    ///
    /// See [`JwtConfig::from_env`] and [`BillingConfig::from_env`] for the
    /// required secrets.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        let db_max_connections: u32 = std::env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "10".into())
            .parse()
            .expect("DB_MAX_CONNECTIONS must be a valid u32");

        let db_acquire_timeout_secs: u64 = std::env::var("DB_ACQUIRE_TIMEOUT_SECS")
            .unwrap_or_else(|_| "5".into())
            .parse()
            .expect("DB_ACQUIRE_TIMEOUT_SECS must be a valid u64");

        let max_open_projects: i64 = std::env::var("MAX_OPEN_PROJECTS")
            .unwrap_or_else(|_| DEFAULT_MAX_OPEN_PROJECTS.to_string())
            .parse()
            .expect("MAX_OPEN_PROJECTS must be a valid i64");
        assert!(max_open_projects > 0, "MAX_OPEN_PROJECTS must be positive");

        let approval_policy: ApprovalPolicy = std::env::var("APPROVAL_POLICY")
            .unwrap_or_else(|_| ApprovalPolicy::default().as_str().into())
            .parse()
            .unwrap_or_else(|e| panic!("APPROVAL_POLICY is invalid: {e}"));

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            db_max_connections,
            db_acquire_timeout_secs,
            jwt: JwtConfig::from_env(),
            billing: BillingConfig::from_env(),
            max_open_projects,
            approval_policy,
        }
    }

    /// Project creation limits derived from this config.
    pub fn project_limits(&self) -> ProjectLimits {
        ProjectLimits {
            max_open_projects: self.max_open_projects,
        }
    }
}
