//! Matching and assignment engine.
//!
//! Each component is a zero-sized service struct whose async methods take
//! `&PgPool` and compose repository calls from `buildmatch_db` with the
//! pure rules in `buildmatch_core`:
//!
//! - [`RecommendationGenerator`] pairs fulfillers with posted projects.
//! - [`ProjectLifecycle`] creates projects and drives their status.
//! - [`AssignmentManager`] records claims and approves one fulfiller.
//! - [`SubscriptionReconciler`] applies verified billing events.
//! - [`Onboarding`] manages profiles and fulfiller interests.

pub mod assignment;
pub mod error;
pub mod lifecycle;
pub mod onboarding;
pub mod recommendations;
pub mod subscription;

pub use assignment::{ApprovalOutcome, ApprovalPolicy, AssignmentManager};
pub use error::{EngineError, EngineResult, Step};
pub use lifecycle::{CreatedProject, ProjectBrief, ProjectLifecycle, ProjectLimits};
pub use onboarding::{FulfillerProfileInput, Onboarding, ProfileDetails};
pub use recommendations::{GenerationOutcome, RecommendationGenerator};
pub use subscription::{ReconcileOutcome, SubscriptionReconciler, WebhookVerifier};
