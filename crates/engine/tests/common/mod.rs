//! Shared fixtures for engine integration tests.

#![allow(dead_code)]

use buildmatch_core::brief::Commitments;
use buildmatch_core::status::ProfileRole;
use buildmatch_core::types::ProfileId;
use buildmatch_db::models::project::{CreateProject, Project};
use buildmatch_engine::{FulfillerProfileInput, Onboarding, ProjectBrief};
use sqlx::PgPool;
use uuid::Uuid;

pub async fn requester(pool: &PgPool) -> ProfileId {
    Onboarding::select_role(pool, Uuid::new_v4(), ProfileRole::Requester)
        .await
        .unwrap()
        .id
}

pub async fn fulfiller(pool: &PgPool, interests: &[&str]) -> ProfileId {
    let id = Onboarding::select_role(pool, Uuid::new_v4(), ProfileRole::Fulfiller)
        .await
        .unwrap()
        .id;
    Onboarding::upsert_fulfiller_profile(
        pool,
        id,
        FulfillerProfileInput {
            interests: interests.iter().map(|i| i.to_string()).collect(),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    id
}

/// Insert a posted project with an explicit category, bypassing the
/// creation path and its recommendation push.
pub async fn insert_project(pool: &PgPool, requester_id: ProfileId, category: &str) -> Project {
    buildmatch_db::repositories::ProjectRepo::create(
        pool,
        &CreateProject {
            requester_id,
            title: format!("Project in {category}"),
            goal: "Deliver the thing".to_string(),
            category: Some(category.to_string()),
            inputs_available: vec![],
            constraints: vec![],
            commitments: Commitments::default(),
            timeline: None,
        },
    )
    .await
    .unwrap()
}

pub fn brief(title: &str) -> ProjectBrief {
    ProjectBrief {
        title: title.to_string(),
        goal: "12 posts designed and scheduled".to_string(),
        ..Default::default()
    }
}

pub async fn recommendation_count(pool: &PgPool) -> i64 {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM recommendations")
        .fetch_one(pool)
        .await
        .unwrap();
    count
}
