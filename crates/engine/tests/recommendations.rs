mod common;

use assert_matches::assert_matches;
use buildmatch_core::error::CoreError;
use buildmatch_core::status::ProjectStatus;
use buildmatch_db::repositories::{ProjectRepo, RecommendationRepo};
use buildmatch_engine::{EngineError, ProjectLifecycle, ProjectLimits, RecommendationGenerator};
use sqlx::PgPool;
use uuid::Uuid;

use common::{brief, fulfiller, insert_project, recommendation_count, requester};

#[sqlx::test(migrations = "../db/migrations")]
async fn test_social_media_scenario(pool: PgPool) {
    let owner = requester(&pool).await;
    let project = insert_project(&pool, owner, "Social Media").await;

    let loose = fulfiller(&pool, &["social media"]).await;
    let outcome = RecommendationGenerator::generate_for_fulfiller(&pool, loose)
        .await
        .unwrap();
    assert_eq!(outcome.created, 1);
    let row = RecommendationRepo::find(&pool, loose, project.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.score, 80);
    assert_eq!(row.reason, "Matched interest to category: Social Media");

    let exact = fulfiller(&pool, &["Social Media"]).await;
    let partial = fulfiller(&pool, &["social"]).await;
    let outcome = RecommendationGenerator::generate_for_project(&pool, project.id)
        .await
        .unwrap();

    // `loose` matches exactly too once case-folded; `partial` does not.
    assert_eq!(outcome.created, 2);
    let row = RecommendationRepo::find(&pool, exact, project.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.score, 90);
    assert_eq!(row.reason, "Auto-match: builder interest \"social media\"");
    assert!(RecommendationRepo::find(&pool, partial, project.id)
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_substring_policy_for_fulfiller_path(pool: PgPool) {
    let owner = requester(&pool).await;
    let social = insert_project(&pool, owner, "Social media").await;
    let shop = insert_project(&pool, owner, "E-commerce / Shopify").await;
    insert_project(&pool, owner, "Email marketing").await;

    let id = fulfiller(&pool, &["social", "SHOPIFY"]).await;
    let outcome = RecommendationGenerator::generate_for_fulfiller(&pool, id)
        .await
        .unwrap();
    assert_eq!(outcome.created, 2);
    assert!(outcome.note.is_none());

    for project_id in [social.id, shop.id] {
        assert!(RecommendationRepo::find(&pool, id, project_id)
            .await
            .unwrap()
            .is_some());
    }
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_fulfiller_path_skips_non_posted_projects(pool: PgPool) {
    let owner = requester(&pool).await;
    let project = insert_project(&pool, owner, "Social media").await;
    ProjectRepo::transition(&pool, project.id, ProjectStatus::Posted, ProjectStatus::Archived)
        .await
        .unwrap()
        .unwrap();

    let id = fulfiller(&pool, &["social"]).await;
    let outcome = RecommendationGenerator::generate_for_fulfiller(&pool, id)
        .await
        .unwrap();
    assert_eq!(outcome.created, 0);
    assert_eq!(outcome.note.as_deref(), Some("No matching posted projects"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_exact_policy_is_narrower(pool: PgPool) {
    let owner = requester(&pool).await;
    let project = insert_project(&pool, owner, "Canva design").await;
    let substring_only = fulfiller(&pool, &["canva"]).await;
    let exact = fulfiller(&pool, &["  canva DESIGN "]).await;

    let outcome = RecommendationGenerator::generate_for_project(&pool, project.id)
        .await
        .unwrap();
    assert_eq!(outcome.created, 1);
    assert!(RecommendationRepo::find(&pool, exact, project.id)
        .await
        .unwrap()
        .is_some());

    let outcome = RecommendationGenerator::generate_for_fulfiller(&pool, substring_only)
        .await
        .unwrap();
    assert_eq!(outcome.created, 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_generation_is_idempotent(pool: PgPool) {
    let owner = requester(&pool).await;
    let project = insert_project(&pool, owner, "Social media").await;
    let id = fulfiller(&pool, &["Social media"]).await;

    RecommendationGenerator::generate_for_fulfiller(&pool, id).await.unwrap();
    RecommendationGenerator::generate_for_project(&pool, project.id).await.unwrap();
    let first = recommendation_count(&pool).await;
    assert_eq!(first, 1);

    RecommendationGenerator::generate_for_fulfiller(&pool, id).await.unwrap();
    RecommendationGenerator::generate_for_project(&pool, project.id).await.unwrap();
    assert_eq!(recommendation_count(&pool).await, first);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_missing_entities_are_not_found(pool: PgPool) {
    let err = RecommendationGenerator::generate_for_fulfiller(&pool, Uuid::new_v4())
        .await
        .unwrap_err();
    assert_matches!(err, EngineError::Core(CoreError::NotFound { entity: "FulfillerProfile", .. }));

    let err = RecommendationGenerator::generate_for_project(&pool, 424_242)
        .await
        .unwrap_err();
    assert_matches!(err, EngineError::Core(CoreError::NotFound { entity: "Project", .. }));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_empty_interests_create_nothing(pool: PgPool) {
    let owner = requester(&pool).await;
    insert_project(&pool, owner, "Social media").await;
    let id = fulfiller(&pool, &["", "   "]).await;

    let outcome = RecommendationGenerator::generate_for_fulfiller(&pool, id)
        .await
        .unwrap();
    assert_eq!(outcome.created, 0);
    assert_eq!(outcome.note.as_deref(), Some("No interests selected"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_project_path_noops_for_uncategorized_or_active(pool: PgPool) {
    let owner = requester(&pool).await;
    fulfiller(&pool, &["social media"]).await;

    let blank = insert_project(&pool, owner, "   ").await;
    let outcome = RecommendationGenerator::generate_for_project(&pool, blank.id)
        .await
        .unwrap();
    assert_eq!(outcome.created, 0);
    assert_eq!(outcome.note.as_deref(), Some("Project has no category"));

    let archived = insert_project(&pool, owner, "Social media").await;
    ProjectRepo::transition(&pool, archived.id, ProjectStatus::Posted, ProjectStatus::Archived)
        .await
        .unwrap();
    let outcome = RecommendationGenerator::generate_for_project(&pool, archived.id)
        .await
        .unwrap();
    assert_eq!(outcome.created, 0);
    assert_eq!(outcome.note.as_deref(), Some("Project is not posted"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_creation_pushes_recommendations(pool: PgPool) {
    let owner = requester(&pool).await;
    let interested = fulfiller(&pool, &["Email marketing"]).await;

    let created = ProjectLifecycle::create_project(
        &pool,
        owner,
        brief("Email newsletter refresh"),
        ProjectLimits::default(),
    )
    .await
    .unwrap();
    assert_eq!(created.recommendations.as_ref().map(|o| o.created), Some(1));
    assert!(created.recommendation_error.is_none());

    let row = RecommendationRepo::find(&pool, interested, created.project.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.score, 90);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_listing_regenerates_and_hides_assigned(pool: PgPool) {
    let owner = requester(&pool).await;
    let open = insert_project(&pool, owner, "Social media").await;
    let taken = insert_project(&pool, owner, "Social media").await;
    let id = fulfiller(&pool, &["social"]).await;
    let other = fulfiller(&pool, &["email"]).await;

    let mut conn = pool.acquire().await.unwrap();
    ProjectRepo::assign(&mut conn, taken.id, other, &[ProjectStatus::Posted])
        .await
        .unwrap()
        .unwrap();

    let listed = RecommendationGenerator::list_for_fulfiller(&pool, id).await.unwrap();
    let ids: Vec<i64> = listed.iter().map(|r| r.project_id).collect();
    assert_eq!(ids, vec![open.id]);
    assert_eq!(listed[0].score, 80);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_listing_hides_archived_projects(pool: PgPool) {
    let owner = requester(&pool).await;
    let kept = insert_project(&pool, owner, "Social media").await;
    let archived = insert_project(&pool, owner, "Social media").await;
    let id = fulfiller(&pool, &["social"]).await;

    let listed = RecommendationGenerator::list_for_fulfiller(&pool, id).await.unwrap();
    assert_eq!(listed.len(), 2);

    ProjectLifecycle::archive_project(&pool, owner, archived.id)
        .await
        .unwrap();

    let listed = RecommendationGenerator::list_for_fulfiller(&pool, id).await.unwrap();
    let ids: Vec<i64> = listed.iter().map(|r| r.project_id).collect();
    assert_eq!(ids, vec![kept.id]);
    assert!(listed
        .iter()
        .all(|r| r.status_id == ProjectStatus::Posted.id()));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_listing_without_profile_is_empty(pool: PgPool) {
    let listed = RecommendationGenerator::list_for_fulfiller(&pool, Uuid::new_v4())
        .await
        .unwrap();
    assert!(listed.is_empty());
}
