use assert_matches::assert_matches;
use buildmatch_core::error::CoreError;
use buildmatch_core::status::{ProfileRole, SubscriptionStatus};
use buildmatch_engine::{EngineError, FulfillerProfileInput, Onboarding};
use sqlx::PgPool;
use uuid::Uuid;

#[sqlx::test(migrations = "../db/migrations")]
async fn test_select_role_creates_inactive_profile(pool: PgPool) {
    let id = Uuid::new_v4();
    let profile = Onboarding::select_role(&pool, id, ProfileRole::Fulfiller)
        .await
        .unwrap();
    assert_eq!(profile.id, id);
    assert_eq!(profile.role(), Some(ProfileRole::Fulfiller));
    assert_eq!(profile.subscription_status(), Some(SubscriptionStatus::Inactive));

    let again = Onboarding::select_role(&pool, id, ProfileRole::Fulfiller)
        .await
        .unwrap();
    assert_eq!(again.created_at, profile.created_at);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_role_cannot_change(pool: PgPool) {
    let id = Uuid::new_v4();
    Onboarding::select_role(&pool, id, ProfileRole::Requester)
        .await
        .unwrap();

    let err = Onboarding::select_role(&pool, id, ProfileRole::Fulfiller)
        .await
        .unwrap_err();
    assert_matches!(err, EngineError::Core(CoreError::Conflict(_)));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_fulfiller_profile_is_normalized(pool: PgPool) {
    let id = Uuid::new_v4();
    Onboarding::select_role(&pool, id, ProfileRole::Fulfiller)
        .await
        .unwrap();

    let saved = Onboarding::upsert_fulfiller_profile(
        &pool,
        id,
        FulfillerProfileInput {
            interests: vec![" Social media ".into(), "".into(), "Social media".into()],
            current_skills: vec!["copywriting, canva".into()],
            desired_skills: vec![],
            working_style: vec!["Async".into()],
        },
    )
    .await
    .unwrap();
    assert_eq!(saved.interests, vec!["Social media"]);
    assert_eq!(saved.current_skills, vec!["copywriting", "canva"]);

    let details = Onboarding::get_profile(&pool, id).await.unwrap();
    assert_eq!(
        details.fulfiller_profile.map(|f| f.working_style),
        Some(vec!["Async".to_string()])
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_requesters_have_no_fulfiller_profile(pool: PgPool) {
    let id = Uuid::new_v4();
    Onboarding::select_role(&pool, id, ProfileRole::Requester)
        .await
        .unwrap();

    let err = Onboarding::upsert_fulfiller_profile(&pool, id, FulfillerProfileInput::default())
        .await
        .unwrap_err();
    assert_matches!(err, EngineError::Core(CoreError::Forbidden(_)));

    let err = Onboarding::upsert_fulfiller_profile(
        &pool,
        Uuid::new_v4(),
        FulfillerProfileInput::default(),
    )
    .await
    .unwrap_err();
    assert_matches!(err, EngineError::Core(CoreError::Forbidden(_)));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_get_missing_profile_is_not_found(pool: PgPool) {
    let err = Onboarding::get_profile(&pool, Uuid::new_v4()).await.unwrap_err();
    assert_matches!(err, EngineError::Core(CoreError::NotFound { entity: "Profile", .. }));
}
