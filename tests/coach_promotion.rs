use chrono::Datelike;
use fitness_booking_service::{
    entity::user::Role,
    error::AppError,
    repositories::{self, coach::NewCoach},
    services::{
        booking::book_course,
        coach::{coach_revenue, list_coaches, promote_to_coach, CoachProfile, MAX_PAGE_SIZE},
        credit::purchase_credit,
    },
};
use uuid::Uuid;

mod support;

#[tokio::test]
async fn promotion_sets_role_and_creates_the_profile() {
    let state = support::test_state().await;
    let db = state.db.as_ref();
    let user = support::create_user(db, "future-coach").await;

    let (promoted, coach) = promote_to_coach(db, user.id, support::coach_profile())
        .await
        .expect("promote");
    assert_eq!(promoted.role, Role::Coach);
    assert_eq!(coach.user_id, user.id);
    assert_eq!(coach.experience_years, 3);

    let stored = repositories::user::find_by_id(db, user.id)
        .await
        .expect("query")
        .expect("user exists");
    assert_eq!(stored.role, Role::Coach);
}

#[tokio::test]
async fn promoting_a_coach_again_is_a_conflict() {
    let state = support::test_state().await;
    let db = state.db.as_ref();
    let (user, _) = support::create_coach(db).await;

    let err = promote_to_coach(db, user.id, support::coach_profile())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn unknown_user_is_not_found() {
    let state = support::test_state().await;
    let err = promote_to_coach(state.db.as_ref(), Uuid::new_v4(), support::coach_profile())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn insecure_profile_url_is_rejected_before_any_write() {
    let state = support::test_state().await;
    let db = state.db.as_ref();
    let user = support::create_user(db, "member").await;

    let profile = CoachProfile {
        profile_image_url: Some("http://cdn.example.com/coach.png".to_string()),
        ..support::coach_profile()
    };
    let err = promote_to_coach(db, user.id, profile).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let stored = repositories::user::find_by_id(db, user.id)
        .await
        .expect("query")
        .expect("user exists");
    assert_eq!(stored.role, Role::User);
}

#[tokio::test]
async fn failed_coach_insert_rolls_back_the_role_change() {
    let state = support::test_state().await;
    let db = state.db.as_ref();
    let user = support::create_user(db, "member").await;

    // A stray coach row makes the insert inside the promotion violate the
    // unique user_id constraint after the role has been updated.
    repositories::coach::save(
        db,
        NewCoach {
            user_id: user.id,
            experience_years: 1,
            description: "stray",
            profile_image_url: None,
        },
    )
    .await
    .expect("stray coach row");

    let err = promote_to_coach(db, user.id, support::coach_profile())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    let stored = repositories::user::find_by_id(db, user.id)
        .await
        .expect("query")
        .expect("user exists");
    assert_eq!(stored.role, Role::User);
    let coach = repositories::coach::find_by_user_id(db, user.id)
        .await
        .expect("query")
        .expect("stray row still there");
    assert_eq!(coach.description, "stray");
}

#[tokio::test]
async fn revenue_counts_active_participants_of_the_month() {
    let state = support::test_state().await;
    let db = state.db.as_ref();
    let (_, coach) = support::create_coach(db).await;
    let course = support::create_test_course(db, &coach, 10).await;

    // 10 credits for 1000 and 10 credits for 3000: one credit is worth 200.
    let a = support::create_user(db, "alice").await;
    let b = support::create_user(db, "bob").await;
    let cheap = support::create_package(db, 10, 1000).await;
    let dear = support::create_package(db, 10, 3000).await;
    purchase_credit(db, a.id, cheap)
        .await
        .expect("purchase");
    purchase_credit(db, b.id, dear)
        .await
        .expect("purchase");

    book_course(db, a.id, course.id).await.expect("book");
    book_course(db, b.id, course.id).await.expect("book");

    let revenue = coach_revenue(db, coach.id, course.start_at.year(), course.start_at.month())
        .await
        .expect("revenue");
    assert_eq!(revenue.course_count, 1);
    assert_eq!(revenue.participants, 2);
    assert_eq!(revenue.revenue, 400);

    let other_month = course.start_at.month() % 12 + 1;
    let empty = coach_revenue(db, coach.id, course.start_at.year(), other_month)
        .await
        .expect("revenue");
    assert_eq!(empty.course_count, 0);
    assert_eq!(empty.revenue, 0);
}

#[tokio::test]
async fn coach_listing_bounds_its_paging() {
    let state = support::test_state().await;
    let db = state.db.as_ref();
    let (coach_user, _) = support::create_coach(db).await;

    let first = list_coaches(db, MAX_PAGE_SIZE, 1).await.expect("first page");
    assert_eq!(first.len(), 1);
    assert_eq!(first[0].name, coach_user.name);
    assert!(list_coaches(db, 10, 2).await.expect("second page").is_empty());

    for (per, page) in [(i64::MAX, 3), (MAX_PAGE_SIZE + 1, 1), (10, i64::MAX), (0, 1)] {
        let err = list_coaches(db, per, page).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
