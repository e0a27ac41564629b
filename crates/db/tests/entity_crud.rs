//! Integration tests for user, batch and session CRUD operations.
//!
//! Exercises the repository layer against a real database:
//! - Create / read / partial update / hard delete for every entity
//! - Unique and foreign key constraint violations
//! - `updated_at` refresh on update

use std::collections::BTreeMap;

use fincount_core::catalog::{Location, Species, UserType};
use fincount_db::models::batch::{CreateBatch, UpdateBatch};
use fincount_db::models::session::{CreateSession, UpdateSession};
use fincount_db::models::user::{CreateUser, UpdateUser, User};
use fincount_db::repositories::{BatchRepo, SessionRepo, UserRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_user(username: &str, user_type: UserType) -> CreateUser {
    CreateUser {
        username: username.to_string(),
        full_name: format!("{username} Full"),
        user_type,
        password_hash: "$argon2id$placeholder".to_string(),
    }
}

fn new_batch(id: Option<&str>, name: &str, user_id: &str) -> CreateBatch {
    CreateBatch {
        id: id.map(str::to_string),
        name: name.to_string(),
        description: None,
        user_id: user_id.to_string(),
        is_active: None,
    }
}

fn new_session(batch_id: &str, user_id: &str) -> CreateSession {
    CreateSession {
        batch_id: batch_id.to_string(),
        user_id: user_id.to_string(),
        species: Species::Tilapia,
        location: Location::Southern,
        notes: Some("morning count".to_string()),
        counts: BTreeMap::from([("Fish".to_string(), 150)]),
        timestamp: "2025-11-20T23:00:00".to_string(),
        image_url: None,
    }
}

async fn seed_user(pool: &PgPool, username: &str) -> User {
    UserRepo::create(pool, &new_user(username, UserType::Admin))
        .await
        .unwrap()
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_user_create_and_lookup(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("alice", UserType::Staff))
        .await
        .unwrap();
    assert_eq!(user.username, "alice");
    assert_eq!(user.user_type, "Staff");
    assert!(!user.is_admin());
    assert!(!user.id.is_empty());

    let by_id = UserRepo::find_by_id(&pool, &user.id).await.unwrap().unwrap();
    assert_eq!(by_id.username, "alice");

    let by_name = UserRepo::find_by_username(&pool, "alice")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(by_name.id, user.id);

    // Lookups are case-sensitive.
    assert!(UserRepo::find_by_username(&pool, "Alice")
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_duplicate_username_violates_unique_constraint(pool: PgPool) {
    seed_user(&pool, "dup").await;
    let err = UserRepo::create(&pool, &new_user("dup", UserType::Staff))
        .await
        .unwrap_err();

    match err {
        sqlx::Error::Database(db_err) => {
            assert_eq!(db_err.code().as_deref(), Some("23505"));
            assert_eq!(db_err.constraint(), Some("uq_users_username"));
        }
        other => panic!("expected database error, got {other:?}"),
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_user_partial_update_refreshes_updated_at(pool: PgPool) {
    let user = seed_user(&pool, "updater").await;

    let input = UpdateUser {
        full_name: Some("New Name".to_string()),
        ..Default::default()
    };
    let updated = UserRepo::update(&pool, &user.id, &input)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.full_name, "New Name");
    assert_eq!(updated.user_type, "Admin");
    assert_eq!(updated.password_hash, user.password_hash);
    assert!(updated.updated_at >= user.updated_at);

    let missing = UserRepo::update(&pool, "no-such-user", &input).await.unwrap();
    assert!(missing.is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_first_by_type_and_any(pool: PgPool) {
    assert!(UserRepo::find_any(&pool).await.unwrap().is_none());
    assert_eq!(UserRepo::count(&pool).await.unwrap(), 0);

    let staff = UserRepo::create(&pool, &new_user("staff", UserType::Staff))
        .await
        .unwrap();
    assert!(UserRepo::find_first_by_type(&pool, UserType::Admin)
        .await
        .unwrap()
        .is_none());
    assert_eq!(UserRepo::find_any(&pool).await.unwrap().unwrap().id, staff.id);

    let admin = seed_user(&pool, "boss").await;
    let first_admin = UserRepo::find_first_by_type(&pool, UserType::Admin)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(first_admin.id, admin.id);
    assert_eq!(UserRepo::count(&pool).await.unwrap(), 2);
    assert_eq!(UserRepo::list(&pool).await.unwrap().len(), 2);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_user_delete(pool: PgPool) {
    let user = seed_user(&pool, "goner").await;
    assert!(UserRepo::delete(&pool, &user.id).await.unwrap());
    assert!(!UserRepo::delete(&pool, &user.id).await.unwrap());
    assert!(UserRepo::find_by_id(&pool, &user.id).await.unwrap().is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_user_delete_blocked_while_owning_batches(pool: PgPool) {
    let user = seed_user(&pool, "owner").await;
    BatchRepo::create(&pool, &new_batch(None, "Pond", &user.id))
        .await
        .unwrap();

    let err = UserRepo::delete(&pool, &user.id).await.unwrap_err();
    match err {
        sqlx::Error::Database(db_err) => assert_eq!(db_err.code().as_deref(), Some("23503")),
        other => panic!("expected foreign key violation, got {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Batches
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_batch_defaults(pool: PgPool) {
    let user = seed_user(&pool, "batcher").await;
    let batch = BatchRepo::create(&pool, &new_batch(None, "Pond A", &user.id))
        .await
        .unwrap();

    assert_eq!(batch.name, "Pond A");
    assert_eq!(batch.user_id, user.id);
    assert_eq!(batch.total_count, 0);
    assert!(batch.is_active);
    assert!(batch.description.is_none());
    assert!(!batch.id.is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_batch_with_caller_id(pool: PgPool) {
    let user = seed_user(&pool, "batcher").await;
    let batch = BatchRepo::create(&pool, &new_batch(Some("BF-1"), "Pond B", &user.id))
        .await
        .unwrap();
    assert_eq!(batch.id, "BF-1");
    assert!(BatchRepo::exists(&pool, "BF-1").await.unwrap());
    assert!(!BatchRepo::exists(&pool, "BF-2").await.unwrap());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_batch_requires_existing_owner(pool: PgPool) {
    let err = BatchRepo::create(&pool, &new_batch(None, "Orphan", "missing-user"))
        .await
        .unwrap_err();
    match err {
        sqlx::Error::Database(db_err) => assert_eq!(db_err.code().as_deref(), Some("23503")),
        other => panic!("expected foreign key violation, got {other:?}"),
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_batch_update_and_delete(pool: PgPool) {
    let user = seed_user(&pool, "batcher").await;
    let batch = BatchRepo::create(&pool, &new_batch(None, "Original", &user.id))
        .await
        .unwrap();

    let input = UpdateBatch {
        is_active: Some(false),
        ..Default::default()
    };
    let updated = BatchRepo::update(&pool, &batch.id, &input)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.name, "Original");
    assert!(!updated.is_active);
    assert!(updated.updated_at >= batch.updated_at);

    assert!(BatchRepo::delete(&pool, &batch.id).await.unwrap());
    assert!(BatchRepo::find_by_id(&pool, &batch.id).await.unwrap().is_none());
    assert!(BatchRepo::update(&pool, &batch.id, &input)
        .await
        .unwrap()
        .is_none());
}

// ---------------------------------------------------------------------------
// Sessions
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_session_create_round_trip(pool: PgPool) {
    let user = seed_user(&pool, "counter").await;
    BatchRepo::create(&pool, &new_batch(Some("BF-1"), "Pond", &user.id))
        .await
        .unwrap();

    let session = SessionRepo::create(&pool, &new_session("BF-1", &user.id))
        .await
        .unwrap();
    let fetched = SessionRepo::find_by_id(&pool, &session.id)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(fetched.batch_id, "BF-1");
    assert_eq!(fetched.species, "Tilapia");
    assert_eq!(fetched.location, "Southern");
    assert_eq!(fetched.notes.as_deref(), Some("morning count"));
    assert_eq!(fetched.counts.0.get("Fish"), Some(&150));
    assert_eq!(fetched.timestamp, "2025-11-20T23:00:00");
    assert!(fetched.image_url.is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_session_requires_existing_batch(pool: PgPool) {
    let user = seed_user(&pool, "counter").await;
    let err = SessionRepo::create(&pool, &new_session("nope", &user.id))
        .await
        .unwrap_err();
    match err {
        sqlx::Error::Database(db_err) => assert_eq!(db_err.code().as_deref(), Some("23503")),
        other => panic!("expected foreign key violation, got {other:?}"),
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_session_partial_update(pool: PgPool) {
    let user = seed_user(&pool, "counter").await;
    BatchRepo::create(&pool, &new_batch(Some("BF-1"), "Pond", &user.id))
        .await
        .unwrap();
    let session = SessionRepo::create(&pool, &new_session("BF-1", &user.id))
        .await
        .unwrap();

    let input = UpdateSession {
        species: Some(Species::Bangus),
        counts: Some(BTreeMap::from([
            ("Fish".to_string(), 151),
            ("Dead".to_string(), 2),
        ])),
        ..Default::default()
    };
    let updated = SessionRepo::update(&pool, &session.id, &input)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.species, "Bangus (Milkfish)");
    assert_eq!(updated.location, "Southern");
    assert_eq!(updated.notes.as_deref(), Some("morning count"));
    assert_eq!(updated.counts.0.len(), 2);
    assert_eq!(updated.timestamp, session.timestamp);
    assert!(updated.updated_at >= session.updated_at);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_session_listing_and_delete(pool: PgPool) {
    let user = seed_user(&pool, "counter").await;
    BatchRepo::create(&pool, &new_batch(Some("BF-1"), "Pond 1", &user.id))
        .await
        .unwrap();
    BatchRepo::create(&pool, &new_batch(Some("BF-2"), "Pond 2", &user.id))
        .await
        .unwrap();
    for _ in 0..3 {
        SessionRepo::create(&pool, &new_session("BF-1", &user.id))
            .await
            .unwrap();
    }
    let other = SessionRepo::create(&pool, &new_session("BF-2", &user.id))
        .await
        .unwrap();

    assert_eq!(SessionRepo::count(&pool).await.unwrap(), 4);
    assert_eq!(SessionRepo::list(&pool).await.unwrap().len(), 4);
    assert_eq!(SessionRepo::list_page(&pool, 2, 0).await.unwrap().len(), 2);
    assert_eq!(SessionRepo::list_page(&pool, 2, 2).await.unwrap().len(), 2);
    assert!(SessionRepo::list_page(&pool, 2, 4).await.unwrap().is_empty());
    assert_eq!(SessionRepo::list_by_batch(&pool, "BF-1").await.unwrap().len(), 3);
    assert_eq!(SessionRepo::count_by_batch(&pool, "BF-2").await.unwrap(), 1);

    assert!(SessionRepo::delete(&pool, &other.id).await.unwrap());
    assert!(!SessionRepo::delete(&pool, &other.id).await.unwrap());
    assert_eq!(SessionRepo::count_by_batch(&pool, "BF-2").await.unwrap(), 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_batch_delete_blocked_while_sessions_exist(pool: PgPool) {
    let user = seed_user(&pool, "counter").await;
    BatchRepo::create(&pool, &new_batch(Some("BF-1"), "Pond", &user.id))
        .await
        .unwrap();
    SessionRepo::create(&pool, &new_session("BF-1", &user.id))
        .await
        .unwrap();

    let err = BatchRepo::delete(&pool, "BF-1").await.unwrap_err();
    match err {
        sqlx::Error::Database(db_err) => assert_eq!(db_err.code().as_deref(), Some("23503")),
        other => panic!("expected foreign key violation, got {other:?}"),
    }
    assert!(BatchRepo::exists(&pool, "BF-1").await.unwrap());
}
