//! Tests for the registration service pipeline.

use std::sync::Arc;

use chrono::Utc;
use mockall::predicate::eq;
use rstest::rstest;

use super::*;
use crate::domain::ports::{MockPasswordHasher, MockUserRepository};
use crate::domain::{ErrorCode, PasswordHash, RegistrationParts, StoredUser, UserName};

const VALID_PASSWORD: &str = "aadsi8d!!%%s78dSd";

fn request(password: &str) -> RegistrationRequest {
    RegistrationRequest::try_from_parts(RegistrationParts {
        user_name: "apple",
        password,
        full_name: "Apples Apples",
        nick_name: None,
    })
    .expect("required fields present")
}

fn stored_from(user: &crate::domain::NewUser, id: i32) -> StoredUser {
    user.clone().into_stored(UserId::new(id), Utc::now())
}

fn service(
    repo: MockUserRepository,
    hasher: MockPasswordHasher,
) -> RegistrationService<MockUserRepository, MockPasswordHasher> {
    RegistrationService::new(Arc::new(repo), Arc::new(hasher))
}

fn hashing_hasher() -> MockPasswordHasher {
    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_hash()
        .times(1)
        .returning(|_| Ok(PasswordHash::new("$2b$12$hashed")));
    hasher
}

#[tokio::test]
async fn register_persists_hash_and_returns_view() {
    let mut repo = MockUserRepository::new();
    repo.expect_user_name_exists()
        .with(eq(UserName::new("apple").expect("user name")))
        .times(1)
        .returning(|_| Ok(false));
    repo.expect_insert()
        .withf(|user| {
            user.user_name().as_str() == "apple"
                && user.full_name() == "Apples Apples"
                && user.password_hash().as_str() == "$2b$12$hashed"
        })
        .times(1)
        .returning(|user| Ok(stored_from(user, 1)));

    let view = service(repo, hashing_hasher())
        .register(request(VALID_PASSWORD))
        .await
        .expect("registration succeeds");

    assert_eq!(view.id, UserId::new(1));
    assert_eq!(view.user_name, "apple");
    assert_eq!(view.full_name, "Apples Apples");
    assert!(view.nickname.is_none());
}

#[rstest]
#[case("1234567", "Password must be at least 8 characters")]
#[case(" 1Aa!2Bb@", "Password must not start or end with a space")]
#[case(
    "11AAAbbbb",
    "Password must contain at least one uppercase letter, one lowercase letter, one number, and one special character"
)]
#[tokio::test]
async fn policy_violation_stops_before_any_port_call(
    #[case] password: &str,
    #[case] expected: &str,
) {
    let mut repo = MockUserRepository::new();
    repo.expect_user_name_exists().times(0);
    repo.expect_insert().times(0);
    let mut hasher = MockPasswordHasher::new();
    hasher.expect_hash().times(0);

    let error = service(repo, hasher)
        .register(request(password))
        .await
        .expect_err("policy violation");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert_eq!(error.message(), expected);
}

#[tokio::test]
async fn taken_user_name_is_rejected_before_hashing() {
    let mut repo = MockUserRepository::new();
    repo.expect_user_name_exists()
        .times(1)
        .returning(|_| Ok(true));
    repo.expect_insert().times(0);
    let mut hasher = MockPasswordHasher::new();
    hasher.expect_hash().times(0);

    let error = service(repo, hasher)
        .register(request(VALID_PASSWORD))
        .await
        .expect_err("duplicate user name");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert_eq!(error.message(), USER_NAME_TAKEN_MESSAGE);
}

#[tokio::test]
async fn lost_insert_race_reports_taken_user_name() {
    let mut repo = MockUserRepository::new();
    repo.expect_user_name_exists()
        .times(1)
        .returning(|_| Ok(false));
    repo.expect_insert()
        .times(1)
        .returning(|_| Err(UserPersistenceError::duplicate_user_name()));

    let error = service(repo, hashing_hasher())
        .register(request(VALID_PASSWORD))
        .await
        .expect_err("duplicate on insert");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert_eq!(error.message(), USER_NAME_TAKEN_MESSAGE);
}

#[tokio::test]
async fn connection_failure_is_opaque_service_unavailable() {
    let mut repo = MockUserRepository::new();
    repo.expect_user_name_exists().times(1).returning(|_| {
        Err(UserPersistenceError::connection(
            "error connecting to server at db.internal:5432 user=admin",
        ))
    });

    let mut hasher = MockPasswordHasher::new();
    hasher.expect_hash().times(0);

    let error = service(repo, hasher)
        .register(request(VALID_PASSWORD))
        .await
        .expect_err("connection failure");

    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
    assert_eq!(error.message(), SERVICE_UNAVAILABLE_MESSAGE);
    let rendered = serde_json::to_string(&error).expect("serialise error");
    assert!(!rendered.contains("db.internal"), "leaked: {rendered}");
    assert!(!rendered.contains("admin"), "leaked: {rendered}");
}

#[tokio::test]
async fn connection_failure_on_lookup_is_opaque() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id()
        .times(1)
        .returning(|_| Err(UserPersistenceError::connection("timeout contacting db.internal")));

    let error = service(repo, MockPasswordHasher::new())
        .find_user(UserId::new(1))
        .await
        .expect_err("connection failure");

    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
    assert_eq!(error.message(), SERVICE_UNAVAILABLE_MESSAGE);
}

#[tokio::test]
async fn query_failure_on_insert_maps_to_internal_error() {
    let mut repo = MockUserRepository::new();
    repo.expect_user_name_exists()
        .times(1)
        .returning(|_| Ok(false));
    repo.expect_insert()
        .times(1)
        .returning(|_| Err(UserPersistenceError::query("syntax error")));

    let error = service(repo, hashing_hasher())
        .register(request(VALID_PASSWORD))
        .await
        .expect_err("query failure");

    assert_eq!(error.code(), ErrorCode::InternalError);
}

#[tokio::test]
async fn hashing_failure_maps_to_internal_error_without_insert() {
    let mut repo = MockUserRepository::new();
    repo.expect_user_name_exists()
        .times(1)
        .returning(|_| Ok(false));
    repo.expect_insert().times(0);
    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_hash()
        .times(1)
        .returning(|_| Err(PasswordHashError::hashing("cost out of range")));

    let error = service(repo, hasher)
        .register(request(VALID_PASSWORD))
        .await
        .expect_err("hashing failure");

    assert_eq!(error.code(), ErrorCode::InternalError);
}

#[tokio::test]
async fn find_user_returns_view() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id()
        .with(eq(UserId::new(9)))
        .times(1)
        .returning(|id| {
            let user = request(VALID_PASSWORD).into_new_user(PasswordHash::new("$2b$12$hashed"));
            Ok(Some(user.into_stored(id, Utc::now())))
        });

    let view = service(repo, MockPasswordHasher::new())
        .find_user(UserId::new(9))
        .await
        .expect("user exists");

    assert_eq!(view.id, UserId::new(9));
}

#[tokio::test]
async fn find_user_reports_missing_user() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id().times(1).returning(|_| Ok(None));

    let error = service(repo, MockPasswordHasher::new())
        .find_user(UserId::new(404))
        .await
        .expect_err("missing user");

    assert_eq!(error.code(), ErrorCode::NotFound);
    assert_eq!(error.message(), USER_NOT_FOUND_MESSAGE);
}
