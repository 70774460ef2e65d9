//! Tests for lazy user creation and the insert race.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::MockUserRepository;
use crate::domain::{ErrorCode, User, UserId};

#[fixture]
fn subject() -> Subject {
    Subject::new("auth0|first-login").expect("fixture subject")
}

fn stored_user(subject: &Subject) -> User {
    let at = Utc
        .with_ymd_and_hms(2026, 1, 2, 3, 4, 5)
        .single()
        .expect("fixture timestamp");
    User {
        id: UserId::new(11),
        subject: subject.clone(),
        created_at: at,
        updated_at: at,
    }
}

fn make_service(repo: MockUserRepository) -> IdentityService<MockUserRepository> {
    IdentityService::new(Arc::new(repo))
}

#[rstest]
#[tokio::test]
async fn returns_existing_user_without_inserting(subject: Subject) {
    let existing = stored_user(&subject);
    let mut repo = MockUserRepository::new();
    let found = existing.clone();
    repo.expect_find_by_subject()
        .times(1)
        .return_once(move |_| Ok(Some(found)));
    repo.expect_insert().never();

    let resolved = make_service(repo)
        .resolve_or_create(&subject)
        .await
        .expect("existing user resolves");

    assert_eq!(resolved.user, existing);
    assert!(!resolved.is_new);
}

#[rstest]
#[tokio::test]
async fn inserts_unknown_subject(subject: Subject) {
    let created = stored_user(&subject);
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_subject()
        .times(1)
        .return_once(|_| Ok(None));
    let inserted = created.clone();
    repo.expect_insert()
        .times(1)
        .withf(|s| s.as_ref() == "auth0|first-login")
        .return_once(move |_| Ok(inserted));

    let resolved = make_service(repo)
        .resolve_or_create(&subject)
        .await
        .expect("new user resolves");

    assert_eq!(resolved.user, created);
    assert!(resolved.is_new);
}

#[rstest]
#[tokio::test]
async fn losing_the_insert_race_rereads_the_winner(subject: Subject) {
    let winner = stored_user(&subject);
    let mut repo = MockUserRepository::new();
    let mut lookups = 0;
    let reread = winner.clone();
    repo.expect_find_by_subject().times(2).returning(move |_| {
        lookups += 1;
        Ok((lookups == 2).then(|| reread.clone()))
    });
    repo.expect_insert()
        .times(1)
        .return_once(|s| Err(UserRepositoryError::duplicate_subject(s.as_ref())));

    let resolved = make_service(repo)
        .resolve_or_create(&subject)
        .await
        .expect("race resolves to winner");

    assert_eq!(resolved.user, winner);
    assert!(!resolved.is_new);
}

#[rstest]
#[tokio::test]
async fn duplicate_without_visible_winner_is_a_conflict(subject: Subject) {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_subject()
        .times(2)
        .returning(|_| Ok(None));
    repo.expect_insert()
        .times(1)
        .return_once(|s| Err(UserRepositoryError::duplicate_subject(s.as_ref())));

    let err = make_service(repo)
        .resolve_or_create(&subject)
        .await
        .expect_err("unresolved duplicate");

    assert_eq!(err.code(), ErrorCode::Conflict);
}

#[rstest]
#[case(UserRepositoryError::connection("refused"), ErrorCode::ServiceUnavailable)]
#[case(UserRepositoryError::query("syntax"), ErrorCode::InternalError)]
#[tokio::test]
async fn lookup_failures_propagate(
    subject: Subject,
    #[case] failure: UserRepositoryError,
    #[case] expected: ErrorCode,
) {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_subject()
        .times(1)
        .return_once(move |_| Err(failure));
    repo.expect_insert().never();

    let err = make_service(repo)
        .resolve_or_create(&subject)
        .await
        .expect_err("lookup failure");

    assert_eq!(err.code(), expected);
}
