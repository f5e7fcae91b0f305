//! Contract tests for the in-memory user repository.

use std::collections::BTreeSet;

use common::{AppError, UserValidError};
use domain::{Membership, User, ROLE_ADMIN, ROLE_USER};
use user_service_lib::repository::{CollectionUserRepository, UserRepository};

fn new_user(username: &str) -> User {
    User {
        id: None,
        username: username.to_string(),
        password: "hashed".to_string(),
        email: None,
        phone: None,
        age: None,
        membership: Membership::default(),
        roles: BTreeSet::from([ROLE_USER.to_string()]),
    }
}

#[tokio::test]
async fn test_save_assigns_ids() {
    let repo = CollectionUserRepository::new();

    let alice = repo.save(new_user("alice")).await.unwrap();
    let bob = repo.save(new_user("bob")).await.unwrap();

    assert_eq!(alice.id, Some(1));
    assert_eq!(bob.id, Some(2));
    assert_eq!(repo.find_by_id(2).await.unwrap().unwrap().username, "bob");
}

#[tokio::test]
async fn test_find_by_username_is_exact() {
    let repo = CollectionUserRepository::new();
    repo.save(new_user("alice")).await.unwrap();

    assert!(repo.find_by_username("alice").await.unwrap().is_some());
    assert!(repo.find_by_username("Alice").await.unwrap().is_none());
    assert!(repo.find_by_username("alice ").await.unwrap().is_none());
    assert!(repo.find_by_username("mallory").await.unwrap().is_none());
}

#[tokio::test]
async fn test_duplicate_username_rejected() {
    let repo = CollectionUserRepository::new();
    repo.save(new_user("alice")).await.unwrap();

    let err = repo.save(new_user("alice")).await.unwrap_err();
    assert!(matches!(err, AppError::Account(UserValidError::DuplicateUsername)));
    assert_eq!(repo.find_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_update_keeps_id_and_replaces_roles() {
    let repo = CollectionUserRepository::new();
    let mut alice = repo.save(new_user("alice")).await.unwrap();

    alice.set_roles(BTreeSet::from([ROLE_ADMIN.to_string(), ROLE_USER.to_string()]));
    alice.membership = Membership::Gold;
    let updated = repo.save(alice).await.unwrap();

    assert_eq!(updated.id, Some(1));
    let stored = repo.find_by_id(1).await.unwrap().unwrap();
    assert_eq!(stored.roles.len(), 2);
    assert_eq!(stored.membership, Membership::Gold);
    assert_eq!(repo.find_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_delete_is_permanent() {
    let repo = CollectionUserRepository::new();
    let alice = repo.save(new_user("alice")).await.unwrap();
    repo.save(new_user("bob")).await.unwrap();

    repo.delete(&alice).await.unwrap();

    assert!(repo.find_by_username("alice").await.unwrap().is_none());
    assert_eq!(repo.find_all().await.unwrap().len(), 1);

    // Username is free again, ids are not reused
    let again = repo.save(new_user("alice")).await.unwrap();
    assert_eq!(again.id, Some(3));
}

#[tokio::test]
async fn test_delete_unsaved_is_noop() {
    let repo = CollectionUserRepository::new();
    repo.save(new_user("alice")).await.unwrap();

    repo.delete(&new_user("alice")).await.unwrap();
    assert_eq!(repo.find_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_save_with_unknown_id_is_not_found() {
    let repo = CollectionUserRepository::new();

    let mut ghost = new_user("ghost");
    ghost.set_id(999);
    let err = repo.save(ghost).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound));

    let mut edge = new_user("edge");
    edge.set_id(i64::MAX);
    let err = repo.save(edge).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound));

    assert!(repo.find_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_save_after_delete_is_not_found() {
    let repo = CollectionUserRepository::new();
    let alice = repo.save(new_user("alice")).await.unwrap();
    repo.delete(&alice).await.unwrap();

    let err = repo.save(alice).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound));
}
