// SPDX-License-Identifier: MIT

//! Store-level tests for user CRUD and invariants.

use chirper::db::StoreError;

mod common;

#[test]
fn test_create_user_and_lookup_by_email() {
    let tmp = common::TempDb::new();
    let store = tmp.open();

    let created = store.create_user("alice@example.com", "hash1").unwrap();
    assert_eq!(created.id, 1);
    assert!(!created.is_chirpy_red);

    let found = store.get_user_by_email("alice@example.com").unwrap();
    assert_eq!(found.id, created.id);
    assert_eq!(found.email, "alice@example.com");
    assert_eq!(found.password, "hash1");
}

#[test]
fn test_duplicate_email_rejected() {
    let tmp = common::TempDb::new();
    let store = tmp.open();

    store.create_user("alice@example.com", "hash1").unwrap();
    let err = store.create_user("alice@example.com", "hash2").unwrap_err();
    assert!(matches!(err, StoreError::DuplicateEmail));
}

#[test]
fn test_email_lookup_is_case_sensitive() {
    let tmp = common::TempDb::new();
    let store = tmp.open();

    store.create_user("Alice@example.com", "hash1").unwrap();

    // A differently-cased address is a different user
    let other = store.create_user("alice@example.com", "hash2").unwrap();
    assert_eq!(other.id, 2);

    let err = store.get_user_by_email("ALICE@example.com").unwrap_err();
    assert!(matches!(err, StoreError::NotFound { .. }));
}

#[test]
fn test_sequential_user_ids() {
    let tmp = common::TempDb::new();
    let store = tmp.open();

    for (i, email) in ["a@x.com", "b@x.com", "c@x.com"].iter().enumerate() {
        let user = store.create_user(email, "hash").unwrap();
        assert_eq!(user.id, i as u64 + 1);
    }
}

#[test]
fn test_update_user_preserves_upgrade_flag() {
    let tmp = common::TempDb::new();
    let store = tmp.open();

    let user = store.create_user("alice@example.com", "hash1").unwrap();
    store.upgrade_user(user.id).unwrap();

    let updated = store
        .update_user(user.id, "alice2@example.com", "hash2")
        .unwrap();
    assert_eq!(updated.id, user.id);
    assert_eq!(updated.email, "alice2@example.com");
    assert_eq!(updated.password, "hash2");
    assert!(updated.is_chirpy_red);
}

#[test]
fn test_update_user_keeping_own_email() {
    let tmp = common::TempDb::new();
    let store = tmp.open();

    let user = store.create_user("alice@example.com", "hash1").unwrap();
    // Re-using your own email is not a collision
    let updated = store
        .update_user(user.id, "alice@example.com", "hash2")
        .unwrap();
    assert_eq!(updated.email, "alice@example.com");
    assert_eq!(updated.password, "hash2");
}

#[test]
fn test_update_user_email_collision() {
    let tmp = common::TempDb::new();
    let store = tmp.open();

    store.create_user("alice@example.com", "hash1").unwrap();
    let bob = store.create_user("bob@example.com", "hash2").unwrap();

    let err = store
        .update_user(bob.id, "alice@example.com", "hash3")
        .unwrap_err();
    assert!(matches!(err, StoreError::DuplicateEmail));
}

#[test]
fn test_update_unknown_user() {
    let tmp = common::TempDb::new();
    let store = tmp.open();

    let err = store.update_user(99, "x@x.com", "hash").unwrap_err();
    assert!(matches!(err, StoreError::NotFound { .. }));
}

#[test]
fn test_upgrade_user_is_idempotent() {
    let tmp = common::TempDb::new();
    let store = tmp.open();

    let user = store.create_user("alice@example.com", "hash").unwrap();
    let first = store.upgrade_user(user.id).unwrap();
    assert!(first.is_chirpy_red);

    let second = store.upgrade_user(user.id).unwrap();
    assert!(second.is_chirpy_red);
}

#[test]
fn test_upgrade_unknown_user() {
    let tmp = common::TempDb::new();
    let store = tmp.open();

    let err = store.upgrade_user(7).unwrap_err();
    assert!(matches!(err, StoreError::NotFound { .. }));
}

#[test]
fn test_get_users_sorted_by_id() {
    let tmp = common::TempDb::new();
    let store = tmp.open();

    assert!(store.get_users().unwrap().is_empty());

    store.create_user("a@x.com", "hash").unwrap();
    store.create_user("b@x.com", "hash").unwrap();
    store.create_user("c@x.com", "hash").unwrap();

    let ids: Vec<u64> = store.get_users().unwrap().iter().map(|u| u.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[test]
fn test_get_user_by_id_not_found() {
    let tmp = common::TempDb::new();
    let store = tmp.open();

    let err = store.get_user_by_id(1).unwrap_err();
    assert!(matches!(err, StoreError::NotFound { .. }));
}
