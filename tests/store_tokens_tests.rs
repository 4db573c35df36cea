// SPDX-License-Identifier: MIT

//! Refresh-token lifecycle tests: absent -> active -> expired/revoked.

use chirper::db::{StoreError, REFRESH_TOKEN_TTL_DAYS};
use chrono::{Duration, Utc};

mod common;

#[test]
fn test_create_then_validate_returns_user_id() {
    let tmp = common::TempDb::new();
    let store = tmp.open();

    store.create_refresh_token("token-a", 7).unwrap();
    assert_eq!(store.validate_refresh_token("token-a").unwrap(), 7);

    // Validation does not consume the token
    assert_eq!(store.validate_refresh_token("token-a").unwrap(), 7);
}

#[test]
fn test_validate_unknown_token() {
    let tmp = common::TempDb::new();
    let store = tmp.open();

    let err = store.validate_refresh_token("missing").unwrap_err();
    assert!(matches!(err, StoreError::NotFound { .. }));
}

#[test]
fn test_revoked_token_is_gone() {
    let tmp = common::TempDb::new();
    let store = tmp.open();

    store.create_refresh_token("token-a", 7).unwrap();
    store.revoke_refresh_token("token-a").unwrap();

    let err = store.validate_refresh_token("token-a").unwrap_err();
    assert!(matches!(err, StoreError::NotFound { .. }));
}

#[test]
fn test_revoke_unknown_token_is_noop() {
    let tmp = common::TempDb::new();
    let store = tmp.open();

    store.revoke_refresh_token("never-existed").unwrap();
}

#[test]
fn test_expiry_at_sixty_days() {
    let tmp = common::TempDb::new();
    let store = tmp.open();

    store.create_refresh_token("token-a", 7).unwrap();

    // One day before the deadline the token is still good
    let almost = Utc::now() + Duration::days(REFRESH_TOKEN_TTL_DAYS - 1);
    assert_eq!(store.validate_refresh_token_at("token-a", almost).unwrap(), 7);

    // At or past the deadline it is expired
    let past = Utc::now() + Duration::days(REFRESH_TOKEN_TTL_DAYS);
    let err = store.validate_refresh_token_at("token-a", past).unwrap_err();
    assert!(matches!(err, StoreError::ExpiredToken));
}

#[test]
fn test_expired_token_stays_on_disk_until_revoked() {
    let tmp = common::TempDb::new();
    let store = tmp.open();

    store.create_refresh_token("token-a", 7).unwrap();

    let past = Utc::now() + Duration::days(REFRESH_TOKEN_TTL_DAYS + 5);
    // Expired, not missing
    let err = store.validate_refresh_token_at("token-a", past).unwrap_err();
    assert!(matches!(err, StoreError::ExpiredToken));

    store.revoke_refresh_token("token-a").unwrap();
    let err = store.validate_refresh_token_at("token-a", past).unwrap_err();
    assert!(matches!(err, StoreError::NotFound { .. }));
}

#[test]
fn test_double_insertion_overwrites() {
    let tmp = common::TempDb::new();
    let store = tmp.open();

    store.create_refresh_token("token-a", 1).unwrap();
    store.create_refresh_token("token-a", 2).unwrap();

    assert_eq!(store.validate_refresh_token("token-a").unwrap(), 2);
}
