// tests/support/mocks/security.rs
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use quill_core::{
    application::{
        ApplicationResult,
        dto::{AuthTokenDto, AuthenticatedUser, TokenSubject},
        error::ApplicationError,
        ports::security::TokenManager,
    },
    domain::user::{Capability, DisplayName, UserId},
};
use std::collections::HashSet;

/// Member with every publication right.
pub const TEST_TOKEN: &str = "test-token";
/// Second member, used to show guards are per caller.
pub const OTHER_TOKEN: &str = "other-token";
/// May comment but not publish or upload.
pub const READER_TOKEN: &str = "reader-token";
pub const EXPIRED_TOKEN: &str = "expired-token";

#[derive(Clone, Debug, Default)]
pub struct DummyTokenManager;

#[async_trait]
impl TokenManager for DummyTokenManager {
    async fn issue(&self, _subject: TokenSubject) -> ApplicationResult<AuthTokenDto> {
        Err(ApplicationError::infrastructure("not implemented"))
    }

    async fn authenticate(&self, token: &str) -> ApplicationResult<AuthenticatedUser> {
        match token {
            TEST_TOKEN => Ok(member_user()),
            OTHER_TOKEN => Ok(other_user()),
            READER_TOKEN => Ok(reader_user()),
            EXPIRED_TOKEN => Err(ApplicationError::unauthorized("expired token")),
            _ => Err(ApplicationError::unauthorized("invalid token")),
        }
    }
}

fn user(id: i64, name: &str, capabilities: HashSet<Capability>) -> AuthenticatedUser {
    let now: DateTime<Utc> = super::time::fixed_now();
    AuthenticatedUser {
        id: UserId::new(id).expect("invalid user id"),
        display_name: DisplayName::new(name).expect("invalid display name"),
        capabilities,
        issued_at: now,
        expires_at: now + Duration::hours(1),
    }
}

pub fn member_user() -> AuthenticatedUser {
    user(1, "tester", Capability::member_defaults())
}

pub fn other_user() -> AuthenticatedUser {
    user(3, "other", Capability::member_defaults())
}

/// Signed in, but holds no rights at all.
pub fn viewer_user() -> AuthenticatedUser {
    user(4, "viewer", HashSet::new())
}

pub fn reader_user() -> AuthenticatedUser {
    user(
        2,
        "reader",
        HashSet::from([Capability::new("comments", "create")]),
    )
}
