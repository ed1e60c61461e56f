//! Ban state evaluation.
//!
//! A permanently banned user has `banned_at` set and no expiry; a temporary
//! ban carries both. An expired temporary ban must be cleared by the caller
//! (the authorization guard persists the clear before letting the request
//! proceed).

use crate::types::Timestamp;

/// Outcome of evaluating a user's ban fields at a point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BanStatus {
    /// No ban recorded.
    NotBanned,
    /// Banned with no expiry.
    Permanent { reason: Option<String> },
    /// Banned until `expires_at` (still in the future).
    Temporary {
        reason: Option<String>,
        expires_at: Timestamp,
    },
    /// A temporary ban whose expiry has passed; the guard must clear the ban
    /// fields and restore `is_active` before proceeding.
    Expired,
}

/// Evaluate ban fields against `now`.
pub fn evaluate(
    banned_at: Option<Timestamp>,
    ban_expire_at: Option<Timestamp>,
    reason: Option<&str>,
    now: Timestamp,
) -> BanStatus {
    match (banned_at, ban_expire_at) {
        (None, _) => BanStatus::NotBanned,
        (Some(_), None) => BanStatus::Permanent {
            reason: reason.map(str::to_owned),
        },
        (Some(_), Some(expires_at)) if expires_at > now => BanStatus::Temporary {
            reason: reason.map(str::to_owned),
            expires_at,
        },
        (Some(_), Some(_)) => BanStatus::Expired,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    #[test]
    fn no_ban_fields_means_not_banned() {
        let now = Utc::now();
        assert_eq!(evaluate(None, None, None, now), BanStatus::NotBanned);
        // An orphaned expiry without banned_at is not a ban.
        assert_eq!(
            evaluate(None, Some(now + Duration::days(1)), None, now),
            BanStatus::NotBanned
        );
    }

    #[test]
    fn banned_without_expiry_is_permanent() {
        let now = Utc::now();
        let status = evaluate(Some(now - Duration::days(3)), None, Some("abuse"), now);
        assert_eq!(
            status,
            BanStatus::Permanent {
                reason: Some("abuse".into())
            }
        );
    }

    #[test]
    fn future_expiry_is_temporary() {
        let now = Utc::now();
        let until = now + Duration::hours(6);
        let status = evaluate(Some(now - Duration::days(1)), Some(until), None, now);
        assert_eq!(
            status,
            BanStatus::Temporary {
                reason: None,
                expires_at: until
            }
        );
    }

    #[test]
    fn past_expiry_is_expired() {
        let now = Utc::now();
        let status = evaluate(
            Some(now - Duration::days(2)),
            Some(now - Duration::hours(1)),
            Some("spam"),
            now,
        );
        assert_eq!(status, BanStatus::Expired);
    }
}
