//! Subscription plan rules.

use chrono::Months;

use crate::error::CoreError;
use crate::types::Timestamp;

/// Icon identifiers a plan may display. Anything else is rejected.
pub const VALID_ICONS: &[&str] = &[
    "crown",
    "star",
    "gem",
    "rocket",
    "zap",
    "shield",
    "book-open",
    "graduation-cap",
    "award",
    "trophy",
    "key",
    "lock",
    "certificate",
    "medal",
    "sun",
    "moon",
    "heart",
    "flame",
];

/// Validate a plan's icon name.
pub fn validate_icon(icon: &str) -> Result<(), CoreError> {
    if VALID_ICONS.contains(&icon) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Unknown subscription icon '{icon}'"
        )))
    }
}

/// Expiry for a subscription of `months` starting at `now`.
pub fn expiry_from(now: Timestamp, months: i32) -> Result<Timestamp, CoreError> {
    if months < 1 {
        return Err(CoreError::Validation(
            "Subscription duration must be at least one month".into(),
        ));
    }
    now.checked_add_months(Months::new(months as u32))
        .ok_or_else(|| CoreError::Validation("Subscription expiry out of range".into()))
}

/// Is a subscription with the given expiry still active at `now`?
pub fn is_active(expires_at: Option<Timestamp>, now: Timestamp) -> bool {
    expires_at.is_some_and(|at| at > now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    #[test]
    fn expiry_adds_calendar_months() {
        let now = Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap();
        let expiry = expiry_from(now, 3).unwrap();
        assert_eq!(expiry, Utc.with_ymd_and_hms(2026, 4, 15, 12, 0, 0).unwrap());
    }

    #[test]
    fn zero_months_rejected() {
        let now = Utc::now();
        assert!(expiry_from(now, 0).is_err());
    }

    #[test]
    fn activity_window() {
        let now = Utc::now();
        assert!(is_active(Some(now + Duration::days(1)), now));
        assert!(!is_active(Some(now - Duration::days(1)), now));
        assert!(!is_active(None, now));
    }

    #[test]
    fn icon_validation() {
        assert!(validate_icon("crown").is_ok());
        assert!(validate_icon("dragon").is_err());
    }
}
