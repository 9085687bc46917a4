//! Booking domain entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::user::User;
use crate::domain::{DomainError, DomainResult};

/// Half-open stay `[from, till)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingPeriod {
    pub from: DateTime<Utc>,
    pub till: DateTime<Utc>,
}

impl BookingPeriod {
    /// Validate a requested stay against the current time.
    pub fn new(from: DateTime<Utc>, till: DateTime<Utc>, now: DateTime<Utc>) -> DomainResult<Self> {
        if from < now || till < now {
            return Err(DomainError::Validation("cannot book a room in the past".into()));
        }
        if till <= from {
            return Err(DomainError::Validation("tillDate must be after fromDate".into()));
        }
        Ok(Self { from, till })
    }

    pub fn nights(&self) -> i64 {
        (self.till - self.from).num_days()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: String,
    pub user_id: String,
    pub room_id: String,
    pub num_persons: i32,
    pub from_date: DateTime<Utc>,
    pub till_date: DateTime<Utc>,
    pub canceled: bool,
    pub created_at: DateTime<Utc>,
}

impl Booking {
    pub fn new(
        user_id: impl Into<String>,
        room_id: impl Into<String>,
        num_persons: i32,
        period: BookingPeriod,
    ) -> DomainResult<Self> {
        if num_persons < 1 {
            return Err(DomainError::Validation("numPersons must be at least 1".into()));
        }
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.into(),
            room_id: room_id.into(),
            num_persons,
            from_date: period.from,
            till_date: period.till,
            canceled: false,
            created_at: Utc::now(),
        })
    }

    pub fn is_visible_to(&self, user: &User) -> bool {
        user.is_admin() || self.user_id == user.id
    }

    pub fn cancel(&mut self) -> DomainResult<()> {
        if self.canceled {
            return Err(DomainError::Validation("booking already canceled".into()));
        }
        self.canceled = true;
        Ok(())
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::UserRole;
    use chrono::Duration;

    fn period(from_days: i64, till_days: i64) -> BookingPeriod {
        let now = Utc::now();
        BookingPeriod::new(now + Duration::days(from_days), now + Duration::days(till_days), now)
            .unwrap()
    }

    #[test]
    fn past_dates_are_rejected() {
        let now = Utc::now();
        let err = BookingPeriod::new(now - Duration::days(1), now + Duration::days(2), now).unwrap_err();
        assert_eq!(err.to_string(), "Validation: cannot book a room in the past");
    }

    #[test]
    fn till_must_follow_from() {
        let now = Utc::now();
        let from = now + Duration::days(3);
        assert!(BookingPeriod::new(from, from, now).is_err());
        assert!(BookingPeriod::new(from, from - Duration::days(1), now).is_err());
    }

    #[test]
    fn nights_counts_whole_days() {
        assert_eq!(period(1, 6).nights(), 5);
    }

    #[test]
    fn requires_at_least_one_person() {
        assert!(Booking::new("u", "r", 0, period(1, 2)).is_err());
    }

    #[test]
    fn cancel_twice_fails() {
        let mut b = Booking::new("u", "r", 2, period(1, 2)).unwrap();
        b.cancel().unwrap();
        assert!(b.canceled);
        let err = b.cancel().unwrap_err();
        assert_eq!(err.to_string(), "Validation: booking already canceled");
    }

    #[test]
    fn visible_to_owner_and_admin_only() {
        let owner = User::new("James", "Foo", "james@foo.com", "h", UserRole::Customer);
        let other = User::new("Jane", "Doe", "jane@doe.com", "h", UserRole::Customer);
        let admin = User::new("Admin", "Admin", "admin@admin.com", "h", UserRole::Admin);

        let b = Booking::new(owner.id.clone(), "r", 1, period(1, 2)).unwrap();
        assert!(b.is_visible_to(&owner));
        assert!(b.is_visible_to(&admin));
        assert!(!b.is_visible_to(&other));
    }
}
