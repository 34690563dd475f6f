use std::fmt;

use chrono::NaiveDate;

use gymdesk_data::Membership;

use crate::datetime::{days_remaining, parse_date};
use crate::Result;

/// Number of days before expiry during which a membership
/// counts as expiring soon (inclusive).
pub const EXPIRING_SOON_DAYS: i64 = 5;

/// Thresholds used when classifying memberships.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusPolicy {
    pub expiring_soon_days: i64,
}

impl Default for StatusPolicy {
    fn default() -> Self {
        Self {
            expiring_soon_days: EXPIRING_SOON_DAYS,
        }
    }
}

impl StatusPolicy {
    /// Not yet expired: expiring soon memberships included.
    pub fn is_active(&self, days_remaining: i64) -> bool {
        days_remaining >= 0
    }

    pub fn is_expiring_soon(&self, days_remaining: i64) -> bool {
        (0..=self.expiring_soon_days).contains(&days_remaining)
    }

    pub fn is_expired(&self, days_remaining: i64) -> bool {
        days_remaining < 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MembershipStatus {
    Expired,
    ExpiringSoon,
    Active,
}

impl MembershipStatus {
    pub fn from_days_remaining(days_remaining: i64, policy: &StatusPolicy) -> Self {
        if policy.is_expired(days_remaining) {
            MembershipStatus::Expired
        } else if policy.is_expiring_soon(days_remaining) {
            MembershipStatus::ExpiringSoon
        } else {
            MembershipStatus::Active
        }
    }
}

impl fmt::Display for MembershipStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MembershipStatus::Expired => "Expired",
            MembershipStatus::ExpiringSoon => "Expiring",
            MembershipStatus::Active => "Active",
        };
        f.pad(label)
    }
}

/// Days remaining and the resulting status of a membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub days_remaining: i64,
    pub status: MembershipStatus,
}

impl Classification {
    /// Badge text, e.g. `Expired (3 days ago)` or `Active (12 days left)`.
    pub fn describe(&self) -> String {
        match self.status {
            MembershipStatus::Expired => {
                format!("{} ({} days ago)", self.status, self.days_remaining.abs())
            }
            _ => format!("{} ({} days left)", self.status, self.days_remaining),
        }
    }
}

/// Classify an already parsed expiry date.
pub fn classify_date(
    today: NaiveDate,
    expiry: NaiveDate,
    policy: &StatusPolicy,
) -> Classification {
    let days_remaining = days_remaining(today, expiry);
    Classification {
        days_remaining,
        status: MembershipStatus::from_days_remaining(days_remaining, policy),
    }
}

/// Classify a membership expiring at `expiry_date` (`YYYY-MM-DD`).
pub fn classify(
    today: NaiveDate,
    expiry_date: &str,
    policy: &StatusPolicy,
) -> Result<Classification> {
    let expiry = parse_date("expiry", expiry_date)?;
    Ok(classify_date(today, expiry, policy))
}

pub trait Classify {
    /// Classify relative to `today`.
    fn classify(&self, today: NaiveDate, policy: &StatusPolicy) -> Result<Classification>;
}

impl Classify for Membership {
    fn classify(&self, today: NaiveDate, policy: &StatusPolicy) -> Result<Classification> {
        classify(today, &self.expiry_date, policy)
    }
}
