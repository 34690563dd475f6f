use chrono::NaiveDate;

use gymdesk_data::Membership;

use crate::status::{Classification, Classify, StatusPolicy};
use crate::Result;

/// Dashboard counters over a snapshot of memberships.
///
/// `active` counts every membership that has not expired yet,
/// so `expiring_soon` is a subset of it.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MembershipStats {
    pub active: usize,
    pub expiring_soon: usize,
    pub expired: usize,
    pub total_revenue: f64,
}

impl MembershipStats {
    /// Number of memberships counted.
    pub fn total(&self) -> usize {
        self.active + self.expired
    }
}

/// Reduce all memberships into their statistics. Pass the full
/// snapshot here, not a filtered listing.
pub fn aggregate<'a, I>(
    records: I,
    today: NaiveDate,
    policy: &StatusPolicy,
) -> Result<MembershipStats>
where
    I: IntoIterator<Item = &'a Membership>,
{
    let classified = records
        .into_iter()
        .map(|member| Ok((member, member.classify(today, policy)?)))
        .collect::<Result<Vec<_>>>()?;
    Ok(tally(classified, policy))
}

/// Count memberships that were already classified.
pub fn tally<'a, I>(classified: I, policy: &StatusPolicy) -> MembershipStats
where
    I: IntoIterator<Item = (&'a Membership, Classification)>,
{
    let mut stats = MembershipStats::default();
    for (member, classification) in classified {
        let days = classification.days_remaining;
        if policy.is_active(days) {
            stats.active += 1;
            if policy.is_expiring_soon(days) {
                stats.expiring_soon += 1;
            }
        } else {
            stats.expired += 1;
        }
        stats.total_revenue += member.amount_value();
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::Duration;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 11, 3).unwrap()
    }

    fn member(expires_in: i64, amount: Option<f64>) -> Membership {
        Membership {
            expiry_date: (today() + Duration::days(expires_in)).to_string(),
            amount,
            ..Default::default()
        }
    }

    #[test]
    fn test_aggregate_dashboard() {
        let records = vec![
            member(-1, Some(500.0)),
            member(3, Some(300.0)),
            member(10, Some(0.0)),
        ];
        let stats = aggregate(&records, today(), &StatusPolicy::default()).unwrap();
        assert_eq!(
            stats,
            MembershipStats {
                active: 2,
                expiring_soon: 1,
                expired: 1,
                total_revenue: 800.0,
            }
        );
    }

    #[test]
    fn test_missing_and_negative_amounts() {
        let records = vec![member(1, None), member(1, Some(-50.0)), member(1, Some(120.5))];
        let stats = aggregate(&records, today(), &StatusPolicy::default()).unwrap();
        assert_eq!(stats.total_revenue, 70.5);
    }

    #[test]
    fn test_empty_snapshot() {
        let records: Vec<Membership> = Vec::new();
        let stats = aggregate(&records, today(), &StatusPolicy::default()).unwrap();
        assert_eq!(stats, MembershipStats::default());
        assert_eq!(stats.total(), 0);
    }

    #[test]
    fn test_counts_are_consistent() {
        let records: Vec<Membership> = (-10..=10).map(|d| member(d, None)).collect();
        let stats = aggregate(&records, today(), &StatusPolicy::default()).unwrap();
        assert_eq!(stats.active + stats.expired, records.len());
        assert_eq!(stats.total(), records.len());
        assert!(stats.expiring_soon <= stats.active);
        assert_eq!(stats.expired, 10);
        assert_eq!(stats.expiring_soon, 6);
    }

    #[test]
    fn test_malformed_date_fails_aggregate() {
        let mut records = vec![member(1, None), member(2, None)];
        records[1].expiry_date = "n/a".to_string();
        assert!(aggregate(&records, today(), &StatusPolicy::default()).is_err());
    }

    #[test]
    fn test_tally_classified() {
        let records = vec![member(-2, Some(100.0)), member(4, Some(250.0))];
        let policy = StatusPolicy::default();
        let classified = records
            .iter()
            .map(|m| (m, m.classify(today(), &policy).unwrap()));
        let stats = tally(classified, &policy);
        assert_eq!(stats, aggregate(&records, today(), &policy).unwrap());
        assert_eq!(stats.expired, 1);
        assert_eq!(stats.expiring_soon, 1);
    }
}
