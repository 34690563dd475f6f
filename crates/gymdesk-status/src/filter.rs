use std::convert::Infallible;
use std::str::FromStr;

use chrono::NaiveDate;

use gymdesk_data::Membership;

use crate::status::{Classification, Classify, StatusPolicy};
use crate::Result;

/// Filter value selecting every membership.
pub const ALL: &str = "All";

/// Stored plan label that the `1 Year` filter also accepts.
const LEGACY_YEAR_PLAN: &str = "12 Months";

/// Filter on the plan label.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PlanFilter {
    #[default]
    All,
    Plan(String),
}

impl PlanFilter {
    pub fn matches(&self, plan_type: &str) -> bool {
        match self {
            PlanFilter::All => true,
            PlanFilter::Plan(plan) => {
                plan == plan_type || (plan == "1 Year" && plan_type == LEGACY_YEAR_PLAN)
            }
        }
    }
}

impl FromStr for PlanFilter {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s == ALL {
            Ok(PlanFilter::All)
        } else {
            Ok(PlanFilter::Plan(s.to_string()))
        }
    }
}

/// Filter on the membership status.
///
/// `Active` means "not yet expired" here and therefore
/// includes memberships that are expiring soon.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Expired,
    Expiring,
    /// Anything else; matches nothing.
    Unknown(String),
}

impl StatusFilter {
    pub fn matches(&self, days_remaining: i64, policy: &StatusPolicy) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Active => policy.is_active(days_remaining),
            StatusFilter::Expired => policy.is_expired(days_remaining),
            StatusFilter::Expiring => policy.is_expiring_soon(days_remaining),
            StatusFilter::Unknown(_) => false,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let filter = match s {
            ALL => StatusFilter::All,
            "Active" => StatusFilter::Active,
            "Expired" => StatusFilter::Expired,
            "Expiring" => StatusFilter::Expiring,
            other => StatusFilter::Unknown(other.to_string()),
        };
        Ok(filter)
    }
}

/// Search and filter criteria for a membership listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MembershipQuery {
    pub search_term: String,
    pub plan: PlanFilter,
    pub status: StatusFilter,
}

impl MembershipQuery {
    /// Case insensitive match on name, email or phone.
    /// An empty search term matches everything.
    pub fn matches_search(&self, member: &Membership) -> bool {
        if self.search_term.is_empty() {
            return true;
        }
        let term = self.search_term.to_lowercase();
        [&member.name, &member.email, &member.phone]
            .iter()
            .any(|field| field.to_lowercase().contains(&term))
    }
}

/// Select the memberships matching all criteria of `query`,
/// keeping their original order.
///
/// Every record is classified against the same `today`, so a malformed
/// expiry date is reported even if the record would be filtered out.
pub fn filter<'a, I>(
    records: I,
    query: &MembershipQuery,
    today: NaiveDate,
    policy: &StatusPolicy,
) -> Result<Vec<&'a Membership>>
where
    I: IntoIterator<Item = &'a Membership>,
{
    let selected = filter_classified(records, query, today, policy)?;
    Ok(selected.into_iter().map(|(member, _)| member).collect())
}

/// Like [`filter`], but keeps the classification computed for
/// each selected membership.
pub fn filter_classified<'a, I>(
    records: I,
    query: &MembershipQuery,
    today: NaiveDate,
    policy: &StatusPolicy,
) -> Result<Vec<(&'a Membership, Classification)>>
where
    I: IntoIterator<Item = &'a Membership>,
{
    let classified = records
        .into_iter()
        .map(|member| Ok((member, member.classify(today, policy)?)))
        .collect::<Result<Vec<_>>>()?;
    Ok(select(classified, query, policy))
}

/// Apply `query` to memberships that were already classified.
pub fn select<'a, I>(
    classified: I,
    query: &MembershipQuery,
    policy: &StatusPolicy,
) -> Vec<(&'a Membership, Classification)>
where
    I: IntoIterator<Item = (&'a Membership, Classification)>,
{
    classified
        .into_iter()
        .filter(|(member, classification)| {
            query.matches_search(member)
                && query.plan.matches(&member.plan_type)
                && query.status.matches(classification.days_remaining, policy)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::Duration;

    use crate::status::MembershipStatus;
    use crate::Error;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()
    }

    fn member(id: u32, name: &str, plan: &str, expires_in: i64) -> Membership {
        Membership {
            id,
            name: name.to_string(),
            email: format!("{}@gym.example", name.to_lowercase()),
            phone: format!("98450{:05}", id),
            plan_type: plan.to_string(),
            workout_type: "General".to_string(),
            expiry_date: (today() + Duration::days(expires_in)).to_string(),
            ..Default::default()
        }
    }

    fn members() -> Vec<Membership> {
        vec![
            member(1, "Anita", "1 Month", -4),
            member(2, "Bharat", "3 Months", 0),
            member(3, "Chitra", "1 Year", 5),
            member(4, "Dev", "12 Months", 6),
            member(5, "Esha", "6 Months", 40),
        ]
    }

    fn ids(selected: &[&Membership]) -> Vec<u32> {
        selected.iter().map(|m| m.id).collect()
    }

    fn run(query: &MembershipQuery) -> Vec<u32> {
        let records = members();
        let selected = filter(&records, query, today(), &StatusPolicy::default()).unwrap();
        ids(&selected)
    }

    #[test]
    fn test_no_criteria_keeps_order() {
        assert_eq!(run(&MembershipQuery::default()), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_search() {
        let query = MembershipQuery {
            search_term: "CHIT".to_string(),
            ..Default::default()
        };
        assert_eq!(run(&query), vec![3]);

        let query = MembershipQuery {
            search_term: "@GYM.example".to_string(),
            ..Default::default()
        };
        assert_eq!(run(&query), vec![1, 2, 3, 4, 5]);

        let query = MembershipQuery {
            search_term: "000005".to_string(),
            ..Default::default()
        };
        assert_eq!(run(&query), vec![5]);

        let query = MembershipQuery {
            search_term: "nobody".to_string(),
            ..Default::default()
        };
        assert!(run(&query).is_empty());
    }

    #[test]
    fn test_plan_filter_legacy_year() {
        let query = MembershipQuery {
            plan: "1 Year".parse().unwrap(),
            ..Default::default()
        };
        assert_eq!(run(&query), vec![3, 4]);

        // The alias only works in one direction
        let query = MembershipQuery {
            plan: "12 Months".parse().unwrap(),
            ..Default::default()
        };
        assert_eq!(run(&query), vec![4]);
    }

    #[test]
    fn test_status_filter() {
        let status = |s: &str| MembershipQuery {
            status: s.parse().unwrap(),
            ..Default::default()
        };
        assert_eq!(run(&status("All")), vec![1, 2, 3, 4, 5]);
        assert_eq!(run(&status("Active")), vec![2, 3, 4, 5]);
        assert_eq!(run(&status("Expired")), vec![1]);
        assert_eq!(run(&status("Expiring")), vec![2, 3]);
    }

    #[test]
    fn test_unknown_filters_match_nothing() {
        let query = MembershipQuery {
            status: "Frozen".parse().unwrap(),
            ..Default::default()
        };
        assert_eq!(query.status, StatusFilter::Unknown("Frozen".to_string()));
        assert!(run(&query).is_empty());

        let query = MembershipQuery {
            plan: "2 Weeks".parse().unwrap(),
            ..Default::default()
        };
        assert!(run(&query).is_empty());
    }

    #[test]
    fn test_combined_criteria() {
        let query = MembershipQuery {
            search_term: "a".to_string(),
            plan: "1 Year".parse().unwrap(),
            status: StatusFilter::Expiring,
        };
        assert_eq!(run(&query), vec![3]);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let records = members();
        let policy = StatusPolicy::default();
        let query = MembershipQuery {
            search_term: "e".to_string(),
            status: StatusFilter::Active,
            ..Default::default()
        };
        let once = filter(&records, &query, today(), &policy).unwrap();
        let twice = filter(once.iter().copied(), &query, today(), &policy).unwrap();
        assert_eq!(ids(&once), ids(&twice));
    }

    #[test]
    fn test_filter_classified_keeps_classification() {
        let records = members();
        let query = MembershipQuery {
            status: StatusFilter::Expiring,
            ..Default::default()
        };
        let selected =
            filter_classified(&records, &query, today(), &StatusPolicy::default()).unwrap();
        let days: Vec<(u32, i64)> = selected
            .iter()
            .map(|(m, c)| (m.id, c.days_remaining))
            .collect();
        assert_eq!(days, vec![(2, 0), (3, 5)]);
        assert!(selected
            .iter()
            .all(|(_, c)| c.status == MembershipStatus::ExpiringSoon));
    }

    #[test]
    fn test_malformed_expiry_propagates() {
        let mut records = members();
        records[4].expiry_date = "soon".to_string();
        let query = MembershipQuery {
            search_term: "Anita".to_string(),
            ..Default::default()
        };
        let err = filter(&records, &query, today(), &StatusPolicy::default()).unwrap_err();
        assert!(matches!(err, Error::MalformedDate { .. }));
    }
}
