use chrono::{Months, NaiveDate};

use crate::datetime::parse_date;
use crate::{Error, Result};

/// Label used for durations without a named plan.
pub const CUSTOM_PLAN: &str = "Custom";

/// Plan durations in months and their labels.
pub const PLANS: [(u32, &str); 4] = [
    (1, "1 Month"),
    (3, "3 Months"),
    (6, "6 Months"),
    (12, "1 Year"),
];

/// Label for a plan of `months` months, `Custom` if there is none.
pub fn plan_label(months: u32) -> &'static str {
    PLANS
        .iter()
        .find(|(m, _)| *m == months)
        .map(|(_, label)| *label)
        .unwrap_or(CUSTOM_PLAN)
}

/// Guess the plan duration from a stored label.
///
/// This is a loose substring match: later checks win, and labels
/// like "13 Months" come back wrong. Keep it as it is; stored labels
/// have been read this way for a long time.
pub fn plan_duration(label: &str) -> u32 {
    let mut months = 1;
    if label.contains('3') {
        months = 3;
    }
    if label.contains('6') {
        months = 6;
    }
    if label.contains("Year") {
        months = 12;
    }
    months
}

/// Expiry date of a plan starting at `joining` and running `months`.
///
/// Adding months keeps the day of month where possible and otherwise
/// clamps to the last day of the target month (Jan 31 + 1 month is
/// Feb 29 in a leap year).
pub fn derive_expiry(joining: NaiveDate, months: u32) -> Result<NaiveDate> {
    joining
        .checked_add_months(Months::new(months))
        .ok_or(Error::DateOutOfRange {
            date: joining,
            months,
        })
}

/// Same as [`derive_expiry`] with the joining date in wire format.
pub fn derive_expiry_from(joining_date: &str, months: u32) -> Result<NaiveDate> {
    let joining = parse_date("joining", joining_date)?;
    derive_expiry(joining, months)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_plan_label() {
        assert_eq!(plan_label(1), "1 Month");
        assert_eq!(plan_label(3), "3 Months");
        assert_eq!(plan_label(6), "6 Months");
        assert_eq!(plan_label(12), "1 Year");
        assert_eq!(plan_label(2), "Custom");
        assert_eq!(plan_label(0), "Custom");
    }

    #[test]
    fn test_canonical_labels_round_trip() {
        for (months, label) in PLANS {
            assert_eq!(plan_duration(label), months);
            assert_eq!(plan_label(plan_duration(label)), label);
        }
    }

    #[test]
    fn test_plan_duration_heuristic() {
        assert_eq!(plan_duration("12 Months"), 1);
        assert_eq!(plan_duration("Custom"), 1);
        assert_eq!(plan_duration("36 Months"), 6);
        assert_eq!(plan_duration("13 Months"), 3);
        assert_eq!(plan_duration("3 Year Deal"), 12);
        assert_eq!(plan_duration(""), 1);
    }

    #[test]
    fn test_derive_expiry() {
        assert_eq!(derive_expiry(date(2024, 3, 15), 1).unwrap(), date(2024, 4, 15));
        assert_eq!(derive_expiry(date(2024, 11, 30), 3).unwrap(), date(2025, 2, 28));
        assert_eq!(derive_expiry(date(2024, 2, 29), 12).unwrap(), date(2025, 2, 28));
        assert_eq!(derive_expiry(date(2024, 5, 5), 0).unwrap(), date(2024, 5, 5));
    }

    #[test]
    fn test_derive_expiry_month_end() {
        assert_eq!(derive_expiry_from("2024-01-31", 1).unwrap(), date(2024, 2, 29));
        assert_eq!(derive_expiry_from("2023-01-31", 1).unwrap(), date(2023, 2, 28));
        assert_eq!(derive_expiry_from("2024-08-31", 6).unwrap(), date(2025, 2, 28));
    }

    #[test]
    fn test_derive_expiry_errors() {
        assert!(matches!(
            derive_expiry_from("31/01/2024", 1),
            Err(Error::MalformedDate { field: "joining", .. })
        ));
        assert!(matches!(
            derive_expiry(NaiveDate::MAX, 1),
            Err(Error::DateOutOfRange { months: 1, .. })
        ));
    }
}
