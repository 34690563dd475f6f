use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use sqlx::FromRow;

/// Payment method stored when none was given.
pub const DEFAULT_PAYMENT_METHOD: &str = "Cash";

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct MembershipFilter {
    pub id: Option<u32>,
}

/// A gym membership as the backend stores it.
///
/// Dates are kept in their wire form (`YYYY-MM-DD`) and only parsed
/// when a status is computed, so a malformed date is reported where
/// it is used instead of rejecting the whole snapshot.
#[derive(Debug, Clone, Default, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Membership {
    #[serde(default)]
    pub id: u32,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub plan_type: String,
    pub workout_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub joining_date: Option<String>,
    pub expiry_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_amount",
        skip_serializing_if = "Option::is_none"
    )]
    pub amount: Option<f64>,
}

impl Membership {
    /// The joining date, if one was recorded. The backend stores
    /// an empty string for "not given".
    pub fn joining_date(&self) -> Option<&str> {
        self.joining_date
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
    }

    /// Payment method, `Cash` unless something else was recorded.
    pub fn payment_method(&self) -> &str {
        self.payment_method
            .as_deref()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or(DEFAULT_PAYMENT_METHOD)
    }

    /// Amount paid, missing amounts count as zero.
    pub fn amount_value(&self) -> f64 {
        self.amount.unwrap_or(0.0)
    }
}

/// Accepts numbers, numeric strings and null. Anything
/// else (or a non finite number) is treated as absent.
fn lenient_amount<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let amount = value.and_then(|v| match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    });
    Ok(amount.filter(|a| a.is_finite()))
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    fn record(amount: Value) -> Membership {
        serde_json::from_value(json!({
            "id": 7,
            "name": "Asha",
            "email": "asha@example.com",
            "phone": "9876543210",
            "plan_type": "3 Months",
            "workout_type": "Strength",
            "expiry_date": "2024-05-01",
            "amount": amount,
        }))
        .unwrap()
    }

    #[test]
    fn test_amount_decoding() {
        assert_eq!(record(json!(1500.5)).amount, Some(1500.5));
        assert_eq!(record(json!("300")).amount, Some(300.0));
        assert_eq!(record(json!(" 42.5 ")).amount, Some(42.5));
        assert_eq!(record(json!(null)).amount, None);
        assert_eq!(record(json!("free")).amount, None);
        assert_eq!(record(json!("NaN")).amount, None);
        assert_eq!(record(json!([1, 2])).amount, None);
        assert_eq!(record(json!(-20)).amount, Some(-20.0));
    }

    #[test]
    fn test_missing_optionals() {
        let member: Membership = serde_json::from_value(json!({
            "id": 1,
            "name": "Ravi",
            "email": "ravi@example.com",
            "phone": "12345",
            "plan_type": "1 Month",
            "workout_type": "Cardio",
            "expiry_date": "2024-02-01",
        }))
        .unwrap();

        assert_eq!(member.amount, None);
        assert_eq!(member.amount_value(), 0.0);
        assert_eq!(member.payment_method(), "Cash");
        assert_eq!(member.joining_date(), None);
    }

    #[test]
    fn test_empty_joining_date() {
        let member = Membership {
            joining_date: Some("".to_string()),
            ..Default::default()
        };
        assert_eq!(member.joining_date(), None);

        let member = Membership {
            joining_date: Some("2024-01-01".to_string()),
            ..Default::default()
        };
        assert_eq!(member.joining_date(), Some("2024-01-01"));
    }

    #[test]
    fn test_serialize_skips_absent_fields() {
        let member = Membership {
            name: "Ravi".to_string(),
            expiry_date: "2024-02-01".to_string(),
            ..Default::default()
        };
        let value = serde_json::to_value(&member).unwrap();
        assert!(value.get("amount").is_none());
        assert!(value.get("payment_method").is_none());
        assert!(value.get("joining_date").is_none());
        assert_eq!(value["expiry_date"], "2024-02-01");
    }
}
