use chrono::{Datelike, NaiveDate};

use gymdesk_data::Membership;

use crate::datetime::parse_date;
use crate::Result;

/// Printed below every invoice.
pub const TERMS: [&str; 3] = [
    "Fees once paid are non-refundable.",
    "Membership is non-transferable.",
    "Please retain this invoice for future reference.",
];

/// Invoice number for a billing date: `INV-YYYYMM-NNN`.
/// Serials above 999 wrap around.
pub fn invoice_number(billing_date: NaiveDate, serial: u16) -> String {
    format!(
        "INV-{}{:02}-{:03}",
        billing_date.year(),
        billing_date.month(),
        serial % 1000
    )
}

/// Display format for invoice dates, e.g. `5 Mar 2024`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%-d %b %Y").to_string()
}

/// A payment receipt for a single membership.
#[derive(Debug, Clone, PartialEq)]
pub struct Invoice {
    pub number: String,
    pub billing_date: NaiveDate,
    pub member_name: String,
    pub email: String,
    pub phone: String,
    pub plan_type: String,
    pub workout_type: String,
    pub joining_date: Option<NaiveDate>,
    pub expiry_date: NaiveDate,
    pub payment_method: String,
    pub amount: f64,
}

impl Invoice {
    pub fn for_membership(
        member: &Membership,
        billing_date: NaiveDate,
        serial: u16,
    ) -> Result<Self> {
        let joining_date = member
            .joining_date()
            .map(|d| parse_date("joining", d))
            .transpose()?;
        let expiry_date = parse_date("expiry", &member.expiry_date)?;

        Ok(Invoice {
            number: invoice_number(billing_date, serial),
            billing_date,
            member_name: member.name.clone(),
            email: member.email.clone(),
            phone: member.phone.clone(),
            plan_type: member.plan_type.clone(),
            workout_type: member.workout_type.clone(),
            joining_date,
            expiry_date,
            payment_method: member.payment_method().to_string(),
            amount: member.amount_value(),
        })
    }

    /// Line item description.
    pub fn describe(&self) -> String {
        format!("{} Access", self.plan_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn billing() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
    }

    #[test]
    fn test_invoice_number() {
        assert_eq!(invoice_number(billing(), 7), "INV-202403-007");
        assert_eq!(invoice_number(billing(), 999), "INV-202403-999");
        assert_eq!(invoice_number(billing(), 1042), "INV-202403-042");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(billing()), "5 Mar 2024");
        assert_eq!(
            format_date(NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()),
            "31 Dec 2024"
        );
    }

    #[test]
    fn test_invoice_for_membership() {
        let member = Membership {
            id: 3,
            name: "Kiran".to_string(),
            email: "kiran@example.com".to_string(),
            phone: "9000000001".to_string(),
            plan_type: "3 Months".to_string(),
            workout_type: "CrossFit".to_string(),
            joining_date: Some("".to_string()),
            expiry_date: "2024-06-05".to_string(),
            payment_method: None,
            amount: None,
        };
        let invoice = Invoice::for_membership(&member, billing(), 12).unwrap();
        assert_eq!(invoice.number, "INV-202403-012");
        assert_eq!(invoice.joining_date, None);
        assert_eq!(
            invoice.expiry_date,
            NaiveDate::from_ymd_opt(2024, 6, 5).unwrap()
        );
        assert_eq!(invoice.payment_method, "Cash");
        assert_eq!(invoice.amount, 0.0);
        assert_eq!(invoice.describe(), "3 Months Access");
    }

    #[test]
    fn test_invoice_malformed_joining_date() {
        let member = Membership {
            joining_date: Some("last week".to_string()),
            expiry_date: "2024-06-05".to_string(),
            ..Default::default()
        };
        assert!(Invoice::for_membership(&member, billing(), 1).is_err());
    }
}
