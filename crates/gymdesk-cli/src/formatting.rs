use gymdesk_data::{Membership, PaymentProvider};
use gymdesk_status::{
    invoice::{self, Invoice, TERMS},
    stats::MembershipStats,
    status::Classification,
};

macro_rules! next_attr {
    ($old:ident, $new:ident) => {
        if $old != $new {
            format!(" -> {}", $new)
        } else {
            "".to_string()
        }
    };
    ($old:ident, $new:ident, $attr:ident) => {
        if $old.$attr != $new.$attr {
            format!(" -> {}", $new.$attr)
        } else {
            "".to_string()
        }
    };
}

/// Format an amount in rupees with Indian digit grouping,
/// e.g. `₹1,23,456.50`.
pub fn format_inr(amount: f64) -> String {
    let paise = (amount.abs() * 100.0).round() as u64;
    let (rupees, paise_part) = (paise / 100, paise % 100);

    let digits = rupees.to_string();
    let grouped = if digits.len() <= 3 {
        digits
    } else {
        let (mut head, tail) = digits.split_at(digits.len() - 3);
        let mut groups = Vec::new();
        while head.len() > 2 {
            let (rest, group) = head.split_at(head.len() - 2);
            groups.push(group);
            head = rest;
        }
        groups.push(head);
        groups.reverse();
        format!("{},{}", groups.join(","), tail)
    };

    let sign = if amount < 0.0 && paise > 0 { "-" } else { "" };
    if paise_part == 0 {
        format!("{}₹{}", sign, grouped)
    } else {
        format!("{}₹{}.{:02}", sign, grouped, paise_part)
    }
}

fn optional(value: Option<&str>) -> String {
    value.unwrap_or("-").to_string()
}

fn amount(member: &Membership) -> String {
    format_inr(member.amount_value())
}

pub trait PrintFormatted {
    fn print_formatted(&self);
}

impl PrintFormatted for Membership {
    fn print_formatted(&self) {
        println!("Name:\t\t\t{}", self.name);
        println!("Email:\t\t\t{}", self.email);
        println!("Phone:\t\t\t{}", self.phone);
        println!("Plan:\t\t\t{}", self.plan_type);
        println!("Workout:\t\t{}", self.workout_type);
        println!("Joined:\t\t\t{}", optional(self.joining_date()));
        println!("Expires:\t\t{}", self.expiry_date);
        println!(
            "Payment:\t\t{}\t({})",
            self.payment_method(),
            PaymentProvider::detect(self.payment_method())
        );
        println!("Amount:\t\t\t{}", amount(self));
    }
}

impl PrintFormatted for (Membership, Membership) {
    fn print_formatted(&self) {
        let (old, new) = self;

        let next_name = next_attr!(old, new, name);
        println!("Name:\t\t\t{}{}", old.name, next_name);
        let next_email = next_attr!(old, new, email);
        println!("Email:\t\t\t{}{}", old.email, next_email);
        let next_phone = next_attr!(old, new, phone);
        println!("Phone:\t\t\t{}{}", old.phone, next_phone);
        let next_plan = next_attr!(old, new, plan_type);
        println!("Plan:\t\t\t{}{}", old.plan_type, next_plan);
        let next_workout = next_attr!(old, new, workout_type);
        println!("Workout:\t\t{}{}", old.workout_type, next_workout);

        let joined_old = optional(old.joining_date());
        let joined_new = optional(new.joining_date());
        let next_joined = next_attr!(joined_old, joined_new);
        println!("Joined:\t\t\t{}{}", joined_old, next_joined);

        let next_expiry = next_attr!(old, new, expiry_date);
        println!("Expires:\t\t{}{}", old.expiry_date, next_expiry);

        let payment_old = old.payment_method();
        let payment_new = new.payment_method();
        let next_payment = next_attr!(payment_old, payment_new);
        println!("Payment:\t\t{}{}", payment_old, next_payment);

        let amount_old = amount(old);
        let amount_new = amount(new);
        let next_amount = next_attr!(amount_old, amount_new);
        println!("Amount:\t\t\t{}{}", amount_old, next_amount);
    }
}

impl<'a> PrintFormatted for Vec<(&'a Membership, Classification)> {
    fn print_formatted(&self) {
        println!(
            "{:>4}\t{:<24}\t{:<12}\t{:<10}\t{:<12}\t{:<10}\t{:<10}\t{:>12}\t{:<10}\t{}",
            "ID",
            "Name",
            "Phone",
            "Plan",
            "Workout",
            "Joined",
            "Expires",
            "Amount",
            "Payment",
            "Status"
        );
        println!("{:-<180}", "-");

        for (member, classification) in self {
            println!(
                "{:>4}\t{:<24}\t{:<12}\t{:<10}\t{:<12}\t{:<10}\t{:<10}\t{:>12}\t{:<10}\t{}",
                member.id,
                member.name,
                member.phone,
                member.plan_type,
                member.workout_type,
                optional(member.joining_date()),
                member.expiry_date,
                amount(member),
                PaymentProvider::detect(member.payment_method()),
                classification.describe()
            );
        }
    }
}

impl<'a> PrintFormatted for Vec<(&'a Membership, gymdesk_status::Error)> {
    fn print_formatted(&self) {
        println!("Not counted, expiry date unreadable:");
        for (member, err) in self {
            println!("{:>4}\t{:<24}\t{}", member.id, member.name, err);
        }
    }
}

impl PrintFormatted for MembershipStats {
    fn print_formatted(&self) {
        println!("Active:\t\t\t{}", self.active);
        println!("Expiring soon:\t\t{}", self.expiring_soon);
        println!("Expired:\t\t{}", self.expired);
        println!("Total revenue:\t\t{}", format_inr(self.total_revenue));
    }
}

impl PrintFormatted for Invoice {
    fn print_formatted(&self) {
        let joined = self
            .joining_date
            .map(invoice::format_date)
            .unwrap_or_else(|| "-".to_string());

        println!("Invoice #{}", self.number);
        println!("Date:\t\t\t{}", invoice::format_date(self.billing_date));
        println!("{:-<64}", "-");
        println!("Billed to:\t\t{}", self.member_name);
        println!("\t\t\t{}", self.email);
        println!("\t\t\t{}", self.phone);
        println!("Joined:\t\t\t{}", joined);
        println!("Valid until:\t\t{}", invoice::format_date(self.expiry_date));
        println!("Payment:\t\t{}", self.payment_method);
        println!("{:-<64}", "-");
        println!("{:<32}{:<16}{:>16}", "Description", "Workout", "Amount");
        println!(
            "{:<32}{:<16}{:>16}",
            self.describe(),
            self.workout_type,
            format_inr(self.amount)
        );
        println!("{:-<64}", "-");
        println!("{:<48}{:>16}", "Total", format_inr(self.amount));
        println!();
        for (num, term) in TERMS.iter().enumerate() {
            println!("{}. {}", num + 1, term);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_inr() {
        assert_eq!(format_inr(0.0), "₹0");
        assert_eq!(format_inr(800.0), "₹800");
        assert_eq!(format_inr(1234.5), "₹1,234.50");
        assert_eq!(format_inr(123456.0), "₹1,23,456");
        assert_eq!(format_inr(12345678.25), "₹1,23,45,678.25");
        assert_eq!(format_inr(-1500.0), "-₹1,500");
    }
}
