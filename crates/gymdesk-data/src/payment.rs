use std::fmt;

/// Known payment providers, used for display only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentProvider {
    GPay,
    PhonePe,
    Paytm,
    Cash,
}

impl PaymentProvider {
    /// Detect the provider from a free text payment method.
    /// Anything unrecognized is shown as cash.
    pub fn detect(method: &str) -> Self {
        if method.contains("GPay") {
            PaymentProvider::GPay
        } else if method.contains("PhonePe") {
            PaymentProvider::PhonePe
        } else if method.contains("Paytm") {
            PaymentProvider::Paytm
        } else {
            PaymentProvider::Cash
        }
    }
}

impl fmt::Display for PaymentProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PaymentProvider::GPay => "Google Pay",
            PaymentProvider::PhonePe => "PhonePe",
            PaymentProvider::Paytm => "Paytm",
            PaymentProvider::Cash => "Cash",
        };
        f.pad(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_provider() {
        assert_eq!(PaymentProvider::detect("GPay"), PaymentProvider::GPay);
        assert_eq!(PaymentProvider::detect("UPI (PhonePe)"), PaymentProvider::PhonePe);
        assert_eq!(PaymentProvider::detect("Paytm wallet"), PaymentProvider::Paytm);
        assert_eq!(PaymentProvider::detect("Card"), PaymentProvider::Cash);
        // Matching is case sensitive
        assert_eq!(PaymentProvider::detect("gpay"), PaymentProvider::Cash);
    }
}
