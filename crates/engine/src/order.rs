use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// How a credit-card charge is captured.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationType {
    AuthOnly,
    #[default]
    AuthAndCapture,
}

impl OperationType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AuthOnly => "auth_only",
            Self::AuthAndCapture => "auth_and_capture",
        }
    }
}

/// Card payload for credit-card orders. The card itself is referenced
/// by gateway token or stored id; raw card data never passes through
/// this client.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CreditCard {
    pub card_token: Option<String>,
    pub card_id: Option<String>,
    pub installments: u32,
    pub operation_type: OperationType,
    pub statement_descriptor: Option<String>,
}

/// The submission variants the gateway supports, each with its own
/// payload. Dispatch is an exhaustive match, never a string compare.
#[derive(Clone, Debug, PartialEq)]
pub enum PaymentMethod {
    /// Hosted payment link; the gateway returns a checkout URL.
    PaymentLink { installments: u32 },
    /// Instant payment; the gateway returns a QR code.
    Pix { expires_in_secs: u32 },
    /// Bank slip with optional instructions and due date.
    Boleto {
        instructions: Option<String>,
        due_at: Option<NaiveDate>,
    },
    /// Tokenized credit-card charge.
    CreditCard(CreditCard),
}

impl PaymentMethod {
    /// Wire tag for the order `paymentMethod` field. Payment links go
    /// through their own endpoint and never carry this tag.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PaymentLink { .. } => "payment_link",
            Self::Pix { .. } => "pix",
            Self::Boleto { .. } => "boleto",
            Self::CreditCard(_) => "credit_card",
        }
    }

    /// Whether submitting this method requires customer data. Payment
    /// links collect the customer on the hosted page; orders need an
    /// existing customer id or an inline record up front.
    #[must_use]
    pub const fn needs_customer(&self) -> bool {
        !matches!(self, Self::PaymentLink { .. })
    }
}

impl Default for PaymentMethod {
    fn default() -> Self {
        Self::PaymentLink { installments: 6 }
    }
}

/// Client-side order code: `ORDER-{unix millis}`.
#[must_use]
pub fn order_code(now: DateTime<Utc>) -> String {
    format!("ORDER-{}", now.timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn order_code_uses_unix_millis() {
        let now = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(order_code(now), format!("ORDER-{}", now.timestamp_millis()));
    }

    #[test]
    fn only_payment_links_skip_customer_data() {
        assert!(!PaymentMethod::PaymentLink { installments: 1 }.needs_customer());
        assert!(PaymentMethod::Pix { expires_in_secs: 3600 }.needs_customer());
        assert!(
            PaymentMethod::Boleto {
                instructions: None,
                due_at: None
            }
            .needs_customer()
        );
        assert!(PaymentMethod::CreditCard(CreditCard::default()).needs_customer());
    }
}
