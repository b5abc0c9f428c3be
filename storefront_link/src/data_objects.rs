use acg_common::Money;
use commission_engine::db_types::Order;
use serde::{Deserialize, Serialize};

/// Request body for the discount-code issuing endpoint, scoped to a merchant.
#[derive(Debug, Clone, Serialize)]
pub struct NewDiscountCode {
    pub merchant_domain: String,
    pub merchant_name: String,
}

/// The issuer may answer without a code; callers treat that as "no code", not as an error.
#[derive(Debug, Clone, Deserialize)]
pub struct DiscountCodeResponse {
    #[serde(default)]
    pub code: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WelcomeNotification {
    pub email: String,
    pub name: String,
    pub discount_code: Option<String>,
}

/// One payout task per order, executed by a downstream worker outside this system.
#[derive(Debug, Clone, Serialize)]
pub struct PayoutTask {
    pub external_order_id: String,
    pub affiliate_id: Option<i64>,
    /// Commission amount in cents.
    pub commission_owed: Money,
}

impl From<&Order> for PayoutTask {
    fn from(order: &Order) -> Self {
        Self {
            external_order_id: order.external_order_id.as_str().to_string(),
            affiliate_id: order.affiliate_id,
            commission_owed: order.commission_owed,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn discount_code_response_tolerates_a_missing_code() {
        let with_code: DiscountCodeResponse = serde_json::from_str(r#"{"code": "SAVE10"}"#).unwrap();
        assert_eq!(with_code.code.as_deref(), Some("SAVE10"));
        let without: DiscountCodeResponse = serde_json::from_str(r#"{"code": null}"#).unwrap();
        assert!(without.code.is_none());
        let omitted: DiscountCodeResponse = serde_json::from_str("{}").unwrap();
        assert!(omitted.code.is_none());
    }
}
