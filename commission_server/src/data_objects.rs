use std::fmt::Display;

use acg_common::Money;
use commission_engine::db_types::{IncomingOrder, NewMerchant, OrderId, OrderStats};
use serde::{Deserialize, Serialize};

/// The order webhook payload as the storefront sends it: exactly these six fields are consumed.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WebhookOrder {
    pub order_id: String,
    pub subtotal_price: f64,
    pub merchant_domain: String,
    #[serde(default)]
    pub discount_code: String,
    pub customer_email: String,
    pub customer_name: String,
}

impl TryFrom<WebhookOrder> for IncomingOrder {
    type Error = crate::errors::OrderConversionError;

    fn try_from(value: WebhookOrder) -> Result<Self, Self::Error> {
        use crate::errors::OrderConversionError;
        if value.order_id.trim().is_empty() {
            return Err(OrderConversionError("order_id is empty".to_string()));
        }
        if value.merchant_domain.trim().is_empty() {
            return Err(OrderConversionError("merchant_domain is empty".to_string()));
        }
        if value.customer_email.trim().is_empty() {
            return Err(OrderConversionError("customer_email is empty".to_string()));
        }
        if value.subtotal_price < 0.0 {
            return Err(OrderConversionError(format!("subtotal_price {} is negative", value.subtotal_price)));
        }
        let subtotal = Money::try_from(value.subtotal_price).map_err(|e| OrderConversionError(e.to_string()))?;
        Ok(Self {
            external_order_id: OrderId(value.order_id),
            subtotal,
            merchant_domain: value.merchant_domain,
            discount_code: value.discount_code,
            customer_email: value.customer_email,
            customer_name: value.customer_name,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonResponse {
    pub success: bool,
    pub message: String,
}

impl JsonResponse {
    pub fn success<S: Display>(message: S) -> Self {
        Self { success: true, message: message.to_string() }
    }

    pub fn failure<S: Display>(message: S) -> Self {
        Self { success: false, message: message.to_string() }
    }
}

/// Optional stats window. Missing bounds default to the trailing 24 hours, evaluated when the query runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatsParams {
    #[serde(default)]
    pub from: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default)]
    pub to: Option<chrono::DateTime<chrono::Utc>>,
}

/// Outward-facing stats report, amounts in major currency units.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderStatsResponse {
    pub count: i64,
    pub commissions_owed: f64,
    pub revenue: f64,
}

impl From<OrderStats> for OrderStatsResponse {
    fn from(stats: OrderStats) -> Self {
        Self {
            count: stats.count,
            commissions_owed: stats.commissions_owed.to_major_units(),
            revenue: stats.revenue.to_major_units(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MerchantRegistration {
    pub domain: String,
    pub display_name: String,
    pub email: String,
    pub api_key: String,
}

impl From<MerchantRegistration> for NewMerchant {
    fn from(reg: MerchantRegistration) -> Self {
        NewMerchant::new(reg.domain, reg.display_name, reg.email, reg.api_key)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn deserialize_webhook_order() {
        let payload = serde_json::json!({
            "order_id": "5910974",
            "subtotal_price": 199.95,
            "merchant_domain": "widgets.example.com",
            "discount_code": "SUMMER-SALE",
            "customer_email": "alice@example.com",
            "customer_name": "Alice Archer"
        });
        let order: WebhookOrder = serde_json::from_value(payload).unwrap();
        let incoming = IncomingOrder::try_from(order).unwrap();
        assert_eq!(incoming.external_order_id.as_str(), "5910974");
        assert_eq!(incoming.subtotal, Money::from_cents(19_995));
        assert_eq!(incoming.discount_code, "SUMMER-SALE");
    }

    #[test]
    fn discount_code_may_be_omitted() {
        let payload = serde_json::json!({
            "order_id": "1",
            "subtotal_price": 10.0,
            "merchant_domain": "widgets.example.com",
            "customer_email": "alice@example.com",
            "customer_name": "Alice Archer"
        });
        let order: WebhookOrder = serde_json::from_value(payload).unwrap();
        assert!(order.discount_code.is_empty());
    }

    #[test]
    fn invalid_payloads_are_rejected() {
        let no_id = WebhookOrder { subtotal_price: 10.0, customer_email: "a@b.c".into(), merchant_domain: "d".into(), ..Default::default() };
        assert!(IncomingOrder::try_from(no_id).is_err());
        let negative = WebhookOrder {
            order_id: "1".into(),
            subtotal_price: -5.0,
            merchant_domain: "d".into(),
            customer_email: "a@b.c".into(),
            ..Default::default()
        };
        assert!(IncomingOrder::try_from(negative).is_err());
    }
}
