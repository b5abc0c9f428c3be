use std::{fmt::Display, str::FromStr};

use acg_common::{CommissionRate, Money, Secret};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use thiserror::Error;

//--------------------------------------    AccountRole      ---------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Type, Serialize, Deserialize)]
pub enum AccountRole {
    /// The account belongs to a registered merchant and its secret is the merchant's API key.
    Merchant,
    /// The account was created lazily for a purchasing customer. Affiliates never authenticate in this core.
    Affiliate,
}

impl Display for AccountRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccountRole::Merchant => write!(f, "Merchant"),
            AccountRole::Affiliate => write!(f, "Affiliate"),
        }
    }
}

#[derive(Debug, Clone, Error)]
#[error("Invalid conversion: {0}")]
pub struct ConversionError(pub String);

impl FromStr for AccountRole {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Merchant" => Ok(Self::Merchant),
            "Affiliate" => Ok(Self::Affiliate),
            s => Err(ConversionError(format!("Invalid account role: {s}"))),
        }
    }
}

//--------------------------------------    PayoutStatus     ---------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Type, Serialize, Deserialize)]
pub enum PayoutStatus {
    /// Commission for the order has not been settled yet.
    Unpaid,
    /// A downstream payout worker has settled the commission.
    Paid,
}

impl Display for PayoutStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PayoutStatus::Unpaid => write!(f, "Unpaid"),
            PayoutStatus::Paid => write!(f, "Paid"),
        }
    }
}

impl FromStr for PayoutStatus {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Unpaid" => Ok(Self::Unpaid),
            "Paid" => Ok(Self::Paid),
            s => Err(ConversionError(format!("Invalid payout status: {s}"))),
        }
    }
}

//--------------------------------------       OrderId       ---------------------------------------------------------
/// The order id assigned by the external storefront. This is the deduplication key for incoming webhooks.
#[derive(Debug, Clone, PartialEq, Eq, Type, Serialize, Deserialize)]
#[sqlx(transparent)]
pub struct OrderId(pub String);

impl FromStr for OrderId {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}

impl From<String> for OrderId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl OrderId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

//--------------------------------------       Account       ---------------------------------------------------------
/// The identity record behind every merchant and affiliate. Emails are unique across the whole table, regardless of
/// role. The account secret is deliberately not part of this struct.
#[derive(Debug, Clone, FromRow)]
pub struct Account {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub role: AccountRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

//--------------------------------------       Merchant      ---------------------------------------------------------
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Merchant {
    pub id: i64,
    pub account_id: i64,
    pub domain: String,
    pub display_name: String,
    pub created_at: DateTime<Utc>,
}

//--------------------------------------     NewMerchant     ---------------------------------------------------------
#[derive(Debug, Clone)]
pub struct NewMerchant {
    /// The storefront domain, e.g. "acme.example.com". Unique and used as the external lookup key.
    pub domain: String,
    pub display_name: String,
    pub email: String,
    /// The API key the merchant will present on stats queries. Stored as the account secret.
    pub api_key: Secret<String>,
}

impl NewMerchant {
    pub fn new<S: Into<String>>(domain: S, display_name: S, email: S, api_key: S) -> Self {
        Self {
            domain: domain.into(),
            display_name: display_name.into(),
            email: email.into(),
            api_key: Secret::new(api_key.into()),
        }
    }
}

//--------------------------------------      Affiliate      ---------------------------------------------------------
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Affiliate {
    pub id: i64,
    pub account_id: i64,
    pub merchant_id: i64,
    /// Fraction of the order subtotal owed to this affiliate. Immutable after creation.
    pub commission_rate: CommissionRate,
    /// Issued by the external discount-code collaborator. Absent when the collaborator failed or returned no code.
    pub discount_code: Option<String>,
    pub created_at: DateTime<Utc>,
}

//--------------------------------------     NewAffiliate    ---------------------------------------------------------
#[derive(Debug, Clone)]
pub struct NewAffiliate {
    pub merchant_id: i64,
    pub email: String,
    pub name: String,
    pub commission_rate: CommissionRate,
    pub discount_code: Option<String>,
}

//--------------------------------------        Order        ---------------------------------------------------------
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Order {
    pub id: i64,
    pub external_order_id: OrderId,
    pub merchant_id: i64,
    /// Nullable in the schema for legacy rows, but the ingestion pipeline always attributes an affiliate.
    pub affiliate_id: Option<i64>,
    pub subtotal: Money,
    /// Snapshot of `subtotal * commission_rate` taken at creation time. Never recomputed.
    pub commission_owed: Money,
    pub payout_status: PayoutStatus,
    pub discount_code: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

//--------------------------------------      NewOrder       ---------------------------------------------------------
/// A fully attributed order, ready to be persisted.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub external_order_id: OrderId,
    pub merchant_id: i64,
    pub affiliate_id: Option<i64>,
    pub subtotal: Money,
    pub commission_owed: Money,
    pub discount_code: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl NewOrder {
    pub fn new(external_order_id: OrderId, merchant_id: i64, affiliate_id: Option<i64>, subtotal: Money, commission_owed: Money) -> Self {
        Self {
            external_order_id,
            merchant_id,
            affiliate_id,
            subtotal,
            commission_owed,
            discount_code: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_discount_code<S: Into<String>>(mut self, code: S) -> Self {
        self.discount_code = Some(code.into());
        self
    }
}

//--------------------------------------    IncomingOrder    ---------------------------------------------------------
/// The raw webhook payload after boundary validation: exactly the six fields the storefront sends.
#[derive(Debug, Clone)]
pub struct IncomingOrder {
    pub external_order_id: OrderId,
    pub subtotal: Money,
    pub merchant_domain: String,
    pub discount_code: String,
    pub customer_email: String,
    pub customer_name: String,
}

//--------------------------------------     OrderStats      ---------------------------------------------------------
/// Aggregates over a merchant's orders in a date range. `commissions_owed` only counts orders that have an attributed
/// affiliate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, FromRow, Serialize)]
pub struct OrderStats {
    pub count: i64,
    pub commissions_owed: Money,
    pub revenue: Money,
}
