//! The public engine API.
//!
//! Backends implementing the traits in [`crate::traits`] plug in here. Each API owns one concern:
//! * [`OrderFlowApi`] — the order ingestion and attribution pipeline,
//! * [`AffiliateApi`] — the affiliate registry,
//! * [`PayoutApi`] — the payout dispatcher,
//! * [`MerchantApi`] — merchant registration and order statistics.
pub mod affiliate_api;
pub mod errors;
pub mod merchant_api;
pub mod order_flow_api;
pub mod payout_api;

pub use affiliate_api::AffiliateApi;
pub use errors::{AffiliateCreateError, MerchantCreateError, OrderProcessingError, PayoutError, StatsError};
pub use merchant_api::MerchantApi;
pub use order_flow_api::{OrderFlowApi, DEFAULT_COMMISSION_RATE};
pub use payout_api::PayoutApi;
