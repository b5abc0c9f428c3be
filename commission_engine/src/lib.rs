//! Commission Engine
//!
//! The commission engine is the core of the affiliate commission gateway: merchants register, affiliates are created
//! lazily per unique customer, incoming order webhooks are deduplicated and attributed to affiliates, and payouts are
//! queued per unpaid order. This library is transport-agnostic; the HTTP boundary lives in the server crate.
//!
//! The library is divided into three main sections:
//! 1. Database management and control ([`mod@sqlite`]). SQLite is the supported backend. You should never need to
//!    access the database directly; use the public API instead. The exception is the data types used in the
//!    database, which are defined in the [`db_types`] module and are public.
//! 2. The engine public API ([`mod@api`]). This provides the public-facing functionality: order ingestion, the
//!    affiliate registry, payout dispatch and merchant statistics. Backends implement the traits in [`mod@traits`]
//!    to plug in underneath it.
//! 3. A set of events ([`mod@events`]) emitted when certain actions occur, such as an affiliate being created. The
//!    channel is fire-and-forget: subscribers hand work to external collaborators (mail, task queue) and their
//!    failures never propagate back into the engine.
pub mod api;
pub mod db_types;
pub mod events;
pub mod traits;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(any(feature = "test_utils", test))]
pub mod test_utils;

pub use api::{
    AffiliateApi,
    AffiliateCreateError,
    MerchantApi,
    MerchantCreateError,
    OrderFlowApi,
    OrderProcessingError,
    PayoutApi,
    PayoutError,
    StatsError,
    DEFAULT_COMMISSION_RATE,
};
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteDatabase;
pub use traits::{CommerceDatabase, CommerceError, InsertOrderResult};
