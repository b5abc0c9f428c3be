use chrono::{DateTime, Utc};

use crate::{
    db_types::{NewOrder, Order, OrderId, OrderStats},
    traits::CommerceError,
};

/// The outcome of an idempotent order insert.
#[derive(Debug, Clone)]
pub enum InsertOrderResult {
    /// The order was new and has been persisted.
    Inserted(Order),
    /// An order with this external id already exists. This is a benign duplicate, not an error.
    AlreadyExists(OrderId),
}

#[allow(async_fn_in_trait)]
pub trait OrderManagement {
    /// Persists the order if, and only if, no order with its `external_order_id` exists yet.
    ///
    /// The existence check and the insert are a single atomically-enforced operation backed by a uniqueness
    /// constraint, so two concurrent webhooks for the same order id cannot both insert. The losing insert reports
    /// [`InsertOrderResult::AlreadyExists`] rather than an error.
    async fn insert_order(&self, order: NewOrder) -> Result<InsertOrderResult, CommerceError>;

    async fn fetch_order_by_external_id(&self, order_id: &OrderId) -> Result<Option<Order>, CommerceError>;

    /// All orders for the affiliate still awaiting payout, oldest first. A single query snapshot, so one invocation
    /// never yields the same order twice.
    async fn fetch_unpaid_orders(&self, affiliate_id: i64) -> Result<Vec<Order>, CommerceError>;

    /// Marks an order's commission as settled. Called by the downstream payout worker, never by the ingestion or
    /// dispatch flows.
    async fn mark_order_paid(&self, order_id: &OrderId) -> Result<Order, CommerceError>;

    /// Order count, revenue and attributed commission totals for the merchant over `[from, to]`. Orders without an
    /// affiliate count towards `count` and `revenue` but are excluded from `commissions_owed`.
    async fn order_stats(&self, merchant_id: i64, from: DateTime<Utc>, to: DateTime<Utc>)
        -> Result<OrderStats, CommerceError>;
}
