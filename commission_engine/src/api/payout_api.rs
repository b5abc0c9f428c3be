use std::fmt::Debug;

use log::{debug, info};

use crate::{
    api::errors::PayoutError,
    db_types::{Affiliate, Order},
    events::{EventProducers, PayoutQueuedEvent},
    traits::{AffiliateManagement, CommerceError, OrderManagement},
};

/// `PayoutApi` dispatches payouts: one independent task per unpaid order, handed to the downstream worker through
/// the event channel. The worker's logic, retry policy and status transitions live outside this engine.
pub struct PayoutApi<B> {
    db: B,
    producers: EventProducers,
}

impl<B> Debug for PayoutApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PayoutApi")
    }
}

impl<B> PayoutApi<B> {
    pub fn new(db: B, producers: EventProducers) -> Self {
        Self { db, producers }
    }
}

impl<B> PayoutApi<B>
where B: OrderManagement
{
    /// Queues a payout task for every unpaid order of the affiliate.
    ///
    /// The unpaid set is a single query snapshot, so no order is queued twice within one invocation. Publishing is
    /// fire-and-forget: this method returns as soon as every task has been handed off, without waiting for any
    /// downstream processing.
    ///
    /// Returns the orders that were queued.
    pub async fn payout(&self, affiliate: &Affiliate) -> Result<Vec<Order>, PayoutError> {
        let unpaid = self.db.fetch_unpaid_orders(affiliate.id).await?;
        for order in &unpaid {
            for emitter in &self.producers.payout_queued_producer {
                debug!("💸️ Queueing payout for order [{}]", order.external_order_id);
                let event = PayoutQueuedEvent { order: order.clone() };
                emitter.publish_event(event).await;
            }
        }
        info!("💸️ {} payout tasks queued for affiliate #{}", unpaid.len(), affiliate.id);
        Ok(unpaid)
    }
}

impl<B> PayoutApi<B>
where B: OrderManagement + AffiliateManagement
{
    /// Resolves the affiliate and queues its payouts, on behalf of the merchant it belongs to. An affiliate that does
    /// not exist, or belongs to a different merchant, reports [`CommerceError::AffiliateNotFound`].
    pub async fn payout_for_merchant(&self, merchant_id: i64, affiliate_id: i64) -> Result<Vec<Order>, PayoutError> {
        let affiliate = self
            .db
            .fetch_affiliate_by_id(affiliate_id)
            .await?
            .filter(|a| a.merchant_id == merchant_id)
            .ok_or(CommerceError::AffiliateNotFound(affiliate_id))?;
        self.payout(&affiliate).await
    }
}
