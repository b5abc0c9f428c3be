use std::fmt::Debug;

use acg_common::CommissionRate;
use log::{debug, info};

use crate::{
    api::{errors::OrderProcessingError, AffiliateApi},
    db_types::{IncomingOrder, NewOrder, Order},
    traits::{CommerceDatabase, CommerceError, DiscountCodeIssuer, InsertOrderResult},
};

/// The commission rate assigned to affiliates that are created lazily during order ingestion.
pub const DEFAULT_COMMISSION_RATE: CommissionRate = CommissionRate::from_percentage(10);

/// `OrderFlowApi` is the primary API for handling incoming order webhooks: deduplicate, resolve the merchant,
/// resolve or lazily create the crediting affiliate, compute the commission and persist the order.
pub struct OrderFlowApi<B, C> {
    db: B,
    registry: AffiliateApi<B, C>,
}

impl<B, C> Debug for OrderFlowApi<B, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "OrderFlowApi")
    }
}

impl<B, C> OrderFlowApi<B, C> {
    pub fn new(db: B, registry: AffiliateApi<B, C>) -> Self {
        Self { db, registry }
    }
}

impl<B, C> OrderFlowApi<B, C>
where
    B: CommerceDatabase,
    C: DiscountCodeIssuer,
{
    /// Processes an incoming order webhook.
    ///
    /// Replaying a webhook for an already-processed order is a successful no-op, not an error: the result is `None`
    /// and nothing is written. A fresh order is attributed, priced and persisted with `Unpaid` status, and returned.
    ///
    /// The existence check below is only a cheap short-circuit that avoids creating an affiliate for an order that
    /// will not be inserted. Correctness under concurrent duplicate webhooks rests on the uniqueness constraint
    /// behind [`OrderManagement::insert_order`](crate::traits::OrderManagement::insert_order).
    pub async fn process_order(&self, incoming: IncomingOrder) -> Result<Option<Order>, OrderProcessingError> {
        if let Some(order) = self.db.fetch_order_by_external_id(&incoming.external_order_id).await? {
            debug!("🔄️ Order [{}] has already been processed as id {}. Nothing to do.", order.external_order_id, order.id);
            return Ok(None);
        }
        let merchant = self
            .db
            .fetch_merchant_by_domain(&incoming.merchant_domain)
            .await?
            .ok_or_else(|| CommerceError::MerchantNotFound(incoming.merchant_domain.clone()))?;
        let affiliate = match self.db.fetch_affiliate_for_email(&incoming.customer_email).await? {
            Some(affiliate) => {
                debug!("🔄️ Crediting existing affiliate #{} for order [{}]", affiliate.id, incoming.external_order_id);
                affiliate
            },
            None => {
                debug!("🔄️ {} is not an affiliate yet. Registering one for [{}].", incoming.customer_email, merchant.domain);
                self.registry
                    .register(&merchant, &incoming.customer_email, &incoming.customer_name, DEFAULT_COMMISSION_RATE)
                    .await?
            },
        };
        // Snapshot of the rate at this instant; later rate changes must not reprice the order.
        let commission_owed = incoming.subtotal.commission(affiliate.commission_rate);
        let order = NewOrder::new(
            incoming.external_order_id,
            merchant.id,
            Some(affiliate.id),
            incoming.subtotal,
            commission_owed,
        )
        .with_discount_code(incoming.discount_code);
        match self.db.insert_order(order).await? {
            InsertOrderResult::Inserted(order) => {
                info!(
                    "🔄️ Order [{}] processed. {} commission owed to affiliate #{}",
                    order.external_order_id, order.commission_owed, affiliate.id
                );
                Ok(Some(order))
            },
            InsertOrderResult::AlreadyExists(order_id) => {
                info!("🔄️ Order [{order_id}] was inserted concurrently by another request. Nothing to do.");
                Ok(None)
            },
        }
    }

    pub fn db(&self) -> &B {
        &self.db
    }
}
