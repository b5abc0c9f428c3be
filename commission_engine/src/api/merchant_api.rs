use std::fmt::Debug;

use chrono::{DateTime, Duration, Utc};
use log::{debug, info};

use crate::{
    api::errors::{MerchantCreateError, StatsError},
    db_types::{Merchant, NewMerchant, OrderStats},
    traits::{CommerceError, MerchantManagement, OrderManagement},
};

/// `MerchantApi` covers the merchant-facing surface: registration and order statistics.
pub struct MerchantApi<B> {
    db: B,
}

impl<B> Debug for MerchantApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "MerchantApi")
    }
}

impl<B> MerchantApi<B> {
    pub fn new(db: B) -> Self {
        Self { db }
    }
}

impl<B> MerchantApi<B>
where B: MerchantManagement + OrderManagement
{
    /// Registers a new merchant: account (holding the API key) and merchant record in one transaction. Merchants are
    /// immutable after registration in this engine; there is no update path.
    pub async fn register(&self, merchant: NewMerchant) -> Result<Merchant, MerchantCreateError> {
        let merchant = self.db.insert_merchant(merchant).await?;
        info!("🏪️ Merchant [{}] registered with id {}", merchant.domain, merchant.id);
        Ok(merchant)
    }

    pub async fn merchant_for_api_key(&self, api_key: &str) -> Result<Option<Merchant>, CommerceError> {
        self.db.fetch_merchant_by_api_key(api_key).await
    }

    pub async fn merchant_for_email(&self, email: &str) -> Result<Option<Merchant>, CommerceError> {
        self.db.fetch_merchant_for_email(email).await
    }

    /// Order count, revenue and attributed commissions for the merchant over `[from, to]`.
    ///
    /// Both bounds are optional. A missing `to` means "now" and a missing `from` means "24 hours ago", evaluated at
    /// call time, so the default window is the trailing day.
    pub async fn order_stats(
        &self,
        merchant: &Merchant,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> Result<OrderStats, StatsError> {
        let from = from.unwrap_or_else(|| Utc::now() - Duration::days(1));
        let to = to.unwrap_or_else(Utc::now);
        let stats = self.db.order_stats(merchant.id, from, to).await?;
        debug!(
            "📊️ Stats for merchant [{}] between {from} and {to}: {} orders, {} revenue, {} commissions owed",
            merchant.domain, stats.count, stats.revenue, stats.commissions_owed
        );
        Ok(stats)
    }
}
