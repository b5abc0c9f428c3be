use std::{fmt::Debug, time::Duration};

use acg_common::CommissionRate;
use log::{debug, info, warn};
use tokio::time::timeout;

use crate::{
    api::errors::AffiliateCreateError,
    db_types::{Affiliate, Merchant, NewAffiliate},
    events::{AffiliateCreatedEvent, EventProducers},
    traits::{AffiliateManagement, DiscountCodeIssuer},
};

/// How long the registry waits on the discount-code collaborator before registering the affiliate without a code.
pub const DEFAULT_DISCOUNT_TIMEOUT: Duration = Duration::from_secs(2);

/// `AffiliateApi` is the affiliate registry. It owns affiliate creation and uniqueness: one account per email,
/// account + affiliate written atomically, a discount code requested from the external issuer, and a welcome
/// notification dispatched after commit.
pub struct AffiliateApi<B, C> {
    db: B,
    issuer: C,
    producers: EventProducers,
    discount_timeout: Duration,
}

impl<B, C> Debug for AffiliateApi<B, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AffiliateApi")
    }
}

impl<B, C> AffiliateApi<B, C> {
    pub fn new(db: B, issuer: C, producers: EventProducers) -> Self {
        Self { db, issuer, producers, discount_timeout: DEFAULT_DISCOUNT_TIMEOUT }
    }

    pub fn with_discount_timeout(mut self, timeout: Duration) -> Self {
        self.discount_timeout = timeout;
        self
    }
}

impl<B, C> AffiliateApi<B, C>
where
    B: AffiliateManagement,
    C: DiscountCodeIssuer,
{
    /// Registers a new affiliate for the merchant with the given commission rate.
    ///
    /// Fails if an account with this email already exists anywhere in the system, naming the email and the existing
    /// account's role. The account and affiliate rows are written in one transaction; on any failure inside it the
    /// registration rolls back completely and the error is wrapped with the cause preserved.
    ///
    /// The welcome notification is published onto the event channel only after the transaction has committed, and
    /// its delivery is fire-and-forget: a failing subscriber never undoes the registration.
    pub async fn register(
        &self,
        merchant: &Merchant,
        email: &str,
        name: &str,
        rate: CommissionRate,
    ) -> Result<Affiliate, AffiliateCreateError> {
        let discount_code = self.issue_discount_code(merchant).await;
        let new_affiliate = NewAffiliate {
            merchant_id: merchant.id,
            email: email.to_string(),
            name: name.to_string(),
            commission_rate: rate,
            discount_code,
        };
        let affiliate = self.db.insert_affiliate(new_affiliate).await?;
        info!("🤝️ Affiliate #{} registered for merchant [{}] at {rate}", affiliate.id, merchant.domain);
        self.notify_affiliate_created(&affiliate, email, name).await;
        Ok(affiliate)
    }

    /// Asks the external issuer for a discount code, bounded by the configured timeout. Every failure mode degrades
    /// to "no code": registration never fails because the collaborator is slow, down or empty-handed.
    async fn issue_discount_code(&self, merchant: &Merchant) -> Option<String> {
        match timeout(self.discount_timeout, self.issuer.create_discount_code(merchant)).await {
            Ok(Ok(Some(code))) => {
                debug!("🎟️ Discount code issued for merchant [{}]", merchant.domain);
                Some(code)
            },
            Ok(Ok(None)) => {
                debug!("🎟️ Issuer returned no discount code for merchant [{}]", merchant.domain);
                None
            },
            Ok(Err(e)) => {
                warn!("🎟️ Discount code issuer failed for merchant [{}]. Registering without a code. {e}", merchant.domain);
                None
            },
            Err(_) => {
                warn!(
                    "🎟️ Discount code issuer did not answer within {:?} for merchant [{}]. Registering without a code.",
                    self.discount_timeout, merchant.domain
                );
                None
            },
        }
    }

    async fn notify_affiliate_created(&self, affiliate: &Affiliate, email: &str, name: &str) {
        for emitter in &self.producers.affiliate_created_producer {
            debug!("🤝️ Notifying affiliate-created hook subscribers");
            let event = AffiliateCreatedEvent {
                affiliate: affiliate.clone(),
                email: email.to_string(),
                name: name.to_string(),
            };
            emitter.publish_event(event).await;
        }
    }
}
