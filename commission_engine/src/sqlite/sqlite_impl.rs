//! `SqliteDatabase` is a concrete implementation of a commission gateway backend.
//!
//! Unsurprisingly, it uses SQLite as the backend and implements all the management traits defined in the
//! [`crate::traits`] module.
use std::fmt::Debug;

use chrono::{DateTime, Utc};
use log::debug;
use sqlx::SqlitePool;

use super::db::{accounts, affiliates, merchants, new_pool, orders};
use crate::{
    db_types::{AccountRole, Affiliate, Merchant, NewAffiliate, NewMerchant, NewOrder, Order, OrderId, OrderStats},
    traits::{
        AffiliateManagement,
        CommerceDatabase,
        CommerceError,
        InsertOrderResult,
        MerchantManagement,
        OrderManagement,
    },
};

/// Affiliate accounts are created from webhook data and never log in, so their credential slot holds a fixed
/// placeholder rather than anything caller-supplied.
const AFFILIATE_PLACEHOLDER_SECRET: &str = "unset";

#[derive(Clone)]
pub struct SqliteDatabase {
    url: String,
    pool: SqlitePool,
}

impl Debug for SqliteDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SqliteDatabase ({:?})", self.pool)
    }
}

impl SqliteDatabase {
    /// Creates a new connection pool for the given URL.
    pub async fn new_with_url(url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        let pool = new_pool(url, max_connections).await?;
        Ok(Self { url: url.to_string(), pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

impl MerchantManagement for SqliteDatabase {
    async fn insert_merchant(&self, merchant: NewMerchant) -> Result<Merchant, CommerceError> {
        let mut tx = self.pool.begin().await?;
        if let Some(existing) = accounts::fetch_account_by_email(&merchant.email, &mut tx).await? {
            return Err(CommerceError::AccountAlreadyExists { email: merchant.email, role: existing.role });
        }
        let account = accounts::insert_account(
            &merchant.email,
            &merchant.display_name,
            AccountRole::Merchant,
            merchant.api_key.reveal(),
            &mut tx,
        )
        .await?;
        let merchant = merchants::insert_merchant(account.id, &merchant.domain, &merchant.display_name, &mut tx).await?;
        tx.commit().await?;
        debug!("🗃️ Merchant [{}] has been saved in the DB with id {}", merchant.domain, merchant.id);
        Ok(merchant)
    }

    async fn fetch_merchant_by_domain(&self, domain: &str) -> Result<Option<Merchant>, CommerceError> {
        let mut conn = self.pool.acquire().await?;
        let merchant = merchants::fetch_merchant_by_domain(domain, &mut conn).await?;
        Ok(merchant)
    }

    async fn fetch_merchant_by_api_key(&self, api_key: &str) -> Result<Option<Merchant>, CommerceError> {
        let mut conn = self.pool.acquire().await?;
        let merchant = merchants::fetch_merchant_by_api_key(api_key, &mut conn).await?;
        Ok(merchant)
    }

    async fn fetch_merchant_for_email(&self, email: &str) -> Result<Option<Merchant>, CommerceError> {
        let mut conn = self.pool.acquire().await?;
        let merchant = merchants::fetch_merchant_for_email(email, &mut conn).await?;
        Ok(merchant)
    }
}

impl AffiliateManagement for SqliteDatabase {
    async fn fetch_affiliate_for_email(&self, email: &str) -> Result<Option<Affiliate>, CommerceError> {
        let mut conn = self.pool.acquire().await?;
        let affiliate = affiliates::fetch_affiliate_for_email(email, &mut conn).await?;
        Ok(affiliate)
    }

    async fn fetch_affiliate_by_id(&self, affiliate_id: i64) -> Result<Option<Affiliate>, CommerceError> {
        let mut conn = self.pool.acquire().await?;
        let affiliate = affiliates::fetch_affiliate_by_id(affiliate_id, &mut conn).await?;
        Ok(affiliate)
    }

    /// Creates the account + affiliate pair in a single atomic transaction. If either write fails, or the email is
    /// already taken by any account, the whole registration rolls back and no partial state remains visible.
    async fn insert_affiliate(&self, affiliate: NewAffiliate) -> Result<Affiliate, CommerceError> {
        let mut tx = self.pool.begin().await?;
        if let Some(existing) = accounts::fetch_account_by_email(&affiliate.email, &mut tx).await? {
            return Err(CommerceError::AccountAlreadyExists { email: affiliate.email, role: existing.role });
        }
        let account = accounts::insert_account(
            &affiliate.email,
            &affiliate.name,
            AccountRole::Affiliate,
            AFFILIATE_PLACEHOLDER_SECRET,
            &mut tx,
        )
        .await?;
        let affiliate = affiliates::insert_affiliate(account.id, &affiliate, &mut tx).await?;
        tx.commit().await?;
        debug!("🗃️ Affiliate #{} has been saved in the DB for account {}", affiliate.id, account.email);
        Ok(affiliate)
    }
}

impl OrderManagement for SqliteDatabase {
    async fn insert_order(&self, order: NewOrder) -> Result<InsertOrderResult, CommerceError> {
        let mut conn = self.pool.acquire().await?;
        orders::idempotent_insert(order, &mut conn).await
    }

    async fn fetch_order_by_external_id(&self, order_id: &OrderId) -> Result<Option<Order>, CommerceError> {
        let mut conn = self.pool.acquire().await?;
        let order = orders::fetch_order_by_external_id(order_id, &mut conn).await?;
        Ok(order)
    }

    async fn fetch_unpaid_orders(&self, affiliate_id: i64) -> Result<Vec<Order>, CommerceError> {
        let mut conn = self.pool.acquire().await?;
        let unpaid = orders::fetch_unpaid_orders_for_affiliate(affiliate_id, &mut conn).await?;
        Ok(unpaid)
    }

    async fn mark_order_paid(&self, order_id: &OrderId) -> Result<Order, CommerceError> {
        let mut conn = self.pool.acquire().await?;
        orders::update_payout_status(order_id, crate::db_types::PayoutStatus::Paid, &mut conn).await
    }

    async fn order_stats(
        &self,
        merchant_id: i64,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<OrderStats, CommerceError> {
        let mut conn = self.pool.acquire().await?;
        let stats = orders::order_stats(merchant_id, from, to, &mut conn).await?;
        Ok(stats)
    }
}

impl CommerceDatabase for SqliteDatabase {
    fn url(&self) -> &str {
        self.url.as_str()
    }

    async fn close(&mut self) -> Result<(), CommerceError> {
        self.pool.close().await;
        Ok(())
    }
}
