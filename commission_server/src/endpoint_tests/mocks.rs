use acg_common::{CommissionRate, Money};
use chrono::{DateTime, Utc};
use commission_engine::{
    db_types::{
        Affiliate,
        Merchant,
        NewAffiliate,
        NewMerchant,
        NewOrder,
        Order,
        OrderId,
        OrderStats,
        PayoutStatus,
    },
    traits::{
        AffiliateManagement,
        CommerceDatabase,
        CommerceError,
        InsertOrderResult,
        MerchantManagement,
        OrderManagement,
    },
};
use mockall::mock;

mock! {
    pub CommerceDb {}

    impl MerchantManagement for CommerceDb {
        async fn insert_merchant(&self, merchant: NewMerchant) -> Result<Merchant, CommerceError>;
        async fn fetch_merchant_by_domain(&self, domain: &str) -> Result<Option<Merchant>, CommerceError>;
        async fn fetch_merchant_by_api_key(&self, api_key: &str) -> Result<Option<Merchant>, CommerceError>;
        async fn fetch_merchant_for_email(&self, email: &str) -> Result<Option<Merchant>, CommerceError>;
    }

    impl AffiliateManagement for CommerceDb {
        async fn fetch_affiliate_for_email(&self, email: &str) -> Result<Option<Affiliate>, CommerceError>;
        async fn fetch_affiliate_by_id(&self, affiliate_id: i64) -> Result<Option<Affiliate>, CommerceError>;
        async fn insert_affiliate(&self, affiliate: NewAffiliate) -> Result<Affiliate, CommerceError>;
    }

    impl OrderManagement for CommerceDb {
        async fn insert_order(&self, order: NewOrder) -> Result<InsertOrderResult, CommerceError>;
        async fn fetch_order_by_external_id(&self, order_id: &OrderId) -> Result<Option<Order>, CommerceError>;
        async fn fetch_unpaid_orders(&self, affiliate_id: i64) -> Result<Vec<Order>, CommerceError>;
        async fn mark_order_paid(&self, order_id: &OrderId) -> Result<Order, CommerceError>;
        async fn order_stats(&self, merchant_id: i64, from: DateTime<Utc>, to: DateTime<Utc>) -> Result<OrderStats, CommerceError>;
    }

    impl CommerceDatabase for CommerceDb {
        fn url(&self) -> &str;
    }

    impl Clone for CommerceDb {
        fn clone(&self) -> Self;
    }
}

pub fn test_merchant() -> Merchant {
    Merchant {
        id: 1,
        account_id: 10,
        domain: "widgets.example.com".to_string(),
        display_name: "Widgets Inc".to_string(),
        created_at: Utc::now(),
    }
}

pub fn test_affiliate() -> Affiliate {
    Affiliate {
        id: 7,
        account_id: 11,
        merchant_id: 1,
        commission_rate: CommissionRate::from_percentage(10),
        discount_code: Some("SAVE10".to_string()),
        created_at: Utc::now(),
    }
}

pub fn test_order(external_order_id: &str) -> Order {
    Order {
        id: 42,
        external_order_id: OrderId(external_order_id.to_string()),
        merchant_id: 1,
        affiliate_id: Some(7),
        subtotal: Money::from_cents(19_995),
        commission_owed: Money::from_cents(2_000),
        payout_status: PayoutStatus::Unpaid,
        discount_code: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}
