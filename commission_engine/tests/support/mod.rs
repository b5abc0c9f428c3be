#![allow(dead_code)]
use acg_common::Money;
use commission_engine::{
    db_types::{IncomingOrder, Merchant, NewMerchant, OrderId},
    events::EventProducers,
    test_utils::{
        issuers::FixedIssuer,
        prepare_env::{prepare_test_env, random_db_path},
    },
    AffiliateApi,
    MerchantApi,
    OrderFlowApi,
    SqliteDatabase,
};

pub const TEST_MERCHANT_DOMAIN: &str = "widgets.example.com";

pub async fn new_test_db() -> SqliteDatabase {
    let url = random_db_path();
    prepare_test_env(&url).await;
    SqliteDatabase::new_with_url(&url, 5).await.expect("Error creating database")
}

pub async fn seed_merchant(db: &SqliteDatabase) -> Merchant {
    let api = MerchantApi::new(db.clone());
    let merchant = NewMerchant::new(TEST_MERCHANT_DOMAIN, "Widgets Inc", "owner@widgets.example.com", "wdg-api-key");
    api.register(merchant).await.expect("Error registering test merchant")
}

/// An order flow wired with a no-op discount issuer and no event subscribers.
pub fn order_flow(db: &SqliteDatabase) -> OrderFlowApi<SqliteDatabase, FixedIssuer> {
    let registry = AffiliateApi::new(db.clone(), FixedIssuer::no_code(), EventProducers::default());
    OrderFlowApi::new(db.clone(), registry)
}

pub fn incoming(order_id: &str, subtotal_cents: i64, customer_email: &str) -> IncomingOrder {
    IncomingOrder {
        external_order_id: OrderId(order_id.to_string()),
        subtotal: Money::from_cents(subtotal_cents),
        merchant_domain: TEST_MERCHANT_DOMAIN.to_string(),
        discount_code: String::new(),
        customer_email: customer_email.to_string(),
        customer_name: "Jamie Doe".to_string(),
    }
}
