mod support;

use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    time::Duration,
};

use commission_engine::{
    events::{EventHandlers, EventHooks, EventProducers},
    test_utils::issuers::{FailingIssuer, FixedIssuer, SlowIssuer},
    traits::AffiliateManagement,
    AffiliateApi,
    DEFAULT_COMMISSION_RATE,
};
use support::{new_test_db, seed_merchant};

#[tokio::test]
async fn duplicate_email_is_rejected_and_writes_nothing() {
    let db = new_test_db().await;
    let merchant = seed_merchant(&db).await;
    let registry = AffiliateApi::new(db.clone(), FixedIssuer::no_code(), EventProducers::default());

    // the merchant's own account already holds this email
    let err = registry
        .register(&merchant, "owner@widgets.example.com", "Owner", DEFAULT_COMMISSION_RATE)
        .await
        .expect_err("duplicate email must be rejected");
    let msg = err.to_string();
    assert!(msg.starts_with("Failed to create affiliate"), "unexpected message: {msg}");
    assert!(msg.contains("owner@widgets.example.com"), "message should name the email: {msg}");
    assert!(msg.contains("Merchant"), "message should name the existing account's role: {msg}");

    assert!(db.fetch_affiliate_for_email("owner@widgets.example.com").await.unwrap().is_none());
}

#[tokio::test]
async fn issued_discount_code_is_attached() {
    let db = new_test_db().await;
    let merchant = seed_merchant(&db).await;
    let registry = AffiliateApi::new(db.clone(), FixedIssuer::with_code("SAVE10"), EventProducers::default());

    let affiliate = registry.register(&merchant, "gina@example.com", "Gina", DEFAULT_COMMISSION_RATE).await.unwrap();
    assert_eq!(affiliate.discount_code.as_deref(), Some("SAVE10"));
}

#[tokio::test]
async fn issuer_failure_degrades_to_no_code() {
    let db = new_test_db().await;
    let merchant = seed_merchant(&db).await;
    let registry = AffiliateApi::new(db.clone(), FailingIssuer, EventProducers::default());

    let affiliate = registry.register(&merchant, "hana@example.com", "Hana", DEFAULT_COMMISSION_RATE).await.unwrap();
    assert!(affiliate.discount_code.is_none());
}

#[tokio::test]
async fn slow_issuer_is_cut_off_by_the_timeout() {
    let db = new_test_db().await;
    let merchant = seed_merchant(&db).await;
    let issuer = SlowIssuer::new(Duration::from_secs(5));
    let registry = AffiliateApi::new(db.clone(), issuer, EventProducers::default())
        .with_discount_timeout(Duration::from_millis(50));

    let affiliate = registry.register(&merchant, "ivan@example.com", "Ivan", DEFAULT_COMMISSION_RATE).await.unwrap();
    assert!(affiliate.discount_code.is_none());
}

#[tokio::test]
async fn welcome_notification_is_dispatched_after_registration() {
    let db = new_test_db().await;
    let merchant = seed_merchant(&db).await;

    let welcomes = Arc::new(AtomicUsize::new(0));
    let counter = welcomes.clone();
    let mut hooks = EventHooks::default();
    hooks.on_affiliate_created(move |ev| {
        let counter = counter.clone();
        Box::pin(async move {
            assert_eq!(ev.email, "judy@example.com");
            counter.fetch_add(1, Ordering::SeqCst);
        })
    });
    let handlers = EventHandlers::new(8, hooks);
    let producers = handlers.producers();
    handlers.start_handlers().await;

    let registry = AffiliateApi::new(db.clone(), FixedIssuer::no_code(), producers);
    registry.register(&merchant, "judy@example.com", "Judy", DEFAULT_COMMISSION_RATE).await.unwrap();

    // hand-off is fire-and-forget; give the handler task a beat
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(welcomes.load(Ordering::SeqCst), 1);
}
