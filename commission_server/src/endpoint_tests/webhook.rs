use actix_web::{test, web, App};
use commission_engine::{
    events::EventProducers,
    test_utils::issuers::FixedIssuer,
    traits::InsertOrderResult,
    AffiliateApi,
    OrderFlowApi,
};
use serde_json::json;

use crate::{
    data_objects::JsonResponse,
    endpoint_tests::mocks::{test_affiliate, test_merchant, test_order, MockCommerceDb},
    routes::order_webhook,
};

fn webhook_payload(order_id: &str) -> serde_json::Value {
    json!({
        "order_id": order_id,
        "subtotal_price": 199.95,
        "merchant_domain": "widgets.example.com",
        "discount_code": "",
        "customer_email": "alice@example.com",
        "customer_name": "Alice Archer"
    })
}

async fn post_webhook(db: MockCommerceDb, payload: serde_json::Value) -> JsonResponse {
    let _ = env_logger::try_init();
    let registry = AffiliateApi::new(MockCommerceDb::new(), FixedIssuer::no_code(), EventProducers::default());
    let api = OrderFlowApi::new(db, registry);
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(api))
            .route("/webhook/order", web::post().to(order_webhook::<MockCommerceDb, FixedIssuer>)),
    )
    .await;
    let req = test::TestRequest::post().uri("/webhook/order").set_json(payload).to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success(), "webhook must always answer in the 200 range");
    test::read_body_json(resp).await
}

#[actix_web::test]
async fn fresh_order_is_processed() {
    let mut db = MockCommerceDb::new();
    db.expect_fetch_order_by_external_id().returning(|_| Ok(None));
    db.expect_fetch_merchant_by_domain().returning(|_| Ok(Some(test_merchant())));
    db.expect_fetch_affiliate_for_email().returning(|_| Ok(Some(test_affiliate())));
    db.expect_insert_order().returning(|_| Ok(InsertOrderResult::Inserted(test_order("5910974"))));

    let body = post_webhook(db, webhook_payload("5910974")).await;
    assert!(body.success, "{}", body.message);
}

#[actix_web::test]
async fn replayed_order_reports_success() {
    let mut db = MockCommerceDb::new();
    db.expect_fetch_order_by_external_id().returning(|_| Ok(Some(test_order("5910974"))));

    let body = post_webhook(db, webhook_payload("5910974")).await;
    assert!(body.success);
    assert!(body.message.contains("already"), "{}", body.message);
}

#[actix_web::test]
async fn unknown_merchant_reports_failure_in_the_body() {
    let mut db = MockCommerceDb::new();
    db.expect_fetch_order_by_external_id().returning(|_| Ok(None));
    db.expect_fetch_merchant_by_domain().returning(|_| Ok(None));

    let body = post_webhook(db, webhook_payload("5910974")).await;
    assert!(!body.success);
    assert!(body.message.contains("Failed to process order"), "{}", body.message);
}

#[actix_web::test]
async fn malformed_payload_reports_failure_in_the_body() {
    let db = MockCommerceDb::new();
    let mut payload = webhook_payload("5910974");
    payload["order_id"] = json!("");

    let body = post_webhook(db, payload).await;
    assert!(!body.success);
}
