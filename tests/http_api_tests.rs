// tests/http_api_tests.rs
//
// Exercises the HTTP surface end to end: the identity extractor, the guard,
// and the JSON error mapping, on top of the same services the other suites
// cover directly.

mod common;

use actix_web::{test, web, App};
use common::*;
use serde_json::{json, Value};
use std::sync::Arc;

use farmgate::state::AppState;
use farmgate::store::Stores;
use farmgate::web::configure_app_routes;

fn test_state() -> AppState {
  AppState {
    stores: Stores::in_memory(),
    config: Arc::new(test_config()),
  }
}

macro_rules! init_app {
  ($state:expr) => {
    test::init_service(
      App::new()
        .app_data(web::Data::new($state.clone()))
        .configure(configure_app_routes),
    )
    .await
  };
}

async fn signup(
  app: &impl actix_web::dev::Service<
    actix_http::Request,
    Response = actix_web::dev::ServiceResponse,
    Error = actix_web::Error,
  >,
  name: &str,
  email: &str,
  role: &str,
) -> (String, Value) {
  let req = test::TestRequest::post()
    .uri("/api/v1/auth/signup")
    .set_json(json!({
      "name": name,
      "email": email,
      "password": "a-long-enough-password",
      "role": role,
    }))
    .to_request();
  let body: Value = test::call_and_read_body_json(app, req).await;
  let token = body["token"].as_str().expect("signup must return a token").to_string();
  (token, body["user"].clone())
}

#[actix_web::test]
async fn full_marketplace_flow_over_http() {
  setup_tracing();
  let state = test_state();
  let app = init_app!(state);

  // A farmer signs up and lists a product.
  let (farmer_token, _farmer) = signup(&app, "Old MacDonald", "farmer@example.com", "farmer").await;
  let req = test::TestRequest::post()
    .uri("/api/v1/products")
    .insert_header(("Authorization", format!("Bearer {}", farmer_token)))
    .set_json(json!({
      "name": "Wildflower Honey",
      "priceCents": 1000,
      "category": "Honey",
      "quantity": 5,
    }))
    .to_request();
  let product: Value = test::call_and_read_body_json(&app, req).await;
  let product_id = product["id"].as_str().unwrap().to_string();
  assert_eq!(product["quantity"], 5);
  assert!(product["image"].as_str().unwrap().starts_with("https://"), "image defaults");

  // A buyer signs up and orders three jars.
  let (buyer_token, _buyer) = signup(&app, "Beatrix", "buyer@example.com", "buyer").await;
  let req = test::TestRequest::post()
    .uri("/api/v1/orders")
    .insert_header(("Authorization", format!("Bearer {}", buyer_token)))
    .set_json(json!([{ "productId": product_id, "quantity": 3 }]))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), 201);
  let order: Value = test::read_body_json(resp).await;
  assert_eq!(order["total_cents"], 3000);
  assert_eq!(order["status"], "pending");
  let order_id = order["id"].as_str().unwrap().to_string();

  // Stock is down to two.
  let req = test::TestRequest::get()
    .uri(&format!("/api/v1/products/{}", product_id))
    .to_request();
  let product: Value = test::call_and_read_body_json(&app, req).await;
  assert_eq!(product["quantity"], 2);

  // The buyer cannot advance the order; the farmer can.
  let req = test::TestRequest::put()
    .uri(&format!("/api/v1/orders/{}/status", order_id))
    .insert_header(("Authorization", format!("Bearer {}", buyer_token)))
    .set_json(json!({ "status": "confirmed" }))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), 403);

  let req = test::TestRequest::put()
    .uri(&format!("/api/v1/orders/{}/status", order_id))
    .insert_header(("Authorization", format!("Bearer {}", farmer_token)))
    .set_json(json!({ "status": "confirmed" }))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), 200);

  // The order shows up for both sides.
  let req = test::TestRequest::get()
    .uri("/api/v1/orders/mine")
    .insert_header(("Authorization", format!("Bearer {}", buyer_token)))
    .to_request();
  let mine: Value = test::call_and_read_body_json(&app, req).await;
  assert_eq!(mine.as_array().unwrap().len(), 1);

  let req = test::TestRequest::get()
    .uri("/api/v1/orders/sales")
    .insert_header(("Authorization", format!("Bearer {}", farmer_token)))
    .to_request();
  let sales: Value = test::call_and_read_body_json(&app, req).await;
  assert_eq!(sales.as_array().unwrap().len(), 1);
  assert_eq!(sales[0]["id"], order_id.as_str());
}

#[actix_web::test]
async fn anonymous_and_bad_tokens_get_401_and_mutate_nothing() {
  setup_tracing();
  let state = test_state();
  let app = init_app!(state.clone());

  let (farmer_token, _) = signup(&app, "Greta", "greta@example.com", "farmer").await;
  let req = test::TestRequest::post()
    .uri("/api/v1/products")
    .insert_header(("Authorization", format!("Bearer {}", farmer_token)))
    .set_json(json!({ "name": "Tulips", "priceCents": 300, "category": "Flowers", "quantity": 8 }))
    .to_request();
  let product: Value = test::call_and_read_body_json(&app, req).await;
  let product_id = product["id"].as_str().unwrap().to_string();

  // No credential at all.
  let req = test::TestRequest::post()
    .uri("/api/v1/orders")
    .set_json(json!([{ "productId": product_id, "quantity": 2 }]))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), 401);

  // A tampered token demotes to anonymous rather than erroring.
  let mut tampered = farmer_token.clone();
  tampered.push('x');
  let req = test::TestRequest::post()
    .uri("/api/v1/orders")
    .insert_header(("Authorization", format!("Bearer {}", tampered)))
    .set_json(json!([{ "productId": product_id, "quantity": 2 }]))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), 401);

  // Stock is untouched either way.
  assert_eq!(
    stock_of(&state.stores, product_id.parse().unwrap()).await,
    8,
    "rejected requests must not touch stock"
  );
}

#[actix_web::test]
async fn quoted_tokens_are_accepted() {
  setup_tracing();
  let state = test_state();
  let app = init_app!(state);

  let (token, _) = signup(&app, "Quincy", "quincy@example.com", "buyer").await;

  // The original web client sends the JSON-encoded token verbatim.
  let req = test::TestRequest::post()
    .uri("/api/v1/auth/logout")
    .insert_header(("Authorization", format!("\"{}\"", token)))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), 200);
}

#[actix_web::test]
async fn oversell_and_bad_category_map_to_structured_errors() {
  setup_tracing();
  let state = test_state();
  let app = init_app!(state);

  let (farmer_token, _) = signup(&app, "Olga", "olga@example.com", "farmer").await;
  let req = test::TestRequest::post()
    .uri("/api/v1/products")
    .insert_header(("Authorization", format!("Bearer {}", farmer_token)))
    .set_json(json!({ "name": "Seed Corn", "priceCents": 50, "category": "Crops", "quantity": 1 }))
    .to_request();
  let product: Value = test::call_and_read_body_json(&app, req).await;
  let product_id = product["id"].as_str().unwrap().to_string();

  let (buyer_token, _) = signup(&app, "Bob", "bob@example.com", "buyer").await;
  let req = test::TestRequest::post()
    .uri("/api/v1/orders")
    .insert_header(("Authorization", format!("Bearer {}", buyer_token)))
    .set_json(json!([{ "productId": product_id, "quantity": 4 }]))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), 409);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body["requested"], 4);
  assert_eq!(body["available"], 1);

  let req = test::TestRequest::get()
    .uri("/api/v1/products/category/Livestock")
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), 400);
}

#[actix_web::test]
async fn dashboard_is_gated_and_reports_completed_trade() {
  setup_tracing();
  let state = test_state();
  let app = init_app!(state);

  let req = test::TestRequest::get().uri("/api/v1/dashboard/stats").to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), 401);

  let (farmer_token, _) = signup(&app, "Dana", "dana@example.com", "farmer").await;
  let req = test::TestRequest::post()
    .uri("/api/v1/products")
    .insert_header(("Authorization", format!("Bearer {}", farmer_token)))
    .set_json(json!({ "name": "Manure Sacks", "priceCents": 400, "category": "Manure", "quantity": 10 }))
    .to_request();
  let product: Value = test::call_and_read_body_json(&app, req).await;
  let product_id = product["id"].as_str().unwrap().to_string();

  let (buyer_token, _) = signup(&app, "Taylor", "taylor@example.com", "buyer").await;
  let req = test::TestRequest::post()
    .uri("/api/v1/orders")
    .insert_header(("Authorization", format!("Bearer {}", buyer_token)))
    .set_json(json!([{ "productId": product_id, "quantity": 2 }]))
    .to_request();
  let order: Value = test::call_and_read_body_json(&app, req).await;
  let order_id = order["id"].as_str().unwrap().to_string();

  for status in ["confirmed", "completed"] {
    let req = test::TestRequest::put()
      .uri(&format!("/api/v1/orders/{}/status", order_id))
      .insert_header(("Authorization", format!("Bearer {}", farmer_token)))
      .set_json(json!({ "status": status }))
      .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
  }

  let req = test::TestRequest::get()
    .uri("/api/v1/dashboard/stats")
    .insert_header(("Authorization", format!("Bearer {}", buyer_token)))
    .to_request();
  let stats: Value = test::call_and_read_body_json(&app, req).await;
  assert_eq!(stats["totalOrders"], 1);
  assert_eq!(stats["totalRevenueCents"], 800);
  assert_eq!(stats["activeListings"], 1);
  assert_eq!(stats["recentTransactions"].as_array().unwrap().len(), 1);
}
