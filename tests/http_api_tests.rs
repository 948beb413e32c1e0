// tests/http_api_tests.rs
mod common;

use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use common::*;
use serde_json::{json, Value};
use uuid::Uuid;

use olatech_store::web::routes::configure_app_routes;
use olatech_store::web::session::SESSION_COOKIE;

macro_rules! test_app {
  ($state:expr) => {
    test::init_service(
      App::new()
        .app_data(web::Data::new($state.clone()))
        .configure(configure_app_routes),
    )
    .await
  };
}

#[actix_web::test]
async fn health_endpoint_responds() -> anyhow::Result<()> {
  let state = test_state().await?;
  let app = test_app!(state);

  let resp = test::call_service(&app, test::TestRequest::get().uri("/api/health").to_request()).await;
  assert_eq!(resp.status(), StatusCode::OK);
  Ok(())
}

#[actix_web::test]
async fn admin_create_requires_the_shared_password() -> anyhow::Result<()> {
  let state = test_state().await?;
  let app = test_app!(state);

  let resp = test::call_service(
    &app,
    test::TestRequest::post()
      .uri("/api/admin/products")
      .set_json(json!({
        "title": "Plot", "price": "1000", "category": "land", "password": "nope"
      }))
      .to_request(),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

  let resp = test::call_service(
    &app,
    test::TestRequest::post()
      .uri("/api/admin/products")
      .set_json(json!({
        "title": "Plot", "price": "1000", "category": "land", "password": TEST_ADMIN_PASSWORD
      }))
      .to_request(),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::CREATED);
  let body: Value = test::read_body_json(resp).await;
  assert!(Uuid::parse_str(body["id"].as_str().expect("id should be a string")).is_ok());
  Ok(())
}

#[actix_web::test]
async fn admin_create_rejects_incomplete_bodies() -> anyhow::Result<()> {
  let state = test_state().await?;
  let app = test_app!(state);

  let resp = test::call_service(
    &app,
    test::TestRequest::post()
      .uri("/api/admin/products")
      .set_json(json!({ "price": "1000", "category": "land", "password": TEST_ADMIN_PASSWORD }))
      .to_request(),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  let body: Value = test::read_body_json(resp).await;
  assert!(body["error"].as_str().unwrap_or_default().contains("title"));
  Ok(())
}

#[actix_web::test]
async fn product_listing_applies_category_and_sub_category() -> anyhow::Result<()> {
  let state = test_state().await?;
  seed_product(&state, "Desk", 200, "furnitures", Some("office")).await?;
  seed_product(&state, "Sofa", 450, "furnitures", Some("home")).await?;
  seed_product(&state, "Coupe", 15_000, "auto", None).await?;
  let app = test_app!(state);

  let resp = test::call_service(&app, test::TestRequest::get().uri("/api/products").to_request()).await;
  assert_eq!(resp.status(), StatusCode::OK);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body.as_array().map(Vec::len), Some(3));

  let resp = test::call_service(
    &app,
    test::TestRequest::get()
      .uri("/api/products?category=furnitures&subCategory=office")
      .to_request(),
  )
  .await;
  let body: Value = test::read_body_json(resp).await;
  let listed = body.as_array().expect("response should be an array");
  assert_eq!(listed.len(), 1);
  assert_eq!(listed[0]["title"], "Desk");
  assert_eq!(listed[0]["subCategory"], "office");
  Ok(())
}

#[actix_web::test]
async fn cart_flow_over_http_carries_a_session_cookie() -> anyhow::Result<()> {
  let state = test_state().await?;
  let pid = seed_product(&state, "Desk", 200, "furnitures", Some("office")).await?;
  let app = test_app!(state);

  // First touch: a fresh session cookie comes back with the updated cart.
  let resp = test::call_service(
    &app,
    test::TestRequest::post()
      .uri("/api/cart/add")
      .set_json(json!({ "productId": pid, "quantity": 2 }))
      .to_request(),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::OK);
  let cookie = resp
    .response()
    .cookies()
    .find(|c| c.name() == SESSION_COOKIE)
    .map(|c| c.into_owned())
    .expect("fresh session cookie should be set");
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body.as_array().map(Vec::len), Some(1));
  assert_eq!(body[0]["quantity"], 2);
  assert_eq!(body[0]["product"]["title"], "Desk");

  // Same cookie sees the same cart.
  let resp = test::call_service(
    &app,
    test::TestRequest::get().uri("/api/cart").cookie(cookie.clone()).to_request(),
  )
  .await;
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body.as_array().map(Vec::len), Some(1));

  // Adding again through the same session accumulates.
  let resp = test::call_service(
    &app,
    test::TestRequest::post()
      .uri("/api/cart/add")
      .cookie(cookie.clone())
      .set_json(json!({ "productId": pid, "quantity": 3 }))
      .to_request(),
  )
  .await;
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body[0]["quantity"], 5);

  // Quantity zero removes the line.
  let resp = test::call_service(
    &app,
    test::TestRequest::post()
      .uri("/api/cart/update")
      .cookie(cookie.clone())
      .set_json(json!({ "productId": pid, "quantity": 0 }))
      .to_request(),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::OK);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body.as_array().map(Vec::len), Some(0));

  // A cookie-less request is a different (empty) session.
  let resp = test::call_service(&app, test::TestRequest::get().uri("/api/cart").to_request()).await;
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body.as_array().map(Vec::len), Some(0));
  Ok(())
}

#[actix_web::test]
async fn cart_update_without_a_line_is_not_found() -> anyhow::Result<()> {
  let state = test_state().await?;
  let pid = seed_product(&state, "Desk", 200, "furnitures", None).await?;
  let app = test_app!(state);

  let resp = test::call_service(
    &app,
    test::TestRequest::post()
      .uri("/api/cart/update")
      .set_json(json!({ "productId": pid, "quantity": 2 }))
      .to_request(),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  Ok(())
}

#[actix_web::test]
async fn cart_add_of_unknown_product_is_not_found() -> anyhow::Result<()> {
  let state = test_state().await?;
  let app = test_app!(state);

  let resp = test::call_service(
    &app,
    test::TestRequest::post()
      .uri("/api/cart/add")
      .set_json(json!({ "productId": Uuid::new_v4(), "quantity": 1 }))
      .to_request(),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  Ok(())
}

#[actix_web::test]
async fn cart_add_requires_a_product_id() -> anyhow::Result<()> {
  let state = test_state().await?;
  let app = test_app!(state);

  let resp = test::call_service(
    &app,
    test::TestRequest::post()
      .uri("/api/cart/add")
      .set_json(json!({ "quantity": 1 }))
      .to_request(),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  Ok(())
}

#[actix_web::test]
async fn cart_clear_acknowledges_and_empties() -> anyhow::Result<()> {
  let state = test_state().await?;
  let pid = seed_product(&state, "Desk", 200, "furnitures", None).await?;
  let app = test_app!(state);

  let resp = test::call_service(
    &app,
    test::TestRequest::post()
      .uri("/api/cart/add")
      .set_json(json!({ "productId": pid, "quantity": 2 }))
      .to_request(),
  )
  .await;
  let cookie = resp
    .response()
    .cookies()
    .find(|c| c.name() == SESSION_COOKIE)
    .map(|c| c.into_owned())
    .expect("fresh session cookie should be set");

  let resp = test::call_service(
    &app,
    test::TestRequest::post().uri("/api/cart/clear").cookie(cookie.clone()).to_request(),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::OK);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body["ok"], true);

  let resp = test::call_service(
    &app,
    test::TestRequest::get().uri("/api/cart").cookie(cookie).to_request(),
  )
  .await;
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body.as_array().map(Vec::len), Some(0));
  Ok(())
}

#[actix_web::test]
async fn admin_delete_takes_the_password_from_the_query() -> anyhow::Result<()> {
  let state = test_state().await?;
  let pid = seed_product(&state, "Desk", 200, "furnitures", None).await?;
  let app = test_app!(state);

  let resp = test::call_service(
    &app,
    test::TestRequest::delete()
      .uri(&format!("/api/admin/products/{}?password=nope", pid))
      .to_request(),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

  let resp = test::call_service(
    &app,
    test::TestRequest::delete()
      .uri(&format!("/api/admin/products/{}?password={}", pid, TEST_ADMIN_PASSWORD))
      .to_request(),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::OK);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body["ok"], true);
  assert!(state.products.get(pid).await?.is_none());
  Ok(())
}

#[actix_web::test]
async fn admin_mark_sold_round_trips() -> anyhow::Result<()> {
  let state = test_state().await?;
  let pid = seed_product(&state, "Bungalow", 90_000, "properties", None).await?;
  let app = test_app!(state);

  let resp = test::call_service(
    &app,
    test::TestRequest::post()
      .uri(&format!("/api/admin/products/{}/sold", pid))
      .set_json(json!({ "password": TEST_ADMIN_PASSWORD }))
      .to_request(),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::OK);

  let resp = test::call_service(&app, test::TestRequest::get().uri("/api/products").to_request()).await;
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body[0]["status"], "sold");
  Ok(())
}
