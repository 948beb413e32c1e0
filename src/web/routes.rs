// src/web/routes.rs

use actix_web::web;

async fn health_check_handler() -> actix_web::HttpResponse {
  actix_web::HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

// Called from `main.rs` (and the integration tests) to configure the Actix App.
pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg.service(
    web::scope("/api")
      .route("/health", web::get().to(health_check_handler))
      // Catalog
      .service(web::scope("/products").route(
        "",
        web::get().to(crate::web::handlers::product_handlers::list_products_handler),
      ))
      // Admin mutations (shared-credential gated in the store)
      .service(
        web::scope("/admin/products")
          .route(
            "",
            web::post().to(crate::web::handlers::admin_handlers::create_product_handler),
          )
          .route(
            "/{product_id}",
            web::put().to(crate::web::handlers::admin_handlers::update_product_handler),
          )
          .route(
            "/{product_id}/sold",
            web::post().to(crate::web::handlers::admin_handlers::mark_sold_handler),
          )
          .route(
            "/{product_id}",
            web::delete().to(crate::web::handlers::admin_handlers::delete_product_handler),
          ),
      )
      // Session cart
      .service(
        web::scope("/cart")
          .route("", web::get().to(crate::web::handlers::cart_handlers::view_cart_handler))
          .route(
            "/add",
            web::post().to(crate::web::handlers::cart_handlers::add_to_cart_handler),
          )
          .route(
            "/update",
            web::post().to(crate::web::handlers::cart_handlers::update_cart_handler),
          )
          .route(
            "/clear",
            web::post().to(crate::web::handlers::cart_handlers::clear_cart_handler),
          ),
      ),
  );
}
