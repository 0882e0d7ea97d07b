// farmgate/src/web/routes.rs

use actix_web::web;

use crate::web::handlers::{auth_handlers, dashboard_handlers, order_handlers, product_handlers, user_handlers};

async fn health_check_handler() -> actix_web::HttpResponse {
  actix_web::HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

// Called in `main.rs` (and the HTTP tests) to configure services for the Actix App.
pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg.service(
    web::scope("/api/v1")
      // Health Check Route
      .route("/health", web::get().to(health_check_handler))
      // Authentication Routes
      .service(
        web::scope("/auth")
          .route("/signup", web::post().to(auth_handlers::signup_handler))
          .route("/login", web::post().to(auth_handlers::login_handler))
          .route("/logout", web::post().to(auth_handlers::logout_handler)),
      )
      // User Routes
      .service(web::scope("/users").route("/{id}", web::get().to(user_handlers::get_user_handler)))
      // Product Routes. `/mine` and `/category/...` are registered before the
      // `/{product_id}` catch-all so they are matched first.
      .service(
        web::scope("/products")
          .route("", web::get().to(product_handlers::list_products_handler))
          .route("", web::post().to(product_handlers::create_product_handler))
          .route("/mine", web::get().to(product_handlers::list_own_products_handler))
          .route(
            "/category/{category}",
            web::get().to(product_handlers::list_by_category_handler),
          )
          .route("/{product_id}", web::get().to(product_handlers::get_product_handler))
          .route("/{product_id}", web::put().to(product_handlers::update_product_handler))
          .route(
            "/{product_id}",
            web::delete().to(product_handlers::delete_product_handler),
          ),
      )
      // Order Routes
      .service(
        web::scope("/orders")
          .route("", web::post().to(order_handlers::place_order_handler))
          .route("/mine", web::get().to(order_handlers::buyer_orders_handler))
          .route("/sales", web::get().to(order_handlers::seller_orders_handler))
          .route(
            "/{order_id}/status",
            web::put().to(order_handlers::update_order_status_handler),
          ),
      )
      // Dashboard Routes
      .service(
        web::scope("/dashboard")
          .route("/stats", web::get().to(dashboard_handlers::dashboard_stats_handler))
          .route(
            "/transactions",
            web::get().to(dashboard_handlers::seller_transactions_handler),
          ),
      ),
  );
}
