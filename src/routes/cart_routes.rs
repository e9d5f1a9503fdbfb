use axum::{Router, routing::{get, post}};

use crate::{AppState, controllers::cart_controller};

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/cart", get(cart_controller::get_cart))
        .route(
            "/cart/:id",
            post(cart_controller::post_add_product)
                .put(cart_controller::put_product_amount)
                .delete(cart_controller::delete_product),
        )
}
