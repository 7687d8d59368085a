//! HTTP route handlers for the site.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page (the whole site)
//! GET  /health                 - Health check
//!
//! # Menu & gallery (HTMX fragments)
//! GET  /menu?category=         - Menu grid for one category, or `all`
//! GET  /gallery/{index}        - Carousel at a slide index
//!
//! # Cart (HTMX fragments)
//! GET  /cart                   - Open cart drawer
//! GET  /cart/close             - Closed drawer
//! GET  /cart/count             - Cart count badge
//! POST /cart/add               - Add a dish (returns badge + toast, triggers cart-updated)
//! POST /cart/update            - Set quantity (returns drawer)
//! POST /cart/remove            - Remove a line (returns drawer)
//! POST /cart/clear             - Empty the cart (returns drawer)
//! POST /cart/checkout          - Simulated checkout (returns drawer with a notice)
//!
//! # Contact & toast
//! POST /contact                - Contact form submission
//! GET  /toast/dismiss          - Empty toast slot
//! ```

pub mod cart;
pub mod contact;
pub mod gallery;
pub mod home;
pub mod menu;
pub mod toast;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/close", get(cart::close))
        .route("/count", get(cart::count))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
        .route("/checkout", post(cart::checkout))
}

/// Create all routes for the site.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/menu", get(menu::show))
        .route("/gallery/{index}", get(gallery::show))
        .nest("/cart", cart_routes())
        .route("/contact", post(contact::submit))
        .route("/toast/dismiss", get(toast::dismiss))
}
