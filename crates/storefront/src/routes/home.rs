//! Home page route handler.
//!
//! The whole site is one page. Each interactive section is also served on its
//! own as an HTMX fragment, and the page includes those same partials, so the
//! first render and later swaps share markup.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use baobab_core::catalog::CategoryFilter;
use tracing::instrument;

use crate::error::Result;
use crate::filters;
use crate::middleware::CspNonce;
use crate::routes::cart::CartDrawerView;
use crate::routes::contact::ContactView;
use crate::routes::gallery::GalleryView;
use crate::routes::menu::MenuView;
use crate::routes::toast::ToastSlotView;
use crate::services::VisitorCart;
use crate::state::AppState;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub nonce: String,
    /// Badge count, restored from the visitor's saved cart.
    pub cart_count: u32,
    pub menu: MenuView,
    pub gallery: GalleryView,
    pub contact: ContactView,
    pub drawer: CartDrawerView,
    pub toast_slot: ToastSlotView,
}

/// Display the home page.
///
/// # Errors
///
/// Returns an error if the visitor's cart cannot be loaded.
#[allow(clippy::unused_async)]
#[instrument(skip_all)]
pub async fn home(
    State(state): State<AppState>,
    CspNonce(nonce): CspNonce,
    cart: VisitorCart,
) -> Result<HomeTemplate> {
    Ok(HomeTemplate {
        nonce,
        cart_count: cart.total_quantity(),
        menu: MenuView::new(state.catalog(), CategoryFilter::All),
        gallery: GalleryView::at(state.slides(), 0)?,
        contact: ContactView::blank(),
        drawer: CartDrawerView::closed(),
        toast_slot: ToastSlotView::empty(),
    })
}
