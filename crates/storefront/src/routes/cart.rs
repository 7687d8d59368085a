//! Cart route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page reloads.
//! Each handler gets the visitor's cart already locked (see [`VisitorCart`]),
//! mutates it through the store, which writes it back, and releases it when
//! it returns.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{AppendHeaders, IntoResponse, Response},
};
use baobab_core::cart::{CartState, LineItem};
use baobab_core::notification::Notification;
use serde::Deserialize;
use tracing::instrument;

use crate::error::{AppError, Result, add_breadcrumb};
use crate::routes::toast::ToastSlotView;
use crate::services::VisitorCart;
use crate::state::AppState;

/// Confirmation shown after a successful checkout.
pub const ORDER_PLACED: &str = "Thank you for your order! Your food will be prepared shortly.";

/// Prompt shown when checking out an empty cart.
pub const CART_EMPTY: &str = "Your cart is empty!";

/// Event name HTMX listeners use to refresh the badge.
const CART_UPDATED_TRIGGER: &str = "cart-updated";

/// Cart line display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub name: String,
    pub quantity: u32,
    pub decrement: i64,
    pub increment: i64,
    pub price: String,
    pub line_price: String,
}

impl From<&LineItem> for CartItemView {
    fn from(line: &LineItem) -> Self {
        let quantity = i64::from(line.quantity);
        Self {
            name: line.name.clone(),
            quantity: line.quantity,
            decrement: quantity - 1,
            increment: quantity + 1,
            price: line.price.display(),
            line_price: line.line_total().display(),
        }
    }
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub total: String,
    pub item_count: u32,
}

impl CartView {
    /// An empty cart.
    #[must_use]
    pub fn empty() -> Self {
        Self::from(&CartState::new())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl From<&CartState> for CartView {
    fn from(state: &CartState) -> Self {
        Self {
            items: state.items().iter().map(CartItemView::from).collect(),
            total: state.calculate_total().display(),
            item_count: state.total_quantity(),
        }
    }
}

/// Drawer contents: the cart plus an optional checkout message.
#[derive(Clone)]
pub struct CartDrawerView {
    pub cart: CartView,
    pub notice: Option<String>,
    pub open: bool,
}

impl CartDrawerView {
    #[must_use]
    pub const fn open(cart: CartView) -> Self {
        Self {
            cart,
            notice: None,
            open: true,
        }
    }

    #[must_use]
    pub fn closed() -> Self {
        Self {
            cart: CartView::empty(),
            notice: None,
            open: false,
        }
    }

    #[must_use]
    pub fn with_notice(mut self, notice: &str) -> Self {
        self.notice = Some(notice.to_string());
        self
    }
}

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub name: String,
}

/// Update cart form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub name: String,
    pub quantity: i64,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub name: String,
}

/// Cart drawer fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_drawer.html")]
pub struct CartDrawerTemplate {
    pub drawer: CartDrawerView,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub cart_count: u32,
}

/// Add-to-cart response: new badge plus the toast, swapped out of band.
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_added.html")]
pub struct CartAddedTemplate {
    pub cart_count: u32,
    pub toast_slot: ToastSlotView,
}

fn drawer(cart: &VisitorCart) -> CartDrawerTemplate {
    CartDrawerTemplate {
        drawer: CartDrawerView::open(CartView::from(cart.state())),
    }
}

fn updated(template: impl IntoResponse) -> Response {
    (
        AppendHeaders([("HX-Trigger", CART_UPDATED_TRIGGER)]),
        template,
    )
        .into_response()
}

/// Open the cart drawer.
#[allow(clippy::unused_async)]
#[instrument(skip(cart))]
pub async fn show(cart: VisitorCart) -> CartDrawerTemplate {
    drawer(&cart)
}

/// Close the cart drawer.
#[allow(clippy::unused_async)]
pub async fn close() -> CartDrawerTemplate {
    CartDrawerTemplate {
        drawer: CartDrawerView::closed(),
    }
}

/// Get cart count badge (HTMX).
#[allow(clippy::unused_async)]
#[instrument(skip(cart))]
pub async fn count(cart: VisitorCart) -> CartCountTemplate {
    CartCountTemplate {
        cart_count: cart.total_quantity(),
    }
}

/// Add one of a dish to the cart (HTMX).
///
/// The price comes from the catalog, never from the form.
///
/// # Errors
///
/// Returns 404 for a dish that is not on the menu, or a storage error.
#[instrument(skip(state, cart))]
pub async fn add(
    State(state): State<AppState>,
    mut cart: VisitorCart,
    Form(form): Form<AddToCartForm>,
) -> Result<Response> {
    let item = state
        .catalog()
        .find_by_name(&form.name)
        .ok_or_else(|| AppError::NotFound(format!("menu item {}", form.name)))?;

    cart.add_item(&item.name, item.price).await?;

    add_breadcrumb("cart", "Added item", Some(&[("name", item.name.as_str())]));
    tracing::info!(
        name = %item.name,
        cart_count = cart.total_quantity(),
        "Added item to cart"
    );

    Ok(updated(CartAddedTemplate {
        cart_count: cart.total_quantity(),
        toast_slot: ToastSlotView::out_of_band(Notification::item_added(&item.name)),
    }))
}

/// Set a line's quantity; zero or less removes it (HTMX).
///
/// # Errors
///
/// Returns a storage error if the cart cannot be saved.
#[instrument(skip(cart))]
pub async fn update(mut cart: VisitorCart, Form(form): Form<UpdateCartForm>) -> Result<Response> {
    cart.update_quantity(&form.name, form.quantity).await?;
    Ok(updated(drawer(&cart)))
}

/// Remove a line from the cart (HTMX).
///
/// # Errors
///
/// Returns a storage error if the cart cannot be saved.
#[instrument(skip(cart))]
pub async fn remove(
    mut cart: VisitorCart,
    Form(form): Form<RemoveFromCartForm>,
) -> Result<Response> {
    cart.remove_item(&form.name).await?;
    add_breadcrumb("cart", "Removed item", Some(&[("name", form.name.as_str())]));
    Ok(updated(drawer(&cart)))
}

/// Empty the cart (HTMX). The button confirms client-side first.
///
/// # Errors
///
/// Returns a storage error if the cart cannot be saved.
#[instrument(skip(cart))]
pub async fn clear(mut cart: VisitorCart) -> Result<Response> {
    cart.clear_cart().await?;
    Ok(updated(drawer(&cart)))
}

/// Simulated checkout.
///
/// An empty cart gets the empty-cart prompt and is left alone. Otherwise the
/// order is "placed": logged, the cart cleared and a thank-you shown. Nothing
/// is sent anywhere.
///
/// # Errors
///
/// Returns a storage error if the cart cannot be saved.
#[instrument(skip(cart))]
pub async fn checkout(mut cart: VisitorCart) -> Result<Response> {
    if cart.is_empty() {
        return Ok(drawer(&cart).with_notice(CART_EMPTY).into_response());
    }

    tracing::info!(
        lines = cart.items().len(),
        quantity = cart.total_quantity(),
        total = %cart.calculate_total(),
        "Order placed"
    );
    add_breadcrumb("cart", "Checked out", None);

    cart.clear_cart().await?;
    Ok(updated(drawer(&cart).with_notice(ORDER_PLACED)))
}

impl CartDrawerTemplate {
    #[must_use]
    fn with_notice(self, notice: &str) -> Self {
        Self {
            drawer: self.drawer.with_notice(notice),
        }
    }
}
