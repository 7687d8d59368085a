//! Menu browser route handlers.
//!
//! The menu is a filtered view over the static catalog. Switching tabs
//! fetches a fresh grid fragment; the only state is the selected category,
//! carried in the query string.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use baobab_core::catalog::{Catalog, CatalogItem, CategoryFilter};
use serde::Deserialize;
use tracing::instrument;

use crate::error::Result;
use crate::state::AppState;

/// One category tab.
#[derive(Clone)]
pub struct CategoryTabView {
    pub slug: &'static str,
    pub label: &'static str,
    pub active: bool,
}

/// Menu card display data for templates.
#[derive(Clone)]
pub struct MenuItemView {
    pub name: String,
    pub description: String,
    pub price: String,
    pub image: String,
}

impl From<&CatalogItem> for MenuItemView {
    fn from(item: &CatalogItem) -> Self {
        Self {
            name: item.name.clone(),
            description: item.description.clone(),
            price: item.price.display(),
            image: format!("/static/{}", item.image),
        }
    }
}

/// Menu section display data: tabs plus the filtered cards.
#[derive(Clone)]
pub struct MenuView {
    pub tabs: Vec<CategoryTabView>,
    pub items: Vec<MenuItemView>,
}

impl MenuView {
    #[must_use]
    pub fn new(catalog: &Catalog, selected: CategoryFilter) -> Self {
        let tabs = CategoryFilter::options()
            .into_iter()
            .map(|filter| CategoryTabView {
                slug: filter.slug(),
                label: filter.label(),
                active: filter == selected,
            })
            .collect();

        let items = catalog.filter(selected).map(MenuItemView::from).collect();

        Self { tabs, items }
    }
}

/// Menu grid fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/menu.html")]
pub struct MenuTemplate {
    pub menu: MenuView,
}

/// Query parameters for the menu fragment.
#[derive(Debug, Deserialize)]
pub struct MenuQuery {
    pub category: Option<String>,
}

/// Render the menu filtered to `?category=` (default `all`).
///
/// # Errors
///
/// Returns 400 for an unknown category.
#[allow(clippy::unused_async)]
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Query(query): Query<MenuQuery>,
) -> Result<MenuTemplate> {
    let filter = match query.category.as_deref() {
        Some(slug) => slug.parse::<CategoryFilter>()?,
        None => CategoryFilter::All,
    };

    Ok(MenuTemplate {
        menu: MenuView::new(state.catalog(), filter),
    })
}
