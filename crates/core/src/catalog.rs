//! The static menu catalog.
//!
//! The catalog is seeded once at startup and never mutated. Dish names are
//! unique and double as the cart's line identity, so [`Catalog::new`] refuses
//! duplicate names as well as duplicate ids.

use core::fmt;
use core::str::FromStr;
use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{MenuItemId, Price};

/// Errors raised while building a [`Catalog`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("duplicate menu item id: {0}")]
    DuplicateId(MenuItemId),
    #[error("duplicate menu item name: {0}")]
    DuplicateName(String),
    #[error("menu item {0} has a negative price")]
    NegativePrice(String),
}

/// A menu section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Appetizers,
    Mains,
    Desserts,
    Drinks,
}

impl Category {
    /// Every category, in menu order.
    pub const ALL: [Self; 4] = [Self::Appetizers, Self::Mains, Self::Desserts, Self::Drinks];

    /// URL/query slug.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Appetizers => "appetizers",
            Self::Mains => "mains",
            Self::Desserts => "desserts",
            Self::Drinks => "drinks",
        }
    }

    /// Human-readable tab label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Appetizers => "Appetizers",
            Self::Mains => "Main Courses",
            Self::Desserts => "Desserts",
            Self::Drinks => "Drinks",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// Error for an unrecognized category slug.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown menu category: {0}")]
pub struct UnknownCategory(pub String);

/// The menu browser's category selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    /// Every selectable filter, in tab order.
    #[must_use]
    pub fn options() -> Vec<Self> {
        std::iter::once(Self::All)
            .chain(Category::ALL.into_iter().map(Self::Only))
            .collect()
    }

    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Only(category) => category.slug(),
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Only(category) => category.label(),
        }
    }

    /// Whether an item in `category` passes this filter.
    #[must_use]
    pub fn matches(self, category: Category) -> bool {
        match self {
            Self::All => true,
            Self::Only(selected) => selected == category,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            return Ok(Self::All);
        }
        Category::ALL
            .into_iter()
            .find(|category| category.slug() == s)
            .map(Self::Only)
            .ok_or_else(|| UnknownCategory(s.to_owned()))
    }
}

/// A purchasable dish or drink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: MenuItemId,
    pub name: String,
    pub category: Category,
    pub price: Price,
    pub description: String,
    /// Path of the dish photo, relative to the static root.
    pub image: String,
}

/// The immutable menu.
#[derive(Debug, Clone)]
pub struct Catalog {
    items: Vec<CatalogItem>,
}

impl Catalog {
    /// Build a catalog, validating id and name uniqueness.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] on a duplicate id, a duplicate name, or a
    /// negative price.
    pub fn new(items: Vec<CatalogItem>) -> Result<Self, CatalogError> {
        let mut ids = HashSet::new();
        let mut names = HashSet::new();

        for item in &items {
            if !ids.insert(item.id) {
                return Err(CatalogError::DuplicateId(item.id));
            }
            if !names.insert(item.name.as_str()) {
                return Err(CatalogError::DuplicateName(item.name.clone()));
            }
            if item.price.is_negative() {
                return Err(CatalogError::NegativePrice(item.name.clone()));
            }
        }

        Ok(Self { items })
    }

    /// The restaurant's house menu.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the menu data breaks a catalog rule.
    pub fn house_menu() -> Result<Self, CatalogError> {
        let dish = |id, name: &str, category, cents, description: &str, image: &str| CatalogItem {
            id: MenuItemId::new(id),
            name: name.to_owned(),
            category,
            price: Price::from_cents(cents),
            description: description.to_owned(),
            image: image.to_owned(),
        };

        Self::new(vec![
            dish(
                1,
                "Accara",
                Category::Appetizers,
                899,
                "Black-eyed pea fritters served with spicy tomato sauce",
                "img/accara.jpg",
            ),
            dish(
                2,
                "Fataya",
                Category::Appetizers,
                799,
                "Savory fried pastries filled with fish or meat",
                "img/fataya.jpg",
            ),
            dish(
                3,
                "Thieboudienne",
                Category::Mains,
                1899,
                "Senegal's national dish - fish and rice with vegetables",
                "img/thieboudieune.jpg",
            ),
            dish(
                4,
                "Yassa Poulet",
                Category::Mains,
                1699,
                "Marinated grilled chicken with onions and lemon sauce",
                "img/yassa poulet.jpg",
            ),
            dish(
                5,
                "Mafe",
                Category::Mains,
                1799,
                "Peanut stew with meat and vegetables, served with rice",
                "img/mafe.jpg",
            ),
            dish(
                6,
                "Thiakry",
                Category::Desserts,
                699,
                "Millet couscous with sweetened yogurt and dried fruits",
                "img/thiakry.jpg",
            ),
            dish(
                7,
                "Bissap",
                Category::Drinks,
                499,
                "Refreshing hibiscus tea, a Senegalese favorite",
                "img/bissap.jpg",
            ),
            dish(
                8,
                "Ginger Juice",
                Category::Drinks,
                599,
                "Freshly pressed ginger with a hint of lemon",
                "img/ginger .jpg",
            ),
        ])
    }

    /// All items in menu order.
    #[must_use]
    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    /// Items passing `filter`, in menu order.
    pub fn filter(&self, filter: CategoryFilter) -> impl Iterator<Item = &CatalogItem> {
        self.items
            .iter()
            .filter(move |item| filter.matches(item.category))
    }

    #[must_use]
    pub fn find(&self, id: MenuItemId) -> Option<&CatalogItem> {
        self.items.iter().find(|item| item.id == id)
    }

    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&CatalogItem> {
        self.items.iter().find(|item| item.name == name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
