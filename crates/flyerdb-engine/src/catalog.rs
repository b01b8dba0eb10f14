//! Per-store accumulation of extracted sale items for one run.

use std::collections::{BTreeMap, BTreeSet};

use flyerdb_core::PricedItem;

/// Store name → product name → price token.
///
/// Ordered maps keep reduction order stable from run to run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreCatalog {
    stores: BTreeMap<String, BTreeMap<String, String>>,
}

impl StoreCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `price_token` for `(store, product_name)`, replacing any
    /// earlier token for the same pair. Returns the replaced token.
    pub fn insert(&mut self, store: &str, product_name: &str, price_token: &str) -> Option<String> {
        self.stores
            .entry(store.to_string())
            .or_default()
            .insert(product_name.to_string(), price_token.to_string())
    }

    #[must_use]
    pub fn price_token(&self, store: &str, product_name: &str) -> Option<&str> {
        self.stores
            .get(store)
            .and_then(|items| items.get(product_name))
            .map(String::as_str)
    }

    /// Iterates stores in name order with their product → token maps.
    pub fn stores(&self) -> impl Iterator<Item = (&str, &BTreeMap<String, String>)> {
        self.stores.iter().map(|(store, items)| (store.as_str(), items))
    }

    #[must_use]
    pub fn store_count(&self) -> usize {
        self.stores.len()
    }

    /// Total `(store, product)` entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stores.values().map(BTreeMap::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }
}

/// Every distinct product name seen across all stores in a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductUniverse {
    products: BTreeSet<String>,
}

impl ProductUniverse {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the name was not already present.
    pub fn insert(&mut self, product_name: &str) -> bool {
        if self.products.contains(product_name) {
            return false;
        }
        self.products.insert(product_name.to_string())
    }

    #[must_use]
    pub fn contains(&self, product_name: &str) -> bool {
        self.products.contains(product_name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.products.iter().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

/// Adds one store's extracted items to the run state.
///
/// A product seen twice for the same store keeps the later token. The same
/// product under different stores is kept per store and settled by the
/// reducer.
pub fn add_listings<I>(
    store: &str,
    items: I,
    catalog: &mut StoreCatalog,
    universe: &mut ProductUniverse,
) where
    I: IntoIterator<Item = PricedItem>,
{
    for item in items {
        if let Some(previous) = catalog.insert(store, &item.product_name, &item.price_token) {
            if previous != item.price_token {
                tracing::debug!(
                    store,
                    product = %item.product_name,
                    previous = %previous,
                    replacement = %item.price_token,
                    "later listing overwrote price for the same store"
                );
            }
        }
        universe.insert(&item.product_name);
    }
}
