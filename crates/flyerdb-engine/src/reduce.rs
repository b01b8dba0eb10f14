//! Reduction of per-store prices to one winning record per product.

use std::collections::BTreeMap;

use flyerdb_core::{BestPriceRecord, FlyerDate};
use rust_decimal::Decimal;

use crate::catalog::{ProductUniverse, StoreCatalog};
use crate::price::parse_price_token;

/// Which same-kind price wins when two stores list the same product.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Selection {
    /// Larger price wins. This is the long-standing behavior of the
    /// aggregation and remains the default.
    #[default]
    Highest,
    Lowest,
}

impl Selection {
    fn prefers(self, candidate: Decimal, incumbent: Decimal) -> bool {
        match self {
            Selection::Highest => candidate > incumbent,
            Selection::Lowest => candidate < incumbent,
        }
    }
}

/// Reduces the catalog with [`Selection::Highest`].
#[must_use]
pub fn reduce(
    catalog: &StoreCatalog,
    universe: &ProductUniverse,
    date: FlyerDate,
) -> BTreeMap<String, BestPriceRecord> {
    reduce_with(catalog, universe, date, Selection::Highest)
}

/// Produces one [`BestPriceRecord`] per product in `universe` that has at
/// least one parseable price in `catalog`.
///
/// Stores are visited in name order. Among prices of the same kind the one
/// preferred by `selection` wins; ties keep the store visited first. A price
/// of a different kind than the running best replaces it outright, because
/// per-pound and per-item prices are not comparable.
#[must_use]
pub fn reduce_with(
    catalog: &StoreCatalog,
    universe: &ProductUniverse,
    date: FlyerDate,
    selection: Selection,
) -> BTreeMap<String, BestPriceRecord> {
    let mut best_prices = BTreeMap::new();

    for product in universe.iter() {
        let mut best: Option<BestPriceRecord> = None;

        for (store, items) in catalog.stores() {
            let Some(token) = items.get(product) else {
                continue;
            };
            let Some((price, price_kind)) = parse_price_token(token) else {
                tracing::warn!(store, product, token = %token, "skipping unparseable price token");
                continue;
            };

            let candidate = BestPriceRecord {
                product_name: product.to_string(),
                price,
                price_kind,
                store: store.to_string(),
                flyer_date: date,
            };

            match best.as_mut() {
                None => best = Some(candidate),
                Some(current) if current.price_kind != price_kind => {
                    tracing::warn!(
                        product,
                        kept_store = %current.store,
                        kept_kind = %current.price_kind,
                        store,
                        kind = %price_kind,
                        "price kind differs across stores; later store replaces earlier"
                    );
                    *current = candidate;
                }
                Some(current) => {
                    if selection.prefers(price, current.price) {
                        *current = candidate;
                    }
                }
            }
        }

        if let Some(record) = best {
            best_prices.insert(product.to_string(), record);
        }
    }

    best_prices
}
