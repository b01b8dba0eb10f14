//! Pulls `(product, sale price)` facts out of the flattened text of one
//! product tile.
//!
//! Tiles render as e.g. `"View product pageBananasModel #: 4011$1.29Sale Price"`
//! once markup is stripped. Most tiles on a flyer are not sale items, so a
//! miss is the normal outcome and is reported as `None`, not an error.

use std::sync::LazyLock;

use flyerdb_core::PricedItem;
use regex::Regex;

use crate::price::parse_price_token;

static PRODUCT_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)View product page(.+?)(?:Model #:|$)").expect("valid product name regex")
});

static SALE_PRICE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$(\d+\.\d+(?:/lb)?)\s*Sale Price").expect("valid sale price regex")
});

/// Extracts a [`PricedItem`] from one listing's text.
///
/// The product name is whatever follows `"View product page"` up to a
/// `"Model #:"` marker or the end of text, trimmed. The price must be a
/// `$`-prefixed decimal (digits, point, digits), optionally suffixed `/lb`,
/// followed by `"Sale Price"`, and must fit an exact decimal. Both must be
/// present.
#[must_use]
pub fn extract(raw_text: &str) -> Option<PricedItem> {
    let product_name = PRODUCT_NAME_RE
        .captures(raw_text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|name| !name.is_empty())?;

    let price_token = SALE_PRICE_RE
        .captures(raw_text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|token| parse_price_token(token).is_some())?;

    Some(PricedItem {
        product_name: product_name.to_string(),
        price_token: price_token.to_string(),
    })
}

/// Reduces a dealer heading such as `"Metro Flyer"` to the store name.
///
/// Keeps the text before the first `"Flyer"`, trimmed. Returns `None` when
/// nothing is left.
#[must_use]
pub fn normalize_store_name(display_name: &str) -> Option<String> {
    let head = display_name
        .split_once("Flyer")
        .map_or(display_name, |(head, _)| head)
        .trim();

    if head.is_empty() {
        None
    } else {
        Some(head.to_string())
    }
}
