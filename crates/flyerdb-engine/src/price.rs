//! Interpretation of extracted price tokens.

use std::str::FromStr;

use flyerdb_core::{PriceKind, PER_LB_SUFFIX};
use rust_decimal::Decimal;

/// Parses a price token into an exact decimal and its kind.
///
/// `"9.99/lb"` is [`PriceKind::PerUnit`]; anything without the suffix is
/// [`PriceKind::Absolute`]. Returns `None` if the numeric part is not a
/// decimal.
#[must_use]
pub fn parse_price_token(token: &str) -> Option<(Decimal, PriceKind)> {
    let token = token.trim();
    let (number, kind) = match token.strip_suffix(PER_LB_SUFFIX) {
        Some(number) => (number, PriceKind::PerUnit),
        None => (token, PriceKind::Absolute),
    };

    Decimal::from_str(number).ok().map(|price| (price, kind))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn absolute_token() {
        assert_eq!(
            parse_price_token("2.50"),
            Some((dec("2.50"), PriceKind::Absolute))
        );
    }

    #[test]
    fn per_lb_token() {
        assert_eq!(
            parse_price_token("4.99/lb"),
            Some((dec("4.99"), PriceKind::PerUnit))
        );
    }

    #[test]
    fn keeps_exact_scale() {
        let (price, _) = parse_price_token("0.10").unwrap();
        assert_eq!(price.to_string(), "0.10");
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_price_token("free"), None);
        assert_eq!(parse_price_token("/lb"), None);
        assert_eq!(parse_price_token(""), None);
    }
}
