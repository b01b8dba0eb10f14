use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::CoreError;

/// One flyer as captured by the page renderer: the dealer heading, the
/// publication date text and the text content of every product tile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlyerPage {
    /// Raw heading text, e.g. `"Metro Flyer"`.
    pub store_display_name: String,
    /// Raw `<time>` text, e.g. `"Thu Jun 12"`. Carries no year.
    pub date_text: String,
    #[serde(default)]
    pub listings: Vec<String>,
}

/// A product name paired with its sale-price token, as extracted from one
/// listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricedItem {
    pub product_name: String,
    /// Decimal string exactly as advertised, e.g. `"1.29"` or `"4.99/lb"`.
    /// Left unconverted so the per-unit marker survives to the reducer.
    pub price_token: String,
}

/// Calendar date a flyer was published, rendered as `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlyerDate(NaiveDate);

impl FlyerDate {
    #[must_use]
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    #[must_use]
    pub fn as_naive_date(&self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for FlyerDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for FlyerDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for FlyerDate {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Self)
            .map_err(|_| CoreError::InvalidFlyerDate(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flyer_date_displays_iso() {
        let date = FlyerDate::new(NaiveDate::from_ymd_opt(2024, 6, 2).unwrap());
        assert_eq!(date.to_string(), "2024-06-02");
    }

    #[test]
    fn flyer_date_parses_iso() {
        let date: FlyerDate = "2024-06-12".parse().unwrap();
        assert_eq!(
            date.as_naive_date(),
            NaiveDate::from_ymd_opt(2024, 6, 12).unwrap()
        );
    }

    #[test]
    fn flyer_date_rejects_display_text() {
        let err = "Thu Jun 12".parse::<FlyerDate>().unwrap_err();
        assert!(matches!(err, CoreError::InvalidFlyerDate(ref s) if s == "Thu Jun 12"));
    }

    #[test]
    fn flyer_date_serializes_as_plain_string() {
        let date: FlyerDate = "2024-06-12".parse().unwrap();
        assert_eq!(serde_json::to_string(&date).unwrap(), "\"2024-06-12\"");
    }

    #[test]
    fn flyer_page_listings_default_to_empty() {
        let page: FlyerPage = serde_json::from_str(
            r#"{"store_display_name": "Metro Flyer", "date_text": "Thu Jun 12"}"#,
        )
        .unwrap();
        assert_eq!(page.store_display_name, "Metro Flyer");
        assert!(page.listings.is_empty());
    }
}
