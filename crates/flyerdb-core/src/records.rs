//! The engine's output record and its persistence key.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::flyers::FlyerDate;
use crate::CoreError;

/// Suffix marking a price quoted per pound rather than per item.
pub const PER_LB_SUFFIX: &str = "/lb";

const KEY_SEPARATOR: char = '#';
const KEY_ESCAPE: char = '\\';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceKind {
    Absolute,
    PerUnit,
}

impl PriceKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            PriceKind::Absolute => "absolute",
            PriceKind::PerUnit => "per_unit",
        }
    }
}

impl fmt::Display for PriceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PriceKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "absolute" => Ok(PriceKind::Absolute),
            "per_unit" => Ok(PriceKind::PerUnit),
            other => Err(CoreError::InvalidPriceKind(other.to_string())),
        }
    }
}

/// The winning advertised price for one product on one flyer date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestPriceRecord {
    pub product_name: String,
    /// Exact decimal; never round-tripped through a float.
    pub price: Decimal,
    pub price_kind: PriceKind,
    pub store: String,
    pub flyer_date: FlyerDate,
}

impl BestPriceRecord {
    #[must_use]
    pub fn key(&self) -> RecordKey {
        RecordKey {
            store: self.store.clone(),
            product_name: self.product_name.clone(),
            flyer_date: self.flyer_date,
        }
    }

    /// Renders the price the way flyers advertise it, e.g. `"9.99/lb"`.
    #[must_use]
    pub fn price_token(&self) -> String {
        match self.price_kind {
            PriceKind::Absolute => self.price.to_string(),
            PriceKind::PerUnit => format!("{}{PER_LB_SUFFIX}", self.price),
        }
    }
}

/// Unique identity of a persisted [`BestPriceRecord`].
///
/// Encodes as `store#product#date`. Separator and escape characters inside
/// the store or product name are backslash-escaped, so names containing `#`
/// cannot collide with a different key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordKey {
    pub store: String,
    pub product_name: String,
    pub flyer_date: FlyerDate,
}

impl RecordKey {
    #[must_use]
    pub fn encode(&self) -> String {
        let mut out = String::with_capacity(self.store.len() + self.product_name.len() + 12);
        push_escaped(&mut out, &self.store);
        out.push(KEY_SEPARATOR);
        push_escaped(&mut out, &self.product_name);
        out.push(KEY_SEPARATOR);
        out.push_str(&self.flyer_date.to_string());
        out
    }

    /// Inverse of [`RecordKey::encode`].
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::MalformedRecordKey`] if the key does not have
    /// exactly three segments, ends in a dangling escape, or carries an
    /// unparseable date.
    pub fn decode(key: &str) -> Result<Self, CoreError> {
        let malformed = |reason: &str| CoreError::MalformedRecordKey {
            key: key.to_string(),
            reason: reason.to_string(),
        };

        let mut parts: Vec<String> = vec![String::new()];
        let mut chars = key.chars();
        while let Some(c) = chars.next() {
            match c {
                KEY_ESCAPE => {
                    let escaped = chars.next().ok_or_else(|| malformed("dangling escape"))?;
                    if let Some(current) = parts.last_mut() {
                        current.push(escaped);
                    }
                }
                KEY_SEPARATOR => parts.push(String::new()),
                other => {
                    if let Some(current) = parts.last_mut() {
                        current.push(other);
                    }
                }
            }
        }

        let [store, product_name, date] = <[String; 3]>::try_from(parts)
            .map_err(|_| malformed("expected store#product#date"))?;
        let flyer_date = date
            .parse::<FlyerDate>()
            .map_err(|e| malformed(&e.to_string()))?;

        Ok(Self {
            store,
            product_name,
            flyer_date,
        })
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

fn push_escaped(out: &mut String, segment: &str) {
    for c in segment.chars() {
        if c == KEY_SEPARATOR || c == KEY_ESCAPE {
            out.push(KEY_ESCAPE);
        }
        out.push(c);
    }
}
