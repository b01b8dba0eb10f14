//! Accumulates flyers in visit order and reduces them at the end of a run.

use std::collections::BTreeMap;

use flyerdb_core::{BestPriceRecord, FlyerDate, FlyerPage};

use crate::catalog::{add_listings, ProductUniverse, StoreCatalog};
use crate::date::parse_flyer_date;
use crate::error::EngineError;
use crate::extract::{extract, normalize_store_name};
use crate::reduce::{reduce_with, Selection};

/// Counts for one ingested flyer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSummary {
    pub store: String,
    pub flyer_date: FlyerDate,
    pub listings: usize,
    pub extracted: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    Ingested(PageSummary),
    /// The dealer heading reduced to nothing; the flyer contributed nothing.
    SkippedNoStoreName,
}

/// State for one aggregation run.
///
/// Flyers must be ingested one at a time in visit order: a later listing for
/// the same store and product overwrites an earlier one.
#[derive(Debug, Clone)]
pub struct FlyerRun {
    reference_year: i32,
    selection: Selection,
    catalog: StoreCatalog,
    universe: ProductUniverse,
    flyer_date: Option<FlyerDate>,
}

impl FlyerRun {
    #[must_use]
    pub fn new(reference_year: i32) -> Self {
        Self {
            reference_year,
            selection: Selection::default(),
            catalog: StoreCatalog::new(),
            universe: ProductUniverse::new(),
            flyer_date: None,
        }
    }

    #[must_use]
    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = selection;
        self
    }

    /// Adds one flyer to the run.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::DateFormat`] if the flyer's date text cannot be
    /// parsed. Nothing from that flyer is added in that case.
    pub fn ingest(&mut self, page: &FlyerPage) -> Result<PageOutcome, EngineError> {
        let flyer_date = parse_flyer_date(&page.date_text, self.reference_year)?;

        let Some(store) = normalize_store_name(&page.store_display_name) else {
            tracing::warn!(
                heading = %page.store_display_name,
                "skipping flyer with no store name"
            );
            return Ok(PageOutcome::SkippedNoStoreName);
        };

        match self.flyer_date {
            Some(previous) if previous != flyer_date => {
                tracing::warn!(
                    store = %store,
                    previous = %previous,
                    current = %flyer_date,
                    "flyer dates differ within one run; using the latest"
                );
            }
            _ => {}
        }
        self.flyer_date = Some(flyer_date);

        let items: Vec<_> = page.listings.iter().filter_map(|raw| extract(raw)).collect();
        let extracted = items.len();
        tracing::debug!(
            store = %store,
            listings = page.listings.len(),
            extracted,
            misses = page.listings.len() - extracted,
            "extracted sale items"
        );

        add_listings(&store, items, &mut self.catalog, &mut self.universe);

        Ok(PageOutcome::Ingested(PageSummary {
            store,
            flyer_date,
            listings: page.listings.len(),
            extracted,
        }))
    }

    /// Date shared by every record of this run: that of the latest ingested
    /// flyer.
    #[must_use]
    pub fn flyer_date(&self) -> Option<FlyerDate> {
        self.flyer_date
    }

    #[must_use]
    pub fn catalog(&self) -> &StoreCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn universe(&self) -> &ProductUniverse {
        &self.universe
    }

    /// Reduces everything ingested so far. Empty if no flyer was ingested.
    #[must_use]
    pub fn best_prices(&self) -> BTreeMap<String, BestPriceRecord> {
        match self.flyer_date {
            Some(date) => reduce_with(&self.catalog, &self.universe, date, self.selection),
            None => BTreeMap::new(),
        }
    }
}
