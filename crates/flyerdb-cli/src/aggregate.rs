//! `aggregate` command: captured flyer pages in, best prices out.
//!
//! Pages are ingested in file order, which is the order the flyers were
//! visited. A page with an unreadable date is reported and skipped; the rest
//! of the run continues.

use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::Datelike;
use flyerdb_core::{BestPriceRecord, FlyerPage};
use flyerdb_engine::{FlyerRun, PageOutcome, Selection};

pub(crate) struct AggregateOptions {
    pub input: PathBuf,
    pub reference_year: i32,
    pub selection: Selection,
    pub dry_run: bool,
}

/// What one run produced, before anything is persisted.
#[derive(Debug, Default)]
pub(crate) struct RunReport {
    pub records: Vec<BestPriceRecord>,
    pub ingested: usize,
    pub skipped: usize,
    /// `(store heading, reason)` for flyers rejected over their date.
    pub rejected: Vec<(String, String)>,
}

pub(crate) fn current_year() -> i32 {
    chrono::Local::now().year()
}

fn load_pages(path: &Path) -> anyhow::Result<Vec<FlyerPage>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read flyer pages from {}", path.display()))?;
    parse_pages(&raw).with_context(|| format!("invalid flyer pages in {}", path.display()))
}

fn parse_pages(raw: &str) -> anyhow::Result<Vec<FlyerPage>> {
    Ok(serde_json::from_str(raw)?)
}

pub(crate) fn aggregate_pages(
    pages: &[FlyerPage],
    reference_year: i32,
    selection: Selection,
) -> RunReport {
    let mut run = FlyerRun::new(reference_year).with_selection(selection);
    let mut report = RunReport::default();

    for page in pages {
        match run.ingest(page) {
            Ok(PageOutcome::Ingested(summary)) => {
                tracing::info!(
                    store = %summary.store,
                    flyer_date = %summary.flyer_date,
                    listings = summary.listings,
                    extracted = summary.extracted,
                    "flyer ingested"
                );
                report.ingested += 1;
            }
            Ok(PageOutcome::SkippedNoStoreName) => report.skipped += 1,
            Err(e) => {
                tracing::warn!(heading = %page.store_display_name, error = %e, "flyer rejected");
                report
                    .rejected
                    .push((page.store_display_name.clone(), e.to_string()));
            }
        }
    }

    report.records = run.best_prices().into_values().collect();
    report
}

/// Runs the `aggregate` command.
///
/// # Errors
///
/// Returns an error if the input cannot be read or parsed, or if persisting
/// fails. Rejected flyers are reported, not returned as errors.
pub(crate) async fn run_aggregate(
    config: &flyerdb_core::AppConfig,
    options: &AggregateOptions,
) -> anyhow::Result<()> {
    let pages = load_pages(&options.input)?;
    let report = aggregate_pages(&pages, options.reference_year, options.selection);

    for record in &report.records {
        println!("{}", serde_json::to_string(record)?);
    }

    for (heading, reason) in &report.rejected {
        eprintln!("rejected flyer \"{heading}\": {reason}");
    }

    tracing::info!(
        pages = pages.len(),
        ingested = report.ingested,
        skipped = report.skipped,
        rejected = report.rejected.len(),
        records = report.records.len(),
        "aggregation complete"
    );

    if options.dry_run {
        eprintln!(
            "dry-run: would write {} best-price records",
            report.records.len()
        );
        return Ok(());
    }

    if report.records.is_empty() {
        return Ok(());
    }

    let pool = flyerdb_db::connect_from_app_config(config)
        .await
        .context("failed to connect to the database (use --dry-run to skip persistence)")?;
    let written = flyerdb_db::upsert_best_prices(&pool, &report.records).await?;
    eprintln!("wrote {written} best-price records");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGES: &str = r#"[
        {
            "store_display_name": "Metro Flyer",
            "date_text": "Thu Jun 12",
            "listings": [
                "View product pageMilkModel #: 1$2.50Sale Price",
                "View product pageStriploin SteakModel #: 2$9.99/lbSale Price"
            ]
        },
        {
            "store_display_name": "Walmart Flyer",
            "date_text": "Thu Jun 12",
            "listings": [
                "View product pageMilkModel #: 3$3.75Sale Price",
                "View product pageStriploin SteakModel #: 4$7.49/lbSale Price"
            ]
        },
        {
            "store_display_name": "Adonis Flyer",
            "date_text": "sometime soon",
            "listings": ["View product pageMilkModel #: 5$8.00Sale Price"]
        },
        {
            "store_display_name": "Flyer",
            "date_text": "Thu Jun 12",
            "listings": []
        }
    ]"#;

    #[test]
    fn aggregate_pages_reports_each_outcome() {
        let pages = parse_pages(PAGES).unwrap();
        let report = aggregate_pages(&pages, 2024, Selection::Highest);

        assert_eq!(report.ingested, 2);
        assert_eq!(report.skipped, 1);
        assert_eq!(report.rejected.len(), 1);
        assert_eq!(report.rejected[0].0, "Adonis Flyer");
    }

    #[test]
    fn aggregate_pages_records_are_ordered_by_product() {
        let pages = parse_pages(PAGES).unwrap();
        let report = aggregate_pages(&pages, 2024, Selection::Highest);

        let names: Vec<&str> = report
            .records
            .iter()
            .map(|r| r.product_name.as_str())
            .collect();
        assert_eq!(names, vec!["Milk", "Striploin Steak"]);
        assert_eq!(report.records[0].store, "Walmart");
        assert_eq!(report.records[1].store, "Metro");
    }

    #[test]
    fn aggregate_pages_with_no_pages_is_empty() {
        let report = aggregate_pages(&[], 2024, Selection::Highest);
        assert!(report.records.is_empty());
        assert_eq!(report.ingested, 0);
    }

    #[test]
    fn parse_pages_rejects_non_array() {
        assert!(parse_pages(r#"{"store_display_name": "Metro"}"#).is_err());
    }

    #[test]
    fn load_pages_reports_missing_file() {
        let err = load_pages(Path::new("/definitely/not/here/pages.json")).unwrap_err();
        assert!(format!("{err:#}").contains("failed to read flyer pages"));
    }
}
