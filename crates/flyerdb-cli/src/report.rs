//! `report` command: read back stored best prices for one flyer date.

use anyhow::Context;
use flyerdb_core::{BestPriceRecord, FlyerDate};

fn format_row(record: &BestPriceRecord) -> String {
    format!(
        "{:<40} {:>10}  {}",
        record.product_name,
        record.price_token(),
        record.store
    )
}

/// Runs the `report` command.
///
/// # Errors
///
/// Returns an error if `date` is not `YYYY-MM-DD`, the database is
/// unreachable, or the query fails.
pub(crate) async fn run_report(config: &flyerdb_core::AppConfig, date: &str) -> anyhow::Result<()> {
    let flyer_date: FlyerDate = date.parse()?;

    let pool = flyerdb_db::connect_from_app_config(config)
        .await
        .context("failed to connect to the database")?;
    let records = flyerdb_db::list_best_prices_for_date(&pool, flyer_date).await?;

    if records.is_empty() {
        println!("no best prices stored for {flyer_date}");
        return Ok(());
    }

    println!("best prices for {flyer_date} ({} products)", records.len());
    for record in &records {
        println!("{}", format_row(record));
    }

    Ok(())
}
