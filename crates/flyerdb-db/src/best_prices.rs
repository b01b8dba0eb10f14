//! Database operations for `best_prices`.

use chrono::{DateTime, NaiveDate, Utc};
use flyerdb_core::{BestPriceRecord, FlyerDate, PriceKind};
use rust_decimal::Decimal;
use sqlx::{PgExecutor, PgPool};

use crate::DbError;

/// A row from the `best_prices` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct BestPriceRow {
    /// [`flyerdb_core::RecordKey::encode`] of the record.
    pub record_key: String,
    pub store_name: String,
    pub product_name: String,
    pub flyer_date: NaiveDate,
    /// Unscaled `NUMERIC`; the value is stored exactly as advertised.
    pub price: Decimal,
    /// `"absolute"` or `"per_unit"`.
    pub price_kind: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<BestPriceRow> for BestPriceRecord {
    type Error = DbError;

    fn try_from(row: BestPriceRow) -> Result<Self, Self::Error> {
        let price_kind = row
            .price_kind
            .parse::<PriceKind>()
            .map_err(|source| DbError::InvalidRow {
                record_key: row.record_key.clone(),
                source,
            })?;

        Ok(BestPriceRecord {
            product_name: row.product_name,
            price: row.price,
            price_kind,
            store: row.store_name,
            flyer_date: FlyerDate::new(row.flyer_date),
        })
    }
}

async fn upsert_with<'e, E>(executor: E, record: &BestPriceRecord) -> Result<(), DbError>
where
    E: PgExecutor<'e>,
{
    sqlx::query(
        "INSERT INTO best_prices \
             (record_key, store_name, product_name, flyer_date, price, price_kind) \
         VALUES ($1, $2, $3, $4, $5, $6) \
         ON CONFLICT (record_key) DO UPDATE SET \
             price      = EXCLUDED.price, \
             price_kind = EXCLUDED.price_kind, \
             updated_at = NOW()",
    )
    .bind(record.key().encode())
    .bind(&record.store)
    .bind(&record.product_name)
    .bind(record.flyer_date.as_naive_date())
    .bind(record.price)
    .bind(record.price_kind.as_str())
    .execute(executor)
    .await?;

    Ok(())
}

/// Upserts one record keyed by its encoded [`flyerdb_core::RecordKey`].
///
/// Conflicts update `price`, `price_kind` and `updated_at` in place.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the upsert fails.
pub async fn upsert_best_price(pool: &PgPool, record: &BestPriceRecord) -> Result<(), DbError> {
    upsert_with(pool, record).await
}

/// Upserts a whole run's records in one transaction.
///
/// Returns the number of records written. Nothing is written if any upsert
/// fails.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the transaction cannot be opened, any
/// upsert fails, or the commit fails.
pub async fn upsert_best_prices<'a, I>(pool: &PgPool, records: I) -> Result<usize, DbError>
where
    I: IntoIterator<Item = &'a BestPriceRecord>,
{
    let mut tx = pool.begin().await?;
    let mut written = 0usize;

    for record in records {
        upsert_with(&mut *tx, record).await?;
        written += 1;
    }

    tx.commit().await?;
    Ok(written)
}

/// Returns every stored record for a flyer date, ordered by product name.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails, or [`DbError::InvalidRow`]
/// if a stored `price_kind` is not recognized.
pub async fn list_best_prices_for_date(
    pool: &PgPool,
    flyer_date: FlyerDate,
) -> Result<Vec<BestPriceRecord>, DbError> {
    let rows = sqlx::query_as::<_, BestPriceRow>(
        "SELECT record_key, store_name, product_name, flyer_date, price, price_kind, \
                created_at, updated_at \
         FROM best_prices \
         WHERE flyer_date = $1 \
         ORDER BY product_name, store_name",
    )
    .bind(flyer_date.as_naive_date())
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(BestPriceRecord::try_from).collect()
}
