//! Offline unit tests for flyerdb-db pool configuration and row types.
//! These tests do not require a live database connection.

use std::str::FromStr;

use chrono::{NaiveDate, Utc};
use flyerdb_core::{AppConfig, BestPriceRecord, Environment, PriceKind};
use flyerdb_db::{BestPriceRow, DbError, PoolConfig};
use rust_decimal::Decimal;

fn row(price_kind: &str) -> BestPriceRow {
    BestPriceRow {
        record_key: "Metro#Striploin Steak#2024-06-12".to_string(),
        store_name: "Metro".to_string(),
        product_name: "Striploin Steak".to_string(),
        flyer_date: NaiveDate::from_ymd_opt(2024, 6, 12).unwrap(),
        price: Decimal::from_str("9.99").unwrap(),
        price_kind: price_kind.to_string(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

#[test]
fn pool_config_from_app_config_uses_core_values() {
    let app_config = AppConfig {
        database_url: Some("postgres://example".to_string()),
        env: Environment::Test,
        log_level: "info".to_string(),
        db_max_connections: 42,
        db_min_connections: 7,
        db_acquire_timeout_secs: 9,
    };

    let pool_config = PoolConfig::from_app_config(&app_config);
    assert_eq!(pool_config.max_connections, 42);
    assert_eq!(pool_config.min_connections, 7);
    assert_eq!(pool_config.acquire_timeout_secs, 9);
}

#[test]
fn row_converts_to_record() {
    let record = BestPriceRecord::try_from(row("per_unit")).unwrap();
    assert_eq!(record.store, "Metro");
    assert_eq!(record.product_name, "Striploin Steak");
    assert_eq!(record.price_kind, PriceKind::PerUnit);
    assert_eq!(record.price_token(), "9.99/lb");
    assert_eq!(record.key().encode(), "Metro#Striploin Steak#2024-06-12");
}

#[test]
fn row_with_unknown_price_kind_is_rejected() {
    let err = BestPriceRecord::try_from(row("per_kg")).unwrap_err();
    assert!(
        matches!(err, DbError::InvalidRow { ref record_key, .. } if record_key == "Metro#Striploin Steak#2024-06-12")
    );
}

#[tokio::test]
async fn connect_without_database_url_fails_fast() {
    let app_config = AppConfig {
        database_url: None,
        env: Environment::Test,
        log_level: "info".to_string(),
        db_max_connections: 1,
        db_min_connections: 1,
        db_acquire_timeout_secs: 1,
    };

    let err = flyerdb_db::connect_from_app_config(&app_config)
        .await
        .unwrap_err();
    assert!(matches!(err, DbError::MissingDatabaseUrl));
}
