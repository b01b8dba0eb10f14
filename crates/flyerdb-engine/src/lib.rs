pub mod catalog;
pub mod date;
pub mod error;
pub mod extract;
pub mod price;
pub mod reduce;
pub mod run;

pub use catalog::{add_listings, ProductUniverse, StoreCatalog};
pub use date::parse_flyer_date;
pub use error::EngineError;
pub use extract::{extract, normalize_store_name};
pub use price::parse_price_token;
pub use reduce::{reduce, reduce_with, Selection};
pub use run::{FlyerRun, PageOutcome, PageSummary};
