pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use app::handler::{HandlerError, PriceHandler};
pub use config::AppConfig;
pub use core::engine::{PriceSearchEngine, SearchOutcome};
pub use domain::model::{PriceRecord, PriceRequest, SearchResult};
pub use utils::error::{PriceError, Result};
