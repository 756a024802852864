pub mod country;
pub mod engine;
pub mod normalize;
pub mod prompts;

pub use crate::domain::model::{CountryProfile, DiscoveryOutput, PriceRecord, SearchResult};
pub use crate::domain::ports::{ConfigProvider, LanguageModel, PricePipeline};
pub use crate::utils::error::Result;
