use crate::core::normalize::apply_default_currency;
use crate::core::PricePipeline;
use crate::domain::model::{CountryProfile, PriceRecord, Stage};
use crate::utils::error::PriceError;

/// 單次搜尋的結果。對外一律收斂成 (可能為空的) 價格清單
#[derive(Debug)]
pub enum SearchOutcome {
    Found(Vec<PriceRecord>),
    NoStructuredPayload,
    Degraded { stage: Stage, error: PriceError },
}

impl SearchOutcome {
    pub fn into_records(self) -> Vec<PriceRecord> {
        match self {
            SearchOutcome::Found(records) => records,
            SearchOutcome::NoStructuredPayload | SearchOutcome::Degraded { .. } => Vec::new(),
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, SearchOutcome::Degraded { .. })
    }
}

pub struct PriceSearchEngine<P: PricePipeline> {
    pipeline: P,
}

impl<P: PricePipeline> PriceSearchEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn search(&self, query: &str, profile: &CountryProfile) -> SearchOutcome {
        // Discovery
        tracing::debug!("🔎 Discovery stage for {:?} in {}", query, profile.code);
        let discovery = match self.pipeline.discover(query, profile).await {
            Ok(discovery) => discovery,
            Err(error) => {
                tracing::warn!("⚠️ Discovery stage failed, returning no results: {}", error);
                return SearchOutcome::Degraded {
                    stage: Stage::Discovery,
                    error,
                };
            }
        };
        tracing::debug!(
            "Discovery returned {} chars of listing text",
            discovery.listings_text.len()
        );

        // Extraction
        let records = match self.pipeline.extract(discovery).await {
            Ok(Some(records)) => records,
            Ok(None) => {
                tracing::warn!("⚠️ Extraction stage returned no structured payload");
                return SearchOutcome::NoStructuredPayload;
            }
            Err(error) => {
                tracing::warn!("⚠️ Extraction stage failed, returning no results: {}", error);
                return SearchOutcome::Degraded {
                    stage: Stage::Extraction,
                    error,
                };
            }
        };

        // Normalize
        let records = apply_default_currency(records, profile.currency_code);
        tracing::info!("✅ Extracted {} price records", records.len());
        SearchOutcome::Found(records)
    }

    pub async fn search_records(&self, query: &str, profile: &CountryProfile) -> Vec<PriceRecord> {
        self.search(query, profile).await.into_records()
    }
}
