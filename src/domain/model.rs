use serde::{Deserialize, Deserializer, Serialize};

/// 國家設定：顯示名稱、幣別與信任的電商網域
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountryProfile {
    pub code: &'static str,
    #[serde(rename = "country")]
    pub display_name: &'static str,
    #[serde(rename = "currency")]
    pub currency_code: &'static str,
    pub domains: &'static [&'static str],
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PriceRequest {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub country: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRecord {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub link: String,
    #[serde(deserialize_with = "number_or_numeric_string")]
    pub price: f64,
    /// 缺少或為 null 時為空字串，之後由國家幣別補上
    #[serde(default, deserialize_with = "null_as_empty")]
    pub currency: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub product_name: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawPrice {
    Number(f64),
    Text(String),
}

/// 模型偶爾把價格寫成字串（"999" 或 "1,299.00"）
fn number_or_numeric_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match RawPrice::deserialize(deserializer)? {
        RawPrice::Number(price) => Ok(price),
        RawPrice::Text(text) => text
            .trim()
            .replace(',', "")
            .parse::<f64>()
            .map_err(|_| serde::de::Error::custom(format!("price is not numeric: {:?}", text))),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub country: String,
    pub country_code: String,
    pub currency: String,
    pub results: Vec<PriceRecord>,
}

/// 第一階段（搜尋）的輸出，同時是第二階段（擷取）的輸入
#[derive(Debug, Clone, PartialEq)]
pub struct DiscoveryOutput {
    pub search_input: String,
    pub listings_text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Discovery,
    Extraction,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Discovery => write!(f, "discovery"),
            Stage::Extraction => write!(f, "extraction"),
        }
    }
}
