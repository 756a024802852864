use crate::domain::model::CountryProfile;
use crate::domain::ports::FunctionSpec;

pub const EXTRACT_PRICES_FUNCTION: &str = "extract_prices";

pub fn domains_query(profile: &CountryProfile) -> String {
    profile
        .domains
        .iter()
        .map(|domain| format!("site:{}", domain))
        .collect::<Vec<_>>()
        .join(" OR ")
}

pub fn search_input(query: &str, profile: &CountryProfile) -> String {
    format!("Find prices for \"{}\" on {}", query, domains_query(profile))
}

pub fn discovery_prompt(search_input: &str, profile: &CountryProfile) -> String {
    let country_info = serde_json::json!({
        "country": profile.display_name,
        "currency": profile.currency_code,
        "domains": profile.domains,
    });

    format!(
        r#"You are a web search expert and shopping assistant helping users find the best online prices for specific products in a given country.

- Product to search: "{search_input}"
- Country info: {country_info}

Your task:
1. Use broad web search to find this product across multiple trusted ecommerce platforms, local retailers, and brand websites specific to the given country.
2. DO NOT rely on a single retailer. Explore other popular and regionally relevant platforms for this country.
3. Match the product exactly, including brand, model, version, and storage/specs. Avoid similar or related variants.
4. Extract only actual product page links (not blog posts, search result pages, or generic category links).
5. Each listing must include clear pricing in the local currency ({currency}) and be available for purchase from a reputable seller.

Return 5-10 results sorted by ascending price.
Each result should include:
- Product Name (as per listing)
- Price
- Currency
- Direct URL (fully qualified link to the exact product page)
- Seller or Website Name

Search results must be specific to {country}. Accuracy and relevance are more important than quantity. Prioritize trustworthiness, correct product match, and diverse sources across the web."#,
        currency = profile.currency_code,
        country = profile.display_name,
    )
}

pub fn extraction_system_prompt(listings_text: &str) -> String {
    format!(
        "You are a price comparison assistant. Match exactly and extract prices. Input:\n\n{}",
        listings_text
    )
}

pub fn extract_prices_function() -> FunctionSpec {
    FunctionSpec {
        name: EXTRACT_PRICES_FUNCTION.to_string(),
        description: "Extract price info from search results".to_string(),
        parameters: serde_json::json!({
            "type": "object",
            "properties": {
                "results": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "link": { "type": "string" },
                            "price": { "type": "number" },
                            "currency": { "type": "string" },
                            "productName": { "type": "string" }
                        },
                        "required": ["link", "price", "currency", "productName"]
                    }
                }
            },
            "required": ["results"]
        }),
    }
}
