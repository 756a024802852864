use crate::domain::model::CountryProfile;

pub const DEFAULT_COUNTRY_CODE: &str = "US";

static COUNTRY_PROFILES: [CountryProfile; 5] = [
    CountryProfile {
        code: "US",
        display_name: "United States",
        currency_code: "USD",
        domains: &["amazon.com", "ebay.com", "walmart.com"],
    },
    CountryProfile {
        code: "IN",
        display_name: "India",
        currency_code: "INR",
        domains: &["amazon.in", "flipkart.com"],
    },
    CountryProfile {
        code: "UK",
        display_name: "United Kingdom",
        currency_code: "GBP",
        domains: &["amazon.co.uk", "ebay.co.uk", "argos.co.uk"],
    },
    CountryProfile {
        code: "CA",
        display_name: "Canada",
        currency_code: "CAD",
        domains: &["amazon.ca", "ebay.ca", "walmart.ca"],
    },
    CountryProfile {
        code: "AU",
        display_name: "Australia",
        currency_code: "AUD",
        domains: &["amazon.com.au", "ebay.com.au", "catch.com.au"],
    },
];

pub fn profiles() -> &'static [CountryProfile] {
    &COUNTRY_PROFILES
}

pub fn supported_codes() -> Vec<&'static str> {
    COUNTRY_PROFILES.iter().map(|p| p.code).collect()
}

pub fn normalize_code(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}

/// 嚴格查詢：只接受表內的代碼（不分大小寫）
pub fn lookup(code: &str) -> Option<&'static CountryProfile> {
    let code = normalize_code(code);
    COUNTRY_PROFILES.iter().find(|p| p.code == code)
}

pub fn default_profile() -> &'static CountryProfile {
    &COUNTRY_PROFILES[0]
}

/// 寬鬆解析：未提供或未知的代碼一律回到 US
pub fn resolve(code: Option<&str>) -> &'static CountryProfile {
    code.and_then(lookup).unwrap_or_else(default_profile)
}
