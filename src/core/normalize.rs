use crate::domain::model::PriceRecord;

/// 幣別為空時補上國家預設幣別，其餘欄位原樣保留
pub fn apply_default_currency(records: Vec<PriceRecord>, currency_code: &str) -> Vec<PriceRecord> {
    records
        .into_iter()
        .map(|mut record| {
            if record.currency.trim().is_empty() {
                record.currency = currency_code.to_string();
            }
            record
        })
        .collect()
}

/// 依價格由低到高排序（stable，同價保留原順序）
pub fn sort_by_price(records: &mut [PriceRecord]) {
    records.sort_by(|a, b| a.price.total_cmp(&b.price));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(link: &str, price: f64, currency: &str) -> PriceRecord {
        PriceRecord {
            link: link.to_string(),
            price,
            currency: currency.to_string(),
            product_name: "iPhone 16 Pro 128GB".to_string(),
        }
    }

    #[test]
    fn test_apply_default_currency_fills_only_empty() {
        let records = vec![
            record("https://www.amazon.in/a", 100.0, ""),
            record("https://www.amazon.in/b", 200.0, "USD"),
            record("https://www.amazon.in/c", 300.0, "  "),
        ];

        let normalized = apply_default_currency(records, "INR");

        assert_eq!(normalized.len(), 3);
        assert_eq!(normalized[0].currency, "INR");
        assert_eq!(normalized[1].currency, "USD");
        assert_eq!(normalized[2].currency, "INR");
        assert_eq!(normalized[1].link, "https://www.amazon.in/b");
    }

    #[test]
    fn test_sort_by_price_ascending() {
        let mut records = vec![
            record("https://a", 999.0, "USD"),
            record("https://b", 899.0, "USD"),
            record("https://c", 949.0, "USD"),
        ];

        sort_by_price(&mut records);

        let prices: Vec<f64> = records.iter().map(|r| r.price).collect();
        assert_eq!(prices, vec![899.0, 949.0, 999.0]);
    }

    #[test]
    fn test_sort_by_price_is_stable() {
        let mut records = vec![
            record("https://first", 50.0, "USD"),
            record("https://cheap", 10.0, "USD"),
            record("https://second", 50.0, "USD"),
            record("https://third", 50.0, "USD"),
        ];

        sort_by_price(&mut records);

        let links: Vec<&str> = records.iter().map(|r| r.link.as_str()).collect();
        assert_eq!(
            links,
            vec!["https://cheap", "https://first", "https://second", "https://third"]
        );
    }

    #[test]
    fn test_sort_empty() {
        let mut records: Vec<PriceRecord> = Vec::new();
        sort_by_price(&mut records);
        assert!(records.is_empty());
    }
}
