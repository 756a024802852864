use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// CLI 與伺服器用 compact，Lambda 用 JSON（CloudWatch 可直接查欄位）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Json,
}

fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "price_finder=debug,info"
    } else {
        "price_finder=info"
    }
}

/// RUST_LOG 優先，沒有設定時才用預設等級
fn build_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)))
}

pub fn init_logger(format: LogFormat, verbose: bool) {
    let registry = tracing_subscriber::registry().with(build_filter(verbose));
    let layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_file(false)
        .with_line_number(false);

    match format {
        LogFormat::Compact => registry.with(layer.compact()).init(),
        LogFormat::Json => registry.with(layer.json()).init(),
    }
}

/// 截斷上游錯誤內容，避免整個回應寫進日誌
pub fn truncate_for_log(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let head: String = text.chars().take(max_chars).collect();
    format!("{}... ({} chars total)", head, text.chars().count())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive_follows_verbose() {
        assert_eq!(default_directive(true), "price_finder=debug,info");
        assert_eq!(default_directive(false), "price_finder=info");
    }

    #[test]
    fn test_truncate_for_log() {
        assert_eq!(truncate_for_log("short", 10), "short");
        let long = "x".repeat(50);
        let out = truncate_for_log(&long, 10);
        assert!(out.starts_with("xxxxxxxxxx..."));
        assert!(out.ends_with("(50 chars total)"));
    }
}
