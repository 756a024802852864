use clap::Parser;
use price_finder::app::server;
use price_finder::config::cli::{Command, OutputFormat};
use price_finder::utils::error::ErrorSeverity;
use price_finder::utils::{logger, validation::Validate};
use price_finder::{AppConfig, CliConfig, PriceError, PriceHandler, PriceRequest, SearchResult};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    logger::init_logger(logger::LogFormat::Compact, cli.verbose);

    tracing::info!("Starting price-finder");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let mut config = match AppConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => exit_with(e),
    };

    if let Command::Serve {
        bind: Some(bind), ..
    } = &cli.command
    {
        config.server.bind_address = bind.clone();
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        exit_with(e);
    }

    let config = Arc::new(config);

    match cli.command {
        Command::Serve { .. } => {
            if let Err(e) = server::serve(config).await {
                exit_with(e);
            }
        }
        Command::Search {
            query,
            country,
            format,
        } => {
            let handler = PriceHandler::new(config);
            match handler.handle(PriceRequest { query, country }).await {
                Ok(result) => print_result(&result, format)?,
                Err(e) => {
                    tracing::error!("❌ Search failed: {}", e);
                    eprintln!("❌ {}", e);
                    std::process::exit(1);
                }
            }
        }
    }

    Ok(())
}

fn exit_with(e: PriceError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 建議: {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low | ErrorSeverity::High => 1,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}

fn print_result(result: &SearchResult, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(result)?);
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(std::io::stdout());
            writer.write_record(["productName", "price", "currency", "link"])?;
            for record in &result.results {
                let price = record.price.to_string();
                writer.write_record([
                    record.product_name.as_str(),
                    price.as_str(),
                    record.currency.as_str(),
                    record.link.as_str(),
                ])?;
            }
            writer.flush()?;
        }
        OutputFormat::Table => {
            println!(
                "🛒 {} ({}) - {} result(s) in {}",
                result.country,
                result.country_code,
                result.results.len(),
                result.currency
            );
            if result.results.is_empty() {
                println!("No matching listings found.");
            }
            for (i, record) in result.results.iter().enumerate() {
                println!(
                    "{:>2}. {} {:>12.2}  {}\n    {}",
                    i + 1,
                    record.currency,
                    record.price,
                    record.product_name,
                    record.link
                );
            }
        }
    }
    Ok(())
}
