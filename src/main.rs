//! aovflow binary - daily average order value from a CSV order stream
//!
//! ## Usage
//!
//! ```bash
//! cat orders.csv | cargo run --release
//! ```
//!
//! ## Environment Variables
//!
//! - ORDERS_CSV_PATH - Input CSV path (default: read piped stdin)
//! - ORDER_DATE_COLUMN - Zero-based timestamp column (default: 6)
//! - ORDER_VALUE_COLUMN - Zero-based value column (default: 5)
//! - CSV_HAS_HEADER - First row is a header (default: true)
//! - ON_PARSE_ERROR - 'drop' malformed records silently, or 'warn' (default: drop)
//! - ROUTER_CHANNEL_BUFFER - Per-date channel capacity (default: 64)
//! - RUST_LOG - Logging level (optional, default: info)

use aovflow::aggregator_core::{render_report, AggregationRouter, CsvOrderSource};
use aovflow::config::Config;
use std::io;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    dotenv::dotenv().ok();

    let config = Config::from_env()?;

    let Some(mut source) = CsvOrderSource::open(&config)? else {
        println!("Nothing in stdin");
        return Ok(());
    };

    let input_name = config
        .input_path
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "stdin".to_string());
    log::info!("🚀 Starting daily AOV aggregation");
    log::info!("   Input: {}", input_name);
    log::info!(
        "   Date column: {} / value column: {}",
        config.date_column,
        config.value_column
    );
    log::info!("   On parse error: {:?}", config.on_parse_error);

    let mut router = AggregationRouter::new(config.channel_buffer);
    let mut routed = 0u64;
    while let Some(order) = source.next_order() {
        router.submit(order).await;
        routed += 1;
    }

    log::info!(
        "📊 Routed {} records across {} dates ({} dropped)",
        routed,
        router.key_count(),
        source.dropped()
    );

    let result = router.finish().await;

    let stdout = io::stdout();
    render_report(&result, &mut stdout.lock())?;

    Ok(())
}
