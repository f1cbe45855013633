//! Example: analyzing a pair with a registry-created strategy
//!
//! Seeds an in-memory candle store with a 15m series and its 1h informative
//! series, runs the RSIEMA50 pipeline over it and prints the rows that
//! produced signals.

use chrono::{TimeZone, Utc};
use freqhub_strategies::data::{Candle, CandleStore, CandleTable, StrategyFrame, Timeframe};
use freqhub_strategies::host::{DataProvider, HostContext, HostInfo, Notifier, NotifyError};
use freqhub_strategies::strategy::StrategyRegistry;

fn create_test_candles(count: usize, base_price: f64, timeframe: Timeframe) -> Vec<Candle> {
    let base_time = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let mut candles = Vec::new();

    // Up-trend with a pullback wave so both signal stages get exercised
    for i in 0..count {
        let wave = (i as f64 * 0.15).sin() * 2.5;
        let price = base_price + (i as f64 * 0.05) + wave;
        let volume = 1500.0 + (i as f64 * 0.4).cos().abs() * 2000.0;

        candles.push(Candle::new(
            price - 0.2,
            price + 1.0,
            price - 1.0,
            price,
            volume,
            base_time + timeframe.duration() * (i as i32),
        ));
    }

    candles
}

struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn send(&self, message: &str) -> Result<(), NotifyError> {
        println!("--- notification ---\n{}\n--------------------", message);
        Ok(())
    }
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    println!("=== FreqHub Strategy Demo ===\n");

    println!("Seeding candle store...");
    let mut store = CandleStore::new();
    store.insert(CandleTable::new(
        "BTC/USDT",
        Timeframe::M15,
        create_test_candles(400, 100.0, Timeframe::M15),
    )?);
    store.insert(CandleTable::new(
        "BTC/USDT",
        Timeframe::H1,
        create_test_candles(100, 100.0, Timeframe::H1),
    )?);

    let notifier = ConsoleNotifier;
    let info = HostInfo {
        exchange: Some("binance".to_string()),
        stake_currency: Some("USDT".to_string()),
        stake_amount: Some("50".to_string()),
    };
    let ctx = HostContext::new(&store)
        .with_notifier(&notifier)
        .with_info(info);

    println!("Creating strategy from the registry...");
    let registry = StrategyRegistry::new();
    let strategy = registry.create("RSIEMA50")?;
    strategy.on_start(&ctx);

    println!(
        "Running {} on BTC/USDT {}...\n",
        strategy.name(),
        strategy.timeframe()
    );
    let table = store.candles("BTC/USDT", strategy.timeframe())?;
    let mut frame = StrategyFrame::new(table);
    strategy.analyze(&mut frame, &ctx)?;

    println!("=== Signals ===");
    let closes = frame.closes();
    let timestamps = frame.table().timestamps();
    let mut signal_count = 0;
    for i in 0..frame.len() {
        let enter = frame.enter_long()[i];
        let exit = frame.exit_long()[i];
        if enter || exit {
            signal_count += 1;
            let kind = if enter { "ENTER" } else { "EXIT " };
            println!("{} {} close={:.2}", kind, timestamps[i], closes[i]);
        }
    }
    if signal_count == 0 {
        println!("(no signals on this synthetic series)");
    }

    println!("\n{} rows analyzed, {} signal rows", frame.len(), signal_count);
    println!("Columns: {}", frame.column_names().join(", "));

    Ok(())
}
