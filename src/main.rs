//! Lot Pricing - Binary Entry Point
//!
//! Prints the increment ladder and a cost breakdown for a sample lot.
//! Pass a JSON config path as the first argument to use your own schedules;
//! set `RUST_LOG=lot_pricing=debug` to see the engines' tracing.
//!
//! Built only with the `cli` feature: `cargo run --features cli`.

use std::process::ExitCode;
use std::sync::Arc;

use lot_pricing::{BidderStanding, ConfigError, LotPricer, LotState, Money, PricingConfig, PricingError};
use tracing::error;

const SAMPLE_CONFIG: &str = r#"{
    "extrapolation": "extrapolate",
    "increment_strategies": [
        {"key": "default", "increments": [
            {"from": 0, "to": 399999, "amount": 5000},
            {"from": 400000, "to": 999999, "amount": 10000},
            {"from": 1000000, "to": 1999999, "amount": 25000}
        ]}
    ],
    "premium_schedules": [
        {"key": "default", "schedule": [
            {"min_amount_cents": 0, "percent": "0.25"},
            {"min_amount_cents": 50000000, "percent": "0.2"},
            {"min_amount_cents": 300000000, "percent": "0.12"}
        ]}
    ]
}"#;

#[derive(Debug, thiserror::Error)]
enum DemoError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Pricing(#[from] PricingError),
}

fn main() -> ExitCode {
    init_tracing();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();
}

fn run() -> Result<(), DemoError> {
    let config = match std::env::args().nth(1) {
        Some(path) => PricingConfig::from_path(path)?,
        None => PricingConfig::from_json_str(SAMPLE_CONFIG)?,
    };
    let tables = config.build()?;

    println!("===========================================");
    println!("  Lot Pricing");
    println!("===========================================");
    println!("Config fingerprint: {}", config.fingerprint()?);
    println!(
        "Increment strategies: {}",
        tables.increments.keys().collect::<Vec<_>>().join(", ")
    );
    println!();

    let lot = LotState::new(351_000, "EUR", Some("default"));
    let standing = BidderStanding::leading(420_000, 390_000);
    let pricer = LotPricer::new(&tables, &lot).with_standing(Some(&standing));

    println!("Minimum next bid: {}", pricer.minimum_next_bid()?);
    println!();

    println!("Next bids (anyone):");
    for bid in pricer.increment_prices(10, false)? {
        println!("  {:>12}  ({} cents)", bid.display(), bid.cents());
    }
    println!();

    let currency = pricer.currency()?;
    let own = pricer.baseline(true)?;
    println!(
        "Next bids (leading bidder at {}):",
        Money::new(own.cents, Arc::clone(&currency))
    );
    for bid in pricer.increment_prices(5, true)? {
        println!("  {:>12}", bid.display());
    }
    println!();

    for hammer in [1_000_000_u64, 60_000_000, 400_000_000] {
        let cost = pricer.calculated_cost(hammer as i64, Some("default"))?;
        println!(
            "Hammer {:>14}  premium {:>12}  subtotal {:>14}",
            Money::new(hammer, Arc::clone(&currency)).display(),
            cost.premium.display(),
            cost.subtotal.display()
        );
    }

    Ok(())
}

