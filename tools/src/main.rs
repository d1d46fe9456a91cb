//! pipeline-runner: CLI for the supermarket sales pipeline.
//!
//! Usage:
//!   pipeline-runner generate [--count 1200] [--seed 42] [--data-dir data] [--anchor 2025-06-01]
//!   pipeline-runner load     [--data-dir data] [--db database/supermarket.db]
//!   pipeline-runner report   [--db database/supermarket.db]
//!   pipeline-runner verify   [--data-dir data] [--db database/supermarket.db]
//!   pipeline-runner all      [any of the flags above]
//!
//! A --config <file.json> may supply the same settings; explicit flags win.

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use salesdash_core::{
    config::PipelineConfig,
    export, generator,
    report::render_report,
    rng::SalesRng,
    store::{self, SalesStore},
};
use std::env;
use std::path::{Path, PathBuf};

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let command = args.get(1).map(String::as_str).unwrap_or("all");

    let config = build_config(&args)?;

    match command {
        "generate" => cmd_generate(&config),
        "load" => cmd_load(&config),
        "report" => cmd_report(&config),
        "verify" => cmd_verify(&config),
        "all" => {
            cmd_generate(&config)?;
            cmd_load(&config)?;
            cmd_report(&config)
        }
        other => {
            bail!("unknown command '{other}' (expected generate, load, report, verify or all)")
        }
    }
}

fn build_config(args: &[String]) -> Result<PipelineConfig> {
    let mut config = match flag_value(args, "--config") {
        Some(path) => PipelineConfig::load(Path::new(&path))
            .with_context(|| format!("loading config {path}"))?,
        None => PipelineConfig::default(),
    };

    config.transaction_count = parse_arg(args, "--count", config.transaction_count);
    config.seed = parse_arg(args, "--seed", config.seed);
    if let Some(dir) = flag_value(args, "--data-dir") {
        config.data_dir = PathBuf::from(dir);
    }
    if let Some(db) = flag_value(args, "--db") {
        config.db_path = PathBuf::from(db);
    }
    if let Some(anchor) = flag_value(args, "--anchor") {
        let date = NaiveDate::parse_from_str(&anchor, "%Y-%m-%d")
            .with_context(|| format!("invalid --anchor date '{anchor}'"))?;
        config.anchor_date = Some(date);
    }
    Ok(config)
}

fn cmd_generate(config: &PipelineConfig) -> Result<()> {
    let mut rng = SalesRng::seeded(config.seed);
    let anchor = config.effective_anchor();
    let (transactions, items) =
        generator::generate(config.transaction_count, anchor, &mut rng);

    let summary = export::write_dataset(&config.data_dir, &transactions, &items)?;

    println!("Generated {} transactions", summary.total_transactions);
    println!("Total revenue: ${:.2}", summary.total_revenue);
    println!("Cash percentage: {:.1}%", summary.cash_percentage);
    Ok(())
}

fn cmd_load(config: &PipelineConfig) -> Result<()> {
    if let Some(parent) = config.db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    // A reload replaces the whole dataset; drop the old file outright.
    if config.db_path.exists() {
        std::fs::remove_file(&config.db_path)?;
        log::debug!("removed previous database {}", config.db_path.display());
    }

    let mut store = SalesStore::open(&config.db_path.to_string_lossy())?;
    let (transactions, items) = store::load_csv_data(&mut store, &config.data_dir)?;

    println!("Database created: {}", config.db_path.display());
    println!("Transactions: {transactions} records");
    println!("Items: {items} records");
    Ok(())
}

fn cmd_report(config: &PipelineConfig) -> Result<()> {
    let store = open_existing(&config.db_path)?;
    print!("{}", render_report(&store)?);
    Ok(())
}

fn cmd_verify(config: &PipelineConfig) -> Result<()> {
    println!("Verifying supermarket sales pipeline");

    println!("\n1. Checking required files...");
    let required = [
        config.data_dir.join(export::TRANSACTIONS_FILE),
        config.data_dir.join(export::ITEMS_FILE),
        config.data_dir.join(export::SUMMARY_FILE),
        config.db_path.clone(),
    ];
    let mut missing = false;
    for path in &required {
        match std::fs::metadata(path) {
            Ok(meta) => println!("   ok {} ({} bytes)", path.display(), meta.len()),
            Err(_) => {
                println!("   MISSING {}", path.display());
                missing = true;
            }
        }
    }
    if missing {
        bail!("required files are missing; run generate and load first");
    }

    println!("\n2. Checking the database...");
    let store = open_existing(&config.db_path)?;
    let transactions = store.transaction_count()?;
    let items = store.item_count()?;
    println!("   ok {transactions} transactions, {items} items");
    if transactions > 0 && items == 0 {
        bail!("transactions present but no line items loaded");
    }

    println!("\n3. Checking aggregates...");
    let payments = store.payment_breakdown()?;
    let pct_sum: f64 = payments.iter().map(|r| r.revenue_percentage).sum();
    if transactions > 0 && (pct_sum - 100.0).abs() > 0.2 {
        bail!("payment percentages sum to {pct_sum:.2}, expected ~100");
    }
    println!("   ok payment percentages sum to {pct_sum:.1}");

    let metrics = store.key_metrics()?;
    println!("   ok total revenue ${:.2}", metrics.total_revenue);
    println!("   ok cash share {:.1}%", metrics.cash_percentage);

    let summary = export::read_summary(&config.data_dir)?;
    if summary.total_transactions as i64 != transactions {
        bail!(
            "summary file reports {} transactions but the store holds {transactions}",
            summary.total_transactions
        );
    }
    println!("   ok summary file agrees with the store");

    println!("\nAll checks passed");
    Ok(())
}

fn open_existing(db_path: &Path) -> Result<SalesStore> {
    if !db_path.is_file() {
        bail!(
            "database not found at {} (run the load command first)",
            db_path.display()
        );
    }
    Ok(SalesStore::open(&db_path.to_string_lossy())?)
}

fn flag_value(args: &[String], flag: &str) -> Option<String> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].clone())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
