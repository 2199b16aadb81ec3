use analytics::{MetricsEngine, MetricsSnapshot, PeriodMode, derive_period};
use anyhow::Context;
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use comfy_table::Table;
use rust_decimal::Decimal;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// The main entry point for the lotbook reporting tool.
fn main() -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Parse command-line arguments
    let cli = Cli::parse();

    // Execute the appropriate command
    match cli.command {
        Commands::Report(args) => handle_report(args)?,
    }

    Ok(())
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Resale inventory bookkeeping: investment, revenue and profit over lots of
/// bulk-purchased goods and the items sold out of them.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute and render metrics over a snapshot of items and lots.
    Report(ReportArgs),
}

#[derive(Parser)]
struct ReportArgs {
    /// Path to the JSON snapshot exported by the inventory application.
    #[arg(long)]
    snapshot: PathBuf,

    /// The reporting window to scope revenue and profit to.
    #[arg(long, value_enum)]
    period: Option<PeriodMode>,

    /// Start of a custom window (format: YYYY-MM-DD, inclusive).
    #[arg(long)]
    from: Option<NaiveDate>,

    /// End of a custom window (format: YYYY-MM-DD, inclusive).
    #[arg(long)]
    to: Option<NaiveDate>,
}

// ==============================================================================
// Report Command Logic
// ==============================================================================

/// Handles the orchestration of the report command.
fn handle_report(args: ReportArgs) -> anyhow::Result<()> {
    let config = configuration::load_config().context("Failed to load configuration")?;
    let snapshot = ingest::load_snapshot(&args.snapshot)
        .with_context(|| format!("Failed to load snapshot '{}'", args.snapshot.display()))?;

    let mode = args.period.unwrap_or(config.reporting.default_period);
    // The one wall-clock read in the application; everything below is a pure
    // function of the snapshot and this date.
    let period = derive_period(mode, args.from, args.to, Utc::now().date_naive());

    let metrics = MetricsEngine::new().compute(&snapshot.items, &snapshot.lots, &period);

    let currency = &config.reporting.currency_symbol;
    print_summary(&metrics, currency);
    print_lots(&metrics, currency);

    Ok(())
}

fn print_summary(metrics: &MetricsSnapshot, currency: &str) {
    let mut table = Table::new();
    table.set_header(vec!["Metric", "Value"]);
    table.add_row(vec![
        "Revenue".to_string(),
        money(metrics.total_revenue, currency),
    ]);
    table.add_row(vec![
        "Investment (period)".to_string(),
        money(metrics.investment_in_period, currency),
    ]);
    table.add_row(vec![
        "Investment (all time)".to_string(),
        money(metrics.investment_all_time, currency),
    ]);
    table.add_row(vec![
        "Profit (period)".to_string(),
        money(metrics.total_profit, currency),
    ]);
    table.add_row(vec![
        "Realized profit on sold units".to_string(),
        money(metrics.profit_per_sold_unit, currency),
    ]);
    table.add_row(vec!["Sold margin".to_string(), ratio(metrics.sold_margin)]);
    table.add_row(vec![
        "Avg days to sell".to_string(),
        metrics
            .avg_days_to_sell
            .map(|days| format!("{:.1}", days))
            .unwrap_or_else(|| "-".to_string()),
    ]);
    table.add_row(vec![
        "Items (for sale / reserved / sold / returned)".to_string(),
        format!(
            "{} / {} / {} / {}",
            metrics.counts.for_sale,
            metrics.counts.reserved,
            metrics.counts.sold,
            metrics.counts.returned
        ),
    ]);
    println!("{table}");
}

fn print_lots(metrics: &MetricsSnapshot, currency: &str) {
    if metrics.per_lot.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        "Lot",
        "Cost",
        "Unit cost",
        "Sold (period)",
        "Revenue (period)",
        "Profit (current)",
        "ROI",
    ]);
    for row in &metrics.per_lot {
        table.add_row(vec![
            row.lot_name.clone(),
            money(row.cost, currency),
            money(row.unit_cost, currency),
            row.sold_count_in_period.to_string(),
            money(row.revenue_in_period, currency),
            money(row.profit_current, currency),
            ratio(row.roi),
        ]);
    }
    println!("{table}");
}

/// Raw engine amounts get the configured symbol appended here and nowhere
/// else.
fn money(amount: Decimal, currency: &str) -> String {
    format!("{:.2} {}", amount, currency)
}

/// Undefined ratios render as "-", never as a zero.
fn ratio(value: Option<Decimal>) -> String {
    match value {
        Some(fraction) => format!("{:.1}%", fraction * Decimal::from(100)),
        None => "-".to_string(),
    }
}
