use analytics::KpiEngine;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use comfy_table::Table;
use core_types::GroupDimension;
use dataset::{DatasetSource, filter_date_range};
use predictor::CategoryModel;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// The main entry point for the Vitrine sales analytics application.
fn main() -> Result<()> {
    // Load VITRINE_DATA / VITRINE_SEED and friends from .env, if present.
    dotenvy::dotenv().ok();

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Report(args) => handle_report(args),
        Commands::Predict(args) => handle_predict(args),
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Summary KPIs, chart aggregates and category prediction for retail sales data.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute KPIs and aggregates from the sales records.
    Report(ReportArgs),
    /// Train the category model and predict for a (store, season) pair.
    Predict(PredictArgs),
}

#[derive(Parser)]
struct CommonArgs {
    /// Path to the sales record store (delimited text). Falls back to the
    /// VITRINE_DATA environment variable, then to data/sales.csv.
    #[arg(long)]
    data: Option<PathBuf>,

    /// Start of the inclusive date window (format: YYYY-MM-DD).
    #[arg(long)]
    from: Option<NaiveDate>,

    /// End of the inclusive date window (format: YYYY-MM-DD).
    #[arg(long)]
    to: Option<NaiveDate>,

    /// Seed for synthetic generation and model training. Falls back to the
    /// VITRINE_SEED environment variable, then to 42.
    #[arg(long)]
    seed: Option<u64>,

    /// Emit JSON instead of tables.
    #[arg(long)]
    json: bool,
}

#[derive(Parser)]
struct ReportArgs {
    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Parser)]
struct PredictArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// The store to predict for (must appear in the training data).
    #[arg(long)]
    store: String,

    /// The season to predict for (must appear in the training data).
    #[arg(long)]
    season: String,
}

impl CommonArgs {
    fn data_path(&self) -> PathBuf {
        self.data.clone().unwrap_or_else(|| {
            std::env::var("VITRINE_DATA")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data/sales.csv"))
        })
    }

    fn seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            std::env::var("VITRINE_SEED")
                .ok()
                .and_then(|raw| raw.parse().ok())
                .unwrap_or(42)
        })
    }

    /// Load and filter in one step: the shape every command starts from.
    fn load_filtered(&self) -> Result<Vec<core_types::Transaction>> {
        let source = DatasetSource::new(self.data_path(), self.seed());
        let (rows, status) = source.load().context("Failed to obtain the dataset")?;
        eprintln!("Dataset: {} rows ({status})", rows.len());
        Ok(filter_date_range(&rows, self.from, self.to))
    }
}

// ==============================================================================
// Command Logic
// ==============================================================================

fn handle_report(args: ReportArgs) -> Result<()> {
    let rows = args.common.load_filtered()?;
    let engine = KpiEngine::new();

    let report = engine.report(&rows);
    let trend = engine.monthly_trend(&rows);
    let by_store = engine.group_sum(&rows, GroupDimension::Store);
    let by_category = engine.group_sum(&rows, GroupDimension::Category);
    let by_region = engine.region_sum(&rows);

    if args.common.json {
        let payload = serde_json::json!({
            "kpis": report,
            "monthly_trend": trend,
            "by_store": by_store,
            "by_category": by_category,
            "by_region": by_region,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    let mut kpis = Table::new();
    kpis.set_header(vec!["KPI", "Value"]);
    kpis.add_row(vec![
        "Transactions".to_string(),
        report.transaction_count.to_string(),
    ]);
    kpis.add_row(vec![
        "Total sales".to_string(),
        format!("{:.2}", report.total_sales),
    ]);
    kpis.add_row(vec![
        "Total quantity".to_string(),
        report.total_quantity.to_string(),
    ]);
    kpis.add_row(vec![
        "Average ticket".to_string(),
        format!("{:.2}", report.average_ticket),
    ]);
    kpis.add_row(vec!["Max sale".to_string(), optional(report.max_sale)]);
    kpis.add_row(vec!["Min sale".to_string(), optional(report.min_sale)]);
    kpis.add_row(vec!["Mean sale".to_string(), optional(report.mean_sale)]);
    println!("{kpis}");

    println!("{}", pair_table("Month", "Total", &trend));
    println!("{}", pair_table("Store", "Total", &by_store));
    println!("{}", pair_table("Category", "Total", &by_category));

    let mut regions = Table::new();
    regions.set_header(vec!["Region", "Latitude", "Longitude", "Total"]);
    for row in &by_region {
        regions.add_row(vec![
            row.region.to_string(),
            format!("{:.2}", row.latitude),
            format!("{:.2}", row.longitude),
            format!("{:.2}", row.total),
        ]);
    }
    println!("{regions}");

    Ok(())
}

fn handle_predict(args: PredictArgs) -> Result<()> {
    let rows = args.common.load_filtered()?;
    let seed = args.common.seed();

    // One model per invocation: the process is the request boundary. Callers
    // embedding the core long-term should hold a predictor::ModelCache.
    let model = CategoryModel::train(&rows, seed)
        .context("Failed to train the category model")?;
    let prediction = model
        .predict(&args.store, &args.season)
        .context("Prediction failed")?;

    if args.common.json {
        println!("{}", serde_json::to_string_pretty(&prediction)?);
        return Ok(());
    }

    println!("{}", pair_table("Category", "Probability", &prediction.probabilities));
    println!(
        "Most likely category: {} (p = {:.3})",
        prediction.top_category, prediction.top_probability
    );
    match prediction.combo_average_ticket {
        Some(ticket) => println!(
            "Average ticket for {} in {}: {:.2}",
            args.store, args.season, ticket
        ),
        None => println!(
            "No past sales for {} in {}; no average ticket to report",
            args.store, args.season
        ),
    }

    Ok(())
}

fn pair_table(key_header: &str, value_header: &str, rows: &[(String, f64)]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![key_header, value_header]);
    for (key, value) in rows {
        table.add_row(vec![key.clone(), format!("{value:.2}")]);
    }
    table
}

fn optional(value: Option<f64>) -> String {
    match value {
        Some(value) => format!("{value:.2}"),
        None => "n/a".to_string(),
    }
}
