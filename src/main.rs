// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use mumbai_housing::{
    format::{format_amount, popup_line, selection_mean_line},
    markers, AgeCategory, AppConfig, AppContext, PropertyInput,
};

#[derive(Parser)]
#[command(name = "mumbai-housing")]
#[command(version)]
#[command(about = "Mumbai housing price predictor and regional price map")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Directory holding the model artifact and both CSV tables
    #[arg(long, global = true, env = "MUMBAI_DATA_DIR", default_value = "data")]
    data_dir: PathBuf,

    /// Model artifact (overrides --data-dir)
    #[arg(long, global = true, env = "MUMBAI_MODEL")]
    model: Option<PathBuf>,

    /// Region coordinates CSV (overrides --data-dir)
    #[arg(long, global = true, env = "MUMBAI_COORDS")]
    coords: Option<PathBuf>,

    /// Cleaned listings CSV (overrides --data-dir)
    #[arg(long, global = true, env = "MUMBAI_LISTINGS")]
    listings: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive terminal dashboard (default)
    Tui,

    /// Estimate the price of one property
    Predict {
        /// Number of bedrooms (1-3)
        #[arg(long, default_value_t = 1)]
        bhk: u32,

        /// Area in sqft (100-3000)
        #[arg(long, default_value_t = 1000.0)]
        area: f64,

        /// new, resale or unknown
        #[arg(long, default_value = "new")]
        age: AgeCategory,

        /// Region name; omit for "not sure"
        #[arg(long)]
        region: Option<String>,
    },

    /// Median price per sqft by region
    Map {
        /// Limit to these regions (repeatable); also prints their average
        #[arg(long = "region")]
        regions: Vec<String>,

        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// List the region catalog in model order
    Regions,

    /// Show the feature layout and model fingerprint
    Schema,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Tui);

    init_tracing(matches!(command, Commands::Tui));

    let config = AppConfig::from_data_dir(&cli.data_dir).with_overrides(cli.model, cli.coords, cli.listings);
    let ctx = AppContext::load(&config).with_context(|| {
        format!(
            "Failed to load dashboard inputs (model: {}, coords: {}, listings: {})",
            config.model_path.display(),
            config.coords_path.display(),
            config.listings_path.display()
        )
    })?;

    match command {
        Commands::Tui => run_ui_mode(ctx),
        Commands::Predict { bhk, area, age, region } => {
            run_predict(&ctx, PropertyInput { bhk, area, age, region })
        }
        Commands::Map { regions, json } => run_map(&ctx, &regions, json),
        Commands::Regions => {
            for (slot, name) in ctx.catalog().names().iter().enumerate() {
                println!("{:>3}  {}", slot, name);
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Schema => {
            let summary = ctx.summary();
            println!("Features:    {}", summary.feature_count);
            println!("Units:       {}", summary.units);
            if let Some(fingerprint) = &summary.model_fingerprint {
                println!("Fingerprint: {}", fingerprint);
            }
            for (i, name) in ctx.schema().names().iter().enumerate() {
                println!("{:>3}  {}", i, name);
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// The dashboard owns the terminal, so it only logs warnings (to stderr)
fn init_tracing(dashboard: bool) {
    let default = if dashboard { "warn" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run_predict(ctx: &AppContext, input: PropertyInput) -> Result<ExitCode> {
    match ctx.predict(&input) {
        Ok(prediction) => {
            for warning in &prediction.warnings {
                eprintln!("warning: {}", warning);
            }
            println!("{}", prediction.display);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            eprintln!("Prediction failed: {}", e);
            Ok(ExitCode::FAILURE)
        }
    }
}

fn run_map(ctx: &AppContext, regions: &[String], json: bool) -> Result<ExitCode> {
    let markers = markers(ctx.view(), regions);
    let mean = if regions.is_empty() {
        None
    } else {
        ctx.view().mean_median(regions)
    };

    if json {
        let out = serde_json::json!({
            "markers": markers,
            "selection_mean": mean,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(ExitCode::SUCCESS);
    }

    println!("{:<28} {:>10} {:>10} {:>16}  {}", "Region", "Latitude", "Longitude", "Median ₹/sqft", "Color");
    for marker in &markers {
        println!(
            "{:<28} {:>10.4} {:>10.4} {:>16}  {}",
            marker.label,
            marker.latitude,
            marker.longitude,
            marker.median_price.map(format_amount).unwrap_or_else(|| popup_line(None)),
            marker.color
        );
    }

    if !regions.is_empty() {
        match mean {
            Some(mean) => println!("\n{}", selection_mean_line(mean)),
            None => println!("\nNo price data for the selected regions"),
        }
    }

    Ok(ExitCode::SUCCESS)
}

#[cfg(feature = "tui")]
fn run_ui_mode(ctx: AppContext) -> Result<ExitCode> {
    let mut app = ui::App::new(ctx);
    ui::run_ui(&mut app)?;
    Ok(ExitCode::SUCCESS)
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode(_ctx: AppContext) -> Result<ExitCode> {
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    eprintln!("   Or use a subcommand: predict, map, regions, schema");
    Ok(ExitCode::FAILURE)
}
