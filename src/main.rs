use analyzer::{AnalysisRequest, AnalysisResponse, Analyzer, AnalyzerError, ForecastRequest};
use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use comfy_table::presets::UTF8_FULL;
use comfy_table::Table;
use core_types::{ForecastPoint, ForecastResult, Methodology, Observation};
use narrative::{Narrator, TemplateNarrator};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use web_server::AppState;

/// The main entry point for the EconoTrends application.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Configuration may be overridden from a local .env file.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => configuration::load_config_from(path),
        None => configuration::load_config(),
    }
    .context("Failed to load configuration")?;
    let _guard = configuration::init_tracing(&settings.logging)?;

    let analyzer = Analyzer::from_settings(&settings);

    // Execute the appropriate command
    match cli.command {
        Commands::Indicators(args) => handle_indicators(&analyzer, args),
        Commands::Analyze(args) => handle_analyze(&analyzer, args).await,
        Commands::Forecast(args) => handle_forecast(&analyzer, args),
        Commands::Serve(args) => {
            let host = args.host.unwrap_or(settings.server.host);
            let port = args.port.unwrap_or(settings.server.port);
            let addr: SocketAddr = format!("{host}:{port}")
                .parse()
                .context("Invalid host/port")?;
            info!(%addr, "Starting HTTP API");
            let state = AppState {
                analyzer,
                narrator: Arc::new(TemplateNarrator::new()),
            };
            web_server::run_server(addr, state).await
        }
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Economic indicator analytics and short-horizon forecasting.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Read settings from this file instead of ./config.toml.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the active indicators.
    Indicators(IndicatorsArgs),
    /// Statistics, trend and optionally a forecast for one indicator.
    Analyze(AnalyzeArgs),
    /// Forecast one or more indicators.
    Forecast(ForecastArgs),
    /// Start the HTTP API.
    Serve(ServeArgs),
}

#[derive(Parser)]
struct IndicatorsArgs {
    /// Print JSON instead of a table.
    #[arg(long)]
    json: bool,
}

#[derive(Parser)]
struct AnalyzeArgs {
    /// The indicator id (cpi, gdp, unemployment, interest_rate).
    #[arg(long, short)]
    indicator: String,

    /// History length in periods (1-100).
    #[arg(long)]
    periods: Option<usize>,

    /// Include a forecast.
    #[arg(long)]
    forecast: bool,

    /// Forecast horizon in periods (1-24).
    #[arg(long)]
    forecast_periods: Option<usize>,

    /// linear, exponential, arima or prophet. Unknown names fall back to linear.
    #[arg(long)]
    methodology: Option<String>,

    /// Requested confidence level (0.1-1.0).
    #[arg(long)]
    confidence: Option<f64>,

    /// Drop history before this date (format: YYYY-MM-DD).
    #[arg(long)]
    start_date: Option<NaiveDate>,

    /// Last observation date (format: YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    end_date: Option<NaiveDate>,

    /// Skip descriptive statistics.
    #[arg(long)]
    no_statistics: bool,

    /// Skip trend analysis.
    #[arg(long)]
    no_trend: bool,

    /// Append a short prose summary.
    #[arg(long)]
    summary: bool,

    /// Print JSON instead of tables.
    #[arg(long)]
    json: bool,
}

#[derive(Parser)]
struct ForecastArgs {
    /// Indicator id; repeat the flag to forecast several indicators in parallel.
    #[arg(long, short, required = true)]
    indicator: Vec<String>,

    /// Forecast horizon in periods (1-24).
    #[arg(long)]
    periods: Option<usize>,

    /// linear, exponential, arima or prophet. Unknown names fall back to linear.
    #[arg(long)]
    methodology: Option<String>,

    /// Requested confidence level (0.1-1.0).
    #[arg(long)]
    confidence: Option<f64>,

    /// Last observation date (format: YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    end_date: Option<NaiveDate>,

    /// Print JSON instead of tables.
    #[arg(long)]
    json: bool,
}

#[derive(Parser)]
struct ServeArgs {
    /// Overrides server.host.
    #[arg(long)]
    host: Option<String>,

    /// Overrides server.port.
    #[arg(long)]
    port: Option<u16>,
}

// ==============================================================================
// Command Logic
// ==============================================================================

fn handle_indicators(analyzer: &Analyzer, args: IndicatorsArgs) -> anyhow::Result<()> {
    let indicators = analyzer.list_indicators();
    info!(count = indicators.len(), "Listing indicators");
    if args.json {
        println!("{}", serde_json::to_string_pretty(&indicators)?);
        return Ok(());
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["ID", "Name", "Unit", "Frequency", "Source", "Category"]);
    for i in &indicators {
        table.add_row(vec![
            i.id.to_string(),
            i.name.clone(),
            i.unit.clone(),
            i.frequency.to_string(),
            i.source.clone(),
            i.category.clone(),
        ]);
    }
    println!("{table}");
    Ok(())
}

async fn handle_analyze(analyzer: &Analyzer, args: AnalyzeArgs) -> anyhow::Result<()> {
    let request = AnalysisRequest {
        indicator: args.indicator,
        periods: args.periods,
        include_statistics: Some(!args.no_statistics),
        include_trend: Some(!args.no_trend),
        include_forecast: Some(args.forecast),
        forecast_periods: args.forecast_periods,
        methodology: args.methodology.as_deref().map(Methodology::parse_lossy),
        confidence: args.confidence,
        start_date: args.start_date,
        end_date: args.end_date,
    };

    info!(indicator = %request.indicator, "CLI analysis requested");
    let response = analyzer.analyze(&request).map_err(|e| report(e, args.json))?;
    let summary = if args.summary {
        Some(TemplateNarrator::new().narrate(&response).await?)
    } else {
        None
    };

    if args.json {
        let mut value = serde_json::to_value(&response)?;
        if let Some(summary) = summary {
            value["summary"] = serde_json::to_value(summary)?;
        }
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    print_analysis(&response);
    if let Some(summary) = summary {
        println!("\n{}", summary.content);
    }
    Ok(())
}

fn handle_forecast(analyzer: &Analyzer, args: ForecastArgs) -> anyhow::Result<()> {
    let methodology = args.methodology.as_deref().map(Methodology::parse_lossy);
    info!(indicators = ?args.indicator, "CLI forecast requested");

    let results: Vec<ForecastResult> = if let [single] = args.indicator.as_slice() {
        let request = ForecastRequest {
            indicator: single.clone(),
            periods: args.periods,
            confidence: args.confidence,
            methodology,
            end_date: args.end_date,
        };
        vec![analyzer.forecast(&request).map_err(|e| report(e, args.json))?]
    } else {
        analyzer
            .forecast_batch(&args.indicator, args.periods, methodology, args.confidence, args.end_date)
            .map_err(|e| report(e, args.json))?
            .into_values()
            .collect()
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    for result in &results {
        println!(
            "{} | {} | MAPE {:.2}% | RMSE {:.2}",
            result.indicator, result.methodology, result.accuracy.mape, result.accuracy.rmse
        );
        println!("{}", history_table(&result.recent_history));
        println!("{}", forecast_table(&result.forecasts));
    }
    Ok(())
}

/// In JSON mode the wire-shaped error body also goes to stdout.
fn report(err: AnalyzerError, json: bool) -> anyhow::Error {
    if json {
        if let Ok(body) = serde_json::to_string_pretty(&err.to_body()) {
            println!("{body}");
        }
    }
    anyhow::Error::new(err)
}

// ==============================================================================
// Rendering
// ==============================================================================

fn print_analysis(response: &AnalysisResponse) {
    let ind = &response.indicator;
    println!("{} ({}) | {} | {} | {}", ind.name, ind.id, ind.unit, ind.frequency, ind.source);

    if let Some(stats) = &response.statistics {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL).set_header(vec!["Statistic", "Value"]);
        let rows = [
            ("Mean", stats.mean),
            ("Median", stats.median),
            ("Std Dev", stats.std_dev),
            ("Min", stats.min),
            ("Max", stats.max),
            ("Latest", stats.latest),
            ("Change", stats.change),
            ("Change %", stats.change_percent),
        ];
        for (name, value) in rows {
            table.add_row(vec![name.to_string(), format!("{value:.2}")]);
        }
        table.add_row(vec!["Data Points".to_string(), stats.data_points.to_string()]);
        table.add_row(vec![
            "Period".to_string(),
            format!("{} .. {}", stats.period.start, stats.period.end),
        ]);
        println!("{table}");
    }

    if let Some(trend) = &response.trend {
        println!(
            "Trend: {} (strength {:.2}, confidence {:.2}, slope {:.2})",
            trend.description, trend.strength, trend.confidence, trend.slope
        );
        for change in &trend.significant_changes {
            println!("  {} {:+.2} -> {:.2} ({:?})", change.date, change.change, change.value, change.severity);
        }
    }

    println!("{}", history_table(&response.historical_data));

    if !response.forecasts.is_empty() {
        println!("{}", forecast_table(&response.forecasts));
    }
    if let Some(acc) = &response.accuracy {
        println!("Accuracy (synthetic): MAPE {:.2}% | RMSE {:.2}", acc.mape, acc.rmse);
    }
}

fn history_table(history: &[Observation]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec!["Date", "Value"]);
    for obs in history {
        table.add_row(vec![obs.date.to_string(), format!("{:.2}", obs.value)]);
    }
    table
}

fn forecast_table(points: &[ForecastPoint]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Date", "Forecast", "Lower", "Upper"]);
    for p in points {
        table.add_row(vec![
            p.date.to_string(),
            format!("{:.2}", p.value),
            format!("{:.2}", p.confidence.lower),
            format!("{:.2}", p.confidence.upper),
        ]);
    }
    table
}
