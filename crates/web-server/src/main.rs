use analyzer::Analyzer;
use anyhow::Context;
use narrative::TemplateNarrator;
use std::net::SocketAddr;
use std::sync::Arc;
use web_server::AppState;

// This main function is the entry point when running `cargo run -p web-server`.
// It loads settings, starts logging and hands over to `run_server`.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let settings = configuration::load_config().context("Failed to load configuration")?;
    let _guard = configuration::init_tracing(&settings.logging)?;

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("Invalid server.host / server.port")?;
    let state = AppState {
        analyzer: Analyzer::from_settings(&settings),
        narrator: Arc::new(TemplateNarrator::new()),
    };
    web_server::run_server(addr, state).await
}
