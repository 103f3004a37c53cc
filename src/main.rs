mod api;
mod config;
mod logging;
mod search;
mod tui;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{ArgAction, Parser};
use dotenvy::dotenv;
use tracing::info;

use crate::api::CensistasClient;
use crate::config::AppConfig;
use crate::logging::init_logging;
use crate::tui::ConsoleApp;
use crate::tui::theme::Theme;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "censistas",
    version,
    about = "Credential recovery console for census workers (TUI)"
)]
pub struct Cli {
    /// Base URL of the lookup API; `/censistas` is appended (env: CENSISTAS_API_URL)
    #[arg(long)]
    pub api_url: Option<String>,

    /// Colour theme (dark, light)
    #[arg(long)]
    pub theme: Option<String>,

    /// Show passwords as a mask instead of plaintext
    #[arg(long, action = ArgAction::SetTrue)]
    pub mask_passwords: bool,

    /// Log level or filter directive (env: CENSISTAS_LOG)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let cli = Cli::parse();
    let (cfg, file_load) = AppConfig::from_cli(cli);
    init_logging(&cfg.log_level, &cfg.log_file)?;
    file_load.report();
    info!(?cfg, "app config");

    let client = CensistasClient::new(cfg.api_url.clone())?;
    let endpoint = client.endpoint();
    let mut app = ConsoleApp::new(Arc::new(client), endpoint)
        .with_theme(Theme::by_name(&cfg.theme))
        .with_masked_passwords(cfg.mask_passwords);
    app.run()
}
