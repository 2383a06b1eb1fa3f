use std::path::PathBuf;

use bubbletea_rs::Program;
use clap::Parser;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use tracing::info;

use nutrition_tui::app::{self, App};
use nutrition_tui::config::AppConfig;
use nutrition_tui::logging;

#[derive(Parser, Debug)]
#[command(version, about = "Nutrition data browser and optimizer front end")]
struct Args {
    /// Dataset URL or path (overrides data.url)
    #[arg(long)]
    data: Option<String>,

    /// Optimizer base URL (overrides optimizer.endpoint)
    #[arg(long)]
    endpoint: Option<String>,

    /// Problem file to submit to the optimizer
    #[arg(long)]
    problem: Option<PathBuf>,

    /// Rows shown per page
    #[arg(long = "rows-per-page")]
    rows_per_page: Option<usize>,

    /// Write logs to this file
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,

    /// Read configuration from this file instead of the default location
    #[arg(long)]
    config: Option<PathBuf>,
}

impl Args {
    fn apply(self, config: &mut AppConfig) {
        if let Some(data) = self.data {
            config.data.url = data;
        }
        if let Some(endpoint) = self.endpoint {
            config.optimizer.endpoint = endpoint;
        }
        if let Some(problem) = self.problem {
            config.optimizer.problem = Some(problem);
        }
        if let Some(rows) = self.rows_per_page {
            config.display.rows_per_page = rows;
        }
        if let Some(file) = self.log_file {
            config.logging.file = Some(file);
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let mut args = Args::parse();

    let mut config = AppConfig::load(args.config.take().as_deref())?;
    args.apply(&mut config);
    config.validate()?;

    if let Some(path) = logging::init(&config.logging) {
        info!("Logging to {}", path.display());
    }
    info!("Dataset source: {}", config.data.url);

    app::configure(config).map_err(|_| eyre!("configuration already set"))?;

    Program::<App>::builder()
        .alt_screen(true)
        .build()?
        .run()
        .await?;
    Ok(())
}
