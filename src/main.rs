use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tokio::io::BufReader;

use home_launcher::config::Config;
use home_launcher::logging::init_tracing;
use home_launcher::platform::StaticCatalog;
use home_launcher::ui::main_screen::{Collaborators, MainViewModel};
use home_launcher::ui::terminal::{self, Console};

const STDIN_SHUTDOWN_GRACE: Duration = Duration::from_millis(100);

#[derive(Parser, Debug)]
#[command(name = "home-launcher")]
#[command(version)]
#[command(about = "Home-screen launcher driven from the terminal")]
struct Cli {
    /// Config file (default: <config_dir>/home-launcher/config.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log file base path (overrides HOME_LAUNCHER_LOG)
    #[arg(long, value_name = "PATH")]
    log: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log.as_deref());

    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    let outcome = runtime.block_on(run(cli));
    // A pending stdin read would otherwise hold shutdown until the next line.
    runtime.shutdown_timeout(STDIN_SHUTDOWN_GRACE);
    outcome
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config_path = cli.config.unwrap_or_else(Config::config_path);
    let config = Config::load_from(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;
    tracing::info!(
        path = %config_path.display(),
        apps = config.apps.len(),
        "Configuration loaded"
    );

    let catalog = Arc::new(StaticCatalog::from_config(&config));
    let view_model = MainViewModel::new(Collaborators::from_single(catalog), config.launcher)
        .context("Failed to start main screen")?;

    let input = BufReader::new(tokio::io::stdin());
    terminal::run(view_model, input, Console::new(std::io::stdout())).await
}
