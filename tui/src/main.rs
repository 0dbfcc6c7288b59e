//! Cocktail Companion Entry Point
//!
//! Launches the terminal page: type what's in the cabinet, get a recipe.
//!
//! Usage:
//!   cocktail-companion [OPTIONS]
//!
//! Options:
//!   --endpoint <URL>     Generation endpoint
//!   --config <FILE>      Configuration file
//!   --toast-ms <MS>      How long toasts stay up
//!   --log-level <LEVEL>  Log level (logs go to stderr)

use std::io::{self, IsTerminal};
use std::panic;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use companion_core::{load_config_from_path, CompanionConfig, ConfigOverrides, HttpBackend};
use companion_tui::clipboard::Osc52Clipboard;
use companion_tui::companion_client::CompanionClient;
use companion_tui::App;

/// Cocktail Companion - turn what's in your cabinet into a recipe
#[derive(Parser, Debug)]
#[command(name = "cocktail-companion")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Generation endpoint URL
    #[arg(short = 'e', long, env = "COCKTAIL_ENDPOINT", value_name = "URL")]
    endpoint: Option<String>,

    /// Configuration file path
    #[arg(short = 'c', long, env = "COCKTAIL_CONFIG", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Toast duration in milliseconds
    #[arg(long, value_name = "MS")]
    toast_ms: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short = 'l', long, env = "COCKTAIL_LOG_LEVEL", default_value = "error")]
    log_level: String,
}

/// Logs go to stderr; the alternate screen owns stdout
fn init_logging(level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!(
            "cocktail_companion={level},companion_tui={level},companion_core={level}"
        ))
    });

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(false),
        )
        .with(filter)
        .init();
}

fn load_config(args: &Args) -> anyhow::Result<CompanionConfig> {
    let mut config = load_config_from_path(args.config.clone())
        .context("Failed to load configuration")?;

    let mut overrides = ConfigOverrides::new();
    if let Some(ref endpoint) = args.endpoint {
        overrides = overrides.with_endpoint(endpoint.clone());
    }
    if let Some(ms) = args.toast_ms {
        overrides = overrides.with_toast_duration_ms(ms);
    }
    overrides
        .apply(&mut config)
        .context("Invalid command line option")?;

    info!(
        endpoint = %config.backend.endpoint,
        source = %config.source(),
        "Configuration loaded"
    );
    Ok(config)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level);

    // Check if we have a TTY before attempting initialization
    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        eprintln!("Error: cocktail-companion requires a terminal (TTY)");
        eprintln!();
        eprintln!("This usually means stdin or stdout is piped, or an SSH");
        eprintln!("session was started without -t.");
        std::process::exit(1);
    }

    let config = load_config(&args)?;
    let backend = HttpBackend::from_settings(&config.backend)
        .context("Failed to build the HTTP client")?;

    // Set up panic hook to restore terminal
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        // Restore terminal before printing panic
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    terminal.clear()?;

    // Run the app
    let result = run_app(&mut terminal, backend, config).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    let goodbye = result?;
    if let Some(goodbye) = goodbye {
        println!("\n\x1b[33m\u{1f378}\x1b[0m {goodbye}\n");
    }

    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    backend: HttpBackend,
    config: CompanionConfig,
) -> anyhow::Result<Option<String>> {
    let size = terminal.size()?;
    let client = CompanionClient::new(backend, config);
    let mut app = App::new(
        client,
        Box::new(Osc52Clipboard::stdout()),
        (size.width, size.height),
    );
    app.run(terminal).await?;

    // Goodbye is printed after the alternate screen is gone
    Ok(app.goodbye().map(str::to_string))
}
