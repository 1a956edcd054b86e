use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use triage_client::{ApiClient, Controller};
use triage_core::{example_json, today_utc};

mod config;
mod dashboard;
mod output;
mod state;

use output::OutputFormat;

#[derive(Parser, Debug)]
#[command(
    name = "triage",
    version,
    long_version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("TRIAGE_BUILD_SHA"), ")"),
    about = "Send task lists to the analysis service and show the scored results"
)]
struct Cli {
    /// Override the API base URL from ~/.triage/config.toml
    #[arg(long, global = true)]
    api_base: Option<String>,

    /// More log output on stderr (-v info, -vv debug). RUST_LOG wins when set.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the example task list (due dates relative to today)
    Example {
        /// Write to a file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Score and order tasks
    Analyze {
        /// JSON array of tasks; `-` reads stdin (default: the example list)
        #[arg(long)]
        file: Option<PathBuf>,

        /// Scoring strategy label: default, fastest, deadline
        #[arg(long)]
        strategy: Option<String>,

        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Ask for the top suggestions, each with a reason
    Suggest {
        /// JSON array of tasks; `-` reads stdin (default: the example list)
        #[arg(long)]
        file: Option<PathBuf>,

        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Check that the service is up
    Health,

    /// Interactive dashboard (TTY required)
    Ui {
        /// Task file to load (reload with `r`); defaults to the example list
        #[arg(long)]
        file: Option<PathBuf>,

        /// Send logs here while the dashboard owns the terminal
        #[arg(long)]
        log_file: Option<PathBuf>,
    },

    /// Manage ~/.triage/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write the default config if none exists
    Init,

    /// Print the effective config
    Show,
}

impl Command {
    /// `example` and `config init` never look at ~/.triage/config.toml.
    fn reads_config(&self) -> bool {
        !matches!(
            self,
            Command::Example { .. }
                | Command::Config {
                    command: ConfigCommand::Init
                }
        )
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Command::Ui { log_file, .. } => {
            if let Some(p) = log_file {
                init_file_tracing(cli.verbose, p)?;
            }
        }
        _ => init_tracing(cli.verbose),
    }

    let mut cfg = if cli.command.reads_config() {
        config::load_config()?
    } else {
        config::Config::default()
    };
    if let Some(base) = &cli.api_base {
        cfg.api.base_url = base.clone();
    }

    match cli.command {
        Command::Example { out } => {
            let json = example_json(today_utc());
            match out {
                Some(p) => {
                    std::fs::write(&p, format!("{json}\n"))
                        .with_context(|| format!("write {}", p.display()))?;
                    println!("Wrote {}", p.display());
                }
                None => println!("{json}"),
            }
        }

        Command::Analyze {
            file,
            strategy,
            format,
        } => {
            let mut controller = controller_with_input(&cfg, file.as_deref())?;
            controller.set_strategy(strategy.unwrap_or_else(|| cfg.ui.strategy.clone()));
            controller.analyze().await;
            print_board(&controller, format.unwrap_or(cfg.ui.format))?;
        }

        Command::Suggest { file, format } => {
            let mut controller = controller_with_input(&cfg, file.as_deref())?;
            controller.suggest().await;
            print_board(&controller, format.unwrap_or(cfg.ui.format))?;
        }

        Command::Health => {
            let client = ApiClient::new(cfg.api.base_url.clone());
            let h = client
                .health()
                .await
                .with_context(|| format!("health check against {}", client.base_url()))?;
            println!("{}: {} ({})", h.status, h.message, h.timestamp);
        }

        Command::Ui { file, .. } => {
            let mut controller = Controller::new(ApiClient::new(cfg.api.base_url.clone()));
            controller.set_strategy(cfg.ui.strategy.clone());
            let source = dashboard::InputSource::from_arg(file)?;
            dashboard::run_dashboard(controller, source)?;
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => config::show_config(&cfg)?,
        },
    }

    Ok(())
}

fn log_filter(verbose: u8) -> EnvFilter {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

fn init_tracing(verbose: u8) {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(verbose))
        .with_writer(std::io::stderr)
        .init();
}

fn init_file_tracing(verbose: u8, path: &Path) -> Result<()> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(verbose))
        .with_ansi(false)
        .with_writer(std::sync::Mutex::new(file))
        .init();
    Ok(())
}

/// Controller pre-filled from `file`, or with the example list when there is none.
fn controller_with_input(cfg: &config::Config, file: Option<&Path>) -> Result<Controller> {
    let mut controller = Controller::new(ApiClient::new(cfg.api.base_url.clone()));
    match file {
        Some(p) => controller.set_input(state::read_task_input(p)?),
        None => controller.fill_example(today_utc()),
    }
    Ok(controller)
}

fn print_board(controller: &Controller, format: OutputFormat) -> Result<()> {
    let board = controller.board();
    if board.has_error() {
        bail!("{}", board.error());
    }
    print!("{}", output::render(board, format)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_example_does_not_read_config() {
        assert!(!parse(&["triage", "example"]).command.reads_config());
        assert!(!parse(&["triage", "config", "init"]).command.reads_config());
    }

    #[test]
    fn test_request_commands_read_config() {
        assert!(parse(&["triage", "analyze", "--api-base", "http://x/api"]).command.reads_config());
        assert!(parse(&["triage", "suggest"]).command.reads_config());
        assert!(parse(&["triage", "config", "show"]).command.reads_config());
    }
}
