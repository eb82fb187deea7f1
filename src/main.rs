use anyhow::{Context, Result};
use cambio::calculator::{CalculatorSession, Notification, SystemClipboard};
use cambio::config::Config;
use cambio::converter::Converter;
use cambio::currency::{self, HttpRateProvider, MockRateProvider, RateProvider};
use cambio::store::PreferenceStore;
use cambio::ui;
use clap::{Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Terminal calculator and currency converter.
#[derive(Parser, Debug)]
#[command(name = "cambio")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Specify alternate configuration file
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL")]
    log: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the calculator (interactive unless --keys is given)
    Calc {
        /// Key line to apply once, e.g. "5+3*2="
        #[arg(long)]
        keys: Option<String>,
    },

    /// Convert an amount between two currencies
    Convert {
        /// Amount to convert (default: 1)
        amount: Option<String>,

        /// Source currency code (default: last used)
        #[arg(long)]
        from: Option<String>,

        /// Target currency code (default: last used)
        #[arg(long)]
        to: Option<String>,

        /// Swap source and target before converting
        #[arg(long)]
        swap: bool,
    },

    /// List or search supported currencies
    Currencies {
        /// Search text (code or name)
        query: Option<String>,

        /// Maximum number of results
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Show the last conversion
    Last,
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn open_store(config: &Config) -> PreferenceStore {
    PreferenceStore::open(&config.data_dir(), config.cache_ttl())
}

fn build_converter(config: &Config) -> Result<Converter> {
    let provider: Box<dyn RateProvider> = if config.api.use_mock {
        tracing::info!("Using built-in mock rates");
        Box::new(MockRateProvider)
    } else {
        Box::new(
            HttpRateProvider::new(
                config.api.base_url.clone(),
                config.api.api_key.clone(),
                config.api_timeout(),
            )
            .context("Failed to create rate API client")?,
        )
    };

    Ok(Converter::new(provider, open_store(config)))
}

/// Print pending notifications; returns the last copied value, if any.
fn drain_notifications(rx: &flume::Receiver<Notification>) -> Option<String> {
    let mut copied = None;
    for notification in rx.try_iter() {
        eprintln!("{}", notification.message());
        if let Notification::Copied(value) = notification {
            copied = Some(value);
        }
    }
    copied
}

async fn run_calc(config: &Config, keys: Option<String>) -> Result<()> {
    let (mut session, rx) = CalculatorSession::new(Box::new(SystemClipboard));

    if let Some(keys) = keys {
        session.handle_line(&keys)?;
        drain_notifications(&rx);
        println!("{}", ui::render_calculator(session.state()));
        return Ok(());
    }

    let mut converter: Option<Converter> = None;
    let mut copied: Option<String> = None;

    println!("Keys: 0-9 . + - * / % = c(lear) <(delete) y(copy); :convert, :q");
    println!("{}", ui::render_calculator(session.state()));

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("Failed to read input")?;
        match line.trim() {
            ":q" | ":quit" | "quit" | "exit" => break,
            ":convert" => {
                let Some(value) = copied.as_deref() else {
                    eprintln!("Nothing copied yet. Press y to copy the display first.");
                    continue;
                };
                if converter.is_none() {
                    converter = Some(build_converter(config)?);
                }
                if let Some(converter) = converter.as_mut() {
                    let view = converter.convert(value).await;
                    println!("{}", ui::render_conversion(&view));
                }
            }
            input => {
                if let Err(e) = session.handle_line(input) {
                    eprintln!("{}", e);
                }
                if let Some(value) = drain_notifications(&rx) {
                    copied = Some(value);
                }
                println!("{}", ui::render_calculator(session.state()));
            }
        }
        io::stdout().flush().ok();
    }

    Ok(())
}

async fn run_convert(
    config: &Config,
    amount: Option<String>,
    from: Option<String>,
    to: Option<String>,
    swap: bool,
) -> Result<()> {
    let mut converter = build_converter(config)?;

    if let Some(code) = from {
        converter.select_from(&code)?;
    }
    if let Some(code) = to {
        converter.select_to(&code)?;
    }
    if swap {
        converter.swap();
    }

    let amount = amount.unwrap_or_else(|| "1".to_string());
    let view = converter.convert(&amount).await;
    println!("{}", ui::render_conversion(&view));
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;

    init_logging(cli.log.as_deref().unwrap_or(&config.log_level));
    tracing::debug!("Data directory: {}", config.data_dir().display());

    match cli.command {
        Command::Calc { keys } => run_calc(&config, keys).await?,
        Command::Convert {
            amount,
            from,
            to,
            swap,
        } => run_convert(&config, amount, from, to, swap).await?,
        Command::Currencies { query, limit } => {
            let matches = currency::search(query.as_deref().unwrap_or(""));
            let shown: Vec<_> = matches.into_iter().take(limit).collect();
            println!("{}", ui::render_currency_list(&shown));
        }
        Command::Last => {
            let store = open_store(&config);
            println!("{}", ui::render_last_conversion(store.last_conversion()));
        }
    }

    Ok(())
}
