//! stocksim - Stock Trading Simulator Client
//!
//! Command-line front end for the simulator backend.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use stocksim::app::{App, AppEvent, Session, SettingsUpdate};
use stocksim::config::ClientConfig;
use stocksim::core::{AppError, MarketApi};
use stocksim::debug::{self, LogConfig};
use stocksim::services::api::{ApiClient, LeaderboardPeriod, StockFilter, StockSort, Theme, TimeRange};
use stocksim::services::storage::FileStore;

/// stocksim - Stock Trading Simulator Client
#[derive(Parser, Debug)]
#[command(name = "stocksim")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Backend base URL (overrides STOCKSIM_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Directory for local state and logs (overrides STOCKSIM_DATA_DIR)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Log to stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    // === Market ===
    /// Market table
    #[command(alias = "market")]
    Stocks {
        /// Only this sector
        #[arg(long)]
        sector: Option<String>,

        /// Filter by symbol or name
        #[arg(long)]
        search: Option<String>,

        /// symbol, price, change or volume
        #[arg(long)]
        sort: Option<StockSort>,
    },

    /// Search stocks by symbol or name
    Search {
        query: String,
    },

    /// Stock detail with price history
    Stock {
        symbol: String,

        /// 1D, 1W, 1M, 3M, 1Y or ALL (default from settings)
        #[arg(short, long)]
        range: Option<TimeRange>,
    },

    /// Live quotes until Ctrl-C
    Watch {
        /// Symbols to show (all when omitted)
        symbols: Vec<String>,

        /// Seconds between refreshes (default from settings)
        #[arg(short, long)]
        interval: Option<u64>,
    },

    // === Trading ===
    /// Buy shares
    Buy {
        symbol: String,
        shares: String,
    },

    /// Sell shares
    Sell {
        symbol: String,
        shares: String,
    },

    /// Holdings and cash
    Portfolio,

    /// Transaction history
    History {
        /// Number of transactions to show
        #[arg(short = 'n', long, default_value = "20")]
        limit: usize,
    },

    /// Portfolio value over time
    Performance {
        #[arg(short, long)]
        range: Option<TimeRange>,
    },

    // === Lists ===
    /// Watchlist management
    #[command(subcommand)]
    Watchlist(WatchlistCommands),

    /// Achievements and progress
    Achievements,

    /// Market news
    News {
        #[arg(short = 'n', long, default_value = "10")]
        limit: usize,
    },

    /// Top traders
    Leaderboard {
        /// daily, weekly, monthly or all-time
        #[arg(short, long, default_value = "weekly")]
        period: LeaderboardPeriod,

        #[arg(short = 'n', long, default_value = "10")]
        limit: usize,
    },

    // === Account ===
    /// Settings management
    #[command(subcommand)]
    Settings(SettingsCommands),

    /// Navigation menu
    Nav,

    /// Current identity
    Whoami,

    /// Set display name and optionally a backend token
    Login {
        display_name: String,

        /// Bearer token issued by the backend login page
        #[arg(long)]
        token: Option<String>,
    },

    /// Forget the local identity and token
    Logout,
}

#[derive(Subcommand, Debug)]
enum WatchlistCommands {
    /// Show the watchlist
    #[command(alias = "ls")]
    List,

    /// Add a symbol
    Add { symbol: String },

    /// Remove a symbol
    #[command(alias = "rm")]
    Remove { symbol: String },
}

#[derive(Subcommand, Debug)]
enum SettingsCommands {
    /// Show settings
    Show,

    /// Change settings
    Set {
        #[arg(long)]
        display_name: Option<String>,

        /// Three-letter currency code
        #[arg(long)]
        currency: Option<String>,

        /// dark, light or system
        #[arg(long)]
        theme: Option<Theme>,

        #[arg(long)]
        notifications: Option<bool>,

        /// Seconds between quote refreshes
        #[arg(long)]
        refresh_interval: Option<u64>,

        #[arg(long)]
        chart_range: Option<TimeRange>,
    },

    /// Reset the account to starting cash
    Reset {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = ClientConfig::from_env().context("invalid configuration")?;
    if let Some(api_url) = &cli.api_url {
        config.set_api_url(api_url);
    }
    if let Some(data_dir) = cli.data_dir.clone() {
        config.set_data_dir(data_dir);
    }
    config.validate().context("invalid configuration")?;

    let _log_guard = debug::init(&LogConfig::from_env(&config.log_dir, cli.verbose));
    tracing::debug!(api_url = %config.api_url, data_dir = %config.data_dir.display(), "Starting");

    let store = Arc::new(FileStore::open(config.storage_path()).context("failed to open local storage")?);
    let (event_tx, event_rx) = async_channel::unbounded::<AppEvent>();
    let client = ApiClient::new(&config, store.clone())?.with_events(event_tx.clone());
    let api: Arc<dyn MarketApi> = Arc::new(client);
    let session = Arc::new(Session::load(store)?);
    let app = App::new(api, session);

    match run(&app, cli.command, event_tx, event_rx).await {
        Ok(()) => Ok(()),
        Err(AppError::LoginRequired { login_url }) => {
            eprintln!("Login required. Sign in at {}", login_url);
            eprintln!("then run `stocksim login <NAME> --token <TOKEN>`.");
            std::process::exit(2);
        }
        Err(e) => Err(e.into()),
    }
}

async fn run(
    app: &App,
    command: Commands,
    event_tx: async_channel::Sender<AppEvent>,
    event_rx: async_channel::Receiver<AppEvent>,
) -> stocksim::Result<()> {
    let output = match command {
        Commands::Stocks { sector, search, sort } => {
            app.stocks(&StockFilter { sector, search, sort }).await?
        }
        Commands::Search { query } => app.search(&query).await?,
        Commands::Stock { symbol, range } => app.stock(&symbol, range).await?,
        Commands::Watch { symbols, interval } => {
            return watch(app, symbols, interval, event_tx, event_rx).await;
        }
        Commands::Buy { symbol, shares } => app.buy(&symbol, &shares).await?,
        Commands::Sell { symbol, shares } => app.sell(&symbol, &shares).await?,
        Commands::Portfolio => app.portfolio().await?,
        Commands::History { limit } => app.history(limit).await?,
        Commands::Performance { range } => app.performance(range).await?,
        Commands::Watchlist(cmd) => match cmd {
            WatchlistCommands::List => app.watchlist().await?,
            WatchlistCommands::Add { symbol } => app.watchlist_add(&symbol).await?,
            WatchlistCommands::Remove { symbol } => app.watchlist_remove(&symbol).await?,
        },
        Commands::Achievements => app.achievements().await?,
        Commands::News { limit } => app.news(limit).await?,
        Commands::Leaderboard { period, limit } => app.leaderboard(period, limit).await?,
        Commands::Settings(cmd) => match cmd {
            SettingsCommands::Show => app.settings().await?,
            SettingsCommands::Set {
                display_name,
                currency,
                theme,
                notifications,
                refresh_interval,
                chart_range,
            } => {
                app.settings_set(SettingsUpdate {
                    display_name,
                    currency,
                    theme,
                    notifications,
                    refresh_interval_secs: refresh_interval,
                    default_chart_range: chart_range,
                })
                .await?
            }
            SettingsCommands::Reset { yes } => app.settings_reset(yes).await?,
        },
        Commands::Nav => app.nav().await?,
        Commands::Whoami => app.whoami()?,
        Commands::Login { display_name, token } => app.login(&display_name, token.as_deref())?,
        Commands::Logout => app.logout()?,
    };

    print!("{}", output);
    Ok(())
}

/// Print ticker frames until Ctrl-C or a 401.
async fn watch(
    app: &App,
    symbols: Vec<String>,
    interval: Option<u64>,
    event_tx: async_channel::Sender<AppEvent>,
    event_rx: async_channel::Receiver<AppEvent>,
) -> stocksim::Result<()> {
    let period = app.watch_interval(interval).await;
    let mut ticker = app.start_ticker(symbols, period, event_tx)?;
    println!("Refreshing every {}s, Ctrl-C to stop.", period.as_secs());

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Watch interrupted");
                break;
            }
            event = event_rx.recv() => {
                let Ok(event) = event else { break };
                print!("\n{}", app.render_event(&event));
                if let AppEvent::LoginRequired { login_url } = event {
                    ticker.stop();
                    return Err(AppError::LoginRequired { login_url });
                }
            }
        }
    }

    ticker.stop();
    Ok(())
}
