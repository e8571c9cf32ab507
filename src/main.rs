//! Binary entry point. With no subcommand it brings up the SQLite store and
//! drives the Ratatui event loop; the subcommands print the same directory
//! queries as plain text.
use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::builder::RangedU64ValueParser;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use lunchly::config::{load_config, log_file_path, LunchlyConfig};
use lunchly::{run_app, App, Customer, CustomerDirectory, CustomerId, Store};

#[derive(Parser)]
#[command(name = "lunchly")]
#[command(version)]
#[command(about = "Track restaurant customers and their reservations")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the config file (defaults to ~/.lunchly/lunchly.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Path to the database file, overriding the config
    #[arg(short, long, global = true)]
    database: Option<PathBuf>,

    /// Without a subcommand the interactive UI starts
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List every customer by name
    List,

    /// Show the customers with the most reservations
    Top {
        /// Number of customers to show (defaults to the configured limit)
        #[arg(short, long, value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
        limit: Option<usize>,
    },

    /// Find customers whose name contains QUERY
    Search {
        query: String,
    },

    /// Show one customer and their reservations
    Show {
        id: i64,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref())?;
    if let Some(database) = &cli.database {
        config.database = Some(database.clone());
    }
    init_logging(&cli, &config)?;

    let store = Store::open(&config.database_path()?)?;
    match cli.command {
        None => {
            let mut app = App::new(store, config.empty_results, config.top_limit())?;
            run_app(&mut app)
        }
        Some(command) => run_command(&store, &config, command),
    }
}

/// The TUI owns the terminal, so it logs to a file; subcommands log to stderr.
fn init_logging(cli: &Cli, config: &LunchlyConfig) -> Result<()> {
    let directive = match (&config.log_filter, cli.verbose) {
        (_, true) => "debug".to_string(),
        (Some(filter), false) => filter.clone(),
        (None, false) => "info".to_string(),
    };
    let filter = EnvFilter::try_new(&directive)
        .with_context(|| format!("invalid log filter '{directive}'"))?;

    if cli.command.is_some() {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr))
            .with(filter)
            .init();
        return Ok(());
    }

    let log_path = log_file_path()?;
    if let Some(parent) = log_path.parent() {
        fs::create_dir_all(parent).context("failed to create data directory")?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("failed to open log file {}", log_path.display()))?;

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
        .with(filter)
        .init();
    Ok(())
}

fn run_command(store: &Store, config: &LunchlyConfig, command: Commands) -> Result<()> {
    let directory = CustomerDirectory::new(store).with_empty_results(config.empty_results);

    match command {
        Commands::List => {
            let customers = directory.list().context("failed to list customers")?;
            if customers.is_empty() {
                println!("No customers yet.");
            }
            for customer in &customers {
                print_customer_line(customer);
            }
        }
        Commands::Top { limit } => {
            let limit = limit.unwrap_or_else(|| config.top_limit());
            let ranked = directory.top_ranked(limit)?;
            for (rank, row) in ranked.iter().enumerate() {
                println!(
                    "{:>2}. {:<30} {:>3} reservations  (#{})",
                    rank + 1,
                    row.display_name(),
                    row.reservation_count,
                    row.id
                );
            }
        }
        Commands::Search { query } => {
            let customers = directory.search(&query)?;
            for customer in &customers {
                print_customer_line(customer);
            }
        }
        Commands::Show { id } => {
            let customer = directory.get_by_id(CustomerId(id))?;
            let reservations = directory
                .reservations(&customer)
                .context("failed to load reservations")?;

            println!("{}", customer.display_name());
            println!("  Phone: {}", customer.phone.as_deref().unwrap_or("-"));
            println!("  Notes: {}", customer.notes.as_deref().unwrap_or("-"));
            if reservations.is_empty() {
                println!("  No reservations.");
            }
            for reservation in &reservations {
                let notes = reservation.notes.as_deref().unwrap_or_default();
                println!(
                    "  - {}  party of {}  {}",
                    reservation.formatted_start_at(),
                    reservation.num_guests,
                    notes
                );
            }
        }
    }

    Ok(())
}

fn print_customer_line(customer: &Customer) {
    let id = customer
        .id()
        .map(|id| id.to_string())
        .unwrap_or_default();
    println!(
        "{:>4}  {:<30} {}",
        id,
        customer.display_name(),
        customer.phone.as_deref().unwrap_or_default()
    );
}
