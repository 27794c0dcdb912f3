// lightbnb - query the LightBnB rental database from the terminal
//
// Parses CLI args, opens the database named by config and dispatches to
// the core services. Results go to stdout as JSON, logs go to stderr.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use lightbnb_lib::{
    core::{Accounts, Bookings, Listings},
    db::{NewProperty, NewReservation, NewReview, PropertySearch},
    logging, Config, Database, Result,
};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "lightbnb", author, version, about = "Query the LightBnB rental database")]
struct Cli {
    /// Debug logging, including assembled SQL
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    /// Database file (overrides LIGHTBNB_DB_PATH)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Look up a user by email
    User { email: String },

    /// Look up a user by id
    UserId { id: i64 },

    /// Register a user (password must already be hashed)
    AddUser {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// A guest's past reservations
    Reservations {
        guest_id: i64,
        #[arg(long)]
        limit: Option<i64>,
    },

    /// Search properties
    Search {
        #[arg(long)]
        city: Option<String>,
        #[arg(long)]
        owner_id: Option<i64>,
        /// Minimum price per night, in dollars
        #[arg(long)]
        min_price: Option<f64>,
        /// Maximum price per night, in dollars
        #[arg(long)]
        max_price: Option<f64>,
        #[arg(long)]
        min_rating: Option<f64>,
        #[arg(long)]
        limit: Option<i64>,
    },

    /// List a property described by a JSON file
    AddProperty { file: PathBuf },

    /// Book a property (dates as YYYY-MM-DD)
    Reserve {
        #[arg(long)]
        property_id: i64,
        #[arg(long)]
        guest_id: i64,
        #[arg(long)]
        start: NaiveDate,
        #[arg(long)]
        end: NaiveDate,
    },

    /// Review a property (1-5)
    Review {
        #[arg(long)]
        property_id: i64,
        #[arg(long)]
        guest_id: i64,
        #[arg(long)]
        rating: i32,
        #[arg(long)]
        reservation_id: Option<i64>,
        #[arg(long)]
        message: Option<String>,
    },

    /// Show row counts
    Status,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = logging::init_tracing(cli.verbose) {
        eprintln!("{}", e.user_message());
        return ExitCode::FAILURE;
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            eprintln!("{}", e.user_message());
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load()?;
    if let Some(path) = cli.db {
        config.db_path = path;
    }

    let db = Arc::new(Database::from_config(&config).await?);
    let result = dispatch(cli.command, Arc::clone(&db), &config).await;
    db.close().await;
    result
}

async fn dispatch(command: Commands, db: Arc<Database>, config: &Config) -> Result<()> {
    match command {
        Commands::User { email } => {
            let accounts = Accounts::new(db)?;
            print_json(&accounts.find_by_email(&email).await?)
        }
        Commands::UserId { id } => {
            let accounts = Accounts::new(db)?;
            print_json(&accounts.find_by_id(id).await?)
        }
        Commands::AddUser {
            name,
            email,
            password,
        } => {
            let accounts = Accounts::new(db)?;
            print_json(&accounts.register(&name, &email, &password).await?)
        }
        Commands::Reservations { guest_id, limit } => {
            let bookings = Bookings::new(db);
            let limit = limit.unwrap_or(config.result_limit);
            print_json(&bookings.past_reservations(guest_id, limit).await?)
        }
        Commands::Search {
            city,
            owner_id,
            min_price,
            max_price,
            min_rating,
            limit,
        } => {
            let listings = Listings::new(db);
            let search = PropertySearch {
                city,
                owner_id,
                minimum_price_per_night: min_price,
                maximum_price_per_night: max_price,
                minimum_rating: min_rating,
            };
            let limit = limit.unwrap_or(config.result_limit);
            print_json(&listings.search(&search, limit).await?)
        }
        Commands::AddProperty { file } => {
            let raw = std::fs::read_to_string(&file)?;
            let property: NewProperty = serde_json::from_str(&raw)?;
            let listings = Listings::new(db);
            print_json(&listings.add(property).await?)
        }
        Commands::Reserve {
            property_id,
            guest_id,
            start,
            end,
        } => {
            let bookings = Bookings::new(db);
            let reservation = NewReservation {
                start_date: start,
                end_date: end,
                property_id,
                guest_id,
            };
            print_json(&bookings.reserve(reservation).await?)
        }
        Commands::Review {
            property_id,
            guest_id,
            rating,
            reservation_id,
            message,
        } => {
            let bookings = Bookings::new(db);
            let review = NewReview {
                guest_id,
                property_id,
                reservation_id,
                rating,
                message,
            };
            print_json(&bookings.review(review).await?)
        }
        Commands::Status => {
            let stats = db.stats().await?;
            println!("\nlightbnb Status");
            println!("{}", "=".repeat(60));
            println!("  Database:     {}", db.path().display());
            println!("  Users:        {}", stats.total_users);
            println!("  Properties:   {}", stats.total_properties);
            println!("  Reservations: {}", stats.total_reservations);
            println!("  Reviews:      {}", stats.total_reviews);
            println!("  Pool:         {} open, {} idle", stats.pool_size, stats.idle_connections);
            println!("{}", "=".repeat(60));
            Ok(())
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
