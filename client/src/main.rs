//! SkyScout command line host.
//!
//! Each invocation builds the [`App`], restores the stored session, runs one operation and
//! prints the resulting slice snapshot.

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use serde::de::DeserializeOwned;
use shared::{AirportData, CabinClass, SortBy};

use skyscout::app::slices::{PriceCalendarSlice, SessionSlice};
use skyscout::app::view::{filter_airports, AirportFilter, ItineraryRow, PlaceSide};
use skyscout::app::App;
use skyscout::config::AppConfig;
use skyscout::core::Result;

#[derive(Parser)]
#[command(name = "skyscout", version, about = "Search flights from the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the signed-in user
    Whoami,
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    Signup {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    Logout,
    /// Change the display name
    Rename { name: String },
    /// Change the password (signs you out)
    Password { new_password: String },
    /// Airports around the configured location
    Nearby,
    /// Search airports and cities
    Airports {
        query: String,
        #[arg(long, value_enum, default_value_t = FilterArg::All)]
        filter: FilterArg,
    },
    /// Search flights between two catalog places (BOM, LOND, NYCA, CPT, NZ, TYOA)
    Flights {
        #[arg(long, default_value = "BOM")]
        from: String,
        #[arg(long, default_value = "NYCA")]
        to: String,
        /// Departure date, YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        return_date: Option<String>,
        #[arg(long, default_value_t = 1)]
        adults: u32,
        #[arg(long, value_parser = parse_choice::<CabinClass>, default_value = "economy")]
        cabin: CabinClass,
        #[arg(long, value_parser = parse_choice::<SortBy>, default_value = "best")]
        sort: SortBy,
        #[arg(long, default_value = "USD")]
        currency: String,
    },
    /// Cheapest fare per day
    Calendar {
        #[arg(long, default_value = "BOM")]
        from: String,
        #[arg(long, default_value = "JFK")]
        to: String,
        /// First day, YYYY-MM-DD (default: today)
        #[arg(long)]
        from_date: Option<String>,
        #[arg(long, default_value = "USD")]
        currency: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum FilterArg {
    All,
    Airport,
    City,
}

impl From<FilterArg> for AirportFilter {
    fn from(arg: FilterArg) -> Self {
        match arg {
            FilterArg::All => AirportFilter::All,
            FilterArg::Airport => AirportFilter::Airport,
            FilterArg::City => AirportFilter::City,
        }
    }
}

/// Parse a wire-format enum value such as `premium_economy`.
fn parse_choice<T: DeserializeOwned>(raw: &str) -> std::result::Result<T, String> {
    serde_json::from_value(serde_json::Value::String(raw.to_string()))
        .map_err(|_| format!("unknown value \"{}\"", raw))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _log_guard = skyscout::debug::init();

    let config = AppConfig::from_env().context("Invalid configuration")?;
    let app = App::from_config(&config).context("Failed to start")?;
    app.init().await;

    if let Err(err) = run(&app, cli.command).await {
        tracing::error!(error = %err, "Command failed");
        eprintln!("Error: {}", err.user_message());
        if err.is_retryable() {
            eprintln!("This may be temporary; run the command again.");
        }
        std::process::exit(1);
    }
    Ok(())
}

async fn run(app: &App, command: Command) -> Result<()> {
    match command {
        Command::Whoami => print_session(&app.session),
        Command::Login { email, password } => {
            app.session.login(&email, &password).await?;
            print_session(&app.session);
        }
        Command::Signup { name, email, password } => {
            app.session.signup(&name, &email, &password).await?;
            print_session(&app.session);
        }
        Command::Logout => {
            app.session.logout().await?;
            print_session(&app.session);
        }
        Command::Rename { name } => {
            app.session.update_name(&name).await?;
            print_session(&app.session);
        }
        Command::Password { new_password } => {
            app.session.update_password(&new_password).await?;
            println!("Password changed. Please log in again.");
        }
        Command::Nearby => {
            app.airports.resolve_location().await?;
            if let Some(location) = app.airports.location() {
                println!("Near {}", location);
            }
            print_airports(&app.airports.nearby.data().unwrap_or_default(), AirportFilter::All);
        }
        Command::Airports { query, filter } => {
            app.airports.lookup(&query).await?;
            print_airports(&app.airports.search.data().unwrap_or_default(), filter.into());
        }
        Command::Flights {
            from,
            to,
            date,
            return_date,
            adults,
            cabin,
            sort,
            currency,
        } => {
            app.flights.select_place(PlaceSide::Origin, &from)?;
            app.flights.select_place(PlaceSide::Destination, &to)?;
            app.flights.set_params(|params| {
                params.date = date.unwrap_or_else(lib_utils::today_ymd);
                params.return_date = return_date;
                params.adults = adults;
                params.cabin_class = cabin;
                params.sort_by = sort;
                params.currency = currency;
            });
            app.flights.execute().await?;

            let itineraries = app.flights.data().unwrap_or_default().itineraries;
            if itineraries.is_empty() {
                println!("No flights found.");
            }
            for row in itineraries.iter().filter_map(ItineraryRow::from_itinerary) {
                println!(
                    "{:>10}  {:<24} {:<12} {} - {}  {:>8}  {}",
                    row.price, row.carrier, row.route, row.departure, row.arrival, row.duration, row.stops
                );
            }
        }
        Command::Calendar {
            from,
            to,
            from_date,
            currency,
        } => {
            app.price_calendar.set_params(|params| {
                params.origin_sky_id = from;
                params.destination_sky_id = to;
                params.from_date = from_date.unwrap_or_else(lib_utils::today_ymd);
                params.currency = currency;
            });
            app.price_calendar.execute().await?;
            print_calendar(&app.price_calendar);
        }
    }
    Ok(())
}

fn print_session(session: &SessionSlice) {
    match session.snapshot().user() {
        Some(user) if user.name.is_empty() => println!("Signed in as {}", user.email),
        Some(user) => println!("Signed in as {} <{}>", user.name, user.email),
        None => println!("Not signed in"),
    }
}

fn print_airports(airports: &[AirportData], filter: AirportFilter) {
    let shown = filter_airports(airports, filter, "");
    if shown.is_empty() {
        println!("No {} found.", filter.label().to_lowercase());
    }
    for airport in shown {
        println!(
            "{:<6} {:<8} {}  {}",
            airport.sky_id(),
            airport.navigation.entity_type,
            airport.presentation.suggestion_title,
            airport.presentation.subtitle
        );
    }
}

fn print_calendar(slice: &PriceCalendarSlice) {
    let marks = slice.day_marks();
    if marks.is_empty() {
        println!("No prices available.");
    }
    for (day, mark) in marks {
        println!("{}  {:>10.2}  {}", day, mark.price, mark.label);
    }
}
