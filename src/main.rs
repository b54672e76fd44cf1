use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use trip_planner::config::{Backend, Settings};
use trip_planner::planner::{PlanInput, TripPlan};
use trip_planner::store::TripStore;
use trip_planner::{api, catalog, render};

#[derive(Parser)]
#[command(name = "trip-planner")]
#[command(about = "Plan budget trips and keep track of saved ones")]
struct Cli {
    /// Storage backend (overrides TRIP_PLANNER_BACKEND)
    #[arg(long, global = true)]
    backend: Option<Backend>,

    /// Data directory (overrides TRIP_PLANNER_DATA_DIR)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the HTTP API
    Serve {
        /// Port for HTTP API (overrides TRIP_PLANNER_PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// List saved trips, newest first
    List,
    /// Show one trip in detail
    Show { id: String },
    /// Build a trip and save it
    Plan(PlanArgs),
    /// Price a trip without saving it
    Quote(PlanArgs),
    /// Set the trip note (empty text clears it)
    Note { id: String, text: String },
    /// Set a note on one activity (empty text removes it)
    PlaceNote {
        id: String,
        place: String,
        text: String,
    },
    /// Rate one activity from 1 to 5 (0 removes the rating)
    Rate { id: String, place: String, rating: u8 },
    /// Delete a trip
    Delete { id: String },
    /// Delete every saved trip
    Clear,
    /// Suggest locations matching a query
    Locations { query: String },
}

#[derive(Args)]
struct PlanArgs {
    #[arg(long)]
    departure: String,
    #[arg(long, default_value = "")]
    destination: String,
    /// Nights
    #[arg(long)]
    days: Option<u32>,
    #[arg(long)]
    budget: Option<f64>,
    #[arg(long)]
    people: Option<u32>,
    #[arg(long)]
    couple: bool,
    /// Repeat for several vibes; replaces the defaults
    #[arg(long = "vibe")]
    vibes: Vec<String>,
    #[arg(long)]
    flight: Option<String>,
    #[arg(long)]
    stay: Option<String>,
    /// Activity id; repeat for several
    #[arg(long = "place")]
    places: Vec<String>,
}

impl From<PlanArgs> for PlanInput {
    fn from(args: PlanArgs) -> Self {
        Self {
            destination: args.destination,
            departure: args.departure,
            days: args.days,
            budget: args.budget,
            people: args.people,
            is_couple: args.couple,
            vibes: (!args.vibes.is_empty()).then_some(args.vibes),
            flight_id: args.flight,
            stay_id: args.stay,
            selected_places: args.places,
        }
    }
}

/// Initialize tracing with output to stderr (for CLI commands) or stdout
fn init_tracing(use_stderr: bool) {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "trip_planner=info,tower_http=debug".into()),
    );

    if use_stderr {
        // CLI output goes to stdout, keep it clean
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let use_stderr = !matches!(cli.command, Commands::Serve { .. });
    init_tracing(use_stderr);

    let mut settings = Settings::from_env();
    if let Some(backend) = cli.backend {
        settings.backend = backend;
    }
    if let Some(dir) = cli.data_dir {
        settings.data_dir = Some(dir);
    }

    run(cli.command, &settings).await
}

async fn run(command: Commands, settings: &Settings) -> anyhow::Result<()> {
    if let Commands::Serve { port } = command {
        let port = port.unwrap_or(settings.port);
        let store = settings.open_store()?;
        let app = api::create_router(store);

        let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port)).await?;
        tracing::info!("Trip planner listening on http://127.0.0.1:{}", port);

        axum::serve(listener, app).await?;
        return Ok(());
    }

    let store = settings.open_store_or_unavailable();
    run_command(command, &store)
}

fn run_command(command: Commands, store: &TripStore) -> anyhow::Result<()> {
    match command {
        Commands::List => {
            let trips = store.list();
            if trips.is_empty() {
                println!("No trips yet.");
            }
            for trip in &trips {
                println!("{}", render::trip_line(trip));
            }
        }
        Commands::Show { id } => match store.get_by_id(&id) {
            Some(trip) => print!("{}", render::render_trip(&trip)),
            None => anyhow::bail!("Trip not found: {}", id),
        },
        Commands::Plan(args) => {
            let record = TripPlan::from_input(args.into())
                .and_then(TripPlan::into_record)
                .context("Invalid trip")?;
            let id = record.id.clone();
            store.try_save(record).context("Failed to save trip")?;
            println!("{}", id);
        }
        Commands::Quote(args) => {
            let plan = TripPlan::from_input(args.into()).context("Invalid trip")?;
            let summary = plan.summary();
            println!(
                "€{} of €{}  {} {}%  {}",
                summary.total_cost.round(),
                plan.budget,
                render::budget_bar(&summary),
                summary.rounded_percent(),
                summary
            );
        }
        Commands::Note { id, text } => {
            let notes = (!text.is_empty()).then_some(text);
            store.try_set_notes(&id, notes)?;
        }
        Commands::PlaceNote { id, place, text } => {
            store.try_set_place_note(&id, &place, &text)?;
        }
        Commands::Rate { id, place, rating } => {
            store.try_set_place_rating(&id, &place, rating)?;
        }
        Commands::Delete { id } => {
            store.delete(&id);
        }
        Commands::Clear => store.clear(),
        Commands::Locations { query } => {
            for location in catalog::search_locations(&query) {
                println!("{}", location);
            }
        }
        Commands::Serve { .. } => anyhow::bail!("serve needs the async runtime"),
    }
    Ok(())
}
