use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tripplan::{
    Catalog, Place, TransportMode, TransportQuery, TravelInput, TripPlanConfig,
    api::AppState, call_ai_preference, generate_schedule_with_keywords, group_schedule_by_date,
    logging, web,
};

#[derive(Parser, Debug)]
#[command(
    name = "tripplan",
    version,
    about = "Plan a first travel day from a transport leg and your preferences"
)]
struct Cli {
    /// Path to a TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a schedule for a transport leg
    Plan {
        /// Transport id, e.g. ktx-001
        #[arg(long)]
        transport: String,

        /// Free-text preferences, e.g. "카페 좋아하고 조용한 곳 선호"
        #[arg(long, default_value = "")]
        preferences: String,

        /// Only consider places near the arrival location
        #[arg(long)]
        near_arrival: bool,

        /// Radius for --near-arrival (default from config)
        #[arg(long)]
        radius_km: Option<f64>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Search transport legs
    Transports {
        /// Departure city key or station name
        #[arg(long)]
        from: Option<String>,

        /// Arrival city key or station name
        #[arg(long)]
        to: Option<String>,

        /// Allowed modes (repeatable)
        #[arg(long)]
        mode: Vec<TransportMode>,

        /// Departure date, YYYY-MM-DD
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Maximum price in KRW
        #[arg(long)]
        budget: Option<u32>,

        /// Only released cancellation seats
        #[arg(long)]
        cancellable: bool,
    },

    /// List places, optionally around a city
    Places {
        /// City key or station name
        #[arg(long)]
        near: Option<String>,

        #[arg(long)]
        radius_km: Option<f64>,
    },

    /// Show the preference tags extracted from a text
    Keywords { text: String },

    /// Run the HTTP API
    Serve {
        #[arg(long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = TripPlanConfig::load_from_path(cli.config.clone())
        .context("Failed to load configuration")?;
    logging::init(&config.logging, cli.verbose)?;

    let catalog = Catalog::load(&config.data).context("Failed to load travel data")?;

    match cli.command {
        Command::Plan {
            transport,
            preferences,
            near_arrival,
            radius_km,
            json,
        } => {
            let radius = near_arrival
                .then(|| radius_km.unwrap_or(config.defaults.search_radius_km));
            plan(&catalog, &transport, &preferences, radius, json).await?;
        }

        Command::Transports {
            from,
            to,
            mode,
            date,
            budget,
            cancellable,
        } => {
            let query = TransportQuery {
                departure: from
                    .map(|city| catalog.resolve_city(&city).map(|l| l.name.clone()))
                    .transpose()?,
                arrival: to
                    .map(|city| catalog.resolve_city(&city).map(|l| l.name.clone()))
                    .transpose()?,
                modes: mode,
                date,
                max_price: budget,
                cancellable_only: cancellable,
            };
            let results = catalog.search_transports(&query);
            if results.is_empty() {
                println!("No transports found.");
            }
            for transport in results.iter().take(config.defaults.max_transport_results) {
                println!("{transport}");
            }
        }

        Command::Places { near, radius_km } => {
            let places: Vec<&Place> = match near {
                Some(city) => {
                    let center = catalog.resolve_city(&city)?;
                    catalog.places_near(
                        center,
                        radius_km.unwrap_or(config.defaults.search_radius_km),
                    )
                }
                None => catalog.places().iter().collect(),
            };
            for place in places {
                println!(
                    "[{}] {} ({:?}) - {}",
                    place.id,
                    place.name,
                    place.category,
                    place.tag_line()
                );
            }
        }

        Command::Keywords { text } => {
            let keywords = call_ai_preference(&text).await;
            if keywords.is_empty() {
                println!("No preference keywords recognised.");
            } else {
                println!("{}", keywords.join(", "));
            }
        }

        Command::Serve { port } => {
            if let Some(port) = port {
                config.server.port = port;
            }
            let state = AppState::new(catalog, config.defaults.clone());
            web::run(&config.server, state).await?;
        }
    }

    Ok(())
}

async fn plan(
    catalog: &Catalog,
    transport_id: &str,
    preferences: &str,
    radius_km: Option<f64>,
    json: bool,
) -> Result<()> {
    let transport = catalog
        .find_transport(transport_id)
        .with_context(|| format!("Unknown transport '{transport_id}'"))?;

    let input = TravelInput::for_transport(transport, preferences);
    let candidates: Vec<Place> = match radius_km {
        Some(radius) => catalog
            .places_near(&transport.arrival, radius)
            .into_iter()
            .cloned()
            .collect(),
        None => catalog.places().to_vec(),
    };

    let keywords = call_ai_preference(&input.preferences).await;
    let schedule = generate_schedule_with_keywords(&input, transport, &candidates, &keywords);
    let days = group_schedule_by_date(&schedule);

    if json {
        println!("{}", serde_json::to_string_pretty(&days)?);
        return Ok(());
    }

    println!("{transport}");
    if !keywords.is_empty() {
        println!("취향 키워드: {}", keywords.join(", "));
    }
    for (date, items) in &days {
        println!("\n📅 {date}");
        for item in items {
            println!("  {item}");
        }
    }
    Ok(())
}
