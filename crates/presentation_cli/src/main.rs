//! walkwise CLI
//!
//! Command-line access to a running walkwise server.

#![allow(clippy::print_stdout)]

mod api;

use std::time::Duration;

use api::{AmenityVisit, ApiClient, LatLng, ScoreBody, parse_amenity_visit, parse_lat_lng};
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::Value;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// walkwise CLI
#[derive(Parser)]
#[command(name = "walkwise-cli")]
#[command(author, version, about = "Walking commutes and weekly walking scores", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Server URL
    #[arg(
        short,
        long,
        global = true,
        env = "WALKWISE_URL",
        default_value = "http://localhost:3000"
    )]
    url: String,

    /// Request timeout in seconds
    #[arg(long, global = true, default_value = "120")]
    timeout: u64,

    /// Print the raw JSON response
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check server health (exit code 1 when unhealthy)
    Health,

    /// Compare walking directly with walking to and from transit
    ///
    /// Example: walkwise-cli commute 42.2808,-83.7430 42.2411,-83.6130
    Commute {
        /// Start as `lat,lng`
        #[arg(value_parser = parse_lat_lng, allow_hyphen_values = true)]
        from: LatLng,

        /// Destination as `lat,lng`
        #[arg(value_parser = parse_lat_lng, allow_hyphen_values = true)]
        to: LatLng,

        /// Transit stop search radius in metres
        #[arg(short, long)]
        radius: Option<u32>,
    },

    /// Weekly walking score
    ///
    /// Example: walkwise-cli score 42.2808,-83.7430 --work 42.2411,-83.6130 -a gym:2 -a park
    Score {
        /// Home as `lat,lng`
        #[arg(value_parser = parse_lat_lng, allow_hyphen_values = true)]
        home: LatLng,

        /// Work as `lat,lng`
        #[arg(long, value_parser = parse_lat_lng, allow_hyphen_values = true)]
        work: Option<LatLng>,

        /// Commute days per week
        #[arg(long, default_value = "5")]
        work_days: u32,

        /// How the commute is made
        #[arg(long, value_enum, default_value_t = CommuteMode::Transit)]
        mode: CommuteMode,

        /// Amenity trips as `type` or `type:visits_per_week` (repeatable)
        #[arg(short, long = "amenity", value_parser = parse_amenity_visit)]
        amenities: Vec<AmenityVisit>,
    },

    /// Transit stops near a point
    Stops {
        /// Location as `lat,lng`
        #[arg(value_parser = parse_lat_lng, allow_hyphen_values = true)]
        location: LatLng,

        /// Search radius in metres
        #[arg(short, long)]
        radius: Option<u32>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum CommuteMode {
    Transit,
    Walk,
}

impl CommuteMode {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Transit => "transit",
            Self::Walk => "walk",
        }
    }
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(log_filter_from_verbosity(
            cli.verbose,
        )))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let client = ApiClient::new(&cli.url, Duration::from_secs(cli.timeout))?;

    match cli.command {
        Commands::Health => match client.health().await {
            Ok(body) => {
                if cli.json {
                    print_json(&body)?;
                } else {
                    println!(
                        "✅ Healthy (v{})",
                        body.get("version").and_then(Value::as_str).unwrap_or("?")
                    );
                    println!("   Precise routing: {}", flag(&body, "precise_routing"));
                    println!("   Transit itineraries: {}", flag(&body, "itinerary"));
                }
            },
            Err(e) => {
                println!("❌ Unhealthy: {e:#}");
                std::process::exit(1);
            },
        },

        Commands::Commute { from, to, radius } => {
            let body = client.commute(from, to, radius).await?;
            if cli.json {
                print_json(&body)?;
            } else {
                print_commute(&body);
            }
        },

        Commands::Score {
            home,
            work,
            work_days,
            mode,
            amenities,
        } => {
            let request = ScoreBody {
                home,
                work,
                work_days_per_week: work_days,
                commute_mode: mode.as_str().to_string(),
                amenities,
            };
            let body = client.score(&request).await?;
            if cli.json {
                print_json(&body)?;
            } else {
                print_score(&body);
            }
        },

        Commands::Stops { location, radius } => {
            let body = client.stops(location, radius).await?;
            if cli.json {
                print_json(&body)?;
            } else {
                print_stops(&body);
            }
        },
    }

    Ok(())
}

fn print_json(body: &Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(body)?);
    Ok(())
}

fn flag(body: &Value, key: &str) -> &'static str {
    if body.get(key).and_then(Value::as_bool).unwrap_or(false) {
        "on"
    } else {
        "off"
    }
}

fn number(body: &Value, key: &str) -> f64 {
    body.get(key).and_then(Value::as_f64).unwrap_or(0.0)
}

fn text<'a>(body: &'a Value, key: &str) -> &'a str {
    body.get(key).and_then(Value::as_str).unwrap_or("?")
}

fn leg_line(leg: &Value) -> String {
    format!(
        "{} ({}) {:.2} km, {:.1} min",
        text(leg, "stop_name"),
        text(leg, "stop_type"),
        number(leg, "distance_km"),
        number(leg, "duration_min")
    )
}

fn print_commute(body: &Value) {
    match text(body, "mode") {
        "transit" => {
            println!("🚌 Walk + transit");
            if let Some(leg) = body.get("home_to_transit").filter(|v| !v.is_null()) {
                println!("   Start → {}", leg_line(leg));
            }
            if let Some(walks) = body.get("transfer_walks").and_then(Value::as_array) {
                for walk in walks {
                    println!("   Transfer → {}", leg_line(walk));
                }
            }
            if let Some(leg) = body.get("transit_to_work").filter(|v| !v.is_null()) {
                println!("   {} → destination", leg_line(leg));
            }
        },
        _ => println!("🚶 Walk directly"),
    }
    println!(
        "   Walking: {:.1} min / {:.2} km (direct walk {:.1} min / {:.2} km)",
        number(body, "total_walk_min"),
        number(body, "total_walk_km"),
        number(body, "direct_walk_min"),
        number(body, "direct_walk_km")
    );
}

fn print_score(body: &Value) {
    println!("🏅 Grade {}", text(body, "grade"));
    println!(
        "   {:.1} min/week, {:.0} kcal/week, {:.1}% of the 150 min guideline",
        number(body, "total_weekly_walk_min"),
        number(body, "total_weekly_calories"),
        number(body, "who_guideline_pct")
    );
    if let Some(items) = body.get("breakdown").and_then(Value::as_array) {
        for item in items {
            println!(
                "   • {}: {:.2} km, {:.1} min one way, {}×/week = {:.1} min",
                text(item, "label"),
                number(item, "distance_km"),
                number(item, "one_way_min"),
                item.get("round_trips_per_week")
                    .and_then(Value::as_u64)
                    .unwrap_or(0),
                number(item, "weekly_minutes")
            );
        }
    }
}

fn print_stops(body: &Value) {
    let stops = body
        .get("stops")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();
    if stops.is_empty() {
        println!("No transit stops nearby");
        return;
    }
    for stop in stops {
        println!(
            "🚏 {} ({}) {:.0} m",
            text(stop, "name"),
            text(stop, "type"),
            number(stop, "distance_m")
        );
    }
}
