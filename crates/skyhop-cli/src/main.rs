// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use anyhow::{bail, Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode};
use skyhop_core::airports::{self, Airport};
use skyhop_core::prompt::RoutePrompt;
use skyhop_core::timefmt::{format_duration, format_flight_date, format_flight_time};
use skyhop_core::{FlightLookupService, FlightRecord, LookupConfig, LookupOutcome, LookupResult};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// AviationStack access key
    #[arg(long, env = "AVIATIONSTACK_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Config file (defaults to config.json in the user config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Provider request timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Seed for sample flights, for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// Report an error instead of showing sample flights when live data is unavailable
    #[arg(long)]
    no_synthetic: bool,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find the next flights between two airports (IATA codes)
    Lookup { origin: String, destination: String },
    /// Ask in plain words, e.g. "next flight from Warsaw to Amsterdam"
    Ask {
        #[arg(required = true, trailing_var_arg = true)]
        text: Vec<String>,
    },
    /// List known airports, optionally filtered
    Airports {
        #[arg(long)]
        city: Option<String>,
        #[arg(long)]
        country: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match &cli.command {
        Commands::Lookup {
            origin,
            destination,
        } => {
            let service = build_service(&cli)?;
            let result = service.lookup(origin, destination);
            print_result(&result, cli.json)?;
        }
        Commands::Ask { text } => {
            let text = text.join(" ");
            let route = RoutePrompt::parse(&text);
            for code in [&route.origin, &route.destination].into_iter().flatten() {
                if let Some(note) = airports::closed_airport_note(code) {
                    eprintln!("Warning: {}", note);
                }
            }
            let (Some(origin), Some(destination)) = (&route.origin, &route.destination) else {
                bail!(
                    "Could not work out both airports from '{}'. Try \"from WAW to AMS\".",
                    text
                );
            };
            log::info!("Resolved prompt — origin={} destination={}", origin, destination);

            let service = build_service(&cli)?;
            let result = service.lookup(origin, destination);
            print_result(&result, cli.json)?;
        }
        Commands::Airports { city, country } => {
            let list: Vec<&Airport> = match (city, country) {
                (Some(city), _) => airports::find_by_city(city),
                (None, Some(country)) => airports::find_by_country(country),
                (None, None) => airports::MAJOR_AIRPORTS.iter().collect(),
            };
            if list.is_empty() {
                println!("No airports found.");
            }
            for a in list {
                let status = if a.operational { "   " } else { "[X]" };
                println!("{} {}  {} ({}, {})", status, a.iata, a.name, a.city, a.country);
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    let config = ConfigBuilder::new()
        .add_filter_allow_str("skyhop")
        .build();
    // Logging is best effort; a second init (or no terminal) is not fatal.
    let _ = TermLogger::init(level, config, TerminalMode::Stderr, ColorChoice::Auto);
}

fn build_service(cli: &Cli) -> Result<FlightLookupService> {
    let mut config = match &cli.config {
        Some(path) => {
            let mut c = LookupConfig::load(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?;
            c.apply_env();
            c
        }
        None => LookupConfig::load_default(),
    };

    if let Some(key) = &cli.api_key {
        config.api_key = Some(key.clone());
    }
    if let Some(secs) = cli.timeout_secs {
        config.timeout = Duration::from_secs(secs);
    }
    if cli.seed.is_some() {
        config.rng_seed = cli.seed;
    }
    if cli.no_synthetic {
        config.synthetic_fallback = false;
    }
    config.validate()?;

    Ok(FlightLookupService::new(config)?)
}

fn print_result(result: &LookupResult, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
        return Ok(());
    }

    match result.outcome() {
        LookupOutcome::Flights => {
            if result.is_synthetic() {
                println!("Sample flights (live data unavailable):");
            } else {
                println!("Upcoming flights:");
            }
        }
        LookupOutcome::NextAvailable => {
            println!("No scheduled flights found. Next available flight:");
        }
        LookupOutcome::Unavailable => {
            bail!(
                "{}",
                result.error().unwrap_or("No flight data available for this route")
            );
        }
    }

    for record in result.displayable() {
        print_card(record);
    }
    if let (LookupOutcome::Flights, Some(note)) = (result.outcome(), result.error()) {
        println!();
        println!("Note: {}", note);
    }
    Ok(())
}

fn print_card(record: &FlightRecord) {
    let dep = record.departure();
    let arr = record.arrival();
    let tz = Local;

    println!();
    println!("{}  [{}]", record.label(), record.flight_status());
    println!(
        "  {} {:<28} {} {}",
        dep.iata_code(),
        dep.airport_name(),
        format_flight_date(dep.scheduled_time(), &tz),
        format_flight_time(dep.scheduled_time(), &tz)
    );
    println!(
        "  {} {:<28} {} {}",
        arr.iata_code(),
        arr.airport_name(),
        format_flight_date(arr.scheduled_time(), &tz),
        format_flight_time(arr.scheduled_time(), &tz)
    );

    let mut extras = Vec::new();
    if let Some(t) = dep.terminal() {
        extras.push(format!("Terminal {}", t));
    }
    if let Some(g) = dep.gate() {
        extras.push(format!("Gate {}", g));
    }
    if let Some(d) = record.duration() {
        extras.push(format_duration(d));
    }
    if !extras.is_empty() {
        println!("  {}", extras.join(" · "));
    }
}
