use super::model::{Airline, FlightDesignator, FlightEndpoint, FlightRecord};
use crate::airports;
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use rand::seq::SliceRandom;
use rand::Rng;

pub const MIN_FLIGHTS: usize = 3;
pub const MAX_FLIGHTS: usize = 5;

/// Spacing between consecutive synthetic departures.
const DEPARTURE_SPACING_HOURS: i64 = 3;
/// Jitter stays below the spacing so departures remain strictly increasing.
const MAX_JITTER_MINUTES: i64 = 45;
const MIN_BLOCK_MINUTES: i64 = 2 * 60;
const MAX_BLOCK_MINUTES: i64 = 8 * 60;

/// (airline name, airline IATA)
const CARRIERS: &[(&str, &str)] = &[
    ("LOT - Polish Airlines", "LO"),
    ("KLM", "KL"),
    ("Lufthansa", "LH"),
    ("Air France", "AF"),
    ("British Airways", "BA"),
    ("Emirates", "EK"),
    ("Delta Air Lines", "DL"),
    ("United Airlines", "UA"),
];

const TERMINALS: &[&str] = &["1", "2", "3", "A", "B"];

/// Generates 3 to 5 placeholder flights for the pair, all "scheduled" and all departing
/// strictly after `now`, in ascending departure order.
pub fn generate<R: Rng + ?Sized>(
    origin: &str,
    destination: &str,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Vec<FlightRecord> {
    let count = rng.gen_range(MIN_FLIGHTS..=MAX_FLIGHTS);
    let origin_name = airports::display_name(origin);
    let destination_name = airports::display_name(destination);

    (0..count)
        .map(|i| {
            let jitter = Duration::minutes(rng.gen_range(0..=MAX_JITTER_MINUTES));
            let departs = now + Duration::hours(DEPARTURE_SPACING_HOURS * (i as i64 + 1)) + jitter;
            let arrives = departs + Duration::minutes(rng.gen_range(MIN_BLOCK_MINUTES..=MAX_BLOCK_MINUTES));

            let (airline_name, airline_iata) = *CARRIERS.choose(rng).unwrap_or(&CARRIERS[0]);
            let number = rng.gen_range(100..=9999).to_string();

            let departure = FlightEndpoint::new(origin_name.clone(), origin, timestamp(departs))
                .with_terminal(pick_terminal(rng))
                .with_gate(Some(gate(rng)));
            let arrival = FlightEndpoint::new(destination_name.clone(), destination, timestamp(arrives))
                .with_terminal(pick_terminal(rng));

            FlightRecord::new(
                departs.format("%Y-%m-%d").to_string(),
                "scheduled",
                departure,
                arrival,
                Airline {
                    name: airline_name.to_string(),
                    iata_code: airline_iata.to_string(),
                },
                FlightDesignator {
                    iata_code: format!("{}{}", airline_iata, number),
                    number,
                },
            )
        })
        .collect()
}

fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, false)
}

fn pick_terminal<R: Rng + ?Sized>(rng: &mut R) -> Option<String> {
    TERMINALS.choose(rng).map(|t| t.to_string())
}

fn gate<R: Rng + ?Sized>(rng: &mut R) -> String {
    let pier = ['A', 'B', 'C', 'D'][rng.gen_range(0..4)];
    format!("{}{}", pier, rng.gen_range(1..=40))
}
