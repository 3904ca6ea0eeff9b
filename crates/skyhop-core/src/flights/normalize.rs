use super::model::{Airline, FlightDesignator, FlightEndpoint, FlightRecord};
use super::raw::{RawEndpoint, RawFlight};
use serde_json::Value;

/// Maps a raw provider record onto the canonical `FlightRecord`.
///
/// Missing names and codes become empty strings, missing timestamps/terminal/gate become
/// `None`. The endpoint IATA codes fall back to the codes that were queried, since the
/// provider does not always echo them back.
pub fn normalize(raw: &RawFlight, fallback_origin: &str, fallback_destination: &str) -> FlightRecord {
    let airline = raw.airline.clone().unwrap_or_default();
    let flight = raw.flight.clone().unwrap_or_default();

    FlightRecord::new(
        raw.flight_date.clone().unwrap_or_default(),
        raw.flight_status.clone().unwrap_or_default(),
        endpoint(raw.departure.as_ref(), fallback_origin),
        endpoint(raw.arrival.as_ref(), fallback_destination),
        Airline {
            name: airline.name.unwrap_or_default(),
            iata_code: airline.iata.unwrap_or_default(),
        },
        FlightDesignator {
            number: flight.number.unwrap_or_default(),
            iata_code: flight.iata.unwrap_or_default(),
        },
    )
}

/// Same as [`normalize`] for an arbitrary JSON value.
pub fn normalize_value(raw: &Value, fallback_origin: &str, fallback_destination: &str) -> FlightRecord {
    normalize(&RawFlight::from_value(raw), fallback_origin, fallback_destination)
}

fn endpoint(raw: Option<&RawEndpoint>, fallback_iata: &str) -> FlightEndpoint {
    let Some(raw) = raw else {
        return FlightEndpoint::new("", fallback_iata, "");
    };

    let iata = raw
        .iata
        .as_deref()
        .filter(|code| !code.trim().is_empty())
        .unwrap_or(fallback_iata);

    FlightEndpoint::new(
        raw.airport.clone().unwrap_or_default(),
        iata,
        raw.scheduled.clone().unwrap_or_default(),
    )
    .with_estimated(raw.estimated.clone())
    .with_actual(raw.actual.clone())
    .with_terminal(raw.terminal.clone())
    .with_gate(raw.gate.clone())
}
