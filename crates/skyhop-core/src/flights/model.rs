use crate::timefmt::parse_provider_time;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// One side of a flight leg. Timestamps are kept exactly as the provider sent them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightEndpoint {
    airport_name: String,
    iata_code: String,
    scheduled_time: String,
    estimated_time: Option<String>,
    actual_time: Option<String>,
    terminal: Option<String>,
    gate: Option<String>,
}

impl FlightEndpoint {
    pub fn new(
        airport_name: impl Into<String>,
        iata_code: impl Into<String>,
        scheduled_time: impl Into<String>,
    ) -> Self {
        Self {
            airport_name: airport_name.into(),
            iata_code: iata_code.into(),
            scheduled_time: scheduled_time.into(),
            estimated_time: None,
            actual_time: None,
            terminal: None,
            gate: None,
        }
    }

    pub fn with_estimated(mut self, estimated: Option<String>) -> Self {
        self.estimated_time = estimated;
        self
    }

    pub fn with_actual(mut self, actual: Option<String>) -> Self {
        self.actual_time = actual;
        self
    }

    pub fn with_terminal(mut self, terminal: Option<String>) -> Self {
        self.terminal = terminal;
        self
    }

    pub fn with_gate(mut self, gate: Option<String>) -> Self {
        self.gate = gate;
        self
    }

    pub fn airport_name(&self) -> &str {
        &self.airport_name
    }

    pub fn iata_code(&self) -> &str {
        &self.iata_code
    }

    pub fn scheduled_time(&self) -> &str {
        &self.scheduled_time
    }

    pub fn estimated_time(&self) -> Option<&str> {
        self.estimated_time.as_deref()
    }

    pub fn actual_time(&self) -> Option<&str> {
        self.actual_time.as_deref()
    }

    pub fn terminal(&self) -> Option<&str> {
        self.terminal.as_deref()
    }

    pub fn gate(&self) -> Option<&str> {
        self.gate.as_deref()
    }

    /// Parsed scheduled time; `None` means "unknown".
    pub fn scheduled_at(&self) -> Option<DateTime<Utc>> {
        parse_provider_time(&self.scheduled_time)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Airline {
    pub name: String,
    pub iata_code: String,
}

/// Marketing flight designator, e.g. number "123" / iata "LO123".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightDesignator {
    pub number: String,
    pub iata_code: String,
}

/// Canonical flight record. Built once by the normalizer or the synthetic generator
/// and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightRecord {
    flight_date: String,
    flight_status: String,
    departure: FlightEndpoint,
    arrival: FlightEndpoint,
    airline: Airline,
    flight: FlightDesignator,
}

impl FlightRecord {
    pub fn new(
        flight_date: impl Into<String>,
        flight_status: impl Into<String>,
        departure: FlightEndpoint,
        arrival: FlightEndpoint,
        airline: Airline,
        flight: FlightDesignator,
    ) -> Self {
        Self {
            flight_date: flight_date.into(),
            flight_status: flight_status.into(),
            departure,
            arrival,
            airline,
            flight,
        }
    }

    pub fn flight_date(&self) -> &str {
        &self.flight_date
    }

    pub fn flight_status(&self) -> &str {
        &self.flight_status
    }

    pub fn departure(&self) -> &FlightEndpoint {
        &self.departure
    }

    pub fn arrival(&self) -> &FlightEndpoint {
        &self.arrival
    }

    pub fn airline(&self) -> &Airline {
        &self.airline
    }

    pub fn flight(&self) -> &FlightDesignator {
        &self.flight
    }

    pub fn departs_at(&self) -> Option<DateTime<Utc>> {
        self.departure.scheduled_at()
    }

    /// Scheduled block time, when both ends parse and arrival is not before departure.
    pub fn duration(&self) -> Option<Duration> {
        let dep = self.departure.scheduled_at()?;
        let arr = self.arrival.scheduled_at()?;
        let block = arr - dep;
        if block < Duration::zero() {
            None
        } else {
            Some(block)
        }
    }

    /// Short label for logs and chat replies, e.g. "LO267 LOT - Polish Airlines".
    pub fn label(&self) -> String {
        match (self.flight.iata_code.is_empty(), self.airline.name.is_empty()) {
            (false, false) => format!("{} {}", self.flight.iata_code, self.airline.name),
            (false, true) => self.flight.iata_code.clone(),
            (true, false) => self.airline.name.clone(),
            (true, true) => format!("{}-{}", self.departure.iata_code, self.arrival.iata_code),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlightSource {
    Live,
    Synthetic,
}

/// Which of the mutually exclusive lookup outcomes a `LookupResult` carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupOutcome {
    /// One or more upcoming flights in `flights`.
    Flights,
    /// No upcoming scheduled flight; a single best-effort record in `next_available_flight`.
    NextAvailable,
    /// Nothing to show; `error` says why.
    Unavailable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "LookupResultRepr")]
pub struct LookupResult {
    flights: Vec<FlightRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    next_available_flight: Option<FlightRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    source: FlightSource,
}

/// Wire shape; checked before it becomes a `LookupResult`.
#[derive(Deserialize)]
struct LookupResultRepr {
    #[serde(default)]
    flights: Vec<FlightRecord>,
    #[serde(default)]
    next_available_flight: Option<FlightRecord>,
    #[serde(default)]
    error: Option<String>,
    source: FlightSource,
}

impl TryFrom<LookupResultRepr> for LookupResult {
    type Error = String;

    fn try_from(repr: LookupResultRepr) -> Result<Self, Self::Error> {
        if !repr.flights.is_empty() && repr.next_available_flight.is_some() {
            return Err("flights and next_available_flight are mutually exclusive".into());
        }
        if repr.next_available_flight.is_some() && repr.source == FlightSource::Synthetic {
            return Err("next_available_flight is never synthetic".into());
        }
        Ok(Self {
            flights: repr.flights,
            next_available_flight: repr.next_available_flight,
            error: repr.error,
            source: repr.source,
        })
    }
}

impl LookupResult {
    /// Live upcoming flights, already filtered and sorted by the caller.
    pub fn upcoming(flights: Vec<FlightRecord>) -> Self {
        Self {
            flights,
            next_available_flight: None,
            error: None,
            source: FlightSource::Live,
        }
    }

    pub fn next_available(flight: FlightRecord) -> Self {
        Self {
            flights: Vec::new(),
            next_available_flight: Some(flight),
            error: None,
            source: FlightSource::Live,
        }
    }

    /// Generated placeholder flights, optionally annotated with an informational note.
    pub fn synthetic(flights: Vec<FlightRecord>, note: Option<String>) -> Self {
        Self {
            flights,
            next_available_flight: None,
            error: note,
            source: FlightSource::Synthetic,
        }
    }

    /// Nothing to show. `source` stays `Live`: no placeholder data was generated, the
    /// provider simply had nothing usable.
    pub fn unavailable(error: impl Into<String>) -> Self {
        Self {
            flights: Vec::new(),
            next_available_flight: None,
            error: Some(error.into()),
            source: FlightSource::Live,
        }
    }

    pub fn flights(&self) -> &[FlightRecord] {
        &self.flights
    }

    pub fn next_available_flight(&self) -> Option<&FlightRecord> {
        self.next_available_flight.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn source(&self) -> FlightSource {
        self.source
    }

    pub fn is_synthetic(&self) -> bool {
        self.source == FlightSource::Synthetic
    }

    pub fn outcome(&self) -> LookupOutcome {
        if !self.flights.is_empty() {
            LookupOutcome::Flights
        } else if self.next_available_flight.is_some() {
            LookupOutcome::NextAvailable
        } else {
            LookupOutcome::Unavailable
        }
    }

    /// Every record the caller should render, in display order.
    pub fn displayable(&self) -> Vec<&FlightRecord> {
        match &self.next_available_flight {
            Some(next) => vec![next],
            None => self.flights.iter().collect(),
        }
    }
}
