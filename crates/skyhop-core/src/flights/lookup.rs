//! Flight lookup with a fixed fallback ladder.
//!
//! 1. `Scheduled`: upcoming flights with `flight_status=scheduled`.
//! 2. `AnyStatus`: same route without the status filter; the nearest upcoming flight, or
//!    failing that the latest known one, becomes `next_available_flight`.
//! 3. `Synthetic`: generated placeholder flights.
//!
//! Every provider request goes out over HTTPS first and is repeated once over HTTP when the
//! secure attempt fails or the plan does not allow HTTPS. Provider-side failures never
//! surface as errors; they only move the lookup further down the ladder.

use super::model::{FlightRecord, LookupResult};
use super::normalize::normalize;
use super::raw::{ProviderError, ProviderPayload, RawFlight};
use super::synthetic;
use super::transport::{
    redact_access_key, HttpResponse, HttpTransport, ReqwestTransport, Scheme, TransportError,
};
use crate::clock::{Clock, SystemClock};
use crate::config::{LookupConfig, API_KEY_ENV};
use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use reqwest::Url;
use std::fmt;

const FLIGHTS_PATH: &str = "/v1/flights";
const STATUS_SCHEDULED: &str = "scheduled";

/// Why the ladder skipped ahead to synthetic flights.
#[derive(Debug, Clone, PartialEq)]
pub enum FallbackReason {
    MissingApiKey,
    Transport(String),
    HttpStatus(u16),
    Provider(ProviderError),
    Malformed(String),
    Request(String),
    NoResults,
}

impl FallbackReason {
    /// Note shown to the user alongside synthetic flights. Only misconfiguration gets one;
    /// transient failures are silent.
    pub fn note(&self) -> Option<String> {
        match self {
            FallbackReason::MissingApiKey => Some(format!(
                "AviationStack API key not configured. Set {} to see live flights; showing sample flights instead.",
                API_KEY_ENV
            )),
            FallbackReason::Provider(err) if err.is_misconfiguration() => Some(format!(
                "AviationStack rejected the API key ({}); showing sample flights instead.",
                if err.message.is_empty() { &err.code } else { &err.message }
            )),
            _ => None,
        }
    }
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FallbackReason::MissingApiKey => write!(f, "API key not configured"),
            FallbackReason::Transport(e) => write!(f, "transport failure: {}", e),
            FallbackReason::HttpStatus(code) => write!(f, "provider returned HTTP {}", code),
            FallbackReason::Provider(err) => write!(f, "provider error {}: {}", err.code, err.message),
            FallbackReason::Malformed(e) => write!(f, "malformed provider response: {}", e),
            FallbackReason::Request(e) => write!(f, "could not build provider request: {}", e),
            FallbackReason::NoResults => write!(f, "provider returned no flights for this route"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Strategy {
    Scheduled,
    AnyStatus,
    Synthetic,
}

const LADDER: [Strategy; 3] = [Strategy::Scheduled, Strategy::AnyStatus, Strategy::Synthetic];

enum Step {
    Resolved(LookupResult),
    /// Try the next strategy in the ladder.
    Continue,
    /// Skip straight to synthetic flights.
    Degrade(FallbackReason),
}

/// Outcome of a single request over one scheme.
enum Attempt {
    Flights(Vec<RawFlight>),
    RetryInsecure(FallbackReason),
    Failed(FallbackReason),
}

struct Route {
    origin: String,
    destination: String,
    now: DateTime<Utc>,
}

pub struct FlightLookupService {
    config: LookupConfig,
    transport: Box<dyn HttpTransport>,
    clock: Box<dyn Clock>,
}

impl FlightLookupService {
    /// Service backed by `reqwest` and the system clock.
    pub fn new(config: LookupConfig) -> Result<Self, TransportError> {
        let transport = ReqwestTransport::new(config.timeout)?;
        Ok(Self::with_parts(config, transport, SystemClock))
    }

    pub fn with_parts(
        config: LookupConfig,
        transport: impl HttpTransport + 'static,
        clock: impl Clock + 'static,
    ) -> Self {
        Self {
            config,
            transport: Box::new(transport),
            clock: Box::new(clock),
        }
    }

    pub fn config(&self) -> &LookupConfig {
        &self.config
    }

    /// Looks up flights from `origin` to `destination` (IATA codes, any case).
    /// Always returns a renderable result.
    pub fn lookup(&self, origin: &str, destination: &str) -> LookupResult {
        let route = Route {
            origin: origin.trim().to_uppercase(),
            destination: destination.trim().to_uppercase(),
            now: self.clock.now(),
        };
        info!(
            "Looking up flights — origin={} destination={} now={}",
            route.origin,
            route.destination,
            route.now.to_rfc3339()
        );

        let mut degraded: Option<FallbackReason> = None;
        for strategy in LADDER {
            if degraded.is_some() && strategy != Strategy::Synthetic {
                continue;
            }
            match self.run(strategy, &route, degraded.as_ref()) {
                Step::Resolved(result) => {
                    info!(
                        "Lookup resolved — strategy={:?} outcome={:?} flights={} source={:?}",
                        strategy,
                        result.outcome(),
                        result.flights().len(),
                        result.source()
                    );
                    return result;
                }
                Step::Continue => {
                    debug!("Strategy {:?} found nothing usable, broadening", strategy);
                }
                Step::Degrade(reason) => {
                    warn!(
                        "Falling back to synthetic flights — strategy={:?} reason={}",
                        strategy, reason
                    );
                    degraded = Some(reason);
                }
            }
        }

        // Synthetic always resolves; reaching this means the ladder above was edited.
        LookupResult::unavailable("no lookup strategy produced a result")
    }

    fn run(&self, strategy: Strategy, route: &Route, degraded: Option<&FallbackReason>) -> Step {
        match strategy {
            Strategy::Scheduled => self.scheduled(route),
            Strategy::AnyStatus => self.any_status(route),
            Strategy::Synthetic => self.synthetic(route, degraded),
        }
    }

    fn scheduled(&self, route: &Route) -> Step {
        let raw = match self.fetch(route, Some(STATUS_SCHEDULED)) {
            Ok(raw) => raw,
            Err(reason) => return Step::Degrade(reason),
        };
        let total = raw.len();

        let mut upcoming: Vec<(DateTime<Utc>, FlightRecord)> = raw
            .iter()
            .map(|r| normalize(r, &route.origin, &route.destination))
            .filter_map(|record| match record.departs_at() {
                Some(at) if at > route.now => Some((at, record)),
                _ => {
                    debug!(
                        "Dropping non-upcoming flight — flight={} scheduled='{}'",
                        record.label(),
                        record.departure().scheduled_time()
                    );
                    None
                }
            })
            .collect();
        upcoming.sort_by_key(|(at, _)| *at);

        info!(
            "Scheduled query — total={} upcoming={}",
            total,
            upcoming.len()
        );

        if upcoming.is_empty() {
            Step::Continue
        } else {
            Step::Resolved(LookupResult::upcoming(
                upcoming.into_iter().map(|(_, record)| record).collect(),
            ))
        }
    }

    fn any_status(&self, route: &Route) -> Step {
        let raw = match self.fetch(route, None) {
            Ok(raw) => raw,
            Err(reason) => return Step::Degrade(reason),
        };
        let ordered = chronological(
            raw.iter()
                .map(|r| normalize(r, &route.origin, &route.destination))
                .collect(),
        );

        let upcoming = ordered
            .iter()
            .find(|(at, _)| at.map_or(false, |at| at > route.now));
        if let Some((_, record)) = upcoming {
            info!("Nearest upcoming flight on any status — flight={}", record.label());
            return Step::Resolved(LookupResult::next_available(record.clone()));
        }

        // Nothing ahead of us: the latest flight we know about is the best reference.
        let latest = ordered
            .iter()
            .rev()
            .find(|(at, _)| at.is_some())
            .or_else(|| ordered.last());
        match latest {
            Some((_, record)) => {
                info!("No upcoming flight; returning latest known — flight={}", record.label());
                Step::Resolved(LookupResult::next_available(record.clone()))
            }
            None => Step::Degrade(FallbackReason::NoResults),
        }
    }

    fn synthetic(&self, route: &Route, degraded: Option<&FallbackReason>) -> Step {
        let reason = degraded.cloned().unwrap_or(FallbackReason::NoResults);
        if !self.config.synthetic_fallback {
            return Step::Resolved(LookupResult::unavailable(format!(
                "No flight data available: {}",
                reason
            )));
        }

        let mut rng = match self.config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let flights = synthetic::generate(&route.origin, &route.destination, route.now, &mut rng);
        Step::Resolved(LookupResult::synthetic(flights, reason.note()))
    }

    /// Issues the query over HTTPS, then once more over HTTP if the secure attempt failed.
    fn fetch(&self, route: &Route, status: Option<&str>) -> Result<Vec<RawFlight>, FallbackReason> {
        let key = self.config.api_key().ok_or(FallbackReason::MissingApiKey)?;

        match self.attempt(Scheme::Https, key, route, status) {
            Attempt::Flights(flights) => Ok(flights),
            Attempt::Failed(reason) => Err(reason),
            Attempt::RetryInsecure(reason) => {
                warn!("HTTPS request failed, retrying over HTTP — reason={}", reason);
                match self.attempt(Scheme::Http, key, route, status) {
                    Attempt::Flights(flights) => Ok(flights),
                    Attempt::Failed(reason) | Attempt::RetryInsecure(reason) => Err(reason),
                }
            }
        }
    }

    fn attempt(&self, scheme: Scheme, key: &str, route: &Route, status: Option<&str>) -> Attempt {
        let url = match self.request_url(scheme, key, route, status) {
            Ok(url) => url,
            Err(e) => return Attempt::Failed(FallbackReason::Request(e)),
        };
        info!("Querying flight provider — url={}", redact_access_key(&url));

        let response = match self.transport.get(&url) {
            Ok(response) => response,
            Err(e) => return Attempt::RetryInsecure(FallbackReason::Transport(e.to_string())),
        };
        classify(response)
    }

    fn request_url(
        &self,
        scheme: Scheme,
        key: &str,
        route: &Route,
        status: Option<&str>,
    ) -> Result<Url, String> {
        let base = format!("{}://{}{}", scheme, self.config.host.trim(), FLIGHTS_PATH);
        let mut params = vec![
            ("access_key", key),
            ("dep_iata", route.origin.as_str()),
            ("arr_iata", route.destination.as_str()),
        ];
        if let Some(status) = status {
            params.push(("flight_status", status));
        }
        Url::parse_with_params(&base, &params).map_err(|e| e.to_string())
    }
}

fn classify(response: HttpResponse) -> Attempt {
    if response.status == HttpResponse::UPGRADE_REQUIRED {
        return Attempt::RetryInsecure(FallbackReason::HttpStatus(response.status));
    }

    match ProviderPayload::parse(&response.body) {
        Ok(ProviderPayload::Error(err)) if err.requires_insecure_transport() => {
            Attempt::RetryInsecure(FallbackReason::Provider(err))
        }
        Ok(ProviderPayload::Error(err)) => Attempt::Failed(FallbackReason::Provider(err)),
        Ok(ProviderPayload::Data(flights)) if response.is_success() => Attempt::Flights(flights),
        Ok(ProviderPayload::Data(_)) => Attempt::Failed(FallbackReason::HttpStatus(response.status)),
        Err(_) if !response.is_success() => {
            Attempt::Failed(FallbackReason::HttpStatus(response.status))
        }
        Err(e) => Attempt::Failed(FallbackReason::Malformed(e.to_string())),
    }
}

/// Ascending by departure; records whose time cannot be parsed go last, in input order.
fn chronological(records: Vec<FlightRecord>) -> Vec<(Option<DateTime<Utc>>, FlightRecord)> {
    let mut keyed: Vec<_> = records.into_iter().map(|r| (r.departs_at(), r)).collect();
    keyed.sort_by_key(|(at, _)| (at.is_none(), *at));
    keyed
}
