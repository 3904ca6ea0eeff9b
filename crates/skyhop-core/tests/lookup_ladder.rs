#[cfg(test)]
mod tests {
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use reqwest::Url;
    use serde_json::{json, Value};
    use skyhop_core::flights::transport::{HttpResponse, HttpTransport, Scheme, TransportError};
    use skyhop_core::{FixedClock, FlightLookupService, FlightSource, LookupConfig, LookupOutcome};
    use std::sync::{Arc, Mutex};

    type Responder =
        dyn Fn(Scheme, Option<&str>) -> Result<HttpResponse, TransportError> + Send + Sync;

    /// Answers by scheme and `flight_status` and records every URL requested.
    struct ScriptedTransport {
        responder: Box<Responder>,
        calls: Arc<Mutex<Vec<Url>>>,
    }

    impl HttpTransport for ScriptedTransport {
        fn get(&self, url: &Url) -> Result<HttpResponse, TransportError> {
            self.calls.lock().unwrap().push(url.clone());
            let scheme = if url.scheme() == "https" {
                Scheme::Https
            } else {
                Scheme::Http
            };
            let status = url
                .query_pairs()
                .find(|(k, _)| k == "flight_status")
                .map(|(_, v)| v.into_owned());
            (self.responder)(scheme, status.as_deref())
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 9, 0, 0).unwrap()
    }

    fn at(offset: Duration) -> String {
        (now() + offset).to_rfc3339()
    }

    fn flight(number: &str, status: &str, departs: &str) -> Value {
        json!({
            "flight_date": "2026-10-19",
            "flight_status": status,
            "departure": { "airport": "Warsaw Chopin", "iata": "WAW", "scheduled": departs, "terminal": "A" },
            "arrival": { "airport": "Schiphol", "iata": "AMS", "scheduled": "" },
            "airline": { "name": "KLM", "iata": "KL" },
            "flight": { "number": number, "iata": format!("KL{}", number) }
        })
    }

    fn data(flights: Vec<Value>) -> Result<HttpResponse, TransportError> {
        Ok(HttpResponse::ok(json!({ "data": flights }).to_string()))
    }

    fn provider_error(status: u16, code: &str) -> Result<HttpResponse, TransportError> {
        Ok(HttpResponse::new(
            status,
            json!({ "error": { "code": code, "message": format!("{} happened", code) } }).to_string(),
        ))
    }

    fn config() -> LookupConfig {
        LookupConfig {
            rng_seed: Some(7),
            ..LookupConfig::default()
        }
        .with_api_key("secret-key")
    }

    fn service<F>(config: LookupConfig, responder: F) -> (FlightLookupService, Arc<Mutex<Vec<Url>>>)
    where
        F: Fn(Scheme, Option<&str>) -> Result<HttpResponse, TransportError> + Send + Sync + 'static,
    {
        let _ = simplelog::TestLogger::init(simplelog::LevelFilter::Debug, simplelog::Config::default());
        let calls = Arc::new(Mutex::new(Vec::new()));
        let transport = ScriptedTransport {
            responder: Box::new(responder),
            calls: Arc::clone(&calls),
        };
        (
            FlightLookupService::with_parts(config, transport, FixedClock(now())),
            calls,
        )
    }

    fn numbers(flights: &[skyhop_core::FlightRecord]) -> Vec<String> {
        flights.iter().map(|f| f.flight().number.clone()).collect()
    }

    fn assert_synthetic(result: &skyhop_core::LookupResult) {
        assert_eq!(result.source(), FlightSource::Synthetic);
        assert!((3..=5).contains(&result.flights().len()));
        assert!(result.next_available_flight().is_none());
        for f in result.flights() {
            assert_eq!(f.departure().iata_code(), "WAW");
            assert_eq!(f.arrival().iata_code(), "AMS");
            assert!(f.departs_at().unwrap() > now());
        }
    }

    #[test]
    fn test_scheduled_flights_upcoming_and_sorted() {
        let (svc, calls) = service(config(), |_, status| {
            assert_eq!(status, Some("scheduled"));
            data(vec![
                flight("2", "scheduled", &at(Duration::hours(26))),
                flight("1", "scheduled", &at(Duration::hours(2))),
                flight("0", "scheduled", &at(Duration::hours(-1))),
                flight("9", "scheduled", "not a time"),
            ])
        });

        let result = svc.lookup("waw", " ams ");
        assert_eq!(result.outcome(), LookupOutcome::Flights);
        assert_eq!(result.source(), FlightSource::Live);
        assert_eq!(numbers(result.flights()), vec!["1", "2"]);
        assert!(result.error().is_none());

        let calls = calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].scheme(), "https");
        assert_eq!(calls[0].host_str(), Some("api.aviationstack.com"));
        assert_eq!(calls[0].path(), "/v1/flights");
        let query: Vec<(String, String)> = calls[0].query_pairs().into_owned().collect();
        assert!(query.contains(&("access_key".into(), "secret-key".into())));
        assert!(query.contains(&("dep_iata".into(), "WAW".into())));
        assert!(query.contains(&("arr_iata".into(), "AMS".into())));
    }

    #[test]
    fn test_next_available_from_any_status_query() {
        let (svc, calls) = service(config(), |_, status| match status {
            Some(_) => data(vec![flight("1", "scheduled", &at(Duration::hours(-3)))]),
            None => data(vec![
                flight("7", "active", &at(Duration::hours(8))),
                flight("5", "active", &at(Duration::hours(5))),
                flight("3", "landed", &at(Duration::hours(-2))),
            ]),
        });

        let result = svc.lookup("WAW", "AMS");
        assert_eq!(result.outcome(), LookupOutcome::NextAvailable);
        assert!(result.flights().is_empty());
        let next = result.next_available_flight().unwrap();
        assert_eq!(next.flight().number, "5");
        assert_eq!(next.flight_status(), "active");

        let calls = calls.lock().unwrap();
        assert_eq!(calls.len(), 2);
        assert!(calls[1].query_pairs().all(|(k, _)| k != "flight_status"));
    }

    #[test]
    fn test_latest_known_when_nothing_upcoming() {
        let (svc, _) = service(config(), |_, status| match status {
            Some(_) => data(vec![]),
            None => data(vec![
                flight("1", "landed", &at(Duration::hours(-6))),
                flight("2", "landed", "garbage"),
                flight("3", "landed", &at(Duration::hours(-1))),
            ]),
        });

        let result = svc.lookup("WAW", "AMS");
        assert_eq!(result.outcome(), LookupOutcome::NextAvailable);
        assert_eq!(result.next_available_flight().unwrap().flight().number, "3");
        assert_eq!(result.source(), FlightSource::Live);
    }

    #[test]
    fn test_missing_key_goes_synthetic_without_network() {
        let (svc, calls) = service(LookupConfig::default(), |_, _| {
            panic!("no request expected without an API key")
        });

        let result = svc.lookup("WAW", "AMS");
        assert_synthetic(&result);
        assert!(result.error().unwrap().contains("AVIATIONSTACK_API_KEY"));
        assert!(calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_http_retry_matches_direct_success() {
        let body = vec![
            flight("2", "scheduled", &at(Duration::hours(4))),
            flight("1", "scheduled", &at(Duration::hours(2))),
        ];

        let direct_body = body.clone();
        let (direct, _) = service(config(), move |_, _| data(direct_body.clone()));

        let (retried, calls) = service(config(), move |scheme, _| match scheme {
            Scheme::Https => Err(TransportError::Network("connection reset".into())),
            Scheme::Http => data(body.clone()),
        });

        let a = direct.lookup("WAW", "AMS");
        let b = retried.lookup("WAW", "AMS");
        assert_eq!(a, b);
        assert_eq!(numbers(b.flights()), vec!["1", "2"]);

        let schemes: Vec<String> = calls
            .lock()
            .unwrap()
            .iter()
            .map(|u| u.scheme().to_string())
            .collect();
        assert_eq!(schemes, vec!["https", "http"]);
    }

    #[test]
    fn test_upgrade_required_and_https_restriction_retry_over_http() {
        for https_reply in [
            Ok(HttpResponse::new(426, "")),
            provider_error(403, "https_access_restricted"),
        ] {
            let https_reply = Arc::new(Mutex::new(Some(https_reply)));
            let (svc, calls) = service(config(), move |scheme, _| match scheme {
                Scheme::Https => https_reply.lock().unwrap().take().unwrap(),
                Scheme::Http => data(vec![flight("1", "scheduled", &at(Duration::hours(3)))]),
            });

            let result = svc.lookup("WAW", "AMS");
            assert_eq!(result.outcome(), LookupOutcome::Flights);
            assert_eq!(result.source(), FlightSource::Live);
            assert_eq!(calls.lock().unwrap().len(), 2);
        }
    }

    #[test]
    fn test_both_schemes_failing_goes_synthetic_silently() {
        let (svc, calls) = service(config(), |_, _| {
            Err(TransportError::Timeout("timed out".into()))
        });

        let result = svc.lookup("WAW", "AMS");
        assert_synthetic(&result);
        assert!(result.error().is_none());
        // One HTTPS and one HTTP attempt; the any-status query is never issued.
        assert_eq!(calls.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_usage_limit_goes_synthetic_without_retry() {
        let (svc, calls) = service(config(), |_, _| provider_error(429, "usage_limit_reached"));

        let result = svc.lookup("WAW", "AMS");
        assert_synthetic(&result);
        assert!(result.error().is_none());
        assert_eq!(calls.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_invalid_key_goes_synthetic_with_note() {
        let (svc, _) = service(config(), |_, _| provider_error(401, "invalid_access_key"));

        let result = svc.lookup("WAW", "AMS");
        assert_synthetic(&result);
        assert!(result.error().unwrap().contains("invalid_access_key happened"));
    }

    #[test]
    fn test_malformed_json_goes_synthetic() {
        let (svc, _) = service(config(), |_, _| Ok(HttpResponse::ok("<html>gateway</html>")));

        let result = svc.lookup("WAW", "AMS");
        assert_synthetic(&result);
        assert!(result.error().is_none());
    }

    #[test]
    fn test_empty_data_everywhere_goes_synthetic() {
        let (svc, calls) = service(config(), |_, _| data(vec![]));

        let result = svc.lookup("WAW", "AMS");
        assert_synthetic(&result);
        assert_eq!(calls.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_synthetic_disabled_reports_unavailable() {
        let config = LookupConfig {
            synthetic_fallback: false,
            ..config()
        };
        let (svc, _) = service(config, |_, _| data(vec![]));

        let result = svc.lookup("WAW", "AMS");
        assert_eq!(result.outcome(), LookupOutcome::Unavailable);
        assert!(result.flights().is_empty());
        assert!(result.next_available_flight().is_none());
        assert!(result.error().is_some());
    }

    #[test]
    fn test_seeded_synthetic_is_deterministic() {
        let cfg = LookupConfig {
            rng_seed: Some(99),
            ..LookupConfig::default()
        };
        let (a, _) = service(cfg.clone(), |_, _| panic!("keyless lookup must not hit the network"));
        let (b, _) = service(cfg, |_, _| panic!("keyless lookup must not hit the network"));
        assert_eq!(a.lookup("WAW", "AMS"), b.lookup("WAW", "AMS"));
        assert_eq!(a.config().rng_seed, Some(99));
    }
}
