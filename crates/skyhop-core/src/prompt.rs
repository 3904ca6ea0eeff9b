use crate::airports;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Origin/destination IATA codes pulled out of a free-text request such as
/// "next flight from Warsaw to Amsterdam?".
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RoutePrompt {
    pub origin: Option<String>,
    pub destination: Option<String>,
}

// Words that end a location phrase: "from waw to ams tomorrow", "to jfk on friday", ...
const STOP: &str = r"(?:\s+\b(?:on|at|tomorrow|today|tonight|now|next|this|for|please|departing|leaving)\b|[.?!,;(]|$)";

impl RoutePrompt {
    pub fn parse(input: &str) -> Self {
        let mut prompt = RoutePrompt::default();
        let text = input.to_lowercase();

        // 1. "from X to Y"
        static FROM_TO_RE: OnceLock<Regex> = OnceLock::new();
        let from_to_re = FROM_TO_RE.get_or_init(|| {
            Regex::new(&format!(r"\bfrom\s+(.+?)\s+\bto\b\s+(.+?){}", STOP)).unwrap()
        });
        if let Some(caps) = from_to_re.captures(&text) {
            prompt.origin = resolve_location(&caps[1]);
            prompt.destination = resolve_location(&caps[2]);
            return prompt;
        }

        // 2. "X to Y", with leading filler such as "find flights" or "next flight"
        static BARE_RE: OnceLock<Regex> = OnceLock::new();
        let bare_re = BARE_RE.get_or_init(|| {
            Regex::new(&format!(
                r"^\s*(?:(?:find|show|search|any|cheap|next|the|a|me)\s+)*(?:flights?\s+)?(.+?)\s+\bto\b\s+(.+?){}",
                STOP
            ))
            .unwrap()
        });
        if let Some(caps) = bare_re.captures(&text) {
            let origin = caps[1].trim();
            // "flights to X" leaves a filler word as origin
            if !matches!(origin, "flight" | "flights" | "fly" | "going") {
                prompt.origin = resolve_location(origin);
            }
            prompt.destination = resolve_location(&caps[2]);
            return prompt;
        }

        // 3. "flights from X" (origin picked on the map, no destination yet)
        static FROM_RE: OnceLock<Regex> = OnceLock::new();
        let from_re =
            FROM_RE.get_or_init(|| Regex::new(&format!(r"\bfrom\s+(.+?){}", STOP)).unwrap());
        if let Some(caps) = from_re.captures(&text) {
            prompt.origin = resolve_location(&caps[1]);
        }

        prompt
    }

    pub fn is_complete(&self) -> bool {
        self.origin.is_some() && self.destination.is_some()
    }
}

/// Resolves a location phrase to an IATA code: known code, then city, then airport name,
/// then any bare three-letter word.
fn resolve_location(phrase: &str) -> Option<String> {
    let cleaned = phrase
        .split('(')
        .next()
        .unwrap_or_default()
        .trim()
        .trim_end_matches(" international airport")
        .trim_end_matches(" airport")
        .trim();
    if cleaned.is_empty() {
        return None;
    }

    if let Some(a) = airports::find_by_iata(cleaned) {
        return Some(a.iata.to_string());
    }

    if let Some(a) = airports::MAJOR_AIRPORTS
        .iter()
        .filter(|a| a.operational)
        .find(|a| a.city.eq_ignore_ascii_case(cleaned))
    {
        return Some(a.iata.to_string());
    }

    if cleaned.len() > 3 {
        let by_name = airports::MAJOR_AIRPORTS
            .iter()
            .filter(|a| a.operational)
            .find(|a| {
                a.city.to_lowercase().contains(cleaned) || a.name.to_lowercase().contains(cleaned)
            });
        if let Some(a) = by_name {
            return Some(a.iata.to_string());
        }
    }

    if cleaned.len() == 3 && cleaned.chars().all(|c| c.is_ascii_alphabetic()) {
        return Some(cleaned.to_uppercase());
    }

    None
}
