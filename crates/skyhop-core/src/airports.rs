//! Static reference table of major airports, used to name endpoints and resolve free text.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Airport {
    pub iata: &'static str,
    pub name: &'static str,
    pub city: &'static str,
    pub country: &'static str,
    pub country_code: &'static str,
    pub latitude: f64,
    pub longitude: f64,
    pub operational: bool,
    pub closure_reason: Option<&'static str>,
}

const WAR_CLOSURE: &str = "Closed since February 2022 due to the ongoing war";

const fn airport(
    iata: &'static str,
    name: &'static str,
    city: &'static str,
    country: &'static str,
    country_code: &'static str,
    latitude: f64,
    longitude: f64,
) -> Airport {
    Airport {
        iata,
        name,
        city,
        country,
        country_code,
        latitude,
        longitude,
        operational: true,
        closure_reason: None,
    }
}

const fn closed(
    iata: &'static str,
    name: &'static str,
    city: &'static str,
    country: &'static str,
    country_code: &'static str,
    latitude: f64,
    longitude: f64,
) -> Airport {
    Airport {
        iata,
        name,
        city,
        country,
        country_code,
        latitude,
        longitude,
        operational: false,
        closure_reason: Some(WAR_CLOSURE),
    }
}

pub static MAJOR_AIRPORTS: &[Airport] = &[
    airport("JFK", "John F. Kennedy International", "New York", "United States", "US", 40.6413, -73.7781),
    airport("LAX", "Los Angeles International", "Los Angeles", "United States", "US", 33.9425, -118.4081),
    airport("ORD", "O'Hare International", "Chicago", "United States", "US", 41.9742, -87.9073),
    airport("LHR", "Heathrow", "London", "United Kingdom", "GB", 51.4700, -0.4543),
    airport("CDG", "Charles de Gaulle", "Paris", "France", "FR", 49.0097, 2.5479),
    airport("FRA", "Frankfurt Airport", "Frankfurt", "Germany", "DE", 50.0379, 8.5622),
    airport("AMS", "Schiphol", "Amsterdam", "Netherlands", "NL", 52.3105, 4.7683),
    airport("DXB", "Dubai International", "Dubai", "UAE", "AE", 25.2532, 55.3657),
    airport("SIN", "Changi", "Singapore", "Singapore", "SG", 1.3644, 103.9915),
    airport("HKG", "Hong Kong International", "Hong Kong", "China", "HK", 22.3080, 113.9185),
    airport("NRT", "Narita International", "Tokyo", "Japan", "JP", 35.7720, 140.3929),
    airport("HND", "Haneda", "Tokyo", "Japan", "JP", 35.5494, 139.7798),
    airport("ICN", "Incheon International", "Seoul", "South Korea", "KR", 37.4602, 126.4407),
    airport("PEK", "Beijing Capital", "Beijing", "China", "CN", 40.0799, 116.6031),
    airport("PVG", "Pudong International", "Shanghai", "China", "CN", 31.1443, 121.8083),
    airport("SYD", "Sydney Airport", "Sydney", "Australia", "AU", -33.9399, 151.1753),
    airport("MEL", "Melbourne Airport", "Melbourne", "Australia", "AU", -37.6690, 144.8410),
    airport("WAW", "Warsaw Chopin", "Warsaw", "Poland", "PL", 52.1657, 20.9671),
    closed("KBP", "Boryspil International", "Kyiv", "Ukraine", "UA", 50.3450, 30.8947),
    closed("IEV", "Kyiv Zhuliany", "Kyiv", "Ukraine", "UA", 50.4019, 30.4519),
    closed("LWO", "Lviv Danylo Halytskyi", "Lviv", "Ukraine", "UA", 49.8125, 23.9561),
    closed("ODS", "Odesa International", "Odesa", "Ukraine", "UA", 46.4268, 30.6765),
    airport("IST", "Istanbul Airport", "Istanbul", "Turkey", "TR", 41.2753, 28.7519),
    airport("DOH", "Hamad International", "Doha", "Qatar", "QA", 25.2731, 51.6081),
    airport("GRU", "Guarulhos International", "São Paulo", "Brazil", "BR", -23.4356, -46.4731),
    airport("EZE", "Ministro Pistarini", "Buenos Aires", "Argentina", "AR", -34.8222, -58.5358),
    airport("MEX", "Mexico City International", "Mexico City", "Mexico", "MX", 19.4363, -99.0721),
    airport("YYZ", "Toronto Pearson", "Toronto", "Canada", "CA", 43.6777, -79.6248),
    airport("YVR", "Vancouver International", "Vancouver", "Canada", "CA", 49.1967, -123.1815),
    airport("MUC", "Munich Airport", "Munich", "Germany", "DE", 48.3537, 11.7750),
    airport("FCO", "Leonardo da Vinci–Fiumicino", "Rome", "Italy", "IT", 41.8003, 12.2389),
    airport("MAD", "Adolfo Suárez Madrid–Barajas", "Madrid", "Spain", "ES", 40.4983, -3.5676),
    airport("BCN", "Barcelona–El Prat", "Barcelona", "Spain", "ES", 41.2974, 2.0833),
    airport("ZRH", "Zurich Airport", "Zurich", "Switzerland", "CH", 47.4647, 8.5492),
    airport("VIE", "Vienna International", "Vienna", "Austria", "AT", 48.1103, 16.5697),
    airport("CPH", "Copenhagen Airport", "Copenhagen", "Denmark", "DK", 55.6180, 12.6508),
    airport("ARN", "Stockholm Arlanda", "Stockholm", "Sweden", "SE", 59.6519, 17.9186),
    airport("OSL", "Oslo Gardermoen", "Oslo", "Norway", "NO", 60.1939, 11.1004),
    airport("HEL", "Helsinki-Vantaa", "Helsinki", "Finland", "FI", 60.3172, 24.9633),
    airport("DUB", "Dublin Airport", "Dublin", "Ireland", "IE", 53.4264, -6.2499),
    airport("BRU", "Brussels Airport", "Brussels", "Belgium", "BE", 50.9014, 4.4844),
    airport("LIS", "Lisbon Airport", "Lisbon", "Portugal", "PT", 38.7756, -9.1354),
    airport("ATH", "Athens International", "Athens", "Greece", "GR", 37.9364, 23.9445),
    airport("PRG", "Václav Havel Airport", "Prague", "Czech Republic", "CZ", 50.1008, 14.2600),
    airport("BUD", "Budapest Ferenc Liszt", "Budapest", "Hungary", "HU", 47.4298, 19.2611),
    airport("DEL", "Indira Gandhi International", "New Delhi", "India", "IN", 28.5562, 77.1000),
    airport("BOM", "Chhatrapati Shivaji Maharaj", "Mumbai", "India", "IN", 19.0896, 72.8656),
    airport("BKK", "Suvarnabhumi", "Bangkok", "Thailand", "TH", 13.6900, 100.7501),
    airport("KUL", "Kuala Lumpur International", "Kuala Lumpur", "Malaysia", "MY", 2.7456, 101.7099),
    airport("CGK", "Soekarno-Hatta", "Jakarta", "Indonesia", "ID", -6.1256, 106.6559),
    airport("MNL", "Ninoy Aquino International", "Manila", "Philippines", "PH", 14.5086, 121.0194),
    airport("JNB", "O.R. Tambo International", "Johannesburg", "South Africa", "ZA", -26.1392, 28.2460),
    airport("CAI", "Cairo International", "Cairo", "Egypt", "EG", 30.1219, 31.4056),
];

/// Airports that must not be offered for flights, including some outside `MAJOR_AIRPORTS`.
static CLOSED_AIRPORT_NOTES: &[(&str, &str)] = &[
    ("KBP", "Boryspil International - Closed since February 2022 due to the ongoing war in Ukraine. Ukrainian airspace remains closed to civilian traffic."),
    ("IEV", "Kyiv Zhuliany - Closed since February 2022 due to the ongoing war in Ukraine."),
    ("ODS", "Odesa International - Closed since February 2022 due to the ongoing war in Ukraine."),
    ("HRK", "Kharkiv International - Closed since February 2022 due to the ongoing war in Ukraine."),
    ("DNK", "Dnipro International - Closed since February 2022 due to the ongoing war in Ukraine."),
    ("LWO", "Lviv Danylo Halytskyi - Closed since February 2022 due to the ongoing war in Ukraine."),
];

pub fn find_by_iata(iata: &str) -> Option<&'static Airport> {
    let code = iata.trim();
    MAJOR_AIRPORTS
        .iter()
        .find(|a| a.iata.eq_ignore_ascii_case(code))
}

/// Case-insensitive substring match on the city name.
pub fn find_by_city(city: &str) -> Vec<&'static Airport> {
    let needle = city.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    MAJOR_AIRPORTS
        .iter()
        .filter(|a| a.city.to_lowercase().contains(&needle))
        .collect()
}

/// Case-insensitive substring match on the country name.
pub fn find_by_country(country: &str) -> Vec<&'static Airport> {
    let needle = country.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    MAJOR_AIRPORTS
        .iter()
        .filter(|a| a.country.to_lowercase().contains(&needle))
        .collect()
}

pub fn closed_airport_note(iata: &str) -> Option<&'static str> {
    let code = iata.trim();
    CLOSED_AIRPORT_NOTES
        .iter()
        .find(|(c, _)| c.eq_ignore_ascii_case(code))
        .map(|(_, note)| *note)
}

/// Display name for an endpoint: table name when known, otherwise "<CODE> Airport".
pub fn display_name(iata: &str) -> String {
    match find_by_iata(iata) {
        Some(a) => a.name.to_string(),
        None => format!("{} Airport", iata.trim().to_uppercase()),
    }
}
