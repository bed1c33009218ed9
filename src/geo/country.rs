/// ISO 3166 alpha-2 to alpha-3 pairs for the countries the rules care about
const ALPHA2_TO_ALPHA3: &[(&str, &str)] = &[
    ("AT", "AUT"), ("BE", "BEL"), ("BG", "BGR"), ("HR", "HRV"), ("CY", "CYP"),
    ("CZ", "CZE"), ("DK", "DNK"), ("EE", "EST"), ("FI", "FIN"), ("FR", "FRA"),
    ("DE", "DEU"), ("GR", "GRC"), ("HU", "HUN"), ("IE", "IRL"), ("IT", "ITA"),
    ("LV", "LVA"), ("LT", "LTU"), ("LU", "LUX"), ("MT", "MLT"), ("NL", "NLD"),
    ("PL", "POL"), ("PT", "PRT"), ("RO", "ROU"), ("SK", "SVK"), ("SI", "SVN"),
    ("ES", "ESP"), ("SE", "SWE"), ("GB", "GBR"), ("US", "USA"), ("CA", "CAN"),
    ("CH", "CHE"), ("NO", "NOR"), ("IS", "ISL"), ("TR", "TUR"), ("AE", "ARE"),
    ("QA", "QAT"), ("JP", "JPN"), ("CN", "CHN"), ("IN", "IND"), ("AU", "AUS"),
    ("BR", "BRA"), ("MX", "MEX"), ("MA", "MAR"), ("EG", "EGY"), ("ZA", "ZAF"),
    ("SG", "SGP"), ("TH", "THA"),
];

/// IANA timezone to alpha-3 country, used when airport metadata lacks a country
const TIMEZONE_COUNTRY: &[(&str, &str)] = &[
    ("Europe/Vienna", "AUT"),
    ("Europe/Brussels", "BEL"),
    ("Europe/Sofia", "BGR"),
    ("Europe/Zagreb", "HRV"),
    ("Asia/Nicosia", "CYP"),
    ("Europe/Nicosia", "CYP"),
    ("Europe/Prague", "CZE"),
    ("Europe/Copenhagen", "DNK"),
    ("Europe/Tallinn", "EST"),
    ("Europe/Helsinki", "FIN"),
    ("Europe/Paris", "FRA"),
    ("Europe/Berlin", "DEU"),
    ("Europe/Athens", "GRC"),
    ("Europe/Budapest", "HUN"),
    ("Europe/Dublin", "IRL"),
    ("Europe/Rome", "ITA"),
    ("Europe/Riga", "LVA"),
    ("Europe/Vilnius", "LTU"),
    ("Europe/Luxembourg", "LUX"),
    ("Europe/Malta", "MLT"),
    ("Europe/Amsterdam", "NLD"),
    ("Europe/Warsaw", "POL"),
    ("Europe/Lisbon", "PRT"),
    ("Atlantic/Azores", "PRT"),
    ("Atlantic/Madeira", "PRT"),
    ("Europe/Bucharest", "ROU"),
    ("Europe/Bratislava", "SVK"),
    ("Europe/Ljubljana", "SVN"),
    ("Europe/Madrid", "ESP"),
    ("Atlantic/Canary", "ESP"),
    ("Europe/Stockholm", "SWE"),
    ("Europe/London", "GBR"),
    ("Europe/Zurich", "CHE"),
    ("Europe/Oslo", "NOR"),
    ("Atlantic/Reykjavik", "ISL"),
    ("Europe/Istanbul", "TUR"),
    ("America/New_York", "USA"),
    ("America/Chicago", "USA"),
    ("America/Denver", "USA"),
    ("America/Los_Angeles", "USA"),
    ("America/Anchorage", "USA"),
    ("Pacific/Honolulu", "USA"),
    ("America/Toronto", "CAN"),
    ("America/Vancouver", "CAN"),
    ("America/Mexico_City", "MEX"),
    ("America/Sao_Paulo", "BRA"),
    ("Asia/Dubai", "ARE"),
    ("Asia/Qatar", "QAT"),
    ("Asia/Tokyo", "JPN"),
    ("Asia/Shanghai", "CHN"),
    ("Asia/Kolkata", "IND"),
    ("Asia/Singapore", "SGP"),
    ("Asia/Bangkok", "THA"),
    ("Australia/Sydney", "AUS"),
    ("Africa/Casablanca", "MAR"),
    ("Africa/Cairo", "EGY"),
    ("Africa/Johannesburg", "ZAF"),
];

/// Normalize a country code to upper-case alpha-3
///
/// Alpha-2 codes with a known alpha-3 counterpart are converted; anything
/// else is returned trimmed and upper-cased.
pub fn normalize_country_code(code: &str) -> String {
    let upper = code.trim().to_ascii_uppercase();
    if upper.len() == 2 {
        if let Some((_, alpha3)) = ALPHA2_TO_ALPHA3.iter().find(|(alpha2, _)| *alpha2 == upper) {
            return alpha3.to_string();
        }
    }
    upper
}

/// Look up the country for an IANA timezone name
pub fn country_for_timezone(timezone: &str) -> Option<&'static str> {
    let timezone = timezone.trim();
    TIMEZONE_COUNTRY
        .iter()
        .find(|(tz, _)| tz.eq_ignore_ascii_case(timezone))
        .map(|(_, country)| *country)
}
