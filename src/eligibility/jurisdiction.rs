use serde::{Deserialize, Serialize};
use crate::geo::normalize_country_code;

/// EU member states (ISO 3166 alpha-3)
pub const EU_MEMBER_STATES: [&str; 27] = [
    "AUT", "BEL", "BGR", "HRV", "CYP", "CZE", "DNK", "EST", "FIN", "FRA",
    "DEU", "GRC", "HUN", "IRL", "ITA", "LVA", "LTU", "LUX", "MLT", "NLD",
    "POL", "PRT", "ROU", "SVK", "SVN", "ESP", "SWE",
];

pub const UK_COUNTRIES: [&str; 1] = ["GBR"];

/// Countries involved in a single flight
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    #[serde(default)]
    pub departure_country: String,
    #[serde(default)]
    pub arrival_country: String,
    #[serde(default)]
    pub airline_country: String,
}

impl Route {
    pub fn new(departure_country: &str, arrival_country: &str, airline_country: &str) -> Self {
        Self {
            departure_country: departure_country.to_string(),
            arrival_country: arrival_country.to_string(),
            airline_country: airline_country.to_string(),
        }
    }

    /// Names of the route fields that are blank
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.departure_country.trim().is_empty() {
            missing.push("departureCountry");
        }
        if self.arrival_country.trim().is_empty() {
            missing.push("arrivalCountry");
        }
        if self.airline_country.trim().is_empty() {
            missing.push("airlineCountry");
        }
        missing
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Jurisdiction {
    Eu,
    Uk,
}

impl Jurisdiction {
    pub fn members(&self) -> &'static [&'static str] {
        match self {
            Jurisdiction::Eu => &EU_MEMBER_STATES,
            Jurisdiction::Uk => &UK_COUNTRIES,
        }
    }

    pub fn contains(&self, country: &str) -> bool {
        let code = normalize_country_code(country);
        self.members().iter().any(|member| *member == code)
    }

    /// A flight is covered when it departs from the jurisdiction, or when both
    /// the destination and the operating carrier belong to it
    pub fn covers(&self, route: &Route) -> bool {
        self.contains(&route.departure_country)
            || (self.contains(&route.arrival_country) && self.contains(&route.airline_country))
    }
}

pub fn is_eu_flight(route: &Route) -> bool {
    Jurisdiction::Eu.covers(route)
}

pub fn is_uk_flight(route: &Route) -> bool {
    Jurisdiction::Uk.covers(route)
}

/// Compensation regulation applied to a claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Regulation {
    #[serde(rename = "EU261")]
    Eu261,
    #[serde(rename = "UK261")]
    Uk261,
}

impl Regulation {
    /// UK261 takes precedence; every other route is labelled EU261
    pub fn for_route(route: &Route) -> Self {
        if is_uk_flight(route) {
            Regulation::Uk261
        } else {
            Regulation::Eu261
        }
    }

    pub fn currency(&self) -> &'static str {
        match self {
            Regulation::Eu261 => "EUR",
            Regulation::Uk261 => "GBP",
        }
    }
}

impl std::fmt::Display for Regulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Regulation::Eu261 => write!(f, "EU261"),
            Regulation::Uk261 => write!(f, "UK261"),
        }
    }
}

impl std::str::FromStr for Regulation {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "EU261" => Ok(Regulation::Eu261),
            "UK261" => Ok(Regulation::Uk261),
            other => Err(format!("unknown regulation: {}", other)),
        }
    }
}
