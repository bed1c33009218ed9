pub mod country;
pub mod distance;

pub use country::{country_for_timezone, normalize_country_code};
pub use distance::{DistanceCalculator, EARTH_RADIUS_KM};
