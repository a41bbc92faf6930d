pub mod geo;
pub mod pricing;
pub mod generator;

pub use geo::{Coordinate, GeoError, EARTH_RADIUS_KM};
pub use pricing::{PricingError, PricingRules, MAX_DELIVERY_DAYS, UNAVAILABLE_PRICE};
pub use generator::{QuoteEngine, QuoteError};
