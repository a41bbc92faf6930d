use chrono::{DateTime, SubsecRound, Utc};
use courier_shared::{Order, OrderType, Shipment};
use crate::geo::{Coordinate, GeoError};
use crate::pricing::{PricingError, PricingRules, UNAVAILABLE_PRICE};

/// Turns shipment parameters into the fast/slow order pair
#[derive(Debug, Clone, Default)]
pub struct QuoteEngine {
    rules: PricingRules,
}

impl QuoteEngine {
    pub fn new(rules: PricingRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &PricingRules {
        &self.rules
    }

    /// Generate both offer variants, fast first
    pub fn generate(&self, shipment: &Shipment) -> Result<[Order; 2], QuoteError> {
        self.generate_at(shipment, Utc::now())
    }

    /// Same as `generate` with an explicit clock reading.
    /// Delivery dates are kept to whole seconds.
    pub fn generate_at(&self, shipment: &Shipment, now: DateTime<Utc>) -> Result<[Order; 2], QuoteError> {
        let now = now.trunc_subsecs(0);

        let distance = match self.route_distance(shipment) {
            Ok(km) => Some(km),
            Err(err) if !self.rules.strict_coordinates => {
                tracing::warn!("Quoting unavailable price: {}", err);
                None
            }
            Err(err) => return Err(err),
        };

        let fast = self.offer(shipment, OrderType::Fast, distance, now)?;
        let slow = self.offer(shipment, OrderType::Slow, distance, now)?;

        tracing::debug!(
            distance_km = ?distance,
            fast_price = fast.price,
            slow_price = slow.price,
            "Generated delivery offers"
        );

        Ok([fast, slow])
    }

    fn offer(
        &self,
        shipment: &Shipment,
        order_type: OrderType,
        distance: Option<f64>,
        now: DateTime<Utc>,
    ) -> Result<Order, QuoteError> {
        let price = distance
            .map(|km| self.rules.price(order_type, km, shipment.weight, shipment.volume))
            .unwrap_or(UNAVAILABLE_PRICE);
        let delivery_date = self.rules.delivery_date(order_type, now)?;
        Ok(Order::new(shipment, order_type, price, delivery_date))
    }

    fn route_distance(&self, shipment: &Shipment) -> Result<f64, QuoteError> {
        let parse = |input: &str| {
            input.parse::<Coordinate>().map_err(|source| QuoteError::GeoParse {
                input: input.to_string(),
                source,
            })
        };
        let from = parse(&shipment.from)?;
        let to = parse(&shipment.to)?;
        Ok(from.distance_km(&to))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum QuoteError {
    #[error("Invalid coordinates {input:?}: {source}")]
    GeoParse {
        input: String,
        #[source]
        source: GeoError,
    },

    #[error(transparent)]
    Pricing(#[from] PricingError),
}
