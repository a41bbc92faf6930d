use serde::Deserialize;
use chrono::{DateTime, TimeDelta, Utc};
use courier_shared::OrderType;

/// Price reported for both offers when coordinates cannot be read and
/// strict checking is off.
pub const UNAVAILABLE_PRICE: f64 = -1.0;

/// Longest delivery window a tariff may configure
pub const MAX_DELIVERY_DAYS: i64 = 3650;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PricingError {
    #[error("delivery days for {order_type} must be between 0 and {max}, got {days}", max = MAX_DELIVERY_DAYS)]
    DeliveryDays { order_type: OrderType, days: i64 },

    #[error("{field} must be a finite number, got {value}")]
    NotFinite { field: &'static str, value: f64 },

    #[error("delivery date {days} days after {now} is out of range")]
    DateOutOfRange { days: i64, now: DateTime<Utc> },
}

/// Tariff for the two delivery speeds. Missing fields take the default tariff.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PricingRules {
    /// Flat surcharge added to fast deliveries
    pub fast_surcharge: f64,

    /// Price per cubic meter
    pub volume_factor: f64,

    pub fast_delivery_days: i64,
    pub slow_delivery_days: i64,

    /// Reject unreadable coordinates instead of quoting `UNAVAILABLE_PRICE`
    pub strict_coordinates: bool,
}

impl Default for PricingRules {
    fn default() -> Self {
        Self {
            fast_surcharge: 500.0,
            volume_factor: 2.0,
            fast_delivery_days: 5,
            slow_delivery_days: 7,
            strict_coordinates: true,
        }
    }
}

fn to_cents(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}

impl PricingRules {
    pub fn validate(&self) -> Result<(), PricingError> {
        for (field, value) in [("fast_surcharge", self.fast_surcharge), ("volume_factor", self.volume_factor)] {
            if !value.is_finite() {
                return Err(PricingError::NotFinite { field, value });
            }
        }
        for order_type in OrderType::ALL {
            let days = self.delivery_days(order_type);
            if !(0..=MAX_DELIVERY_DAYS).contains(&days) {
                return Err(PricingError::DeliveryDays { order_type, days });
            }
        }
        Ok(())
    }

    /// Price in cents: distance + weight + volume_factor × volume, rounded
    /// once, plus the surcharge for fast deliveries. Both speeds share the
    /// rounded base, so they differ by exactly the surcharge.
    pub fn price_cents(&self, order_type: OrderType, distance_km: f64, weight: f64, volume: f64) -> i64 {
        let base = to_cents(distance_km + weight + self.volume_factor * volume);
        if order_type.is_fast() {
            base.saturating_add(to_cents(self.fast_surcharge))
        } else {
            base
        }
    }

    pub fn price(&self, order_type: OrderType, distance_km: f64, weight: f64, volume: f64) -> f64 {
        self.price_cents(order_type, distance_km, weight, volume) as f64 / 100.0
    }

    pub fn delivery_days(&self, order_type: OrderType) -> i64 {
        if order_type.is_fast() { self.fast_delivery_days } else { self.slow_delivery_days }
    }

    pub fn delivery_date(&self, order_type: OrderType, now: DateTime<Utc>) -> Result<DateTime<Utc>, PricingError> {
        let days = self.delivery_days(order_type);
        TimeDelta::try_days(days)
            .and_then(|delta| now.checked_add_signed(delta))
            .ok_or(PricingError::DateOutOfRange { days, now })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fast_costs_surcharge_more() {
        let rules = PricingRules::default();
        let cases = [
            (0.0, 0.0, 0.0),
            (1234.5, 3.25, 0.75),
            (10.0, -4.0, -1.0),
            (15989.062768317896, 0.1, 0.2),
            (78.62866465, 0.3, 0.7),
        ];
        for (distance, weight, volume) in cases {
            let fast = rules.price_cents(OrderType::Fast, distance, weight, volume);
            let slow = rules.price_cents(OrderType::Slow, distance, weight, volume);
            assert_eq!(fast - slow, 50_000);

            let gap = rules.price(OrderType::Fast, distance, weight, volume)
                - rules.price(OrderType::Slow, distance, weight, volume);
            assert!((gap - 500.0).abs() < 1e-9, "gap {gap} for {distance}");
        }
    }

    #[test]
    fn test_price_formula() {
        let rules = PricingRules::default();
        assert_eq!(rules.price(OrderType::Fast, 0.0, 10.0, 5.0), 520.0);
        assert_eq!(rules.price(OrderType::Slow, 0.0, 10.0, 5.0), 20.0);
        assert_eq!(rules.price(OrderType::Slow, 100.0, 1.0, 0.5), 102.0);
    }

    #[test]
    fn test_price_is_rounded_to_cents() {
        let rules = PricingRules::default();
        assert_eq!(rules.price_cents(OrderType::Slow, 343.5178, 0.0, 0.0), 34352);
        assert_eq!(rules.price(OrderType::Slow, 343.5178, 0.0, 0.0), 343.52);
        assert_eq!(rules.price(OrderType::Fast, 343.5178, 0.0, 0.0), 843.52);
    }

    #[test]
    fn test_delivery_dates() {
        let rules = PricingRules::default();
        let now = Utc::now();
        assert_eq!(rules.delivery_date(OrderType::Fast, now).unwrap() - now, TimeDelta::days(5));
        assert_eq!(rules.delivery_date(OrderType::Slow, now).unwrap() - now, TimeDelta::days(7));
    }

    #[test]
    fn test_huge_delivery_days_do_not_panic() {
        let rules = PricingRules { fast_delivery_days: i64::MAX / 1000, ..Default::default() };
        let err = rules.delivery_date(OrderType::Fast, Utc::now()).unwrap_err();
        assert!(matches!(err, PricingError::DateOutOfRange { .. }));
        assert!(rules.delivery_date(OrderType::Slow, Utc::now()).is_ok());
    }

    #[test]
    fn test_validate() {
        assert_eq!(PricingRules::default().validate(), Ok(()));

        let negative = PricingRules { slow_delivery_days: -1, ..Default::default() };
        assert_eq!(
            negative.validate(),
            Err(PricingError::DeliveryDays { order_type: OrderType::Slow, days: -1 })
        );

        let huge = PricingRules { fast_delivery_days: MAX_DELIVERY_DAYS + 1, ..Default::default() };
        assert!(matches!(huge.validate(), Err(PricingError::DeliveryDays { order_type: OrderType::Fast, .. })));

        let nan = PricingRules { volume_factor: f64::NAN, ..Default::default() };
        assert!(matches!(nan.validate(), Err(PricingError::NotFinite { field: "volume_factor", .. })));
    }
}
