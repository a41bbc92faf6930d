use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;

/// Delivery speed of an offer
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum OrderType {
    #[serde(rename = "fast_Delivery")]
    Fast,
    #[serde(rename = "slow_Delivery")]
    Slow,
}

impl OrderType {
    /// Quotes are always returned in this order.
    pub const ALL: [OrderType; 2] = [OrderType::Fast, OrderType::Slow];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::Fast => "fast_Delivery",
            OrderType::Slow => "slow_Delivery",
        }
    }

    pub fn is_fast(&self) -> bool {
        matches!(self, OrderType::Fast)
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fast_Delivery" => Ok(OrderType::Fast),
            "slow_Delivery" => Ok(OrderType::Slow),
            other => Err(ParseEnumError { kind: "order type", value: other.to_string() }),
        }
    }
}

/// Order status in the lifecycle. The only transition is NotConfirmed → Confirmed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum OrderStatus {
    #[default]
    NotConfirmed,
    Confirmed,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::NotConfirmed => "NotConfirmed",
            OrderStatus::Confirmed => "Confirmed",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NotConfirmed" => Ok(OrderStatus::NotConfirmed),
            "Confirmed" => Ok(OrderStatus::Confirmed),
            other => Err(ParseEnumError { kind: "order status", value: other.to_string() }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

impl fmt::Display for ParseEnumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {}: {}", self.kind, self.value)
    }
}

impl std::error::Error for ParseEnumError {}

/// Shipment parameters supplied by the caller when asking for a quote.
///
/// `from` and `to` are `"lat,lon"` pairs in decimal degrees. `time` is the
/// ISO-8601 moment the parcel is ready; it is carried onto the orders as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Shipment {
    pub weight: f64,
    pub volume: f64,
    pub from: String,
    pub to: String,
    pub time: String,
}

impl Shipment {
    /// True when the caller supplied no signal at all.
    pub fn is_empty(&self) -> bool {
        self.weight == 0.0
            && self.volume == 0.0
            && self.from.is_empty()
            && self.to.is_empty()
            && self.time.is_empty()
    }
}

/// A persisted delivery order. One quote request yields two of these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: Uuid,
    pub weight: f64,
    pub volume: f64,
    pub from: String,
    pub to: String,
    pub time: String,
    pub price: f64,
    pub delivery_date: DateTime<Utc>,
    pub order_type: OrderType,
    pub order_status: OrderStatus,
}

impl Order {
    /// Create a pending order with a fresh identifier
    pub fn new(
        shipment: &Shipment,
        order_type: OrderType,
        price: f64,
        delivery_date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            weight: shipment.weight,
            volume: shipment.volume,
            from: shipment.from.clone(),
            to: shipment.to.clone(),
            time: shipment.time.clone(),
            price,
            delivery_date,
            order_type,
            order_status: OrderStatus::NotConfirmed,
        }
    }

    pub fn confirm(&mut self) {
        self.order_status = OrderStatus::Confirmed;
    }

    pub fn is_confirmed(&self) -> bool {
        self.order_status == OrderStatus::Confirmed
    }

    pub fn shipment(&self) -> Shipment {
        Shipment {
            weight: self.weight,
            volume: self.volume,
            from: self.from.clone(),
            to: self.to.clone(),
            time: self.time.clone(),
        }
    }
}

/// What the client sees of an order when choosing between offers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderOffer {
    pub id: Uuid,
    pub price: f64,
    pub delivery_date: DateTime<Utc>,
    pub order_type: OrderType,
}

impl From<&Order> for OrderOffer {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id,
            price: order.price,
            delivery_date: order.delivery_date,
            order_type: order.order_type,
        }
    }
}
