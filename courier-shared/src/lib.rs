pub mod models;

pub use models::order::{Order, OrderOffer, OrderStatus, OrderType, ParseEnumError, Shipment};
