pub mod manager;
pub mod memory;

pub use manager::{OrderError, OrderManager, CONFIRMED};
pub use memory::InMemoryOrderRepository;
