use std::sync::Arc;
use courier_order::OrderManager;

#[derive(Clone)]
pub struct AppState {
    pub orders: Arc<OrderManager>,
}

impl AppState {
    pub fn new(orders: OrderManager) -> Self {
        Self { orders: Arc::new(orders) }
    }
}
