use std::sync::Arc;
use uuid::Uuid;
use courier_core::repository::{OrderRepository, RepositoryError};
use courier_quote::{QuoteEngine, QuoteError};
use courier_shared::{Order, OrderOffer, Shipment};

/// Result reported for a successful confirmation
pub const CONFIRMED: &str = "OK";

/// Runs the quote → persist → confirm workflow against an order store
pub struct OrderManager {
    repo: Arc<dyn OrderRepository>,
    engine: QuoteEngine,
}

impl OrderManager {
    pub fn new(repo: Arc<dyn OrderRepository>, engine: QuoteEngine) -> Self {
        Self { repo, engine }
    }

    pub fn repository(&self) -> &Arc<dyn OrderRepository> {
        &self.repo
    }

    /// Quote a shipment and persist both offers as pending orders.
    ///
    /// The two orders are written in one batch, so a storage failure leaves
    /// neither behind. Offers come back fast first.
    pub async fn get_offers(&self, shipment: Shipment) -> Result<Vec<OrderOffer>, OrderError> {
        if shipment.is_empty() {
            return Err(OrderError::InvalidInput);
        }

        let orders = self.engine.generate(&shipment)?;

        self.repo.put_batch(&orders).await.map_err(|e| {
            tracing::error!("Failed to save offers: {}", e);
            OrderError::Storage(e)
        })?;

        tracing::info!(fast = %orders[0].id, slow = %orders[1].id, "Offers saved");
        Ok(orders.iter().map(OrderOffer::from).collect())
    }

    /// Transition: NotConfirmed → Confirmed
    pub async fn confirm_order(&self, raw_id: &str) -> Result<&'static str, OrderError> {
        let id = parse_order_id(raw_id)?;

        let order = self.repo.confirm(id).await.map_err(|e| match e {
            RepositoryError::NotFound(id) => OrderError::NotFound(id),
            other => {
                tracing::error!("Failed to confirm order {}: {}", id, other);
                OrderError::Storage(other)
            }
        })?;

        tracing::info!(order_id = %order.id, order_type = %order.order_type, "Order confirmed");
        Ok(CONFIRMED)
    }

    pub async fn get_order(&self, raw_id: &str) -> Result<Order, OrderError> {
        let id = parse_order_id(raw_id)?;
        self.repo.get(id).await?.ok_or(OrderError::NotFound(id))
    }
}

fn parse_order_id(raw: &str) -> Result<Uuid, OrderError> {
    Uuid::parse_str(raw.trim()).map_err(|_| OrderError::InvalidOrderId(raw.to_string()))
}

#[derive(Debug, thiserror::Error)]
pub enum OrderError {
    #[error("At least one of weight, volume, from, to or time is required")]
    InvalidInput,

    #[error(transparent)]
    Quote(#[from] QuoteError),

    #[error("Invalid order id: {0:?}")]
    InvalidOrderId(String),

    #[error("Order not found: {0}")]
    NotFound(Uuid),

    #[error("something went wrong with saving data to storage")]
    Storage(#[from] RepositoryError),
}
