use async_trait::async_trait;
use uuid::Uuid;
use courier_shared::Order;

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Order not found: {0}")]
    NotFound(Uuid),

    #[error("Order already exists: {0}")]
    Collision(Uuid),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Stored order could not be decoded: {0}")]
    Corrupt(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Repository trait for order data access
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Create tables and indexes. Safe to run repeatedly.
    async fn ensure_schema(&self) -> RepositoryResult<()> {
        Ok(())
    }

    /// Persist a new order. Never overwrites an existing record.
    async fn put(&self, order: &Order) -> RepositoryResult<Uuid>;

    /// Persist several new orders atomically: either all are stored or none.
    async fn put_batch(&self, orders: &[Order]) -> RepositoryResult<Vec<Uuid>>;

    /// Atomically mark an order as confirmed and return the updated record.
    async fn confirm(&self, id: Uuid) -> RepositoryResult<Order>;

    async fn get(&self, id: Uuid) -> RepositoryResult<Option<Order>>;
}
