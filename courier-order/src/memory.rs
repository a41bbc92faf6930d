use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;
use courier_core::repository::{OrderRepository, RepositoryError, RepositoryResult};
use courier_shared::Order;

/// Order store kept in process memory. Used for local runs and tests.
#[derive(Default)]
pub struct InMemoryOrderRepository {
    orders: RwLock<HashMap<Uuid, Order>>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.orders.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.orders.read().await.is_empty()
    }

    pub async fn all(&self) -> Vec<Order> {
        self.orders.read().await.values().cloned().collect()
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn put(&self, order: &Order) -> RepositoryResult<Uuid> {
        let mut orders = self.orders.write().await;
        if orders.contains_key(&order.id) {
            return Err(RepositoryError::Collision(order.id));
        }
        orders.insert(order.id, order.clone());
        Ok(order.id)
    }

    async fn put_batch(&self, batch: &[Order]) -> RepositoryResult<Vec<Uuid>> {
        let mut orders = self.orders.write().await;

        // Check every id before writing so a collision leaves the map untouched
        for (i, order) in batch.iter().enumerate() {
            let repeated = batch[..i].iter().any(|o| o.id == order.id);
            if repeated || orders.contains_key(&order.id) {
                return Err(RepositoryError::Collision(order.id));
            }
        }

        for order in batch {
            orders.insert(order.id, order.clone());
        }
        Ok(batch.iter().map(|o| o.id).collect())
    }

    async fn confirm(&self, id: Uuid) -> RepositoryResult<Order> {
        let mut orders = self.orders.write().await;
        let order = orders.get_mut(&id).ok_or(RepositoryError::NotFound(id))?;
        order.confirm();
        Ok(order.clone())
    }

    async fn get(&self, id: Uuid) -> RepositoryResult<Option<Order>> {
        Ok(self.orders.read().await.get(&id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use courier_shared::{OrderStatus, OrderType, Shipment};

    fn order(order_type: OrderType) -> Order {
        let shipment = Shipment {
            weight: 1.0,
            volume: 1.0,
            from: "0,0".to_string(),
            to: "0,1".to_string(),
            time: String::new(),
        };
        Order::new(&shipment, order_type, 42.0, Utc::now())
    }

    #[tokio::test]
    async fn test_put_never_overwrites() {
        let repo = InMemoryOrderRepository::new();
        let mut first = order(OrderType::Fast);
        repo.put(&first).await.unwrap();

        first.price = 0.0;
        let err = repo.put(&first).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Collision(id) if id == first.id));
        assert_eq!(repo.get(first.id).await.unwrap().unwrap().price, 42.0);
    }

    #[tokio::test]
    async fn test_batch_is_all_or_nothing() {
        let repo = InMemoryOrderRepository::new();
        let existing = order(OrderType::Slow);
        repo.put(&existing).await.unwrap();

        let fresh = order(OrderType::Fast);
        let result = repo.put_batch(&[fresh.clone(), existing.clone()]).await;
        assert!(matches!(result, Err(RepositoryError::Collision(_))));
        assert!(repo.get(fresh.id).await.unwrap().is_none());
        assert_eq!(repo.len().await, 1);

        let duplicated = repo.put_batch(&[fresh.clone(), fresh.clone()]).await;
        assert!(duplicated.is_err());
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_confirm_lifecycle() {
        let repo = InMemoryOrderRepository::new();
        let fast = order(OrderType::Fast);
        let slow = order(OrderType::Slow);
        repo.put_batch(&[fast.clone(), slow.clone()]).await.unwrap();

        let confirmed = repo.confirm(fast.id).await.unwrap();
        assert_eq!(confirmed.order_status, OrderStatus::Confirmed);
        assert_eq!(Order { order_status: OrderStatus::NotConfirmed, ..confirmed.clone() }, fast);

        // Confirming twice has the same effect
        assert_eq!(repo.confirm(fast.id).await.unwrap(), confirmed);

        let sibling = repo.get(slow.id).await.unwrap().unwrap();
        assert_eq!(sibling.order_status, OrderStatus::NotConfirmed);
    }

    #[tokio::test]
    async fn test_confirm_unknown() {
        let repo = InMemoryOrderRepository::new();
        let id = Uuid::new_v4();
        assert!(matches!(repo.confirm(id).await, Err(RepositoryError::NotFound(missing)) if missing == id));
    }
}
