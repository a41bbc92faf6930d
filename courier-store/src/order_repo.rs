use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;
use courier_core::repository::{OrderRepository, RepositoryError, RepositoryResult};
use courier_shared::Order;
use crate::database::DbClient;

pub struct PostgresOrderRepository {
    db: DbClient,
}

impl PostgresOrderRepository {
    pub fn new(db: DbClient) -> Self {
        Self { db }
    }
}

const INSERT_ORDER: &str = r#"
    INSERT INTO orders (id, weight, volume, "from", "to", "time", price, delivery_date, order_type, order_status)
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
"#;

const ORDER_COLUMNS: &str = r#"id, weight, volume, "from", "to", "time", price, delivery_date, order_type, order_status"#;

#[derive(sqlx::FromRow)]
struct OrderRow {
    id: Uuid,
    weight: f64,
    volume: f64,
    from: String,
    to: String,
    time: String,
    price: f64,
    delivery_date: DateTime<Utc>,
    order_type: String,
    order_status: String,
}

impl TryFrom<OrderRow> for Order {
    type Error = RepositoryError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        Ok(Order {
            id: row.id,
            weight: row.weight,
            volume: row.volume,
            from: row.from,
            to: row.to,
            time: row.time,
            price: row.price,
            delivery_date: row.delivery_date,
            order_type: row.order_type.parse().map_err(|e| RepositoryError::Corrupt(format!("{} ({})", e, row.id)))?,
            order_status: row.order_status.parse().map_err(|e| RepositoryError::Corrupt(format!("{} ({})", e, row.id)))?,
        })
    }
}

fn storage_error(id: Uuid, err: sqlx::Error) -> RepositoryError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return RepositoryError::Collision(id);
        }
    }
    tracing::error!("Order storage error for {}: {}", id, err);
    RepositoryError::Unavailable(err.to_string())
}

async fn insert<'c, E>(executor: E, order: &Order) -> Result<(), sqlx::Error>
where
    E: sqlx::postgres::PgExecutor<'c>,
{
    sqlx::query(INSERT_ORDER)
        .bind(order.id)
        .bind(order.weight)
        .bind(order.volume)
        .bind(&order.from)
        .bind(&order.to)
        .bind(&order.time)
        .bind(order.price)
        .bind(order.delivery_date)
        .bind(order.order_type.as_str())
        .bind(order.order_status.as_str())
        .execute(executor)
        .await?;
    Ok(())
}

#[async_trait]
impl OrderRepository for PostgresOrderRepository {
    async fn ensure_schema(&self) -> RepositoryResult<()> {
        self.db
            .migrate()
            .await
            .map_err(|e| RepositoryError::Unavailable(format!("failed to ensure indexes: {}", e)))
    }

    async fn put(&self, order: &Order) -> RepositoryResult<Uuid> {
        insert(&self.db.pool, order).await.map_err(|e| storage_error(order.id, e))?;
        Ok(order.id)
    }

    async fn put_batch(&self, orders: &[Order]) -> RepositoryResult<Vec<Uuid>> {
        let batch_id = orders.first().map(|o| o.id).unwrap_or_default();
        let mut tx = self.db.pool.begin().await.map_err(|e| storage_error(batch_id, e))?;

        // Dropping the transaction on error rolls back earlier inserts
        for order in orders {
            insert(&mut *tx, order).await.map_err(|e| storage_error(order.id, e))?;
        }

        tx.commit().await.map_err(|e| storage_error(batch_id, e))?;
        Ok(orders.iter().map(|o| o.id).collect())
    }

    async fn confirm(&self, id: Uuid) -> RepositoryResult<Order> {
        let query = format!(
            "UPDATE orders SET order_status = $1 WHERE id = $2 RETURNING {}",
            ORDER_COLUMNS
        );
        let row: Option<OrderRow> = sqlx::query_as(&query)
            .bind(courier_shared::OrderStatus::Confirmed.as_str())
            .bind(id)
            .fetch_optional(&self.db.pool)
            .await
            .map_err(|e| storage_error(id, e))?;

        row.ok_or(RepositoryError::NotFound(id))?.try_into()
    }

    async fn get(&self, id: Uuid) -> RepositoryResult<Option<Order>> {
        let query = format!("SELECT {} FROM orders WHERE id = $1", ORDER_COLUMNS);
        let row: Option<OrderRow> = sqlx::query_as(&query)
            .bind(id)
            .fetch_optional(&self.db.pool)
            .await
            .map_err(|e| storage_error(id, e))?;

        row.map(Order::try_from).transpose()
    }
}
