use axum::{
    extract::{rejection::{JsonRejection, QueryRejection}, Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Deserializer};
use courier_shared::{Order, OrderOffer, Shipment};
use crate::{error::AppError, state::AppState};

// ============================================================================
// Request/Response Types
// ============================================================================

/// Query string of `/deliveries`. Every field may be omitted or empty.
#[derive(Debug, Default, Deserialize)]
pub struct DeliveryQuery {
    #[serde(default, deserialize_with = "optional_number")]
    pub weight: Option<f64>,
    #[serde(default, deserialize_with = "optional_number")]
    pub volume: Option<f64>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub time: Option<String>,
}

impl From<DeliveryQuery> for Shipment {
    fn from(q: DeliveryQuery) -> Self {
        Shipment {
            weight: q.weight.unwrap_or_default(),
            volume: q.volume.unwrap_or_default(),
            from: q.from.unwrap_or_default(),
            to: q.to.unwrap_or_default(),
            time: q.time.unwrap_or_default(),
        }
    }
}

fn optional_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

#[derive(Debug, Deserialize)]
pub struct ConfirmRequest {
    pub id: String,
}

// ============================================================================
// Handlers
// ============================================================================

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(root).post(root))
        .route("/health", get(health))
        .route("/deliveries", get(get_offers).post(get_offers))
        .route("/confirm", post(confirm_order))
        .route("/orders/{id}", get(get_order))
}

async fn root() -> &'static str {
    "Hello from server"
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "healthy", "service": "courier-api"}))
}

/// GET|POST /deliveries?weight=&volume=&from=&to=&time=
/// Quote a shipment and return the fast and slow offers
pub async fn get_offers(
    State(state): State<AppState>,
    query: Result<Query<DeliveryQuery>, QueryRejection>,
) -> Result<Json<Vec<OrderOffer>>, AppError> {
    let Query(query) = query.map_err(|e| AppError::ValidationError(e.body_text()))?;
    let offers = state.orders.get_offers(query.into()).await?;
    Ok(Json(offers))
}

/// POST /confirm
/// Confirm one previously quoted offer by id
pub async fn confirm_order(
    State(state): State<AppState>,
    body: Result<Json<ConfirmRequest>, JsonRejection>,
) -> Result<Json<&'static str>, AppError> {
    let Json(req) = body.map_err(|e| AppError::ValidationError(e.body_text()))?;
    let status = state.orders.confirm_order(&req.id).await?;
    Ok(Json(status))
}

/// GET /orders/:id
pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Order>, AppError> {
    Ok(Json(state.orders.get_order(&id).await?))
}
