use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{debug, info};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Articulo {
    pub idarticulo: i64,
    pub idcategoria: Option<i64>,
    pub nombre: Option<String>,
    pub descripcion: Option<String>,
    pub stock: Option<i64>,
}

/// Body accepted by create and update. Form clients send every field as a
/// string, so numeric fields take either a number or a numeric string.
#[derive(Debug, Default, Deserialize)]
pub struct ArticuloInput {
    #[serde(default)]
    pub idcategoria: Option<Value>,
    #[serde(default)]
    pub nombre: Option<String>,
    #[serde(default)]
    pub descripcion: Option<String>,
    #[serde(default)]
    pub stock: Option<Value>,
}

impl ArticuloInput {
    fn into_articulo(self, idarticulo: i64) -> Result<Articulo, ApiFailure> {
        Ok(Articulo {
            idarticulo,
            idcategoria: coerce_int("idcategoria", self.idcategoria)?,
            nombre: non_blank(self.nombre),
            descripcion: non_blank(self.descripcion),
            stock: coerce_int("stock", self.stock)?,
        })
    }
}

type ApiFailure = (StatusCode, String);

#[derive(Debug, Default)]
pub struct Store {
    next_id: i64,
    rows: BTreeMap<i64, Articulo>,
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/articulos", get(list_articulos).post(create_articulo))
        .route(
            "/articulos/{id}",
            get(get_articulo).put(update_articulo).delete(delete_articulo),
        )
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "mock articulos backend listening");
    }
    axum::serve(listener, app()).await
}

async fn list_articulos(State(db): State<Db>) -> Json<Vec<Articulo>> {
    let store = db.read().await;
    Json(store.rows.values().cloned().collect())
}

async fn create_articulo(
    State(db): State<Db>,
    Json(input): Json<ArticuloInput>,
) -> Result<(StatusCode, Json<Articulo>), ApiFailure> {
    let mut store = db.write().await;
    let articulo = input.into_articulo(store.next_id + 1)?;
    store.next_id = articulo.idarticulo;
    store.rows.insert(articulo.idarticulo, articulo.clone());
    debug!(id = articulo.idarticulo, "articulo created");
    Ok((StatusCode::CREATED, Json(articulo)))
}

async fn get_articulo(
    State(db): State<Db>,
    Path(id): Path<i64>,
) -> Result<Json<Articulo>, StatusCode> {
    let store = db.read().await;
    store.rows.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

/// Full replacement: every field not present in the body becomes absent.
async fn update_articulo(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<ArticuloInput>,
) -> Result<Json<Articulo>, ApiFailure> {
    let mut store = db.write().await;
    let slot = store
        .rows
        .get_mut(&id)
        .ok_or((StatusCode::NOT_FOUND, String::new()))?;
    *slot = input.into_articulo(id)?;
    debug!(id, "articulo updated");
    Ok(Json(slot.clone()))
}

async fn delete_articulo(
    State(db): State<Db>,
    Path(id): Path<i64>,
) -> Result<StatusCode, StatusCode> {
    let mut store = db.write().await;
    store
        .rows
        .remove(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or(StatusCode::NOT_FOUND)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

fn coerce_int(field: &str, value: Option<Value>) -> Result<Option<i64>, ApiFailure> {
    let invalid = || {
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            format!("{field} must be an integer"),
        )
    };
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n.as_i64().map(Some).ok_or_else(invalid),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => s.trim().parse().map(Some).map_err(|_| invalid()),
        Some(_) => Err(invalid()),
    }
}
