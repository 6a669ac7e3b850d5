//! Обобщённый набор REST обработчиков для сущности с `TableMapping`
//!
//! Маршруты монтируются под `/api/v1/{list_name}`. Любая ошибка отдаётся
//! как HTTP 400 с телом `OperationResult` (см. `ServiceError`).

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use contracts::shared::paging::{FilterRequest, PagingResult};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::shared::base_service as service;
use crate::shared::data::table_mapping::TableMapping;
use crate::shared::error::ServiceError;

/// Общее состояние обработчиков
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
}

fn parse_path_id(raw: &str) -> Result<Uuid, ServiceError> {
    Uuid::parse_str(raw).map_err(|_| ServiceError::Malformed(format!("invalid id '{}'", raw)))
}

fn json_body<B>(body: Result<Json<B>, JsonRejection>) -> Result<B, ServiceError> {
    body.map(|Json(value)| value)
        .map_err(|rejection| ServiceError::Malformed(rejection.body_text()))
}

/// GET /GetNewCode
pub async fn get_new_code<T: TableMapping>(
    State(state): State<AppState>,
) -> Result<String, ServiceError> {
    service::get_new_code::<T>(&state.db).await
}

/// GET /:code
///
/// Найденная запись отдаётся со статусом 201, как у исходного API.
pub async fn get_by_code<T: TableMapping>(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<(StatusCode, Json<T::Model>), ServiceError> {
    let model = service::get::<T>(&state.db, &code).await?;
    Ok((StatusCode::CREATED, Json(model)))
}

/// POST /ListByIds
pub async fn list_by_ids<T: TableMapping>(
    State(state): State<AppState>,
    body: Result<Json<Vec<Uuid>>, JsonRejection>,
) -> Result<Json<Vec<T::Entity>>, ServiceError> {
    let ids = json_body(body)?;
    Ok(Json(service::list_by_ids::<T>(&state.db, &ids).await?))
}

/// GET /Filter?pageSize=&pageNumber=&search=
pub async fn filter<T: TableMapping>(
    State(state): State<AppState>,
    query: Result<Query<FilterRequest>, QueryRejection>,
) -> Result<Json<PagingResult<T::Model>>, ServiceError> {
    let Query(request) =
        query.map_err(|rejection| ServiceError::Malformed(rejection.body_text()))?;
    Ok(Json(service::filter::<T>(&state.db, &request).await?))
}

/// POST /
pub async fn insert<T: TableMapping>(
    State(state): State<AppState>,
    body: Result<Json<T::CreateDto>, JsonRejection>,
) -> Result<Json<Uuid>, ServiceError> {
    let dto = json_body(body)?;
    Ok(Json(service::insert::<T>(&state.db, dto).await?))
}

/// PUT /:id
pub async fn update<T: TableMapping>(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<T::UpdateDto>, JsonRejection>,
) -> Result<StatusCode, ServiceError> {
    let id = parse_path_id(&id)?;
    let dto = json_body(body)?;
    service::update::<T>(&state.db, id, dto).await?;
    Ok(StatusCode::OK)
}

/// DELETE /:id
pub async fn delete<T: TableMapping>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ServiceError> {
    let id = parse_path_id(&id)?;
    service::delete::<T>(&state.db, id).await?;
    Ok(StatusCode::OK)
}

/// DELETE / с массивом ID в теле
pub async fn delete_many<T: TableMapping>(
    State(state): State<AppState>,
    body: Result<Json<Vec<Uuid>>, JsonRejection>,
) -> Result<StatusCode, ServiceError> {
    let ids = json_body(body)?;
    service::delete_many::<T>(&state.db, &ids).await?;
    Ok(StatusCode::OK)
}

/// GET /Count
pub async fn count<T: TableMapping>(
    State(state): State<AppState>,
) -> Result<Json<i64>, ServiceError> {
    Ok(Json(service::count::<T>(&state.db).await?))
}

/// Добавляет полный набор CRUD маршрутов сущности в роутер
pub fn crud_routes<T: TableMapping>(router: Router<AppState>) -> Router<AppState> {
    let base = format!("/api/v1/{}", T::route());
    router
        .route(&base, post(insert::<T>).delete(delete_many::<T>))
        .route(&format!("{}/GetNewCode", base), get(get_new_code::<T>))
        .route(&format!("{}/Count", base), get(count::<T>))
        .route(&format!("{}/Filter", base), get(filter::<T>))
        .route(&format!("{}/ListByIds", base), post(list_by_ids::<T>))
        .route(
            &format!("{}/:key", base),
            get(get_by_code::<T>).put(update::<T>).delete(delete::<T>),
        )
}
