use axum::http::{header, Method};
use axum::{middleware, routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

use crate::domain::a001_department::repository::DepartmentTable;
use crate::domain::a002_receiver::repository::ReceiverTable;
use crate::domain::a003_transfer_asset_detail::repository::TransferAssetDetailTable;
use crate::handlers::{crud_routes, AppState};
use crate::system::middleware::request_logger::request_logger;

/// Маршруты API: по набору CRUD на каждую сущность
pub fn api_routes(state: AppState) -> Router {
    let router = Router::new().route("/health", get(|| async { "ok" }));
    let router = crud_routes::<DepartmentTable>(router);
    let router = crud_routes::<ReceiverTable>(router);
    let router = crud_routes::<TransferAssetDetailTable>(router);
    router.with_state(state)
}

/// Конфигурация всех роутов приложения
pub fn configure_routes(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    api_routes(state)
        .fallback_service(ServeDir::new("dist"))
        .layer(cors)
        .layer(middleware::from_fn(request_logger))
}
