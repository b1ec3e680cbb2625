mod root;
mod roster;

use crate::state::AppStateV2;
use axum::{
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    Router,
};
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};

// 上傳的員工 CSV 不會太大
const BODY_LIMIT: usize = 2 * 1024 * 1024;

pub fn app(state: AppStateV2) -> Router {
    let origins: Vec<HeaderValue> = state
        .get_settings()
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(origin) => Some(origin),
            Err(err) => {
                tracing::warn!("忽略無效的 CORS origin {}: {}", origin, err);
                None
            }
        })
        .collect();

    Router::new()
        .merge(root::new())
        .nest("/roster", roster::new())
        .fallback(root::handler_404)
        .layer(
            // see https://docs.rs/tower-http/latest/tower_http/cors/index.html
            // for more details
            //
            // pay attention that for some request types like posting content-type: application/json
            // it is required to add ".allow_headers([http::header::CONTENT_TYPE])"
            // or see this issue https://github.com/tokio-rs/axum/issues/849
            CorsLayer::new()
                .allow_methods([Method::GET, Method::POST])
                .allow_origin(origins)
                .allow_headers([CONTENT_TYPE]),
        )
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
