use crate::domain::entity::EntityKey;
use crate::domain::rating::ErrorEnvelope;
use crate::AppState;
use axum::extract::{Query, State};
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

pub const RATING_ORIGIN_HEADER: &str = "x-rating-origin";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingQuery {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

pub async fn get_rating(
    State(state): State<AppState>,
    Query(query): Query<RatingQuery>,
) -> impl IntoResponse {
    let key = match EntityKey::new(
        query.first_name.unwrap_or_default(),
        query.last_name.unwrap_or_default(),
    ) {
        Ok(key) => key,
        Err(e) => {
            tracing::debug!(kind = e.kind(), "rejected rating request: {}", e);
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorEnvelope::new("INVALID_ENTITY_KEY", e.to_string())),
            )
                .into_response();
        }
    };

    let resolution = state.resolver.resolve(key).await;
    let result = resolution.result;

    (
        StatusCode::OK,
        [(
            HeaderName::from_static(RATING_ORIGIN_HEADER),
            HeaderValue::from_static(result.origin.as_str()),
        )],
        Json(result.rating),
    )
        .into_response()
}
