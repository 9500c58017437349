use axum::{
    body::Bytes,
    extract::{Query, State},
    http::header,
    response::{Html, IntoResponse, Response},
    Json,
};
use service::strength::{StrengthService, StrengthView, UpdateAck};

use crate::errors::ApiError;

#[derive(Clone)]
pub struct AppState {
    pub strength: StrengthService,
}

/// First `auth_key` in the query string. Repeated keys are not an error; later
/// values are ignored.
pub fn first_auth_key(pairs: &[(String, String)]) -> Option<&str> {
    pairs.iter().find(|(k, _)| k == "auth_key").map(|(_, v)| v.as_str())
}

/// `POST /update_daily_strength?auth_key=<secret>`: replace the record.
pub async fn update_daily_strength(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
    body: Bytes,
) -> Result<Response, ApiError> {
    // a missing key goes to the gate as None and is rejected like a wrong one
    let ack = state.strength.update(first_auth_key(&pairs), &body).await?;
    Ok(match ack {
        UpdateAck::Text => "success".into_response(),
        UpdateAck::Json(status) => Json(status).into_response(),
    })
}

/// `GET /daily_strength/get`: the record in the configured representation.
pub async fn get_daily_strength(State(state): State<AppState>) -> Result<Response, ApiError> {
    Ok(match state.strength.fetch().await? {
        StrengthView::Text(text) => {
            ([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], text).into_response()
        }
        StrengthView::Html(html) => Html(html).into_response(),
        StrengthView::Json(value) => Json(value).into_response(),
    })
}
