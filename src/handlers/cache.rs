use axum::{
    http::{StatusCode, header},
    response::IntoResponse,
};

const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

pub async fn cache_get_handler() -> impl IntoResponse {
    (
        StatusCode::MOVED_PERMANENTLY,
        [
            (header::CONTENT_TYPE, FORM_URLENCODED),
            (header::CONNECTION, "keep-alive"),
            (header::ACCEPT_RANGES, "bytes"),
        ],
    )
}

pub async fn cache_post_handler() -> impl IntoResponse {
    (
        StatusCode::MOVED_PERMANENTLY,
        [(header::CONTENT_TYPE, FORM_URLENCODED)],
    )
}
