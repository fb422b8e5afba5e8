use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

pub fn error_page(status: StatusCode) -> Response {
    let body = format!(
        "<p>Error Status: <span style='color:red;'>{}</span></p>",
        status.as_u16()
    );
    (status, Html(body)).into_response()
}

pub async fn not_found_handler() -> Response {
    error_page(StatusCode::NOT_FOUND)
}
