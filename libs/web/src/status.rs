use axum::{http::StatusCode, response::Html};

pub(super) async fn get_404() -> (StatusCode, Html<&'static str>) {
    (
        StatusCode::NOT_FOUND,
        Html("<!DOCTYPE html>\n<p>Not found. <a href=\"/\">Back to news</a></p>\n"),
    )
}

pub(super) async fn get_health() -> StatusCode {
    StatusCode::OK
}
