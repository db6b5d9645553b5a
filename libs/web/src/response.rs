use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use sync_news::SyncNewsError;

pub enum WebError {
    ClientError(String),
    ServerError(String),
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        match self {
            WebError::ClientError(page) => {
                (StatusCode::UNPROCESSABLE_ENTITY, Html(page)).into_response()
            }
            WebError::ServerError(page) => {
                (StatusCode::BAD_GATEWAY, Html(page)).into_response()
            }
        }
    }
}

pub type WebResponse<T> = Result<T, WebError>;

pub trait IntoWebResponse<T> {
    /// Maps a failed operation to a status and the page to show with it.
    fn into_response(self, page: impl FnOnce() -> String) -> WebResponse<T>;
}

impl<T> IntoWebResponse<T> for Result<T, SyncNewsError> {
    fn into_response(self, page: impl FnOnce() -> String) -> WebResponse<T> {
        self.map_err(|e| match e {
            SyncNewsError::InvalidForm { .. } => WebError::ClientError(page()),
            SyncNewsError::NewsClientError { .. } => {
                WebError::ServerError(page())
            }
        })
    }
}
