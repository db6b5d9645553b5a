use entity::prelude::FormError;
use news_client::NewsClientError;

use crate::SyncNewsError;

type Response<T> = Result<T, SyncNewsError>;

pub(crate) trait IntoResponse<T> {
    fn into_response(self, message: &str) -> Response<T>;
}

impl<T> IntoResponse<T> for Result<T, NewsClientError> {
    fn into_response(self, message: &str) -> Response<T> {
        self.map_err(|e| SyncNewsError::NewsClientError {
            source: e,
            message: message.to_string(),
        })
    }
}

impl<T> IntoResponse<T> for Result<T, FormError> {
    fn into_response(self, message: &str) -> Response<T> {
        self.map_err(|e| SyncNewsError::InvalidForm {
            source: e,
            message: message.to_string(),
        })
    }
}
