use entity::prelude::*;
use reqwest::{
    header::{HeaderMap, HeaderValue},
    RequestBuilder,
};
use serde::Serialize;
use toml::{map::Map, Value};
use tracing::debug;

use crate::{response::IntoResponse, NewsClientError};

/// HTTP client for the remote news collection.
#[derive(Clone, Debug)]
pub struct Client {
    base_url: String,
    headers: HeaderMap,
    http: reqwest::Client,
}

impl Client {
    pub fn new(config: &Map<String, Value>) -> Result<Self, NewsClientError> {
        let base_url = config
            .get("news")
            .into_response("failed to load news config")?
            .get("base_url")
            .into_response("failed to load base_url config")?
            .as_str()
            .into_response("failed to parse base_url config")?;

        Ok(Self::with_base_url(base_url))
    }

    pub fn with_base_url(base_url: &str) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert("Accept", HeaderValue::from_static("application/json"));

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            headers,
            http: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /news`
    pub async fn list_news(&self) -> Result<Vec<NewsItem>, NewsClientError> {
        let text = self
            .send(self.http.get(self.collection_url()), "failed to list news")
            .await?;

        let items = serde_json::from_str::<Vec<NewsItem>>(&text)
            .into_response("failed to parse news list")?;
        debug!(task = "list news", count = items.len());

        Ok(items)
    }

    /// `GET /news/{id}`
    pub async fn get_news(
        &self,
        id: &NewsId,
    ) -> Result<NewsItem, NewsClientError> {
        let text = self
            .send(self.http.get(self.item_url(id)), "failed to get news")
            .await?;

        serde_json::from_str::<NewsItem>(&text)
            .into_response("failed to parse news item")
    }

    /// `POST /news`
    pub async fn create_news(
        &self,
        body: &CreateNewsRequest,
    ) -> Result<(), NewsClientError> {
        let request = self.http.post(self.collection_url());
        self.send_json(request, body, "failed to create news").await?;
        debug!(task = "create news", title = %body.title);

        Ok(())
    }

    /// `PUT /news/{id}`
    pub async fn update_news(
        &self,
        id: &NewsId,
        body: &UpdateNewsRequest,
    ) -> Result<(), NewsClientError> {
        let request = self.http.put(self.item_url(id));
        self.send_json(request, body, "failed to update news").await?;
        debug!(task = "update news", id = %id);

        Ok(())
    }

    /// `DELETE /news/{id}`
    pub async fn delete_news(&self, id: &NewsId) -> Result<(), NewsClientError> {
        self.send(self.http.delete(self.item_url(id)), "failed to delete news")
            .await?;
        debug!(task = "delete news", id = %id);

        Ok(())
    }

    fn collection_url(&self) -> String {
        format!("{}/news", self.base_url)
    }

    fn item_url(&self, id: &NewsId) -> String {
        format!("{}/news/{}", self.base_url, id)
    }

    async fn send_json<T: Serialize + ?Sized>(
        &self,
        request: RequestBuilder,
        body: &T,
        message: &str,
    ) -> Result<String, NewsClientError> {
        let body = serde_json::to_string(body)
            .into_response("failed to serialize body")?;

        self.send(
            request.header("Content-Type", "application/json").body(body),
            message,
        )
        .await
    }

    async fn send(
        &self,
        request: RequestBuilder,
        message: &str,
    ) -> Result<String, NewsClientError> {
        let response = request
            .headers(self.headers.clone())
            .send()
            .await
            .into_response(message)?;

        let status = response.status();
        let text = response.text().await.into_response("failed to get text")?;

        if !status.is_success() {
            return Err(NewsClientError::FailedStatusCode {
                status_code: status,
                message: text,
            });
        }

        Ok(text)
    }
}
