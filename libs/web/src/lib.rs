use axum::{
    routing::{get, post},
    Router,
};
use sync_news::SyncClient;
use tower_http::trace::TraceLayer;
use tracing::info;

pub mod news;
mod response;
mod status;

pub fn serve(sync: SyncClient) -> Router {
    info!(task = "start web serving");

    let news_router = Router::new()
        .route("/edit/cancel", post(news::post_cancel_update))
        .route("/:id/delete", post(news::post_delete))
        .route("/:id/edit", get(news::get_update).post(news::post_update))
        .fallback(status::get_404);

    Router::new()
        .route("/", get(news::get_list))
        .route("/add", get(news::get_create).post(news::post_create))
        .route("/healthz", get(status::get_health))
        .nest("/news", news_router)
        .fallback(status::get_404)
        .layer(TraceLayer::new_for_http())
        .with_state(sync)
}

#[cfg(test)]
mod test {
    use std::{fs, time::Duration};

    use entity::prelude::*;
    use news_client::{fake::FakeNewsApi, Client, StatusCode};
    use reqwest::redirect::Policy;
    use sync_news::{Config, SyncClient};
    use tokio::{net::TcpListener, time::sleep};
    use util::workspace_dir;

    use super::serve;

    struct Setup {
        fake: FakeNewsApi,
        sync: SyncClient,
        base_url: String,
        http: reqwest::Client,
    }

    fn fixture() -> Vec<NewsItem> {
        let text = fs::read_to_string(
            workspace_dir().join("libs/news-client/src/testdata/news.json"),
        )
        .unwrap();
        serde_json::from_str(&text).unwrap()
    }

    async fn setup() -> Setup {
        let fake = FakeNewsApi::start(fixture()).await.unwrap();
        let sync = SyncClient::new(
            Client::with_base_url(&fake.base_url),
            Config {
                fade_delay: Duration::from_millis(100),
            },
        );

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let router = serve(sync.clone());
        tokio::spawn(async move { axum::serve(listener, router).await });

        let http = reqwest::Client::builder()
            .redirect(Policy::none())
            .build()
            .unwrap();

        Setup {
            fake,
            sync,
            base_url,
            http,
        }
    }

    fn form_fields(title: &str) -> Vec<(&'static str, String)> {
        vec![
            ("title", title.to_string()),
            ("description", "From the wire.".to_string()),
            ("category", "Lifestyle".to_string()),
            ("editorFirstname", "Ana".to_string()),
            ("editorLastname", "Lomidze".to_string()),
        ]
    }

    #[tokio::test]
    async fn test_get_list_renders_table() {
        // Arrange
        let setup = setup().await;

        // Act
        let response = setup
            .http
            .get(format!("{}/", setup.base_url))
            .send()
            .await
            .unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::OK);
        let html = response.text().await.unwrap();
        assert_eq!(html.matches("<tr").count(), 4);
        assert!(html.contains("Inside the newsroom"));
    }

    #[tokio::test]
    async fn test_get_add_shows_create_form() {
        let setup = setup().await;

        let html = setup
            .http
            .get(format!("{}/add", setup.base_url))
            .send()
            .await
            .unwrap()
            .text()
            .await
            .unwrap();

        assert!(html.contains("id=\"create-form\""));
        assert!(!html.contains("<table>"));
    }

    #[tokio::test]
    async fn test_post_add_creates_and_redirects() {
        // Arrange
        let setup = setup().await;

        // Act
        let response = setup
            .http
            .post(format!("{}/add", setup.base_url))
            .form(&form_fields("Night market opens"))
            .send()
            .await
            .unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()["location"], "/");
        let items = setup.fake.items().await;
        assert_eq!(items.len(), 4);
        assert_eq!(items[3].title, "Night market opens");
        assert_eq!(items[3].editor_first_name, "Ana");
    }

    #[tokio::test]
    async fn test_post_add_invalid_form_keeps_values() {
        let setup = setup().await;

        let response = setup
            .http
            .post(format!("{}/add", setup.base_url))
            .form(&form_fields("  "))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let html = response.text().await.unwrap();
        assert!(html.contains("value=\"Lomidze\""));
        assert!(setup.fake.requests().await.is_empty());
    }

    #[tokio::test]
    async fn test_post_add_upstream_failure() {
        let setup = setup().await;
        setup
            .fake
            .fail_with(Some(StatusCode::INTERNAL_SERVER_ERROR))
            .await;

        let response = setup
            .http
            .post(format!("{}/add", setup.base_url))
            .form(&form_fields("Night market opens"))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert!(response
            .text()
            .await
            .unwrap()
            .contains("value=\"Night market opens\""));
    }

    #[tokio::test]
    async fn test_delete_serves_fading_row_then_drops_it() {
        // Arrange
        let setup = setup().await;
        setup.sync.list_all().await.unwrap();

        // Act
        let response = setup
            .http
            .post(format!("{}/news/2/delete", setup.base_url))
            .send()
            .await
            .unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::OK);
        let html = response.text().await.unwrap();
        assert!(html.contains("<tr class=\"fade-out\" data-id=\"2\">"));
        assert_eq!(html.matches("class=\"fade-out\"").count(), 1);

        let items = setup.fake.items().await;
        assert_eq!(items.len(), 2);
        assert!(items.iter().all(|item| item.id != NewsId::from(2)));

        sleep(Duration::from_millis(300)).await;
        let document = setup.sync.snapshot().await;
        assert_eq!(document.rows().len(), 2);
        assert!(document.row_for(&NewsId::from(2)).is_none());
    }

    #[tokio::test]
    async fn test_edit_after_add_shows_list_under_form() {
        let setup = setup().await;
        setup
            .http
            .get(format!("{}/add", setup.base_url))
            .send()
            .await
            .unwrap();

        let html = setup
            .http
            .get(format!("{}/news/1/edit", setup.base_url))
            .send()
            .await
            .unwrap()
            .text()
            .await
            .unwrap();

        assert!(html.contains("id=\"update-form\""));
        assert!(html.contains("<table>"));
        assert!(!html.contains("id=\"create-form\""));
    }

    #[tokio::test]
    async fn test_edit_update_and_cancel() {
        // Arrange
        let setup = setup().await;

        // Act
        let html = setup
            .http
            .get(format!("{}/news/7f3c/edit", setup.base_url))
            .send()
            .await
            .unwrap()
            .text()
            .await
            .unwrap();
        let cancelled = setup
            .http
            .post(format!("{}/news/edit/cancel", setup.base_url))
            .send()
            .await
            .unwrap();

        // Assert
        assert!(html.contains("id=\"update-form\""));
        assert!(html.contains("value=\"Ten quiet cafes\""));
        assert_eq!(cancelled.status(), StatusCode::SEE_OTHER);
        assert!(setup.sync.snapshot().await.update_form().is_none());
    }

    #[tokio::test]
    async fn test_post_update_changes_item() {
        let setup = setup().await;

        let response = setup
            .http
            .post(format!("{}/news/1/edit", setup.base_url))
            .form(&form_fields("Budget passes"))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let items = setup.fake.items().await;
        let updated = items
            .iter()
            .find(|item| item.id == NewsId::from(1))
            .unwrap();
        assert_eq!(updated.title, "Budget passes");
        assert_eq!(updated.category, "Lifestyle");
        assert_eq!(items[1].title, "Inside the newsroom");
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let setup = setup().await;

        let missing = setup
            .http
            .get(format!("{}/nope", setup.base_url))
            .send()
            .await
            .unwrap();
        let health = setup
            .http
            .get(format!("{}/healthz", setup.base_url))
            .send()
            .await
            .unwrap();

        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
        assert_eq!(health.status(), StatusCode::OK);
    }
}
