use axum::{
    extract::{Path, State},
    response::{Html, Redirect},
    Form,
};
use entity::prelude::*;
use sync_news::{render::render_create_page, SyncClient};
use tracing::error;

use crate::response::{IntoWebResponse, WebResponse};

pub async fn get_list(State(sync): State<SyncClient>) -> Html<String> {
    sync.open_list_view().await;
    if let Err(e) = sync.list_all().await {
        error!(task = "list news", err = e.to_string());
    }

    Html(sync.render_page().await)
}

pub async fn get_create(State(sync): State<SyncClient>) -> Html<String> {
    sync.open_create_view().await;

    Html(sync.render_page().await)
}

pub async fn post_create(
    State(sync): State<SyncClient>,
    Form(form): Form<NewsForm>,
) -> WebResponse<Redirect> {
    let result = sync.create(form.clone()).await;
    if let Err(e) = &result {
        error!(task = "create news", err = e.to_string());
    }
    result.into_response(|| render_create_page(&form))?;

    Ok(Redirect::to("/"))
}

/// Answers with the list as it is right after the delete, the row marked
/// as fading. The row leaves the document once the fade delay has passed.
pub async fn post_delete(
    State(sync): State<SyncClient>,
    Path(id): Path<String>,
) -> Html<String> {
    let id = NewsId::from(id);
    sync.open_list_view().await;
    if let Err(e) = sync.remove(&id).await {
        error!(task = "delete news", id = %id, err = e.to_string());
    }

    Html(sync.render_page().await)
}

pub async fn get_update(
    State(sync): State<SyncClient>,
    Path(id): Path<String>,
) -> Html<String> {
    let id = NewsId::from(id);
    sync.open_list_view().await;
    if let Err(e) = sync.show_update_form(&id).await {
        error!(task = "open update form", id = %id, err = e.to_string());
    }

    Html(sync.render_page().await)
}

pub async fn post_update(
    State(sync): State<SyncClient>,
    Path(id): Path<String>,
    Form(form): Form<NewsForm>,
) -> Redirect {
    let id = NewsId::from(id);
    if let Err(e) = sync.update(&id, form).await {
        error!(task = "update news", id = %id, err = e.to_string());
    }

    Redirect::to("/")
}

pub async fn post_cancel_update(State(sync): State<SyncClient>) -> Redirect {
    sync.cancel_update().await;

    Redirect::to("/")
}
