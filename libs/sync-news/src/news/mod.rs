use chrono::Utc;
use entity::prelude::*;
use tokio::{task::JoinHandle, time::sleep};
use tracing::{error, info};

use crate::{
    document::{UpdateForm, CREATE_VIEW, LIST_VIEW},
    render,
    response::IntoResponse,
    SyncClient, SyncNewsError,
};

impl SyncClient {
    /// Fetches the whole collection and rebuilds the table from it. The
    /// document is left alone when the fetch fails.
    #[tracing::instrument(skip(self))]
    pub async fn list_all(&self) -> Result<usize, SyncNewsError> {
        let items = self
            .client
            .list_news()
            .await
            .into_response("failed to fetch news")?;

        self.document.lock().await.replace_rows(&items);
        info!(task = "list news", rows = items.len());

        Ok(items.len())
    }

    #[tracing::instrument(skip(self, form))]
    pub async fn create(&self, form: NewsForm) -> Result<(), SyncNewsError> {
        let request = form
            .validate()
            .into_response("failed to read create form")?
            .into_create_request(Utc::now());

        self.client
            .create_news(&request)
            .await
            .into_response("failed to create news")?;

        self.refresh("refresh after create").await;
        self.document.lock().await.navigate(LIST_VIEW);

        Ok(())
    }

    /// Deletes the item, then fades its row out and drops it once the fade
    /// delay has passed. The returned handle finishes when the row is gone;
    /// there is none when no row showed the item.
    #[tracing::instrument(skip(self))]
    pub async fn remove(
        &self,
        id: &NewsId,
    ) -> Result<Option<JoinHandle<()>>, SyncNewsError> {
        let key = self.document.lock().await.row_for(id).map(|row| row.key);

        self.client
            .delete_news(id)
            .await
            .into_response("failed to delete news")?;

        let Some(key) = key else {
            return Ok(None);
        };
        if !self.document.lock().await.start_fade(key) {
            return Ok(None);
        }

        let document = self.document.clone();
        let delay = self.config.fade_delay;
        let handle = tokio::spawn(async move {
            sleep(delay).await;
            // The table may have been rebuilt meanwhile; then this is a no-op.
            document.lock().await.remove_row(key);
        });

        Ok(Some(handle))
    }

    /// Loads the current item and opens the edit form filled with it.
    #[tracing::instrument(skip(self))]
    pub async fn show_update_form(
        &self,
        id: &NewsId,
    ) -> Result<(), SyncNewsError> {
        let item = self
            .client
            .get_news(id)
            .await
            .into_response("failed to fetch single news")?;

        self.document.lock().await.open_update_form(UpdateForm {
            id: id.clone(),
            values: NewsForm::from(&item),
        });

        Ok(())
    }

    #[tracing::instrument(skip(self, form))]
    pub async fn update(
        &self,
        id: &NewsId,
        form: NewsForm,
    ) -> Result<(), SyncNewsError> {
        let request = form
            .validate()
            .into_response("failed to read update form")?
            .into_update_request(Utc::now());

        self.client
            .update_news(id, &request)
            .await
            .into_response("failed to update news")?;

        self.refresh("refresh after update").await;
        self.document.lock().await.close_update_form();

        Ok(())
    }

    pub async fn cancel_update(&self) {
        self.document.lock().await.close_update_form();
    }

    pub async fn open_create_view(&self) {
        self.document.lock().await.navigate(CREATE_VIEW);
    }

    pub async fn open_list_view(&self) {
        self.document.lock().await.navigate(LIST_VIEW);
    }

    pub async fn render_page(&self) -> String {
        render::render_page(&*self.document.lock().await)
    }

    async fn refresh(&self, task: &str) {
        if let Err(e) = self.list_all().await {
            error!(task = task, err = e.to_string());
        }
    }
}
