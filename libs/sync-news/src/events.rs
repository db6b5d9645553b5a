use entity::prelude::*;
use tokio::task::JoinHandle;
use tracing::error;

use crate::SyncClient;

/// What the page reacts to.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    Loaded,
    DeleteClicked(NewsId),
    UpdateClicked(NewsId),
    CreateSubmitted(NewsForm),
    UpdateSubmitted(NewsId, NewsForm),
    UpdateCancelled,
}

/// Runs the handler for one event on its own task. Failures end up in the
/// log; the handle resolves once the handler, fade included, is done.
#[tracing::instrument(skip(client))]
pub fn dispatch(client: SyncClient, event: UiEvent) -> JoinHandle<()> {
    tokio::spawn(async move {
        match event {
            UiEvent::Loaded => {
                if let Err(e) = client.list_all().await {
                    error!(task = "load news", err = e.to_string());
                }
            }
            UiEvent::DeleteClicked(id) => match client.remove(&id).await {
                Ok(Some(fade)) => {
                    if let Err(e) = fade.await {
                        error!(
                            task = "fade out row",
                            id = %id,
                            err = e.to_string()
                        );
                    }
                }
                Ok(None) => {}
                Err(e) => {
                    error!(task = "delete news", id = %id, err = e.to_string());
                }
            },
            UiEvent::UpdateClicked(id) => {
                if let Err(e) = client.show_update_form(&id).await {
                    error!(
                        task = "open update form",
                        id = %id,
                        err = e.to_string()
                    );
                }
            }
            UiEvent::CreateSubmitted(form) => {
                if let Err(e) = client.create(form).await {
                    error!(task = "create news", err = e.to_string());
                }
            }
            UiEvent::UpdateSubmitted(id, form) => {
                if let Err(e) = client.update(&id, form).await {
                    error!(task = "update news", id = %id, err = e.to_string());
                }
            }
            UiEvent::UpdateCancelled => client.cancel_update().await,
        }
    })
}
