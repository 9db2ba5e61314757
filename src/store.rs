use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::backend::Backend;
use crate::error::BackendError;
use crate::mapper::{draft_to_patch, row_to_posting};
use crate::models::{Posting, PostingDraft};

/// Local cache of the postings table.
///
/// The list is only touched after the remote call it mirrors has succeeded,
/// so a failed mutation leaves it exactly as it was.
pub struct PostingStore<B> {
    backend: Arc<B>,
    postings: Vec<Posting>,
}

impl<B: Backend> PostingStore<B> {
    pub fn new(backend: Arc<B>) -> Self {
        Self {
            backend,
            postings: Vec::new(),
        }
    }

    /// Every known posting, most recently created first.
    pub fn list(&self) -> &[Posting] {
        &self.postings
    }

    pub fn get(&self, id: &str) -> Option<&Posting> {
        self.postings.iter().find(|p| p.id == id)
    }

    pub async fn refresh(&mut self) -> Result<(), BackendError> {
        let rows = self.backend.list_postings().await.inspect_err(|e| {
            warn!(error = %e, "failed to fetch postings");
        })?;
        self.postings = rows.into_iter().map(row_to_posting).collect();
        debug!(count = self.postings.len(), "postings loaded");
        Ok(())
    }

    pub async fn create(&mut self, draft: &PostingDraft) -> Result<&Posting, BackendError> {
        let row = self
            .backend
            .insert_posting(&draft_to_patch(draft))
            .await
            .inspect_err(|e| warn!(error = %e, "failed to create posting"))?;

        let posting = row_to_posting(row);
        info!(id = %posting.id, title = %posting.title, "posting created");
        self.postings.insert(0, posting);
        Ok(&self.postings[0])
    }

    /// Sends `draft` as a partial update and swaps in the server's full record.
    pub async fn update(&mut self, id: &str, draft: &PostingDraft) -> Result<Posting, BackendError> {
        let row = self
            .backend
            .update_posting(id, &draft_to_patch(draft))
            .await
            .inspect_err(|e| warn!(id, error = %e, "failed to update posting"))?;

        let updated = row_to_posting(row);
        for posting in self.postings.iter_mut().filter(|p| p.id == id) {
            *posting = updated.clone();
        }
        info!(id, "posting updated");
        Ok(updated)
    }

    pub async fn delete(&mut self, id: &str) -> Result<(), BackendError> {
        self.backend
            .delete_posting(id)
            .await
            .inspect_err(|e| warn!(id, error = %e, "failed to delete posting"))?;

        let before = self.postings.len();
        self.postings.retain(|p| p.id != id);
        if self.postings.len() == before {
            debug!(id, "deleted posting was not cached");
        } else {
            info!(id, "posting deleted");
        }
        Ok(())
    }
}
