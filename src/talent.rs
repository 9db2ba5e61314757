use std::sync::Arc;

use rand::distributions::Alphanumeric;
use rand::Rng;
use tracing::{debug, info, warn};
use url::Url;

use crate::backend::Backend;
use crate::error::{BackendError, InviteError};
use crate::filter::{CandidateFilter, CandidateSort};
use crate::mapper::{new_invitation_row, row_to_candidate, row_to_invitation};
use crate::models::{Candidate, Invitation, Posting};

pub const INVITE_TOKEN_LEN: usize = 24;

pub struct TalentPool<B> {
    backend: Arc<B>,
    candidates: Vec<Candidate>,
    link_base: Url,
}

impl<B: Backend> TalentPool<B> {
    pub fn new(backend: Arc<B>, link_base: Url) -> Self {
        Self {
            backend,
            candidates: Vec::new(),
            link_base,
        }
    }

    pub fn list(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn get(&self, id: &str) -> Option<&Candidate> {
        self.candidates.iter().find(|c| c.id == id)
    }

    pub fn filtered(&self, filter: &CandidateFilter, sort: CandidateSort) -> Vec<&Candidate> {
        filter.apply(&self.candidates, sort)
    }

    pub async fn refresh(&mut self) -> Result<(), BackendError> {
        let rows = self
            .backend
            .list_candidates()
            .await
            .inspect_err(|e| warn!(error = %e, "failed to fetch candidates"))?;
        self.candidates = rows.into_iter().map(row_to_candidate).collect();
        debug!(count = self.candidates.len(), "candidates loaded");
        Ok(())
    }

    /// Records an invitation of a pooled candidate to `posting`.
    pub async fn invite(&self, posting: &Posting, candidate_id: &str) -> Result<Invitation, InviteError> {
        if self.get(candidate_id).is_none() {
            return Err(InviteError::UnknownCandidate(candidate_id.to_string()));
        }

        let posting_id = posting.id.as_str();
        let link = invitation_link(&self.link_base);
        let row = self
            .backend
            .insert_invitation(&new_invitation_row(posting_id, candidate_id, &link))
            .await
            .inspect_err(|e| warn!(posting_id, candidate_id, error = %e, "failed to send invitation"))?;

        info!(posting_id, candidate_id, "invitation created");
        Ok(row_to_invitation(row))
    }
}

/// A fresh single-use link under `base`.
pub fn invitation_link(base: &Url) -> String {
    let token: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(INVITE_TOKEN_LEN)
        .map(char::from)
        .collect();
    format!("{}/{}", base.as_str().trim_end_matches('/'), token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::ModeFilter;
    use crate::models::WorkMode;
    use crate::mapper::row_to_posting;
    use crate::store::testing::{candidate_row, posting_row, FakeBackend};

    fn posting(id: &str) -> Posting {
        row_to_posting(posting_row(id, "Montagem de estações"))
    }

    fn link_base() -> Url {
        Url::parse("https://vagas.app/convite/").unwrap()
    }

    async fn loaded_pool(backend: Arc<FakeBackend>) -> TalentPool<FakeBackend> {
        let mut pool = TalentPool::new(backend, link_base());
        pool.refresh().await.unwrap();
        pool
    }

    fn backend_with_candidates() -> Arc<FakeBackend> {
        let backend = FakeBackend::default();
        let mut remote = candidate_row("c2", "Bruno Lima", 0.0);
        remote.tipo = WorkMode::Remote;
        *backend.candidates.lock().unwrap() = vec![
            candidate_row("c1", "Ana Souza", 35.0),
            remote,
            candidate_row("c3", "Carla Dias", 5.0),
        ];
        Arc::new(backend)
    }

    #[test]
    fn test_invitation_link_shape() {
        let a = invitation_link(&link_base());
        let b = invitation_link(&link_base());
        let token = a.strip_prefix("https://vagas.app/convite/").unwrap();
        assert_eq!(token.len(), INVITE_TOKEN_LEN);
        assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_filtered_view_over_loaded_pool() {
        let pool = loaded_pool(backend_with_candidates()).await;
        assert_eq!(pool.list().len(), 3);

        let filter = CandidateFilter {
            mode: ModeFilter::Only(WorkMode::OnSite),
            ..Default::default()
        };
        let nearest: Vec<&str> = pool
            .filtered(&filter, CandidateSort::Nearest)
            .iter()
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(nearest, vec!["c3", "c1"]);
    }

    #[tokio::test]
    async fn test_invite_records_row_with_link() {
        let backend = backend_with_candidates();
        let pool = loaded_pool(backend.clone()).await;

        let invitation = pool.invite(&posting("v1"), "c2").await.unwrap();
        assert_eq!(invitation.posting_id, "v1");
        assert_eq!(invitation.candidate_id, "c2");
        assert!(invitation.link.starts_with("https://vagas.app/convite/"));

        let stored = backend.invitations.lock().unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].link_unico, invitation.link);
    }

    #[tokio::test]
    async fn test_invite_rejects_unknown_candidate_before_calling_backend() {
        let backend = backend_with_candidates();
        let pool = loaded_pool(backend.clone()).await;

        let err = pool.invite(&posting("v1"), "nobody").await.unwrap_err();
        assert!(matches!(err, InviteError::UnknownCandidate(id) if id == "nobody"));

        assert!(backend.invitations.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_candidates() {
        let backend = backend_with_candidates();
        let mut pool = loaded_pool(backend.clone()).await;

        backend.set_failing(true);
        assert!(pool.refresh().await.is_err());
        assert_eq!(pool.list().len(), 3);

        let err = pool.invite(&posting("v1"), "c1").await.unwrap_err();
        assert!(matches!(err, InviteError::Backend(_)));
    }
}
