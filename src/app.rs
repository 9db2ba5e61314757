use std::sync::Arc;
use std::time::Duration;

use tracing::debug;
use url::Url;

use crate::backend::Backend;
use crate::error::{BackendError, InviteError, ValidationErrors};
use crate::form::LoginForm;
use crate::models::{Invitation, Posting, PostingDraft};
use crate::session::{guard, Route, Session};
use crate::store::PostingStore;
use crate::talent::TalentPool;

/// Everything a screen or command needs: the session flag and both caches.
pub struct App<B> {
    pub session: Session,
    pub postings: PostingStore<B>,
    pub talent: TalentPool<B>,
}

impl<B: Backend> App<B> {
    pub fn new(backend: Arc<B>, login_delay: Duration, link_base: Url) -> Self {
        Self {
            session: Session::new(login_delay),
            postings: PostingStore::new(backend.clone()),
            talent: TalentPool::new(backend, link_base),
        }
    }

    /// Resolves `target` through the guard.
    pub fn navigate(&self, target: &str) -> Route {
        let requested = Route::parse(target);
        let landed = guard(requested.clone(), &self.session);
        if landed != requested {
            debug!(from = %requested, to = %landed, "redirected");
        }
        landed
    }

    pub async fn login(&mut self, form: &LoginForm) -> Result<(), ValidationErrors> {
        form.validate()?;
        self.session.login().await;
        Ok(())
    }

    pub fn logout(&mut self) {
        self.session.logout();
    }

    /// Fetches whatever the landed route displays.
    pub async fn load(&mut self, route: &Route) -> Result<(), BackendError> {
        match route {
            Route::Postings | Route::PostingDetail(_) => self.postings.refresh().await,
            Route::TalentPool { posting_id } => {
                if posting_id.is_some() {
                    self.postings.refresh().await?;
                }
                self.talent.refresh().await
            }
            Route::Login | Route::NotFound(_) => Ok(()),
        }
    }

    pub async fn toggle_status(&mut self, id: &str) -> Result<Posting, BackendError> {
        let current = self.postings.get(id).map(|p| p.status);
        let Some(status) = current else {
            return Err(BackendError::Api {
                status: 404,
                message: format!("posting {} is not loaded", id),
            });
        };
        self.postings
            .update(id, &PostingDraft::with_status(status.toggled()))
            .await
    }

    /// Invites a candidate to a posting from the postings cache. An unknown
    /// posting fails before any remote call.
    pub async fn invite(&self, posting_id: &str, candidate_id: &str) -> Result<Invitation, InviteError> {
        let posting = self
            .postings
            .get(posting_id)
            .ok_or_else(|| InviteError::UnknownPosting(posting_id.to_string()))?;
        self.talent.invite(posting, candidate_id).await
    }
}
