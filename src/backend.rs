use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;

use crate::error::BackendError;
use crate::mapper::{CandidateRow, InvitationRow, NewInvitationRow, PostingPatch, PostingRow};

pub const POSTINGS_TABLE: &str = "vagas";
pub const CANDIDATES_TABLE: &str = "talentos";
pub const INVITATIONS_TABLE: &str = "convites";

const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";
const RETURN_REPRESENTATION: &str = "return=representation";

/// Table-level CRUD against the hosted backend, in the backend's row shapes.
#[async_trait]
pub trait Backend: Send + Sync {
    /// All postings, most recently created first.
    async fn list_postings(&self) -> Result<Vec<PostingRow>, BackendError>;
    async fn insert_posting(&self, row: &PostingPatch) -> Result<PostingRow, BackendError>;
    async fn update_posting(&self, id: &str, row: &PostingPatch) -> Result<PostingRow, BackendError>;
    async fn delete_posting(&self, id: &str) -> Result<(), BackendError>;

    /// All candidates, most recently created first.
    async fn list_candidates(&self) -> Result<Vec<CandidateRow>, BackendError>;
    async fn insert_invitation(&self, row: &NewInvitationRow) -> Result<InvitationRow, BackendError>;
}

// --- REST implementation ---

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
    details: Option<String>,
    hint: Option<String>,
}

#[derive(Debug, Clone)]
pub struct RestBackend {
    client: Client,
    base: Url,
    api_key: String,
}

impl RestBackend {
    pub fn new(project_url: &Url, api_key: String) -> Result<Self, BackendError> {
        let mut root = project_url.clone();
        if !root.path().ends_with('/') {
            let path = format!("{}/", root.path());
            root.set_path(&path);
        }
        let base = root.join("rest/v1/")?;
        let client = Client::builder().user_agent(Self::user_agent()).build()?;
        Ok(Self {
            client,
            base,
            api_key,
        })
    }

    pub fn user_agent() -> &'static str {
        concat!("vagas/", env!("CARGO_PKG_VERSION"))
    }

    fn table_url(&self, table: &str) -> Result<Url, BackendError> {
        Ok(self.base.join(table)?)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.client
            .request(method, url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    async fn select_all<T: DeserializeOwned>(&self, table: &str) -> Result<Vec<T>, BackendError> {
        let mut url = self.table_url(table)?;
        url.query_pairs_mut()
            .append_pair("select", "*")
            .append_pair("order", "created_at.desc");

        debug!(table, "selecting rows");
        let response = self.request(Method::GET, url).send().await?;
        Self::read_json(table, response).await
    }

    async fn insert_one<B, T>(&self, table: &str, body: &B) -> Result<T, BackendError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let url = self.table_url(table)?;

        debug!(table, "inserting row");
        let response = self
            .request(Method::POST, url)
            .header("prefer", RETURN_REPRESENTATION)
            .header("accept", SINGLE_OBJECT)
            .json(&[body])
            .send()
            .await?;
        Self::read_json(table, response).await
    }

    async fn update_one<B, T>(&self, table: &str, id: &str, body: &B) -> Result<T, BackendError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let mut url = self.table_url(table)?;
        url.query_pairs_mut().append_pair("id", &format!("eq.{}", id));

        debug!(table, id, "updating row");
        let response = self
            .request(Method::PATCH, url)
            .header("prefer", RETURN_REPRESENTATION)
            .header("accept", SINGLE_OBJECT)
            .json(body)
            .send()
            .await?;
        Self::read_json(table, response).await
    }

    async fn delete_by_id(&self, table: &str, id: &str) -> Result<(), BackendError> {
        let mut url = self.table_url(table)?;
        url.query_pairs_mut().append_pair("id", &format!("eq.{}", id));

        debug!(table, id, "deleting row");
        let response = self.request(Method::DELETE, url).send().await?;
        if !response.status().is_success() {
            return Err(Self::api_error(table, response).await);
        }
        Ok(())
    }

    async fn read_json<T: DeserializeOwned>(table: &str, response: Response) -> Result<T, BackendError> {
        if !response.status().is_success() {
            return Err(Self::api_error(table, response).await);
        }
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes)
            .map_err(|e| BackendError::Decode(format!("{} rows: {}", table, e)))
    }

    async fn api_error(table: &str, response: Response) -> BackendError {
        let status = response.status().as_u16();
        let text = response.text().await.unwrap_or_default();
        let message = match serde_json::from_str::<ApiErrorBody>(&text) {
            Ok(body) => {
                let mut message = body.message.unwrap_or_else(|| text.clone());
                for extra in [body.details, body.hint].into_iter().flatten() {
                    message.push_str(" (");
                    message.push_str(&extra);
                    message.push(')');
                }
                message
            }
            Err(_) => text,
        };
        warn!(table, status, %message, "backend request failed");
        BackendError::Api { status, message }
    }
}

#[async_trait]
impl Backend for RestBackend {
    async fn list_postings(&self) -> Result<Vec<PostingRow>, BackendError> {
        self.select_all(POSTINGS_TABLE).await
    }

    async fn insert_posting(&self, row: &PostingPatch) -> Result<PostingRow, BackendError> {
        self.insert_one(POSTINGS_TABLE, row).await
    }

    async fn update_posting(&self, id: &str, row: &PostingPatch) -> Result<PostingRow, BackendError> {
        self.update_one(POSTINGS_TABLE, id, row).await
    }

    async fn delete_posting(&self, id: &str) -> Result<(), BackendError> {
        self.delete_by_id(POSTINGS_TABLE, id).await
    }

    async fn list_candidates(&self) -> Result<Vec<CandidateRow>, BackendError> {
        self.select_all(CANDIDATES_TABLE).await
    }

    async fn insert_invitation(&self, row: &NewInvitationRow) -> Result<InvitationRow, BackendError> {
        self.insert_one(INVITATIONS_TABLE, row).await
    }
}
