//! HTTP transport for the clinic API.
//!
//! Every resource has a collection endpoint `/api/{resource}/` and an item endpoint
//! `/api/{resource}/{id}/`. Requests carry `Authorization: Bearer {token}`; the session is
//! checked for expiry before anything is sent.

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use smile_core::constants::{API_PREFIX, PROCEDURES_PATH};
use smile_core::{
    ClientError, ClientResult, CoreConfig, Draft, Procedure, Record, RecordId, RemoteResources,
    ResourceKind, Session,
};

#[derive(Clone, Debug)]
pub struct HttpResources {
    client: Client,
    api_base: String,
}

impl HttpResources {
    pub fn new(cfg: &CoreConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(cfg.http_timeout())
            .build()
            .map_err(|e| ClientError::Transport(Box::new(e)))?;

        Ok(Self {
            client,
            api_base: cfg.api_base().to_string(),
        })
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    fn collection_url(&self, path: &str) -> String {
        format!("{}/{}/{}/", self.api_base, API_PREFIX, path)
    }

    fn item_url(&self, kind: ResourceKind, id: RecordId) -> String {
        format!("{}/{}/{}/{}/", self.api_base, API_PREFIX, kind.path(), id)
    }

    fn request(&self, session: &Session, method: Method, url: &str) -> ClientResult<RequestBuilder> {
        let token = session.authorize()?;
        Ok(self.client.request(method, url).bearer_auth(token))
    }

    async fn send(&self, builder: RequestBuilder, url: &str) -> ClientResult<Response> {
        let response = builder
            .send()
            .await
            .map_err(|e| ClientError::Transport(Box::new(e)))?;

        let status = response.status();
        tracing::debug!("{} -> {}", url, status);
        if !status.is_success() {
            return Err(ClientError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(response)
    }

    async fn fetch<T: DeserializeOwned>(&self, builder: RequestBuilder, url: &str) -> ClientResult<T> {
        let response = self.send(builder, url).await?;
        let body = response
            .bytes()
            .await
            .map_err(|e| ClientError::Transport(Box::new(e)))?;
        serde_json::from_slice(&body).map_err(|e| ClientError::Decode(Box::new(e)))
    }
}

#[async_trait]
impl RemoteResources for HttpResources {
    async fn list(&self, session: &Session, kind: ResourceKind) -> ClientResult<Vec<Record>> {
        let url = self.collection_url(kind.path());
        let builder = self.request(session, Method::GET, &url)?;
        self.fetch(builder, &url).await
    }

    async fn get(
        &self,
        session: &Session,
        kind: ResourceKind,
        id: RecordId,
    ) -> ClientResult<Record> {
        let url = self.item_url(kind, id);
        let builder = self.request(session, Method::GET, &url)?;
        self.fetch(builder, &url).await
    }

    async fn create(&self, session: &Session, draft: &Draft) -> ClientResult<Record> {
        let url = self.collection_url(draft.kind().path());
        let builder = self
            .request(session, Method::POST, &url)?
            .json(&draft.to_body());
        self.fetch(builder, &url).await
    }

    async fn update(&self, session: &Session, id: RecordId, draft: &Draft) -> ClientResult<Record> {
        let url = self.item_url(draft.kind(), id);
        let builder = self
            .request(session, Method::PUT, &url)?
            .json(&draft.to_body());
        self.fetch(builder, &url).await
    }

    async fn delete(&self, session: &Session, kind: ResourceKind, id: RecordId) -> ClientResult<()> {
        let url = self.item_url(kind, id);
        let builder = self.request(session, Method::DELETE, &url)?;
        self.send(builder, &url).await?;
        Ok(())
    }

    async fn procedures(&self, session: &Session) -> ClientResult<Vec<Procedure>> {
        let url = self.collection_url(PROCEDURES_PATH);
        let builder = self.request(session, Method::GET, &url)?;
        self.fetch(builder, &url).await
    }
}
