use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Deserialize;
use serde_json::json;

use crate::error::{Error, Result};

use super::query::QueryParams;
use super::{Record, RecordPatch, RecordStore};

#[derive(Debug, Deserialize)]
struct FetchEnvelope {
    success: bool,
    #[serde(default)]
    data: Vec<Record>,
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RecordEnvelope {
    success: bool,
    data: Option<Record>,
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MutationEnvelope {
    success: bool,
    #[serde(default)]
    results: Vec<MutationResult>,
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MutationResult {
    success: bool,
    data: Option<Record>,
    message: Option<String>,
}

/// Client for the hosted record-store API.
#[derive(Clone)]
pub struct RemoteStore {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl RemoteStore {
    pub fn new(base_url: String, api_key: Option<String>) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("reqwest client");
        Self {
            client,
            base_url,
            api_key,
        }
    }

    fn records_url(&self, collection: &str) -> String {
        format!("{}/api/collections/{}/records", self.base_url, collection)
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.api_key {
            Some(key) => builder.bearer_auth(key),
            None => builder,
        }
    }

    fn store_error(message: Option<String>) -> Error {
        Error::Store(message.unwrap_or_else(|| "record store reported failure".to_string()))
    }

    fn collect_results(envelope: MutationEnvelope) -> Result<Vec<Record>> {
        if !envelope.success {
            return Err(Self::store_error(envelope.message));
        }
        let failed: Vec<&MutationResult> =
            envelope.results.iter().filter(|r| !r.success).collect();
        if !failed.is_empty() {
            tracing::warn!(count = failed.len(), "record store rejected records");
            let message = failed
                .first()
                .and_then(|r| r.message.clone())
                .unwrap_or_else(|| format!("{} records failed", failed.len()));
            return Err(Error::Store(message));
        }
        Ok(envelope.results.into_iter().filter_map(|r| r.data).collect())
    }
}

#[async_trait::async_trait]
impl RecordStore for RemoteStore {
    async fn fetch(&self, collection: &str, params: QueryParams) -> Result<Vec<Record>> {
        let url = format!("{}/api/collections/{}/query", self.base_url, collection);
        let response = self
            .authorized(self.client.post(&url))
            .json(&params)
            .send()
            .await?;
        let envelope = response.json::<FetchEnvelope>().await?;
        if !envelope.success {
            return Err(Self::store_error(envelope.message));
        }
        Ok(envelope.data)
    }

    async fn get_by_id(&self, collection: &str, id: i64) -> Result<Option<Record>> {
        let url = format!("{}/{}", self.records_url(collection), id);
        let response = self.authorized(self.client.get(&url)).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let envelope = response.json::<RecordEnvelope>().await?;
        if !envelope.success {
            return Err(Self::store_error(envelope.message));
        }
        Ok(envelope.data)
    }

    async fn create(&self, collection: &str, records: Vec<Record>) -> Result<Vec<Record>> {
        let response = self
            .authorized(self.client.post(self.records_url(collection)))
            .json(&json!({ "records": records }))
            .send()
            .await?;
        Self::collect_results(response.json::<MutationEnvelope>().await?)
    }

    async fn update(&self, collection: &str, patches: Vec<RecordPatch>) -> Result<Vec<Record>> {
        let response = self
            .authorized(self.client.patch(self.records_url(collection)))
            .json(&json!({ "records": patches }))
            .send()
            .await?;
        Self::collect_results(response.json::<MutationEnvelope>().await?)
    }

    async fn delete(&self, collection: &str, ids: Vec<i64>) -> Result<()> {
        let response = self
            .authorized(self.client.delete(self.records_url(collection)))
            .json(&json!({ "record_ids": ids }))
            .send()
            .await?;
        let envelope = response.json::<MutationEnvelope>().await?;
        Self::collect_results(envelope)?;
        Ok(())
    }
}
