use anyhow::{anyhow, Result};
use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE},
    Client, Method,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error};

use shared_config::AppConfig;

/// Thin typed client over a PostgREST endpoint. Every entity store in the
/// workspace goes through this: rows in, rows out, one table per call.
pub struct PostgrestClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl PostgrestClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.postgrest_url.clone(),
            api_key: config.postgrest_api_key.clone(),
        }
    }

    fn headers(&self, representation: bool) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("apikey", HeaderValue::from_str(&self.api_key).unwrap_or(HeaderValue::from_static("")));
        if let Ok(bearer) = HeaderValue::from_str(&format!("Bearer {}", self.api_key)) {
            headers.insert(AUTHORIZATION, bearer);
        }
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if representation {
            headers.insert("Prefer", HeaderValue::from_static("return=representation"));
        }
        headers
    }

    async fn send(
        &self,
        method: Method,
        table: &str,
        query: &str,
        body: Option<Value>,
        representation: bool,
    ) -> Result<reqwest::Response> {
        let url = if query.is_empty() {
            format!("{}/rest/v1/{}", self.base_url, table)
        } else {
            format!("{}/rest/v1/{}?{}", self.base_url, table, query)
        };
        debug!("PostgREST {} {}", method, url);

        let mut req = self
            .client
            .request(method, &url)
            .headers(self.headers(representation));
        if let Some(body) = body {
            req = req.json(&body);
        }

        let response = req.send().await?;
        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            error!("PostgREST error ({}): {}", status, detail);
            return Err(anyhow!("PostgREST error ({}): {}", status, detail));
        }

        Ok(response)
    }

    async fn request<T>(
        &self,
        method: Method,
        table: &str,
        query: &str,
        body: Option<Value>,
        representation: bool,
    ) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let response = self.send(method, table, query, body, representation).await?;
        Ok(response.json::<T>().await?)
    }

    /// Fetch rows matching a PostgREST filter string, e.g. `id=eq.4`.
    pub async fn select<T>(&self, table: &str, query: &str) -> Result<Vec<T>>
    where
        T: DeserializeOwned,
    {
        self.request(Method::GET, table, query, None, false).await
    }

    /// Insert one row and return the stored representation.
    pub async fn insert_one<T>(&self, table: &str, row: Value) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let mut rows: Vec<T> = self
            .request(Method::POST, table, "", Some(row), true)
            .await?;
        if rows.is_empty() {
            return Err(anyhow!("insert into {} returned no representation", table));
        }
        Ok(rows.remove(0))
    }

    /// Patch all rows matching the filter; returns the updated rows (empty
    /// when nothing matched).
    pub async fn update_where<T>(&self, table: &str, query: &str, patch: Value) -> Result<Vec<T>>
    where
        T: DeserializeOwned,
    {
        self.request(Method::PATCH, table, query, Some(patch), true)
            .await
    }

    /// Delete all rows matching the filter. PostgREST answers 204 with no
    /// body, so the response is only checked, never parsed.
    pub async fn delete_where(&self, table: &str, query: &str) -> Result<()> {
        self.send(Method::DELETE, table, query, None, false).await?;
        Ok(())
    }
}
