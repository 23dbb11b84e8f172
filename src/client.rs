//! HTTP client for a Sashimi project.
//!
//! A project is addressed by its URL (e.g. `http://localhost:8000/ds/sandbox`);
//! datasets live directly below it.

use reqwest::blocking::{Client, RequestBuilder};
use serde_json::{json, Value};
use url::Url;

use crate::error::Result;
use crate::http;
use crate::query::QueryRequest;

pub const TOKEN_ENV: &str = "SASHIMI_TOKEN";

pub fn user_agent() -> String {
    format!("sashimi_client/{}", env!("CARGO_PKG_VERSION"))
}

pub struct SashimiClient {
    http: Client,
    project_url: Url,
    token: Option<String>,
}

impl SashimiClient {
    /// Falls back to `$SASHIMI_TOKEN` when no token is given.
    pub fn new(project_url: &str, token: Option<String>) -> Result<Self> {
        let token = token.or_else(|| std::env::var(TOKEN_ENV).ok());
        Ok(Self {
            http: http::build_client(&user_agent())?,
            project_url: Url::parse(project_url)?,
            token,
        })
    }

    pub fn project_url(&self) -> &Url {
        &self.project_url
    }

    pub fn ds_url(&self, ds_name: &str) -> Result<Url> {
        http::join(&self.project_url, ds_name)
    }

    pub fn ds_config_url(&self, ds_name: &str) -> Result<Url> {
        http::join(&self.ds_url(ds_name)?, "_config")
    }

    pub fn project_config_url(&self) -> Result<Url> {
        http::join(&self.project_url, "_config")
    }

    fn authed(&self, request: RequestBuilder) -> RequestBuilder {
        http::with_auth(request, self.token.as_deref())
    }

    pub fn info(&self) -> Result<Value> {
        let request = self.authed(self.http.get(self.project_url.clone()));
        Ok(http::send(request)?.json()?)
    }

    /// Remove a whole dataset from the project.
    pub fn rm(&self, ds_name: &str) -> Result<String> {
        let request = self
            .authed(self.http.delete(self.project_url.clone()))
            .json(&json!({ "name": ds_name }));
        Ok(http::send(request)?.text()?)
    }

    /// Create or replace a dataset.
    pub fn put(&self, ds_name: &str, dataset: &[Value], secret: Option<&str>) -> Result<String> {
        tracing::info!(ds = ds_name, records = dataset.len(), "uploading dataset");
        let request = self.authed(self.http.put(self.project_url.clone())).json(&json!({
            "ds": dataset,
            "name": ds_name,
            "secret": secret,
        }));
        Ok(http::send(request)?.text()?)
    }

    fn query_request(&self, ds_name: &str, query: &QueryRequest) -> Result<RequestBuilder> {
        // Queries are public; the token is not sent.
        Ok(self.http.post(self.ds_url(ds_name)?).json(query))
    }

    pub fn query(&self, ds_name: &str, query: &QueryRequest) -> Result<Value> {
        tracing::debug!(ds = ds_name, ?query, "query");
        let request = self.query_request(ds_name, query)?;
        Ok(http::send(request)?.json()?)
    }

    /// Run a query stored on the server under `name`. The response is returned
    /// whatever its status, since the server reports errors in the JSON body.
    pub fn named_query(&self, ds_name: &str, name: &str) -> Result<Value> {
        let url = http::join(&self.ds_url(ds_name)?, name)?;
        let response = self.http.get(url).send()?;
        Ok(response.json()?)
    }

    /// Delete the records matching `expr`.
    pub fn delete(&self, ds_name: &str, expr: &str) -> Result<String> {
        let request = self
            .authed(self.http.patch(self.ds_url(ds_name)?))
            .json(&json!({ "op": "delete", "expr": expr }));
        Ok(http::send(request)?.text()?)
    }

    /// Set `field` to `update_expr` in the records matching `where_expr`.
    pub fn update(
        &self,
        ds_name: &str,
        where_expr: &str,
        field: &str,
        update_expr: &str,
    ) -> Result<String> {
        let request = self
            .authed(self.http.patch(self.ds_url(ds_name)?))
            .json(&json!({
                "op": "update",
                "expr": where_expr,
                "update": { field: update_expr },
            }));
        Ok(http::send(request)?.text()?)
    }

    /// Insert one record. The server expects it JSON-encoded inside `data`.
    pub fn insert(&self, ds_name: &str, record: &Value) -> Result<String> {
        let data = serde_json::to_string(record)?;
        let request = self
            .authed(self.http.put(self.ds_url(ds_name)?))
            .json(&json!({ "data": data }));
        Ok(http::send(request)?.text()?)
    }

    pub fn get_ds_config(&self, ds_name: &str) -> Result<String> {
        let request = self.authed(self.http.get(self.ds_config_url(ds_name)?));
        Ok(http::send(request)?.text()?)
    }

    /// `config` must already be checked YAML, see [`crate::config::load`].
    pub fn set_ds_config(&self, ds_name: &str, config: String) -> Result<String> {
        let request = self
            .authed(self.http.post(self.ds_config_url(ds_name)?))
            .body(config);
        Ok(http::send(request)?.text()?)
    }

    pub fn get_project_config(&self) -> Result<String> {
        let request = self.authed(self.http.get(self.project_config_url()?));
        Ok(http::send(request)?.text()?)
    }

    pub fn set_project_config(&self, config: String) -> Result<String> {
        let request = self
            .authed(self.http.post(self.project_config_url()?))
            .body(config);
        Ok(http::send(request)?.text()?)
    }
}
