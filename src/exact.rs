//! HTTP client for an Exact server. Projects live under `<server>/ds/<project>`.

use reqwest::blocking::{Client, RequestBuilder};
use serde_json::{json, Value};
use url::Url;

use crate::error::Result;
use crate::http;
use crate::query::QueryRequest;

pub fn user_agent() -> String {
    format!("exact_client/{}", env!("CARGO_PKG_VERSION"))
}

pub struct ExactClient {
    http: Client,
    project_url: Url,
    token: Option<String>,
}

impl ExactClient {
    pub fn new(server: &str, project: &str, token: Option<String>) -> Result<Self> {
        let project_url = Url::parse(server)?.join(&format!("/ds/{}", project))?;
        Ok(Self {
            http: http::build_client(&user_agent())?,
            project_url,
            token,
        })
    }

    pub fn project_url(&self) -> &Url {
        &self.project_url
    }

    pub fn ds_url(&self, ds_name: &str) -> Result<Url> {
        http::join(&self.project_url, ds_name)
    }

    pub fn info(&self) -> Result<Value> {
        let request = http::with_auth(self.http.get(self.project_url.clone()), self.token.as_deref());
        Ok(http::send(request)?.json()?)
    }

    pub fn put(&self, ds_name: &str, dataset: &[Value]) -> Result<String> {
        tracing::info!(ds = ds_name, records = dataset.len(), "uploading dataset");
        let request = http::with_auth(self.http.put(self.ds_url(ds_name)?), self.token.as_deref())
            .json(&json!({ "ds": dataset }));
        Ok(http::send(request)?.text()?)
    }

    fn query_request(&self, ds_name: &str, query: &QueryRequest) -> Result<RequestBuilder> {
        // Exact treats a zero limit as "no limit".
        let mut query = query.clone();
        query.limit = query.limit.filter(|&n| n > 0);
        Ok(self.http.post(self.ds_url(ds_name)?).json(&query))
    }

    pub fn query(&self, ds_name: &str, query: &QueryRequest) -> Result<Value> {
        tracing::debug!(ds = ds_name, ?query, "query");
        let request = self.query_request(ds_name, query)?;
        Ok(http::send(request)?.json()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::query::FilterSet;
    use httpmock::prelude::*;
    use reqwest::header::AUTHORIZATION;

    #[test]
    fn test_project_url_replaces_server_path() {
        let c = ExactClient::new("https://exact.example.com/some/path", "sandbox", None).unwrap();
        assert_eq!(c.project_url().as_str(), "https://exact.example.com/ds/sandbox");
        assert_eq!(
            c.ds_url("products").unwrap().as_str(),
            "https://exact.example.com/ds/sandbox/products"
        );
    }

    #[test]
    fn test_zero_limit_dropped() {
        let c = ExactClient::new("http://localhost:8000/", "sandbox", Some("tok".into())).unwrap();
        let query = QueryRequest::new(FilterSet::new(), None).limit(Some(0));
        let request = c.query_request("products", &query).unwrap().build().unwrap();
        assert!(request.headers().get(AUTHORIZATION).is_none());
        let body: Value =
            serde_json::from_slice(request.body().unwrap().as_bytes().unwrap()).unwrap();
        assert_eq!(body, json!({"expr": "True"}));
    }

    #[test]
    fn test_put_to_dataset_url() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(PUT)
                .path("/ds/sandbox/products")
                .header("authorization", "Bearer tok")
                .json_body(json!({"ds": [{"id": 1}, {"id": 2}]}));
            then.status(200).body("stored");
        });

        let c = ExactClient::new(&server.base_url(), "sandbox", Some("tok".into())).unwrap();
        let text = c.put("products", &[json!({"id": 1}), json!({"id": 2})]).unwrap();
        mock.assert();
        assert_eq!(text, "stored");
    }

    #[test]
    fn test_query_unprocessable() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/ds/sandbox/products");
            then.status(422).json_body(json!({"detail": "bad expr"}));
        });

        let c = ExactClient::new(&server.base_url(), "sandbox", None).unwrap();
        let query = QueryRequest::new(FilterSet::new(), Some("((".into()));
        let err = c.query("products", &query).unwrap_err();
        assert!(matches!(err, Error::Request { status, .. } if status.as_u16() == 422));
    }
}
