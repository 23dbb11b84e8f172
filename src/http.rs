//! Plumbing shared by the Sashimi and Exact clients.

use reqwest::blocking::{Client, RequestBuilder, Response};
use url::Url;

use crate::error::{Error, Result};

pub(crate) fn build_client(user_agent: &str) -> Result<Client> {
    Ok(Client::builder().user_agent(user_agent).build()?)
}

/// Attach the bearer token, unless there is none.
pub(crate) fn with_auth(request: RequestBuilder, token: Option<&str>) -> RequestBuilder {
    match token {
        Some(token) if !token.is_empty() => request.bearer_auth(token),
        _ => request,
    }
}

/// Turn a non-2xx response into `Error::Request`, keeping the body for the user.
pub(crate) fn check(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().unwrap_or_default();
    tracing::debug!(%status, body = %body, "request rejected");
    Err(Error::Request { status, body })
}

pub(crate) fn send(request: RequestBuilder) -> Result<Response> {
    let response = request.send()?;
    tracing::debug!(url = %response.url(), status = %response.status(), "response");
    check(response)
}

/// Resolve `segment` below `base`, treating `base` as a directory.
pub(crate) fn join(base: &Url, segment: &str) -> Result<Url> {
    let mut dir = base.clone();
    if !dir.path().ends_with('/') {
        let path = format!("{}/", dir.path());
        dir.set_path(&path);
    }
    Ok(dir.join(segment)?)
}
