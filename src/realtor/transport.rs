//! Request description and the blocking HTTP transport.

use std::fmt;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue};
use serde_json::Value;
use tracing::debug;

use super::error::{RealtorError, Result};
use crate::config::RealtorConfig;

/// Upstream endpoints used by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    AutoComplete,
    List,
    SimilarHomes,
    Detail,
    Photos,
    Surroundings,
    CommuteTime,
}

impl Endpoint {
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::AutoComplete => "/locations/v2/auto-complete",
            Endpoint::List => "/properties/v3/list",
            Endpoint::SimilarHomes => "/properties/v3/list-similar-homes",
            Endpoint::Detail => "/properties/v3/detail",
            Endpoint::Photos => "/properties/v3/get-photos",
            Endpoint::Surroundings => "/properties/v3/get-surroundings",
            Endpoint::CommuteTime => "/properties/v3/get-commute-time",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// One outbound call: GET with query parameters, or POST with a JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub endpoint: Endpoint,
    pub query: Vec<(&'static str, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn get(endpoint: Endpoint) -> Self {
        Self { method: Method::Get, endpoint, query: Vec::new(), body: None }
    }

    pub fn post(endpoint: Endpoint, body: Value) -> Self {
        Self { method: Method::Post, endpoint, query: Vec::new(), body: Some(body) }
    }

    pub fn query<S: Into<String>>(mut self, key: &'static str, value: S) -> Self {
        self.query.push((key, value.into()));
        self
    }

    /// Value of a query parameter, if set.
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query.iter().find(|(k, _)| *k == key).map(|(_, v)| v.as_str())
    }
}

/// Status code and raw body of a completed exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn new<S: Into<String>>(status: u16, body: S) -> Self {
        Self { status, body: body.into() }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Carries an [`ApiRequest`] to the realtor API.
///
/// Only failures that prevent a status code from arriving are errors here;
/// status gating is done by the caller.
pub trait Transport: Send + Sync {
    fn send(&self, request: &ApiRequest) -> Result<HttpReply>;
}

/// Blocking `reqwest` transport. The credential and host headers are installed
/// as default headers, the key marked sensitive.
pub struct ReqwestTransport {
    client: Client,
    base_url: String,
}

impl ReqwestTransport {
    pub fn new(config: &RealtorConfig) -> Result<Self> {
        if config.api_key.is_empty() {
            return Err(RealtorError::config("realtor API key is empty"));
        }
        let mut key = HeaderValue::from_str(config.api_key.expose())
            .map_err(|_| RealtorError::config("realtor API key is not a valid header value"))?;
        key.set_sensitive(true);
        let host = HeaderValue::from_str(&config.host)
            .map_err(|_| RealtorError::config(format!("invalid host header: {}", config.host)))?;

        let mut headers = HeaderMap::new();
        headers.insert("X-RapidAPI-Key", key);
        headers.insert("X-RapidAPI-Host", host);

        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .build()
            .map_err(|e| RealtorError::config(format!("building reqwest client: {e}")))?;

        Ok(Self { client, base_url: config.base_url.clone() })
    }

    fn url(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.base_url, endpoint.path())
    }
}

impl Transport for ReqwestTransport {
    fn send(&self, request: &ApiRequest) -> Result<HttpReply> {
        let endpoint = request.endpoint.path();
        let builder = match request.method {
            Method::Get => self.client.get(self.url(request.endpoint)).query(&request.query),
            Method::Post => {
                let builder = self.client.post(self.url(request.endpoint));
                match &request.body {
                    Some(body) => builder.json(body),
                    None => builder,
                }
            }
        };

        let resp = builder
            .send()
            .map_err(|e| RealtorError::Transport { endpoint, message: e.without_url().to_string() })?;
        let status = resp.status().as_u16();
        let body = resp
            .text()
            .map_err(|e| RealtorError::Transport { endpoint, message: e.without_url().to_string() })?;
        debug!(target: "realtor", endpoint, status, len = body.len(), "realtor_response_raw");
        Ok(HttpReply { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reply_success_range() {
        assert!(HttpReply::new(200, "").is_success());
        assert!(HttpReply::new(204, "").is_success());
        assert!(!HttpReply::new(301, "").is_success());
        assert!(!HttpReply::new(429, "").is_success());
        assert!(!HttpReply::new(500, "").is_success());
    }

    #[test]
    fn request_builder_collects_query() {
        let req = ApiRequest::get(Endpoint::Detail).query("property_id", "P1");
        assert_eq!(req.method, Method::Get);
        assert_eq!(req.query_value("property_id"), Some("P1"));
        assert_eq!(req.query_value("limit"), None);
        assert!(req.body.is_none());
    }

    #[test]
    fn transport_rejects_empty_key() {
        let cfg = RealtorConfig::new("");
        assert!(matches!(ReqwestTransport::new(&cfg), Err(RealtorError::Config(_))));
    }

    #[test]
    fn transport_builds_with_key() {
        let cfg = RealtorConfig::new("k").with_base_url("http://127.0.0.1:9/");
        let t = ReqwestTransport::new(&cfg).unwrap();
        assert_eq!(t.url(Endpoint::Photos), "http://127.0.0.1:9/properties/v3/get-photos");
    }
}
