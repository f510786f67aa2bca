//! Request envelope shared by every gateway operation
//!
//! The envelope owns the base URL and the default headers, and holds a handle
//! to the HTTP transport. One call to [`RequestEnvelope::execute`] is exactly
//! one HTTP round trip: no retries, no caching, no streaming.
//!
//! ## Request assembly
//!
//! ```text
//! endpoint = base_url + path [+ "?" + form-encoded query, keys sorted]
//! headers  = default headers, then per-call headers (same name wins)
//!            + Content-Type: application/json when a body is present
//! ```

use crate::error::{SdkError, SdkResult};
use crate::logging::log_debug;
use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use url::form_urlencoded;

/// Placeholder for calls that send no body.
///
/// `execute` is generic over the body type, so a bare `None` needs a type.
pub const NO_BODY: Option<&serde_json::Value> = None;

const JSON_NULL: &[u8] = b"null";

/// HTTP verbs used by the gateway API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = SdkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Method::Get),
            "POST" => Ok(Method::Post),
            "PATCH" => Ok(Method::Patch),
            "DELETE" => Ok(Method::Delete),
            other => Err(SdkError::configuration(format!(
                "Unsupported HTTP method: {other}"
            ))),
        }
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Base URL, default headers and transport for gateway calls
///
/// Cloning is cheap: the transport's connection pool is shared between
/// clones, while each clone owns its own copy of the headers.
#[derive(Debug, Clone)]
pub struct RequestEnvelope {
    base_url: String,
    headers: HashMap<String, String>,
    http: reqwest::Client,
}

impl RequestEnvelope {
    /// Create an envelope; trailing slashes are stripped from `base_url`
    pub fn new(base_url: impl Into<String>, http: reqwest::Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            headers: HashMap::new(),
            http,
        }
    }

    /// Replace all default headers
    pub fn with_headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers.clear();
        for (name, value) in headers {
            self.set_header(name, value);
        }
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    pub fn http_client(&self) -> &reqwest::Client {
        &self.http
    }

    /// Set a default header, replacing any existing one with the same
    /// case-insensitive name. Returns the replaced value.
    pub fn set_header(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Option<String> {
        let name = name.into();
        let previous = self.remove_header(&name);
        self.headers.insert(name, value.into());
        previous
    }

    /// Remove a default header by case-insensitive name
    pub fn remove_header(&mut self, name: &str) -> Option<String> {
        let key = self
            .headers
            .keys()
            .find(|k| k.eq_ignore_ascii_case(name))
            .cloned()?;
        self.headers.remove(&key)
    }

    /// Full request URL for `path` and `query`
    pub fn endpoint(&self, path: &str, query: &HashMap<String, String>) -> String {
        let mut endpoint = format!("{}{}", self.base_url, path);
        if !query.is_empty() {
            let mut pairs: Vec<(&String, &String)> = query.iter().collect();
            pairs.sort();
            let encoded = form_urlencoded::Serializer::new(String::new())
                .extend_pairs(pairs)
                .finish();
            endpoint.push('?');
            endpoint.push_str(&encoded);
        }
        endpoint
    }

    /// Assemble the outgoing request without sending it
    ///
    /// A body that encodes to JSON `null` is treated as no body.
    ///
    /// # Errors
    ///
    /// - [`SdkError::Serialization`] if `body` cannot be encoded as JSON
    /// - [`SdkError::Configuration`] if a header name or value is not valid HTTP
    /// - [`SdkError::Transport`] if the transport rejects the assembled URL
    pub fn build_request<B>(
        &self,
        method: Method,
        path: &str,
        query: &HashMap<String, String>,
        headers: &HashMap<String, String>,
        body: Option<&B>,
    ) -> SdkResult<reqwest::Request>
    where
        B: Serialize + ?Sized,
    {
        let payload = body
            .map(|body| {
                serde_json::to_vec(body).map_err(|e| {
                    SdkError::serialization(format!("Failed to encode body for {method} {path}"), e)
                })
            })
            .transpose()?
            .filter(|bytes| bytes.as_slice() != JSON_NULL);

        let mut header_map = self.merge_headers(headers)?;
        if payload.is_some() {
            header_map.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }

        let endpoint = self.endpoint(path, query);
        let mut builder = self
            .http
            .request(method.into(), endpoint.as_str())
            .headers(header_map);
        if let Some(payload) = payload {
            builder = builder.body(payload);
        }

        builder.build().map_err(|e| {
            SdkError::transport(
                format!("Failed to build request for {endpoint}: {e}"),
                Some(Box::new(e)),
            )
        })
    }

    /// Perform one HTTP round trip and return the raw response body
    ///
    /// On a 2xx status the full body is returned untouched; decoding is the
    /// caller's job (see [`crate::decode`]). Any other status yields
    /// [`SdkError::HttpStatus`] and the body is dropped.
    ///
    /// # Errors
    ///
    /// - [`SdkError::Serialization`] if `body` cannot be encoded as JSON
    /// - [`SdkError::Transport`] if no complete response was received
    /// - [`SdkError::HttpStatus`] if the status is not a success
    /// - [`SdkError::Configuration`] if a header name or value is not valid HTTP
    pub async fn execute<B>(
        &self,
        method: Method,
        path: &str,
        query: &HashMap<String, String>,
        headers: &HashMap<String, String>,
        body: Option<&B>,
    ) -> SdkResult<Bytes>
    where
        B: Serialize + ?Sized,
    {
        let request = self.build_request(method, path, query, headers, body)?;

        log_debug!(
            method = %method,
            path = %path,
            query_params = query.len(),
            has_body = request.body().is_some(),
            "Sending gateway request"
        );

        let response = self.http.execute(request).await.map_err(|e| {
            SdkError::transport(format!("{method} {path} failed: {e}"), Some(Box::new(e)))
        })?;

        let status = response.status();
        log_debug!(
            method = %method,
            path = %path,
            status = status.as_u16(),
            "Gateway responded"
        );

        if !status.is_success() {
            return Err(SdkError::http_status(
                status.as_u16(),
                status.canonical_reason().unwrap_or_default(),
            ));
        }

        response.bytes().await.map_err(|e| {
            SdkError::transport(
                format!("Failed to read response body for {method} {path}: {e}"),
                Some(Box::new(e)),
            )
        })
    }

    /// Defaults first, then per-call headers; a per-call header replaces a
    /// default with the same (case-insensitive) name.
    ///
    /// Per-call names that differ only in case are applied in byte order of
    /// the name, so the one sorting last wins.
    fn merge_headers(&self, extra: &HashMap<String, String>) -> SdkResult<HeaderMap> {
        let mut per_call: Vec<(&String, &String)> = extra.iter().collect();
        per_call.sort();

        let mut merged = HeaderMap::with_capacity(self.headers.len() + extra.len());
        for (name, value) in self.headers.iter().chain(per_call) {
            merged.insert(parse_header_name(name)?, parse_header_value(name, value)?);
        }
        Ok(merged)
    }
}

fn parse_header_name(name: &str) -> SdkResult<HeaderName> {
    HeaderName::from_bytes(name.as_bytes())
        .map_err(|e| SdkError::configuration(format!("Invalid header name '{name}': {e}")))
}

fn parse_header_value(name: &str, value: &str) -> SdkResult<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|e| SdkError::configuration(format!("Invalid value for header '{name}': {e}")))
}
