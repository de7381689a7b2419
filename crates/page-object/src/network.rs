//! Stubbed HTTP responses.
//!
//! Page objects prepare responses on a mock server before the application
//! requests them. The server itself is a capability ([`MockServer`]);
//! [`StubServer`] is an in-memory implementation that records stubs and
//! answers requests against them.

use crate::result::{PageError, PageResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Mutex};

/// Content type used when a stub does not set headers
pub const DEFAULT_CONTENT_TYPE: &str = "application/vnd.api+json";

/// HTTP methods a stub can answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpMethod {
    /// GET request
    Get,
    /// POST request
    Post,
    /// PUT request
    Put,
    /// PATCH request
    Patch,
    /// DELETE request
    Delete,
    /// HEAD request
    Head,
    /// OPTIONS request
    Options,
}

impl HttpMethod {
    /// Parse a method name, ignoring case
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "get" => Some(Self::Get),
            "post" => Some(Self::Post),
            "put" => Some(Self::Put),
            "patch" => Some(Self::Patch),
            "delete" => Some(Self::Delete),
            "head" => Some(Self::Head),
            "options" => Some(Self::Options),
            _ => None,
        }
    }

    /// Upper-case method name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
            Self::Head => "HEAD",
            Self::Options => "OPTIONS",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A canned response: status, headers and serialized body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseStub {
    /// HTTP status code
    pub status: u16,
    /// Response headers
    pub headers: BTreeMap<String, String>,
    /// Serialized body
    pub body: String,
}

impl ResponseStub {
    /// Header value by name
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    /// Parse the body as JSON
    pub fn body_json<T: for<'de> Deserialize<'de>>(&self) -> PageResult<T> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

/// Options for [`crate::PageObject::prepare_response`]
#[derive(Debug, Clone, Default)]
pub struct ResponseOptions {
    method: Option<String>,
    response: Option<serde_json::Value>,
    status: Option<u16>,
    headers: Option<BTreeMap<String, String>>,
}

impl ResponseOptions {
    /// Defaults: `GET`, status 200, JSON:API content type, body `{}`
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// HTTP method, case-insensitive
    #[must_use]
    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    /// Response body
    #[must_use]
    pub fn response(mut self, body: serde_json::Value) -> Self {
        self.response = Some(body);
        self
    }

    /// Response body from any serializable value
    pub fn with_json<T: Serialize>(mut self, body: &T) -> PageResult<Self> {
        self.response = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    /// Status code
    #[must_use]
    pub const fn status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Add a header; replaces the default headers
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let _ = self
            .headers
            .get_or_insert_with(BTreeMap::new)
            .insert(name.into(), value.into());
        self
    }

    /// Method the stub will be registered for
    pub fn resolved_method(&self) -> PageResult<HttpMethod> {
        match &self.method {
            None => Ok(HttpMethod::Get),
            Some(m) => HttpMethod::parse(m).ok_or_else(|| PageError::UnsupportedMethod {
                method: m.clone(),
            }),
        }
    }

    /// Resolve defaults into a method and a response stub
    pub fn resolve(self) -> PageResult<(HttpMethod, ResponseStub)> {
        let method = self.resolved_method()?;
        let body = self
            .response
            .unwrap_or_else(|| serde_json::Value::Object(serde_json::Map::new()));
        let headers = self.headers.unwrap_or_else(|| {
            BTreeMap::from([("Content-Type".to_string(), DEFAULT_CONTENT_TYPE.to_string())])
        });
        let stub = ResponseStub {
            status: self.status.unwrap_or(200),
            headers,
            body: serde_json::to_string(&body)?,
        };
        Ok((method, stub))
    }
}

/// Mock HTTP server capability
pub trait MockServer: Send + Sync {
    /// Answer `method path` with `response` from now on
    fn register(&self, method: HttpMethod, path: &str, response: ResponseStub);
}

/// A registered stub
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StubRoute {
    /// Method answered
    pub method: HttpMethod,
    /// Exact path answered
    pub path: String,
    /// Response returned
    pub response: ResponseStub,
}

/// A request answered by [`StubServer`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandledRequest {
    /// Request method
    pub method: HttpMethod,
    /// Request path
    pub path: String,
    /// Whether a stub answered it
    pub matched: bool,
}

/// In-memory stub server
///
/// Clones share routes and request log. The most recent registration for a
/// method and path wins.
#[derive(Debug, Clone, Default)]
pub struct StubServer {
    routes: Arc<Mutex<Vec<StubRoute>>>,
    requests: Arc<Mutex<Vec<HandledRequest>>>,
}

impl StubServer {
    /// Create an empty server
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer a request from the registered stubs.
    ///
    /// Every call is recorded in [`StubServer::requests`], matched or not.
    pub fn handle(&self, method: HttpMethod, path: &str) -> Option<ResponseStub> {
        let response = self.routes.lock().ok().and_then(|routes| {
            routes
                .iter()
                .rev()
                .find(|r| r.method == method && r.path == path)
                .map(|r| r.response.clone())
        });
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(HandledRequest {
                method,
                path: path.to_string(),
                matched: response.is_some(),
            });
        }
        response
    }

    /// Registered stubs, oldest first
    #[must_use]
    pub fn routes(&self) -> Vec<StubRoute> {
        self.routes.lock().map(|r| r.clone()).unwrap_or_default()
    }

    /// Number of registered stubs
    #[must_use]
    pub fn route_count(&self) -> usize {
        self.routes.lock().map(|r| r.len()).unwrap_or(0)
    }

    /// Requests answered so far
    #[must_use]
    pub fn requests(&self) -> Vec<HandledRequest> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }

    /// Remove every stub and forget handled requests
    pub fn reset(&self) {
        if let Ok(mut routes) = self.routes.lock() {
            routes.clear();
        }
        if let Ok(mut requests) = self.requests.lock() {
            requests.clear();
        }
    }
}

impl MockServer for StubServer {
    fn register(&self, method: HttpMethod, path: &str, response: ResponseStub) {
        tracing::debug!(%method, path, status = response.status, "stub registered");
        if let Ok(mut routes) = self.routes.lock() {
            routes.push(StubRoute {
                method,
                path: path.to_string(),
                response,
            });
        }
    }
}
