//! Request and response types for API calls

use crate::error::{Api, Error, Result};
use serde::Deserialize;

/// HTTP method
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// HTTP request to be made against one of the Censys APIs
#[derive(Debug, Clone)]
pub struct ApiRequest {
    /// URL to request
    pub url: String,
    /// HTTP method
    pub method: HttpMethod,
    /// Request headers
    pub headers: Vec<(String, String)>,
    /// Query parameters, in order; a key may repeat
    pub params: Vec<(String, String)>,
    /// Basic auth user and password
    pub basic_auth: Option<(String, String)>,
    /// JSON body
    pub json: Option<serde_json::Value>,
}

impl ApiRequest {
    /// Create a GET request
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(url, HttpMethod::Get)
    }

    /// Create a POST request
    pub fn post(url: impl Into<String>) -> Self {
        Self::new(url, HttpMethod::Post)
    }

    fn new(url: impl Into<String>, method: HttpMethod) -> Self {
        Self {
            url: url.into(),
            method,
            headers: Vec::new(),
            params: Vec::new(),
            basic_auth: None,
            json: None,
        }
    }

    /// Add a header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }

    /// Append a query parameter
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Authenticate with HTTP basic auth
    pub fn basic_auth(mut self, user: impl Into<String>, password: impl Into<String>) -> Self {
        self.basic_auth = Some((user.into(), password.into()));
        self
    }

    /// Add JSON body
    pub fn json(mut self, data: serde_json::Value) -> Self {
        self.json = Some(data);
        self
    }
}

/// HTTP response from an API request
#[derive(Debug)]
pub struct ApiResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body as text
    pub text: String,
    /// Response URL (after redirects)
    pub url: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

impl ApiResponse {
    /// Parse response as JSON
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_str(&self.text)?)
    }

    /// Check if response is successful (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Check if response indicates rate limiting
    pub fn is_rate_limited(&self) -> bool {
        self.status == 429
    }

    /// Check if the API rejected the query
    pub fn is_bad_request(&self) -> bool {
        self.status == 400
    }

    /// The `error` field of the body, or the bare status when there is none
    pub fn error_message(&self) -> String {
        serde_json::from_str::<ErrorBody>(&self.text)
            .map(|body| body.error)
            .unwrap_or_else(|_| format!("HTTP {}", self.status))
    }

    /// Map a non-2xx status to the matching error
    pub fn error_for_status(&self, api: Api) -> Result<()> {
        if self.is_success() {
            Ok(())
        } else if self.is_rate_limited() {
            Err(Error::RateLimited { api })
        } else if self.is_bad_request() {
            Err(Error::BadQuery { api })
        } else {
            Err(Error::Upstream {
                api,
                message: self.error_message(),
            })
        }
    }
}
