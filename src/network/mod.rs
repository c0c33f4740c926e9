//! HTTP networking module
//!
//! Provides the HTTP client and request/response types shared by the ASM
//! fetcher and the search runner.

mod client;
mod request;

pub use client::{endpoint, HttpClient};
pub use request::{ApiRequest, ApiResponse, HttpMethod};
