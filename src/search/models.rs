//! Search batches and Censys Search request/response models

use crate::types::HostId;
use serde::{Deserialize, Serialize};

/// Fields requested for every matched host
pub const RESULT_FIELDS: [&str; 1] = ["ip"];

/// A contiguous slice of the host list, searched with a single query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchBatch<'a> {
    /// Zero-based position of the batch
    pub index: usize,
    pub hosts: &'a [HostId],
}

impl SearchBatch<'_> {
    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }

    /// `(ip:<h1> OR ip:<h2> ...) AND <query>`
    pub fn composite_query(&self, query: &str) -> String {
        let clause = self
            .hosts
            .iter()
            .map(HostId::as_str)
            .collect::<Vec<_>>()
            .join(" OR ip:");
        format!("(ip:{}) AND {}", clause, query)
    }
}

/// Split hosts into non-overlapping batches of at most `batch_size`, in order
///
/// A `batch_size` of zero is treated as one.
pub fn partition(hosts: &[HostId], batch_size: usize) -> impl Iterator<Item = SearchBatch<'_>> {
    hosts
        .chunks(batch_size.max(1))
        .enumerate()
        .map(|(index, hosts)| SearchBatch { index, hosts })
}

/// Number of batches `partition` yields for `host_count` hosts
pub fn batch_count(host_count: usize, batch_size: usize) -> usize {
    host_count.div_ceil(batch_size.max(1))
}

/// Body of `POST search/ipv4`
#[derive(Debug, Clone, Serialize)]
pub struct SearchRequestBody<'a> {
    pub query: String,
    pub fields: &'a [&'a str],
}

/// One hit in a search response
#[derive(Debug, Clone, Deserialize)]
pub struct SearchHit {
    #[serde(default)]
    pub ip: Option<HostId>,
}

/// Body of a successful search response
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<SearchHit>,
}
