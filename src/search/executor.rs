//! Batched search execution against Censys Search

use super::models::{
    batch_count, partition, SearchBatch, SearchRequestBody, SearchResponse, RESULT_FIELDS,
};
use crate::config::{Credentials, Settings};
use crate::error::{Api, Result};
use crate::network::{endpoint, ApiRequest, HttpClient};
use crate::types::HostId;
use tracing::{debug, info};

/// Runs one search query per batch of hosts and merges the matches
pub struct FederatedSearchRunner {
    /// HTTP client for making requests
    client: HttpClient,
    /// `{search_url}/search/ipv4`
    search_url: String,
    uid: String,
    secret: String,
    batch_size: usize,
}

impl FederatedSearchRunner {
    /// Create a runner against the configured search API
    pub fn new(client: HttpClient, settings: &Settings, credentials: &Credentials) -> Self {
        Self {
            client,
            search_url: endpoint(&settings.search.url, "search/ipv4"),
            uid: credentials.search_uid.clone(),
            secret: credentials.search_secret.clone(),
            batch_size: settings.batch_size.max(1),
        }
    }

    /// Search `query` among `hosts`, returning matched IPs in batch order
    ///
    /// Batches run one after another. Any failing batch fails the whole run
    /// and the matches of earlier batches are dropped.
    pub async fn run(&self, query: &str, hosts: &[HostId]) -> Result<Vec<HostId>> {
        let total = batch_count(hosts.len(), self.batch_size);
        info!(
            "Executing search '{}' over {} hosts in {} batches",
            query,
            hosts.len(),
            total
        );

        let mut results = Vec::new();
        for batch in partition(hosts, self.batch_size) {
            debug!(
                "Searching batch {}/{} ({} hosts)",
                batch.index + 1,
                total,
                batch.len()
            );
            let matched = self.search_batch(query, batch).await?;
            debug!("Batch {} matched {} hosts", batch.index + 1, matched.len());
            results.extend(matched);
        }

        Ok(results)
    }

    /// Issue the search request for a single batch
    pub async fn search_batch(&self, query: &str, batch: SearchBatch<'_>) -> Result<Vec<HostId>> {
        let body = SearchRequestBody {
            query: batch.composite_query(query),
            fields: &RESULT_FIELDS,
        };

        let request = ApiRequest::post(&self.search_url)
            .basic_auth(&self.uid, &self.secret)
            .json(serde_json::to_value(&body)?);

        let response = self.client.execute(request).await?;
        response.error_for_status(Api::Search)?;

        let data: SearchResponse = response.json()?;
        let mut matched = Vec::with_capacity(data.results.len());
        for hit in data.results {
            match hit.ip {
                Some(ip) => matched.push(ip),
                None => debug!("Skipping search result without an ip field"),
            }
        }

        Ok(matched)
    }
}
