//! Paging through the Censys ASM host inventory

use super::models::{AssetPage, AssetPageResponse};
use crate::config::{Credentials, Settings};
use crate::error::{Api, Error, Result};
use crate::network::{endpoint, ApiRequest, HttpClient};
use crate::report::Reporter;
use crate::types::HostId;
use std::sync::Arc;
use tracing::{debug, warn};

/// Fetches every host stored in Censys ASM, optionally restricted to tags
pub struct AssetInventoryFetcher {
    /// HTTP client for making requests
    client: HttpClient,
    /// `{asm_url}/assets/hosts`
    hosts_url: String,
    /// Value of the Censys-Api-Key header
    api_key: String,
    reporter: Arc<dyn Reporter>,
}

impl AssetInventoryFetcher {
    /// Create a fetcher against the configured ASM API
    pub fn new(
        client: HttpClient,
        settings: &Settings,
        credentials: &Credentials,
        reporter: Arc<dyn Reporter>,
    ) -> Self {
        Self {
            client,
            hosts_url: endpoint(&settings.asm.url, "assets/hosts"),
            api_key: credentials.asm_key.clone(),
            reporter,
        }
    }

    /// Collect the hosts of every inventory page, in page order
    ///
    /// A 429 or 400 aborts the whole fetch. Any other error status stops
    /// paging and returns the hosts gathered so far. The result may be empty.
    pub async fn fetch_all(&self, tags: Option<&[String]>) -> Result<Vec<HostId>> {
        self.reporter.ok("Collecting ASM hosts in assets");

        let mut hosts = Vec::new();
        let mut page_number = 1;

        loop {
            let page = match self.fetch_page(page_number, tags).await {
                Ok(page) => page,
                Err(Error::Upstream { message, .. }) => {
                    warn!(
                        "ASM page {} failed, keeping {} hosts: {}",
                        page_number,
                        hosts.len(),
                        message
                    );
                    self.reporter
                        .error(&format!("An error occurred: {}", message));
                    break;
                }
                Err(e) => return Err(e),
            };

            debug!(
                "ASM page {}/{} returned {} hosts",
                page.page_number,
                page.total_pages,
                page.assets.len()
            );

            let last = page.is_last();
            hosts.extend(page.assets);

            if last {
                break;
            }
            page_number += 1;
        }

        self.reporter
            .ok(&format!("Found {} stored hosts in ASM", hosts.len()));

        Ok(hosts)
    }

    /// Fetch a single inventory page
    pub async fn fetch_page(&self, page_number: u32, tags: Option<&[String]>) -> Result<AssetPage> {
        let request = self.page_request(page_number, tags);
        let response = self.client.execute(request).await?;
        response.error_for_status(Api::Asm)?;

        let body: AssetPageResponse = response.json()?;
        Ok(AssetPage::from_response(page_number, body))
    }

    fn page_request(&self, page_number: u32, tags: Option<&[String]>) -> ApiRequest {
        let mut request = ApiRequest::get(&self.hosts_url)
            .header("Censys-Api-Key", &self.api_key)
            .param("pageNumber", page_number.to_string());

        for tag in tags.unwrap_or_default() {
            request = request.param("tag", tag);
        }

        request
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{RecordingReporter, Status};
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fetcher(server: &MockServer, reporter: Arc<RecordingReporter>) -> AssetInventoryFetcher {
        let mut settings = Settings::default();
        settings.asm.url = server.uri();
        let credentials = Credentials {
            search_uid: "uid".to_string(),
            search_secret: "secret".to_string(),
            asm_key: "asm-key".to_string(),
        };
        AssetInventoryFetcher::new(HttpClient::new().unwrap(), &settings, &credentials, reporter)
    }

    fn page_body(ids: &[&str], total_pages: u32) -> serde_json::Value {
        let assets: Vec<_> = ids.iter().map(|id| json!({ "assetId": id })).collect();
        json!({ "assets": assets, "totalPages": total_pages })
    }

    async fn mount_page(server: &MockServer, page: u32, template: ResponseTemplate, times: u64) {
        Mock::given(method("GET"))
            .and(path("/assets/hosts"))
            .and(query_param("pageNumber", page.to_string().as_str()))
            .and(header("Censys-Api-Key", "asm-key"))
            .respond_with(template)
            .expect(times)
            .mount(server)
            .await;
    }

    fn hosts(ids: &[&str]) -> Vec<HostId> {
        ids.iter().map(|id| HostId::from(*id)).collect()
    }

    #[tokio::test]
    async fn test_fetch_all_pages_in_order() {
        let server = MockServer::start().await;
        let ok = |ids: &[&str]| ResponseTemplate::new(200).set_body_json(page_body(ids, 3));
        mount_page(&server, 1, ok(&["10.0.0.1", "10.0.0.2"]), 1).await;
        mount_page(&server, 2, ok(&["10.0.0.3"]), 1).await;
        mount_page(&server, 3, ok(&["10.0.0.4", "10.0.0.5"]), 1).await;

        let reporter = Arc::new(RecordingReporter::default());
        let result = fetcher(&server, reporter.clone()).fetch_all(None).await.unwrap();

        assert_eq!(
            result,
            hosts(&["10.0.0.1", "10.0.0.2", "10.0.0.3", "10.0.0.4", "10.0.0.5"])
        );
        assert_eq!(server.received_requests().await.unwrap().len(), 3);
        assert!(reporter
            .with_status(Status::Ok)
            .contains(&"Found 5 stored hosts in ASM".to_string()));
    }

    #[tokio::test]
    async fn test_zero_total_pages_issues_one_request() {
        let server = MockServer::start().await;
        mount_page(
            &server,
            1,
            ResponseTemplate::new(200).set_body_json(page_body(&[], 0)),
            1,
        )
        .await;
        mount_page(&server, 2, ResponseTemplate::new(200), 0).await;

        let reporter = Arc::new(RecordingReporter::default());
        let result = fetcher(&server, reporter).fetch_all(None).await.unwrap();

        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_rate_limit_aborts_without_partial_hosts() {
        let server = MockServer::start().await;
        mount_page(
            &server,
            1,
            ResponseTemplate::new(200).set_body_json(page_body(&["10.0.0.1"], 3)),
            1,
        )
        .await;
        mount_page(
            &server,
            2,
            ResponseTemplate::new(429).set_body_json(json!({ "error": "slow down" })),
            1,
        )
        .await;
        mount_page(&server, 3, ResponseTemplate::new(200), 0).await;

        let reporter = Arc::new(RecordingReporter::default());
        let result = fetcher(&server, reporter).fetch_all(None).await;

        assert!(matches!(result, Err(Error::RateLimited { api: Api::Asm })));
    }

    #[tokio::test]
    async fn test_bad_request_aborts() {
        let server = MockServer::start().await;
        mount_page(&server, 1, ResponseTemplate::new(400), 1).await;

        let reporter = Arc::new(RecordingReporter::default());
        let result = fetcher(&server, reporter).fetch_all(None).await;

        assert!(matches!(result, Err(Error::BadQuery { api: Api::Asm })));
    }

    #[tokio::test]
    async fn test_server_error_keeps_collected_hosts() {
        let server = MockServer::start().await;
        mount_page(
            &server,
            1,
            ResponseTemplate::new(200).set_body_json(page_body(&["10.0.0.1", "10.0.0.2"], 3)),
            1,
        )
        .await;
        mount_page(
            &server,
            2,
            ResponseTemplate::new(500).set_body_json(json!({ "error": "backend unavailable" })),
            1,
        )
        .await;
        mount_page(&server, 3, ResponseTemplate::new(200), 0).await;

        let reporter = Arc::new(RecordingReporter::default());
        let result = fetcher(&server, reporter.clone()).fetch_all(None).await.unwrap();

        assert_eq!(result, hosts(&["10.0.0.1", "10.0.0.2"]));
        assert_eq!(
            reporter.with_status(Status::Error),
            vec!["An error occurred: backend unavailable"]
        );
    }

    #[tokio::test]
    async fn test_tags_are_repeated_query_params() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/assets/hosts"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page_body(&["10.0.0.9"], 1)))
            .expect(1)
            .mount(&server)
            .await;

        let tags = vec!["production".to_string(), "web servers".to_string()];
        let reporter = Arc::new(RecordingReporter::default());
        let result = fetcher(&server, reporter)
            .fetch_all(Some(tags.as_slice()))
            .await
            .unwrap();
        assert_eq!(result, hosts(&["10.0.0.9"]));

        let requests = server.received_requests().await.unwrap();
        let pairs: Vec<(String, String)> = requests[0]
            .url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("pageNumber".to_string(), "1".to_string()),
                ("tag".to_string(), "production".to_string()),
                ("tag".to_string(), "web servers".to_string()),
            ]
        );
    }
}
