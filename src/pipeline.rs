//! The two-stage ASM → Search pipeline

use crate::asm::AssetInventoryFetcher;
use crate::config::{Credentials, Settings};
use crate::error::Result;
use crate::network::HttpClient;
use crate::report::Reporter;
use crate::search::FederatedSearchRunner;
use crate::types::HostId;
use std::sync::Arc;

/// Terminal, non-error result of a pipeline run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Hosts matching the query; may be empty
    Matches(Vec<HostId>),
    /// The inventory held no hosts, so no search was issued
    NoHostsFound,
}

/// Fetches the ASM inventory, then searches it
pub struct Pipeline {
    fetcher: AssetInventoryFetcher,
    runner: FederatedSearchRunner,
    reporter: Arc<dyn Reporter>,
}

impl Pipeline {
    pub fn new(
        client: HttpClient,
        settings: &Settings,
        credentials: &Credentials,
        reporter: Arc<dyn Reporter>,
    ) -> Self {
        Self {
            fetcher: AssetInventoryFetcher::new(
                client.clone(),
                settings,
                credentials,
                reporter.clone(),
            ),
            runner: FederatedSearchRunner::new(client, settings, credentials),
            reporter,
        }
    }

    /// Find the ASM hosts, optionally limited to `tags`, that match `query`
    pub async fn run(&self, query: &str, tags: Option<&[String]>) -> Result<Outcome> {
        let hosts = self.fetcher.fetch_all(tags).await?;

        if hosts.is_empty() {
            self.reporter.warn("No ASM hosts were found, quitting.");
            return Ok(Outcome::NoHostsFound);
        }

        let matches = self.runner.run(query, &hosts).await?;
        Ok(Outcome::Matches(matches))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Api, Error};
    use crate::report::{RecordingReporter, Status};
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn pipeline(server: &MockServer, reporter: Arc<RecordingReporter>) -> Pipeline {
        let mut settings = Settings::default();
        settings.search.url = format!("{}/search-api", server.uri());
        settings.asm.url = format!("{}/asm-api", server.uri());
        let credentials = Credentials {
            search_uid: "uid".to_string(),
            search_secret: "secret".to_string(),
            asm_key: "asm-key".to_string(),
        };
        Pipeline::new(HttpClient::new().unwrap(), &settings, &credentials, reporter)
    }

    async fn mount_inventory(server: &MockServer, ids: &[&str]) {
        let assets: Vec<_> = ids.iter().map(|id| json!({ "assetId": id })).collect();
        Mock::given(method("GET"))
            .and(path("/asm-api/assets/hosts"))
            .and(query_param("pageNumber", "1"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "assets": assets, "totalPages": 1 })),
            )
            .expect(1)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_run_returns_matches() {
        let server = MockServer::start().await;
        mount_inventory(&server, &["10.0.0.1", "10.0.0.2"]).await;
        Mock::given(method("POST"))
            .and(path("/search-api/search/ipv4"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "results": [{ "ip": "10.0.0.2" }] })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let reporter = Arc::new(RecordingReporter::default());
        let outcome = pipeline(&server, reporter)
            .run("services.port: 443", None)
            .await
            .unwrap();

        assert_eq!(outcome, Outcome::Matches(vec![HostId::from("10.0.0.2")]));
    }

    #[tokio::test]
    async fn test_empty_inventory_skips_search() {
        let server = MockServer::start().await;
        mount_inventory(&server, &[]).await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let reporter = Arc::new(RecordingReporter::default());
        let outcome = pipeline(&server, reporter.clone())
            .run("services.port: 443", None)
            .await
            .unwrap();

        assert_eq!(outcome, Outcome::NoHostsFound);
        assert_eq!(
            reporter.with_status(Status::Warn),
            vec!["No ASM hosts were found, quitting."]
        );
    }

    #[tokio::test]
    async fn test_inventory_rate_limit_skips_search() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(429))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let reporter = Arc::new(RecordingReporter::default());
        let result = pipeline(&server, reporter).run("x", None).await;

        assert!(matches!(result, Err(Error::RateLimited { api: Api::Asm })));
    }
}
