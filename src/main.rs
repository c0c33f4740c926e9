//! censys-asm-search
//!
//! This is the main entry point for the application.

use anyhow::Result;
use censys_asm_search::{
    cli::Cli,
    config::{self, mask, Settings},
    export,
    network::HttpClient,
    report::{Reporter, Status},
    Error, Outcome, Pipeline,
};
use clap::Parser;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_filter()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let reporter = cli.reporter();

    match run(cli, reporter.clone()).await {
        Ok(code) => code,
        Err(e) => {
            let (status, message) = match e.downcast_ref::<Error>() {
                Some(err) => describe_failure(err),
                None => (Status::Error, e.to_string()),
            };
            reporter.report(status, &message);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli, reporter: Arc<dyn Reporter>) -> Result<ExitCode> {
    info!("Starting censys-asm-search v{}", censys_asm_search::VERSION);

    // Load configuration
    let mut settings = config::load(cli.config.as_deref())?;
    cli.apply(&mut settings);
    settings.validate()?;

    for (api, url) in settings.overridden_endpoints() {
        reporter.warn(&format!(
            "WARNING! {} queries run through an alternate API location ({}), which is generally not recommended!",
            api, url
        ));
    }

    if cli.api_check {
        print_api_config(&settings, reporter.as_ref());
        return Ok(ExitCode::SUCCESS);
    }

    let credentials = match settings.credentials() {
        Ok(credentials) => {
            reporter.list("Checking API credentials... OK");
            credentials
        }
        Err(e) => {
            reporter.list("Checking API credentials... NOT OK!");
            reporter.error(&format!("{}. Please add API credentials, -h for help", e));
            return Ok(ExitCode::FAILURE);
        }
    };

    let Some(query) = cli.query else {
        debug!("No query given, nothing to search");
        return Ok(ExitCode::SUCCESS);
    };

    let client = HttpClient::with_settings(&settings.outgoing)?;
    let pipeline = Pipeline::new(client, &settings, &credentials, reporter.clone());

    match pipeline.run(&query, cli.filter_tags.as_deref()).await? {
        Outcome::NoHostsFound => {}
        Outcome::Matches(results) => {
            for host in &results {
                if cli.quiet {
                    println!("{}", host);
                } else {
                    reporter.list(&format!("\t{}", host));
                }
            }
            reporter.ok(&format!("Found {} results", results.len()));

            if let Some(ref path) = cli.output {
                export::export_results(path, &results, reporter.as_ref());
            }

            reporter.ok("Query complete, quitting");
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// User-facing message for a failed run
fn describe_failure(err: &Error) -> (Status, String) {
    match err {
        Error::RateLimited { api } => (Status::Error, format!("{} rate limit exceeded!", api)),
        Error::BadQuery { api } => (Status::Error, format!("{}: query could not be parsed", api)),
        Error::Upstream { message, .. } => {
            (Status::Error, format!("An error occurred: {}", message))
        }
        other => (Status::Error, other.to_string()),
    }
}

fn print_api_config(settings: &Settings, reporter: &dyn Reporter) {
    let secret = |value: &Option<String>| match value {
        Some(v) => mask(v),
        None => "<not set>".to_string(),
    };

    reporter.list("CURRENT CENSYS API SETTINGS:");
    println!(
        r#"{}
    [SEARCH API]:
    UID: {}
    SECRET: {}
    URL: {}

    [ASM API]:
    KEY: {}
    URL: {}

    BATCH SIZE: {}
"#,
        "-".repeat(50),
        settings.search.uid.as_deref().unwrap_or("<not set>"),
        secret(&settings.search.secret),
        settings.search.url,
        secret(&settings.asm.key),
        settings.asm.url,
        settings.batch_size,
    );
}
