//! censys-asm-search: Censys Search queries scoped to Censys ASM hosts
//!
//! Collects every host stored in Censys ASM (optionally filtered by tag),
//! then asks Censys Search which of them match a query. Hosts are searched
//! in batches so each query stays within upstream length limits.

pub mod asm;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod network;
pub mod pipeline;
pub mod report;
pub mod search;
pub mod types;

pub use config::Settings;
pub use error::{Error, Result};
pub use pipeline::{Outcome, Pipeline};
pub use types::HostId;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
