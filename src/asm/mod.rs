//! Censys ASM asset inventory
//!
//! Pages through `assets/hosts` and collects the identifiers of every host
//! the organization has stored.

mod fetcher;
mod models;

pub use fetcher::AssetInventoryFetcher;
pub use models::*;
