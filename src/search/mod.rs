//! Federated search over the ASM host list
//!
//! Splits the hosts into batches, restricts the user's query to each batch
//! with an `ip:` disjunction and concatenates the matches.

mod executor;
mod models;

pub use executor::FederatedSearchRunner;
pub use models::*;
