//! Derived views over the incident list
//!
//! Nothing here is persisted; every view is computed on demand from the
//! sequence returned by `IncidentStore::load`.
//!
//! # Example
//!
//! ```no_run
//! use spill_incident_manager::analytics::aggregate_counts;
//! use spill_incident_manager::state::{IncidentStore, InMemoryStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = InMemoryStore::new();
//!     let stats = aggregate_counts(&store.load().await?);
//!     println!("{} incidents", stats.total_incidents);
//!     Ok(())
//! }
//! ```

mod reports;
mod statistics;

pub use reports::{recent, IncidentReport};
pub use statistics::{aggregate_counts, month_key, IncidentStatistics, UNKNOWN_KEY};
