// # dyname-core
//
// Core library for the dyname dynamic-DNS reconciliation tool.
//
// ## Architecture Overview
//
// - **Registrar**: Trait for listing domains/records and updating records via a registrar API
// - **IpSource**: Trait for discovering the caller's current public IPv4 and IPv6 addresses
// - **Reconciler**: Walks every domain and record, rewriting records selected by the TTL sentinel
// - **json**: Tolerant field accessors for responses that omit default-valued fields
// - **pagination**: Drives a paged list endpoint until the server-reported last page
//
// ## Data Flow
//
// ```text
// config + current addresses -> Reconciler -> Registrar -> paged fetch -> HTTP
// ```
//
// Parsed JSON flows back up through the models into the reconciler's comparison.
// Every error aborts the whole run; the tool is idempotent and meant to be
// re-run by a scheduler.

pub mod address;
pub mod config;
pub mod error;
pub mod json;
pub mod model;
pub mod pagination;
pub mod reconcile;
pub mod traits;

// Re-export core types for convenience
pub use config::{DynameConfig, IpLookupConfig};
pub use error::{Error, Result};
pub use model::{Domain, PagedResponse, Record};
pub use reconcile::{ReconcileReport, Reconciler, RecordOutcome};
pub use traits::{CurrentAddresses, IpSource, Registrar};
