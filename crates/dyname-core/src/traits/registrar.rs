// # Registrar Trait
//
// Defines the interface the reconciler consumes from a registrar API client.
//
// ## Implementations
//
// - name.com API v4: `dyname-provider-namecom` crate
//
// ## Usage
//
// ```rust,ignore
// use dyname_core::Registrar;
//
// let registrar = /* Registrar implementation */;
//
// for domain in registrar.list_domains().await? {
//     for mut record in registrar.list_records(&domain.domain_name).await? {
//         record.answer = "203.0.113.9".to_string();
//         registrar.update_record(&record).await?;
//     }
// }
// ```

use async_trait::async_trait;

use crate::error::Result;
use crate::model::{Domain, Record};

/// Trait for registrar API clients
///
/// Implementations own the base URL and credentials. They perform no retries:
/// every failure is returned to the caller, which aborts the run.
#[async_trait]
pub trait Registrar: Send + Sync {
    /// List every domain on the account, across all pages
    async fn list_domains(&self) -> Result<Vec<Domain>>;

    /// List every record of `domain_name`, across all pages
    async fn list_records(&self, domain_name: &str) -> Result<Vec<Record>>;

    /// Replace a record on the registrar side with `record`
    ///
    /// The record is matched by its `domain_name` and `id`; `record.answer`
    /// already holds the intended new value.
    async fn update_record(&self, record: &Record) -> Result<()>;

    /// Registrar name (for logging/debugging)
    fn registrar_name(&self) -> &'static str;
}
