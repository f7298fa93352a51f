//! Record reconciliation
//!
//! The [`Reconciler`] walks every domain on the account and every record of
//! each domain, strictly in series:
//!
//! 1. Records whose TTL differs from the sentinel are left alone
//! 2. `A` records are compared against the current IPv4 address
//! 3. `AAAA` records are compared against the current IPv6 address
//! 4. Any other type is reported and left alone
//!
//! Comparison happens on normalized addresses, so an answer that only differs
//! in its textual form is not rewritten. A mismatching record gets the current
//! address as its new answer and is sent back through the [`Registrar`].
//!
//! The first error aborts the run. Updates already sent are not rolled back.

use std::fmt::Display;
use std::net::IpAddr;

use tracing::{debug, info};

use crate::address::{normalize_ipv4, normalize_ipv6};
use crate::error::{Error, Result};
use crate::model::Record;
use crate::traits::{CurrentAddresses, Registrar};

/// What reconciliation did with one record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOutcome {
    /// TTL does not match the sentinel
    NotSelected,

    /// The stored answer already equals the current address
    Unchanged {
        /// The current address
        current: IpAddr,
    },

    /// The answer was rewritten and sent to the registrar
    Updated {
        /// The normalized answer before the update
        previous: IpAddr,
        /// The new answer
        current: IpAddr,
    },

    /// Selected by TTL but not an `A` or `AAAA` record
    UnsupportedType,
}

/// Summary of one reconciliation run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Domains visited
    pub domains: usize,
    /// Records inspected
    pub records: usize,
    /// Records whose TTL matched the sentinel
    pub candidates: usize,
    /// Records rewritten
    pub updated: usize,
    /// Records already pointing at the current address
    pub unchanged: usize,
    /// Records selected by TTL with a type other than A/AAAA
    pub unsupported: usize,
}

impl ReconcileReport {
    fn record(&mut self, outcome: &RecordOutcome) {
        self.records += 1;
        match outcome {
            RecordOutcome::NotSelected => {}
            RecordOutcome::Unchanged { .. } => {
                self.candidates += 1;
                self.unchanged += 1;
            }
            RecordOutcome::Updated { .. } => {
                self.candidates += 1;
                self.updated += 1;
            }
            RecordOutcome::UnsupportedType => {
                self.candidates += 1;
                self.unsupported += 1;
            }
        }
    }
}

impl Display for ReconcileReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} domain(s), {} record(s), {} candidate(s): {} updated, {} unchanged, {} unsupported",
            self.domains,
            self.records,
            self.candidates,
            self.updated,
            self.unchanged,
            self.unsupported
        )
    }
}

/// Reconciliation driver
///
/// Holds the registrar client and the TTL sentinel. Immutable after
/// construction and reusable across runs.
pub struct Reconciler {
    /// Registrar API client
    registrar: Box<dyn Registrar>,

    /// Records with exactly this TTL are candidates for reconciliation
    ttl_sentinel: u32,
}

impl Reconciler {
    /// Create a new reconciler
    pub fn new(registrar: Box<dyn Registrar>, ttl_sentinel: u32) -> Self {
        Self {
            registrar,
            ttl_sentinel,
        }
    }

    /// The configured TTL sentinel
    pub fn ttl_sentinel(&self) -> u32 {
        self.ttl_sentinel
    }

    /// Run one reconciliation pass against `current`
    ///
    /// # Returns
    ///
    /// - `Ok(ReconcileReport)`: every domain and record was processed
    /// - `Err(Error)`: the first failure; later domains and records are not visited
    pub async fn run(&self, current: &CurrentAddresses) -> Result<ReconcileReport> {
        let mut report = ReconcileReport::default();

        let domains = self.registrar.list_domains().await?;
        debug!(
            "{} returned {} domain(s)",
            self.registrar.registrar_name(),
            domains.len()
        );

        for domain in &domains {
            info!("domain: {}", domain.domain_name);
            report.domains += 1;

            let records = self.registrar.list_records(&domain.domain_name).await?;

            for mut record in records {
                info!("    record: {}", record);
                let outcome = self.reconcile_record(&mut record, current).await?;
                report.record(&outcome);
            }
        }

        Ok(report)
    }

    /// Reconcile a single record, updating it on the registrar if needed
    ///
    /// On update, `record.answer` holds the current address afterwards.
    pub async fn reconcile_record(
        &self,
        record: &mut Record,
        current: &CurrentAddresses,
    ) -> Result<RecordOutcome> {
        if record.ttl != self.ttl_sentinel {
            return Ok(RecordOutcome::NotSelected);
        }

        let (theirs, ours) = match record.record_type.as_str() {
            "A" => {
                let theirs = normalize_ipv4(&record.answer).ok_or_else(|| malformed(record))?;
                (IpAddr::V4(theirs), IpAddr::V4(current.v4))
            }
            "AAAA" => {
                let theirs = normalize_ipv6(&record.answer).ok_or_else(|| malformed(record))?;
                (IpAddr::V6(theirs), IpAddr::V6(current.v6))
            }
            other => {
                info!("    unknown record type {}, ignoring", other);
                return Ok(RecordOutcome::UnsupportedType);
            }
        };

        info!("    ours:   {}", ours);
        info!("    theirs: {}", theirs);

        if theirs == ours {
            return Ok(RecordOutcome::Unchanged { current: ours });
        }

        info!("    updating...");
        record.answer = ours.to_string();
        self.registrar.update_record(record).await?;

        Ok(RecordOutcome::Updated {
            previous: theirs,
            current: ours,
        })
    }
}

fn malformed(record: &Record) -> Error {
    Error::MalformedAnswer {
        domain: record.domain_name().to_string(),
        host: record.host.clone(),
        id: record.id(),
        record_type: record.record_type.clone(),
        answer: record.answer.clone(),
    }
}
