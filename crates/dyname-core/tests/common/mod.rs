//! Test doubles and common utilities for reconciliation contract tests
//!
//! The mock registrar keeps server-side state (domains and their records) and
//! applies updates to it, so repeated runs observe earlier writes.

#![allow(dead_code)]

use dyname_core::error::{Error, Result};
use dyname_core::json::JsonObject;
use dyname_core::traits::{CurrentAddresses, Registrar};
use dyname_core::{Domain, Record};
use std::collections::HashMap;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Sentinel TTL used throughout the contract tests
pub const SENTINEL: u32 = 300;

/// A mock Registrar that tracks calls and holds server-side records
pub struct MockRegistrar {
    /// Domains in listing order
    domains: Arc<Vec<String>>,
    /// Records per domain, mutated by update_record()
    records: Arc<Mutex<HashMap<String, Vec<Record>>>>,
    /// Domains whose record listing fails with the given status
    failing_domains: Arc<Mutex<HashMap<String, u16>>>,
    /// Call counter for list_domains()
    list_domains_call_count: Arc<AtomicUsize>,
    /// Domains passed to list_records(), in call order
    listed_domains: Arc<Mutex<Vec<String>>>,
    /// Payloads passed to update_record(), in call order
    updates: Arc<Mutex<Vec<Record>>>,
}

impl MockRegistrar {
    /// Create a registrar holding `records` under each of `domains`
    pub fn new(domains: Vec<(&str, Vec<Record>)>) -> Self {
        let names = domains.iter().map(|(name, _)| name.to_string()).collect();
        let records = domains
            .into_iter()
            .map(|(name, records)| (name.to_string(), records))
            .collect();

        Self {
            domains: Arc::new(names),
            records: Arc::new(Mutex::new(records)),
            failing_domains: Arc::new(Mutex::new(HashMap::new())),
            list_domains_call_count: Arc::new(AtomicUsize::new(0)),
            listed_domains: Arc::new(Mutex::new(Vec::new())),
            updates: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a new MockRegistrar that shares state and counters with an existing one
    pub fn sharing_state_with(other: &Self) -> Self {
        Self {
            domains: Arc::clone(&other.domains),
            records: Arc::clone(&other.records),
            failing_domains: Arc::clone(&other.failing_domains),
            list_domains_call_count: Arc::clone(&other.list_domains_call_count),
            listed_domains: Arc::clone(&other.listed_domains),
            updates: Arc::clone(&other.updates),
        }
    }

    /// Make list_records() for `domain` fail with `status`
    pub fn fail_records_of(&self, domain: &str, status: u16) {
        self.failing_domains
            .lock()
            .unwrap()
            .insert(domain.to_string(), status);
    }

    /// Get the number of times list_domains() was called
    pub fn list_domains_call_count(&self) -> usize {
        self.list_domains_call_count.load(Ordering::SeqCst)
    }

    /// Get the domains whose records were listed, in order
    pub fn listed_domains(&self) -> Vec<String> {
        self.listed_domains.lock().unwrap().clone()
    }

    /// Get the records sent to update_record(), in order
    pub fn updates(&self) -> Vec<Record> {
        self.updates.lock().unwrap().clone()
    }

    /// Get the number of times update_record() was called
    pub fn update_call_count(&self) -> usize {
        self.updates.lock().unwrap().len()
    }

    /// Current server-side answer of a record
    pub fn answer_of(&self, domain: &str, id: i32) -> Option<String> {
        self.records
            .lock()
            .unwrap()
            .get(domain)?
            .iter()
            .find(|r| r.id() == id)
            .map(|r| r.answer.clone())
    }
}

#[async_trait::async_trait]
impl Registrar for MockRegistrar {
    async fn list_domains(&self) -> Result<Vec<Domain>> {
        self.list_domains_call_count.fetch_add(1, Ordering::SeqCst);

        self.domains
            .iter()
            .map(|name| {
                let object = json_object(serde_json::json!({ "domainName": name }));
                Domain::from_json(&object)
            })
            .collect()
    }

    async fn list_records(&self, domain_name: &str) -> Result<Vec<Record>> {
        self.listed_domains
            .lock()
            .unwrap()
            .push(domain_name.to_string());

        if let Some(status) = self.failing_domains.lock().unwrap().get(domain_name) {
            return Err(Error::from_status(
                *status,
                format!("GET /v4/domains/{}/records", domain_name),
            ));
        }

        Ok(self
            .records
            .lock()
            .unwrap()
            .get(domain_name)
            .cloned()
            .unwrap_or_default())
    }

    async fn update_record(&self, record: &Record) -> Result<()> {
        self.updates.lock().unwrap().push(record.clone());

        let mut records = self.records.lock().unwrap();
        let stored = records
            .get_mut(record.domain_name())
            .and_then(|rs| rs.iter_mut().find(|r| r.id() == record.id()))
            .ok_or_else(|| Error::from_status(404, "PUT record"))?;
        *stored = record.clone();
        Ok(())
    }

    fn registrar_name(&self) -> &'static str {
        "mock"
    }
}

pub fn json_object(value: serde_json::Value) -> JsonObject {
    value
        .as_object()
        .cloned()
        .expect("test fixture must be a JSON object")
}

/// Build a record the way the registrar would return it
pub fn record(id: i32, domain: &str, host: &str, record_type: &str, answer: &str, ttl: u32) -> Record {
    Record::from_json(&json_object(serde_json::json!({
        "id": id,
        "domainName": domain,
        "host": host,
        "fqdn": format!("{}.{}.", host, domain),
        "type": record_type,
        "answer": answer,
        "ttl": ttl,
    })))
    .expect("fixture record parses")
}

/// The addresses used by most tests
pub fn current_addresses() -> CurrentAddresses {
    CurrentAddresses::new(
        Ipv4Addr::new(203, 0, 113, 9),
        "2001:db8::9".parse::<Ipv6Addr>().expect("valid IPv6"),
    )
}
