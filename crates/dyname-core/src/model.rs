//! Registrar data model
//!
//! [`Domain`] and [`Record`] are built from loosely shaped JSON objects through
//! the tolerant accessors in [`crate::json`]. A [`Record`] also serializes back
//! to the exact payload the update endpoint expects.

use std::fmt::Display;

use serde_json::{Value, json};

use crate::error::Result;
use crate::json::{self, JsonObject};

/// A domain owned by the account
///
/// Read-only context used to enumerate records; never written back.
#[derive(Debug, Clone, PartialEq)]
pub struct Domain {
    /// Unique key within an account
    pub domain_name: String,
    pub nameservers: Vec<String>,
    pub privacy_enabled: bool,
    pub locked: bool,
    pub autorenew_enabled: bool,
    /// Opaque date string, not parsed further
    pub expire_date: String,
    /// Opaque date string, not parsed further
    pub create_date: String,
    pub renewal_price: f64,
}

impl Domain {
    /// Build a domain from one element of a `"domains"` array
    pub fn from_json(object: &JsonObject) -> Result<Self> {
        Ok(Self {
            domain_name: json::get_string(object, "domainName")?,
            nameservers: json::get_string_array(object, "nameservers")?,
            privacy_enabled: json::get_bool(object, "privacyEnabled")?,
            locked: json::get_bool(object, "locked")?,
            autorenew_enabled: json::get_bool(object, "autorenewEnabled")?,
            expire_date: json::get_string(object, "expireDate")?,
            create_date: json::get_string(object, "createDate")?,
            renewal_price: json::get_f64(object, "renewalPrice")?,
        })
    }
}

/// A DNS record belonging to exactly one [`Domain`]
///
/// `id`, `domain_name` and `fqdn` identify the record on the registrar side and
/// are only readable. `answer` is the field reconciliation rewrites.
///
/// Note that `ttl` doubles as a selector: records whose TTL equals the configured
/// sentinel are the ones this tool keeps pointed at the current address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    id: i32,
    domain_name: String,
    fqdn: String,
    pub host: String,
    pub record_type: String,
    pub answer: String,
    pub ttl: u32,
    pub priority: u32,
}

impl Record {
    /// Build a record from one element of a `"records"` array
    pub fn from_json(object: &JsonObject) -> Result<Self> {
        Ok(Self {
            id: json::get_i32(object, "id")?,
            domain_name: json::get_string(object, "domainName")?,
            host: json::get_string(object, "host")?,
            fqdn: json::get_string(object, "fqdn")?,
            record_type: json::get_string(object, "type")?,
            answer: json::get_string(object, "answer")?,
            ttl: json::get_u32(object, "ttl")?,
            priority: json::get_u32(object, "priority")?,
        })
    }

    /// Serialize to the update payload
    ///
    /// Always carries all eight fields; the registrar matches on `id` and
    /// `domainName` even though they never change.
    pub fn to_json(&self) -> Value {
        json!({
            "id": self.id,
            "domainName": self.domain_name,
            "host": self.host,
            "fqdn": self.fqdn,
            "type": self.record_type,
            "answer": self.answer,
            "ttl": self.ttl,
            "priority": self.priority,
        })
    }

    pub fn id(&self) -> i32 {
        self.id
    }

    pub fn domain_name(&self) -> &str {
        &self.domain_name
    }

    pub fn fqdn(&self) -> &str {
        &self.fqdn
    }
}

impl Display for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.host, self.record_type, self.answer, self.ttl
        )
    }
}

/// One page of a paginated list endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct PagedResponse<T> {
    /// Items of this page, in response order
    pub data: Vec<T>,
    /// Page index to request next
    pub next_page: i32,
    /// Index of the last page (inclusive)
    pub last_page: i32,
}

impl<T> PagedResponse<T> {
    /// Parse a page, reading the collection from `array_key` with `parse`
    ///
    /// A missing collection yields an empty page.
    pub fn from_json(
        object: &JsonObject,
        array_key: &str,
        parse: impl Fn(&JsonObject) -> Result<T>,
    ) -> Result<Self> {
        let data = json::get_object_array(object, array_key)?
            .into_iter()
            .map(parse)
            .collect::<Result<Vec<T>>>()?;

        Ok(Self {
            data,
            next_page: json::get_i32(object, "nextPage")?,
            last_page: json::get_i32(object, "lastPage")?,
        })
    }
}
