//! Core traits for dyname
//!
//! - [`Registrar`]: List domains and records, update records via a registrar API
//! - [`IpSource`]: Discover the current public IPv4 and IPv6 addresses

pub mod ip_source;
pub mod registrar;

pub use ip_source::{CurrentAddresses, IpSource};
pub use registrar::Registrar;
