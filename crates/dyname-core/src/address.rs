//! Address normalization
//!
//! Registrars may store answers in non-canonical text (leading zeros, expanded
//! or alternatively compressed IPv6 groups). Comparisons are always made on the
//! parsed address, whose `Display` form is canonical.

use std::net::{Ipv4Addr, Ipv6Addr};

/// Parse an IPv4 answer in dotted-decimal form
///
/// Unlike [`Ipv4Addr::from_str`](std::str::FromStr), octets may carry leading
/// zeros (`"203.000.113.009"`); they are read as decimal, never octal.
pub fn normalize_ipv4(answer: &str) -> Option<Ipv4Addr> {
    let mut octets = [0u8; 4];
    let mut parts = answer.split('.');

    for octet in octets.iter_mut() {
        let part = parts.next()?;
        if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let digits = part.trim_start_matches('0');
        *octet = if digits.is_empty() {
            0
        } else if digits.len() > 3 {
            return None;
        } else {
            digits.parse().ok()?
        };
    }

    if parts.next().is_some() {
        return None;
    }

    Some(Ipv4Addr::from(octets))
}

/// Parse an IPv6 answer in any RFC 4291 text form
pub fn normalize_ipv6(answer: &str) -> Option<Ipv6Addr> {
    answer.parse().ok()
}
