//! Contract Test: Record Reconciliation
//!
//! Constraints verified:
//! - Only records whose TTL equals the sentinel are inspected
//! - Only A and AAAA records are ever rewritten
//! - Answers are compared after normalization, not as raw strings
//! - A mismatch produces exactly one update carrying the current address
//! - Malformed stored answers are surfaced, not skipped
//!
//! If this test fails, the reconciler may rewrite records it does not own.

mod common;

use common::*;
use dyname_core::error::Error;
use dyname_core::{Reconciler, RecordOutcome};
use std::net::IpAddr;

#[tokio::test]
async fn mismatching_a_record_is_updated_once() {
    let registrar = MockRegistrar::new(vec![(
        "example.org",
        vec![record(1, "example.org", "home", "A", "203.0.113.1", SENTINEL)],
    )]);
    let reconciler = Reconciler::new(
        Box::new(MockRegistrar::sharing_state_with(&registrar)),
        SENTINEL,
    );

    let report = reconciler.run(&current_addresses()).await.unwrap();

    assert_eq!(report.updated, 1);
    let updates = registrar.updates();
    assert_eq!(updates.len(), 1, "Expected exactly one update");

    // Only the answer differs from the original record
    let original = record(1, "example.org", "home", "A", "203.0.113.1", SENTINEL);
    let sent = &updates[0];
    assert_eq!(sent.answer, "203.0.113.9");
    assert_eq!(sent.id(), original.id());
    assert_eq!(sent.domain_name(), original.domain_name());
    assert_eq!(sent.fqdn(), original.fqdn());
    assert_eq!(sent.host, original.host);
    assert_eq!(sent.record_type, original.record_type);
    assert_eq!(sent.ttl, original.ttl);
    assert_eq!(sent.priority, original.priority);
}

#[tokio::test]
async fn equivalent_ipv4_text_is_not_updated() {
    // Literal string comparison would wrongly see a mismatch here
    let registrar = MockRegistrar::new(vec![(
        "example.org",
        vec![record(1, "example.org", "home", "A", "203.000.113.009", SENTINEL)],
    )]);
    let reconciler = Reconciler::new(
        Box::new(MockRegistrar::sharing_state_with(&registrar)),
        SENTINEL,
    );

    let report = reconciler.run(&current_addresses()).await.unwrap();

    assert_eq!(registrar.update_call_count(), 0);
    assert_eq!(report.unchanged, 1);
}

#[tokio::test]
async fn equivalent_ipv6_text_is_not_updated() {
    let registrar = MockRegistrar::new(vec![(
        "example.org",
        vec![record(
            2,
            "example.org",
            "home",
            "AAAA",
            "2001:0DB8:0000:0000:0000:0000:0000:0009",
            SENTINEL,
        )],
    )]);
    let reconciler = Reconciler::new(
        Box::new(MockRegistrar::sharing_state_with(&registrar)),
        SENTINEL,
    );

    reconciler.run(&current_addresses()).await.unwrap();

    assert_eq!(registrar.update_call_count(), 0);
}

#[tokio::test]
async fn mismatching_aaaa_record_gets_canonical_ipv6() {
    let registrar = MockRegistrar::new(vec![(
        "example.org",
        vec![record(2, "example.org", "home", "AAAA", "2001:db8::1", SENTINEL)],
    )]);
    let reconciler = Reconciler::new(
        Box::new(MockRegistrar::sharing_state_with(&registrar)),
        SENTINEL,
    );

    reconciler.run(&current_addresses()).await.unwrap();

    let updates = registrar.updates();
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].answer, "2001:db8::9");
}

#[tokio::test]
async fn records_without_sentinel_ttl_are_never_inspected() {
    // Malformed answers would fail the run if they were inspected
    let registrar = MockRegistrar::new(vec![(
        "example.org",
        vec![
            record(1, "example.org", "a", "A", "203.0.113.1", SENTINEL + 1),
            record(2, "example.org", "b", "A", "not-an-address", 3600),
            record(3, "example.org", "c", "AAAA", "::zz", 0),
        ],
    )]);
    let reconciler = Reconciler::new(
        Box::new(MockRegistrar::sharing_state_with(&registrar)),
        SENTINEL,
    );

    let report = reconciler.run(&current_addresses()).await.unwrap();

    assert_eq!(registrar.update_call_count(), 0);
    assert_eq!(report.records, 3);
    assert_eq!(report.candidates, 0);
}

#[tokio::test]
async fn unsupported_types_are_never_updated() {
    let registrar = MockRegistrar::new(vec![(
        "example.org",
        vec![
            record(1, "example.org", "www", "CNAME", "example.org", SENTINEL),
            record(2, "example.org", "", "TXT", "203.0.113.1", SENTINEL),
            record(3, "example.org", "", "MX", "mail.example.org", SENTINEL),
        ],
    )]);
    let reconciler = Reconciler::new(
        Box::new(MockRegistrar::sharing_state_with(&registrar)),
        SENTINEL,
    );

    let report = reconciler.run(&current_addresses()).await.unwrap();

    assert_eq!(registrar.update_call_count(), 0);
    assert_eq!(report.unsupported, 3);
    assert_eq!(
        registrar.answer_of("example.org", 2).as_deref(),
        Some("203.0.113.1")
    );
}

#[tokio::test]
async fn malformed_answer_aborts_with_record_details() {
    let registrar = MockRegistrar::new(vec![(
        "example.org",
        vec![
            record(41, "example.org", "home", "A", "203.0.113", SENTINEL),
            record(42, "example.org", "later", "A", "203.0.113.1", SENTINEL),
        ],
    )]);
    let reconciler = Reconciler::new(
        Box::new(MockRegistrar::sharing_state_with(&registrar)),
        SENTINEL,
    );

    let err = reconciler.run(&current_addresses()).await.unwrap_err();

    match err {
        Error::MalformedAnswer {
            domain,
            host,
            id,
            record_type,
            answer,
        } => {
            assert_eq!(domain, "example.org");
            assert_eq!(host, "home");
            assert_eq!(id, 41);
            assert_eq!(record_type, "A");
            assert_eq!(answer, "203.0.113");
        }
        other => panic!("expected MalformedAnswer, got {:?}", other),
    }
    assert_eq!(registrar.update_call_count(), 0);
}

#[tokio::test]
async fn reconcile_record_reports_outcome() {
    let registrar = MockRegistrar::new(vec![(
        "example.org",
        vec![record(1, "example.org", "home", "A", "203.0.113.1", SENTINEL)],
    )]);
    let reconciler = Reconciler::new(
        Box::new(MockRegistrar::sharing_state_with(&registrar)),
        SENTINEL,
    );

    let mut rec = record(1, "example.org", "home", "A", "203.0.113.1", SENTINEL);
    let outcome = reconciler
        .reconcile_record(&mut rec, &current_addresses())
        .await
        .unwrap();

    assert_eq!(
        outcome,
        RecordOutcome::Updated {
            previous: IpAddr::from([203, 0, 113, 1]),
            current: IpAddr::from([203, 0, 113, 9]),
        }
    );
    assert_eq!(rec.answer, "203.0.113.9");

    let mut other = record(2, "example.org", "x", "A", "203.0.113.1", 60);
    let outcome = reconciler
        .reconcile_record(&mut other, &current_addresses())
        .await
        .unwrap();
    assert_eq!(outcome, RecordOutcome::NotSelected);
    assert_eq!(other.answer, "203.0.113.1");
}
