use crate::helpers::{FailingSource, FixedSource};

use launcher_core::discovery::{AddressSource, discover, discover_with, primary_host};

use std::net::Ipv4Addr;

// ============================================================================
// Public API tests for LAN address discovery
// ============================================================================

/// **VALUE**: Verifies that loopback addresses never make it into the result.
///
/// **WHY THIS MATTERS**: A `127.x` URL on the banner is useless to every student device.
///
/// **BUG THIS CATCHES**: Would catch the loopback filter being moved into a single
/// strategy and bypassed by the other.
#[test]
fn given_loopback_among_addresses_when_discovering_then_loopback_is_excluded() {
    // GIVEN: A source reporting loopback next to a LAN address
    let sources: Vec<Box<dyn AddressSource>> = vec![Box::new(FixedSource(vec![
        Ipv4Addr::new(127, 0, 1, 1),
        Ipv4Addr::new(192, 168, 1, 10),
        Ipv4Addr::LOCALHOST,
    ]))];

    // WHEN: Discovering
    let ips = discover_with(&sources);

    // THEN: Only the LAN address remains
    assert_eq!(ips, vec![Ipv4Addr::new(192, 168, 1, 10)]);
}

/// **VALUE**: Verifies that an address found by both strategies appears once.
///
/// **WHY THIS MATTERS**: The common case is both strategies agreeing; printing every URL
/// twice makes the banner look broken.
///
/// **BUG THIS CATCHES**: Would catch the union losing its deduplication.
#[test]
fn given_overlapping_sources_when_discovering_then_result_is_deduplicated_in_first_seen_order() {
    // GIVEN: Two sources sharing 192.168.1.10
    let sources: Vec<Box<dyn AddressSource>> = vec![
        Box::new(FixedSource(vec![
            Ipv4Addr::new(192, 168, 1, 10),
            Ipv4Addr::new(172, 16, 0, 3),
        ])),
        Box::new(FixedSource(vec![
            Ipv4Addr::new(10, 0, 0, 7),
            Ipv4Addr::new(192, 168, 1, 10),
        ])),
    ];

    // WHEN: Discovering
    let ips = discover_with(&sources);

    // THEN: Each address once, first source first
    assert_eq!(
        ips,
        vec![
            Ipv4Addr::new(192, 168, 1, 10),
            Ipv4Addr::new(172, 16, 0, 3),
            Ipv4Addr::new(10, 0, 0, 7),
        ]
    );
}

/// **VALUE**: Verifies that one failing strategy does not hide the other's result.
///
/// **WHY THIS MATTERS**: Hostname resolution fails on plenty of machines while the
/// outbound-route lookup still works.
///
/// **BUG THIS CATCHES**: Would catch an early `?` that aborts discovery on the first error.
#[test]
fn given_failing_first_source_when_discovering_then_second_source_still_counts() {
    // GIVEN: A failing source followed by a working one
    let sources: Vec<Box<dyn AddressSource>> = vec![
        Box::new(FailingSource),
        Box::new(FixedSource(vec![Ipv4Addr::new(10, 1, 2, 3)])),
    ];

    // WHEN: Discovering
    let ips = discover_with(&sources);

    // THEN: The working source's address is returned
    assert_eq!(ips, vec![Ipv4Addr::new(10, 1, 2, 3)]);
}

/// **VALUE**: Verifies that total failure yields an empty list rather than an error.
#[test]
fn given_all_sources_failing_when_discovering_then_returns_empty() {
    // GIVEN: Only failing sources
    let sources: Vec<Box<dyn AddressSource>> = vec![Box::new(FailingSource), Box::new(FailingSource)];

    // WHEN/THEN: Empty, no panic
    assert!(discover_with(&sources).is_empty());
}

/// **VALUE**: Verifies the loopback fallback used for the recommended URL.
///
/// **WHY THIS MATTERS**: With no network the banner must still show a URL the operator
/// can open locally.
///
/// **BUG THIS CATCHES**: Would catch `primary_host` indexing into an empty slice.
#[test]
fn given_no_addresses_when_primary_host_called_then_returns_fallback() {
    assert_eq!(primary_host(&[], "127.0.0.1"), "127.0.0.1");
    assert_eq!(
        primary_host(
            &[Ipv4Addr::new(192, 168, 1, 10), Ipv4Addr::new(10, 0, 0, 1)],
            "127.0.0.1"
        ),
        "192.168.1.10"
    );
}

/// **VALUE**: Verifies that real discovery never panics and honours its invariants.
///
/// **ENVIRONMENT-DEPENDENT**: The addresses depend on the machine; the invariants do not.
#[test]
fn given_real_machine_when_discover_called_then_result_is_loopback_free_and_unique() {
    // WHEN: Running the built-in strategies
    let ips = discover();

    // THEN: No loopback, no duplicates
    assert!(ips.iter().all(|ip| !ip.is_loopback()), "Loopback in {ips:?}");
    let mut sorted = ips.clone();
    sorted.sort();
    sorted.dedup();
    assert_eq!(sorted.len(), ips.len(), "Duplicates in {ips:?}");
}
