// Unit tests for discovery module private functions
// Integration tests for public API are in integration_tests/discovery/discovery.rs

use crate::discovery::hostname::resolve_ipv4;
use crate::discovery::is_lan_candidate;

use std::net::Ipv4Addr;

/// **VALUE**: Verifies that resolving `localhost` yields no addresses.
///
/// **WHY THIS MATTERS**: On many machines the host name resolves to `127.0.1.1` or
/// `127.0.0.1`. Students cannot reach those, so they must never reach the banner.
///
/// **BUG THIS CATCHES**: Would catch removal of the loopback filter in the hostname strategy.
#[test]
fn given_localhost_when_resolve_ipv4_called_then_loopback_is_filtered() {
    // GIVEN: A host name that only resolves to loopback

    // WHEN: Resolving it
    let result = resolve_ipv4("localhost");

    // THEN: Whatever the resolver returns, nothing is loopback
    if let Ok(ips) = result {
        assert!(
            ips.iter().all(|ip| !ip.is_loopback()),
            "Loopback leaked: {ips:?}"
        );
    }
}

/// **VALUE**: Verifies that an unresolvable host name is an error, not a panic.
///
/// **WHY THIS MATTERS**: Offline laptops routinely fail forward resolution; the
/// launcher must fall through to the outbound-route strategy.
///
/// **BUG THIS CATCHES**: Would catch an `unwrap()` on the resolver result.
#[test]
fn given_unresolvable_host_when_resolve_ipv4_called_then_returns_error() {
    // GIVEN: A name under the reserved `.invalid` TLD
    let host = "confluenze-does-not-exist.invalid";

    // WHEN: Resolving
    let result = resolve_ipv4(host);

    // THEN: Either an error or an empty list, never a panic
    match result {
        Ok(ips) => assert!(ips.is_empty(), "Unexpected addresses: {ips:?}"),
        Err(e) => assert!(e.to_string().contains("Resolve Error")),
    }
}

/// **VALUE**: Pins down which addresses count as LAN candidates.
///
/// **WHY THIS MATTERS**: The UDP route lookup can report `0.0.0.0` when no route exists; that
/// address would produce an unusable recommended URL.
///
/// **BUG THIS CATCHES**: Would catch the unspecified or loopback check being dropped.
#[test]
fn given_special_addresses_when_checked_then_only_routable_ones_are_candidates() {
    assert!(!is_lan_candidate(&Ipv4Addr::LOCALHOST));
    assert!(!is_lan_candidate(&Ipv4Addr::new(127, 0, 1, 1)));
    assert!(!is_lan_candidate(&Ipv4Addr::UNSPECIFIED));
    assert!(is_lan_candidate(&Ipv4Addr::new(192, 168, 1, 10)));
    assert!(is_lan_candidate(&Ipv4Addr::new(10, 0, 0, 4)));
}
