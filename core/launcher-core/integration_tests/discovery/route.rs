use launcher_core::discovery::AddressSource;
use launcher_core::discovery::route::OutboundRoute;

use std::net::{Ipv4Addr, SocketAddrV4};

/// **VALUE**: Verifies that the UDP route lookup never reports loopback or unspecified addresses.
///
/// **WHY THIS MATTERS**: On an offline machine the lookup either fails or picks no
/// interface; neither may end up as the recommended URL.
///
/// **BUG THIS CATCHES**: Would catch the lookup returning `0.0.0.0` verbatim.
///
/// **ENVIRONMENT-DEPENDENT**: Passes whether or not the machine has a route.
#[test]
fn given_default_target_when_addresses_called_then_result_is_routable_or_error() {
    // GIVEN: The stock route target
    let route = OutboundRoute::default();

    // WHEN: Probing
    let result = route.addresses();

    // THEN: Any address returned is a real interface address
    if let Ok(ips) = result {
        assert!(ips.len() <= 1);
        for ip in ips {
            assert!(!ip.is_loopback() && !ip.is_unspecified(), "Got {ip}");
        }
    }
}

/// **VALUE**: Verifies that probing a loopback target yields nothing.
///
/// **WHY THIS MATTERS**: The route to 127.0.0.1 is the loopback interface, which the
/// lookup must filter out.
#[test]
fn given_loopback_target_when_addresses_called_then_returns_no_addresses() {
    // GIVEN: A route aimed at loopback
    let route = OutboundRoute::new(SocketAddrV4::new(Ipv4Addr::LOCALHOST, 9));

    // WHEN: Probing
    let result = route.addresses();

    // THEN: Nothing usable
    if let Ok(ips) = result {
        assert!(ips.is_empty(), "Got {ips:?}");
    }
}
