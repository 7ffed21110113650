use launcher_core::banner::Banner;
use launcher_core::config::NetworkConfig;

use std::net::Ipv4Addr;

/// **VALUE**: Verifies that every discovered address is listed with the frontend port.
///
/// **WHY THIS MATTERS**: Machines with Wi-Fi and Ethernet have two addresses; students on
/// either network need their URL.
#[test]
fn given_two_addresses_when_rendered_then_lists_both_and_recommends_first() {
    // GIVEN: Two LAN addresses
    let network = NetworkConfig::default();
    let ips = [Ipv4Addr::new(192, 168, 1, 10), Ipv4Addr::new(10, 0, 0, 4)];

    // WHEN: Rendering
    let text = Banner::new("QUIZ", &ips, &network).render();

    // THEN: Both listed, the first recommended
    assert!(text.contains("   -> http://192.168.1.10:5666"));
    assert!(text.contains("   -> http://10.0.0.4:5666"));
    assert!(text.contains("Recommended URL for students: http://192.168.1.10:5666"));
    assert!(text.contains("Admin URL: http://192.168.1.10:5666/login"));
}

/// **VALUE**: Verifies the firewall advice names the ports the banner is given.
///
/// **WHY THIS MATTERS**: With a custom port the advice must not tell the operator to
/// open the stock one.
#[test]
fn given_custom_ports_when_rendered_then_instructions_name_them() {
    // GIVEN: Non-default ports
    let network = NetworkConfig {
        frontend_port: 8080,
        backend_port: 3000,
        ..NetworkConfig::default()
    };

    // WHEN: Rendering without addresses
    let banner = Banner::new("QUIZ", &[], &network);
    let text = banner.render();

    // THEN: Ports and fallback appear
    assert!(text.contains("allow ports 8080 and 3000"));
    assert!(text.contains("(none found, falling back to 127.0.0.1)"));
    assert_eq!(banner.recommended_url(), "http://127.0.0.1:8080");
}
