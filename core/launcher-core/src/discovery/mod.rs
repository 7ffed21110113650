//! LAN address discovery.
//!
//! Two independent strategies are combined:
//! - [`hostname::HostnameLookup`]: resolve the machine's host name
//! - [`route::OutboundRoute`]: ask the OS which interface it would route an
//!   outbound datagram through
//!
//! Each strategy may fail on its own; a failure only means "no result from this
//! method". The union is ordered by first appearance, deduplicated, and never
//! contains loopback addresses.

pub mod hostname;
pub mod route;

use crate::error::discovery::DiscoveryError;

use std::net::Ipv4Addr;

use log::{debug, info};

/// One way of finding the machine's LAN addresses.
pub trait AddressSource {
    /// Short label used in log lines.
    fn name(&self) -> &str;

    fn addresses(&self) -> Result<Vec<Ipv4Addr>, DiscoveryError>;
}

/// The built-in strategies, hostname lookup first.
pub fn default_sources() -> Vec<Box<dyn AddressSource>> {
    vec![
        Box::new(hostname::HostnameLookup),
        Box::new(route::OutboundRoute::default()),
    ]
}

/// Discover LAN addresses with the built-in strategies.
pub fn discover() -> Vec<Ipv4Addr> {
    discover_with(&default_sources())
}

/// Run every source in order and union their results.
///
/// Never fails: a source returning an error is logged at debug level and
/// skipped.
pub fn discover_with(sources: &[Box<dyn AddressSource>]) -> Vec<Ipv4Addr> {
    let mut found: Vec<Ipv4Addr> = Vec::new();

    for source in sources {
        match source.addresses() {
            Ok(addresses) => {
                debug!("{} returned {} address(es)", source.name(), addresses.len());
                for ip in addresses {
                    if is_lan_candidate(&ip) && !found.contains(&ip) {
                        found.push(ip);
                    }
                }
            }
            Err(e) => {
                debug!("{} produced no result: {e}", source.name());
            }
        }
    }

    info!("Discovered {} LAN address(es)", found.len());
    found
}

/// First discovered address, or `fallback` when nothing was found.
pub fn primary_host(ips: &[Ipv4Addr], fallback: &str) -> String {
    ips.first()
        .map(|ip| ip.to_string())
        .unwrap_or_else(|| fallback.to_string())
}

pub(crate) fn is_lan_candidate(ip: &Ipv4Addr) -> bool {
    !ip.is_loopback() && !ip.is_unspecified()
}
