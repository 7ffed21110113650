use crate::discovery::AddressSource;
use crate::error::discovery::DiscoveryError;

use common::ErrorLocation;

use std::net::{IpAddr, Ipv4Addr, ToSocketAddrs};
use std::panic::Location;

use log::trace;
use sysinfo::System;

const SOURCE_NAME: &str = "hostname lookup";

/// Forward-resolves the machine's host name through the system resolver.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostnameLookup;

impl AddressSource for HostnameLookup {
    fn name(&self) -> &str {
        SOURCE_NAME
    }

    fn addresses(&self) -> Result<Vec<Ipv4Addr>, DiscoveryError> {
        let host = System::host_name().ok_or_else(|| DiscoveryError::Hostname {
            message: "Host name is not available".to_string(),
            location: ErrorLocation::from(Location::caller()),
        })?;

        trace!("Resolving host name {host}");
        resolve_ipv4(&host)
    }
}

/// Resolve `host` to its non-loopback IPv4 addresses, in resolver order.
#[track_caller]
pub(crate) fn resolve_ipv4(host: &str) -> Result<Vec<Ipv4Addr>, DiscoveryError> {
    let resolved = (host, 0)
        .to_socket_addrs()
        .map_err(|e| DiscoveryError::Resolve {
            message: format!("Failed to resolve {host}: {e}"),
            location: ErrorLocation::from(Location::caller()),
            source: Box::new(e),
        })?;

    let mut addresses = Vec::new();
    for addr in resolved {
        if let IpAddr::V4(ip) = addr.ip()
            && !ip.is_loopback()
            && !addresses.contains(&ip)
        {
            addresses.push(ip);
        }
    }

    Ok(addresses)
}
