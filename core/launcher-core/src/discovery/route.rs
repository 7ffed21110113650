use crate::discovery::AddressSource;
use crate::error::discovery::DiscoveryError;

use common::ErrorLocation;

use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4, UdpSocket};
use std::panic::Location;

use log::trace;

const SOURCE_NAME: &str = "outbound route";

/// Never reached: UDP `connect` only selects a route, nothing is sent.
pub const ROUTE_TARGET: SocketAddrV4 = SocketAddrV4::new(Ipv4Addr::new(10, 255, 255, 255), 1);

/// Reads the local address of the interface the OS would use for outbound traffic.
#[derive(Debug, Clone, Copy)]
pub struct OutboundRoute {
    target: SocketAddrV4,
}

impl OutboundRoute {
    pub fn new(target: SocketAddrV4) -> Self {
        Self { target }
    }
}

impl Default for OutboundRoute {
    fn default() -> Self {
        Self::new(ROUTE_TARGET)
    }
}

impl AddressSource for OutboundRoute {
    fn name(&self) -> &str {
        SOURCE_NAME
    }

    fn addresses(&self) -> Result<Vec<Ipv4Addr>, DiscoveryError> {
        let socket = UdpSocket::bind(SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, 0))
            .map_err(|e| socket_error("Failed to bind route socket", e))?;

        socket
            .connect(self.target)
            .map_err(|e| socket_error("Failed to select outbound route", e))?;

        let local = socket
            .local_addr()
            .map_err(|e| socket_error("Failed to read route socket address", e))?;

        trace!("Outbound route to {} uses {local}", self.target);

        let ip = match local {
            SocketAddr::V4(v4) => *v4.ip(),
            SocketAddr::V6(_) => return Ok(Vec::new()),
        };

        if ip.is_unspecified() || ip.is_loopback() {
            return Ok(Vec::new());
        }

        Ok(vec![ip])
    }
}

#[track_caller]
fn socket_error(context: &str, e: std::io::Error) -> DiscoveryError {
    DiscoveryError::Socket {
        message: format!("{context}: {e}"),
        location: ErrorLocation::from(Location::caller()),
        source: Box::new(e),
    }
}
