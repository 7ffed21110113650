//! Console banner shown before the servers start.

use crate::HTTP_SCHEME;
use crate::config::NetworkConfig;
use crate::discovery::primary_host;

use std::fmt::Write as _;
use std::net::Ipv4Addr;

const RULE_WIDTH: usize = 60;
const ADMIN_PATH: &str = "/login";

pub struct Banner<'a> {
    title: &'a str,
    ips: &'a [Ipv4Addr],
    network: &'a NetworkConfig,
}

impl<'a> Banner<'a> {
    pub fn new(title: &'a str, ips: &'a [Ipv4Addr], network: &'a NetworkConfig) -> Self {
        Self {
            title,
            ips,
            network,
        }
    }

    /// `http://<host>:<frontend port>` for the given host.
    pub fn url_for(&self, host: &str) -> String {
        format!("{HTTP_SCHEME}{host}:{}", self.network.frontend_port)
    }

    /// URL built on the primary IP, or on the loopback fallback.
    pub fn recommended_url(&self) -> String {
        self.url_for(&primary_host(self.ips, &self.network.fallback_host))
    }

    pub fn admin_url(&self) -> String {
        format!("{}{ADMIN_PATH}", self.recommended_url())
    }

    pub fn render(&self) -> String {
        let rule = "=".repeat(RULE_WIDTH);
        let alert = "!".repeat(RULE_WIDTH);
        let mut out = String::new();

        // Writing into a String cannot fail.
        let _ = writeln!(out, "{rule}");
        let _ = writeln!(out, "      {}", self.title);
        let _ = writeln!(out, "{rule}");
        let _ = writeln!(out);

        let _ = writeln!(out, "Detected server IPs:");
        if self.ips.is_empty() {
            let _ = writeln!(
                out,
                "   (none found, falling back to {})",
                self.network.fallback_host
            );
        }
        for ip in self.ips {
            let _ = writeln!(out, "   -> {}", self.url_for(&ip.to_string()));
        }
        let _ = writeln!(out);

        let _ = writeln!(out, "Recommended URL for students: {}", self.recommended_url());
        let _ = writeln!(out, "Admin URL: {}", self.admin_url());
        let _ = writeln!(out);

        let _ = writeln!(out, "{alert}");
        let _ = writeln!(out, "If students cannot connect:");
        let _ = writeln!(out, "1. Set the network profile to 'Private'.");
        let _ = writeln!(
            out,
            "2. Turn off the firewall or allow ports {} and {}.",
            self.network.frontend_port, self.network.backend_port
        );
        let _ = writeln!(out, "3. Ensure all students are on the same Wi-Fi / hotspot.");
        let _ = writeln!(out, "{alert}");

        out
    }
}
