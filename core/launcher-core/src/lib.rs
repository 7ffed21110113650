pub mod banner;
pub mod bootstrap;
pub mod config;
pub mod discovery;
pub mod error;
pub mod launch;
pub mod shell;
pub mod supervise;

#[cfg(test)]
mod tests;

pub const LOOPBACK_HOST: &str = "127.0.0.1";
pub const HTTP_SCHEME: &str = "http://";

pub const DEFAULT_FRONTEND_PORT: u16 = 5666;
pub const DEFAULT_BACKEND_PORT: u16 = 5000;

/// Where students are sent when no LAN address was found, with default ports.
pub const LOOPBACK_FRONTEND_URL: &str =
    const_format::concatcp!(HTTP_SCHEME, LOOPBACK_HOST, ":", DEFAULT_FRONTEND_PORT);

pub const BACKEND_DIR: &str = "server";
pub const FRONTEND_DIR: &str = "client";
pub const DEPENDENCY_MARKER: &str = "node_modules";
