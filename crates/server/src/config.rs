use core::net::{AddrParseError, IpAddr, Ipv4Addr, SocketAddr};
use std::env;

use tracing::warn;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_ADDR: SocketAddr =
    SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), DEFAULT_PORT);

/// Largest declared `Content-Length` the challenge endpoint will read.
pub const MAX_CONTENT_LENGTH: usize = 1_000_000;

#[derive(Clone, Copy, Debug)]
#[non_exhaustive]
pub struct ServerConfig {
    pub listen: SocketAddr,
}

impl ServerConfig {
    #[must_use]
    pub const fn new(listen: SocketAddr) -> Self {
        Self { listen }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ADDR)
    }
}

/// Parse a socket address from a string, supporting various formats
///
/// Accepts a bare port (`8080` or `:8080`), a bare host (`127.0.0.1`, which
/// takes its port from `PORT` when set) or a full `host:port`.
pub fn addr_from_str(s: &str) -> Result<SocketAddr, AddrParseError> {
    let env_port = 'port: {
        if let Ok(env_port) = env::var("PORT") {
            if let Ok(env_port) = env_port.parse() {
                break 'port Some(env_port);
            }
            warn!(
                "invalid '\x1b[1mPORT\x1b[0m' environment variable: '\x1b[33m{}\x1b[0m', ignoring..",
                env_port
            );
        }
        None
    };

    parse_addr(s, env_port)
}

/// `env_port` only applies when `s` names a host without a port.
fn parse_addr(s: &str, env_port: Option<u16>) -> Result<SocketAddr, AddrParseError> {
    let mut addr = DEFAULT_ADDR;

    if let Ok(port) = s.strip_prefix(':').unwrap_or(s).parse() {
        addr.set_port(port);
        return Ok(addr);
    }

    if let Ok(host) = s.parse() {
        addr.set_ip(host);
        if let Some(port) = env_port {
            addr.set_port(port);
        }
        return Ok(addr);
    }

    s.parse()
}
