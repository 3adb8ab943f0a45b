//! Resolver configuration: upstream server list, transport timeout and the
//! batch worker pool size. Mirrors the shape of a plain config struct with
//! validated construction, the way the teacher's `DnsConfig` is laid out,
//! scoped down to the handful of knobs the validator core actually needs.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

/// Order of preference of upstream DNS resolvers to query in case of
/// failures (spec §4.1).
pub const CLOUDFLARE_DNS: IpAddr = IpAddr::V4(Ipv4Addr::new(1, 1, 1, 1));
pub const GOOGLE_DNS: IpAddr = IpAddr::V4(Ipv4Addr::new(8, 8, 8, 8));
pub const QUAD9_DNS: IpAddr = IpAddr::V4(Ipv4Addr::new(9, 9, 9, 9));

pub const DNS_PORT: u16 = 53;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Upstream resolvers to try, in priority order.
    pub upstream_servers: Vec<SocketAddr>,

    /// Per-exchange read timeout.
    pub timeout: Duration,

    /// Worker pool size for batch measurement runs. Defaults to
    /// `2 * logical_cores` (spec §5).
    pub workers: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            upstream_servers: vec![
                SocketAddr::new(CLOUDFLARE_DNS, DNS_PORT),
                SocketAddr::new(GOOGLE_DNS, DNS_PORT),
                SocketAddr::new(QUAD9_DNS, DNS_PORT),
            ],
            timeout: DEFAULT_TIMEOUT,
            workers: std::thread::available_parallelism()
                .map(|n| n.get() * 2)
                .unwrap_or(4),
        }
    }
}

impl ResolverConfig {
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }
}
