//! EDNS Client Subnet helpers.
//!
//! Clients in reserved address space never have their network forwarded to
//! upstreams. Everyone else is truncated to a coarse prefix first.

use ipnetwork::IpNetwork;
use std::net::IpAddr;
use std::sync::LazyLock;

pub const ECS_PREFIX_V4: u8 = 24;
pub const ECS_PREFIX_V6: u8 = 56;

const RESERVED_BLOCKS: &[&str] = &[
    "10.0.0.0/8",
    "172.16.0.0/12",
    "192.168.0.0/16",
    "127.0.0.0/8",
    "169.254.0.0/16",
    "0.0.0.0/8",
    "224.0.0.0/4",
    "240.0.0.0/4",
    "::1/128",
    "::/128",
    "fc00::/7",
    "fe80::/10",
];

static RESERVED_NETWORKS: LazyLock<Vec<IpNetwork>> = LazyLock::new(|| {
    RESERVED_BLOCKS
        .iter()
        .filter_map(|cidr| cidr.parse().ok())
        .collect()
});

/// True for loopback, link-local, private and otherwise non-routable clients.
pub fn is_reserved(ip: IpAddr) -> bool {
    let ip = ip.to_canonical();
    RESERVED_NETWORKS.iter().any(|network| network.contains(ip))
}

/// ECS parameter value for a client, `None` for reserved addresses.
pub fn ecs_subnet(ip: IpAddr) -> Option<String> {
    let ip = ip.to_canonical();
    if is_reserved(ip) {
        return None;
    }
    let prefix = match ip {
        IpAddr::V4(_) => ECS_PREFIX_V4,
        IpAddr::V6(_) => ECS_PREFIX_V6,
    };
    let network = IpNetwork::new(ip, prefix).ok()?;
    Some(format!("{}/{}", network.network(), prefix))
}
