//! Interface counters from `/proc/net/dev` joined with IPv4 addresses.

use log::debug;
use std::collections::HashMap;
use std::net::IpAddr;

use sysinfo::Networks;

use crate::core::system_monitor::metrics::{
    NetworkInterfaceSample, RxCounters, Sampled, TxCounters,
};
use crate::core::system_monitor::source::{read_source, ProcFs};

const HEADER_LINES: usize = 2;
const COUNTER_FIELDS: usize = 16;

/// Parse `/proc/net/dev`. Addresses are left empty.
///
/// Missing or non-numeric counters read as zero; lines without a `:` are
/// skipped.
pub fn parse_net_dev(content: &str) -> Vec<NetworkInterfaceSample> {
    content
        .lines()
        .skip(HEADER_LINES)
        .filter_map(|line| {
            let (name, counters) = line.split_once(':')?;
            let name = name.trim();
            if name.is_empty() {
                return None;
            }

            let mut values = [0u64; COUNTER_FIELDS];
            for (slot, token) in values.iter_mut().zip(counters.split_whitespace()) {
                *slot = token.parse().unwrap_or(0);
            }
            let [
                rx_bytes,
                rx_packets,
                rx_errs,
                rx_drop,
                rx_fifo,
                rx_frame,
                rx_compressed,
                rx_multicast,
                tx_bytes,
                tx_packets,
                tx_errs,
                tx_drop,
                tx_fifo,
                tx_colls,
                tx_carrier,
                tx_compressed,
            ] = values;

            Some(NetworkInterfaceSample {
                name: name.to_string(),
                ipv4: None,
                rx: RxCounters {
                    bytes: rx_bytes,
                    packets: rx_packets,
                    errs: rx_errs,
                    drop: rx_drop,
                    fifo: rx_fifo,
                    frame: rx_frame,
                    compressed: rx_compressed,
                    multicast: rx_multicast,
                },
                tx: TxCounters {
                    bytes: tx_bytes,
                    packets: tx_packets,
                    errs: tx_errs,
                    drop: tx_drop,
                    fifo: tx_fifo,
                    colls: tx_colls,
                    carrier: tx_carrier,
                    compressed: tx_compressed,
                },
            })
        })
        .collect()
}

/// Interface name to first IPv4 address, from the platform's address list
pub fn ipv4_addresses() -> HashMap<String, String> {
    let networks = Networks::new_with_refreshed_list();
    networks
        .iter()
        .filter_map(|(name, data)| {
            data.ip_networks()
                .iter()
                .find_map(|net| match net.addr {
                    IpAddr::V4(v4) => Some(v4.to_string()),
                    IpAddr::V6(_) => None,
                })
                .map(|addr| (name.to_string(), addr))
        })
        .collect()
}

/// Attach addresses to parsed interfaces by name
pub fn join_addresses(
    interfaces: Vec<NetworkInterfaceSample>,
    addresses: &HashMap<String, String>,
) -> Vec<NetworkInterfaceSample> {
    interfaces
        .into_iter()
        .map(|mut iface| {
            iface.ipv4 = addresses.get(&iface.name).cloned();
            iface
        })
        .collect()
}

pub fn read_interfaces(fs: &ProcFs) -> Sampled<Vec<NetworkInterfaceSample>> {
    match read_source(&fs.proc_path("net/dev")) {
        Ok(content) => {
            let interfaces = parse_net_dev(&content);
            Sampled::available(join_addresses(interfaces, &ipv4_addresses()))
        }
        Err(e) => {
            debug!("{}", e);
            Sampled::unavailable()
        }
    }
}
