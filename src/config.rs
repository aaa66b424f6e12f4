use crate::error::Error;
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub type SharedConfig = Arc<Config>;

const DEFAULT_DNS_PORT: u16 = 53;
const DEFAULT_ZONE_PATH: &str = "acmedns.txt";

/// Responder configuration, loaded from a JSON file. Every field is optional and falls back to
/// the [`Default`] value.
///
/// ```json
/// {
///   "dns_udp_bind_addr": "0.0.0.0:53",
///   "zone_path": "/var/lib/acmedns/acmedns.txt"
/// }
/// ```
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// UDP address the DNS listener binds. Defaults to port 53 on all IPv4 interfaces.
    pub dns_udp_bind_addr: SocketAddr,
    /// Path of the zone file re-read for every query. Defaults to `acmedns.txt` in the working
    /// directory.
    pub zone_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            dns_udp_bind_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), DEFAULT_DNS_PORT),
            zone_path: PathBuf::from(DEFAULT_ZONE_PATH),
        }
    }
}

impl Config {
    /// Load a [`Config`] from the JSON file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IO`] if the path can't be opened, or [`Error::InvalidJSON`] if its
    /// content isn't a valid config.
    pub fn try_from_file(p: impl AsRef<Path>) -> Result<Self, Error> {
        let f = File::open(p)?;
        let reader = BufReader::new(f);
        let conf: Config = serde_json::from_reader(reader)?;
        Ok(conf)
    }
}
