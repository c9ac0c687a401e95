//! Process-wide constants
//!
//! Fixed addresses, ports, and file names for the bitcoind deployment this
//! crate manages. These are baked into the rendered config and never change
//! at runtime.

/// SOCKS5 proxy address of the Tor daemon reachable from bitcoind.
pub const TOR_PROXY_IP: &str = "10.21.21.11";
pub const TOR_PROXY_PORT: u16 = 9050;

/// Tor control port and password used when onion listening is enabled.
pub const TOR_PROXY_CONTROL_PORT: u16 = 29051;
pub const TOR_PROXY_CONTROL_PASSWORD: &str = "moneyprintergobrrr";

/// SAM bridge address of the I2P daemon.
pub const I2P_DAEMON_IP: &str = "10.21.21.13";
pub const I2P_DAEMON_PORT: u16 = 7656;

/// Address bitcoind itself binds on inside the deployment network.
pub const BITCOIND_IP: &str = "10.21.21.8";
pub const BITCOIND_P2P_PORT: u16 = 8333;
pub const BITCOIND_TOR_PORT: u16 = 8334;

/// Peers connecting from this range are whitelisted in the rendered config.
pub const PEER_WHITELIST: &str = "10.21.0.0/16";

/// Persisted settings layer (JSON), relative to the data directory.
pub const SETTINGS_FILE_NAME: &str = "bitcoin-config.json";

/// Config file fully owned by this crate; overwritten wholesale on apply.
pub const MANAGED_CONF_FILE_NAME: &str = "umbrel-bitcoin.conf";

/// bitcoind's own config file. Only the include directive in it is managed;
/// any other content belongs to the user.
pub const BASE_CONF_FILE_NAME: &str = "bitcoin.conf";
