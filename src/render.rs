//! Config Renderer
//!
//! Pure mapping from a total settings record to bitcoind's config-file
//! syntax. Rendering is deterministic: the same record always produces
//! byte-identical text, which is what makes the on-disk reconciliation in
//! [`crate::reconcile`] a simple string comparison.
//!
//! The output is consumed by bitcoind's own parser, so key names, section
//! headers, and value formatting must be reproduced exactly.

use crate::constants::{
    BITCOIND_IP, BITCOIND_P2P_PORT, BITCOIND_TOR_PORT, I2P_DAEMON_IP, I2P_DAEMON_PORT,
    PEER_WHITELIST, TOR_PROXY_CONTROL_PASSWORD, TOR_PROXY_CONTROL_PORT, TOR_PROXY_IP,
    TOR_PROXY_PORT,
};
use crate::settings::{BitcoinSettings, Network};
use std::fmt::Display;

/// bitcoind expects MiB; the settings record stores MB and GB.
const MB_TO_MIB: f64 = 0.953674;
const GB_TO_MIB: f64 = 953.674;

/// Ordered line builder for the rendered config
///
/// Collects comment and directive lines in emission order and joins them
/// with newlines at the end. There is no trailing newline: the rendered text
/// is compared byte-for-byte against the file on disk.
struct ConfWriter {
    lines: Vec<String>,
}

impl ConfWriter {
    fn new() -> Self {
        Self { lines: Vec::new() }
    }

    fn blank(&mut self) {
        self.lines.push(String::new());
    }

    fn comment(&mut self, text: &str) {
        self.lines.push(format!("# {}", text));
    }

    fn raw(&mut self, line: String) {
        self.lines.push(line);
    }

    fn directive(&mut self, key: &str, value: impl Display) {
        self.lines.push(format!("{}={}", key, value));
    }

    /// Comment line followed by its directive
    fn entry(&mut self, comment: &str, key: &str, value: impl Display) {
        self.comment(comment);
        self.directive(key, value);
    }

    /// Emit `key=1` with its comment only when the flag is set
    fn flag(&mut self, on: bool, comment: &str, key: &str) {
        if on {
            self.entry(comment, key, 1);
        }
    }

    fn finish(self) -> String {
        self.lines.join("\n")
    }
}

/// Render a total settings record into the managed config file's text
pub fn render_config(settings: &BitcoinSettings) -> String {
    let mut w = ConfWriter::new();

    chain_section(&mut w, settings);
    core_section(&mut w, settings);
    network_section(&mut w, settings);
    rpc_section(&mut w, settings);
    bind_section(&mut w, settings);

    w.finish()
}

fn chain_section(w: &mut ConfWriter, settings: &BitcoinSettings) {
    w.comment("[chain]");
    // Mainnet is bitcoind's default chain and is never spelled out.
    if settings.network != Network::Main {
        w.directive("chain", settings.network);
    }
}

fn core_section(w: &mut ConfWriter, settings: &BitcoinSettings) {
    w.blank();
    w.comment("[core]");

    w.entry(
        "Maximum database cache size in MiB",
        "dbcache",
        (f64::from(settings.cache_size_mb) * MB_TO_MIB).round() as u64,
    );

    w.flag(
        settings.mempool_full_rbf,
        "Allow any transaction in the mempool of Bitcoin Node to be replaced with newer versions of the same transaction that include a higher fee.",
        "mempoolfullrbf",
    );

    if settings.prune.enabled {
        w.entry(
            "Reduce disk space requirements to this many MiB by enabling pruning (deleting) of old blocks. This mode is incompatible with -txindex and -coinstatsindex. WARNING: Reverting this setting requires re-downloading the entire blockchain. (default: 0 = disable pruning blocks, 1 = allow manual pruning via RPC, greater than or equal to 550 = automatically prune blocks to stay under target size in MiB).",
            "prune",
            (settings.prune.size_gb * GB_TO_MIB).round() as u64,
        );
    }

    // The transaction index cannot coexist with pruning, so it is derived
    // from the prune flag rather than configured on its own.
    w.directive("txindex", if settings.prune.enabled { 0 } else { 1 });

    w.flag(
        settings.blockfilterindex,
        "Enable all compact filters.",
        "blockfilterindex",
    );

    w.entry(
        "Keep the transaction memory pool below this many megabytes.",
        "maxmempool",
        settings.maxmempool,
    );
    w.entry(
        "Do not keep transactions in the mempool longer than this many hours.",
        "mempoolexpiry",
        settings.mempoolexpiry,
    );

    w.flag(
        settings.persistmempool,
        "Save the mempool on shutdown and load on restart.",
        "persistmempool",
    );

    // Enabled is the daemon default; only a deviation is spelled out.
    if !settings.datacarrier {
        w.entry(
            "Relay and mine data carrier transactions.",
            "datacarrier",
            0,
        );
    }

    w.entry(
        "Maximum size of arbitrary data to relay and mine.",
        "datacarriersize",
        settings.datacarriersize,
    );

    w.flag(
        settings.permitbaremultisig,
        "Relay non-P2SH multisig.",
        "permitbaremultisig",
    );

    if !settings.rejectparasites {
        w.entry(
            "Do not relay transactions that are considered parasitic.",
            "rejectparasites",
            0,
        );
    }

    w.flag(
        settings.rejecttokens,
        "Reject transactions that create tokens.",
        "rejecttokens",
    );

    w.entry("Min Transaction Relay Fee", "minrelaytxfee", settings.minrelaytxfee);
    w.entry(
        "Equivalent bytes per sigop in transactions for relay and mining",
        "bytespersigop",
        settings.bytespersigop,
    );
    w.entry(
        "Minimum bytes per sigop in transactions we relay and mine",
        "bytespersigopstrict",
        settings.bytespersigopstrict,
    );
    w.entry(
        "Do not accept transactions if number of in-mempool ancestors is <n> or more",
        "limitancestorcount",
        settings.limitancestorcount,
    );
    w.entry(
        "Do not accept transactions whose size with all in-mempool ancestors exceeds <n> kilobytes",
        "limitancestorsize",
        settings.limitancestorsize,
    );
    w.entry(
        "Do not accept transactions if any ancestor would have <n> or more in-mempool descendants",
        "limitdescendantcount",
        settings.limitdescendantcount,
    );
    w.entry(
        "Do not accept transactions if any ancestor would have more than <n> kilobytes of in-mempool descendants",
        "limitdescendantsize",
        settings.limitdescendantsize,
    );

    w.flag(
        settings.permitbarepubkey,
        "Relay legacy pubkey outputs",
        "permitbarepubkey",
    );

    w.entry(
        "Maximum size of scripts we relay and mine, in bytes",
        "maxscriptsize",
        settings.maxscriptsize,
    );
    w.entry(
        "Treat extra data in transactions as at least N vbytes per actual byte",
        "datacarriercost",
        settings.datacarriercost,
    );

    w.flag(
        settings.acceptnonstddatacarrier,
        "Relay and mine non-OP_RETURN datacarrier injection",
        "acceptnonstddatacarrier",
    );

    w.entry(
        "Fee rate (in BTC/kvB) used to define dust, the value of an output such that it will cost more than its value in fees at this fee rate to spend it.",
        "dustrelayfee",
        settings.dustrelayfee,
    );
    w.entry("Set maximum block size in bytes", "blockmaxsize", settings.blockmaxsize);
    w.entry(
        "Set maximum BIP141 block weight",
        "blockmaxweight",
        settings.blockmaxweight,
    );
    w.entry(
        "Extra transactions to keep in memory for compact block reconstructions",
        "blockreconstructionextratxn",
        settings.blockreconstructionextratxn,
    );
    w.entry(
        "Maximum number of orphan transactions to be kept in memory.",
        "maxorphantx",
        settings.maxorphantx,
    );

    w.flag(
        settings.reindex,
        "Rebuild chain state and block index from the blk*.dat files on disk.",
        "reindex",
    );
}

fn network_section(w: &mut ConfWriter, settings: &BitcoinSettings) {
    w.blank();
    w.comment("[network]");

    // Peer transports are independently conditional and not mutually
    // exclusive; emission order is fixed.
    if settings.clearnet {
        w.comment("Connect to peers over the clearnet.");
        w.directive("onlynet", "ipv4");
        w.directive("onlynet", "ipv6");
    }

    if settings.tor_proxy_for_clearnet {
        w.entry(
            "Connect through <ip:port> SOCKS5 proxy.",
            "proxy",
            format_args!("{}:{}", TOR_PROXY_IP, TOR_PROXY_PORT),
        );
    }

    if settings.tor {
        w.comment("Use separate SOCKS5 proxy <ip:port> to reach peers via Tor hidden services.");
        w.directive("onlynet", "onion");
        w.directive("onion", format_args!("{}:{}", TOR_PROXY_IP, TOR_PROXY_PORT));
        w.comment("Tor control <ip:port> and password to use when onion listening enabled.");
        w.directive(
            "torcontrol",
            format_args!("{}:{}", TOR_PROXY_IP, TOR_PROXY_CONTROL_PORT),
        );
        w.directive("torpassword", TOR_PROXY_CONTROL_PASSWORD);
    }

    if settings.i2p {
        w.entry(
            "I2P SAM proxy <ip:port> to reach I2P peers.",
            "i2psam",
            format_args!("{}:{}", I2P_DAEMON_IP, I2P_DAEMON_PORT),
        );
        w.directive("onlynet", "i2p");
    }

    // `listen` stays on unconditionally so the Tor onion service can be
    // configured; only the onion/I2P acceptance flags follow the setting.
    w.comment("Enable/disable incoming connections from peers.");
    let accept_incoming = i32::from(settings.incoming_connections);
    w.directive("listen", 1);
    w.directive("listenonion", accept_incoming);
    w.directive("i2pacceptincoming", accept_incoming);

    w.entry(
        "Whitelist peers connecting from local Umbrel IP range. Whitelisted peers cannot be DoS banned and their transactions are always relayed, even if they are already in the mempool.",
        "whitelist",
        PEER_WHITELIST,
    );

    w.flag(
        settings.peerblockfilters,
        "Serve compact block filters to peers per BIP 157.",
        "peerblockfilters",
    );
    w.flag(
        settings.peerbloomfilters,
        "Support filtering of blocks and transactions with bloom filters.",
        "peerbloomfilters",
    );

    w.entry(
        "Number of seconds to keep misbehaving peers from reconnecting.",
        "bantime",
        settings.bantime,
    );
    w.entry(
        "Maintain at most this many connections to peers.",
        "maxconnections",
        settings.maxconnections,
    );
    w.entry(
        "Maximum per-connection receive buffer in KB.",
        "maxreceivebuffer",
        settings.maxreceivebuffer,
    );
    w.entry(
        "Maximum per-connection send buffer in KB.",
        "maxsendbuffer",
        settings.maxsendbuffer,
    );
    w.entry(
        "Maximum allowed median peer time offset adjustment.",
        "maxtimeadjustment",
        settings.maxtimeadjustment,
    );
    w.entry(
        "The amount of time (in seconds) a peer may be inactive before the connection to it is dropped.",
        "peertimeout",
        settings.peertimeout,
    );
    w.entry(
        "Initial peer connection timeout in milliseconds.",
        "timeout",
        settings.timeout,
    );
    w.entry(
        "Maximum total upload target in MB per 24hr period.",
        "maxuploadtarget",
        settings.maxuploadtarget,
    );
}

fn rpc_section(w: &mut ConfWriter, settings: &BitcoinSettings) {
    w.blank();
    w.comment("[rpc]");

    w.flag(settings.rest, "Accept public REST requests.", "rest");

    w.entry(
        "Depth of the work queue to service RPC calls.",
        "rpcworkqueue",
        settings.rpcworkqueue,
    );
}

fn bind_section(w: &mut ConfWriter, settings: &BitcoinSettings) {
    w.blank();
    w.comment("Required to configure Tor control port properly");
    w.raw(format!("[{}]", settings.network));
    w.directive("bind", format_args!("0.0.0.0:{}", BITCOIND_P2P_PORT));
    w.directive(
        "bind",
        format_args!("{}:{}=onion", BITCOIND_IP, BITCOIND_TOR_PORT),
    );
}
