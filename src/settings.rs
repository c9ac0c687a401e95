//! Bitcoind Settings Model
//!
//! Typed record of every daemon option this crate manages, together with the
//! immutable default values. A `BitcoinSettings` is always total: every known
//! option carries a value once defaults have been applied.

use serde::{Deserialize, Serialize};
use std::fmt;

mod patch;

pub use patch::{PrunePatch, SettingsPatch};

/// Chain selection for the daemon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Main,
    Test,
    Signet,
    Regtest,
}

impl Network {
    /// Chain name as bitcoind spells it in `chain=` and section headers
    pub fn chain_name(&self) -> &'static str {
        match self {
            Network::Main => "main",
            Network::Test => "test",
            Network::Signet => "signet",
            Network::Regtest => "regtest",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.chain_name())
    }
}

impl Default for Network {
    fn default() -> Self {
        Network::Main
    }
}

/// Block pruning group
///
/// Serialized field names match the persisted JSON layer, so an existing
/// settings file keeps loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PruneSettings {
    pub enabled: bool,
    #[serde(rename = "pruneSizeGB")]
    pub size_gb: f64,
}

impl Default for PruneSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            size_gb: 300.0,
        }
    }
}

/// Total settings record for the managed bitcoind instance
///
/// Field order groups peer settings, optimization knobs, RPC/REST, and chain
/// selection. Most field names mirror the daemon's own option names; the
/// remainder use the persisted layer's spelling via serde renames.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BitcoinSettings {
    // Peer settings
    pub clearnet: bool,
    pub tor_proxy_for_clearnet: bool,
    pub tor: bool,
    pub i2p: bool,
    pub incoming_connections: bool,
    pub peerblockfilters: bool,
    pub peerbloomfilters: bool,
    pub bantime: u32,
    pub maxconnections: u32,
    pub maxreceivebuffer: u32,
    pub maxsendbuffer: u32,
    pub maxtimeadjustment: u32,
    pub peertimeout: u32,
    pub timeout: u32,
    pub maxuploadtarget: u32,

    // Optimization
    #[serde(rename = "cacheSizeMB")]
    pub cache_size_mb: u32,
    pub mempool_full_rbf: bool,
    pub prune: PruneSettings,
    pub blockfilterindex: bool,
    pub maxmempool: u32,
    pub mempoolexpiry: u32,
    pub persistmempool: bool,
    pub datacarrier: bool,
    pub datacarriersize: u32,
    pub permitbaremultisig: bool,
    pub rejectparasites: bool,
    pub rejecttokens: bool,
    pub minrelaytxfee: f64,
    pub bytespersigop: u32,
    pub bytespersigopstrict: u32,
    pub limitancestorcount: u32,
    pub limitancestorsize: u32,
    pub limitdescendantcount: u32,
    pub limitdescendantsize: u32,
    pub permitbarepubkey: bool,
    pub maxscriptsize: u32,
    pub datacarriercost: f64,
    pub acceptnonstddatacarrier: bool,
    pub dustrelayfee: f64,
    pub blockmaxsize: u64,
    pub blockmaxweight: u64,
    pub blockreconstructionextratxn: u32,
    pub maxorphantx: u32,
    pub reindex: bool,

    // RPC/REST
    pub rest: bool,
    pub rpcworkqueue: u32,

    // Network selection
    pub network: Network,
}

impl Default for BitcoinSettings {
    fn default() -> Self {
        Self {
            clearnet: true,
            tor_proxy_for_clearnet: false,
            tor: true,
            i2p: true,
            incoming_connections: false,
            peerblockfilters: true,
            peerbloomfilters: false,
            bantime: 86400,
            maxconnections: 125,
            maxreceivebuffer: 5000,
            maxsendbuffer: 1000,
            maxtimeadjustment: 4200,
            peertimeout: 60,
            timeout: 5000,
            maxuploadtarget: 0,
            cache_size_mb: 450,
            mempool_full_rbf: false,
            prune: PruneSettings::default(),
            blockfilterindex: true,
            maxmempool: 300,
            mempoolexpiry: 336,
            persistmempool: true,
            datacarrier: true,
            datacarriersize: 42,
            permitbaremultisig: false,
            rejectparasites: true,
            rejecttokens: false,
            minrelaytxfee: 0.00001,
            bytespersigop: 20,
            bytespersigopstrict: 20,
            limitancestorcount: 25,
            limitancestorsize: 101,
            limitdescendantcount: 25,
            limitdescendantsize: 101,
            permitbarepubkey: false,
            maxscriptsize: 1650,
            datacarriercost: 1.0,
            acceptnonstddatacarrier: false,
            dustrelayfee: 0.00003,
            blockmaxsize: 3985000,
            blockmaxweight: 3985000,
            blockreconstructionextratxn: 1000000,
            maxorphantx: 100,
            reindex: false,
            rest: false,
            rpcworkqueue: 128,
            network: Network::Main,
        }
    }
}
