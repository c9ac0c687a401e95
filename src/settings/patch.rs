//! Partial settings updates and the deep-merge that applies them.
//!
//! A `SettingsPatch` is the shape of both an incoming update and the
//! persisted override layer: any subset of the known options. Merging is
//! right-biased and recurses only into the known `prune` group; every scalar
//! is replaced wholesale by the patch value when present.

use super::{BitcoinSettings, Network, PruneSettings};
use serde::Deserialize;

/// Partial update to the prune group
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PrunePatch {
    pub enabled: Option<bool>,
    #[serde(rename = "pruneSizeGB")]
    pub size_gb: Option<f64>,
}

/// Partial update to the settings record
///
/// Every field is optional; absent fields leave the base value untouched.
/// Unknown keys in a persisted layer are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingsPatch {
    pub clearnet: Option<bool>,
    pub tor_proxy_for_clearnet: Option<bool>,
    pub tor: Option<bool>,
    pub i2p: Option<bool>,
    pub incoming_connections: Option<bool>,
    pub peerblockfilters: Option<bool>,
    pub peerbloomfilters: Option<bool>,
    pub bantime: Option<u32>,
    pub maxconnections: Option<u32>,
    pub maxreceivebuffer: Option<u32>,
    pub maxsendbuffer: Option<u32>,
    pub maxtimeadjustment: Option<u32>,
    pub peertimeout: Option<u32>,
    pub timeout: Option<u32>,
    pub maxuploadtarget: Option<u32>,
    #[serde(rename = "cacheSizeMB")]
    pub cache_size_mb: Option<u32>,
    pub mempool_full_rbf: Option<bool>,
    pub prune: Option<PrunePatch>,
    pub blockfilterindex: Option<bool>,
    pub maxmempool: Option<u32>,
    pub mempoolexpiry: Option<u32>,
    pub persistmempool: Option<bool>,
    pub datacarrier: Option<bool>,
    pub datacarriersize: Option<u32>,
    pub permitbaremultisig: Option<bool>,
    pub rejectparasites: Option<bool>,
    pub rejecttokens: Option<bool>,
    pub minrelaytxfee: Option<f64>,
    pub bytespersigop: Option<u32>,
    pub bytespersigopstrict: Option<u32>,
    pub limitancestorcount: Option<u32>,
    pub limitancestorsize: Option<u32>,
    pub limitdescendantcount: Option<u32>,
    pub limitdescendantsize: Option<u32>,
    pub permitbarepubkey: Option<bool>,
    pub maxscriptsize: Option<u32>,
    pub datacarriercost: Option<f64>,
    pub acceptnonstddatacarrier: Option<bool>,
    pub dustrelayfee: Option<f64>,
    pub blockmaxsize: Option<u64>,
    pub blockmaxweight: Option<u64>,
    pub blockreconstructionextratxn: Option<u32>,
    pub maxorphantx: Option<u32>,
    pub reindex: Option<bool>,
    pub rest: Option<bool>,
    pub rpcworkqueue: Option<u32>,
    pub network: Option<Network>,
}

impl BitcoinSettings {
    /// Apply a partial update on top of this record, returning the merged
    /// record. The patch wins wherever it defines a value; the `prune` group
    /// merges field-by-field.
    pub fn apply(&self, patch: &SettingsPatch) -> BitcoinSettings {
        BitcoinSettings {
            clearnet: patch.clearnet.unwrap_or(self.clearnet),
            tor_proxy_for_clearnet: patch
                .tor_proxy_for_clearnet
                .unwrap_or(self.tor_proxy_for_clearnet),
            tor: patch.tor.unwrap_or(self.tor),
            i2p: patch.i2p.unwrap_or(self.i2p),
            incoming_connections: patch
                .incoming_connections
                .unwrap_or(self.incoming_connections),
            peerblockfilters: patch.peerblockfilters.unwrap_or(self.peerblockfilters),
            peerbloomfilters: patch.peerbloomfilters.unwrap_or(self.peerbloomfilters),
            bantime: patch.bantime.unwrap_or(self.bantime),
            maxconnections: patch.maxconnections.unwrap_or(self.maxconnections),
            maxreceivebuffer: patch.maxreceivebuffer.unwrap_or(self.maxreceivebuffer),
            maxsendbuffer: patch.maxsendbuffer.unwrap_or(self.maxsendbuffer),
            maxtimeadjustment: patch.maxtimeadjustment.unwrap_or(self.maxtimeadjustment),
            peertimeout: patch.peertimeout.unwrap_or(self.peertimeout),
            timeout: patch.timeout.unwrap_or(self.timeout),
            maxuploadtarget: patch.maxuploadtarget.unwrap_or(self.maxuploadtarget),
            cache_size_mb: patch.cache_size_mb.unwrap_or(self.cache_size_mb),
            mempool_full_rbf: patch.mempool_full_rbf.unwrap_or(self.mempool_full_rbf),
            prune: self.prune.apply(patch.prune.as_ref()),
            blockfilterindex: patch.blockfilterindex.unwrap_or(self.blockfilterindex),
            maxmempool: patch.maxmempool.unwrap_or(self.maxmempool),
            mempoolexpiry: patch.mempoolexpiry.unwrap_or(self.mempoolexpiry),
            persistmempool: patch.persistmempool.unwrap_or(self.persistmempool),
            datacarrier: patch.datacarrier.unwrap_or(self.datacarrier),
            datacarriersize: patch.datacarriersize.unwrap_or(self.datacarriersize),
            permitbaremultisig: patch.permitbaremultisig.unwrap_or(self.permitbaremultisig),
            rejectparasites: patch.rejectparasites.unwrap_or(self.rejectparasites),
            rejecttokens: patch.rejecttokens.unwrap_or(self.rejecttokens),
            minrelaytxfee: patch.minrelaytxfee.unwrap_or(self.minrelaytxfee),
            bytespersigop: patch.bytespersigop.unwrap_or(self.bytespersigop),
            bytespersigopstrict: patch.bytespersigopstrict.unwrap_or(self.bytespersigopstrict),
            limitancestorcount: patch.limitancestorcount.unwrap_or(self.limitancestorcount),
            limitancestorsize: patch.limitancestorsize.unwrap_or(self.limitancestorsize),
            limitdescendantcount: patch
                .limitdescendantcount
                .unwrap_or(self.limitdescendantcount),
            limitdescendantsize: patch.limitdescendantsize.unwrap_or(self.limitdescendantsize),
            permitbarepubkey: patch.permitbarepubkey.unwrap_or(self.permitbarepubkey),
            maxscriptsize: patch.maxscriptsize.unwrap_or(self.maxscriptsize),
            datacarriercost: patch.datacarriercost.unwrap_or(self.datacarriercost),
            acceptnonstddatacarrier: patch
                .acceptnonstddatacarrier
                .unwrap_or(self.acceptnonstddatacarrier),
            dustrelayfee: patch.dustrelayfee.unwrap_or(self.dustrelayfee),
            blockmaxsize: patch.blockmaxsize.unwrap_or(self.blockmaxsize),
            blockmaxweight: patch.blockmaxweight.unwrap_or(self.blockmaxweight),
            blockreconstructionextratxn: patch
                .blockreconstructionextratxn
                .unwrap_or(self.blockreconstructionextratxn),
            maxorphantx: patch.maxorphantx.unwrap_or(self.maxorphantx),
            reindex: patch.reindex.unwrap_or(self.reindex),
            rest: patch.rest.unwrap_or(self.rest),
            rpcworkqueue: patch.rpcworkqueue.unwrap_or(self.rpcworkqueue),
            network: patch.network.unwrap_or(self.network),
        }
    }
}

impl PruneSettings {
    fn apply(&self, patch: Option<&PrunePatch>) -> PruneSettings {
        match patch {
            Some(p) => PruneSettings {
                enabled: p.enabled.unwrap_or(self.enabled),
                size_gb: p.size_gb.unwrap_or(self.size_gb),
            },
            None => self.clone(),
        }
    }
}

impl From<&BitcoinSettings> for SettingsPatch {
    /// A patch that sets every option. Used when resetting to defaults, so
    /// the full default record overrides whatever layer is persisted.
    fn from(s: &BitcoinSettings) -> Self {
        SettingsPatch {
            clearnet: Some(s.clearnet),
            tor_proxy_for_clearnet: Some(s.tor_proxy_for_clearnet),
            tor: Some(s.tor),
            i2p: Some(s.i2p),
            incoming_connections: Some(s.incoming_connections),
            peerblockfilters: Some(s.peerblockfilters),
            peerbloomfilters: Some(s.peerbloomfilters),
            bantime: Some(s.bantime),
            maxconnections: Some(s.maxconnections),
            maxreceivebuffer: Some(s.maxreceivebuffer),
            maxsendbuffer: Some(s.maxsendbuffer),
            maxtimeadjustment: Some(s.maxtimeadjustment),
            peertimeout: Some(s.peertimeout),
            timeout: Some(s.timeout),
            maxuploadtarget: Some(s.maxuploadtarget),
            cache_size_mb: Some(s.cache_size_mb),
            mempool_full_rbf: Some(s.mempool_full_rbf),
            prune: Some(PrunePatch {
                enabled: Some(s.prune.enabled),
                size_gb: Some(s.prune.size_gb),
            }),
            blockfilterindex: Some(s.blockfilterindex),
            maxmempool: Some(s.maxmempool),
            mempoolexpiry: Some(s.mempoolexpiry),
            persistmempool: Some(s.persistmempool),
            datacarrier: Some(s.datacarrier),
            datacarriersize: Some(s.datacarriersize),
            permitbaremultisig: Some(s.permitbaremultisig),
            rejectparasites: Some(s.rejectparasites),
            rejecttokens: Some(s.rejecttokens),
            minrelaytxfee: Some(s.minrelaytxfee),
            bytespersigop: Some(s.bytespersigop),
            bytespersigopstrict: Some(s.bytespersigopstrict),
            limitancestorcount: Some(s.limitancestorcount),
            limitancestorsize: Some(s.limitancestorsize),
            limitdescendantcount: Some(s.limitdescendantcount),
            limitdescendantsize: Some(s.limitdescendantsize),
            permitbarepubkey: Some(s.permitbarepubkey),
            maxscriptsize: Some(s.maxscriptsize),
            datacarriercost: Some(s.datacarriercost),
            acceptnonstddatacarrier: Some(s.acceptnonstddatacarrier),
            dustrelayfee: Some(s.dustrelayfee),
            blockmaxsize: Some(s.blockmaxsize),
            blockmaxweight: Some(s.blockmaxweight),
            blockreconstructionextratxn: Some(s.blockreconstructionextratxn),
            maxorphantx: Some(s.maxorphantx),
            reindex: Some(s.reindex),
            rest: Some(s.rest),
            rpcworkqueue: Some(s.rpcworkqueue),
            network: Some(s.network),
        }
    }
}
