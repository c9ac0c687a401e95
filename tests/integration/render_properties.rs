//! Property-based tests for rendering and merge guarantees

use bitconf::render::render_config;
use bitconf::settings::{BitcoinSettings, Network, PruneSettings, SettingsPatch};
use proptest::prelude::*;

fn arb_network() -> impl Strategy<Value = Network> {
    prop_oneof![
        Just(Network::Main),
        Just(Network::Test),
        Just(Network::Signet),
        Just(Network::Regtest),
    ]
}

fn arb_settings() -> impl Strategy<Value = BitcoinSettings> {
    (
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        0u32..100_000,
        1u32..10_000,
        (any::<bool>(), 1u32..10_000),
        arb_network(),
    )
        .prop_map(
            |(clearnet, tor, i2p, incoming, cache_mb, maxconn, (prune_on, prune_gb), network)| {
                BitcoinSettings {
                    clearnet,
                    tor,
                    i2p,
                    incoming_connections: incoming,
                    cache_size_mb: cache_mb,
                    maxconnections: maxconn,
                    prune: PruneSettings {
                        enabled: prune_on,
                        size_gb: f64::from(prune_gb),
                    },
                    network,
                    ..Default::default()
                }
            },
        )
}

proptest! {
    /// Same record, same bytes. This is the invariant the up-to-date check
    /// stands on.
    #[test]
    fn render_is_deterministic(settings in arb_settings()) {
        prop_assert_eq!(render_config(&settings), render_config(&settings.clone()));
    }

    /// The transaction index is always derived from pruning, never both
    /// values at once.
    #[test]
    fn txindex_follows_prune(settings in arb_settings()) {
        let rendered = render_config(&settings);
        let expected = if settings.prune.enabled { "txindex=0" } else { "txindex=1" };
        let unexpected = if settings.prune.enabled { "txindex=1" } else { "txindex=0" };
        prop_assert!(rendered.contains(expected));
        prop_assert!(!rendered.contains(unexpected));
    }

    /// `listen` stays hardcoded on; only the derived acceptance flags move.
    #[test]
    fn listen_is_always_enabled(settings in arb_settings()) {
        let rendered = render_config(&settings);
        prop_assert!(rendered.contains("listen=1"));
        let flag = i32::from(settings.incoming_connections);
        let listenonion = format!("listenonion={}", flag);
        let i2pacceptincoming = format!("i2pacceptincoming={}", flag);
        prop_assert!(rendered.contains(&listenonion));
        prop_assert!(rendered.contains(&i2pacceptincoming));
    }

    /// A record survives the persisted-layer JSON encoding unchanged.
    #[test]
    fn settings_roundtrip_through_json(settings in arb_settings()) {
        let json = serde_json::to_string(&settings).unwrap();
        let parsed: BitcoinSettings = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(parsed, settings);
    }

    /// Applying the empty patch never changes a record.
    #[test]
    fn empty_patch_is_identity(settings in arb_settings()) {
        prop_assert_eq!(settings.apply(&SettingsPatch::default()), settings.clone());
    }

    /// A full patch built from a record reproduces that record over any base.
    #[test]
    fn full_patch_overrides_any_base(base in arb_settings(), target in arb_settings()) {
        let patch = SettingsPatch::from(&target);
        prop_assert_eq!(base.apply(&patch), target);
    }
}
