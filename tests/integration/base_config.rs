//! Base config reconciliation against a recording file store
//!
//! The base `bitcoin.conf` belongs to the user; these tests pin down the
//! exact directive content, verbatim preservation of user content, and the
//! write-avoidance guarantee of repeated reconciliation.

use crate::integration::test_utils::MemoryFileStore;
use bitconf::reconcile::ConfigReconciler;
use bitconf::settings::BitcoinSettings;
use std::path::PathBuf;
use std::sync::Arc;

const DIRECTIVE: &str = "# Load additional configuration file, relative to the data directory.\nincludeconf=umbrel-bitcoin.conf";

struct Fixture {
    files: Arc<MemoryFileStore>,
    reconciler: ConfigReconciler,
    base_path: PathBuf,
}

fn fixture() -> Fixture {
    let files = Arc::new(MemoryFileStore::new());
    let base_path = PathBuf::from("/data/bitcoin.conf");
    let reconciler = ConfigReconciler::new(
        files.clone(),
        PathBuf::from("/data/umbrel-bitcoin.conf"),
        base_path.clone(),
    );
    Fixture {
        files,
        reconciler,
        base_path,
    }
}

#[tokio::test]
async fn test_absent_base_config_gets_exact_directive() {
    let f = fixture();

    f.reconciler.reconcile_base_config(false).await.unwrap();
    assert_eq!(f.files.contents(&f.base_path).unwrap(), DIRECTIVE);
}

#[tokio::test]
async fn test_user_content_preserved_verbatim() {
    let f = fixture();
    let user_content = "# my notes\nrpcuser=alice\n\nrpcpassword=hunter2";
    f.files.seed(f.base_path.clone(), user_content);

    f.reconciler.reconcile_base_config(false).await.unwrap();
    assert_eq!(
        f.files.contents(&f.base_path).unwrap(),
        format!("{}\n{}", DIRECTIVE, user_content)
    );
}

#[tokio::test]
async fn test_second_reconcile_issues_no_write() {
    let f = fixture();
    f.files.seed(f.base_path.clone(), "daemon=1");

    f.reconciler.reconcile_base_config(false).await.unwrap();
    assert_eq!(f.files.write_count(&f.base_path), 1);

    f.reconciler.reconcile_base_config(false).await.unwrap();
    assert_eq!(f.files.write_count(&f.base_path), 1);
}

#[tokio::test]
async fn test_directive_already_present_is_left_alone() {
    let f = fixture();
    let content = format!("{}\nrpcuser=alice", DIRECTIVE);
    f.files.seed(f.base_path.clone(), &content);

    f.reconciler.reconcile_base_config(false).await.unwrap();
    assert_eq!(f.files.write_count(&f.base_path), 0);
    assert_eq!(f.files.contents(&f.base_path).unwrap(), content);
}

#[tokio::test]
async fn test_overwrite_always_writes_directive_only() {
    let f = fixture();
    f.files.seed(f.base_path.clone(), "rpcuser=alice");

    f.reconciler.reconcile_base_config(true).await.unwrap();
    assert_eq!(f.files.contents(&f.base_path).unwrap(), DIRECTIVE);
    assert_eq!(f.files.write_count(&f.base_path), 1);
}

#[tokio::test]
async fn test_managed_config_up_to_date_with_memory_store() {
    let f = fixture();
    let settings = BitcoinSettings::default();

    assert!(!f
        .reconciler
        .is_managed_config_up_to_date(&settings)
        .await
        .unwrap());

    f.reconciler.write_managed_config(&settings).await.unwrap();
    assert!(f
        .reconciler
        .is_managed_config_up_to_date(&settings)
        .await
        .unwrap());
}
