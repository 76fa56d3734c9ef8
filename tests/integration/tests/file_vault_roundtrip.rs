//! File-backed vault persistence integration tests.
//!
//! These verify that committed state survives a drop/reopen cycle and that
//! the config layer resolves the backend the store crate expects.

use passvault_core::config::{Config, VaultBackend};
use passvault_integration_tests::{example_params, wallet};
use passvault_store::{FileVault, Vault, VaultError};
use tempfile::TempDir;

#[tokio::test]
async fn committed_state_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("vault.json");
    let user1 = wallet(1);

    {
        let vault = FileVault::open(path.clone()).unwrap();
        vault.register(&user1).await.unwrap();
        vault.store(&user1, example_params()).await.unwrap();
    }

    let vault = FileVault::open(path).unwrap();
    assert!(vault.is_registered(&user1).await.unwrap());
    let view = vault
        .get(&user1, "test-password-id")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(view.website, "example.com");
    assert_eq!(view.ciphertext.expose(), "encrypted-password-data");
}

#[tokio::test]
async fn ownership_gate_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("vault.json");
    let user1 = wallet(1);
    let user2 = wallet(2);

    {
        let vault = FileVault::open(path.clone()).unwrap();
        vault.register(&user1).await.unwrap();
        vault.register(&user2).await.unwrap();
        vault.store(&user1, example_params()).await.unwrap();
    }

    let vault = FileVault::open(path).unwrap();
    let result = vault.get(&user2, "test-password-id").await;
    assert!(matches!(result, Err(VaultError::Forbidden { .. })));
}

#[tokio::test]
async fn vault_file_holds_ciphertext_not_plaintext_marker() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("vault.json");
    let user1 = wallet(1);

    let vault = FileVault::open(path.clone()).unwrap();
    vault.register(&user1).await.unwrap();
    vault.store(&user1, example_params()).await.unwrap();

    // The on-disk payload is exactly what the caller submitted: ciphertext.
    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(raw.contains("encrypted-password-data"));
    // Registry and record live in the same committed snapshot
    assert!(raw.contains("wallet_1"));
}

#[test]
fn config_resolves_file_backend_by_default() {
    let config = Config::default();
    assert_eq!(config.vault.backend, VaultBackend::File);
    assert!(config.validate().is_ok());
}

#[tokio::test]
async fn config_vault_dir_override_points_file_vault() {
    let dir = TempDir::new().unwrap();
    let mut config = Config::default();
    config.vault.dir = Some(dir.path().to_string_lossy().into_owned());
    assert!(config.validate().is_ok());
    assert_eq!(config.vault_dir().unwrap(), dir.path());

    let user1 = wallet(1);
    {
        let vault = FileVault::from_config(&config).unwrap();
        vault.register(&user1).await.unwrap();
        vault.store(&user1, example_params()).await.unwrap();
    }

    // A second handle built from the same config sees the committed state
    let vault = FileVault::from_config(&config).unwrap();
    assert!(vault.is_registered(&user1).await.unwrap());
    assert!(dir.path().join("vault.json").exists());
}
