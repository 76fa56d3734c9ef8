//! End-to-end call scenarios against the vault.
//!
//! These walk the call surface the way a ledger host would: one atomic call
//! at a time, each committing fully or failing with a tagged outcome.

use passvault_core::{Ciphertext, Principal};
use passvault_integration_tests::{example_params, wallet};
use passvault_store::{dispatch, Call, FailureKind, MemoryVault, Vault, VaultError};

#[tokio::test]
async fn user_registration() {
    let vault = MemoryVault::new();
    let user1 = wallet(1);

    let outcome = dispatch(&vault, &user1, Call::RegisterUser).await;
    assert_eq!(outcome.value(), Some(&serde_json::json!(true)));
}

#[tokio::test]
async fn store_and_retrieve_password() {
    let vault = MemoryVault::new();
    let user1 = wallet(1);

    // Register user first
    let outcome = dispatch(&vault, &user1, Call::RegisterUser).await;
    assert!(outcome.is_ok());

    // Store password
    let outcome = dispatch(
        &vault,
        &user1,
        Call::StorePassword {
            id: "test-password-id".to_string(),
            ciphertext: Ciphertext::new("encrypted-password-data").unwrap(),
            website: "example.com".to_string(),
            username: "testuser".to_string(),
        },
    )
    .await;
    assert_eq!(outcome.value(), Some(&serde_json::json!(true)));

    // Retrieve password
    let outcome = dispatch(
        &vault,
        &user1,
        Call::GetPassword {
            id: "test-password-id".to_string(),
        },
    )
    .await;
    let data = outcome.value().expect("call should commit");
    assert_eq!(data["website"], "example.com");
    assert_eq!(data["username"], "testuser");
    assert_eq!(data["ciphertext"], "encrypted-password-data");
}

#[tokio::test]
async fn duplicate_registration_is_declined() {
    let vault = MemoryVault::new();
    let user1 = wallet(1);

    assert!(dispatch(&vault, &user1, Call::RegisterUser).await.is_ok());

    let outcome = dispatch(&vault, &user1, Call::RegisterUser).await;
    let failure = outcome.failure().expect("second registration must fail");
    assert_eq!(failure.kind, FailureKind::AlreadyRegistered);

    // The rejected call leaves the registration intact
    assert!(vault.is_registered(&user1).await.unwrap());
}

#[tokio::test]
async fn unregistered_caller_cannot_store() {
    let vault = MemoryVault::new();
    let stranger = wallet(9);

    let result = vault.store(&stranger, example_params()).await;
    assert!(matches!(result, Err(VaultError::NotRegistered(_))));

    // No record was created by the rejected call
    let other = wallet(1);
    vault.register(&other).await.unwrap();
    assert!(vault
        .get(&other, "test-password-id")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn records_are_isolated_between_principals() {
    let vault = MemoryVault::new();
    let user1 = wallet(1);
    let user2 = wallet(2);
    vault.register(&user1).await.unwrap();
    vault.register(&user2).await.unwrap();

    vault.store(&user1, example_params()).await.unwrap();

    // user2 cannot claim user1's id
    let result = vault.store(&user2, example_params()).await;
    assert!(matches!(result, Err(VaultError::Forbidden { .. })));

    // user2 cannot read user1's record, and no field leaks
    let outcome = dispatch(
        &vault,
        &user2,
        Call::GetPassword {
            id: "test-password-id".to_string(),
        },
    )
    .await;
    let failure = outcome.failure().expect("cross-owner get must fail");
    assert_eq!(failure.kind, FailureKind::Forbidden);
    let json = serde_json::to_string(&outcome).unwrap();
    assert!(!json.contains("encrypted-password-data"));

    // user1's record is unchanged
    let view = vault
        .get(&user1, "test-password-id")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(view.ciphertext.expose(), "encrypted-password-data");
}

#[tokio::test]
async fn get_unknown_id_is_none_not_forbidden() {
    let vault = MemoryVault::new();
    let user1 = wallet(1);
    vault.register(&user1).await.unwrap();

    // "no such id" is distinguishable from "exists but forbidden"
    let view = vault.get(&user1, "never-stored").await.unwrap();
    assert!(view.is_none());
}

#[tokio::test]
async fn rotation_reflects_only_latest_payload() {
    let vault = MemoryVault::new();
    let user1 = wallet(1);
    vault.register(&user1).await.unwrap();

    vault.store(&user1, example_params()).await.unwrap();

    let outcome = dispatch(
        &vault,
        &user1,
        Call::StorePassword {
            id: "test-password-id".to_string(),
            ciphertext: Ciphertext::new("rotated-ciphertext").unwrap(),
            website: "example.com".to_string(),
            username: "testuser-renamed".to_string(),
        },
    )
    .await;
    assert!(outcome.is_ok());

    let view = vault
        .get(&user1, "test-password-id")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(view.ciphertext.expose(), "rotated-ciphertext");
    assert_eq!(view.username, "testuser-renamed");
}

#[tokio::test]
async fn list_passwords_is_owner_scoped() {
    let vault = MemoryVault::new();
    let user1 = wallet(1);
    let user2 = wallet(2);
    vault.register(&user1).await.unwrap();
    vault.register(&user2).await.unwrap();

    vault.store(&user1, example_params()).await.unwrap();
    dispatch(
        &vault,
        &user2,
        Call::StorePassword {
            id: "other-id".to_string(),
            ciphertext: Ciphertext::new("other-blob").unwrap(),
            website: "other.example.com".to_string(),
            username: "other".to_string(),
        },
    )
    .await;

    let outcome = dispatch(&vault, &user1, Call::ListPasswords).await;
    let refs = outcome.value().unwrap().as_array().unwrap().clone();
    assert_eq!(refs.len(), 1);
    assert_eq!(refs[0]["id"], "test-password-id");
    // Listings never carry ciphertext
    assert!(refs[0].get("ciphertext").is_none());
}

#[tokio::test]
async fn failures_do_not_disturb_unrelated_state() {
    let vault = MemoryVault::new();
    let user1 = wallet(1);
    let user2 = wallet(2);
    vault.register(&user1).await.unwrap();
    vault.register(&user2).await.unwrap();

    vault.store(&user1, example_params()).await.unwrap();

    // A stream of declined calls from user2...
    let _ = dispatch(&vault, &user2, Call::RegisterUser).await;
    let _ = dispatch(&vault, &user2, example_store_call()).await;
    let _ = dispatch(
        &vault,
        &user2,
        Call::GetPassword {
            id: "test-password-id".to_string(),
        },
    )
    .await;

    // ...leaves user1's world exactly as it was
    let view = vault
        .get(&user1, "test-password-id")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(view.website, "example.com");
    assert_eq!(view.ciphertext.expose(), "encrypted-password-data");
}

fn example_store_call() -> Call {
    let params = example_params();
    Call::StorePassword {
        id: params.id,
        ciphertext: params.ciphertext,
        website: params.website,
        username: params.username,
    }
}
