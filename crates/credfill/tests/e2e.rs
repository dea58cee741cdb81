// SPDX-FileCopyrightText: 2026 Credfill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests for the substitute-execute-redact cycle.
//!
//! Each test builds its own engine over an in-memory backend. Tests are
//! independent and order-insensitive.

use std::sync::Arc;

use credfill::{
    Action, CredentialEngine, CredentialsDict, CredfillConfig, CredfillError, FieldKind,
    LocatorAttributes, Vault, load_and_validate_str,
};
use credfill_test_utils::{MemoryBackend, fixtures};
use credfill_vault::ManualClock;
use serde_json::json;

fn engine() -> CredentialEngine {
    CredentialEngine::new(Arc::new(MemoryBackend::new()), CredfillConfig::default())
}

// ---- Login scenario ----

#[tokio::test]
async fn password_scenario_round_trips() {
    let engine = engine();
    engine
        .vault()
        .add_credentials("site.com", &fixtures::alice())
        .await
        .unwrap();

    let action = Action::fill("I1", "mycoolpassword");
    assert!(engine.contains_credentials(&action));

    let ready = engine
        .substitute(action.clone(), Some(&LocatorAttributes::input("password")), "site.com")
        .await
        .unwrap();
    assert_eq!(
        serde_json::to_value(&ready).unwrap(),
        json!({"type": "fill", "id": "I1", "value": "hunter2"})
    );

    let for_agent = engine.redact_serializable(&ready).unwrap();
    assert_eq!(for_agent, serde_json::to_value(&action).unwrap());
}

#[tokio::test]
async fn text_input_never_receives_the_password() {
    let engine = engine();
    engine
        .vault()
        .add_credentials("site.com", &fixtures::alice())
        .await
        .unwrap();

    let action = Action::fill("I1", "mycoolpassword");
    let out = engine
        .substitute(action.clone(), Some(&LocatorAttributes::input("text")), "site.com")
        .await
        .unwrap();
    assert_eq!(out, action);
}

// ---- MFA scenario ----

#[tokio::test]
async fn mfa_codes_are_fresh_six_digit_strings() {
    let clock = Arc::new(ManualClock::new(1_700_000_000));
    let vault = Vault::new(Arc::new(MemoryBackend::new())).with_clock(clock.clone());
    let engine = CredentialEngine::with_vault(Arc::new(vault), CredfillConfig::default());
    engine
        .vault()
        .add_credentials(
            "github.com",
            &CredentialsDict::new("pw").with_mfa_secret("JBSWY3DPEHPK3PXP"),
        )
        .await
        .unwrap();

    let first = engine.vault().get_credentials("github.com").await.unwrap().unwrap();
    clock.advance(31);
    let second = engine.vault().get_credentials("github.com").await.unwrap().unwrap();

    for creds in [&first, &second] {
        let code = creds.mfa_secret.as_deref().unwrap();
        assert_eq!(code.len(), 6);
        assert!(code.chars().all(|c| c.is_ascii_digit()));
        assert_ne!(code, "JBSWY3DPEHPK3PXP");
    }

    let otp = engine
        .substitute(Action::fill("otp", FieldKind::Mfa.placeholder()), None, "github.com")
        .await
        .unwrap();
    assert_eq!(otp.name(), "multi_factor_fill");
    assert_eq!(
        otp.scalar_value().unwrap().as_str(),
        second.mfa_secret.as_deref().unwrap()
    );
}

#[tokio::test]
async fn storing_a_code_is_rejected() {
    let engine = engine();
    let err = engine
        .vault()
        .add_credentials("github.com", &CredentialsDict::new("pw").with_mfa_secret("123456"))
        .await
        .unwrap_err();
    assert!(matches!(err, CredfillError::InvalidSecret { .. }));
}

// ---- Payment scenario ----

#[tokio::test]
async fn checkout_form_is_filled_and_redacted() {
    let engine = engine();
    engine.vault().set_credit_card(&fixtures::card()).await.unwrap();

    let action = Action::form_fill([
        ("cc-name", FieldKind::CardHolder.placeholder()),
        ("cc-number", FieldKind::CardNumber.placeholder()),
        ("cc-exp", FieldKind::CardExpiration.placeholder()),
        ("cc-csc", FieldKind::CardCvv.placeholder()),
    ]);
    let ready = engine.substitute(action.clone(), None, "shop.com").await.unwrap();
    let executed = serde_json::to_value(&ready).unwrap();
    assert_eq!(executed["value"]["cc-exp"], "03/30");
    assert_eq!(executed["value"]["cc-name"], "Alice Liddell");

    let page_text = json!({"text": "Paying with card 4111 1111 1111 1111, exp 03/30"});
    assert_eq!(
        engine.redact(page_text).unwrap(),
        json!({"text": "Paying with card 4242 4242 4242 4242, exp [CardExpirationPlaceholder]"})
    );
    assert_eq!(
        engine.redact_serializable(&ready).unwrap(),
        serde_json::to_value(&action).unwrap()
    );
}

// ---- Configuration ----

#[tokio::test]
async fn config_file_drives_the_engine() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("credfill.toml");
    std::fs::write(
        &path,
        "[substitution]\nidentity_fallback = false\n\n[vault]\ntotp_digits = 8\n",
    )
    .unwrap();
    let config = credfill_config::load_config_from_path(&path).unwrap();
    assert_eq!(config.vault.totp_digits, 8);

    let engine = CredentialEngine::new(Arc::new(MemoryBackend::new()), config);
    engine
        .vault()
        .add_credentials("site.com", &fixtures::alice())
        .await
        .unwrap();
    let err = engine
        .substitute(Action::fill("I1", "user@example.org"), None, "site.com")
        .await
        .unwrap_err();
    assert!(matches!(err, CredfillError::NoCredentialOfRequestedKind { .. }));
}

#[test]
fn invalid_config_reports_every_problem() {
    let errors =
        load_and_validate_str("[vault]\ntotp_digits = 4\n\n[logging]\nlevel = \"loud\"\n")
            .unwrap_err();
    assert_eq!(errors.len(), 2);
}

// ---- Instructions ----

#[test]
fn instructions_mention_every_placeholder() {
    let engine = engine();
    let text = engine.instructions();
    for kind in FieldKind::ALL {
        assert!(text.contains(kind.placeholder()));
    }
    assert!(engine.system_instructions().contains("FillAction"));
}
