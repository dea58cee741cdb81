// SPDX-FileCopyrightText: 2026 Credfill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Sample records and DOM attributes shared by tests.

use credfill_core::{CredentialsDict, CreditCardDict, LocatorAttributes};

/// RFC 4648 base32 seed used throughout the tests.
pub const MFA_SEED: &str = "JBSWY3DPEHPK3PXP";

/// `{password: "hunter2", username: "alice"}`.
pub fn alice() -> CredentialsDict {
    CredentialsDict::new("hunter2").with_username("alice")
}

/// A full login record with email, username and MFA seed.
pub fn full_login() -> CredentialsDict {
    CredentialsDict::new("correct horse battery staple")
        .with_email("bob@site.com")
        .with_username("bob")
        .with_mfa_secret(MFA_SEED)
}

pub fn card() -> CreditCardDict {
    CreditCardDict {
        card_holder_name: "Alice Liddell".to_string(),
        card_number: "4111 1111 1111 1111".to_string(),
        card_cvv: "737".to_string(),
        card_full_expiration: "03/30".to_string(),
    }
}

pub fn password_input() -> LocatorAttributes {
    LocatorAttributes::input("password")
}

pub fn text_input() -> LocatorAttributes {
    LocatorAttributes::input("text")
}

/// An input carrying `autocomplete="<token>"`.
pub fn autocomplete_input(token: &str) -> LocatorAttributes {
    LocatorAttributes {
        input_type: Some("text".to_string()),
        autocomplete: Some(token.to_string()),
        outer_html: Some(format!(r#"<input type="text" autocomplete="{token}">"#)),
    }
}
