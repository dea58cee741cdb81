// SPDX-FileCopyrightText: 2026 Credfill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Credential discovery from environment variables.
//!
//! For root domain `example.com` the expected variables are
//! `EXAMPLE_COM_EMAIL`, `EXAMPLE_COM_USERNAME`, `EXAMPLE_COM_PASSWORD` and
//! `EXAMPLE_COM_MFA_SECRET`: the root domain upper-cased with every
//! non-alphanumeric character replaced by `_`, then the field alias
//! upper-cased. The naming scheme is an external contract.

use credfill_core::{CredentialsDict, CredfillError, FieldKind};
use tracing::{trace, warn};
use url::{Host, ParseError, Url};

/// Second-level labels under which registrations happen one level deeper
/// (`example.co.uk`).
const SECOND_LEVEL_LABELS: &[&str] = &["co", "com", "org", "net", "ac", "gov", "edu"];

/// Registrable root domain of `url`.
///
/// Accepts bare hosts (`github.com`) as well as full urls. IP literals and
/// single-label hosts are returned whole.
pub fn root_domain(url: &str) -> Result<String, CredfillError> {
    let invalid = |reason: &str| CredfillError::InvalidUrl {
        url: url.to_string(),
        reason: reason.to_string(),
    };

    let trimmed = url.trim();
    if trimmed.is_empty() {
        return Err(invalid("url is empty"));
    }
    let parsed = match trimmed.split_once("://") {
        // The url parser skips extra slashes for special schemes, so
        // `https:///login` would otherwise come back with host `login`.
        Some((_, authority)) if authority.is_empty() || authority.starts_with(['/', '?', '#']) => {
            return Err(invalid("url has no host"));
        }
        Some(_) => Url::parse(trimmed).map_err(|e| match e {
            ParseError::EmptyHost => invalid("url has no host"),
            other => invalid(&other.to_string()),
        })?,
        None => Url::parse(&format!("https://{trimmed}")).map_err(|e| invalid(&e.to_string()))?,
    };

    let domain = match parsed.host() {
        Some(Host::Domain(domain)) => domain.trim_end_matches('.').to_ascii_lowercase(),
        Some(Host::Ipv4(addr)) => return Ok(addr.to_string()),
        Some(Host::Ipv6(addr)) => return Ok(addr.to_string()),
        None => return Err(invalid("url has no host")),
    };

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.iter().any(|label| label.is_empty()) {
        return Err(invalid("host has an empty label"));
    }

    let keep = match labels.as_slice() {
        [.., sld, tld]
            if labels.len() >= 3 && tld.len() == 2 && SECOND_LEVEL_LABELS.contains(sld) =>
        {
            3
        }
        _ => 2,
    };
    let start = labels.len().saturating_sub(keep);
    Ok(labels[start..].join("."))
}

/// Variable name prefix for `url`: `github.com` -> `GITHUB_COM`.
pub fn env_prefix(url: &str) -> Result<String, CredfillError> {
    let root = root_domain(url)?;
    Ok(root
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() {
                ch.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect())
}

/// Every variable looked up for `url`, paired with its field kind.
pub fn env_var_names(url: &str) -> Result<Vec<(FieldKind, String)>, CredfillError> {
    let prefix = env_prefix(url)?;
    Ok(FieldKind::ALL
        .into_iter()
        .map(|kind| (kind, format!("{prefix}_{}", kind.alias().to_ascii_uppercase())))
        .collect())
}

/// Collect a login record for `url` through `lookup`.
///
/// Unset and empty variables are skipped. Payment variables are ignored: the
/// credit card is a vault-wide slot, not a per-url credential. Fails with
/// `NoCredentialsFound` when no login variable is set.
pub fn collect_credentials<F>(url: &str, lookup: F) -> Result<CredentialsDict, CredfillError>
where
    F: Fn(&str) -> Option<String>,
{
    let names = env_var_names(url)?;
    let mut creds = CredentialsDict::default();
    let mut found: Vec<&'static str> = Vec::new();

    for (kind, name) in &names {
        let Some(value) = lookup(name).filter(|v| !v.is_empty()) else {
            continue;
        };
        if kind.is_payment() {
            warn!(variable = %name, "ignoring payment variable, the credit card is not stored per url");
            continue;
        }
        creds.set(*kind, value)?;
        found.push(kind.alias());
    }

    if found.is_empty() {
        return Err(CredfillError::NoCredentialsFound {
            url: url.to_string(),
            expected: names
                .into_iter()
                .filter(|(kind, _)| !kind.is_payment())
                .map(|(_, name)| name)
                .collect(),
        });
    }

    trace!(url = %url, fields = ?found, "collected credentials from environment");
    Ok(creds)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use proptest::prelude::*;

    use super::*;

    fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn root_domain_of_bare_host_and_urls() {
        assert_eq!(root_domain("github.com").unwrap(), "github.com");
        assert_eq!(
            root_domain("https://accounts.google.com/signin?x=1").unwrap(),
            "google.com"
        );
        assert_eq!(root_domain("www.example.co.uk/login").unwrap(), "example.co.uk");
        assert_eq!(root_domain("http://localhost:8080").unwrap(), "localhost");
        assert_eq!(root_domain("http://127.0.0.1/a").unwrap(), "127.0.0.1");
        assert_eq!(root_domain("GitHub.COM.").unwrap(), "github.com");
    }

    #[test]
    fn malformed_urls_are_rejected() {
        assert!(matches!(root_domain(""), Err(CredfillError::InvalidUrl { .. })));
        assert!(matches!(root_domain("https://"), Err(CredfillError::InvalidUrl { .. })));
        assert!(matches!(root_domain("http://"), Err(CredfillError::InvalidUrl { .. })));
        assert!(matches!(root_domain("https:///login"), Err(CredfillError::InvalidUrl { .. })));
        assert!(matches!(root_domain("https://?q=1"), Err(CredfillError::InvalidUrl { .. })));
    }

    #[test]
    fn hostless_url_is_not_looked_up() {
        let err =
            collect_credentials("https://", env(&[("HTTPS_PASSWORD", "pw")])).unwrap_err();
        assert!(matches!(err, CredfillError::InvalidUrl { .. }));
        let err = collect_credentials("https:///login", env(&[("LOGIN_PASSWORD", "pw")]))
            .unwrap_err();
        assert!(matches!(err, CredfillError::InvalidUrl { .. }));
    }

    #[test]
    fn prefix_replaces_non_alphanumerics() {
        assert_eq!(env_prefix("github.com").unwrap(), "GITHUB_COM");
        assert_eq!(env_prefix("https://my-shop.example.com").unwrap(), "EXAMPLE_COM");
        assert_eq!(env_prefix("my-shop.io").unwrap(), "MY_SHOP_IO");
    }

    #[test]
    fn variable_names_cover_every_alias() {
        let names: Vec<String> = env_var_names("github.com")
            .unwrap()
            .into_iter()
            .map(|(_, name)| name)
            .collect();
        for expected in [
            "GITHUB_COM_EMAIL",
            "GITHUB_COM_USERNAME",
            "GITHUB_COM_PASSWORD",
            "GITHUB_COM_MFA_SECRET",
            "GITHUB_COM_CARD_NUMBER",
        ] {
            assert!(names.contains(&expected.to_string()), "missing {expected}");
        }
    }

    #[test]
    fn nothing_set_fails() {
        let err = collect_credentials("github.com", env(&[])).unwrap_err();
        match err {
            CredfillError::NoCredentialsFound { url, expected } => {
                assert_eq!(url, "github.com");
                assert_eq!(expected.len(), 4);
                assert!(expected.contains(&"GITHUB_COM_MFA_SECRET".to_string()));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn password_only_is_collected() {
        let creds =
            collect_credentials("github.com", env(&[("GITHUB_COM_PASSWORD", "pw")])).unwrap();
        assert_eq!(creds, CredentialsDict::new("pw"));
    }

    #[test]
    fn all_login_variables_are_collected() {
        let creds = collect_credentials(
            "https://github.com/login",
            env(&[
                ("GITHUB_COM_EMAIL", "user@example.org"),
                ("GITHUB_COM_USERNAME", "octo"),
                ("GITHUB_COM_PASSWORD", "pw"),
                ("GITHUB_COM_MFA_SECRET", "JBSWY3DPEHPK3PXP"),
            ]),
        )
        .unwrap();
        assert_eq!(creds.email.as_deref(), Some("user@example.org"));
        assert_eq!(creds.username.as_deref(), Some("octo"));
        assert_eq!(creds.mfa_secret.as_deref(), Some("JBSWY3DPEHPK3PXP"));
    }

    #[test]
    fn partial_prefix_does_not_match() {
        let err = collect_credentials("github.com", env(&[("GITHUB_PASSWORD", "pw")])).unwrap_err();
        assert!(matches!(err, CredfillError::NoCredentialsFound { .. }));
    }

    #[test]
    fn payment_and_empty_variables_do_not_count() {
        let err = collect_credentials(
            "github.com",
            env(&[("GITHUB_COM_CARD_NUMBER", "4111"), ("GITHUB_COM_PASSWORD", "")]),
        )
        .unwrap_err();
        assert!(matches!(err, CredfillError::NoCredentialsFound { .. }));
    }

    proptest! {
        #[test]
        fn prefix_is_registrable_domain_in_upper_snake(
            sub in "[a-z][a-z0-9]{0,10}",
            name in "[a-z][a-z0-9]{0,6}(-[a-z0-9]{1,4})?",
            tld in "(com|dev|org)",
        ) {
            let prefix = env_prefix(&format!("https://{sub}.{name}.{tld}/login")).unwrap();
            let expected = format!("{name}_{tld}").to_ascii_uppercase().replace('-', "_");
            prop_assert_eq!(prefix, expected);
        }
    }
}
