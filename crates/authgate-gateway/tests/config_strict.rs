#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use authgate_gateway::config::{self, IdentityScheme};

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
store:
  driver: memory
  sourse: "typo" # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.code().as_str(), "CONFIG");
}

#[test]
fn ok_minimal_config() {
    let ok = r#"
version: 1
store: { driver: memory }
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.server.listen, "0.0.0.0:8080");
    assert!(cfg.reload.enabled);
    assert_eq!(cfg.reload.interval_ms, 10_000);
    assert_eq!(cfg.seed.subject, "admin");
    assert!(cfg.seed.orgs.is_empty());
    assert_eq!(cfg.identity.scheme, IdentityScheme::Basic);
    assert!(cfg.model.is_none());
}

#[test]
fn store_section_is_required() {
    let err = config::load_from_str("version: 1\n").expect_err("must fail");
    assert_eq!(err.code().as_str(), "CONFIG");
}

#[test]
fn unsupported_version() {
    let err = config::load_from_str("version: 2\nstore: { driver: memory }\n").unwrap_err();
    assert_eq!(err.code().as_str(), "UNSUPPORTED_VERSION");
}

#[test]
fn file_driver_needs_source() {
    let err = config::load_from_str("version: 1\nstore: { driver: yaml }\n").unwrap_err();
    assert_eq!(err.code().as_str(), "CONFIG");
}

#[test]
fn reload_interval_range() {
    let too_fast = r#"
version: 1
store: { driver: memory }
reload: { interval_ms: 10 }
"#;
    assert!(config::load_from_str(too_fast).is_err());

    let disabled = r#"
version: 1
store: { driver: memory }
reload: { enabled: false, interval_ms: 10 }
"#;
    assert!(config::load_from_str(disabled).is_ok());
}

#[test]
fn bearer_requires_tokens() {
    let missing = r#"
version: 1
store: { driver: memory }
identity: { scheme: bearer }
"#;
    assert!(config::load_from_str(missing).is_err());

    let ok = r#"
version: 1
store: { driver: memory }
identity:
  scheme: bearer
  tokens: { "t-1": "alice" }
"#;
    let cfg = config::load_from_str(ok).unwrap();
    assert_eq!(cfg.identity.tokens.get("t-1").map(String::as_str), Some("alice"));

    let stray = r#"
version: 1
store: { driver: memory }
identity:
  scheme: basic
  tokens: { "t-1": "alice" }
"#;
    assert!(config::load_from_str(stray).is_err());
}

#[test]
fn empty_seed_subject_rejected() {
    let bad = r#"
version: 1
store: { driver: memory }
seed: { subject: "" }
"#;
    assert!(config::load_from_str(bad).is_err());
}
