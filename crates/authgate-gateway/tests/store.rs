#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use authgate_core::Rule;
use authgate_gateway::store::{open_store, PolicyStore, YamlFileStore};

#[tokio::test]
async fn missing_file_is_an_error_not_an_empty_store() {
    let dir = tempfile::tempdir().unwrap();
    let store = YamlFileStore::new(dir.path().join("policy.yaml"));
    assert!(!store.exists().await.unwrap());

    let err = store.load().await.unwrap_err();
    assert_eq!(err.code().as_str(), "STORE");
}

#[tokio::test]
async fn blank_file_is_an_error_but_empty_rule_list_is_not() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("policy.yaml");
    let store = YamlFileStore::new(&path);

    std::fs::write(&path, "  \n").unwrap();
    assert!(store.exists().await.unwrap());
    assert_eq!(store.load().await.unwrap_err().code().as_str(), "STORE");

    store.save(&[]).await.unwrap();
    assert!(store.load().await.unwrap().is_empty());
}

#[tokio::test]
async fn saved_rules_are_loaded_back_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("policy.yaml");
    let store = YamlFileStore::new(&path);
    let rules = vec![
        Rule::new("admin", "/api/v1/orgs", "*"),
        Rule::new("admin", "/api/v1/orgs/1/*", "*"),
    ];

    store.save(&rules).await.unwrap();
    assert_eq!(store.load().await.unwrap(), rules);
    assert!(!dir.path().join("policy.yaml.tmp").exists());

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("version: 1"));
}

#[tokio::test]
async fn hand_written_file_is_accepted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("policy.yaml");
    std::fs::write(
        &path,
        r#"
version: 1
rules:
  - { subject: alice, resource: /api/v1/orgs, action: GET }
"#,
    )
    .unwrap();

    let rules = YamlFileStore::new(&path).load().await.unwrap();
    assert_eq!(rules, vec![Rule::new("alice", "/api/v1/orgs", "GET")]);
}

#[tokio::test]
async fn corrupt_or_wrong_version_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("policy.yaml");

    std::fs::write(&path, "version: 2\nrules: []\n").unwrap();
    let err = YamlFileStore::new(&path).load().await.unwrap_err();
    assert_eq!(err.code().as_str(), "STORE");

    std::fs::write(&path, "rules: [ {subject: a} ]\n").unwrap();
    assert!(YamlFileStore::new(&path).load().await.is_err());
}

#[tokio::test]
async fn open_store_by_driver_name() {
    assert_eq!(open_store("memory", "").unwrap().driver(), "memory");
    assert_eq!(open_store("yaml", "policy.yaml").unwrap().driver(), "yaml");
    assert_eq!(open_store("file", "policy.yaml").unwrap().driver(), "yaml");

    let err = open_store("postgres", "postgres://localhost/db").err().unwrap();
    assert_eq!(err.code().as_str(), "UNSUPPORTED_DRIVER");
    assert!(open_store("yaml", " ").is_err());
}
