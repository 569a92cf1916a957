//! Identity extractors and their composition with the authorizer.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

mod common;

use std::collections::HashMap;
use std::sync::Arc;

use axum::body::Body;
use axum::http::header::AUTHORIZATION;
use axum::http::Request;

use authgate_core::{Principal, Rule};
use authgate_gateway::authz::Authorizer;
use authgate_gateway::config::{IdentityScheme, IdentitySection};
use authgate_gateway::identity::{
    self, BasicAuthExtractor, BearerTokenExtractor, ExtensionExtractor, IdentityExtractor,
};

use common::engine_with;

fn with_auth(value: &str) -> Request<Body> {
    Request::builder()
        .uri("/api/v1/orgs")
        .header(AUTHORIZATION, value)
        .body(Body::empty())
        .unwrap()
}

fn bare() -> Request<Body> {
    Request::builder().uri("/api/v1/orgs").body(Body::empty()).unwrap()
}

#[test]
fn basic_reads_login_from_credentials() {
    // "alice:secret"
    let req = with_auth("Basic YWxpY2U6c2VjcmV0");
    assert_eq!(BasicAuthExtractor.current_user(&req), Principal::new("alice"));

    // scheme is case-insensitive
    let req = with_auth("basic YWxpY2U6c2VjcmV0");
    assert_eq!(BasicAuthExtractor.current_user(&req).login, "alice");
}

#[test]
fn basic_falls_back_to_anonymous() {
    assert!(BasicAuthExtractor.current_user(&bare()).is_anonymous());
    assert!(BasicAuthExtractor.current_user(&with_auth("Basic !!!")).is_anonymous());
    assert!(BasicAuthExtractor.current_user(&with_auth("Bearer abc")).is_anonymous());
    assert!(BasicAuthExtractor.current_user(&with_auth("Basic")).is_anonymous());
}

#[test]
fn bearer_maps_known_tokens_only() {
    let ex = BearerTokenExtractor::new(HashMap::from([("t-1".to_string(), "bob".to_string())]));
    assert_eq!(ex.current_user(&with_auth("Bearer t-1")).login, "bob");
    assert!(ex.current_user(&with_auth("Bearer t-2")).is_anonymous());
    assert!(ex.current_user(&with_auth("Basic Ym9iOng=")).is_anonymous());
    assert!(ex.current_user(&bare()).is_anonymous());
}

#[test]
fn extension_reads_upstream_principal() {
    let mut req = bare();
    assert!(ExtensionExtractor.current_user(&req).is_anonymous());
    req.extensions_mut().insert(Principal::new("carol"));
    assert_eq!(ExtensionExtractor.current_user(&req).login, "carol");
}

#[test]
fn config_selects_scheme() {
    let section = IdentitySection {
        scheme: IdentityScheme::Bearer,
        tokens: HashMap::from([("t".to_string(), "bob".to_string())]),
    };
    assert_eq!(identity::from_config(&section).scheme(), "bearer");
    assert_eq!(identity::from_config(&IdentitySection::default()).scheme(), "basic");
}

#[tokio::test]
async fn authorizer_uses_extractor_path_and_method_verbatim() {
    let engine = engine_with(vec![Rule::new("alice", "/api/v1/orgs", "GET")]).await;
    let authz = Authorizer::new(engine, Arc::new(BasicAuthExtractor));

    let req = with_auth("Basic YWxpY2U6c2VjcmV0");
    assert_eq!(authz.user_name(&req), "alice");
    assert!(authz.check_permission(&req));

    // trailing slash is a different resource; no normalization
    let req = Request::builder()
        .uri("/api/v1/orgs/")
        .header(AUTHORIZATION, "Basic YWxpY2U6c2VjcmV0")
        .body(Body::empty())
        .unwrap();
    assert!(!authz.check_permission(&req));

    // query string is not part of the path
    let req = Request::builder()
        .uri("/api/v1/orgs?page=2")
        .header(AUTHORIZATION, "Basic YWxpY2U6c2VjcmV0")
        .body(Body::empty())
        .unwrap();
    assert!(authz.check_permission(&req));

    assert_eq!(authz.user_name(&bare()), "");
    assert!(!authz.check_permission(&bare()));
}
