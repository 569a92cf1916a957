//! Built-in casbin model.
//!
//! - subject: exact match
//! - resource: `keyMatch`, so `/api/v1/orgs/7/*` covers the whole subtree
//! - action: exact method, or `*` for any method

pub const DEFAULT_MODEL: &str = r#"
[request_definition]
r = sub, obj, act

[policy_definition]
p = sub, obj, act

[policy_effect]
e = some(where (p.eft == allow))

[matchers]
m = r.sub == p.sub && keyMatch(r.obj, p.obj) && (r.act == p.act || p.act == "*")
"#;
