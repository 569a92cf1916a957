//! Default policy seeded into an empty store.
//!
//! "Owner can do anything within their own resources": the subject gets every
//! method on the organizations collection, the token endpoints, and each
//! owned organization plus its subtree.

use crate::rule::Rule;

/// Action pattern granting every HTTP method.
pub const ANY_ACTION: &str = "*";

pub const ORGS_PATH: &str = "/api/v1/orgs";
pub const TOKENS_PATH: &str = "/api/v1/tokens";

/// Build the baseline rule set for `subject` owning `org_ids`.
///
/// Output order is stable: collection and token endpoints first, then one
/// exact + one subtree rule per org id in the given order. Duplicate ids
/// produce a single pair.
pub fn default_rules(subject: &str, org_ids: &[u64]) -> Vec<Rule> {
    let mut rules = vec![
        Rule::new(subject, ORGS_PATH, ANY_ACTION),
        Rule::new(subject, TOKENS_PATH, ANY_ACTION),
        Rule::new(subject, format!("{TOKENS_PATH}/*"), ANY_ACTION),
    ];

    let mut seen = Vec::with_capacity(org_ids.len());
    for id in org_ids {
        if seen.contains(id) {
            continue;
        }
        seen.push(*id);
        rules.push(Rule::new(subject, format!("{ORGS_PATH}/{id}"), ANY_ACTION));
        rules.push(Rule::new(subject, format!("{ORGS_PATH}/{id}/*"), ANY_ACTION));
    }

    tracing::debug!(%subject, orgs = seen.len(), rules = rules.len(), "default policy built");
    rules
}
