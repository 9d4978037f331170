//! Shared fixtures and helpers for integration tests
#![allow(dead_code)]

use horizon_rbac::{PolicyRule, RoleSet, Selector};
use std::sync::Once;

/// Reference definition: `owner` above `maintainer`
pub const ROLES_OK: &str = include_str!("../fixtures/roles.yaml");

/// Two roles defined, only one ranked
pub const ROLES_UNRANKED: &str = include_str!("../fixtures/unranked_role.yaml");

static LOGGING: Once = Once::new();

/// Install a test subscriber honouring `RUST_LOG`
pub fn init_logging() {
    LOGGING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

pub fn reference_role_set() -> RoleSet {
    init_logging();
    ROLES_OK.parse().expect("reference definition loads")
}

/// The single rule of the reference `owner` role
pub fn owner_rule() -> PolicyRule {
    PolicyRule::new()
        .with_verbs(Selector::Any)
        .with_api_groups(Selector::only(["/api/core/v1/*"]))
        .with_resources(Selector::only(["groups"]))
        .with_scopes(Selector::Any)
        .with_non_resource_urls(Selector::Any)
}
