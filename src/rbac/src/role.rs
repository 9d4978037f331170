//! Roles and the ranked role set

use crate::error::{ConsistencyError, RbacError, Result};
use crate::policy::PolicyRule;
use crate::types::{AccessRequest, RoleName};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

/// Named, ordered bundle of policy rules
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    /// Unique role name (e.g., "owner", "maintainer")
    pub name: RoleName,

    /// Rules in declaration order; no rule takes precedence over another
    #[serde(default, rename = "rules")]
    pub policy_rules: Vec<PolicyRule>,
}

impl Role {
    /// Create a role
    pub fn new(name: impl Into<RoleName>, policy_rules: Vec<PolicyRule>) -> Self {
        Self {
            name: name.into(),
            policy_rules,
        }
    }

    /// Check whether any rule of this role permits the request.
    ///
    /// Deny by default: a role without a matching rule refuses the request.
    pub fn is_allowed(&self, request: &AccessRequest) -> bool {
        self.matching_rule(request).is_some()
    }

    /// First rule that permits the request
    pub fn matching_rule(&self, request: &AccessRequest) -> Option<&PolicyRule> {
        self.policy_rules.iter().find(|rule| rule.allows(request))
    }
}

/// Immutable set of roles together with their priority rank
///
/// Only constructed through [`RoleSet::new`], which rejects any drift between
/// the rank list and the role definitions. After construction nothing is
/// mutated, so a `RoleSet` can be shared across threads without locking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleSet {
    /// role name -> role
    roles: HashMap<RoleName, Role>,

    /// Role names, most privileged first
    priority_rank: Vec<RoleName>,
}

impl RoleSet {
    /// Assemble a role set, validating the rank list against the roles.
    ///
    /// The two lists must have the same length and name exactly the same
    /// roles, each once.
    pub fn new(priority_rank: Vec<RoleName>, roles: Vec<Role>) -> Result<Self> {
        check_consistency(&priority_rank, &roles)?;

        let roles = roles
            .into_iter()
            .map(|role| (role.name.clone(), role))
            .collect();

        Ok(Self {
            roles,
            priority_rank,
        })
    }

    /// Exact-name lookup
    pub fn get(&self, name: &str) -> Option<&Role> {
        self.roles.get(name)
    }

    /// Exact-name lookup that reports a missing role as an error
    pub fn require(&self, name: &str) -> Result<&Role> {
        self.get(name)
            .ok_or_else(|| RbacError::RoleNotFound(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.roles.contains_key(name)
    }

    /// Roles in priority order, most privileged first
    pub fn ranked(&self) -> impl Iterator<Item = &Role> + '_ {
        // Every ranked name has a role; checked at construction.
        self.priority_rank
            .iter()
            .filter_map(move |name| self.roles.get(name))
    }

    pub fn priority_rank(&self) -> &[RoleName] {
        &self.priority_rank
    }

    /// Position of a role in the rank list, 0 being the most privileged
    pub fn rank_of(&self, name: &str) -> Option<usize> {
        self.priority_rank.iter().position(|ranked| ranked == name)
    }

    /// Compare two roles by privilege.
    ///
    /// Returns `Greater` when `a` is more privileged than `b`.
    pub fn compare(&self, a: &str, b: &str) -> Result<Ordering> {
        let rank_a = self
            .rank_of(a)
            .ok_or_else(|| RbacError::RoleNotFound(a.to_string()))?;
        let rank_b = self
            .rank_of(b)
            .ok_or_else(|| RbacError::RoleNotFound(b.to_string()))?;

        // Lower index means higher privilege
        Ok(rank_b.cmp(&rank_a))
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    /// Total number of rules across all roles
    pub fn rule_count(&self) -> usize {
        self.roles.values().map(|role| role.policy_rules.len()).sum()
    }
}

fn check_consistency(
    priority_rank: &[RoleName],
    roles: &[Role],
) -> std::result::Result<(), ConsistencyError> {
    if priority_rank.len() != roles.len() {
        return Err(ConsistencyError::RoleCountMismatch {
            ranked: priority_rank.len(),
            defined: roles.len(),
        });
    }

    let mut defined = HashSet::with_capacity(roles.len());
    for role in roles {
        if !defined.insert(role.name.as_str()) {
            return Err(ConsistencyError::DuplicateRole(role.name.clone()));
        }
    }

    let mut ranked = HashSet::with_capacity(priority_rank.len());
    for name in priority_rank {
        if !ranked.insert(name.as_str()) {
            return Err(ConsistencyError::DuplicateRank(name.clone()));
        }
    }

    // Equal sizes without duplicates: one unranked role is enough to show the
    // name sets differ. Reported in declaration order.
    if let Some(role) = roles.iter().find(|r| !ranked.contains(r.name.as_str())) {
        return Err(ConsistencyError::UnrankedRole(role.name.clone()));
    }

    Ok(())
}
