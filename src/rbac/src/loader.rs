//! Role definition loader
//!
//! Reads a YAML definition with two top-level keys and compiles it into an
//! immutable [`RoleSet`]:
//!
//! ```yaml
//! RolePriorityRankDesc: [owner, maintainer]
//! Roles:
//!   - name: owner
//!     rules:
//!       - apiGroups: ["/api/core/v1"]
//!         resources: [groups]
//!         verbs: ["*"]
//!         scopes: ["*"]
//!         nonResourceURLs: ["*"]
//! ```
//!
//! Loading either yields a fully validated role set or an error; nothing is
//! returned or installed on failure.

use crate::error::{RbacError, Result};
use crate::role::{Role, RoleSet};
use crate::types::RoleName;
use serde::Deserialize;
use std::io::Read;
use std::str::FromStr;
use tracing::{debug, info, warn};

/// Default upper bound on the size of a definition stream (1 MiB)
pub const DEFAULT_MAX_DEFINITION_BYTES: usize = 1024 * 1024;

/// Loader configuration
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Definitions larger than this are rejected before parsing
    pub max_definition_bytes: usize,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            max_definition_bytes: DEFAULT_MAX_DEFINITION_BYTES,
        }
    }
}

/// Raw shape of a definition document
#[derive(Debug, Deserialize)]
struct RoleDefinition {
    #[serde(default, rename = "RolePriorityRankDesc")]
    priority_rank: Vec<RoleName>,

    #[serde(default, rename = "Roles")]
    roles: Vec<Role>,
}

/// Builds role sets from definition streams
#[derive(Debug, Clone, Default)]
pub struct RoleSetLoader {
    config: LoaderConfig,
}

impl RoleSetLoader {
    pub fn new(config: LoaderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Read, parse and validate a definition stream
    pub fn load<R: Read>(&self, reader: R) -> Result<RoleSet> {
        let bytes = self.read_definition(reader)?;
        debug!("Read role definition ({} bytes)", bytes.len());

        let definition: RoleDefinition = serde_yaml::from_slice(&bytes)?;
        compile(definition)
    }

    /// Parse and validate a definition held in memory
    pub fn load_str(&self, definition: &str) -> Result<RoleSet> {
        self.load(definition.as_bytes())
    }

    fn read_definition<R: Read>(&self, reader: R) -> Result<Vec<u8>> {
        let limit = self.config.max_definition_bytes;

        // Read one byte past the limit to detect overruns
        let mut bytes = Vec::new();
        reader
            .take((limit as u64).saturating_add(1))
            .read_to_end(&mut bytes)?;

        if bytes.len() > limit {
            return Err(RbacError::DefinitionTooLarge { limit });
        }
        Ok(bytes)
    }
}

/// Load a role set with the default configuration
pub fn load_role_set<R: Read>(reader: R) -> Result<RoleSet> {
    RoleSetLoader::default().load(reader)
}

impl FromStr for RoleSet {
    type Err = RbacError;

    fn from_str(definition: &str) -> Result<Self> {
        RoleSetLoader::default().load_str(definition)
    }
}

fn compile(definition: RoleDefinition) -> Result<RoleSet> {
    let RoleDefinition {
        priority_rank,
        roles,
    } = definition;

    match RoleSet::new(priority_rank, roles) {
        Ok(set) => {
            info!(
                roles = set.len(),
                rules = set.rule_count(),
                "Loaded role definitions"
            );
            Ok(set)
        }
        Err(e) => {
            warn!("Rejected role definition: {}", e);
            Err(e)
        }
    }
}
