//! Error types for role loading and lookup

use thiserror::Error;

/// Disagreement between `RolePriorityRankDesc` and `Roles`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConsistencyError {
    /// The rank list and the role list have different lengths
    #[error("role count mismatch: {ranked} ranked, {defined} defined")]
    RoleCountMismatch { ranked: usize, defined: usize },

    /// Two role definitions share a name
    #[error("rank/role name set mismatch: role '{0}' is defined more than once")]
    DuplicateRole(String),

    /// A name appears twice in the rank list
    #[error("rank/role name set mismatch: role '{0}' is ranked more than once")]
    DuplicateRank(String),

    /// A defined role is missing from the rank list
    #[error("rank/role name set mismatch: role '{0}' is defined but not ranked")]
    UnrankedRole(String),
}

/// Role engine errors
#[derive(Debug, Error)]
pub enum RbacError {
    /// The definition could not be decoded into the expected shape
    #[error("Failed to parse role definition: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// The definition stream could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The definition stream exceeded the configured size limit
    #[error("Role definition exceeds {limit} bytes")]
    DefinitionTooLarge { limit: usize },

    /// Rank list and role list disagree
    #[error("Inconsistent role definition: {0}")]
    Consistency(#[from] ConsistencyError),

    /// Lookup of a role absent from the loaded set
    #[error("Role not found: {0}")]
    RoleNotFound(String),

    /// No role set has been installed yet
    #[error("Role set not loaded")]
    NotLoaded,
}

impl RbacError {
    /// Whether the error comes from loading a broken definition.
    ///
    /// Fatal errors should abort startup; `RoleNotFound` is handled by the caller.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, RbacError::RoleNotFound(_))
    }
}

/// Result type for role operations
pub type Result<T> = std::result::Result<T, RbacError>;
