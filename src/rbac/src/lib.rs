//! # Horizon RBAC
//!
//! Role-based authorization policy engine.
//!
//! ## Features
//!
//! - **Declarative roles** loaded from a YAML definition
//! - **Priority rank** validated against the role list at load time
//! - **Rule matching** over API group, resource, verb, scope and non-resource URL,
//!   each either the `"*"` wildcard or an explicit set
//! - **Lock-free reload** through [`RoleSetHandle`]
//!
//! ## Example
//!
//! ```rust
//! use horizon_rbac::{load_role_set, AccessRequest, RoleService};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let definition = r#"
//! RolePriorityRankDesc: [owner]
//! Roles:
//!   - name: owner
//!     rules:
//!       - apiGroups: ["/api/core/v1"]
//!         resources: [groups]
//!         verbs: ["*"]
//!         scopes: ["*"]
//! "#;
//!
//! let roles = load_role_set(definition.as_bytes())?;
//! let owner = roles.get_role("owner")?;
//!
//! let request = AccessRequest::resource("/api/core/v1", "groups", "delete", "hz");
//! assert!(roles.is_allowed(&owner, &request));
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod loader;
pub mod policy;
pub mod role;
pub mod service;
pub mod types;

// Re-export commonly used types
pub use error::{ConsistencyError, RbacError, Result};
pub use loader::{load_role_set, LoaderConfig, RoleSetLoader};
pub use policy::{PolicyRule, Selector, WILDCARD};
pub use role::{Role, RoleSet};
pub use service::{RoleService, RoleSetHandle};
pub use types::{AccessRequest, ResourceAttributes, RoleName};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
