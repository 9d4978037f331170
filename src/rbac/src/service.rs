//! Read-side role service
//!
//! [`RoleService`] is the query surface handed to the authorization
//! middleware. [`RoleSet`] implements it directly; [`RoleSetHandle`] wraps a
//! role set behind an atomically swappable pointer so a reload never exposes a
//! partially built set to readers.

use crate::error::{RbacError, Result};
use crate::loader::RoleSetLoader;
use crate::role::{Role, RoleSet};
use crate::types::AccessRequest;
use arc_swap::ArcSwapOption;
use std::cmp::Ordering;
use std::io::Read;
use std::sync::Arc;
use tracing::{info, warn};

/// Role lookup and permission checks
pub trait RoleService: Send + Sync {
    /// Exact-name lookup; fails with [`RbacError::RoleNotFound`]
    fn get_role(&self, name: &str) -> Result<Role>;

    /// All roles, most privileged first
    fn list_roles(&self) -> Result<Vec<Role>>;

    /// Compare two roles by privilege (`Greater`: `a` outranks `b`)
    fn compare_roles(&self, a: &str, b: &str) -> Result<Ordering>;

    /// Check a request against a role obtained from [`RoleService::get_role`]
    fn is_allowed(&self, role: &Role, request: &AccessRequest) -> bool {
        role.is_allowed(request)
    }
}

impl RoleService for RoleSet {
    fn get_role(&self, name: &str) -> Result<Role> {
        self.require(name).cloned()
    }

    fn list_roles(&self) -> Result<Vec<Role>> {
        Ok(self.ranked().cloned().collect())
    }

    fn compare_roles(&self, a: &str, b: &str) -> Result<Ordering> {
        self.compare(a, b)
    }
}

/// Reloadable slot holding the active role set
///
/// Readers take a snapshot without locking; `install` and `reload` replace the
/// whole set in one pointer swap.
#[derive(Debug, Default)]
pub struct RoleSetHandle {
    current: ArcSwapOption<RoleSet>,
}

impl RoleSetHandle {
    /// Create an empty handle; queries fail with `NotLoaded` until a set is installed
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_role_set(set: RoleSet) -> Self {
        Self {
            current: ArcSwapOption::from_pointee(set),
        }
    }

    /// Current role set, if any
    pub fn snapshot(&self) -> Option<Arc<RoleSet>> {
        self.current.load_full()
    }

    pub fn is_loaded(&self) -> bool {
        self.current.load().is_some()
    }

    /// Replace the active set, returning the previous one
    pub fn install(&self, set: RoleSet) -> Option<Arc<RoleSet>> {
        info!("Installing role set with {} roles", set.len());
        self.current.swap(Some(Arc::new(set)))
    }

    /// Load a new definition and install it.
    ///
    /// On failure the previously installed set stays active.
    pub fn reload<R: Read>(&self, reader: R, loader: &RoleSetLoader) -> Result<()> {
        match loader.load(reader) {
            Ok(set) => {
                self.install(set);
                Ok(())
            }
            Err(e) => {
                warn!(
                    "Role set reload failed, keeping current set (loaded={}): {}",
                    self.is_loaded(),
                    e
                );
                Err(e)
            }
        }
    }

    fn loaded(&self) -> Result<Arc<RoleSet>> {
        self.snapshot().ok_or(RbacError::NotLoaded)
    }
}

impl RoleService for RoleSetHandle {
    fn get_role(&self, name: &str) -> Result<Role> {
        self.loaded()?.get_role(name)
    }

    fn list_roles(&self) -> Result<Vec<Role>> {
        self.loaded()?.list_roles()
    }

    fn compare_roles(&self, a: &str, b: &str) -> Result<Ordering> {
        self.loaded()?.compare(a, b)
    }
}
