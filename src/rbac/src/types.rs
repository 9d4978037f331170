//! Request types checked against role rules

use serde::{Deserialize, Serialize};

/// Role identifier, unique within a loaded role set
pub type RoleName = String;

/// Resource-oriented part of a request
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceAttributes {
    /// API group, e.g. "/api/core/v1"
    pub api_group: String,

    /// Resource type, hierarchy encoded in the string (e.g. "clusters/members")
    pub resource: String,

    /// Verb (create, get, patch, ...)
    pub verb: String,

    /// Scope the request applies to
    pub scope: String,
}

/// Request tuple checked by [`Role::is_allowed`](crate::Role::is_allowed)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum AccessRequest {
    /// Request against an API resource
    Resource(ResourceAttributes),

    /// Request for a literal URL path
    NonResource { url: String },
}

impl AccessRequest {
    /// Create a resource request
    pub fn resource(
        api_group: impl Into<String>,
        resource: impl Into<String>,
        verb: impl Into<String>,
        scope: impl Into<String>,
    ) -> Self {
        Self::Resource(ResourceAttributes {
            api_group: api_group.into(),
            resource: resource.into(),
            verb: verb.into(),
            scope: scope.into(),
        })
    }

    /// Create a non-resource request
    pub fn non_resource(url: impl Into<String>) -> Self {
        Self::NonResource { url: url.into() }
    }

    pub fn is_resource(&self) -> bool {
        matches!(self, Self::Resource(_))
    }
}
