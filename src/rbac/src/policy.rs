//! Policy rule definition and matching
//!
//! Every rule dimension is a [`Selector`]: either the `"*"` wildcard or an
//! explicit list of accepted values. One matcher, [`Selector::matches`], is
//! shared by all five dimensions.

use crate::types::{AccessRequest, ResourceAttributes};
use serde::de::{self, SeqAccess, Unexpected, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Token that matches any value in a rule dimension
pub const WILDCARD: &str = "*";

/// Values accepted by one rule dimension
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Selector {
    /// Matches every value
    Any,

    /// Matches exactly the listed values; an empty list matches nothing
    Only(Vec<String>),
}

impl Selector {
    /// Build a selector from explicit values.
    ///
    /// A list that contains the `"*"` token collapses to [`Selector::Any`].
    pub fn only<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from(values.into_iter().map(Into::into).collect::<Vec<String>>())
    }

    /// Check whether `value` is accepted.
    ///
    /// Case-sensitive exact comparison; `"clusters"` does not match
    /// `"clusters/members"`.
    pub fn matches(&self, value: &str) -> bool {
        match self {
            Selector::Any => true,
            Selector::Only(values) => values.iter().any(|v| v == value),
        }
    }

    pub fn is_any(&self) -> bool {
        matches!(self, Selector::Any)
    }

    /// True when the selector can never match
    pub fn is_empty(&self) -> bool {
        matches!(self, Selector::Only(values) if values.is_empty())
    }
}

impl Default for Selector {
    fn default() -> Self {
        Selector::Only(Vec::new())
    }
}

impl From<Vec<String>> for Selector {
    fn from(values: Vec<String>) -> Self {
        if values.iter().any(|v| v == WILDCARD) {
            Selector::Any
        } else {
            Selector::Only(values)
        }
    }
}

impl Serialize for Selector {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Selector::Any => serializer.serialize_str(WILDCARD),
            Selector::Only(values) => values.serialize(serializer),
        }
    }
}

struct SelectorVisitor;

impl<'de> Visitor<'de> for SelectorVisitor {
    type Value = Selector;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("\"*\" or a sequence of strings")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Selector, E> {
        if v == WILDCARD {
            Ok(Selector::Any)
        } else {
            Err(E::invalid_value(Unexpected::Str(v), &self))
        }
    }

    fn visit_string<E: de::Error>(self, v: String) -> std::result::Result<Selector, E> {
        self.visit_str(&v)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> std::result::Result<Selector, A::Error> {
        let mut values = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(value) = seq.next_element::<String>()? {
            values.push(value);
        }
        Ok(Selector::from(values))
    }

    // Missing and null dimensions match nothing
    fn visit_none<E: de::Error>(self) -> std::result::Result<Selector, E> {
        Ok(Selector::default())
    }

    fn visit_unit<E: de::Error>(self) -> std::result::Result<Selector, E> {
        Ok(Selector::default())
    }

    fn visit_some<D: Deserializer<'de>>(
        self,
        deserializer: D,
    ) -> std::result::Result<Selector, D::Error> {
        deserializer.deserialize_any(self)
    }
}

impl<'de> Deserialize<'de> for Selector {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(SelectorVisitor)
    }
}

/// One authorization clause of a role
///
/// A resource request matches when all four resource dimensions match.
/// A non-resource request only consults `non_resource_urls`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyRule {
    /// Verbs (create, get, patch, ...)
    #[serde(default)]
    pub verbs: Selector,

    /// API groups
    #[serde(default, rename = "apiGroups")]
    pub api_groups: Selector,

    /// Resource types, e.g. "clusters" or "clusters/members"
    #[serde(default)]
    pub resources: Selector,

    /// Scopes the rule applies to
    #[serde(default)]
    pub scopes: Selector,

    /// Literal URL paths granted independently of the resource dimensions
    #[serde(default, rename = "nonResourceURLs")]
    pub non_resource_urls: Selector,
}

impl PolicyRule {
    /// Create a rule that matches nothing
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_verbs(mut self, verbs: Selector) -> Self {
        self.verbs = verbs;
        self
    }

    pub fn with_api_groups(mut self, api_groups: Selector) -> Self {
        self.api_groups = api_groups;
        self
    }

    pub fn with_resources(mut self, resources: Selector) -> Self {
        self.resources = resources;
        self
    }

    pub fn with_scopes(mut self, scopes: Selector) -> Self {
        self.scopes = scopes;
        self
    }

    pub fn with_non_resource_urls(mut self, urls: Selector) -> Self {
        self.non_resource_urls = urls;
        self
    }

    /// Check a resource request against all four resource dimensions
    pub fn matches_resource(&self, attrs: &ResourceAttributes) -> bool {
        self.api_groups.matches(&attrs.api_group)
            && self.resources.matches(&attrs.resource)
            && self.verbs.matches(&attrs.verb)
            && self.scopes.matches(&attrs.scope)
    }

    /// Check a non-resource URL
    pub fn matches_non_resource_url(&self, url: &str) -> bool {
        self.non_resource_urls.matches(url)
    }

    /// Check a request of either shape
    pub fn allows(&self, request: &AccessRequest) -> bool {
        match request {
            AccessRequest::Resource(attrs) => self.matches_resource(attrs),
            AccessRequest::NonResource { url } => self.matches_non_resource_url(url),
        }
    }
}
