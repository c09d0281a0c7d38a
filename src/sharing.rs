//! Assembly sharing policy between a plugin and its host.
//!
//! When a plugin references an assembly the host has already loaded, the
//! sharing policy decides whether the plugin must use the host's copy or is
//! free to load its own. Useful when the host and a plugin must agree on the
//! exact version of a shared dependency.

use std::str::FromStr;

use crate::error::ContextError;

/// Whether a plugin uses assemblies referenced by the host application or
/// its own copies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SharingPolicy {
    /// The plugin always uses the host's copy of a shared assembly.
    #[default]
    Always,
    /// The plugin always uses its own copy.
    Never,
    /// Only assemblies on the host allow-list are forced to the host's copy.
    Selected,
}

impl FromStr for SharingPolicy {
    type Err = ContextError;

    /// Parse a policy from a configuration string.
    ///
    /// Unrecognized values are a configuration error and fail here, before
    /// any load context is constructed.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "always" => Ok(SharingPolicy::Always),
            "never" => Ok(SharingPolicy::Never),
            "selected" => Ok(SharingPolicy::Selected),
            _ => Err(ContextError::UnknownSharingPolicy(s.to_string())),
        }
    }
}

/// Identifier of an assembly: a simple name plus optional version, culture
/// and public key token metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssemblyName {
    /// Simple assembly name
    pub name: String,
    /// Version string, if known
    pub version: Option<String>,
    /// Culture, if known
    pub culture: Option<String>,
    /// Public key token (hex), if known
    pub public_key_token: Option<String>,
}

impl AssemblyName {
    /// Create an assembly name with only the simple name set.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: None,
            culture: None,
            public_key_token: None,
        }
    }

    /// Set the version.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Set the culture.
    pub fn with_culture(mut self, culture: impl Into<String>) -> Self {
        self.culture = Some(culture.into());
        self
    }

    /// Set the public key token.
    pub fn with_public_key_token(mut self, token: impl Into<String>) -> Self {
        self.public_key_token = Some(token.into());
        self
    }

    /// Check whether `candidate` matches this allow-list entry.
    ///
    /// Names are compared case-insensitively. Version, culture and public
    /// key token are compared only when this entry specifies them; an
    /// unspecified field matches any candidate value.
    pub fn matches(&self, candidate: &AssemblyName) -> bool {
        if !self.name.eq_ignore_ascii_case(&candidate.name) {
            return false;
        }

        if let Some(version) = &self.version {
            if candidate.version.as_deref() != Some(version.as_str()) {
                return false;
            }
        }

        if let Some(culture) = &self.culture {
            let matched = candidate
                .culture
                .as_deref()
                .is_some_and(|c| c.eq_ignore_ascii_case(culture));
            if !matched {
                return false;
            }
        }

        if let Some(token) = &self.public_key_token {
            let matched = candidate
                .public_key_token
                .as_deref()
                .is_some_and(|t| t.eq_ignore_ascii_case(token));
            if !matched {
                return false;
            }
        }

        true
    }
}

/// Assemblies the plugin must take from the host when the policy is
/// [`SharingPolicy::Selected`].
///
/// Insertion order is irrelevant and duplicates are harmless.
#[derive(Debug, Clone, Default)]
pub struct HostAssemblyAllowList {
    entries: Vec<AssemblyName>,
}

impl HostAssemblyAllowList {
    /// Create an empty allow-list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry.
    pub fn push(&mut self, name: AssemblyName) {
        self.entries.push(name);
    }

    /// Add an entry, builder style.
    pub fn with(mut self, name: AssemblyName) -> Self {
        self.entries.push(name);
        self
    }

    /// Iterate over the entries.
    pub fn iter(&self) -> impl Iterator<Item = &AssemblyName> {
        self.entries.iter()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check whether any entry matches the given assembly.
    pub fn contains_match(&self, candidate: &AssemblyName) -> bool {
        self.entries.iter().any(|entry| entry.matches(candidate))
    }
}

impl FromIterator<AssemblyName> for HostAssemblyAllowList {
    fn from_iter<T: IntoIterator<Item = AssemblyName>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Sharing policy plus its allow-list, queried once per assembly reference
/// while the external loader resolves a plugin's dependency graph.
#[derive(Debug, Clone, Default)]
pub struct AssemblySharing {
    policy: SharingPolicy,
    allow_list: HostAssemblyAllowList,
}

impl AssemblySharing {
    /// Create an evaluator for the given policy and allow-list.
    pub fn new(policy: SharingPolicy, allow_list: HostAssemblyAllowList) -> Self {
        Self { policy, allow_list }
    }

    /// Get the policy.
    pub fn policy(&self) -> SharingPolicy {
        self.policy
    }

    /// Get the allow-list.
    pub fn allow_list(&self) -> &HostAssemblyAllowList {
        &self.allow_list
    }

    /// Return true if the named assembly must be resolved from the host's
    /// already-loaded copy rather than the plugin's own reference.
    pub fn must_share(&self, assembly: &AssemblyName) -> bool {
        match self.policy {
            SharingPolicy::Always => true,
            SharingPolicy::Never => false,
            SharingPolicy::Selected => self.allow_list.contains_match(assembly),
        }
    }
}
