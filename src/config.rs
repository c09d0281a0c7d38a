//! Load-context configuration.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use crate::error::Result;
use crate::platform::{HostPlatform, PlatformContext};
use crate::resolver::RuntimeIdResolver;
use crate::sharing::{AssemblyName, AssemblySharing, HostAssemblyAllowList, SharingPolicy};

/// Configuration for a plugin load context.
///
/// Assembled once by the host before any plugin load and treated as
/// immutable afterwards; a host that wants different settings constructs a
/// new value rather than mutating one that loads may be reading.
#[derive(Clone)]
pub struct LoadContextOptions {
    sharing: AssemblySharing,
    additional_runtime_paths: Vec<PathBuf>,
    platform: Arc<dyn PlatformContext>,
    logger: Option<tracing::Dispatch>,
}

impl LoadContextOptions {
    /// Create options with default settings: share all host assemblies, no
    /// extra runtime paths, compile-time platform detection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the sharing policy.
    pub fn with_policy(mut self, policy: SharingPolicy) -> Self {
        self.sharing = AssemblySharing::new(policy, self.sharing.allow_list().clone());
        self
    }

    /// Set the sharing policy from a configuration string.
    ///
    /// Fails fast on unrecognized values so a misconfigured host never
    /// reaches its first plugin load.
    pub fn with_policy_name(self, name: &str) -> Result<Self> {
        Ok(self.with_policy(name.parse()?))
    }

    /// Set the host assembly allow-list, used when the policy is
    /// [`SharingPolicy::Selected`].
    pub fn with_allow_list(mut self, allow_list: HostAssemblyAllowList) -> Self {
        self.sharing = AssemblySharing::new(self.sharing.policy(), allow_list);
        self
    }

    /// Add one assembly to the allow-list.
    pub fn with_host_assembly(mut self, name: AssemblyName) -> Self {
        let mut allow_list = self.sharing.allow_list().clone();
        allow_list.push(name);
        self.sharing = AssemblySharing::new(self.sharing.policy(), allow_list);
        self
    }

    /// Add a directory to probe for runtime-specific assets, after the
    /// default search locations. Order matters: first match wins downstream.
    pub fn with_runtime_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.additional_runtime_paths.push(path.into());
        self
    }

    /// Add multiple probe directories.
    pub fn with_runtime_paths(
        mut self,
        paths: impl IntoIterator<Item = impl Into<PathBuf>>,
    ) -> Self {
        self.additional_runtime_paths
            .extend(paths.into_iter().map(Into::into));
        self
    }

    /// Replace the platform context.
    pub fn with_platform(mut self, platform: impl PlatformContext + 'static) -> Self {
        self.platform = Arc::new(platform);
        self
    }

    /// Set the tracing dispatcher the external loader should log through.
    ///
    /// Configuration slot only; nothing in this crate routes through it.
    pub fn with_logger(mut self, dispatch: tracing::Dispatch) -> Self {
        self.logger = Some(dispatch);
        self
    }

    /// Get the sharing policy and allow-list evaluator.
    pub fn sharing(&self) -> &AssemblySharing {
        &self.sharing
    }

    /// Get the sharing policy.
    pub fn policy(&self) -> SharingPolicy {
        self.sharing.policy()
    }

    /// Get the allow-list.
    pub fn allow_list(&self) -> &HostAssemblyAllowList {
        self.sharing.allow_list()
    }

    /// Get the additional probe directories, in insertion order.
    pub fn additional_runtime_paths(&self) -> &[PathBuf] {
        &self.additional_runtime_paths
    }

    /// Get the platform context.
    pub fn platform(&self) -> &Arc<dyn PlatformContext> {
        &self.platform
    }

    /// Get the configured logger, if any.
    pub fn logger(&self) -> Option<&tracing::Dispatch> {
        self.logger.as_ref()
    }

    /// Return true if the named assembly must come from the host's
    /// already-loaded copy.
    pub fn must_share_assembly(&self, assembly: &AssemblyName) -> bool {
        self.sharing.must_share(assembly)
    }

    /// Resolve the ordered runtime identifier list for the configured
    /// platform, most specific first. See
    /// [`RuntimeIdResolver::supported_runtime_identifiers`].
    pub fn supported_runtime_identifiers(&self) -> Result<Vec<String>> {
        RuntimeIdResolver::new(self.platform.clone()).supported_runtime_identifiers()
    }
}

impl Default for LoadContextOptions {
    fn default() -> Self {
        Self {
            sharing: AssemblySharing::default(),
            additional_runtime_paths: Vec::new(),
            platform: Arc::new(HostPlatform::new()),
            logger: None,
        }
    }
}

impl fmt::Debug for LoadContextOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadContextOptions")
            .field("sharing", &self.sharing)
            .field("additional_runtime_paths", &self.additional_runtime_paths)
            .field("logger", &self.logger.is_some())
            .finish_non_exhaustive()
    }
}
