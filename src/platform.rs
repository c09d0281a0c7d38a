//! Platform context: the seam between the load context and the machine it
//! runs on.
//!
//! The resolver never detects the platform itself; it asks a
//! [`PlatformContext`] for the current runtime identifier and the fallback
//! graph. Hosts override detection by supplying their own implementation,
//! tests by using [`StaticPlatform`].

use std::path::PathBuf;

use crate::error::Result;
use crate::graph::RuntimeFallbackGraph;

/// Capability for querying the host's runtime platform.
pub trait PlatformContext: Send + Sync {
    /// Get the host's runtime identifier, e.g. `linux-x64`.
    ///
    /// An empty string means the platform could not be determined; callers
    /// must treat that as "resolution unavailable", not as an error.
    fn runtime_identifier(&self) -> Result<String>;

    /// Get the runtime fallback graph.
    ///
    /// `Ok(None)` means no metadata source is available, which downstream is
    /// equivalent to "no fallbacks found". Errors reading an existing source
    /// are propagated unchanged.
    fn fallback_graph(&self) -> Result<Option<RuntimeFallbackGraph>>;
}

/// Default platform context backed by compile-time target detection and an
/// optional runtime graph file.
#[derive(Debug, Clone, Default)]
pub struct HostPlatform {
    graph_path: Option<PathBuf>,
}

impl HostPlatform {
    /// Create a platform context with no fallback graph source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the path of a JSON runtime graph document to read fallbacks from.
    pub fn with_graph_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.graph_path = Some(path.into());
        self
    }
}

impl PlatformContext for HostPlatform {
    fn runtime_identifier(&self) -> Result<String> {
        Ok(current_runtime_identifier())
    }

    fn fallback_graph(&self) -> Result<Option<RuntimeFallbackGraph>> {
        let Some(path) = &self.graph_path else {
            return Ok(None);
        };

        if !path.exists() {
            tracing::debug!("Runtime graph file not found: {:?}", path);
            return Ok(None);
        }

        Ok(Some(RuntimeFallbackGraph::from_file(path)?))
    }
}

/// Platform context with fixed answers.
///
/// Intended for hosts that already know their runtime identifier and for
/// tests.
#[derive(Debug, Clone)]
pub struct StaticPlatform {
    identifier: String,
    graph: Option<RuntimeFallbackGraph>,
}

impl StaticPlatform {
    /// Create a context that reports the given runtime identifier and no
    /// fallback graph.
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            graph: None,
        }
    }

    /// Attach a fallback graph.
    pub fn with_graph(mut self, graph: RuntimeFallbackGraph) -> Self {
        self.graph = Some(graph);
        self
    }
}

impl PlatformContext for StaticPlatform {
    fn runtime_identifier(&self) -> Result<String> {
        Ok(self.identifier.clone())
    }

    fn fallback_graph(&self) -> Result<Option<RuntimeFallbackGraph>> {
        Ok(self.graph.clone())
    }
}

/// Compute the runtime identifier for the compile-time target.
///
/// Returns an empty string when the target os/arch combination is not one
/// this crate knows a token for.
pub fn current_runtime_identifier() -> String {
    let os = if cfg!(target_os = "windows") {
        "win"
    } else if cfg!(target_os = "macos") {
        "osx"
    } else if cfg!(target_os = "linux") {
        "linux"
    } else {
        return String::new();
    };

    let arch = if cfg!(target_arch = "x86_64") {
        "x64"
    } else if cfg!(target_arch = "x86") {
        "x86"
    } else if cfg!(target_arch = "aarch64") {
        "arm64"
    } else if cfg!(target_arch = "arm") {
        "arm"
    } else {
        return String::new();
    };

    format!("{}-{}", os, arch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_current_runtime_identifier_shape() {
        let rid = current_runtime_identifier();
        // Any supported CI target yields an "os-arch" token.
        if !rid.is_empty() {
            let (os, arch) = rid.split_once('-').unwrap();
            assert!(["win", "osx", "linux"].contains(&os));
            assert!(["x64", "x86", "arm64", "arm"].contains(&arch));
        }
    }

    #[test]
    fn test_host_platform_without_graph_source() {
        let platform = HostPlatform::new();
        assert!(platform.fallback_graph().unwrap().is_none());
    }

    #[test]
    fn test_host_platform_missing_graph_file_is_not_an_error() {
        let platform = HostPlatform::new().with_graph_file("/nonexistent/runtime.json");
        assert!(platform.fallback_graph().unwrap().is_none());
    }

    #[test]
    fn test_host_platform_reads_graph_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"runtimes": {{"linux-x64": ["unix-x64"]}}}}"#).unwrap();

        let platform = HostPlatform::new().with_graph_file(file.path());
        let graph = platform.fallback_graph().unwrap().unwrap();
        assert_eq!(graph.fallbacks_for("linux-x64").unwrap(), ["unix-x64"]);
    }

    #[test]
    fn test_host_platform_malformed_graph_file_fails() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not a graph").unwrap();

        let platform = HostPlatform::new().with_graph_file(file.path());
        assert!(platform.fallback_graph().is_err());
    }

    #[test]
    fn test_static_platform() {
        let platform = StaticPlatform::new("ubuntu.20.04-x64")
            .with_graph(RuntimeFallbackGraph::new().with_entry("ubuntu.20.04-x64", ["linux-x64"]));

        assert_eq!(platform.runtime_identifier().unwrap(), "ubuntu.20.04-x64");
        assert!(platform.fallback_graph().unwrap().is_some());
    }
}
