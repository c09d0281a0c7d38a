//! Runtime identifier resolution.
//!
//! Computes the ordered list of runtime identifiers a plugin loader should
//! probe when locating native assets, most specific first: the host's own
//! identifier followed by its fallback graph entries.

use std::collections::HashSet;
use std::sync::Arc;

use crate::error::Result;
use crate::platform::PlatformContext;

/// Resolves the runtime identifiers supported by the host platform.
pub struct RuntimeIdResolver {
    platform: Arc<dyn PlatformContext>,
}

impl RuntimeIdResolver {
    /// Create a resolver over the given platform context.
    pub fn new(platform: Arc<dyn PlatformContext>) -> Self {
        Self { platform }
    }

    /// Compute the ordered runtime identifier list, most specific first.
    ///
    /// The first element is always the platform's own identifier, followed
    /// by its fallbacks in graph order. An empty result means the platform
    /// could not be determined; callers must treat that as "resolution
    /// unavailable", not an error. The result is recomputed fresh on every
    /// call; nothing is cached here.
    ///
    /// Errors from the platform context are propagated unchanged.
    pub fn supported_runtime_identifiers(&self) -> Result<Vec<String>> {
        let current = self.platform.runtime_identifier()?;
        if current.trim().is_empty() {
            tracing::debug!("Runtime identifier undetermined, resolution unavailable");
            return Ok(Vec::new());
        }

        let mut result = vec![current.clone()];

        if let Some(graph) = self.platform.fallback_graph()? {
            if let Some(fallbacks) = graph.fallbacks_for(&current) {
                result.extend(fallbacks.iter().cloned());
            }
        }

        // The graph should not repeat the current identifier in its own
        // fallback list, but a malformed graph must not produce duplicates.
        let mut seen = HashSet::new();
        result.retain(|rid| seen.insert(rid.to_ascii_lowercase()));

        tracing::debug!("Resolved runtime identifiers: {:?}", result);
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ContextError;
    use crate::graph::RuntimeFallbackGraph;
    use crate::platform::StaticPlatform;

    struct FailingPlatform;

    impl PlatformContext for FailingPlatform {
        fn runtime_identifier(&self) -> Result<String> {
            Err(ContextError::RuntimeIdentifier("metadata missing".into()))
        }

        fn fallback_graph(&self) -> Result<Option<RuntimeFallbackGraph>> {
            Err(ContextError::FallbackGraph("metadata missing".into()))
        }
    }

    fn resolver(platform: StaticPlatform) -> RuntimeIdResolver {
        RuntimeIdResolver::new(Arc::new(platform))
    }

    #[test]
    fn test_empty_identifier_yields_empty_list() {
        let resolver = resolver(StaticPlatform::new(""));
        assert!(resolver.supported_runtime_identifiers().unwrap().is_empty());
    }

    #[test]
    fn test_blank_identifier_yields_empty_list() {
        let resolver = resolver(StaticPlatform::new("   "));
        assert!(resolver.supported_runtime_identifiers().unwrap().is_empty());
    }

    #[test]
    fn test_no_graph_yields_only_current() {
        let resolver = resolver(StaticPlatform::new("linux-x64"));
        assert_eq!(
            resolver.supported_runtime_identifiers().unwrap(),
            ["linux-x64"]
        );
    }

    #[test]
    fn test_no_graph_entry_yields_only_current() {
        let graph = RuntimeFallbackGraph::new().with_entry("win-x64", ["win"]);
        let resolver = resolver(StaticPlatform::new("linux-x64").with_graph(graph));

        assert_eq!(
            resolver.supported_runtime_identifiers().unwrap(),
            ["linux-x64"]
        );
    }

    #[test]
    fn test_fallbacks_appended_in_graph_order() {
        let graph =
            RuntimeFallbackGraph::new().with_entry("ubuntu.20.04-x64", ["linux-x64", "unix-x64"]);
        let resolver = resolver(StaticPlatform::new("ubuntu.20.04-x64").with_graph(graph));

        assert_eq!(
            resolver.supported_runtime_identifiers().unwrap(),
            ["ubuntu.20.04-x64", "linux-x64", "unix-x64"]
        );
    }

    #[test]
    fn test_graph_key_match_is_case_insensitive() {
        let graph = RuntimeFallbackGraph::new().with_entry("linux-x64", ["unix-x64"]);
        let resolver = resolver(StaticPlatform::new("Linux-X64").with_graph(graph));

        // First element keeps the provider's raw value.
        assert_eq!(
            resolver.supported_runtime_identifiers().unwrap(),
            ["Linux-X64", "unix-x64"]
        );
    }

    #[test]
    fn test_duplicates_from_malformed_graph_are_dropped() {
        let graph = RuntimeFallbackGraph::new().with_entry(
            "ubuntu.20.04-x64",
            ["linux-x64", "ubuntu.20.04-x64", "unix-x64", "LINUX-X64"],
        );
        let resolver = resolver(StaticPlatform::new("ubuntu.20.04-x64").with_graph(graph));

        assert_eq!(
            resolver.supported_runtime_identifiers().unwrap(),
            ["ubuntu.20.04-x64", "linux-x64", "unix-x64"]
        );
    }

    #[test]
    fn test_recomputed_fresh_per_call() {
        let graph = RuntimeFallbackGraph::new().with_entry("linux-x64", ["unix-x64"]);
        let resolver = resolver(StaticPlatform::new("linux-x64").with_graph(graph));

        let first = resolver.supported_runtime_identifiers().unwrap();
        let second = resolver.supported_runtime_identifiers().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_provider_failure_propagates() {
        let resolver = RuntimeIdResolver::new(Arc::new(FailingPlatform));
        assert!(matches!(
            resolver.supported_runtime_identifiers(),
            Err(ContextError::RuntimeIdentifier(_))
        ));
    }
}
