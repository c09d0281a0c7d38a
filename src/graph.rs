//! Runtime fallback graph.
//!
//! Maps a runtime identifier to the preference-ordered list of less specific
//! identifiers usable when an exact match is unavailable, e.g.
//! `ubuntu.20.04-x64` -> `["linux-x64", "unix-x64"]`. The graph comes from
//! platform dependency metadata and is treated as read-only input.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::Result;

/// One entry of the fallback graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeFallback {
    /// The specific runtime identifier
    pub runtime: String,
    /// Fallback identifiers, most specific first
    pub fallbacks: Vec<String>,
}

/// Read-only fallback graph over runtime identifiers.
#[derive(Debug, Clone, Default)]
pub struct RuntimeFallbackGraph {
    entries: Vec<RuntimeFallback>,
}

/// Wire format of a runtime graph document: a `"runtimes"` object mapping
/// each identifier to its flattened fallback array.
#[derive(Debug, Deserialize)]
struct RuntimeGraphDoc {
    #[serde(default)]
    runtimes: HashMap<String, Vec<String>>,
}

impl RuntimeFallbackGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry, builder style.
    pub fn with_entry(
        mut self,
        runtime: impl Into<String>,
        fallbacks: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.entries.push(RuntimeFallback {
            runtime: runtime.into(),
            fallbacks: fallbacks.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// Parse a graph from a JSON runtime graph document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let doc: RuntimeGraphDoc = serde_json::from_str(json)?;
        let entries = doc
            .runtimes
            .into_iter()
            .map(|(runtime, fallbacks)| RuntimeFallback { runtime, fallbacks })
            .collect();
        Ok(Self { entries })
    }

    /// Read and parse a graph document from a file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Look up the fallback list for a runtime identifier.
    ///
    /// Comparison is case-insensitive. Returns `None` when the graph has no
    /// entry for the identifier.
    pub fn fallbacks_for(&self, runtime: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|entry| entry.runtime.eq_ignore_ascii_case(runtime))
            .map(|entry| entry.fallbacks.as_slice())
    }

    /// Iterate over the entries.
    pub fn iter(&self) -> impl Iterator<Item = &RuntimeFallback> {
        self.entries.iter()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the graph is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
