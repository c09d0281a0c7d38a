//! Load-context configuration for plugin hosts.
//!
//! This crate decides two things for an external plugin loader: which
//! assemblies a plugin must share with its host instead of loading its own
//! copy, and which runtime identifiers to probe, most specific first, when
//! the plugin needs native or platform-specific assets. The loader itself
//! (isolation, disk probing, dependency wiring) lives elsewhere and only
//! consumes the values produced here.
//!
//! # Example
//!
//! ```rust
//! use lib_plugin_context::{
//!     AssemblyName, LoadContextOptions, RuntimeFallbackGraph, SharingPolicy, StaticPlatform,
//! };
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let graph = RuntimeFallbackGraph::new()
//!         .with_entry("ubuntu.20.04-x64", ["linux-x64", "unix-x64"]);
//!
//!     let options = LoadContextOptions::new()
//!         .with_policy(SharingPolicy::Selected)
//!         .with_host_assembly(AssemblyName::new("serde"))
//!         .with_runtime_path("/opt/myapp/native")
//!         .with_platform(StaticPlatform::new("ubuntu.20.04-x64").with_graph(graph));
//!
//!     assert!(options.must_share_assembly(&AssemblyName::new("serde")));
//!
//!     let identifiers = options.supported_runtime_identifiers()?;
//!     assert_eq!(identifiers, ["ubuntu.20.04-x64", "linux-x64", "unix-x64"]);
//!
//!     Ok(())
//! }
//! ```

mod config;
mod error;
mod graph;
mod platform;
mod resolver;
mod sharing;

pub use config::*;
pub use error::*;
pub use graph::*;
pub use platform::*;
pub use resolver::*;
pub use sharing::*;
