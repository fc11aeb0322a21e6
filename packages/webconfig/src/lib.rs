//! webconfig - Flatten `web.config` / `app.config` XML into key/value pairs.
//!
//! A configuration file is walked from its root element. Every element that
//! contains `<add>` / `<remove>` actions is flattened into colon-delimited
//! keys such as `appSettings:Theme` or `connectionStrings:Default`.
//! `configSource` attributes pull in external files and `<location>`
//! elements are honoured only when they apply to the running application.
//!
//! # Example
//!
//! ```
//! use webconfig::{ConfigFileSource, InMemoryFileProvider};
//!
//! let files = InMemoryFileProvider::new("/srv/app").with_file(
//!     "web.config",
//!     r#"<configuration>
//!          <appSettings><add key="Theme" value="dark"/></appSettings>
//!        </configuration>"#,
//! );
//! let data = ConfigFileSource::with_provider(files, "web.config", false)
//!     .with_current_dir("/srv/app")
//!     .load()?;
//!
//! assert_eq!(data.get("APPSETTINGS:theme"), Some("dark"));
//! # Ok::<(), webconfig::ConfigError>(())
//! ```
//!
//! # Architecture
//!
//! - [`source`]: The configuration file source and its load operation
//! - [`registry`]: Document traversal, `configSource` inclusion and the
//!   ordered parser registry
//! - [`data`]: Ordered, case-insensitive result store
//! - [`file_provider`]: File lookup relative to a root directory
//! - [`diagnostics`]: Non-fatal findings reported while parsing
//! - [`xml`]: XML utilities
//! - [`path`]: Key path helpers
//! - [`config`]: Attribute and element name constants
//! - [`error`]: Error types and Result alias
//! - [`cli`]: Command-line interface

pub mod cli;
pub mod config;
pub mod data;
pub mod diagnostics;
pub mod error;
pub mod file_provider;
pub mod path;
pub mod registry;
pub mod source;
pub mod xml;

// Re-export commonly used items
pub use data::ConfigData;
pub use diagnostics::{Diagnostic, DiagnosticCollector, DiagnosticLevel, DiagnosticSink};
pub use error::{ConfigError, Result};
pub use file_provider::{FileInfo, FileProvider, InMemoryFileProvider, PhysicalFileProvider};
pub use registry::parsers::KeyValueParser;
pub use registry::{Action, ElementParser, ParseContext, ParserRegistry};
pub use source::ConfigFileSource;
