//! A configuration file source and its load operation.

use std::fmt;
use std::path::{Path, PathBuf};

use roxmltree::Document;

use crate::data::ConfigData;
use crate::diagnostics::DiagnosticSink;
use crate::error::{ConfigError, Result};
use crate::file_provider::{FileProvider, PhysicalFileProvider};
use crate::registry::{
    create_default_registry, ElementParser, ParseContext, ParseEngine, ParserRegistry,
};

/// A `*.config` file to be flattened.
///
/// Each call to [`load`](Self::load) reads the file again and builds a new
/// [`ConfigData`] from scratch; nothing is carried over between loads.
///
/// # Example
///
/// ```no_run
/// use webconfig::ConfigFileSource;
///
/// let source = ConfigFileSource::new("site/web.config", false)?;
/// let data = source.load()?;
/// println!("{:?}", data.get("appSettings:Theme"));
/// # Ok::<(), webconfig::ConfigError>(())
/// ```
pub struct ConfigFileSource {
    path: String,
    optional: bool,
    files: Box<dyn FileProvider>,
    registry: ParserRegistry,
    current_dir: Option<PathBuf>,
}

impl ConfigFileSource {
    /// Create a source for a file on disk.
    ///
    /// The file's directory becomes the root for `configSource` lookups.
    ///
    /// # Errors
    /// Returns `EmptyPath` for an empty path and `FileNotFound` if the file
    /// is required but does not exist.
    pub fn new(path: impl AsRef<Path>, optional: bool) -> Result<Self> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(ConfigError::EmptyPath);
        }

        if !optional && !path.is_file() {
            return Err(ConfigError::file_not_found(path.display().to_string()));
        }

        let absolute = std::path::absolute(path)?;
        let root = absolute
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        let file_name = absolute
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| ConfigError::file_not_found(path.display().to_string()))?;

        Ok(Self::with_provider(
            PhysicalFileProvider::new(root),
            file_name,
            optional,
        ))
    }

    /// Create a source reading `subpath` from a caller-supplied provider.
    #[must_use]
    pub fn with_provider(
        provider: impl FileProvider + 'static,
        subpath: impl Into<String>,
        optional: bool,
    ) -> Self {
        Self {
            path: subpath.into(),
            optional,
            files: Box::new(provider),
            registry: create_default_registry(),
            current_dir: None,
        }
    }

    /// Append an extension parser after the default ones.
    #[must_use]
    pub fn with_parser(mut self, parser: impl ElementParser + 'static) -> Self {
        self.registry.register(parser);
        self
    }

    /// Use `dir` as the execution root for `<location>` scoping instead of
    /// the process working directory.
    #[must_use]
    pub fn with_current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    /// Path of the file relative to the provider root.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub fn is_optional(&self) -> bool {
        self.optional
    }

    /// Parsers in dispatch order.
    #[must_use]
    pub fn registry(&self) -> &ParserRegistry {
        &self.registry
    }

    /// Load the file into a new store.
    ///
    /// # Errors
    /// Returns `FileNotFound` if a required file or a `configSource` is
    /// missing, `XmlParse` for malformed XML, and `Io` for read failures.
    pub fn load(&self) -> Result<ConfigData> {
        self.load_inner(ParseContext::new())
    }

    /// Load the file, forwarding non-fatal findings to `sink`.
    ///
    /// # Errors
    /// Same as [`load`](Self::load).
    pub fn load_with_diagnostics(&self, sink: &mut dyn DiagnosticSink) -> Result<ConfigData> {
        self.load_inner(ParseContext::new().with_diagnostics(sink))
    }

    fn load_inner(&self, mut context: ParseContext<'_>) -> Result<ConfigData> {
        let Some(file) = self.files.get_file(&self.path)? else {
            if self.optional {
                tracing::debug!(path = %self.path, "Optional configuration file not found");
                return Ok(ConfigData::new());
            }
            return Err(ConfigError::file_not_found(self.path.as_str()));
        };

        let doc = Document::parse(&file.contents).map_err(|source| ConfigError::XmlParse {
            path: file.physical_path.display().to_string(),
            source,
        })?;

        let current_dir = match &self.current_dir {
            Some(dir) => dir.clone(),
            None => std::env::current_dir()?,
        };

        let engine = ParseEngine::new(&self.registry, self.files.as_ref(), &current_dir);
        let mut data = ConfigData::new();
        engine.parse_document(doc.root_element(), &mut context, &mut data)?;

        tracing::debug!(
            path = %file.physical_path.display(),
            entries = data.len(),
            child_app = engine.is_child_app(),
            "Loaded configuration file"
        );

        Ok(data)
    }
}

impl fmt::Debug for ConfigFileSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigFileSource")
            .field("path", &self.path)
            .field("optional", &self.optional)
            .field("root", &self.files.root())
            .field("registry", &self.registry)
            .field("current_dir", &self.current_dir)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::DiagnosticCollector;
    use crate::file_provider::InMemoryFileProvider;
    use crate::registry::parsers::KeyValueParser;

    const WEB_CONFIG: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<configuration>
  <appSettings>
    <add key="Theme" value="dark"/>
    <add key="Theme" value="light"/>
  </appSettings>
</configuration>"#;

    fn provider() -> InMemoryFileProvider {
        InMemoryFileProvider::new("/srv/app").with_file("web.config", WEB_CONFIG)
    }

    #[test]
    fn test_new_rejects_empty_path() {
        let err = ConfigFileSource::new("", true).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyPath));
    }

    #[test]
    fn test_new_required_missing_file() {
        let err = ConfigFileSource::new("does/not/exist/web.config", false).unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound { .. }));
    }

    #[test]
    fn test_new_optional_missing_file_loads_empty() {
        let source = ConfigFileSource::new("does/not/exist/web.config", true).unwrap();
        assert_eq!(source.path(), "web.config");
        assert!(source.is_optional());
        assert!(source.load().unwrap().is_empty());
    }

    #[test]
    fn test_with_provider_missing_required_file() {
        let files = InMemoryFileProvider::new("/srv/app");
        let source = ConfigFileSource::with_provider(files, "web.config", false);
        let err = source.load().unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound { path } if path == "web.config"));
    }

    #[test]
    fn test_load() {
        let source = ConfigFileSource::with_provider(provider(), "web.config", false)
            .with_current_dir("/srv/app");
        let data = source.load().unwrap();
        assert_eq!(data.get("appSettings:Theme"), Some("light"));
    }

    #[test]
    fn test_diagnostics_do_not_change_output() {
        let source = ConfigFileSource::with_provider(provider(), "web.config", false)
            .with_current_dir("/srv/app");

        let mut collector = DiagnosticCollector::new();
        let with_sink = source.load_with_diagnostics(&mut collector).unwrap();
        let without_sink = source.load().unwrap();

        assert_eq!(with_sink, without_sink);
        assert_eq!(collector.warnings().count(), 1);
    }

    #[test]
    fn test_reload_starts_from_empty() {
        let source = ConfigFileSource::with_provider(provider(), "web.config", false)
            .with_current_dir("/srv/app");

        let first = source.load().unwrap();
        let second = source.load().unwrap();
        assert_eq!(first, second);
        assert_eq!(second.len(), 1);
    }

    #[test]
    fn test_malformed_primary_file() {
        let files = InMemoryFileProvider::new("/srv/app").with_file("web.config", "<configuration>");
        let source = ConfigFileSource::with_provider(files, "web.config", false);
        let err = source.load().unwrap_err();
        assert!(matches!(err, ConfigError::XmlParse { .. }));
    }

    #[test]
    fn test_with_parser_appends_after_defaults() {
        let files = InMemoryFileProvider::new("/srv/app").with_file(
            "web.config",
            r#"<configuration>
                <system.net><mailSettings><add from="noreply@example.org" host="smtp.example.org"/></mailSettings></system.net>
            </configuration>"#,
        );
        let source = ConfigFileSource::with_provider(files, "web.config", false)
            .with_current_dir("/srv/app")
            .with_parser(KeyValueParser::new("from", "host"));

        assert_eq!(
            source.registry().parser_names(),
            vec!["key/value", "name/connectionString", "from/host"]
        );
        let data = source.load().unwrap();
        assert_eq!(
            data.get("system.net:mailSettings:noreply@example.org"),
            Some("smtp.example.org")
        );
    }
}
