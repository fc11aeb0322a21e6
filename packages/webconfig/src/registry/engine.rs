//! Parse engine that walks a configuration document.

use std::path::{Path, PathBuf};

use roxmltree::{Document, Node};

use super::core::ParserRegistry;
use super::types::ParseContext;
use crate::config::{
    CONFIG_SOURCE_ATTRIBUTE, INHERIT_IN_CHILD_APPLICATIONS_ATTRIBUTE, LOCATION_ELEMENT,
    LOCATION_PATH_ATTRIBUTE, LOCATION_PATH_SELF,
};
use crate::data::ConfigData;
use crate::error::{ConfigError, Result};
use crate::file_provider::FileProvider;
use crate::xml::{
    describe_element, element_children, get_attribute, get_tag_name, has_tag_ignore_case,
    subtree_has_attribute,
};

/// Engine that walks a document and feeds its elements to the registry.
///
/// For every child of the document root the engine applies the
/// `<location>` gate, merges the files named by `configSource` attributes
/// and then dispatches the element itself. Both the inline element and the
/// referenced content end up in the same store.
///
/// Includes are not checked for cycles; a file that (transitively) includes
/// itself recurses until the stack is exhausted.
pub struct ParseEngine<'a> {
    registry: &'a ParserRegistry,
    files: &'a dyn FileProvider,
    is_child_app: bool,
}

impl<'a> ParseEngine<'a> {
    /// Create an engine for one load.
    ///
    /// # Arguments
    /// * `registry` - Parsers to dispatch elements to
    /// * `files` - Provider rooted at the primary file's directory
    /// * `current_dir` - Execution root; the application counts as a child
    ///   application when this differs from the provider root
    #[must_use]
    pub fn new(
        registry: &'a ParserRegistry,
        files: &'a dyn FileProvider,
        current_dir: &Path,
    ) -> Self {
        let is_child_app = !same_directory(current_dir, files.root());
        Self {
            registry,
            files,
            is_child_app,
        }
    }

    /// Get a reference to the underlying registry.
    #[must_use]
    pub fn registry(&self) -> &ParserRegistry {
        self.registry
    }

    /// Whether the configuration is evaluated from a nested application.
    #[must_use]
    pub fn is_child_app(&self) -> bool {
        self.is_child_app
    }

    /// Parse the children of a document root into `data`.
    ///
    /// # Errors
    /// Returns `FileNotFound` if a `configSource` cannot be located,
    /// `XmlParse` if it is not well-formed, and any error raised by a parser.
    pub fn parse_document(
        &self,
        root: Node<'_, '_>,
        context: &mut ParseContext<'_>,
        data: &mut ConfigData,
    ) -> Result<()> {
        for child in element_children(root) {
            if has_tag_ignore_case(child, LOCATION_ELEMENT) && !self.should_parse_location(child) {
                tracing::debug!(
                    element = %describe_element(child),
                    path = get_attribute(child, LOCATION_PATH_ATTRIBUTE).unwrap_or_default(),
                    "Skipping location element"
                );
                continue;
            }

            if subtree_has_attribute(child, CONFIG_SOURCE_ATTRIBUTE) {
                self.parse_config_sources(child, context, data)?;
            }

            self.registry.dispatch(child, context, data)?;
        }

        Ok(())
    }

    /// Decide whether a `<location>` element applies to this application.
    ///
    /// Only `path="."` applies, and only when it is inherited by child
    /// applications or this is the top-level application.
    fn should_parse_location(&self, node: Node<'_, '_>) -> bool {
        let applies_to_self = get_attribute(node, LOCATION_PATH_ATTRIBUTE) == Some(LOCATION_PATH_SELF);
        let inherited = get_attribute(node, INHERIT_IN_CHILD_APPLICATIONS_ATTRIBUTE) == Some("true");

        applies_to_self && (inherited || !self.is_child_app)
    }

    /// Merge every file referenced by a `configSource` in the subtree of
    /// `element`.
    ///
    /// The referenced root lands at the nesting level of the referencing
    /// element: the names of the elements between `element` and the
    /// reference are pushed for the duration of the include.
    fn parse_config_sources(
        &self,
        element: Node<'_, '_>,
        context: &mut ParseContext<'_>,
        data: &mut ConfigData,
    ) -> Result<()> {
        let boundary = element.parent();

        for reference in element.descendants().filter(|n| n.is_element()) {
            let Some(config_source) = get_attribute(reference, CONFIG_SOURCE_ATTRIBUTE) else {
                continue;
            };

            let mut enclosing: Vec<&str> = reference
                .ancestors()
                .skip(1)
                .take_while(|n| Some(*n) != boundary)
                .map(get_tag_name)
                .collect();
            enclosing.reverse();

            let depth = context.depth();
            for name in enclosing {
                context.push(name);
            }
            let result = self.parse_config_source(config_source, context, data);
            context.truncate(depth);
            result?;
        }

        Ok(())
    }

    /// Load one referenced file and dispatch its root element.
    fn parse_config_source(
        &self,
        config_source: &str,
        context: &mut ParseContext<'_>,
        data: &mut ConfigData,
    ) -> Result<()> {
        let file = self
            .files
            .get_file(config_source)?
            .ok_or_else(|| ConfigError::file_not_found(config_source))?;

        tracing::debug!(
            config_source,
            path = %file.physical_path.display(),
            "Loading configSource"
        );

        let doc = Document::parse(&file.contents).map_err(|source| ConfigError::XmlParse {
            path: file.physical_path.display().to_string(),
            source,
        })?;
        let root = doc.root_element();

        if subtree_has_attribute(root, CONFIG_SOURCE_ATTRIBUTE) {
            self.parse_config_sources(root, context, data)?;
        }

        self.registry.dispatch(root, context, data)?;
        Ok(())
    }
}

/// Compare two directories, ignoring case and trailing separators.
fn same_directory(a: &Path, b: &Path) -> bool {
    fn normalize(path: &Path) -> String {
        let resolved: PathBuf = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        resolved
            .to_string_lossy()
            .trim_end_matches(['/', '\\'])
            .to_lowercase()
    }

    normalize(a) == normalize(b)
}
