//! Ordered registry of element parsers.

use std::fmt;

use roxmltree::Node;

use super::parser::ElementParser;
use super::types::ParseContext;
use crate::data::ConfigData;
use crate::error::Result;
use crate::xml::describe_element;

/// Ordered list of element parsers.
///
/// Registration order is significant: an element is handed to the first
/// parser that claims it, and to no other.
pub struct ParserRegistry {
    parsers: Vec<Box<dyn ElementParser>>,
}

impl ParserRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            parsers: Vec::new(),
        }
    }

    /// Append a parser after all previously registered ones.
    pub fn register(&mut self, parser: impl ElementParser + 'static) {
        self.parsers.push(Box::new(parser));
    }

    /// Append an already boxed parser.
    pub fn register_boxed(&mut self, parser: Box<dyn ElementParser>) {
        self.parsers.push(parser);
    }

    /// Get the first parser that claims the element.
    #[must_use]
    pub fn find(&self, node: Node<'_, '_>) -> Option<&dyn ElementParser> {
        self.parsers
            .iter()
            .find(|p| p.can_parse(node))
            .map(|p| p.as_ref())
    }

    /// Hand an element to the first parser that claims it.
    ///
    /// An element no parser claims is reported as a warning and contributes
    /// nothing.
    ///
    /// # Returns
    /// `true` if a parser handled the element.
    ///
    /// # Errors
    /// Propagates errors from the handling parser.
    pub fn dispatch(
        &self,
        node: Node<'_, '_>,
        context: &mut ParseContext<'_>,
        data: &mut ConfigData,
    ) -> Result<bool> {
        let Some(parser) = self.find(node) else {
            context.warn(format!(
                "None of the parsers could parse {}",
                describe_element(node)
            ));
            return Ok(false);
        };

        tracing::trace!(
            parser = parser.name(),
            element = %describe_element(node),
            "Dispatching element"
        );
        parser.parse(node, context, data)?;
        Ok(true)
    }

    /// Names of the registered parsers, in order.
    #[must_use]
    pub fn parser_names(&self) -> Vec<&str> {
        self.parsers.iter().map(|p| p.name()).collect()
    }

    /// Number of registered parsers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parsers.len()
    }

    /// Whether no parser is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parsers.is_empty()
    }
}

impl Default for ParserRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ParserRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParserRegistry")
            .field("parsers", &self.parser_names())
            .finish()
    }
}
