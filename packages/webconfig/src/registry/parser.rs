//! Element parser trait definition.

use roxmltree::Node;

use super::types::ParseContext;
use crate::data::ConfigData;
use crate::error::Result;

/// Trait for element parsers.
///
/// Parsers are registered in a [`ParserRegistry`](super::ParserRegistry) and
/// tried in order; the first one whose [`can_parse`](Self::can_parse)
/// returns true handles the element and writes its entries into the store.
pub trait ElementParser: Send + Sync {
    /// Short name used in log messages.
    fn name(&self) -> &str;

    /// Check if this parser claims the given element.
    fn can_parse(&self, node: Node<'_, '_>) -> bool;

    /// Process the element and write the resulting entries to `data`.
    ///
    /// # Arguments
    /// * `node` - The XML element to process
    /// * `context` - Enclosing element names and diagnostics sink
    /// * `data` - Store receiving the flattened entries
    ///
    /// # Errors
    /// Errors abort the whole load; recoverable problems should be reported
    /// through `context` instead.
    fn parse(
        &self,
        node: Node<'_, '_>,
        context: &mut ParseContext<'_>,
        data: &mut ConfigData,
    ) -> Result<()>;
}
