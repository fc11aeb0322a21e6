//! Default registry configuration for web.config style files.

use super::core::ParserRegistry;
use super::parsers::KeyValueParser;
use crate::config::{CONNECTION_STRING_KEY_ATTRIBUTE, CONNECTION_STRING_VALUE_ATTRIBUTE};

/// Create the default registry.
///
/// Contains two key/value parsers, tried in this order:
/// - `key`/`value`: `<appSettings>` style `<add key=".." value=".."/>`
/// - `name`/`connectionString`: `<connectionStrings>` entries
///
/// Extension parsers are appended after these.
#[must_use]
pub fn create_default_registry() -> ParserRegistry {
    let mut registry = ParserRegistry::new();

    registry.register(KeyValueParser::default());
    registry.register(KeyValueParser::new(
        CONNECTION_STRING_KEY_ATTRIBUTE,
        CONNECTION_STRING_VALUE_ATTRIBUTE,
    ));

    registry
}
