//! Parser for `<add>` / `<remove>` key/value elements.
//!
//! Container elements contribute their tag name as a key segment, leaf
//! `<add>` and `<remove>` elements apply their action to the flattened key:
//!
//! ```xml
//! <appSettings>
//!   <add key="Theme" value="dark"/>   <!-- appSettings:Theme = dark -->
//!   <remove key="Legacy"/>            <!-- erases appSettings:Legacy -->
//! </appSettings>
//! ```

use roxmltree::Node;

use crate::config::{DEFAULT_KEY_ATTRIBUTE, DEFAULT_VALUE_ATTRIBUTE};
use crate::data::ConfigData;
use crate::error::Result;
use crate::registry::parser::ElementParser;
use crate::registry::types::{Action, ParseContext};
use crate::xml::{
    describe_element, element_children, get_attribute, get_tag_name, has_element_children,
    subtree_has_attribute, subtree_has_tag,
};

/// Key/value parser with configurable attribute names.
///
/// Claims any element whose subtree carries the key attribute.
#[derive(Debug, Clone)]
pub struct KeyValueParser {
    name: String,
    key_attribute: String,
    value_attribute: String,
}

impl KeyValueParser {
    /// Create a parser reading keys from `key_attribute` and values from
    /// `value_attribute`.
    #[must_use]
    pub fn new(key_attribute: impl Into<String>, value_attribute: impl Into<String>) -> Self {
        let key_attribute = key_attribute.into();
        let value_attribute = value_attribute.into();
        Self {
            name: format!("{key_attribute}/{value_attribute}"),
            key_attribute,
            value_attribute,
        }
    }

    /// Attribute naming the key of an action element.
    #[must_use]
    pub fn key_attribute(&self) -> &str {
        &self.key_attribute
    }

    /// Attribute holding the value of an `<add>` element.
    #[must_use]
    pub fn value_attribute(&self) -> &str {
        &self.value_attribute
    }

    fn parse_element(
        &self,
        node: Node<'_, '_>,
        context: &mut ParseContext<'_>,
        data: &mut ConfigData,
    ) {
        if !has_element_children(node) {
            self.apply_action(node, context, data);
            return;
        }

        context.push(get_tag_name(node));

        for child in element_children(node) {
            if !subtree_has_tag(child, &Action::TAGS) {
                context.warn(format!(
                    "Contains an unsupported config element {}",
                    describe_element(child)
                ));
                continue;
            }

            self.parse_element(child, context, data);
        }

        context.pop();
    }

    /// Apply a leaf element's action to the store.
    fn apply_action(
        &self,
        node: Node<'_, '_>,
        context: &mut ParseContext<'_>,
        data: &mut ConfigData,
    ) {
        let action = match get_tag_name(node).parse::<Action>() {
            Ok(action) => action,
            Err(err) => {
                context.info(format!("{err} in {}", describe_element(node)));
                return;
            }
        };

        let Some(key) = get_attribute(node, &self.key_attribute) else {
            context.info(format!(
                "{} is not supported because it does not have a '{}' attribute",
                describe_element(node),
                self.key_attribute
            ));
            return;
        };

        let full_key = context.key(key);

        match action {
            Action::Add => {
                let Some(value) = get_attribute(node, &self.value_attribute) else {
                    context.warn(format!(
                        "Could not read the value attribute '{}' from {}, skipping {full_key}",
                        self.value_attribute,
                        describe_element(node)
                    ));
                    return;
                };

                if let Some(previous) = data.insert(full_key.as_str(), value) {
                    context.warn(format!(
                        "{full_key} exists. Replacing existing value [{previous}] with [{value}]"
                    ));
                }
            }
            Action::Remove => {
                if data.remove(&full_key).is_some() {
                    tracing::debug!(key = %full_key, "Removed key");
                }
            }
        }
    }
}

impl Default for KeyValueParser {
    fn default() -> Self {
        Self::new(DEFAULT_KEY_ATTRIBUTE, DEFAULT_VALUE_ATTRIBUTE)
    }
}

impl ElementParser for KeyValueParser {
    fn name(&self) -> &str {
        &self.name
    }

    fn can_parse(&self, node: Node<'_, '_>) -> bool {
        subtree_has_attribute(node, &self.key_attribute)
    }

    fn parse(
        &self,
        node: Node<'_, '_>,
        context: &mut ParseContext<'_>,
        data: &mut ConfigData,
    ) -> Result<()> {
        self.parse_element(node, context, data);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{DiagnosticCollector, DiagnosticLevel};
    use pretty_assertions::assert_eq;
    use roxmltree::Document;

    fn parse_with(parser: &KeyValueParser, xml: &str) -> (ConfigData, DiagnosticCollector) {
        let doc = Document::parse(xml).unwrap();
        let mut collector = DiagnosticCollector::new();
        let mut data = ConfigData::new();
        {
            let mut context = ParseContext::new().with_diagnostics(&mut collector);
            parser
                .parse(doc.root_element(), &mut context, &mut data)
                .unwrap();
            assert!(context.sections().is_empty());
        }
        (data, collector)
    }

    fn parse(xml: &str) -> (ConfigData, DiagnosticCollector) {
        parse_with(&KeyValueParser::default(), xml)
    }

    fn entries(data: &ConfigData) -> Vec<(String, String)> {
        data.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_top_level_add() {
        let (data, _) = parse(r#"<add key="A" value="V"/>"#);
        assert_eq!(data.get("A"), Some("V"));
    }

    #[test]
    fn test_nested_add() {
        let (data, _) = parse(r#"<appSettings><add key="k" value="v"/></appSettings>"#);
        assert_eq!(entries(&data), vec![("appSettings:k".into(), "v".into())]);
        assert_eq!(data.get("APPSETTINGS:K"), Some("v"));
    }

    #[test]
    fn test_deeply_nested_add() {
        let (data, _) = parse(
            r#"<system.web><pages><namespaces><add key="ns" value="System.Linq"/></namespaces></pages></system.web>"#,
        );
        assert_eq!(data.get("system.web:pages:namespaces:ns"), Some("System.Linq"));
    }

    #[test]
    fn test_remove_after_add() {
        let (data, _) = parse(
            r#"<appSettings>
                <add key="A" value="1"/>
                <add key="B" value="2"/>
                <remove key="a"/>
            </appSettings>"#,
        );
        assert_eq!(entries(&data), vec![("appSettings:B".into(), "2".into())]);
    }

    #[test]
    fn test_remove_absent_key_is_noop() {
        let (data, collector) = parse(
            r#"<appSettings><add key="A" value="1"/><remove key="Missing"/></appSettings>"#,
        );
        assert_eq!(data.len(), 1);
        assert!(collector.is_empty());
    }

    #[test]
    fn test_duplicate_add_last_write_wins() {
        let (data, collector) = parse(
            r#"<appSettings><add key="Theme" value="dark"/><add key="THEME" value="light"/></appSettings>"#,
        );
        assert_eq!(
            entries(&data),
            vec![("appSettings:Theme".into(), "light".into())]
        );
        let warnings: Vec<_> = collector.warnings().collect();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].message.contains("Replacing existing value [dark] with [light]"));
    }

    #[test]
    fn test_add_without_value_is_skipped() {
        let (data, collector) = parse(r#"<appSettings><add key="Theme"/></appSettings>"#);
        assert!(data.is_empty());
        assert_eq!(collector.warnings().count(), 1);
    }

    #[test]
    fn test_add_with_empty_value_is_kept() {
        let (data, _) = parse(r#"<appSettings><add key="Theme" value=""/></appSettings>"#);
        assert_eq!(data.get("appSettings:Theme"), Some(""));
    }

    #[test]
    fn test_add_without_key_is_skipped() {
        let (data, collector) = parse(
            r#"<appSettings><add key="A" value="1"/><add value="orphan"/></appSettings>"#,
        );
        assert_eq!(data.len(), 1);
        let diagnostic = &collector.diagnostics()[0];
        assert_eq!(diagnostic.level, DiagnosticLevel::Info);
        assert!(diagnostic.message.contains("'key' attribute"));
    }

    #[test]
    fn test_unsupported_leaf_action() {
        let (data, collector) = parse(r#"<clear key="A" value="1"/>"#);
        assert!(data.is_empty());
        assert_eq!(collector.diagnostics()[0].level, DiagnosticLevel::Info);
        assert!(collector.diagnostics()[0]
            .message
            .contains("Unsupported action: [clear]"));
    }

    #[test]
    fn test_action_names_ignore_case() {
        let (data, _) = parse(
            r#"<appSettings><ADD key="A" value="1"/><Add key="B" value="2"/><Remove key="A"/></appSettings>"#,
        );
        assert_eq!(entries(&data), vec![("appSettings:B".into(), "2".into())]);
    }

    #[test]
    fn test_children_without_actions_are_skipped() {
        let (data, collector) = parse(
            r#"<appSettings>
                <clear/>
                <section><item key="x" value="y"/></section>
                <add key="A" value="1"/>
            </appSettings>"#,
        );
        assert_eq!(entries(&data), vec![("appSettings:A".into(), "1".into())]);
        assert_eq!(collector.warnings().count(), 2);
    }

    #[test]
    fn test_connection_string_parser() {
        let parser = KeyValueParser::new("name", "connectionString");
        let (data, _) = parse_with(
            &parser,
            r#"<connectionStrings>
                <add name="Default" connectionString="Server=.;Database=App" providerName="System.Data.SqlClient"/>
            </connectionStrings>"#,
        );
        assert_eq!(
            data.get("connectionStrings:Default"),
            Some("Server=.;Database=App")
        );
    }

    #[test]
    fn test_can_parse() {
        let parser = KeyValueParser::default();
        let doc = Document::parse(
            r#"<root><appSettings><add key="a" value="b"/></appSettings><connectionStrings><add name="c" connectionString="d"/></connectionStrings></root>"#,
        )
        .unwrap();
        let mut children = element_children(doc.root_element());
        let app_settings = children.next().unwrap();
        let connection_strings = children.next().unwrap();

        assert!(parser.can_parse(app_settings));
        assert!(!parser.can_parse(connection_strings));
        assert_eq!(parser.name(), "key/value");
        assert_eq!(parser.key_attribute(), "key");
        assert_eq!(parser.value_attribute(), "value");
    }

    #[test]
    fn test_keys_come_only_from_adds() {
        let (data, _) = parse(
            r#"<root>
                <a><add key="one" value="1"/><remove key="two"/></a>
                <b><remove key="three"/><add key="four" value="4"/><remove key="four"/></b>
                <c><add key="five"/></c>
            </root>"#,
        );
        let keys: Vec<_> = data.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["root:a:one"]);
    }
}
