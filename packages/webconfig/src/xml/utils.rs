//! XML utility functions for navigating configuration DOM trees.

use roxmltree::Node;

/// Get the tag name without namespace prefix.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use webconfig::xml::get_tag_name;
///
/// let xml = r#"<configuration><appSettings/></configuration>"#;
/// let doc = Document::parse(xml).unwrap();
/// let app_settings = doc.root_element().first_element_child().unwrap();
/// assert_eq!(get_tag_name(app_settings), "appSettings");
/// ```
pub fn get_tag_name<'a>(node: Node<'a, '_>) -> &'a str {
    node.tag_name().name()
}

/// Check if a node is an element with the given tag name, ignoring case.
pub fn has_tag_ignore_case(node: Node<'_, '_>, tag: &str) -> bool {
    node.is_element() && get_tag_name(node).eq_ignore_ascii_case(tag)
}

/// Get all element children of a node.
///
/// # Returns
/// Iterator over element children (excludes text nodes, comments, etc.)
pub fn element_children<'a, 'input>(
    node: Node<'a, 'input>,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(|child| child.is_element())
}

/// Check if a node has at least one element child.
pub fn has_element_children(node: Node<'_, '_>) -> bool {
    node.children().any(|child| child.is_element())
}

/// Get an attribute value from a node.
///
/// # Returns
/// Attribute value, or `None` if not found
pub fn get_attribute<'a>(node: Node<'a, '_>, name: &str) -> Option<&'a str> {
    node.attribute(name)
}

/// Check if the node or any of its descendant elements carries `attribute`.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use webconfig::xml::subtree_has_attribute;
///
/// let xml = r#"<appSettings><add key="a" value="b"/></appSettings>"#;
/// let doc = Document::parse(xml).unwrap();
/// assert!(subtree_has_attribute(doc.root_element(), "key"));
/// assert!(!subtree_has_attribute(doc.root_element(), "name"));
/// ```
pub fn subtree_has_attribute(node: Node<'_, '_>, attribute: &str) -> bool {
    node.descendants()
        .any(|n| n.is_element() && n.attribute(attribute).is_some())
}

/// Check if the node or any of its descendant elements is named one of
/// `tags`, ignoring case.
pub fn subtree_has_tag(node: Node<'_, '_>, tags: &[&str]) -> bool {
    node.descendants()
        .any(|n| tags.iter().any(|tag| has_tag_ignore_case(n, tag)))
}

/// Short description of an element for log messages, e.g.
/// `<appSettings> at line 3`.
pub fn describe_element(node: Node<'_, '_>) -> String {
    let pos = node.document().text_pos_at(node.range().start);
    format!("<{}> at line {}", get_tag_name(node), pos.row)
}
