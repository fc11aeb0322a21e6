//! Vocabulary of the configuration file format.
//!
//! Element and attribute names the loader understands. Element names are
//! matched case-insensitively, attribute names exactly.

/// Delimiter between the segments of a flattened configuration key.
pub const KEY_DELIMITER: &str = ":";

/// Key attribute of the default `<add key=".." value=".."/>` parser.
pub const DEFAULT_KEY_ATTRIBUTE: &str = "key";

/// Value attribute of the default `<add key=".." value=".."/>` parser.
pub const DEFAULT_VALUE_ATTRIBUTE: &str = "value";

/// Key attribute used by `<connectionStrings>` entries.
pub const CONNECTION_STRING_KEY_ATTRIBUTE: &str = "name";

/// Value attribute used by `<connectionStrings>` entries.
pub const CONNECTION_STRING_VALUE_ATTRIBUTE: &str = "connectionString";

/// Attribute naming an external file whose root element is merged in.
pub const CONFIG_SOURCE_ATTRIBUTE: &str = "configSource";

/// Scoping wrapper element.
pub const LOCATION_ELEMENT: &str = "location";

/// Path attribute of a `<location>` element.
pub const LOCATION_PATH_ATTRIBUTE: &str = "path";

/// Only `<location path=".">` applies to the application itself.
pub const LOCATION_PATH_SELF: &str = ".";

/// Inheritance attribute of a `<location>` element.
pub const INHERIT_IN_CHILD_APPLICATIONS_ATTRIBUTE: &str = "inheritInChildApplications";
