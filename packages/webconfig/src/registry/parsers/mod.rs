//! Element parsers for web.config files.

mod key_value;

pub use key_value::*;
