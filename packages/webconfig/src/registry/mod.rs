//! Parser registry system for extensible configuration parsing.
//!
//! Elements are offered to an ordered list of parsers; the first parser
//! that claims an element flattens it into the result store. The
//! [`ParseEngine`] walks the document, applies `<location>` scoping and
//! merges `configSource` files before dispatching.

mod config;
mod core;
mod engine;
mod parser;
pub mod parsers;
mod types;

pub use config::create_default_registry;
pub use core::ParserRegistry;
pub use engine::ParseEngine;
pub use parser::ElementParser;
pub use types::{Action, ParseContext};
