//! `eachmap_core` expands `@each-in-map` stylesheet directives. Each
//! directive loops over a named table from a JSON maps document and is
//! rewritten into a plain `@each` loop with the table's keys and values
//! spelled out, ready for the next stylesheet compiler in the chain.
//!
//! ## Processing Pipeline
//!
//! ```text
//! Stylesheet source
//!   → Lexer (logos tokens: whitespace, comments, strings, braces, words)
//!   → Parser (lossless tree of at-rules, rules, declarations and comments)
//!   → Walker (visits every `@each-in-map` at-rule in document order)
//!   → Header (validates and parses `$key, $value in table`)
//!   → Projection (turns the table into key and value columns)
//!   → Render (prints the `@each` params)
//!   → Printer (writes the tree back out)
//! ```
//!
//! ## Example
//!
//! Given `maps.json`:
//!
//! ```json
//! { "display_types": { "None": "none", "Flex": "flex" } }
//! ```
//!
//! the directive
//!
//! ```css
//! @each-in-map $name, $type in display_types {
//!   .d-$(name) { display: $type; }
//! }
//! ```
//!
//! becomes
//!
//! ```css
//! @each $name, $type in (None, Flex), (none, flex) {
//!   .d-$(name) { display: $type; }
//! }
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use eachmap_core::EachInMap;
//! use eachmap_core::EachInMapOptions;
//!
//! let processor = EachInMap::new(EachInMapOptions::new("styles"));
//! let css = processor.process("@each-in-map $k, $v in colors { }").unwrap();
//! println!("{css}");
//! ```

pub use config::*;
pub use error::*;
pub use expander::*;
pub use header::*;
pub use parser::*;
pub use position::*;
pub use projection::*;
pub use render::*;
pub use stylesheet::*;
pub use tables::*;

pub mod config;
#[allow(unused_assignments)]
mod error;
mod expander;
mod header;
pub(crate) mod lexer;
mod parser;
mod position;
mod projection;
mod render;
mod stylesheet;
mod tables;

#[cfg(test)]
mod __fixtures;
