//! Converts [Honeycomb](https://www.honeycomb.io/) boards into Go source code
//! for a board template registration system.
//!
//! A run fetches a board and every query it references, reshapes them into a
//! [`BoardTemplate`] (optionally replacing column names with declared
//! [`Variables`]), and generates a Go function returning that template.
//!
//! For the command line interface, see the `hny-btgen-cli` crate.

pub mod codegen;
mod config;
mod error;
pub mod honeycomb;
pub mod ops;
pub mod template;
mod transform;
mod variables;

pub use codegen::generate;
pub use config::{Config, DEFAULT_GRAPHIC, DEFAULT_SEQUENCE_NUMBER};
pub use error::Error;
pub use honeycomb::{BoardReader, HoneycombClient};
pub use template::{BoardTemplate, Column, QuerySpec, QueryTemplate};
pub use transform::{convert_board, query_spec, query_template};
pub use variables::{SupportedFormat, ValueProvider, VariableSpec, Variables};
