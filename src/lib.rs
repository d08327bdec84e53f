//! HOCON to JSON conversion: parse, merge includes, resolve substitutions,
//! project onto JSON.
//!
//! ```
//! use hocon_json::HoconConfig;
//!
//! let config = HoconConfig::from_str("a = 1\nb { c = ${a} }")?;
//! assert_eq!(config.to_json_string()?, r#"{"a":"1","b":{"c":"1"}}"#);
//! # Ok::<(), hocon_json::HoconError>(())
//! ```

pub mod ast;
pub mod config;
pub mod error;
pub mod export;
pub mod include;
pub mod lexer;
pub mod merge;
pub mod parser;
pub mod resolver;

pub use ast::{Object, Root, Substitution, Value};
pub use config::HoconConfig;
pub use error::HoconError;
pub use export::project;
pub use include::{IncludeResolver, IncludeSpec, Includer};
pub use resolver::resolve;
