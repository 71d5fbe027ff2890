//! TOML-based rule store
//!
//! Implements `RuleStore` using rule files.
//!
//! - [`parser`] - Read and deserialize rule files (bundled or on disk)
//! - [`repository`] - `RuleStore` implementation

pub mod parser;
pub mod repository;

pub use parser::{BUILTIN_RULES, RuleFile, load_file, parse_str};
pub use repository::TomlRuleStore;
