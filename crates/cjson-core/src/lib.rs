//! # cjson-core
//!
//! A JSON value tree with a recursive-descent parser and an indented serializer.
//!
//! [`Json`] is a single owned node type over null, boolean, integer, real,
//! string, array and object. Nodes exclusively own their children, so cloning
//! is a deep copy and replacing a value drops its old subtree.
//!
//! ## Quick start
//!
//! ```rust
//! use cjson_core::Json;
//!
//! // Text → tree
//! let mut json = Json::new();
//! json.parse(r#"{"key1": 56, "key2": [1, 2, 3]}"#).unwrap();
//! assert!(json.contains("key2").unwrap());
//! assert_eq!(json["key2"].len().unwrap(), 3);
//!
//! // Build and mutate
//! let mut config = Json::new();
//! config["on"] = true.into();
//! config["sizes"] = Json::from([2, 3, 4]);
//!
//! // Tree → text (tab-indented, keys in sorted order)
//! assert_eq!(
//!     config.serialize(),
//!     "{\n\t\"on\": true,\n\t\"sizes\": [\n\t\t2,\n\t\t3,\n\t\t4\n\t]\n}"
//! );
//! ```
//!
//! ## Modules
//!
//! - [`value`]: the `Json` node (construction, predicates, extraction, access)
//! - [`iter`]: iterators over a node's direct children
//! - [`parser`]: JSON text → `Json`
//! - [`serializer`]: `Json` → JSON text (indented or compact)
//! - [`error`]: Error type shared by all of the above

pub mod error;
pub mod iter;
pub mod parser;
#[cfg(feature = "serde")]
mod serde_impl;
pub mod serializer;
pub mod value;

pub use error::{JsonError, Result};
pub use iter::{Iter, IterMut};
pub use parser::{parse, Parser, ParserConfig};
pub use serializer::{to_string, to_string_compact, Indent, Layout, Serializer};
pub use value::{Json, Kind, Map};
