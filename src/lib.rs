//! Document key generation for bulk JSON import.
//!
//! The expression engine lives in [`dockey_keygen`]; this crate wires it up with
//! configuration, batch processing and thread-safe sharing.
//!
//! # Example
//!
//! ```
//! use dockey::KeyGeneratorBuilder;
//!
//! let mut assigner = KeyGeneratorBuilder::new()
//!     .with_expression("user::%id%::#MONO_INCR#")
//!     .with_ignore_fields(["id"])
//!     .build()?;
//!
//! let keyed = assigner.assign(br#"{"id": "alice", "age": 30}"#)?;
//! assert_eq!(keyed.key, b"user::alice::1");
//! assert_eq!(keyed.body, br#"{"age":30}"#);
//! # Ok::<(), dockey::DockeyError>(())
//! ```

mod assigner;
mod builder;
pub mod config;
pub mod error;
mod shared;

pub use assigner::{BatchReport, DocumentFailure, KeyAssigner, KeyedDocument};
pub use builder::KeyGeneratorBuilder;
pub use config::KeygenConfig;
pub use error::DockeyError;
pub use shared::SharedKeyGenerator;

pub use dockey_keygen as keygen;
pub use dockey_keygen::{
    Delimiters, FieldLookup, FieldPath, FieldPathError, JsonLookup, KeygenError, LookupValue,
    MAX_KEY_SIZE, Pipeline, compile,
};
