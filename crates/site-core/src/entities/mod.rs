//! Entity structs for sitelog domain objects.
//!
//! `Issue` maps to a document in the `issues` collection of the document store.
//! All structs derive `Serialize`, `Deserialize`, and `JsonSchema` for JSON
//! roundtrip and schema validation.

mod issue;

pub use issue::{Issue, IssueDraft};
