//! Project ontology indexing for annotation validation.
//!
//! This crate turns the collaborator-supplied ontology snapshot and data-row
//! ids into the immutable lookup structures the validator reads:
//!
//! - **Snapshot types** (`snapshot`): serde model of the normalized ontology
//! - **Schema index** (`index`): feature schemas by id, with children and options
//! - **Data rows** (`data_rows`): the set of valid data-row ids

mod context;
mod data_rows;
mod index;
mod snapshot;

pub use context::ProjectContext;
pub use data_rows::DataRowSet;
pub use index::{FeatureSchema, SchemaIndex, SkippedEntry};
pub use snapshot::{ClassificationEntry, OntologySnapshot, OptionEntry, ToolEntry};
