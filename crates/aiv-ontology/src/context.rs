use crate::data_rows::DataRowSet;
use crate::index::SchemaIndex;

/// Immutable project state a batch is validated against.
///
/// Both parts are materialized by the caller before the run starts; nothing
/// here performs I/O.
#[derive(Debug, Clone, Default)]
pub struct ProjectContext {
    pub schemas: SchemaIndex,
    pub data_rows: DataRowSet,
}

impl ProjectContext {
    pub fn new(schemas: SchemaIndex, data_rows: DataRowSet) -> Self {
        Self { schemas, data_rows }
    }
}
