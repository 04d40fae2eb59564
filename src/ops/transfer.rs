use crate::model::task::Task;

/// Error type for JSON export/import
#[derive(Debug, thiserror::Error)]
pub enum TransferError {
    #[error("not a JSON array of tasks: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Serialize the collection as a pretty-printed JSON array.
pub fn export_json(tasks: &[Task]) -> Result<String, TransferError> {
    Ok(serde_json::to_string_pretty(tasks)?)
}

/// Parse a JSON array of task records. Pure string→collection conversion,
/// no schema versioning.
pub fn import_json(json: &str) -> Result<Vec<Task>, TransferError> {
    Ok(serde_json::from_str(json)?)
}
