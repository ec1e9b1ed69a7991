use thiserror::Error;

/// Failure reading a persisted record.
///
/// Only one variant exists: a slot held data that does not parse as the
/// expected shape. Missing slots are not errors — every load path has a
/// default for absence.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("malformed `{key}` record: {source}")]
    Corrupt {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    pub(crate) fn corrupt(key: &'static str, source: serde_json::Error) -> Self {
        StoreError::Corrupt { key, source }
    }

    /// The storage key whose record failed to parse.
    pub fn key(&self) -> &'static str {
        match self {
            StoreError::Corrupt { key, .. } => key,
        }
    }
}
