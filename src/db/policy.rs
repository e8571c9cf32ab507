use serde::{Deserialize, Serialize};

use crate::error::{NotFound, Result};

/// What search and ranking queries do when the store returns no rows.
///
/// `Error` reports an empty result as [`NotFound`]; `Allow` hands back the
/// empty vector instead.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyResults {
    #[default]
    Error,
    Allow,
}

impl EmptyResults {
    /// Pass `rows` through, or turn an empty set into the error built by
    /// `missing` when the policy says so.
    pub(crate) fn check<T>(self, rows: Vec<T>, missing: impl FnOnce() -> NotFound) -> Result<Vec<T>> {
        if rows.is_empty() && self == EmptyResults::Error {
            Err(missing().into())
        } else {
            Ok(rows)
        }
    }
}
