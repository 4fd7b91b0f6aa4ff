//! Error classification for process exit codes.

use crate::storage::StorageError;
use crate::triggers::ResetError;
use thiserror::Error;

/// Problem the operator can fix: configuration, parameters, credentials.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct UserError(pub String);

impl UserError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

pub const EXIT_USER: u8 = 1;
pub const EXIT_INTERNAL: u8 = 2;

/// 1 for user-facing errors, 2 for everything else, including failures the
/// Storage API reports.
pub fn exit_code(err: &anyhow::Error) -> u8 {
    // Also matches a `UserError` attached with `.context(..)`.
    if err.downcast_ref::<UserError>().is_some() || err.chain().any(|cause| cause.is::<UserError>())
    {
        EXIT_USER
    } else {
        EXIT_INTERNAL
    }
}

/// The Storage API failure behind `err`, if any.
pub fn storage_failure(err: &anyhow::Error) -> Option<&StorageError> {
    err.chain().find_map(|cause| {
        cause.downcast_ref::<StorageError>().or_else(|| {
            cause
                .downcast_ref::<ResetError>()
                .map(ResetError::storage_error)
        })
    })
}

/// Blame missing credentials for Storage API failures; other errors pass
/// through unchanged.
pub fn with_credentials_hint(err: anyhow::Error, credentials_complete: bool) -> anyhow::Error {
    if credentials_complete || storage_failure(&err).is_none() {
        return err;
    }
    err.context(UserError::new(
        "Storage API credentials missing: set KBC_TOKEN and KBC_URL",
    ))
}
