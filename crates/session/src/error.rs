use bancnet_core::error::CoreError;

use crate::port::StoreError;

/// Errors that unwind a session operation.
///
/// Per-section persistence failures never appear here: the save loop
/// catches them at the section boundary and records them in the
/// [`crate::save::SaveReport`] instead. Only pool-identity failures
/// and programmer errors (malformed keys, unknown fields) propagate.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
