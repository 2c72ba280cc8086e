//! Fatal error types for the merge engine.
//!
//! Only document-level impossibility fails a merge: having nothing to
//! process, or the external container writer rejecting output. Everything
//! else degrades to literal text plus a diagnostic (see
//! [`super::diagnostics`]).

use std::io;

use thiserror::Error;

/// An error that aborts the whole merge operation.
#[derive(Debug, Error)]
pub enum MergeError {
    /// The document carried no template parts at all.
    #[error("no template parts were present to process")]
    NoPartsProcessed,

    /// The external container writer rejected a transformed part.
    #[error("failed to write part '{part}': {source}")]
    PartWrite {
        part: String,
        #[source]
        source: io::Error,
    },
}
