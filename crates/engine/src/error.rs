use crate::collaborators::{RouterError, TokenError};
use thiserror::Error;

/// Errors surfaced to the relayer. Every variant aborts the whole operation
/// with no partial state change; a failed call never consumes a nonce or
/// spray code, so resubmission is always safe.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    /// Admin-gated call from a non-admin, non-owner caller.
    #[error("caller is not an admin")]
    Unauthorized,
    /// Policy value outside its allowed bounds.
    #[error("value out of range: {0}")]
    InvalidRange(String),
    /// Payload deadline is in the past.
    #[error("authorization expired")]
    Expired,
    /// Supplied nonce does not match the signer's current counter.
    #[error("nonce mismatch: expected {expected}, got {got}")]
    NonceMismatch {
        /// The signer's current counter.
        expected: u64,
        /// The nonce carried by the payload.
        got: u64,
    },
    /// Spray code was consumed by an earlier successful batch.
    #[error("spray code already used")]
    CodeAlreadyUsed,
    /// Recovered signer does not match the payload's declared signer.
    #[error("invalid signature")]
    InvalidSignature,
    /// Signer balance does not cover the operation.
    #[error("insufficient balance")]
    InsufficientBalance,
    /// Engine allowance does not cover the operation.
    #[error("insufficient allowance")]
    InsufficientAllowance,
    /// Computed fee exceeds the authorized amount.
    #[error("fee exceeds amount")]
    FeeExceedsAmount,
    /// Spray payload carries no recipients.
    #[error("empty batch")]
    EmptyBatch,
    /// Spray recipient count exceeds the enforced bound.
    #[error("batch limit exceeded: {got} recipients, limit {limit}")]
    BatchLimitExceeded {
        /// Recipients carried by the payload.
        got: usize,
        /// The bound in effect for this call.
        limit: usize,
    },
    /// A collaborator call failed for an infrastructure-level reason.
    #[error("external call failure: {0}")]
    ExternalCallFailure(String),
}

impl From<TokenError> for EngineError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::InsufficientBalance => Self::InsufficientBalance,
            TokenError::InsufficientAllowance => Self::InsufficientAllowance,
            TokenError::Other(msg) => Self::ExternalCallFailure(msg),
        }
    }
}

impl From<RouterError> for EngineError {
    fn from(err: RouterError) -> Self {
        Self::ExternalCallFailure(err.to_string())
    }
}
