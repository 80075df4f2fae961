//! Primitive types for the Peniwallet settlement engine: the EIP-712 typed
//! payload schemas that off-chain signers authorize, the signing domain, and
//! signer recovery.

/// Typed payload schemas, signing domain and signer recovery.
pub mod payload;

/// Transaction-type enumeration and the fee multiplier table keyed by it.
pub mod types;

pub use payload::{
    signing_domain, Eip712Payload, SprayTransaction, SwapTransaction, TransferTransaction,
    DOMAIN_NAME, DOMAIN_VERSION,
};
pub use types::{FeeMultipliers, TransactionType};
