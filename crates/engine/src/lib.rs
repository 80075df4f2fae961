//! Meta-transaction settlement engine.
//!
//! Lets a relayer submit pre-signed, off-chain-authorized instructions
//! (transfers, swaps, batch distributions, native top-ups) on behalf of
//! signers who never pay network fees themselves, while the engine verifies
//! authorization, prevents replay, and deducts service fees before the
//! underlying asset movement.

/// Privileged-account registry gating configuration mutators.
pub mod admin;

/// Interfaces to the external transfer/swap collaborators.
pub mod collaborators;

/// Deployment configuration.
pub mod config;

/// The engine state machine and settlement operations.
pub mod engine;

/// Error taxonomy surfaced to relayers.
pub mod error;

/// Observable side effects.
pub mod events;

/// Tiered fee policy.
pub mod fees;

/// Nonce/deadline/code replay protection.
pub mod replay;

pub use admin::AdminRegistry;
pub use collaborators::{NativeLedger, RouterError, SwapRouter, TokenError, TokenLedger};
pub use config::{parse_engine_config, ConfigError, EngineConfig};
pub use engine::{
    CallContext, Peniwallet, SprayReceipt, SwapReceipt, TransferReceipt, MAX_SPRAY_RECIPIENTS,
};
pub use error::EngineError;
pub use events::Event;
pub use fees::{FeePolicy, FeeSplit, FEE_SCALE};
pub use replay::{check_deadline, ReplayGuard};
