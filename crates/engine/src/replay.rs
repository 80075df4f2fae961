//! Replay protection: per-signer nonce counters for single-recipient
//! operations and one-time codes for batch distributions.
//!
//! Checks (`expect_*`) are split from consumption (`consume_*`) so the guard
//! mutates only once every external leg of an operation has succeeded; a
//! failed operation never burns a nonce or a code.

use crate::error::EngineError;
use alloy_primitives::{Address, U256};
use std::collections::{HashMap, HashSet};

/// Nonce counters and spent spray codes.
#[derive(Debug, Clone, Default)]
pub struct ReplayGuard {
    nonces: HashMap<Address, u64>,
    used_codes: HashSet<String>,
}

impl ReplayGuard {
    /// Creates an empty guard; every signer starts at nonce 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// The signer's current counter.
    pub fn nonce_of(&self, signer: Address) -> u64 {
        self.nonces.get(&signer).copied().unwrap_or(0)
    }

    /// Fails with [`EngineError::NonceMismatch`] unless `supplied` equals
    /// the signer's current counter. Does not mutate.
    pub fn expect_nonce(&self, signer: Address, supplied: U256) -> Result<(), EngineError> {
        let expected = self.nonce_of(signer);
        if supplied == U256::from(expected) {
            Ok(())
        } else {
            Err(EngineError::NonceMismatch {
                expected,
                got: supplied.try_into().unwrap_or(u64::MAX),
            })
        }
    }

    /// Increments the signer's counter by exactly 1. Call only after the
    /// operation's external effects have succeeded.
    pub fn consume_nonce(&mut self, signer: Address) {
        *self.nonces.entry(signer).or_insert(0) += 1;
    }

    /// Fails with [`EngineError::CodeAlreadyUsed`] if `code` was consumed by
    /// an earlier batch. Does not mutate.
    pub fn expect_code_unused(&self, code: &str) -> Result<(), EngineError> {
        if self.used_codes.contains(code) {
            Err(EngineError::CodeAlreadyUsed)
        } else {
            Ok(())
        }
    }

    /// Permanently marks `code` as spent. Call only after the whole batch
    /// has settled.
    pub fn consume_code(&mut self, code: &str) {
        self.used_codes.insert(code.to_string());
    }
}

/// Fails with [`EngineError::Expired`] if `now` is past `deadline`.
/// Checked once at operation entry.
pub fn check_deadline(deadline: U256, now: u64) -> Result<(), EngineError> {
    if U256::from(now) > deadline {
        Err(EngineError::Expired)
    } else {
        Ok(())
    }
}
