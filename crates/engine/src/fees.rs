//! Tiered fee policy: multiplier lookup, minimum-fee floor, and the
//! dev/primary revenue split.

use crate::error::EngineError;
use alloy_primitives::{Address, U256};
use peniwallet_primitives::{FeeMultipliers, TransactionType};
use std::collections::HashMap;

/// Fixed-point denominator for fee multipliers (parts per 10,000).
pub const FEE_SCALE: u64 = 10_000;

/// How a collected fee is divided between the two recipients.
///
/// `dev + primary` always equals the collected fee exactly; the floor-division
/// remainder is absorbed by the primary leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeSplit {
    /// Share routed to the dev wallet.
    pub dev: U256,
    /// Share routed to the primary recipient.
    pub primary: U256,
}

/// Fee configuration and per-token recipient overrides.
#[derive(Debug, Clone)]
pub struct FeePolicy {
    /// Floor applied when the computed fee would be below it. Denominated in
    /// the same unit as the amount being charged.
    pub min_fee: U256,
    /// Multipliers per transaction class.
    pub multipliers: FeeMultipliers,
    /// Percentage of each fee routed to the dev wallet, 0–100.
    pub dev_fee_share: u8,
    /// Default primary fee recipient.
    pub fee_wallet: Address,
    /// Secondary fee recipient.
    pub dev_wallet: Address,
    /// Per-token primary-recipient overrides for registered partner tokens.
    pub projects: HashMap<Address, Address>,
}

impl FeePolicy {
    /// Fee for moving `amount` as a `tx_type` operation.
    ///
    /// Pure: `floor(amount * multiplier / 10_000)`, clamped from below by
    /// `min_fee`. The result is denominated in the same unit as `amount`;
    /// no unit conversion happens here. `gas_estimate` is an advisory
    /// relayer hint and does not enter the computation.
    pub fn estimate_fees(
        &self,
        _token: Address,
        amount: U256,
        tx_type: TransactionType,
        _gas_estimate: u64,
    ) -> U256 {
        let raw =
            amount.saturating_mul(U256::from(self.multipliers.get(tx_type))) / U256::from(FEE_SCALE);
        raw.max(self.min_fee)
    }

    /// Splits `fee` into dev and primary legs. The legs sum to `fee`
    /// exactly for every share in 0–100.
    pub fn split_fee(&self, fee: U256) -> FeeSplit {
        let dev = fee.saturating_mul(U256::from(self.dev_fee_share)) / U256::from(100u64);
        FeeSplit {
            dev,
            primary: fee - dev,
        }
    }

    /// Primary fee recipient for `token`: the registered project override if
    /// present, the default fee wallet otherwise.
    pub fn fee_recipient(&self, token: Address) -> Address {
        self.projects.get(&token).copied().unwrap_or(self.fee_wallet)
    }

    /// Sets the dev fee share, rejecting values above 100 percent.
    pub fn set_dev_fee_share(&mut self, percent: u8) -> Result<(), EngineError> {
        if percent > 100 {
            return Err(EngineError::InvalidRange(format!(
                "dev fee share {percent} > 100"
            )));
        }
        self.dev_fee_share = percent;
        Ok(())
    }
}
