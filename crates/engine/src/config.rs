use alloy_primitives::{Address, U256};
use peniwallet_primitives::FeeMultipliers;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Default minimum fee floor.
pub const DEFAULT_MIN_FEE: u64 = 100;
/// Default dev share of collected fees, in percent.
pub const DEFAULT_DEV_FEE_SHARE: u8 = 50;

/// Errors raised while reading engine configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The extras blob carries no `peniwallet` section.
    #[error("missing peniwallet config in extras")]
    Missing,
    /// The section exists but does not deserialize.
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Deployment-time engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Chain the signing domain binds to.
    pub chain_id: u64,
    /// Engine address; doubles as the EIP-712 `verifyingContract` and the
    /// allowance spender.
    pub verifying_contract: Address,
    /// Wrapped-native token used as the first hop of native-input swaps.
    pub wrapped_native: Address,
    /// Default primary fee recipient.
    pub fee_wallet: Address,
    /// Secondary fee recipient.
    pub dev_wallet: Address,
    /// Minimum fee floor.
    #[serde(default = "default_min_fee")]
    pub min_fee: U256,
    /// Fee multipliers per transaction class.
    #[serde(default)]
    pub multipliers: FeeMultipliers,
    /// Dev share of collected fees, 0–100.
    #[serde(default = "default_dev_fee_share")]
    pub dev_fee_share: u8,
}

/// Reads `peniwallet` from a deployment extras JSON blob.
///
/// Expected shape (example):
/// {
///   "peniwallet": {
///     "chain_id": 56,
///     "verifying_contract": "0x85ea...C243",
///     "wrapped_native": "0xbb4C...095c",
///     "fee_wallet": "0x7D23...2361",
///     "dev_wallet": "0x527A...F447",
///     "multipliers": { "transfer": 1700, "swap": 2000, "spray": 5000 }
///   }
/// }
pub fn parse_engine_config(extras: &Value) -> Result<EngineConfig, ConfigError> {
    let section = extras.get("peniwallet").ok_or(ConfigError::Missing)?;
    serde_json::from_value::<EngineConfig>(section.clone())
        .map_err(|e| ConfigError::Invalid(e.to_string()))
}

fn default_min_fee() -> U256 {
    U256::from(DEFAULT_MIN_FEE)
}

const fn default_dev_fee_share() -> u8 {
    DEFAULT_DEV_FEE_SHARE
}
