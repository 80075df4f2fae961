use serde::{Deserialize, Serialize};

/// Default transfer fee multiplier (parts per 10,000).
pub const DEFAULT_TRANSFER_MULTIPLIER: u64 = 1_700;
/// Default swap fee multiplier (parts per 10,000).
pub const DEFAULT_SWAP_MULTIPLIER: u64 = 2_000;
/// Default spray fee multiplier (parts per 10,000).
pub const DEFAULT_SPRAY_MULTIPLIER: u64 = 5_000;

/// Fee-bearing transaction classes.
///
/// Kept closed so multiplier lookup is an exhaustive match; adding a class is
/// a compile-time change, not a runtime key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    /// Direct token transfer.
    Transfer,
    /// Token/currency conversion through the external router.
    Swap,
    /// Batch distribution to many recipients.
    Spray,
}

/// Fee multipliers per transaction class, in parts per 10,000.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeMultipliers {
    /// Multiplier applied to direct transfers.
    #[serde(default = "default_transfer_multiplier")]
    pub transfer: u64,
    /// Multiplier applied to swaps.
    #[serde(default = "default_swap_multiplier")]
    pub swap: u64,
    /// Multiplier applied to batch distributions.
    #[serde(default = "default_spray_multiplier")]
    pub spray: u64,
}

impl FeeMultipliers {
    /// Returns the multiplier for `tx_type`.
    pub const fn get(&self, tx_type: TransactionType) -> u64 {
        match tx_type {
            TransactionType::Transfer => self.transfer,
            TransactionType::Swap => self.swap,
            TransactionType::Spray => self.spray,
        }
    }

    /// Replaces the multiplier for `tx_type`.
    pub fn set(&mut self, tx_type: TransactionType, value: u64) {
        match tx_type {
            TransactionType::Transfer => self.transfer = value,
            TransactionType::Swap => self.swap = value,
            TransactionType::Spray => self.spray = value,
        }
    }
}

impl Default for FeeMultipliers {
    fn default() -> Self {
        Self {
            transfer: DEFAULT_TRANSFER_MULTIPLIER,
            swap: DEFAULT_SWAP_MULTIPLIER,
            spray: DEFAULT_SPRAY_MULTIPLIER,
        }
    }
}

const fn default_transfer_multiplier() -> u64 {
    DEFAULT_TRANSFER_MULTIPLIER
}
const fn default_swap_multiplier() -> u64 {
    DEFAULT_SWAP_MULTIPLIER
}
const fn default_spray_multiplier() -> u64 {
    DEFAULT_SPRAY_MULTIPLIER
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_matches_class() {
        let mut m = FeeMultipliers::default();
        assert_eq!(m.get(TransactionType::Transfer), DEFAULT_TRANSFER_MULTIPLIER);
        assert_eq!(m.get(TransactionType::Swap), DEFAULT_SWAP_MULTIPLIER);
        assert_eq!(m.get(TransactionType::Spray), DEFAULT_SPRAY_MULTIPLIER);

        m.set(TransactionType::Swap, 3_000);
        assert_eq!(m.get(TransactionType::Swap), 3_000);
        assert_eq!(m.get(TransactionType::Transfer), DEFAULT_TRANSFER_MULTIPLIER);
    }

    #[test]
    fn serde_defaults_fill_missing_fields() {
        let m: FeeMultipliers = serde_json::from_str(r#"{"transfer": 100}"#).unwrap();
        assert_eq!(m.transfer, 100);
        assert_eq!(m.swap, DEFAULT_SWAP_MULTIPLIER);
        assert_eq!(m.spray, DEFAULT_SPRAY_MULTIPLIER);
    }
}
