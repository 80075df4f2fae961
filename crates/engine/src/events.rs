//! Observable side effects. One event is recorded per successful mutating
//! call and mirrored to `tracing`.

use alloy_primitives::{Address, U256};
use peniwallet_primitives::TransactionType;

/// Events emitted by the engine, in emission order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// An admin was granted.
    AdminAdded {
        /// The new admin.
        admin: Address,
        /// The admin or owner who granted it.
        added_by: Address,
    },
    /// An admin was revoked.
    AdminRemoved {
        /// The revoked admin.
        admin: Address,
        /// The admin or owner who revoked it.
        removed_by: Address,
    },
    /// The minimum fee floor changed.
    MinFeeSet {
        /// New floor value.
        min_fee: U256,
        /// The admin who set it.
        set_by: Address,
    },
    /// A fee multiplier changed.
    FeeMultiplierSet {
        /// New multiplier (parts per 10,000).
        fee_multiplier: u64,
        /// The transaction class it applies to.
        transaction_type: TransactionType,
        /// The admin who set it.
        set_by: Address,
    },
    /// The dev share of collected fees changed.
    DevFeeShareSet {
        /// New share in percent.
        dev_fee_share: u8,
        /// The admin who set it.
        set_by: Address,
    },
    /// A partner token was registered with its own fee recipient.
    ProjectRegistered {
        /// The partner token.
        token: Address,
        /// Fee recipient override for that token.
        recipient: Address,
        /// The admin who registered it.
        set_by: Address,
    },
    /// Native currency was forwarded as a gas top-up.
    GasSent {
        /// Amount forwarded.
        amount: U256,
        /// Paying caller.
        sender: Address,
        /// Receiving account.
        receiver: Address,
    },
    /// A meta-transaction transfer settled.
    TransferCompleted {
        /// Token moved.
        token: Address,
        /// Authorizing signer.
        from: Address,
        /// Recipient of the net amount.
        to: Address,
        /// Amount delivered after fees.
        net_amount: U256,
        /// Fee collected.
        fee: U256,
    },
    /// A swap settled.
    SwapCompleted {
        /// Input token (or wrapped native).
        token_in: Address,
        /// Terminal token of the path.
        token_out: Address,
        /// Authorizing signer, or the direct caller for native swaps.
        from: Address,
        /// Router input after fee deduction.
        amount_in: U256,
        /// Router output delivered.
        amount_out: U256,
        /// Fee collected.
        fee: U256,
    },
    /// A batch distribution settled.
    SprayCompleted {
        /// Token distributed.
        token: Address,
        /// Authorizing signer.
        from: Address,
        /// Number of recipients paid.
        recipients: usize,
        /// Amount delivered to each recipient.
        amount_each: U256,
        /// Fee collected.
        fee: U256,
        /// Idempotency code consumed by this batch.
        code: String,
    },
}
