//! Interfaces to the external collaborators the engine settles against: the
//! token-transfer primitive, the native currency, and the swap router.
//!
//! The engine treats any collaborator failure as fatal to the current
//! operation and propagates the specific kind; it never retries internally.

use alloy_primitives::{Address, U256};
use thiserror::Error;

/// Failure modes of the token-transfer primitive.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    /// Owner balance does not cover the requested amount.
    #[error("insufficient balance")]
    InsufficientBalance,
    /// Spender allowance does not cover the requested amount.
    #[error("insufficient allowance")]
    InsufficientAllowance,
    /// Any other token-side rejection.
    #[error("token call failed: {0}")]
    Other(String),
}

/// Failure modes of the swap router.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouterError {
    /// Router rejected the supplied path.
    #[error("invalid swap path")]
    InvalidPath,
    /// Any other router-side rejection.
    #[error("router call failed: {0}")]
    Other(String),
}

/// Multi-token transfer primitive with standard allowance semantics.
///
/// The engine acts as the spender: `transfer_from` draws on the allowance
/// `owner` granted to the engine address.
pub trait TokenLedger {
    /// Moves `amount` of `token` from `owner` to `recipient` on the engine's
    /// authority.
    fn transfer_from(
        &mut self,
        token: Address,
        owner: Address,
        recipient: Address,
        amount: U256,
    ) -> Result<(), TokenError>;

    /// Moves `amount` of `token` out of `from`'s own balance. The engine
    /// only ever passes its own address as `from`, when settling fees or
    /// refunds out of custody.
    fn transfer(
        &mut self,
        token: Address,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<(), TokenError>;

    /// Current balance of `owner` in `token`.
    fn balance_of(&self, token: Address, owner: Address) -> U256;

    /// Remaining allowance `owner` granted `spender` in `token`.
    fn allowance(&self, token: Address, owner: Address, spender: Address) -> U256;

    /// Total supply of `token`.
    fn total_supply(&self, token: Address) -> U256;
}

/// Native-currency movement for gas top-ups and native swap legs.
pub trait NativeLedger {
    /// Moves `amount` of native currency from `from` to `to`.
    fn transfer(&mut self, from: Address, to: Address, amount: U256) -> Result<(), TokenError>;

    /// Native balance of `owner`.
    fn balance_of(&self, owner: Address) -> U256;
}

/// External swap/liquidity router.
///
/// The engine does not interpret `path` beyond passing it through; exchange
/// rates are entirely the router's responsibility. The engine only
/// guarantees that `amount_in` is sized net of fees.
pub trait SwapRouter {
    /// Swaps exactly `amount_in` along `path`, crediting the output to
    /// `recipient`. Returns the amount of the terminal asset delivered.
    fn swap_exact_input(
        &mut self,
        path: &[Address],
        amount_in: U256,
        recipient: Address,
    ) -> Result<U256, RouterError>;
}
