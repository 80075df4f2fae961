//! The settlement engine: meta-transaction operations composed from the
//! replay guard, signature verification, fee policy and the external
//! collaborators.
//!
//! Every public operation is atomic. Validation (deadline, signature,
//! replay-guard peek, fee sizing, balance/allowance preflight) happens
//! before any external leg runs, and engine state (nonces, spray codes,
//! events) commits only after the last leg succeeds. Execution is strictly
//! serialized by the caller; no two operations interleave their effects.

use crate::admin::AdminRegistry;
use crate::collaborators::{NativeLedger, SwapRouter, TokenLedger};
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::events::Event;
use crate::fees::FeePolicy;
use crate::replay::{check_deadline, ReplayGuard};
use alloy_primitives::{Address, Signature, U256};
use alloy_sol_types::Eip712Domain;
use peniwallet_primitives::{
    signing_domain, Eip712Payload, SprayTransaction, SwapTransaction, TransactionType,
    TransferTransaction,
};
use tracing::{debug, info};

/// Hard upper bound on spray recipients per batch.
pub const MAX_SPRAY_RECIPIENTS: usize = 200;

/// Ambient call information supplied by the execution environment.
#[derive(Debug, Clone, Copy)]
pub struct CallContext {
    /// The account submitting this call (the relayer for signed operations).
    pub caller: Address,
    /// Current time, compared against payload deadlines.
    pub timestamp: u64,
}

/// Outcome of a settled transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferReceipt {
    /// Amount delivered to the recipient after fees.
    pub net_amount: U256,
    /// Fee collected.
    pub fee: U256,
}

/// Outcome of a settled swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapReceipt {
    /// Router input after fee deduction.
    pub amount_in: U256,
    /// Router output delivered to the recipient.
    pub amount_out: U256,
    /// Fee collected.
    pub fee: U256,
}

/// Outcome of a settled batch distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SprayReceipt {
    /// Recipients paid.
    pub recipients: usize,
    /// Amount delivered to each recipient.
    pub amount_each: U256,
    /// Fee collected on top of the distribution total.
    pub fee: U256,
}

/// The Peniwallet settlement engine.
///
/// Owns all mutable state (admin registry, fee policy, replay guard, event
/// buffer) plus the injected collaborators; there are no ambient globals.
#[derive(Debug)]
pub struct Peniwallet<L, N, R> {
    domain: Eip712Domain,
    address: Address,
    wrapped_native: Address,
    admin: AdminRegistry,
    fees: FeePolicy,
    replay: ReplayGuard,
    events: Vec<Event>,
    tokens: L,
    native: N,
    router: R,
}

impl<L, N, R> Peniwallet<L, N, R>
where
    L: TokenLedger,
    N: NativeLedger,
    R: SwapRouter,
{
    /// Builds an engine from deployment configuration, with `owner` as the
    /// root privileged account.
    pub fn new(config: EngineConfig, owner: Address, tokens: L, native: N, router: R) -> Self {
        Self {
            domain: signing_domain(config.chain_id, config.verifying_contract),
            address: config.verifying_contract,
            wrapped_native: config.wrapped_native,
            admin: AdminRegistry::new(owner),
            fees: FeePolicy {
                min_fee: config.min_fee,
                multipliers: config.multipliers,
                dev_fee_share: config.dev_fee_share,
                fee_wallet: config.fee_wallet,
                dev_wallet: config.dev_wallet,
                projects: Default::default(),
            },
            replay: ReplayGuard::new(),
            events: Vec::new(),
            tokens,
            native,
            router,
        }
    }

    /// The deploying owner.
    pub const fn owner(&self) -> Address {
        self.admin.owner()
    }

    /// The engine address (EIP-712 `verifyingContract` and allowance
    /// spender).
    pub const fn address(&self) -> Address {
        self.address
    }

    /// The signing domain payloads must bind to.
    pub const fn domain(&self) -> &Eip712Domain {
        &self.domain
    }

    /// Whether `account` holds admin rights.
    pub fn is_admin(&self, account: Address) -> bool {
        self.admin.is_admin(account)
    }

    /// The signer's current nonce counter.
    pub fn nonce_of(&self, signer: Address) -> u64 {
        self.replay.nonce_of(signer)
    }

    /// Read access to the fee policy.
    pub const fn fees(&self) -> &FeePolicy {
        &self.fees
    }

    /// Side-effect-free fee estimation; same function the settlement path
    /// uses, so an off-path quote matches the on-path deduction exactly.
    pub fn estimate_fees(
        &self,
        token: Address,
        amount: U256,
        tx_type: TransactionType,
        gas_estimate: u64,
    ) -> U256 {
        self.fees.estimate_fees(token, amount, tx_type, gas_estimate)
    }

    /// Drains the buffered events in emission order.
    pub fn drain_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    // ---- admin-gated configuration ----

    /// Grants admin rights to `target`.
    pub fn add_admin(&mut self, ctx: CallContext, target: Address) -> Result<(), EngineError> {
        self.admin.add(ctx.caller, target)?;
        debug!(admin = %target, added_by = %ctx.caller, "admin added");
        self.events.push(Event::AdminAdded {
            admin: target,
            added_by: ctx.caller,
        });
        Ok(())
    }

    /// Revokes admin rights from `target`.
    pub fn remove_admin(&mut self, ctx: CallContext, target: Address) -> Result<(), EngineError> {
        self.admin.remove(ctx.caller, target)?;
        debug!(admin = %target, removed_by = %ctx.caller, "admin removed");
        self.events.push(Event::AdminRemoved {
            admin: target,
            removed_by: ctx.caller,
        });
        Ok(())
    }

    /// Sets the minimum fee floor.
    pub fn set_min_fee(&mut self, ctx: CallContext, value: U256) -> Result<(), EngineError> {
        self.admin.require_admin(ctx.caller)?;
        self.fees.min_fee = value;
        debug!(min_fee = %value, set_by = %ctx.caller, "min fee set");
        self.events.push(Event::MinFeeSet {
            min_fee: value,
            set_by: ctx.caller,
        });
        Ok(())
    }

    /// Sets the multiplier for one transaction class.
    pub fn set_fee_multiplier(
        &mut self,
        ctx: CallContext,
        tx_type: TransactionType,
        value: u64,
    ) -> Result<(), EngineError> {
        self.admin.require_admin(ctx.caller)?;
        self.fees.multipliers.set(tx_type, value);
        debug!(?tx_type, multiplier = value, set_by = %ctx.caller, "fee multiplier set");
        self.events.push(Event::FeeMultiplierSet {
            fee_multiplier: value,
            transaction_type: tx_type,
            set_by: ctx.caller,
        });
        Ok(())
    }

    /// Sets the dev share of collected fees; rejects values above 100.
    pub fn set_dev_fee_share(&mut self, ctx: CallContext, percent: u8) -> Result<(), EngineError> {
        self.admin.require_admin(ctx.caller)?;
        self.fees.set_dev_fee_share(percent)?;
        debug!(percent, set_by = %ctx.caller, "dev fee share set");
        self.events.push(Event::DevFeeShareSet {
            dev_fee_share: percent,
            set_by: ctx.caller,
        });
        Ok(())
    }

    /// Registers a partner token with its own primary fee recipient.
    pub fn register_project(
        &mut self,
        ctx: CallContext,
        token: Address,
        recipient: Address,
    ) -> Result<(), EngineError> {
        self.admin.require_admin(ctx.caller)?;
        self.fees.projects.insert(token, recipient);
        debug!(%token, %recipient, set_by = %ctx.caller, "project registered");
        self.events.push(Event::ProjectRegistered {
            token,
            recipient,
            set_by: ctx.caller,
        });
        Ok(())
    }

    // ---- settlement operations ----

    /// Settles a signed transfer: pulls `amount` of `token` from the signer
    /// and delivers `amount - fee` to the recipient, routing the fee split.
    pub fn transfer(
        &mut self,
        ctx: CallContext,
        payload: &TransferTransaction,
        signature: &Signature,
        gas_estimate: u64,
    ) -> Result<TransferReceipt, EngineError> {
        check_deadline(payload.deadline, ctx.timestamp)?;
        self.verify_signer(payload, payload.from, signature)?;
        self.replay.expect_nonce(payload.from, payload.nonce)?;

        let fee = self.fees.estimate_fees(
            payload.token,
            payload.amount,
            TransactionType::Transfer,
            gas_estimate,
        );
        if fee >= payload.amount {
            return Err(EngineError::FeeExceedsAmount);
        }
        let net = payload.amount - fee;
        self.preflight(payload.token, payload.from, payload.amount)?;

        self.tokens
            .transfer_from(payload.token, payload.from, payload.to, net)?;
        self.route_token_fee(payload.token, payload.from, fee)?;

        self.replay.consume_nonce(payload.from);
        info!(
            token = %payload.token,
            from = %payload.from,
            to = %payload.to,
            net = %net,
            fee = %fee,
            "transfer settled"
        );
        self.events.push(Event::TransferCompleted {
            token: payload.token,
            from: payload.from,
            to: payload.to,
            net_amount: net,
            fee,
        });
        Ok(TransferReceipt { net_amount: net, fee })
    }

    /// Settles a signed swap: deducts the fee from `amountA`, custodies the
    /// remainder at the engine address and hands it to the router along the
    /// caller-supplied `path`. The engine never interprets the path or the
    /// exchange rate.
    pub fn swap(
        &mut self,
        ctx: CallContext,
        payload: &SwapTransaction,
        signature: &Signature,
        path: &[Address],
    ) -> Result<SwapReceipt, EngineError> {
        check_deadline(payload.deadline, ctx.timestamp)?;
        self.verify_signer(payload, payload.from, signature)?;
        self.replay.expect_nonce(payload.from, payload.nonce)?;

        let fee = self.fees.estimate_fees(
            payload.tokenA,
            payload.amountA,
            TransactionType::Swap,
            0,
        );
        if fee >= payload.amountA {
            return Err(EngineError::FeeExceedsAmount);
        }
        let net = payload.amountA - fee;
        self.preflight(payload.tokenA, payload.from, payload.amountA)?;

        // Custody the gross input, route the swap, then settle the fee from
        // custody. A router failure is compensated by returning the custody
        // before surfacing the error, so no caller funds are stranded.
        self.tokens
            .transfer_from(payload.tokenA, payload.from, self.address, payload.amountA)?;
        let amount_out = match self.router.swap_exact_input(path, net, payload.from) {
            Ok(out) => out,
            Err(err) => {
                self.tokens
                    .transfer(payload.tokenA, self.address, payload.from, payload.amountA)?;
                return Err(err.into());
            }
        };
        self.settle_token_fee_from_custody(payload.tokenA, fee)?;

        self.replay.consume_nonce(payload.from);
        info!(
            token_in = %payload.tokenA,
            token_out = %payload.tokenB,
            from = %payload.from,
            amount_in = %net,
            amount_out = %amount_out,
            fee = %fee,
            "swap settled"
        );
        self.events.push(Event::SwapCompleted {
            token_in: payload.tokenA,
            token_out: payload.tokenB,
            from: payload.from,
            amount_in: net,
            amount_out,
            fee,
        });
        Ok(SwapReceipt {
            amount_in: net,
            amount_out,
            fee,
        })
    }

    /// Converts attached native currency into `token` for the caller.
    ///
    /// Unsigned and immediate: the caller pays directly, so there is no
    /// nonce and no deadline. The fee is native-denominated and deducted
    /// before the router input is sized.
    pub fn swap_native_for_tokens(
        &mut self,
        ctx: CallContext,
        token: Address,
        value: U256,
    ) -> Result<SwapReceipt, EngineError> {
        let fee = self
            .fees
            .estimate_fees(self.wrapped_native, value, TransactionType::Swap, 0);
        if fee >= value {
            return Err(EngineError::FeeExceedsAmount);
        }
        let net = value - fee;
        if self.native.balance_of(ctx.caller) < value {
            return Err(EngineError::InsufficientBalance);
        }

        self.native.transfer(ctx.caller, self.address, value)?;
        let path = [self.wrapped_native, token];
        let amount_out = match self.router.swap_exact_input(&path, net, ctx.caller) {
            Ok(out) => out,
            Err(err) => {
                self.native.transfer(self.address, ctx.caller, value)?;
                return Err(err.into());
            }
        };
        let split = self.fees.split_fee(fee);
        if !split.primary.is_zero() {
            self.native
                .transfer(self.address, self.fees.fee_wallet, split.primary)?;
        }
        if !split.dev.is_zero() {
            self.native
                .transfer(self.address, self.fees.dev_wallet, split.dev)?;
        }

        info!(
            token_out = %token,
            from = %ctx.caller,
            amount_in = %net,
            amount_out = %amount_out,
            fee = %fee,
            "native swap settled"
        );
        self.events.push(Event::SwapCompleted {
            token_in: self.wrapped_native,
            token_out: token,
            from: ctx.caller,
            amount_in: net,
            amount_out,
            fee,
        });
        Ok(SwapReceipt {
            amount_in: net,
            amount_out,
            fee,
        })
    }

    /// Settles a signed batch distribution: every recipient receives exactly
    /// `payload.amount`, the fee is charged on top of the distribution
    /// total, and the batch is idempotency-keyed by the payload code.
    ///
    /// `gas_hint` is an advisory per-call bound on the recipient count; the
    /// authoritative bound is [`MAX_SPRAY_RECIPIENTS`]. Exceeding either
    /// fails the whole batch, it never truncates.
    pub fn spray(
        &mut self,
        ctx: CallContext,
        payload: &SprayTransaction,
        signature: &Signature,
        gas_hint: Option<usize>,
    ) -> Result<SprayReceipt, EngineError> {
        check_deadline(payload.deadline, ctx.timestamp)?;
        self.verify_signer(payload, payload.from, signature)?;
        self.replay.expect_code_unused(&payload.code)?;

        if payload.recipients.is_empty() {
            return Err(EngineError::EmptyBatch);
        }
        let limit = gas_hint
            .unwrap_or(MAX_SPRAY_RECIPIENTS)
            .min(MAX_SPRAY_RECIPIENTS);
        if payload.recipients.len() > limit {
            return Err(EngineError::BatchLimitExceeded {
                got: payload.recipients.len(),
                limit,
            });
        }

        let total = payload
            .amount
            .saturating_mul(U256::from(payload.recipients.len() as u64));
        let fee = self
            .fees
            .estimate_fees(payload.token, total, TransactionType::Spray, 0);
        let gross = total.saturating_add(fee);
        self.preflight(payload.token, payload.from, gross)?;

        for recipient in &payload.recipients {
            self.tokens
                .transfer_from(payload.token, payload.from, *recipient, payload.amount)?;
        }
        self.route_token_fee(payload.token, payload.from, fee)?;

        // The code burns only once the whole batch has settled; a failure
        // above leaves it unconsumed so the relayer can retry verbatim.
        self.replay.consume_code(&payload.code);
        info!(
            token = %payload.token,
            from = %payload.from,
            recipients = payload.recipients.len(),
            amount_each = %payload.amount,
            fee = %fee,
            code = %payload.code,
            "spray settled"
        );
        self.events.push(Event::SprayCompleted {
            token: payload.token,
            from: payload.from,
            recipients: payload.recipients.len(),
            amount_each: payload.amount,
            fee,
            code: payload.code.clone(),
        });
        Ok(SprayReceipt {
            recipients: payload.recipients.len(),
            amount_each: payload.amount,
            fee,
        })
    }

    /// Forwards exactly `value` of native currency from the caller to
    /// `receiver`. Not a meta-transaction: no fee, no nonce, no signature.
    pub fn send_gas(
        &mut self,
        ctx: CallContext,
        receiver: Address,
        value: U256,
    ) -> Result<(), EngineError> {
        if self.native.balance_of(ctx.caller) < value {
            return Err(EngineError::InsufficientBalance);
        }
        self.native.transfer(ctx.caller, receiver, value)?;
        debug!(amount = %value, sender = %ctx.caller, receiver = %receiver, "gas sent");
        self.events.push(Event::GasSent {
            amount: value,
            sender: ctx.caller,
            receiver,
        });
        Ok(())
    }

    // ---- internals ----

    /// Recovers the signer over the domain-bound digest and compares it to
    /// the payload's declared signer. Malformed signatures and mismatches
    /// both surface as [`EngineError::InvalidSignature`].
    fn verify_signer<P: Eip712Payload>(
        &self,
        payload: &P,
        declared: Address,
        signature: &Signature,
    ) -> Result<(), EngineError> {
        let recovered = payload
            .recover_signer(signature, &self.domain)
            .map_err(|_| EngineError::InvalidSignature)?;
        if recovered != declared {
            return Err(EngineError::InvalidSignature);
        }
        Ok(())
    }

    /// Checks the signer's balance and the engine's allowance cover `gross`
    /// before any leg runs. Execution is serialized, so the preflight holds
    /// through the legs for a standard-compliant token.
    fn preflight(&self, token: Address, owner: Address, gross: U256) -> Result<(), EngineError> {
        if self.tokens.balance_of(token, owner) < gross {
            return Err(EngineError::InsufficientBalance);
        }
        if self.tokens.allowance(token, owner, self.address) < gross {
            return Err(EngineError::InsufficientAllowance);
        }
        Ok(())
    }

    /// Routes `fee` from the signer to the primary and dev recipients.
    /// Zero legs are skipped.
    fn route_token_fee(
        &mut self,
        token: Address,
        from: Address,
        fee: U256,
    ) -> Result<(), EngineError> {
        let split = self.fees.split_fee(fee);
        let primary_to = self.fees.fee_recipient(token);
        if !split.primary.is_zero() {
            self.tokens.transfer_from(token, from, primary_to, split.primary)?;
        }
        if !split.dev.is_zero() {
            self.tokens
                .transfer_from(token, from, self.fees.dev_wallet, split.dev)?;
        }
        Ok(())
    }

    /// Routes `fee` out of the engine's own custody.
    fn settle_token_fee_from_custody(
        &mut self,
        token: Address,
        fee: U256,
    ) -> Result<(), EngineError> {
        let split = self.fees.split_fee(fee);
        let primary_to = self.fees.fee_recipient(token);
        if !split.primary.is_zero() {
            self.tokens
                .transfer(token, self.address, primary_to, split.primary)?;
        }
        if !split.dev.is_zero() {
            self.tokens
                .transfer(token, self.address, self.fees.dev_wallet, split.dev)?;
        }
        Ok(())
    }
}
