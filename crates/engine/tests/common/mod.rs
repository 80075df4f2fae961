//! Shared harness for engine integration tests: in-memory collaborator
//! mocks and signing helpers.
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use alloy_primitives::{address, Address, Signature, U256};
use alloy_signer::SignerSync;
use alloy_signer_local::PrivateKeySigner;
use peniwallet_engine::{
    CallContext, EngineConfig, NativeLedger, Peniwallet, RouterError, SwapRouter, TokenError,
    TokenLedger,
};
use peniwallet_primitives::{
    Eip712Payload, FeeMultipliers, SprayTransaction, SwapTransaction, TransferTransaction,
};

pub const CHAIN_ID: u64 = 56;
pub const ENGINE_ADDR: Address = address!("85eaac08bd9203f42715527cc4258ce759f4c243");
pub const WRAPPED_NATIVE: Address = address!("bb4cdb9cbd36b01bd1cbaebf2de08d9173bc095c");
pub const FEE_WALLET: Address = address!("7d23030d967d26462966fa8e6968eade0f7a2361");
pub const DEV_WALLET: Address = address!("527a39f480de9126d48b1b23215bf8c0a784f447");
pub const TOKEN: Address = address!("6ec90334d89dbdc89e08a133271be3d104128edb");
pub const OWNER: Address = address!("00000000000000000000000000000000000000a0");
pub const RELAYER: Address = address!("00000000000000000000000000000000000000b0");
pub const RECIPIENT: Address = address!("00000000000000000000000000000000000000c0");

pub const NOW: u64 = 1_700_000_000;

/// Output per input unit credited by the mock router.
pub const ROUTER_RATE: u64 = 2;

#[derive(Debug, Default)]
struct TokenState {
    balances: HashMap<(Address, Address), U256>,
    allowances: HashMap<(Address, Address, Address), U256>,
    supply: HashMap<Address, U256>,
}

/// In-memory multi-token ledger with standard allowance semantics. Clones
/// share state, so tests keep a handle while the engine owns another.
#[derive(Debug, Clone, Default)]
pub struct MockTokens(Rc<RefCell<TokenState>>);

impl MockTokens {
    pub fn mint(&self, token: Address, to: Address, amount: U256) {
        let mut s = self.0.borrow_mut();
        *s.balances.entry((token, to)).or_default() += amount;
        *s.supply.entry(token).or_default() += amount;
    }

    pub fn approve(&self, token: Address, owner: Address, spender: Address, amount: U256) {
        self.0
            .borrow_mut()
            .allowances
            .insert((token, owner, spender), amount);
    }

    pub fn balance(&self, token: Address, owner: Address) -> U256 {
        self.0
            .borrow()
            .balances
            .get(&(token, owner))
            .copied()
            .unwrap_or_default()
    }

    fn debit(&self, token: Address, from: Address, amount: U256) -> Result<(), TokenError> {
        let mut s = self.0.borrow_mut();
        let balance = s.balances.entry((token, from)).or_default();
        if *balance < amount {
            return Err(TokenError::InsufficientBalance);
        }
        *balance -= amount;
        Ok(())
    }

    fn credit(&self, token: Address, to: Address, amount: U256) {
        *self.0.borrow_mut().balances.entry((token, to)).or_default() += amount;
    }
}

impl TokenLedger for MockTokens {
    fn transfer_from(
        &mut self,
        token: Address,
        owner: Address,
        recipient: Address,
        amount: U256,
    ) -> Result<(), TokenError> {
        let mut s = self.0.borrow_mut();
        let balance = s.balances.get(&(token, owner)).copied().unwrap_or_default();
        if balance < amount {
            return Err(TokenError::InsufficientBalance);
        }
        let allowance = s
            .allowances
            .entry((token, owner, ENGINE_ADDR))
            .or_default();
        if *allowance < amount {
            return Err(TokenError::InsufficientAllowance);
        }
        *allowance -= amount;
        s.balances.insert((token, owner), balance - amount);
        *s.balances.entry((token, recipient)).or_default() += amount;
        Ok(())
    }

    fn transfer(
        &mut self,
        token: Address,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<(), TokenError> {
        self.debit(token, from, amount)?;
        self.credit(token, to, amount);
        Ok(())
    }

    fn balance_of(&self, token: Address, owner: Address) -> U256 {
        self.balance(token, owner)
    }

    fn allowance(&self, token: Address, owner: Address, spender: Address) -> U256 {
        self.0
            .borrow()
            .allowances
            .get(&(token, owner, spender))
            .copied()
            .unwrap_or_default()
    }

    fn total_supply(&self, token: Address) -> U256 {
        self.0
            .borrow()
            .supply
            .get(&token)
            .copied()
            .unwrap_or_default()
    }
}

/// In-memory native-currency ledger.
#[derive(Debug, Clone, Default)]
pub struct MockNative(Rc<RefCell<HashMap<Address, U256>>>);

impl MockNative {
    pub fn mint(&self, to: Address, amount: U256) {
        *self.0.borrow_mut().entry(to).or_default() += amount;
    }

    pub fn balance(&self, owner: Address) -> U256 {
        self.0.borrow().get(&owner).copied().unwrap_or_default()
    }
}

impl NativeLedger for MockNative {
    fn transfer(&mut self, from: Address, to: Address, amount: U256) -> Result<(), TokenError> {
        let mut s = self.0.borrow_mut();
        let balance = s.entry(from).or_default();
        if *balance < amount {
            return Err(TokenError::InsufficientBalance);
        }
        *balance -= amount;
        *s.entry(to).or_default() += amount;
        Ok(())
    }

    fn balance_of(&self, owner: Address) -> U256 {
        self.balance(owner)
    }
}

#[derive(Debug)]
struct RouterState {
    fail: bool,
    calls: Vec<(Vec<Address>, U256, Address)>,
}

/// Mock swap router: consumes the input leg from the engine's custody and
/// credits `amount_in * ROUTER_RATE` of the terminal path asset to the
/// recipient. Can be switched to fail for compensation tests.
#[derive(Debug, Clone)]
pub struct MockRouter {
    state: Rc<RefCell<RouterState>>,
    tokens: MockTokens,
    native: MockNative,
}

impl MockRouter {
    pub fn new(tokens: MockTokens, native: MockNative) -> Self {
        Self {
            state: Rc::new(RefCell::new(RouterState {
                fail: false,
                calls: Vec::new(),
            })),
            tokens,
            native,
        }
    }

    pub fn set_fail(&self, fail: bool) {
        self.state.borrow_mut().fail = fail;
    }

    pub fn calls(&self) -> Vec<(Vec<Address>, U256, Address)> {
        self.state.borrow().calls.clone()
    }
}

impl SwapRouter for MockRouter {
    fn swap_exact_input(
        &mut self,
        path: &[Address],
        amount_in: U256,
        recipient: Address,
    ) -> Result<U256, RouterError> {
        if self.state.borrow().fail {
            return Err(RouterError::Other("router offline".to_string()));
        }
        if path.len() < 2 {
            return Err(RouterError::InvalidPath);
        }
        let input = path[0];
        let terminal = path[path.len() - 1];

        // Consume the input leg from the engine's custody.
        if input == WRAPPED_NATIVE {
            self.native
                .transfer(ENGINE_ADDR, Address::ZERO, amount_in)
                .map_err(|e| RouterError::Other(e.to_string()))?;
        } else {
            self.tokens
                .transfer(input, ENGINE_ADDR, Address::ZERO, amount_in)
                .map_err(|e| RouterError::Other(e.to_string()))?;
        }

        let amount_out = amount_in * U256::from(ROUTER_RATE);
        if terminal == WRAPPED_NATIVE {
            self.native.mint(recipient, amount_out);
        } else {
            self.tokens.mint(terminal, recipient, amount_out);
        }
        self.state
            .borrow_mut()
            .calls
            .push((path.to_vec(), amount_in, recipient));
        Ok(amount_out)
    }
}

/// Engine wired to the mocks plus handles the tests can inspect.
pub struct Harness {
    pub engine: Peniwallet<MockTokens, MockNative, MockRouter>,
    pub tokens: MockTokens,
    pub native: MockNative,
    pub router: MockRouter,
    pub signer: PrivateKeySigner,
}

pub fn setup() -> Harness {
    let tokens = MockTokens::default();
    let native = MockNative::default();
    let router = MockRouter::new(tokens.clone(), native.clone());
    let config = EngineConfig {
        chain_id: CHAIN_ID,
        verifying_contract: ENGINE_ADDR,
        wrapped_native: WRAPPED_NATIVE,
        fee_wallet: FEE_WALLET,
        dev_wallet: DEV_WALLET,
        min_fee: U256::from(100u64),
        multipliers: FeeMultipliers::default(),
        dev_fee_share: 50,
    };
    let engine = Peniwallet::new(
        config,
        OWNER,
        tokens.clone(),
        native.clone(),
        router.clone(),
    );
    Harness {
        engine,
        tokens,
        native,
        router,
        signer: PrivateKeySigner::random(),
    }
}

impl Harness {
    pub fn ctx(&self, caller: Address) -> CallContext {
        CallContext {
            caller,
            timestamp: NOW,
        }
    }

    /// Mints `amount` of `token` to the signer and approves the engine for
    /// the same amount.
    pub fn fund_signer(&self, token: Address, amount: U256) {
        let owner = self.signer.address();
        self.tokens.mint(token, owner, amount);
        self.tokens.approve(token, owner, ENGINE_ADDR, amount);
    }

    pub fn sign<P: Eip712Payload>(&self, payload: &P) -> Signature {
        self.signer
            .sign_hash_sync(&payload.signing_hash(self.engine.domain()))
            .unwrap()
    }

    pub fn transfer_payload(&self, amount: u64, nonce: u64) -> TransferTransaction {
        TransferTransaction {
            token: TOKEN,
            from: self.signer.address(),
            to: RECIPIENT,
            amount: U256::from(amount),
            nonce: U256::from(nonce),
            deadline: U256::from(NOW + 3600),
        }
    }

    pub fn swap_payload(&self, token_b: Address, amount: u64, nonce: u64) -> SwapTransaction {
        SwapTransaction {
            tokenA: TOKEN,
            tokenB: token_b,
            from: self.signer.address(),
            amountA: U256::from(amount),
            amountB: U256::from(amount),
            nonce: U256::from(nonce),
            deadline: U256::from(NOW + 3600),
        }
    }

    pub fn spray_payload(
        &self,
        recipients: Vec<Address>,
        amount: u64,
        code: &str,
    ) -> SprayTransaction {
        SprayTransaction {
            token: TOKEN,
            from: self.signer.address(),
            recipients,
            amount: U256::from(amount),
            code: code.to_string(),
            deadline: U256::from(NOW + 3600),
        }
    }
}
