//! EIP-712 typed payloads authorized by off-chain signers.
//!
//! The field names, declared types and ordering of each schema are the wire
//! contract between signers and the engine; they must not be reordered or
//! renamed.

use alloy_primitives::{Address, Signature, SignatureError, B256, U256};
use alloy_sol_types::{sol, Eip712Domain, SolStruct};

/// EIP-712 domain name.
pub const DOMAIN_NAME: &str = "Peniwallet";
/// EIP-712 domain version.
pub const DOMAIN_VERSION: &str = "1";

sol! {
    /// Meta-transaction transfer authorization: moves `amount` of `token`
    /// from `from` to `to`, net of fees.
    #[derive(serde::Serialize, serde::Deserialize)]
    struct TransferTransaction {
        address token;
        address from;
        address to;
        uint256 amount;
        uint256 nonce;
        uint256 deadline;
    }

    /// Meta-transaction swap authorization: converts `amountA` of `tokenA`
    /// into `tokenB` through the external router, net of fees. `amountB` is
    /// the signer's quoted minimum output and is passed through untouched.
    #[derive(serde::Serialize, serde::Deserialize)]
    struct SwapTransaction {
        address tokenA;
        address tokenB;
        address from;
        uint256 amountA;
        uint256 amountB;
        uint256 nonce;
        uint256 deadline;
    }

    /// Batch distribution authorization: a flat `amount` of `token` to each
    /// entry of `recipients`. Idempotency is keyed by the opaque `code`
    /// rather than the signer nonce, so a relayer can retry the identical
    /// payload without a re-sign while replay stays impossible.
    #[derive(serde::Serialize, serde::Deserialize)]
    struct SprayTransaction {
        address token;
        address from;
        address[] recipients;
        uint256 amount;
        string code;
        uint256 deadline;
    }
}

/// Builds the signing domain binding payloads to one deployment.
///
/// The same logical payload signed for a different `chain_id` or
/// `verifying_contract` produces a different digest and fails verification.
pub fn signing_domain(chain_id: u64, verifying_contract: Address) -> Eip712Domain {
    Eip712Domain::new(
        Some(DOMAIN_NAME.into()),
        Some(DOMAIN_VERSION.into()),
        Some(U256::from(chain_id)),
        Some(verifying_contract),
        None,
    )
}

/// Digest construction and signer recovery shared by all payload schemas.
///
/// Pure and stateless: identical inputs always yield identical outputs.
pub trait Eip712Payload: SolStruct {
    /// Returns the domain-bound EIP-712 digest the signer commits to.
    fn signing_hash(&self, domain: &Eip712Domain) -> B256 {
        self.eip712_signing_hash(domain)
    }

    /// Recovers the signing address from `signature` over this payload's
    /// domain-bound digest.
    fn recover_signer(
        &self,
        signature: &Signature,
        domain: &Eip712Domain,
    ) -> Result<Address, SignatureError> {
        signature.recover_address_from_prehash(&self.signing_hash(domain))
    }
}

impl Eip712Payload for TransferTransaction {}
impl Eip712Payload for SwapTransaction {}
impl Eip712Payload for SprayTransaction {}
