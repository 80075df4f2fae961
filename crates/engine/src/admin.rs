use crate::error::EngineError;
use alloy_primitives::Address;
use std::collections::HashSet;

/// Privileged accounts gating every configuration mutator.
///
/// The deploying owner is implicitly privileged and cannot be removed
/// through the admin path.
#[derive(Debug, Clone)]
pub struct AdminRegistry {
    owner: Address,
    admins: HashSet<Address>,
}

impl AdminRegistry {
    /// Creates a registry with `owner` as the sole privileged account.
    pub fn new(owner: Address) -> Self {
        Self {
            owner,
            admins: HashSet::new(),
        }
    }

    /// The deploying owner.
    pub const fn owner(&self) -> Address {
        self.owner
    }

    /// Whether `account` holds admin rights (the owner always does).
    pub fn is_admin(&self, account: Address) -> bool {
        account == self.owner || self.admins.contains(&account)
    }

    /// Fails with [`EngineError::Unauthorized`] unless `caller` is
    /// privileged.
    pub fn require_admin(&self, caller: Address) -> Result<(), EngineError> {
        if self.is_admin(caller) {
            Ok(())
        } else {
            Err(EngineError::Unauthorized)
        }
    }

    /// Grants admin rights to `target`. Idempotent: re-adding an existing
    /// admin is a no-op success.
    pub fn add(&mut self, caller: Address, target: Address) -> Result<(), EngineError> {
        self.require_admin(caller)?;
        self.admins.insert(target);
        Ok(())
    }

    /// Revokes admin rights from `target`. The owner keeps implicit rights
    /// regardless of the set's contents.
    pub fn remove(&mut self, caller: Address, target: Address) -> Result<(), EngineError> {
        self.require_admin(caller)?;
        self.admins.remove(&target);
        Ok(())
    }
}
