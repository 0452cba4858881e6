use crate::{CustomContractError, Ownable};
use concordium_std::*;

/// Emergency circuit breaker for mutating entrypoints. Only the owner flips it.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct Pausable {
    paused: bool,
}

impl Pausable {
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Pausing an already paused contract is a legal no-op.
    pub fn pause(&mut self, ownable: &Ownable, sender: &Address) -> Result<(), CustomContractError> {
        ownable.ensure_owner(sender)?;
        self.paused = true;
        Ok(())
    }

    /// Unpausing a running contract is a legal no-op.
    pub fn unpause(
        &mut self,
        ownable: &Ownable,
        sender: &Address,
    ) -> Result<(), CustomContractError> {
        ownable.ensure_owner(sender)?;
        self.paused = false;
        Ok(())
    }

    pub fn ensure_not_paused(&self) -> Result<(), CustomContractError> {
        ensure!(!self.paused, CustomContractError::PausedState);
        Ok(())
    }

    pub fn ensure_paused(&self) -> Result<(), CustomContractError> {
        ensure!(self.paused, CustomContractError::NotPaused);
        Ok(())
    }
}

#[concordium_cfg_test]
mod tests {
    use super::*;

    const OWNER_ACCOUNT: AccountAddress = AccountAddress([1; 32]);
    const USER_1: AccountAddress = AccountAddress([16; 32]);

    #[concordium_test]
    fn test_owner_pause_unpause() {
        let ownable = Ownable::new(OWNER_ACCOUNT);
        let mut pausable = Pausable::default();
        claim!(!pausable.is_paused());
        claim_eq!(pausable.ensure_not_paused(), Ok(()));

        let result = pausable.pause(&ownable, &Address::Account(OWNER_ACCOUNT));
        claim_eq!(result, Ok(()));
        claim!(pausable.is_paused());
        claim_eq!(
            pausable.ensure_not_paused(),
            Err(CustomContractError::PausedState)
        );
        claim_eq!(pausable.ensure_paused(), Ok(()));

        let result = pausable.unpause(&ownable, &Address::Account(OWNER_ACCOUNT));
        claim_eq!(result, Ok(()));
        claim!(!pausable.is_paused());
        claim_eq!(pausable.ensure_paused(), Err(CustomContractError::NotPaused));
    }

    #[concordium_test]
    fn test_redundant_calls_are_accepted() {
        let ownable = Ownable::new(OWNER_ACCOUNT);
        let mut pausable = Pausable::default();
        let owner = Address::Account(OWNER_ACCOUNT);

        claim_eq!(pausable.unpause(&ownable, &owner), Ok(()));
        claim!(!pausable.is_paused());

        claim_eq!(pausable.pause(&ownable, &owner), Ok(()));
        claim_eq!(pausable.pause(&ownable, &owner), Ok(()));
        claim!(pausable.is_paused());
    }

    #[concordium_test]
    fn test_non_owner_cannot_pause_or_unpause() {
        let ownable = Ownable::new(OWNER_ACCOUNT);
        let mut pausable = Pausable::default();

        let result = pausable.pause(&ownable, &Address::Account(USER_1));
        claim_eq!(result, Err(CustomContractError::Unauthorized));
        claim!(!pausable.is_paused());

        pausable
            .pause(&ownable, &Address::Account(OWNER_ACCOUNT))
            .expect_report("Owner should be able to pause");

        let result = pausable.unpause(&ownable, &Address::Account(USER_1));
        claim_eq!(result, Err(CustomContractError::Unauthorized));
        claim!(pausable.is_paused());
    }
}
