use crate::CustomContractError;
use concordium_std::*;

/// Single administrator of a contract.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Ownable {
    /// Account allowed to pause the contract, withdraw fees and hand over ownership.
    owner: AccountAddress,
}

impl Ownable {
    pub fn new(owner: AccountAddress) -> Self {
        Self { owner }
    }

    pub fn owner(&self) -> AccountAddress {
        self.owner
    }

    pub fn is_owner(&self, address: &Address) -> bool {
        address.matches_account(&self.owner)
    }

    pub fn ensure_owner(&self, address: &Address) -> Result<(), CustomContractError> {
        ensure!(self.is_owner(address), CustomContractError::Unauthorized);
        Ok(())
    }

    /// Replace the owner, returning the previous one.
    ///
    /// There is no acceptance step: the new owner is in charge as soon as this returns.
    pub fn transfer_ownership(
        &mut self,
        sender: &Address,
        new_owner: AccountAddress,
    ) -> Result<AccountAddress, CustomContractError> {
        self.ensure_owner(sender)?;
        let previous_owner = self.owner;
        self.owner = new_owner;
        Ok(previous_owner)
    }
}

#[concordium_cfg_test]
mod tests {
    use super::*;

    const OWNER_ACCOUNT: AccountAddress = AccountAddress([1; 32]);
    const USER_1: AccountAddress = AccountAddress([16; 32]);
    const USER_2: AccountAddress = AccountAddress([17; 32]);
    const CONTRACT_1: ContractAddress = ContractAddress {
        index: 16,
        subindex: 16,
    };

    #[concordium_test]
    fn test_owner_rights() {
        let ownable = Ownable::new(OWNER_ACCOUNT);

        claim!(ownable.is_owner(&Address::Account(OWNER_ACCOUNT)));
        claim!(!ownable.is_owner(&Address::Account(USER_1)));
        claim!(!ownable.is_owner(&Address::Contract(CONTRACT_1)));
        claim_eq!(ownable.owner(), OWNER_ACCOUNT);
    }

    #[concordium_test]
    fn test_transfer_ownership() {
        let mut ownable = Ownable::new(OWNER_ACCOUNT);

        let result = ownable.transfer_ownership(&Address::Account(OWNER_ACCOUNT), USER_1);
        claim_eq!(result, Ok(OWNER_ACCOUNT));
        claim_eq!(ownable.owner(), USER_1);
        claim!(!ownable.is_owner(&Address::Account(OWNER_ACCOUNT)));

        // Previous owner has no rights left
        let result = ownable.transfer_ownership(&Address::Account(OWNER_ACCOUNT), USER_2);
        claim_eq!(result, Err(CustomContractError::Unauthorized));
        claim_eq!(ownable.owner(), USER_1);
    }

    #[concordium_test]
    fn test_transfer_ownership_unauthorized() {
        let mut ownable = Ownable::new(OWNER_ACCOUNT);

        let result = ownable.transfer_ownership(&Address::Account(USER_1), USER_1);
        claim_eq!(result, Err(CustomContractError::Unauthorized));
        claim_eq!(ownable.owner(), OWNER_ACCOUNT);

        let result = ownable.transfer_ownership(&Address::Contract(CONTRACT_1), USER_2);
        claim_eq!(result, Err(CustomContractError::Unauthorized));
        claim_eq!(ownable.owner(), OWNER_ACCOUNT);
    }

    #[concordium_test]
    fn test_transfer_ownership_to_self() {
        let mut ownable = Ownable::new(OWNER_ACCOUNT);

        // No change or error expected
        let result = ownable.transfer_ownership(&Address::Account(OWNER_ACCOUNT), OWNER_ACCOUNT);
        claim_eq!(result, Ok(OWNER_ACCOUNT));
        claim_eq!(ownable.owner(), OWNER_ACCOUNT);
    }
}
