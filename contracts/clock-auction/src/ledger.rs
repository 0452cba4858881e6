use concordium_std::*;

/// Platform fees and escrowed payments held in the contract balance.
#[derive(Serial, DeserialWithState)]
#[concordium(state_parameter = "S")]
pub struct FeeLedger<S: HasStateApi> {
    /// Fee cuts collected since the last withdrawal.
    accumulated_fees: Amount,
    /// Sum of all pending balances. Never withdrawable by the owner.
    escrowed: Amount,
    /// Payments that could not be delivered, claimable by their recipients.
    pending: StateMap<AccountAddress, Amount, S>,
}

impl<S: HasStateApi> FeeLedger<S> {
    pub fn new(state_builder: &mut StateBuilder<S>) -> Self {
        Self {
            accumulated_fees: Amount::zero(),
            escrowed: Amount::zero(),
            pending: state_builder.new_map(),
        }
    }

    pub fn accumulated_fees(&self) -> Amount {
        self.accumulated_fees
    }

    pub fn escrowed(&self) -> Amount {
        self.escrowed
    }

    pub fn accrue(&mut self, cut: Amount) {
        self.accumulated_fees += cut;
    }

    pub fn pending_of(&self, account: &AccountAddress) -> Amount {
        self.pending
            .get(account)
            .map(|amount| *amount)
            .unwrap_or_else(Amount::zero)
    }

    /// Credit `amount` to the pending balance of `account`.
    pub fn escrow(&mut self, account: AccountAddress, amount: Amount) {
        {
            let mut pending = self.pending.entry(account).or_insert_with(Amount::zero);
            *pending += amount;
        }
        self.escrowed += amount;
    }

    /// Clear the pending balance of `account` and return it.
    pub fn take_pending(&mut self, account: &AccountAddress) -> Amount {
        let amount = self.pending_of(account);
        self.pending.remove(account);
        self.escrowed = Amount::from_micro_ccd(
            self.escrowed.micro_ccd.saturating_sub(amount.micro_ccd),
        );
        amount
    }

    /// Reset the fee counter and return the part of `balance` not owed to escrow holders.
    ///
    /// Everything the contract holds beyond escrow belongs to the owner, so stray
    /// deposits are swept together with the fee cuts.
    pub fn take_fees(&mut self, balance: Amount) -> Amount {
        self.accumulated_fees = Amount::zero();
        Amount::from_micro_ccd(balance.micro_ccd.saturating_sub(self.escrowed.micro_ccd))
    }
}

#[concordium_cfg_test]
mod tests {
    use super::*;
    use concordium_std::test_infrastructure::*;

    const USER_1: AccountAddress = AccountAddress([16; 32]);
    const USER_2: AccountAddress = AccountAddress([17; 32]);

    fn default_ledger() -> FeeLedger<TestStateApi> {
        let mut state_builder = TestStateBuilder::new();
        FeeLedger::new(&mut state_builder)
    }

    #[concordium_test]
    fn test_accrue_fees() {
        let mut ledger = default_ledger();

        ledger.accrue(Amount::from_micro_ccd(200_000));
        ledger.accrue(Amount::from_micro_ccd(150_000));
        claim_eq!(ledger.accumulated_fees(), Amount::from_micro_ccd(350_000));
        claim_eq!(ledger.escrowed(), Amount::zero());
    }

    #[concordium_test]
    fn test_escrow_and_take_pending() {
        let mut ledger = default_ledger();

        ledger.escrow(USER_1, Amount::from_ccd(1));
        ledger.escrow(USER_1, Amount::from_ccd(2));
        ledger.escrow(USER_2, Amount::from_ccd(5));
        claim_eq!(ledger.pending_of(&USER_1), Amount::from_ccd(3));
        claim_eq!(ledger.pending_of(&USER_2), Amount::from_ccd(5));
        claim_eq!(ledger.escrowed(), Amount::from_ccd(8));

        claim_eq!(ledger.take_pending(&USER_1), Amount::from_ccd(3));
        claim_eq!(ledger.pending_of(&USER_1), Amount::zero());
        claim_eq!(ledger.escrowed(), Amount::from_ccd(5));

        // Nothing left to take
        claim_eq!(ledger.take_pending(&USER_1), Amount::zero());
        claim_eq!(ledger.escrowed(), Amount::from_ccd(5));
    }

    #[concordium_test]
    fn test_take_fees_leaves_escrow_untouched() {
        let mut ledger = default_ledger();

        ledger.accrue(Amount::from_micro_ccd(200_000));
        ledger.escrow(USER_1, Amount::from_micro_ccd(1_800_000));

        let fees = ledger.take_fees(Amount::from_ccd(2));
        claim_eq!(fees, Amount::from_micro_ccd(200_000));
        claim_eq!(ledger.accumulated_fees(), Amount::zero());
        claim_eq!(ledger.pending_of(&USER_1), Amount::from_micro_ccd(1_800_000));

        // Balance below escrow never yields a withdrawal
        claim_eq!(ledger.take_fees(Amount::from_ccd(1)), Amount::zero());
    }
}
