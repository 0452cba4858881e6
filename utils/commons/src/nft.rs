use super::*;

/// Calls into the CIS-2 asset registry holding the auctioned tokens.
pub trait HostNftExt<S>: HasHost<S> {
    /// Move a single token `from` its current holder to the `to` account.
    fn nft_transfer(
        &mut self,
        contract: &ContractAddress,
        token_id: &ContractTokenId,
        from: Address,
        to: AccountAddress,
    ) -> Result<(), CallContractError<Self::ReturnValueType>> {
        let transfer = Transfer {
            token_id: token_id.clone(),
            amount: ContractTokenAmount::from(1),
            from,
            to: Receiver::Account(to),
            data: AdditionalData::empty(),
        };

        self.invoke_contract(
            contract,
            &TransferParams(vec![transfer]),
            EntrypointName::new_unchecked("transfer"),
            Amount::zero(),
        )?;

        Ok(())
    }

    /// Whether `owner` currently holds the token according to the registry.
    fn nft_owns(
        &mut self,
        contract: &ContractAddress,
        token_id: &ContractTokenId,
        owner: Address,
    ) -> Result<bool, ContractReadError<Self::ReturnValueType>> {
        let params = ContractBalanceOfQueryParams {
            queries: vec![BalanceOfQuery {
                token_id: token_id.clone(),
                address: owner,
            }],
        };

        let (_, response) = self
            .invoke_contract(
                contract,
                &params,
                EntrypointName::new_unchecked("balanceOf"),
                Amount::zero(),
            )
            .map_err(ContractReadError::Call)?;
        let mut response = response.ok_or(ContractReadError::Compatibility)?;

        let balances = ContractBalanceOfQueryResponse::deserial(&mut response)
            .map_err(|_| ContractReadError::Parse)?;

        Ok(balances
            .0
            .first()
            .map_or(false, |balance| *balance != ContractTokenAmount::from(0)))
    }
}

impl<S, H: HasHost<S>> HostNftExt<S> for H {}
