use super::*;

/// Token ID type of the asset registry contract.
pub type ContractTokenId = TokenIdVec;

/// Token amount type of the asset registry contract.
pub type ContractTokenAmount = TokenAmountU64;

pub type TransferParameter = TransferParams<ContractTokenId, ContractTokenAmount>;

/// Parameter of the CIS-2 receive hook specialized to the token types used by
/// the asset registry.
pub type OnReceivingParameter = OnReceivingCis2Params<ContractTokenId, ContractTokenAmount>;

/// Parameter type for the CIS-2 function `balanceOf` specialized to the subset
/// of TokenIDs used by this contract.
pub type ContractBalanceOfQueryParams = BalanceOfQueryParams<ContractTokenId>;

/// Response type for the CIS-2 function `balanceOf` specialized to the subset
/// of TokenAmounts used by this contract.
pub type ContractBalanceOfQueryResponse = BalanceOfQueryResponse<ContractTokenAmount>;
