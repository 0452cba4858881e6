use commons::BasisPoints;
use concordium_std::*;

#[derive(Debug, Clone, SchemaType, Serialize)]
pub struct InitParams {
    /// Asset registry whose tokens are auctioned.
    pub nft: ContractAddress,
    /// Platform fee taken from every sale.
    pub fee_rate: BasisPoints,
}

/// Auction terms, passed as additional data of the token transfer that starts the auction.
#[derive(Debug, Clone, SchemaType, Serialize)]
pub struct AuctionTerms {
    /// Price at the start of the auction.
    pub starting_price: Amount,
    /// Price once `duration` has passed. May be above, below or equal to the starting price.
    pub ending_price: Amount,
    /// Time over which the price moves. Must not be zero.
    pub duration: Duration,
    /// Account receiving the sale proceeds.
    pub seller: AccountAddress,
}

/// Contract configuration and fee ledger totals.
#[derive(Debug, Clone, SchemaType, Serialize, PartialEq, Eq)]
pub struct ViewState {
    pub owner: AccountAddress,
    pub paused: bool,
    pub nft: ContractAddress,
    pub fee_rate: BasisPoints,
    pub accumulated_fees: Amount,
    pub escrowed: Amount,
}
