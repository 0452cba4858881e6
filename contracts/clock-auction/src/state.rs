use commons::{BasisPoints, ContractTokenId, CustomContractError, Ownable, Pausable};
use concordium_std::*;

use crate::{external::AuctionTerms, ledger::FeeLedger};

/// Running auction of a single token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, SchemaType)]
pub struct Auction {
    /// Account receiving the sale proceeds and allowed to cancel.
    pub seller: AccountAddress,
    pub starting_price: Amount,
    pub ending_price: Amount,
    pub duration: Duration,
    /// Block time at which the token was received.
    pub started_at: Timestamp,
}

impl Auction {
    pub fn new(terms: AuctionTerms, started_at: Timestamp) -> Result<Self, CustomContractError> {
        ensure!(
            terms.duration.millis() > 0,
            CustomContractError::InvalidDuration
        );

        Ok(Self {
            seller: terms.seller,
            starting_price: terms.starting_price,
            ending_price: terms.ending_price,
            duration: terms.duration,
            started_at,
        })
    }

    /// Asking price at `now`.
    ///
    /// Moves linearly from the starting price to the ending price and stays at
    /// the ending price once the duration has passed. Fractional micro CCD are
    /// resolved in favour of the seller.
    pub fn current_price(&self, now: Timestamp) -> Amount {
        let duration = self.duration.millis() as u128;
        let elapsed = now
            .duration_since(self.started_at)
            .map_or(0, |elapsed| elapsed.millis() as u128)
            .min(duration);

        let start = self.starting_price.micro_ccd as u128;
        let end = self.ending_price.micro_ccd as u128;

        let price = if start >= end {
            // Floored decrement keeps the price on or above the curve
            start - (start - end) * elapsed / duration
        } else {
            start + ((end - start) * elapsed + duration - 1) / duration
        };

        Amount::from_micro_ccd(price as u64)
    }
}

/// Money movements owed after a successful bid. Must be paid out by the caller.
#[must_use]
#[derive(Debug, PartialEq, Eq)]
pub struct Settlement {
    pub seller: AccountAddress,
    /// Price the token was sold at.
    pub price: Amount,
    /// Platform fee cut, already accrued in the ledger.
    pub cut: Amount,
    /// Seller share, `price - cut`.
    pub proceeds: Amount,
    /// Overpayment owed back to the bidder.
    pub refund: Amount,
}

/// The contract state.
#[derive(Serial, DeserialWithState)]
#[concordium(state_parameter = "S")]
pub struct State<S: HasStateApi> {
    /// Contract owner.
    pub ownable: Ownable,
    /// Pause switch for auction activity.
    pub pausable: Pausable,
    /// Asset registry whose tokens are auctioned.
    pub nft: ContractAddress,
    /// Platform fee applied to every sale.
    pub fee_rate: BasisPoints,
    /// Fees and undelivered payments.
    pub ledger: FeeLedger<S>,
    /// Running auctions by token.
    auctions: StateMap<ContractTokenId, Auction, S>,
}

impl<S: HasStateApi> State<S> {
    /// Create a new state with no auctions.
    pub fn new(
        state_builder: &mut StateBuilder<S>,
        owner: AccountAddress,
        nft: ContractAddress,
        fee_rate: BasisPoints,
    ) -> Self {
        State {
            ownable: Ownable::new(owner),
            pausable: Pausable::default(),
            nft,
            fee_rate,
            ledger: FeeLedger::new(state_builder),
            auctions: state_builder.new_map(),
        }
    }

    pub fn has_auction(&self, token: &ContractTokenId) -> bool {
        self.auctions.get(token).is_some()
    }

    pub fn auction(&self, token: &ContractTokenId) -> Result<Auction, CustomContractError> {
        self.auctions
            .get(token)
            .map(|auction| (*auction).clone())
            .ok_or(CustomContractError::NoSuchAuction)
    }

    /// Register a new auction for `token` starting at `slot_time`.
    pub fn create(
        &mut self,
        token: ContractTokenId,
        terms: AuctionTerms,
        slot_time: Timestamp,
    ) -> Result<Auction, CustomContractError> {
        ensure!(
            !self.has_auction(&token),
            CustomContractError::AlreadyUnderAuction
        );
        let auction = Auction::new(terms, slot_time)?;
        self.auctions.insert(token, auction.clone());
        Ok(auction)
    }

    /// Remove an auction on behalf of its seller, returning the seller.
    pub fn cancel(
        &mut self,
        token: &ContractTokenId,
        sender: &Address,
    ) -> Result<AccountAddress, CustomContractError> {
        let seller = self.auction(token)?.seller;
        ensure!(
            sender.matches_account(&seller),
            CustomContractError::Unauthorized
        );
        self.auctions.remove(token);
        Ok(seller)
    }

    /// Remove an auction regardless of the caller, returning the seller.
    pub fn remove(
        &mut self,
        token: &ContractTokenId,
    ) -> Result<AccountAddress, CustomContractError> {
        self.auctions
            .remove_and_get(token)
            .map(|auction| auction.seller)
            .ok_or(CustomContractError::NoSuchAuction)
    }

    /// Close the auction of `token` with an offer of `offered` at `now`.
    ///
    /// The fee cut is accrued before returning; the caller owes the rest.
    pub fn settle(
        &mut self,
        token: &ContractTokenId,
        now: Timestamp,
        offered: Amount,
    ) -> Result<Settlement, CustomContractError> {
        let auction = self.auction(token)?;
        let price = auction.current_price(now);
        ensure!(offered >= price, CustomContractError::InsufficientOffer);

        self.auctions.remove(token);

        let cut = self.fee_rate * price;
        self.ledger.accrue(cut);

        Ok(Settlement {
            seller: auction.seller,
            price,
            cut,
            proceeds: price - cut,
            refund: offered - price,
        })
    }
}

#[concordium_cfg_test]
mod tests {
    use super::*;
    use concordium_cis2::TokenIdVec;
    use concordium_std::test_infrastructure::*;

    const OWNER: AccountAddress = AccountAddress([1; 32]);
    const SELLER: AccountAddress = AccountAddress([16; 32]);
    const BIDDER: AccountAddress = AccountAddress([17; 32]);
    const NFT: ContractAddress = ContractAddress {
        index: 1,
        subindex: 0,
    };
    const START: u64 = 10_000;

    fn token() -> ContractTokenId {
        TokenIdVec(vec![1])
    }

    fn terms(starting_price: u64, ending_price: u64, duration: u64) -> AuctionTerms {
        AuctionTerms {
            starting_price: Amount::from_micro_ccd(starting_price),
            ending_price: Amount::from_micro_ccd(ending_price),
            duration: Duration::from_millis(duration),
            seller: SELLER,
        }
    }

    fn at(millis: u64) -> Timestamp {
        Timestamp::from_timestamp_millis(START + millis)
    }

    fn auction(starting_price: u64, ending_price: u64, duration: u64) -> Auction {
        Auction::new(terms(starting_price, ending_price, duration), at(0))
            .expect_report("Valid auction terms")
    }

    fn default_state() -> State<TestStateApi> {
        let mut state_builder = TestStateBuilder::new();
        State::new(&mut state_builder, OWNER, NFT, BasisPoints::new(1000))
    }

    #[concordium_test]
    fn test_zero_duration_rejected() {
        let result = Auction::new(terms(100, 0, 0), at(0));
        claim_eq!(result, Err(CustomContractError::InvalidDuration));
    }

    #[concordium_test]
    fn test_descending_price() {
        let auction = auction(2_000_000, 1_000_000, 1000);

        claim_eq!(auction.current_price(at(0)), Amount::from_micro_ccd(2_000_000));
        claim_eq!(auction.current_price(at(500)), Amount::from_micro_ccd(1_500_000));
        claim_eq!(auction.current_price(at(1000)), Amount::from_micro_ccd(1_000_000));
        // Stays at the ending price
        claim_eq!(auction.current_price(at(5000)), Amount::from_micro_ccd(1_000_000));
        // Slot time before the start is treated as the start
        claim_eq!(
            auction.current_price(Timestamp::from_timestamp_millis(0)),
            Amount::from_micro_ccd(2_000_000)
        );
    }

    #[concordium_test]
    fn test_descending_price_never_increases() {
        let auction = auction(1000, 7, 333);

        let mut previous = auction.current_price(at(0));
        for elapsed in 1..400 {
            let price = auction.current_price(at(elapsed));
            claim!(price <= previous);
            claim!(price >= Amount::from_micro_ccd(7));
            previous = price;
        }
        claim_eq!(previous, Amount::from_micro_ccd(7));
    }

    #[concordium_test]
    fn test_descending_price_rounds_up() {
        // 10 * 1 / 3 = 3.33.. is floored, leaving 6.66.. rounded to 7
        let auction = auction(10, 0, 3);
        claim_eq!(auction.current_price(at(1)), Amount::from_micro_ccd(7));
        claim_eq!(auction.current_price(at(2)), Amount::from_micro_ccd(4));
    }

    #[concordium_test]
    fn test_ascending_price_rounds_up() {
        let auction = auction(0, 10, 3);

        claim_eq!(auction.current_price(at(0)), Amount::zero());
        claim_eq!(auction.current_price(at(1)), Amount::from_micro_ccd(4));
        claim_eq!(auction.current_price(at(2)), Amount::from_micro_ccd(7));
        claim_eq!(auction.current_price(at(3)), Amount::from_micro_ccd(10));
        claim_eq!(auction.current_price(at(4)), Amount::from_micro_ccd(10));
    }

    #[concordium_test]
    fn test_flat_price() {
        let auction = auction(5_000, 5_000, 1000);

        claim_eq!(auction.current_price(at(0)), Amount::from_micro_ccd(5_000));
        claim_eq!(auction.current_price(at(999)), Amount::from_micro_ccd(5_000));
    }

    #[concordium_test]
    fn test_large_prices_do_not_overflow() {
        let auction = auction(u64::MAX, 0, u64::MAX);

        claim_eq!(auction.current_price(at(0)), Amount::from_micro_ccd(u64::MAX));
        claim_eq!(
            auction.current_price(at(u64::MAX - START)),
            Amount::from_micro_ccd(START)
        );
    }

    #[concordium_test]
    fn test_create_and_duplicate() {
        let mut state = default_state();

        let created = state
            .create(token(), terms(100, 10, 1000), at(0))
            .expect_report("Auction should be created");
        claim_eq!(created.seller, SELLER);
        claim_eq!(created.started_at, at(0));
        claim!(state.has_auction(&token()));
        claim_eq!(state.auction(&token()), Ok(created));

        let result = state.create(token(), terms(1, 1, 1), at(5));
        claim_eq!(result, Err(CustomContractError::AlreadyUnderAuction));
        claim_eq!(
            state.auction(&token()).map(|a| a.starting_price),
            Ok(Amount::from_micro_ccd(100))
        );
    }

    #[concordium_test]
    fn test_create_invalid_duration_leaves_no_auction() {
        let mut state = default_state();

        let result = state.create(token(), terms(100, 10, 0), at(0));
        claim_eq!(result, Err(CustomContractError::InvalidDuration));
        claim!(!state.has_auction(&token()));
    }

    #[concordium_test]
    fn test_cancel() {
        let mut state = default_state();
        state
            .create(token(), terms(100, 10, 1000), at(0))
            .expect_report("Auction should be created");

        let result = state.cancel(&token(), &Address::Account(BIDDER));
        claim_eq!(result, Err(CustomContractError::Unauthorized));
        claim!(state.has_auction(&token()));

        let result = state.cancel(&token(), &Address::Account(SELLER));
        claim_eq!(result, Ok(SELLER));
        claim!(!state.has_auction(&token()));

        let result = state.cancel(&token(), &Address::Account(SELLER));
        claim_eq!(result, Err(CustomContractError::NoSuchAuction));
    }

    #[concordium_test]
    fn test_remove() {
        let mut state = default_state();
        claim_eq!(state.remove(&token()), Err(CustomContractError::NoSuchAuction));

        state
            .create(token(), terms(100, 10, 1000), at(0))
            .expect_report("Auction should be created");
        claim_eq!(state.remove(&token()), Ok(SELLER));
        claim!(!state.has_auction(&token()));
    }

    #[concordium_test]
    fn test_settle_splits_payment() {
        let mut state = default_state();
        state
            .create(token(), terms(2_000_000, 1_000_000, 1000), at(0))
            .expect_report("Auction should be created");

        let result = state.settle(&token(), at(500), Amount::from_micro_ccd(1_499_999));
        claim_eq!(result, Err(CustomContractError::InsufficientOffer));
        claim!(state.has_auction(&token()));

        let settlement = state
            .settle(&token(), at(500), Amount::from_ccd(2))
            .expect_report("Offer covers the price");
        claim_eq!(
            settlement,
            Settlement {
                seller: SELLER,
                price: Amount::from_micro_ccd(1_500_000),
                cut: Amount::from_micro_ccd(150_000),
                proceeds: Amount::from_micro_ccd(1_350_000),
                refund: Amount::from_micro_ccd(500_000),
            }
        );
        claim_eq!(settlement.cut + settlement.proceeds, settlement.price);
        claim_eq!(state.ledger.accumulated_fees(), Amount::from_micro_ccd(150_000));
        claim!(!state.has_auction(&token()));

        let result = state.settle(&token(), at(600), Amount::from_ccd(2));
        claim_eq!(result, Err(CustomContractError::NoSuchAuction));
    }

    #[concordium_test]
    fn test_settle_free_auction() {
        let mut state = default_state();
        state
            .create(token(), terms(0, 0, 1000), at(0))
            .expect_report("Auction should be created");

        let settlement = state
            .settle(&token(), at(0), Amount::zero())
            .expect_report("Free token can be claimed");
        claim_eq!(settlement.price, Amount::zero());
        claim_eq!(settlement.cut, Amount::zero());
        claim_eq!(settlement.refund, Amount::zero());
    }
}
