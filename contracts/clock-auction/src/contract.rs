use commons::{
    ContractTokenAmount, ContractTokenId, CustomContractError, HostNftExt, OnReceivingParameter,
};
use concordium_std::*;

use crate::events::AuctionEvents;
use crate::external::*;
use crate::state::{Auction, State};

/// Initialize the auction contract with no running auctions. The instantiating
/// account becomes the owner.
#[init(contract = "ClockAuction", parameter = "InitParams")]
fn contract_init<S: HasStateApi>(
    ctx: &impl HasInitContext,
    state_builder: &mut StateBuilder<S>,
) -> InitResult<State<S>> {
    let params = InitParams::deserial(&mut ctx.parameter_cursor())?;
    ensure!(
        params.fee_rate.is_valid(),
        CustomContractError::InvalidFeeRate.into()
    );

    Ok(State::new(
        state_builder,
        ctx.init_origin(),
        params.nft,
        params.fee_rate,
    ))
}

/// CIS-2 receive hook. Receiving a token from the asset registry starts an
/// auction with the terms encoded in the transfer data.
///
///  It rejects if:
///  - The contract is paused.
///  - The sender is not the configured asset registry.
///  - More than one token is transferred.
///  - The transfer data can not be parsed as `AuctionTerms`.
///  - The token is not held by this contract according to the registry.
///  - The token is already under auction, or the duration is zero.
#[receive(
    mutable,
    contract = "ClockAuction",
    name = "createAuction",
    parameter = "OnReceivingParameter",
    enable_logger
)]
fn contract_create_auction<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ReceiveResult<()> {
    let params = OnReceivingParameter::deserial(&mut ctx.parameter_cursor())?;
    host.state().pausable.ensure_not_paused()?;

    let nft = host.state().nft;
    ensure!(
        ctx.sender().matches_contract(&nft),
        CustomContractError::Unauthorized.into()
    );

    // Do not auction anything if no tokens were transfered
    if params.amount == ContractTokenAmount::from(0) {
        return Ok(());
    }
    ensure!(
        params.amount == ContractTokenAmount::from(1),
        CustomContractError::Unsupported.into()
    );

    let terms: AuctionTerms = from_bytes(params.data.as_ref())?;

    let in_custody = host
        .nft_owns(&nft, &params.token_id, Address::Contract(ctx.self_address()))
        .map_err(CustomContractError::from)?;
    ensure!(in_custody, CustomContractError::Unauthorized.into());

    let auction =
        host.state_mut()
            .create(params.token_id.clone(), terms, ctx.metadata().slot_time())?;

    logger.log(&AuctionEvents::created(&params.token_id, &auction))?;

    Ok(())
}

/// Buy the token at the current price. The attached amount must cover the
/// price; anything above it is refunded.
#[receive(
    mutable,
    payable,
    contract = "ClockAuction",
    name = "bid",
    parameter = "ContractTokenId",
    enable_logger
)]
fn contract_bid<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    amount: Amount,
    logger: &mut impl HasLogger,
) -> ReceiveResult<()> {
    let token = ContractTokenId::deserial(&mut ctx.parameter_cursor())?;
    host.state().pausable.ensure_not_paused()?;

    let bidder = if let Address::Account(bidder) = ctx.sender() {
        bidder
    } else {
        bail!(CustomContractError::OnlyAccountAddress.into());
    };

    // Auction is closed and the fee accrued before any outgoing call
    let settlement = host
        .state_mut()
        .settle(&token, ctx.metadata().slot_time(), amount)?;

    let nft = host.state().nft;
    host.nft_transfer(&nft, &token, Address::Contract(ctx.self_address()), bidder)
        .map_err(CustomContractError::from)?;

    logger.log(&AuctionEvents::successful(
        &token,
        &settlement.seller,
        &bidder,
        settlement.price,
        settlement.cut,
    ))?;

    pay_or_escrow(host, logger, &settlement.seller, settlement.proceeds)?;
    pay_or_escrow(host, logger, &bidder, settlement.refund)?;

    Ok(())
}

/// Stop an auction and return the token to the seller. Only the seller may
/// cancel, and only while the contract is running.
#[receive(
    mutable,
    contract = "ClockAuction",
    name = "cancelAuction",
    parameter = "ContractTokenId",
    enable_logger
)]
fn contract_cancel_auction<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ReceiveResult<()> {
    let token = ContractTokenId::deserial(&mut ctx.parameter_cursor())?;
    host.state().pausable.ensure_not_paused()?;

    let seller = host.state_mut().cancel(&token, &ctx.sender())?;
    return_token(ctx, host, logger, &token, &seller)
}

/// Owner escape hatch: stop any auction while the contract is paused.
#[receive(
    mutable,
    contract = "ClockAuction",
    name = "cancelAuctionWhenPaused",
    parameter = "ContractTokenId",
    enable_logger
)]
fn contract_cancel_auction_when_paused<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ReceiveResult<()> {
    let token = ContractTokenId::deserial(&mut ctx.parameter_cursor())?;
    host.state().ownable.ensure_owner(&ctx.sender())?;
    host.state().pausable.ensure_paused()?;

    let seller = host.state_mut().remove(&token)?;
    return_token(ctx, host, logger, &token, &seller)
}

#[receive(
    contract = "ClockAuction",
    name = "hasAuction",
    parameter = "ContractTokenId",
    return_value = "bool"
)]
fn contract_has_auction<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ReceiveResult<bool> {
    let token = ContractTokenId::deserial(&mut ctx.parameter_cursor())?;
    Ok(host.state().has_auction(&token))
}

#[receive(
    contract = "ClockAuction",
    name = "getAuction",
    parameter = "ContractTokenId",
    return_value = "Auction"
)]
fn contract_get_auction<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ReceiveResult<Auction> {
    let token = ContractTokenId::deserial(&mut ctx.parameter_cursor())?;
    Ok(host.state().auction(&token)?)
}

/// Price a bid has to cover at the current block time.
#[receive(
    contract = "ClockAuction",
    name = "getCurrentPrice",
    parameter = "ContractTokenId",
    return_value = "Amount"
)]
fn contract_get_current_price<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ReceiveResult<Amount> {
    let token = ContractTokenId::deserial(&mut ctx.parameter_cursor())?;
    let auction = host.state().auction(&token)?;
    Ok(auction.current_price(ctx.metadata().slot_time()))
}

#[receive(mutable, contract = "ClockAuction", name = "pause", enable_logger)]
fn contract_pause<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ReceiveResult<()> {
    let state = host.state_mut();
    state.pausable.pause(&state.ownable, &ctx.sender())?;

    let owner = state.ownable.owner();
    logger.log(&AuctionEvents::Paused(&owner))?;

    Ok(())
}

#[receive(mutable, contract = "ClockAuction", name = "unpause", enable_logger)]
fn contract_unpause<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ReceiveResult<()> {
    let state = host.state_mut();
    state.pausable.unpause(&state.ownable, &ctx.sender())?;

    let owner = state.ownable.owner();
    logger.log(&AuctionEvents::Unpaused(&owner))?;

    Ok(())
}

#[receive(
    contract = "ClockAuction",
    name = "isPaused",
    return_value = "bool"
)]
fn contract_is_paused<S: HasStateApi>(
    _ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ReceiveResult<bool> {
    Ok(host.state().pausable.is_paused())
}

/// Hand the contract over to another account. Takes effect immediately.
#[receive(
    mutable,
    contract = "ClockAuction",
    name = "transferOwnership",
    parameter = "AccountAddress",
    enable_logger
)]
fn contract_transfer_ownership<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ReceiveResult<()> {
    let new_owner = AccountAddress::deserial(&mut ctx.parameter_cursor())?;
    let previous_owner = host
        .state_mut()
        .ownable
        .transfer_ownership(&ctx.sender(), new_owner)?;

    logger.log(&AuctionEvents::ownership_transferred(
        &previous_owner,
        &new_owner,
    ))?;

    Ok(())
}

#[receive(
    contract = "ClockAuction",
    name = "getOwner",
    return_value = "AccountAddress"
)]
fn contract_get_owner<S: HasStateApi>(
    _ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ReceiveResult<AccountAddress> {
    Ok(host.state().ownable.owner())
}

/// Send the contract balance, minus escrowed payments, to the owner.
///
///  It rejects if:
///  - Sender is not the owner.
///  - The transfer to the owner fails.
#[receive(
    mutable,
    contract = "ClockAuction",
    name = "withdrawBalance",
    enable_logger
)]
fn contract_withdraw_balance<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ReceiveResult<()> {
    host.state().ownable.ensure_owner(&ctx.sender())?;

    let owner = host.state().ownable.owner();
    let balance = host.self_balance();
    let amount = host.state_mut().ledger.take_fees(balance);
    if amount == Amount::zero() {
        return Ok(());
    }

    host.invoke_transfer(&owner, amount)
        .map_err(CustomContractError::from)?;
    logger.log(&AuctionEvents::fees_withdrawn(&owner, amount))?;

    Ok(())
}

/// Claim payments that could not be delivered to the sender during settlement.
#[receive(
    mutable,
    contract = "ClockAuction",
    name = "withdrawPending",
    enable_logger
)]
fn contract_withdraw_pending<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ReceiveResult<()> {
    let account = if let Address::Account(account) = ctx.sender() {
        account
    } else {
        bail!(CustomContractError::OnlyAccountAddress.into());
    };

    let amount = host.state_mut().ledger.take_pending(&account);
    if amount == Amount::zero() {
        return Ok(());
    }

    host.invoke_transfer(&account, amount)
        .map_err(CustomContractError::from)?;
    logger.log(&AuctionEvents::pending_withdrawn(&account, amount))?;

    Ok(())
}

#[receive(
    contract = "ClockAuction",
    name = "pendingOf",
    parameter = "AccountAddress",
    return_value = "Amount"
)]
fn contract_pending_of<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ReceiveResult<Amount> {
    let account = AccountAddress::deserial(&mut ctx.parameter_cursor())?;
    Ok(host.state().ledger.pending_of(&account))
}

#[receive(contract = "ClockAuction", name = "view", return_value = "ViewState")]
fn contract_view<S: HasStateApi>(
    _ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ReceiveResult<ViewState> {
    let state = host.state();
    Ok(ViewState {
        owner: state.ownable.owner(),
        paused: state.pausable.is_paused(),
        nft: state.nft,
        fee_rate: state.fee_rate,
        accumulated_fees: state.ledger.accumulated_fees(),
        escrowed: state.ledger.escrowed(),
    })
}

/// Transfer the token back to `seller` after its auction was removed.
fn return_token<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
    token: &ContractTokenId,
    seller: &AccountAddress,
) -> ReceiveResult<()> {
    let nft = host.state().nft;
    host.nft_transfer(&nft, token, Address::Contract(ctx.self_address()), *seller)
        .map_err(CustomContractError::from)?;

    logger.log(&AuctionEvents::cancelled(token, seller))?;

    Ok(())
}

/// Pay `amount` to `account`. If the transfer fails the amount is kept for the
/// account to claim with `withdrawPending`.
fn pay_or_escrow<S: HasStateApi>(
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
    account: &AccountAddress,
    amount: Amount,
) -> ReceiveResult<()> {
    if amount == Amount::zero() {
        return Ok(());
    }

    if host.invoke_transfer(account, amount).is_err() {
        host.state_mut().ledger.escrow(*account, amount);
        logger.log(&AuctionEvents::payment_escrowed(account, amount))?;
    }

    Ok(())
}

#[concordium_cfg_test]
mod tests {
    use super::*;
    use commons::test::*;
    use commons::{BasisPoints, ContractBalanceOfQueryParams, TransferParameter};
    use concordium_cis2::*;
    use concordium_std::test_infrastructure::*;

    const NFT: ContractAddress = ContractAddress {
        index: 1,
        subindex: 0,
    };
    const AUCTION: ContractAddress = ContractAddress {
        index: 2,
        subindex: 0,
    };

    const ADMIN: AccountAddress = AccountAddress([1; 32]);
    const SELLER: AccountAddress = AccountAddress([16; 32]);
    const BIDDER: AccountAddress = AccountAddress([17; 32]);

    const FEE_RATE: BasisPoints = BasisPoints::new(1000);
    const START: u64 = 10_000;
    const DURATION: u64 = 1000;

    fn token() -> ContractTokenId {
        TokenIdVec(vec![1])
    }

    fn at(millis: u64) -> Timestamp {
        Timestamp::from_timestamp_millis(START + millis)
    }

    /// 2 CCD falling to 1 CCD over one second.
    fn default_terms() -> AuctionTerms {
        AuctionTerms {
            starting_price: Amount::from_ccd(2),
            ending_price: Amount::from_ccd(1),
            duration: Duration::from_millis(DURATION),
            seller: SELLER,
        }
    }

    fn default_host() -> TestHost<State<TestStateApi>> {
        let mut ctx = TestInitContext::empty();
        // owner is initialized to `ctx.init_origin()`
        let params = InitParams {
            nft: NFT,
            fee_rate: FEE_RATE,
        };
        let bytes = to_bytes(&params);
        ctx.set_init_origin(ADMIN).set_parameter(&bytes);
        let mut state_builder = TestStateBuilder::new();

        let state = contract_init(&ctx, &mut state_builder)
            .expect_report("Failed during init_ClockAuction");

        TestHost::new(state, state_builder)
    }

    /// Registry reports `balance` of the token for any queried address.
    fn nft_balance_mock(balance: u64) -> MockFn<State<TestStateApi>> {
        parse_and_map_mock::<ContractBalanceOfQueryParams, _, _>(move |_| {
            Some(BalanceOfQueryResponse(vec![ContractTokenAmount::from(
                balance,
            )]))
        })
    }

    /// Registry accepts a single token transfer to `account` only.
    fn nft_transfer_mock(account: AccountAddress) -> MockFn<State<TestStateApi>> {
        parse_and_check_mock::<TransferParameter, _>(
            move |params| {
                matches!(
                    &params.0[..],
                    [Transfer { to: Receiver::Account(to), .. }] if *to == account
                )
            },
            (),
        )
    }

    fn setup_nft(host: &mut TestHost<State<TestStateApi>>, recipient: AccountAddress) {
        host.setup_mock_entrypoint(
            NFT,
            OwnedEntrypointName::new_unchecked(String::from("balanceOf")),
            nft_balance_mock(1),
        );
        host.setup_mock_entrypoint(
            NFT,
            OwnedEntrypointName::new_unchecked(String::from("transfer")),
            nft_transfer_mock(recipient),
        );
    }

    fn receive_token(
        host: &mut TestHost<State<TestStateApi>>,
        logger: &mut TestLogger,
        sender: Address,
        amount: u64,
        terms: &AuctionTerms,
    ) -> ReceiveResult<()> {
        let params = OnReceivingParameter {
            token_id: token(),
            amount: ContractTokenAmount::from(amount),
            from: Address::Account(SELLER),
            data: AdditionalData::from(to_bytes(terms)),
        };
        let bytes = to_bytes(&params);
        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(sender)
            .set_self_address(AUCTION)
            .set_parameter(&bytes)
            .set_metadata_slot_time(at(0));

        contract_create_auction(&ctx, host, logger)
    }

    fn create_auction(host: &mut TestHost<State<TestStateApi>>, logger: &mut TestLogger) {
        let result = receive_token(host, logger, Address::Contract(NFT), 1, &default_terms());
        claim_eq!(result, Ok(()));
    }

    /// Place a bid, crediting the attached amount to the contract balance first.
    fn place_bid(
        host: &mut TestHost<State<TestStateApi>>,
        logger: &mut TestLogger,
        sender: Address,
        amount: Amount,
        elapsed: u64,
    ) -> ReceiveResult<()> {
        let bytes = to_bytes(&token());
        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(sender)
            .set_self_address(AUCTION)
            .set_parameter(&bytes)
            .set_metadata_slot_time(at(elapsed));

        let balance = host.self_balance();
        host.set_self_balance(balance + amount);
        contract_bid(&ctx, host, amount, logger)
    }

    fn new_ctx<'a>(sender: AccountAddress, parameter: &'a [u8]) -> TestReceiveContext<'a> {
        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(Address::Account(sender))
            .set_self_address(AUCTION)
            .set_parameter(parameter)
            .set_metadata_slot_time(at(0));
        ctx
    }

    fn has_auction(host: &TestHost<State<TestStateApi>>) -> bool {
        let bytes = to_bytes(&token());
        let mut ctx = TestReceiveContext::empty();
        ctx.set_parameter(&bytes);

        contract_has_auction(&ctx, host).expect_report("hasAuction never fails")
    }

    #[concordium_test]
    fn test_init() {
        let host = default_host();
        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(Address::Account(BIDDER));

        let view = contract_view(&ctx, &host);
        claim_eq!(
            view,
            Ok(ViewState {
                owner: ADMIN,
                paused: false,
                nft: NFT,
                fee_rate: FEE_RATE,
                accumulated_fees: Amount::zero(),
                escrowed: Amount::zero(),
            })
        );
        claim_eq!(contract_get_owner(&ctx, &host), Ok(ADMIN));
        claim_eq!(contract_is_paused(&ctx, &host), Ok(false));
        claim!(!has_auction(&host));
    }

    #[concordium_test]
    fn test_init_invalid_fee_rate() {
        let mut ctx = TestInitContext::empty();
        let params = InitParams {
            nft: NFT,
            fee_rate: BasisPoints::new(10_001),
        };
        let bytes = to_bytes(&params);
        ctx.set_init_origin(ADMIN).set_parameter(&bytes);
        let mut state_builder = TestStateBuilder::new();

        let result = contract_init(&ctx, &mut state_builder);
        claim_eq!(
            result.err(),
            Some(CustomContractError::InvalidFeeRate.into())
        );
    }

    #[concordium_test]
    fn test_create_auction() {
        let mut host = default_host();
        let mut logger = TestLogger::init();
        setup_nft(&mut host, SELLER);

        create_auction(&mut host, &mut logger);
        claim!(has_auction(&host));

        let auction = Auction {
            seller: SELLER,
            starting_price: Amount::from_ccd(2),
            ending_price: Amount::from_ccd(1),
            duration: Duration::from_millis(DURATION),
            started_at: at(0),
        };
        claim_eq!(host.state().auction(&token()), Ok(auction.clone()));
        claim_eq!(logger.logs.len(), 1, "Only one event should be logged");
        claim!(logger
            .logs
            .contains(&to_bytes(&AuctionEvents::created(&token(), &auction))));
    }

    #[concordium_test]
    fn test_create_auction_ignores_zero_amount() {
        let mut host = default_host();
        let mut logger = TestLogger::init();
        setup_nft(&mut host, SELLER);

        let result = receive_token(
            &mut host,
            &mut logger,
            Address::Contract(NFT),
            0,
            &default_terms(),
        );
        claim_eq!(result, Ok(()));
        claim!(!has_auction(&host));
        claim!(logger.logs.is_empty());

        let result = receive_token(
            &mut host,
            &mut logger,
            Address::Contract(NFT),
            2,
            &default_terms(),
        );
        claim_eq!(result, Err(CustomContractError::Unsupported.into()));
    }

    #[concordium_test]
    fn test_create_auction_from_unknown_contract() {
        let mut host = default_host();
        let mut logger = TestLogger::init();
        setup_nft(&mut host, SELLER);

        let result = receive_token(
            &mut host,
            &mut logger,
            Address::Contract(AUCTION),
            1,
            &default_terms(),
        );
        claim_eq!(result, Err(CustomContractError::Unauthorized.into()));

        let result = receive_token(
            &mut host,
            &mut logger,
            Address::Account(SELLER),
            1,
            &default_terms(),
        );
        claim_eq!(result, Err(CustomContractError::Unauthorized.into()));
        claim!(!has_auction(&host));
    }

    #[concordium_test]
    fn test_create_auction_without_custody() {
        let mut host = default_host();
        let mut logger = TestLogger::init();
        host.setup_mock_entrypoint(
            NFT,
            OwnedEntrypointName::new_unchecked(String::from("balanceOf")),
            nft_balance_mock(0),
        );

        let result = receive_token(
            &mut host,
            &mut logger,
            Address::Contract(NFT),
            1,
            &default_terms(),
        );
        claim_eq!(result, Err(CustomContractError::Unauthorized.into()));
        claim!(!has_auction(&host));
    }

    #[concordium_test]
    fn test_create_auction_invalid_terms() {
        let mut host = default_host();
        let mut logger = TestLogger::init();
        setup_nft(&mut host, SELLER);

        let terms = AuctionTerms {
            duration: Duration::from_millis(0),
            ..default_terms()
        };
        let result = receive_token(&mut host, &mut logger, Address::Contract(NFT), 1, &terms);
        claim_eq!(result, Err(CustomContractError::InvalidDuration.into()));
        claim!(!has_auction(&host));

        create_auction(&mut host, &mut logger);
        let result = receive_token(
            &mut host,
            &mut logger,
            Address::Contract(NFT),
            1,
            &default_terms(),
        );
        claim_eq!(result, Err(CustomContractError::AlreadyUnderAuction.into()));
    }

    #[concordium_test]
    fn test_cancel_auction() {
        let mut host = default_host();
        let mut logger = TestLogger::init();
        setup_nft(&mut host, SELLER);
        create_auction(&mut host, &mut logger);

        let result = contract_cancel_auction(
            &new_ctx(BIDDER, &to_bytes(&token())),
            &mut host,
            &mut logger,
        );
        claim_eq!(result, Err(CustomContractError::Unauthorized.into()));
        claim!(has_auction(&host));

        let result = contract_cancel_auction(
            &new_ctx(SELLER, &to_bytes(&token())),
            &mut host,
            &mut logger,
        );
        claim_eq!(result, Ok(()));
        claim!(!has_auction(&host));
        claim_eq!(host.state().ledger.accumulated_fees(), Amount::zero());
        claim!(logger
            .logs
            .contains(&to_bytes(&AuctionEvents::cancelled(&token(), &SELLER))));

        let result = contract_cancel_auction(
            &new_ctx(SELLER, &to_bytes(&token())),
            &mut host,
            &mut logger,
        );
        claim_eq!(result, Err(CustomContractError::NoSuchAuction.into()));
    }

    #[concordium_test]
    fn test_bid_at_starting_price() {
        let mut host = default_host();
        let mut logger = TestLogger::init();
        setup_nft(&mut host, BIDDER);
        create_auction(&mut host, &mut logger);

        let result = place_bid(
            &mut host,
            &mut logger,
            Address::Account(BIDDER),
            Amount::from_ccd(2),
            0,
        );
        claim_eq!(result, Ok(()));
        claim!(!has_auction(&host));

        // 10% of 2 CCD stays with the contract
        claim!(host.transfer_occurred(&SELLER, Amount::from_micro_ccd(1_800_000)));
        claim_eq!(host.self_balance(), Amount::from_micro_ccd(200_000));
        claim_eq!(
            host.state().ledger.accumulated_fees(),
            Amount::from_micro_ccd(200_000)
        );
        claim!(logger.logs.contains(&to_bytes(&AuctionEvents::successful(
            &token(),
            &SELLER,
            &BIDDER,
            Amount::from_ccd(2),
            Amount::from_micro_ccd(200_000),
        ))));

        let result = place_bid(
            &mut host,
            &mut logger,
            Address::Account(BIDDER),
            Amount::from_ccd(2),
            0,
        );
        claim_eq!(result, Err(CustomContractError::NoSuchAuction.into()));
    }

    #[concordium_test]
    fn test_bid_refunds_overpayment() {
        let mut host = default_host();
        let mut logger = TestLogger::init();
        setup_nft(&mut host, BIDDER);
        create_auction(&mut host, &mut logger);

        // Halfway through the price is 1.5 CCD
        let result = place_bid(
            &mut host,
            &mut logger,
            Address::Account(BIDDER),
            Amount::from_ccd(2),
            DURATION / 2,
        );
        claim_eq!(result, Ok(()));
        claim!(host.transfer_occurred(&SELLER, Amount::from_micro_ccd(1_350_000)));
        claim!(host.transfer_occurred(&BIDDER, Amount::from_micro_ccd(500_000)));
        claim_eq!(host.self_balance(), Amount::from_micro_ccd(150_000));
    }

    #[concordium_test]
    fn test_bid_insufficient_offer() {
        let mut host = default_host();
        let mut logger = TestLogger::init();
        setup_nft(&mut host, BIDDER);
        create_auction(&mut host, &mut logger);

        let result = place_bid(
            &mut host,
            &mut logger,
            Address::Account(BIDDER),
            Amount::from_micro_ccd(1_999_999),
            0,
        );
        claim_eq!(result, Err(CustomContractError::InsufficientOffer.into()));
        claim!(has_auction(&host));
    }

    #[concordium_test]
    fn test_bid_after_duration_pays_ending_price() {
        let mut host = default_host();
        let mut logger = TestLogger::init();
        setup_nft(&mut host, BIDDER);
        create_auction(&mut host, &mut logger);

        let mut ctx = TestReceiveContext::empty();
        let bytes = to_bytes(&token());
        ctx.set_parameter(&bytes)
            .set_metadata_slot_time(at(DURATION * 5));
        claim_eq!(
            contract_get_current_price(&ctx, &host),
            Ok(Amount::from_ccd(1))
        );

        let result = place_bid(
            &mut host,
            &mut logger,
            Address::Account(BIDDER),
            Amount::from_ccd(1),
            DURATION * 5,
        );
        claim_eq!(result, Ok(()));
        claim!(host.transfer_occurred(&SELLER, Amount::from_micro_ccd(900_000)));
        claim_eq!(host.self_balance(), Amount::from_micro_ccd(100_000));
    }

    #[concordium_test]
    fn test_bid_from_contract() {
        let mut host = default_host();
        let mut logger = TestLogger::init();
        setup_nft(&mut host, BIDDER);
        create_auction(&mut host, &mut logger);

        let result = place_bid(
            &mut host,
            &mut logger,
            Address::Contract(NFT),
            Amount::from_ccd(2),
            0,
        );
        claim_eq!(result, Err(CustomContractError::OnlyAccountAddress.into()));
        claim!(has_auction(&host));
    }

    #[concordium_test]
    fn test_bid_fails_when_token_transfer_fails() {
        let mut host = default_host();
        let mut logger = TestLogger::init();
        setup_nft(&mut host, BIDDER);
        create_auction(&mut host, &mut logger);
        host.setup_mock_entrypoint(
            NFT,
            OwnedEntrypointName::new_unchecked(String::from("transfer")),
            parse_and_check_mock::<TransferParameter, _>(|_| false, ()),
        );

        let result = place_bid(
            &mut host,
            &mut logger,
            Address::Account(BIDDER),
            Amount::from_ccd(2),
            0,
        );
        claim_eq!(result, Err(CustomContractError::InvokeContractError.into()));
    }

    #[concordium_test]
    fn test_failed_seller_payment_is_escrowed() {
        let mut host = default_host();
        let mut logger = TestLogger::init();
        setup_nft(&mut host, BIDDER);
        create_auction(&mut host, &mut logger);
        host.make_account_missing(SELLER);

        let result = place_bid(
            &mut host,
            &mut logger,
            Address::Account(BIDDER),
            Amount::from_ccd(2),
            0,
        );
        claim_eq!(result, Ok(()));
        claim!(!has_auction(&host));

        let proceeds = Amount::from_micro_ccd(1_800_000);
        claim_eq!(host.state().ledger.pending_of(&SELLER), proceeds);
        claim_eq!(host.state().ledger.escrowed(), proceeds);
        claim!(logger
            .logs
            .contains(&to_bytes(&AuctionEvents::payment_escrowed(&SELLER, proceeds))));

        // Escrow is not part of the withdrawable balance
        let result = contract_withdraw_balance(&new_ctx(ADMIN, &[]), &mut host, &mut logger);
        claim_eq!(result, Ok(()));
        claim!(host.transfer_occurred(&ADMIN, Amount::from_micro_ccd(200_000)));
        claim_eq!(host.self_balance(), proceeds);
    }

    #[concordium_test]
    fn test_failed_refund_is_escrowed() {
        let mut host = default_host();
        let mut logger = TestLogger::init();
        setup_nft(&mut host, BIDDER);
        create_auction(&mut host, &mut logger);
        host.make_account_missing(BIDDER);

        let result = place_bid(
            &mut host,
            &mut logger,
            Address::Account(BIDDER),
            Amount::from_ccd(3),
            0,
        );
        claim_eq!(result, Ok(()));
        claim!(host.transfer_occurred(&SELLER, Amount::from_micro_ccd(1_800_000)));

        let refund = Amount::from_ccd(1);
        claim_eq!(host.state().ledger.pending_of(&BIDDER), refund);
        claim_eq!(host.state().ledger.pending_of(&SELLER), Amount::zero());
        claim_eq!(host.state().ledger.escrowed(), refund);
        claim!(logger
            .logs
            .contains(&to_bytes(&AuctionEvents::payment_escrowed(&BIDDER, refund))));
        claim_eq!(host.self_balance(), refund + Amount::from_micro_ccd(200_000));
    }

    #[concordium_test]
    fn test_withdraw_pending() {
        let mut host = default_host();
        let mut logger = TestLogger::init();
        let pending = Amount::from_micro_ccd(1_800_000);
        host.state_mut().ledger.escrow(SELLER, pending);
        host.set_self_balance(pending);

        let mut ctx = TestReceiveContext::empty();
        let bytes = to_bytes(&SELLER);
        ctx.set_parameter(&bytes);
        claim_eq!(contract_pending_of(&ctx, &host), Ok(pending));

        let result = contract_withdraw_pending(&new_ctx(SELLER, &[]), &mut host, &mut logger);
        claim_eq!(result, Ok(()));
        claim!(host.transfer_occurred(&SELLER, pending));
        claim_eq!(host.state().ledger.pending_of(&SELLER), Amount::zero());
        claim_eq!(host.state().ledger.escrowed(), Amount::zero());
        claim!(logger
            .logs
            .contains(&to_bytes(&AuctionEvents::pending_withdrawn(&SELLER, pending))));

        // Nothing left to claim
        let logs = logger.logs.len();
        let result = contract_withdraw_pending(&new_ctx(SELLER, &[]), &mut host, &mut logger);
        claim_eq!(result, Ok(()));
        claim_eq!(logger.logs.len(), logs);
    }

    #[concordium_test]
    fn test_paused_contract() {
        let mut host = default_host();
        let mut logger = TestLogger::init();
        setup_nft(&mut host, BIDDER);
        create_auction(&mut host, &mut logger);

        let result = contract_pause(&new_ctx(ADMIN, &[]), &mut host, &mut logger);
        claim_eq!(result, Ok(()));
        claim!(logger
            .logs
            .contains(&to_bytes(&AuctionEvents::Paused(&ADMIN))));

        let result = receive_token(
            &mut host,
            &mut logger,
            Address::Contract(NFT),
            1,
            &default_terms(),
        );
        claim_eq!(result, Err(CustomContractError::PausedState.into()));

        let result = place_bid(
            &mut host,
            &mut logger,
            Address::Account(BIDDER),
            Amount::from_ccd(2),
            0,
        );
        claim_eq!(result, Err(CustomContractError::PausedState.into()));

        let result = contract_cancel_auction(
            &new_ctx(SELLER, &to_bytes(&token())),
            &mut host,
            &mut logger,
        );
        claim_eq!(result, Err(CustomContractError::PausedState.into()));

        // Reads are not affected
        claim!(has_auction(&host));
        let ctx = TestReceiveContext::empty();
        claim_eq!(contract_is_paused(&ctx, &host), Ok(true));

        let result = contract_unpause(&new_ctx(ADMIN, &[]), &mut host, &mut logger);
        claim_eq!(result, Ok(()));
        claim!(logger
            .logs
            .contains(&to_bytes(&AuctionEvents::Unpaused(&ADMIN))));

        let result = place_bid(
            &mut host,
            &mut logger,
            Address::Account(BIDDER),
            Amount::from_ccd(2),
            0,
        );
        claim_eq!(result, Ok(()));
    }

    #[concordium_test]
    fn test_owner_and_withdrawals_while_paused() {
        let mut host = default_host();
        let mut logger = TestLogger::init();
        setup_nft(&mut host, BIDDER);
        create_auction(&mut host, &mut logger);
        let result = place_bid(
            &mut host,
            &mut logger,
            Address::Account(BIDDER),
            Amount::from_ccd(2),
            0,
        );
        claim_eq!(result, Ok(()));

        let pending = Amount::from_ccd(1);
        host.state_mut().ledger.escrow(SELLER, pending);
        let balance = host.self_balance();
        host.set_self_balance(balance + pending);

        let result = contract_pause(&new_ctx(ADMIN, &[]), &mut host, &mut logger);
        claim_eq!(result, Ok(()));

        let result = contract_withdraw_balance(&new_ctx(ADMIN, &[]), &mut host, &mut logger);
        claim_eq!(result, Ok(()));
        claim!(host.transfer_occurred(&ADMIN, Amount::from_micro_ccd(200_000)));

        let result = contract_withdraw_pending(&new_ctx(SELLER, &[]), &mut host, &mut logger);
        claim_eq!(result, Ok(()));
        claim!(host.transfer_occurred(&SELLER, pending));
        claim_eq!(host.self_balance(), Amount::zero());

        let bytes = to_bytes(&SELLER);
        let result = contract_transfer_ownership(
            &new_ctx(ADMIN, &bytes),
            &mut host,
            &mut logger,
        );
        claim_eq!(result, Ok(()));
        claim_eq!(host.state().ownable.owner(), SELLER);
        claim!(host.state().pausable.is_paused());
    }

    #[concordium_test]
    fn test_pause_unauthorized() {
        let mut host = default_host();
        let mut logger = TestLogger::init();

        let result = contract_pause(&new_ctx(SELLER, &[]), &mut host, &mut logger);
        claim_eq!(result, Err(CustomContractError::Unauthorized.into()));
        claim!(!host.state().pausable.is_paused());

        let result = contract_pause(&new_ctx(ADMIN, &[]), &mut host, &mut logger);
        claim_eq!(result, Ok(()));

        let result = contract_unpause(&new_ctx(SELLER, &[]), &mut host, &mut logger);
        claim_eq!(result, Err(CustomContractError::Unauthorized.into()));
        claim!(host.state().pausable.is_paused());
    }

    #[concordium_test]
    fn test_cancel_auction_when_paused() {
        let mut host = default_host();
        let mut logger = TestLogger::init();
        setup_nft(&mut host, SELLER);
        create_auction(&mut host, &mut logger);

        let result = contract_cancel_auction_when_paused(
            &new_ctx(ADMIN, &to_bytes(&token())),
            &mut host,
            &mut logger,
        );
        claim_eq!(result, Err(CustomContractError::NotPaused.into()));

        let result = contract_pause(&new_ctx(ADMIN, &[]), &mut host, &mut logger);
        claim_eq!(result, Ok(()));

        let result = contract_cancel_auction_when_paused(
            &new_ctx(SELLER, &to_bytes(&token())),
            &mut host,
            &mut logger,
        );
        claim_eq!(result, Err(CustomContractError::Unauthorized.into()));
        claim!(has_auction(&host));

        let result = contract_cancel_auction_when_paused(
            &new_ctx(ADMIN, &to_bytes(&token())),
            &mut host,
            &mut logger,
        );
        claim_eq!(result, Ok(()));
        claim!(!has_auction(&host));
        claim!(logger
            .logs
            .contains(&to_bytes(&AuctionEvents::cancelled(&token(), &SELLER))));
    }

    #[concordium_test]
    fn test_withdraw_balance() {
        let mut host = default_host();
        let mut logger = TestLogger::init();
        setup_nft(&mut host, BIDDER);
        create_auction(&mut host, &mut logger);
        let result = place_bid(
            &mut host,
            &mut logger,
            Address::Account(BIDDER),
            Amount::from_ccd(2),
            0,
        );
        claim_eq!(result, Ok(()));

        let result = contract_withdraw_balance(&new_ctx(SELLER, &[]), &mut host, &mut logger);
        claim_eq!(result, Err(CustomContractError::Unauthorized.into()));

        let result = contract_withdraw_balance(&new_ctx(ADMIN, &[]), &mut host, &mut logger);
        claim_eq!(result, Ok(()));
        claim!(host.transfer_occurred(&ADMIN, Amount::from_micro_ccd(200_000)));
        claim_eq!(host.self_balance(), Amount::zero());
        claim_eq!(host.state().ledger.accumulated_fees(), Amount::zero());
        claim!(logger.logs.contains(&to_bytes(&AuctionEvents::fees_withdrawn(
            &ADMIN,
            Amount::from_micro_ccd(200_000)
        ))));

        // Empty balance is a no-op
        let logs = logger.logs.len();
        let result = contract_withdraw_balance(&new_ctx(ADMIN, &[]), &mut host, &mut logger);
        claim_eq!(result, Ok(()));
        claim_eq!(logger.logs.len(), logs);
    }

    #[concordium_test]
    fn test_transfer_ownership() {
        let mut host = default_host();
        let mut logger = TestLogger::init();

        let bytes = to_bytes(&SELLER);
        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(Address::Account(BIDDER)).set_parameter(&bytes);
        let result = contract_transfer_ownership(&ctx, &mut host, &mut logger);
        claim_eq!(result, Err(CustomContractError::Unauthorized.into()));
        claim_eq!(contract_get_owner(&ctx, &host), Ok(ADMIN));

        ctx.set_sender(Address::Account(ADMIN));
        let result = contract_transfer_ownership(&ctx, &mut host, &mut logger);
        claim_eq!(result, Ok(()));
        claim_eq!(contract_get_owner(&ctx, &host), Ok(SELLER));
        claim!(logger.logs.contains(&to_bytes(
            &AuctionEvents::ownership_transferred(&ADMIN, &SELLER)
        )));

        // Previous owner lost its rights
        let result = contract_pause(&new_ctx(ADMIN, &[]), &mut host, &mut logger);
        claim_eq!(result, Err(CustomContractError::Unauthorized.into()));
        let result = contract_pause(&new_ctx(SELLER, &[]), &mut host, &mut logger);
        claim_eq!(result, Ok(()));
    }

    #[concordium_test]
    fn test_get_current_price() {
        let mut host = default_host();
        let mut logger = TestLogger::init();
        setup_nft(&mut host, SELLER);

        let bytes = to_bytes(&token());
        let mut ctx = TestReceiveContext::empty();
        ctx.set_parameter(&bytes).set_metadata_slot_time(at(0));
        claim_eq!(
            contract_get_current_price(&ctx, &host),
            Err(CustomContractError::NoSuchAuction.into())
        );

        create_auction(&mut host, &mut logger);
        claim_eq!(
            contract_get_current_price(&ctx, &host),
            Ok(Amount::from_ccd(2))
        );

        ctx.set_metadata_slot_time(at(250));
        claim_eq!(
            contract_get_current_price(&ctx, &host),
            Ok(Amount::from_micro_ccd(1_750_000))
        );
        claim_eq!(
            contract_get_auction(&ctx, &host).map(|auction| auction.seller),
            Ok(SELLER)
        );
    }
}
