use commons::{
    ContractTokenId, AUCTION_CANCELLED_TAG, AUCTION_CREATED_TAG, AUCTION_SUCCESSFUL_TAG,
    FEES_WITHDRAWN_TAG, OWNERSHIP_TRANSFERRED_TAG, PAUSED_TAG, PAYMENT_ESCROWED_TAG,
    PENDING_WITHDRAWN_TAG, UNPAUSED_TAG,
};
use concordium_std::*;

use crate::state::Auction;

/// Auction creation event data.
#[derive(Debug, Serial)]
pub struct CreatedEvent<'a> {
    /// NFT token identifier.
    pub id: &'a ContractTokenId,
    /// Auction terms and start time.
    pub auction: &'a Auction,
}

/// Successful bid event data.
#[derive(Debug, Serial)]
pub struct SuccessfulEvent<'a> {
    /// NFT token identifier.
    pub id: &'a ContractTokenId,
    pub seller: &'a AccountAddress,
    pub winner: &'a AccountAddress,
    /// Final sale price.
    pub price: Amount,
    /// Platform fee cut.
    pub cut: Amount,
}

/// Cancel auction event data.
#[derive(Debug, Serial)]
pub struct CancelledEvent<'a> {
    /// NFT token identifier.
    pub id: &'a ContractTokenId,
    /// Account the token was returned to.
    pub seller: &'a AccountAddress,
}

/// Account balance event data.
#[derive(Debug, Serial)]
pub struct PaymentEvent<'a> {
    pub account: &'a AccountAddress,
    pub amount: Amount,
}

/// Ownership change event data.
#[derive(Debug, Serial)]
pub struct OwnershipEvent<'a> {
    pub previous_owner: &'a AccountAddress,
    pub new_owner: &'a AccountAddress,
}

/// Tagged Custom event to be serialized for the event log.
#[derive(Debug)]
pub enum AuctionEvents<'a> {
    Created(CreatedEvent<'a>),
    Successful(SuccessfulEvent<'a>),
    Cancelled(CancelledEvent<'a>),
    /// Payment that could not be delivered and was kept for the account.
    PaymentEscrowed(PaymentEvent<'a>),
    PendingWithdrawn(PaymentEvent<'a>),
    FeesWithdrawn(PaymentEvent<'a>),
    Paused(&'a AccountAddress),
    Unpaused(&'a AccountAddress),
    OwnershipTransferred(OwnershipEvent<'a>),
}

impl<'a> AuctionEvents<'a> {
    pub fn created(id: &'a ContractTokenId, auction: &'a Auction) -> Self {
        Self::Created(CreatedEvent { id, auction })
    }

    pub fn successful(
        id: &'a ContractTokenId,
        seller: &'a AccountAddress,
        winner: &'a AccountAddress,
        price: Amount,
        cut: Amount,
    ) -> Self {
        Self::Successful(SuccessfulEvent {
            id,
            seller,
            winner,
            price,
            cut,
        })
    }

    pub fn cancelled(id: &'a ContractTokenId, seller: &'a AccountAddress) -> Self {
        Self::Cancelled(CancelledEvent { id, seller })
    }

    pub fn payment_escrowed(account: &'a AccountAddress, amount: Amount) -> Self {
        Self::PaymentEscrowed(PaymentEvent { account, amount })
    }

    pub fn pending_withdrawn(account: &'a AccountAddress, amount: Amount) -> Self {
        Self::PendingWithdrawn(PaymentEvent { account, amount })
    }

    pub fn fees_withdrawn(account: &'a AccountAddress, amount: Amount) -> Self {
        Self::FeesWithdrawn(PaymentEvent { account, amount })
    }

    pub fn ownership_transferred(
        previous_owner: &'a AccountAddress,
        new_owner: &'a AccountAddress,
    ) -> Self {
        Self::OwnershipTransferred(OwnershipEvent {
            previous_owner,
            new_owner,
        })
    }
}

impl<'a> Serial for AuctionEvents<'a> {
    fn serial<W: Write>(&self, out: &mut W) -> Result<(), W::Err> {
        match self {
            AuctionEvents::Created(event) => {
                out.write_u8(AUCTION_CREATED_TAG)?;
                event.serial(out)
            }
            AuctionEvents::Successful(event) => {
                out.write_u8(AUCTION_SUCCESSFUL_TAG)?;
                event.serial(out)
            }
            AuctionEvents::Cancelled(event) => {
                out.write_u8(AUCTION_CANCELLED_TAG)?;
                event.serial(out)
            }
            AuctionEvents::PaymentEscrowed(event) => {
                out.write_u8(PAYMENT_ESCROWED_TAG)?;
                event.serial(out)
            }
            AuctionEvents::PendingWithdrawn(event) => {
                out.write_u8(PENDING_WITHDRAWN_TAG)?;
                event.serial(out)
            }
            AuctionEvents::FeesWithdrawn(event) => {
                out.write_u8(FEES_WITHDRAWN_TAG)?;
                event.serial(out)
            }
            AuctionEvents::Paused(owner) => {
                out.write_u8(PAUSED_TAG)?;
                owner.serial(out)
            }
            AuctionEvents::Unpaused(owner) => {
                out.write_u8(UNPAUSED_TAG)?;
                owner.serial(out)
            }
            AuctionEvents::OwnershipTransferred(event) => {
                out.write_u8(OWNERSHIP_TRANSFERRED_TAG)?;
                event.serial(out)
            }
        }
    }
}
