/// Tag for the AuctionCreated event.
pub const AUCTION_CREATED_TAG: u8 = u8::MAX;

/// Tag for the AuctionSuccessful event.
pub const AUCTION_SUCCESSFUL_TAG: u8 = u8::MAX - 1;

/// Tag for the AuctionCancelled event.
pub const AUCTION_CANCELLED_TAG: u8 = u8::MAX - 2;

/// Tag for the PaymentEscrowed event.
pub const PAYMENT_ESCROWED_TAG: u8 = u8::MAX - 3;

/// Tag for the PendingWithdrawn event.
pub const PENDING_WITHDRAWN_TAG: u8 = u8::MAX - 4;

/// Tag for the FeesWithdrawn event.
pub const FEES_WITHDRAWN_TAG: u8 = u8::MAX - 5;

/// Tag for the Paused event.
pub const PAUSED_TAG: u8 = u8::MAX - 6;

/// Tag for the Unpaused event.
pub const UNPAUSED_TAG: u8 = u8::MAX - 7;

/// Tag for the OwnershipTransferred event.
pub const OWNERSHIP_TRANSFERRED_TAG: u8 = u8::MAX - 8;

/// Basis points in one whole, i.e. 100%.
pub const BASIS_POINTS_DENOMINATOR: u64 = 10_000;
