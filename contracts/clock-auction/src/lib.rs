//! A clock (Dutch) auction for CIS-2 tokens.
//!
//! # Description
//! A token owner starts an auction by transferring the token from the
//! configured asset registry to this contract with the auction terms attached
//! as additional data. The asking price moves linearly from the starting
//! price to the ending price over the auction duration and stays at the
//! ending price afterwards. The first bid that covers the current price buys
//! the token; the platform keeps a fee cut and the rest goes to the seller.
//! Payments that cannot be delivered are kept in escrow for the recipient.
//!
//! The contract owner can pause all auction activity, cancel auctions while
//! paused, withdraw accumulated fees and hand over ownership.
#![cfg_attr(not(feature = "std"), no_std)]

mod contract;
mod events;
mod external;
mod ledger;
mod state;
