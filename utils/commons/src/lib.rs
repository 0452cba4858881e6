//! It exposes the structs, errors and access control modules shared by the
//! auction contracts.
#![cfg_attr(not(feature = "std"), no_std)]
pub use crate::{
    constants::*, errors::*, nft::*, ownable::*, pausable::*, structs::*, types::*,
};
use concordium_cis2::*;
use concordium_std::*;

pub mod test;

mod constants;
mod errors;
mod nft;
mod ownable;
mod pausable;
mod structs;
mod types;
