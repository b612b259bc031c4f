//! Core types for blockpoll.
//!
//! This crate holds the plain data shared by the poll engine and the chain
//! call sites:
//!
//! - [`BlockHeight`] - the external progress counter polls are windowed on
//! - [`PollWindow`] - validated inclusive height range for one poll
//! - [`WalletAmount`] - expected balance of an `(address, denom)` pair
//! - [`ProposalResponse`] - governance proposal record returned by a chain

mod height;
mod proposal;
mod wallet;
mod window;

pub use height::BlockHeight;
pub use proposal::{
    Coin, ProposalContent, ProposalResponse, TallyResult, PROPOSAL_STATUS_DEPOSIT_PERIOD,
    PROPOSAL_STATUS_FAILED, PROPOSAL_STATUS_PASSED, PROPOSAL_STATUS_REJECTED,
    PROPOSAL_STATUS_UNSPECIFIED, PROPOSAL_STATUS_VOTING_PERIOD,
};
pub use wallet::WalletAmount;
pub use window::{PollWindow, WindowError};
