//! Test helpers for blockpoll.
//!
//! Deterministic stand-ins for the external collaborators of a poll:
//!
//! - [`ScriptedHeights`] - height source replaying a fixed sequence of reads
//! - [`TickingHeights`] - height source producing one block per interval of
//!   tokio time (pairs with `#[tokio::test(start_paused = true)]`)
//! - [`CheckRecorder`] - records the heights a check was evaluated at
//! - [`MockChain`] - in-memory [`ChainQuerier`](blockpoll_chain::ChainQuerier)
//!   whose balances and proposals change at scheduled heights

mod chain;
mod heights;
mod recorder;

pub use chain::MockChain;
pub use heights::{ScriptedHeights, TickingHeights};
pub use recorder::CheckRecorder;
