//! Polling feeds for the XRPool dashboard
//!
//! Each feed owns one externally-sourced value and its error state,
//! refreshed on a timer:
//! - Pool-amount feed: spreadsheet CSV export, first cell of the first row
//! - Price feed: market-data JSON endpoint, nested USD field
//!
//! Successful and failed cycles are published atomically through a
//! [`FeedSlot`]; a generation counter discards out-of-order completions.

pub mod fetch;
pub mod poller;
pub mod pool;
pub mod price;
pub mod slot;

pub use fetch::{Fetch, HttpFetch};
pub use poller::{spawn_poller, PollHandle};
pub use pool::PoolAmountSource;
pub use price::UnitPriceSource;
pub use slot::{FeedSlot, GenerationGate, Reading};
