//! Search session state and the store that mutates it.

pub mod state;
pub mod store;

pub use state::{SearchSession, SearchStatus};
pub use store::{SearchOutcome, SearchSessionStore, SupersedePolicy};
