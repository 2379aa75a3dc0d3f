//! Conversation synchronization and action engine.
//!
//! The backend owns all truth; this module keeps the client's cached
//! projection consistent with it:
//!
//! - [`subscriptions`] binds push listeners to exactly the selected
//!   conversation, discarding old listeners before binding new ones.
//! - [`controller`] refreshes the cache on selection changes and push events,
//!   discarding any fetch result whose conversation is no longer selected.
//! - [`actions`] validates and issues user actions (send, rerun, approve,
//!   cancel, delete) against the gateway.
//! - [`engine`] wires the pieces to the browser transport and the UI signals.

pub mod actions;
pub mod controller;
pub mod engine;
pub mod subscriptions;

#[cfg(test)]
pub(crate) mod mock_gateway;
