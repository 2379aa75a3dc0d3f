//! Backend boundary: wire types, the request/response gateway, and the
//! push-notification plumbing.

pub mod events;
pub mod gateway;
#[cfg(feature = "hydrate")]
pub mod push;
pub mod types;
