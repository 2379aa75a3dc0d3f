//! Shared client-side state.
//!
//! DESIGN
//! ======
//! State is split by domain so individual components can depend on small
//! focused models. Every struct here is plain data with pure mutation helpers;
//! reactivity comes from wrapping them in `RwSignal` at the app layer, and the
//! sync core reaches them through the [`store::Store`] seam so it can be tested
//! natively against `Rc<RefCell<_>>`.

pub mod conversation;
pub mod conversations;
pub mod errors;
pub mod settings;
pub mod store;
