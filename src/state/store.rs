//! Seam between the sync core and wherever the cached state actually lives.
//!
//! The UI keeps state in `RwSignal`s; native tests keep it in `Rc<RefCell<_>>`.
//! The core only ever needs two operations — an untracked read and a write —
//! so that is the whole trait.

use std::cell::RefCell;
use std::rc::Rc;

/// A cheaply-cloneable handle to a single piece of state.
pub trait Store<T>: Clone + 'static {
    /// Read the current value. Reads are untracked: the core never creates
    /// reactive dependencies.
    fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R;

    /// Mutate the current value in place.
    fn update(&self, f: impl FnOnce(&mut T));
}

impl<T: 'static> Store<T> for Rc<RefCell<T>> {
    fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.borrow())
    }

    fn update(&self, f: impl FnOnce(&mut T)) {
        f(&mut self.borrow_mut());
    }
}

impl<T: Send + Sync + 'static> Store<T> for leptos::prelude::RwSignal<T> {
    fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        leptos::prelude::WithUntracked::with_untracked(self, f)
    }

    fn update(&self, f: impl FnOnce(&mut T)) {
        leptos::prelude::Update::update(self, f);
    }
}
