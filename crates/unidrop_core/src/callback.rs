//! Callback abstraction for dropdown notifications
//!
//! Dropdowns report state changes through two kinds of handlers:
//! - a single optional [`Callback`], used for `on_toggle`;
//! - an [`Observers`] list, used for outbound sync to any number of listeners.
//!
//! Both store their closures behind `Rc` so a dispatcher can take a snapshot
//! and release its borrow before calling out. Handlers are free to subscribe,
//! unsubscribe or change dropdown state while they run.
//!
//! # Examples
//!
//! ```
//! use unidrop_core::Callback;
//!
//! let on_toggle: Callback<bool> = Callback::new(|open| println!("open = {open}"));
//! assert!(on_toggle.is_some());
//! on_toggle.call(true);
//! ```

use std::fmt;
use std::rc::Rc;

/// An optional side-effect handler taking a value of type `T`.
pub struct Callback<T> {
    f: Option<Rc<dyn Fn(T)>>,
}

impl<T> Callback<T> {
    /// Create a new callback from a function.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(T) + 'static,
    {
        Self { f: Some(Rc::new(f)) }
    }

    /// Create an empty callback (no handler).
    pub fn none() -> Self {
        Self { f: None }
    }

    /// Call the callback with a value, if it exists.
    ///
    /// Returns `true` if a handler ran.
    pub fn call(&self, value: T) -> bool {
        match self.f {
            Some(ref f) => {
                f(value);
                true
            }
            None => false,
        }
    }

    /// Check if the callback is set.
    pub fn is_some(&self) -> bool {
        self.f.is_some()
    }

    /// Check if the callback is not set.
    pub fn is_none(&self) -> bool {
        self.f.is_none()
    }
}

impl<T> Default for Callback<T> {
    fn default() -> Self {
        Self::none()
    }
}

impl<T> Clone for Callback<T> {
    fn clone(&self) -> Self {
        Self { f: self.f.clone() }
    }
}

impl<T> fmt::Debug for Callback<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callback")
            .field("set", &self.is_some())
            .finish()
    }
}

// =============================================================================
// Observer list
// =============================================================================

/// Handle returned by [`Observers::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// An ordered list of handlers notified with the same value.
pub struct Observers<T> {
    entries: Vec<(SubscriptionId, Rc<dyn Fn(T)>)>,
    next_id: u64,
}

impl<T: Copy> Observers<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
        }
    }

    pub fn subscribe<F>(&mut self, f: F) -> SubscriptionId
    where
        F: Fn(T) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, Rc::new(f)));
        id
    }

    /// Remove a handler. Returns `false` if it was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Clone the current handlers, in subscription order.
    ///
    /// Callers notify from the snapshot after releasing any borrow on `self`.
    pub fn snapshot(&self) -> Vec<Rc<dyn Fn(T)>> {
        self.entries.iter().map(|(_, f)| Rc::clone(f)).collect()
    }
}

impl<T: Copy> Default for Observers<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Observers<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers")
            .field("len", &self.entries.len())
            .finish()
    }
}
