//! Per-dropdown open/close state machine.
//!
//! A [`Dropdown`] is `Closed` when mounted (unless configured open) and moves
//! between `Closed` and `Open` through [`Dropdown::toggle`], [`Dropdown::set_open`],
//! navigation, destruction, or a close forced by the [`Coordinator`].
//!
//! Every transition runs the same ordered list of reactions:
//!
//! 1. the open class is added to or removed from the class target;
//! 2. on open, the toggle element takes focus;
//! 3. the coordinator is told (`open` or `close`);
//! 4. outbound observers are notified, in subscription order;
//! 5. the `on_toggle` callback fires.
//!
//! Assigning the current value is not a transition and runs nothing. If a
//! reaction changes the state again, what is left of the older transition is
//! skipped: the nested transition has already reported the newer value.
//!
//! # Example
//!
//! ```
//! use unidrop_core::{Channel, Coordinator, DismissalChannels, Dropdown};
//!
//! struct NoChannels;
//!
//! impl DismissalChannels for NoChannels {
//!     fn subscribe(&self, _channel: Channel) {}
//!     fn unsubscribe(&self, _channel: Channel) {}
//! }
//!
//! let coordinator = Coordinator::new(NoChannels);
//! let first = Dropdown::builder().mount(&coordinator);
//! let second = Dropdown::builder().mount(&coordinator);
//!
//! first.toggle(None);
//! second.toggle(None);
//! assert!(!first.is_open());
//! assert_eq!(coordinator.open_instance(), Some(second.id()));
//! ```

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use log::{debug, warn};

use crate::callback::{Callback, Observers, SubscriptionId};
use crate::constants::DEFAULT_OPEN_CLASS;
use crate::coordinator::{Coordinator, DropdownHandle, DropdownId};
use crate::dismissal::AutoClose;
use crate::element::{ClassTarget, ToggleElement};
use crate::event::ToggleEvent;
use crate::state::OpenState;
use crate::{builder_field, builder_option, callback_setter};

/// Configuration for a dropdown, consumed by [`DropdownBuilder::mount`].
pub struct DropdownBuilder {
    initially_open: bool,
    open_class: String,
    auto_close: AutoClose,
    toggle_element: Option<Rc<dyn ToggleElement>>,
    menu_element: Option<Rc<dyn ToggleElement>>,
    class_target: Option<Rc<dyn ClassTarget>>,
    on_toggle: Callback<ToggleEvent>,
}

impl DropdownBuilder {
    pub fn new() -> Self {
        Self {
            initially_open: false,
            open_class: DEFAULT_OPEN_CLASS.to_string(),
            auto_close: AutoClose::default(),
            toggle_element: None,
            menu_element: None,
            class_target: None,
            on_toggle: Callback::none(),
        }
    }

    // Initial value of the externally bound open state
    builder_field!(is_open, initially_open, bool);
    builder_field!(auto_close, AutoClose);
    builder_option!(toggle_element, Rc<dyn ToggleElement>);
    builder_option!(menu_element, Rc<dyn ToggleElement>);
    builder_option!(class_target, Rc<dyn ClassTarget>);
    callback_setter!(on_toggle, ToggleEvent);

    /// Class applied to the class target while open.
    pub fn open_class(mut self, class: impl Into<String>) -> Self {
        self.open_class = class.into();
        self
    }

    /// Create the dropdown and apply the initial state.
    ///
    /// An initially open dropdown runs its open reactions here, except for
    /// `on_toggle`, which only reports changes.
    pub fn mount(self, coordinator: &Rc<Coordinator>) -> Rc<Dropdown> {
        let id = coordinator.allocate_id();
        let dropdown = Rc::new_cyclic(|me| Dropdown {
            id,
            me: me.clone(),
            coordinator: Rc::clone(coordinator),
            state: Cell::new(OpenState::Closed),
            destroyed: Cell::new(false),
            toggle_element: RefCell::new(self.toggle_element),
            menu_element: self.menu_element,
            class_target: self.class_target,
            open_class: self.open_class,
            auto_close: self.auto_close,
            on_toggle: self.on_toggle,
            observers: RefCell::new(Observers::new()),
        });

        debug!("{id} mounted");
        if self.initially_open {
            dropdown.state.set(OpenState::Open);
            dropdown.react(OpenState::Open, false);
        }
        dropdown
    }
}

impl Default for DropdownBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// One mounted dropdown.
pub struct Dropdown {
    id: DropdownId,
    me: Weak<Dropdown>,
    coordinator: Rc<Coordinator>,
    state: Cell<OpenState>,
    destroyed: Cell<bool>,
    toggle_element: RefCell<Option<Rc<dyn ToggleElement>>>,
    menu_element: Option<Rc<dyn ToggleElement>>,
    class_target: Option<Rc<dyn ClassTarget>>,
    open_class: String,
    auto_close: AutoClose,
    on_toggle: Callback<ToggleEvent>,
    observers: RefCell<Observers<bool>>,
}

impl Dropdown {
    pub fn builder() -> DropdownBuilder {
        DropdownBuilder::new()
    }

    pub fn id(&self) -> DropdownId {
        self.id
    }

    pub fn is_open(&self) -> bool {
        self.state.get().is_open()
    }

    pub fn state(&self) -> OpenState {
        self.state.get()
    }

    pub fn open_class(&self) -> &str {
        &self.open_class
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed.get()
    }

    /// Flip the state, or set it to `explicit` if given. Returns the new value.
    pub fn toggle(&self, explicit: Option<bool>) -> bool {
        let next = self.state.get().toggled(explicit);
        self.transition(next);
        self.is_open()
    }

    /// Assign the state directly.
    ///
    /// This is the inbound side of an external binding: hosts mirroring an
    /// outside `is-open` value call it whenever that value changes.
    pub fn set_open(&self, open: bool) {
        self.transition(OpenState::from(open));
    }

    /// Observe every state change (the outbound side of an external binding).
    pub fn subscribe<F>(&self, f: F) -> SubscriptionId
    where
        F: Fn(bool) + 'static,
    {
        self.observers.borrow_mut().subscribe(f)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.observers.borrow_mut().unsubscribe(id)
    }

    /// Register the toggle element. Only the first registration is kept.
    pub fn set_toggle_element(&self, element: Rc<dyn ToggleElement>) -> bool {
        if self.destroyed.get() {
            warn!("{} is destroyed; not registering a toggle element", self.id);
            return false;
        }
        let mut slot = self.toggle_element.borrow_mut();
        if slot.is_some() {
            warn!("{} already has a toggle element; keeping the first", self.id);
            return false;
        }
        *slot = Some(element);
        true
    }

    /// The view changed underneath the dropdown.
    pub fn handle_navigation(&self) {
        if self.is_open() {
            debug!("{} closed by navigation", self.id);
        }
        self.set_open(false);
    }

    /// Close if open, then release everything the dropdown holds.
    ///
    /// After this every transition is ignored.
    pub fn destroy(&self) {
        if self.destroyed.get() {
            return;
        }
        self.set_open(false);

        self.destroyed.set(true);
        // A reaction may have reopened it during the close above. Transitions
        // are ignored from here on, so this close cannot be undone.
        if self.state.replace(OpenState::Closed).is_open() {
            debug!("{} reopened while closing; closing again", self.id);
            self.react(OpenState::Closed, true);
        }
        self.coordinator.close(self.id);

        self.observers.borrow_mut().clear();
        self.toggle_element.borrow_mut().take();
        debug!("{} destroyed", self.id);
    }

    fn transition(&self, next: OpenState) {
        if self.destroyed.get() {
            warn!("{} is destroyed; ignoring {}", self.id, next.name());
            return;
        }
        let previous = self.state.replace(next);
        if previous == next {
            return;
        }
        debug!("{}: {} -> {}", self.id, previous.name(), next.name());
        self.react(next, true);
    }

    fn react(&self, state: OpenState, notify_toggle: bool) {
        let open = state.is_open();
        let superseded = || self.state.get() != state;

        if let Some(target) = &self.class_target {
            if open {
                target.add_class(&self.open_class);
            } else {
                target.remove_class(&self.open_class);
            }
        }
        if superseded() {
            return;
        }

        if open {
            self.focus_toggle_element();
            if superseded() {
                return;
            }
            if let Some(me) = self.me.upgrade() {
                self.coordinator.open(me);
            }
        } else {
            self.coordinator.close(self.id);
        }

        let observers = self.observers.borrow().snapshot();
        for notify in observers {
            if superseded() {
                return;
            }
            notify(open);
        }

        if notify_toggle && !superseded() {
            self.on_toggle.call(ToggleEvent { open });
        }
    }
}

impl DropdownHandle for Dropdown {
    fn id(&self) -> DropdownId {
        self.id
    }

    fn toggle_element(&self) -> Option<Rc<dyn ToggleElement>> {
        self.toggle_element.borrow().clone()
    }

    fn menu_element(&self) -> Option<Rc<dyn ToggleElement>> {
        self.menu_element.clone()
    }

    fn auto_close(&self) -> AutoClose {
        self.auto_close
    }

    fn focus_toggle_element(&self) {
        let toggle = self.toggle_element.borrow().clone();
        if let Some(toggle) = toggle {
            toggle.focus();
        }
    }

    fn force_close(&self) {
        self.set_open(false);
    }
}

impl fmt::Debug for Dropdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dropdown")
            .field("id", &self.id)
            .field("state", &self.state.get())
            .field("destroyed", &self.destroyed.get())
            .field("open_class", &self.open_class)
            .field("auto_close", &self.auto_close)
            .finish()
    }
}
