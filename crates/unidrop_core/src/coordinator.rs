//! The open-dropdown registry.
//!
//! One [`Coordinator`] exists per application. It tracks the single open
//! dropdown, owns the subscription to the global dismissal channels, and routes
//! dismissal events back into the open dropdown.
//!
//! The channels are subscribed only while some dropdown is open: the first
//! `open` attaches both, the `close` of the tracked dropdown detaches both, and
//! switching from one open dropdown to another leaves them attached.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use log::{debug, trace};

use crate::dismissal::AutoClose;
use crate::element::ToggleElement;
use crate::event::{Channel, ClickEvent, KeyEvent};

/// Host side of the document-wide click and keydown streams.
///
/// While a channel is subscribed the host must forward its events to
/// [`Coordinator::dispatch_click`] or [`Coordinator::dispatch_keydown`].
pub trait DismissalChannels {
    fn subscribe(&self, channel: Channel);
    fn unsubscribe(&self, channel: Channel);
}

/// Identity of a mounted dropdown, unique within its coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DropdownId(u64);

impl fmt::Display for DropdownId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "dropdown-{}", self.0)
    }
}

/// What the coordinator needs from a dropdown it tracks.
pub trait DropdownHandle {
    fn id(&self) -> DropdownId;

    fn toggle_element(&self) -> Option<Rc<dyn ToggleElement>>;

    /// The popup body, consulted by [`AutoClose::OutsideClick`].
    fn menu_element(&self) -> Option<Rc<dyn ToggleElement>> {
        None
    }

    fn auto_close(&self) -> AutoClose {
        AutoClose::Always
    }

    /// Focus the toggle element. Does nothing if there is none.
    fn focus_toggle_element(&self);

    /// Run the dropdown's own close transition, which calls back into
    /// [`Coordinator::close`].
    fn force_close(&self);
}

/// Tracks the single open dropdown and the dismissal channel subscription.
pub struct Coordinator {
    open_instance: RefCell<Option<Rc<dyn DropdownHandle>>>,
    listeners_attached: Cell<bool>,
    channels: Box<dyn DismissalChannels>,
    next_id: Cell<u64>,
}

impl Coordinator {
    pub fn new(channels: impl DismissalChannels + 'static) -> Rc<Self> {
        Rc::new(Self {
            open_instance: RefCell::new(None),
            listeners_attached: Cell::new(false),
            channels: Box::new(channels),
            next_id: Cell::new(0),
        })
    }

    /// Hand out the id for a newly mounted dropdown.
    pub fn allocate_id(&self) -> DropdownId {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        DropdownId(id)
    }

    /// The currently open dropdown, if any.
    pub fn open_instance(&self) -> Option<DropdownId> {
        self.open_instance.borrow().as_ref().map(|open| open.id())
    }

    pub fn is_tracked(&self, id: DropdownId) -> bool {
        self.open_instance() == Some(id)
    }

    pub fn listeners_attached(&self) -> bool {
        self.listeners_attached.get()
    }

    /// Register `instance` as the open dropdown.
    ///
    /// Attaches the dismissal channels if nothing was open. If another dropdown
    /// was open it is forced closed; tracking moves to `instance` first, so that
    /// dropdown's own `close` call arrives stale and leaves the channels attached.
    pub fn open(&self, instance: Rc<dyn DropdownHandle>) {
        let id = instance.id();
        let previous = self.open_instance.replace(Some(instance));

        match previous {
            None => {
                debug!("{id} opened");
                self.attach_listeners();
            }
            Some(previous) if previous.id() != id => {
                debug!("{id} opened, closing {}", previous.id());
                previous.force_close();
            }
            Some(_) => trace!("{id} is already the open dropdown"),
        }
    }

    /// Release `id` as the open dropdown.
    ///
    /// A no-op unless `id` is the tracked dropdown. Returns whether it was.
    pub fn close(&self, id: DropdownId) -> bool {
        if !self.is_tracked(id) {
            trace!("ignoring stale close from {id}");
            return false;
        }

        // Keep the handle alive until the channels are released.
        let released = self.open_instance.borrow_mut().take();
        debug!("{id} closed");
        self.detach_listeners();
        drop(released);
        true
    }

    /// Click channel handler.
    pub fn dispatch_click(&self, event: &ClickEvent) {
        // An earlier handler of this same click may already have closed it.
        let Some(open) = self.current() else {
            trace!("click on {:?} with no open dropdown", event.target);
            return;
        };

        let toggle = open.toggle_element();
        let menu = open.menu_element();
        if !open
            .auto_close()
            .should_dismiss(event, toggle.as_deref(), menu.as_deref())
        {
            trace!("click on {:?} keeps {} open", event.target, open.id());
            return;
        }

        debug!("outside click on {:?} closes {}", event.target, open.id());
        open.force_close();
    }

    /// Keydown channel handler. Escape focuses the toggle element, then closes.
    pub fn dispatch_keydown(&self, event: &KeyEvent) {
        if !event.is_escape() {
            return;
        }
        let Some(open) = self.current() else {
            trace!("escape with no open dropdown");
            return;
        };

        debug!("escape closes {}", open.id());
        open.focus_toggle_element();
        open.force_close();
    }

    /// Close whatever is open and make sure the channels are released.
    ///
    /// Called once at application teardown.
    pub fn shutdown(&self) {
        if let Some(open) = self.current() {
            open.force_close();
        }
        if let Some(id) = self.open_instance() {
            self.close(id);
        }
        self.detach_listeners();
    }

    fn current(&self) -> Option<Rc<dyn DropdownHandle>> {
        self.open_instance.borrow().clone()
    }

    fn attach_listeners(&self) {
        if self.listeners_attached.replace(true) {
            return;
        }
        debug!("attaching dismissal channels");
        for channel in Channel::ALL {
            self.channels.subscribe(channel);
        }
    }

    fn detach_listeners(&self) {
        if !self.listeners_attached.replace(false) {
            return;
        }
        debug!("detaching dismissal channels");
        for channel in Channel::ALL {
            self.channels.unsubscribe(channel);
        }
    }
}

impl fmt::Debug for Coordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Coordinator")
            .field("open_instance", &self.open_instance())
            .field("listeners_attached", &self.listeners_attached.get())
            .finish()
    }
}
