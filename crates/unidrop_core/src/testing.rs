//! Recording mocks shared by the unit tests.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::coordinator::{Coordinator, DismissalChannels, DropdownHandle, DropdownId};
use crate::dismissal::AutoClose;
use crate::element::{ClassTarget, ToggleAttributes, ToggleElement};
use crate::event::{Channel, ElementId};

/// Ordered record of side effects, shared between mocks.
pub(crate) type EventLog = Rc<RefCell<Vec<String>>>;

pub(crate) fn event_log() -> EventLog {
    Rc::new(RefCell::new(Vec::new()))
}

fn record(log: &Option<EventLog>, entry: String) {
    if let Some(log) = log {
        log.borrow_mut().push(entry);
    }
}

fn channel_name(channel: Channel) -> &'static str {
    match channel {
        Channel::Click => "click",
        Channel::KeyDown => "keydown",
    }
}

// =============================================================================
// Channels
// =============================================================================

#[derive(Default)]
struct ChannelRecord {
    subscribed: Vec<Channel>,
    subscribe_calls: usize,
    unsubscribe_calls: usize,
    log: Option<EventLog>,
}

/// Dismissal channels that remember every call. Clones share state.
#[derive(Clone, Default)]
pub(crate) struct RecordingChannels {
    record: Rc<RefCell<ChannelRecord>>,
}

impl RecordingChannels {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_log(self, log: &EventLog) -> Self {
        self.record.borrow_mut().log = Some(Rc::clone(log));
        self
    }

    pub(crate) fn is_subscribed(&self, channel: Channel) -> bool {
        self.record.borrow().subscribed.contains(&channel)
    }

    pub(crate) fn subscribe_calls(&self) -> usize {
        self.record.borrow().subscribe_calls
    }

    pub(crate) fn unsubscribe_calls(&self) -> usize {
        self.record.borrow().unsubscribe_calls
    }
}

impl DismissalChannels for RecordingChannels {
    fn subscribe(&self, channel: Channel) {
        let mut state = self.record.borrow_mut();
        assert!(
            !state.subscribed.contains(&channel),
            "{channel:?} subscribed twice"
        );
        state.subscribed.push(channel);
        state.subscribe_calls += 1;
        record(&state.log, format!("subscribe:{}", channel_name(channel)));
    }

    fn unsubscribe(&self, channel: Channel) {
        let mut state = self.record.borrow_mut();
        assert!(
            state.subscribed.contains(&channel),
            "{channel:?} unsubscribed while not subscribed"
        );
        state.subscribed.retain(|c| *c != channel);
        state.unsubscribe_calls += 1;
        record(&state.log, format!("unsubscribe:{}", channel_name(channel)));
    }
}

// =============================================================================
// Elements
// =============================================================================

/// An element containing itself and a fixed set of descendants.
pub(crate) struct MockElement {
    id: ElementId,
    name: String,
    children: Vec<ElementId>,
    focus_count: Cell<usize>,
    log: Option<EventLog>,
}

impl MockElement {
    pub(crate) fn new(id: u64) -> Self {
        Self {
            id: ElementId(id),
            name: format!("el{id}"),
            children: Vec::new(),
            focus_count: Cell::new(0),
            log: None,
        }
    }

    pub(crate) fn named(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub(crate) fn with_children(mut self, children: &[u64]) -> Self {
        self.children = children.iter().copied().map(ElementId).collect();
        self
    }

    pub(crate) fn with_log(mut self, log: &EventLog) -> Self {
        self.log = Some(Rc::clone(log));
        self
    }

    pub(crate) fn focus_count(&self) -> usize {
        self.focus_count.get()
    }
}

impl ToggleElement for MockElement {
    fn contains(&self, target: ElementId) -> bool {
        target == self.id || self.children.contains(&target)
    }

    fn focus(&self) {
        self.focus_count.set(self.focus_count.get() + 1);
        record(&self.log, format!("focus:{}", self.name));
    }
}

/// Class target and accessibility sink that logs what it is told.
pub(crate) struct MockTarget {
    classes: RefCell<Vec<String>>,
    expanded: Cell<Option<bool>>,
    has_popup: Cell<bool>,
    log: Option<EventLog>,
}

impl MockTarget {
    pub(crate) fn new() -> Self {
        Self {
            classes: RefCell::new(Vec::new()),
            expanded: Cell::new(None),
            has_popup: Cell::new(false),
            log: None,
        }
    }

    pub(crate) fn with_log(mut self, log: &EventLog) -> Self {
        self.log = Some(Rc::clone(log));
        self
    }

    pub(crate) fn has_class(&self, class: &str) -> bool {
        self.classes.borrow().iter().any(|c| c == class)
    }

    pub(crate) fn expanded(&self) -> Option<bool> {
        self.expanded.get()
    }

    pub(crate) fn has_popup(&self) -> bool {
        self.has_popup.get()
    }
}

impl ClassTarget for MockTarget {
    fn add_class(&self, class: &str) {
        let mut classes = self.classes.borrow_mut();
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_string());
        }
        record(&self.log, format!("class+:{class}"));
    }

    fn remove_class(&self, class: &str) {
        self.classes.borrow_mut().retain(|c| c != class);
        record(&self.log, format!("class-:{class}"));
    }
}

impl ToggleAttributes for MockTarget {
    fn set_expanded(&self, expanded: bool) {
        self.expanded.set(Some(expanded));
        record(&self.log, format!("expanded:{expanded}"));
    }

    fn set_has_popup(&self, has_popup: bool) {
        self.has_popup.set(has_popup);
    }
}

// =============================================================================
// Dropdown
// =============================================================================

/// Minimal dropdown that talks to the coordinator the way `Dropdown` does.
pub(crate) struct MockDropdown {
    id: DropdownId,
    me: Weak<MockDropdown>,
    coordinator: Rc<Coordinator>,
    open: Cell<bool>,
    name: RefCell<String>,
    toggle: Option<Rc<dyn ToggleElement>>,
    auto_close: Cell<AutoClose>,
    log: RefCell<Option<EventLog>>,
}

impl MockDropdown {
    pub(crate) fn new(
        coordinator: &Rc<Coordinator>,
        toggle: Option<Rc<dyn ToggleElement>>,
    ) -> Rc<Self> {
        let id = coordinator.allocate_id();
        Rc::new_cyclic(|me| Self {
            id,
            me: me.clone(),
            coordinator: Rc::clone(coordinator),
            open: Cell::new(false),
            name: RefCell::new(id.to_string()),
            toggle,
            auto_close: Cell::new(AutoClose::Always),
            log: RefCell::new(None),
        })
    }

    pub(crate) fn named(self: Rc<Self>, name: &str) -> Rc<Self> {
        *self.name.borrow_mut() = name.to_string();
        self
    }

    pub(crate) fn with_log(self: Rc<Self>, log: &EventLog) -> Rc<Self> {
        *self.log.borrow_mut() = Some(Rc::clone(log));
        self
    }

    pub(crate) fn with_auto_close(self: Rc<Self>, auto_close: AutoClose) -> Rc<Self> {
        self.auto_close.set(auto_close);
        self
    }

    pub(crate) fn is_open(&self) -> bool {
        self.open.get()
    }

    pub(crate) fn open(&self) {
        self.open.set(true);
        if let Some(me) = self.me.upgrade() {
            self.coordinator.open(me);
        }
    }
}

impl DropdownHandle for MockDropdown {
    fn id(&self) -> DropdownId {
        self.id
    }

    fn toggle_element(&self) -> Option<Rc<dyn ToggleElement>> {
        self.toggle.clone()
    }

    fn auto_close(&self) -> AutoClose {
        self.auto_close.get()
    }

    fn focus_toggle_element(&self) {
        if let Some(toggle) = &self.toggle {
            toggle.focus();
        }
    }

    fn force_close(&self) {
        if !self.open.replace(false) {
            return;
        }
        record(&self.log.borrow(), format!("close:{}", self.name.borrow()));
        self.coordinator.close(self.id);
    }
}
