//! Simulated page: an element tree with classes, attributes, focus and the
//! document-level event channels.
//!
//! Elements live in an arena owned by [`Document`]. Each has a parent (except
//! the body root), bounds in page coordinates, and may be hidden. Containment
//! follows the tree: an element contains a target if it is the target or one of
//! its ancestors.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

use log::trace;
use serde::Serialize;
use unidrop_core::constants::{ARIA_EXPANDED, ARIA_HAS_POPUP};
use unidrop_core::{Channel, ClassTarget, DismissalChannels, ElementId, ToggleAttributes, ToggleElement};

use crate::geometry::{Point, Rectangle, Size};

const ROOT_NAME: &str = "body";

#[derive(Debug, Clone)]
struct Node {
    name: String,
    parent: Option<ElementId>,
    bounds: Rectangle,
    hidden: bool,
    classes: BTreeSet<String>,
    attributes: BTreeMap<String, String>,
}

/// Subscription state of one document-level channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ChannelCount {
    pub subscribed: bool,
    /// Number of times the channel was subscribed.
    pub attaches: u32,
    /// Number of times the channel was unsubscribed.
    pub detaches: u32,
}

impl ChannelCount {
    fn record(&mut self, subscribed: bool) {
        self.subscribed = subscribed;
        if subscribed {
            self.attaches += 1;
        } else {
            self.detaches += 1;
        }
    }
}

/// Subscription state of the document-level channels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ChannelStats {
    pub click: ChannelCount,
    pub keydown: ChannelCount,
}

/// The page's element tree.
#[derive(Debug)]
pub struct Document {
    nodes: RefCell<Vec<Node>>,
    focused: Cell<Option<ElementId>>,
    channels: Cell<ChannelStats>,
}

impl Document {
    /// Create a document whose body covers the viewport.
    pub fn new(viewport: Size) -> Rc<Self> {
        let body = Node {
            name: ROOT_NAME.to_string(),
            parent: None,
            bounds: Rectangle::from_size(viewport),
            hidden: false,
            classes: BTreeSet::new(),
            attributes: BTreeMap::new(),
        };
        Rc::new(Self {
            nodes: RefCell::new(vec![body]),
            focused: Cell::new(None),
            channels: Cell::new(ChannelStats::default()),
        })
    }

    pub fn root(&self) -> ElementId {
        ElementId(0)
    }

    pub fn create_element(&self, name: &str, parent: ElementId, bounds: Rectangle) -> ElementId {
        let mut nodes = self.nodes.borrow_mut();
        let id = ElementId(nodes.len() as u64);
        nodes.push(Node {
            name: name.to_string(),
            parent: Some(parent),
            bounds,
            hidden: false,
            classes: BTreeSet::new(),
            attributes: BTreeMap::new(),
        });
        id
    }

    pub fn find(&self, name: &str) -> Option<ElementId> {
        self.nodes
            .borrow()
            .iter()
            .position(|node| node.name == name)
            .map(|index| ElementId(index as u64))
    }

    pub fn name_of(&self, id: ElementId) -> Option<String> {
        self.with_node(id, |node| node.name.clone())
    }

    /// The target followed by each of its ancestors, ending at the body.
    pub fn path_to_root(&self, target: ElementId) -> Vec<ElementId> {
        let mut path = Vec::new();
        let mut current = Some(target);
        while let Some(id) = current {
            path.push(id);
            current = self.with_node(id, |node| node.parent).flatten();
        }
        path
    }

    pub fn contains(&self, ancestor: ElementId, target: ElementId) -> bool {
        self.path_to_root(target).contains(&ancestor)
    }

    /// Visible if neither it nor any ancestor is hidden.
    pub fn is_visible(&self, id: ElementId) -> bool {
        self.path_to_root(id)
            .into_iter()
            .all(|id| self.with_node(id, |node| !node.hidden).unwrap_or(false))
    }

    /// The deepest visible element under `point`; the body if nothing else.
    pub fn hit_test(&self, point: Point) -> ElementId {
        let candidates: Vec<ElementId> = {
            let nodes = self.nodes.borrow();
            nodes
                .iter()
                .enumerate()
                .filter(|(_, node)| node.bounds.contains(point))
                .map(|(index, _)| ElementId(index as u64))
                .collect()
        };

        // Later siblings paint over earlier ones, so ties go to the last created
        let mut best = (self.root(), 0);
        for id in candidates {
            if !self.is_visible(id) {
                continue;
            }
            let depth = self.path_to_root(id).len();
            if depth >= best.1 {
                best = (id, depth);
            }
        }
        trace!("hit test at ({}, {}) -> {:?}", point.x, point.y, best.0);
        best.0
    }

    pub fn set_hidden(&self, id: ElementId, hidden: bool) {
        self.with_node_mut(id, |node| node.hidden = hidden);
    }

    pub fn focus(&self, id: ElementId) {
        self.focused.set(Some(id));
    }

    pub fn focused(&self) -> Option<ElementId> {
        self.focused.get()
    }

    pub fn add_class(&self, id: ElementId, class: &str) {
        self.with_node_mut(id, |node| {
            node.classes.insert(class.to_string());
        });
    }

    pub fn remove_class(&self, id: ElementId, class: &str) {
        self.with_node_mut(id, |node| {
            node.classes.remove(class);
        });
    }

    pub fn has_class(&self, id: ElementId, class: &str) -> bool {
        self.with_node(id, |node| node.classes.contains(class))
            .unwrap_or(false)
    }

    pub fn classes(&self, id: ElementId) -> Vec<String> {
        self.with_node(id, |node| node.classes.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn set_attribute(&self, id: ElementId, name: &str, value: &str) {
        self.with_node_mut(id, |node| {
            node.attributes.insert(name.to_string(), value.to_string());
        });
    }

    pub fn attribute(&self, id: ElementId, name: &str) -> Option<String> {
        self.with_node(id, |node| node.attributes.get(name).cloned())
            .flatten()
    }

    pub fn is_subscribed(&self, channel: Channel) -> bool {
        let stats = self.channels.get();
        match channel {
            Channel::Click => stats.click.subscribed,
            Channel::KeyDown => stats.keydown.subscribed,
        }
    }

    pub fn channel_stats(&self) -> ChannelStats {
        self.channels.get()
    }

    fn set_subscribed(&self, channel: Channel, subscribed: bool) {
        let mut stats = self.channels.get();
        match channel {
            Channel::Click => stats.click.record(subscribed),
            Channel::KeyDown => stats.keydown.record(subscribed),
        }
        self.channels.set(stats);
    }

    fn with_node<T>(&self, id: ElementId, f: impl FnOnce(&Node) -> T) -> Option<T> {
        self.nodes.borrow().get(id.0 as usize).map(f)
    }

    fn with_node_mut(&self, id: ElementId, f: impl FnOnce(&mut Node)) {
        if let Some(node) = self.nodes.borrow_mut().get_mut(id.0 as usize) {
            f(node);
        }
    }
}

/// The document's click and keydown channels, as seen by the coordinator.
pub struct DocumentChannels {
    document: Rc<Document>,
}

impl DocumentChannels {
    pub fn new(document: &Rc<Document>) -> Self {
        Self {
            document: Rc::clone(document),
        }
    }
}

impl DismissalChannels for DocumentChannels {
    fn subscribe(&self, channel: Channel) {
        trace!("document: subscribe {channel:?}");
        self.document.set_subscribed(channel, true);
    }

    fn unsubscribe(&self, channel: Channel) {
        trace!("document: unsubscribe {channel:?}");
        self.document.set_subscribed(channel, false);
    }
}

/// A handle to one element, implementing the engine's element capabilities.
#[derive(Debug, Clone)]
pub struct PageElement {
    document: Rc<Document>,
    id: ElementId,
}

impl PageElement {
    pub fn new(document: &Rc<Document>, id: ElementId) -> Self {
        Self {
            document: Rc::clone(document),
            id,
        }
    }

    pub fn id(&self) -> ElementId {
        self.id
    }
}

impl ToggleElement for PageElement {
    fn contains(&self, target: ElementId) -> bool {
        self.document.contains(self.id, target)
    }

    fn focus(&self) {
        self.document.focus(self.id);
    }
}

impl ClassTarget for PageElement {
    fn add_class(&self, class: &str) {
        self.document.add_class(self.id, class);
    }

    fn remove_class(&self, class: &str) {
        self.document.remove_class(self.id, class);
    }
}

impl ToggleAttributes for PageElement {
    fn set_expanded(&self, expanded: bool) {
        self.document
            .set_attribute(self.id, ARIA_EXPANDED, if expanded { "true" } else { "false" });
    }

    fn set_has_popup(&self, has_popup: bool) {
        self.document
            .set_attribute(self.id, ARIA_HAS_POPUP, if has_popup { "true" } else { "false" });
    }
}
