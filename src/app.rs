//! Headless page simulator.
//!
//! Builds a page from a [`SimConfig`], mounts one dropdown per entry and
//! replays input the way a browser would deliver it:
//! - A click hit-tests to a target, runs the toggle bindings whose element
//!   contains the target, then bubbles to the document click channel if the
//!   coordinator is subscribed to it at that moment.
//! - A key press reaches the coordinator only through the keydown channel.
//!
//! Each dropdown entry `name` produces three elements: the container `name`
//! (receives the open class), `name.toggle`, and `name.menu` when the entry has
//! menu bounds. The menu is hidden while the dropdown is closed.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::{debug, info, warn};
use serde::Serialize;
use unidrop_core::constants::ARIA_EXPANDED;
use unidrop_core::{
    Channel, ClassTarget, ClickEvent, Coordinator, Dropdown, ElementId, KeyEvent, OpenState,
    ToggleAttributes, ToggleBinding, ToggleElement, ToggleEvent,
};

use crate::config::{DropdownConfig, SimConfig};
use crate::error::SimError;
use crate::geometry::Point;
use crate::message::Step;
use crate::page::{ChannelStats, Document, DocumentChannels, PageElement};

/// A dropdown mounted on the simulated page.
struct Mounted {
    name: String,
    container: ElementId,
    toggle: ElementId,
    menu: Option<ElementId>,
    dropdown: Rc<Dropdown>,
    binding: Option<ToggleBinding>,
    /// The host-side `is-open` value, kept in step through the observers.
    bound_open: Rc<Cell<bool>>,
    /// Every value reported through `on_toggle`.
    history: Rc<RefCell<Vec<bool>>>,
}

/// The simulated page with its coordinator and dropdowns.
pub struct Simulator {
    document: Rc<Document>,
    coordinator: Rc<Coordinator>,
    mounted: Vec<Mounted>,
}

impl Simulator {
    pub fn new(config: &SimConfig) -> Result<Self, SimError> {
        let document = Document::new(config.viewport);
        let coordinator = Coordinator::new(DocumentChannels::new(&document));

        let mut simulator = Self {
            document,
            coordinator,
            mounted: Vec::with_capacity(config.dropdowns.len()),
        };
        for entry in &config.dropdowns {
            simulator.mount(entry);
        }
        info!("Mounted {} dropdowns", simulator.mounted.len());
        Ok(simulator)
    }

    fn mount(&mut self, entry: &DropdownConfig) {
        let document = &self.document;
        let bounds = entry
            .menu
            .map_or(entry.toggle, |menu| entry.toggle.union(&menu));
        let container = document.create_element(&entry.name, document.root(), bounds);
        let toggle =
            document.create_element(&format!("{}.toggle", entry.name), container, entry.toggle);
        let menu = entry
            .menu
            .map(|menu| document.create_element(&format!("{}.menu", entry.name), container, menu));

        let history = Rc::new(RefCell::new(Vec::new()));
        let mut builder = Dropdown::builder()
            .is_open(entry.is_open)
            .open_class(entry.open_class.as_str())
            .auto_close(entry.auto_close)
            .class_target(Rc::new(PageElement::new(document, container)) as Rc<dyn ClassTarget>)
            .on_toggle({
                let history = Rc::clone(&history);
                move |event: ToggleEvent| history.borrow_mut().push(event.open)
            });
        if let Some(menu) = menu {
            builder = builder
                .menu_element(Rc::new(PageElement::new(document, menu)) as Rc<dyn ToggleElement>);
        }
        let dropdown = builder.mount(&self.coordinator);

        if let Some(menu) = menu {
            document.set_hidden(menu, !dropdown.is_open());
            let document = Rc::clone(document);
            dropdown.subscribe(move |open| document.set_hidden(menu, !open));
        }

        let bound_open = Rc::new(Cell::new(dropdown.is_open()));
        dropdown.subscribe({
            let bound_open = Rc::clone(&bound_open);
            move |open| bound_open.set(open)
        });

        let toggle_element = Rc::new(PageElement::new(document, toggle));
        let binding = ToggleBinding::bind(
            &dropdown,
            Rc::clone(&toggle_element) as Rc<dyn ToggleElement>,
            Some(toggle_element as Rc<dyn ToggleAttributes>),
        );
        binding.set_disabled(entry.disabled);

        debug!("{} mounted as {}", entry.name, dropdown.id());
        self.mounted.push(Mounted {
            name: entry.name.clone(),
            container,
            toggle,
            menu,
            dropdown,
            binding: Some(binding),
            bound_open,
            history,
        });
    }

    pub fn document(&self) -> &Rc<Document> {
        &self.document
    }

    pub fn coordinator(&self) -> &Rc<Coordinator> {
        &self.coordinator
    }

    pub fn dropdown(&self, name: &str) -> Result<&Rc<Dropdown>, SimError> {
        self.find(name).map(|mounted| &mounted.dropdown)
    }

    /// Replay steps in order, stopping at the first error.
    pub fn run(&mut self, steps: &[Step]) -> Result<(), SimError> {
        for step in steps {
            self.apply(step)?;
        }
        Ok(())
    }

    pub fn apply(&mut self, step: &Step) -> Result<(), SimError> {
        debug!("step: {}", step.label());
        match step {
            Step::ClickAt { x, y } => {
                let target = self.document.hit_test(Point::new(*x, *y));
                self.click(target);
            }
            Step::Click { target } => {
                let target = self
                    .document
                    .find(target)
                    .ok_or_else(|| SimError::UnknownElement(target.clone()))?;
                self.click(target);
            }
            Step::Key { code } => self.key(KeyEvent::new(*code)),
            Step::Escape => self.key(KeyEvent::escape()),
            Step::Toggle { dropdown, open } => {
                self.dropdown(dropdown)?.toggle(*open);
            }
            Step::SetOpen { dropdown, open } => {
                let mounted = self.find(dropdown)?;
                mounted.bound_open.set(*open);
                mounted.dropdown.set_open(*open);
            }
            Step::Navigate => {
                for mounted in &self.mounted {
                    if !mounted.dropdown.is_destroyed() {
                        mounted.dropdown.handle_navigation();
                    }
                }
            }
            Step::Destroy { dropdown } => {
                let mounted = self.find_mut(dropdown)?;
                if let Some(binding) = mounted.binding.take() {
                    binding.unbind();
                }
                mounted.dropdown.destroy();
            }
            Step::Disable { dropdown } => self.set_disabled(dropdown, true)?,
            Step::Enable { dropdown } => self.set_disabled(dropdown, false)?,
        }
        Ok(())
    }

    fn click(&self, target: ElementId) {
        let event = ClickEvent::new(target);

        let bindings = self
            .mounted
            .iter()
            .filter_map(|mounted| mounted.binding.as_ref())
            .filter(|binding| binding.is_target(target));
        for binding in bindings {
            binding.handle_click();
        }

        if self.document.is_subscribed(Channel::Click) {
            self.coordinator.dispatch_click(&event);
        }
    }

    fn key(&self, event: KeyEvent) {
        if self.document.is_subscribed(Channel::KeyDown) {
            self.coordinator.dispatch_keydown(&event);
        }
    }

    fn set_disabled(&self, name: &str, disabled: bool) -> Result<(), SimError> {
        let mounted = self.find(name)?;
        match &mounted.binding {
            Some(binding) => binding.set_disabled(disabled),
            None => warn!("{name} is destroyed; its toggle cannot change"),
        }
        Ok(())
    }

    fn find(&self, name: &str) -> Result<&Mounted, SimError> {
        self.mounted
            .iter()
            .find(|mounted| mounted.name == name)
            .ok_or_else(|| SimError::UnknownDropdown(name.to_string()))
    }

    fn find_mut(&mut self, name: &str) -> Result<&mut Mounted, SimError> {
        self.mounted
            .iter_mut()
            .find(|mounted| mounted.name == name)
            .ok_or_else(|| SimError::UnknownDropdown(name.to_string()))
    }

    /// Snapshot of the page.
    pub fn report(&self) -> Report {
        let open_dropdown = self.coordinator.open_instance().and_then(|id| {
            self.mounted
                .iter()
                .find(|mounted| mounted.dropdown.id() == id)
                .map(|mounted| mounted.name.clone())
        });

        let dropdowns = self
            .mounted
            .iter()
            .map(|mounted| DropdownReport {
                name: mounted.name.clone(),
                state: mounted.dropdown.state(),
                bound_open: mounted.bound_open.get(),
                destroyed: mounted.dropdown.is_destroyed(),
                disabled: mounted
                    .binding
                    .as_ref()
                    .is_some_and(|binding| binding.is_disabled()),
                classes: self.document.classes(mounted.container),
                aria_expanded: self.document.attribute(mounted.toggle, ARIA_EXPANDED),
                menu_visible: mounted.menu.map(|menu| self.document.is_visible(menu)),
                toggles: mounted.history.borrow().clone(),
            })
            .collect();

        Report {
            open_dropdown,
            focused: self
                .document
                .focused()
                .and_then(|id| self.document.name_of(id)),
            channels: self.document.channel_stats(),
            dropdowns,
        }
    }

    /// Close anything open and release the document channels.
    pub fn shutdown(&self) {
        self.coordinator.shutdown();
    }
}

impl Drop for Simulator {
    fn drop(&mut self) {
        // The coordinator and the open dropdown hold each other until closed
        self.coordinator.shutdown();
    }
}

/// Final state of the page, printed by the simulator binary.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub open_dropdown: Option<String>,
    pub focused: Option<String>,
    pub channels: ChannelStats,
    pub dropdowns: Vec<DropdownReport>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DropdownReport {
    pub name: String,
    pub state: OpenState,
    pub bound_open: bool,
    pub destroyed: bool,
    pub disabled: bool,
    pub classes: Vec<String>,
    pub aria_expanded: Option<String>,
    pub menu_visible: Option<bool>,
    pub toggles: Vec<bool>,
}

impl Report {
    pub fn to_json(&self) -> Result<String, SimError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn dropdown(&self, name: &str) -> Option<&DropdownReport> {
        self.dropdowns.iter().find(|dropdown| dropdown.name == name)
    }
}
