//! Wires a clickable toggle element to a dropdown.

use std::cell::Cell;
use std::rc::Rc;

use log::debug;

use crate::callback::SubscriptionId;
use crate::dropdown::Dropdown;
use crate::element::{ToggleAttributes, ToggleElement};
use crate::event::ElementId;

/// Connects a toggle element's clicks to [`Dropdown::toggle`].
///
/// Binding registers the element as the dropdown's toggle element and, when
/// accessibility attributes are supplied, keeps `aria-expanded` in step with the
/// dropdown. Clicks are not stopped: they still bubble to the document, where
/// the coordinator recognises them as inside the toggle element.
pub struct ToggleBinding {
    dropdown: Rc<Dropdown>,
    element: Rc<dyn ToggleElement>,
    disabled: Cell<bool>,
    subscription: Option<SubscriptionId>,
}

impl ToggleBinding {
    pub fn bind(
        dropdown: &Rc<Dropdown>,
        element: Rc<dyn ToggleElement>,
        attributes: Option<Rc<dyn ToggleAttributes>>,
    ) -> Self {
        dropdown.set_toggle_element(Rc::clone(&element));

        let subscription = attributes.map(|attributes| {
            attributes.set_has_popup(true);
            attributes.set_expanded(dropdown.is_open());
            dropdown.subscribe(move |open| attributes.set_expanded(open))
        });

        Self {
            dropdown: Rc::clone(dropdown),
            element,
            disabled: Cell::new(false),
            subscription,
        }
    }

    pub fn dropdown(&self) -> &Rc<Dropdown> {
        &self.dropdown
    }

    /// Whether a click on `target` lands on this binding's element.
    pub fn is_target(&self, target: ElementId) -> bool {
        self.element.contains(target)
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled.get()
    }

    pub fn set_disabled(&self, disabled: bool) {
        self.disabled.set(disabled);
    }

    /// Toggle the dropdown unless disabled. Returns whether it toggled.
    pub fn handle_click(&self) -> bool {
        if self.disabled.get() {
            debug!("{} toggle is disabled; ignoring click", self.dropdown.id());
            return false;
        }
        self.dropdown.toggle(None);
        true
    }

    /// Stop mirroring the open state onto the element's attributes.
    pub fn unbind(self) {
        if let Some(subscription) = self.subscription {
            self.dropdown.unsubscribe(subscription);
        }
    }
}
