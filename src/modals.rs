//! Cosmetic modal handling: the contact form swaps to a confirmation dialog
//! without sending anything, and generic open/close triggers. An open
//! trigger carrying `data-slide` also moves the opened modal's carousel to
//! that slide.

use crate::config::{PageConfig, Selectors};
use crate::dom::{self, EventListener};
use crate::error::EnhanceError;
use crate::timeline::scroll_to_item;
use log::{debug, info};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlElement, HtmlFormElement, ScrollBehavior};

pub const SHOW_CLASS: &str = "show";
pub const ACTIVE_SLIDE_CLASS: &str = "active";
const MODAL_SELECTOR: &str = ".modal";
const OPEN_ATTR: &str = "data-modal-open";
const CLOSE_ATTR: &str = "data-modal-close";
const SLIDE_ATTR: &str = "data-slide";

/// How a modal looks when shown or hidden.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModalPresentation {
    pub show_class: bool,
    pub display: &'static str,
    pub aria_hidden: &'static str,
}

impl ModalPresentation {
    pub fn for_visible(visible: bool) -> Self {
        if visible {
            Self {
                show_class: true,
                display: "block",
                aria_hidden: "false",
            }
        } else {
            Self {
                show_class: false,
                display: "none",
                aria_hidden: "true",
            }
        }
    }
}

pub fn set_modal_visible(modal: &HtmlElement, visible: bool) {
    let look = ModalPresentation::for_visible(visible);
    let _ = modal.class_list().toggle_with_force(SHOW_CLASS, look.show_class);
    let _ = modal.style().set_property("display", look.display);
    let _ = modal.set_attribute("aria-hidden", look.aria_hidden);
}

/// The two dialogs of the contact flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialog {
    Contact,
    Confirmation,
}

/// What submitting the contact form does to the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitEffect {
    /// Whether the browser's own submission goes ahead.
    pub send_request: bool,
    /// Visibility changes, applied in order.
    pub dialogs: [(Dialog, bool); 2],
    pub reset_form: bool,
}

/// Submission never leaves the page: the contact dialog closes, the
/// confirmation opens and the fields are cleared.
pub fn contact_submit_effect() -> SubmitEffect {
    SubmitEffect {
        send_request: false,
        dialogs: [(Dialog::Contact, false), (Dialog::Confirmation, true)],
        reset_form: true,
    }
}

/// Contact form submission: hide the form's modal, show the confirmation.
pub struct ModalSwapper {
    _submit: EventListener,
}

struct SwapTargets {
    form: HtmlFormElement,
    contact: HtmlElement,
    confirmation: HtmlElement,
}

impl SwapTargets {
    fn dialog(&self, dialog: Dialog) -> &HtmlElement {
        match dialog {
            Dialog::Contact => &self.contact,
            Dialog::Confirmation => &self.confirmation,
        }
    }
}

impl ModalSwapper {
    pub fn attach(document: &Document, config: &PageConfig) -> Result<Self, EnhanceError> {
        let selectors = &config.selectors;
        let targets = Rc::new(SwapTargets {
            form: dom::require(document, &selectors.contact_form)?,
            contact: dom::require(document, &selectors.contact_modal)?,
            confirmation: dom::require(document, &selectors.confirmation_modal)?,
        });

        let form = targets.form.clone();
        let submit = EventListener::new(&form, "submit", move |event: Event| {
            let effect = contact_submit_effect();
            if !effect.send_request {
                event.prevent_default();
            }
            for (dialog, visible) in effect.dialogs {
                set_modal_visible(targets.dialog(dialog), visible);
            }
            if effect.reset_form {
                targets.form.reset();
            }
            info!("Contact form submitted");
        })?;

        Ok(Self { _submit: submit })
    }
}

/// Slide requested by a `data-slide` value, or `None` when it is not a
/// slide of a carousel with `slide_count` slides.
pub fn slide_index(raw: &str, slide_count: usize) -> Option<usize> {
    raw.trim()
        .parse::<usize>()
        .ok()
        .filter(|index| *index < slide_count)
}

/// Move the carousel inside `modal` to the slide named by `raw`.
fn show_slide(modal: &HtmlElement, selectors: &Selectors, raw: &str) {
    let Ok(Some(track)) = modal.query_selector(&selectors.carousel_track) else {
        debug!("Modal {:?} has no carousel", modal.id());
        return;
    };
    let Ok(track) = track.dyn_into::<HtmlElement>() else {
        return;
    };
    let slides = dom::all_within(&track, &selectors.carousel_slide).unwrap_or_default();
    let Some(index) = slide_index(raw, slides.len()) else {
        debug!("Ignoring slide {:?} of {}", raw, slides.len());
        return;
    };

    for (i, slide) in slides.iter().enumerate() {
        let _ = slide.class_list().toggle_with_force(ACTIVE_SLIDE_CLASS, i == index);
    }
    scroll_to_item(&track, &slides, index, ScrollBehavior::Instant);
}

/// Delegated `data-modal-open="<id>"` / `data-modal-close` handling.
pub struct ModalTriggers {
    _click: EventListener,
}

impl ModalTriggers {
    pub fn attach(document: &Document, config: &PageConfig) -> Result<Self, EnhanceError> {
        let owner = document.clone();
        let selectors = config.selectors.clone();
        let click = EventListener::new(document, "click", move |event: Event| {
            let Some(target) = dom::event_element(&event) else {
                return;
            };

            if let Some(trigger) = closest(&target, &format!("[{}]", OPEN_ATTR)) {
                let id = trigger.get_attribute(OPEN_ATTR).unwrap_or_default();
                match owner
                    .get_element_by_id(&id)
                    .and_then(|el| el.dyn_into::<HtmlElement>().ok())
                {
                    Some(modal) => {
                        event.prevent_default();
                        // Shown first so the slides have layout to measure.
                        set_modal_visible(&modal, true);
                        if let Some(raw) = trigger.get_attribute(SLIDE_ATTR) {
                            show_slide(&modal, &selectors, &raw);
                        }
                    }
                    None => debug!("No modal with id {:?}", id),
                }
                return;
            }

            if closest(&target, &format!("[{}]", CLOSE_ATTR)).is_some() {
                if let Some(modal) = closest(&target, MODAL_SELECTOR)
                    .and_then(|el| el.dyn_into::<HtmlElement>().ok())
                {
                    event.prevent_default();
                    set_modal_visible(&modal, false);
                }
            }
        })?;

        Ok(Self { _click: click })
    }
}

fn closest(element: &Element, selector: &str) -> Option<Element> {
    element.closest(selector).ok().flatten()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shown_and_hidden_modals_are_exact_inverses() {
        let shown = ModalPresentation::for_visible(true);
        assert!(shown.show_class);
        assert_eq!(shown.display, "block");
        assert_eq!(shown.aria_hidden, "false");

        let hidden = ModalPresentation::for_visible(false);
        assert!(!hidden.show_class);
        assert_eq!(hidden.display, "none");
        assert_eq!(hidden.aria_hidden, "true");
    }

    #[test]
    fn submitting_swaps_to_confirmation_without_sending() {
        let effect = contact_submit_effect();
        assert!(!effect.send_request);
        assert!(effect.reset_form);

        let visible = |dialog: Dialog| {
            effect
                .dialogs
                .iter()
                .rev()
                .find(|(d, _)| *d == dialog)
                .map(|(_, v)| *v)
        };
        assert_eq!(visible(Dialog::Contact), Some(false));
        assert_eq!(visible(Dialog::Confirmation), Some(true));
    }

    #[test]
    fn slide_index_accepts_only_existing_slides() {
        assert_eq!(slide_index("0", 5), Some(0));
        assert_eq!(slide_index(" 3 ", 5), Some(3));
        assert_eq!(slide_index("4", 5), Some(4));
        assert_eq!(slide_index("5", 5), None);
        assert_eq!(slide_index("-1", 5), None);
        assert_eq!(slide_index("two", 5), None);
        assert_eq!(slide_index("", 5), None);
        assert_eq!(slide_index("0", 0), None);
    }
}
