//! The horizontally scrolling timeline: step sizing, button/keyboard
//! navigation and card position lookup.

use crate::config::{PageConfig, Timings};
use crate::direction::TextDirection;
use crate::dom::{self, EventListener};
use crate::error::EnhanceError;
use crate::geometry::{
    item_start, logical_offset, nearest_card, resolve_gap, resolve_step, scroll_left_for, step_from,
    ButtonState, Span, StepDirection,
};
use crate::timing::Debouncer;
use log::{debug, info};
use std::cell::Cell;
use std::ops::Deref;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlButtonElement, HtmlElement, KeyboardEvent, ScrollBehavior, ScrollToOptions};

/// Map a `KeyboardEvent.key` value to a timeline step.
pub fn step_for_key(key: &str) -> Option<StepDirection> {
    match key {
        "ArrowLeft" => Some(StepDirection::Backward),
        "ArrowRight" => Some(StepDirection::Forward),
        _ => None,
    }
}

/// Whether focus sits somewhere arrow keys move a text cursor.
pub fn is_editing_target(tag_name: &str, content_editable: bool) -> bool {
    content_editable || tag_name.eq_ignore_ascii_case("INPUT") || tag_name.eq_ignore_ascii_case("TEXTAREA")
}

fn focus_is_editable(document: &Document) -> bool {
    document
        .active_element()
        .map(|el| {
            let editable = el
                .dyn_ref::<HtmlElement>()
                .map(|h| h.is_content_editable())
                .unwrap_or(false);
            is_editing_target(&el.tag_name(), editable)
        })
        .unwrap_or(false)
}

/// A computed style value, or an empty string when unavailable.
fn computed_property(element: &Element, name: &str) -> String {
    gloo_utils::window()
        .get_computed_style(element)
        .ok()
        .flatten()
        .and_then(|style| style.get_property_value(name).ok())
        .unwrap_or_default()
}

fn scroll_options(left: f64, behavior: ScrollBehavior) -> ScrollToOptions {
    let options = ScrollToOptions::new();
    options.set_left(left);
    options.set_behavior(behavior);
    options
}

/// Inline direction `container` lays its content out in.
pub fn text_direction(container: &Element) -> TextDirection {
    TextDirection::from_css(&computed_property(container, "direction"))
}

/// Offset of each item's inline start edge within `container`'s scrolled
/// content, independent of `offsetParent`.
pub fn item_starts(container: &HtmlElement, items: &[HtmlElement]) -> Vec<f64> {
    let direction = text_direction(container);
    let left = container.get_bounding_client_rect().left() + f64::from(container.client_left());
    let viewport = Span {
        left,
        right: left + f64::from(container.client_width()),
    };
    let scroll_left = f64::from(container.scroll_left());
    items
        .iter()
        .map(|item| {
            let rect = item.get_bounding_client_rect();
            let span = Span {
                left: rect.left(),
                right: rect.right(),
            };
            item_start(span, viewport, scroll_left, direction)
        })
        .collect()
}

/// Scroll `container` so `items[index]` sits at its inline start. Returns
/// `false` when there is no such item.
pub fn scroll_to_item(container: &HtmlElement, items: &[HtmlElement], index: usize, behavior: ScrollBehavior) -> bool {
    let Some(start) = item_starts(container, items).get(index).copied() else {
        return false;
    };
    let left = scroll_left_for(start, text_direction(container));
    container.scroll_to_with_scroll_to_options(&scroll_options(left, behavior));
    true
}

/// Measured state of the timeline. The step is the only mutable field and
/// changes on resize.
pub struct Timeline {
    container: HtmlElement,
    cards: Vec<HtmlElement>,
    left_button: Option<HtmlButtonElement>,
    right_button: Option<HtmlButtonElement>,
    step: Cell<f64>,
    timings: Timings,
}

impl Timeline {
    pub fn container(&self) -> &HtmlElement {
        &self.container
    }

    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    pub fn step(&self) -> f64 {
        self.step.get()
    }

    /// `round(first card width + gap)`, or 0 without cards.
    pub fn compute_step(&self) -> f64 {
        let card_width = self.cards.first().map(|c| c.get_bounding_client_rect().width());
        step_from(card_width, self.read_gap())
    }

    fn read_gap(&self) -> f64 {
        let container_gap = computed_property(&self.container, "gap");
        let root_gap = computed_property(&gloo_utils::document_element(), "--gap");
        resolve_gap(&container_gap, &root_gap, self.timings.default_gap_px)
    }

    pub fn refresh_step(&self) {
        let step = resolve_step(self.compute_step(), self.step.get(), self.timings.fallback_step_px);
        if step != self.step.get() {
            debug!("Timeline step set to {}px", step);
            self.step.set(step);
        }
    }

    pub fn button_state(&self) -> ButtonState {
        ButtonState::from_scroll(
            f64::from(self.container.scroll_left()),
            f64::from(self.container.scroll_width()),
            f64::from(self.container.client_width()),
            self.timings.edge_tolerance_px,
            text_direction(&self.container),
        )
    }

    pub fn update_buttons(&self) {
        if self.left_button.is_none() && self.right_button.is_none() {
            return;
        }
        let state = self.button_state();
        if let Some(button) = &self.left_button {
            button.set_disabled(state.left_disabled);
        }
        if let Some(button) = &self.right_button {
            button.set_disabled(state.right_disabled);
        }
    }

    /// Smooth-scroll one step. A no-op when already at that edge.
    pub fn scroll_by_step(&self, direction: StepDirection) {
        if !self.button_state().allows(direction) {
            return;
        }
        let options = scroll_options(direction.sign() * self.step.get(), ScrollBehavior::Smooth);
        self.container.scroll_by_with_scroll_to_options(&options);
    }

    /// Inline-start offset of every card within the scrollable content.
    pub fn card_starts(&self) -> Vec<f64> {
        item_starts(&self.container, &self.cards)
    }

    pub fn active_card(&self) -> Option<usize> {
        let offset = logical_offset(
            f64::from(self.container.scroll_left()),
            text_direction(&self.container),
        );
        nearest_card(&self.card_starts(), offset)
    }

    pub fn scroll_to_card(&self, index: usize) {
        if !scroll_to_item(&self.container, &self.cards, index, ScrollBehavior::Smooth) {
            debug!("No timeline card at index {}", index);
        }
    }
}

/// Shared handle to a [`Timeline`]; equal only to clones of itself.
#[derive(Clone)]
pub struct TimelineHandle(Rc<Timeline>);

impl PartialEq for TimelineHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Deref for TimelineHandle {
    type Target = Timeline;

    fn deref(&self) -> &Timeline {
        &self.0
    }
}

/// The attached timeline plus the listeners driving it.
pub struct TimelineNavigator {
    timeline: TimelineHandle,
    _listeners: Vec<EventListener>,
}

impl TimelineNavigator {
    pub fn attach(document: &Document, config: &PageConfig) -> Result<Self, EnhanceError> {
        let selectors = &config.selectors;
        let timings = &config.timings;

        let container: HtmlElement = dom::require(document, &selectors.timeline)?;
        let cards = dom::all_within(&container, &selectors.card)?;
        let timeline = TimelineHandle(Rc::new(Timeline {
            container,
            cards,
            left_button: dom::optional(document, &selectors.left_button),
            right_button: dom::optional(document, &selectors.right_button),
            step: Cell::new(0.0),
            timings: timings.clone(),
        }));
        timeline.refresh_step();
        timeline.update_buttons();

        let mut listeners = Vec::new();

        for (button, direction) in [
            (&timeline.left_button, StepDirection::Backward),
            (&timeline.right_button, StepDirection::Forward),
        ] {
            if let Some(button) = button {
                let timeline = timeline.clone();
                listeners.push(EventListener::new(button, "click", move |_| {
                    timeline.scroll_by_step(direction)
                })?);
            }
        }

        let window = gloo_utils::window();
        {
            let timeline = timeline.clone();
            let debouncer = Debouncer::new(timings.resize_debounce_ms);
            listeners.push(EventListener::new(&window, "resize", move |_| {
                let timeline = timeline.clone();
                debouncer.call(move || {
                    timeline.refresh_step();
                    timeline.update_buttons();
                });
            })?);
        }
        {
            let scrolled = timeline.clone();
            let debouncer = Debouncer::new(timings.scroll_debounce_ms);
            listeners.push(EventListener::new(timeline.container(), "scroll", move |_| {
                let timeline = scrolled.clone();
                debouncer.call(move || timeline.update_buttons());
            })?);
        }
        {
            let timeline = timeline.clone();
            let document = document.clone();
            listeners.push(EventListener::new(&window, "keydown", move |event: Event| {
                let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                    return;
                };
                if focus_is_editable(&document) {
                    return;
                }
                if let Some(direction) = step_for_key(&event.key()) {
                    event.prevent_default();
                    timeline.scroll_by_step(direction);
                }
            })?);
        }

        info!(
            "Timeline attached: {} cards, step {}px",
            timeline.card_count(),
            timeline.step()
        );
        Ok(Self {
            timeline,
            _listeners: listeners,
        })
    }

    pub fn handle(&self) -> TimelineHandle {
        self.timeline.clone()
    }
}
