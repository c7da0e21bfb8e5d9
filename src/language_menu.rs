use crate::config::PageConfig;
use crate::dom::{self, EventListener};
use crate::error::EnhanceError;
use log::{debug, info};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys::{Document, Event, HtmlElement, KeyboardEvent, Node};

pub const OPEN_CLASS: &str = "open";
const LANG_OPTION_SELECTOR: &str = "[data-lang]";

/// Validate a `data-lang` value before it is written to `<html lang>`.
pub fn normalize_lang(raw: &str) -> Option<String> {
    let lang = raw.trim().replace('_', "-");
    let valid = !lang.is_empty()
        && lang
            .split('-')
            .all(|part| !part.is_empty() && part.chars().all(|c| c.is_ascii_alphanumeric()));
    valid.then_some(lang)
}

struct Menu {
    toggle: HtmlElement,
    dropdown: HtmlElement,
}

impl Menu {
    fn is_open(&self) -> bool {
        self.dropdown.class_list().contains(OPEN_CLASS)
    }

    fn set_open(&self, open: bool) {
        let _ = self.dropdown.class_list().toggle_with_force(OPEN_CLASS, open);
        let _ = self
            .toggle
            .set_attribute("aria-expanded", if open { "true" } else { "false" });
    }

    fn contains(&self, node: &Node) -> bool {
        self.toggle.contains(Some(node)) || self.dropdown.contains(Some(node))
    }
}

/// Language dropdown: toggle, choose, dismiss.
pub struct LanguageMenu {
    _listeners: Vec<EventListener>,
}

impl LanguageMenu {
    pub fn attach(document: &Document, config: &PageConfig) -> Result<Self, EnhanceError> {
        let selectors = &config.selectors;
        let menu = Rc::new(Menu {
            toggle: dom::require(document, &selectors.lang_toggle)?,
            dropdown: dom::require(document, &selectors.lang_dropdown)?,
        });
        menu.set_open(false);

        let mut listeners = Vec::new();
        {
            let (menu, toggle) = (menu.clone(), menu.toggle.clone());
            listeners.push(EventListener::new(&toggle, "click", move |event: Event| {
                event.prevent_default();
                menu.set_open(!menu.is_open());
            })?);
        }
        {
            let (menu, dropdown) = (menu.clone(), menu.dropdown.clone());
            listeners.push(EventListener::new(&dropdown, "click", move |event: Event| {
                let Some(option) = dom::event_element(&event)
                    .and_then(|el| el.closest(LANG_OPTION_SELECTOR).ok().flatten())
                else {
                    return;
                };
                event.prevent_default();
                let raw = option.get_attribute("data-lang").unwrap_or_default();
                match normalize_lang(&raw) {
                    Some(lang) => {
                        // Direction sync reacts to this attribute change.
                        let _ = gloo_utils::document_element().set_attribute("lang", &lang);
                        info!("Language switched to {}", lang);
                    }
                    None => debug!("Ignoring invalid data-lang {:?}", raw),
                }
                menu.set_open(false);
            })?);
        }
        {
            let menu = menu.clone();
            listeners.push(EventListener::new(document, "click", move |event: Event| {
                if !menu.is_open() {
                    return;
                }
                let inside = event
                    .target()
                    .and_then(|t| t.dyn_into::<Node>().ok())
                    .map(|node| menu.contains(&node))
                    .unwrap_or(false);
                if !inside {
                    menu.set_open(false);
                }
            })?);
        }
        {
            let menu = menu.clone();
            listeners.push(EventListener::new(document, "keydown", move |event: Event| {
                let escape = event
                    .dyn_ref::<KeyboardEvent>()
                    .map(|e| e.key() == "Escape")
                    .unwrap_or(false);
                if escape && menu.is_open() {
                    menu.set_open(false);
                    let _ = menu.toggle.focus();
                }
            })?);
        }

        Ok(Self {
            _listeners: listeners,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_language_tags() {
        assert_eq!(normalize_lang("ar"), Some("ar".to_string()));
        assert_eq!(normalize_lang(" en-US "), Some("en-US".to_string()));
        assert_eq!(normalize_lang("pt_BR"), Some("pt-BR".to_string()));
    }

    #[test]
    fn rejects_malformed_tags() {
        assert_eq!(normalize_lang(""), None);
        assert_eq!(normalize_lang("  "), None);
        assert_eq!(normalize_lang("en-"), None);
        assert_eq!(normalize_lang("en us"), None);
        assert_eq!(normalize_lang("\"><script>"), None);
    }
}
