//! Keeps `<html dir>` and the body's RTL class in line with `<html lang>`.
//!
//! Translation tools rewrite `lang` on the root element. A mutation observer
//! catches ordinary attribute changes; a periodic poll reconciles the cases
//! where a tool replaces the document state without a mutation record.

use crate::config::{PageConfig, RTL_BODY_CLASS, RTL_LANGUAGES};
use crate::error::EnhanceError;
use gloo_timers::callback::Interval;
use log::info;
use once_cell::sync::Lazy;
use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{MutationObserver, MutationObserverInit};

static RTL_SET: Lazy<HashSet<&'static str>> = Lazy::new(|| RTL_LANGUAGES.into_iter().collect());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextDirection {
    Ltr,
    Rtl,
}

impl TextDirection {
    pub fn as_attr(self) -> &'static str {
        match self {
            TextDirection::Ltr => "ltr",
            TextDirection::Rtl => "rtl",
        }
    }

    /// The page writes that express this direction.
    pub fn page_write(self) -> DirectionWrite {
        DirectionWrite {
            dir_attr: self.as_attr(),
            rtl_class: self == TextDirection::Rtl,
        }
    }

    /// Parse a computed CSS `direction` value; anything but `rtl` is LTR.
    pub fn from_css(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("rtl") {
            TextDirection::Rtl
        } else {
            TextDirection::Ltr
        }
    }
}

/// `<html dir>` value and body RTL class for one direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectionWrite {
    pub dir_attr: &'static str,
    pub rtl_class: bool,
}

/// Primary subtag of a language tag, lowercased: `"AR-eg"` -> `"ar"`.
pub fn primary_subtag(lang: &str) -> String {
    lang.trim()
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase()
}

pub fn direction_for_lang(lang: &str) -> TextDirection {
    if RTL_SET.contains(primary_subtag(lang).as_str()) {
        TextDirection::Rtl
    } else {
        TextDirection::Ltr
    }
}

/// What the page currently shows.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectionSnapshot {
    pub lang: String,
    pub dir: Option<String>,
    pub rtl_class: bool,
}

/// Last direction written to the page.
#[derive(Debug, Default)]
pub struct DirectionState {
    applied: Option<(String, TextDirection)>,
}

impl DirectionState {
    /// Decide whether the page needs rewriting. Returns the direction to
    /// apply, or `None` when the page already matches its language.
    pub fn reconcile(&mut self, snapshot: &DirectionSnapshot) -> Option<TextDirection> {
        let direction = direction_for_lang(&snapshot.lang);
        let lang_changed = self
            .applied
            .as_ref()
            .map_or(true, |(lang, _)| *lang != snapshot.lang);
        let page_drifted = snapshot.dir.as_deref() != Some(direction.as_attr())
            || snapshot.rtl_class != (direction == TextDirection::Rtl);

        if !lang_changed && !page_drifted {
            return None;
        }
        self.applied = Some((snapshot.lang.clone(), direction));
        Some(direction)
    }
}

fn snapshot() -> DirectionSnapshot {
    let root = gloo_utils::document_element();
    DirectionSnapshot {
        lang: root.get_attribute("lang").unwrap_or_default(),
        dir: root.get_attribute("dir"),
        rtl_class: gloo_utils::document()
            .body()
            .map(|body| body.class_list().contains(RTL_BODY_CLASS))
            .unwrap_or(false),
    }
}

fn sync(state: &RefCell<DirectionState>) {
    let current = snapshot();
    let Some(direction) = state.borrow_mut().reconcile(&current) else {
        return;
    };
    let write = direction.page_write();
    let _ = gloo_utils::document_element().set_attribute("dir", write.dir_attr);
    if let Some(body) = gloo_utils::document().body() {
        let _ = body.class_list().toggle_with_force(RTL_BODY_CLASS, write.rtl_class);
    }
    info!("Document direction set to {} for lang {:?}", direction.as_attr(), current.lang);
}

/// Observer and poll keeping the document direction current.
pub struct DirectionSync {
    observer: MutationObserver,
    _on_mutation: Closure<dyn FnMut(js_sys::Array, MutationObserver)>,
    _poll: Interval,
}

impl DirectionSync {
    pub fn attach(config: &PageConfig) -> Result<Self, EnhanceError> {
        let state = Rc::new(RefCell::new(DirectionState::default()));
        sync(&state);

        let on_mutation = {
            let state = state.clone();
            Closure::<dyn FnMut(js_sys::Array, MutationObserver)>::new(
                move |_: js_sys::Array, _: MutationObserver| sync(&state),
            )
        };
        let observer = MutationObserver::new(on_mutation.as_ref().unchecked_ref())?;
        let options = MutationObserverInit::new();
        options.set_attributes(true);
        options.set_attribute_filter(&js_sys::Array::of1(&JsValue::from_str("lang")));
        observer.observe_with_options(&gloo_utils::document_element(), &options)?;

        let poll = Interval::new(config.timings.lang_poll_ms, move || sync(&state));

        Ok(Self {
            observer,
            _on_mutation: on_mutation,
            _poll: poll,
        })
    }
}

impl Drop for DirectionSync {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(lang: &str, dir: Option<&str>, rtl_class: bool) -> DirectionSnapshot {
        DirectionSnapshot {
            lang: lang.to_string(),
            dir: dir.map(str::to_string),
            rtl_class,
        }
    }

    #[test]
    fn rtl_languages() {
        for lang in ["ar", "he", "fa", "ur", "AR", "ar-EG", "fa_IR"] {
            assert_eq!(direction_for_lang(lang), TextDirection::Rtl, "{lang}");
        }
        for lang in ["en", "en-US", "fr", "", "arn"] {
            assert_eq!(direction_for_lang(lang), TextDirection::Ltr, "{lang}");
        }
    }

    /// The snapshot the page shows after `write` lands.
    fn written(lang: &str, write: DirectionWrite) -> DirectionSnapshot {
        page(lang, Some(write.dir_attr), write.rtl_class)
    }

    #[test]
    fn page_writes_follow_language() {
        let mut state = DirectionState::default();

        let write = state.reconcile(&page("ar", Some("ltr"), false)).unwrap().page_write();
        assert_eq!(write, DirectionWrite { dir_attr: "rtl", rtl_class: true });
        assert_eq!(state.reconcile(&written("ar", write)), None);

        let write = state.reconcile(&written("en", write)).unwrap().page_write();
        assert_eq!(write, DirectionWrite { dir_attr: "ltr", rtl_class: false });
        assert_eq!(state.reconcile(&written("en", write)), None);
    }

    #[test]
    fn css_direction_parsing() {
        assert_eq!(TextDirection::from_css("rtl"), TextDirection::Rtl);
        assert_eq!(TextDirection::from_css(" RTL "), TextDirection::Rtl);
        assert_eq!(TextDirection::from_css("ltr"), TextDirection::Ltr);
        assert_eq!(TextDirection::from_css(""), TextDirection::Ltr);
    }

    #[test]
    fn arabic_switches_to_rtl() {
        let mut state = DirectionState::default();
        assert_eq!(state.reconcile(&page("ar", None, false)), Some(TextDirection::Rtl));
    }

    #[test]
    fn english_switches_back_to_ltr() {
        let mut state = DirectionState::default();
        state.reconcile(&page("ar", None, false));
        assert_eq!(
            state.reconcile(&page("en", Some("rtl"), true)),
            Some(TextDirection::Ltr)
        );
    }

    #[test]
    fn settled_page_needs_no_write() {
        let mut state = DirectionState::default();
        state.reconcile(&page("ar", None, false));
        assert_eq!(state.reconcile(&page("ar", Some("rtl"), true)), None);
        assert_eq!(state.reconcile(&page("ar", Some("rtl"), true)), None);
    }

    #[test]
    fn poll_repairs_external_drift() {
        let mut state = DirectionState::default();
        state.reconcile(&page("he", None, false));
        // Something rewrote `dir` behind our back; language unchanged.
        assert_eq!(
            state.reconcile(&page("he", Some("ltr"), true)),
            Some(TextDirection::Rtl)
        );
        // Body class stripped.
        assert_eq!(
            state.reconcile(&page("he", Some("rtl"), false)),
            Some(TextDirection::Rtl)
        );
    }

    #[test]
    fn first_run_on_ltr_page_still_records_language() {
        let mut state = DirectionState::default();
        assert_eq!(state.reconcile(&page("en", Some("ltr"), false)), Some(TextDirection::Ltr));
        assert_eq!(state.reconcile(&page("en", Some("ltr"), false)), None);
    }
}
