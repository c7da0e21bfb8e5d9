//! Presentation behavior for the marketing page: timeline navigation with
//! indicators, reveal-on-view, stat counters, RTL detection, the language
//! menu and the contact modals.
//!
//! Every behavior enhances markup the host page already contains. A missing
//! element only disables the behavior that needs it; the rest of the page
//! keeps working.

use log::{debug, info};
use std::cell::RefCell;
use web_sys::Document;
use yew::AppHandle;

pub mod components;
pub mod config;
pub mod counters;
pub mod direction;
pub mod dom;
pub mod error;
pub mod geometry;
pub mod hooks;
pub mod language_menu;
pub mod logging;
pub mod modals;
pub mod reveal;
pub mod timeline;
pub mod timing;
pub mod utils;

use components::{mount_indicators, IndicatorStrip};
use config::PageConfig;
use counters::StatCounters;
use direction::DirectionSync;
use error::EnhanceError;
use language_menu::LanguageMenu;
use modals::{ModalSwapper, ModalTriggers};
use reveal::RevealOnView;
use timeline::TimelineNavigator;

/// Keep `Ok` values, log and drop errors.
fn optional<T>(behavior: &str, result: Result<T, EnhanceError>) -> Option<T> {
    match result {
        Ok(value) => {
            debug!("{} attached", behavior);
            Some(value)
        }
        Err(e) => {
            debug!("Skipping {}: {}", behavior, e);
            None
        }
    }
}

/// Everything attached to one page. Dropping it detaches every listener,
/// observer and timer.
pub struct PageEnhancer {
    timeline: Option<TimelineNavigator>,
    indicators: Option<AppHandle<IndicatorStrip>>,
    reveal: Option<RevealOnView>,
    counters: Option<StatCounters>,
    direction: Option<DirectionSync>,
    language_menu: Option<LanguageMenu>,
    modal_swapper: Option<ModalSwapper>,
    modal_triggers: Option<ModalTriggers>,
}

impl PageEnhancer {
    pub fn attach(document: &Document, config: &PageConfig) -> Self {
        let timeline = optional("timeline", TimelineNavigator::attach(document, config));
        let indicators = timeline.as_ref().and_then(|nav| {
            optional(
                "timeline indicators",
                mount_indicators(document, &config.selectors, nav.handle()),
            )
        });

        let page = Self {
            timeline,
            indicators,
            reveal: optional("reveal-on-view", RevealOnView::attach(document, config)),
            counters: optional("stat counters", StatCounters::attach(document, config)),
            direction: optional("direction sync", DirectionSync::attach(config)),
            language_menu: optional("language menu", LanguageMenu::attach(document, config)),
            modal_swapper: optional("contact form", ModalSwapper::attach(document, config)),
            modal_triggers: optional("modal triggers", ModalTriggers::attach(document, config)),
        };
        info!("Page enhancer ready: {}", page.summary());
        page
    }

    fn summary(&self) -> String {
        [
            ("timeline", self.timeline.is_some()),
            ("indicators", self.indicators.is_some()),
            ("reveal", self.reveal.is_some()),
            ("counters", self.counters.is_some()),
            ("direction", self.direction.is_some()),
            ("language menu", self.language_menu.is_some()),
            ("contact form", self.modal_swapper.is_some()),
            ("modal triggers", self.modal_triggers.is_some()),
        ]
        .iter()
        .filter(|(_, on)| *on)
        .map(|(name, _)| *name)
        .collect::<Vec<_>>()
        .join(", ")
    }
}

impl Drop for PageEnhancer {
    fn drop(&mut self) {
        if let Some(indicators) = self.indicators.take() {
            indicators.destroy();
        }
    }
}

thread_local! {
    /// The enhancer for the current page, alive as long as the page is.
    static PAGE: RefCell<Option<PageEnhancer>> = const { RefCell::new(None) };
}

/// Attach every behavior to the current document.
pub fn start() -> Result<(), EnhanceError> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or(EnhanceError::NoDocument)?;
    let config = PageConfig::from_document(&document);
    let page = PageEnhancer::attach(&document, &config);
    PAGE.with(|p| *p.borrow_mut() = Some(page));
    Ok(())
}

/// Detach everything `start` attached.
pub fn stop() {
    PAGE.with(|p| p.borrow_mut().take());
}
