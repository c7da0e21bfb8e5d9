use crate::config::PageConfig;
use crate::dom::{self, VisibilityWatch};
use crate::error::EnhanceError;
use log::info;
use web_sys::Document;

pub const VISIBLE_CLASS: &str = "visible";

/// Adds [`VISIBLE_CLASS`] to each element the first time it scrolls into view.
pub struct RevealOnView {
    _watch: VisibilityWatch,
}

impl RevealOnView {
    pub fn attach(document: &Document, config: &PageConfig) -> Result<Self, EnhanceError> {
        let selector = &config.selectors.reveal;
        let targets = dom::all(document, selector)?;
        if targets.is_empty() {
            return Err(EnhanceError::MissingElement(selector.clone()));
        }

        let watch = VisibilityWatch::once(&targets, config.timings.reveal_threshold, |element| {
            let _ = element.class_list().add_1(VISIBLE_CLASS);
        })?;
        info!("Reveal-on-view watching {} elements", targets.len());
        Ok(Self { _watch: watch })
    }
}
