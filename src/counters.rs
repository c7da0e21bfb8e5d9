//! Count-up animation for statistic numbers.
//!
//! Each `.stat-number` element carries `data-target` (the final number) and
//! an optional `data-suffix` (`"+"`, `"%"`, `"k"`...). When the element first
//! becomes visible its text eases from zero up to the target.

use crate::config::PageConfig;
use crate::dom::{self, VisibilityWatch};
use crate::error::EnhanceError;
use crate::utils::decimal_places;
use log::{debug, info};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, Node};

/// The number a counter animates towards.
#[derive(Debug, Clone, PartialEq)]
pub struct StatTarget {
    pub value: f64,
    pub precision: usize,
    pub suffix: String,
}

impl StatTarget {
    /// Parse the `data-target` / `data-suffix` pair. Non-numeric targets are rejected.
    pub fn parse(target: &str, suffix: Option<&str>) -> Option<Self> {
        let value = target.trim().parse::<f64>().ok().filter(|v| v.is_finite())?;
        Some(Self {
            value,
            precision: decimal_places(target),
            suffix: suffix.unwrap_or_default().to_string(),
        })
    }

    pub fn format(&self, value: f64) -> String {
        format!("{:.*}{}", self.precision, value, self.suffix)
    }
}

/// `1 - (1 - t)^3`: fast start, gentle landing.
pub fn ease_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// Time-driven state of one counter. Starts at most once.
#[derive(Debug, Clone)]
pub struct CounterAnimation {
    target: StatTarget,
    duration_ms: f64,
    started_at: Option<f64>,
}

impl CounterAnimation {
    pub fn new(target: StatTarget, duration_ms: f64) -> Self {
        Self {
            target,
            duration_ms,
            started_at: None,
        }
    }

    /// Start the animation at `now`. Returns `false` if it already started.
    pub fn begin(&mut self, now: f64) -> bool {
        if self.started_at.is_some() {
            return false;
        }
        self.started_at = Some(now);
        true
    }

    pub fn progress(&self, now: f64) -> f64 {
        match self.started_at {
            None => 0.0,
            Some(_) if self.duration_ms <= 0.0 => 1.0,
            Some(start) => ((now - start) / self.duration_ms).clamp(0.0, 1.0),
        }
    }

    pub fn is_finished(&self, now: f64) -> bool {
        self.progress(now) >= 1.0
    }

    pub fn value_at(&self, now: f64) -> f64 {
        let progress = self.progress(now);
        if progress >= 1.0 {
            return self.target.value;
        }
        self.target.value * ease_out_cubic(progress)
    }

    pub fn text_at(&self, now: f64) -> String {
        self.target.format(self.value_at(now))
    }
}

fn now_ms() -> f64 {
    gloo_utils::window()
        .performance()
        .map(|p| p.now())
        .unwrap_or_default()
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

fn request_frame(frame: &FrameCallback) {
    let callback = frame.borrow();
    if let Some(callback) = callback.as_ref() {
        let _ = gloo_utils::window().request_animation_frame(callback.as_ref().unchecked_ref());
    }
}

/// Drive `animation` on `element` with requestAnimationFrame until it lands.
fn run(element: HtmlElement, animation: Rc<RefCell<CounterAnimation>>) {
    let frame: FrameCallback = Rc::new(RefCell::new(None));
    let next = frame.clone();

    *frame.borrow_mut() = Some(Closure::new(move |now: f64| {
        let anim = animation.borrow();
        element.set_text_content(Some(&anim.text_at(now)));
        if anim.is_finished(now) {
            // Release the closure; nothing else references it.
            let _ = next.borrow_mut().take();
            return;
        }
        request_frame(&next);
    }));

    request_frame(&frame);
}

/// All stat counters on the page.
pub struct StatCounters {
    _watch: VisibilityWatch,
}

impl StatCounters {
    pub fn attach(document: &Document, config: &PageConfig) -> Result<Self, EnhanceError> {
        let selector = &config.selectors.stat;
        let duration = config.timings.counter_duration_ms;

        let counters: Vec<(HtmlElement, Rc<RefCell<CounterAnimation>>)> = dom::all(document, selector)?
            .into_iter()
            .filter_map(|el| {
                let target = el.get_attribute("data-target")?;
                let suffix = el.get_attribute("data-suffix");
                match StatTarget::parse(&target, suffix.as_deref()) {
                    Some(stat) => Some((el, Rc::new(RefCell::new(CounterAnimation::new(stat, duration))))),
                    None => {
                        debug!("Skipping stat with non-numeric target {:?}", target);
                        None
                    }
                }
            })
            .collect();
        if counters.is_empty() {
            return Err(EnhanceError::MissingElement(selector.clone()));
        }

        let elements: Vec<HtmlElement> = counters.iter().map(|(el, _)| el.clone()).collect();
        let watch = VisibilityWatch::once(&elements, config.timings.counter_threshold, move |target: &Element| {
            let target: &Node = target;
            let Some((element, animation)) = counters.iter().find(|(el, _)| el.is_same_node(Some(target))) else {
                return;
            };
            if animation.borrow_mut().begin(now_ms()) {
                run(element.clone(), animation.clone());
            }
        })?;
        info!("Stat counters watching {} elements", elements.len());
        Ok(Self { _watch: watch })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counter(target: &str, suffix: Option<&str>, duration_ms: f64) -> CounterAnimation {
        CounterAnimation::new(StatTarget::parse(target, suffix).unwrap(), duration_ms)
    }

    #[test]
    fn parses_targets_and_suffixes() {
        let stat = StatTarget::parse("250", Some("+")).unwrap();
        assert_eq!(stat.value, 250.0);
        assert_eq!(stat.precision, 0);
        assert_eq!(stat.suffix, "+");

        let stat = StatTarget::parse(" 4.8 ", None).unwrap();
        assert_eq!(stat.precision, 1);
        assert_eq!(stat.format(4.8), "4.8");

        assert!(StatTarget::parse("lots", None).is_none());
        assert!(StatTarget::parse("", None).is_none());
    }

    #[test]
    fn easing_hits_both_ends() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        assert!(ease_out_cubic(0.5) > 0.5);
        assert_eq!(ease_out_cubic(3.0), 1.0);
    }

    #[test]
    fn reaches_target_at_duration() {
        let mut anim = counter("250", None, 2000.0);
        assert!(anim.begin(1000.0));

        assert_eq!(anim.text_at(1000.0), "0");
        let midway = anim.value_at(2000.0);
        assert!(midway > 0.0 && midway < 250.0);
        assert!(!anim.is_finished(2999.0));

        assert!(anim.is_finished(3000.0));
        assert_eq!(anim.text_at(3000.0), "250");
        assert_eq!(anim.text_at(10_000.0), "250");
    }

    #[test]
    fn value_never_decreases() {
        let mut anim = counter("1200", Some("k"), 2000.0);
        anim.begin(0.0);
        let mut previous = 0.0;
        for t in (0..=2000).step_by(50) {
            let value = anim.value_at(t as f64);
            assert!(value >= previous);
            previous = value;
        }
        assert_eq!(anim.text_at(2000.0), "1200k");
    }

    #[test]
    fn animates_only_once() {
        let mut anim = counter("250", None, 2000.0);
        assert!(anim.begin(0.0));
        assert!(!anim.begin(5000.0));
        // The first start time is kept.
        assert!(anim.is_finished(2000.0));
    }

    #[test]
    fn not_started_shows_zero() {
        let anim = counter("99.5", Some("%"), 2000.0);
        assert_eq!(anim.text_at(123.0), "0.0%");
    }

    #[test]
    fn zero_duration_jumps_to_target() {
        let mut anim = counter("42", None, 0.0);
        anim.begin(10.0);
        assert_eq!(anim.text_at(10.0), "42");
    }
}
