//! Pure timeline geometry: step size, button state and nearest-card lookup.
//!
//! Nothing in here touches the DOM; [`crate::timeline`] measures the page
//! and feeds the numbers through these functions.

use crate::direction::TextDirection;
use crate::utils::parse_leading_number;

/// Direction of a single step through the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepDirection {
    Backward,
    Forward,
}

impl StepDirection {
    pub fn sign(self) -> f64 {
        match self {
            StepDirection::Backward => -1.0,
            StepDirection::Forward => 1.0,
        }
    }
}

/// Scroll distance for one card: `round(card_width + gap)`, or 0 with no card.
pub fn step_from(card_width: Option<f64>, gap: f64) -> f64 {
    match card_width {
        Some(width) => (width + gap).round(),
        None => 0.0,
    }
}

/// Pick the first usable step: freshly measured, then last known, then fallback.
pub fn resolve_step(measured: f64, last_known: f64, fallback: f64) -> f64 {
    [measured, last_known]
        .into_iter()
        .find(|s| *s > 0.0)
        .unwrap_or(fallback)
}

/// Resolve the inter-card gap from computed style values.
///
/// A non-empty container `gap` wins even when it does not parse (`normal`
/// means no gap). Otherwise the root `--gap` custom property is used, then
/// `default_gap`.
pub fn resolve_gap(container_gap: &str, root_gap: &str, default_gap: f64) -> f64 {
    if !container_gap.trim().is_empty() {
        return parse_leading_number(container_gap).unwrap_or(0.0);
    }
    parse_leading_number(root_gap).unwrap_or(default_gap)
}

/// Largest reachable scroll offset.
pub fn max_scroll(scroll_width: f64, client_width: f64) -> f64 {
    (scroll_width - client_width).max(0.0)
}

/// Distance of the viewport from the content's physical left edge, in `[0, max]`.
///
/// Browsers report `scrollLeft` of a right-to-left container in `[-max, 0]`,
/// with 0 at the inline start (the right edge).
pub fn physical_offset(scroll_left: f64, max: f64, direction: TextDirection) -> f64 {
    let offset = match direction {
        TextDirection::Ltr => scroll_left,
        TextDirection::Rtl => max + scroll_left,
    };
    offset.clamp(0.0, max)
}

/// Distance scrolled away from the inline start edge.
pub fn logical_offset(scroll_left: f64, direction: TextDirection) -> f64 {
    match direction {
        TextDirection::Ltr => scroll_left,
        TextDirection::Rtl => -scroll_left,
    }
}

/// The `scrollLeft` that puts the viewport `offset` past the inline start.
pub fn scroll_left_for(offset: f64, direction: TextDirection) -> f64 {
    match direction {
        TextDirection::Ltr => offset,
        TextDirection::Rtl => -offset,
    }
}

/// Horizontal extent of a box in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span {
    pub left: f64,
    pub right: f64,
}

/// Offset of `item`'s inline start edge from the start of the scrolled
/// content, given the container's visible `viewport` and its `scroll_left`.
pub fn item_start(item: Span, viewport: Span, scroll_left: f64, direction: TextDirection) -> f64 {
    match direction {
        TextDirection::Ltr => item.left - (viewport.left - scroll_left),
        TextDirection::Rtl => (viewport.right - scroll_left) - item.right,
    }
}

/// Enabled/disabled state of the two navigation buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonState {
    pub left_disabled: bool,
    pub right_disabled: bool,
}

impl ButtonState {
    /// Buttons are physical: left is disabled at the left edge whatever the
    /// container's direction.
    pub fn from_scroll(
        scroll_left: f64,
        scroll_width: f64,
        client_width: f64,
        tolerance: f64,
        direction: TextDirection,
    ) -> Self {
        let max = max_scroll(scroll_width, client_width);
        let position = physical_offset(scroll_left, max, direction);
        Self {
            left_disabled: position <= tolerance,
            right_disabled: position >= max - tolerance,
        }
    }

    /// Whether a step in `direction` can still move the container.
    pub fn allows(self, direction: StepDirection) -> bool {
        match direction {
            StepDirection::Backward => !self.left_disabled,
            StepDirection::Forward => !self.right_disabled,
        }
    }
}

/// Index of the card whose start offset is closest to `offset`, both
/// measured from the inline start.
///
/// Ties go to the lowest index. Returns `None` for an empty slice.
pub fn nearest_card(card_starts: &[f64], offset: f64) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (index, start) in card_starts.iter().enumerate() {
        let distance = (start - offset).abs();
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((index, distance)),
        }
    }
    best.map(|(index, _)| index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use TextDirection::{Ltr, Rtl};

    const TOLERANCE: f64 = 2.0;

    #[test]
    fn step_is_rounded_card_width_plus_gap() {
        assert_eq!(step_from(Some(320.0), 32.0), 352.0);
        assert_eq!(step_from(Some(287.4), 24.0), 311.0);
        assert_eq!(step_from(Some(287.6), 24.0), 312.0);
    }

    #[test]
    fn step_without_cards_is_zero_and_falls_back() {
        let measured = step_from(None, 32.0);
        assert_eq!(measured, 0.0);
        assert_eq!(resolve_step(measured, 300.0, 352.0), 300.0);
        assert_eq!(resolve_step(measured, 0.0, 352.0), 352.0);
        assert_eq!(resolve_step(340.0, 300.0, 352.0), 340.0);
    }

    #[test]
    fn gap_resolution_order() {
        assert_eq!(resolve_gap("24px", "40px", 32.0), 24.0);
        assert_eq!(resolve_gap("normal", "40px", 32.0), 0.0);
        assert_eq!(resolve_gap("", " 40px", 32.0), 40.0);
        assert_eq!(resolve_gap("", "", 32.0), 32.0);
    }

    #[test]
    fn buttons_disable_at_edges() {
        // 5 cards of 352px in a 700px viewport.
        let (scroll_width, client_width) = (1760.0, 700.0);

        let start = ButtonState::from_scroll(1.0, scroll_width, client_width, TOLERANCE, Ltr);
        assert!(start.left_disabled);
        assert!(!start.right_disabled);

        let middle = ButtonState::from_scroll(500.0, scroll_width, client_width, TOLERANCE, Ltr);
        assert!(!middle.left_disabled && !middle.right_disabled);

        let end = ButtonState::from_scroll(1058.5, scroll_width, client_width, TOLERANCE, Ltr);
        assert!(end.right_disabled);
    }

    #[test]
    fn content_narrower_than_viewport_disables_both() {
        let state = ButtonState::from_scroll(0.0, 600.0, 700.0, TOLERANCE, Ltr);
        assert!(state.left_disabled && state.right_disabled);
    }

    #[test]
    fn stepping_past_the_end_does_not_move() {
        let (scroll_width, client_width) = (1760.0, 700.0);
        let max = max_scroll(scroll_width, client_width);
        let step = step_from(Some(320.0), 32.0);
        let mut position = 0.0;

        // Browsers clamp programmatic scrolling to [0, max].
        let step_forward = |position: &mut f64| {
            let state = ButtonState::from_scroll(*position, scroll_width, client_width, TOLERANCE, Ltr);
            if state.allows(StepDirection::Forward) {
                *position = (*position + StepDirection::Forward.sign() * step).min(max);
            }
        };

        for _ in 0..10 {
            step_forward(&mut position);
        }
        assert_eq!(position, max);

        let settled = position;
        step_forward(&mut position);
        step_forward(&mut position);
        assert!((position - settled).abs() <= TOLERANCE);
    }

    #[test]
    fn rtl_offsets_are_negative_from_the_right_edge() {
        let (scroll_width, client_width) = (1760.0, 700.0);

        // Inline start of an RTL container is its right edge.
        let start = ButtonState::from_scroll(0.0, scroll_width, client_width, TOLERANCE, Rtl);
        assert!(start.right_disabled);
        assert!(!start.left_disabled);

        let middle = ButtonState::from_scroll(-352.0, scroll_width, client_width, TOLERANCE, Rtl);
        assert!(middle.allows(StepDirection::Backward));
        assert!(middle.allows(StepDirection::Forward));

        let end = ButtonState::from_scroll(-1059.0, scroll_width, client_width, TOLERANCE, Rtl);
        assert!(end.left_disabled);
        assert!(!end.right_disabled);
    }

    #[test]
    fn rtl_stepping_reaches_the_left_edge_and_stops() {
        let (scroll_width, client_width) = (1760.0, 700.0);
        let max = max_scroll(scroll_width, client_width);
        let step = step_from(Some(320.0), 32.0);
        let mut scroll_left = 0.0;

        // RTL programmatic scrolling clamps to [-max, 0].
        let step_left = |scroll_left: &mut f64| {
            let state = ButtonState::from_scroll(*scroll_left, scroll_width, client_width, TOLERANCE, Rtl);
            if state.allows(StepDirection::Backward) {
                *scroll_left = (*scroll_left + StepDirection::Backward.sign() * step).max(-max);
            }
        };

        step_left(&mut scroll_left);
        assert_eq!(scroll_left, -352.0);
        for _ in 0..10 {
            step_left(&mut scroll_left);
        }
        assert_eq!(scroll_left, -max);
        step_left(&mut scroll_left);
        assert_eq!(scroll_left, -max);
    }

    #[test]
    fn offsets_convert_between_scroll_left_and_inline_start() {
        assert_eq!(physical_offset(300.0, 1060.0, Ltr), 300.0);
        assert_eq!(physical_offset(-300.0, 1060.0, Rtl), 760.0);
        assert_eq!(physical_offset(5.0, 1060.0, Rtl), 1060.0);
        assert_eq!(logical_offset(-704.0, Rtl), 704.0);
        assert_eq!(scroll_left_for(704.0, Rtl), -704.0);
        assert_eq!(scroll_left_for(704.0, Ltr), 704.0);
    }

    #[test]
    fn item_starts_measure_from_the_inline_start() {
        let viewport = Span { left: 100.0, right: 800.0 };

        // LTR, scrolled 352px: the second card sits at the viewport's left edge.
        let second = Span { left: 100.0, right: 420.0 };
        assert_eq!(item_start(second, viewport, 352.0, Ltr), 352.0);

        // RTL, scrolled 352px leftwards: the second card sits at the right edge.
        let second = Span { left: 480.0, right: 800.0 };
        let start = item_start(second, viewport, -352.0, Rtl);
        assert_eq!(start, 352.0);

        let starts = [0.0, start, 704.0];
        assert_eq!(nearest_card(&starts, logical_offset(-352.0, Rtl)), Some(1));
        assert_eq!(nearest_card(&starts, logical_offset(-10.0, Rtl)), Some(0));
    }

    #[test]
    fn nearest_card_minimizes_distance() {
        let lefts = [0.0, 352.0, 704.0, 1056.0];
        assert_eq!(nearest_card(&lefts, 0.0), Some(0));
        assert_eq!(nearest_card(&lefts, 170.0), Some(0));
        assert_eq!(nearest_card(&lefts, 190.0), Some(1));
        assert_eq!(nearest_card(&lefts, 2000.0), Some(3));
    }

    #[test]
    fn nearest_card_ties_pick_lowest_index() {
        let lefts = [0.0, 352.0, 704.0];
        assert_eq!(nearest_card(&lefts, 176.0), Some(0));
        assert_eq!(nearest_card(&lefts, 528.0), Some(1));
        assert_eq!(nearest_card(&[10.0, 10.0], 10.0), Some(0));
    }

    #[test]
    fn nearest_card_empty() {
        assert_eq!(nearest_card(&[], 100.0), None);
    }
}
