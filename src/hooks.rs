use crate::dom::EventListener;
use crate::error::warn_on_err;
use crate::timeline::TimelineHandle;
use crate::timing::FrameThrottle;
use yew::prelude::*;

/// Index of the card nearest to the timeline's scroll offset.
///
/// Measured once on first render, then re-measured at most once per
/// animation frame while the timeline scrolls.
#[hook]
pub fn use_active_card(timeline: &TimelineHandle) -> UseStateHandle<usize> {
    let active = {
        let timeline = timeline.clone();
        use_state(move || timeline.active_card().unwrap_or(0))
    };

    {
        let active = active.clone();
        use_effect_with(timeline.clone(), move |timeline| {
            let throttle = {
                let timeline = timeline.clone();
                FrameThrottle::new(move || {
                    if let Some(index) = timeline.active_card() {
                        active.set(index);
                    }
                })
            };
            let listener = warn_on_err(
                "Active indicator will not follow scrolling",
                EventListener::new(timeline.container(), "scroll", move |_| throttle.schedule()),
            );
            // Dropping the guard detaches the scroll listener on unmount.
            move || drop(listener)
        });
    }

    active
}
